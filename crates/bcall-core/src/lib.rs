//! Navigator core for the bcall bookmark picker.
//!
//! Two browsing modes share one dispatch path: [`PagedNavigator`] pages a
//! layer of bookmarks under a shortcut alphabet, [`FuzzyNavigator`] filters a
//! (optionally flattened) layer by fuzzy-matching display names. Opening an
//! item goes through [`OpenService`], which talks to whatever host
//! [`Capabilities`] were injected at session start.

pub mod capability;
pub mod config;
pub mod display;
pub mod input;
pub mod listener;
pub mod navigator;
pub mod search;

mod dispatch;
mod error;
mod store;

#[cfg(test)]
mod tests;

pub use capability::{Capabilities, CapabilityError, CapabilityResult};
pub use dispatch::{
    OpenAllOptions, OpenAllReport, OpenOutcome, OpenService, OpenTarget, collect_open_targets,
};
pub use error::{ConfigError, Error, Result};
pub use listener::{KeyListener, Subscription};
pub use navigator::{FuzzyNavigator, FuzzyOutcome, NavOutcome, PagedNavigator};
pub use store::BookmarkStore;

pub use bcall_types::*;
