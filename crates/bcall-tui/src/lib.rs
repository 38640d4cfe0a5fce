//! Terminal front end for the bcall bookmark picker.
//!
//! Wires the navigators from `bcall-core` to a crossterm event loop, renders
//! them with ratatui, and backs host capabilities with desktop programs.

pub mod app;
pub mod cli;
pub mod colors;
pub mod host;
pub mod keys;
pub mod render;
