//! Test module for bcall-core
//!
//! This module contains scenario tests for:
//! - Open dispatch per bookmark type and open-all ordering
//! - Paged navigation (pages, focus, history, shortcut keys)
//! - Fuzzy navigation (flatten/sort, layer replacement, open-all)
//! - Configuration boundaries (validation, legacy files)

mod config_tests;
mod dispatch_tests;
