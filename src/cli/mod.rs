// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Command-line interface for the joint collector.
//!
//! Thin front end over the library: parses paths and joint toggles,
//! configures a run and reports progress.

pub mod args;
pub mod collect;
pub mod logging;
