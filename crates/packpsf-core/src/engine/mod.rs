//! # Engine Module
//!
//! Settings, errors and progress reporting shared by the build and export workflows.
//!
//! - **Configuration** ([`config`]) - Coordinate layout, Drude handling and bond detection settings
//! - **Progress Monitoring** ([`progress`]) - Callback-based reporting for front ends
//! - **Error Handling** ([`error`]) - Workflow errors carrying the offending file path

pub mod config;
pub mod error;
pub mod progress;
