//! Display abstraction and encoder dashboard for rotenc
//!
//! This crate provides:
//! - `DisplayBackend` trait for small monochrome panels
//! - `Dashboard`, a host-testable model of the encoder demo screen
//!
//! # Layout (128×32)
//!
//! ```text
//! ┌────────────────────────────────────────────┐
//! │ title                                      │  row 0
//! │ subtitle                                   │  row 1
//! │ RPM:   50          [ ]        [ ]      [ ] │  row 2, markers CCW / click / CW
//! │              ▯                             │  position indicator
//! └────────────────────────────────────────────┘
//! ```
//!
//! The firmware feeds encoder events and the current time into the
//! dashboard and renders it to whatever `DisplayBackend` drives the panel.

#![no_std]

pub mod backend;
pub mod dashboard;

// Re-export key types
pub use backend::{DisplayBackend, DisplayError};
pub use dashboard::{Dashboard, Marker, SCREEN_HEIGHT, SCREEN_WIDTH};
