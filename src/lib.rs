//! Library crate for usrdir-manager.
//!
//! This crate exposes the building blocks of the TUI:
//! - Remote collection client and record types (`remote`)
//! - Local directory model with search and pagination (`model`, `search`)
//! - Pure view rendering, including the HTML snapshot (`view`)
//! - Controller, application state and update loop (`app`)
//! - Command line options and config files (`config`)
//! - Error and result types (`error`)
//! - Terminal drawing and widgets (`ui`)
//!
//! It is used by the `usrdir-manager` binary and by tests.
#![doc = include_str!("../README.md")]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod app;
pub mod config;
pub mod error;
pub mod model;
pub mod remote;
pub mod search;
pub mod ui;
pub mod view;

/// Convenient error and result types shared across the crate.
pub use error::{DirectoryError, DynError, Result, TransportError};
