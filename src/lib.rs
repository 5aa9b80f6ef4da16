//! Kestrel: a small tabbed web browser shell around the system web engine.
//!
//! This library crate exposes all modules for use by the binary and integration tests.

pub mod app;
pub mod command_handler;
pub mod database;
pub mod managers;
pub mod platform;
pub mod services;
pub mod surface;
pub mod types;
pub mod window_controller;

#[cfg(feature = "gui")]
pub mod ui;
