//! Czytelnia, a personal reader for short Polish stories.
//!
//! This library crate exposes all modules for use by the binaries and integration tests.

pub mod app;
pub mod config;
pub mod database;
pub mod logging;
pub mod managers;
pub mod platform;
pub mod repository;
pub mod rpc_handler;
pub mod services;
pub mod types;
