//! Tauri command handlers
//!
//! This module contains all the IPC command handlers that can be called
//! from the frontend via Tauri's invoke system.

pub mod meter;
pub mod settings;
pub mod window;
