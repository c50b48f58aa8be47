// src/lib.rs
//! Spectral Lab - a real-time spectrum analyzer with genre and instrument overlays.
//!
//! The analysis core (`audio`, `knowledge`, `render`) runs without a terminal;
//! `app` and `ui` host it in a ratatui interface.

pub mod app;
pub mod audio;
pub mod compare;
pub mod config;
pub mod error;
pub mod fs;
pub mod knowledge;
pub mod logging;
pub mod render;
pub mod ui;
