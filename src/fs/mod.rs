// src/fs/mod.rs
//! Filesystem module - track browsing and type detection.

pub mod browser;
pub mod detection;

pub use browser::{load_entries, tail_path, BrowserEntry};
pub use detection::{detect_file_type, FileCategory, FileType};
