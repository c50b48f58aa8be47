// src/ui/mod.rs
//! UI module - terminal interface rendering and input.

pub mod icons;
pub mod keybindings;
pub mod layout;
pub mod tui;
pub mod widgets;

pub use tui::run;
