// src/ui/widgets/mod.rs
//! Panels of the spectral-lab UI.

pub mod analyzer;
pub mod comparison_panel;
pub mod file_list;
pub mod profile_panel;

pub use analyzer::render_analyzer;
pub use comparison_panel::render_comparison_panel;
pub use file_list::render_file_list;
pub use profile_panel::{render_profile_panel, ProfileView};
