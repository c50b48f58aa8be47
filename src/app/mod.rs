// src/app/mod.rs
//! Application module - state, selection and snapshots.

pub mod selection;
pub mod snapshot;
pub mod state;

pub use selection::Selection;
pub use snapshot::save_snapshot;
pub use state::App;
