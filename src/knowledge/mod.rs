// src/knowledge/mod.rs
//! Band annotation registry: authored genre and instrument tables.

pub mod catalog;
pub mod genre;
pub mod instrument;

pub use catalog::{genre_entry, GenreEntry, GENRE_CATALOG};
pub use genre::{
    is_valid_resolution, is_valid_smoothing, profile_for, GenreAnalysisProfile, GenreCategory,
    SelectedGenre, MAX_RESOLUTION, MIN_RESOLUTION,
};
pub use instrument::{
    instrument_by_name, BandClass, FrequencyBand, InstrumentProfile, INSTRUMENT_PROFILES,
    PROBLEM_LABEL, SWEET_SPOT_LABEL,
};
