// src/compare/mod.rs
//! Comparison engine - validates two tracks and delegates the judgment.

pub mod advisor;
pub mod engine;
pub mod payload;
pub mod verdict;

pub use advisor::{AdviceService, CommandAdvisor, COMPARISON_INSTRUCTION};
pub use engine::{require_both, ComparisonEngine, ComparisonState};
pub use payload::{AudioPayload, TrackProperties};
pub use verdict::ComparisonVerdict;
