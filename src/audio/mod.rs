// src/audio/mod.rs
//! Audio module - microphone capture, spectral analysis and the frequency axis.

pub mod analysis;
pub mod capture;
pub mod device;
pub mod mapper;
pub mod pipeline;

// Re-export commonly used types
pub use analysis::{AnalysisNode, SpectrumFrame};
pub use capture::{AudioInput, InputStream, SampleBuffer};
pub use device::CpalInput;
pub use mapper::{bin_frequency, x_position, NOMINAL_SAMPLE_RATE};
pub use pipeline::CapturePipeline;
