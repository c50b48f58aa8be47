// src/audio/analysis.rs
//! FFT analysis node producing byte-quantised magnitude spectra.

use std::sync::Arc;

use rustfft::{num_complex::Complex, Fft, FftPlanner};
use tracing::debug;

use crate::error::ProfileError;
use crate::knowledge::{is_valid_resolution, is_valid_smoothing, GenreAnalysisProfile};

/// Magnitudes at or below this level map to byte 0.
pub const MIN_DECIBELS: f32 = -100.0;
/// Magnitudes at or above this level map to byte 255.
pub const MAX_DECIBELS: f32 = -30.0;

/// One frame of the magnitude spectrum, one byte per bin.
///
/// Frames are not retained; each one supersedes the last.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpectrumFrame {
    bins: Vec<u8>,
}

impl SpectrumFrame {
    pub fn from_bins(bins: Vec<u8>) -> Self {
        Self { bins }
    }

    /// An all-zero frame with `bin_count` bins.
    pub fn silent(bin_count: usize) -> Self {
        Self { bins: vec![0; bin_count] }
    }

    pub fn bins(&self) -> &[u8] {
        &self.bins
    }

    pub fn bin_count(&self) -> usize {
        self.bins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }

    /// Index and value of the loudest bin.
    pub fn peak(&self) -> Option<(usize, u8)> {
        self.bins
            .iter()
            .copied()
            .enumerate()
            .max_by_key(|&(_, v)| v)
    }
}

/// Single-channel analyser configured by a [`GenreAnalysisProfile`].
///
/// Resolution and smoothing can be changed in place while capture runs.
pub struct AnalysisNode {
    planner: FftPlanner<f32>,
    fft: Arc<dyn Fft<f32>>,
    resolution: usize,
    smoothing: f32,
    /// Blackman window coefficients
    window: Vec<f32>,
    buffer: Vec<Complex<f32>>,
    /// Smoothed linear magnitudes carried between frames
    smoothed: Vec<f32>,
}

impl AnalysisNode {
    pub fn new(resolution: usize, smoothing: f32) -> Result<Self, ProfileError> {
        if !is_valid_resolution(resolution) {
            return Err(ProfileError::InvalidResolution(resolution));
        }
        if !is_valid_smoothing(smoothing) {
            return Err(ProfileError::InvalidSmoothing(smoothing));
        }
        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(resolution);
        Ok(Self {
            planner,
            fft,
            resolution,
            smoothing,
            window: blackman_window(resolution),
            buffer: vec![Complex::new(0.0, 0.0); resolution],
            smoothed: vec![0.0; resolution / 2],
        })
    }

    pub fn from_profile(profile: &GenreAnalysisProfile) -> Result<Self, ProfileError> {
        Self::new(profile.resolution, profile.smoothing)
    }

    /// Apply a profile's resolution and smoothing without rebuilding the node.
    pub fn configure(&mut self, profile: &GenreAnalysisProfile) -> Result<(), ProfileError> {
        self.set_resolution(profile.resolution)?;
        self.set_smoothing(profile.smoothing)
    }

    /// Change the FFT size. Resets the smoothing history when it changes.
    pub fn set_resolution(&mut self, resolution: usize) -> Result<(), ProfileError> {
        if !is_valid_resolution(resolution) {
            return Err(ProfileError::InvalidResolution(resolution));
        }
        if resolution != self.resolution {
            debug!(from = self.resolution, to = resolution, "analysis resolution changed");
            self.fft = self.planner.plan_fft_forward(resolution);
            self.resolution = resolution;
            self.window = blackman_window(resolution);
            self.buffer = vec![Complex::new(0.0, 0.0); resolution];
            self.smoothed = vec![0.0; resolution / 2];
        }
        Ok(())
    }

    pub fn set_smoothing(&mut self, smoothing: f32) -> Result<(), ProfileError> {
        if !is_valid_smoothing(smoothing) {
            return Err(ProfileError::InvalidSmoothing(smoothing));
        }
        self.smoothing = smoothing;
        Ok(())
    }

    pub fn resolution(&self) -> usize {
        self.resolution
    }

    pub fn smoothing(&self) -> f32 {
        self.smoothing
    }

    pub fn frequency_bin_count(&self) -> usize {
        self.resolution / 2
    }

    /// Analyse the most recent `resolution` samples of `samples`.
    ///
    /// Fewer samples are zero-padded at the front so the newest sample
    /// always sits at the end of the window.
    pub fn analyse(&mut self, samples: &[f32]) -> SpectrumFrame {
        let n = self.resolution;
        let take = samples.len().min(n);
        let recent = &samples[samples.len() - take..];
        let pad = n - take;

        for (i, slot) in self.buffer.iter_mut().enumerate() {
            let sample = if i < pad { 0.0 } else { recent[i - pad] };
            *slot = Complex::new(sample * self.window[i], 0.0);
        }

        self.fft.process(&mut self.buffer);

        let scale = 1.0 / n as f32;
        let tau = self.smoothing;
        let range = MAX_DECIBELS - MIN_DECIBELS;
        let bins = self
            .buffer
            .iter()
            .take(n / 2)
            .zip(self.smoothed.iter_mut())
            .map(|(c, prev)| {
                let magnitude = c.norm() * scale;
                *prev = tau * *prev + (1.0 - tau) * magnitude;
                let db = 20.0 * prev.max(1e-12).log10();
                let scaled = (255.0 / range) * (db - MIN_DECIBELS);
                scaled.floor().clamp(0.0, 255.0) as u8
            })
            .collect();

        SpectrumFrame { bins }
    }
}

fn blackman_window(n: usize) -> Vec<f32> {
    use std::f32::consts::PI;
    let (a0, a1, a2) = (0.42, 0.5, 0.08);
    (0..n)
        .map(|i| {
            let t = i as f32 / n as f32;
            a0 - a1 * (2.0 * PI * t).cos() + a2 * (4.0 * PI * t).cos()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::mapper::{bin_frequency, NOMINAL_SAMPLE_RATE};
    use proptest::prelude::*;

    fn sine(freq: f32, len: usize, amplitude: f32) -> Vec<f32> {
        let sr = NOMINAL_SAMPLE_RATE as f32;
        (0..len)
            .map(|i| amplitude * (2.0 * std::f32::consts::PI * freq * i as f32 / sr).sin())
            .collect()
    }

    #[test]
    fn frame_has_half_resolution_bins() {
        let mut node = AnalysisNode::new(1024, 0.8).unwrap();
        assert_eq!(node.analyse(&[]).bin_count(), 512);
        assert_eq!(node.frequency_bin_count(), 512);
    }

    #[test]
    fn silence_is_all_zero() {
        let mut node = AnalysisNode::new(512, 0.0).unwrap();
        let frame = node.analyse(&vec![0.0; 512]);
        assert!(frame.bins().iter().all(|&b| b == 0));
    }

    #[test]
    fn sine_peaks_in_its_bin() {
        let mut node = AnalysisNode::new(2048, 0.0).unwrap();
        let frame = node.analyse(&sine(1000.0, 4096, 0.8));
        let (peak_bin, value) = frame.peak().unwrap();
        let freq = bin_frequency(peak_bin, frame.bin_count(), NOMINAL_SAMPLE_RATE);
        assert!((freq - 1000.0).abs() < 25.0, "peak at {freq} Hz");
        assert!(value > 200);
    }

    #[test]
    fn loud_signal_saturates_at_the_ceiling() {
        let mut node = AnalysisNode::new(512, 0.0).unwrap();
        let frame = node.analyse(&sine(2_000.0, 512, 1.0e6));
        assert_eq!(frame.peak().map(|(_, value)| value), Some(255));
    }

    #[test]
    fn smoothing_carries_energy_into_silent_frames() {
        let mut node = AnalysisNode::new(1024, 0.9).unwrap();
        let loud = sine(440.0, 1024, 0.8);
        node.analyse(&loud);
        let (_, first) = node.analyse(&loud).peak().unwrap();
        let (_, after) = node.analyse(&vec![0.0; 1024]).peak().unwrap();
        assert!(after > 0);
        assert!(after <= first);
    }

    #[test]
    fn resolution_changes_in_place() {
        let mut node = AnalysisNode::new(512, 0.8).unwrap();
        node.configure(&crate::knowledge::GenreCategory::Jazz.profile()).unwrap();
        assert_eq!(node.resolution(), 2048);
        assert_eq!(node.smoothing(), 0.92);
        assert_eq!(node.analyse(&[0.1; 64]).bin_count(), 1024);
    }

    #[test]
    fn invalid_parameters_are_rejected() {
        assert!(AnalysisNode::new(1000, 0.5).is_err());
        let mut node = AnalysisNode::new(512, 0.5).unwrap();
        assert_eq!(node.set_smoothing(1.2), Err(ProfileError::InvalidSmoothing(1.2)));
        assert_eq!(node.set_resolution(48), Err(ProfileError::InvalidResolution(48)));
        assert_eq!(node.resolution(), 512);
        assert_eq!(node.smoothing(), 0.5);
    }

    proptest! {
        #[test]
        fn any_signal_yields_full_frame(samples in prop::collection::vec(-1.0f32..1.0, 0..1500)) {
            let mut node = AnalysisNode::new(256, 0.5).unwrap();
            let frame = node.analyse(&samples);
            prop_assert_eq!(frame.bin_count(), 128);
        }

        #[test]
        fn bytes_decode_inside_the_decibel_range(
            samples in prop::collection::vec(-1.0e6f32..1.0e6, 1..1024),
            smoothing in 0.0f32..1.0,
        ) {
            let mut node = AnalysisNode::new(512, smoothing).unwrap();
            for _ in 0..3 {
                let frame = node.analyse(&samples);
                prop_assert_eq!(frame.bin_count(), 256);
                for &byte in frame.bins() {
                    let db = MIN_DECIBELS + byte as f32 * (MAX_DECIBELS - MIN_DECIBELS) / 255.0;
                    prop_assert!((MIN_DECIBELS..=MAX_DECIBELS).contains(&db), "{byte} -> {db}");
                }
            }
        }
    }
}
