// src/audio/pipeline.rs
//! Capture pipeline: owns the single capture session of a view.

use ringbuf::traits::*;
use tracing::{debug, info, warn};

use super::analysis::{AnalysisNode, SpectrumFrame};
use super::capture::{
    latest_samples, lock_buffer, sample_buffer, AudioInput, InputStream, SampleBuffer,
};
use super::mapper::NOMINAL_SAMPLE_RATE;
use crate::error::CaptureError;
use crate::knowledge::GenreAnalysisProfile;
use crate::render::{FrameScheduler, FrameToken};

/// An open microphone connection and everything hanging off it.
struct CaptureSession {
    stream: Box<dyn InputStream>,
    analyser: Option<AnalysisNode>,
    buffer: SampleBuffer,
    /// Next scheduled render callback, if any
    frame_token: Option<FrameToken>,
}

impl CaptureSession {
    /// Release everything, continuing past failures.
    fn close(mut self, scheduler: &FrameScheduler) {
        // a) pending frame callback
        if let Some(token) = self.frame_token.take() {
            scheduler.cancel_frame(token);
        }
        // b) analysis node
        self.analyser = None;
        // c) stream tracks
        if let Err(e) = self.stream.stop() {
            warn!("failed to stop input stream cleanly: {e}");
        }
        // d) processing context
        if self.buffer.is_poisoned() {
            warn!("sample buffer poisoned during teardown; clearing anyway");
        }
        lock_buffer(&self.buffer).clear();
    }
}

/// Starts, reconfigures and stops microphone analysis.
///
/// At most one session exists at a time. Dropping the pipeline stops it.
pub struct CapturePipeline {
    input: Box<dyn AudioInput>,
    scheduler: FrameScheduler,
    session: Option<CaptureSession>,
}

impl CapturePipeline {
    pub fn new(input: Box<dyn AudioInput>, scheduler: FrameScheduler) -> Self {
        Self {
            input,
            scheduler,
            session: None,
        }
    }

    /// Open the microphone and schedule the first frame.
    ///
    /// Calling this while a session is already running does nothing.
    pub fn start(&mut self, profile: &GenreAnalysisProfile) -> Result<(), CaptureError> {
        if self.session.is_some() {
            debug!("capture already active; start ignored");
            return Ok(());
        }

        let analyser = AnalysisNode::from_profile(profile)
            .map_err(|e| CaptureError::ResourceUnavailable(e.to_string()))?;
        let buffer = sample_buffer();
        let stream = self.input.open(buffer.clone())?;
        if stream.device_sample_rate() as f64 != NOMINAL_SAMPLE_RATE {
            debug!(
                device_rate = stream.device_sample_rate(),
                "device rate differs from the nominal axis rate"
            );
        }

        let token = self.scheduler.request_frame();
        self.session = Some(CaptureSession {
            stream,
            analyser: Some(analyser),
            buffer,
            frame_token: Some(token),
        });
        info!(
            resolution = profile.resolution,
            smoothing = profile.smoothing,
            "capture session started"
        );
        Ok(())
    }

    /// Tear the session down. A no-op when nothing is running.
    pub fn stop(&mut self) {
        if let Some(session) = self.session.take() {
            session.close(&self.scheduler);
            info!("capture session stopped");
        }
    }

    /// Update the analysis node in place for a newly selected profile.
    pub fn reconfigure(&mut self, profile: &GenreAnalysisProfile) {
        let Some(analyser) = self.session.as_mut().and_then(|s| s.analyser.as_mut()) else {
            return;
        };
        if let Err(e) = analyser.configure(profile) {
            warn!("ignoring invalid analysis profile: {e}");
        }
    }

    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    /// True while the session exists and its stream is still delivering.
    pub fn is_live(&self) -> bool {
        self.session
            .as_ref()
            .is_some_and(|s| s.analyser.is_some() && s.stream.is_live())
    }

    pub fn analysis_resolution(&self) -> Option<usize> {
        self.session
            .as_ref()
            .and_then(|s| s.analyser.as_ref())
            .map(AnalysisNode::resolution)
    }

    pub fn analysis_smoothing(&self) -> Option<f32> {
        self.session
            .as_ref()
            .and_then(|s| s.analyser.as_ref())
            .map(AnalysisNode::smoothing)
    }

    pub fn buffered_samples(&self) -> usize {
        self.session
            .as_ref()
            .map_or(0, |s| lock_buffer(&s.buffer).occupied_len())
    }

    pub fn frame_token(&self) -> Option<FrameToken> {
        self.session.as_ref().and_then(|s| s.frame_token)
    }

    /// Schedule the next frame if the session is live.
    ///
    /// Returns the new token, or `None` once the session has gone away.
    pub fn schedule_next_frame(&mut self) -> Option<FrameToken> {
        if !self.is_live() {
            if let Some(session) = self.session.as_mut() {
                session.frame_token = None;
            }
            return None;
        }
        let token = self.scheduler.request_frame();
        if let Some(session) = self.session.as_mut() {
            session.frame_token = Some(token);
        }
        Some(token)
    }

    /// Pull the current magnitude spectrum. `None` when not started.
    pub fn current_frame(&mut self) -> Option<SpectrumFrame> {
        let session = self.session.as_mut()?;
        let analyser = session.analyser.as_mut()?;
        let samples = latest_samples(&session.buffer, analyser.resolution());
        Some(analyser.analyse(&samples))
    }
}

impl Drop for CapturePipeline {
    fn drop(&mut self) {
        self.stop();
    }
}
