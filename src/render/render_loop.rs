// src/render/render_loop.rs
//! Render loop driven by the frame scheduler.

use std::time::Instant;

use tracing::{debug, warn};

use super::frame::{compose_frame, RenderContext};
use super::scene::Scene;
use super::scheduler::{FrameScheduler, FrameToken};
use crate::audio::CapturePipeline;

/// Idle until capture starts, then active every frame until it stops.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Idle,
    Active,
}

/// Turns due frame tokens into composed scenes.
///
/// The loop never decides on its own to stop. It keeps going for as long as
/// the capture session holds a frame token, and tearing the session down
/// is the only way out.
#[derive(Debug)]
pub struct RenderLoop {
    width: f64,
    height: f64,
    frames_rendered: u64,
}

impl RenderLoop {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            frames_rendered: 0,
        }
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }

    pub fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    pub fn frames_rendered(&self) -> u64 {
        self.frames_rendered
    }

    pub fn state(&self, pipeline: &CapturePipeline) -> LoopState {
        if pipeline.frame_token().is_some() {
            LoopState::Active
        } else {
            LoopState::Idle
        }
    }

    /// Run the frame callback if one is due at `now`.
    pub fn tick(
        &mut self,
        now: Instant,
        scheduler: &FrameScheduler,
        pipeline: &mut CapturePipeline,
        ctx: &RenderContext,
    ) -> Option<Scene> {
        let token = scheduler.poll_due(now)?;
        self.on_frame(token, pipeline, ctx)
    }

    /// The frame callback. Reschedules itself while the session is live and
    /// contains every failure to this one frame.
    pub fn on_frame(
        &mut self,
        token: FrameToken,
        pipeline: &mut CapturePipeline,
        ctx: &RenderContext,
    ) -> Option<Scene> {
        if pipeline.frame_token() != Some(token) {
            debug!(token = token.id(), "stale frame token ignored");
            return None;
        }
        pipeline.schedule_next_frame()?;

        let Some(frame) = pipeline.current_frame() else {
            debug!("no spectrum available this frame");
            return None;
        };

        match compose_frame(ctx, &frame, self.width, self.height) {
            Ok(scene) => {
                self.frames_rendered += 1;
                Some(scene)
            }
            Err(e) => {
                warn!("frame skipped: {e}");
                None
            }
        }
    }
}
