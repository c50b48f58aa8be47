// src/audio/capture.rs
//! Microphone capture seam: input trait, stream handle and the shared sample buffer.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use ringbuf::{traits::*, HeapRb};

use crate::error::CaptureError;
use crate::knowledge::MAX_RESOLUTION;

/// Circular buffer of recent mono samples written by the audio thread.
pub type SampleBuffer = Arc<Mutex<HeapRb<f32>>>;

/// Create a sample buffer large enough for the biggest analysis resolution.
pub fn sample_buffer() -> SampleBuffer {
    Arc::new(Mutex::new(HeapRb::<f32>::new(MAX_RESOLUTION)))
}

/// Lock the buffer, taking it over from a thread that panicked while holding it.
///
/// Samples are plain floats, so a half-finished push leaves nothing invalid.
pub fn lock_buffer(buffer: &SampleBuffer) -> MutexGuard<'_, HeapRb<f32>> {
    buffer.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Push samples, overwriting the oldest ones when the buffer is full.
pub fn push_samples(buffer: &SampleBuffer, samples: impl IntoIterator<Item = f32>) {
    let mut buf = lock_buffer(buffer);
    for sample in samples {
        if buf.is_full() {
            let _ = buf.try_pop();
        }
        let _ = buf.try_push(sample);
    }
}

/// Average interleaved frames down to one channel.
pub fn downmix(interleaved: &[f32], channels: usize) -> impl Iterator<Item = f32> + '_ {
    let channels = channels.max(1);
    interleaved
        .chunks(channels)
        .map(move |frame| frame.iter().sum::<f32>() / frame.len() as f32)
}

/// Copy up to `count` of the newest samples without consuming them.
pub fn latest_samples(buffer: &SampleBuffer, count: usize) -> Vec<f32> {
    let buf = lock_buffer(buffer);
    let start = buf.occupied_len().saturating_sub(count);
    buf.iter().skip(start).copied().collect()
}

/// A running microphone stream.
pub trait InputStream {
    /// Stop every track and release the device. Safe to call twice.
    fn stop(&mut self) -> Result<(), CaptureError>;

    /// True until [`InputStream::stop`] succeeds or the device fails.
    fn is_live(&self) -> bool;

    /// Sample rate the device actually runs at.
    fn device_sample_rate(&self) -> u32;
}

/// Something that can open a mono microphone stream into a [`SampleBuffer`].
pub trait AudioInput {
    fn open(&mut self, buffer: SampleBuffer) -> Result<Box<dyn InputStream>, CaptureError>;
}
