// src/audio/device.rs
//! cpal-backed microphone input.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{
    BuildStreamError, FromSample, PlayStreamError, Sample, SampleFormat, SampleRate, SizedSample,
    StreamError, SupportedStreamConfig, SupportedStreamConfigRange,
};
use tracing::{debug, error, info, warn};

use super::capture::{downmix, push_samples, AudioInput, InputStream, SampleBuffer};
use crate::error::CaptureError;

/// Requested capture rate. Devices that refuse it run at their default.
const PREFERRED_SAMPLE_RATE: u32 = 44_100;

/// Default input device of the default cpal host.
#[derive(Debug, Default)]
pub struct CpalInput;

impl CpalInput {
    pub fn new() -> Self {
        Self
    }
}

impl AudioInput for CpalInput {
    fn open(&mut self, buffer: SampleBuffer) -> Result<Box<dyn InputStream>, CaptureError> {
        let host = cpal::default_host();
        let device = host.default_input_device().ok_or_else(|| {
            CaptureError::ResourceUnavailable("no default input device".to_string())
        })?;
        let name = device.name().unwrap_or_else(|_| "unknown".to_string());

        let supported = device.supported_input_configs().ok().and_then(pick_config);
        let supported = match supported {
            Some(config) => config,
            None => device
                .default_input_config()
                .map_err(|e| CaptureError::ResourceUnavailable(e.to_string()))?,
        };

        let format = supported.sample_format();
        let config: cpal::StreamConfig = supported.into();
        debug!(
            device = %name,
            sample_rate = config.sample_rate.0,
            channels = config.channels,
            ?format,
            "opening input stream"
        );

        let live = Arc::new(AtomicBool::new(true));
        let stream = match format {
            SampleFormat::F32 => build_stream::<f32>(&device, &config, buffer, live.clone()),
            SampleFormat::I16 => build_stream::<i16>(&device, &config, buffer, live.clone()),
            SampleFormat::U16 => build_stream::<u16>(&device, &config, buffer, live.clone()),
            SampleFormat::I32 => build_stream::<i32>(&device, &config, buffer, live.clone()),
            other => {
                return Err(CaptureError::ResourceUnavailable(format!(
                    "unsupported sample format {other:?}"
                )));
            }
        }
        .map_err(map_build_error)?;

        stream.play().map_err(map_play_error)?;
        info!(device = %name, "microphone capture started");

        Ok(Box::new(CpalStream {
            stream: Some(stream),
            live,
            sample_rate: config.sample_rate.0,
        }))
    }
}

/// Preference order of the sample formats `build_stream` handles.
fn format_rank(format: SampleFormat) -> Option<u8> {
    match format {
        SampleFormat::F32 => Some(0),
        SampleFormat::I16 => Some(1),
        SampleFormat::I32 => Some(2),
        SampleFormat::U16 => Some(3),
        _ => None,
    }
}

/// Pick a capturable range that covers the preferred rate, F32 first.
///
/// Hosts may list unusable formats (I8, U8) ahead of the good ones, so the
/// first range containing the rate is not necessarily the right one.
fn pick_config<I>(ranges: I) -> Option<SupportedStreamConfig>
where
    I: IntoIterator<Item = SupportedStreamConfigRange>,
{
    ranges
        .into_iter()
        .filter(|range| {
            range.min_sample_rate().0 <= PREFERRED_SAMPLE_RATE
                && PREFERRED_SAMPLE_RATE <= range.max_sample_rate().0
        })
        .filter_map(|range| format_rank(range.sample_format()).map(|rank| (rank, range)))
        .min_by_key(|(rank, _)| *rank)
        .map(|(_, range)| range.with_sample_rate(SampleRate(PREFERRED_SAMPLE_RATE)))
}

/// Only a vanished device ends capture; xruns and backend hiccups are logged.
fn is_fatal(err: &StreamError) -> bool {
    matches!(err, StreamError::DeviceNotAvailable)
}

fn build_stream<T>(
    device: &cpal::Device,
    config: &cpal::StreamConfig,
    buffer: SampleBuffer,
    live: Arc<AtomicBool>,
) -> Result<cpal::Stream, BuildStreamError>
where
    T: SizedSample,
    f32: FromSample<T>,
{
    let channels = config.channels as usize;
    let mut scratch: Vec<f32> = Vec::new();
    device.build_input_stream(
        config,
        move |data: &[T], _: &cpal::InputCallbackInfo| {
            scratch.clear();
            scratch.extend(data.iter().map(|&s| f32::from_sample(s)));
            push_samples(&buffer, downmix(&scratch, channels));
        },
        move |err| {
            if is_fatal(&err) {
                error!("input stream lost: {err}");
                live.store(false, Ordering::SeqCst);
            } else {
                warn!("input stream error: {err}");
            }
        },
        None,
    )
}

fn is_permission_message(message: &str) -> bool {
    let lower = message.to_ascii_lowercase();
    lower.contains("permission") || lower.contains("denied") || lower.contains("not authorized")
}

fn map_build_error(err: BuildStreamError) -> CaptureError {
    match err {
        BuildStreamError::BackendSpecific { err } if is_permission_message(&err.description) => {
            CaptureError::PermissionDenied(err.description)
        }
        other => CaptureError::ResourceUnavailable(other.to_string()),
    }
}

fn map_play_error(err: PlayStreamError) -> CaptureError {
    match err {
        PlayStreamError::BackendSpecific { err } if is_permission_message(&err.description) => {
            CaptureError::PermissionDenied(err.description)
        }
        other => CaptureError::ResourceUnavailable(other.to_string()),
    }
}

/// Open cpal stream. Dropping the stream releases the device.
struct CpalStream {
    stream: Option<cpal::Stream>,
    live: Arc<AtomicBool>,
    sample_rate: u32,
}

impl InputStream for CpalStream {
    fn stop(&mut self) -> Result<(), CaptureError> {
        self.live.store(false, Ordering::SeqCst);
        let Some(stream) = self.stream.take() else {
            return Ok(());
        };
        let paused = stream.pause();
        drop(stream);
        paused.map_err(|e| CaptureError::Stream(e.to_string()))
    }

    fn is_live(&self) -> bool {
        self.stream.is_some() && self.live.load(Ordering::SeqCst)
    }

    fn device_sample_rate(&self) -> u32 {
        self.sample_rate
    }
}

impl Drop for CpalStream {
    fn drop(&mut self) {
        let _ = self.stop();
    }
}
