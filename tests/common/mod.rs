#![allow(dead_code)]

use std::sync::{
    atomic::{AtomicBool, AtomicUsize, Ordering},
    Arc, Mutex,
};

use ringbuf::traits::Observer;
use spectral_lab::audio::capture::{lock_buffer, push_samples};
use spectral_lab::audio::{AudioInput, InputStream, SampleBuffer};
use spectral_lab::error::CaptureError;

/// What the fake microphone does when opened.
#[derive(Clone, Copy, Debug)]
pub enum OpenOutcome {
    Tone { hz: f32, samples: usize },
    Denied,
    Unavailable,
}

/// Observable state shared between a test and the fakes it handed out.
#[derive(Default)]
pub struct DeviceLog {
    pub opens: AtomicUsize,
    pub stops: AtomicUsize,
    pub live: AtomicBool,
    pub stop_fails: AtomicBool,
    /// Buffer handed to the most recent open
    pub buffer: Mutex<Option<SampleBuffer>>,
}

impl DeviceLog {
    pub fn opens(&self) -> usize {
        self.opens.load(Ordering::SeqCst)
    }

    pub fn stops(&self) -> usize {
        self.stops.load(Ordering::SeqCst)
    }

    pub fn is_live(&self) -> bool {
        self.live.load(Ordering::SeqCst)
    }

    /// Simulate the device going away under a running stream.
    pub fn unplug(&self) {
        self.live.store(false, Ordering::SeqCst);
    }

    /// Make every later `stop()` report an error after releasing the device.
    pub fn fail_stops(&self) {
        self.stop_fails.store(true, Ordering::SeqCst);
    }

    pub fn buffer(&self) -> Option<SampleBuffer> {
        self.buffer.lock().unwrap().clone()
    }

    /// Samples left in the last opened buffer.
    pub fn buffered(&self) -> usize {
        self.buffer()
            .map_or(0, |buffer| lock_buffer(&buffer).occupied_len())
    }
}

pub struct FakeInput {
    outcome: OpenOutcome,
    device: Arc<DeviceLog>,
}

impl FakeInput {
    pub fn new(outcome: OpenOutcome) -> (Self, Arc<DeviceLog>) {
        let device = Arc::new(DeviceLog::default());
        (
            Self {
                outcome,
                device: device.clone(),
            },
            device,
        )
    }

    pub fn tone() -> (Self, Arc<DeviceLog>) {
        Self::new(OpenOutcome::Tone {
            hz: 1_000.0,
            samples: 4_096,
        })
    }
}

impl AudioInput for FakeInput {
    fn open(&mut self, buffer: SampleBuffer) -> Result<Box<dyn InputStream>, CaptureError> {
        self.device.opens.fetch_add(1, Ordering::SeqCst);
        match self.outcome {
            OpenOutcome::Denied => Err(CaptureError::PermissionDenied(
                "user dismissed the prompt".into(),
            )),
            OpenOutcome::Unavailable => {
                Err(CaptureError::ResourceUnavailable("no input device".into()))
            }
            OpenOutcome::Tone { hz, samples } => {
                push_samples(
                    &buffer,
                    (0..samples).map(|n| {
                        (2.0 * std::f32::consts::PI * hz * n as f32 / 44_100.0).sin() * 0.5
                    }),
                );
                self.device.live.store(true, Ordering::SeqCst);
                *self.device.buffer.lock().unwrap() = Some(buffer);
                Ok(Box::new(FakeStream {
                    device: self.device.clone(),
                }))
            }
        }
    }
}

struct FakeStream {
    device: Arc<DeviceLog>,
}

impl InputStream for FakeStream {
    fn stop(&mut self) -> Result<(), CaptureError> {
        self.device.stops.fetch_add(1, Ordering::SeqCst);
        self.device.live.store(false, Ordering::SeqCst);
        if self.device.stop_fails.load(Ordering::SeqCst) {
            return Err(CaptureError::Stream("track refused to stop".into()));
        }
        Ok(())
    }

    fn is_live(&self) -> bool {
        self.device.live.load(Ordering::SeqCst)
    }

    fn device_sample_rate(&self) -> u32 {
        44_100
    }
}
