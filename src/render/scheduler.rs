// src/render/scheduler.rs
//! Frame scheduler: the native stand-in for an animation-frame callback queue.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

/// Handle to one scheduled frame callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrameToken(u64);

impl FrameToken {
    pub fn id(self) -> u64 {
        self.0
    }
}

#[derive(Debug)]
struct SchedulerState {
    next_id: u64,
    interval: Duration,
    pending: Option<(FrameToken, Instant)>,
}

/// Issues frame tokens and reports when the pending one is due.
///
/// Clones share the same queue, so the capture session can cancel what the
/// render loop scheduled. At most one frame is pending at a time.
#[derive(Debug, Clone)]
pub struct FrameScheduler {
    state: Arc<Mutex<SchedulerState>>,
}

impl FrameScheduler {
    pub fn new(interval: Duration) -> Self {
        Self {
            state: Arc::new(Mutex::new(SchedulerState {
                next_id: 1,
                interval,
                pending: None,
            })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, SchedulerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn interval(&self) -> Duration {
        self.lock().interval
    }

    /// Schedule a frame one interval from now.
    pub fn request_frame(&self) -> FrameToken {
        self.request_frame_at(Instant::now() + self.interval())
    }

    /// Schedule a frame at `due`, replacing any pending request.
    pub fn request_frame_at(&self, due: Instant) -> FrameToken {
        let mut state = self.lock();
        let token = FrameToken(state.next_id);
        state.next_id += 1;
        state.pending = Some((token, due));
        token
    }

    /// Cancel `token` if it is still pending. Returns whether it was.
    pub fn cancel_frame(&self, token: FrameToken) -> bool {
        let mut state = self.lock();
        match state.pending {
            Some((pending, _)) if pending == token => {
                state.pending = None;
                true
            }
            _ => false,
        }
    }

    /// Take the pending token if its deadline has passed.
    pub fn poll_due(&self, now: Instant) -> Option<FrameToken> {
        let mut state = self.lock();
        match state.pending {
            Some((token, due)) if due <= now => {
                state.pending = None;
                Some(token)
            }
            _ => None,
        }
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.lock().pending.map(|(_, due)| due)
    }

    pub fn is_pending(&self) -> bool {
        self.lock().pending.is_some()
    }
}
