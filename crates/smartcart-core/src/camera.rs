//! Camera Acquisition Controller
//!
//! Mediates exclusive access to one video capture device for scanning.
//!
//! States: Idle -> Requesting -> Ready | Errored -> (close) -> Idle.
//! A granted stream is owned by an [`ActiveStream`] guard, so every exit path
//! (explicit close, switching to manual entry, teardown, drop) stops its
//! tracks. There is no automatic retry: leaving Errored requires a close and a
//! fresh open.

use std::cell::RefCell;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::CaptureError;

/// Constraints passed to the capture device
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptureConstraints {
    pub facing_mode: String,
    pub audio: bool,
}

impl Default for CaptureConstraints {
    fn default() -> Self {
        Self {
            facing_mode: "environment".to_string(),
            audio: false,
        }
    }
}

/// A live stream whose tracks can be stopped
pub trait MediaStreamHandle {
    /// Stop every track of the stream. Called at most once per stream.
    fn stop_tracks(&self);
}

/// Platform capture device (browser `getUserMedia`, or a fake in tests)
#[async_trait(?Send)]
pub trait CaptureDevice {
    type Stream: MediaStreamHandle;

    async fn request(&self, constraints: &CaptureConstraints) -> Result<Self::Stream, CaptureError>;
}

// ========================
// Scoped stream guard
// ========================

/// Owns a granted stream and stops its tracks when released or dropped.
pub struct ActiveStream<S: MediaStreamHandle> {
    stream: Option<S>,
}

impl<S: MediaStreamHandle> ActiveStream<S> {
    pub fn new(stream: S) -> Self {
        Self { stream: Some(stream) }
    }

    pub fn get(&self) -> Option<&S> {
        self.stream.as_ref()
    }

    /// Stop tracks now instead of waiting for drop.
    pub fn release(mut self) {
        self.stop();
    }

    fn stop(&mut self) {
        if let Some(stream) = self.stream.take() {
            stream.stop_tracks();
        }
    }
}

impl<S: MediaStreamHandle> Drop for ActiveStream<S> {
    fn drop(&mut self) {
        self.stop();
    }
}

// ========================
// Controller
// ========================

/// Identifies one acquisition attempt. Results for a stale ticket are
/// released instead of applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AcquireTicket(u64);

/// Observable controller state (no stream handle, so it can live in a signal)
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CameraStatus {
    #[default]
    Idle,
    Requesting,
    Ready,
    Errored(CaptureError),
}

impl CameraStatus {
    pub fn is_ready(&self) -> bool {
        matches!(self, CameraStatus::Ready)
    }

    pub fn error_message(&self) -> Option<&'static str> {
        match self {
            CameraStatus::Errored(err) => Some(err.user_message()),
            _ => None,
        }
    }
}

enum Phase<S: MediaStreamHandle> {
    Idle,
    Requesting(AcquireTicket),
    Ready(ActiveStream<S>),
    Errored(CaptureError),
}

/// Holds at most one active stream at a time.
pub struct CameraController<S: MediaStreamHandle> {
    phase: Phase<S>,
    next_ticket: u64,
    acquired: u64,
    released: u64,
}

impl<S: MediaStreamHandle> Default for CameraController<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: MediaStreamHandle> CameraController<S> {
    pub fn new() -> Self {
        Self {
            phase: Phase::Idle,
            next_ticket: 0,
            acquired: 0,
            released: 0,
        }
    }

    pub fn status(&self) -> CameraStatus {
        match &self.phase {
            Phase::Idle => CameraStatus::Idle,
            Phase::Requesting(_) => CameraStatus::Requesting,
            Phase::Ready(_) => CameraStatus::Ready,
            Phase::Errored(err) => CameraStatus::Errored(err.clone()),
        }
    }

    /// The live stream, for binding to a preview sink
    pub fn stream(&self) -> Option<&S> {
        match &self.phase {
            Phase::Ready(active) => active.get(),
            _ => None,
        }
    }

    pub fn is_holding_stream(&self) -> bool {
        matches!(self.phase, Phase::Ready(_))
    }

    /// Streams that reached Ready
    pub fn acquired(&self) -> u64 {
        self.acquired
    }

    /// Streams stopped by this controller (including late grants)
    pub fn released(&self) -> u64 {
        self.released
    }

    /// Start an acquisition. Only Idle moves to Requesting; in any other state
    /// this is a no-op and returns `None`.
    pub fn open(&mut self) -> Option<AcquireTicket> {
        match self.phase {
            Phase::Idle => {
                self.next_ticket += 1;
                let ticket = AcquireTicket(self.next_ticket);
                self.phase = Phase::Requesting(ticket);
                log::debug!("camera: requesting (attempt {})", ticket.0);
                Some(ticket)
            }
            _ => None,
        }
    }

    /// Apply the device's answer for `ticket`.
    pub fn complete(&mut self, ticket: AcquireTicket, result: Result<S, CaptureError>) -> CameraStatus {
        let current = matches!(self.phase, Phase::Requesting(t) if t == ticket);
        match (current, result) {
            (true, Ok(stream)) => {
                self.acquired += 1;
                self.phase = Phase::Ready(ActiveStream::new(stream));
                log::debug!("camera: ready");
            }
            (true, Err(err)) => {
                log::warn!("camera: acquisition failed: {}", err);
                self.phase = Phase::Errored(err);
            }
            (false, Ok(stream)) => {
                // Surface closed while the request was in flight
                log::debug!("camera: releasing late stream (attempt {})", ticket.0);
                ActiveStream::new(stream).release();
                self.released += 1;
            }
            (false, Err(err)) => {
                log::debug!("camera: ignoring stale failure: {}", err);
            }
        }
        self.status()
    }

    /// Release any stream and return to Idle. No-op when already Idle.
    pub fn close(&mut self) {
        match std::mem::replace(&mut self.phase, Phase::Idle) {
            Phase::Idle => {}
            Phase::Ready(active) => {
                active.release();
                self.released += 1;
                log::debug!("camera: released");
            }
            Phase::Requesting(_) | Phase::Errored(_) => {
                log::debug!("camera: closed");
            }
        }
    }
}

impl<S: MediaStreamHandle> Drop for CameraController<S> {
    fn drop(&mut self) {
        self.close();
    }
}

/// Run one open -> request -> complete cycle. The controller is not borrowed
/// across the device await, so a close issued meanwhile is honoured.
pub async fn acquire<D: CaptureDevice>(
    controller: &RefCell<CameraController<D::Stream>>,
    device: &D,
    constraints: &CaptureConstraints,
) -> CameraStatus {
    let ticket = controller.borrow_mut().open();
    let Some(ticket) = ticket else {
        return controller.borrow().status();
    };
    let result = device.request(constraints).await;
    controller.borrow_mut().complete(ticket, result)
}
