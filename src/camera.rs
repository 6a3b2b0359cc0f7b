//! Browser Camera
//!
//! `getUserMedia` binding for the core camera controller.

use async_trait::async_trait;
use serde::Serialize;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;

use smartcart_core::{CaptureConstraints, CaptureDevice, CaptureError, MediaStreamHandle};

#[derive(Serialize)]
struct VideoConstraints<'a> {
    #[serde(rename = "facingMode")]
    facing_mode: &'a str,
}

#[derive(Serialize)]
struct StreamConstraints<'a> {
    video: VideoConstraints<'a>,
    audio: bool,
}

/// A granted `MediaStream`
pub struct WebStream {
    stream: web_sys::MediaStream,
}

impl WebStream {
    pub fn media_stream(&self) -> &web_sys::MediaStream {
        &self.stream
    }
}

impl MediaStreamHandle for WebStream {
    fn stop_tracks(&self) {
        for track in self.stream.get_tracks().iter() {
            if let Ok(track) = track.dyn_into::<web_sys::MediaStreamTrack>() {
                track.stop();
            }
        }
    }
}

/// `navigator.mediaDevices`
#[derive(Clone, Copy, Default)]
pub struct WebCaptureDevice;

fn capture_error(err: &JsValue) -> CaptureError {
    match err.dyn_ref::<web_sys::DomException>() {
        Some(dom) => CaptureError::from_dom_name(&dom.name()),
        None => CaptureError::Other(format!("{:?}", err)),
    }
}

#[async_trait(?Send)]
impl CaptureDevice for WebCaptureDevice {
    type Stream = WebStream;

    async fn request(&self, constraints: &CaptureConstraints) -> Result<WebStream, CaptureError> {
        let window = web_sys::window().ok_or_else(|| CaptureError::Other("no window".to_string()))?;
        // Insecure origins have no mediaDevices at all
        let devices = window
            .navigator()
            .media_devices()
            .map_err(|e| capture_error(&e))?;

        let js_constraints = serde_wasm_bindgen::to_value(&StreamConstraints {
            video: VideoConstraints { facing_mode: &constraints.facing_mode },
            audio: constraints.audio,
        })
        .map_err(|e| CaptureError::Other(e.to_string()))?
        .unchecked_into::<web_sys::MediaStreamConstraints>();

        let promise = devices
            .get_user_media_with_constraints(&js_constraints)
            .map_err(|e| capture_error(&e))?;

        match JsFuture::from(promise).await {
            Ok(value) => value
                .dyn_into::<web_sys::MediaStream>()
                .map(|stream| WebStream { stream })
                .map_err(|_| CaptureError::Other("getUserMedia returned a non-stream".to_string())),
            Err(err) => {
                log::error!("error accessing camera: {:?}", err);
                Err(capture_error(&err))
            }
        }
    }
}
