//! Tauri Command Wrappers
//!
//! Frontend bindings to the host's entity store commands.

mod scanned_item;

use wasm_bindgen::prelude::*;
use smartcart_core::StoreError;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = ["window", "__TAURI__", "core"], catch)]
    async fn invoke(cmd: &str, args: JsValue) -> Result<JsValue, JsValue>;
}

/// Whether a Tauri host injected its IPC bridge into this page
pub fn host_available() -> bool {
    web_sys::window()
        .and_then(|w| js_sys::Reflect::get(&w, &JsValue::from_str("__TAURI__")).ok())
        .map(|v| !v.is_undefined() && !v.is_null())
        .unwrap_or(false)
}

/// A rejected invoke: hosts reject with a string, anything else is debug-printed
fn transport_error(err: JsValue) -> StoreError {
    match err.as_string() {
        Some(msg) => StoreError::Transport(msg),
        None => StoreError::Transport(format!("{:?}", err)),
    }
}

fn encode_error(err: serde_wasm_bindgen::Error) -> StoreError {
    StoreError::Rejected(format!("cannot encode arguments: {}", err))
}

fn decode_error(err: serde_wasm_bindgen::Error) -> StoreError {
    StoreError::Decode(err.to_string())
}

// Re-export all public items
pub use scanned_item::*;
