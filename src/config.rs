//! Config Loading
//!
//! Reads `AppConfig` overrides from localStorage. Anything missing or
//! malformed falls back to defaults.

use smartcart_core::AppConfig;

/// localStorage key holding a JSON `AppConfig` document
pub const CONFIG_KEY: &str = "smartcart.config";

pub fn load_config() -> AppConfig {
    let raw = web_sys::window()
        .and_then(|w| w.local_storage().ok().flatten())
        .and_then(|storage| storage.get_item(CONFIG_KEY).ok().flatten());

    match raw {
        None => AppConfig::default(),
        Some(json) => AppConfig::from_json(&json).unwrap_or_else(|e| {
            log::warn!("ignoring stored config: {}", e);
            AppConfig::default()
        }),
    }
}
