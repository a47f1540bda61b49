pub mod codec;
pub mod dsp;
pub mod error;
pub mod event;
pub mod pitch;
pub mod preset;
pub mod tone;

#[cfg(feature = "host")]
pub mod cache;
#[cfg(feature = "host")]
pub mod config;
#[cfg(feature = "host")]
pub mod custom;
#[cfg(feature = "host")]
pub mod hooks;
#[cfg(feature = "host")]
pub mod player;

pub use error::CueError;
pub use tone::Tone;

use wasm_bindgen::prelude::*;

/// The crate version, read from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// WASM-exposed: return the cuebell version string.
#[wasm_bindgen]
pub fn core_version() -> String {
    VERSION.to_string()
}

/// Decode a tone code and render it to WAV bytes.
pub fn code_to_wav(code: &str) -> Result<Vec<u8>, CueError> {
    let tones = codec::decode(code)?;
    Ok(dsp::wav::encode(&dsp::render(&tones)))
}

/// WASM-exposed: decode a tone code into an array of `{freq, duration}`.
#[wasm_bindgen]
pub fn decode_code(code: &str) -> Result<JsValue, JsValue> {
    let tones = codec::decode(code).map_err(|e| JsValue::from_str(&format!("{e}")))?;
    serde_wasm_bindgen::to_value(&tones).map_err(|e| JsValue::from_str(&format!("{e}")))
}

/// WASM-exposed: decode a tone code and render it to a WAV byte array.
#[wasm_bindgen]
pub fn render_code_wav(code: &str) -> Result<Vec<u8>, JsValue> {
    code_to_wav(code).map_err(|e| JsValue::from_str(&format!("{e}")))
}
