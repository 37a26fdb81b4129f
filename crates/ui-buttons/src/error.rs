//! Error types for button construction and enhancement.

use thiserror::Error;
#[cfg(client)]
use wasm_bindgen::JsCast;

/// Result type for button operations
pub type ButtonResult<T> = Result<T, ButtonError>;

/// Errors raised while building or enhancing buttons
///
/// Enhancer event paths never surface these to callers; they are logged and
/// the event is skipped. Factory functions and JS bindings return them.
#[derive(Debug, Error)]
pub enum ButtonError {
	/// A DOM call was rejected by the browser
	#[error("DOM operation failed: {0}")]
	Dom(String),

	/// No global `window` object is available
	#[error("No window available")]
	NoWindow,

	/// The window has no document attached
	#[error("No document available")]
	NoDocument,

	/// The element is not an HTML element and has no inline style
	#[error("Element <{0}> does not support inline styles")]
	NotStylable(String),

	/// The button option record could not be parsed
	#[error("Invalid button configuration: {0}")]
	Config(#[from] serde_json::Error),
}

#[cfg(client)]
impl From<wasm_bindgen::JsValue> for ButtonError {
	fn from(value: wasm_bindgen::JsValue) -> Self {
		let message = value
			.as_string()
			.or_else(|| {
				value
					.dyn_ref::<js_sys::Error>()
					.map(|err| String::from(err.message()))
			})
			.unwrap_or_else(|| format!("{:?}", value));
		ButtonError::Dom(message)
	}
}

#[cfg(client)]
impl From<ButtonError> for wasm_bindgen::JsValue {
	fn from(err: ButtonError) -> Self {
		js_sys::Error::new(&err.to_string()).into()
	}
}
