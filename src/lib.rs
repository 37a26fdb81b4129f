//! # UI Library
//!
//! Progressive-enhancement components for server-rendered pages that load a
//! WASM module. Each component family lives in its own crate and is
//! re-exported here behind a feature flag.
//!
//! ## Feature Flags
//!
//! - `buttons` (default) - button enhancer and factory ([`buttons`])
//! - `auto-init` (default) - install enhancers when the WASM module starts
//! - `debug-logs` - verbose logging in debug builds
//! - `console_error_panic_hook` - forward panics to the browser console
//!
//! ## Example
//!
//! ```rust,ignore
//! use ui_library::buttons::{ButtonConfig, VirtualDocument, render_html};
//!
//! let html = render_html(ButtonConfig::new().text("Sign in").variant("outline"))?;
//! ```

#[cfg(feature = "buttons")]
pub mod buttons;
