//! Logging abstraction layer for ui-buttons
//!
//! Macros that log to the browser console on the client build and emit
//! `tracing` events on native builds. All macros are no-ops in release builds.
//!
//! ## Macro Overview
//!
//! | Macro | Debug Assertions | Feature Required | Client | Server |
//! |-------|------------------|------------------|--------|--------|
//! | `debug_log!` | Required | `debug-logs` | `console.debug` | `tracing::debug!` |
//! | `info_log!` | Required | None | `console.info` | `tracing::info!` |
//! | `warn_log!` | Required | None | `console.warn` | `tracing::warn!` |
//! | `error_log!` | Required | None | `console.error` | `tracing::error!` |
//!
//! ## Example
//!
//! ```ignore
//! use ui_buttons::{debug_log, warn_log};
//!
//! debug_log!("ripple spawned on <{}>", button.tag_name());
//! warn_log!("failed to patch accessibility attributes: {}", err);
//! ```

/// Target used for every `tracing` event emitted by this crate.
pub const LOG_TARGET: &str = "ui_buttons";

/// Logs a debug message (requires `debug-logs` feature + `debug_assertions`)
#[macro_export]
#[cfg(all(debug_assertions, feature = "debug-logs", client))]
macro_rules! debug_log {
	($($arg:tt)*) => {{
		$crate::__macro_support::web_sys::console::debug_1(&format!($($arg)*).into());
	}};
}

/// Logs a debug message (requires `debug-logs` feature + `debug_assertions`)
#[macro_export]
#[cfg(all(debug_assertions, feature = "debug-logs", server))]
macro_rules! debug_log {
	($($arg:tt)*) => {{
		$crate::__macro_support::tracing::debug!(target: $crate::logging::LOG_TARGET, "{}", format!($($arg)*));
	}};
}

/// No-op debug_log when conditions are not met
#[macro_export]
#[cfg(not(all(debug_assertions, feature = "debug-logs")))]
macro_rules! debug_log {
	($($arg:tt)*) => {{}};
}

/// Logs an info message (requires `debug_assertions`)
#[macro_export]
#[cfg(all(debug_assertions, client))]
macro_rules! info_log {
	($($arg:tt)*) => {{
		$crate::__macro_support::web_sys::console::info_1(&format!($($arg)*).into());
	}};
}

/// Logs an info message (requires `debug_assertions`)
#[macro_export]
#[cfg(all(debug_assertions, server))]
macro_rules! info_log {
	($($arg:tt)*) => {{
		$crate::__macro_support::tracing::info!(target: $crate::logging::LOG_TARGET, "{}", format!($($arg)*));
	}};
}

/// No-op info_log in release builds
#[macro_export]
#[cfg(not(debug_assertions))]
macro_rules! info_log {
	($($arg:tt)*) => {{}};
}

/// Logs a warning message (requires `debug_assertions`)
///
/// Used on event paths where a DOM call failed but the page must keep
/// working, e.g. a ripple that could not be appended.
#[macro_export]
#[cfg(all(debug_assertions, client))]
macro_rules! warn_log {
	($($arg:tt)*) => {{
		$crate::__macro_support::web_sys::console::warn_1(&format!($($arg)*).into());
	}};
}

/// Logs a warning message (requires `debug_assertions`)
#[macro_export]
#[cfg(all(debug_assertions, server))]
macro_rules! warn_log {
	($($arg:tt)*) => {{
		$crate::__macro_support::tracing::warn!(target: $crate::logging::LOG_TARGET, "{}", format!($($arg)*));
	}};
}

/// No-op warn_log in release builds
#[macro_export]
#[cfg(not(debug_assertions))]
macro_rules! warn_log {
	($($arg:tt)*) => {{}};
}

/// Logs an error message (requires `debug_assertions`)
#[macro_export]
#[cfg(all(debug_assertions, client))]
macro_rules! error_log {
	($($arg:tt)*) => {{
		$crate::__macro_support::web_sys::console::error_1(&format!($($arg)*).into());
	}};
}

/// Logs an error message (requires `debug_assertions`)
#[macro_export]
#[cfg(all(debug_assertions, server))]
macro_rules! error_log {
	($($arg:tt)*) => {{
		$crate::__macro_support::tracing::error!(target: $crate::logging::LOG_TARGET, "{}", format!($($arg)*));
	}};
}

/// No-op error_log in release builds
#[macro_export]
#[cfg(not(debug_assertions))]
macro_rules! error_log {
	($($arg:tt)*) => {{}};
}
