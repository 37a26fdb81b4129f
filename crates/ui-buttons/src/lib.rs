//! UI Buttons - Button enhancement and construction for WASM pages
//!
//! Progressive enhancement for elements carrying the `ui-btn` class, plus a
//! factory that builds such buttons from a typed configuration.
//!
//! ## Features
//!
//! - **Ripple feedback**: clicking a button spawns a short-lived ripple overlay
//! - **Keyboard activation**: Enter and Space click the focused button
//! - **Accessibility sweep**: fallback labels, `role` and disabled tab-order
//!   handling for buttons present when the document is parsed
//! - **Button factory**: variant classes, loading state, optional icon
//! - **Server rendering**: the same factory runs against an in-memory document
//!
//! ## Architecture
//!
//! - [`dom`]: DOM abstraction with a `web-sys` backend and a virtual backend
//! - [`delegation`]: document-level event routing by selector class
//! - [`enhancer`]: page-wide behaviour (ripple, keyboard, accessibility)
//! - [`ripple`]: ripple geometry, style installation and expiry
//! - [`factory`]: button construction and loading toggles
//! - [`config`]: option records and class name constants
//! - `bindings`: JavaScript exports (client build only)
//!
//! ## Example
//!
//! ```ignore
//! use ui_buttons::{ButtonConfig, ButtonVariant, VirtualDocument, create_button};
//!
//! let document = VirtualDocument::new();
//! let button = create_button(
//!     &document,
//!     ButtonConfig::new().text("Delete").variant(ButtonVariant::Destructive),
//! )?;
//! assert_eq!(
//!     button.to_html(),
//!     r#"<button class="ui-btn ui-btn-destructive"><span class="ui-btn-content">Delete</span></button>"#
//! );
//! ```
//!
//! ## Feature Flags
//!
//! - `auto-init` (default): install the enhancer when the wasm module starts
//! - `debug-logs`: enable [`debug_log!`] output in debug builds
//! - `console_error_panic_hook`: forward panics to the browser console

#![warn(missing_docs)]

pub mod callback;
pub mod config;
pub mod delegation;
pub mod dom;
pub mod enhancer;
pub mod error;
pub mod event;
pub mod factory;
pub mod logging;
pub mod ripple;

#[cfg(client)]
pub mod bindings;

#[doc(hidden)]
pub mod __macro_support {
	pub use tracing;
	#[cfg(client)]
	pub use web_sys;
}

pub use callback::Callback;
pub use config::{
	BUTTON_CLASS, ButtonConfig, ButtonVariant, CONTENT_CLASS, EnhancerOptions, ICON_CLASS,
	IconPosition, LOADING_CLASS, RIPPLE_STYLE_ID,
};
pub use delegation::{DelegatedBinding, DelegatedHandler, DelegationRegistry};
pub use dom::{DomDocument, DomElement, Rect, VirtualDocument, VirtualElement};
pub use enhancer::{AccessibilityPatch, ButtonEnhancer, apply_accessibility};
pub use error::{ButtonError, ButtonResult};
pub use event::{ACTIVATION_KEYS, ClickEvent, EventKind, Interaction, Point};
pub use factory::{
	create_button, create_icon_button, create_loading_button, render_html, toggle_button_loading,
};
pub use ripple::{RippleGeometry, ensure_ripple_style, spawn_ripple};

#[cfg(client)]
pub use bindings::install;
#[cfg(client)]
pub use dom::{WebDocument, WebElement};
