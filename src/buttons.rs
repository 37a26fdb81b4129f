//! Button enhancement and construction
//!
//! This module provides access to ui-buttons: ripple feedback, keyboard
//! activation and accessibility patching for every `.ui-btn` on the page, plus
//! a factory that builds buttons from a typed configuration.
//!
//! ## Example
//!
//! ```rust,ignore
//! use ui_library::buttons::{ButtonConfig, ButtonEnhancer, WebDocument, create_button};
//!
//! let document = WebDocument::from_window()?;
//! let _enhancer = ButtonEnhancer::new(document.clone())?;
//!
//! let save = create_button(&document, ButtonConfig::new().text("Save"))?;
//! ```

// Re-export all ui-buttons functionality
pub use ui_buttons::*;
