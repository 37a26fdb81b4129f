//! DOM abstraction layer
//!
//! The enhancer and the factory are written against two traits,
//! [`DomDocument`] and [`DomElement`], so the same code drives a real page and
//! an in-memory tree.
//!
//! ## Backends
//!
//! - [`web`]: `web-sys` bindings, client build only
//! - [`virtual_dom`]: in-memory document with a manual clock, available on
//!   every target (native tests, server-side rendering)

use std::rc::Rc;
use std::time::Duration;

use crate::callback::Callback;
use crate::error::ButtonResult;
use crate::event::{ClickEvent, EventKind, Interaction};

pub mod virtual_dom;
#[cfg(client)]
pub mod web;

pub use virtual_dom::{VirtualDocument, VirtualElement};
#[cfg(client)]
pub use web::{WebDocument, WebElement};

/// Listener registered on the document root.
pub type DocumentListener<E> = Rc<dyn Fn(&Interaction<E>)>;

/// Bounding box of an element in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
	/// Distance from the viewport's left edge.
	pub left: f64,
	/// Distance from the viewport's top edge.
	pub top: f64,
	/// Width in CSS pixels.
	pub width: f64,
	/// Height in CSS pixels.
	pub height: f64,
}

impl Rect {
	/// Creates a rectangle.
	pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
		Self {
			left,
			top,
			width,
			height,
		}
	}
}

/// Operations the button code needs from an element handle.
///
/// Handles are cheap to clone and refer to the same underlying node.
pub trait DomElement: Clone + 'static {
	/// Lowercase tag name.
	fn tag_name(&self) -> String;

	/// Nearest inclusive ancestor carrying `class`.
	fn closest_with_class(&self, class: &str) -> Option<Self>;

	/// Whether the class list contains `class`.
	fn has_class(&self, class: &str) -> bool;

	/// Adds `class` to the class list. Adding a present class is a no-op.
	fn add_class(&self, class: &str) -> ButtonResult<()>;

	/// Removes `class` from the class list.
	fn remove_class(&self, class: &str) -> ButtonResult<()>;

	/// Class list tokens in order.
	fn class_names(&self) -> Vec<String>;

	/// Whether the attribute is present.
	fn has_attribute(&self, name: &str) -> bool;

	/// Attribute value, if present.
	fn get_attribute(&self, name: &str) -> Option<String>;

	/// Sets an attribute.
	fn set_attribute(&self, name: &str, value: &str) -> ButtonResult<()>;

	/// Concatenated text of the subtree.
	fn text_content(&self) -> String;

	/// Replaces all children with a single text node.
	fn set_text_content(&self, text: &str);

	/// Replaces all children with parsed markup.
	fn set_inner_html(&self, html: &str);

	/// Sets one inline style property.
	fn set_style(&self, property: &str, value: &str) -> ButtonResult<()>;

	/// Replaces the whole inline style declaration.
	fn set_css_text(&self, css: &str) -> ButtonResult<()>;

	/// Appends `child`, detaching it from any previous parent.
	fn append_child(&self, child: &Self) -> ButtonResult<()>;

	/// Detaches the element from its parent. No-op when already detached.
	fn remove(&self);

	/// Layout box in viewport coordinates.
	fn bounding_rect(&self) -> Rect;

	/// The element's `disabled` state. Elements without one report false.
	fn is_disabled(&self) -> bool;

	/// Sets the `disabled` state.
	fn set_disabled(&self, disabled: bool) -> ButtonResult<()>;

	/// Runs the element's click activation, like `HTMLElement.click()`.
	fn click(&self);

	/// Attaches a click listener for the lifetime of the element.
	fn add_click_listener(&self, handler: Callback<ClickEvent>) -> ButtonResult<()>;
}

/// Operations the button code needs from the document and its window.
pub trait DomDocument: Clone + 'static {
	/// Element handle type.
	type Element: DomElement;

	/// Creates a detached element.
	fn create_element(&self, tag: &str) -> ButtonResult<Self::Element>;

	/// Element with the given id attribute.
	fn element_by_id(&self, id: &str) -> Option<Self::Element>;

	/// The `<head>` element.
	fn head(&self) -> Option<Self::Element>;

	/// Snapshot of every connected element carrying `class`, in document order.
	fn elements_with_class(&self, class: &str) -> Vec<Self::Element>;

	/// Subscribes to an event at the document root. There is no unsubscribe.
	fn listen(&self, kind: EventKind, listener: DocumentListener<Self::Element>)
	-> ButtonResult<()>;

	/// Runs `action` once the document has been parsed.
	fn on_ready(&self, action: Box<dyn FnOnce()>) -> ButtonResult<()>;

	/// Runs `action` once after `delay`. There is no cancellation.
	fn set_timeout(&self, delay: Duration, action: Box<dyn FnOnce()>) -> ButtonResult<()>;
}
