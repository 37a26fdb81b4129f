//! Event types delivered by the DOM backends.
//!
//! [`Interaction`] is what document-level listeners receive. [`ClickEvent`]
//! is the payload handed to per-button click handlers.

use std::cell::Cell;

/// Keys that activate a focused button.
pub const ACTIVATION_KEYS: [&str; 2] = ["Enter", " "];

/// Document-level event types the enhancer subscribes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EventKind {
	/// Pointer click (also fired by `element.click()`).
	Click,
	/// Key press.
	KeyDown,
}

impl EventKind {
	/// DOM event name.
	pub fn as_str(&self) -> &'static str {
		match self {
			EventKind::Click => "click",
			EventKind::KeyDown => "keydown",
		}
	}
}

impl std::fmt::Display for EventKind {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Viewport coordinates of a pointer.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
	/// Horizontal position (`clientX`).
	pub x: f64,
	/// Vertical position (`clientY`).
	pub y: f64,
}

impl Point {
	/// Creates a point.
	pub fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}
}

/// Payload for click handlers attached to a single button.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ClickEvent {
	/// Pointer position, absent for synthetic clicks.
	pub position: Option<Point>,
}

impl ClickEvent {
	/// A click carrying a pointer position.
	pub fn at(position: Point) -> Self {
		Self {
			position: Some(position),
		}
	}

	/// A click dispatched programmatically, without pointer coordinates.
	pub fn synthetic() -> Self {
		Self { position: None }
	}
}

/// An event observed at the document root.
///
/// Listeners call [`Interaction::prevent_default`]; the backend forwards the
/// flag to the native event once all listeners have run.
#[derive(Debug)]
pub struct Interaction<E> {
	kind: EventKind,
	target: E,
	position: Option<Point>,
	key: Option<String>,
	default_prevented: Cell<bool>,
}

impl<E> Interaction<E> {
	/// A click on `target`.
	pub fn click(target: E, position: Option<Point>) -> Self {
		Self {
			kind: EventKind::Click,
			target,
			position,
			key: None,
			default_prevented: Cell::new(false),
		}
	}

	/// A keydown on `target`. Keyboard events carry no pointer position.
	pub fn keydown(target: E, key: impl Into<String>) -> Self {
		Self {
			kind: EventKind::KeyDown,
			target,
			position: None,
			key: Some(key.into()),
			default_prevented: Cell::new(false),
		}
	}

	/// The event type.
	pub fn kind(&self) -> EventKind {
		self.kind
	}

	/// The innermost element the event was dispatched to.
	pub fn target(&self) -> &E {
		&self.target
	}

	/// Pointer position, `None` for keyboard and synthetic events.
	pub fn position(&self) -> Option<Point> {
		self.position
	}

	/// The `key` value of a keyboard event.
	pub fn key(&self) -> Option<&str> {
		self.key.as_deref()
	}

	/// Suppresses the browser's default action.
	pub fn prevent_default(&self) {
		self.default_prevented.set(true);
	}

	/// Whether a listener called [`Interaction::prevent_default`].
	pub fn default_prevented(&self) -> bool {
		self.default_prevented.get()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case(EventKind::Click, "click")]
	#[case(EventKind::KeyDown, "keydown")]
	fn test_event_kind_names(#[case] kind: EventKind, #[case] expected: &str) {
		assert_eq!(kind.as_str(), expected);
		assert_eq!(kind.to_string(), expected);
	}

	#[rstest]
	#[case("Enter", true)]
	#[case(" ", true)]
	#[case("Spacebar", false)]
	#[case("Escape", false)]
	fn test_activation_keys(#[case] key: &str, #[case] expected: bool) {
		assert_eq!(ACTIVATION_KEYS.contains(&key), expected);
	}

	#[rstest]
	fn test_click_has_no_key() {
		let interaction = Interaction::click("button", Some(Point::new(1.0, 2.0)));
		assert_eq!(interaction.key(), None);
		assert_eq!(interaction.position(), Some(Point::new(1.0, 2.0)));
	}

	#[rstest]
	fn test_keydown_has_no_position() {
		let interaction = Interaction::keydown("button", "Enter");
		assert_eq!(interaction.kind(), EventKind::KeyDown);
		assert_eq!(interaction.position(), None);
	}

	#[rstest]
	fn test_prevent_default() {
		let interaction = Interaction::keydown("button", " ");
		assert!(!interaction.default_prevented());
		interaction.prevent_default();
		assert!(interaction.default_prevented());
	}

	#[rstest]
	fn test_click_event_constructors() {
		assert_eq!(ClickEvent::synthetic().position, None);
		assert_eq!(
			ClickEvent::at(Point::new(3.0, 4.0)).position,
			Some(Point::new(3.0, 4.0))
		);
	}
}
