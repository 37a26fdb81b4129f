//! Click ripple overlay.
//!
//! A ripple is a `<span>` sized to the larger side of its button, centred on
//! the pointer, that grows and fades through the shared `ripple` keyframes.
//! It is removed by a plain timer once the configured lifetime has elapsed,
//! independent of the animation's own end event.
//!
//! Keyboard-triggered ripples have no pointer position. Their `left`/`top`
//! are left unset, so the overlay sits at its static position.

use crate::config::EnhancerOptions;
use crate::dom::{DomDocument, DomElement, Rect};
use crate::error::ButtonResult;
use crate::event::Point;
use crate::{debug_log, warn_log};

/// Size and offset of a ripple relative to its button.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RippleGeometry {
	/// Edge length of the square overlay.
	pub size: f64,
	/// Offset from the button's left edge, if a pointer position is known.
	pub left: Option<f64>,
	/// Offset from the button's top edge, if a pointer position is known.
	pub top: Option<f64>,
}

impl RippleGeometry {
	/// Computes the overlay for a button box and an optional pointer position.
	pub fn compute(rect: Rect, pointer: Option<Point>) -> Self {
		let size = rect.width.max(rect.height);
		let half = size / 2.0;
		Self {
			size,
			left: pointer.map(|p| p.x - rect.left - half),
			top: pointer.map(|p| p.y - rect.top - half),
		}
	}

	/// Inline style declaration for the overlay.
	pub fn css_text(&self, options: &EnhancerOptions) -> String {
		let mut declarations = vec![
			"position: absolute".to_string(),
			format!("width: {}px", self.size),
			format!("height: {}px", self.size),
		];
		if let Some(left) = self.left {
			declarations.push(format!("left: {}px", left));
		}
		if let Some(top) = self.top {
			declarations.push(format!("top: {}px", top));
		}
		declarations.extend([
			format!("background: {}", options.ripple_color),
			"border-radius: 50%".to_string(),
			"transform: scale(0)".to_string(),
			format!(
				"animation: ripple {}s linear",
				options.ripple_duration().as_secs_f64()
			),
			"pointer-events: none".to_string(),
			"z-index: 1".to_string(),
		]);
		let mut css = declarations.join("; ");
		css.push(';');
		css
	}
}

/// The `@keyframes ripple` rule installed in the shared style element.
pub fn keyframes_css(options: &EnhancerOptions) -> String {
	format!(
		"@keyframes ripple {{ to {{ transform: scale({}); opacity: 0; }} }}",
		options.ripple_scale
	)
}

/// Installs the shared keyframes `<style>` once per document.
///
/// Returns true if this call created it. The existence check on the style id
/// is the only guard.
pub fn ensure_ripple_style<D: DomDocument>(
	document: &D,
	options: &EnhancerOptions,
) -> ButtonResult<bool> {
	if document.element_by_id(&options.style_id).is_some() {
		return Ok(false);
	}
	let Some(head) = document.head() else {
		warn_log!("document has no <head>; ripple keyframes not installed");
		return Ok(false);
	};

	let style = document.create_element("style")?;
	style.set_attribute("id", &options.style_id)?;
	style.set_text_content(&keyframes_css(options));
	head.append_child(&style)?;
	debug_log!("installed #{} ripple keyframes", options.style_id);
	Ok(true)
}

/// Appends a ripple to `button` and schedules its removal.
///
/// Each call creates an independent overlay and timer. If the button leaves
/// the document first, the timed removal is a no-op on a detached node.
pub fn spawn_ripple<D: DomDocument>(
	document: &D,
	button: &D::Element,
	pointer: Option<Point>,
	options: &EnhancerOptions,
) -> ButtonResult<D::Element> {
	let geometry = RippleGeometry::compute(button.bounding_rect(), pointer);

	let ripple = document.create_element("span")?;
	ripple.set_css_text(&geometry.css_text(options))?;

	ensure_ripple_style(document, options)?;

	button.set_style("position", "relative")?;
	button.set_style("overflow", "hidden")?;
	button.append_child(&ripple)?;

	let expired = ripple.clone();
	document.set_timeout(options.ripple_duration(), Box::new(move || expired.remove()))?;

	debug_log!(
		"ripple {}px on <{}> at {:?}",
		geometry.size,
		button.tag_name(),
		pointer
	);
	Ok(ripple)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::dom::VirtualDocument;
	use proptest::prelude::*;
	use rstest::{fixture, rstest};
	use std::time::Duration;

	#[fixture]
	fn options() -> EnhancerOptions {
		EnhancerOptions::default()
	}

	#[rstest]
	fn test_geometry_centres_on_pointer() {
		let rect = Rect::new(100.0, 50.0, 120.0, 40.0);
		let geometry = RippleGeometry::compute(rect, Some(Point::new(130.0, 70.0)));

		assert_eq!(geometry.size, 120.0);
		assert_eq!(geometry.left, Some(-30.0));
		assert_eq!(geometry.top, Some(-40.0));
	}

	#[rstest]
	fn test_geometry_without_pointer_has_no_offsets() {
		let geometry = RippleGeometry::compute(Rect::new(0.0, 0.0, 30.0, 90.0), None);
		assert_eq!(geometry.size, 90.0);
		assert_eq!(geometry.left, None);
		assert_eq!(geometry.top, None);
	}

	#[rstest]
	fn test_css_text(options: EnhancerOptions) {
		let geometry = RippleGeometry {
			size: 120.0,
			left: Some(-30.0),
			top: Some(2.5),
		};
		assert_eq!(
			geometry.css_text(&options),
			"position: absolute; width: 120px; height: 120px; left: -30px; top: 2.5px; \
			 background: rgba(255, 255, 255, 0.3); border-radius: 50%; transform: scale(0); \
			 animation: ripple 0.6s linear; pointer-events: none; z-index: 1;"
		);
	}

	#[rstest]
	fn test_css_text_omits_missing_offsets(options: EnhancerOptions) {
		let geometry = RippleGeometry::compute(Rect::new(0.0, 0.0, 10.0, 10.0), None);
		let css = geometry.css_text(&options);
		assert!(!css.contains("left:"));
		assert!(!css.contains("top:"));
		assert!(css.contains("width: 10px"));
	}

	#[rstest]
	fn test_keyframes_css(options: EnhancerOptions) {
		assert_eq!(
			keyframes_css(&options),
			"@keyframes ripple { to { transform: scale(4); opacity: 0; } }"
		);
	}

	#[rstest]
	fn test_ensure_style_is_idempotent(options: EnhancerOptions) {
		let document = VirtualDocument::new();

		assert!(ensure_ripple_style(&document, &options).unwrap());
		assert!(!ensure_ripple_style(&document, &options).unwrap());

		let head = document.head().unwrap();
		assert_eq!(head.child_element_count(), 1);
		let style = document.element_by_id("ripple-style").unwrap();
		assert_eq!(style.tag_name(), "style");
		assert!(style.text_content().contains("@keyframes ripple"));
	}

	#[rstest]
	fn test_spawn_ripple_appends_and_expires(options: EnhancerOptions) {
		let document = VirtualDocument::new();
		let button = document.create_element("button").unwrap();
		button.set_rect(Rect::new(10.0, 10.0, 80.0, 30.0));
		document.body().append_child(&button).unwrap();

		let ripple =
			spawn_ripple(&document, &button, Some(Point::new(50.0, 25.0)), &options).unwrap();

		assert_eq!(button.child_element_count(), 1);
		assert_eq!(button.style("position").as_deref(), Some("relative"));
		assert_eq!(button.style("overflow").as_deref(), Some("hidden"));
		assert_eq!(ripple.style("width").as_deref(), Some("80px"));
		assert_eq!(ripple.style("left").as_deref(), Some("0px"));
		assert_eq!(ripple.style("top").as_deref(), Some("-25px"));

		document.advance(Duration::from_millis(599));
		assert_eq!(button.child_element_count(), 1);
		document.advance(Duration::from_millis(1));
		assert_eq!(button.child_element_count(), 0);
	}

	#[rstest]
	fn test_spawn_ripple_on_removed_button(options: EnhancerOptions) {
		let document = VirtualDocument::new();
		let button = document.create_element("button").unwrap();
		document.body().append_child(&button).unwrap();

		spawn_ripple(&document, &button, None, &options).unwrap();
		button.remove();
		document.advance(Duration::from_millis(600));

		assert_eq!(button.child_element_count(), 0);
		assert_eq!(document.pending_timers(), 0);
	}

	proptest! {
		#[test]
		fn prop_ripple_is_square_of_larger_side_and_centred(
			left in -500.0f64..500.0,
			top in -500.0f64..500.0,
			width in 0.0f64..400.0,
			height in 0.0f64..400.0,
			dx in 0.0f64..1.0,
			dy in 0.0f64..1.0,
		) {
			let rect = Rect::new(left, top, width, height);
			let pointer = Point::new(left + dx * width, top + dy * height);
			let geometry = RippleGeometry::compute(rect, Some(pointer));

			prop_assert_eq!(geometry.size, width.max(height));
			let centre_x = geometry.left.unwrap() + geometry.size / 2.0;
			let centre_y = geometry.top.unwrap() + geometry.size / 2.0;
			prop_assert!((centre_x - (pointer.x - left)).abs() < 1e-9);
			prop_assert!((centre_y - (pointer.y - top)).abs() < 1e-9);
		}
	}
}
