//! Button Enhancer
//!
//! Attaches page-wide behaviour to every element carrying the button class:
//!
//! - **Ripple**: a click spawns a ripple overlay centred on the pointer
//! - **Keyboard activation**: Enter or Space clicks the focused button and
//!   spawns a ripple
//! - **Accessibility**: once the document is parsed, every button present at
//!   that moment gets a fallback label, a `button` role and, when disabled,
//!   `aria-disabled`/`tabindex` so it leaves the tab order
//!
//! Listeners are installed once, on the document root, and stay for the
//! lifetime of the page. Elements inserted later are matched by class at
//! event time.
//!
//! ## Example
//!
//! ```ignore
//! let document = WebDocument::from_window()?;
//! let enhancer = ButtonEnhancer::new(document)?;
//! ```
//!
//! ## Keyboard ripples
//!
//! A keyboard event has no pointer position, so the ripple it spawns is not
//! centred anywhere in particular. This is a known limitation. Note also that
//! the programmatic click bubbles back to the document and spawns its own
//! ripple, so a keyboard activation shows two overlays.

use std::rc::Rc;

use crate::config::EnhancerOptions;
use crate::delegation::{DelegatedBinding, DelegationRegistry};
use crate::dom::{DomDocument, DomElement};
use crate::error::ButtonResult;
use crate::event::{ACTIVATION_KEYS, EventKind, Interaction, Point};
use crate::ripple::spawn_ripple;
use crate::{info_log, warn_log};

/// What the accessibility sweep changed on one element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AccessibilityPatch {
	/// A fallback `aria-label` was set.
	pub labelled: bool,
	/// `role="button"` was set.
	pub role_added: bool,
	/// `aria-disabled`/`tabindex` were set on a disabled element.
	pub disabled_marked: bool,
}

impl AccessibilityPatch {
	/// Returns true if nothing was changed.
	pub fn is_empty(&self) -> bool {
		!(self.labelled || self.role_added || self.disabled_marked)
	}
}

/// Applies the accessibility rules to one element.
///
/// Each rule is checked independently. Running it twice changes nothing the
/// second time, except that a still-disabled element has its
/// `aria-disabled`/`tabindex` rewritten with the same values.
pub fn apply_accessibility<E: DomElement>(
	element: &E,
	options: &EnhancerOptions,
) -> ButtonResult<AccessibilityPatch> {
	let mut patch = AccessibilityPatch::default();

	if !element.has_attribute("aria-label") && element.text_content().trim().is_empty() {
		element.set_attribute("aria-label", &options.fallback_label)?;
		patch.labelled = true;
	}

	if !element.has_attribute("role") {
		element.set_attribute("role", "button")?;
		patch.role_added = true;
	}

	if element.is_disabled() {
		element.set_attribute("aria-disabled", "true")?;
		element.set_attribute("tabindex", "-1")?;
		patch.disabled_marked = true;
	}

	Ok(patch)
}

struct EnhancerInner<D: DomDocument> {
	document: D,
	options: EnhancerOptions,
	registry: Rc<DelegationRegistry<D::Element>>,
}

impl<D: DomDocument> EnhancerInner<D> {
	fn ripple(&self, button: &D::Element, pointer: Option<Point>) {
		if let Err(err) = spawn_ripple(&self.document, button, pointer, &self.options) {
			warn_log!("failed to spawn ripple: {}", err);
		}
	}

	fn activate(&self, button: &D::Element, interaction: &Interaction<D::Element>) {
		button.click();
		self.ripple(button, interaction.position());
	}

	fn sweep(&self) -> usize {
		let buttons = self
			.document
			.elements_with_class(&self.options.selector_class);
		let mut patched = 0;
		for button in &buttons {
			match apply_accessibility(button, &self.options) {
				Ok(patch) if !patch.is_empty() => patched += 1,
				Ok(_) => {}
				Err(err) => warn_log!("failed to patch accessibility attributes: {}", err),
			}
		}
		info_log!(
			"accessibility sweep: {} of {} buttons patched",
			patched,
			buttons.len()
		);
		patched
	}
}

/// Page-wide button behaviour bound to one document.
///
/// Cloning shares the same listeners; the subscription itself is permanent
/// and outlives every handle.
pub struct ButtonEnhancer<D: DomDocument> {
	inner: Rc<EnhancerInner<D>>,
}

impl<D: DomDocument> Clone for ButtonEnhancer<D> {
	fn clone(&self) -> Self {
		Self {
			inner: Rc::clone(&self.inner),
		}
	}
}

impl<D: DomDocument> std::fmt::Debug for ButtonEnhancer<D> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("ButtonEnhancer")
			.field("options", &self.inner.options)
			.field("registry", &self.inner.registry)
			.finish()
	}
}

impl<D: DomDocument> ButtonEnhancer<D> {
	/// Installs the enhancer with default options.
	pub fn new(document: D) -> ButtonResult<Self> {
		Self::with_options(document, EnhancerOptions::default())
	}

	/// Installs the enhancer: click and keydown delegation on the document
	/// root, plus the one-time accessibility sweep on DOM-ready.
	pub fn with_options(document: D, options: EnhancerOptions) -> ButtonResult<Self> {
		let registry = Rc::new(DelegationRegistry::new());
		let inner = Rc::new(EnhancerInner {
			document: document.clone(),
			options,
			registry: Rc::clone(&registry),
		});
		let selector = inner.options.selector_class.clone();

		let on_click = Rc::clone(&inner);
		registry.bind(
			DelegatedBinding::new(EventKind::Click, selector.as_str()),
			Rc::new(move |button: &D::Element, interaction: &Interaction<D::Element>| {
				on_click.ripple(button, interaction.position());
			}),
		);

		let on_key = Rc::clone(&inner);
		registry.bind(
			DelegatedBinding::new(EventKind::KeyDown, selector.as_str())
				.keys(ACTIVATION_KEYS)
				.prevent_default(true),
			Rc::new(move |button: &D::Element, interaction: &Interaction<D::Element>| {
				on_key.activate(button, interaction);
			}),
		);

		DelegationRegistry::attach(&registry, &document)?;

		let on_ready = Rc::clone(&inner);
		document.on_ready(Box::new(move || {
			on_ready.sweep();
		}))?;

		info_log!("button enhancer installed for .{}", selector);
		Ok(Self { inner })
	}

	/// The options this enhancer was built with.
	pub fn options(&self) -> &EnhancerOptions {
		&self.inner.options
	}

	/// The document the listeners are bound to.
	pub fn document(&self) -> &D {
		&self.inner.document
	}

	/// Spawns a ripple on `button`, as a click at `pointer` would.
	pub fn create_ripple(
		&self,
		button: &D::Element,
		pointer: Option<Point>,
	) -> ButtonResult<D::Element> {
		spawn_ripple(&self.inner.document, button, pointer, &self.inner.options)
	}

	/// Runs the accessibility sweep over every button currently in the
	/// document. Returns how many elements were changed.
	///
	/// The DOM-ready hook calls this once; calling it again is harmless.
	pub fn patch_accessibility(&self) -> usize {
		self.inner.sweep()
	}
}
