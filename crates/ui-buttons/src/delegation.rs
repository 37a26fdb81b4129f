//! Event Delegation
//!
//! One listener per event type is installed on the document root. Each
//! incoming event is routed to the handlers whose selector class matches the
//! nearest inclusive ancestor of the event target, so elements inserted after
//! installation are covered without per-element registration.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use crate::dom::{DomDocument, DomElement};
use crate::error::ButtonResult;
use crate::event::{EventKind, Interaction};

/// A binding between an event type, a selector class and a handler.
#[derive(Debug, Clone)]
pub struct DelegatedBinding {
	/// The event type.
	pub event: EventKind,
	/// Class the target (or one of its ancestors) must carry.
	pub selector: String,
	/// Accepted `key` values. Empty accepts every event.
	pub keys: Vec<String>,
	/// Whether to prevent default behavior when the binding matches.
	pub prevent_default: bool,
}

impl DelegatedBinding {
	/// Creates a new binding.
	pub fn new(event: EventKind, selector: impl Into<String>) -> Self {
		Self {
			event,
			selector: selector.into(),
			keys: Vec::new(),
			prevent_default: false,
		}
	}

	/// Restricts the binding to the given keys.
	pub fn keys<I, S>(mut self, keys: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.keys = keys.into_iter().map(Into::into).collect();
		self
	}

	/// Sets the prevent_default option.
	pub fn prevent_default(mut self, prevent: bool) -> Self {
		self.prevent_default = prevent;
		self
	}

	fn accepts_key(&self, key: Option<&str>) -> bool {
		self.keys.is_empty() || key.is_some_and(|key| self.keys.iter().any(|k| k == key))
	}
}

/// Handler invoked with the matched element and the original event.
pub type DelegatedHandler<E> = Rc<dyn Fn(&E, &Interaction<E>)>;

type Route<E> = (DelegatedBinding, DelegatedHandler<E>);

/// Central dispatcher from document events to selector-matched handlers.
pub struct DelegationRegistry<E> {
	routes: RefCell<BTreeMap<EventKind, Vec<Route<E>>>>,
}

impl<E> Default for DelegationRegistry<E> {
	fn default() -> Self {
		Self {
			routes: RefCell::new(BTreeMap::new()),
		}
	}
}

impl<E> std::fmt::Debug for DelegationRegistry<E> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let routes = self.routes.borrow();
		let bindings: Vec<&DelegatedBinding> = routes.values().flatten().map(|(b, _)| b).collect();
		f.debug_struct("DelegationRegistry")
			.field("bindings", &bindings)
			.finish()
	}
}

impl<E: DomElement> DelegationRegistry<E> {
	/// Creates an empty registry.
	pub fn new() -> Self {
		Self::default()
	}

	/// Registers a handler for a binding.
	pub fn bind(&self, binding: DelegatedBinding, handler: DelegatedHandler<E>) {
		self.routes
			.borrow_mut()
			.entry(binding.event)
			.or_default()
			.push((binding, handler));
	}

	/// Event types with at least one binding.
	pub fn event_kinds(&self) -> Vec<EventKind> {
		self.routes.borrow().keys().copied().collect()
	}

	/// Returns the number of bindings.
	pub fn len(&self) -> usize {
		self.routes.borrow().values().map(Vec::len).sum()
	}

	/// Returns true if nothing is bound.
	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// Routes one event. Returns how many handlers ran.
	///
	/// A target with no matching ancestor is a silent no-op.
	pub fn dispatch(&self, interaction: &Interaction<E>) -> usize {
		// Handlers may re-enter dispatch (e.g. a synthetic click), so the
		// borrow must not outlive this statement.
		let routes = self
			.routes
			.borrow()
			.get(&interaction.kind())
			.cloned()
			.unwrap_or_default();

		let mut handled = 0;
		for (binding, handler) in routes {
			if !binding.accepts_key(interaction.key()) {
				continue;
			}
			let Some(matched) = interaction.target().closest_with_class(&binding.selector) else {
				continue;
			};
			if binding.prevent_default {
				interaction.prevent_default();
			}
			handler(&matched, interaction);
			handled += 1;
		}
		handled
	}

	/// Installs one document listener per bound event type.
	///
	/// Bindings added after this call are still routed for event types that
	/// were already bound; new event types need another `attach`.
	pub fn attach<D>(registry: &Rc<Self>, document: &D) -> ButtonResult<()>
	where
		D: DomDocument<Element = E>,
	{
		for kind in registry.event_kinds() {
			let registry = Rc::clone(registry);
			document.listen(
				kind,
				Rc::new(move |interaction: &Interaction<E>| {
					registry.dispatch(interaction);
				}),
			)?;
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::dom::{VirtualDocument, VirtualElement};
	use crate::event::Point;
	use rstest::{fixture, rstest};
	use std::cell::Cell;

	struct Page {
		document: VirtualDocument,
		button: VirtualElement,
		label: VirtualElement,
		plain: VirtualElement,
	}

	#[fixture]
	fn page() -> Page {
		let document = VirtualDocument::new();
		let button = document.create_element("button").unwrap();
		button.add_class("ui-btn").unwrap();
		let label = document.create_element("span").unwrap();
		button.append_child(&label).unwrap();
		let plain = document.create_element("div").unwrap();
		document.body().append_child(&button).unwrap();
		document.body().append_child(&plain).unwrap();
		Page {
			document,
			button,
			label,
			plain,
		}
	}

	fn counter() -> (Rc<Cell<usize>>, DelegatedHandler<VirtualElement>) {
		let count = Rc::new(Cell::new(0));
		let count_clone = count.clone();
		let handler: DelegatedHandler<VirtualElement> =
			Rc::new(move |_: &VirtualElement, _: &Interaction<VirtualElement>| {
				count_clone.set(count_clone.get() + 1)
			});
		(count, handler)
	}

	#[rstest]
	fn test_binding_new() {
		let binding = DelegatedBinding::new(EventKind::Click, "ui-btn");
		assert_eq!(binding.event, EventKind::Click);
		assert_eq!(binding.selector, "ui-btn");
		assert!(binding.keys.is_empty());
		assert!(!binding.prevent_default);
	}

	#[rstest]
	fn test_binding_builder() {
		let binding = DelegatedBinding::new(EventKind::KeyDown, "ui-btn")
			.keys(["Enter", " "])
			.prevent_default(true);
		assert_eq!(binding.keys, vec!["Enter", " "]);
		assert!(binding.prevent_default);
		assert!(binding.accepts_key(Some("Enter")));
		assert!(!binding.accepts_key(Some("Tab")));
		assert!(!binding.accepts_key(None));
	}

	#[rstest]
	fn test_registry_len() {
		let registry = DelegationRegistry::<VirtualElement>::new();
		assert!(registry.is_empty());

		let (_, handler) = counter();
		registry.bind(DelegatedBinding::new(EventKind::Click, "a"), handler.clone());
		registry.bind(DelegatedBinding::new(EventKind::Click, "b"), handler.clone());
		registry.bind(DelegatedBinding::new(EventKind::KeyDown, "a"), handler);

		assert_eq!(registry.len(), 3);
		assert_eq!(
			registry.event_kinds(),
			vec![EventKind::Click, EventKind::KeyDown]
		);
	}

	#[rstest]
	fn test_dispatch_matches_ancestor(page: Page) {
		let registry = DelegationRegistry::new();
		let seen = Rc::new(RefCell::new(None));
		let seen_clone = seen.clone();
		registry.bind(
			DelegatedBinding::new(EventKind::Click, "ui-btn"),
			Rc::new(move |matched: &VirtualElement, _: &Interaction<VirtualElement>| {
				*seen_clone.borrow_mut() = Some(matched.clone());
			}),
		);

		let handled = registry.dispatch(&Interaction::click(page.label.clone(), None));

		assert_eq!(handled, 1);
		assert!(seen.borrow().as_ref().unwrap().same_node(&page.button));
	}

	#[rstest]
	fn test_dispatch_without_match_is_noop(page: Page) {
		let registry = DelegationRegistry::new();
		let (count, handler) = counter();
		registry.bind(
			DelegatedBinding::new(EventKind::Click, "ui-btn").prevent_default(true),
			handler,
		);

		let interaction = Interaction::click(page.plain.clone(), None);
		assert_eq!(registry.dispatch(&interaction), 0);
		assert_eq!(count.get(), 0);
		assert!(!interaction.default_prevented());
	}

	#[rstest]
	fn test_dispatch_filters_keys(page: Page) {
		let registry = DelegationRegistry::new();
		let (count, handler) = counter();
		registry.bind(
			DelegatedBinding::new(EventKind::KeyDown, "ui-btn")
				.keys(["Enter"])
				.prevent_default(true),
			handler,
		);

		let tab = Interaction::keydown(page.button.clone(), "Tab");
		assert_eq!(registry.dispatch(&tab), 0);
		assert!(!tab.default_prevented());

		let enter = Interaction::keydown(page.button.clone(), "Enter");
		assert_eq!(registry.dispatch(&enter), 1);
		assert!(enter.default_prevented());
		assert_eq!(count.get(), 1);
	}

	#[rstest]
	fn test_attach_installs_one_listener_per_kind(page: Page) {
		let registry = Rc::new(DelegationRegistry::new());
		let (clicks, click_handler) = counter();
		let (keys, key_handler) = counter();
		registry.bind(DelegatedBinding::new(EventKind::Click, "ui-btn"), click_handler);
		registry.bind(DelegatedBinding::new(EventKind::KeyDown, "ui-btn"), key_handler);

		DelegationRegistry::attach(&registry, &page.document).unwrap();

		page.document.dispatch_click(&page.label, Point::new(0.0, 0.0));
		page.document.dispatch_keydown(&page.button, "x");
		page.document.dispatch_click(&page.plain, Point::new(0.0, 0.0));

		assert_eq!(clicks.get(), 1);
		assert_eq!(keys.get(), 1);
	}

	#[rstest]
	fn test_dispatch_is_reentrant(page: Page) {
		let registry = Rc::new(DelegationRegistry::new());
		let (clicks, click_handler) = counter();
		registry.bind(DelegatedBinding::new(EventKind::Click, "ui-btn"), click_handler);
		registry.bind(
			DelegatedBinding::new(EventKind::KeyDown, "ui-btn"),
			Rc::new(|matched: &VirtualElement, _: &Interaction<VirtualElement>| matched.click()),
		);
		DelegationRegistry::attach(&registry, &page.document).unwrap();

		page.document.dispatch_keydown(&page.label, "Enter");

		assert_eq!(clicks.get(), 1);
	}
}
