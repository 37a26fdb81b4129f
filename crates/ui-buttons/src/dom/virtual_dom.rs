//! In-memory DOM backend
//!
//! [`VirtualDocument`] models just enough of a browser document for the
//! button code: element trees, class lists, attributes, inline styles,
//! layout boxes, click bubbling up to the document root, the DOM-ready
//! transition and deferred timers driven by a manual clock.
//!
//! It backs every native test and can serialize a tree to HTML, so a
//! factory-built button can be emitted during server-side rendering.
//!
//! ```ignore
//! let document = VirtualDocument::new();
//! let button = create_button(&document, ButtonConfig::new().text("Save"))?;
//! assert_eq!(
//!     button.to_html(),
//!     r#"<button class="ui-btn ui-btn-default"><span class="ui-btn-content">Save</span></button>"#
//! );
//! ```

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};
use std::time::Duration;

use super::{DocumentListener, DomDocument, DomElement, Rect};
use crate::callback::Callback;
use crate::error::{ButtonError, ButtonResult};
use crate::event::{ClickEvent, EventKind, Interaction, Point};

/// Tags whose `disabled` attribute disables the element.
const DISABLEABLE_TAGS: [&str; 7] = [
	"button", "input", "select", "textarea", "fieldset", "optgroup", "option",
];

/// HTML elements without closing tags.
const VOID_TAGS: [&str; 6] = ["br", "hr", "img", "input", "link", "meta"];

#[derive(Debug, Clone)]
enum Child {
	Element(VirtualElement),
	Text(String),
	Markup(String),
}

struct ElementData {
	tag: String,
	attributes: Vec<(String, String)>,
	styles: Vec<(String, String)>,
	children: Vec<Child>,
	parent: Weak<RefCell<ElementData>>,
	owner: Weak<RefCell<DocumentState>>,
	rect: Rect,
	click_listeners: Vec<Callback<ClickEvent>>,
}

/// Element handle in a [`VirtualDocument`].
#[derive(Clone)]
pub struct VirtualElement {
	node: Rc<RefCell<ElementData>>,
}

impl std::fmt::Debug for VirtualElement {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let data = self.node.borrow();
		f.debug_struct("VirtualElement")
			.field("tag", &data.tag)
			.field("attributes", &data.attributes)
			.field("children", &data.children.len())
			.finish()
	}
}

impl VirtualElement {
	fn with_owner(tag: &str, owner: Weak<RefCell<DocumentState>>) -> Self {
		Self {
			node: Rc::new(RefCell::new(ElementData {
				tag: tag.to_ascii_lowercase(),
				attributes: Vec::new(),
				styles: Vec::new(),
				children: Vec::new(),
				parent: Weak::new(),
				owner,
				rect: Rect::default(),
				click_listeners: Vec::new(),
			})),
		}
	}

	/// Returns true if both handles refer to the same node.
	pub fn same_node(&self, other: &VirtualElement) -> bool {
		Rc::ptr_eq(&self.node, &other.node)
	}

	/// The parent element, if attached.
	pub fn parent_element(&self) -> Option<VirtualElement> {
		self.node
			.borrow()
			.parent
			.upgrade()
			.map(|node| VirtualElement { node })
	}

	/// Element children in order.
	pub fn children(&self) -> Vec<VirtualElement> {
		self.node
			.borrow()
			.children
			.iter()
			.filter_map(|child| match child {
				Child::Element(element) => Some(element.clone()),
				_ => None,
			})
			.collect()
	}

	/// Number of element children.
	pub fn child_element_count(&self) -> usize {
		self.children().len()
	}

	/// Raw markup set through `set_inner_html`, if that is the only content.
	pub fn inner_markup(&self) -> Option<String> {
		match self.node.borrow().children.as_slice() {
			[Child::Markup(markup)] => Some(markup.clone()),
			_ => None,
		}
	}

	/// Removes an attribute.
	pub fn remove_attribute(&self, name: &str) {
		self.node
			.borrow_mut()
			.attributes
			.retain(|(key, _)| key != name);
	}

	/// Inline style property value.
	pub fn style(&self, property: &str) -> Option<String> {
		self.node
			.borrow()
			.styles
			.iter()
			.find(|(key, _)| key == property)
			.map(|(_, value)| value.clone())
	}

	/// Serialized inline style declaration.
	pub fn css_text(&self) -> String {
		self.node
			.borrow()
			.styles
			.iter()
			.map(|(key, value)| format!("{}: {};", key, value))
			.collect::<Vec<_>>()
			.join(" ")
	}

	/// Sets the layout box reported by `bounding_rect`.
	pub fn set_rect(&self, rect: Rect) {
		self.node.borrow_mut().rect = rect;
	}

	/// Whether the element is attached to its document's tree.
	pub fn is_connected(&self) -> bool {
		let mut top = self.clone();
		while let Some(parent) = top.parent_element() {
			top = parent;
		}
		self.owner()
			.map(|state| state.borrow().root.same_node(&top))
			.unwrap_or(false)
	}

	/// The element and all its element descendants in document order.
	pub fn descendants_inclusive(&self) -> Vec<VirtualElement> {
		let mut out = vec![self.clone()];
		for child in self.children() {
			out.extend(child.descendants_inclusive());
		}
		out
	}

	/// Serializes the subtree to HTML.
	pub fn to_html(&self) -> String {
		let mut out = String::new();
		self.write_html(&mut out);
		out
	}

	fn write_html(&self, out: &mut String) {
		let data = self.node.borrow();
		out.push('<');
		out.push_str(&data.tag);
		for (name, value) in &data.attributes {
			out.push(' ');
			out.push_str(name);
			if !value.is_empty() {
				out.push_str("=\"");
				out.push_str(&escape_html(value));
				out.push('"');
			}
		}
		if !data.styles.is_empty() {
			let css = data
				.styles
				.iter()
				.map(|(key, value)| format!("{}: {};", key, value))
				.collect::<Vec<_>>()
				.join(" ");
			out.push_str(" style=\"");
			out.push_str(&escape_html(&css));
			out.push('"');
		}
		out.push('>');
		if VOID_TAGS.contains(&data.tag.as_str()) {
			return;
		}
		for child in &data.children {
			match child {
				Child::Element(element) => element.write_html(out),
				Child::Text(text) => out.push_str(&escape_html(text)),
				Child::Markup(markup) => out.push_str(markup),
			}
		}
		out.push_str("</");
		out.push_str(&data.tag);
		out.push('>');
	}

	fn owner(&self) -> Option<Rc<RefCell<DocumentState>>> {
		self.node.borrow().owner.upgrade()
	}

	fn write_classes(&self, tokens: &[String]) {
		let value = tokens.join(" ");
		let mut data = self.node.borrow_mut();
		match data.attributes.iter_mut().find(|(key, _)| key == "class") {
			Some(entry) => entry.1 = value,
			None => data.attributes.push(("class".to_string(), value)),
		}
	}

	fn is_ancestor_of(&self, other: &VirtualElement) -> bool {
		let mut current = other.parent_element();
		while let Some(element) = current {
			if element.same_node(self) {
				return true;
			}
			current = element.parent_element();
		}
		false
	}

	fn clear_children(&self) {
		let children = std::mem::take(&mut self.node.borrow_mut().children);
		for child in children {
			if let Child::Element(element) = child {
				element.node.borrow_mut().parent = Weak::new();
			}
		}
	}

	/// Bubbles a click from this element to the document root.
	fn dispatch_click(&self, event: ClickEvent) -> bool {
		let mut path = vec![self.clone()];
		while let Some(parent) = path.last().and_then(VirtualElement::parent_element) {
			path.push(parent);
		}
		for element in &path {
			let listeners = element.node.borrow().click_listeners.clone();
			for listener in listeners {
				listener.call(event);
			}
		}

		if !self.is_connected() {
			return false;
		}
		let interaction = Interaction::click(self.clone(), event.position);
		if let Some(state) = self.owner() {
			dispatch_to_document(&state, &interaction);
		}
		interaction.default_prevented()
	}
}

impl DomElement for VirtualElement {
	fn tag_name(&self) -> String {
		self.node.borrow().tag.clone()
	}

	fn closest_with_class(&self, class: &str) -> Option<Self> {
		let mut current = Some(self.clone());
		while let Some(element) = current {
			if element.has_class(class) {
				return Some(element);
			}
			current = element.parent_element();
		}
		None
	}

	fn has_class(&self, class: &str) -> bool {
		self.class_names().iter().any(|token| token == class)
	}

	fn add_class(&self, class: &str) -> ButtonResult<()> {
		validate_token(class)?;
		let mut tokens = self.class_names();
		if !tokens.iter().any(|token| token == class) {
			tokens.push(class.to_string());
		}
		self.write_classes(&tokens);
		Ok(())
	}

	fn remove_class(&self, class: &str) -> ButtonResult<()> {
		validate_token(class)?;
		let mut tokens = self.class_names();
		tokens.retain(|token| token != class);
		self.write_classes(&tokens);
		Ok(())
	}

	fn class_names(&self) -> Vec<String> {
		self.get_attribute("class")
			.map(|value| value.split_whitespace().map(str::to_string).collect())
			.unwrap_or_default()
	}

	fn has_attribute(&self, name: &str) -> bool {
		self.node
			.borrow()
			.attributes
			.iter()
			.any(|(key, _)| key == name)
	}

	fn get_attribute(&self, name: &str) -> Option<String> {
		self.node
			.borrow()
			.attributes
			.iter()
			.find(|(key, _)| key == name)
			.map(|(_, value)| value.clone())
	}

	fn set_attribute(&self, name: &str, value: &str) -> ButtonResult<()> {
		if name.is_empty() || name.chars().any(|c| c.is_whitespace() || c == '=') {
			return Err(ButtonError::Dom(format!(
				"InvalidCharacterError: '{}' is not a valid attribute name",
				name
			)));
		}
		if name == "style" {
			return self.set_css_text(value);
		}
		let mut data = self.node.borrow_mut();
		match data.attributes.iter_mut().find(|(key, _)| key == name) {
			Some(entry) => entry.1 = value.to_string(),
			None => data.attributes.push((name.to_string(), value.to_string())),
		}
		Ok(())
	}

	fn text_content(&self) -> String {
		let data = self.node.borrow();
		let mut out = String::new();
		for child in &data.children {
			match child {
				Child::Element(element) => out.push_str(&element.text_content()),
				Child::Text(text) => out.push_str(text),
				Child::Markup(markup) => out.push_str(&strip_tags(markup)),
			}
		}
		out
	}

	fn set_text_content(&self, text: &str) {
		self.clear_children();
		if !text.is_empty() {
			self.node
				.borrow_mut()
				.children
				.push(Child::Text(text.to_string()));
		}
	}

	fn set_inner_html(&self, html: &str) {
		self.clear_children();
		if !html.is_empty() {
			self.node
				.borrow_mut()
				.children
				.push(Child::Markup(html.to_string()));
		}
	}

	fn set_style(&self, property: &str, value: &str) -> ButtonResult<()> {
		let mut data = self.node.borrow_mut();
		match data.styles.iter_mut().find(|(key, _)| key == property) {
			Some(entry) => entry.1 = value.to_string(),
			None => data
				.styles
				.push((property.to_string(), value.to_string())),
		}
		Ok(())
	}

	fn set_css_text(&self, css: &str) -> ButtonResult<()> {
		self.node.borrow_mut().styles = parse_declarations(css);
		Ok(())
	}

	fn append_child(&self, child: &Self) -> ButtonResult<()> {
		if child.same_node(self) || child.is_ancestor_of(self) {
			return Err(ButtonError::Dom(
				"HierarchyRequestError: the new child is an ancestor of the parent".to_string(),
			));
		}
		child.remove();
		child.node.borrow_mut().parent = Rc::downgrade(&self.node);
		self.node
			.borrow_mut()
			.children
			.push(Child::Element(child.clone()));
		Ok(())
	}

	fn remove(&self) {
		if let Some(parent) = self.parent_element() {
			parent.node.borrow_mut().children.retain(|child| match child {
				Child::Element(element) => !element.same_node(self),
				_ => true,
			});
		}
		self.node.borrow_mut().parent = Weak::new();
	}

	fn bounding_rect(&self) -> Rect {
		self.node.borrow().rect
	}

	fn is_disabled(&self) -> bool {
		DISABLEABLE_TAGS.contains(&self.tag_name().as_str()) && self.has_attribute("disabled")
	}

	fn set_disabled(&self, disabled: bool) -> ButtonResult<()> {
		if disabled {
			self.set_attribute("disabled", "")
		} else {
			self.remove_attribute("disabled");
			Ok(())
		}
	}

	fn click(&self) {
		if self.is_disabled() {
			return;
		}
		self.dispatch_click(ClickEvent::synthetic());
	}

	fn add_click_listener(&self, handler: Callback<ClickEvent>) -> ButtonResult<()> {
		self.node.borrow_mut().click_listeners.push(handler);
		Ok(())
	}
}

struct PendingTimer {
	due: Duration,
	seq: u64,
	action: Box<dyn FnOnce()>,
}

struct DocumentState {
	root: VirtualElement,
	head: VirtualElement,
	body: VirtualElement,
	listeners: HashMap<EventKind, Vec<DocumentListener<VirtualElement>>>,
	ready: bool,
	ready_actions: Vec<Box<dyn FnOnce()>>,
	now: Duration,
	timers: Vec<PendingTimer>,
	next_seq: u64,
}

fn dispatch_to_document(state: &Rc<RefCell<DocumentState>>, interaction: &Interaction<VirtualElement>) {
	let listeners = state
		.borrow()
		.listeners
		.get(&interaction.kind())
		.cloned()
		.unwrap_or_default();
	for listener in listeners {
		listener(interaction);
	}
}

/// In-memory document with `<html>`, `<head>` and `<body>`.
///
/// Starts in the loading state; call [`VirtualDocument::fire_ready`] to run
/// DOM-ready actions and [`VirtualDocument::advance`] to fire timers.
#[derive(Clone)]
pub struct VirtualDocument {
	state: Rc<RefCell<DocumentState>>,
}

impl std::fmt::Debug for VirtualDocument {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let state = self.state.borrow();
		f.debug_struct("VirtualDocument")
			.field("ready", &state.ready)
			.field("now", &state.now)
			.field("pending_timers", &state.timers.len())
			.finish()
	}
}

impl Default for VirtualDocument {
	fn default() -> Self {
		Self::new()
	}
}

impl VirtualDocument {
	/// Creates an empty document in the loading state.
	pub fn new() -> Self {
		let root = VirtualElement::with_owner("html", Weak::new());
		let head = VirtualElement::with_owner("head", Weak::new());
		let body = VirtualElement::with_owner("body", Weak::new());

		let state = Rc::new(RefCell::new(DocumentState {
			root: root.clone(),
			head: head.clone(),
			body: body.clone(),
			listeners: HashMap::new(),
			ready: false,
			ready_actions: Vec::new(),
			now: Duration::ZERO,
			timers: Vec::new(),
			next_seq: 0,
		}));

		for element in [&root, &head, &body] {
			element.node.borrow_mut().owner = Rc::downgrade(&state);
		}
		// Static structure; neither call can fail.
		let _ = root.append_child(&head);
		let _ = root.append_child(&body);

		Self { state }
	}

	/// The `<html>` element.
	pub fn document_element(&self) -> VirtualElement {
		self.state.borrow().root.clone()
	}

	/// The `<body>` element.
	pub fn body(&self) -> VirtualElement {
		self.state.borrow().body.clone()
	}

	/// Whether DOM-ready has fired.
	pub fn is_ready(&self) -> bool {
		self.state.borrow().ready
	}

	/// Marks the document as parsed and runs queued DOM-ready actions once.
	pub fn fire_ready(&self) {
		let actions = {
			let mut state = self.state.borrow_mut();
			if state.ready {
				return;
			}
			state.ready = true;
			std::mem::take(&mut state.ready_actions)
		};
		for action in actions {
			action();
		}
	}

	/// Simulates a user click on `target` at viewport position `at`.
	///
	/// Disabled form controls receive no click. Returns true if a listener
	/// prevented the default action.
	pub fn dispatch_click(&self, target: &VirtualElement, at: Point) -> bool {
		if target.is_disabled() {
			return false;
		}
		target.dispatch_click(ClickEvent::at(at))
	}

	/// Simulates a key press while `target` has focus.
	///
	/// Returns true if a listener prevented the default action.
	pub fn dispatch_keydown(&self, target: &VirtualElement, key: &str) -> bool {
		if !target.is_connected() {
			return false;
		}
		let interaction = Interaction::keydown(target.clone(), key);
		dispatch_to_document(&self.state, &interaction);
		interaction.default_prevented()
	}

	/// Elapsed time on the manual clock.
	pub fn now(&self) -> Duration {
		self.state.borrow().now
	}

	/// Number of timers not yet fired.
	pub fn pending_timers(&self) -> usize {
		self.state.borrow().timers.len()
	}

	/// Moves the clock forward, firing due timers in schedule order.
	pub fn advance(&self, by: Duration) {
		let target = self.state.borrow().now + by;
		loop {
			let next = {
				let mut state = self.state.borrow_mut();
				let index = state
					.timers
					.iter()
					.enumerate()
					.filter(|(_, timer)| timer.due <= target)
					.min_by_key(|(_, timer)| (timer.due, timer.seq))
					.map(|(index, _)| index);
				index.map(|index| {
					let timer = state.timers.remove(index);
					state.now = timer.due;
					timer.action
				})
			};
			match next {
				Some(action) => action(),
				None => break,
			}
		}
		self.state.borrow_mut().now = target;
	}

	/// Serializes the whole document to HTML.
	pub fn to_html(&self) -> String {
		self.document_element().to_html()
	}
}

impl DomDocument for VirtualDocument {
	type Element = VirtualElement;

	fn create_element(&self, tag: &str) -> ButtonResult<VirtualElement> {
		if tag.is_empty() || !tag.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
			return Err(ButtonError::Dom(format!(
				"InvalidCharacterError: '{}' is not a valid tag name",
				tag
			)));
		}
		Ok(VirtualElement::with_owner(tag, Rc::downgrade(&self.state)))
	}

	fn element_by_id(&self, id: &str) -> Option<VirtualElement> {
		self.document_element()
			.descendants_inclusive()
			.into_iter()
			.find(|element| element.get_attribute("id").as_deref() == Some(id))
	}

	fn head(&self) -> Option<VirtualElement> {
		Some(self.state.borrow().head.clone())
	}

	fn elements_with_class(&self, class: &str) -> Vec<VirtualElement> {
		self.document_element()
			.descendants_inclusive()
			.into_iter()
			.filter(|element| element.has_class(class))
			.collect()
	}

	fn listen(
		&self,
		kind: EventKind,
		listener: DocumentListener<VirtualElement>,
	) -> ButtonResult<()> {
		self.state
			.borrow_mut()
			.listeners
			.entry(kind)
			.or_default()
			.push(listener);
		Ok(())
	}

	fn on_ready(&self, action: Box<dyn FnOnce()>) -> ButtonResult<()> {
		let run_now = {
			let mut state = self.state.borrow_mut();
			if state.ready {
				Some(action)
			} else {
				state.ready_actions.push(action);
				None
			}
		};
		if let Some(action) = run_now {
			action();
		}
		Ok(())
	}

	fn set_timeout(&self, delay: Duration, action: Box<dyn FnOnce()>) -> ButtonResult<()> {
		let mut state = self.state.borrow_mut();
		let due = state.now + delay;
		let seq = state.next_seq;
		state.next_seq += 1;
		state.timers.push(PendingTimer { due, seq, action });
		Ok(())
	}
}

fn validate_token(token: &str) -> ButtonResult<()> {
	if token.is_empty() {
		return Err(ButtonError::Dom(
			"SyntaxError: the token provided must not be empty".to_string(),
		));
	}
	if token.chars().any(char::is_whitespace) {
		return Err(ButtonError::Dom(format!(
			"InvalidCharacterError: the token '{}' contains whitespace",
			token
		)));
	}
	Ok(())
}

fn parse_declarations(css: &str) -> Vec<(String, String)> {
	let mut styles: Vec<(String, String)> = Vec::new();
	for declaration in css.split(';') {
		let Some((property, value)) = declaration.split_once(':') else {
			continue;
		};
		let property = property.trim();
		let value = value.trim();
		if property.is_empty() || value.is_empty() {
			continue;
		}
		match styles.iter_mut().find(|(key, _)| key == property) {
			Some(entry) => entry.1 = value.to_string(),
			None => styles.push((property.to_string(), value.to_string())),
		}
	}
	styles
}

fn strip_tags(markup: &str) -> String {
	let mut out = String::with_capacity(markup.len());
	let mut in_tag = false;
	for c in markup.chars() {
		match c {
			'<' => in_tag = true,
			'>' => in_tag = false,
			_ if !in_tag => out.push(c),
			_ => {}
		}
	}
	out
}

fn escape_html(input: &str) -> String {
	let mut out = String::with_capacity(input.len());
	for c in input.chars() {
		match c {
			'&' => out.push_str("&amp;"),
			'<' => out.push_str("&lt;"),
			'>' => out.push_str("&gt;"),
			'"' => out.push_str("&quot;"),
			'\'' => out.push_str("&#x27;"),
			_ => out.push(c),
		}
	}
	out
}
