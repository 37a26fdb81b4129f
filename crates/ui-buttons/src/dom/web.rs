//! Browser DOM backend over `web-sys`.
//!
//! Document listeners and element click listeners are leaked with
//! `Closure::forget`; there is no teardown. Timers use `gloo-timers` and are
//! likewise forgotten once scheduled.

use std::time::Duration;

use gloo_timers::callback::Timeout;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use super::{DocumentListener, DomDocument, DomElement, Rect};
use crate::callback::Callback;
use crate::error::{ButtonError, ButtonResult};
use crate::event::{ClickEvent, EventKind, Interaction, Point};

fn pointer_position(event: &web_sys::Event) -> Option<Point> {
	event
		.dyn_ref::<web_sys::MouseEvent>()
		.map(|mouse| Point::new(f64::from(mouse.client_x()), f64::from(mouse.client_y())))
}

/// Element handle wrapping a `web_sys::Element`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebElement(web_sys::Element);

impl WebElement {
	/// The wrapped element.
	pub fn as_raw(&self) -> &web_sys::Element {
		&self.0
	}

	/// Unwraps the element.
	pub fn into_inner(self) -> web_sys::Element {
		self.0
	}

	fn html(&self) -> ButtonResult<&web_sys::HtmlElement> {
		self.0
			.dyn_ref::<web_sys::HtmlElement>()
			.ok_or_else(|| ButtonError::NotStylable(self.tag_name()))
	}
}

impl From<web_sys::Element> for WebElement {
	fn from(element: web_sys::Element) -> Self {
		Self(element)
	}
}

impl DomElement for WebElement {
	fn tag_name(&self) -> String {
		self.0.tag_name().to_ascii_lowercase()
	}

	fn closest_with_class(&self, class: &str) -> Option<Self> {
		self.0
			.closest(&format!(".{}", class))
			.ok()
			.flatten()
			.map(WebElement)
	}

	fn has_class(&self, class: &str) -> bool {
		self.0.class_list().contains(class)
	}

	fn add_class(&self, class: &str) -> ButtonResult<()> {
		Ok(self.0.class_list().add_1(class)?)
	}

	fn remove_class(&self, class: &str) -> ButtonResult<()> {
		Ok(self.0.class_list().remove_1(class)?)
	}

	fn class_names(&self) -> Vec<String> {
		let list = self.0.class_list();
		(0..list.length()).filter_map(|i| list.item(i)).collect()
	}

	fn has_attribute(&self, name: &str) -> bool {
		self.0.has_attribute(name)
	}

	fn get_attribute(&self, name: &str) -> Option<String> {
		self.0.get_attribute(name)
	}

	fn set_attribute(&self, name: &str, value: &str) -> ButtonResult<()> {
		Ok(self.0.set_attribute(name, value)?)
	}

	fn text_content(&self) -> String {
		self.0.text_content().unwrap_or_default()
	}

	fn set_text_content(&self, text: &str) {
		self.0.set_text_content(Some(text));
	}

	fn set_inner_html(&self, html: &str) {
		self.0.set_inner_html(html);
	}

	fn set_style(&self, property: &str, value: &str) -> ButtonResult<()> {
		Ok(self.html()?.style().set_property(property, value)?)
	}

	fn set_css_text(&self, css: &str) -> ButtonResult<()> {
		self.html()?.style().set_css_text(css);
		Ok(())
	}

	fn append_child(&self, child: &Self) -> ButtonResult<()> {
		self.0.append_child(&child.0)?;
		Ok(())
	}

	fn remove(&self) {
		self.0.remove();
	}

	fn bounding_rect(&self) -> Rect {
		let rect = self.0.get_bounding_client_rect();
		Rect::new(rect.left(), rect.top(), rect.width(), rect.height())
	}

	// Every form control exposes a boolean `disabled` property; other
	// elements leave it undefined.
	fn is_disabled(&self) -> bool {
		js_sys::Reflect::get(&self.0, &JsValue::from_str("disabled"))
			.ok()
			.and_then(|value| value.as_bool())
			.unwrap_or(false)
	}

	fn set_disabled(&self, disabled: bool) -> ButtonResult<()> {
		match self.0.dyn_ref::<web_sys::HtmlButtonElement>() {
			Some(button) => button.set_disabled(disabled),
			None => {
				self.0.toggle_attribute_with_force("disabled", disabled)?;
			}
		}
		Ok(())
	}

	fn click(&self) {
		if let Some(html) = self.0.dyn_ref::<web_sys::HtmlElement>() {
			html.click();
		}
	}

	fn add_click_listener(&self, handler: Callback<ClickEvent>) -> ButtonResult<()> {
		let closure = Closure::wrap(Box::new(move |event: web_sys::Event| {
			handler.call(ClickEvent {
				position: pointer_position(&event),
			});
		}) as Box<dyn FnMut(_)>);

		self.0
			.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;

		closure.forget(); // Keep closure alive
		Ok(())
	}
}

/// The page's document.
#[derive(Debug, Clone)]
pub struct WebDocument {
	document: web_sys::Document,
}

impl WebDocument {
	/// Binds to the global `window.document`.
	pub fn from_window() -> ButtonResult<Self> {
		let window = web_sys::window().ok_or(ButtonError::NoWindow)?;
		let document = window.document().ok_or(ButtonError::NoDocument)?;
		Ok(Self { document })
	}

	/// The wrapped document.
	pub fn as_raw(&self) -> &web_sys::Document {
		&self.document
	}
}

impl From<web_sys::Document> for WebDocument {
	fn from(document: web_sys::Document) -> Self {
		Self { document }
	}
}

impl DomDocument for WebDocument {
	type Element = WebElement;

	fn create_element(&self, tag: &str) -> ButtonResult<WebElement> {
		Ok(WebElement(self.document.create_element(tag)?))
	}

	fn element_by_id(&self, id: &str) -> Option<WebElement> {
		self.document.get_element_by_id(id).map(WebElement)
	}

	fn head(&self) -> Option<WebElement> {
		self.document
			.head()
			.map(|head| WebElement(head.unchecked_into()))
	}

	fn elements_with_class(&self, class: &str) -> Vec<WebElement> {
		let collection = self.document.get_elements_by_class_name(class);
		(0..collection.length())
			.filter_map(|i| collection.item(i))
			.map(WebElement)
			.collect()
	}

	fn listen(&self, kind: EventKind, listener: DocumentListener<WebElement>) -> ButtonResult<()> {
		let closure = Closure::wrap(Box::new(move |event: web_sys::Event| {
			let Some(target) = event
				.target()
				.and_then(|target| target.dyn_into::<web_sys::Element>().ok())
			else {
				return;
			};
			let target = WebElement(target);
			let interaction = match kind {
				EventKind::Click => Interaction::click(target, pointer_position(&event)),
				EventKind::KeyDown => {
					let key = event
						.dyn_ref::<web_sys::KeyboardEvent>()
						.map(web_sys::KeyboardEvent::key)
						.unwrap_or_default();
					Interaction::keydown(target, key)
				}
			};
			listener(&interaction);
			if interaction.default_prevented() {
				event.prevent_default();
			}
		}) as Box<dyn FnMut(_)>);

		self.document
			.add_event_listener_with_callback(kind.as_str(), closure.as_ref().unchecked_ref())?;

		closure.forget(); // Keep closure alive
		Ok(())
	}

	fn on_ready(&self, action: Box<dyn FnOnce()>) -> ButtonResult<()> {
		if self.document.ready_state() != "loading" {
			action();
			return Ok(());
		}
		let callback = Closure::once_into_js(action);
		self.document
			.add_event_listener_with_callback("DOMContentLoaded", callback.unchecked_ref())?;
		Ok(())
	}

	fn set_timeout(&self, delay: Duration, action: Box<dyn FnOnce()>) -> ButtonResult<()> {
		let millis = u32::try_from(delay.as_millis()).unwrap_or(u32::MAX);
		let _ = Timeout::new(millis, action).forget();
		Ok(())
	}
}
