//! Button WASM Tests
//!
//! Runs the web-sys backend in a real browser: factory output, ripple
//! spawning and the exported JS functions.
//!
//! **Run with**: `wasm-pack test --headless --chrome crates/ui-buttons`

#![cfg(target_arch = "wasm32")]

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

use ui_buttons::bindings;
use ui_buttons::{
	ButtonConfig, ButtonVariant, DomDocument, DomElement, IconPosition, WebDocument, create_button,
	install,
};

fn document() -> WebDocument {
	WebDocument::from_window().unwrap()
}

fn body() -> web_sys::HtmlElement {
	document().as_raw().body().unwrap()
}

// ============================================================================
// Factory Tests
// ============================================================================

/// Test factory output matches the expected class list and structure
#[wasm_bindgen_test]
fn test_create_button_structure() {
	let config = ButtonConfig::new()
		.text("Save")
		.variant(ButtonVariant::Secondary)
		.class_name("wide")
		.icon("<b>+</b>")
		.icon_position(IconPosition::Right);
	let button = create_button(&document(), config).unwrap().into_inner();

	assert_eq!(button.tag_name(), "BUTTON");
	assert_eq!(button.class_name(), "ui-btn ui-btn-secondary wide");
	let children = button.children();
	assert_eq!(children.length(), 2);
	assert_eq!(children.item(0).unwrap().class_name(), "ui-btn-content");
	assert_eq!(children.item(1).unwrap().inner_html(), "<b>+</b>");
}

/// Test loading buttons are disabled through the button element property
#[wasm_bindgen_test]
fn test_loading_button_disabled() {
	let button = create_button(&document(), ButtonConfig::new().loading(true)).unwrap();
	let raw = button.as_raw().dyn_ref::<web_sys::HtmlButtonElement>().unwrap();
	assert!(raw.disabled());
	assert!(button.is_disabled());
}

// ============================================================================
// Enhancer Tests
// ============================================================================

/// Test install is idempotent and a click on a button spawns a ripple
#[wasm_bindgen_test]
fn test_click_spawns_ripple() {
	let first = install().unwrap();
	let second = install().unwrap();
	assert_eq!(first.options(), second.options());

	let button = create_button(&document(), ButtonConfig::new().text("Go")).unwrap();
	body().append_child(button.as_raw()).unwrap();

	button.as_raw().unchecked_ref::<web_sys::HtmlElement>().click();

	// Content span plus exactly one ripple
	assert_eq!(button.as_raw().child_element_count(), 2);
	assert!(document().element_by_id("ripple-style").is_some());
	button.remove();
}

/// Test the sweep marks any disabled form control, not only `<button>`
#[wasm_bindgen_test]
fn test_sweep_marks_disabled_input() {
	let enhancer = install().unwrap();
	let input = document().create_element("input").unwrap();
	input.set_attribute("type", "submit").unwrap();
	input.add_class("ui-btn").unwrap();
	input.set_attribute("disabled", "").unwrap();
	body().append_child(input.as_raw()).unwrap();

	assert!(input.is_disabled());
	enhancer.patch_accessibility();

	assert_eq!(input.get_attribute("aria-disabled").as_deref(), Some("true"));
	assert_eq!(input.get_attribute("tabindex").as_deref(), Some("-1"));
	input.remove();
}

/// Test elements without a `disabled` property never count as disabled
#[wasm_bindgen_test]
fn test_div_disabled_attribute_is_ignored() {
	let div = document().create_element("div").unwrap();
	div.set_attribute("disabled", "").unwrap();
	assert!(!div.is_disabled());
}

// ============================================================================
// JS Export Tests
// ============================================================================

/// Test createButton reads the option record
#[wasm_bindgen_test]
fn test_js_create_button() {
	let options = js_sys::Object::new();
	js_sys::Reflect::set(&options, &"text".into(), &"Delete".into()).unwrap();
	js_sys::Reflect::set(&options, &"variant".into(), &"destructive".into()).unwrap();
	js_sys::Reflect::set(&options, &"disabled".into(), &JsValue::TRUE).unwrap();

	let button = bindings::create_button(options.into()).unwrap();

	assert!(button.class_list().contains("ui-btn-destructive"));
	assert!(button.has_attribute("disabled"));
	assert_eq!(button.text_content().as_deref(), Some("Delete"));
}

/// Test createButton without options produces the default button
#[wasm_bindgen_test]
fn test_js_create_button_defaults() {
	let button = bindings::create_button(JsValue::UNDEFINED).unwrap();
	assert_eq!(button.class_name(), "ui-btn ui-btn-default");
	assert_eq!(button.text_content().as_deref(), Some("Button"));
}

/// Test createButton treats null fields as unset
#[wasm_bindgen_test]
fn test_js_create_button_null_fields() {
	let options = js_sys::Object::new();
	js_sys::Reflect::set(&options, &"variant".into(), &JsValue::NULL).unwrap();
	js_sys::Reflect::set(&options, &"onClick".into(), &JsValue::NULL).unwrap();
	js_sys::Reflect::set(&options, &"icon".into(), &JsValue::NULL).unwrap();

	let button = bindings::create_button(options.into()).unwrap();

	assert_eq!(button.class_name(), "ui-btn ui-btn-default");
	assert_eq!(button.child_element_count(), 1);
}

/// Test the factory functions are reachable as window globals
#[wasm_bindgen_test]
fn test_globals_exposed() {
	bindings::expose_globals().unwrap();
	let window = web_sys::window().unwrap();

	for name in [
		"createButton",
		"createLoadingButton",
		"createIconButton",
		"toggleButtonLoading",
	] {
		let value = js_sys::Reflect::get(&window, &name.into()).unwrap();
		assert!(value.is_function(), "{} is not a function", name);
	}

	let create: js_sys::Function = js_sys::Reflect::get(&window, &"createLoadingButton".into())
		.unwrap()
		.unchecked_into();
	let button: web_sys::Element = create
		.call2(&JsValue::NULL, &"Wait".into(), &"ghost".into())
		.unwrap()
		.unchecked_into();
	assert_eq!(button.class_name(), "ui-btn ui-btn-ghost ui-btn-loading");
}

/// Test toggleButtonLoading round trip
#[wasm_bindgen_test]
fn test_js_toggle_loading() {
	let button = bindings::create_loading_button("Wait".to_string(), None, None).unwrap();
	assert!(button.class_list().contains("ui-btn-loading"));

	bindings::toggle_button_loading(&button, false).unwrap();

	assert!(!button.class_list().contains("ui-btn-loading"));
	assert!(!button.has_attribute("disabled"));
}

/// Test createIconButton places the icon first
#[wasm_bindgen_test]
fn test_js_icon_button() {
	let button = bindings::create_icon_button(
		"Home".to_string(),
		"<svg></svg>".to_string(),
		Some("outline".to_string()),
		None,
	)
	.unwrap();

	assert_eq!(
		button.first_element_child().unwrap().class_name(),
		"ui-btn-icon"
	);
	assert!(button.class_list().contains("ui-btn-outline"));
}
