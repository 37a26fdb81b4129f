//! JavaScript exports.
//!
//! Pages that load the wasm module get the enhancer installed automatically
//! (with the `auto-init` feature) and can build buttons from script:
//!
//! ```js
//! import init, { createButton, toggleButtonLoading } from "./ui_buttons.js";
//!
//! await init();
//! const save = createButton({ text: "Save", variant: "secondary", onClick: submit });
//! document.body.append(save);
//! toggleButtonLoading(save, true);
//! ```
//!
//! Option records are read through `JSON.stringify`, so `onClick` is picked
//! up separately and attached as a plain DOM listener.
//!
//! Plain `<script>` pages without module imports get the four factory
//! functions as `window` globals once the module has started. `UIButton`
//! stays a module export: the enhancer is already installed by then.

use std::cell::OnceCell;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use crate::config::{ButtonConfig, ButtonVariant};
use crate::dom::{WebDocument, WebElement};
use crate::enhancer::ButtonEnhancer;
use crate::error::{ButtonError, ButtonResult};
use crate::event::Point;
use crate::factory;
use crate::{debug_log, info_log};

thread_local! {
	static ENHANCER: OnceCell<ButtonEnhancer<WebDocument>> = const { OnceCell::new() };
}

/// Installs the page-wide enhancer on `window.document`.
///
/// Only the first call binds listeners. Later calls return the same
/// enhancer.
pub fn install() -> ButtonResult<ButtonEnhancer<WebDocument>> {
	ENHANCER.with(|cell| {
		if let Some(enhancer) = cell.get() {
			debug_log!("button enhancer already installed");
			return Ok(enhancer.clone());
		}
		let enhancer = ButtonEnhancer::new(WebDocument::from_window()?)?;
		let _ = cell.set(enhancer.clone());
		Ok(enhancer)
	})
}

/// WASM entry point
#[cfg(feature = "auto-init")]
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
	// Set panic hook for better error messages in console
	#[cfg(feature = "console_error_panic_hook")]
	console_error_panic_hook::set_once();

	install()?;
	expose_globals()?;
	Ok(())
}

fn set_global(window: &web_sys::Window, name: &str, function: &JsValue) -> ButtonResult<()> {
	js_sys::Reflect::set(window, &JsValue::from_str(name), function)?;
	Ok(())
}

fn or_throw(result: Result<web_sys::Element, JsValue>) -> JsValue {
	match result {
		Ok(button) => button.into(),
		Err(err) => wasm_bindgen::throw_val(err),
	}
}

/// Mirrors the factory exports onto `window`.
///
/// Arguments arrive untyped, the way a page script passes them: missing or
/// non-string text and variants fall back to defaults, anything that is not
/// a function is ignored as a click handler.
pub fn expose_globals() -> ButtonResult<()> {
	let window = web_sys::window().ok_or(ButtonError::NoWindow)?;

	let create = Closure::wrap(Box::new(|options: JsValue| or_throw(create_button(options)))
		as Box<dyn Fn(JsValue) -> JsValue>);
	set_global(&window, "createButton", create.as_ref())?;
	create.forget();

	let loading = Closure::wrap(Box::new(|text: JsValue, variant: JsValue, on_click: JsValue| {
		or_throw(create_loading_button(
			text.as_string().unwrap_or_default(),
			variant.as_string(),
			on_click.dyn_into().ok(),
		))
	}) as Box<dyn Fn(JsValue, JsValue, JsValue) -> JsValue>);
	set_global(&window, "createLoadingButton", loading.as_ref())?;
	loading.forget();

	let icon = Closure::wrap(Box::new(
		|text: JsValue, icon: JsValue, variant: JsValue, on_click: JsValue| {
			or_throw(create_icon_button(
				text.as_string().unwrap_or_default(),
				icon.as_string().unwrap_or_default(),
				variant.as_string(),
				on_click.dyn_into().ok(),
			))
		},
	) as Box<dyn Fn(JsValue, JsValue, JsValue, JsValue) -> JsValue>);
	set_global(&window, "createIconButton", icon.as_ref())?;
	icon.forget();

	let toggle = Closure::wrap(Box::new(|button: JsValue, is_loading: JsValue| {
		let Ok(button) = button.dyn_into::<web_sys::Element>() else {
			wasm_bindgen::throw_str("toggleButtonLoading expects an element");
		};
		if let Err(err) = toggle_button_loading(&button, is_loading.is_truthy()) {
			wasm_bindgen::throw_val(err);
		}
	}) as Box<dyn Fn(JsValue, JsValue)>);
	set_global(&window, "toggleButtonLoading", toggle.as_ref())?;
	toggle.forget();

	debug_log!("factory functions exposed on window");
	Ok(())
}

/// Handle on the installed enhancer, exported as `UIButton`.
#[wasm_bindgen(js_name = UIButton)]
pub struct UiButton {
	enhancer: ButtonEnhancer<WebDocument>,
}

#[wasm_bindgen(js_class = UIButton)]
impl UiButton {
	/// Returns a handle on the enhancer, installing it if needed.
	#[wasm_bindgen(constructor)]
	pub fn new() -> Result<UiButton, JsValue> {
		Ok(Self {
			enhancer: install()?,
		})
	}

	/// Spawns a ripple on `button`, centred on the given viewport point if
	/// both coordinates are supplied.
	#[wasm_bindgen(js_name = createRipple)]
	pub fn create_ripple(
		&self,
		button: &web_sys::Element,
		x: Option<f64>,
		y: Option<f64>,
	) -> Result<web_sys::Element, JsValue> {
		let pointer = x.zip(y).map(|(x, y)| Point::new(x, y));
		let ripple = self
			.enhancer
			.create_ripple(&WebElement::from(button.clone()), pointer)?;
		Ok(ripple.into_inner())
	}

	/// Re-runs the accessibility sweep. Returns how many buttons changed.
	#[wasm_bindgen(js_name = patchAccessibility)]
	pub fn patch_accessibility(&self) -> u32 {
		u32::try_from(self.enhancer.patch_accessibility()).unwrap_or(u32::MAX)
	}
}

fn read_config(options: &JsValue) -> ButtonResult<ButtonConfig> {
	if !options.is_object() {
		return Ok(ButtonConfig::default());
	}
	let json = js_sys::JSON::stringify(options)?;
	ButtonConfig::from_json(&String::from(json))
}

fn read_on_click(options: &JsValue) -> Option<js_sys::Function> {
	if !options.is_object() {
		return None;
	}
	js_sys::Reflect::get(options, &JsValue::from_str("onClick"))
		.ok()
		.and_then(|value| value.dyn_into::<js_sys::Function>().ok())
}

fn finish(
	button: WebElement,
	on_click: Option<js_sys::Function>,
) -> Result<web_sys::Element, JsValue> {
	let button = button.into_inner();
	if let Some(handler) = on_click {
		button.add_event_listener_with_callback("click", &handler)?;
	}
	Ok(button)
}

/// Builds a detached button from an option record.
#[wasm_bindgen(js_name = createButton)]
pub fn create_button(options: JsValue) -> Result<web_sys::Element, JsValue> {
	let document = WebDocument::from_window()?;
	let config = read_config(&options)?;
	info_log!("creating {} button from option record", config.variant);
	let button = factory::create_button(&document, config)?;
	finish(button, read_on_click(&options))
}

/// Builds a detached button in the loading state.
#[wasm_bindgen(js_name = createLoadingButton)]
pub fn create_loading_button(
	text: String,
	variant: Option<String>,
	on_click: Option<js_sys::Function>,
) -> Result<web_sys::Element, JsValue> {
	let document = WebDocument::from_window()?;
	let button =
		factory::create_loading_button(&document, text, ButtonVariant::from(variant), None)?;
	finish(button, on_click)
}

/// Builds a detached button with a leading icon.
#[wasm_bindgen(js_name = createIconButton)]
pub fn create_icon_button(
	text: String,
	icon: String,
	variant: Option<String>,
	on_click: Option<js_sys::Function>,
) -> Result<web_sys::Element, JsValue> {
	let document = WebDocument::from_window()?;
	let button =
		factory::create_icon_button(&document, text, icon, ButtonVariant::from(variant), None)?;
	finish(button, on_click)
}

/// Switches a button in or out of the loading state.
#[wasm_bindgen(js_name = toggleButtonLoading)]
pub fn toggle_button_loading(button: &web_sys::Element, is_loading: bool) -> Result<(), JsValue> {
	factory::toggle_button_loading(&WebElement::from(button.clone()), is_loading)?;
	Ok(())
}
