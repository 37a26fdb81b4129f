//! Button Factory
//!
//! Builds detached `<button>` elements from a [`ButtonConfig`]. The caller
//! owns placement. Factory buttons are not registered anywhere: the enhancer
//! finds them by class once they are in the document.
//!
//! ## Structure
//!
//! ```text
//! <button class="ui-btn ui-btn-{variant} {className} [ui-btn-loading]" [disabled]>
//!   [<span class="ui-btn-icon">{icon}</span>]      iconPosition = left
//!   <span class="ui-btn-content">{text}</span>
//!   [<span class="ui-btn-icon">{icon}</span>]      iconPosition = right
//! </button>
//! ```

use crate::callback::Callback;
use crate::config::{
	ButtonConfig, ButtonVariant, CONTENT_CLASS, ICON_CLASS, IconPosition, LOADING_CLASS,
};
use crate::dom::{DomDocument, DomElement, VirtualDocument};
use crate::error::ButtonResult;
use crate::event::ClickEvent;

/// Builds a button element from `config`.
///
/// `loading` forces the button disabled even when `disabled` is false.
pub fn create_button<D: DomDocument>(
	document: &D,
	config: ButtonConfig,
) -> ButtonResult<D::Element> {
	let button = document.create_element("button")?;

	for class in config.class_list() {
		button.add_class(&class)?;
	}
	button.set_disabled(config.is_disabled())?;

	let content = document.create_element("span")?;
	content.add_class(CONTENT_CLASS)?;
	content.set_text_content(&config.text);

	match config.icon_markup() {
		Some(markup) => {
			let icon = document.create_element("span")?;
			icon.set_inner_html(markup);
			icon.add_class(ICON_CLASS)?;
			match config.icon_position {
				IconPosition::Left => {
					button.append_child(&icon)?;
					button.append_child(&content)?;
				}
				IconPosition::Right => {
					button.append_child(&content)?;
					button.append_child(&icon)?;
				}
			}
		}
		None => button.append_child(&content)?,
	}

	if let Some(handler) = config.on_click {
		button.add_click_listener(handler)?;
	}

	Ok(button)
}

/// Builds a button that starts in the loading state.
pub fn create_loading_button<D: DomDocument>(
	document: &D,
	text: impl Into<String>,
	variant: impl Into<ButtonVariant>,
	on_click: Option<Callback<ClickEvent>>,
) -> ButtonResult<D::Element> {
	let config = ButtonConfig {
		text: text.into(),
		variant: variant.into(),
		on_click,
		loading: true,
		..ButtonConfig::default()
	};
	create_button(document, config)
}

/// Builds a button with an icon before its label.
pub fn create_icon_button<D: DomDocument>(
	document: &D,
	text: impl Into<String>,
	icon: impl Into<String>,
	variant: impl Into<ButtonVariant>,
	on_click: Option<Callback<ClickEvent>>,
) -> ButtonResult<D::Element> {
	let config = ButtonConfig {
		text: text.into(),
		variant: variant.into(),
		icon: Some(icon.into()),
		on_click,
		..ButtonConfig::default()
	};
	create_button(document, config)
}

/// Switches an existing button in or out of the loading state.
///
/// The loading class and the disabled flag always move together.
pub fn toggle_button_loading<E: DomElement>(button: &E, loading: bool) -> ButtonResult<()> {
	if loading {
		button.add_class(LOADING_CLASS)?;
	} else {
		button.remove_class(LOADING_CLASS)?;
	}
	button.set_disabled(loading)
}

/// Renders a button to HTML without a browser.
///
/// The markup matches what [`create_button`] builds in a page. Click
/// handlers cannot be serialized and are dropped.
pub fn render_html(config: ButtonConfig) -> ButtonResult<String> {
	let document = VirtualDocument::new();
	let button = create_button(&document, config)?;
	Ok(button.to_html())
}
