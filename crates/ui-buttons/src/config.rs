//! Button and enhancer configuration.
//!
//! [`ButtonConfig`] is the option record accepted by the factory. It parses
//! from the camelCase JSON shape used by page scripts:
//!
//! ```ignore
//! let config = ButtonConfig::from_json(
//!     r#"{"text": "Delete", "variant": "destructive", "className": "wide", "iconPosition": "right"}"#,
//! )?;
//! ```
//!
//! [`EnhancerOptions`] holds the class names, timings and styling constants
//! the enhancer works with. Defaults match the stock stylesheet.

use std::time::Duration;

use serde::{Deserialize, Deserializer, Serialize};

use crate::callback::Callback;
use crate::error::ButtonResult;
use crate::event::ClickEvent;

/// Marker class shared by every enhanced button.
pub const BUTTON_CLASS: &str = "ui-btn";
/// Class added while a button is loading.
pub const LOADING_CLASS: &str = "ui-btn-loading";
/// Class of the label wrapper.
pub const CONTENT_CLASS: &str = "ui-btn-content";
/// Class of the icon wrapper.
pub const ICON_CLASS: &str = "ui-btn-icon";
/// Id of the shared `<style>` element holding the ripple keyframes.
pub const RIPPLE_STYLE_ID: &str = "ripple-style";
/// Label used when a button has neither text nor an explicit label.
pub const DEFAULT_LABEL: &str = "Button";
/// Ripple lifetime in milliseconds.
pub const RIPPLE_DURATION_MS: u64 = 600;

/// Visual variant of a button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(from = "Option<String>")]
pub enum ButtonVariant {
	/// Primary styling.
	#[default]
	Default,
	/// Muted styling.
	Secondary,
	/// Dangerous actions.
	Destructive,
	/// Bordered, transparent background.
	Outline,
	/// No border or background until hovered.
	Ghost,
	/// Rendered like a hyperlink.
	Link,
}

impl ButtonVariant {
	/// Every variant, in declaration order.
	pub const ALL: [ButtonVariant; 6] = [
		ButtonVariant::Default,
		ButtonVariant::Secondary,
		ButtonVariant::Destructive,
		ButtonVariant::Outline,
		ButtonVariant::Ghost,
		ButtonVariant::Link,
	];

	/// Parses a variant name. Unrecognized names fall back to `Default`.
	pub fn parse_lossy(name: &str) -> Self {
		match name {
			"secondary" => ButtonVariant::Secondary,
			"destructive" => ButtonVariant::Destructive,
			"outline" => ButtonVariant::Outline,
			"ghost" => ButtonVariant::Ghost,
			"link" => ButtonVariant::Link,
			_ => ButtonVariant::Default,
		}
	}

	/// Variant name as written in markup.
	pub fn as_str(&self) -> &'static str {
		match self {
			ButtonVariant::Default => "default",
			ButtonVariant::Secondary => "secondary",
			ButtonVariant::Destructive => "destructive",
			ButtonVariant::Outline => "outline",
			ButtonVariant::Ghost => "ghost",
			ButtonVariant::Link => "link",
		}
	}

	/// The `ui-btn-*` class for this variant.
	pub fn class_name(&self) -> &'static str {
		match self {
			ButtonVariant::Default => "ui-btn-default",
			ButtonVariant::Secondary => "ui-btn-secondary",
			ButtonVariant::Destructive => "ui-btn-destructive",
			ButtonVariant::Outline => "ui-btn-outline",
			ButtonVariant::Ghost => "ui-btn-ghost",
			ButtonVariant::Link => "ui-btn-link",
		}
	}
}

impl From<String> for ButtonVariant {
	fn from(name: String) -> Self {
		ButtonVariant::parse_lossy(&name)
	}
}

impl From<&str> for ButtonVariant {
	fn from(name: &str) -> Self {
		ButtonVariant::parse_lossy(name)
	}
}

/// `null` selects the default variant.
impl From<Option<String>> for ButtonVariant {
	fn from(name: Option<String>) -> Self {
		name.map(ButtonVariant::from).unwrap_or_default()
	}
}

impl std::fmt::Display for ButtonVariant {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Placement of the icon relative to the label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(from = "Option<String>")]
pub enum IconPosition {
	/// Icon before the label.
	#[default]
	Left,
	/// Icon after the label.
	Right,
}

impl From<String> for IconPosition {
	fn from(name: String) -> Self {
		IconPosition::from(name.as_str())
	}
}

/// `null` keeps the default placement.
impl From<Option<String>> for IconPosition {
	fn from(name: Option<String>) -> Self {
		name.map(IconPosition::from).unwrap_or_default()
	}
}

/// Only the exact name `left` places the icon first.
impl From<&str> for IconPosition {
	fn from(name: &str) -> Self {
		if name == "left" {
			IconPosition::Left
		} else {
			IconPosition::Right
		}
	}
}

/// Options for [`create_button`](crate::factory::create_button).
///
/// Setters follow the builder style:
///
/// ```ignore
/// let config = ButtonConfig::new()
///     .text("Upload")
///     .variant(ButtonVariant::Outline)
///     .icon("<svg>…</svg>")
///     .icon_position(IconPosition::Right)
///     .on_click(|_| info_log!("upload"));
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ButtonConfig {
	/// Label text.
	#[serde(deserialize_with = "label_or_default")]
	pub text: String,
	/// Visual variant.
	pub variant: ButtonVariant,
	/// Extra space-separated classes.
	#[serde(deserialize_with = "null_as_default")]
	pub class_name: String,
	/// Click handler.
	#[serde(skip)]
	pub on_click: Option<Callback<ClickEvent>>,
	/// Initial disabled state.
	#[serde(deserialize_with = "null_as_default")]
	pub disabled: bool,
	/// Initial loading state. Forces `disabled`.
	#[serde(deserialize_with = "null_as_default")]
	pub loading: bool,
	/// Icon markup. Empty markup counts as no icon.
	pub icon: Option<String>,
	/// Icon placement.
	pub icon_position: IconPosition,
}

// Page scripts pass `null` for options they leave unset.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
	D: Deserializer<'de>,
	T: Default + Deserialize<'de>,
{
	Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn label_or_default<'de, D>(deserializer: D) -> Result<String, D::Error>
where
	D: Deserializer<'de>,
{
	Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_else(|| DEFAULT_LABEL.to_string()))
}

impl Default for ButtonConfig {
	fn default() -> Self {
		Self {
			text: DEFAULT_LABEL.to_string(),
			variant: ButtonVariant::Default,
			class_name: String::new(),
			on_click: None,
			disabled: false,
			loading: false,
			icon: None,
			icon_position: IconPosition::Left,
		}
	}
}

impl ButtonConfig {
	/// Creates a configuration with default values.
	pub fn new() -> Self {
		Self::default()
	}

	/// Parses a camelCase JSON option record. Missing fields take defaults.
	pub fn from_json(json: &str) -> ButtonResult<Self> {
		Ok(serde_json::from_str(json)?)
	}

	/// Sets the label text.
	pub fn text(mut self, text: impl Into<String>) -> Self {
		self.text = text.into();
		self
	}

	/// Sets the variant.
	pub fn variant(mut self, variant: impl Into<ButtonVariant>) -> Self {
		self.variant = variant.into();
		self
	}

	/// Sets extra classes.
	pub fn class_name(mut self, class_name: impl Into<String>) -> Self {
		self.class_name = class_name.into();
		self
	}

	/// Sets the click handler.
	pub fn on_click(mut self, handler: impl Into<Callback<ClickEvent>>) -> Self {
		self.on_click = Some(handler.into());
		self
	}

	/// Sets the disabled flag.
	pub fn disabled(mut self, disabled: bool) -> Self {
		self.disabled = disabled;
		self
	}

	/// Sets the loading flag.
	pub fn loading(mut self, loading: bool) -> Self {
		self.loading = loading;
		self
	}

	/// Sets the icon markup.
	pub fn icon(mut self, icon: impl Into<String>) -> Self {
		self.icon = Some(icon.into());
		self
	}

	/// Sets the icon placement.
	pub fn icon_position(mut self, position: IconPosition) -> Self {
		self.icon_position = position;
		self
	}

	/// The icon markup, if a non-empty one was given.
	pub fn icon_markup(&self) -> Option<&str> {
		self.icon.as_deref().filter(|icon| !icon.is_empty())
	}

	/// Effective disabled state. Loading always wins.
	pub fn is_disabled(&self) -> bool {
		self.disabled || self.loading
	}

	/// Full class list for the button, in order and without duplicates.
	pub fn class_list(&self) -> Vec<String> {
		let mut classes: Vec<String> = Vec::new();
		let base = [BUTTON_CLASS, self.variant.class_name()];
		let extra = self.class_name.split_whitespace();
		let loading = self.loading.then_some(LOADING_CLASS);
		for class in base.into_iter().chain(extra).chain(loading) {
			if !classes.iter().any(|existing| existing == class) {
				classes.push(class.to_string());
			}
		}
		classes
	}
}

/// Settings for [`ButtonEnhancer`](crate::enhancer::ButtonEnhancer).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EnhancerOptions {
	/// Class that marks elements as buttons.
	pub selector_class: String,
	/// Id of the shared keyframes `<style>` element.
	pub style_id: String,
	/// Fallback `aria-label` for unlabeled buttons.
	pub fallback_label: String,
	/// Ripple lifetime in milliseconds.
	pub ripple_duration_ms: u64,
	/// Ripple fill colour.
	pub ripple_color: String,
	/// Scale the ripple grows to before it fades out.
	pub ripple_scale: f64,
}

impl Default for EnhancerOptions {
	fn default() -> Self {
		Self {
			selector_class: BUTTON_CLASS.to_string(),
			style_id: RIPPLE_STYLE_ID.to_string(),
			fallback_label: DEFAULT_LABEL.to_string(),
			ripple_duration_ms: RIPPLE_DURATION_MS,
			ripple_color: "rgba(255, 255, 255, 0.3)".to_string(),
			ripple_scale: 4.0,
		}
	}
}

impl EnhancerOptions {
	/// Parses camelCase JSON. Missing fields take defaults.
	pub fn from_json(json: &str) -> ButtonResult<Self> {
		Ok(serde_json::from_str(json)?)
	}

	/// Ripple lifetime.
	pub fn ripple_duration(&self) -> Duration {
		Duration::from_millis(self.ripple_duration_ms)
	}
}
