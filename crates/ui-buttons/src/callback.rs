//! Callback wrapper for button click handlers.
//!
//! Button handles are `Rc`-based and the page runs on a single thread, so a
//! [`Callback`] carries no `Send + Sync` bounds on either target.
//!
//! ## Example
//!
//! ```ignore
//! use ui_buttons::{ButtonConfig, Callback};
//!
//! let save = Callback::new(|event: ClickEvent| {
//!     info_log!("saved at {:?}", event.position);
//! });
//!
//! let config = ButtonConfig::new().text("Save").on_click(save);
//! ```

use std::rc::Rc;

use crate::event::ClickEvent;

/// A cloneable callback wrapper for event handlers.
///
/// ## Type Parameters
///
/// - `Args`: The argument type the callback receives (defaults to [`ClickEvent`])
/// - `Ret`: The return type of the callback (defaults to `()`)
pub struct Callback<Args = ClickEvent, Ret = ()> {
	inner: Rc<dyn Fn(Args) -> Ret + 'static>,
}

impl<Args, Ret> Callback<Args, Ret> {
	/// Creates a new Callback from a function or closure.
	pub fn new<F>(f: F) -> Self
	where
		F: Fn(Args) -> Ret + 'static,
	{
		Self { inner: Rc::new(f) }
	}

	/// Calls the callback with the given arguments.
	pub fn call(&self, args: Args) -> Ret {
		(self.inner)(args)
	}

	/// Returns true if both callbacks wrap the same closure.
	pub fn ptr_eq(&self, other: &Self) -> bool {
		Rc::ptr_eq(&self.inner, &other.inner)
	}
}

impl<Args, Ret> Clone for Callback<Args, Ret> {
	fn clone(&self) -> Self {
		Self {
			inner: Rc::clone(&self.inner),
		}
	}
}

impl<Args, Ret> std::fmt::Debug for Callback<Args, Ret> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Callback")
			.field("inner", &"<function>")
			.finish()
	}
}

impl<F> From<F> for Callback<ClickEvent, ()>
where
	F: Fn(ClickEvent) + 'static,
{
	fn from(f: F) -> Self {
		Callback::new(f)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use std::cell::Cell;

	#[rstest]
	fn test_callback_call() {
		let hits = Rc::new(Cell::new(0));
		let hits_clone = hits.clone();
		let callback = Callback::new(move |_: ClickEvent| hits_clone.set(hits_clone.get() + 1));

		callback.call(ClickEvent::synthetic());
		callback.call(ClickEvent::synthetic());

		assert_eq!(hits.get(), 2);
	}

	#[rstest]
	fn test_callback_clone_shares_closure() {
		let callback: Callback<i32, i32> = Callback::new(|n| n * 2);
		let cloned = callback.clone();

		assert!(callback.ptr_eq(&cloned));
		assert_eq!(cloned.call(21), 42);
	}

	#[rstest]
	fn test_callback_debug_hides_closure() {
		let callback: Callback<(), ()> = Callback::new(|_| {});
		assert_eq!(format!("{:?}", callback), "Callback { inner: \"<function>\" }");
	}
}
