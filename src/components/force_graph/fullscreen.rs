//! Fullscreen toggling with a CSS fallback.
//!
//! The platform API is tried first. When it is missing or refuses the request
//! the container is expanded with a fixed-position style instead, so the
//! control always ends in a usable state. Promise rejections from the API are
//! caught and logged, never left unhandled.

use js_sys::{Function, Promise, Reflect};
use log::{debug, info, warn};
use thiserror::Error;
use wasm_bindgen::prelude::*;
use web_sys::Element;

/// How the graph container is currently enlarged.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FullscreenMode {
	/// Normal layout.
	#[default]
	Off,
	/// Browser fullscreen API.
	Native,
	/// Fixed-position overlay styled by CSS.
	CssFallback,
}

impl FullscreenMode {
	/// Whether the container covers the window in either way.
	pub fn is_active(self) -> bool {
		self != Self::Off
	}
}

/// Why native fullscreen could not be entered.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FullscreenError {
	/// The document does not offer the fullscreen API.
	#[error("fullscreen API unavailable")]
	Unsupported,
	/// The browser refused the request.
	#[error("fullscreen request rejected: {0}")]
	Rejected(String),
}

/// Mode after the user presses the fullscreen button in `current`.
///
/// `request` attempts native fullscreen and is only called when leaving
/// [`FullscreenMode::Off`].
pub fn next_mode(
	current: FullscreenMode,
	request: impl FnOnce() -> Result<(), FullscreenError>,
) -> FullscreenMode {
	match current {
		FullscreenMode::Off => match request() {
			Ok(()) => FullscreenMode::Native,
			Err(err) => {
				warn!("{err}; using CSS fullscreen");
				FullscreenMode::CssFallback
			}
		},
		FullscreenMode::Native | FullscreenMode::CssFallback => FullscreenMode::Off,
	}
}

/// Mode after a `fullscreenchange` event, e.g. the user pressed Escape.
pub fn after_change(current: FullscreenMode, native_active: bool) -> FullscreenMode {
	match (current, native_active) {
		(FullscreenMode::Native, false) => FullscreenMode::Off,
		(_, true) => FullscreenMode::Native,
		(mode, false) => mode,
	}
}

/// Mode after an asynchronous `fullscreenerror` event.
pub fn after_error(current: FullscreenMode) -> FullscreenMode {
	match current {
		FullscreenMode::Native => {
			warn!("Fullscreen request failed asynchronously; using CSS fullscreen");
			FullscreenMode::CssFallback
		}
		mode => mode,
	}
}

/// `next` when it differs from `current`. A mode change resizes the canvas
/// and restarts the layout, so an unchanged mode must not be published.
pub fn transition(current: FullscreenMode, next: FullscreenMode) -> Option<FullscreenMode> {
	(current != next).then_some(next)
}

fn rejected(err: JsValue) -> FullscreenError {
	FullscreenError::Rejected(format!("{err:?}"))
}

/// Call the zero-argument method `name` on `target`. A synchronous throw is
/// returned as an error; a rejected promise is passed to `on_reject`.
fn call_guarded(
	target: &JsValue,
	name: &str,
	on_reject: impl FnOnce(FullscreenError) + 'static,
) -> Result<(), FullscreenError> {
	let method = Reflect::get(target, &JsValue::from_str(name))
		.ok()
		.and_then(|f| f.dyn_into::<Function>().ok())
		.ok_or(FullscreenError::Unsupported)?;
	let result = method.call0(target).map_err(rejected)?;
	// Older engines return undefined instead of a promise.
	if let Ok(promise) = result.dyn_into::<Promise>() {
		let handler = Closure::once(move |err: JsValue| on_reject(rejected(err)));
		let _ = promise.catch(&handler);
		handler.forget();
	}
	Ok(())
}

fn request_native(
	element: &Element,
	on_reject: impl FnOnce() + 'static,
) -> Result<(), FullscreenError> {
	let document = web_sys::window()
		.and_then(|w| w.document())
		.ok_or(FullscreenError::Unsupported)?;
	if !document.fullscreen_enabled() {
		return Err(FullscreenError::Unsupported);
	}
	call_guarded(element.as_ref(), "requestFullscreen", move |err| {
		warn!("{err}");
		on_reject();
	})
}

fn exit_native() {
	let Some(document) = web_sys::window().and_then(|w| w.document()) else {
		return;
	};
	if document.fullscreen_element().is_none() {
		return;
	}
	let exited = call_guarded(document.as_ref(), "exitFullscreen", |err| {
		debug!("Leaving fullscreen: {err}");
	});
	if let Err(err) = exited {
		warn!("Leaving fullscreen: {err}");
	}
}

/// Whether the document currently has a native fullscreen element.
pub fn native_active() -> bool {
	web_sys::window()
		.and_then(|w| w.document())
		.and_then(|d| d.fullscreen_element())
		.is_some()
}

/// Enter or leave fullscreen for `element` and return the new mode.
///
/// `on_reject` runs if the browser later rejects a native request that was
/// accepted synchronously; pair it with [`after_error`].
pub fn toggle(
	element: &Element,
	current: FullscreenMode,
	on_reject: impl FnOnce() + 'static,
) -> FullscreenMode {
	if current == FullscreenMode::Native {
		exit_native();
	}
	let next = next_mode(current, || request_native(element, on_reject));
	info!("Fullscreen: {current:?} -> {next:?}");
	next
}
