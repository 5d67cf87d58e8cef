use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use leptos::ev;
use leptos::html::{Canvas, Div};
use leptos::prelude::*;
use log::{debug, error};
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, WheelEvent};

use super::fullscreen::{self, FullscreenMode};
use super::render;
use super::state::{ForceGraphState, PointerOutcome};
use super::types::GraphData;

const FRAME_DT: f32 = 0.016;
const FALLBACK_SIZE: (f64, f64) = (800.0, 600.0);

type SharedState = Rc<RefCell<Option<ForceGraphState>>>;

fn with_state<R>(state: &SharedState, f: impl FnOnce(&mut ForceGraphState) -> R) -> Option<R> {
	state.borrow_mut().as_mut().map(f)
}

fn window_size() -> Option<(f64, f64)> {
	let window = web_sys::window()?;
	Some((
		window.inner_width().ok()?.as_f64()?,
		window.inner_height().ok()?.as_f64()?,
	))
}

fn viewport_size(
	canvas: &HtmlCanvasElement,
	cover_window: bool,
	width: Option<f64>,
	height: Option<f64>,
) -> (f64, f64) {
	if cover_window {
		return window_size().unwrap_or(FALLBACK_SIZE);
	}
	let parent = canvas.parent_element();
	let measured = |f: fn(&web_sys::Element) -> i32| {
		parent
			.as_ref()
			.map(|p| f(p) as f64)
			.filter(|v| *v > 0.0)
	};
	(
		width
			.or_else(|| measured(web_sys::Element::client_width))
			.unwrap_or(FALLBACK_SIZE.0),
		height
			.or_else(|| measured(web_sys::Element::client_height))
			.unwrap_or(FALLBACK_SIZE.1),
	)
}

fn local_point(canvas_ref: NodeRef<Canvas>, ev: &MouseEvent) -> Option<(f64, f64)> {
	let canvas: HtmlCanvasElement = canvas_ref.get()?;
	let rect = canvas.get_bounding_client_rect();
	Some((
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	))
}

/// Interactive force-directed view of `data`.
///
/// With `fullscreen` the canvas covers the window; otherwise it takes the
/// fixed `width`/`height` or the size of its container. The id of the
/// clicked node is written to `selected` when given.
#[component]
pub fn ForceGraphCanvas(
	#[prop(into)] data: Signal<GraphData>,
	#[prop(default = false)] fullscreen: bool,
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = None)] height: Option<f64>,
	#[prop(optional)] selected: Option<RwSignal<Option<String>>>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<Canvas>::new();
	let container_ref = NodeRef::<Div>::new();
	let state: SharedState = Rc::new(RefCell::new(None));
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let alive = Arc::new(AtomicBool::new(true));

	let resize_tick = RwSignal::new(0u32);
	let fullscreen_mode = RwSignal::new(FullscreenMode::Off);
	let paused = RwSignal::new(false);
	let set_mode = move |next: FullscreenMode| {
		if let Some(next) = fullscreen::transition(fullscreen_mode.get_untracked(), next) {
			fullscreen_mode.set(next);
		}
	};

	let resize_handle = window_event_listener(ev::resize, {
		let alive = alive.clone();
		move |_| {
			if alive.load(Ordering::Relaxed) {
				resize_tick.update(|n| *n = n.wrapping_add(1));
			}
		}
	});
	let change_handle = window_event_listener_untyped("fullscreenchange", {
		let alive = alive.clone();
		move |_| {
			if alive.load(Ordering::Relaxed) {
				let native = fullscreen::native_active();
				set_mode(fullscreen::after_change(fullscreen_mode.get_untracked(), native));
			}
		}
	});
	let error_handle = window_event_listener_untyped("fullscreenerror", {
		let alive = alive.clone();
		move |_| {
			if alive.load(Ordering::Relaxed) {
				set_mode(fullscreen::after_error(fullscreen_mode.get_untracked()));
			}
		}
	});
	on_cleanup({
		let alive = alive.clone();
		move || {
			alive.store(false, Ordering::Relaxed);
			resize_handle.remove();
			change_handle.remove();
			error_handle.remove();
		}
	});

	let (state_init, animate_init, alive_init) = (state.clone(), animate.clone(), alive.clone());
	Effect::new(move |_| {
		let graph = data.get();
		resize_tick.track();
		let mode = fullscreen_mode.get();
		let Some(canvas) = canvas_ref.get() else {
			return;
		};

		let (w, h) = viewport_size(&canvas, fullscreen || mode.is_active(), width, height);
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		// Replace the layout; the outgoing one is stopped first.
		let previous = state_init.borrow_mut().take().map(|mut old| {
			old.stop();
			old.selected_id().map(str::to_string)
		});
		let mut next = ForceGraphState::new(&graph, w, h);
		if let Some(id) = previous.flatten() {
			if !next.select_id(&id) {
				debug!("Selection {id} filtered out; clearing");
				if let Some(selected) = selected {
					selected.set(None);
				}
			}
		}
		*state_init.borrow_mut() = Some(next);
		paused.set(false);

		if animate_init.borrow().is_some() {
			return;
		}
		let Some(ctx) = canvas
			.get_context("2d")
			.ok()
			.flatten()
			.and_then(|c| c.dyn_into::<CanvasRenderingContext2d>().ok())
		else {
			error!("Canvas 2d context unavailable");
			return;
		};

		let (state_anim, animate_inner, alive_anim) =
			(state_init.clone(), animate_init.clone(), alive_init.clone());
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			if !alive_anim.load(Ordering::Relaxed) {
				debug!("Graph canvas unmounted; animation loop ended");
				return;
			}
			if let Some(s) = state_anim.borrow_mut().as_mut() {
				s.tick(FRAME_DT);
				render::render(s, &ctx);
			}
			if let (Some(cb), Some(window)) = (animate_inner.borrow().as_ref(), web_sys::window()) {
				let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}));
		if let (Some(cb), Some(window)) = (animate_init.borrow().as_ref(), web_sys::window()) {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	// Selection made outside the canvas, e.g. from a details panel.
	let state_sync = state.clone();
	Effect::new(move |_| {
		let Some(selected) = selected else {
			return;
		};
		let wanted = selected.get();
		with_state(&state_sync, |s| {
			if s.selected_id() == wanted.as_deref() {
				return;
			}
			match wanted.as_deref() {
				Some(id) => {
					if !s.select_id(id) {
						debug!("Cannot select {id}: not on screen");
					}
				}
				None => s.clear_selection(),
			}
		});
	});

	let state_md = state.clone();
	let on_mousedown = move |ev: MouseEvent| {
		if let Some((x, y)) = local_point(canvas_ref, &ev) {
			with_state(&state_md, |s| s.pointer_down(x, y));
		}
	};

	let state_mm = state.clone();
	let on_mousemove = move |ev: MouseEvent| {
		if let Some((x, y)) = local_point(canvas_ref, &ev) {
			with_state(&state_mm, |s| s.pointer_move(x, y));
		}
	};

	let state_mu = state.clone();
	let on_mouseup = move |_: MouseEvent| {
		let Some((outcome, id)) = with_state(&state_mu, |s| {
			let outcome = s.pointer_up();
			(outcome, s.selected_id().map(str::to_string))
		}) else {
			return;
		};
		if let Some(selected) = selected {
			match outcome {
				PointerOutcome::Selected(_) | PointerOutcome::Cleared => selected.set(id),
				PointerOutcome::None | PointerOutcome::Dragged | PointerOutcome::Panned => {}
			}
		}
	};

	let state_ml = state.clone();
	let on_mouseleave = move |_: MouseEvent| {
		with_state(&state_ml, ForceGraphState::pointer_leave);
	};

	let state_wh = state.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		if let Some((x, y)) = local_point(canvas_ref, &ev) {
			with_state(&state_wh, |s| s.wheel(x, y, ev.delta_y()));
		}
	};

	let (state_in, state_out, state_reset, state_fit, state_pause) = (
		state.clone(),
		state.clone(),
		state.clone(),
		state.clone(),
		state.clone(),
	);
	let toggle_fullscreen = move |_: MouseEvent| {
		let Some(container) = container_ref.get() else {
			return;
		};
		let current = fullscreen_mode.get_untracked();
		set_mode(fullscreen::toggle(&container, current, move || {
			set_mode(fullscreen::after_error(fullscreen_mode.get_untracked()));
		}));
	};

	let shell_class = move || match fullscreen_mode.get() {
		FullscreenMode::CssFallback => "graph-shell graph-shell--css-fullscreen",
		FullscreenMode::Native => "graph-shell graph-shell--native-fullscreen",
		FullscreenMode::Off if fullscreen => "graph-shell graph-shell--window",
		FullscreenMode::Off => "graph-shell",
	};

	view! {
		<div node_ref=container_ref class=shell_class>
			<canvas
				node_ref=canvas_ref
				class="force-graph-canvas"
				on:mousedown=on_mousedown
				on:mousemove=on_mousemove
				on:mouseup=on_mouseup
				on:mouseleave=on_mouseleave
				on:wheel=on_wheel
			/>
			<div class="graph-controls">
				<button
					title="Zoom in"
					on:click=move |_| {
						with_state(&state_in, ForceGraphState::zoom_in);
					}
				>
					"+"
				</button>
				<button
					title="Zoom out"
					on:click=move |_| {
						with_state(&state_out, ForceGraphState::zoom_out);
					}
				>
					"−"
				</button>
				<button
					title="Reset zoom"
					on:click=move |_| {
						with_state(&state_reset, ForceGraphState::reset_zoom);
					}
				>
					"1:1"
				</button>
				<button
					title="Fit to view"
					on:click=move |_| {
						with_state(&state_fit, ForceGraphState::fit_to_view);
					}
				>
					"Fit"
				</button>
				<button
					title="Pause or resume the layout"
					on:click=move |_| {
						if let Some(now) = with_state(&state_pause, ForceGraphState::toggle_paused) {
							paused.set(now);
						}
					}
				>
					{move || if paused.get() { "Resume" } else { "Pause" }}
				</button>
				<button title="Toggle fullscreen" on:click=toggle_fullscreen>
					{move || if fullscreen_mode.get().is_active() { "Exit" } else { "Fullscreen" }}
				</button>
			</div>
		</div>
	}
}
