use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::state::{DrawEdge, ForceGraphState};
use super::types::NodeCategory;

const BACKGROUND: &str = "#11111b";
/// Opacity of nodes outside the focused neighborhood.
pub const DIMMED_NODE_ALPHA: f64 = 0.2;
/// Opacity of edges not touching the focused node.
pub const DIMMED_EDGE_ALPHA: f64 = 0.06;
const EDGE_ALPHA: f64 = 0.55;

fn ease_out_cubic(t: f64) -> f64 {
	1.0 - (1.0 - t).powi(3)
}

/// Stroke width in graph units for an edge drawn `multiplicity` times.
pub fn edge_width(multiplicity: usize, k: f64) -> f64 {
	(1.0 + 0.75 * (multiplicity.max(1) - 1) as f64).min(4.0) / k
}

/// Opacity for an edge given whether it touches the focus and how far the
/// highlight has faded in.
pub fn edge_alpha(incident: bool, t: f64) -> f64 {
	if incident {
		EDGE_ALPHA + (0.95 - EDGE_ALPHA) * t
	} else {
		EDGE_ALPHA + (DIMMED_EDGE_ALPHA - EDGE_ALPHA) * t
	}
}

/// Opacity for a node outside the highlighted neighborhood.
pub fn node_alpha(highlighted: bool, t: f64) -> f64 {
	if highlighted {
		1.0
	} else {
		1.0 - (1.0 - DIMMED_NODE_ALPHA) * t
	}
}

/// Architectures and components are always labelled; threats and
/// mitigations only while in the focused neighborhood.
pub fn shows_label(category: NodeCategory, in_focus: bool) -> bool {
	in_focus || matches!(category, NodeCategory::Architecture | NodeCategory::Component)
}

pub fn render(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str(BACKGROUND);
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
	ctx.save();
	let _ = ctx.translate(state.transform.x, state.transform.y);
	let _ = ctx.scale(state.transform.k, state.transform.k);
	draw_edges(state, ctx);
	draw_nodes(state, ctx);
	ctx.restore();
}

fn draw_edges(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	let k = state.transform.k;
	let (dash, gap, arrow_size) = (8.0 / k, 4.0 / k, 7.0 / k);
	let dash_offset = -(state.flow_time * 30.0) % (dash + gap);
	let t = if state.has_active_highlight() {
		ease_out_cubic(state.highlight_strength())
	} else {
		0.0
	};

	for edge in &state.edges {
		let DrawEdge {
			source,
			target,
			kind,
			multiplicity,
		} = *edge;
		let (Some(&(x1, y1)), Some(&(x2, y2))) = (
			state.positions.positions.get(source),
			state.positions.positions.get(target),
		) else {
			continue;
		};
		let (dx, dy) = (x2 - x1, y2 - y1);
		let dist = (dx * dx + dy * dy).sqrt();
		if dist < 0.001 {
			continue;
		}
		let (r1, r2) = (state.nodes[source].size, state.nodes[target].size);

		let incident = state.is_incident(edge);
		let alpha = edge_alpha(incident, t);
		let (r, g, b) = kind.rgb();
		let color = format!("rgba({r}, {g}, {b}, {alpha})");
		let width = edge_width(multiplicity, k);

		ctx.set_stroke_style_str(&color);
		ctx.set_line_width(if incident { width * (1.0 + 0.5 * t) } else { width });
		if incident && t > 0.01 {
			let _ = ctx.set_line_dash(&js_sys::Array::of2(
				&JsValue::from_f64(dash),
				&JsValue::from_f64(gap),
			));
			ctx.set_line_dash_offset(dash_offset);
		}

		let (ux, uy) = (dx / dist, dy / dist);
		ctx.begin_path();
		ctx.move_to(x1 + ux * r1, y1 + uy * r1);
		ctx.line_to(x2 - ux * (r2 + arrow_size), y2 - uy * (r2 + arrow_size));
		ctx.stroke();
		let _ = ctx.set_line_dash(&js_sys::Array::new());

		ctx.set_fill_style_str(&color);
		let (tip_x, tip_y) = (x2 - ux * r2, y2 - uy * r2);
		let (back_x, back_y) = (tip_x - ux * arrow_size, tip_y - uy * arrow_size);
		let (px, py) = (-uy * arrow_size * 0.5, ux * arrow_size * 0.5);
		ctx.begin_path();
		ctx.move_to(tip_x, tip_y);
		ctx.line_to(back_x + px, back_y + py);
		ctx.line_to(back_x - px, back_y - py);
		ctx.close_path();
		ctx.fill();
	}
}

fn draw_nodes(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	let has_highlight = state.has_active_highlight();
	let t = if has_highlight {
		ease_out_cubic(state.highlight_strength())
	} else {
		0.0
	};
	let k = state.transform.k;
	let font = format!("{}px sans-serif", 11.0 / k.max(0.5));

	// Dimmed nodes first so the highlighted neighborhood paints on top.
	let order = state
		.nodes
		.iter()
		.enumerate()
		.filter(|(idx, _)| !(has_highlight && state.is_highlighted(*idx)))
		.chain(
			state
				.nodes
				.iter()
				.enumerate()
				.filter(|(idx, _)| has_highlight && state.is_highlighted(*idx)),
		);

	for (idx, node) in order {
		let Some(&(x, y)) = state.positions.positions.get(idx) else {
			continue;
		};
		let highlighted = !has_highlight || state.is_highlighted(idx);
		let focused = has_highlight && state.is_focused(idx);
		let alpha = node_alpha(highlighted, t);
		let radius = if focused {
			node.size * (1.0 + 0.25 * t)
		} else {
			node.size
		};

		if focused && t > 0.01 {
			let glow = radius * (1.8 + 0.8 * t);
			if let Ok(gradient) = ctx.create_radial_gradient(x, y, radius * 0.3, x, y, glow) {
				let _ = gradient.add_color_stop(0.0, &format!("rgba(255, 255, 255, {})", 0.35 * t));
				let _ = gradient.add_color_stop(0.6, &format!("rgba(200, 220, 255, {})", 0.1 * t));
				let _ = gradient.add_color_stop(1.0, "rgba(255, 255, 255, 0)");
				ctx.begin_path();
				let _ = ctx.arc(x, y, glow, 0.0, 2.0 * PI);
				ctx.set_fill_style_canvas_gradient(&gradient);
				ctx.fill();
			}
		}

		ctx.set_global_alpha(alpha);
		ctx.begin_path();
		let _ = ctx.arc(x, y, radius, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(node.color);
		ctx.fill();

		if state.positions.pinned.get(idx).copied().unwrap_or(false) {
			ctx.begin_path();
			let _ = ctx.arc(x, y, radius + 3.0 / k, 0.0, 2.0 * PI);
			ctx.set_stroke_style_str("rgba(255, 255, 255, 0.8)");
			ctx.set_line_width(1.5 / k);
			ctx.stroke();
		}

		if shows_label(node.category, has_highlight && highlighted) {
			ctx.set_fill_style_str(if highlighted { "white" } else { "#a0a0b8" });
			ctx.set_font(&font);
			let _ = ctx.fill_text(&node.label, x + radius + 4.0 / k, y + 4.0 / k);
		}
		ctx.set_global_alpha(1.0);
	}
}
