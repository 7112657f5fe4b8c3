use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::state::{ForceGraphState, NODE_RADIUS};

const BACKGROUND: &str = "#f8f9fa";
const EDGE_WIDTH: f64 = 2.0;
const EDGE_ALPHA: f64 = 0.8;
const NODE_FONT_PX: f64 = 12.0;
const EDGE_FONT_PX: f64 = 10.0;

fn ease_out_cubic(t: f64) -> f64 {
	1.0 - (1.0 - t).powi(3)
}

pub fn render(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	let vp = &state.viewport;
	ctx.set_fill_style_str(BACKGROUND);
	ctx.fill_rect(0.0, 0.0, vp.width, vp.height);
	ctx.save();
	let _ = ctx.translate(vp.transform.x, vp.transform.y);
	let _ = ctx.scale(vp.transform.k, vp.transform.k);
	draw_edges(state, ctx);
	draw_nodes(state, ctx);
	ctx.restore();
}

fn draw_edges(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	let positions = state.positions();
	let t = ease_out_cubic(state.hover.highlight_t);
	let k = state.viewport.transform.k;
	let arrow_size = 10.0;

	for link in state.edges() {
		let (Some(&(x1, y1)), Some(&(x2, y2))) =
			(positions.get(&link.source), positions.get(&link.target))
		else {
			continue;
		};
		let (dx, dy) = (x2 - x1, y2 - y1);
		let dist = (dx * dx + dy * dy).sqrt();
		if dist < 0.001 {
			continue;
		}

		// Highlighted edges brighten, the rest fade while a node is hovered.
		let highlighted = state.is_highlighted(link.source) && state.is_highlighted(link.target);
		let (alpha, width) = if highlighted {
			(EDGE_ALPHA + 0.2 * t, EDGE_WIDTH * (1.0 + 0.5 * t))
		} else {
			(EDGE_ALPHA - 0.6 * t, EDGE_WIDTH)
		};

		ctx.set_global_alpha(alpha);
		ctx.set_stroke_style_str(link.color);
		ctx.set_line_width(width);

		let (ux, uy) = (dx / dist, dy / dist);
		let head = if state.arrows { arrow_size } else { 0.0 };
		ctx.begin_path();
		ctx.move_to(x1 + ux * NODE_RADIUS, y1 + uy * NODE_RADIUS);
		ctx.line_to(x2 - ux * (NODE_RADIUS + head), y2 - uy * (NODE_RADIUS + head));
		ctx.stroke();

		if state.arrows {
			let (tip_x, tip_y) = (x2 - ux * NODE_RADIUS, y2 - uy * NODE_RADIUS);
			let (back_x, back_y) = (tip_x - ux * arrow_size, tip_y - uy * arrow_size);
			let (px, py) = (-uy * arrow_size * 0.5, ux * arrow_size * 0.5);
			ctx.set_fill_style_str(link.color);
			ctx.begin_path();
			ctx.move_to(tip_x, tip_y);
			ctx.line_to(back_x + px, back_y + py);
			ctx.line_to(back_x - px, back_y - py);
			ctx.close_path();
			ctx.fill();
		}

		if let Some(label) = &link.label {
			draw_label(ctx, label, (x1 + x2) / 2.0, (y1 + y2) / 2.0, k, EDGE_FONT_PX, "#555555");
		}
	}
	ctx.set_global_alpha(1.0);
}

fn draw_label(
	ctx: &CanvasRenderingContext2d,
	label: &str,
	x: f64,
	y: f64,
	k: f64,
	font_px: f64,
	fill: &str,
) {
	ctx.set_font(&format!("{}px sans-serif", font_px / k.max(0.5)));
	ctx.set_text_align("center");
	ctx.set_text_baseline("middle");
	ctx.set_line_width(3.0 / k.max(0.5));
	ctx.set_stroke_style_str("rgba(255, 255, 255, 0.8)");
	let _ = ctx.stroke_text(label, x, y);
	ctx.set_fill_style_str(fill);
	let _ = ctx.fill_text(label, x, y);
}

fn draw_nodes(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	let k = state.viewport.transform.k;
	let has_highlight = state.has_active_highlight();
	let t = ease_out_cubic(state.hover.highlight_t);

	// Dimmed nodes first so highlighted ones end up on top.
	state.graph.visit_nodes(|node| {
		if has_highlight && state.is_highlighted(node.index()) {
			return;
		}
		let (x, y) = (node.x() as f64, node.y() as f64);
		let alpha = 1.0 - 0.6 * t;

		ctx.set_global_alpha(alpha);
		ctx.begin_path();
		let _ = ctx.arc(x, y, NODE_RADIUS, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(node.data.user_data.color);
		ctx.fill();
		draw_label(ctx, &node.data.user_data.label, x, y, k, NODE_FONT_PX, "#000000");
		ctx.set_global_alpha(1.0);
	});

	if !has_highlight {
		return;
	}

	state.graph.visit_nodes(|node| {
		let idx = node.index();
		if !state.is_highlighted(idx) {
			return;
		}
		let (x, y) = (node.x() as f64, node.y() as f64);
		let hovered = state.is_hovered(idx);
		let radius = if hovered {
			NODE_RADIUS * (1.0 + 0.25 * t)
		} else {
			NODE_RADIUS * (1.0 + 0.1 * t)
		};

		ctx.begin_path();
		let _ = ctx.arc(x, y, radius, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(node.data.user_data.color);
		ctx.fill();

		if hovered && t > 0.01 {
			ctx.begin_path();
			let _ = ctx.arc(x, y, radius + 3.0 / k, 0.0, 2.0 * PI);
			ctx.set_stroke_style_str(&format!("rgba(44, 62, 80, {})", 0.8 * t));
			ctx.set_line_width(2.0 / k);
			ctx.stroke();
		}

		draw_label(ctx, &node.data.user_data.label, x, y, k, NODE_FONT_PX, "#000000");
	});
}
