use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::state::{GraphSession, HoverCard};

const CARD_HEIGHT: f64 = 65.0;
const CARD_PADDING: f64 = 8.0;
const CARD_RADIUS: f64 = 4.0;

fn ease_out_cubic(t: f64) -> f64 {
	1.0 - (1.0 - t).powi(3)
}

pub fn render(session: &GraphSession, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str("#ffffff");
	ctx.fill_rect(0.0, 0.0, session.width, session.height);
	ctx.save();
	let _ = ctx.translate(session.transform.x, session.transform.y);
	let _ = ctx.scale(session.transform.k, session.transform.k);
	draw_links(session, ctx);
	draw_nodes(session, ctx);
	draw_labels(session, ctx);
	ctx.restore();

	if let Some(card) = session.hover_card() {
		draw_hover_card(&card, ctx);
	}
}

fn draw_links(session: &GraphSession, ctx: &CanvasRenderingContext2d) {
	let t = ease_out_cubic(session.hover.highlight_t);
	let has_highlight = session.has_active_highlight();

	session.graph.visit_edges(|n1, n2, _| {
		let lit = has_highlight
			&& session.is_highlighted(n1.index())
			&& session.is_highlighted(n2.index());
		let (alpha, width) = if lit {
			(0.6 + 0.4 * t, 1.0 + 1.0 * t)
		} else {
			(0.6 - 0.45 * t, 1.0)
		};

		ctx.set_stroke_style_str(&format!("rgba(153, 153, 153, {alpha})"));
		ctx.set_line_width(width);
		ctx.begin_path();
		ctx.move_to(n1.x() as f64, n1.y() as f64);
		ctx.line_to(n2.x() as f64, n2.y() as f64);
		ctx.stroke();
	});
}

fn draw_nodes(session: &GraphSession, ctx: &CanvasRenderingContext2d) {
	let t = ease_out_cubic(session.hover.highlight_t);
	let has_highlight = session.has_active_highlight();

	session.graph.visit_nodes(|node| {
		let idx = node.index();
		let info = &node.data.user_data;
		let dimmed = has_highlight && !session.is_highlighted(idx);
		let (x, y) = (node.x() as f64, node.y() as f64);

		ctx.set_global_alpha(if dimmed { 1.0 - 0.7 * t } else { 1.0 });
		ctx.begin_path();
		let _ = ctx.arc(x, y, info.radius, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(info.color);
		ctx.fill();
		if session.is_hovered(idx) {
			ctx.set_stroke_style_str("#333");
			ctx.set_line_width(1.0 + t);
		} else {
			ctx.set_stroke_style_str("#ccc");
			ctx.set_line_width(0.5);
		}
		ctx.stroke();
	});
	ctx.set_global_alpha(1.0);
}

fn draw_labels(session: &GraphSession, ctx: &CanvasRenderingContext2d) {
	ctx.set_text_align("center");
	ctx.set_text_baseline("middle");
	ctx.set_fill_style_str("#000");
	session.graph.visit_nodes(|node| {
		let info = &node.data.user_data;
		if info.label.is_empty() {
			return;
		}
		ctx.set_font(&format!("{}px sans-serif", info.font_size));
		let _ = ctx.fill_text(&info.label, node.x() as f64, node.y() as f64);
	});
	ctx.set_text_align("start");
	ctx.set_text_baseline("alphabetic");
}

fn draw_hover_card(card: &HoverCard, ctx: &CanvasRenderingContext2d) {
	let lines = [
		(&card.text.title, 14.0, 20.0),
		(&card.text.primary, 12.0, 35.0),
		(&card.text.secondary, 12.0, 50.0),
	];

	// width follows the two content lines; the title is short
	ctx.set_font("12px sans-serif");
	let text_width = lines[1..]
		.iter()
		.map(|(text, _, _)| ctx.measure_text(text).map(|m| m.width()).unwrap_or(0.0))
		.fold(0.0, f64::max);
	let width = text_width + 2.0 * CARD_PADDING;

	ctx.save();
	let _ = ctx.translate(card.x, card.y);
	rounded_rect(ctx, width, CARD_HEIGHT, CARD_RADIUS);
	ctx.set_fill_style_str("#eee");
	ctx.fill();
	ctx.set_stroke_style_str("#333");
	ctx.set_line_width(1.0);
	ctx.stroke();

	ctx.set_fill_style_str("#000");
	for (text, size, baseline) in lines {
		ctx.set_font(&format!("{size}px sans-serif"));
		let _ = ctx.fill_text(text, CARD_PADDING, baseline);
	}
	ctx.restore();
}

fn rounded_rect(ctx: &CanvasRenderingContext2d, w: f64, h: f64, r: f64) {
	ctx.begin_path();
	ctx.move_to(r, 0.0);
	let _ = ctx.arc_to(w, 0.0, w, h, r);
	let _ = ctx.arc_to(w, h, 0.0, h, r);
	let _ = ctx.arc_to(0.0, h, 0.0, 0.0, r);
	let _ = ctx.arc_to(0.0, 0.0, w, 0.0, r);
	ctx.close_path();
}
