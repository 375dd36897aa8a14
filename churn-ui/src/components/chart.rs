//! Chart Component
//!
//! Doughnut, horizontal bar and radar charts drawn on an HTML5 canvas.
//! Each mount of a new chart instance clears the canvas and redraws it.

use churn_dashboard::theme;
use churn_dashboard::view::{ChartInstance, ChartKind, ChartSpec};
use leptos::*;
use std::f64::consts::{FRAC_PI_2, TAU};
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

const BACKGROUND: &str = "#1f2937";

/// Canvas bound to one chart widget
#[component]
pub fn Chart(
    /// Chart instance of the widget
    instance: RwSignal<Option<ChartInstance>>,
    #[prop(default = 480)]
    width: u32,
    #[prop(default = 300)]
    height: u32,
) -> impl IntoView {
    let canvas_ref = create_node_ref::<html::Canvas>();

    // Redraw whenever the widget mounts a new instance
    create_effect(move |_| {
        let chart = instance.get();
        if let Some(canvas) = canvas_ref.get() {
            match chart {
                Some(chart) => draw_chart(&canvas, &chart.spec),
                None => clear(&canvas),
            }
        }
    });

    view! {
        <div class="chart-container">
            <canvas
                node_ref=canvas_ref
                width=width.to_string()
                height=height.to_string()
                class="chart-canvas"
            />
        </div>
    }
}

fn context(canvas: &HtmlCanvasElement) -> Option<CanvasRenderingContext2d> {
    canvas
        .get_context("2d")
        .ok()
        .flatten()
        .and_then(|ctx| ctx.dyn_into::<CanvasRenderingContext2d>().ok())
}

fn clear(canvas: &HtmlCanvasElement) {
    if let Some(ctx) = context(canvas) {
        ctx.set_fill_style(&BACKGROUND.into());
        ctx.fill_rect(0.0, 0.0, canvas.width() as f64, canvas.height() as f64);
    }
}

/// Draw the chart on canvas
fn draw_chart(canvas: &HtmlCanvasElement, spec: &ChartSpec) {
    let ctx = match context(canvas) {
        Some(ctx) => ctx,
        None => return,
    };

    let width = canvas.width() as f64;
    let height = canvas.height() as f64;

    clear(canvas);

    if spec.is_empty() {
        ctx.set_fill_style(&theme::LABEL.into());
        ctx.set_font("14px sans-serif");
        let _ = ctx.fill_text("No data", width / 2.0 - 25.0, height / 2.0);
        return;
    }

    match spec.kind {
        ChartKind::Doughnut => draw_doughnut(&ctx, spec, width, height),
        ChartKind::HorizontalBar => draw_horizontal_bars(&ctx, spec, width, height),
        ChartKind::Radar => draw_radar(&ctx, spec, width, height),
    }
}

fn draw_doughnut(ctx: &CanvasRenderingContext2d, spec: &ChartSpec, width: f64, height: f64) {
    let values = &spec.datasets[0].values;
    let total: f64 = values.iter().filter(|v| **v > 0.0).sum();

    // Legend on the right
    let legend_width = if spec.show_legend { 140.0 } else { 0.0 };
    let cx = (width - legend_width) / 2.0;
    let cy = height / 2.0;
    let outer = (cx.min(cy) - 10.0).max(10.0);
    let inner = outer * spec.cutout.unwrap_or(0.0);

    if total > 0.0 {
        let mut start = -FRAC_PI_2;
        for (idx, value) in values.iter().enumerate() {
            if *value <= 0.0 {
                continue;
            }
            let sweep = value / total * TAU;
            let color = spec.color_at(idx).unwrap_or(theme::ACCENT);

            ctx.set_fill_style(&color.into());
            ctx.begin_path();
            let _ = ctx.arc(cx, cy, outer, start, start + sweep);
            let _ = ctx.arc_with_anticlockwise(cx, cy, inner, start + sweep, start, true);
            ctx.close_path();
            ctx.fill();

            start += sweep;
        }
    }

    if spec.show_legend {
        ctx.set_font("13px sans-serif");
        let x = width - legend_width + 10.0;
        for (idx, label) in spec.labels.iter().enumerate() {
            let y = 30.0 + idx as f64 * 24.0;
            ctx.set_fill_style(&spec.color_at(idx).unwrap_or(theme::ACCENT).into());
            ctx.fill_rect(x, y - 10.0, 12.0, 12.0);
            ctx.set_fill_style(&theme::LEGEND.into());
            let _ = ctx.fill_text(label, x + 20.0, y);
        }
    }
}

fn draw_horizontal_bars(ctx: &CanvasRenderingContext2d, spec: &ChartSpec, width: f64, height: f64) {
    let values = &spec.datasets[0].values;
    let max = spec
        .max_value
        .unwrap_or_else(|| values.iter().copied().fold(0.0_f64, f64::max));
    let max = if max > 0.0 { max } else { 1.0 };

    let margin_left = 130.0;
    let margin_right = 20.0;
    let margin_top = 10.0;
    let margin_bottom = 30.0;
    let chart_width = width - margin_left - margin_right;
    let row_height = (height - margin_top - margin_bottom) / values.len() as f64;
    let bar_height = row_height * 0.6;

    // Vertical grid lines with value labels
    ctx.set_stroke_style(&theme::GRID.into());
    ctx.set_line_width(1.0);
    ctx.set_font("11px sans-serif");
    for i in 0..=4 {
        let x = margin_left + chart_width * i as f64 / 4.0;
        ctx.begin_path();
        ctx.move_to(x, margin_top);
        ctx.line_to(x, height - margin_bottom);
        ctx.stroke();

        ctx.set_fill_style(&theme::LABEL.into());
        let _ = ctx.fill_text(&format!("{:.0}", max * i as f64 / 4.0), x - 8.0, height - 10.0);
    }

    ctx.set_font("12px sans-serif");
    for (idx, value) in values.iter().enumerate() {
        let y = margin_top + row_height * idx as f64 + (row_height - bar_height) / 2.0;
        let bar_width = (value.max(0.0) / max).min(1.0) * chart_width;

        ctx.set_fill_style(&spec.color_at(idx).unwrap_or(theme::ACCENT).into());
        ctx.fill_rect(margin_left, y, bar_width, bar_height);

        if let Some(label) = spec.labels.get(idx) {
            ctx.set_fill_style(&theme::LABEL.into());
            let _ = ctx.fill_text(&truncate(label, 18), 5.0, y + bar_height / 2.0 + 4.0);
        }
    }
}

fn draw_radar(ctx: &CanvasRenderingContext2d, spec: &ChartSpec, width: f64, height: f64) {
    let axes = spec.labels.len().max(3);
    let cx = width / 2.0;
    let cy = height / 2.0;
    let radius = (cx.min(cy) - 30.0).max(10.0);
    let max = spec.max_value.unwrap_or(1.0);

    let point = |axis: usize, fraction: f64| {
        let angle = -FRAC_PI_2 + TAU * axis as f64 / axes as f64;
        (cx + radius * fraction * angle.cos(), cy + radius * fraction * angle.sin())
    };

    // Grid rings and angle lines
    ctx.set_stroke_style(&theme::GRID.into());
    ctx.set_line_width(1.0);
    for ring in 1..=4 {
        let fraction = ring as f64 / 4.0;
        ctx.begin_path();
        for axis in 0..axes {
            let (x, y) = point(axis, fraction);
            if axis == 0 {
                ctx.move_to(x, y);
            } else {
                ctx.line_to(x, y);
            }
        }
        ctx.close_path();
        ctx.stroke();
    }
    ctx.set_font("12px sans-serif");
    for axis in 0..axes {
        let (x, y) = point(axis, 1.0);
        ctx.begin_path();
        ctx.move_to(cx, cy);
        ctx.line_to(x, y);
        ctx.stroke();

        if let Some(label) = spec.labels.get(axis) {
            let (lx, ly) = point(axis, 1.15);
            ctx.set_fill_style(&theme::LABEL.into());
            let _ = ctx.fill_text(label, lx - 20.0, ly + 4.0);
        }
    }

    for dataset in &spec.datasets {
        ctx.begin_path();
        for (axis, value) in dataset.values.iter().enumerate() {
            let (x, y) = point(axis, (value / max).clamp(0.0, 1.0));
            if axis == 0 {
                ctx.move_to(x, y);
            } else {
                ctx.line_to(x, y);
            }
        }
        ctx.close_path();

        let fill = dataset.colors.first().map(String::as_str).unwrap_or(theme::ACCENT_FILL);
        ctx.set_fill_style(&fill.into());
        ctx.fill();

        let border = dataset.border.as_deref().unwrap_or(theme::ACCENT);
        ctx.set_stroke_style(&border.into());
        ctx.set_line_width(2.0);
        ctx.stroke();
    }
}

fn truncate(label: &str, max_chars: usize) -> String {
    if label.chars().count() <= max_chars {
        label.to_string()
    } else {
        let mut short: String = label.chars().take(max_chars - 1).collect();
        short.push('…');
        short
    }
}
