// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Inline SVG charts for the dashboard.

use std::fmt::Write;

use super::escape;

const WIDTH: f64 = 560.0;
const HEIGHT: f64 = 220.0;
const PAD_LEFT: f64 = 44.0;
const PAD_RIGHT: f64 = 12.0;
const PAD_TOP: f64 = 12.0;
const PAD_BOTTOM: f64 = 28.0;

struct Frame {
    slot: f64,
    max: u64,
}

impl Frame {
    fn new(count: usize, values: &[u64]) -> Self {
        let plot_width = WIDTH - PAD_LEFT - PAD_RIGHT;
        Self {
            slot: plot_width / count.max(1) as f64,
            max: values.iter().copied().max().unwrap_or(0),
        }
    }

    fn x_center(&self, i: usize) -> f64 {
        PAD_LEFT + self.slot * (i as f64 + 0.5)
    }

    fn bottom(&self) -> f64 {
        HEIGHT - PAD_BOTTOM
    }

    /// Height in pixels of `value`; everything is 0 when all values are 0.
    fn scale(&self, value: u64) -> f64 {
        if self.max == 0 {
            return 0.0;
        }
        (HEIGHT - PAD_TOP - PAD_BOTTOM) * value as f64 / self.max as f64
    }
}

fn open_svg(html: &mut String, label: &str, class: &str) {
    let _ = write!(
        html,
        r#"<svg class="chart {class}" viewBox="0 0 {WIDTH} {HEIGHT}" role="img" aria-label="{label}"><title>{label}</title>"#,
        label = escape(label),
    );
}

fn axes(html: &mut String, frame: &Frame, labels: &[String]) {
    let bottom = frame.bottom();
    let _ = write!(
        html,
        r#"<line class="axis" x1="{PAD_LEFT}" y1="{bottom}" x2="{x2}" y2="{bottom}"/>"#,
        x2 = WIDTH - PAD_RIGHT,
    );
    let _ = write!(
        html,
        r#"<text class="tick" x="{x}" y="{y}" text-anchor="end">{max}</text>"#,
        x = PAD_LEFT - 6.0,
        y = PAD_TOP + 10.0,
        max = frame.max,
    );
    for (i, label) in labels.iter().enumerate() {
        // "2024-01-07" -> "01-07"
        let short = label.get(5..).unwrap_or(label);
        let _ = write!(
            html,
            r#"<text class="tick" x="{x:.1}" y="{y}" text-anchor="middle">{short}</text>"#,
            x = frame.x_center(i),
            y = HEIGHT - 8.0,
            short = escape(short),
        );
    }
}

/// One bar per day.
pub fn bar_chart(label: &str, dates: &[String], values: &[u64]) -> String {
    let frame = Frame::new(dates.len(), values);
    let bar_width = frame.slot * 0.6;

    let mut html = String::new();
    open_svg(&mut html, label, "bar");
    axes(&mut html, &frame, dates);

    for (i, value) in values.iter().enumerate() {
        let height = frame.scale(*value);
        let _ = write!(
            html,
            r#"<rect class="bar" x="{x:.1}" y="{y:.1}" width="{bar_width:.1}" height="{height:.1}"><title>{value}</title></rect>"#,
            x = frame.x_center(i) - bar_width / 2.0,
            y = frame.bottom() - height,
        );
    }

    html.push_str("</svg>");
    html
}

/// A polyline through one point per day.
pub fn line_chart(label: &str, dates: &[String], values: &[u64]) -> String {
    let frame = Frame::new(dates.len(), values);

    let mut html = String::new();
    open_svg(&mut html, label, "line");
    axes(&mut html, &frame, dates);

    let points: Vec<(f64, f64)> = values
        .iter()
        .enumerate()
        .map(|(i, v)| (frame.x_center(i), frame.bottom() - frame.scale(*v)))
        .collect();

    let path = points
        .iter()
        .map(|(x, y)| format!("{x:.1},{y:.1}"))
        .collect::<Vec<_>>()
        .join(" ");
    let _ = write!(html, r#"<polyline class="series" points="{path}"/>"#);

    for ((x, y), value) in points.iter().zip(values) {
        let _ = write!(
            html,
            r#"<circle class="point" cx="{x:.1}" cy="{y:.1}" r="3"><title>{value}</title></circle>"#,
        );
    }

    html.push_str("</svg>");
    html
}
