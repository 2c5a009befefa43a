//! SVG rendering of a [`ChartView`].
//!
//! The drawing mirrors the dashboard chart: a dashed goal line with its label,
//! a polyline through the entries, one titled circle per entry, and the first
//! and last dates along the bottom edge.

use chrono::{DateTime, Utc};

use crate::domain::{ChartMapping, ChartPlot, ChartView};

/// Shown instead of a plot when there is nothing to draw.
pub const CHART_PLACEHOLDER: &str = "Log at least 2 entries to see your progress graph.";

const GOAL_COLOUR: &str = "#10b981";
const LINE_COLOUR: &str = "#4f46e5";
const AXIS_COLOUR: &str = "#64748b";

fn short_date(date: DateTime<Utc>) -> String {
    date.format("%b %-d").to_string()
}

fn coord(value: f64) -> String {
    let text = format!("{value:.2}");
    text.trim_end_matches('0').trim_end_matches('.').to_owned()
}

/// Render `view` as a standalone SVG document.
pub fn render_chart_svg(view: &ChartView) -> String {
    let geometry = view.geometry;
    let mut svg = format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {w} {h}" width="{w}" height="{h}">"#,
        w = coord(geometry.width),
        h = coord(geometry.height),
    );
    match &view.mapping {
        ChartMapping::InsufficientData => {
            svg.push_str(&format!(
                r#"<text x="{x}" y="{y}" fill="{AXIS_COLOUR}" font-size="10" text-anchor="middle">{CHART_PLACEHOLDER}</text>"#,
                x = coord(geometry.width / 2.0),
                y = coord(geometry.height / 2.0),
            ));
        }
        ChartMapping::Plotted(plot) => render_plot(&mut svg, view, plot),
    }
    svg.push_str("</svg>");
    svg
}

fn render_plot(svg: &mut String, view: &ChartView, plot: &ChartPlot) {
    let geometry = view.geometry;
    let padding = geometry.padding;
    let right = geometry.width - padding;
    let baseline = geometry.height - 5.0;

    svg.push_str(&format!(
        r#"<line x1="{x1}" y1="{y}" x2="{x2}" y2="{y}" stroke-dasharray="4 2" stroke="{GOAL_COLOUR}" stroke-width="1"/>"#,
        x1 = coord(padding),
        x2 = coord(right),
        y = coord(plot.goal_y),
    ));
    svg.push_str(&format!(
        r#"<text x="{x}" y="{y}" fill="{GOAL_COLOUR}" font-size="10" text-anchor="start">Goal: {goal}kg</text>"#,
        x = coord(padding + 5.0),
        y = coord(plot.goal_y - 4.0),
        goal = view.goal_weight,
    ));

    let points: Vec<String> = plot
        .points
        .iter()
        .map(|point| format!("{},{}", coord(point.x), coord(point.y)))
        .collect();
    svg.push_str(&format!(
        r#"<polyline fill="none" stroke="{LINE_COLOUR}" stroke-width="2" points="{}"/>"#,
        points.join(" "),
    ));

    for point in &plot.points {
        svg.push_str(&format!(
            r#"<g><circle cx="{x}" cy="{y}" r="3" fill="{LINE_COLOUR}" stroke="white" stroke-width="1.5"/><title>{weight}kg on {date}</title></g>"#,
            x = coord(point.x),
            y = coord(point.y),
            weight = point.weight,
            date = short_date(point.date),
        ));
    }

    if let (Some(first), Some(last)) = (plot.points.first(), plot.points.last()) {
        svg.push_str(&format!(
            r#"<text x="{x}" y="{y}" fill="{AXIS_COLOUR}" font-size="10">{date}</text>"#,
            x = coord(padding),
            y = coord(baseline),
            date = short_date(first.date),
        ));
        svg.push_str(&format!(
            r#"<text x="{x}" y="{y}" fill="{AXIS_COLOUR}" font-size="10" text-anchor="end">{date}</text>"#,
            x = coord(right),
            y = coord(baseline),
            date = short_date(last.date),
        ));
    }
}
