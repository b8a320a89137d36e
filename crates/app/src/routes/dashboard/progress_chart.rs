use dioxus::prelude::*;
use shared_types::progress::ProgressPoint;
use shared_ui::EmptyState;

use crate::format_helpers::format_date_human;

const WIDTH: f32 = 480.0;
const HEIGHT: f32 = 180.0;
const PAD: f32 = 16.0;

/// SVG polyline coordinates for scores on a 0..=100 axis.
fn polyline(points: &[ProgressPoint]) -> String {
    let span = (points.len().saturating_sub(1)).max(1) as f32;
    points
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let x = PAD + (WIDTH - 2.0 * PAD) * (i as f32 / span);
            let y = HEIGHT - PAD - (HEIGHT - 2.0 * PAD) * (f32::from(p.score.min(100)) / 100.0);
            format!("{x:.1},{y:.1}")
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Average progress score over time.
#[component]
pub fn ProgressChart(points: Vec<ProgressPoint>) -> Element {
    if points.is_empty() {
        return rsx! { EmptyState { title: "No progress recorded yet" } };
    }

    let line = polyline(&points);
    let first = points.first().map(|p| format_date_human(p.date)).unwrap_or_default();
    let last = points.last().map(|p| format_date_human(p.date)).unwrap_or_default();
    let latest = points.last().map(|p| p.score).unwrap_or_default();

    rsx! {
        div { class: "progress-chart",
            p { class: "progress-chart-latest", "Latest score: {latest}" }
            svg {
                view_box: "0 0 {WIDTH} {HEIGHT}",
                "role": "img",
                "aria-label": "Progress scores over time",
                polyline {
                    fill: "none",
                    stroke: "var(--color-primary)",
                    stroke_width: "3",
                    points: "{line}",
                }
            }
            div { class: "progress-chart-axis",
                span { "{first}" }
                span { "{last}" }
            }
        }
    }
}
