//! Reading-order reconstruction
//!
//! Selected words arrive in painting order. They are grouped into lines by
//! vertical center, optionally after undoing the dominant tilt of the
//! selection, then read top to bottom and left to right.

use crate::config::EngineConfig;
use crate::geometry::{unrotate_about, Layout};
use crate::model::TextFragment;

/// An item positioned for line grouping
pub(crate) struct Placed<T> {
    pub item: T,
    pub x: f64,
    pub y: f64,
}

struct Line<T> {
    center_y: f64,
    members: Vec<Placed<T>>,
}

/// Group items into lines and return them in reading order.
///
/// Each item joins the first line whose representative center is strictly
/// within `tolerance`; a line's representative is its first member.
pub(crate) fn in_reading_order<T>(items: Vec<Placed<T>>, tolerance: f64) -> Vec<T> {
    let mut lines: Vec<Line<T>> = Vec::new();

    for placed in items {
        match lines
            .iter_mut()
            .find(|line| (line.center_y - placed.y).abs() < tolerance)
        {
            Some(line) => line.members.push(placed),
            None => lines.push(Line {
                center_y: placed.y,
                members: vec![placed],
            }),
        }
    }

    lines.sort_by(|a, b| a.center_y.total_cmp(&b.center_y));
    lines
        .into_iter()
        .flat_map(|mut line| {
            line.members.sort_by(|a, b| a.x.total_cmp(&b.x));
            line.members.into_iter().map(|placed| placed.item)
        })
        .collect()
}

/// Mean of the non-zero fragment rotations; 0 when nothing is tilted
pub fn global_rotation<'a>(fragments: impl IntoIterator<Item = &'a TextFragment>) -> f64 {
    let (sum, count) = fragments
        .into_iter()
        .map(TextFragment::rotation_degrees)
        .filter(|angle| *angle != 0.0)
        .fold((0.0, 0usize), |(sum, count), angle| (sum + angle, count + 1));

    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

/// Median of the heights, taking the upper middle for even counts
fn median(mut values: Vec<f64>) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.sort_by(|a, b| a.total_cmp(b));
    values[values.len() / 2]
}

/// Rebuild the quotation text from the selected fragments.
///
/// Fragments without a screen rect in this layout are left out.
pub fn reconstruct_quote(fragments: &[TextFragment], layout: &Layout, config: &EngineConfig) -> String {
    let angle = global_rotation(fragments);
    let pivot = layout.center();

    let mut heights = Vec::with_capacity(fragments.len());
    let mut placed = Vec::with_capacity(fragments.len());
    for fragment in fragments {
        let Some(rect) = layout.screen_rect(fragment) else {
            continue;
        };
        let center = if angle != 0.0 {
            unrotate_about(rect.center(), pivot, angle)
        } else {
            rect.center()
        };
        heights.push(rect.height);
        placed.push(Placed {
            item: fragment.text.as_str(),
            x: center.x,
            y: center.y,
        });
    }

    let tolerance = config.line_tolerance(median(heights));
    in_reading_order(placed, tolerance).join(" ")
}
