//! Drag-to-select gesture tracking
//!
//! A stroke starts on one point, decides once whether it adds or removes,
//! then paints every word its path crosses. Paths are resampled at a fixed
//! spacing so fast swipes do not jump over narrow words, and each move event
//! changes the selection at most once.

use std::collections::HashSet;

use tracing::{debug, trace, warn};

use crate::config::EngineConfig;
use crate::geometry::ScreenRect;
use crate::model::{Point, TextFragment};
use crate::reading_order::{in_reading_order, Placed};
use crate::selection::SelectionSet;

/// What a stroke does to the words it crosses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrokeMode {
    Add,
    Remove,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureState {
    Idle,
    Active { mode: StrokeMode, last: Point },
}

/// Pointer events as the host reports them; coordinates may be missing
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureEvent {
    Start { x: Option<f64>, y: Option<f64> },
    Move { x: Option<f64>, y: Option<f64> },
    End,
    Terminate,
}

impl GestureEvent {
    pub fn start(x: f64, y: f64) -> Self {
        GestureEvent::Start {
            x: Some(x),
            y: Some(y),
        }
    }

    pub fn move_to(x: f64, y: f64) -> Self {
        GestureEvent::Move {
            x: Some(x),
            y: Some(y),
        }
    }

    /// The event's location, if it carries a usable one
    pub fn point(&self) -> Option<Point> {
        match *self {
            GestureEvent::Start {
                x: Some(x),
                y: Some(y),
            }
            | GestureEvent::Move {
                x: Some(x),
                y: Some(y),
            } => Some(Point::new(x, y)).filter(Point::is_finite),
            _ => None,
        }
    }
}

/// On-screen geometry of every fragment in the scan, index-aligned
#[derive(Debug, Clone, Copy)]
pub struct HitSurface<'a> {
    fragments: &'a [TextFragment],
    rects: &'a [Option<ScreenRect>],
}

impl<'a> HitSurface<'a> {
    pub fn new(fragments: &'a [TextFragment], rects: &'a [Option<ScreenRect>]) -> Self {
        Self { fragments, rects }
    }

    /// Indices of fragments whose padded rect contains the point
    pub fn hits(&self, point: Point, padding: f64) -> Vec<usize> {
        self.rects
            .iter()
            .enumerate()
            .filter_map(|(idx, rect)| match rect {
                Some(rect) if rect.contains(point, padding) => Some(idx),
                _ => None,
            })
            .collect()
    }

    pub fn fragment(&self, idx: usize) -> Option<&'a TextFragment> {
        self.fragments.get(idx)
    }

    pub fn rect(&self, idx: usize) -> Option<ScreenRect> {
        self.rects.get(idx).copied().flatten()
    }
}

/// Upper bound on interpolated steps for one move event
pub const MAX_SEGMENT_STEPS: usize = 8192;

/// Points from `from` to `to`, both included, at most `step` apart along the longer axis.
///
/// Segments longer than `MAX_SEGMENT_STEPS` steps are sampled more sparsely.
pub fn sample_segment(from: Point, to: Point, step: f64) -> Vec<Point> {
    let dx = to.x - from.x;
    let dy = to.y - from.y;
    let distance = dx.abs().max(dy.abs());
    // Saturating cast: inf and huge ratios land on the cap, NaN on the floor
    let steps = ((distance / step).floor() as usize).clamp(1, MAX_SEGMENT_STEPS);

    (0..=steps)
        .map(|i| {
            let t = i as f64 / steps as f64;
            Point::new(from.x + dx * t, from.y + dy * t)
        })
        .collect()
}

/// Turns a drag into selection updates
#[derive(Debug, Clone)]
pub struct GestureTracker {
    state: GestureState,
    hit_padding: f64,
    sample_step: f64,
    batch_line_ratio: f64,
}

impl GestureTracker {
    pub fn new(config: &EngineConfig) -> Self {
        let sample_step = if config.sample_step.is_finite() && config.sample_step > 0.0 {
            config.sample_step
        } else {
            warn!(sample_step = config.sample_step, "unusable sample step, using default");
            EngineConfig::default().sample_step
        };
        Self {
            state: GestureState::Idle,
            hit_padding: config.hit_padding,
            sample_step,
            batch_line_ratio: config.batch_line_ratio,
        }
    }

    pub fn state(&self) -> GestureState {
        self.state
    }

    pub fn mode(&self) -> Option<StrokeMode> {
        match self.state {
            GestureState::Active { mode, .. } => Some(mode),
            GestureState::Idle => None,
        }
    }

    /// Begin a stroke; its mode is fixed here for the whole drag
    pub fn start(&mut self, point: Point, surface: &HitSurface, selection: &mut SelectionSet) -> bool {
        if !point.is_finite() {
            return false;
        }

        let hits = surface.hits(point, self.hit_padding);
        let starts_on_selection = hits
            .iter()
            .filter_map(|&idx| surface.fragment(idx))
            .any(|fragment| selection.contains(fragment));
        let mode = if starts_on_selection {
            StrokeMode::Remove
        } else {
            StrokeMode::Add
        };
        debug!(?mode, x = point.x, y = point.y, hits = hits.len(), "stroke started");

        self.state = GestureState::Active { mode, last: point };
        self.paint(mode, &[point], surface, selection)
    }

    /// Extend the active stroke to `point`; ignored while idle
    pub fn move_to(&mut self, point: Point, surface: &HitSurface, selection: &mut SelectionSet) -> bool {
        let GestureState::Active { mode, last } = self.state else {
            return false;
        };
        if !point.is_finite() {
            return false;
        }

        let samples = sample_segment(last, point, self.sample_step);
        self.state = GestureState::Active { mode, last: point };
        self.paint(mode, &samples, surface, selection)
    }

    pub fn end(&mut self) {
        if self.state != GestureState::Idle {
            debug!("stroke ended");
        }
        self.state = GestureState::Idle;
    }

    fn paint(
        &self,
        mode: StrokeMode,
        samples: &[Point],
        surface: &HitSurface,
        selection: &mut SelectionSet,
    ) -> bool {
        let mut seen = HashSet::new();
        let mut touched = Vec::new();
        for sample in samples {
            for idx in surface.hits(*sample, self.hit_padding) {
                if let Some(fragment) = surface.fragment(idx) {
                    if seen.insert(fragment.key()) {
                        touched.push(idx);
                    }
                }
            }
        }
        if touched.is_empty() {
            return false;
        }

        let ordered = self.order_batch(touched, surface);
        trace!(?mode, samples = samples.len(), touched = ordered.len(), "applying stroke batch");
        selection.apply(mode, ordered.into_iter().filter_map(|idx| surface.fragment(idx)))
    }

    /// Order one batch of hits by line, then left edge
    fn order_batch(&self, touched: Vec<usize>, surface: &HitSurface) -> Vec<usize> {
        let tallest = touched
            .iter()
            .filter_map(|&idx| surface.rect(idx))
            .map(|rect| rect.height)
            .fold(0.0, f64::max);

        let placed: Vec<Placed<usize>> = touched
            .into_iter()
            .filter_map(|idx| {
                let rect = surface.rect(idx)?;
                Some(Placed {
                    item: idx,
                    x: rect.left,
                    y: rect.center().y,
                })
            })
            .collect();
        in_reading_order(placed, tallest * self.batch_line_ratio)
    }
}
