//! Scan session state
//!
//! Owns everything tied to one recognized photo: fragments, their on-screen
//! rects, the selection and the live quote. Hosts feed it layout and pointer
//! events and read back overlays and text.

use tracing::{debug, info};

use crate::config::EngineConfig;
use crate::error::ScanError;
use crate::geometry::{Layout, PhotoInfo, ScreenRect, Viewport};
use crate::gesture::{GestureEvent, GestureState, GestureTracker, HitSurface};
use crate::model::{
    Quote, QuoteDraft, RecognitionResult, ScanCapture, TextFragment, UNKNOWN_AUTHOR, UNKNOWN_BOOK,
};
use crate::reading_order::reconstruct_quote;
use crate::selection::SelectionSet;
use crate::store::QuoteStore;

/// One fragment as the host should draw it
#[derive(Debug, Clone, Copy)]
pub struct Overlay<'a> {
    pub fragment: &'a TextFragment,
    pub rect: ScreenRect,
    pub selected: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScanStats {
    pub detected: usize,
    pub selected: usize,
}

/// Format a rotation for the debug overlay
pub fn angle_label(degrees: f64) -> String {
    format!("{:.1}°", degrees)
}

/// Per-photo state; dropped as a whole on reset
#[derive(Debug, Clone)]
struct ActiveScan {
    photo: PhotoInfo,
    fragments: Vec<TextFragment>,
    layout: Option<Layout>,
    rects: Vec<Option<ScreenRect>>,
    selection: SelectionSet,
    tracker: GestureTracker,
    quote: String,
}

impl ActiveScan {
    fn new(photo: PhotoInfo, fragments: Vec<TextFragment>, config: &EngineConfig) -> Self {
        Self {
            photo,
            rects: vec![None; fragments.len()],
            fragments,
            layout: None,
            selection: SelectionSet::new(),
            tracker: GestureTracker::new(config),
            quote: String::new(),
        }
    }

    fn relayout(&mut self, viewport: Viewport, config: &EngineConfig) {
        // A stroke's last point belongs to the old layout
        self.tracker.end();
        self.layout = Layout::measure(self.photo, viewport);
        self.rects = match &self.layout {
            Some(layout) => self.fragments.iter().map(|f| layout.screen_rect(f)).collect(),
            None => vec![None; self.fragments.len()],
        };
        self.refresh_quote(config);
    }

    fn refresh_quote(&mut self, config: &EngineConfig) {
        self.quote = match &self.layout {
            Some(layout) => reconstruct_quote(self.selection.fragments(), layout, config),
            None => String::new(),
        };
    }
}

/// Platform-agnostic scan workflow state
#[derive(Debug, Clone)]
pub struct ScanSession {
    config: EngineConfig,
    viewport: Option<Viewport>,
    scan: Option<ActiveScan>,
    show_debug_angles: bool,
}

impl Default for ScanSession {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl ScanSession {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            viewport: None,
            scan: None,
            show_debug_angles: false,
        }
    }

    /// Whether a recognized photo is loaded
    pub fn has_scan(&self) -> bool {
        self.scan.is_some()
    }

    /// Start a scan from a recognized photo; returns the fragment count.
    ///
    /// A result with no placeable words resets the session.
    pub fn load_capture(
        &mut self,
        photo: PhotoInfo,
        recognition: &RecognitionResult,
    ) -> Result<usize, ScanError> {
        let fragments = recognition.fragments();
        if !fragments.iter().any(|f| f.bounding_box.is_usable()) {
            self.reset();
            return Err(ScanError::EmptyRecognition);
        }

        let count = fragments.len();
        let mut scan = ActiveScan::new(photo, fragments, &self.config);
        if let Some(viewport) = self.viewport {
            scan.relayout(viewport, &self.config);
        }
        self.scan = Some(scan);
        info!(
            fragments = count,
            width = photo.width,
            height = photo.height,
            orientation = photo.orientation.degrees(),
            "capture loaded"
        );
        Ok(count)
    }

    pub fn load(&mut self, capture: &ScanCapture) -> Result<usize, ScanError> {
        self.load_capture(PhotoInfo::from(&capture.photo), &capture.recognition)
    }

    /// The overlay container was measured or resized
    pub fn on_layout(&mut self, viewport: Viewport) {
        self.viewport = Some(viewport);
        if let Some(scan) = &mut self.scan {
            scan.relayout(viewport, &self.config);
            debug!(
                width = viewport.width,
                height = viewport.height,
                placed = scan.rects.iter().flatten().count(),
                "layout updated"
            );
        }
    }

    pub fn layout(&self) -> Option<&Layout> {
        self.scan.as_ref()?.layout.as_ref()
    }

    /// Feed one pointer event; returns whether the selection changed
    pub fn handle_gesture(&mut self, event: GestureEvent) -> bool {
        let Some(scan) = &mut self.scan else {
            return false;
        };

        let changed = match event {
            GestureEvent::Start { .. } => {
                let Some(point) = event.point() else {
                    return false;
                };
                if scan.layout.is_none() {
                    debug!("stroke ignored before layout");
                    return false;
                }
                let surface = HitSurface::new(&scan.fragments, &scan.rects);
                scan.tracker.start(point, &surface, &mut scan.selection)
            }
            GestureEvent::Move { .. } => {
                let Some(point) = event.point() else {
                    return false;
                };
                let surface = HitSurface::new(&scan.fragments, &scan.rects);
                scan.tracker.move_to(point, &surface, &mut scan.selection)
            }
            GestureEvent::End | GestureEvent::Terminate => {
                scan.tracker.end();
                false
            }
        };

        if changed {
            scan.refresh_quote(&self.config);
        }
        changed
    }

    pub fn gesture_state(&self) -> GestureState {
        self.scan
            .as_ref()
            .map_or(GestureState::Idle, |scan| scan.tracker.state())
    }

    /// Every placeable fragment with its rect and selection flag
    pub fn overlays(&self) -> Vec<Overlay<'_>> {
        let Some(scan) = &self.scan else {
            return Vec::new();
        };
        scan.fragments
            .iter()
            .zip(&scan.rects)
            .filter_map(|(fragment, rect)| {
                Some(Overlay {
                    fragment,
                    rect: (*rect)?,
                    selected: scan.selection.contains(fragment),
                })
            })
            .collect()
    }

    /// The live reconstructed quotation
    pub fn quote(&self) -> &str {
        self.scan.as_ref().map_or("", |scan| scan.quote.as_str())
    }

    /// Selected fragments in the order they were painted
    pub fn selected(&self) -> &[TextFragment] {
        match &self.scan {
            Some(scan) => scan.selection.fragments(),
            None => &[],
        }
    }

    pub fn fragments(&self) -> &[TextFragment] {
        match &self.scan {
            Some(scan) => &scan.fragments,
            None => &[],
        }
    }

    pub fn clear_selection(&mut self) {
        if let Some(scan) = &mut self.scan {
            scan.selection.clear();
            scan.tracker.end();
            scan.quote.clear();
            debug!("selection cleared");
        }
    }

    /// Drop the photo and everything derived from it
    pub fn reset(&mut self) {
        if self.scan.take().is_some() {
            info!("scan reset");
        }
    }

    pub fn toggle_debug_angles(&mut self) -> bool {
        self.show_debug_angles = !self.show_debug_angles;
        self.show_debug_angles
    }

    pub fn shows_debug_angles(&self) -> bool {
        self.show_debug_angles
    }

    /// Rotations of the selected words, when the debug overlay is on and any is tilted
    pub fn debug_angles(&self) -> Option<String> {
        if !self.show_debug_angles {
            return None;
        }
        let selected = self.selected();
        if !selected.iter().any(|f| f.rotation_degrees() != 0.0) {
            return None;
        }
        let labels: Vec<String> = selected
            .iter()
            .filter(|f| f.has_orientation_data())
            .map(|f| angle_label(f.rotation_degrees()))
            .collect();
        Some(labels.join(", "))
    }

    pub fn stats(&self) -> ScanStats {
        ScanStats {
            detected: self.fragments().len(),
            selected: self.selected().len(),
        }
    }

    /// A draft prefilled with the live quote, for the preview step
    pub fn draft(&self) -> QuoteDraft {
        QuoteDraft::new(self.quote())
    }

    /// Save the quote to `store` and reset the session
    pub fn save<S>(&mut self, draft: QuoteDraft, store: &mut S) -> Result<Quote, ScanError>
    where
        S: QuoteStore + ?Sized,
    {
        let text = match draft.text.trim() {
            "" => self.quote().trim().to_string(),
            edited => edited.to_string(),
        };
        if text.is_empty() {
            return Err(ScanError::NothingToSave);
        }

        let book = draft.book_title().unwrap_or(UNKNOWN_BOOK).to_string();
        let author = draft
            .author_name()
            .map(str::to_string)
            .or_else(|| store.author_for_book(&book))
            .unwrap_or_else(|| UNKNOWN_AUTHOR.to_string());

        let quote = Quote::new(text, book, author);
        store.add(quote.clone());
        info!(id = %quote.id, book = %quote.book, words = quote.word_count(), "quote saved");

        self.reset();
        Ok(quote)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BoundingBox, Point, RecognizedBlock, RecognizedElement, RecognizedLine};
    use crate::geometry::Orientation;
    use crate::store::InMemoryQuoteStore;

    fn element(text: &str, left: f64, top: f64) -> RecognizedElement {
        RecognizedElement {
            text: text.to_string(),
            frame: Some(BoundingBox::new(left, top, 50.0, 20.0)),
            corner_points: None,
        }
    }

    fn recognition(elements: Vec<RecognizedElement>) -> RecognitionResult {
        RecognitionResult {
            text: String::new(),
            blocks: vec![RecognizedBlock {
                text: String::new(),
                lines: vec![RecognizedLine {
                    text: String::new(),
                    elements,
                }],
            }],
        }
    }

    /// 400x400 photo shown 1:1, "Hello world" on the first line, "again" below
    fn loaded_session() -> ScanSession {
        let mut session = ScanSession::default();
        let result = recognition(vec![
            element("Hello", 0.0, 0.0),
            element("world", 60.0, 2.0),
            element("again", 0.0, 40.0),
        ]);
        session
            .load_capture(PhotoInfo::new(400.0, 400.0, Orientation::Upright), &result)
            .unwrap();
        session.on_layout(Viewport::new(400.0, 400.0));
        session
    }

    fn drag(session: &mut ScanSession, points: &[(f64, f64)]) {
        let (x, y) = points[0];
        session.handle_gesture(GestureEvent::start(x, y));
        for &(x, y) in &points[1..] {
            session.handle_gesture(GestureEvent::move_to(x, y));
        }
        session.handle_gesture(GestureEvent::End);
    }

    #[test]
    fn test_empty_recognition_resets() {
        let mut session = loaded_session();
        let err = session
            .load_capture(PhotoInfo::new(10.0, 10.0, Orientation::Upright), &recognition(vec![]))
            .unwrap_err();
        assert!(matches!(err, ScanError::EmptyRecognition));
        assert!(!session.has_scan());
        assert_eq!(session.quote(), "");
    }

    #[test]
    fn test_only_empty_boxes_resets() {
        let mut session = loaded_session();
        let mut ghost = element("ghost", 10.0, 10.0);
        ghost.frame = Some(BoundingBox::new(10.0, 10.0, 0.0, 0.0));
        let err = session
            .load_capture(PhotoInfo::new(400.0, 400.0, Orientation::Upright), &recognition(vec![ghost]))
            .unwrap_err();
        assert!(matches!(err, ScanError::EmptyRecognition));
        assert!(!session.has_scan());
    }

    #[test]
    fn test_swipe_builds_quote() {
        let mut session = loaded_session();
        drag(&mut session, &[(100.0, 12.0), (10.0, 10.0)]);

        assert_eq!(session.quote(), "Hello world");
        assert_eq!(session.stats(), ScanStats { detected: 3, selected: 2 });
        assert_eq!(session.gesture_state(), GestureState::Idle);

        let selected: Vec<_> = session
            .overlays()
            .iter()
            .filter(|o| o.selected)
            .map(|o| o.fragment.text.clone())
            .collect();
        assert_eq!(selected, vec!["Hello", "world"]);
    }

    #[test]
    fn test_gesture_before_layout_is_ignored() {
        let mut session = ScanSession::default();
        session
            .load_capture(
                PhotoInfo::new(400.0, 400.0, Orientation::Upright),
                &recognition(vec![element("Hello", 0.0, 0.0)]),
            )
            .unwrap();

        assert!(session.layout().is_none());
        assert!(!session.handle_gesture(GestureEvent::start(10.0, 10.0)));
        assert_eq!(session.gesture_state(), GestureState::Idle);
        assert!(session.overlays().is_empty());
    }

    #[test]
    fn test_start_without_coordinates_is_ignored() {
        let mut session = loaded_session();
        assert!(!session.handle_gesture(GestureEvent::Start { x: None, y: Some(10.0) }));
        assert_eq!(session.gesture_state(), GestureState::Idle);
    }

    #[test]
    fn test_layout_known_before_capture() {
        let mut session = ScanSession::default();
        session.on_layout(Viewport::new(200.0, 200.0));
        session
            .load_capture(
                PhotoInfo::new(400.0, 400.0, Orientation::Upright),
                &recognition(vec![element("Hello", 0.0, 0.0)]),
            )
            .unwrap();

        let overlays = session.overlays();
        assert_eq!(overlays.len(), 1);
        assert_eq!(overlays[0].rect.width, 25.0);
    }

    #[test]
    fn test_relayout_keeps_selection() {
        let mut session = loaded_session();
        drag(&mut session, &[(10.0, 10.0), (100.0, 12.0)]);
        session.on_layout(Viewport::new(200.0, 200.0));

        assert_eq!(session.quote(), "Hello world");
        let hello = session.overlays()[0];
        assert_eq!((hello.rect.width, hello.rect.height), (25.0, 10.0));
    }

    #[test]
    fn test_relayout_ends_active_stroke() {
        let mut session = loaded_session();
        assert!(session.handle_gesture(GestureEvent::start(10.0, 10.0)));
        session.on_layout(Viewport::new(200.0, 200.0));
        assert_eq!(session.gesture_state(), GestureState::Idle);

        // Moves after the resize need a fresh start
        assert!(!session.handle_gesture(GestureEvent::move_to(10.0, 25.0)));
        assert_eq!(session.quote(), "Hello");
    }

    #[test]
    fn test_unbounded_drags_do_not_overflow() {
        let config = EngineConfig {
            sample_step: 0.0,
            ..EngineConfig::default()
        };
        let mut session = ScanSession::new(config);
        session
            .load_capture(
                PhotoInfo::new(400.0, 400.0, Orientation::Upright),
                &recognition(vec![element("Hello", 0.0, 0.0)]),
            )
            .unwrap();
        session.on_layout(Viewport::new(400.0, 400.0));

        assert!(session.handle_gesture(GestureEvent::start(1.0, 1.0)));
        assert!(!session.handle_gesture(GestureEvent::move_to(5.0, 1.0)));
        assert!(!session.handle_gesture(GestureEvent::move_to(1e20, 1.0)));
        session.handle_gesture(GestureEvent::End);
        assert_eq!(session.quote(), "Hello");
    }

    #[test]
    fn test_clear_selection() {
        let mut session = loaded_session();
        drag(&mut session, &[(10.0, 10.0)]);
        assert_eq!(session.quote(), "Hello");

        session.clear_selection();
        assert_eq!(session.quote(), "");
        assert!(session.selected().is_empty());
        assert!(session.has_scan());
    }

    #[test]
    fn test_debug_angles() {
        let mut session = ScanSession::default();
        let mut tilted = element("tilted", 0.0, 0.0);
        tilted.corner_points = Some(vec![
            Point::new(0.0, 0.0),
            Point::new(100.0, 100.0 * 10f64.to_radians().tan()),
            Point::new(100.0, 40.0),
            Point::new(0.0, 20.0),
        ]);
        session
            .load_capture(PhotoInfo::new(400.0, 400.0, Orientation::Upright), &recognition(vec![tilted]))
            .unwrap();
        session.on_layout(Viewport::new(400.0, 400.0));
        drag(&mut session, &[(25.0, 10.0)]);

        assert_eq!(session.debug_angles(), None);
        assert!(session.toggle_debug_angles());
        assert_eq!(session.debug_angles().as_deref(), Some("10.0°"));
    }

    #[test]
    fn test_save_fills_defaults_and_resets() {
        let mut store = InMemoryQuoteStore::with_catalog([("Meditations", "Marcus Aurelius")]);

        let mut session = loaded_session();
        drag(&mut session, &[(10.0, 10.0), (100.0, 12.0)]);
        let quote = session.save(session.draft().book("Meditations"), &mut store).unwrap();
        assert_eq!(quote.text, "Hello world");
        assert_eq!(quote.author, "Marcus Aurelius");
        assert!(!session.has_scan());

        let mut session = loaded_session();
        drag(&mut session, &[(10.0, 50.0)]);
        let quote = session.save(QuoteDraft::new("  "), &mut store).unwrap();
        assert_eq!(quote.text, "again");
        assert_eq!(quote.book, UNKNOWN_BOOK);
        assert_eq!(quote.author, UNKNOWN_AUTHOR);

        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_save_nothing_selected() {
        let mut store = InMemoryQuoteStore::new();
        let mut session = loaded_session();
        let err = session.save(session.draft(), &mut store).unwrap_err();
        assert!(matches!(err, ScanError::NothingToSave));
        assert!(session.has_scan());
        assert!(store.is_empty());
    }

    #[test]
    fn test_angle_label() {
        assert_eq!(angle_label(-3.04), "-3.0°");
        assert_eq!(angle_label(12.0), "12.0°");
    }
}
