use std::path::Path;

use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;
use tracing::warn;

use gleaner_core::{
    EngineConfig, GestureEvent, InMemoryQuoteStore, Point, QuoteDraft, ScanCapture, ScanSession,
    Viewport,
};

/// Viewport units per terminal cell; cells are about twice as tall as wide
pub const CELL_WIDTH: f64 = 1.0;
pub const CELL_HEIGHT: f64 = 2.0;

/// Application mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Normal,
    Input,
    Help,
}

/// Input target for text input mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputTarget {
    Book,
    Author,
    CapturePath,
}

/// Terminal application state
pub struct App {
    pub session: ScanSession,
    pub store: InMemoryQuoteStore,
    pub mode: Mode,
    pub running: bool,

    /// Where the photo is drawn, in terminal cells
    pub canvas: Rect,
    pub source: Option<String>,

    // Input state
    pub input_buffer: String,
    pub input_target: InputTarget,
    pub pending_book: Option<String>,

    // Status message
    pub status_message: Option<String>,
}

impl App {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            session: ScanSession::new(config),
            store: InMemoryQuoteStore::new(),
            mode: Mode::Normal,
            running: true,

            canvas: Rect::default(),
            source: None,

            input_buffer: String::new(),
            input_target: InputTarget::Book,
            pending_book: None,

            status_message: None,
        }
    }

    pub fn load_capture(&mut self, capture: &ScanCapture, source: &Path) {
        let name = source
            .file_name()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| source.display().to_string());

        match self.session.load(capture) {
            Ok(count) => {
                self.source = Some(name.clone());
                self.set_status(&format!("Loaded {} ({} words)", name, count));
            }
            Err(e) => {
                self.source = None;
                warn!(source = %name, "capture has no usable text");
                self.set_status(&format!("{}: {}. Retake the photo.", name, e));
            }
        }
    }

    /// Track the canvas area, re-laying out the scan when it changes
    pub fn sync_canvas(&mut self, canvas: Rect) {
        if canvas == self.canvas {
            return;
        }
        self.canvas = canvas;
        self.session.on_layout(canvas_viewport(canvas));
    }

    /// Center of a terminal cell in viewport units, if the cell is on the canvas
    pub fn cell_to_point(&self, column: u16, row: u16) -> Option<Point> {
        let canvas = self.canvas;
        let inside = column >= canvas.x
            && column < canvas.x + canvas.width
            && row >= canvas.y
            && row < canvas.y + canvas.height;
        if !inside {
            return None;
        }
        Some(Point::new(
            (f64::from(column - canvas.x) + 0.5) * CELL_WIDTH,
            (f64::from(row - canvas.y) + 0.5) * CELL_HEIGHT,
        ))
    }

    /// Translate a left-button drag into gesture events
    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        if self.mode != Mode::Normal {
            return;
        }
        let point = self.cell_to_point(mouse.column, mouse.row);
        let (x, y) = (point.map(|p| p.x), point.map(|p| p.y));

        let event = match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => GestureEvent::Start { x, y },
            MouseEventKind::Drag(MouseButton::Left) => GestureEvent::Move { x, y },
            MouseEventKind::Up(MouseButton::Left) => GestureEvent::End,
            _ => return,
        };
        self.session.handle_gesture(event);
    }

    /// Begin the save prompts, or explain why there is nothing to save
    pub fn start_save(&mut self) {
        if self.session.quote().is_empty() {
            self.set_status("Nothing selected. Drag over the words you want first.");
            return;
        }
        self.pending_book = None;
        self.begin_input(InputTarget::Book);
    }

    pub fn begin_input(&mut self, target: InputTarget) {
        self.input_buffer.clear();
        self.input_target = target;
        self.mode = Mode::Input;
    }

    pub fn cancel_input(&mut self) {
        self.input_buffer.clear();
        self.pending_book = None;
        self.mode = Mode::Normal;
    }

    /// Commit the current input; returns a capture path to open, if one was entered
    pub fn submit_input(&mut self) -> Option<String> {
        let value = std::mem::take(&mut self.input_buffer);
        match self.input_target {
            InputTarget::Book => {
                self.pending_book = Some(value);
                self.input_target = InputTarget::Author;
                None
            }
            InputTarget::Author => {
                self.mode = Mode::Normal;
                let mut draft = self.session.draft().author(value);
                draft.book = self.pending_book.take();
                self.save(draft);
                None
            }
            InputTarget::CapturePath => {
                self.mode = Mode::Normal;
                Some(value.trim().to_string()).filter(|path| !path.is_empty())
            }
        }
    }

    fn save(&mut self, draft: QuoteDraft) {
        match self.session.save(draft, &mut self.store) {
            Ok(quote) => {
                self.source = None;
                self.set_status(&format!(
                    "Saved {} words from \"{}\" by {}",
                    quote.word_count(),
                    quote.book,
                    quote.author
                ));
            }
            Err(e) => self.set_status(&format!("Save failed: {}", e)),
        }
    }

    pub fn reset(&mut self) {
        self.session.reset();
        self.source = None;
        self.set_status("Capture dropped. Press o to open another.");
    }

    pub fn clear_selection(&mut self) {
        self.session.clear_selection();
        self.set_status("Selection cleared");
    }

    /// Set status message
    pub fn set_status(&mut self, msg: &str) {
        self.status_message = Some(msg.to_string());
    }

    /// Clear status message
    pub fn clear_status(&mut self) {
        self.status_message = None;
    }
}

/// Viewport size of a canvas, in the same units as `cell_to_point`
pub fn canvas_viewport(canvas: Rect) -> Viewport {
    Viewport::new(
        f64::from(canvas.width) * CELL_WIDTH,
        f64::from(canvas.height) * CELL_HEIGHT,
    )
}
