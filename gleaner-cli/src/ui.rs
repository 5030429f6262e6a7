//! Terminal UI rendering

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use gleaner_core::{QuoteStore, ScreenRect};

use crate::app::{App, InputTarget, Mode, CELL_HEIGHT, CELL_WIDTH};

// Catppuccin Mocha colors
const BASE: Color = Color::Rgb(30, 30, 46);
const SURFACE0: Color = Color::Rgb(49, 50, 68);
const SURFACE1: Color = Color::Rgb(69, 71, 90);
const TEXT: Color = Color::Rgb(205, 214, 244);
const SUBTEXT0: Color = Color::Rgb(166, 173, 200);
const YELLOW: Color = Color::Rgb(249, 226, 175);
const GREEN: Color = Color::Rgb(166, 227, 161);
const BLUE: Color = Color::Rgb(137, 180, 250);
const MAUVE: Color = Color::Rgb(203, 166, 247);

const SIDEBAR_WIDTH: u16 = 34;

fn split(area: Rect) -> (Rect, Rect, Rect, Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Title bar
            Constraint::Min(0),    // Main content
            Constraint::Length(1), // Status bar
        ])
        .split(area);
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),                // Photo
            Constraint::Length(SIDEBAR_WIDTH), // Quote
        ])
        .split(rows[1]);
    (rows[0], columns[0], columns[1], rows[2])
}

fn canvas_block() -> Block<'static> {
    Block::default().borders(Borders::ALL)
}

/// Cells inside the photo frame for a given terminal size
pub fn canvas_area(area: Rect) -> Rect {
    let (_, photo, _, _) = split(area);
    canvas_block().inner(photo)
}

pub fn draw(frame: &mut Frame, app: &App) {
    let (title, photo, sidebar, status) = split(frame.area());

    draw_title_bar(frame, app, title);
    draw_photo(frame, app, photo);
    draw_sidebar(frame, app, sidebar);
    draw_status_bar(frame, app, status);

    match app.mode {
        Mode::Input => draw_input_dialog(frame, app),
        Mode::Help => draw_help(frame),
        Mode::Normal => {}
    }
}

fn draw_title_bar(frame: &mut Frame, app: &App, area: Rect) {
    let stats = app.session.stats();
    let source = app.source.as_deref().unwrap_or("no capture");

    let title_text = format!(
        " Gleaner - {} [{}/{}]",
        source, stats.selected, stats.detected
    );

    let title_bar = Paragraph::new(title_text).style(Style::default().fg(TEXT).bg(SURFACE0));

    frame.render_widget(title_bar, area);
}

fn draw_photo(frame: &mut Frame, app: &App, area: Rect) {
    let block = canvas_block()
        .border_style(Style::default().fg(BLUE))
        .title("Photo");

    let inner = block.inner(area);
    frame.render_widget(block, area);

    if !app.session.has_scan() {
        let placeholder = Paragraph::new("No capture loaded. Press o to open one.")
            .style(Style::default().fg(SUBTEXT0))
            .alignment(Alignment::Center);
        frame.render_widget(placeholder, inner);
        return;
    }

    // Letterbox area of the photo itself
    if let Some(layout) = app.session.layout() {
        let t = layout.transform();
        let image = ScreenRect {
            left: t.offset_x,
            top: t.offset_y,
            width: t.displayed_width,
            height: t.displayed_height,
            rotation_degrees: 0.0,
        };
        if let Some(cells) = cells_for(&image, inner) {
            frame.render_widget(Block::default().style(Style::default().bg(BASE)), cells);
        }
    }

    for overlay in app.session.overlays() {
        let Some(cells) = cells_for(&overlay.rect, inner) else {
            continue;
        };
        let style = if overlay.selected {
            Style::default().fg(BASE).bg(GREEN).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(TEXT).bg(SURFACE1)
        };
        let label: String = overlay
            .fragment
            .text
            .chars()
            .take(usize::from(cells.width))
            .collect();
        frame.render_widget(Paragraph::new(label).style(style), cells);
    }
}

/// Terminal cells covering a screen rect, clipped to the canvas
fn cells_for(rect: &ScreenRect, canvas: Rect) -> Option<Rect> {
    // Axis-aligned extent of the rect once turned
    let (sin, cos) = rect.rotation_degrees.to_radians().sin_cos();
    let (hw, hh) = (rect.width / 2.0, rect.height / 2.0);
    let half_w = (hw * cos).abs() + (hh * sin).abs();
    let half_h = (hw * sin).abs() + (hh * cos).abs();
    let center = rect.center();

    let left = ((center.x - half_w) / CELL_WIDTH).floor().max(0.0);
    let top = ((center.y - half_h) / CELL_HEIGHT).floor().max(0.0);
    let right = ((center.x + half_w) / CELL_WIDTH).ceil();
    let bottom = ((center.y + half_h) / CELL_HEIGHT).ceil();
    if !(right > left && bottom > top) {
        return None;
    }

    let cells = Rect::new(
        canvas.x.saturating_add(left as u16),
        canvas.y.saturating_add(top as u16),
        (right - left) as u16,
        (bottom - top) as u16,
    )
    .intersection(canvas);
    (!cells.is_empty()).then_some(cells)
}

fn draw_sidebar(frame: &mut Frame, app: &App, area: Rect) {
    let stats = app.session.stats();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(SUBTEXT0))
        .title(format!(
            "Quote ({} saved){}",
            app.store.list().len(),
            if app.session.shows_debug_angles() { " [angles]" } else { "" }
        ));

    let quote = app.session.quote();
    let mut lines = vec![if quote.is_empty() {
        Line::from(Span::styled("(nothing selected)", Style::default().fg(SUBTEXT0)))
    } else {
        Line::from(Span::styled(format!("\"{}\"", quote), Style::default().fg(TEXT)))
    }];

    lines.push(Line::from(""));
    let mut counts = format!("{} word(s) detected", stats.detected);
    if stats.selected > 0 {
        counts.push_str(&format!(" • {} selected", stats.selected));
    }
    lines.push(Line::from(Span::styled(counts, Style::default().fg(SUBTEXT0))));

    if let Some(angles) = app.session.debug_angles() {
        lines.push(Line::from(Span::styled(
            format!("Angles: {}", angles),
            Style::default().fg(YELLOW),
        )));
    }

    lines.push(Line::from(""));
    let hint = if stats.selected > 0 {
        "Selection ready, press s to save"
    } else {
        "Drag over the words you want"
    };
    lines.push(Line::from(Span::styled(hint, Style::default().fg(MAUVE))));

    let paragraph = Paragraph::new(lines).block(block).wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

fn draw_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let mode_str = match app.mode {
        Mode::Normal => "NORMAL",
        Mode::Input => "INPUT",
        Mode::Help => "HELP",
    };

    let status = app.status_message.as_deref().unwrap_or("");

    let help_hint = "drag select | c clear | s save | e export | ? help";

    let status_text = format!(
        " {} | {}",
        mode_str,
        if status.is_empty() { help_hint } else { status },
    );

    let status_bar = Paragraph::new(status_text).style(Style::default().fg(SUBTEXT0).bg(SURFACE0));

    frame.render_widget(status_bar, area);
}

fn draw_input_dialog(frame: &mut Frame, app: &App) {
    let area = centered_rect(60, 3, frame.area());
    frame.render_widget(Clear, area);

    let title = match app.input_target {
        InputTarget::Book => "Book title (blank for unknown)",
        InputTarget::Author => "Author (blank to look up)",
        InputTarget::CapturePath => "Capture file path",
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(GREEN))
        .title(title);

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let input = Paragraph::new(format!("{}_", app.input_buffer)).style(Style::default().fg(TEXT));
    frame.render_widget(input, inner);
}

fn draw_help(frame: &mut Frame) {
    let area = centered_rect(60, 16, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(BLUE))
        .title("Help (press any key to close)");

    let heading = Style::default().fg(MAUVE).add_modifier(Modifier::BOLD);
    let help_text = vec![
        Line::from(Span::styled("Selection", heading)),
        Line::from("  drag     Paint words; start on a selected word to erase"),
        Line::from("  c        Clear selection"),
        Line::from("  d        Toggle rotation angles"),
        Line::from(""),
        Line::from(Span::styled("Quotes", heading)),
        Line::from("  s        Save quote (asks for book, then author)"),
        Line::from("  e        Export saved quotes as JSON"),
        Line::from(""),
        Line::from(Span::styled("Capture", heading)),
        Line::from("  o        Open a capture file"),
        Line::from("  r        Drop the current capture"),
        Line::from("  q        Quit"),
        Line::from(""),
        Line::from(Span::styled("Press any key to close", Style::default().fg(SUBTEXT0))),
    ];

    let paragraph = Paragraph::new(help_text).block(block);
    frame.render_widget(paragraph, area);
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}
