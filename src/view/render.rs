//! Drawing a session into a ratatui frame.
//!
//! Screen layout, top to bottom: content rows, the bar, one row per
//! filter, then the status line (or the open prompt).

use super::styles::{bar_style, filter_color, highlight_style, prefix_style, sgr_style};
use crate::model::ColorizeMode;
use crate::state::text_view::{BULLET, NUMBER_SEPARATOR};
use crate::state::{AppState, TextView};
use crate::view_state::layout::{clip_columns, text_width};
use crate::view_state::{segments, sgr, DisplayLine, SelectedLine, StyleSpan};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Position, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use std::ops::Range;

const HITS_WIDTH: usize = 8;
const CASE_WIDTH: usize = "sensitive".len();
const SHOWN_WIDTH: usize = "Shown".len();
/// Columns reserved for the offset description, spaces included.
const POSITION_WIDTH: usize = 5;

/// Renders the current view and the status line.
pub fn render_session(frame: &mut Frame, state: &AppState) {
    let area = frame.area();
    if area.width == 0 || area.height == 0 {
        return;
    }
    let view_area = Rect {
        height: area.height - 1,
        ..area
    };
    let status_area = Rect {
        y: area.bottom() - 1,
        height: 1,
        ..area
    };
    render_view(
        frame,
        view_area,
        state.current_view(),
        &state.source().basename(),
    );
    render_status(frame, status_area, state);
}

/// Renders `view` into `area`: content, bar and filter rows.
pub fn render_view(frame: &mut Frame, area: Rect, view: &TextView, basename: &str) {
    let content_height = u16::try_from(view.content_height())
        .unwrap_or(u16::MAX)
        .min(area.height);
    let content_area = Rect {
        height: content_height,
        ..area
    };
    frame.render_widget(Paragraph::new(content_lines(view)), content_area);

    let bar_y = area.y + content_height;
    if bar_y >= area.bottom() {
        return;
    }
    let bar_area = Rect {
        y: bar_y,
        height: 1,
        ..area
    };
    render_bar(frame.buffer_mut(), bar_area, view, basename);

    let filters_area = Rect {
        y: bar_y + 1,
        height: area.bottom() - bar_y - 1,
        ..area
    };
    frame.render_widget(Paragraph::new(filter_lines(view)), filters_area);
}

// ===== Content =====

fn content_lines(view: &TextView) -> Vec<Line<'static>> {
    let (width, _) = view.size();
    view.display()
        .lines
        .iter()
        .skip(view.offsets().vertical())
        .take(view.content_height())
        .filter_map(|row| {
            let line = view.selected().lines.get(row.selected)?;
            if line.is_separator() {
                return Some(Line::from("-".repeat(width)));
            }
            let mut spans = prefix_spans(view, row, line);
            spans.extend(text_spans(view, row, line));
            Some(Line::from(spans))
        })
        .collect()
}

fn prefix_spans(view: &TextView, row: &DisplayLine, line: &SelectedLine) -> Vec<Span<'static>> {
    let config = view.config();
    if config.line_numbers {
        let width = view.raw().line_number_width();
        let number = match line.source_index() {
            Some(index) if !row.continuation => format!("{:>width$}", index + 1),
            _ => " ".repeat(width),
        };
        vec![
            Span::styled(number, prefix_style(config.palette, line.filter)),
            Span::raw(NUMBER_SEPARATOR),
        ]
    } else if config.wrap && config.bullets {
        let bullet = if row.continuation {
            " ".repeat(BULLET.chars().count())
        } else {
            BULLET.to_string()
        };
        vec![Span::raw(bullet)]
    } else {
        Vec::new()
    }
}

fn text_spans(view: &TextView, row: &DisplayLine, line: &SelectedLine) -> Vec<Span<'static>> {
    let config = view.config();
    let range = if config.wrap {
        row.range()
    } else {
        clip_columns(&line.text, view.offsets().horizontal(), view.content_width())
    };

    let line_style = match (config.colorize_mode, line.filter) {
        (ColorizeMode::Line, Some(filter)) => {
            Some(Style::default().fg(filter_color(config.palette, filter)))
        }
        _ => None,
    };

    let mut spans = Vec::new();
    for piece in segments::pieces(range.start, range.end, &line.segments) {
        for (sub, sgr) in styled_ranges(piece.range, &line.styles) {
            let style = match (line_style, line.filter) {
                (Some(style), _) => style,
                (None, Some(filter)) if piece.highlighted => {
                    sgr.patch(highlight_style(config.colorize_mode, config.palette, filter))
                }
                _ => sgr,
            };
            let text = visible_text(&line.text[sub], config.show_spaces);
            if !text.is_empty() {
                spans.push(Span::styled(text, style));
            }
        }
    }
    spans
}

/// Splits `range` at the boundaries of the SGR style spans over it.
fn styled_ranges(range: Range<usize>, styles: &[StyleSpan]) -> Vec<(Range<usize>, Style)> {
    let mut out = Vec::new();
    let mut pos = range.start;
    for span in styles
        .iter()
        .filter(|s| s.end > range.start && s.start < range.end)
    {
        let start = span.start.max(pos);
        if pos < start {
            out.push((pos..start, Style::default()));
        }
        let end = span.end.min(range.end);
        out.push((start..end, sgr_style(&span.style)));
        pos = end;
    }
    if pos < range.end {
        out.push((pos..range.end, Style::default()));
    }
    out
}

/// Text as drawn: control sequences and stray escapes dropped, spaces
/// optionally dotted.
fn visible_text(text: &str, show_spaces: bool) -> String {
    sgr::strip(text)
        .chars()
        .filter(|&c| c != '\u{1b}')
        .map(|c| if show_spaces && c == ' ' { '·' } else { c })
        .collect()
}

// ===== Bar and filters =====

fn render_bar(buf: &mut Buffer, area: Rect, view: &TextView, basename: &str) {
    let style = bar_style();
    let width = usize::from(area.width);
    buf.set_string(area.x, area.y, "─".repeat(width), style);

    let header = if view.has_filters() {
        format!(
            "{:>HITS_WIDTH$} | {:^CASE_WIDTH$} | {:^SHOWN_WIDTH$} | Keywords ",
            view.selected().total_hits(),
            "Case",
            "Shown",
        )
    } else {
        " No filter ".to_string()
    };
    put(buf, area, 0, &header, style);

    // Right to left, one column apart.
    let left_of = |x: usize, text: &str| x.saturating_sub(text_width(text) + 1);

    let name = format!(" {} ", view.name());
    let mut x = left_of(width, &name);
    put(buf, area, x, &name, style);

    x = x.saturating_sub(POSITION_WIDTH + 1);
    if view.display().len() > view.content_height() {
        let position = format!(" {:>3} ", view.offsets().position().to_string());
        put(buf, area, x, &position, style);
    }

    let count = format!(" {} lines ", view.raw().len());
    x = left_of(x, &count);
    put(buf, area, x, &count, style);

    let file = format!(" {basename} ");
    x = left_of(x, &file);
    put(buf, area, x, &file, style.add_modifier(Modifier::BOLD));
}

fn put(buf: &mut Buffer, area: Rect, x: usize, text: &str, style: Style) {
    let Ok(offset) = u16::try_from(x) else {
        return;
    };
    if offset >= area.width {
        return;
    }
    let room = usize::from(area.width - offset);
    buf.set_stringn(area.x + offset, area.y, text, room, style);
}

fn filter_lines(view: &TextView) -> Vec<Line<'static>> {
    let config = view.config();
    config
        .filters
        .iter()
        .enumerate()
        .map(|(index, filter)| {
            let hits = view.selected().hits.get(index).copied().unwrap_or(0);
            let case = if filter.ignore_case() {
                "ignored"
            } else {
                "sensitive"
            };
            let shown = if filter.is_hiding() { "no" } else { "yes" };
            let columns =
                format!("{hits:>HITS_WIDTH$} | {case:^CASE_WIDTH$} | {shown:^SHOWN_WIDTH$} | ");
            let keywords_style = if filter.is_hiding() {
                Style::default()
            } else {
                Style::default().fg(filter_color(config.palette, index))
            };
            Line::from(vec![
                Span::raw(columns),
                Span::styled(filter.describe(), keywords_style),
            ])
        })
        .collect()
}

// ===== Status line =====

fn render_status(frame: &mut Frame, area: Rect, state: &AppState) {
    match state.prompt() {
        Some(prompt) => {
            let label = prompt.kind.label();
            let line = Line::from(vec![Span::raw(label), Span::raw(prompt.text.clone())]);
            frame.render_widget(Paragraph::new(line), area);

            let before_cursor: String = prompt.text.chars().take(prompt.cursor).collect();
            let column = text_width(label) + text_width(&before_cursor);
            let column = u16::try_from(column)
                .unwrap_or(u16::MAX)
                .min(area.width.saturating_sub(1));
            frame.set_cursor_position(Position::new(area.x + column, area.y));
        }
        None => {
            let status = state.status().unwrap_or_default().to_string();
            frame.render_widget(
                Paragraph::new(status).alignment(Alignment::Center),
                area,
            );
        }
    }
}
