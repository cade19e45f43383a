//! Renders the history above an always-present prompt row.
//!
//! While the history is shorter than the screen the prompt sits right below
//! the newest line, like a shell. Once it overflows, the prompt is pinned to
//! the bottom row and the history scrolls.

use folio_core::history::HistoryLine;
use folio_core::state::AppState;
use ratatui::buffer::Buffer;
use ratatui::layout::Position;
use ratatui::layout::Rect;
use ratatui::style::Modifier;
use ratatui::style::Style;
use ratatui::style::Stylize;
use ratatui::text::Line;
use ratatui::text::Span;
use ratatui::widgets::Paragraph;
use ratatui::widgets::Widget;
use ratatui::widgets::WidgetRef;
use ratatui::widgets::Wrap;
use unicode_width::UnicodeWidthChar;
use unicode_width::UnicodeWidthStr;

use crate::colors;
use crate::hyperlink::HyperlinkTarget;

const PROMPT_ROWS: u16 = 1;

pub(crate) fn history_line_to_ratatui(line: &HistoryLine) -> Line<'static> {
    match line {
        HistoryLine::Plain(text) => Line::from(text.clone()).fg(colors::text()),
        HistoryLine::Styled { text, class } => Line::from(text.clone()).fg(colors::for_class(*class)),
        HistoryLine::Link {
            lead,
            label,
            trail,
            ..
        } => Line::from(vec![
            Span::raw(lead.clone()),
            Span::styled(
                label.clone(),
                Style::default()
                    .fg(colors::link())
                    .add_modifier(Modifier::UNDERLINED),
            ),
            Span::raw(trail.clone()),
        ]),
        HistoryLine::Echo { prompt, input } => Line::from(vec![
            Span::styled(prompt.clone(), Style::default().fg(colors::prompt()).bold()),
            Span::raw(" "),
            Span::raw(input.clone()),
        ]),
    }
}

fn wrapped(lines: Vec<Line<'static>>) -> Paragraph<'static> {
    Paragraph::new(lines).wrap(Wrap { trim: false })
}

/// Widget over a borrowed [`AppState`].
pub struct HistoryView<'a> {
    state: &'a AppState,
    prompt: &'a str,
}

impl<'a> HistoryView<'a> {
    pub fn new(state: &'a AppState, prompt: &'a str) -> Self {
        Self { state, prompt }
    }

    fn paragraph(&self) -> Paragraph<'static> {
        wrapped(
            self.state
                .history()
                .iter()
                .map(history_line_to_ratatui)
                .collect(),
        )
    }

    /// Visible link labels within `area`. Links on lines that wrap are left
    /// as plain text.
    pub fn hyperlink_targets(&self, area: Rect) -> Vec<HyperlinkTarget> {
        if area.is_empty() {
            return Vec::new();
        }
        let layout = self.layout(area);
        let first = usize::from(layout.top);
        let visible = first..first + usize::from(layout.history.height);

        let mut targets = Vec::new();
        let mut row = 0usize;
        for line in self.state.history().iter() {
            if row >= visible.end {
                break;
            }
            let rows = wrapped(vec![history_line_to_ratatui(line)]).line_count(area.width);
            if let HistoryLine::Link {
                lead, label, href, ..
            } = line
            {
                if rows == 1 && visible.contains(&row) && !label.is_empty() {
                    let offset = u16::try_from(row - first).unwrap_or(u16::MAX);
                    let indent = u16::try_from(lead.width()).unwrap_or(u16::MAX);
                    targets.push(HyperlinkTarget {
                        position: Position::new(
                            area.x.saturating_add(indent),
                            layout.history.y.saturating_add(offset),
                        ),
                        label: label.clone(),
                        href: href.clone(),
                    });
                }
            }
            row += rows;
        }
        targets
    }

    /// Total rows the history needs at `width` once wrapped.
    pub fn history_rows(&self, width: u16) -> usize {
        if self.state.history().is_empty() || width == 0 {
            return 0;
        }
        self.paragraph().line_count(width)
    }

    /// The furthest the view can scroll back within `area`.
    pub fn max_scroll_back(&self, area: Rect) -> usize {
        let capacity = usize::from(area.height.saturating_sub(PROMPT_ROWS));
        self.history_rows(area.width).saturating_sub(capacity)
    }

    /// Where the terminal cursor belongs: inside the prompt row, after the
    /// character left of the input cursor.
    pub fn cursor_position(&self, area: Rect) -> Option<Position> {
        if area.height == 0 || area.width == 0 {
            return None;
        }
        let layout = self.layout(area);
        let prompt = self.prompt_row(area.width);
        let x = area
            .x
            .saturating_add(prompt.cursor_col)
            .min(area.right().saturating_sub(1));
        Some(Position::new(x, layout.prompt.y))
    }

    fn layout(&self, area: Rect) -> ViewLayout {
        let capacity = area.height.saturating_sub(PROMPT_ROWS);
        let total = self.history_rows(area.width);
        let visible = u16::try_from(total).unwrap_or(u16::MAX).min(capacity);
        let scroll_back = self
            .state
            .scroll_back()
            .min(total.saturating_sub(usize::from(visible)));
        let top = total - usize::from(visible) - scroll_back;
        ViewLayout {
            history: Rect {
                height: visible,
                ..area
            },
            prompt: Rect {
                y: area.y + visible,
                height: PROMPT_ROWS.min(area.height),
                ..area
            },
            top: u16::try_from(top).unwrap_or(u16::MAX),
        }
    }

    /// The prompt row, scrolled horizontally so the cursor stays visible.
    fn prompt_row(&self, width: u16) -> PromptRow {
        let input = self.state.input();
        let prefix_width = self.prompt.width() + 1;
        let available = usize::from(width).saturating_sub(prefix_width).max(1);
        let cursor_width = input.before_cursor().width();

        let mut skip_cols = (cursor_width + 1).saturating_sub(available);
        let mut visible = input.text();
        while skip_cols > 0 {
            let mut chars = visible.chars();
            let Some(ch) = chars.next() else {
                break;
            };
            skip_cols = skip_cols.saturating_sub(ch.width().unwrap_or(0).max(1));
            visible = chars.as_str();
        }
        let skipped = input.text().len() - visible.len();
        let cursor_col = prefix_width + input.text()[skipped..input.cursor().max(skipped)].width();

        let line = Line::from(vec![
            Span::styled(
                self.prompt.to_string(),
                Style::default().fg(colors::prompt()).bold(),
            ),
            Span::raw(" "),
            Span::raw(visible.to_string()),
        ]);
        PromptRow {
            line,
            cursor_col: u16::try_from(cursor_col).unwrap_or(u16::MAX),
        }
    }
}

struct ViewLayout {
    history: Rect,
    prompt: Rect,
    /// First wrapped history row shown.
    top: u16,
}

struct PromptRow {
    line: Line<'static>,
    cursor_col: u16,
}

impl WidgetRef for HistoryView<'_> {
    fn render_ref(&self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }
        let layout = self.layout(area);
        if layout.history.height > 0 {
            self.paragraph()
                .scroll((layout.top, 0))
                .render(layout.history, buf);
        }
        self.prompt_row(area.width).line.render(layout.prompt, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::history::LineClass;
    use pretty_assertions::assert_eq;

    fn row(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf[(x, y)].symbol().to_string())
            .collect::<String>()
            .trim_end()
            .to_string()
    }

    fn render(state: &AppState, width: u16, height: u16) -> Buffer {
        let area = Rect::new(0, 0, width, height);
        let mut buf = Buffer::empty(area);
        HistoryView::new(state, "me$").render_ref(area, &mut buf);
        buf
    }

    #[test]
    fn prompt_follows_short_history() {
        let mut state = AppState::new();
        state.append("hello".into());
        state.set_input("he");
        let buf = render(&state, 20, 5);
        assert_eq!(row(&buf, 0), "hello");
        assert_eq!(row(&buf, 1), "me$ he");
        assert_eq!(row(&buf, 2), "");
    }

    #[test]
    fn tail_stays_visible_when_history_overflows() {
        let mut state = AppState::new();
        state.extend((0..10).map(|i| HistoryLine::plain(format!("line {i}"))));
        let buf = render(&state, 20, 4);
        assert_eq!(row(&buf, 0), "line 7");
        assert_eq!(row(&buf, 2), "line 9");
        assert_eq!(row(&buf, 3), "me$");
    }

    #[test]
    fn scroll_back_shows_older_rows() {
        let mut state = AppState::new();
        state.extend((0..10).map(|i| HistoryLine::plain(format!("line {i}"))));
        state.scroll_up(100);
        let view = HistoryView::new(&state, "me$");
        let area = Rect::new(0, 0, 20, 4);
        assert_eq!(view.max_scroll_back(area), 7);
        let buf = render(&state, 20, 4);
        assert_eq!(row(&buf, 0), "line 0");
    }

    #[test]
    fn long_lines_wrap() {
        let mut state = AppState::new();
        state.append(HistoryLine::styled("abcdefghij", LineClass::Skill));
        let view = HistoryView::new(&state, "me$");
        assert_eq!(view.history_rows(5), 2);
        let buf = render(&state, 5, 4);
        assert_eq!(row(&buf, 0), "abcde");
        assert_eq!(row(&buf, 1), "fghij");
        assert_eq!(buf[(0, 0)].fg, colors::skill());
    }

    #[test]
    fn link_lines_keep_their_visible_width() {
        let line = HistoryLine::link(
            "- ",
            "Codebreaker",
            "https://github.com/JanuZz/codebreaker",
            " - A simple game",
        );
        let rendered = history_line_to_ratatui(&line);
        let text: String = rendered.spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(text, "- Codebreaker - A simple game");

        let mut state = AppState::new();
        state.append(line);
        let view = HistoryView::new(&state, "me$");
        assert_eq!(view.history_rows(40), 1);

        let buf = render(&state, 40, 3);
        assert_eq!(row(&buf, 0), "- Codebreaker - A simple game");
        assert_eq!(row(&buf, 1), "me$");
        assert_eq!(buf[(2, 0)].fg, colors::link());
    }

    #[test]
    fn hyperlink_targets_point_at_visible_labels() {
        let mut state = AppState::new();
        state.append("You can contact me at:".into());
        state.append(HistoryLine::link("   - ", "Email", "mailto:me@example.com", ""));
        state.append(HistoryLine::link(
            "- ",
            "Codebreaker",
            "https://github.com/JanuZz/codebreaker",
            " - A simple game",
        ));
        let view = HistoryView::new(&state, "me$");

        let targets = view.hyperlink_targets(Rect::new(0, 0, 40, 5));
        assert_eq!(
            targets,
            vec![
                HyperlinkTarget {
                    position: Position::new(5, 1),
                    label: "Email".to_string(),
                    href: "mailto:me@example.com".to_string(),
                },
                HyperlinkTarget {
                    position: Position::new(2, 2),
                    label: "Codebreaker".to_string(),
                    href: "https://github.com/JanuZz/codebreaker".to_string(),
                },
            ]
        );

        // Only the newest row fits; the wrapped project line gets no link.
        let targets = view.hyperlink_targets(Rect::new(0, 0, 20, 2));
        assert!(targets.is_empty());
    }

    #[test]
    fn cursor_tracks_input_and_scrolls_horizontally() {
        let mut state = AppState::new();
        state.set_input("abc");
        let area = Rect::new(0, 0, 20, 3);
        let view = HistoryView::new(&state, "me$");
        assert_eq!(view.cursor_position(area), Some(Position::new(7, 0)));

        state.set_input("a".repeat(40));
        let view = HistoryView::new(&state, "me$");
        let pos = view.cursor_position(area).unwrap();
        assert_eq!(pos.x, 19);
    }
}
