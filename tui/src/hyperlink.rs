//! OSC 8 hyperlinks, written to the terminal after a frame is drawn.
//!
//! The frame buffer only ever holds the plain label so wrapping and cell
//! widths stay correct. The escape sequence is then printed over the same
//! cells, which leaves the visible text unchanged.

use std::io;
use std::io::Write;

use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::style::Attribute;
use crossterm::style::Print;
use crossterm::style::ResetColor;
use crossterm::style::SetAttribute;
use crossterm::style::SetForegroundColor;
use ratatui::layout::Position;

use crate::colors;

/// A link label on screen: where it starts, what it says and where it goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HyperlinkTarget {
    pub position: Position,
    pub label: String,
    pub href: String,
}

/// Wrap `label` in an OSC 8 hyperlink pointing at `href`.
pub(crate) fn osc8(label: &str, href: &str) -> String {
    format!("\u{1b}]8;;{href}\u{7}{label}\u{1b}]8;;\u{7}")
}

/// Reprint every target as a hyperlink, then put the cursor back at
/// `cursor`.
pub(crate) fn write_hyperlinks<W: Write>(
    writer: &mut W,
    targets: &[HyperlinkTarget],
    cursor: Option<Position>,
) -> io::Result<()> {
    if targets.is_empty() {
        return Ok(());
    }
    for target in targets {
        queue!(
            writer,
            MoveTo(target.position.x, target.position.y),
            SetForegroundColor(colors::link().into()),
            SetAttribute(Attribute::Underlined),
            Print(osc8(&target.label, &target.href)),
            SetAttribute(Attribute::Reset),
            ResetColor
        )?;
    }
    if let Some(position) = cursor {
        queue!(writer, MoveTo(position.x, position.y))?;
    }
    writer.flush()
}
