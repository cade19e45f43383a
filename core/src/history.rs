//! The history model: a tagged line type and the append-only list that holds
//! every line shown above the prompt.

use strum_macros::AsRefStr;
use strum_macros::Display;
use strum_macros::EnumString;

/// Style tag attached to a [`HistoryLine::Styled`] line. The renderer maps
/// each class to a theme color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumString, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum LineClass {
    Skill,
    Error,
    Banner,
}

/// One rendered row of output.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HistoryLine {
    Plain(String),
    Styled {
        text: String,
        class: LineClass,
    },
    /// A single hyperlink with optional text on either side, e.g.
    /// `"   - " + [Email](mailto:...) + " - address"`.
    Link {
        lead: String,
        label: String,
        href: String,
        trail: String,
    },
    /// Echo of a committed input. Never animated.
    Echo {
        prompt: String,
        input: String,
    },
}

impl HistoryLine {
    pub fn plain(text: impl Into<String>) -> Self {
        Self::Plain(text.into())
    }

    pub fn styled(text: impl Into<String>, class: LineClass) -> Self {
        Self::Styled {
            text: text.into(),
            class,
        }
    }

    pub fn link(
        lead: impl Into<String>,
        label: impl Into<String>,
        href: impl Into<String>,
        trail: impl Into<String>,
    ) -> Self {
        Self::Link {
            lead: lead.into(),
            label: label.into(),
            href: href.into(),
            trail: trail.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self::styled(text, LineClass::Error)
    }

    pub fn class(&self) -> Option<LineClass> {
        match self {
            Self::Styled { class, .. } => Some(*class),
            _ => None,
        }
    }

    pub fn is_error(&self) -> bool {
        self.class() == Some(LineClass::Error)
    }

    pub fn href(&self) -> Option<&str> {
        match self {
            Self::Link { href, .. } => Some(href),
            _ => None,
        }
    }

    /// The visible text of the line with all styling and link targets
    /// dropped.
    pub fn text(&self) -> String {
        match self {
            Self::Plain(text) | Self::Styled { text, .. } => text.clone(),
            Self::Link {
                lead, label, trail, ..
            } => format!("{lead}{label}{trail}"),
            Self::Echo { prompt, input } => format!("{prompt} {input}"),
        }
    }
}

impl From<&str> for HistoryLine {
    fn from(value: &str) -> Self {
        Self::Plain(value.to_string())
    }
}

impl From<String> for HistoryLine {
    fn from(value: String) -> Self {
        Self::Plain(value)
    }
}

/// Append-only list of lines. The only way to remove lines is [`History::clear`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct History {
    lines: Vec<HistoryLine>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, line: HistoryLine) {
        self.lines.push(line);
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn lines(&self) -> &[HistoryLine] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn last(&self) -> Option<&HistoryLine> {
        self.lines.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, HistoryLine> {
        self.lines.iter()
    }
}

impl<'a> IntoIterator for &'a History {
    type Item = &'a HistoryLine;
    type IntoIter = std::slice::Iter<'a, HistoryLine>;

    fn into_iter(self) -> Self::IntoIter {
        self.lines.iter()
    }
}
