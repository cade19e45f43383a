/// Shell-style Up/Down recall over the inputs committed during this session.
/// Nothing is persisted across runs.
#[derive(Debug, Default)]
pub(crate) struct ComposerHistory {
    /// Committed inputs, newest at END.
    entries: Vec<String>,

    /// Index into `entries` while browsing. `None` means the user is editing
    /// a fresh line.
    cursor: Option<usize>,

    /// What was in the buffer before browsing started, restored when the
    /// user walks back past the newest entry.
    draft: Option<String>,
}

impl ComposerHistory {
    /// Record a committed input. Blank lines and immediate repeats are
    /// skipped. Browsing always ends on commit.
    pub fn record(&mut self, text: &str) {
        self.cursor = None;
        self.draft = None;
        if text.trim().is_empty() {
            return;
        }
        if self.entries.last().is_some_and(|last| last == text) {
            return;
        }
        self.entries.push(text.to_string());
    }

    /// Step to an older entry. `current` is the buffer content, saved as the
    /// draft when browsing starts. Returns the text to show, if it changed.
    pub fn navigate_up(&mut self, current: &str) -> Option<String> {
        if self.entries.is_empty() {
            return None;
        }
        let next = match self.cursor {
            None => {
                self.draft = Some(current.to_string());
                self.entries.len() - 1
            }
            Some(0) => return None,
            Some(idx) => idx - 1,
        };
        self.cursor = Some(next);
        self.entries.get(next).cloned()
    }

    /// Step to a newer entry, or back to the draft past the newest one.
    pub fn navigate_down(&mut self) -> Option<String> {
        let idx = self.cursor?;
        if idx + 1 < self.entries.len() {
            self.cursor = Some(idx + 1);
            return self.entries.get(idx + 1).cloned();
        }
        self.cursor = None;
        Some(self.draft.take().unwrap_or_default())
    }

    /// Stop browsing without touching the buffer, e.g. after an edit.
    pub fn reset_navigation(&mut self) {
        self.cursor = None;
        self.draft = None;
    }
}
