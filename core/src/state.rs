use crate::command::Effect;
use crate::history::History;
use crate::history::HistoryLine;
use crate::input::InputBuffer;

/// The application state owned by the rendering layer: history, the input
/// buffer and how far the view is scrolled back from the newest line.
#[derive(Clone, Debug, Default)]
pub struct AppState {
    history: History,
    input: InputBuffer,
    /// Rows between the bottom of the view and the newest row. Zero means
    /// the view follows the tail.
    scroll_back: usize,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a line and snap the view back to the newest row.
    pub fn append(&mut self, line: HistoryLine) {
        self.history.push(line);
        self.scroll_back = 0;
    }

    pub fn extend(&mut self, lines: impl IntoIterator<Item = HistoryLine>) {
        for line in lines {
            self.append(line);
        }
    }

    pub fn clear(&mut self) {
        self.history.clear();
        self.scroll_back = 0;
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input.set(text);
    }

    pub fn apply(&mut self, effect: Effect) {
        match effect {
            Effect::Append(line) => self.append(line),
            Effect::Clear => self.clear(),
        }
    }

    /// Echo the buffer under `prompt` and return the committed text. The
    /// buffer is left empty.
    pub fn commit(&mut self, prompt: &str) -> String {
        let input = self.input.take();
        self.append(HistoryLine::Echo {
            prompt: prompt.to_string(),
            input: input.clone(),
        });
        input
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn input(&self) -> &InputBuffer {
        &self.input
    }

    pub fn input_mut(&mut self) -> &mut InputBuffer {
        &mut self.input
    }

    pub fn scroll_back(&self) -> usize {
        self.scroll_back
    }

    pub fn follows_tail(&self) -> bool {
        self.scroll_back == 0
    }

    pub fn scroll_up(&mut self, rows: usize) {
        self.scroll_back = self.scroll_back.saturating_add(rows);
    }

    pub fn scroll_down(&mut self, rows: usize) {
        self.scroll_back = self.scroll_back.saturating_sub(rows);
    }

    /// Cap the scroll-back at what the renderer can actually show.
    pub fn clamp_scroll_back(&mut self, max: usize) {
        self.scroll_back = self.scroll_back.min(max);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn commit_echoes_and_resets_buffer() {
        let mut state = AppState::new();
        state.set_input("whoami");
        let committed = state.commit("me$");
        assert_eq!(committed, "whoami");
        assert!(state.input().is_empty());
        assert_eq!(
            state.history().last(),
            Some(&HistoryLine::Echo {
                prompt: "me$".to_string(),
                input: "whoami".to_string(),
            })
        );
    }

    #[test]
    fn append_returns_view_to_tail() {
        let mut state = AppState::new();
        state.extend(["a".into(), "b".into()]);
        state.scroll_up(5);
        assert!(!state.follows_tail());
        state.append("c".into());
        assert!(state.follows_tail());
    }

    #[test]
    fn clear_resets_length_regardless_of_size() {
        let mut state = AppState::new();
        state.extend((0..50).map(|i| HistoryLine::plain(i.to_string())));
        state.apply(Effect::Clear);
        assert_eq!(state.history().len(), 0);
    }

    #[test]
    fn scroll_back_is_clamped() {
        let mut state = AppState::new();
        state.scroll_up(10);
        state.clamp_scroll_back(3);
        assert_eq!(state.scroll_back(), 3);
        state.scroll_down(7);
        assert_eq!(state.scroll_back(), 0);
    }
}
