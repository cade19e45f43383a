//! The single-line composer: key handling for the input row.
//!
//! The buffer itself lives in [`AppState`](folio_core::state::AppState) so the
//! session can echo and take it on commit. The composer only edits it and
//! keeps the Up/Down recall list.

use crossterm::event::KeyCode;
use crossterm::event::KeyEvent;
use crossterm::event::KeyEventKind;
use crossterm::event::KeyModifiers;
use folio_core::input::InputBuffer;

use crate::composer_history::ComposerHistory;

/// What the app should do after a key was handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InputResult {
    /// Enter: commit the buffer.
    Submitted,
    /// Ctrl+L: same as typing `clear`.
    ClearScreen,
    /// Ctrl+C. `discarded_input` is false when the buffer was already empty.
    Interrupt { discarded_input: bool },
    Exit,
    ScrollUp,
    ScrollDown,
    None,
}

#[derive(Debug, Default)]
pub(crate) struct Composer {
    history: ComposerHistory,
}

impl Composer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle a key event. Returns the result and whether a redraw is needed.
    pub fn handle_key_event(
        &mut self,
        input: &mut InputBuffer,
        key_event: KeyEvent,
    ) -> (InputResult, bool) {
        if key_event.kind == KeyEventKind::Release {
            return (InputResult::None, false);
        }

        let ctrl = key_event.modifiers.contains(KeyModifiers::CONTROL);
        match key_event.code {
            KeyCode::Enter => {
                self.history.record(input.text());
                (InputResult::Submitted, true)
            }
            KeyCode::Char('c') if ctrl => {
                let discarded_input = !input.take().is_empty();
                self.history.reset_navigation();
                (InputResult::Interrupt { discarded_input }, discarded_input)
            }
            KeyCode::Char('d') if ctrl => {
                if input.is_empty() {
                    return (InputResult::Exit, false);
                }
                input.delete();
                (InputResult::None, true)
            }
            KeyCode::Char('l') if ctrl => (InputResult::ClearScreen, true),
            KeyCode::PageUp => (InputResult::ScrollUp, true),
            KeyCode::PageDown => (InputResult::ScrollDown, true),
            KeyCode::Up => match self.history.navigate_up(input.text()) {
                Some(text) => {
                    input.set(text);
                    (InputResult::None, true)
                }
                None => (InputResult::None, false),
            },
            KeyCode::Down => match self.history.navigate_down() {
                Some(text) => {
                    input.set(text);
                    (InputResult::None, true)
                }
                None => (InputResult::None, false),
            },
            _ => {
                let changed = Self::edit(input, key_event);
                if changed {
                    self.history.reset_navigation();
                }
                (InputResult::None, changed)
            }
        }
    }

    /// Pasted text goes in at the cursor with newlines flattened.
    pub fn handle_paste(&mut self, input: &mut InputBuffer, pasted: &str) -> bool {
        if pasted.is_empty() {
            return false;
        }
        input.insert_str(pasted);
        self.history.reset_navigation();
        true
    }

    fn edit(input: &mut InputBuffer, key_event: KeyEvent) -> bool {
        let ctrl = key_event.modifiers.contains(KeyModifiers::CONTROL);
        let alt = key_event.modifiers.contains(KeyModifiers::ALT);
        match key_event.code {
            KeyCode::Char('a') if ctrl => input.move_home(),
            KeyCode::Char('e') if ctrl => input.move_end(),
            KeyCode::Char('b') if ctrl => input.move_left(),
            KeyCode::Char('f') if ctrl => input.move_right(),
            KeyCode::Char('u') if ctrl => input.kill_to_start(),
            KeyCode::Char('w') if ctrl => input.kill_word_back(),
            KeyCode::Backspace if alt => input.kill_word_back(),
            KeyCode::Char('h') if ctrl => input.backspace(),
            KeyCode::Char(_) if ctrl || alt => return false,
            KeyCode::Char(ch) => input.insert_char(ch),
            KeyCode::Backspace => input.backspace(),
            KeyCode::Delete => input.delete(),
            KeyCode::Left => input.move_left(),
            KeyCode::Right => input.move_right(),
            KeyCode::Home => input.move_home(),
            KeyCode::End => input.move_end(),
            _ => return false,
        }
        true
    }
}
