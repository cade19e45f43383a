use crossterm::event::KeyEvent;
use crossterm::event::MouseEvent;

#[derive(Debug)]
pub(crate) enum AppEvent {
    /// Request a redraw which will be debounced by the [`crate::app::App`].
    RequestRedraw,

    /// Actually draw the next frame.
    Redraw,

    KeyEvent(KeyEvent),

    MouseEvent(MouseEvent),

    /// Text pasted from the terminal clipboard.
    Paste(String),

    ExitRequest,
}
