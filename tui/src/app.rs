use std::sync::Arc;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;
use std::sync::mpsc::Receiver;
use std::sync::mpsc::RecvTimeoutError;
use std::sync::mpsc::channel;
use std::thread;
use std::time::Duration;
use std::time::Instant;

use color_eyre::eyre::Result;
use crossterm::event::KeyEvent;
use crossterm::event::MouseEvent;
use crossterm::event::MouseEventKind;
use folio_core::Dispatch;
use folio_core::Session;
use folio_core::config::Config;
use ratatui::layout::Rect;

use crate::app_event::AppEvent;
use crate::app_event_sender::AppEventSender;
use crate::composer::Composer;
use crate::composer::InputResult;
use crate::history_view::HistoryView;
use crate::hyperlink::write_hyperlinks;
use crate::tui;

/// Time window for debouncing redraw requests.
const REDRAW_DEBOUNCE: Duration = Duration::from_millis(10);

/// Rows moved per mouse wheel notch.
const WHEEL_ROWS: usize = 3;

pub(crate) struct App {
    session: Session,
    composer: Composer,

    app_event_tx: AppEventSender,
    app_event_rx: Receiver<AppEvent>,

    pending_redraw: Arc<AtomicBool>,

    hyperlinks: bool,

    /// Area of the last drawn frame, used to size page scrolls.
    last_area: Rect,
}

impl App {
    pub(crate) fn new(config: &Config, session: Session, startup_commands: Vec<String>) -> Self {
        let (app_event_tx, app_event_rx) = channel();
        let app_event_tx = AppEventSender::new(app_event_tx);

        let mut app = Self {
            session,
            composer: Composer::new(),
            app_event_tx,
            app_event_rx,
            pending_redraw: Arc::new(AtomicBool::new(false)),
            hyperlinks: config.tui.hyperlinks,
            last_area: Rect::default(),
        };

        let now = Instant::now();
        for command in startup_commands {
            app.session.submit(now, &command);
        }
        app
    }

    /// Spawn a dedicated thread that reads crossterm events and re-publishes
    /// them as `AppEvent`s.
    fn spawn_input_thread(&self) {
        let app_event_tx = self.app_event_tx.clone();
        thread::spawn(move || {
            loop {
                // Poll with a timeout so the event lock is released regularly.
                match crossterm::event::poll(Duration::from_millis(100)) {
                    Ok(true) => {}
                    Ok(false) => continue,
                    Err(err) => {
                        tracing::error!("failed to poll terminal events: {err}");
                        app_event_tx.send(AppEvent::ExitRequest);
                        break;
                    }
                }
                let Ok(event) = crossterm::event::read() else {
                    continue;
                };
                match event {
                    crossterm::event::Event::Key(key_event) => {
                        app_event_tx.send(AppEvent::KeyEvent(key_event));
                    }
                    crossterm::event::Event::Mouse(mouse_event) => {
                        app_event_tx.send(AppEvent::MouseEvent(mouse_event));
                    }
                    crossterm::event::Event::Resize(_, _) => {
                        app_event_tx.send(AppEvent::RequestRedraw);
                    }
                    crossterm::event::Event::Paste(pasted) => {
                        // Many terminals convert newlines to \r when pasting.
                        let pasted = pasted.replace("\r\n", "\n").replace('\r', "\n");
                        app_event_tx.send(AppEvent::Paste(pasted));
                    }
                    _ => {}
                }
            }
        });
    }

    /// Schedule a redraw if one is not already pending.
    fn schedule_redraw(&self) {
        // If the flag was already set another redraw is on its way.
        if self
            .pending_redraw
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return;
        }

        let tx = self.app_event_tx.clone();
        let pending_redraw = self.pending_redraw.clone();
        thread::spawn(move || {
            thread::sleep(REDRAW_DEBOUNCE);
            tx.send(AppEvent::Redraw);
            pending_redraw.store(false, Ordering::SeqCst);
        });
    }

    pub(crate) fn run(&mut self, terminal: &mut tui::Tui) -> Result<()> {
        self.spawn_input_thread();
        self.app_event_tx.send(AppEvent::RequestRedraw);

        loop {
            // Sleep until the next event or the next queued output line,
            // whichever comes first.
            let event = match self.session.next_deadline() {
                Some(deadline) => {
                    let timeout = deadline.saturating_duration_since(Instant::now());
                    match self.app_event_rx.recv_timeout(timeout) {
                        Ok(event) => Some(event),
                        Err(RecvTimeoutError::Timeout) => None,
                        Err(RecvTimeoutError::Disconnected) => break,
                    }
                }
                None => match self.app_event_rx.recv() {
                    Ok(event) => Some(event),
                    Err(_) => break,
                },
            };

            if self.session.tick(Instant::now()) > 0 {
                self.schedule_redraw();
            }

            match event {
                None => {}
                Some(AppEvent::Redraw) => self.draw_next_frame(terminal)?,
                Some(event) => {
                    if self.handle_event(event) {
                        break;
                    }
                }
            }
        }
        Ok(())
    }

    /// Handle every event except `Redraw`. Returns true when the app should
    /// exit.
    fn handle_event(&mut self, event: AppEvent) -> bool {
        match event {
            AppEvent::RequestRedraw | AppEvent::Redraw => {
                self.schedule_redraw();
            }
            AppEvent::KeyEvent(key_event) => return self.handle_key_event(key_event),
            AppEvent::MouseEvent(mouse_event) => self.handle_mouse_event(mouse_event),
            AppEvent::Paste(pasted) => {
                if self
                    .composer
                    .handle_paste(self.session.state_mut().input_mut(), &pasted)
                {
                    self.schedule_redraw();
                }
            }
            AppEvent::ExitRequest => return true,
        }
        false
    }

    fn handle_key_event(&mut self, key_event: KeyEvent) -> bool {
        let (result, needs_redraw) = self
            .composer
            .handle_key_event(self.session.state_mut().input_mut(), key_event);
        match result {
            InputResult::Submitted => match self.session.commit(Instant::now()) {
                Dispatch::NotFound { name } => {
                    tracing::info!("unknown command `{name}`");
                }
                Dispatch::Scheduled { name, handle } => {
                    tracing::debug!(command = %name, dispatch = ?handle.id, "scheduled");
                }
                Dispatch::Empty => {}
            },
            InputResult::ClearScreen => {
                self.session.dispatch(Instant::now(), "clear");
            }
            InputResult::Interrupt { discarded_input } => {
                // Like a shell: interrupt running output first, exit only
                // from an idle, empty prompt.
                if self.session.is_dispatching() {
                    self.session.cancel_pending();
                    self.schedule_redraw();
                } else if !discarded_input {
                    return true;
                }
            }
            InputResult::Exit => return true,
            InputResult::ScrollUp => self.scroll_up(self.page_rows()),
            InputResult::ScrollDown => self.scroll_down(self.page_rows()),
            InputResult::None => {}
        }
        if needs_redraw {
            self.schedule_redraw();
        }
        false
    }

    fn handle_mouse_event(&mut self, mouse_event: MouseEvent) {
        match mouse_event.kind {
            MouseEventKind::ScrollUp => self.scroll_up(WHEEL_ROWS),
            MouseEventKind::ScrollDown => self.scroll_down(WHEEL_ROWS),
            _ => return,
        }
        self.schedule_redraw();
    }

    fn page_rows(&self) -> usize {
        usize::from(self.last_area.height.saturating_sub(2)).max(1)
    }

    fn scroll_up(&mut self, rows: usize) {
        let max = HistoryView::new(self.session.state(), self.session.prompt())
            .max_scroll_back(self.last_area);
        let state = self.session.state_mut();
        state.scroll_up(rows);
        state.clamp_scroll_back(max);
    }

    fn scroll_down(&mut self, rows: usize) {
        self.session.state_mut().scroll_down(rows);
    }

    fn draw_next_frame(&mut self, terminal: &mut tui::Tui) -> Result<()> {
        let size = terminal.size()?;
        let area = Rect::new(0, 0, size.width, size.height);
        self.last_area = area;

        let max = HistoryView::new(self.session.state(), self.session.prompt())
            .max_scroll_back(area);
        self.session.state_mut().clamp_scroll_back(max);

        let view = HistoryView::new(self.session.state(), self.session.prompt());
        let cursor = view.cursor_position(area);
        let targets = if self.hyperlinks {
            view.hyperlink_targets(area)
        } else {
            Vec::new()
        };
        terminal.draw(|frame| {
            if let Some(position) = cursor {
                frame.set_cursor_position(position);
            }
            frame.render_widget_ref(view, frame.area());
        })?;
        write_hyperlinks(terminal.backend_mut(), &targets, cursor)?;
        Ok(())
    }
}
