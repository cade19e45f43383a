use std::time::Duration;
use std::time::Instant;

use folio_core::Session;
use folio_core::builtins::built_in_registry;
use folio_core::profile::Profile;
use folio_core::queue::OverlapPolicy;
use folio_core::session::SessionOptions;
use folio_tui::HistoryView;
use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::buffer::Buffer;

const PROMPT: &str = "JanuZz@github:~$";

fn session(stagger: Duration) -> Session {
    let registry = built_in_registry(Profile::default()).expect("registry");
    Session::new(
        registry,
        SessionOptions {
            prompt: PROMPT.to_string(),
            stagger,
            overlap: OverlapPolicy::Interleave,
        },
    )
}

fn draw(session: &Session, width: u16, height: u16) -> Buffer {
    let mut terminal = Terminal::new(TestBackend::new(width, height)).expect("terminal");
    terminal
        .draw(|frame| {
            let view = HistoryView::new(session.state(), session.prompt());
            frame.render_widget_ref(view, frame.area());
        })
        .expect("draw");
    terminal.backend().buffer().clone()
}

fn rows(buf: &Buffer) -> Vec<String> {
    (0..buf.area.height)
        .map(|y| {
            (0..buf.area.width)
                .map(|x| buf[(x, y)].symbol().to_string())
                .collect::<String>()
                .trim_end()
                .to_string()
        })
        .collect()
}

#[test]
fn whoami_renders_four_sentences_and_keeps_the_prompt() {
    let mut session = session(Duration::ZERO);
    session.state_mut().set_input("whoami");
    session.commit(Instant::now());

    let rows = rows(&draw(&session, 200, 10));
    assert_eq!(rows[0], format!("{PROMPT} whoami"));
    assert!(rows[1].starts_with("My name is Janus"), "row was {:?}", rows[1]);
    assert_eq!(rows[5], PROMPT);
    assert!(rows[6..].iter().all(String::is_empty));
}

#[test]
fn unknown_command_renders_error_line() {
    let mut session = session(Duration::ZERO);
    session.submit(Instant::now(), "foo");

    let rows = rows(&draw(&session, 40, 5));
    assert_eq!(rows[0], format!("{PROMPT} foo"));
    assert_eq!(rows[1], "Command not found: foo");
    assert_eq!(rows[2], PROMPT);
}

#[test]
fn newest_line_stays_visible_as_staggered_output_arrives() {
    let mut session = session(Duration::from_millis(100));
    let start = Instant::now();
    session.submit(start, "skills");
    session.submit(start, "help");

    for step in 1..10u64 {
        session.tick(start + Duration::from_millis(100 * step));
        let buf = draw(&session, 60, 6);
        let rows = rows(&buf);
        let newest = session.state().history().last().expect("history").text();
        assert_eq!(rows[4], newest);
        assert_eq!(rows[5], PROMPT);
    }
    assert!(!session.is_dispatching());
}

#[test]
fn clear_leaves_only_the_prompt_row() {
    let mut session = session(Duration::ZERO);
    session.submit(Instant::now(), "skills");
    session.submit(Instant::now(), "clear");

    let rows = rows(&draw(&session, 40, 4));
    assert_eq!(rows[0], PROMPT);
    assert!(rows[1..].iter().all(String::is_empty));
}

#[test]
fn contact_links_are_targeted_on_their_own_rows() {
    let mut session = session(Duration::ZERO);
    session.submit(Instant::now(), "contact");

    let area = ratatui::layout::Rect::new(0, 0, 80, 6);
    let view = HistoryView::new(session.state(), session.prompt());
    assert_eq!(view.history_rows(area.width), 4);
    let targets = view.hyperlink_targets(area);
    assert_eq!(targets.len(), 2);
    assert_eq!(
        targets
            .iter()
            .map(|t| (t.position.x, t.position.y))
            .collect::<Vec<_>>(),
        vec![(5, 2), (5, 3)]
    );
    assert!(targets[0].href.starts_with("mailto:"));

    let rows = rows(&draw(&session, 80, 6));
    assert!(rows[2].starts_with("   - "));
    assert!(!rows[2].contains('\u{1b}'));
    assert_eq!(rows[4], PROMPT);
}

#[test]
fn wrapped_project_lines_are_not_targeted() {
    let mut session = session(Duration::ZERO);
    session.submit(Instant::now(), "projects");

    let area = ratatui::layout::Rect::new(0, 0, 60, 20);
    let view = HistoryView::new(session.state(), session.prompt());
    assert!(view.history_rows(area.width) > 4);
    assert!(view.hyperlink_targets(area).is_empty());
}
