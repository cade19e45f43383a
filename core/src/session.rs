//! A running terminal session: the registry, the app state and the output
//! queue, wired together by commit and dispatch.

use std::time::Duration;
use std::time::Instant;

use crate::builtins::built_in_registry;
use crate::command::Context;
use crate::config::Config;
use crate::error::Result;
use crate::history::HistoryLine;
use crate::profile::Profile;
use crate::queue::DispatchHandle;
use crate::queue::OutputQueue;
use crate::queue::OverlapPolicy;
use crate::registry::CommandRegistry;
use crate::state::AppState;
use crate::tokenizer::tokenize;

/// What a single dispatch did.
#[derive(Debug)]
pub enum Dispatch {
    /// Blank input; nothing happened.
    Empty,
    /// The name is not registered; an error line was appended.
    NotFound { name: String },
    /// The command ran and its output was queued. Steps due immediately have
    /// already been applied.
    Scheduled {
        name: String,
        handle: DispatchHandle,
    },
}

#[derive(Clone, Debug)]
pub struct SessionOptions {
    pub prompt: String,
    pub stagger: Duration,
    pub overlap: OverlapPolicy,
}

impl From<&Config> for SessionOptions {
    fn from(config: &Config) -> Self {
        Self {
            prompt: config.tui.prompt.clone(),
            stagger: config.tui.stagger,
            overlap: config.tui.overlap,
        }
    }
}

pub struct Session {
    registry: CommandRegistry,
    state: AppState,
    queue: OutputQueue,
    prompt: String,
    stagger: Duration,
}

impl Session {
    pub fn new(registry: CommandRegistry, options: SessionOptions) -> Self {
        Self {
            registry,
            state: AppState::new(),
            queue: OutputQueue::new(options.overlap),
            prompt: options.prompt,
            stagger: options.stagger,
        }
    }

    /// Session over the built-in commands, seeded with the intro banner when
    /// the config asks for it.
    pub fn from_config(config: &Config, profile: Profile) -> Result<Self> {
        let intro = config.tui.show_banner.then(|| profile.intro_lines());
        let registry = built_in_registry(profile)?;
        let mut session = Self::new(registry, SessionOptions::from(config));
        if let Some(lines) = intro {
            session.state.extend(lines);
        }
        Ok(session)
    }

    /// The Enter key: echo the buffer, dispatch it, leave the buffer empty.
    pub fn commit(&mut self, now: Instant) -> Dispatch {
        let input = self.state.commit(&self.prompt);
        self.dispatch(now, &input)
    }

    /// Type `line` into the buffer and commit it.
    pub fn submit(&mut self, now: Instant, line: &str) -> Dispatch {
        self.state.set_input(line);
        self.commit(now)
    }

    /// Run `input` against the registry without echoing it.
    pub fn dispatch(&mut self, now: Instant, input: &str) -> Dispatch {
        let Some(invocation) = tokenize(input) else {
            return Dispatch::Empty;
        };

        let Some(command) = self.registry.get(&invocation.name) else {
            tracing::debug!(name = %invocation.name, "command not found");
            self.state.append(HistoryLine::error(format!(
                "Command not found: {}",
                invocation.name
            )));
            return Dispatch::NotFound {
                name: invocation.name,
            };
        };

        let ctx = Context {
            args: &invocation.args,
            registry: &self.registry,
            stagger: self.stagger,
        };
        let output = command.handler().execute(&ctx);
        tracing::info!(
            name = %invocation.name,
            steps = output.steps().len(),
            "dispatching command"
        );

        let handle = self.queue.schedule(now, output);
        self.tick(now);
        Dispatch::Scheduled {
            name: invocation.name,
            handle,
        }
    }

    /// Apply every queued effect due at `now`. Returns how many were applied.
    pub fn tick(&mut self, now: Instant) -> usize {
        let effects = self.queue.drain_due(now);
        let applied = effects.len();
        for effect in effects {
            self.state.apply(effect);
        }
        applied
    }

    /// Drop all pending staggered output.
    pub fn cancel_pending(&mut self) {
        self.queue.cancel_all();
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.queue.next_deadline()
    }

    /// True while staggered output is still pending.
    pub fn is_dispatching(&self) -> bool {
        !self.queue.is_idle()
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut AppState {
        &mut self.state
    }

    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn stagger(&self) -> Duration {
        self.stagger
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::LineClass;
    use pretty_assertions::assert_eq;

    const STAGGER: Duration = Duration::from_millis(100);

    fn session() -> Session {
        let registry = built_in_registry(Profile::default()).unwrap();
        Session::new(
            registry,
            SessionOptions {
                prompt: "JanuZz@github:~$".to_string(),
                stagger: STAGGER,
                overlap: OverlapPolicy::Interleave,
            },
        )
    }

    /// Dispatch `input` and let all of its staggered output land.
    fn run_to_completion(session: &mut Session, input: &str) -> Vec<HistoryLine> {
        let before = session.state().history().len();
        let t0 = Instant::now();
        session.dispatch(t0, input);
        session.tick(t0 + Duration::from_secs(60));
        session.state().history().lines()[before.min(session.state().history().len())..].to_vec()
    }

    #[test]
    fn every_registered_command_produces_output_without_errors() {
        let names: Vec<String> = session().registry().names().map(str::to_string).collect();
        for name in names {
            let mut session = session();
            session.state_mut().append("seed".into());
            let appended = run_to_completion(&mut session, &name);
            if name == "clear" {
                assert!(session.state().history().is_empty());
                continue;
            }
            assert!(!appended.is_empty(), "{name} appended nothing");
            assert!(!appended.iter().any(HistoryLine::is_error), "{name} errored");
        }
    }

    #[test]
    fn unknown_command_appends_exactly_one_error() {
        let mut session = session();
        let appended = run_to_completion(&mut session, "foo");
        assert_eq!(appended, vec![HistoryLine::error("Command not found: foo")]);
        assert_eq!(appended[0].text(), "Command not found: foo");
    }

    #[test]
    fn lookup_is_case_sensitive() {
        let mut session = session();
        let appended = run_to_completion(&mut session, "HELP");
        assert_eq!(appended[0].text(), "Command not found: HELP");
    }

    #[test]
    fn empty_dispatch_leaves_history_alone() {
        let mut session = session();
        session.state_mut().append("seed".into());
        assert!(matches!(session.dispatch(Instant::now(), ""), Dispatch::Empty));
        assert!(matches!(session.dispatch(Instant::now(), "   "), Dispatch::Empty));
        assert_eq!(session.state().history().len(), 1);
    }

    #[test]
    fn clear_resets_any_history() {
        let mut session = session();
        for _ in 0..3 {
            run_to_completion(&mut session, "skills");
        }
        assert!(session.state().history().len() > 20);
        session.submit(Instant::now(), "clear");
        assert_eq!(session.state().history().len(), 0);
    }

    #[test]
    fn help_lists_every_command_once() {
        let mut session = session();
        let appended = run_to_completion(&mut session, "help");
        let expected: Vec<String> = session
            .registry()
            .iter()
            .map(|c| format!("{} - {}", c.name(), c.description()))
            .collect();
        let got: Vec<String> = appended.iter().map(HistoryLine::text).collect();
        assert_eq!(got, expected);
    }

    #[test]
    fn skills_arrive_staggered() {
        let mut session = session();
        let t0 = Instant::now();
        session.dispatch(t0, "skills");
        assert_eq!(session.state().history().len(), 1);
        assert!(session.is_dispatching());
        assert_eq!(session.next_deadline(), Some(t0 + STAGGER));

        session.tick(t0 + STAGGER * 8);
        let lines = session.state().history().lines();
        assert_eq!(lines.len(), 9);
        assert!(lines.iter().all(|l| l.class() == Some(LineClass::Skill)));
        assert!(!session.is_dispatching());
    }

    #[test]
    fn arguments_are_ignored() {
        let mut with_args = session();
        let mut without = session();
        assert_eq!(
            run_to_completion(&mut with_args, "whoami --verbose please"),
            run_to_completion(&mut without, "whoami")
        );
    }

    #[test]
    fn output_is_identical_after_clear() {
        let mut session = session();
        let t0 = Instant::now();
        session.submit(t0, "projects");
        session.tick(t0 + Duration::from_secs(1));
        let first = session.state().history().clone();

        session.submit(t0, "clear");
        session.submit(t0, "projects");
        session.tick(t0 + Duration::from_secs(1));
        assert_eq!(session.state().history(), &first);
    }

    #[test]
    fn whoami_scenario() {
        let mut session = session();
        session.state_mut().input_mut().insert_str("whoami");
        session.commit(Instant::now());

        let texts: Vec<String> = session
            .state()
            .history()
            .iter()
            .map(HistoryLine::text)
            .collect();
        assert_eq!(texts.len(), 5);
        assert_eq!(texts[0], "JanuZz@github:~$ whoami");
        assert!(texts[1].starts_with("My name is Janus"));
        assert!(texts[4].starts_with("I'm currently looking for an internship"));
        assert!(session.state().input().is_empty());
        assert_eq!(session.prompt(), "JanuZz@github:~$");
    }

    #[test]
    fn cancel_pending_stops_staggered_output() {
        let mut session = session();
        let t0 = Instant::now();
        session.dispatch(t0, "skills");
        session.cancel_pending();
        assert_eq!(session.tick(t0 + Duration::from_secs(5)), 0);
        assert_eq!(session.state().history().len(), 1);
    }

    #[test]
    fn banner_seeds_history_from_config() {
        let config = Config::load_from_base_config_with_overrides(
            Default::default(),
            Default::default(),
            std::path::PathBuf::from("/tmp/folio"),
        );
        let session = Session::from_config(&config, Profile::default()).unwrap();
        assert_eq!(
            session.state().history().len(),
            Profile::default().intro_lines().len()
        );
    }
}
