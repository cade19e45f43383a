//! The built-in portfolio commands.

use std::sync::Arc;

use crate::command::Command;
use crate::command::CommandOutput;
use crate::command::Context;
use crate::error::Result;
use crate::history::HistoryLine;
use crate::history::LineClass;
use crate::profile::Profile;
use crate::registry::CommandRegistry;

struct Clear;

impl Command for Clear {
    fn execute(&self, _ctx: &Context<'_>) -> CommandOutput {
        CommandOutput::new().clear()
    }
}

/// Lists every registered command, including ones registered after `help`.
struct Help;

impl Command for Help {
    fn execute(&self, ctx: &Context<'_>) -> CommandOutput {
        let lines = ctx
            .registry
            .iter()
            .map(|command| format!("{} - {}", command.name(), command.description()));
        CommandOutput::new().staggered(lines, ctx.stagger)
    }
}

struct Skills(Arc<Profile>);

impl Command for Skills {
    fn execute(&self, ctx: &Context<'_>) -> CommandOutput {
        let lines = self
            .0
            .skills
            .iter()
            .map(|skill| HistoryLine::styled(skill, LineClass::Skill));
        CommandOutput::new().staggered(lines, ctx.stagger)
    }
}

struct Whoami(Arc<Profile>);

impl Command for Whoami {
    fn execute(&self, _ctx: &Context<'_>) -> CommandOutput {
        self.0
            .about
            .iter()
            .fold(CommandOutput::new(), |output, sentence| {
                output.line(sentence.as_str())
            })
    }
}

struct Projects(Arc<Profile>);

impl Command for Projects {
    fn execute(&self, ctx: &Context<'_>) -> CommandOutput {
        CommandOutput::new().staggered(self.0.project_lines(), ctx.stagger)
    }
}

struct Contact(Arc<Profile>);

impl Command for Contact {
    fn execute(&self, _ctx: &Context<'_>) -> CommandOutput {
        CommandOutput::new()
            .line("You can contact me at:")
            .line(self.0.email_line(true))
            .line(self.0.linkedin_line())
    }
}

struct Github(Arc<Profile>);

impl Command for Github {
    fn execute(&self, _ctx: &Context<'_>) -> CommandOutput {
        CommandOutput::new()
            .line("My github profile:")
            .line(self.0.github_line())
    }
}

/// Build the registry of built-in commands over `profile`.
pub fn built_in_registry(profile: Profile) -> Result<CommandRegistry> {
    let profile = Arc::new(profile);
    let mut registry = CommandRegistry::new();
    registry.register("clear", "Clear the terminal screen", Clear)?;
    registry.register("help", "List all available commands", Help)?;
    registry.register(
        "skills",
        "List some of the things i'm good at",
        Skills(Arc::clone(&profile)),
    )?;
    registry.register(
        "whoami",
        "Display information about me",
        Whoami(Arc::clone(&profile)),
    )?;
    registry.register(
        "projects",
        "List all my public projects",
        Projects(Arc::clone(&profile)),
    )?;
    registry.register(
        "contact",
        "Display my contact information",
        Contact(Arc::clone(&profile)),
    )?;
    registry.register("github", "Display my github profile", Github(profile))?;
    Ok(registry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::Effect;
    use pretty_assertions::assert_eq;
    use std::time::Duration;

    const STAGGER: Duration = Duration::from_millis(100);

    fn run(registry: &CommandRegistry, name: &str) -> CommandOutput {
        let command = registry.get(name).unwrap();
        command.handler().execute(&Context {
            args: &[],
            registry,
            stagger: STAGGER,
        })
    }

    #[test]
    fn registry_order_matches_the_site() {
        let registry = built_in_registry(Profile::default()).unwrap();
        let names: Vec<&str> = registry.names().collect();
        assert_eq!(
            names,
            vec!["clear", "help", "skills", "whoami", "projects", "contact", "github"]
        );
    }

    #[test]
    fn help_covers_the_whole_registry() {
        let registry = built_in_registry(Profile::default()).unwrap();
        let output = run(&registry, "help");
        let lines: Vec<String> = output.appended_lines().map(HistoryLine::text).collect();
        let expected: Vec<String> = registry
            .iter()
            .map(|c| format!("{} - {}", c.name(), c.description()))
            .collect();
        assert_eq!(lines, expected);
        assert_eq!(output.steps()[1].delay, STAGGER);
    }

    #[test]
    fn skills_are_nine_tagged_lines() {
        let registry = built_in_registry(Profile::default()).unwrap();
        let output = run(&registry, "skills");
        let lines: Vec<&HistoryLine> = output.appended_lines().collect();
        assert_eq!(lines.len(), 9);
        assert!(lines.iter().all(|l| l.class() == Some(LineClass::Skill)));
        assert_eq!(lines[0].text(), "TypeScript");
        assert_eq!(lines[8].text(), "Learning new things ;)");
    }

    #[test]
    fn whoami_is_not_staggered() {
        let registry = built_in_registry(Profile::default()).unwrap();
        let output = run(&registry, "whoami");
        assert_eq!(output.steps().len(), 4);
        assert!(output.steps().iter().all(|s| s.delay.is_zero()));
    }

    #[test]
    fn projects_render_as_links() {
        let registry = built_in_registry(Profile::default()).unwrap();
        let output = run(&registry, "projects");
        let hrefs: Vec<&str> = output.appended_lines().filter_map(HistoryLine::href).collect();
        assert_eq!(
            hrefs,
            vec![
                "https://github.com/JanuZz/codebreaker",
                "https://januzz.github.io/bueskydning-scorecard/",
                "https://github.com/JanuZz/GrammarAnalyser",
            ]
        );
    }

    #[test]
    fn contact_and_github_lead_with_a_label() {
        let registry = built_in_registry(Profile::default()).unwrap();
        let contact: Vec<String> = run(&registry, "contact")
            .appended_lines()
            .map(HistoryLine::text)
            .collect();
        assert_eq!(contact[0], "You can contact me at:");
        assert_eq!(contact.len(), 3);
        let github: Vec<String> = run(&registry, "github")
            .appended_lines()
            .map(HistoryLine::text)
            .collect();
        assert_eq!(github, vec!["My github profile:", "   - januzz.github.io"]);
    }

    #[test]
    fn clear_is_a_single_effect() {
        let registry = built_in_registry(Profile::default()).unwrap();
        assert_eq!(run(&registry, "clear").into_steps()[0].effect, Effect::Clear);
    }
}
