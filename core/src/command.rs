//! The command seam: what a command receives and what it hands back.
//!
//! Commands never touch the history directly. They return a
//! [`CommandOutput`], a plan of timed [`Effect`]s which the session feeds
//! through the [`crate::queue::OutputQueue`].

use std::time::Duration;

use crate::history::HistoryLine;
use crate::registry::CommandRegistry;

/// A change to the history, released once its step is due.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Effect {
    Append(HistoryLine),
    Clear,
}

/// One entry of a command's plan. `delay` is measured from dispatch time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Step {
    pub delay: Duration,
    pub effect: Effect,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CommandOutput {
    steps: Vec<Step>,
}

impl CommandOutput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `line` at dispatch time.
    pub fn line(mut self, line: impl Into<HistoryLine>) -> Self {
        self.steps.push(Step {
            delay: Duration::ZERO,
            effect: Effect::Append(line.into()),
        });
        self
    }

    /// Append every line in `lines`, the `i`th one `i * stagger` after
    /// dispatch.
    pub fn staggered<I, L>(mut self, lines: I, stagger: Duration) -> Self
    where
        I: IntoIterator<Item = L>,
        L: Into<HistoryLine>,
    {
        for (i, line) in lines.into_iter().enumerate() {
            let factor = u32::try_from(i).unwrap_or(u32::MAX);
            self.steps.push(Step {
                delay: stagger.saturating_mul(factor),
                effect: Effect::Append(line.into()),
            });
        }
        self
    }

    pub fn clear(mut self) -> Self {
        self.steps.push(Step {
            delay: Duration::ZERO,
            effect: Effect::Clear,
        });
        self
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn into_steps(self) -> Vec<Step> {
        self.steps
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Lines appended by this plan, in step order.
    pub fn appended_lines(&self) -> impl Iterator<Item = &HistoryLine> {
        self.steps.iter().filter_map(|step| match &step.effect {
            Effect::Append(line) => Some(line),
            Effect::Clear => None,
        })
    }
}

/// Everything a command may look at while it builds its plan.
pub struct Context<'a> {
    pub args: &'a [String],
    pub registry: &'a CommandRegistry,
    pub stagger: Duration,
}

pub trait Command: Send + Sync {
    fn execute(&self, ctx: &Context<'_>) -> CommandOutput;
}

impl<F> Command for F
where
    F: Fn(&Context<'_>) -> CommandOutput + Send + Sync,
{
    fn execute(&self, ctx: &Context<'_>) -> CommandOutput {
        self(ctx)
    }
}
