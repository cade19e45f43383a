//! Deterministic scheduling of staggered command output.
//!
//! Every dispatch gets a [`DispatchId`] and a [`CancellationToken`]. Steps are
//! released by [`OutputQueue::drain_due`] in `(due, dispatch, step)` order, so
//! two dispatches whose output overlaps in time always interleave the same
//! way.

use std::collections::BTreeMap;
use std::collections::HashMap;
use std::time::Duration;
use std::time::Instant;

use serde::Deserialize;
use serde::Serialize;
use strum_macros::Display;
use strum_macros::EnumString;
use tokio_util::sync::CancellationToken;

use crate::command::CommandOutput;
use crate::command::Effect;

/// How output of a new dispatch relates to output still pending from
/// earlier dispatches.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum OverlapPolicy {
    /// Both dispatches keep their own timing and interleave by deadline.
    #[default]
    Interleave,
    /// A new dispatch cancels everything still pending.
    Supersede,
    /// A new dispatch starts once the last pending step has been released.
    Sequential,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DispatchId(u64);

/// Returned by [`OutputQueue::schedule`]; cancelling the token drops the
/// dispatch's remaining steps on the next drain.
#[derive(Clone, Debug)]
pub struct DispatchHandle {
    pub id: DispatchId,
    pub token: CancellationToken,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
struct StepKey {
    due: Instant,
    dispatch: DispatchId,
    index: usize,
}

#[derive(Debug, Default)]
pub struct OutputQueue {
    policy: OverlapPolicy,
    next_id: u64,
    pending: BTreeMap<StepKey, Effect>,
    tokens: HashMap<DispatchId, CancellationToken>,
}

impl OutputQueue {
    pub fn new(policy: OverlapPolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    pub fn policy(&self) -> OverlapPolicy {
        self.policy
    }

    /// Enqueue every step of `output` relative to `now`.
    pub fn schedule(&mut self, now: Instant, output: CommandOutput) -> DispatchHandle {
        let id = DispatchId(self.next_id);
        self.next_id += 1;

        let base = match self.policy {
            OverlapPolicy::Interleave => now,
            OverlapPolicy::Supersede => {
                self.cancel_all();
                now
            }
            OverlapPolicy::Sequential => self.last_deadline().map_or(now, |last| last.max(now)),
        };

        let token = CancellationToken::new();
        let steps = output.into_steps();
        if !steps.is_empty() {
            self.tokens.insert(id, token.clone());
        }
        for (index, step) in steps.into_iter().enumerate() {
            let key = StepKey {
                due: base + step.delay,
                dispatch: id,
                index,
            };
            self.pending.insert(key, step.effect);
        }
        tracing::trace!(dispatch = id.0, pending = self.pending.len(), "scheduled output");

        DispatchHandle { id, token }
    }

    /// Drop every pending step of `id`.
    pub fn cancel(&mut self, id: DispatchId) {
        if let Some(token) = self.tokens.remove(&id) {
            token.cancel();
        }
        self.pending.retain(|key, _| key.dispatch != id);
    }

    pub fn cancel_all(&mut self) {
        for (_, token) in self.tokens.drain() {
            token.cancel();
        }
        self.pending.clear();
    }

    /// Remove and return every effect due at or before `now`, in release
    /// order. Steps of cancelled dispatches are discarded.
    pub fn drain_due(&mut self, now: Instant) -> Vec<Effect> {
        self.prune_cancelled();

        let mut released = Vec::new();
        while let Some(entry) = self.pending.first_entry() {
            if entry.key().due > now {
                break;
            }
            released.push(entry.remove());
        }

        let live: Vec<DispatchId> = self.pending.keys().map(|key| key.dispatch).collect();
        self.tokens.retain(|id, _| live.contains(id));
        released
    }

    /// When the next step becomes due, if anything is pending.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.keys().next().map(|key| key.due)
    }

    /// Time from `now` until the next deadline, zero if one has already
    /// passed.
    pub fn time_until_next(&self, now: Instant) -> Option<Duration> {
        self.next_deadline()
            .map(|due| due.saturating_duration_since(now))
    }

    pub fn is_idle(&self) -> bool {
        self.pending.is_empty()
    }

    fn last_deadline(&self) -> Option<Instant> {
        self.pending.keys().next_back().map(|key| key.due)
    }

    fn prune_cancelled(&mut self) {
        let cancelled: Vec<DispatchId> = self
            .tokens
            .iter()
            .filter(|(_, token)| token.is_cancelled())
            .map(|(id, _)| *id)
            .collect();
        for id in cancelled {
            tracing::debug!(dispatch = id.0, "dropping cancelled output");
            self.cancel(id);
        }
    }
}
