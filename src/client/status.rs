use std::time::{Duration, Instant};

/// What a mutation's progress indicator shows.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum MutationPhase {
    #[default]
    Idle,
    Loading { count: usize },
    Success { count: usize },
    Error { count: usize, message: String },
}

/// Work to run when a scheduled reset fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AfterReset {
    Nothing,
    ClearSelectionAndRefresh,
}

/// Identifies one scheduled reset so it can be cancelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResetHandle(u64);

#[derive(Debug, Clone)]
struct PendingReset {
    handle: ResetHandle,
    at: Instant,
    after: AfterReset,
}

/// Loading/success/error indicator that returns to idle on its own after a
/// display delay.
#[derive(Debug, Clone, Default)]
pub struct StatusIndicator {
    phase: MutationPhase,
    pending: Option<PendingReset>,
    issued: u64,
}

impl StatusIndicator {
    /// Enters `Loading`, dropping any reset still scheduled by a previous run.
    /// Returns that run's follow-up work, which the caller still owes.
    pub fn start(&mut self, count: usize) -> Option<AfterReset> {
        self.phase = MutationPhase::Loading { count };
        self.pending.take().map(|pending| pending.after)
    }

    pub fn succeed(&mut self, now: Instant, hold: Duration, after: AfterReset) -> ResetHandle {
        let count = self.count();
        self.phase = MutationPhase::Success { count };
        self.schedule(now + hold, after)
    }

    pub fn fail(&mut self, message: impl Into<String>, now: Instant, hold: Duration) -> ResetHandle {
        let count = self.count();
        self.phase = MutationPhase::Error {
            count,
            message: message.into(),
        };
        self.schedule(now + hold, AfterReset::Nothing)
    }

    /// Cancels the reset if it is still pending; the phase stays as is.
    pub fn cancel(&mut self, handle: ResetHandle) -> bool {
        match &self.pending {
            Some(pending) if pending.handle == handle => {
                self.pending = None;
                true
            }
            _ => false,
        }
    }

    /// Fires the scheduled reset once it is due.
    pub fn tick(&mut self, now: Instant) -> Option<AfterReset> {
        match &self.pending {
            Some(pending) if now >= pending.at => {
                let after = pending.after;
                self.pending = None;
                self.phase = MutationPhase::Idle;
                Some(after)
            }
            _ => None,
        }
    }

    pub fn phase(&self) -> &MutationPhase {
        &self.phase
    }

    pub fn is_open(&self) -> bool {
        self.phase != MutationPhase::Idle
    }

    pub fn is_busy(&self) -> bool {
        matches!(self.phase, MutationPhase::Loading { .. })
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|p| p.at)
    }

    fn count(&self) -> usize {
        match self.phase {
            MutationPhase::Loading { count }
            | MutationPhase::Success { count }
            | MutationPhase::Error { count, .. } => count,
            MutationPhase::Idle => 0,
        }
    }

    fn schedule(&mut self, at: Instant, after: AfterReset) -> ResetHandle {
        self.issued += 1;
        let handle = ResetHandle(self.issued);
        self.pending = Some(PendingReset { handle, at, after });
        handle
    }
}
