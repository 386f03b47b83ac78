//! Cancelable deadline queue for undo windows and scroll highlights.

use jiff::Timestamp;

/// Identifies a scheduled timer so it can be canceled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(u64);

struct PendingTimer<E> {
    handle: TimerHandle,
    deadline: Timestamp,
    event: E,
}

/// Pending events keyed by deadline. Nothing fires on its own: the owner
/// polls with [`Timers::pop_due`].
pub struct Timers<E> {
    next_handle: u64,
    pending: Vec<PendingTimer<E>>,
}

impl<E> Timers<E> {
    pub fn new() -> Self {
        Self {
            next_handle: 0,
            pending: Vec::new(),
        }
    }

    /// Schedules `event` to become due at `deadline`.
    pub fn schedule(&mut self, deadline: Timestamp, event: E) -> TimerHandle {
        self.next_handle += 1;
        let handle = TimerHandle(self.next_handle);
        self.pending.push(PendingTimer {
            handle,
            deadline,
            event,
        });
        handle
    }

    /// Cancels a pending timer. Returns false if it already fired or was
    /// canceled.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        let before = self.pending.len();
        self.pending.retain(|t| t.handle != handle);
        self.pending.len() != before
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Removes and returns the earliest timer due at `now`. Timers sharing a
    /// deadline come out in scheduling order.
    pub fn pop_due(&mut self, now: Timestamp) -> Option<(Timestamp, E)> {
        let index = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, t)| t.deadline <= now)
            .min_by_key(|(_, t)| (t.deadline, t.handle.0))
            .map(|(i, _)| i)?;
        let timer = self.pending.remove(index);
        Some((timer.deadline, timer.event))
    }
}

impl<E> Default for Timers<E> {
    fn default() -> Self {
        Self::new()
    }
}
