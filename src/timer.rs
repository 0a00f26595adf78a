//! Single-shot, cancelable delayed callbacks on a virtual clock.
//!
//! The gesture engines never sleep or spawn. Each one owns a [`TimerQueue`]
//! and is handed the current time with every event; timers whose deadline
//! has passed are drained with [`TimerQueue::expire`] before the event is
//! classified, so ordering is purely by virtual time.

use std::time::Duration;

/// Opaque token identifying one scheduled timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(u64);

#[derive(Debug)]
struct Pending<T> {
    handle: TimerHandle,
    deadline: Duration,
    payload: T,
}

/// Queue of pending single-shot timers carrying a payload of type `T`.
#[derive(Debug)]
pub struct TimerQueue<T> {
    next_id: u64,
    pending: Vec<Pending<T>>,
}

impl<T> TimerQueue<T> {
    pub fn new() -> Self {
        Self {
            next_id: 1,
            pending: Vec::new(),
        }
    }

    /// Schedule `payload` to fire `delay` after `now`.
    pub fn schedule(&mut self, now: Duration, delay: Duration, payload: T) -> TimerHandle {
        let handle = TimerHandle(self.next_id);
        self.next_id += 1;
        self.pending.push(Pending {
            handle,
            deadline: now + delay,
            payload,
        });
        handle
    }

    /// Cancel a timer. Returns its payload if it had not fired yet.
    pub fn cancel(&mut self, handle: TimerHandle) -> Option<T> {
        let idx = self.pending.iter().position(|p| p.handle == handle)?;
        Some(self.pending.remove(idx).payload)
    }

    pub fn is_pending(&self, handle: TimerHandle) -> bool {
        self.pending.iter().any(|p| p.handle == handle)
    }

    /// Earliest deadline among pending timers.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.pending.iter().map(|p| p.deadline).min()
    }

    /// Remove and return every timer due at or before `now`, earliest first.
    ///
    /// Timers sharing a deadline come out in scheduling order.
    pub fn expire(&mut self, now: Duration) -> Vec<(TimerHandle, T)> {
        let mut due = Vec::new();
        let mut i = 0;
        while i < self.pending.len() {
            if self.pending[i].deadline <= now {
                due.push(self.pending.remove(i));
            } else {
                i += 1;
            }
        }
        due.sort_by_key(|p| (p.deadline, p.handle.0));
        due.into_iter().map(|p| (p.handle, p.payload)).collect()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Milliseconds as a [`Duration`]; settings store delays as plain integers.
#[inline]
pub fn millis(ms: u64) -> Duration {
    Duration::from_millis(ms)
}
