//! Cooperative timer queue driven by a virtual millisecond clock.
//!
//! Every simulation step runs as a task popped from this queue, on the
//! owning thread, one at a time. A cancelled handle never fires again,
//! even when its due time falls inside the drain that cancelled it.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};

/// Identity of a scheduled task. Repeating tasks keep their handle for
/// as long as they stay armed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerHandle(u64);

/// A task whose due time has been reached.
#[derive(Debug, Clone, PartialEq)]
pub struct Fired<T> {
    pub handle: TimerHandle,
    /// Virtual time the task was due at.
    pub due: u64,
    pub task: T,
}

struct Timer<T> {
    task: T,
    /// Re-arm interval for repeating tasks.
    interval: Option<u64>,
    /// Sequence number of the heap entry that currently represents this timer.
    seq: u64,
}

/// Min-heap of `(due, seq, handle)` keyed timers over a virtual clock.
pub struct Scheduler<T> {
    now: u64,
    next_handle: u64,
    next_seq: u64,
    queue: BinaryHeap<Reverse<(u64, u64, u64)>>,
    timers: HashMap<u64, Timer<T>>,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self {
            now: 0,
            next_handle: 0,
            next_seq: 0,
            queue: BinaryHeap::new(),
            timers: HashMap::new(),
        }
    }
}

impl<T: Clone> Scheduler<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time in milliseconds.
    pub fn now(&self) -> u64 {
        self.now
    }

    /// Arm `task` to fire `delay_ms` from now. Repeating tasks re-arm with
    /// the same delay after every firing.
    pub fn schedule(&mut self, delay_ms: u64, repeat: bool, task: T) -> TimerHandle {
        let handle = self.next_handle;
        self.next_handle += 1;
        let interval = repeat.then_some(delay_ms.max(1));
        let seq = self.push(self.now + delay_ms, handle);
        self.timers.insert(
            handle,
            Timer {
                task,
                interval,
                seq,
            },
        );
        TimerHandle(handle)
    }

    /// Disarm a task. Cancelling a handle that already fired or was
    /// cancelled is a no-op and returns false.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        self.timers.remove(&handle.0).is_some()
    }

    /// Disarm every live task. Returns how many were cancelled.
    pub fn cancel_all(&mut self) -> usize {
        let count = self.timers.len();
        self.timers.clear();
        self.queue.clear();
        count
    }

    /// Disarm every live task matching `pred`.
    pub fn cancel_where(&mut self, mut pred: impl FnMut(&T) -> bool) -> usize {
        let before = self.timers.len();
        self.timers.retain(|_, timer| !pred(&timer.task));
        before - self.timers.len()
    }

    pub fn is_live(&self, handle: TimerHandle) -> bool {
        self.timers.contains_key(&handle.0)
    }

    pub fn live_count(&self) -> usize {
        self.timers.len()
    }

    /// Live handles in creation order.
    pub fn live_handles(&self) -> Vec<TimerHandle> {
        let mut handles: Vec<TimerHandle> = self.timers.keys().copied().map(TimerHandle).collect();
        handles.sort();
        handles
    }

    /// Pop the next task due at or before `until`, moving the clock to its
    /// due time. Repeating tasks are re-armed before they are returned.
    pub fn pop_due(&mut self, until: u64) -> Option<Fired<T>> {
        loop {
            let Reverse((due, seq, handle)) = *self.queue.peek()?;
            if due > until {
                return None;
            }
            self.queue.pop();

            let (task, interval) = match self.timers.get(&handle) {
                Some(timer) if timer.seq == seq => (timer.task.clone(), timer.interval),
                // Cancelled, or superseded by a newer heap entry.
                _ => continue,
            };
            self.now = self.now.max(due);

            match interval {
                Some(interval) => {
                    let next_seq = self.push(due + interval, handle);
                    if let Some(timer) = self.timers.get_mut(&handle) {
                        timer.seq = next_seq;
                    }
                }
                None => {
                    self.timers.remove(&handle);
                }
            }

            return Some(Fired {
                handle: TimerHandle(handle),
                due,
                task,
            });
        }
    }

    /// Move the clock forward without firing anything. Never moves it back.
    pub fn advance_to(&mut self, now: u64) {
        self.now = self.now.max(now);
    }

    fn push(&mut self, due: u64, handle: u64) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.queue.push(Reverse((due, seq, handle)));
        seq
    }
}
