//! Tick-keyed timer queue.
//!
//! Timers fire on the first tick whose number is at or past their due tick.
//! Timers due on the same tick fire in the order they were armed.

use std::collections::{BTreeMap, HashMap};

use hecs::Entity;

/// Handle returned by [`TimerQueue::arm`].
pub type TimerId = u64;

/// What happens when a timer fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    /// Spawn the next wave of the spawner at this index.
    SpawnWave { spawner: usize },
    /// Munition lifespan elapsed.
    Expire(Entity),
}

#[derive(Debug, Default)]
pub struct TimerQueue {
    next_id: TimerId,
    pending: BTreeMap<(u64, TimerId), TimerEvent>,
    due_ticks: HashMap<TimerId, u64>,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm a timer firing at `due_tick`.
    pub fn arm(&mut self, due_tick: u64, event: TimerEvent) -> TimerId {
        let id = self.next_id;
        self.next_id += 1;
        self.pending.insert((due_tick, id), event);
        self.due_ticks.insert(id, due_tick);
        id
    }

    /// Cancel a pending timer. Returns false if it already fired or was cancelled.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        match self.due_ticks.remove(&id) {
            Some(due_tick) => self.pending.remove(&(due_tick, id)).is_some(),
            None => false,
        }
    }

    /// Due tick of a pending timer.
    pub fn due_tick(&self, id: TimerId) -> Option<u64> {
        self.due_ticks.get(&id).copied()
    }

    /// Remove and return every timer due at or before `now_tick`.
    pub fn drain_due(&mut self, now_tick: u64) -> Vec<TimerEvent> {
        let later = self.pending.split_off(&(now_tick + 1, 0));
        let due = std::mem::replace(&mut self.pending, later);
        due.into_iter()
            .map(|((_, id), event)| {
                self.due_ticks.remove(&id);
                event
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
        self.due_ticks.clear();
    }
}
