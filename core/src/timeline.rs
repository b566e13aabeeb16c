//! Deterministic virtual-time host for an [`OverlayMachine`].
//!
//! Timers go into an in-memory queue instead of a real clock. Time only
//! moves when [`Timeline::advance`] is called, which makes the overlay's
//! schedule observable to the millisecond.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use crate::overlay::{OverlayMachine, OverlayOptions, OverlaySnapshot, TimerCommand, TimerToken};
use crate::timers::{TimerHandle, TimerSlots};

/// Handle to an entry in the virtual queue
struct VirtualTimer {
    cancelled: Rc<Cell<bool>>,
}

impl TimerHandle for VirtualTimer {
    fn cancel(self) {
        self.cancelled.set(true);
    }
}

struct Scheduled {
    deadline: Duration,
    seq: u64,
    token: TimerToken,
    cancelled: Rc<Cell<bool>>,
}

pub struct Timeline {
    machine: OverlayMachine,
    slots: TimerSlots<VirtualTimer>,
    queue: Vec<Scheduled>,
    now: Duration,
    next_seq: u64,
    delivered: usize,
    delivered_after_teardown: usize,
}

impl Timeline {
    pub fn new(options: OverlayOptions) -> Self {
        Self {
            machine: OverlayMachine::new(options),
            slots: TimerSlots::new(),
            queue: Vec::new(),
            now: Duration::ZERO,
            next_seq: 0,
            delivered: 0,
            delivered_after_teardown: 0,
        }
    }

    /// Convenience for `Timeline::new(OverlayOptions::from_millis(ms))`
    pub fn with_duration_ms(ms: i64) -> Self {
        Self::new(OverlayOptions::from_millis(ms))
    }

    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn machine(&self) -> &OverlayMachine {
        &self.machine
    }

    pub fn snapshot(&self) -> OverlaySnapshot {
        self.machine.snapshot()
    }

    /// Timer callbacks delivered to the machine so far.
    pub fn delivered(&self) -> usize {
        self.delivered
    }

    /// Timer callbacks delivered after [`Timeline::teardown`].
    pub fn delivered_after_teardown(&self) -> usize {
        self.delivered_after_teardown
    }

    /// Timers still waiting in the queue.
    pub fn pending(&self) -> usize {
        self.queue.iter().filter(|s| !s.cancelled.get()).count()
    }

    pub fn mount(&mut self, activation: bool) {
        let commands = self.machine.mount(activation);
        self.enact(commands);
    }

    pub fn set_activation(&mut self, activation: bool) {
        let commands = self.machine.set_activation(activation);
        self.enact(commands);
    }

    pub fn set_duration(&mut self, duration: Duration) {
        let commands = self.machine.set_duration(duration);
        self.enact(commands);
    }

    pub fn teardown(&mut self) {
        let commands = self.machine.teardown();
        self.enact(commands);
    }

    pub fn advance(&mut self, by: Duration) {
        self.advance_to(self.now + by);
    }

    /// Run every timer due at or before `target`, in deadline order, then
    /// leave the clock at `target`.
    pub fn advance_to(&mut self, target: Duration) {
        if target < self.now {
            return;
        }
        while let Some(next) = self.next_due(target) {
            let entry = self.queue.remove(next);
            self.now = entry.deadline;
            self.deliver(entry.token);
        }
        self.now = target;
    }

    fn next_due(&mut self, target: Duration) -> Option<usize> {
        self.queue.retain(|s| !s.cancelled.get());
        self.queue
            .iter()
            .enumerate()
            .filter(|(_, s)| s.deadline <= target)
            .min_by_key(|(_, s)| (s.deadline, s.seq))
            .map(|(i, _)| i)
    }

    fn deliver(&mut self, token: TimerToken) {
        self.delivered += 1;
        if self.machine.is_torn_down() {
            self.delivered_after_teardown += 1;
        }
        self.slots.release(token);
        let commands = self.machine.fire(token);
        self.enact(commands);
    }

    fn enact(&mut self, commands: Vec<TimerCommand>) {
        let now = self.now;
        let queue = &mut self.queue;
        let next_seq = &mut self.next_seq;
        self.slots.apply(commands, |token, after| {
            let cancelled = Rc::new(Cell::new(false));
            *next_seq += 1;
            queue.push(Scheduled {
                deadline: now + after,
                seq: *next_seq,
                token,
                cancelled: Rc::clone(&cancelled),
            });
            VirtualTimer { cancelled }
        });
    }
}
