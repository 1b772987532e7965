//! Sparse tick → passengers-reaching-the-gate queue.
//!
//! Most passengers activate at tick 0; late passengers trickle in later.
//! Rather than scanning every waiting passenger each tick, the simulator
//! drains only the entries due by now.  `BTreeMap` keeps drains ordered.

use std::collections::BTreeMap;

use bd_core::{PassengerId, Tick};

use crate::PassengerSpec;

/// A passenger at (or heading to) the gate.  Orders by queue rank.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Boarder {
    pub rank: u32,
    pub id: PassengerId,
}

impl From<&PassengerSpec> for Boarder {
    fn from(spec: &PassengerSpec) -> Self {
        Boarder { rank: spec.rank, id: spec.id }
    }
}

#[derive(Default)]
pub struct ActivationQueue {
    inner: BTreeMap<Tick, Vec<Boarder>>,
}

impl ActivationQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule every passenger at its `activation_tick`.
    pub fn build_from_manifest(passengers: &[PassengerSpec]) -> Self {
        let mut queue = Self::new();
        for spec in passengers {
            queue.push(spec.activation_tick, Boarder::from(spec));
        }
        queue
    }

    pub fn push(&mut self, tick: Tick, boarder: Boarder) {
        self.inner.entry(tick).or_default().push(boarder);
    }

    /// Remove and return everyone scheduled at or before `tick`, earliest
    /// first.
    pub fn drain_through(&mut self, tick: Tick) -> Vec<Boarder> {
        let later = self.inner.split_off(&tick.offset(1));
        let due = std::mem::replace(&mut self.inner, later);
        due.into_values().flatten().collect()
    }

    /// Number of distinct future ticks with at least one queued passenger.
    pub fn tick_count(&self) -> usize {
        self.inner.len()
    }
}
