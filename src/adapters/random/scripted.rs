//! Shuffler that replays fixed permutations.

use std::collections::VecDeque;
use std::sync::Mutex;

use crate::ports::Shuffler;

/// Applies queued permutations in order, then leaves input untouched.
///
/// Each permutation lists, for every output slot, the input position it
/// takes its value from. A permutation whose length does not match the
/// slice is skipped.
#[derive(Debug, Default)]
pub struct ScriptedShuffler {
    orders: Mutex<VecDeque<Vec<usize>>>,
}

impl ScriptedShuffler {
    /// Never reorders.
    pub fn identity() -> Self {
        Self::default()
    }

    pub fn new(orders: Vec<Vec<usize>>) -> Self {
        Self {
            orders: Mutex::new(orders.into()),
        }
    }

    /// Queue another permutation.
    pub fn push(&self, order: Vec<usize>) {
        self.lock().push_back(order);
    }

    /// Permutations not yet used.
    pub fn remaining(&self) -> usize {
        self.lock().len()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, VecDeque<Vec<usize>>> {
        self.orders.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Shuffler for ScriptedShuffler {
    fn shuffle(&self, indices: &mut [usize]) {
        let Some(order) = self.lock().pop_front() else {
            return;
        };
        if order.len() != indices.len() || order.iter().any(|&from| from >= indices.len()) {
            return;
        }
        let original = indices.to_vec();
        for (slot, &from) in indices.iter_mut().zip(order.iter()) {
            *slot = original[from];
        }
    }
}
