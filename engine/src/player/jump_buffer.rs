//! Jump Buffers
//!
//! Coyote time and jump input buffering, counted in physics steps.
//!
//! Two fixed-capacity boolean windows are pushed once per step:
//!
//! - the **ground-contact** window remembers recent grounded states, so a jump
//!   pressed just after running off a ledge still fires;
//! - the **jump-intent** window remembers recent jump presses, so a jump
//!   pressed just before landing fires on touchdown.
//!
//! A window of depth `N` covers the current step and the `N - 1` before it.

use std::collections::VecDeque;

/// Fixed-capacity FIFO of booleans with O(1) push and "any true" queries.
#[derive(Debug, Clone)]
pub struct BoolRingBuffer {
    slots: VecDeque<bool>,
    capacity: usize,
    trues: usize,
}

impl BoolRingBuffer {
    /// Creates an empty window. A capacity of zero is treated as one.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            slots: VecDeque::with_capacity(capacity),
            capacity,
            trues: 0,
        }
    }

    /// Appends a value, evicting the oldest one when full.
    pub fn push(&mut self, value: bool) {
        if self.slots.len() == self.capacity {
            if let Some(true) = self.slots.pop_front() {
                self.trues -= 1;
            }
        }
        self.slots.push_back(value);
        if value {
            self.trues += 1;
        }
    }

    pub fn contains_true(&self) -> bool {
        self.trues > 0
    }

    pub fn clear(&mut self) {
        self.slots.clear();
        self.trues = 0;
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

/// Which window admitted a jump.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JumpAdmission {
    /// Recent ground contact plus a jump pressed this step
    Coyote,
    /// Grounded now plus a recent jump press
    Buffered,
}

/// The coyote-time and input-buffer windows of one actor.
#[derive(Debug, Clone)]
pub struct JumpBuffers {
    ground_contact: BoolRingBuffer,
    jump_intent: BoolRingBuffer,
}

impl JumpBuffers {
    pub fn new(jump_input_depth: usize, ground_contact_depth: usize) -> Self {
        Self {
            ground_contact: BoolRingBuffer::new(ground_contact_depth),
            jump_intent: BoolRingBuffer::new(jump_input_depth),
        }
    }

    /// Records one physics step and decides whether a jump fires.
    ///
    /// `jump_pending` is the press recorded since the last step; the caller
    /// consumes it regardless of the outcome. On admission both windows are
    /// cleared.
    pub fn step(&mut self, grounded: bool, jump_pending: bool, can_jump: bool) -> Option<JumpAdmission> {
        self.ground_contact.push(grounded);
        if self.ground_contact.contains_true() && jump_pending && can_jump {
            self.clear();
            return Some(JumpAdmission::Coyote);
        }

        self.jump_intent.push(jump_pending);
        if self.jump_intent.contains_true() && grounded && can_jump {
            self.clear();
            return Some(JumpAdmission::Buffered);
        }

        None
    }

    pub fn clear(&mut self) {
        self.ground_contact.clear();
        self.jump_intent.clear();
    }
}
