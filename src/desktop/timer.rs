//! Deferred tasks
//!
//! Design:
//! - Scheduler is a min-heap sorted by deadline
//! - Each entry carries a [`ScheduledTask`] the desktop runs when it expires
//! - Time comes from the host (performance.now in the browser, a monotonic
//!   clock in the CLI) in milliseconds
//! - Tasks are one-shot; whatever they refer to may be gone by the time they
//!   fire, so the desktop re-checks before acting

use super::tabs::SessionId;
use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

/// Unique identifier for a scheduled task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(pub u64);

/// Work deferred by the desktop
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScheduledTask {
    /// Close a session (after `exit`)
    CloseSession(SessionId),
    /// Move keyboard focus to a session's input line
    FocusInput(SessionId),
    StartFlourish,
    EndFlourish,
}

/// Entry in the heap (for ordering)
#[derive(Debug)]
struct Entry {
    deadline: f64,
    id: TaskId,
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Entry {}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering for min-heap; equal deadlines fire in schedule order
        other
            .deadline
            .partial_cmp(&self.deadline)
            .unwrap_or(Ordering::Equal)
            .then_with(|| other.id.cmp(&self.id))
    }
}

/// Pending deferred tasks
#[derive(Debug)]
pub struct Scheduler {
    /// Min-heap of entries
    heap: BinaryHeap<Entry>,
    /// Live tasks by ID; cancelled ones are removed here and skipped in the heap
    tasks: HashMap<TaskId, ScheduledTask>,
    next_id: u64,
}

impl Scheduler {
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
            tasks: HashMap::new(),
            next_id: 1,
        }
    }

    /// Run `task` once `delay_ms` has passed since `now`
    pub fn schedule(&mut self, delay_ms: f64, now: f64, task: ScheduledTask) -> TaskId {
        let id = TaskId(self.next_id);
        self.next_id += 1;

        let deadline = now + delay_ms.max(0.0);
        log::trace!("schedule {:?} at {}", task, deadline);
        self.heap.push(Entry { deadline, id });
        self.tasks.insert(id, task);

        id
    }

    /// Returns true if the task was pending and is now cancelled
    pub fn cancel(&mut self, id: TaskId) -> bool {
        self.tasks.remove(&id).is_some()
    }

    /// Remove and return every task due at `now`, earliest first
    pub fn tick(&mut self, now: f64) -> Vec<ScheduledTask> {
        let mut due = Vec::new();

        while let Some(entry) = self.heap.peek() {
            if entry.deadline > now {
                break;
            }
            let Some(entry) = self.heap.pop() else { break };
            if let Some(task) = self.tasks.remove(&entry.id) {
                due.push(task);
            }
        }

        due
    }

    /// Get time until the next live task fires
    pub fn time_until_next(&self, now: f64) -> Option<f64> {
        self.heap
            .iter()
            .filter(|entry| self.tasks.contains_key(&entry.id))
            .map(|entry| (entry.deadline - now).max(0.0))
            .min_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal))
    }

    /// Number of pending tasks
    pub fn pending_count(&self) -> usize {
        self.tasks.len()
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}
