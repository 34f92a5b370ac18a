use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::model::entity::ItemRef;
use crate::model::vo::UploadPart;

/// Deferred "add part" call for one part of an item.
#[derive(Debug, Clone)]
pub struct UploadTask {
    pub item: ItemRef,
    pub part: UploadPart,
}

impl UploadTask {
    pub fn part_number(&self) -> u64 {
        self.part.index
    }
}

/// # Task queue
///
/// Pending tasks shared by every worker of a pool. Clones share the same queue.
///
/// A task leaves the queue exactly once, either popped by a worker or dropped by [`TaskQueue::clear`],
/// so no task runs twice.
#[derive(Debug)]
pub struct TaskQueue<T> {
    inner: Arc<Mutex<VecDeque<T>>>,
}

impl<T> TaskQueue<T> {
    pub fn new(tasks: impl IntoIterator<Item = T>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(tasks.into_iter().collect())),
        }
    }

    /// Remove the next pending task.
    pub fn pop(&self) -> Option<T> {
        self.lock().pop_front()
    }

    /// Discard every pending task.
    pub fn clear(&self) {
        self.lock().clear();
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    // The guard is never held across an await, a poisoned queue is still consistent.
    fn lock(&self) -> MutexGuard<'_, VecDeque<T>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<T> Clone for TaskQueue<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T> Default for TaskQueue<T> {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl<T> FromIterator<T> for TaskQueue<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::new(iter)
    }
}
