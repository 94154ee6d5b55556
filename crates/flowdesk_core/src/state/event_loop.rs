//! Run-to-completion job queue.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::fmt::{Debug, Formatter};
use std::rc::Rc;

type Job = Box<dyn FnOnce()>;

/// Single-threaded FIFO of deferred jobs.
///
/// Clones share one queue. Each job runs to completion before the next is
/// taken, and jobs may spawn further jobs while running.
#[derive(Clone, Default)]
pub struct EventLoop {
    queue: Rc<RefCell<VecDeque<Job>>>,
}

impl EventLoop {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues `job` behind every job already pending.
    pub fn spawn(&self, job: impl FnOnce() + 'static) {
        self.queue.borrow_mut().push_back(Box::new(job));
    }

    /// Runs the oldest pending job. Returns `false` when the queue was empty.
    pub fn run_next(&self) -> bool {
        // The queue borrow must end before the job runs so it can spawn.
        let next = self.queue.borrow_mut().pop_front();
        match next {
            Some(job) => {
                job();
                true
            }
            None => false,
        }
    }

    /// Runs jobs until the queue is empty and returns how many ran.
    pub fn run_until_idle(&self) -> usize {
        let mut ran = 0;
        while self.run_next() {
            ran += 1;
        }
        ran
    }

    pub fn pending(&self) -> usize {
        self.queue.borrow().len()
    }
}

impl Debug for EventLoop {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventLoop")
            .field("pending", &self.pending())
            .finish()
    }
}
