//! Main-thread work queue
//!
//! Work posted here runs the next time the frame loop drains the queue, on
//! the UI thread, in posting order.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

type Job = Box<dyn FnOnce()>;

#[derive(Clone, Default)]
pub struct MainThreadDispatcher {
    queue: Rc<RefCell<VecDeque<Job>>>,
}

impl MainThreadDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `job` to run on the next drain
    pub fn begin_invoke<F>(&self, job: F)
    where
        F: FnOnce() + 'static,
    {
        self.queue.borrow_mut().push_back(Box::new(job));
    }

    pub fn pending(&self) -> usize {
        self.queue.borrow().len()
    }

    /// Run every queued job, including ones queued while draining.
    /// Returns how many ran.
    pub fn drain(&self) -> usize {
        let mut ran = 0;
        loop {
            // Release the borrow before running so jobs may post more work.
            let next = self.queue.borrow_mut().pop_front();
            let Some(job) = next else {
                break;
            };
            job();
            ran += 1;
        }
        ran
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_jobs_run_in_order_on_drain() {
        let dispatcher = MainThreadDispatcher::new();
        let log = Rc::new(RefCell::new(Vec::new()));

        for i in 0..3 {
            let log = log.clone();
            dispatcher.begin_invoke(move || log.borrow_mut().push(i));
        }
        assert!(log.borrow().is_empty());
        assert_eq!(dispatcher.pending(), 3);

        assert_eq!(dispatcher.drain(), 3);
        assert_eq!(*log.borrow(), vec![0, 1, 2]);
        assert_eq!(dispatcher.pending(), 0);
    }

    #[test]
    fn test_jobs_may_post_more_work() {
        let dispatcher = MainThreadDispatcher::new();
        let count = Rc::new(Cell::new(0));

        let inner = dispatcher.clone();
        let c = count.clone();
        dispatcher.begin_invoke(move || {
            c.set(c.get() + 1);
            let c = c.clone();
            inner.begin_invoke(move || c.set(c.get() + 1));
        });

        assert_eq!(dispatcher.drain(), 2);
        assert_eq!(count.get(), 2);
    }
}
