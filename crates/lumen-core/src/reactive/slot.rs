use std::cell::RefCell;
use std::rc::Rc;

/// Single-threaded "latest value" mailbox.
///
/// Async event handlers hold a clone and [`publish`](Self::publish) into it;
/// the frame callback reads it once per frame. Only the most recent value is
/// kept. Frames and handlers run on the same thread, so no locking is needed.
#[derive(Debug)]
pub struct LatestInput<T> {
    cell: Rc<RefCell<Option<T>>>,
}

impl<T> Clone for LatestInput<T> {
    fn clone(&self) -> Self {
        Self {
            cell: Rc::clone(&self.cell),
        }
    }
}

impl<T> Default for LatestInput<T> {
    fn default() -> Self {
        Self {
            cell: Rc::new(RefCell::new(None)),
        }
    }
}

impl<T> LatestInput<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace whatever is pending.
    pub fn publish(&self, value: T) {
        *self.cell.borrow_mut() = Some(value);
    }

    /// Take the pending value, leaving the slot empty.
    pub fn take(&self) -> Option<T> {
        self.cell.borrow_mut().take()
    }

    pub fn has_pending(&self) -> bool {
        self.cell.borrow().is_some()
    }
}
