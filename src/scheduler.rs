use std::cell::{Cell, RefCell};
use std::collections::VecDeque;

use crate::sources::AppId;

/// Pin-list mutations held back until the originating gesture is done.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeferredAction {
    CommitDrop { id: AppId, position: usize },
    Unpin { id: AppId },
}

/// Any number of `queue_pass` calls between two pump turns yield exactly
/// one pass.
pub struct DeferredScheduler {
    pass_queued: Cell<bool>,
    laters: RefCell<VecDeque<DeferredAction>>,
}

impl DeferredScheduler {
    pub fn new() -> Self {
        Self {
            pass_queued: Cell::new(false),
            laters: RefCell::new(VecDeque::new()),
        }
    }

    pub fn queue_pass(&self) {
        self.pass_queued.set(true);
    }

    pub fn pass_queued(&self) -> bool {
        self.pass_queued.get()
    }

    pub fn take_pass(&self) -> bool {
        self.pass_queued.replace(false)
    }

    pub fn add_later(&self, action: DeferredAction) {
        self.laters.borrow_mut().push_back(action);
    }

    pub fn drain_laters(&self) -> Vec<DeferredAction> {
        self.laters.borrow_mut().drain(..).collect()
    }
}

impl Default for DeferredScheduler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_queueing_yields_a_single_pass() {
        let scheduler = DeferredScheduler::new();
        scheduler.queue_pass();
        scheduler.queue_pass();
        scheduler.queue_pass();
        assert!(scheduler.take_pass());
        assert!(!scheduler.take_pass());
    }

    #[test]
    fn laters_drain_in_submission_order() {
        let scheduler = DeferredScheduler::new();
        scheduler.add_later(DeferredAction::Unpin {
            id: AppId::from("A"),
        });
        scheduler.add_later(DeferredAction::CommitDrop {
            id: AppId::from("B"),
            position: 1,
        });
        let drained = scheduler.drain_laters();
        assert_eq!(drained.len(), 2);
        assert_eq!(
            drained[0],
            DeferredAction::Unpin {
                id: AppId::from("A")
            }
        );
        assert!(scheduler.drain_laters().is_empty());
    }
}
