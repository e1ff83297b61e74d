mod display;
mod drag;
mod reconcile;

pub use display::{AppEntry, DisplayEntry, DisplayList, DockGeometry};
pub use drag::DragOverResult;

use crossbeam_channel::{unbounded, Receiver};
use log::debug;
use std::cell::RefCell;
use std::rc::Rc;

use crate::config::{Orientation, TaskbarConfig};
use crate::events::SourceEvent;
use crate::scheduler::{DeferredAction, DeferredScheduler};
use crate::sources::{merge_sources, AppId, PinList, RunningApps, Subscription};

use drag::DragState;
use reconcile::{diff, separator_boundary};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitStyle {
    /// Recreated elsewhere in the same pass; no exit transition.
    Instant,
    Animated,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppRemoval {
    pub id: AppId,
    pub exit: ExitStyle,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PassReport {
    pub created: Vec<AppId>,
    pub removed: Vec<AppRemoval>,
}

impl PassReport {
    pub fn is_noop(&self) -> bool {
        self.created.is_empty() && self.removed.is_empty()
    }
}

pub struct TaskBar {
    pins: Rc<RefCell<PinList>>,
    running: Rc<RefCell<RunningApps>>,
    display: DisplayList,
    geometry: DockGeometry,
    scheduler: DeferredScheduler,
    drag: Option<DragState>,
    focused: Option<AppId>,
    rx: Receiver<SourceEvent>,
    _subscriptions: Vec<Subscription>,
}

impl TaskBar {
    pub fn new(
        pins: Rc<RefCell<PinList>>,
        running: Rc<RefCell<RunningApps>>,
        config: &TaskbarConfig,
    ) -> Self {
        let (tx, rx) = unbounded();
        let subscriptions = vec![
            pins.borrow().subscribe(tx.clone()),
            running.borrow().subscribe(tx),
        ];

        let scheduler = DeferredScheduler::new();
        scheduler.queue_pass();

        Self {
            pins,
            running,
            display: DisplayList::new(),
            geometry: DockGeometry::from_config(config),
            scheduler,
            drag: None,
            focused: None,
            rx,
            _subscriptions: subscriptions,
        }
    }

    pub fn display(&self) -> &DisplayList {
        &self.display
    }

    pub fn entries(&self) -> &[DisplayEntry] {
        self.display.entries()
    }

    pub fn geometry(&self) -> DockGeometry {
        self.geometry
    }

    pub fn set_layout(&mut self, orientation: Orientation) {
        self.geometry.orientation = orientation;
    }

    pub fn queue_redisplay(&self) {
        self.scheduler.queue_pass();
    }

    pub fn set_focused(&mut self, focused: Option<AppId>) {
        self.focused = focused;
        self.display.mark_active(self.focused.as_ref());
    }

    /// One turn of the loop: drain notifications, run deferred pin
    /// mutations, then the reconciliation pass if one is queued.
    pub fn pump(&mut self) -> PassReport {
        self.drain_notifications();

        for action in self.scheduler.drain_laters() {
            self.apply_deferred(action);
        }
        self.drain_notifications();

        if self.scheduler.take_pass() {
            self.redisplay()
        } else {
            PassReport::default()
        }
    }

    fn drain_notifications(&self) {
        while self.rx.try_recv().is_ok() {
            self.scheduler.queue_pass();
        }
    }

    fn apply_deferred(&mut self, action: DeferredAction) {
        match action {
            DeferredAction::CommitDrop { id, position } => {
                self.display.set_placeholder(None);
                let mut pins = self.pins.borrow_mut();
                let applied = if pins.contains(&id) {
                    pins.move_to(&id, position)
                } else {
                    pins.pin(id.clone(), position)
                };
                if applied {
                    debug!("committed drop of {id} at pin position {position}");
                }
            }
            DeferredAction::Unpin { id } => {
                if self.pins.borrow_mut().unpin(&id) {
                    debug!("unpinned {id} via drop target");
                }
            }
        }
    }

    fn redisplay(&mut self) -> PassReport {
        let pins = self.pins.borrow();
        let running = self.running.borrow();
        let target = merge_sources(&pins, &running);
        let old = self.display.app_ids();
        let script = diff(&old, &target);

        let mut report = PassReport::default();

        // Removes run first so a recreated identity never coexists with
        // its doomed predecessor.
        for id in &script.removes {
            let exit = if target.contains(id) {
                ExitStyle::Instant
            } else {
                ExitStyle::Animated
            };
            self.display.remove_app(id);
            report.removed.push(AppRemoval {
                id: id.clone(),
                exit,
            });
        }

        for create in &script.creates {
            let entry = make_entry(&create.id, &running);
            self.display.insert_app(entry, create.slot.min(self.display.app_count()));
            report.created.push(create.id.clone());
        }

        // The script never moves survivors; seat them into target order.
        self.display.reorder_apps(&target);

        for id in &target {
            if let Some(app) = self.display.app_entry_mut(id) {
                app.windows = running
                    .get(id)
                    .map(|record| record.windows.clone())
                    .unwrap_or_default();
            }
        }

        let pinned_in_target = target.iter().filter(|id| pins.contains(id)).count();
        let total = self.display.app_count();
        self.display
            .set_separator(separator_boundary(pinned_in_target, total));

        // A live gesture keeps its placeholder across the pass.
        if let Some(state) = &self.drag {
            if let Some(slot) = state.placeholder_slot {
                self.display.set_placeholder(Some(slot.min(total)));
            }
        }

        self.display.set_empty_drop_target(total == 0);
        self.display.mark_active(self.focused.as_ref());

        debug!(
            "redisplay: {} created, {} removed, {} displayed",
            report.created.len(),
            report.removed.len(),
            total
        );

        report
    }
}

fn make_entry(id: &AppId, running: &RunningApps) -> AppEntry {
    match running.get(id) {
        Some(record) => {
            let mut entry = AppEntry::new(id.clone(), record.name.clone());
            entry.windows = record.windows.clone();
            entry
        }
        None => AppEntry::new(id.clone(), id.display_name()),
    }
}
