use log::debug;

use crate::events::{DragSource, PointerPos};
use crate::scheduler::DeferredAction;
use crate::sources::AppId;

use super::display::DisplayEntry;
use super::TaskBar;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragOverResult {
    Reject,
    MoveWithinPinned,
    CopyIntoPinned,
}

pub(super) struct DragState {
    pub id: AppId,
    pub candidate: Option<usize>,
    pub placeholder_slot: Option<usize>,
}

impl TaskBar {
    pub fn on_drag_begin(&mut self, source: &DragSource) {
        let Some(id) = source.app_id() else {
            return;
        };
        self.drag = Some(DragState {
            id: id.clone(),
            candidate: None,
            placeholder_slot: None,
        });
    }

    pub fn handle_drag_over(&mut self, pointer: PointerPos) -> DragOverResult {
        let Some(dragged) = self.drag.as_ref().map(|state| state.id.clone()) else {
            return DragOverResult::Reject;
        };
        let pins = self.pins.borrow();
        if !pins.is_writable() {
            return DragOverResult::Reject;
        }
        let result = if pins.contains(&dragged) {
            DragOverResult::MoveWithinPinned
        } else {
            DragOverResult::CopyIntoPinned
        };

        // Candidate clamps to the pinned region; only pinned identities
        // persist an order.
        let count = self.display.app_count();
        let usable = self.usable_extent();
        let raw = if count == 0 || usable <= 0.0 {
            0
        } else {
            let offset = self.geometry.axis_offset(pointer).max(0.0);
            (offset * count as f32 / usable).floor() as usize
        };
        let candidate = raw.min(pins.len());
        let own_position = pins.position(&dragged);
        drop(pins);

        let Some(state) = self.drag.as_mut() else {
            return DragOverResult::Reject;
        };
        if state.candidate != Some(candidate) {
            state.candidate = Some(candidate);
            let redundant = matches!(
                own_position,
                Some(position) if candidate == position || candidate == position + 1
            );
            state.placeholder_slot = if redundant { None } else { Some(candidate) };
            let slot = state.placeholder_slot;
            self.display.set_placeholder(slot);
        }
        // Move/copy feedback only ever accompanies a live placeholder.
        if state.placeholder_slot.is_none() {
            return DragOverResult::Reject;
        }
        result
    }

    pub fn classify_drag_over(&self, _pointer: PointerPos) -> DragOverResult {
        let Some(state) = &self.drag else {
            return DragOverResult::Reject;
        };
        let pins = self.pins.borrow();
        if !pins.is_writable() {
            return DragOverResult::Reject;
        }
        if pins.contains(&state.id) {
            DragOverResult::MoveWithinPinned
        } else {
            DragOverResult::CopyIntoPinned
        }
    }

    pub fn accept_drop(&mut self, pointer: PointerPos) -> bool {
        if self.handle_drag_over(pointer) == DragOverResult::Reject {
            self.end_gesture();
            return false;
        }
        let Some(dragged) = self.drag.as_ref().map(|state| state.id.clone()) else {
            return false;
        };
        // Pinned entries preceding the placeholder, the dragged entry
        // itself not counted.
        let pins = self.pins.borrow();
        let mut ordinal = 0;
        for entry in self.display.entries() {
            match entry {
                DisplayEntry::Placeholder => break,
                DisplayEntry::App(app) if app.id != dragged && pins.contains(&app.id) => {
                    ordinal += 1;
                }
                _ => {}
            }
        }
        drop(pins);

        debug!("drop accepted: {dragged} at pin position {ordinal}");
        self.scheduler.add_later(DeferredAction::CommitDrop {
            id: dragged,
            position: ordinal,
        });
        self.end_gesture();
        true
    }

    pub fn on_drag_end(&mut self) {
        self.end_gesture();
    }

    pub fn on_drag_cancel(&mut self) {
        self.end_gesture();
    }

    pub fn classify_unpin_drop(&self, source: &DragSource) -> DragOverResult {
        let Some(id) = source.app_id() else {
            return DragOverResult::Reject;
        };
        let pins = self.pins.borrow();
        if pins.is_writable() && pins.contains(id) {
            DragOverResult::MoveWithinPinned
        } else {
            DragOverResult::Reject
        }
    }

    pub fn accept_unpin_drop(&mut self, source: &DragSource) -> bool {
        let Some(id) = source.app_id() else {
            return false;
        };
        {
            let pins = self.pins.borrow();
            if !pins.is_writable() || !pins.contains(id) {
                return false;
            }
        }
        self.scheduler
            .add_later(DeferredAction::Unpin { id: id.clone() });
        true
    }

    fn end_gesture(&mut self) {
        self.display.set_placeholder(None);
        self.drag = None;
    }

    fn usable_extent(&self) -> f32 {
        self.display
            .entries()
            .iter()
            .filter(|entry| !entry.is_decoration())
            .map(|entry| self.geometry.entry_extent(entry))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Orientation, TaskbarConfig};
    use crate::sources::{PinList, RunningApp, RunningApps};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn id(value: &str) -> AppId {
        AppId::from(value)
    }

    fn taskbar(pinned: &[&str], running_ids: &[&str]) -> TaskBar {
        let pins = Rc::new(RefCell::new(PinList::from_ids(
            pinned.iter().map(|value| id(value)),
        )));
        let running = Rc::new(RefCell::new(RunningApps::new()));
        running.borrow_mut().set_running(
            running_ids
                .iter()
                .map(|value| RunningApp::new(*value, *value))
                .collect(),
        );
        let mut bar = TaskBar::new(pins, running, &TaskbarConfig::default());
        bar.pump();
        bar
    }

    fn at(x: f32) -> PointerPos {
        PointerPos::new(x, 0.0)
    }

    // Default geometry: 48.0 per entry, so three entries span 144.0.

    #[test]
    fn drop_of_an_unpinned_app_pins_it_at_the_boundary() {
        let mut bar = taskbar(&["A", "B", "C"], &[]);
        bar.on_drag_begin(&DragSource::App(id("D")));
        assert_eq!(bar.handle_drag_over(at(100.0)), DragOverResult::CopyIntoPinned);
        assert_eq!(bar.display().placeholder_slot(), Some(2));
        assert!(bar.accept_drop(at(100.0)));
        bar.pump();
        assert_eq!(
            bar.display().app_ids(),
            vec![id("A"), id("B"), id("D"), id("C")]
        );
        assert_eq!(
            bar.pins.borrow().ordered(),
            &[id("A"), id("B"), id("D"), id("C")]
        );
    }

    #[test]
    fn moving_a_pinned_app_reorders_the_pin_list() {
        let mut bar = taskbar(&["A", "B", "C"], &[]);
        bar.on_drag_begin(&DragSource::App(id("A")));
        assert_eq!(bar.handle_drag_over(at(100.0)), DragOverResult::MoveWithinPinned);
        assert!(bar.accept_drop(at(100.0)));
        bar.pump();
        assert_eq!(bar.pins.borrow().ordered(), &[id("B"), id("A"), id("C")]);
    }

    #[test]
    fn candidate_clamps_to_the_pinned_region() {
        let mut bar = taskbar(&["A", "B"], &["C", "D"]);
        bar.on_drag_begin(&DragSource::App(id("E")));
        bar.handle_drag_over(at(10_000.0));
        assert_eq!(bar.display().placeholder_slot(), Some(2));
        bar.handle_drag_over(at(-50.0));
        assert_eq!(bar.display().placeholder_slot(), Some(0));
    }

    #[test]
    fn placeholder_hides_at_the_dragged_entrys_own_position() {
        let mut bar = taskbar(&["A", "B", "C"], &[]);
        bar.on_drag_begin(&DragSource::App(id("A")));
        assert_eq!(bar.handle_drag_over(at(10.0)), DragOverResult::Reject);
        assert_eq!(bar.display().placeholder_slot(), None);
        // One slot to the right still means "no move".
        bar.handle_drag_over(at(50.0));
        assert_eq!(bar.display().placeholder_slot(), None);
        assert_eq!(bar.handle_drag_over(at(100.0)), DragOverResult::MoveWithinPinned);
        assert_eq!(bar.display().placeholder_slot(), Some(2));
    }

    #[test]
    fn hover_without_a_placeholder_reports_reject() {
        let mut bar = taskbar(&["A", "B", "C"], &[]);
        bar.on_drag_begin(&DragSource::App(id("A")));
        // Repeated motion over the suppressed region never upgrades the
        // feedback; the later drop is not accepted either.
        assert_eq!(bar.handle_drag_over(at(10.0)), DragOverResult::Reject);
        assert_eq!(bar.handle_drag_over(at(12.0)), DragOverResult::Reject);
        assert_eq!(bar.handle_drag_over(at(50.0)), DragOverResult::Reject);
        assert!(!bar.accept_drop(at(50.0)));
        assert_eq!(bar.pins.borrow().ordered(), &[id("A"), id("B"), id("C")]);
    }

    #[test]
    fn vertical_layout_reads_the_pointer_y_axis() {
        let mut bar = taskbar(&["A", "B", "C"], &[]);
        bar.set_layout(Orientation::Vertical);
        bar.on_drag_begin(&DragSource::App(id("D")));
        bar.handle_drag_over(PointerPos::new(500.0, 10.0));
        assert_eq!(bar.display().placeholder_slot(), Some(0));
        bar.handle_drag_over(PointerPos::new(0.0, 100.0));
        assert_eq!(bar.display().placeholder_slot(), Some(2));
        bar.handle_drag_over(PointerPos::new(0.0, 10_000.0));
        assert_eq!(bar.display().placeholder_slot(), Some(3));
    }

    #[test]
    fn drop_without_a_placeholder_is_not_accepted() {
        let mut bar = taskbar(&["A", "B"], &[]);
        bar.on_drag_begin(&DragSource::App(id("A")));
        assert!(!bar.accept_drop(at(10.0)));
        bar.pump();
        assert_eq!(bar.pins.borrow().ordered(), &[id("A"), id("B")]);
    }

    #[test]
    fn read_only_pins_reject_the_whole_gesture() {
        let mut bar = taskbar(&["A", "B"], &[]);
        bar.pins.borrow_mut().set_writable(false);
        bar.pump();
        bar.on_drag_begin(&DragSource::App(id("C")));
        assert_eq!(bar.handle_drag_over(at(50.0)), DragOverResult::Reject);
        assert!(!bar.accept_drop(at(50.0)));
        bar.pump();
        assert_eq!(bar.pins.borrow().ordered(), &[id("A"), id("B")]);
    }

    #[test]
    fn window_backed_sources_never_start_a_gesture() {
        let mut bar = taskbar(&["A"], &[]);
        bar.on_drag_begin(&DragSource::WindowBacked);
        assert_eq!(bar.handle_drag_over(at(10.0)), DragOverResult::Reject);
        assert_eq!(bar.classify_drag_over(at(10.0)), DragOverResult::Reject);
    }

    #[test]
    fn cancel_clears_the_placeholder_and_mutates_nothing() {
        let mut bar = taskbar(&["A", "B", "C"], &[]);
        bar.on_drag_begin(&DragSource::App(id("D")));
        bar.handle_drag_over(at(100.0));
        assert_eq!(bar.display().placeholder_slot(), Some(2));
        bar.on_drag_cancel();
        assert_eq!(bar.display().placeholder_slot(), None);
        assert!(bar.pump().is_noop());
        assert_eq!(bar.pins.borrow().ordered(), &[id("A"), id("B"), id("C")]);
    }

    #[test]
    fn separator_extent_does_not_skew_the_candidate() {
        // Two pinned plus one transient: separator sits between them but
        // only the three app extents divide the axis.
        let mut bar = taskbar(&["A", "B"], &["C"]);
        bar.on_drag_begin(&DragSource::App(id("D")));
        bar.handle_drag_over(at(50.0));
        assert_eq!(bar.display().placeholder_slot(), Some(1));
    }

    #[test]
    fn unpin_target_accepts_only_writable_pinned_sources() {
        let mut bar = taskbar(&["A", "B"], &["C"]);
        assert_eq!(
            bar.classify_unpin_drop(&DragSource::App(id("A"))),
            DragOverResult::MoveWithinPinned
        );
        assert_eq!(
            bar.classify_unpin_drop(&DragSource::App(id("C"))),
            DragOverResult::Reject
        );
        assert!(bar.accept_unpin_drop(&DragSource::App(id("A"))));
        bar.pump();
        assert_eq!(bar.pins.borrow().ordered(), &[id("B")]);
        assert_eq!(bar.display().app_ids(), vec![id("B"), id("C")]);
    }
}
