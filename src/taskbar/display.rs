use std::collections::HashMap;

use crate::config::{Orientation, TaskbarConfig};
use crate::events::PointerPos;
use crate::sources::{AppId, WindowHandle};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppEntry {
    pub id: AppId,
    pub name: String,
    pub windows: Vec<WindowHandle>,
    pub active: bool,
}

impl AppEntry {
    pub fn new(id: AppId, name: String) -> Self {
        Self {
            id,
            name,
            windows: Vec::new(),
            active: false,
        }
    }
}

/// Only `App` carries identity; decorations are excluded from all
/// identity-based counts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayEntry {
    App(AppEntry),
    Separator,
    Placeholder,
    EmptyDropTarget,
}

impl DisplayEntry {
    pub fn app_id(&self) -> Option<&AppId> {
        match self {
            DisplayEntry::App(app) => Some(&app.id),
            _ => None,
        }
    }

    pub fn as_app(&self) -> Option<&AppEntry> {
        match self {
            DisplayEntry::App(app) => Some(app),
            _ => None,
        }
    }

    pub fn is_decoration(&self) -> bool {
        !matches!(self, DisplayEntry::App(_))
    }
}

pub struct DisplayList {
    entries: Vec<DisplayEntry>,
}

impl DisplayList {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn entries(&self) -> &[DisplayEntry] {
        &self.entries
    }

    pub fn app_ids(&self) -> Vec<AppId> {
        self.entries
            .iter()
            .filter_map(|entry| entry.app_id().cloned())
            .collect()
    }

    pub fn app_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|entry| !entry.is_decoration())
            .count()
    }

    pub fn app_entry(&self, id: &AppId) -> Option<&AppEntry> {
        self.entries
            .iter()
            .filter_map(DisplayEntry::as_app)
            .find(|app| &app.id == id)
    }

    pub fn app_entry_mut(&mut self, id: &AppId) -> Option<&mut AppEntry> {
        self.entries.iter_mut().find_map(|entry| match entry {
            DisplayEntry::App(app) if &app.id == id => Some(app),
            _ => None,
        })
    }

    // Raw index of the `slot`-th app entry; past the last app, the end
    // of the list.
    fn raw_index_for_slot(&self, slot: usize) -> usize {
        let mut apps_seen = 0;
        for (raw, entry) in self.entries.iter().enumerate() {
            if entry.is_decoration() {
                continue;
            }
            if apps_seen == slot {
                return raw;
            }
            apps_seen += 1;
        }
        self.entries.len()
    }

    pub fn insert_app(&mut self, entry: AppEntry, slot: usize) {
        let raw = self.raw_index_for_slot(slot);
        self.entries.insert(raw, DisplayEntry::App(entry));
    }

    /// A second destroy for the same id is a no-op.
    pub fn remove_app(&mut self, id: &AppId) -> bool {
        let before = self.entries.len();
        self.entries
            .retain(|entry| entry.app_id().map_or(true, |entry_id| entry_id != id));
        self.entries.len() != before
    }

    /// Decorations are dropped; the pass reinstates them from policy.
    pub fn reorder_apps(&mut self, order: &[AppId]) {
        let mut pool: HashMap<AppId, AppEntry> = self
            .entries
            .drain(..)
            .filter_map(|entry| match entry {
                DisplayEntry::App(app) => Some((app.id.clone(), app)),
                _ => None,
            })
            .collect();

        self.entries = order
            .iter()
            .filter_map(|id| pool.remove(id))
            .map(DisplayEntry::App)
            .collect();
    }

    pub fn separator_slot(&self) -> Option<usize> {
        let mut apps_seen = 0;
        for entry in &self.entries {
            match entry {
                DisplayEntry::Separator => return Some(apps_seen),
                DisplayEntry::App(_) => apps_seen += 1,
                _ => {}
            }
        }
        None
    }

    pub fn set_separator(&mut self, boundary: Option<usize>) {
        self.entries
            .retain(|entry| !matches!(entry, DisplayEntry::Separator));
        if let Some(slot) = boundary {
            let raw = self.raw_index_for_slot(slot);
            self.entries.insert(raw, DisplayEntry::Separator);
        }
    }

    pub fn placeholder_slot(&self) -> Option<usize> {
        let mut apps_seen = 0;
        for entry in &self.entries {
            match entry {
                DisplayEntry::Placeholder => return Some(apps_seen),
                DisplayEntry::App(_) => apps_seen += 1,
                _ => {}
            }
        }
        None
    }

    pub fn set_placeholder(&mut self, slot: Option<usize>) {
        self.entries
            .retain(|entry| !matches!(entry, DisplayEntry::Placeholder));
        if let Some(slot) = slot {
            let raw = self.raw_index_for_slot(slot);
            self.entries.insert(raw, DisplayEntry::Placeholder);
        }
    }

    pub fn mark_active(&mut self, focused: Option<&AppId>) {
        for entry in &mut self.entries {
            if let DisplayEntry::App(app) = entry {
                app.active = focused == Some(&app.id);
            }
        }
    }

    pub fn has_empty_drop_target(&self) -> bool {
        self.entries
            .iter()
            .any(|entry| matches!(entry, DisplayEntry::EmptyDropTarget))
    }

    pub fn set_empty_drop_target(&mut self, present: bool) {
        let has = self.has_empty_drop_target();
        if present && !has {
            self.entries.insert(0, DisplayEntry::EmptyDropTarget);
        } else if !present && has {
            self.entries
                .retain(|entry| !matches!(entry, DisplayEntry::EmptyDropTarget));
        }
    }
}

impl Default for DisplayList {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DockGeometry {
    pub orientation: Orientation,
    pub item_extent: f32,
    pub separator_extent: f32,
}

impl DockGeometry {
    pub fn from_config(config: &TaskbarConfig) -> Self {
        Self {
            orientation: config.orientation,
            item_extent: config.icon_size as f32,
            separator_extent: 1.0,
        }
    }

    pub fn axis_offset(&self, pointer: PointerPos) -> f32 {
        match self.orientation {
            Orientation::Horizontal => pointer.x,
            Orientation::Vertical => pointer.y,
        }
    }

    pub fn entry_extent(&self, entry: &DisplayEntry) -> f32 {
        match entry {
            DisplayEntry::Separator => self.separator_extent,
            _ => self.item_extent,
        }
    }
}
