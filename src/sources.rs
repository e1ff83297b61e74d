use crossbeam_channel::Sender;
use serde::{Deserialize, Serialize};
use std::cell::{Cell, RefCell};
use std::collections::HashSet;
use std::fmt;
use std::rc::{Rc, Weak};

use crate::events::SourceEvent;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AppId(String);

impl AppId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// "org.gnome.Nautilus.desktop" becomes "Nautilus".
    pub fn display_name(&self) -> String {
        let stem = self.0.strip_suffix(".desktop").unwrap_or(&self.0);
        let name = stem.rsplit('.').next().unwrap_or(stem);
        if name.is_empty() {
            self.0.clone()
        } else {
            name.to_string()
        }
    }
}

impl From<&str> for AppId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for AppId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for AppId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WindowHandle(pub u64);

type Listeners = Rc<RefCell<Vec<(u64, Sender<SourceEvent>)>>>;

pub struct Notifier {
    listeners: Listeners,
    next_id: Cell<u64>,
}

impl Notifier {
    pub fn new() -> Self {
        Self {
            listeners: Rc::new(RefCell::new(Vec::new())),
            next_id: Cell::new(0),
        }
    }

    pub fn subscribe(&self, tx: Sender<SourceEvent>) -> Subscription {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.listeners.borrow_mut().push((id, tx));
        Subscription {
            id,
            listeners: Rc::downgrade(&self.listeners),
        }
    }

    fn emit(&self, event: SourceEvent) {
        for (_, tx) in self.listeners.borrow().iter() {
            let _ = tx.send(event);
        }
    }
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new()
    }
}

/// Dropping a subscription deregisters the listener.
pub struct Subscription {
    id: u64,
    listeners: Weak<RefCell<Vec<(u64, Sender<SourceEvent>)>>>,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(listeners) = self.listeners.upgrade() {
            listeners.borrow_mut().retain(|(id, _)| *id != self.id);
        }
    }
}

pub struct PinList {
    ids: Vec<AppId>,
    writable: bool,
    notifier: Notifier,
}

impl PinList {
    pub fn new() -> Self {
        Self {
            ids: Vec::new(),
            writable: true,
            notifier: Notifier::new(),
        }
    }

    pub fn from_ids(ids: impl IntoIterator<Item = AppId>) -> Self {
        let mut list = Self::new();
        for id in ids {
            if !list.ids.contains(&id) {
                list.ids.push(id);
            }
        }
        list
    }

    pub fn ordered(&self) -> &[AppId] {
        &self.ids
    }

    pub fn contains(&self, id: &AppId) -> bool {
        self.ids.contains(id)
    }

    pub fn position(&self, id: &AppId) -> Option<usize> {
        self.ids.iter().position(|pinned| pinned == id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn is_writable(&self) -> bool {
        self.writable
    }

    pub fn set_writable(&mut self, writable: bool) {
        self.writable = writable;
    }

    pub fn subscribe(&self, tx: Sender<SourceEvent>) -> Subscription {
        self.notifier.subscribe(tx)
    }

    pub fn pin(&mut self, id: AppId, position: usize) -> bool {
        if !self.writable || self.ids.contains(&id) {
            return false;
        }
        let position = position.min(self.ids.len());
        self.ids.insert(position, id);
        self.notifier.emit(SourceEvent::PinsChanged);
        true
    }

    /// `position` counts over the list with `id` removed.
    pub fn move_to(&mut self, id: &AppId, position: usize) -> bool {
        if !self.writable {
            return false;
        }
        let Some(current) = self.position(id) else {
            return false;
        };
        let moved = self.ids.remove(current);
        let position = position.min(self.ids.len());
        self.ids.insert(position, moved);
        self.notifier.emit(SourceEvent::PinsChanged);
        true
    }

    pub fn unpin(&mut self, id: &AppId) -> bool {
        if !self.writable {
            return false;
        }
        let Some(current) = self.position(id) else {
            return false;
        };
        self.ids.remove(current);
        self.notifier.emit(SourceEvent::PinsChanged);
        true
    }
}

impl Default for PinList {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunningApp {
    pub id: AppId,
    pub name: String,
    pub windows: Vec<WindowHandle>,
}

impl RunningApp {
    pub fn new(id: impl Into<AppId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            windows: Vec::new(),
        }
    }

    pub fn with_windows(mut self, windows: Vec<WindowHandle>) -> Self {
        self.windows = windows;
        self
    }
}

/// A pinned id outside the installed set stays pinned but is never
/// displayed.
pub struct RunningApps {
    apps: Vec<RunningApp>,
    installed: Option<HashSet<AppId>>,
    notifier: Notifier,
}

impl RunningApps {
    pub fn new() -> Self {
        Self {
            apps: Vec::new(),
            installed: None,
            notifier: Notifier::new(),
        }
    }

    pub fn list_running(&self) -> Vec<AppId> {
        self.apps.iter().map(|app| app.id.clone()).collect()
    }

    pub fn get(&self, id: &AppId) -> Option<&RunningApp> {
        self.apps.iter().find(|app| &app.id == id)
    }

    pub fn is_installed(&self, id: &AppId) -> bool {
        match &self.installed {
            Some(installed) => installed.contains(id),
            None => true,
        }
    }

    pub fn subscribe(&self, tx: Sender<SourceEvent>) -> Subscription {
        self.notifier.subscribe(tx)
    }

    pub fn set_running(&mut self, apps: Vec<RunningApp>) {
        let mut seen = HashSet::with_capacity(apps.len());
        self.apps = apps
            .into_iter()
            .filter(|app| seen.insert(app.id.clone()))
            .collect();
        self.notifier.emit(SourceEvent::RunningChanged);
    }

    /// `None` means everything counts as installed.
    pub fn set_installed(&mut self, installed: Option<HashSet<AppId>>) {
        self.installed = installed;
        self.notifier.emit(SourceEvent::InstalledChanged);
    }
}

impl Default for RunningApps {
    fn default() -> Self {
        Self::new()
    }
}

/// Pinned ids in stored order, then running ids absent from the pin list
/// in enumeration order.
pub fn merge_sources(pins: &PinList, running: &RunningApps) -> Vec<AppId> {
    let mut target: Vec<AppId> = pins
        .ordered()
        .iter()
        .filter(|id| running.is_installed(id))
        .cloned()
        .collect();

    for id in running.list_running() {
        if !pins.contains(&id) {
            target.push(id);
        }
    }

    target
}
