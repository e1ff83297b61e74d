use crate::sources::AppId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceEvent {
    PinsChanged,
    RunningChanged,
    InstalledChanged,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerPos {
    pub x: f32,
    pub y: f32,
}

impl PointerPos {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Window-backed items carry no persisted position and are never
/// accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragSource {
    App(AppId),
    WindowBacked,
}

impl DragSource {
    pub fn app_id(&self) -> Option<&AppId> {
        match self {
            DragSource::App(id) => Some(id),
            DragSource::WindowBacked => None,
        }
    }
}
