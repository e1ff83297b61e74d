//! Merges pinned and running application sources into one ordered
//! display list and arbitrates drag-based reordering of the pinned
//! region. Rendering is the host's business.

pub mod config;
pub mod events;
pub mod scheduler;
pub mod sources;
pub mod taskbar;

pub use config::{EdgeAlign, Orientation, TaskbarConfig};
pub use events::{DragSource, PointerPos, SourceEvent};
pub use scheduler::{DeferredAction, DeferredScheduler};
pub use sources::{
    merge_sources, AppId, Notifier, PinList, RunningApp, RunningApps, Subscription, WindowHandle,
};
pub use taskbar::{
    AppEntry, AppRemoval, DisplayEntry, DisplayList, DockGeometry, DragOverResult, ExitStyle,
    PassReport, TaskBar,
};
