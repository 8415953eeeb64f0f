//! Sheet gesture handling shared by every modal

pub mod controller;
pub mod host;
pub mod scroll_lock;

pub use controller::{
    DragEligibility, GestureEnd, GestureFrame, GesturePhase, PointerId, Resolution,
    SheetGestureConfig, SheetGestureController, SheetTransform,
};
pub use host::Sheet;
pub use scroll_lock::{ScrollLock, ScrollLockGuard};
