use std::time::Duration;
use tracing::{debug, info};

use super::controller::{
    GestureEnd, GestureFrame, PointerId, SheetGestureConfig, SheetGestureController,
    SheetTransform,
};
use super::scroll_lock::{ScrollLock, ScrollLockGuard};

/// A bottom sheet that owns its open state and the page scroll lock while open.
///
/// Pointer events go through the gesture controller; on a committed drag the
/// sheet waits out the close animation and then hides itself.
#[derive(Debug)]
pub struct Sheet {
    name: String,
    controller: SheetGestureController,
    scroll_lock: ScrollLock,
    guard: Option<ScrollLockGuard>,
    transform: SheetTransform,
    /// Content scroll offset inside the sheet
    scroll_top: f64,
}

impl Sheet {
    pub fn new(name: &str, config: SheetGestureConfig, scroll_lock: ScrollLock) -> Self {
        Sheet {
            name: name.to_string(),
            controller: SheetGestureController::new(config),
            scroll_lock,
            guard: None,
            transform: SheetTransform::REST,
            scroll_top: 0.0,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_open(&self) -> bool {
        self.guard.is_some()
    }

    pub fn transform(&self) -> SheetTransform {
        self.transform
    }

    pub fn set_scroll_top(&mut self, scroll_top: f64) {
        self.scroll_top = scroll_top.max(0.0);
    }

    pub fn open(&mut self) {
        if self.is_open() {
            return;
        }
        self.controller.reset();
        self.transform = SheetTransform::REST;
        self.scroll_top = 0.0;
        self.guard = Some(self.scroll_lock.acquire(&self.name));
        debug!("Sheet {} opened", self.name);
    }

    pub fn close(&mut self) {
        if self.guard.take().is_some() {
            self.controller.reset();
            self.transform = SheetTransform::REST;
            debug!("Sheet {} closed", self.name);
        }
    }

    /// `pointer_y_in_sheet` is measured from the sheet's top edge
    pub fn pointer_down(&mut self, pointer: PointerId, pointer_y: f64, pointer_y_in_sheet: f64) -> bool {
        if !self.is_open() {
            return false;
        }
        self.controller
            .on_gesture_start(pointer, pointer_y, self.scroll_top, pointer_y_in_sheet)
    }

    pub fn pointer_move(&mut self, pointer: PointerId, pointer_y: f64) -> Option<GestureFrame> {
        let frame = self.controller.on_gesture_move(pointer, pointer_y)?;
        self.transform = frame.transform;
        Some(frame)
    }

    /// Release the pointer. A committed drag animates out for the configured
    /// duration before the sheet closes; a cancelled one snaps back at once.
    pub async fn pointer_up(&mut self, pointer: PointerId) -> Option<GestureEnd> {
        let end = self.controller.on_gesture_end(pointer)?;
        self.transform = end.target;

        if end.should_close {
            if end.settle_after > Duration::ZERO {
                tokio::time::sleep(end.settle_after).await;
            }
            info!("Sheet {} dismissed by drag ({:.0}px)", self.name, end.delta_y);
            self.close();
        }

        Some(end)
    }
}
