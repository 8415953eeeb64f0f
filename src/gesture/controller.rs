//! Drag-to-dismiss for bottom sheets
//!
//! Turns a vertical drag into a per-frame transform and, on release, a single
//! close/cancel decision. The controller never closes anything itself; the
//! host applies the transforms and acts on `should_close`.
//!
//! Phases: `Idle -> Dragging -> (Committed | Cancelled) -> Idle`. The terminal
//! phase is reported in [`GestureEnd`] and the controller is back in `Idle`
//! as soon as `on_gesture_end` returns.

use std::time::Duration;
use tracing::{debug, warn};

pub const DEFAULT_CLOSE_THRESHOLD: f64 = 100.0;
pub const DEFAULT_CAP_DISTANCE: f64 = 300.0;
pub const DEFAULT_FADE_DISTANCE: f64 = 300.0;
pub const DEFAULT_MIN_OPACITY: f64 = 0.3;
pub const DEFAULT_HANDLE_HEIGHT: f64 = 40.0;
pub const DEFAULT_SHEET_HEIGHT: f64 = 640.0;
pub const DEFAULT_ANIMATION_MS: u64 = 200;

pub type PointerId = u32;

/// Where a drag may begin
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragEligibility {
    /// Any point on the sheet
    Anywhere,
    /// Only the grab strip at the top of the sheet
    HandleOnly { handle_height: f64 },
    /// Anywhere, but only while the sheet's own content is scrolled to the top
    ScrollTop,
    /// The grab strip always, the rest of the sheet only when scrolled to the top
    HandleOrScrollTop { handle_height: f64 },
}

impl DragEligibility {
    pub fn allows(&self, sheet_scroll_top: f64, pointer_y_in_sheet: f64) -> bool {
        let at_top = sheet_scroll_top <= 0.0;
        let on_handle =
            |height: f64| pointer_y_in_sheet >= 0.0 && pointer_y_in_sheet <= height;

        match *self {
            DragEligibility::Anywhere => true,
            DragEligibility::HandleOnly { handle_height } => on_handle(handle_height),
            DragEligibility::ScrollTop => at_top,
            DragEligibility::HandleOrScrollTop { handle_height } => {
                on_handle(handle_height) || at_top
            }
        }
    }
}

/// Per-sheet tuning. Call sites differ in how far a drag must go and where it may start.
#[derive(Debug, Clone, PartialEq)]
pub struct SheetGestureConfig {
    /// Release distance at or beyond which the sheet closes
    pub close_threshold: f64,
    /// Largest translation shown while dragging
    pub cap_distance: f64,
    /// Drag distance over which opacity falls from 1 toward `min_opacity`
    pub fade_distance: f64,
    pub min_opacity: f64,
    /// Translation the close animation ends at
    pub sheet_height: f64,
    pub animation: Duration,
    pub eligibility: DragEligibility,
}

impl Default for SheetGestureConfig {
    fn default() -> Self {
        SheetGestureConfig {
            close_threshold: DEFAULT_CLOSE_THRESHOLD,
            cap_distance: DEFAULT_CAP_DISTANCE,
            fade_distance: DEFAULT_FADE_DISTANCE,
            min_opacity: DEFAULT_MIN_OPACITY,
            sheet_height: DEFAULT_SHEET_HEIGHT,
            animation: Duration::from_millis(DEFAULT_ANIMATION_MS),
            eligibility: DragEligibility::HandleOrScrollTop {
                handle_height: DEFAULT_HANDLE_HEIGHT,
            },
        }
    }
}

impl SheetGestureConfig {
    /// A threshold that is not a positive distance is ignored, since it would
    /// let a tap close the sheet
    pub fn with_close_threshold(mut self, close_threshold: f64) -> Self {
        if is_positive_distance(close_threshold) {
            self.close_threshold = close_threshold;
        } else {
            warn!(
                "Ignoring close threshold {}, keeping {}",
                close_threshold, self.close_threshold
            );
        }
        self
    }

    pub fn with_eligibility(mut self, eligibility: DragEligibility) -> Self {
        self.eligibility = eligibility;
        self
    }

    pub fn with_animation(mut self, animation: Duration) -> Self {
        self.animation = animation;
        self
    }

    fn feedback(&self, delta_y: f64) -> SheetTransform {
        let opacity = if self.fade_distance > 0.0 {
            1.0 - delta_y / self.fade_distance
        } else {
            self.min_opacity
        };

        SheetTransform {
            translate_y: delta_y.min(self.cap_distance.max(0.0)),
            opacity: opacity.max(self.min_opacity).min(1.0),
        }
    }
}

/// Finite and greater than zero
pub fn is_positive_distance(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

/// Visual state the host applies to the sheet layer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SheetTransform {
    pub translate_y: f64,
    pub opacity: f64,
}

impl SheetTransform {
    pub const REST: SheetTransform = SheetTransform {
        translate_y: 0.0,
        opacity: 1.0,
    };
}

impl Default for SheetTransform {
    fn default() -> Self {
        SheetTransform::REST
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GesturePhase {
    Idle,
    Dragging,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Committed,
    Cancelled,
}

/// Result of a move event
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureFrame {
    pub transform: SheetTransform,
    /// True only while the drag is heading down; the host should then block
    /// the page from scrolling underneath the sheet.
    pub suppress_scroll: bool,
}

/// Result of a release
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureEnd {
    pub resolution: Resolution,
    pub should_close: bool,
    /// Transform to animate to: off-screen and transparent, or back to rest
    pub target: SheetTransform,
    /// How long the host waits before unmounting (zero on snap-back)
    pub settle_after: Duration,
    pub delta_y: f64,
}

#[derive(Debug, Clone, Copy, Default)]
struct GestureState {
    pointer: Option<PointerId>,
    start_y: f64,
    current_y: f64,
    transform: SheetTransform,
}

impl GestureState {
    fn delta_y(&self) -> f64 {
        self.current_y - self.start_y
    }
}

#[derive(Debug, Clone)]
pub struct SheetGestureController {
    config: SheetGestureConfig,
    state: GestureState,
}

impl SheetGestureController {
    pub fn new(config: SheetGestureConfig) -> Self {
        SheetGestureController {
            config,
            state: GestureState::default(),
        }
    }

    pub fn config(&self) -> &SheetGestureConfig {
        &self.config
    }

    pub fn phase(&self) -> GesturePhase {
        if self.state.pointer.is_some() {
            GesturePhase::Dragging
        } else {
            GesturePhase::Idle
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.phase() == GesturePhase::Dragging
    }

    pub fn transform(&self) -> SheetTransform {
        self.state.transform
    }

    /// Begin tracking `pointer` if the sheet allows a drag from here.
    /// A second pointer while one is already tracked is ignored.
    pub fn on_gesture_start(
        &mut self,
        pointer: PointerId,
        pointer_y: f64,
        sheet_scroll_top: f64,
        pointer_y_in_sheet: f64,
    ) -> bool {
        if self.is_dragging() {
            debug!("Ignoring pointer {} while pointer {:?} drags", pointer, self.state.pointer);
            return false;
        }
        if !self.config.eligibility.allows(sheet_scroll_top, pointer_y_in_sheet) {
            return false;
        }

        self.state = GestureState {
            pointer: Some(pointer),
            start_y: pointer_y,
            current_y: pointer_y,
            transform: SheetTransform::REST,
        };
        true
    }

    /// Feed a move event. Returns `None` when no drag is active for this pointer.
    pub fn on_gesture_move(&mut self, pointer: PointerId, pointer_y: f64) -> Option<GestureFrame> {
        if self.state.pointer != Some(pointer) {
            return None;
        }

        self.state.current_y = pointer_y;
        let delta_y = self.state.delta_y();

        if delta_y <= 0.0 {
            // upward: leave the last downward transform alone and let the content scroll
            return Some(GestureFrame {
                transform: self.state.transform,
                suppress_scroll: false,
            });
        }

        self.state.transform = self.config.feedback(delta_y);
        Some(GestureFrame {
            transform: self.state.transform,
            suppress_scroll: true,
        })
    }

    /// Release. Returns `None` if nothing was being dragged by this pointer,
    /// so a duplicate end is harmless.
    pub fn on_gesture_end(&mut self, pointer: PointerId) -> Option<GestureEnd> {
        if self.state.pointer != Some(pointer) {
            return None;
        }

        let delta_y = self.state.delta_y();
        self.reset();

        let end = if delta_y >= self.config.close_threshold {
            GestureEnd {
                resolution: Resolution::Committed,
                should_close: true,
                target: SheetTransform {
                    translate_y: self.config.sheet_height,
                    opacity: 0.0,
                },
                settle_after: self.config.animation,
                delta_y,
            }
        } else {
            GestureEnd {
                resolution: Resolution::Cancelled,
                should_close: false,
                target: SheetTransform::REST,
                settle_after: Duration::ZERO,
                delta_y,
            }
        };

        debug!("Sheet drag of {:.0}px resolved as {:?}", delta_y, end.resolution);
        Some(end)
    }

    /// Drop any in-flight drag, e.g. when the sheet unmounts mid-gesture
    pub fn reset(&mut self) {
        self.state = GestureState::default();
    }
}

impl Default for SheetGestureController {
    fn default() -> Self {
        SheetGestureController::new(SheetGestureConfig::default())
    }
}
