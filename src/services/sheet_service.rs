use crate::context::Context;
use crate::gesture::{DragEligibility, GestureEnd, GestureFrame, Sheet};
use crate::utils::{Reply, Table};

/// Pointer id used for replayed traces
const TRACE_POINTER: u32 = 1;
/// Where on screen the replayed drag starts
const TRACE_START_Y: f64 = 400.0;

pub struct DragTrace {
    /// Pointer offsets from the start point, one per move event
    pub offsets: Vec<f64>,
    pub eligibility: DragEligibility,
    /// Pointer position measured from the sheet's top edge
    pub grab_y: f64,
    pub scroll_top: f64,
}

pub struct DragReplay {
    pub started: bool,
    pub frames: Vec<(f64, GestureFrame)>,
    pub end: Option<GestureEnd>,
    pub open_after: bool,
    pub page_locked_after: bool,
}

/// Open a sheet, replay a drag through it and report what the user would see
pub async fn replay_drag(ctx: &Context, trace: DragTrace) -> DragReplay {
    let config = ctx.config.sheet.clone().with_eligibility(trace.eligibility);
    let mut sheet = Sheet::new("demo", config, ctx.scroll_lock.clone());
    sheet.open();
    sheet.set_scroll_top(trace.scroll_top);

    let started = sheet.pointer_down(TRACE_POINTER, TRACE_START_Y, trace.grab_y);
    let mut frames = Vec::new();
    let mut end = None;

    if started {
        for offset in &trace.offsets {
            if let Some(frame) = sheet.pointer_move(TRACE_POINTER, TRACE_START_Y + offset) {
                frames.push((*offset, frame));
            }
        }
        end = sheet.pointer_up(TRACE_POINTER).await;
    }

    let open_after = sheet.is_open();
    sheet.close();

    DragReplay {
        started,
        frames,
        end,
        open_after,
        page_locked_after: ctx.scroll_lock.is_locked(),
    }
}

pub fn create_replay_reply(ctx: &Context, replay: &DragReplay) -> Reply {
    let mut reply = Reply::default().title("🪟 Sheet drag");

    if !replay.started {
        return reply.description("Drag not started: grab point is outside the draggable area.");
    }

    let mut table = Table::new(&["Offset", "translateY", "Opacity", "Scroll blocked"]);
    for (offset, frame) in &replay.frames {
        table.add_row(vec![
            format!("{:.0}", offset),
            format!("{:.0}", frame.transform.translate_y),
            format!("{:.2}", frame.transform.opacity),
            if frame.suppress_scroll { "yes" } else { "no" }.to_string(),
        ]);
    }
    reply = reply.description(table.render());

    if let Some(end) = &replay.end {
        let outcome = if end.should_close {
            format!(
                "Closed after {}ms animation ({:.0}px ≥ {:.0}px)",
                end.settle_after.as_millis(),
                end.delta_y,
                ctx.config.sheet.close_threshold
            )
        } else {
            format!(
                "Snapped back ({:.0}px < {:.0}px)",
                end.delta_y, ctx.config.sheet.close_threshold
            )
        };
        reply = reply.field("Outcome", outcome, false);
    }

    reply.field(
        "Sheet open after release",
        if replay.open_after { "yes" } else { "no" },
        true,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use std::time::Duration;

    fn context() -> Context {
        let mut config = AppConfig::default();
        config.sheet = config.sheet.with_animation(Duration::from_millis(1));
        Context::new(crate::db::empty_pool(), config)
    }

    fn trace(offsets: &[f64], eligibility: DragEligibility, grab_y: f64) -> DragTrace {
        DragTrace {
            offsets: offsets.to_vec(),
            eligibility,
            grab_y,
            scroll_top: 0.0,
        }
    }

    #[tokio::test]
    async fn test_long_drag_closes_sheet() {
        let ctx = context();
        let replay = replay_drag(&ctx, trace(&[40.0, 90.0, 130.0], DragEligibility::Anywhere, 200.0)).await;
        assert!(replay.started);
        assert_eq!(replay.frames.len(), 3);
        assert!(replay.end.expect("end").should_close);
        assert!(!replay.open_after);
        assert!(!replay.page_locked_after);
    }

    #[tokio::test]
    async fn test_short_drag_snaps_back() {
        let ctx = context();
        let replay = replay_drag(&ctx, trace(&[30.0, 99.0], DragEligibility::Anywhere, 10.0)).await;
        assert!(!replay.end.expect("end").should_close);
        assert!(replay.open_after);
        assert!(!replay.page_locked_after);
    }

    #[tokio::test]
    async fn test_handle_only_rejects_body_grab() {
        let ctx = context();
        let replay = replay_drag(
            &ctx,
            trace(&[200.0], DragEligibility::HandleOnly { handle_height: 40.0 }, 150.0),
        )
        .await;
        assert!(!replay.started);
        assert!(replay.end.is_none());
    }
}
