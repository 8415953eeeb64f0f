use crate::context::Context;
use crate::gesture::controller::DEFAULT_HANDLE_HEIGHT;
use crate::gesture::DragEligibility;
use crate::services::sheet_service::{self, DragTrace};
use crate::utils::Reply;

pub async fn execute(ctx: &Context, args: &[&str]) -> Result<Reply, String> {
    if args.is_empty() {
        return Ok(Reply::default()
            .title("🪟 Sheet Command")
            .description("Replays a vertical drag on a bottom sheet, one move event per offset")
            .field("Usage", "`$sheet <offset...> [anywhere|handle|scrolltop] [at <y>] [scroll <px>]`", false)
            .field(
                "Examples",
                "`$sheet 20 60 140` (closes)\n`$sheet 20 60 -10` (snaps back)\n`$sheet 50 150 handle at 200` (drag not started)",
                false,
            ));
    }

    let mut trace = DragTrace {
        offsets: Vec::new(),
        eligibility: DragEligibility::HandleOrScrollTop {
            handle_height: DEFAULT_HANDLE_HEIGHT,
        },
        grab_y: 10.0,
        scroll_top: 0.0,
    };

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.to_lowercase().as_str() {
            "anywhere" => trace.eligibility = DragEligibility::Anywhere,
            "handle" => {
                trace.eligibility = DragEligibility::HandleOnly {
                    handle_height: DEFAULT_HANDLE_HEIGHT,
                }
            }
            "scrolltop" => trace.eligibility = DragEligibility::ScrollTop,
            "at" => trace.grab_y = next_number(iter.next(), "at")?,
            "scroll" => trace.scroll_top = next_number(iter.next(), "scroll")?,
            other => trace.offsets.push(
                finite(other).ok_or_else(|| format!("❌ Invalid offset: {}", other))?,
            ),
        }
    }

    let replay = sheet_service::replay_drag(ctx, trace).await;
    Ok(sheet_service::create_replay_reply(ctx, &replay))
}

fn next_number(value: Option<&&str>, keyword: &str) -> Result<f64, String> {
    value
        .and_then(|v| finite(v))
        .ok_or_else(|| format!("❌ `{}` needs a number", keyword))
}

fn finite(input: &str) -> Option<f64> {
    input.parse::<f64>().ok().filter(|v| v.is_finite())
}
