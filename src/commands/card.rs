use crate::context::Context;
use crate::engine::card::mask_card_number;
use crate::engine::compute_card_network;
use crate::utils::Reply;

pub async fn execute(_ctx: &Context, args: &[&str]) -> Result<Reply, String> {
    if args.is_empty() {
        return Ok(Reply::default()
            .title("💳 Card Command")
            .field("Usage", "`$card <number>`", false));
    }

    let number = args.concat();
    let network = compute_card_network(&number)
        .ok_or("❌ Card network not recognised".to_string())?;

    Ok(Reply::default()
        .title("💳 Card")
        .field("Number", mask_card_number(&number), true)
        .field("Network", network.to_string(), true)
        .footer("Prefix check only, the number is not validated"))
}
