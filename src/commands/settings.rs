use crate::context::Context;
use crate::services::profile_service;
use crate::utils::Reply;

pub async fn execute(ctx: &Context, args: &[&str]) -> Result<Reply, String> {
    let settings = match args {
        [] => profile_service::get_settings(ctx).await?,
        [key, value] => profile_service::update_setting(ctx, key, value).await?,
        _ => {
            return Ok(Reply::default()
                .title("⚙️ Settings Command")
                .field("Usage", "`$settings`\n`$settings <language|currency|notifications> <value>`", false)
                .field(
                    "Values",
                    format!(
                        "language: {}\ncurrency: {}\nnotifications: on, off",
                        profile_service::LANGUAGES.join(", "),
                        profile_service::CURRENCIES.join(", ")
                    ),
                    false,
                ))
        }
    };
    Ok(profile_service::create_settings_reply(&settings))
}
