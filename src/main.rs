use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use esim_market::commands;
use esim_market::config::AppConfig;
use esim_market::context::Context;
use esim_market::db;

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env()
            .add_directive("esim_market=debug".parse().unwrap()))
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    info!("📶 Starting eSIM market shell...");

    info!("Initializing database...");
    let pool = db::init_db().await;
    info!("Database initialized successfully");

    let config = AppConfig::from_env();
    info!(
        "Acting as user {}, top-up bonus {} from {}",
        config.current_user_id, config.top_up.bonus, config.top_up.threshold
    );
    let ctx = Context::new(pool, config);

    let mut stdout = tokio::io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                error!("Failed to read input: {}", e);
                break;
            }
        };

        let line = line.trim();
        if line.eq_ignore_ascii_case("$quit") || line.eq_ignore_ascii_case("$exit") {
            break;
        }

        if let Some(reply) = commands::handle_message(&ctx, line).await {
            if let Err(e) = stdout.write_all(format!("{}\n\n", reply).as_bytes()).await {
                error!("Failed to write reply: {}", e);
                break;
            }
            stdout.flush().await.ok();
        }
    }

    info!("Goodbye 👋");
}
