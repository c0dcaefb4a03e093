use std::sync::Arc;

use anyhow::Context;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

use bookrec_console::{
    api::HttpBookApi,
    config::Config,
    console::{parse_command, Command, Console, HELP},
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = Config::from_env()?;
    let api = HttpBookApi::new(&config.api_base_url, config.request_timeout())
        .context("Failed to build HTTP client")?;
    let console = Console::new(Arc::new(api), &config);

    // Print suggestion lists as each feed republishes them
    for feed in console.feeds() {
        let role = feed.role();
        let mut updates = feed.subscribe();
        tokio::spawn(async move {
            while updates.changed().await.is_ok() {
                let suggestions = updates.borrow_and_update().join(", ");
                println!("{} suggestions: {}", role, suggestions);
            }
        });
    }

    tracing::info!(api = %config.api_base_url, "Recommendation console ready");
    print!("{}", HELP);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(e) => {
                eprintln!("{}", e.user_message());
                continue;
            }
        };

        match command {
            Command::Quit => break,
            Command::User { .. } | Command::Item { .. } => {
                let console = console.clone();
                tokio::spawn(async move {
                    if let Some(page) = console.submit(command).await {
                        print!("{}", page);
                    }
                });
            }
            other => print!("{}", console.handle(other).await),
        }
    }

    Ok(())
}
