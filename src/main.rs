use std::sync::Arc;

use anyhow::{bail, Context, Result};
use log::info;

use friendify::cli::{Command, Flags};
use friendify::controllers::{post_controller, start_app, FeedQuery};
use friendify::logging;
use friendify::models::{Config, MockClient, MockStore, SocialApi};

#[tokio::main]
async fn main() -> Result<()> {
    let flags = Flags::from_args();

    let log_path = logging::init().context("Failed to set up logging")?;
    let config = Config::load().context("Failed to load config")?;
    info!(
        "Starting {:?} (page size {}, latency {}ms, log at {:?})",
        flags.command(),
        config.page_size,
        config.latency_ms,
        log_path
    );

    // Every session gets its own freshly seeded store
    let client = MockClient::new(MockStore::seeded(), config.latency());

    match flags.command() {
        Command::Feed => {
            let feed = FeedQuery::new(Arc::new(client), config.page_size);
            start_app(feed, config).await?;
        }
        Command::Fetch => {
            let page = client
                .fetch_page(flags.page, config.page_size)
                .await
                .with_context(|| format!("Failed to fetch page {}", flags.page))?;
            println!("{}", serde_json::to_string_pretty(&page)?);
        }
        Command::Post => {
            let content = post_controller::compose_via_editor("post")?;
            if content.trim().is_empty() {
                bail!("Empty post discarded");
            }
            let feed = FeedQuery::new(Arc::new(client), config.page_size);
            feed.load_first_page().await?;
            let post = post_controller::publish_post(&feed, content, vec![]).await?;
            println!("{}", serde_json::to_string_pretty(&post)?);
        }
        Command::Search => {
            let query = flags.query.clone().unwrap_or_default();
            match client.search(&query).await? {
                Some(results) => println!("{}", serde_json::to_string_pretty(&results)?),
                None => eprintln!("Nothing to search for"),
            }
        }
        Command::Chat => {
            for conversation in client.conversations().await? {
                println!("{} [{}]", conversation.participant.full_name(), conversation.id);
                for message in client.messages(&conversation.id).await? {
                    println!("  {} {}: {}", message.timestamp.format("%H:%M"), message.sender_id, message.content);
                }
            }
        }
    }

    Ok(())
}
