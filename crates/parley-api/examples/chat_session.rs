//! End-to-end demo: seed an engine, subscribe two listeners, post messages.
//!
//! ```bash
//! cargo run -p parley-api --example chat_session
//! ```

use anyhow::{Context, Result};
use parley_api::{EngineConfig, Resolver};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "parley=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config: EngineConfig = toml::from_str(
        r#"
        [[seed.channels]]
        name = "soccer"
        messages = ["soccer is football", "hello soccer world cup"]

        [[seed.channels]]
        name = "baseball"
        messages = ["baseball is life", "hello baseball world series"]
    "#,
    )?;
    let resolver = Resolver::from_config(&config);

    for channel in resolver.channels() {
        println!("#{} {}", channel.id, channel.name);
    }

    let mut soccer_feed = resolver.subscribe_message_added("1");
    let mut baseball_feed = resolver.subscribe_message_added("2");

    resolver.add_message("1", "nice goal")?;
    resolver.add_message("2", "grand slam")?;

    let event = soccer_feed.recv().await.context("soccer feed closed")?;
    println!("soccer update: [{}] {}", event.message.id, event.message.text);

    let event = baseball_feed.recv().await.context("baseball feed closed")?;
    println!(
        "baseball update: [{}] {}",
        event.message.id, event.message.text
    );

    Ok(())
}
