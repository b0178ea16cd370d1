//! Interactive console chat against a seeded in-memory store.
//!
//! ```sh
//! CONCIERGE_GENERATIVE__ENABLED=true cargo run -p concierge-agent --example chat
//! ```

use std::io::{self, BufRead, Write};
use std::sync::Arc;

use concierge_agent::ConciergeAgent;
use concierge_config::Settings;
use concierge_store::InMemoryStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let settings = Settings::load(None)?;
    let store = Arc::new(InMemoryStore::seeded());
    let agent = ConciergeAgent::new(&settings, store)?;

    println!("Concierge ready. Type a message, or 'quit' to exit.\n");
    let stdin = io::stdin();
    loop {
        print!("you> ");
        io::stdout().flush()?;
        let Some(line) = stdin.lock().lines().next() else {
            break;
        };
        let line = line?;
        if line.trim().eq_ignore_ascii_case("quit") {
            break;
        }
        let reply = agent.respond("console", &line).await;
        println!("concierge> {reply}\n");
    }
    Ok(())
}
