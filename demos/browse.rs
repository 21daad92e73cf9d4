//! Browse the Art Institute of Chicago collection from the terminal
//!
//! Loads a page, bulk-selects the first N artworks from that page onward and
//! prints them.
//!
//! ```text
//! cargo run --example browse -- [PAGE] [COUNT]
//! RUST_LOG=artwork_browser=debug cargo run --example browse -- 2 30
//! ```
//!
//! Pass `--serve` as the first argument to run the REST API instead
//! (Swagger UI at http://localhost:6790/swagger-ui).

use artwork_browser::{ArtworkBrowser, Config, Event, run_with_shutdown};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mut args = std::env::args().skip(1);
    let first = args.next();

    let browser = ArtworkBrowser::new(Config::default())?;

    if first.as_deref() == Some("--serve") {
        println!("Serving on http://{}", browser.config().api.bind_address);
        println!("  curl http://localhost:6790/view");
        println!("  curl -X PUT http://localhost:6790/page -H 'Content-Type: application/json' -d '{{\"page\": 2}}'");
        println!("  curl -X POST http://localhost:6790/selection/bulk -H 'Content-Type: application/json' -d '{{\"count\": 30}}'");
        println!("  curl -N http://localhost:6790/events");
        run_with_shutdown(browser).await?;
        return Ok(());
    }

    let page: u32 = first.map(|p| p.parse()).transpose()?.unwrap_or(1);
    let count: usize = args.next().map(|c| c.parse()).transpose()?.unwrap_or(15);

    let mut events = browser.subscribe();
    tokio::spawn(async move {
        while let Ok(event) = events.recv().await {
            if let Event::BulkSelectCompleted { pages_fetched, .. } = event {
                println!("(bulk selection took {} page fetches)", pages_fetched);
            }
        }
    });

    browser.set_page(page).await?;
    let view = browser.view().await;
    println!(
        "Page {} of {} ({} artworks)",
        view.current_page,
        browser.page_state().await.page_count(),
        view.total_records
    );

    let selection = browser.bulk_select(count).await?;
    println!("Selected {} of {} requested:", selection.len(), count);
    for record in selection.records() {
        println!(
            "  {:>8}  {:<50}  {}",
            record.id,
            record.title.as_deref().unwrap_or("-"),
            record.place_of_origin.as_deref().unwrap_or("-"),
        );
    }

    Ok(())
}
