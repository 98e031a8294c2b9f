// Main entry point - Dependency injection and a single display quote
use std::sync::Arc;

use anyhow::Context;
use ledwall_quoter::application::quote_session::QuoteSessionService;
use ledwall_quoter::domain::units::LengthUnit;
use ledwall_quoter::infrastructure::config::load_quoter_config;
use ledwall_quoter::infrastructure::memory_catalog::InMemoryCatalog;
use ledwall_quoter::infrastructure::memory_quote_store::InMemoryQuoteStore;
use tracing_subscriber::EnvFilter;

/// Positional arguments: `[width] [height] [unit] [tile id]`
struct DisplayArgs {
    width: f64,
    height: f64,
    unit: LengthUnit,
    tile_id: Option<i32>,
}

impl DisplayArgs {
    fn parse(args: &[String]) -> anyhow::Result<Self> {
        let number = |idx: usize, default: f64| -> anyhow::Result<f64> {
            args.get(idx)
                .map(|s| s.parse::<f64>().with_context(|| format!("'{s}' is not a number")))
                .unwrap_or(Ok(default))
        };
        let unit = match args.get(2) {
            Some(s) => s.parse::<LengthUnit>()?,
            None => LengthUnit::Meters,
        };
        let tile_id = args
            .get(3)
            .map(|s| s.parse::<i32>().with_context(|| format!("'{s}' is not a product id")))
            .transpose()?;

        Ok(Self {
            width: number(0, 5.0)?,
            height: number(1, 3.0)?,
            unit,
            tile_id,
        })
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Load configuration and arguments
    let config = load_quoter_config()?;
    let args: Vec<String> = std::env::args().skip(1).collect();
    let display_args = DisplayArgs::parse(&args)?;

    // Create repositories (infrastructure layer)
    let catalog = Arc::new(InMemoryCatalog::from_path(&config.catalog.seed_path)?);
    let store = Arc::new(InMemoryQuoteStore::new());

    // Create the session (application layer)
    let session = QuoteSessionService::new(
        catalog,
        store,
        config.pricing.policy(),
        config.power.safety_factor,
    );

    // Pick the tile and size the display
    let tile_id = match display_args.tile_id {
        Some(id) => id,
        None => session
            .available_tiles()
            .await?
            .first()
            .map(|p| p.id)
            .context("catalog has no LED tiles")?,
    };

    let sized = session
        .size_display(tile_id, display_args.width, display_args.height, display_args.unit)
        .await?;
    if sized.result.is_empty() {
        anyhow::bail!(
            "{} {} x {} {} is smaller than one tile; enter larger dimensions",
            sized.product.name,
            display_args.width,
            display_args.height,
            display_args.unit
        );
    }

    // Create the quote
    session.add_display(&sized, None).await?;

    let power = session.plan_power(&session.power_inputs_for(&sized.result))?;
    let quote = session
        .totals(config.quote.markup_percentage, config.quote.fees)
        .await;

    // Print summary
    let summary = serde_json::json!({
        "tile": sized.product.name,
        "display": sized.result,
        "display_size_imperial": sized.result.display_size_imperial(),
        "max_btu_per_hour": sized.result.max_btu_per_hour(),
        "avg_btu_per_hour": sized.result.avg_btu_per_hour(),
        "power": power,
        "items": session.items().await,
        "quote": quote,
    });
    println!("{}", serde_json::to_string_pretty(&summary)?);

    Ok(())
}
