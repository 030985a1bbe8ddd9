//! Seed script for a fresh BloomFlow deployment
//!
//! Logs in as a staff account and creates a sample catalogue through the
//! inventory service: a handful of flower types, each with two dated lots.
//! Run: cargo run --bin seed_inventory -- <username> <password>
//! Existing flowers (matched by name) are reused and flowers that already
//! hold lots get no new ones, so the script can be re-run.

use std::collections::HashSet;
use std::sync::Arc;

use bloomflow::models::{FlowerInput, LotFilter, LotInput, LotStatus};
use bloomflow::navigation::LogNavigator;
use bloomflow::{BloomFlow, ClientConfig, MemorySession};
use chrono::{Duration, NaiveDate, Utc};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const SAMPLE_FLOWERS: &[(&str, &str, &str, f64)] = &[
    ("Red Rose", "red", "all", 3.5),
    ("White Lily", "white", "summer", 4.25),
    ("Pink Tulip", "pink", "spring", 2.0),
    ("Sunflower", "yellow", "summer", 2.75),
    ("Purple Lavender", "purple", "summer", 1.5),
    ("Blue Hydrangea", "blue", "summer", 5.0),
    ("Orange Gerbera", "orange", "all", 2.25),
];

/// One fresh lot and one close to expiry so the dashboard has something to
/// show. Flowers that are already stocked get none.
fn sample_lots(
    flower_id: i64,
    index: usize,
    today: NaiveDate,
    stocked: &HashSet<i64>,
) -> Vec<LotInput> {
    if stocked.contains(&flower_id) {
        return Vec::new();
    }
    [(100 + 10 * index as i64, 14), (20, 3)]
        .into_iter()
        .map(|(quantity, days)| LotInput {
            flower_type_id: flower_id,
            quantity,
            expiry_date: (today + Duration::days(days)).format("%Y-%m-%d").to_string(),
            status: Some(LotStatus::Available),
        })
        .collect()
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mut args = std::env::args().skip(1);
    let (Some(username), Some(password)) = (args.next(), args.next()) else {
        eprintln!("usage: seed_inventory <username> <password>");
        std::process::exit(2);
    };

    // Session lives only for the run; nothing is written to disk
    let app = BloomFlow::new(
        ClientConfig::from_env(),
        Arc::new(MemorySession::new()),
        Arc::new(LogNavigator),
    );
    app.auth().login(&username, &password).await?;
    if !app.roles().can_manage_inventory() {
        return Err(format!("{username} cannot manage inventory").into());
    }

    let inventory = app.inventory();
    let existing = inventory.flowers().await?;
    let stocked: HashSet<i64> = inventory
        .lots(&LotFilter::default())
        .await?
        .iter()
        .map(|lot| lot.flower_type_id)
        .collect();
    let today = Utc::now().date_naive();

    for (i, (name, color, season, price)) in SAMPLE_FLOWERS.iter().enumerate() {
        let flower = match existing.iter().find(|f| f.name == *name) {
            Some(flower) => {
                info!("Flower {} already present as #{}", name, flower.id);
                flower.clone()
            }
            None => {
                let input = FlowerInput {
                    name: name.to_string(),
                    color: Some(color.to_string()),
                    seasonality: Some(season.to_string()),
                    price_per_unit: *price,
                    description: None,
                };
                let flower = inventory.create_flower(&input).await?;
                info!("Created flower {} as #{}", name, flower.id);
                flower
            }
        };

        let lots = sample_lots(flower.id, i, today, &stocked);
        if lots.is_empty() {
            info!("{} already has lots; leaving stock alone", name);
        }
        for lot in lots {
            match inventory.create_lot(&lot).await {
                Ok(created) => info!("Created lot #{} ({} x {})", created.id, lot.quantity, name),
                Err(e) => warn!("Skipping lot for {}: {}", name, e),
            }
        }
    }

    println!("Seeded {} flower types.", SAMPLE_FLOWERS.len());
    Ok(())
}
