// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Beanly bootstrap
//!
//! Restores the stored session, loads the catalog in the user's language
//! and logs a summary. Useful for checking a backend and a storage file
//! without a UI attached.

use beanly::{config::Config, models::ActiveFilters, Beanly};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging
    init_logging();

    // Load configuration from environment
    let config = Config::from_env()?;
    tracing::info!(
        api = %config.api_base_url,
        storage = %config.storage_path.display(),
        "Starting Beanly client"
    );

    let app = Beanly::open(config)?;

    match app.bootstrap().await {
        Ok(Some(user)) => tracing::info!(
            user_id = user.user_id,
            favorites = app.favorites.snapshot().len(),
            "Session restored"
        ),
        Ok(None) => tracing::info!("No stored session, continuing anonymously"),
        Err(e) => tracing::warn!(error = %e, code = e.code(), "Session refresh failed"),
    }

    let places = app.catalog.refresh().await?;
    let taxonomy = app.catalog.taxonomy()?;

    // Per-city counts using the same matching the UI filters use.
    if let Some(locations) = taxonomy.category(beanly::models::LOCATION_CATEGORY) {
        for option in &locations.options {
            let mut filters = ActiveFilters::new();
            filters.select(&locations.key, &option.key, true);
            let count = app.catalog.filtered(&filters, "")?.len();
            tracing::info!(city = %option.label, count, "Cafés by city");
        }
    }

    tracing::info!(
        total = places.len(),
        theme = %app.preferences.theme(),
        language = %app.preferences.language(),
        "Catalog ready"
    );
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("beanly=debug".parse().expect("static directive"))
                .add_directive("info".parse().expect("static directive")),
        )
        .with(format)
        .init();
}
