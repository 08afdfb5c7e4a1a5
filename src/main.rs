//! Wiring & DI. Entry point: bootstrap adapters, inject into services, run UI.
//! No business logic here; cards own their aggregation cycles.

use dotenv::dotenv;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use tutoring_card::adapters::http::{ApiClient, HttpTutoringGateway, HttpUserLookup};
use tutoring_card::adapters::memory::InMemoryDirectory;
use tutoring_card::adapters::ui::card_renderer::CardRenderer;
use tutoring_card::adapters::ui::navigator::TerminalNavigator;
use tutoring_card::adapters::ui::tui::TuiInputPort;
use tutoring_card::ports::{
    InputPort, NavigationPort, ReviewLookupPort, TutoringCatalogPort, UserLookupPort,
};
use tutoring_card::presentation::format::fixed_offset;
use tutoring_card::presentation::{CardLabels, CardPresenter};
use tutoring_card::shared::config::AppConfig;
use tutoring_card::usecases::AggregationService;

/// Collaborators behind the outbound ports.
struct Collaborators {
    users: Arc<dyn UserLookupPort>,
    reviews: Arc<dyn ReviewLookupPort>,
    catalog: Arc<dyn TutoringCatalogPort>,
}

// Single-threaded, cooperative: cards and their lookups interleave on one thread.
#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let env_loaded = dotenv();
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    match &env_loaded {
        Ok(path) => info!(path = %path.display(), "loaded .env"),
        Err(_) => info!(cwd = %cwd.display(), "no .env found (check CWD)"),
    }

    tutoring_card::adapters::ui::init_ui();

    let cfg = match AppConfig::load() {
        Ok(cfg) => cfg,
        Err(e) => {
            warn!(error = %e, "invalid configuration, using defaults");
            AppConfig::default()
        }
    };

    let collaborators = build_collaborators(&cfg).await?;

    let presenter = Arc::new(CardPresenter::new(
        CardLabels::for_locale(cfg.locale_or_default()),
        cfg.fallback_image_url_or_default(),
        fixed_offset(cfg.utc_offset_minutes_or_default()),
    ));
    info!(
        locale = ?cfg.locale_or_default(),
        utc_offset_minutes = cfg.utc_offset_minutes_or_default(),
        "card presentation configured"
    );

    let aggregation = Arc::new(AggregationService::new(
        collaborators.users,
        collaborators.reviews,
    ));
    let navigator: Arc<dyn NavigationPort> = Arc::new(TerminalNavigator);

    let input_port: Arc<dyn InputPort> = Arc::new(TuiInputPort::new(
        collaborators.catalog,
        aggregation,
        presenter,
        navigator,
        CardRenderer::new(cfg.description_max_chars_or_default()),
    ));

    input_port
        .run()
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    Ok(())
}

/// HTTP collaborators when an API is configured; otherwise the in-memory
/// directory, seeded from `seed_path` or the built-in demo listing.
async fn build_collaborators(cfg: &AppConfig) -> anyhow::Result<Collaborators> {
    if let Some(base_url) = cfg.api_base_url() {
        info!(url = %base_url, "using HTTP collaborators");
        let api = ApiClient::new(
            base_url,
            cfg.api_token.clone(),
            Duration::from_secs(cfg.request_timeout_secs_or_default()),
        )
        .map_err(|e| anyhow::anyhow!("HTTP client setup failed: {}", e))?;
        let gateway = Arc::new(HttpTutoringGateway::new(api.clone()));
        return Ok(Collaborators {
            users: Arc::new(HttpUserLookup::new(api)),
            reviews: Arc::clone(&gateway) as Arc<dyn ReviewLookupPort>,
            catalog: gateway,
        });
    }

    let directory = match &cfg.seed_path {
        Some(path) => {
            let json = tokio::fs::read_to_string(path)
                .await
                .map_err(|e| anyhow::anyhow!("read seed {}: {}", path, e))?;
            info!(path = %path, "using in-memory directory from seed file");
            InMemoryDirectory::from_json(&json).map_err(|e| anyhow::anyhow!("{}", e))?
        }
        None => {
            warn!("TUTORING_CARD_API_BASE_URL not set, using built-in demo listing");
            InMemoryDirectory::demo()
        }
    };
    let directory =
        Arc::new(directory.with_delay(Duration::from_millis(cfg.mock_delay_ms_or_default())));

    Ok(Collaborators {
        users: Arc::clone(&directory) as Arc<dyn UserLookupPort>,
        reviews: Arc::clone(&directory) as Arc<dyn ReviewLookupPort>,
        catalog: directory,
    })
}
