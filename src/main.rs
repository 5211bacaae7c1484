//! Moxie Shop - mobile shopping screens with a simulated AI assistant
//!
//! Serves the state behind each screen of the shopping app (home feed,
//! catalog, cart and orders, assistant chat, profile) as JSON. Everything is
//! in memory and seeded from mock data; the assistant answers with canned
//! replies after a short delay.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod assistant;
mod cart;
mod catalog;
mod config;
mod conversation;
mod home;
mod money;
mod profile;
mod routes;
mod session;
mod shell;

use assistant::ChatProfiles;
use config::{Config, StoreConfig};
use session::ShopSession;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<StoreConfig>,
    pub session: Arc<ShopSession>,
}

impl AppState {
    pub fn new(store: StoreConfig, profiles: ChatProfiles, reply_seed: Option<u64>) -> Self {
        Self {
            store: Arc::new(store),
            session: Arc::new(ShopSession::new(profiles, reply_seed)),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "moxie_shop=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;
    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;

    let store = config.load_store()?;
    let profiles = ChatProfiles::load(&store.assistant).await?;

    tracing::info!(
        store = %store.store.name,
        tax_rate = store.pricing.tax_rate,
        seeded = config.reply_seed.is_some(),
        "Loaded store configuration"
    );

    let state = AppState::new(store, profiles, config.reply_seed);

    let app = Router::new()
        .merge(routes::router())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    tracing::info!("🛍️ Moxie Shop running at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
