use crate::config::QuoteConfig;
use crate::handlers;
use crate::services::providers::openai::OpenAiTextProvider;
use crate::services::providers::TextProvider;
use crate::services::{metrics, CatalogStore, PricingRulesStore, QuoteEngine};
use axum::{
    routing::{get, post},
    Router,
};
use service_core::error::AppError;
use std::future::IntoFuture;
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct AppState {
    pub config: QuoteConfig,
    pub engine: Arc<QuoteEngine>,
}

pub struct Application {
    port: u16,
    server: Box<dyn std::future::Future<Output = std::io::Result<()>> + Send + Unpin>,
}

impl Application {
    /// Build the application with the production OpenAI provider.
    pub async fn build(config: QuoteConfig) -> Result<Self, AppError> {
        let provider: Arc<dyn TextProvider> =
            Arc::new(OpenAiTextProvider::new(config.openai.clone()));

        tracing::info!(
            model = %config.openai.model,
            "Initialized OpenAI text provider"
        );

        Self::build_with_provider(config, provider).await
    }

    /// Build with an explicit provider; the seam integration tests use
    /// to inject a mock.
    pub async fn build_with_provider(
        config: QuoteConfig,
        provider: Arc<dyn TextProvider>,
    ) -> Result<Self, AppError> {
        metrics::init_metrics();

        let catalog = Arc::new(CatalogStore::load(&config.catalog.path).await?);
        let pricing =
            Arc::new(PricingRulesStore::load(config.catalog.pricing_rules_path.as_deref()).await?);

        let engine = Arc::new(QuoteEngine::new(
            provider,
            catalog,
            pricing,
            config.openai.model.clone(),
        ));

        let state = AppState {
            config: config.clone(),
            engine,
        };

        let app = Router::new()
            .route("/api/health", get(handlers::health_check))
            .route("/api/ready", get(handlers::readiness_check))
            .route("/metrics", get(handlers::metrics))
            .route("/api/ai/generate-quote", post(handlers::generate_quote))
            .route("/api/ai/suggest-upsells", post(handlers::suggest_upsells))
            .route("/api/ai/explain-quote", post(handlers::explain_quote))
            .route("/api/ai/optimize-pricing", post(handlers::optimize_pricing))
            .layer(CorsLayer::permissive())
            .layer(TraceLayer::new_for_http())
            .with_state(state);

        let host: IpAddr = config.common.host.parse().map_err(|e| {
            AppError::ConfigError(anyhow::anyhow!(
                "Invalid listen host {}: {}",
                config.common.host,
                e
            ))
        })?;
        let addr = SocketAddr::new(host, config.common.port);
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind TCP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("Listening on {}", port);

        let server = axum::serve(listener, app);

        Ok(Self {
            port,
            server: Box::new(server.into_future()),
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        self.server.await
    }
}
