use crate::conf::Conf;
use crate::store::{ArticleStore, CozoArticleStore};
use crate::trace::{make_request_span, RequestIdProducer};
use crate::{paths, views};

use anyhow::Context;
use axum::{
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Router,
};
use std::sync::Arc;
use tower_http::{
    trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer},
    LatencyUnit, ServiceBuilderExt,
};

async fn fallback() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, views::not_found())
}

pub fn router() -> Router<AppState> {
    use crate::routes::*;

    let request_tracing_layer = tower::ServiceBuilder::new()
        .set_x_request_id(RequestIdProducer::default())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(make_request_span)
                .on_request(DefaultOnRequest::new().level(tracing::Level::INFO))
                .on_response(
                    DefaultOnResponse::new()
                        .level(tracing::Level::INFO)
                        .latency_unit(LatencyUnit::Micros),
                ),
        )
        .propagate_x_request_id();

    Router::new()
        .route(paths::HEALTH_CHECK, get(health_check))
        .route(paths::ARTICLES, get(index).post(create))
        .route(paths::NEW_ARTICLE, get(new))
        .route(paths::ARTICLE, get(show))
        .fallback(fallback)
        .layer(request_tracing_layer)
}

#[derive(Clone)]
pub struct AppState {
    pub articles: Arc<dyn ArticleStore>,
}

type Server = std::pin::Pin<Box<dyn std::future::Future<Output = hyper::Result<()>> + Send>>;

pub struct Application {
    port: u16,
    host: String,
    server: Server,
    articles: Arc<dyn ArticleStore>,
}

impl Application {
    /// Opens the configured database and binds the listener.
    pub async fn build(conf: &Conf) -> anyhow::Result<Self> {
        let db = conf
            .db
            .db_instance()
            .context("Failed to open the database")?;
        tracing::info!(engine = ?conf.db.storage_engine, "Opened database");

        Self::build_with_store(conf, Arc::new(CozoArticleStore::new(db)))
    }

    pub fn build_with_store(conf: &Conf, articles: Arc<dyn ArticleStore>) -> anyhow::Result<Self> {
        let address = conf.address();
        let listener = std::net::TcpListener::bind(&address)
            .with_context(|| format!("Failed to bind {}", address))?;
        let port = listener.local_addr()?.port();
        let host = conf.host.clone();
        tracing::info!("Listening on http://{}:{}", host, port);

        let app_state = AppState {
            articles: articles.clone(),
        };
        let app = router().with_state(app_state);

        let server = axum::Server::from_tcp(listener)?.serve(app.into_make_service());

        Ok(Self {
            port,
            host,
            server: Box::pin(server),
            articles,
        })
    }

    // needs to consume to produce 1 server max
    pub fn server(self) -> Server {
        self.server
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn articles(&self) -> Arc<dyn ArticleStore> {
        self.articles.clone()
    }
}
