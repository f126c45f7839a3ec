// Tracing definitions
//

use tracing::{subscriber::set_global_default, Subscriber};
use tracing_bunyan_formatter::{BunyanFormattingLayer, JsonStorageLayer};
use tracing_log::LogTracer;
use tracing_subscriber::{
    filter,
    fmt::MakeWriter,
    layer::{Layer, SubscriberExt},
    EnvFilter, Registry,
};

static CRATE_NAME: &str = "articles";
static CRATE_LEVEL: tracing::Level = tracing::Level::DEBUG;
static RUST_LOG_FALLBACK: &str = "info";

pub struct TracingSubscriber {
    name: String,
    pretty: bool,
}

impl TracingSubscriber {
    pub fn new(name: impl AsRef<str>) -> Self {
        Self {
            name: name.as_ref().to_string(),
            pretty: false,
        }
    }

    pub fn pretty(mut self, value: bool) -> Self {
        self.pretty = value;
        self
    }

    /// Bunyan JSON lines into `sink`, or a human readable format when `pretty` is set.
    pub fn build<Sink>(self, sink: Sink) -> Box<dyn Subscriber + Sync + Send>
    where
        Sink: for<'a> MakeWriter<'a> + Sync + Send + 'static,
    {
        // depends on RUST_LOG env var
        let env_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(RUST_LOG_FALLBACK));

        let target_filter = filter::Targets::new()
            .with_target(CRATE_NAME, CRATE_LEVEL)
            .with_target("tower_http::trace", tracing::Level::INFO)
            .with_target("hyper", tracing::Level::INFO)
            .with_target("sled", filter::LevelFilter::OFF)
            .with_default(tracing::Level::INFO);

        if self.pretty {
            Box::new(
                Registry::default().with(
                    tracing_subscriber::fmt::layer()
                        .pretty()
                        .with_writer(sink)
                        .with_filter(env_filter)
                        .with_filter(target_filter),
                ),
            )
        } else {
            Box::new(
                Registry::default().with(JsonStorageLayer).with(
                    BunyanFormattingLayer::new(self.name, sink)
                        .with_filter(env_filter)
                        .with_filter(target_filter),
                ),
            )
        }
    }
}

/// Sets `subscriber` as the global default [`tracing::Subscriber`].
pub fn init_global_default(subscriber: impl Subscriber + Sync + Send) -> anyhow::Result<()> {
    LogTracer::init().map_err(|e| anyhow::anyhow!("Failed to set logger: {e}"))?;
    set_global_default(subscriber)?;
    Ok(())
}

#[derive(Clone, Default)]
pub struct RequestIdProducer {
    counter: std::sync::Arc<std::sync::atomic::AtomicU64>,
}

impl tower_http::request_id::MakeRequestId for RequestIdProducer {
    fn make_request_id<B>(
        &mut self,
        _request: &hyper::http::Request<B>,
    ) -> Option<tower_http::request_id::RequestId> {
        let request_id = self
            .counter
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst);

        Some(tower_http::request_id::RequestId::new(request_id.into()))
    }
}

/// Span for one HTTP request, tagged with the id set by [`RequestIdProducer`].
pub fn make_request_span(request: &hyper::http::Request<hyper::Body>) -> tracing::Span {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|value| value.to_str().ok())
        .unwrap_or("unknown");

    tracing::info_span!(
        "request",
        method = %request.method(),
        uri = %request.uri(),
        version = ?request.version(),
        request_id = %request_id,
    )
}

/// Spawns a blocking task in the scope of the current tracing span.
pub fn spawn_blocking_with_tracing<F, R>(f: F) -> tokio::task::JoinHandle<R>
where
    F: FnOnce() -> R + Send + 'static,
    R: Send + 'static,
{
    let current_span = tracing::Span::current();
    tokio::task::spawn_blocking(move || current_span.in_scope(f))
}
