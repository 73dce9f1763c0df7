//! Local echo target for the smoke-test scenario.
//!
//! `GET /?echo_body=<v>` responds with `<v>` as the body. A rate-limited
//! variant at `/limited/:max_tps` returns 500 once the limit is exceeded,
//! for observing failed samples.

use axum::{
    debug_handler,
    extract::{Path, Query, RawQuery, State},
    http::StatusCode,
    routing::get,
    Router,
};
use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use lazy_static::lazy_static;
use metrics::counter;
use serde::Deserialize;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::{
    num::NonZeroU32,
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc, RwLock,
    },
    time::Duration,
};
use tokio::net::TcpListener;
use tracing::debug;

/// Per-server request accounting, shared with tests.
#[derive(Clone, Default)]
pub struct EchoState {
    inner: Arc<EchoStateInner>,
}

#[derive(Default)]
struct EchoStateInner {
    served: AtomicU64,
    queries: RwLock<Vec<String>>,
}

impl EchoState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn requests_served(&self) -> u64 {
        self.inner.served.load(Ordering::Relaxed)
    }

    /// Raw query strings in arrival order.
    pub fn recorded_queries(&self) -> Vec<String> {
        self.inner.queries.read().unwrap().clone()
    }

    fn record(&self, raw_query: Option<String>) {
        self.inner.served.fetch_add(1, Ordering::Relaxed);
        self.inner
            .queries
            .write()
            .unwrap()
            .push(raw_query.unwrap_or_default());
    }
}

pub fn app(state: EchoState) -> Router {
    Router::new()
        .route("/", get(echo))
        .route("/limited/:max_tps", get(limited))
        .with_state(state)
}

pub async fn run(addr: SocketAddr, state: EchoState) {
    let listener = TcpListener::bind(&addr).await.unwrap();
    serve(listener, state).await;
}

/// Serve on an already-bound listener; lets tests use an ephemeral port.
pub async fn serve(listener: TcpListener, state: EchoState) {
    axum::serve(listener, app(state)).await.unwrap();
}

#[derive(Debug, Deserialize)]
pub struct EchoParams {
    echo_body: Option<String>,
    delay_ms: Option<u64>,
}

#[debug_handler(state = EchoState)]
pub async fn echo(
    State(state): State<EchoState>,
    RawQuery(raw): RawQuery,
    Query(params): Query<EchoParams>,
) -> String {
    counter!("echo-service.requests").increment(1);
    TPS_MEASURE.fetch_add(1, Ordering::Relaxed);
    state.record(raw);

    if let Some(delay_ms) = params.delay_ms {
        tokio::time::sleep(Duration::from_millis(delay_ms)).await;
    }

    params.echo_body.unwrap_or_default()
}

lazy_static! {
    static ref LIMITED_MAP: Arc<RwLock<HashMap<u32, Arc<DefaultDirectRateLimiter>>>> =
        Arc::new(RwLock::new(HashMap::new()));
}

#[debug_handler(state = EchoState)]
pub async fn limited(
    State(state): State<EchoState>,
    Path(max_tps): Path<u32>,
    RawQuery(raw): RawQuery,
    Query(params): Query<EchoParams>,
) -> Result<String, StatusCode> {
    counter!("echo-service.requests").increment(1);
    TPS_MEASURE.fetch_add(1, Ordering::Relaxed);
    state.record(raw);

    let read = LIMITED_MAP.read().unwrap().get(&max_tps).cloned();
    let limiter = if let Some(limiter) = read {
        limiter
    } else {
        let limiter = Arc::new(rate_limiter(max_tps));
        LIMITED_MAP.write().unwrap().insert(max_tps, limiter.clone());
        limiter
    };

    match limiter.check() {
        Ok(_) => Ok(params.echo_body.unwrap_or_default()),
        Err(_) => {
            debug!("over limit, rejecting");
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/** Utils **/

pub fn rate_limiter(tps: u32) -> DefaultDirectRateLimiter {
    // a zero limit would panic the handler task; clamp to one per second
    let tps = NonZeroU32::new(tps).unwrap_or(NonZeroU32::MIN);
    RateLimiter::direct(Quota::per_second(tps))
}

/** TPS Printer **/

static TPS_MEASURE: AtomicU64 = AtomicU64::new(0);

pub async fn tps_measure_task() {
    loop {
        tokio::time::sleep(Duration::from_millis(1000)).await;
        let requests = TPS_MEASURE.fetch_min(0, Ordering::Relaxed);
        println!("{requests} TPS");
    }
}
