use balter::prelude::*;
use clap::Parser;
use metrics_exporter_prometheus::PrometheusBuilder;
use reqwest::Client;
use smoke_scenario::{EchoSample, RunConfig, SmokeUser, UserDescriptor, UserError};
use std::sync::{Arc, OnceLock};
use tracing::info;
use tracing_subscriber::FmtSubscriber;

static CONFIG: OnceLock<RunConfig> = OnceLock::new();
static DESCRIPTOR: OnceLock<Arc<UserDescriptor>> = OnceLock::new();
static CLIENT: OnceLock<Client> = OnceLock::new();

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = RunConfig::parse();

    FmtSubscriber::builder()
        .with_env_filter("balter=info,smoke_scenario=info")
        .init();

    if let Some(addr) = config.metrics_addr {
        PrometheusBuilder::new().with_http_listener(addr).install()?;
    }

    let descriptor = Arc::new(config.descriptor()?);
    info!("echo smoke test against {}", descriptor.host());

    DESCRIPTOR.set(descriptor).ok();
    let tps = config.tps;
    let duration = config.duration;
    CONFIG.set(config).ok();

    let stats = smoke_user().tps(tps.get()).duration(duration).await;

    info!(
        "run complete: {:.1} TPS measured (goal {}), concurrency {}, p99 {:?}, error rate {:.2}%{}",
        stats.actual_tps,
        stats.goal_tps,
        stats.concurrency,
        stats.latency_p99,
        stats.error_rate * 100.,
        if stats.tps_limited { " (TPS limited)" } else { "" },
    );

    Ok(())
}

#[scenario]
async fn smoke_user() {
    let descriptor = DESCRIPTOR.get().expect("descriptor set before run").clone();
    let config = CONFIG.get().expect("config set before run");
    let client = CLIENT.get_or_init(Client::new).clone();

    let mut user = SmokeUser::new(client, descriptor, config.range_source());
    let _ = echo_round(&mut user).await;
    user.think().await;
}

#[transaction]
async fn echo_round(user: &mut SmokeUser) -> Result<EchoSample, UserError> {
    user.run_once().await
}
