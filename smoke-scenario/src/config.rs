//! Run configuration for the scenario binary.
//!
//! Only the scenario fields (host) and harness run parameters (TPS goal,
//! duration) live here; concurrency is tuned by the harness itself.

use crate::descriptor::{smoke_descriptor, UserDescriptor, DEFAULT_HOST};
use crate::error::ConfigError;
use crate::rand_source::{RangeSource, SeededRange, ThreadRange};
use clap::Parser;
use std::net::SocketAddr;
use std::num::NonZeroU32;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(name = "smoke-scenario", about = "Echo smoke test")]
pub struct RunConfig {
    /// Base URL the echo requests are issued against.
    #[arg(long, default_value = DEFAULT_HOST)]
    pub host: String,

    /// Goal transactions per second for the run.
    #[arg(long, default_value = "10")]
    pub tps: NonZeroU32,

    /// Run duration, e.g. "60s" or "5m".
    #[arg(long, value_parser = humantime::parse_duration, default_value = "60s")]
    pub duration: Duration,

    /// Seed for deterministic echo values. Each simulated user derives its
    /// own stream from this.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Address to serve Prometheus metrics on, if any.
    #[arg(long)]
    pub metrics_addr: Option<SocketAddr>,
}

impl RunConfig {
    pub fn descriptor(&self) -> Result<UserDescriptor, ConfigError> {
        smoke_descriptor(&self.host)
    }

    /// Randomness source for one simulated user. Seeded users each get a
    /// distinct stream so concurrent users do not mirror each other.
    pub fn range_source(&self) -> Box<dyn RangeSource> {
        static NEXT_STREAM: AtomicU64 = AtomicU64::new(0);
        match self.seed {
            Some(seed) => {
                let stream = NEXT_STREAM.fetch_add(1, Ordering::Relaxed);
                Box::new(SeededRange::new(seed.wrapping_add(stream)))
            }
            None => Box::new(ThreadRange),
        }
    }
}
