//! The simulated user and its one task.

use crate::descriptor::UserDescriptor;
use crate::error::UserError;
use crate::rand_source::RangeSource;
use reqwest::{Client, StatusCode};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::debug;
use url::Url;

/// Inclusive lower bound of the echo value.
pub const ECHO_LOW: u32 = 1;
/// Exclusive upper bound of the echo value. The range is half-open, so the
/// values sent are 1 through 9.
pub const ECHO_HIGH: u32 = 10;

pub type TaskFuture<'a> =
    Pin<Box<dyn Future<Output = Result<EchoSample, UserError>> + Send + 'a>>;

/// One scripted action executed per loop iteration.
pub type TaskFn = Arc<dyn for<'a> Fn(&'a mut TaskContext) -> TaskFuture<'a> + Send + Sync>;

/// Everything a task needs to run: the shared client, the target host, and
/// the user's private randomness source.
pub struct TaskContext {
    pub client: Client,
    pub host: Url,
    pub rng: Box<dyn RangeSource>,
}

/// Recorded outcome of one successful task invocation.
#[derive(Debug, Clone)]
pub struct EchoSample {
    pub echo: u32,
    pub status: StatusCode,
    pub latency: Duration,
    pub body: String,
}

/// A single simulated user: loops `{ run_once, think }` while the run is
/// active. Failed requests are returned as `Err` and never stop the loop.
pub struct SmokeUser {
    ctx: TaskContext,
    descriptor: Arc<UserDescriptor>,
}

impl SmokeUser {
    pub fn new(client: Client, descriptor: Arc<UserDescriptor>, rng: Box<dyn RangeSource>) -> Self {
        let ctx = TaskContext {
            client,
            host: descriptor.host().clone(),
            rng,
        };
        Self { ctx, descriptor }
    }

    /// Draw the next echo value, uniform in [1, 10).
    pub fn next_echo(&mut self) -> u32 {
        self.ctx.rng.next_in(ECHO_LOW, ECHO_HIGH)
    }

    /// Pick a task by weight and execute it once.
    pub async fn run_once(&mut self) -> Result<EchoSample, UserError> {
        let task = self.descriptor.pick_task(self.ctx.rng.as_mut());
        task(&mut self.ctx).await
    }

    /// Sleep for the next think-time delay.
    pub async fn think(&mut self) {
        let pause = self.descriptor.think_time().pick(self.ctx.rng.as_mut());
        tokio::time::sleep(pause).await;
    }

    /// Run exactly `n` iterations of `{ task, think }`, collecting every
    /// outcome. Failures are recorded in place and the loop continues.
    pub async fn run_iterations(&mut self, n: usize) -> Vec<Result<EchoSample, UserError>> {
        let mut outcomes = Vec::with_capacity(n);
        for _ in 0..n {
            let outcome = self.run_once().await;
            if let Err(err) = &outcome {
                debug!("request failed: {err}");
            }
            outcomes.push(outcome);
            self.think().await;
        }
        outcomes
    }
}

/// The canonical smoke-test task: `GET /?echo_body=<i>`.
pub fn echo_task() -> TaskFn {
    fn run(ctx: &mut TaskContext) -> TaskFuture<'_> {
        Box::pin(echo_get(ctx))
    }
    Arc::new(run)
}

async fn echo_get(ctx: &mut TaskContext) -> Result<EchoSample, UserError> {
    let echo = ctx.rng.next_in(ECHO_LOW, ECHO_HIGH);
    let url = echo_url(&ctx.host, echo);

    let start = Instant::now();
    let res = ctx.client.get(url).send().await?;
    let latency = start.elapsed();

    let status = res.status();
    if !status.is_success() {
        return Err(UserError::Status(status));
    }

    let body = res.text().await?;
    Ok(EchoSample {
        echo,
        status,
        latency,
        body,
    })
}

fn echo_url(host: &Url, echo: u32) -> Url {
    let mut url = host.clone();
    url.set_path("/");
    url.query_pairs_mut()
        .clear()
        .append_pair("echo_body", &echo.to_string());
    url
}
