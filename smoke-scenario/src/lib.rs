//! Smoke-test scenario for an echo endpoint.
//!
//! Declares a single simulated-user behavior: issue `GET /?echo_body=<i>`
//! against a target host, where `i` is drawn uniformly from the half-open
//! range [1, 10), then pause for a uniformly random 1-2s think-time before
//! the next iteration. Scheduling, concurrency, and sample accounting are
//! owned by the load-generation harness this scenario is handed to; the
//! types here only describe the behavior.

pub mod config;
pub mod descriptor;
pub mod error;
pub mod rand_source;
pub mod think;
pub mod user;

pub use config::RunConfig;
pub use descriptor::{smoke_descriptor, UserDescriptor};
pub use error::{ConfigError, UserError};
pub use rand_source::{RangeSource, SeededRange, ThreadRange};
pub use think::ThinkTime;
pub use user::{echo_task, EchoSample, SmokeUser, TaskContext};
