//! Declarative scenario descriptor.
//!
//! A scenario is plain data handed to the harness binding: a target host, a
//! think-time policy, and a weighted list of tasks. No subclassing, no
//! registration side effects.

use crate::error::ConfigError;
use crate::rand_source::RangeSource;
use crate::think::ThinkTime;
use crate::user::{echo_task, TaskFn};
use std::time::Duration;
use url::Url;

/// Default target when no host override is given.
pub const DEFAULT_HOST: &str = "http://localhost:80";

/// Describes one simulated-user behavior.
#[derive(Clone)]
pub struct UserDescriptor {
    host: Url,
    think_time: ThinkTime,
    tasks: Vec<(u32, TaskFn)>,
}

impl UserDescriptor {
    pub fn new(host: Url, think_time: ThinkTime) -> Self {
        Self {
            host,
            think_time,
            tasks: Vec::new(),
        }
    }

    /// Register a task with the given weight. Weights must be non-zero.
    pub fn task(mut self, weight: u32, task: TaskFn) -> Self {
        debug_assert!(weight > 0);
        self.tasks.push((weight, task));
        self
    }

    pub fn host(&self) -> &Url {
        &self.host
    }

    pub fn think_time(&self) -> ThinkTime {
        self.think_time
    }

    /// Weighted uniform draw over the registered tasks.
    ///
    /// Panics if no task has been registered; a descriptor without tasks is
    /// a construction bug, not a runtime condition.
    pub fn pick_task(&self, rng: &mut dyn RangeSource) -> TaskFn {
        assert!(!self.tasks.is_empty(), "descriptor has no tasks");
        let total: u32 = self.tasks.iter().map(|(w, _)| w).sum();
        let mut roll = rng.next_in(0, total);
        for (weight, task) in &self.tasks {
            if roll < *weight {
                return task.clone();
            }
            roll -= weight;
        }
        unreachable!("roll is always below the weight total")
    }
}

/// The canonical echo smoke-test descriptor: one task, 1-2s think-time.
pub fn smoke_descriptor(host: &str) -> Result<UserDescriptor, ConfigError> {
    let host = Url::parse(host)?;
    let think = ThinkTime::between(Duration::from_secs(1), Duration::from_secs(2));
    Ok(UserDescriptor::new(host, think).task(1, echo_task()))
}
