//! Full harness-driven run. Slow; gated behind the `integration` feature.

mod utils;
#[allow(unused)]
use utils::*;

#[cfg(feature = "integration")]
mod tests {
    use super::*;

    use balter::prelude::*;
    use reqwest::Client;
    use smoke_scenario::{EchoSample, SmokeUser, ThreadRange, UserDescriptor, UserError};
    use std::sync::{Arc, OnceLock};
    use std::time::Duration;

    static TARGET: OnceLock<Arc<UserDescriptor>> = OnceLock::new();
    static CLIENT: OnceLock<Client> = OnceLock::new();

    #[tokio::test]
    async fn harness_run_records_successful_samples() {
        init();

        let (addr, state) = spawn_echo().await;
        TARGET.set(test_descriptor(addr)).ok();

        let stats = echo_smoke()
            .tps(50)
            .duration(Duration::from_secs(10))
            .await;

        assert!(state.requests_served() > 0);
        assert_eq!(stats.goal_tps, 50);
        assert!(stats.actual_tps > 0.);
        assert!(stats.concurrency >= 1);
    }

    /* Scenario Helpers */

    #[scenario]
    async fn echo_smoke() {
        let descriptor = TARGET.get().expect("target registered").clone();
        let client = CLIENT.get_or_init(Client::new).clone();
        let mut user = SmokeUser::new(client, descriptor, Box::new(ThreadRange));
        let _ = echo_round(&mut user).await;
        user.think().await;
    }

    #[transaction]
    async fn echo_round(user: &mut SmokeUser) -> Result<EchoSample, UserError> {
        user.run_once().await
    }
}
