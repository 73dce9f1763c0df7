use echo_service::EchoState;
use reqwest::Client;
use smoke_scenario::{echo_task, SeededRange, SmokeUser, ThinkTime, UserDescriptor};
use std::net::SocketAddr;
use std::sync::{Arc, OnceLock};
use std::time::Duration;
use tracing::{error, Level};
use tracing_subscriber::FmtSubscriber;
use url::Url;

#[allow(unused)]
pub fn init() {
    static ONCE_LOCK: OnceLock<()> = OnceLock::new();

    ONCE_LOCK.get_or_init(|| {
        let default_panic = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            default_panic(info);
            error!("Panic occurred: {info:?}");
            std::process::exit(1);
        }));

        FmtSubscriber::builder()
            .with_max_level(Level::DEBUG)
            .try_init()
            .ok();
    });
}

/// Echo server on an ephemeral port, with its request accounting handle.
#[allow(unused)]
pub async fn spawn_echo() -> (SocketAddr, EchoState) {
    let state = EchoState::new();
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(echo_service::serve(listener, state.clone()));
    (addr, state)
}

/// Descriptor pointed at `addr` with a millisecond-scale think-time so the
/// loop itself can be exercised quickly. Pick-time bounds for the real 1-2s
/// policy are covered by unit tests.
#[allow(unused)]
pub fn test_descriptor(addr: SocketAddr) -> Arc<UserDescriptor> {
    let host = Url::parse(&format!("http://{addr}")).unwrap();
    let think = ThinkTime::between(Duration::from_millis(1), Duration::from_millis(2));
    Arc::new(UserDescriptor::new(host, think).task(1, echo_task()))
}

#[allow(unused)]
pub fn test_user(addr: SocketAddr, seed: u64) -> SmokeUser {
    SmokeUser::new(
        Client::new(),
        test_descriptor(addr),
        Box::new(SeededRange::new(seed)),
    )
}
