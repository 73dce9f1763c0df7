use echo_service::EchoState;
use std::net::SocketAddr;
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() {
    FmtSubscriber::builder()
        .with_env_filter("echo_service=debug")
        .init();

    tokio::task::spawn(async { echo_service::tps_measure_task().await });

    let addr: SocketAddr = "0.0.0.0:3002".parse().unwrap();
    echo_service::run(addr, EchoState::new()).await;
}
