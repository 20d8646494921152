use clap::Parser;
use dotenv::dotenv;
use rouleat::config::Config;
use rouleat::controller;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    rouleat::init_tracing();

    let config = Config::parse();

    controller::serve(&config).await
}
