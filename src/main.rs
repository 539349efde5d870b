use clap::Parser;
use log::info;

use reel::api::ReelApi;
use reel::conf::Config;
use reel::core::{CliArgs, ReelError, setup_logging};
use reel::service::ReelService;

#[tokio::main]
async fn main() -> Result<(), ReelError> {
    setup_logging();
    let args = CliArgs::parse();
    info!(args = args; "Reel starting.");

    let config = Config::load(args.config.as_deref())?;
    let service = ReelService::new(&config).await?;
    info!(
        "Serving table '{}' (populate mode: {:?})",
        service.tables().name(),
        config.loader.mode
    );

    ReelApi::new(service)
        .with_cors(config.server.cors)
        .serve(&config.server.addr())
        .await
}
