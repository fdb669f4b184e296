use clap::Parser;
use courtside::cli::{Args, Command};
use courtside::commands::{handle_config_command, handle_data_command};
use courtside::config::Config;
use courtside::context::AppContext;
use courtside::error::AppError;
use courtside::logging::setup_logging;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let args = Args::parse();

    // Config edits must work even when the current file does not validate
    if let Command::Config {
        list,
        api_domain,
        data_dir,
    } = args.command.clone()
    {
        return handle_config_command(list, api_domain, data_dir).await;
    }

    let config = Config::load().await?;

    // The guard must be kept alive for the duration of the program
    let (log_file_path, _guard) = setup_logging(&args, &config).await?;
    info!("Logs are being written to: {log_file_path}");

    let context = AppContext::from_config(&config)?;
    info!("Remote sources: {:?}", context.remote());

    handle_data_command(&context, args.command).await
}
