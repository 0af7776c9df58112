// src/main.rs

use jobrunner::errors::JobrunnerError;
use jobrunner::{cli, logging, run};

#[tokio::main]
async fn main() {
    if let Err(err) = run_main().await {
        eprintln!("{err}");
        std::process::exit(err.exit_code());
    }
}

async fn run_main() -> Result<(), JobrunnerError> {
    let args = cli::parse()?;
    if let Err(err) = logging::init_logging(args.log_level) {
        eprintln!("jobrunner: logging disabled: {err:#}");
    }
    run(&args).await?;
    Ok(())
}
