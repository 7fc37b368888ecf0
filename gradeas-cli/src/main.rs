use anyhow::Result;
use app_utils::{EnvConfig, init_tracing, load_env};
use clap::Parser;
use gradeas_cli::{Command, run};
use tracing::debug;

#[derive(Debug, Parser)]
#[command(name = "gradeas")]
#[command(about = "Work out where an assignment's grading type is read and written")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let env_file = load_env()?;
    init_tracing()?;
    if let Some(path) = env_file {
        debug!(path = %path.display(), "loaded .env");
    }

    let config = EnvConfig::from_env()?;
    debug!(?config, "initialized");

    let output = run(args.command, &config)?;
    println!("{output}");

    Ok(())
}
