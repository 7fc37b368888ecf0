use std::env::{self, VarError};
use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use dotenvy::dotenv;
use gradeas_model::types::GraderType;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::format;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, registry, EnvFilter};

pub const ASSIGNMENT_URL_VAR: &str = "ASSIGNMENT_URL";
pub const GRADER_TYPE_VAR: &str = "GRADER_TYPE";

/// Loads `.env` into the process environment. A missing file is not an error; the path of the file
/// that was loaded, if any, is returned.
pub fn load_env() -> Result<Option<PathBuf>> {
    match dotenv() {
        Ok(path) => Ok(Some(path)),
        Err(err) if err.not_found() => Ok(None),
        Err(err) => Err(err).context("could not load `.env`"),
    }
}

/// Defaults picked up from the environment, used when the command line leaves them out.
#[derive(Debug, Clone, Default)]
pub struct EnvConfig {
    pub assignment_url: Option<String>,
    pub grader_type: Option<GraderType>,
}

impl EnvConfig {
    pub fn from_env() -> Result<Self> {
        let assignment_url = optional_var(ASSIGNMENT_URL_VAR)?;
        let grader_type = optional_var(GRADER_TYPE_VAR)?.map(GraderType::new);
        Ok(Self {
            assignment_url,
            grader_type,
        })
    }
}

fn optional_var(key: &str) -> Result<Option<String>> {
    match env::var(key) {
        Ok(value) if value.is_empty() => Ok(None),
        Ok(value) => Ok(Some(value)),
        Err(VarError::NotPresent) => Ok(None),
        Err(err) => Err(err).with_context(|| format!("could not read env var `{key}`")),
    }
}

/// Logs go to stderr so that stdout only carries command output.
pub fn init_tracing() -> Result<()> {
    registry()
        .with(
            fmt::layer()
                .with_writer(io::stderr)
                .event_format(format().pretty()),
        )
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env()
                .context("invalid `RUST_LOG` filter")?,
        )
        .try_init()
        .context("could not install tracing subscriber")?;
    Ok(())
}
