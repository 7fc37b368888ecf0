use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use app_utils::EnvConfig;
use clap::Subcommand;
use gradeas_model::assignment_grade::{AssignmentGrade, GradeAttributes};
use gradeas_model::types::GraderType;
use tracing::debug;

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Print the gradeas endpoint of an assignment
    UrlRoot {
        /// Assignment location, e.g. `i4x://org/course/category/name` [default: $ASSIGNMENT_URL]
        assignment_url: Option<String>,
    },
    /// Print the JSON body sent to an assignment's gradeas endpoint
    Payload {
        /// Assignment location [default: $ASSIGNMENT_URL]
        assignment_url: Option<String>,

        /// Grader type label, "Not Graded" to clear the grade [default: $GRADER_TYPE]
        #[arg(short, long)]
        grader_type: Option<String>,
    },
    /// Read grade attributes from a JSON file and print the endpoint
    FromJson {
        /// Attributes file, or `-` for stdin
        path: PathBuf,
    },
}

/// Runs a command, returning what should be printed to stdout.
pub fn run(command: Command, config: &EnvConfig) -> Result<String> {
    run_with_stdin(command, config, io::stdin())
}

/// Like [`run`], with `stdin` standing in for the process's standard input.
pub fn run_with_stdin(command: Command, config: &EnvConfig, stdin: impl Read) -> Result<String> {
    match command {
        Command::UrlRoot { assignment_url } => {
            let grade = grade_from(assignment_url, None, config)?;
            Ok(grade.url_root())
        }
        Command::Payload {
            assignment_url,
            grader_type,
        } => {
            let grade = grade_from(assignment_url, grader_type.map(GraderType::new), config)?;
            grade.to_json()
        }
        Command::FromJson { path } => {
            let json = read_input(&path, stdin)?;
            let grade = AssignmentGrade::from_json(&json)
                .with_context(|| format!("invalid grade attributes in {}", path.display()))?;
            Ok(grade.url_root())
        }
    }
}

fn grade_from(
    assignment_url: Option<String>,
    grader_type: Option<GraderType>,
    config: &EnvConfig,
) -> Result<AssignmentGrade> {
    let attributes = GradeAttributes {
        grader_type: grader_type.or_else(|| config.grader_type.clone()),
        assignment_url: assignment_url.or_else(|| config.assignment_url.clone()),
        location: None,
    };
    debug!(?attributes, "building assignment grade");

    AssignmentGrade::from_attributes(attributes)
}

fn read_input(path: &Path, stdin: impl Read) -> Result<String> {
    if path == Path::new("-") {
        read_all(stdin).context("could not read stdin")
    } else {
        let file = File::open(path).with_context(|| format!("could not read {}", path.display()))?;
        read_all(file).with_context(|| format!("could not read {}", path.display()))
    }
}

fn read_all(mut reader: impl Read) -> io::Result<String> {
    let mut contents = String::new();
    reader.read_to_string(&mut contents)?;
    Ok(contents)
}
