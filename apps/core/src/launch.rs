use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::Application;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LaunchError {
    #[error("empty launch command for {0}")]
    EmptyCommand(String),
}

/// Everything an external spawner needs to start an application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaunchPlan {
    pub program: String,
    pub args: Vec<String>,
    pub working_dir: PathBuf,
}

/// Field codes such as `%u` or `%F` are dropped; the launcher never passes
/// files or URLs.
pub fn command_argv(command: &str) -> Vec<String> {
    command
        .split(' ')
        .filter(|arg| !arg.is_empty() && !arg.starts_with('%'))
        .map(str::to_string)
        .collect()
}

pub fn prepare_launch(app: &Application, working_dir: &Path) -> Result<LaunchPlan, LaunchError> {
    let mut argv = command_argv(&app.launch_command).into_iter();
    let program = argv
        .next()
        .ok_or_else(|| LaunchError::EmptyCommand(app.id.clone()))?;

    Ok(LaunchPlan {
        program,
        args: argv.collect(),
        working_dir: working_dir.to_path_buf(),
    })
}
