//! Subcommand implementations.
//! 子命令实现。

pub mod list;
pub mod run;

use anyhow::{Context, Result, bail};
use std::path::PathBuf;

use crate::cli::ScriptSelection;
use crate::core::ScriptRunner;
use crate::infra::{fs, t};

/// Loads the environment once and resolves the script list: explicit
/// `--script` paths first, then the sorted `*.py` files of `--dir`.
pub(crate) fn prepare(selection: &ScriptSelection) -> Result<(ScriptRunner, Vec<PathBuf>)> {
    let env_path = fs::expand_path(&selection.env);
    let runner = ScriptRunner::from_env_file(&env_path).with_context(|| {
        t!("env.load_failed", path = env_path.display()).to_string()
    })?;
    tracing::debug!(path = %env_path.display(), vars = runner.environment().len(), "environment loaded");

    let mut scripts: Vec<PathBuf> = selection.scripts.iter().map(|p| fs::expand_path(p)).collect();
    if let Some(dir) = &selection.dir {
        let dir = fs::expand_path(dir);
        if !fs::is_directory(&dir) {
            bail!(t!("fs.script_dir_not_found", path = dir.display()).to_string());
        }
        scripts.extend(fs::discover_scripts(&dir)?);
    }

    if scripts.is_empty() {
        bail!(t!("run.no_scripts").to_string());
    }
    Ok((runner, scripts))
}
