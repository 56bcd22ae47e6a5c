//! # File System Operations Module / 文件系统操作模块
//!
//! Reading test scripts and collecting them from a directory.
//!
//! 读取测试脚本并从目录中收集脚本。

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::error::MetadataError;
use crate::infra::t;

/// Extension of the test scripts collected by [`discover_scripts`].
pub const SCRIPT_EXTENSION: &str = "py";

/// Reads a whole script file as UTF-8.
pub fn read_script(path: &Path) -> Result<String, MetadataError> {
    fs::read_to_string(path).map_err(|source| MetadataError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Collects the `*.py` files directly inside `dir`, sorted by path.
/// Subdirectories are not searched.
///
/// 收集 `dir` 目录下（不含子目录）的 `*.py` 文件，并按路径排序。
pub fn discover_scripts(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir)
        .with_context(|| t!("fs.script_dir_read_failed", path = dir.display()).to_string())?;

    let mut scripts = Vec::new();
    for entry in entries {
        let path = entry
            .with_context(|| t!("fs.script_dir_read_failed", path = dir.display()).to_string())?
            .path();
        let is_script = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext == SCRIPT_EXTENSION);
        if path.is_file() && is_script {
            scripts.push(path);
        }
    }
    scripts.sort();
    Ok(scripts)
}

/// Expands a leading `~` in a user-supplied path.
pub fn expand_path(path: &Path) -> PathBuf {
    let raw = path.to_string_lossy();
    PathBuf::from(shellexpand::tilde(raw.as_ref()).into_owned())
}

/// Checks if a path exists and is a directory.
pub fn is_directory(path: &Path) -> bool {
    path.exists() && path.is_dir()
}
