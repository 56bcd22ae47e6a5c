//! # Command Execution Module / 命令执行模块
//!
//! Splitting rendered command lines into argv form and spawning processes
//! with their output captured.
//!
//! 将渲染后的命令行拆分为 argv 形式，并在捕获输出的情况下派生进程。

use anyhow::{Result, anyhow, bail};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::infra::t;

/// Splits a command line using POSIX shell quoting rules.
///
/// No variable or tilde expansion happens here; `${NAME}` text that survived
/// resolution reaches the harness untouched.
///
/// 按 POSIX shell 引号规则拆分命令行。此处不做变量或波浪号展开。
pub fn split_command(command_line: &str) -> Result<(String, Vec<String>)> {
    let mut parts = shlex::split(command_line)
        .ok_or_else(|| anyhow!(t!("run.command_parse_failed", command = command_line).to_string()))?;

    if parts.is_empty() {
        bail!(t!("run.command_empty").to_string());
    }

    let program = parts.remove(0);
    Ok((program, parts))
}

/// Spawns a command, captures its stdout and stderr.
/// The output streams are read concurrently and combined into a single string.
///
/// # Arguments
/// * `cmd` - The `tokio::process::Command` to execute.
///
/// # Returns
/// A tuple containing:
/// - The `ExitStatus` of the process wrapped in an `io::Result`.
/// - The combined stdout and stderr as a `String`.
///
/// 派生一个命令，捕获其 stdout 和 stderr。
/// 输出流被并发读取并合并到一个字符串中。
pub async fn spawn_and_capture(
    mut cmd: tokio::process::Command,
) -> (std::io::Result<std::process::ExitStatus>, String) {
    let mut child = match cmd
        .stdout(std::process::Stdio::piped())
        .stderr(std::process::Stdio::piped())
        .spawn()
    {
        Ok(child) => child,
        Err(e) => return (Err(e), String::new()),
    };

    let (Some(stdout), Some(stderr)) = (child.stdout.take(), child.stderr.take()) else {
        return (
            Err(std::io::Error::other(t!("run.capture_failed").to_string())),
            String::new(),
        );
    };

    // Both readers append to the same buffer so lines stay roughly interleaved.
    // 两个读取任务写入同一个缓冲区，使输出行大致保持交错顺序。
    let output = Arc::new(tokio::sync::Mutex::new(String::new()));

    let stdout_output = Arc::clone(&output);
    let stdout_handle = tokio::spawn(async move {
        let mut lines = BufReader::new(stdout).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            let mut output = stdout_output.lock().await;
            output.push_str(&line);
            output.push('\n');
        }
    });

    let stderr_output = Arc::clone(&output);
    let stderr_handle = tokio::spawn(async move {
        let mut lines = BufReader::new(stderr).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            let mut output = stderr_output.lock().await;
            output.push_str(&line);
            output.push('\n');
        }
    });

    let status = child.wait().await;

    if let Err(e) = stdout_handle.await {
        tracing::warn!("failed to join stdout task: {e}");
    }
    if let Err(e) = stderr_handle.await {
        tracing::warn!("failed to join stderr task: {e}");
    }

    let captured = output.lock().await.clone();
    (status, captured)
}
