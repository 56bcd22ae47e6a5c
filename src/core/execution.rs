//! # Run Execution Module / 运行执行模块
//!
//! Launches one rendered harness command and turns the process outcome into
//! a [`RunResult`]. Timeouts and interrupts are enforced here; everything
//! else about the run is decided by the harness.
//!
//! 启动一条渲染后的测试框架命令，并将进程结果转换为 [`RunResult`]。
//! 超时和中断在此处执行，其余行为由测试框架决定。

use anyhow::Result;
use colored::*;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::{
    core::{
        descriptor::RunDescriptor,
        models::{FailureReason, RunResult},
    },
    infra::{command, t},
};

/// Executes `command_line` for `run` inside `working_dir`.
///
/// # Arguments
/// * `run` - The descriptor the command was rendered from
/// * `command_line` - The rendered harness command
/// * `working_dir` - Directory the launcher is started in
/// * `timeout` - Optional upper bound on the run's wall time
/// * `stop_token` - Cancelling it kills the child and fails the run as `Cancelled`
///
/// # Returns
/// A `RunResult`; an `Err` only when the command line cannot be split.
pub async fn execute_run(
    run: RunDescriptor,
    command_line: String,
    working_dir: &Path,
    timeout: Option<Duration>,
    stop_token: &CancellationToken,
) -> Result<RunResult> {
    let (program, args) = command::split_command(&command_line)?;

    println!(
        "{}",
        t!("run.running", run = &run.run_name, script = &run.script_path).blue()
    );
    info!(run = %run.run_name, script = %run.script_path, command = %command_line, "launching run");

    // A relative launcher path is resolved against the working directory,
    // not against the directory this process was started in.
    let program_path = Path::new(&program);
    let program_path: PathBuf = if program_path.is_relative() && program.contains('/') {
        working_dir.join(program_path)
    } else {
        program_path.to_path_buf()
    };

    let mut cmd = tokio::process::Command::new(&program_path);
    cmd.args(&args).kill_on_drop(true).current_dir(working_dir);

    let start_time = Instant::now();
    let captured = command::spawn_and_capture(cmd);
    let bounded = async {
        match timeout {
            Some(limit) => tokio::time::timeout(limit, captured).await.map_err(|_| limit),
            None => Ok(captured.await),
        }
    };

    // Dropping the capture future kills the child through `kill_on_drop`.
    let (status_res, output) = tokio::select! {
        biased;
        _ = stop_token.cancelled() => {
            println!("{}", t!("run.interrupted", run = &run.run_name).yellow());
            info!(run = %run.run_name, "run interrupted");
            return Ok(RunResult::Failed {
                run,
                command: command_line,
                output: t!("run.cancel_message").to_string(),
                reason: FailureReason::Cancelled,
                duration: start_time.elapsed(),
            });
        }
        outcome = bounded => match outcome {
            Ok(res) => res,
            Err(limit) => {
                println!(
                    "{}",
                    t!("run.timed_out", run = &run.run_name, timeout = limit.as_secs()).red()
                );
                return Ok(RunResult::Failed {
                    run,
                    command: command_line,
                    output: t!("run.timeout_message").to_string(),
                    reason: FailureReason::Timeout,
                    duration: limit,
                });
            }
        },
    };
    let duration = start_time.elapsed();

    if !output.trim().is_empty() {
        println!("{}", output.trim_end());
    }

    let status = match status_res {
        Ok(status) => status,
        Err(e) => {
            println!(
                "{}",
                t!("run.launch_failed", run = &run.run_name, program = &program).red()
            );
            return Ok(RunResult::Failed {
                run,
                command: command_line,
                output: format!("{output}{e}"),
                reason: FailureReason::LaunchFailed,
                duration,
            });
        }
    };

    let seconds = format!("{:.2}", duration.as_secs_f64());
    if status.success() {
        println!(
            "{}",
            t!("run.passed", run = &run.run_name, duration = &seconds).green()
        );
        Ok(RunResult::Passed {
            run,
            command: command_line,
            output,
            duration,
        })
    } else {
        println!(
            "{}",
            t!("run.failed", run = &run.run_name, duration = &seconds).red()
        );
        Ok(RunResult::Failed {
            run,
            command: command_line,
            output,
            reason: FailureReason::NonZeroExit(status.code()),
            duration,
        })
    }
}
