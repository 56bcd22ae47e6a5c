//! # Data Models Module / 数据模型模块
//!
//! Outcome types for planned and executed runs.
//!
//! 已计划和已执行运行的结果类型。

use std::fmt;
use std::time::Duration;

use crate::core::descriptor::RunDescriptor;
use crate::infra::t;

/// Enumerates the possible reasons for a run failure.
/// 枚举运行失败的可能原因。
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum FailureReason {
    /// The harness exited with a non-zero status. `None` when the process was
    /// terminated by a signal.
    /// 测试框架以非零状态退出。如果进程被信号终止，则为 `None`。
    NonZeroExit(Option<i32>),
    /// The run exceeded its configured timeout.
    /// 运行超出了配置的超时时间。
    Timeout,
    /// The launcher could not be spawned at all.
    /// 无法启动启动器。
    LaunchFailed,
    /// The run was interrupted while executing.
    /// 运行在执行过程中被中断。
    Cancelled,
}

/// Represents the final result of a single run.
///
/// 表示单个运行的最终结果。
#[derive(Debug, Clone)]
pub enum RunResult {
    /// Dry run: the command was printed, not executed.
    /// 试运行：命令仅被打印，未执行。
    Planned { run: RunDescriptor, command: String },
    /// The harness exited successfully.
    /// 测试框架成功退出。
    Passed {
        run: RunDescriptor,
        command: String,
        output: String,
        duration: Duration,
    },
    /// The run failed.
    /// 运行失败。
    Failed {
        run: RunDescriptor,
        command: String,
        output: String,
        reason: FailureReason,
        duration: Duration,
    },
    /// The run was never started because the batch was stopped.
    /// 由于批处理已停止，该运行从未启动。
    Skipped { run: RunDescriptor, command: String },
}

impl RunResult {
    pub fn run(&self) -> &RunDescriptor {
        match self {
            RunResult::Planned { run, .. }
            | RunResult::Passed { run, .. }
            | RunResult::Failed { run, .. }
            | RunResult::Skipped { run, .. } => run,
        }
    }

    pub fn command(&self) -> &str {
        match self {
            RunResult::Planned { command, .. }
            | RunResult::Passed { command, .. }
            | RunResult::Failed { command, .. }
            | RunResult::Skipped { command, .. } => command,
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, RunResult::Failed { .. })
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, RunResult::Failed { reason, .. } if *reason == FailureReason::Timeout)
    }

    pub fn get_output(&self) -> &str {
        match self {
            RunResult::Passed { output, .. } | RunResult::Failed { output, .. } => output,
            _ => "",
        }
    }

    pub fn get_duration(&self) -> Option<Duration> {
        match self {
            RunResult::Passed { duration, .. } | RunResult::Failed { duration, .. } => {
                Some(*duration)
            }
            _ => None,
        }
    }

    /// Gets the status of the run as a localized string for display.
    /// 以本地化字符串形式获取运行状态以供显示。
    pub fn get_status_str(&self, locale: &str) -> String {
        match self {
            RunResult::Planned { .. } => t!("report.status_planned", locale = locale).to_string(),
            RunResult::Passed { .. } => t!("report.status_passed", locale = locale).to_string(),
            RunResult::Failed { reason, .. } => match reason {
                FailureReason::Timeout => t!("report.status_timeout", locale = locale).to_string(),
                FailureReason::Cancelled => {
                    t!("report.status_cancelled", locale = locale).to_string()
                }
                _ => t!("report.status_failed", locale = locale).to_string(),
            },
            RunResult::Skipped { .. } => t!("report.status_skipped", locale = locale).to_string(),
        }
    }
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureReason::NonZeroExit(Some(code)) => write!(f, "exit code {code}"),
            FailureReason::NonZeroExit(None) => f.write_str("terminated by signal"),
            FailureReason::Timeout => f.write_str("timeout"),
            FailureReason::LaunchFailed => f.write_str("launch failed"),
            FailureReason::Cancelled => f.write_str("cancelled"),
        }
    }
}
