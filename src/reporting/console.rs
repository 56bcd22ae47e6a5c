//! # Console Reporting Module / 控制台报告模块
//!
//! Prints a colored summary of every run after a batch, followed by the
//! captured output of the runs that failed.
//!
//! 在批处理结束后打印每个运行的彩色摘要，随后输出失败运行的捕获内容。

use colored::*;

use crate::core::models::{FailureReason, RunResult};
use crate::infra::t;

/// Prints a formatted summary of run results to the console.
///
/// # Output Format / 输出格式
/// ```text
/// --- Run Summary ---
///   - Passed     | run1             | TC_ACE_1_2.py                      |      1.23s
///   - Failed     | run2             | TC_ACE_1_2.py                      |      0.45s
///   - Skipped    | run3             | TC_ACE_1_2.py                      |        N/A
/// ```
pub fn print_summary(results: &[RunResult], locale: &str) {
    println!("\n{}", t!("report.summary_banner", locale = locale).bold());

    for result in results {
        let status_str = result.get_status_str(locale);
        let duration_str = result
            .get_duration()
            .map(|d| format!("{:.2?}", d))
            .unwrap_or_else(|| "N/A".to_string());

        let status_colored = match result {
            RunResult::Planned { .. } => status_str.cyan(),
            RunResult::Passed { .. } => status_str.green(),
            RunResult::Failed { .. } => status_str.red(),
            RunResult::Skipped { .. } => status_str.dimmed(),
        };

        let run = result.run();
        println!(
            "  - {:<10} | {:<16} | {:<34} | {:>10}",
            status_colored, run.run_name, run.script_path, duration_str
        );
    }
}

/// Prints the command and captured output of each failed run.
///
/// 打印每个失败运行的命令及其捕获的输出。
pub fn print_failure_details(failures: &[&RunResult], locale: &str) {
    if failures.is_empty() {
        return;
    }

    println!(
        "\n{}",
        t!("report.failure_banner", locale = locale).red().bold()
    );

    for result in failures {
        let RunResult::Failed { run, command, output, reason, .. } = result else {
            continue;
        };

        let reason_str = match reason {
            FailureReason::Timeout => t!("report.reason_timeout", locale = locale).to_string(),
            FailureReason::LaunchFailed => {
                t!("report.reason_launch_failed", locale = locale).to_string()
            }
            FailureReason::Cancelled => t!("report.reason_cancelled", locale = locale).to_string(),
            FailureReason::NonZeroExit(_) => {
                t!("report.reason_exit", locale = locale, detail = reason).to_string()
            }
        };

        println!(
            "\n{} {} ({})",
            t!("report.failed_run", locale = locale).red(),
            format!("{} :: {}", run.script_path, run.run_name).bold(),
            reason_str.yellow()
        );
        println!("{} {}", t!("report.command_prefix", locale = locale).blue(), command);
        println!("{}", "-".repeat(60));
        if output.trim().is_empty() {
            println!("{}", t!("report.no_output", locale = locale).dimmed());
        } else {
            println!("{}", output.trim_end());
        }
        println!("{}", "-".repeat(60));
    }
}
