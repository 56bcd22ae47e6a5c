//! # Run Command Module / 运行命令模块
//!
//! Implements `script-runner run`: prints or executes every run declared in
//! the selected scripts and reports the outcome.
//!
//! 实现 `script-runner run`：打印或执行所选脚本中声明的每个运行并报告结果。

use anyhow::{Result, bail};
use colored::*;
use std::{fs, path::PathBuf, time::Duration};
use tokio::signal;
use tokio_util::sync::CancellationToken;

use crate::{
    cli::{ScriptSelection, commands::prepare},
    core::{RunOptions, RunResult},
    infra::t,
    reporting::{print_failure_details, print_summary},
};

/// Parsed arguments of the `run` subcommand.
#[derive(Debug, Clone)]
pub struct RunArgs {
    pub selection: ScriptSelection,
    pub dry_run: bool,
    pub project_dir: PathBuf,
    pub timeout_secs: Option<u64>,
    pub keep_going: bool,
}

/// Executes the run command with the provided arguments.
///
/// # Returns
/// `Err` when a script could not be processed or any run failed.
pub async fn execute(args: RunArgs, locale: &str) -> Result<()> {
    let (runner, scripts) = prepare(&args.selection)?;

    let working_dir = fs::canonicalize(&args.project_dir).map_err(|e| {
        anyhow::anyhow!(
            "{}: {e}",
            t!("run.project_dir_not_found", locale = locale, path = args.project_dir.display())
        )
    })?;

    let options = RunOptions {
        dry_run: args.dry_run,
        keep_going: args.keep_going,
        timeout: args.timeout_secs.map(Duration::from_secs),
        working_dir,
        stop_token: if args.dry_run {
            CancellationToken::new()
        } else {
            setup_signal_handler(locale)
        },
    };

    let mut results: Vec<RunResult> = Vec::new();
    let mut script_errors = 0usize;
    let mut aborted: Option<anyhow::Error> = None;

    for script in &scripts {
        if !args.dry_run {
            println!(
                "{}",
                t!("run.processing_script", locale = locale, path = script.display()).bold()
            );
        }

        match runner.run(script, &options).await {
            Ok(script_results) => {
                let failed = script_results.iter().any(RunResult::is_failure);
                results.extend(script_results);
                if failed && !args.keep_going {
                    options.stop_token.cancel();
                }
            }
            Err(e) if args.keep_going => {
                eprintln!(
                    "{} {e:#}",
                    t!("run.script_failed", locale = locale, path = script.display()).red()
                );
                script_errors += 1;
            }
            Err(e) => {
                aborted = Some(e.context(
                    t!("run.script_failed", locale = locale, path = script.display()).to_string(),
                ));
                break;
            }
        }
    }

    // A dry run only prints commands; stdout must stay machine-readable.
    if args.dry_run {
        return aborted.map_or(Ok(()), Err);
    }

    if results.is_empty() {
        println!("{}", t!("run.no_runs_declared", locale = locale).yellow());
    } else {
        print_summary(&results, locale);
    }

    let failures: Vec<&RunResult> = results.iter().filter(|r| r.is_failure()).collect();
    print_failure_details(&failures, locale);

    // Runs that already executed are reported before the aborting error.
    if let Some(e) = aborted {
        return Err(e);
    }

    if !failures.is_empty() || script_errors > 0 {
        bail!(t!(
            "run.batch_failed",
            locale = locale,
            failed = failures.len(),
            errors = script_errors
        )
        .to_string());
    }

    println!("\n{}", t!("run.all_passed", locale = locale).green().bold());
    Ok(())
}

fn setup_signal_handler(locale: &str) -> CancellationToken {
    let token = CancellationToken::new();
    let token_clone = token.clone();
    let locale = locale.to_string();

    tokio::spawn(async move {
        if signal::ctrl_c().await.is_ok() {
            println!("\n{}", t!("run.shutdown_signal", locale = &locale).yellow());
            token_clone.cancel();
        }
    });

    token
}
