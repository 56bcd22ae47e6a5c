//! # List Command Module / 列表命令模块
//!
//! Implements `script-runner list`: shows the resolved runs of the selected
//! scripts together with their rendered commands, as text or JSON.
//!
//! 实现 `script-runner list`：以文本或 JSON 形式显示所选脚本中已解析的运行
//! 及其渲染后的命令。

use anyhow::{Context, Result};
use colored::*;
use serde::Serialize;

use crate::{
    cli::{ScriptSelection, commands::prepare},
    core::{RunDescriptor, command},
    infra::t,
};

/// One entry of the JSON listing.
#[derive(Debug, Serialize)]
struct ListedRun<'a> {
    #[serde(flatten)]
    run: &'a RunDescriptor,
    command: String,
}

pub fn execute(selection: ScriptSelection, json: bool, locale: &str) -> Result<()> {
    let (runner, scripts) = prepare(&selection)?;

    let mut runs = Vec::new();
    for script in &scripts {
        let parsed = runner.parse(script).with_context(|| {
            t!("run.script_failed", locale = locale, path = script.display()).to_string()
        })?;
        runs.extend(parsed);
    }

    if json {
        let listing: Vec<ListedRun<'_>> = runs
            .iter()
            .map(|run| ListedRun {
                run,
                command: command::build(run),
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&listing)?);
        return Ok(());
    }

    if runs.is_empty() {
        println!("{}", t!("run.no_runs_declared", locale = locale).yellow());
        return Ok(());
    }

    for run in &runs {
        println!("{}", format!("{} :: {}", run.script_path, run.run_name).bold());
        println!("    {}", command::build(run));
    }
    Ok(())
}
