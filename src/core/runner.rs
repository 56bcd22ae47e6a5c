//! # Script Runner / 脚本运行器
//!
//! The caller-facing entry points: parse a script into run descriptors,
//! render their harness commands, and print or execute them.
//!
//! 面向调用方的入口：将脚本解析为运行描述符，渲染其测试框架命令，
//! 并打印或执行这些命令。

use anyhow::Result;
use colored::*;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio_util::sync::CancellationToken;

use crate::core::annotations::parse_annotations;
use crate::core::command;
use crate::core::descriptor::RunDescriptor;
use crate::core::environment::Environment;
use crate::core::error::MetadataError;
use crate::core::execution::execute_run;
use crate::core::models::RunResult;
use crate::infra::{fs, t};

/// Knobs for [`ScriptRunner::run`].
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Print each command instead of executing it.
    pub dry_run: bool,
    /// Keep executing after a failed run instead of skipping the rest.
    pub keep_going: bool,
    /// Per-run wall time limit.
    pub timeout: Option<Duration>,
    /// Directory the harness launcher is started in.
    pub working_dir: PathBuf,
    /// Cancelled on Ctrl-C. The in-flight run is killed and the rest are skipped.
    pub stop_token: CancellationToken,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            dry_run: false,
            keep_going: false,
            timeout: None,
            working_dir: PathBuf::from("."),
            stop_token: CancellationToken::new(),
        }
    }
}

/// Resolves script annotations against one environment.
///
/// 针对同一个环境解析脚本注解。
#[derive(Debug, Clone)]
pub struct ScriptRunner {
    environment: Environment,
}

impl ScriptRunner {
    pub fn new(environment: Environment) -> Self {
        Self { environment }
    }

    /// Loads the environment file once and wraps it.
    pub fn from_env_file(path: &Path) -> Result<Self, MetadataError> {
        Ok(Self::new(Environment::load(path)?))
    }

    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    /// Parses already-loaded script text. `script_path` is recorded verbatim
    /// in every descriptor.
    pub fn parse_text(
        &self,
        script_text: &str,
        script_path: &str,
    ) -> Result<Vec<RunDescriptor>, MetadataError> {
        parse_annotations(script_text, script_path)?
            .iter()
            .map(|record| RunDescriptor::from_record(&self.environment.resolve(record)))
            .collect()
    }

    /// Reads `script_path` and returns one descriptor per declared run, in
    /// declaration order.
    ///
    /// 读取 `script_path`，按声明顺序为每个声明的运行返回一个描述符。
    pub fn parse(&self, script_path: &Path) -> Result<Vec<RunDescriptor>, MetadataError> {
        let text = fs::read_script(script_path)?;
        self.parse_text(&text, &script_path.to_string_lossy())
    }

    /// Renders the harness command of every run declared in `script_path`.
    pub fn generate_run_commands(&self, script_path: &Path) -> Result<Vec<String>, MetadataError> {
        Ok(self.parse(script_path)?.iter().map(command::build).collect())
    }

    /// Prints (dry run) or executes every run declared in `script_path`.
    ///
    /// Runs are executed one at a time in declaration order. After the first
    /// failure the remaining runs are skipped unless `keep_going` is set.
    ///
    /// 打印（试运行）或执行 `script_path` 中声明的每个运行。
    /// 运行按声明顺序逐个执行；除非设置了 `keep_going`，
    /// 第一次失败后其余运行将被跳过。
    pub async fn run(&self, script_path: &Path, options: &RunOptions) -> Result<Vec<RunResult>> {
        let runs = self.parse(script_path)?;
        let mut results = Vec::with_capacity(runs.len());
        let mut stopped = false;

        for run in runs {
            let command = command::build(&run);

            if options.dry_run {
                println!("{command}");
                results.push(RunResult::Planned { run, command });
                continue;
            }

            if stopped || options.stop_token.is_cancelled() {
                println!(
                    "{}",
                    t!("run.skipped", run = &run.run_name).dimmed()
                );
                results.push(RunResult::Skipped { run, command });
                continue;
            }

            let result = execute_run(
                run,
                command,
                &options.working_dir,
                options.timeout,
                &options.stop_token,
            )
            .await?;
            if result.is_failure() && !options.keep_going {
                stopped = true;
            }
            results.push(result);
        }

        Ok(results)
    }
}
