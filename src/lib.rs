//! # Script Runner Library / Script Runner 库
//!
//! Test scripts declare their own launch configurations in comment lines:
//!
//! ```text
//! # test-runner-runs: run1
//! # test-runner-run/run1/app: ${ALL_CLUSTERS_APP}
//! # test-runner-run/run1/app-args: --discriminator 1234
//! # test-runner-run/run1/factoryreset: True
//! ```
//!
//! This library reads those annotations, resolves `${NAME}` placeholders
//! against an environment file and renders one harness command per run.
//!
//! 测试脚本在注释行中声明自己的启动配置。此库读取这些注解，
//! 根据环境文件解析 `${NAME}` 占位符，并为每个运行渲染一条测试框架命令。
//!
//! ## Modules / 模块
//!
//! - `core` - Annotation parsing, environment resolution, command rendering and execution
//! - `infra` - Process spawning, command-line splitting and file system helpers
//! - `reporting` - Console summaries of executed runs
//! - `cli` - Command-line interface and commands
//!
//! - `core` - 注解解析、环境解析、命令渲染与执行
//! - `infra` - 进程派生、命令行拆分和文件系统辅助工具
//! - `reporting` - 已执行运行的控制台摘要
//! - `cli` - 命令行接口和命令

pub mod cli;
pub mod core;
pub mod infra;
pub mod reporting;

// Re-export commonly used items
pub use crate::core::command;
pub use crate::core::environment;
pub use crate::core::{Environment, MetadataError, RunDescriptor, ScriptRunner};

// Initialize i18n
rust_i18n::i18n!("locales", fallback = "en");

/// Picks the best available locale for the system language.
///
/// Tries the full locale first (e.g. "zh-CN"), then the language part only
/// (e.g. "en" from "en-US"), and finally falls back to "en".
pub fn detect_locale() -> String {
    let locale = sys_locale::get_locale().unwrap_or_else(|| "en".to_string());
    let available_locales = rust_i18n::available_locales!();

    if available_locales.contains(&locale.as_str()) {
        return locale;
    }
    locale
        .split('-')
        .next()
        .filter(|lang_code| available_locales.contains(lang_code))
        .unwrap_or("en")
        .to_string()
}

