//! # Run Descriptor / 运行描述符
//!
//! The typed, placeholder-resolved form of a run, ready to be rendered into a
//! harness command.
//!
//! 运行的类型化、已解析占位符的形式，可直接渲染为测试框架命令。

use serde::Serialize;

use crate::core::annotations::{RUN_NAME_KEY, RawRunRecord, SCRIPT_PATH_KEY};
use crate::core::error::MetadataError;

/// Annotation key carrying the application under test.
pub const APP_KEY: &str = "app";
/// Annotation key carrying the pre-joined application arguments.
pub const APP_ARGS_KEY: &str = "app-args";
/// Annotation key carrying the pre-joined script arguments.
pub const SCRIPT_ARGS_KEY: &str = "script-args";
/// Annotation key requesting a factory reset; coerced to a boolean.
pub const FACTORY_RESET_KEY: &str = "factoryreset";

/// One fully resolved run.
///
/// 一个完全解析的运行。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunDescriptor {
    /// Path of the script that declared this run, as given by the caller.
    /// 声明此运行的脚本路径（与调用方提供的一致）。
    pub script_path: String,
    /// The identifier listed after `test-runner-runs:`.
    /// `test-runner-runs:` 之后列出的标识符。
    pub run_name: String,
    /// Application under test.
    /// 被测应用。
    pub app: Option<String>,
    /// Arguments forwarded to the application, already joined.
    /// 传递给应用的参数（已拼接）。
    pub app_args: Option<String>,
    /// Arguments forwarded to the script, already joined.
    /// 传递给脚本的参数（已拼接）。
    pub script_args: Option<String>,
    /// Whether the harness should factory-reset the application first.
    /// 测试框架是否应先对应用进行出厂重置。
    pub factory_reset: bool,
}

impl RunDescriptor {
    /// Copies the recognized keys of a resolved record into typed fields.
    /// Unrecognized keys are not read.
    pub fn from_record(record: &RawRunRecord) -> Result<Self, MetadataError> {
        let run_name = record
            .run_name()
            .ok_or(MetadataError::MissingField {
                field: RUN_NAME_KEY,
            })?
            .to_string();
        let script_path = record
            .script_path()
            .ok_or(MetadataError::MissingField {
                field: SCRIPT_PATH_KEY,
            })?
            .to_string();

        Ok(Self {
            script_path,
            run_name,
            app: record.get(APP_KEY).map(str::to_string),
            app_args: record.get(APP_ARGS_KEY).map(str::to_string),
            script_args: record.get(SCRIPT_ARGS_KEY).map(str::to_string),
            factory_reset: record.get(FACTORY_RESET_KEY).is_some_and(is_truthy),
        })
    }
}

/// Interprets an annotation value as a boolean.
///
/// `true`, `1`, `yes`, `y` and `on` (any case, surrounding whitespace
/// ignored) are true. Everything else, `False` and the empty string included,
/// is false.
pub fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "true" | "1" | "yes" | "y" | "on"
    )
}
