//! # Metadata Errors / 元数据错误
//!
//! Typed failures of the annotation and environment layer. Everything here is
//! a deterministic function of the input files; nothing is retried.
//!
//! 注解与环境层的类型化错误。所有错误都由输入文件决定，不做任何重试。

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum MetadataError {
    /// A script or environment file could not be read.
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The environment file is not a flat mapping of scalar values.
    #[error("Malformed environment file {}: {message}", path.display())]
    MalformedEnvironment { path: PathBuf, message: String },

    /// An annotation line targets a run that was never declared with
    /// `test-runner-runs:`. The whole script is rejected.
    #[error("Line {line}: key '{key}' set for undeclared run '{run}'")]
    UndeclaredRun {
        run: String,
        key: String,
        line: usize,
    },

    /// A raw record lacks one of the implicit keys injected by the parser.
    #[error("Run record is missing the '{field}' field")]
    MissingField { field: &'static str },
}
