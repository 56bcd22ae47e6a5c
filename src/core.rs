//! # Core Module / 核心模块
//!
//! This module contains the core functionality of Script Runner: the
//! annotation parser, environment resolution, run descriptors, harness
//! command rendering and run execution.
//!
//! 此模块包含 Script Runner 的核心功能：注解解析、环境解析、
//! 运行描述符、测试框架命令渲染以及运行执行。

pub mod annotations;
pub mod command;
pub mod descriptor;
pub mod environment;
pub mod error;
pub mod execution;
pub mod models;
pub mod runner;

// Re-exports
pub use descriptor::RunDescriptor;
pub use environment::Environment;
pub use error::MetadataError;
pub use models::RunResult;
pub use runner::{RunOptions, ScriptRunner};
