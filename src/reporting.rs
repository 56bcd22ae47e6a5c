//! # Reporting Module / 报告模块
//!
//! This module prints run summaries and failure details to the console with
//! internationalization support.
//!
//! 此模块在控制台打印运行摘要和失败详情，支持国际化。

pub mod console;

// Re-export common reporting functions
pub use console::{print_failure_details, print_summary};
