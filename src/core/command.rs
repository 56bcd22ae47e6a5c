//! # Harness Command Builder / 测试框架命令构建器
//!
//! Renders a [`RunDescriptor`] into the literal command string handed to the
//! external harness launcher. The wrapper text is a compatibility contract
//! with that launcher and must stay byte-identical.
//!
//! 将 [`RunDescriptor`] 渲染为交给外部测试框架启动器的命令字符串。
//! 包装文本是与启动器之间的兼容性约定，必须逐字节保持一致。

use std::fmt;

use crate::core::descriptor::RunDescriptor;

/// Launcher script that activates the Python virtual environment.
pub const LAUNCHER: &str = "scripts/run_in_python_env.sh";
/// Virtual environment passed to the launcher.
pub const VENV_PATH: &str = "out/venv";
/// Test-runner entry point executed inside the virtual environment.
pub const ENTRY_POINT: &str = "./scripts/tests/run_python_test.py";

/// The value attached to a harness flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgValue {
    /// Flag-only argument: `true` emits the bare flag, `false` emits nothing.
    Switch(bool),
    /// `--flag value`, omitted when absent or empty.
    Plain(Option<String>),
    /// `--flag "value"`, omitted when absent or empty.
    Quoted(Option<String>),
}

/// One `(flag, value)` pair of the harness argument list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HarnessArg {
    pub flag: &'static str,
    pub value: ArgValue,
}

impl HarnessArg {
    /// Renders the pair to a single token, or `None` when it is omitted.
    pub fn render(&self) -> Option<String> {
        match &self.value {
            ArgValue::Switch(true) => Some(self.flag.to_string()),
            ArgValue::Switch(false) => None,
            ArgValue::Plain(Some(v)) if !v.is_empty() => Some(format!("{} {}", self.flag, v)),
            ArgValue::Quoted(Some(v)) if !v.is_empty() => {
                Some(format!("{} \"{}\"", self.flag, v))
            }
            ArgValue::Plain(_) | ArgValue::Quoted(_) => None,
        }
    }
}

/// The ordered argument list for one harness invocation.
///
/// 单次测试框架调用的有序参数列表。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HarnessCommand {
    args: Vec<HarnessArg>,
}

impl HarnessCommand {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a pair. Omitted pairs are kept so the full order stays
    /// inspectable; they simply render to nothing.
    pub fn push(&mut self, flag: &'static str, value: ArgValue) -> &mut Self {
        self.args.push(HarnessArg { flag, value });
        self
    }

    /// Builds the canonical argument list for a run:
    /// `--app`, `--factoryreset`, `--app-args`, `--script`, `--script-args`.
    pub fn for_run(run: &RunDescriptor) -> Self {
        let mut command = Self::new();
        command
            .push("--app", ArgValue::Plain(run.app.clone()))
            .push("--factoryreset", ArgValue::Switch(run.factory_reset))
            .push("--app-args", ArgValue::Quoted(run.app_args.clone()))
            .push("--script", ArgValue::Quoted(Some(run.script_path.clone())))
            .push("--script-args", ArgValue::Quoted(run.script_args.clone()));
        command
    }

    pub fn args(&self) -> &[HarnessArg] {
        &self.args
    }

    /// The rendered tokens, omitted pairs dropped.
    pub fn tokens(&self) -> Vec<String> {
        self.args.iter().filter_map(HarnessArg::render).collect()
    }
}

impl fmt::Display for HarnessCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{LAUNCHER} {VENV_PATH} '{ENTRY_POINT}")?;
        for token in self.tokens() {
            write!(f, " {token}")?;
        }
        f.write_str("'")
    }
}

/// Renders the full command string for `run`.
///
/// ```
/// use script_runner::core::command::build;
/// use script_runner::core::descriptor::RunDescriptor;
///
/// let run = RunDescriptor {
///     script_path: "TC_X.py".into(),
///     run_name: "run1".into(),
///     ..Default::default()
/// };
/// assert_eq!(
///     build(&run),
///     "scripts/run_in_python_env.sh out/venv './scripts/tests/run_python_test.py --script \"TC_X.py\"'"
/// );
/// ```
pub fn build(run: &RunDescriptor) -> String {
    HarnessCommand::for_run(run).to_string()
}
