//! # Annotation Parser / 注解解析器
//!
//! Extracts run declarations and per-run metadata from comment lines embedded
//! in a test script:
//!
//! ```text
//! # test-runner-runs: run1 run2
//! # test-runner-run/run1/app: ${ALL_CLUSTERS_APP}
//! # test-runner-run/run1/factoryreset: True
//! ```
//!
//! 从测试脚本中的注释行提取运行声明以及每个运行的元数据。

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::core::error::MetadataError;

/// Implicit key holding the run's own name.
pub const RUN_NAME_KEY: &str = "run_name";
/// Implicit key holding the path of the script that declared the run.
pub const SCRIPT_PATH_KEY: &str = "script_path";

static RUNS_DECLARATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^#\s*test-runner-runs:\s*(.*)$").expect("runs declaration pattern is valid")
});

static RUN_ARGUMENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^#\s*test-runner-run/([a-zA-Z0-9_]+)/([a-zA-Z0-9_\-]+):\s*(.*)$")
        .expect("run argument pattern is valid")
});

/// Unresolved key/value metadata for one run, exactly as written in the
/// script. Keys keep their insertion order.
///
/// 单个运行的未解析键值元数据，与脚本中的书写完全一致。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRunRecord {
    fields: IndexMap<String, String>,
}

impl RawRunRecord {
    /// Creates a record pre-filled with the two implicit keys.
    pub fn new(run_name: &str, script_path: &str) -> Self {
        let mut fields = IndexMap::new();
        fields.insert(RUN_NAME_KEY.to_string(), run_name.to_string());
        fields.insert(SCRIPT_PATH_KEY.to_string(), script_path.to_string());
        Self { fields }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    /// Sets a key, replacing any previous value. Last write wins.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(key.into(), value.into());
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn run_name(&self) -> Option<&str> {
        self.get(RUN_NAME_KEY)
    }

    pub fn script_path(&self) -> Option<&str> {
        self.get(SCRIPT_PATH_KEY)
    }
}

impl FromIterator<(String, String)> for RawRunRecord {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}

/// Scans `script_text` and returns one record per declared run, in order of
/// first declaration.
///
/// Rules:
/// - `# test-runner-runs: a b` declares runs `a` and `b`. Declaring a run
///   again resets it to its implicit keys; it keeps its original position.
/// - `# test-runner-run/<run>/<key>: <value>` sets a key; later lines for the
///   same run and key overwrite earlier ones.
/// - Every other line is ignored.
///
/// A key line naming a run that has not been declared yet rejects the whole
/// script with [`MetadataError::UndeclaredRun`].
///
/// 扫描脚本文本，按首次声明的顺序为每个声明的运行返回一条记录。
/// 为未声明的运行设置键会导致整个脚本被拒绝。
pub fn parse_annotations(
    script_text: &str,
    script_path: &str,
) -> Result<Vec<RawRunRecord>, MetadataError> {
    let mut records: IndexMap<String, RawRunRecord> = IndexMap::new();

    for (index, raw_line) in script_text.lines().enumerate() {
        let line = raw_line.trim();

        if let Some(caps) = RUNS_DECLARATION.captures(line) {
            for run in caps[1].split_whitespace() {
                if records.contains_key(run) {
                    debug!(run, line = index + 1, "run re-declared, clearing its keys");
                }
                records.insert(run.to_string(), RawRunRecord::new(run, script_path));
            }
        } else if let Some(caps) = RUN_ARGUMENT.captures(line) {
            let (run, key, value) = (&caps[1], &caps[2], &caps[3]);
            let record = records
                .get_mut(run)
                .ok_or_else(|| MetadataError::UndeclaredRun {
                    run: run.to_string(),
                    key: key.to_string(),
                    line: index + 1,
                })?;
            record.insert(key, value);
        }
    }

    debug!(script = script_path, runs = records.len(), "parsed run annotations");
    Ok(records.into_values().collect())
}
