//! # Environment Mapping / 环境映射
//!
//! The flat name-to-value configuration that `${NAME}` placeholders are
//! resolved against. It is loaded once, never mutated, and passed by
//! reference to whoever needs it.
//!
//! 用于解析 `${NAME}` 占位符的扁平名称到值的配置。
//! 它只加载一次，之后不再修改，并以引用的方式传递。

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::Path;
use tracing::warn;

use crate::core::annotations::RawRunRecord;
use crate::core::error::MetadataError;

static PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$\{([^}]*)\}").expect("placeholder pattern is valid"));

/// A scalar value as it may appear in the environment file. Anything else
/// (nested tables, sequences) fails deserialization.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ScalarValue {
    String(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Null,
}

impl fmt::Display for ScalarValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScalarValue::String(s) => f.write_str(s),
            ScalarValue::Integer(i) => write!(f, "{i}"),
            // `{:?}` keeps the fractional part of whole floats (`2.0`, not `2`).
            ScalarValue::Float(x) => write!(f, "{x:?}"),
            ScalarValue::Boolean(b) => write!(f, "{b}"),
            ScalarValue::Null => Ok(()),
        }
    }
}

/// Immutable mapping from variable name to replacement value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Environment {
    vars: BTreeMap<String, String>,
}

impl Environment {
    /// Builds an environment from already-stringified pairs.
    ///
    /// Empty keys are rejected, matching what [`Environment::load`] enforces
    /// for files.
    pub fn from_pairs<I, K, V>(pairs: I) -> Result<Self, MetadataError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut vars = BTreeMap::new();
        for (key, value) in pairs {
            let key = key.into();
            if key.is_empty() {
                return Err(MetadataError::MalformedEnvironment {
                    path: "<memory>".into(),
                    message: "empty variable name".to_string(),
                });
            }
            vars.insert(key, value.into());
        }
        Ok(Self { vars })
    }

    /// Loads the environment file at `path`.
    ///
    /// Files ending in `.toml` are read as TOML; everything else is read as
    /// YAML. The document must be a flat mapping of scalars.
    ///
    /// 加载位于 `path` 的环境文件。`.toml` 结尾的文件按 TOML 解析，
    /// 其余均按 YAML 解析。文档必须是标量值的扁平映射。
    pub fn load(path: &Path) -> Result<Self, MetadataError> {
        let content = fs::read_to_string(path).map_err(|source| MetadataError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let is_toml = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));

        if is_toml {
            Self::from_toml_str(&content, path)
        } else {
            Self::from_yaml_str(&content, path)
        }
    }

    /// Parses YAML content. `origin` is only used in error messages.
    pub fn from_yaml_str(content: &str, origin: &Path) -> Result<Self, MetadataError> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let raw: BTreeMap<String, ScalarValue> =
            serde_yaml::from_str(content).map_err(|e| MetadataError::MalformedEnvironment {
                path: origin.to_path_buf(),
                message: e.to_string(),
            })?;
        Self::from_scalars(raw, origin)
    }

    /// Parses TOML content. `origin` is only used in error messages.
    pub fn from_toml_str(content: &str, origin: &Path) -> Result<Self, MetadataError> {
        let raw: BTreeMap<String, ScalarValue> =
            toml::from_str(content).map_err(|e| MetadataError::MalformedEnvironment {
                path: origin.to_path_buf(),
                message: e.to_string(),
            })?;
        Self::from_scalars(raw, origin)
    }

    fn from_scalars(
        raw: BTreeMap<String, ScalarValue>,
        origin: &Path,
    ) -> Result<Self, MetadataError> {
        if raw.keys().any(|k| k.is_empty()) {
            return Err(MetadataError::MalformedEnvironment {
                path: origin.to_path_buf(),
                message: "empty variable name".to_string(),
            });
        }
        let vars = raw
            .into_iter()
            .map(|(key, value)| {
                if matches!(value, ScalarValue::Float(_)) {
                    warn!(
                        key = %key,
                        value = %value,
                        "unquoted float in environment file; quote it to keep its exact text"
                    );
                }
                let value = value.to_string();
                (key, value)
            })
            .collect();
        Ok(Self { vars })
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// Replaces every `${NAME}` in `text` whose NAME is known.
    ///
    /// Single left-to-right pass: text produced by a replacement is never
    /// scanned again, and unknown placeholders are copied through untouched.
    ///
    /// 替换 `text` 中所有已知名称的 `${NAME}`。单次从左到右扫描：
    /// 替换产生的文本不会再被扫描，未知占位符原样保留。
    pub fn substitute(&self, text: &str) -> String {
        PLACEHOLDER
            .replace_all(text, |caps: &Captures| match self.vars.get(&caps[1]) {
                Some(value) => value.clone(),
                None => caps[0].to_string(),
            })
            .into_owned()
    }

    /// Returns a copy of `record` with every value substituted.
    pub fn resolve(&self, record: &RawRunRecord) -> RawRunRecord {
        record
            .iter()
            .map(|(key, value)| (key.to_string(), self.substitute(value)))
            .collect()
    }
}
