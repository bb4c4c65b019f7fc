use crate::errors::{HipifyError, HipifyResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// How the replacement set decides that two edits collide
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictPolicy {
    /// Only edits with identical spans collide; partial overlaps are accepted
    #[default]
    ExactSpan,
    /// Any two edits claiming common text collide
    Overlap,
}

/// Target-side spelling of a rewritten kernel launch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaunchSyntax {
    /// Function replacing the `<<<...>>>` launch
    pub launch_function: String,

    /// Macro wrapped around the kernel name
    pub kernel_name_wrapper: String,

    /// Parameter declaration prepended to every launched kernel
    pub extra_parameter: String,

    /// Configuration parameter type whose arguments get wrapped as `type(arg)`
    pub extent_type: String,
}

impl Default for LaunchSyntax {
    fn default() -> Self {
        Self {
            launch_function: "hipLaunchKernel".to_string(),
            kernel_name_wrapper: "HIP_KERNEL_NAME".to_string(),
            extra_parameter: "hipLaunchParm lp".to_string(),
            extent_type: "dim3".to_string(),
        }
    }
}

/// Substring rewritten inside string literals
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkerRewrite {
    pub from: String,
    pub to: String,
}

impl Default for MarkerRewrite {
    fn default() -> Self {
        Self {
            from: "cuda".to_string(),
            to: "hip".to_string(),
        }
    }
}

/// Configuration for a translation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslatorConfig {
    /// Extension of files that get translated
    pub source_extension: String,

    /// Extension of the scratch copy analysed and rewritten
    pub marker_extension: String,

    /// Identifier prefix of source API names
    pub source_prefix: String,

    pub launch: LaunchSyntax,

    pub string_marker: MarkerRewrite,

    /// Prefix of builtin record members (`__fetch_builtin_x`)
    pub builtin_member_prefix: String,

    pub conflict_policy: ConflictPolicy,

    /// Report tree-level matches even when the parse has errors
    pub tolerant: bool,

    /// Maximum file size to scan (in bytes)
    pub max_file_size: usize,

    /// Mappings inserted after the built-in table, overriding it
    pub extra_symbols: BTreeMap<String, String>,
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            source_extension: ".cu".to_string(),
            marker_extension: ".hip.cu".to_string(),
            source_prefix: "cuda".to_string(),
            launch: LaunchSyntax::default(),
            string_marker: MarkerRewrite::default(),
            builtin_member_prefix: "__fetch_builtin_".to_string(),
            conflict_policy: ConflictPolicy::ExactSpan,
            tolerant: true,
            max_file_size: 10 * 1024 * 1024, // 10 MB
            extra_symbols: BTreeMap::new(),
        }
    }
}

impl TranslatorConfig {
    /// Load a config from a JSON file; absent fields keep their defaults
    pub fn from_json_file(path: &Path) -> HipifyResult<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| HipifyError::Io(path.to_path_buf(), e))?;
        let config: Self = serde_json::from_str(&raw)
            .map_err(|e| HipifyError::Config(format!("{}: {e}", path.display())))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings that would make staging or rewriting ambiguous
    pub fn validate(&self) -> HipifyResult<()> {
        if self.source_extension.is_empty() {
            return Err(HipifyError::Config(
                "source_extension must not be empty".to_string(),
            ));
        }
        if self.marker_extension == self.source_extension {
            return Err(HipifyError::Config(format!(
                "marker_extension must differ from source_extension ({})",
                self.source_extension
            )));
        }
        if self.string_marker.from.is_empty() {
            return Err(HipifyError::Config(
                "string_marker.from must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Require strict parses: files with syntax errors only yield preprocessor matches
    pub fn strict() -> Self {
        Self {
            tolerant: false,
            ..Default::default()
        }
    }

    pub fn with_conflict_policy(mut self, policy: ConflictPolicy) -> Self {
        self.conflict_policy = policy;
        self
    }

    pub fn with_tolerant(mut self, tolerant: bool) -> Self {
        self.tolerant = tolerant;
        self
    }

    pub fn with_max_file_size(mut self, size: usize) -> Self {
        self.max_file_size = size;
        self
    }

    pub fn with_symbol(mut self, source: impl Into<String>, target: impl Into<String>) -> Self {
        self.extra_symbols.insert(source.into(), target.into());
        self
    }
}
