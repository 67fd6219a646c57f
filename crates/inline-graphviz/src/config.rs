use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Preprocessor settings.
///
/// Deserializes from JSON; every field is optional:
///
/// ```json
/// { "graphvizBinDir": "/opt/graphviz/bin", "extraArgs": ["-Gdpi=150"], "failOnRenderError": true }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct PreprocessOptions {
    /// Directory holding the Graphviz executables. `None` resolves them through `PATH`.
    pub graphviz_bin_dir: Option<PathBuf>,
    /// Appended after `-T<format>` on every renderer invocation.
    pub extra_args: Vec<String>,
    /// Return render failures as `Err` instead of replacing the document with a diagnostic.
    pub fail_on_render_error: bool,
}

impl PreprocessOptions {
    pub fn from_json_str(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| Error::InvalidConfig {
            message: e.to_string(),
        })
    }

    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn with_graphviz_bin_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.graphviz_bin_dir = Some(dir.into());
        self
    }

    pub fn with_extra_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extra_args = args.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_fail_on_render_error(mut self, fail: bool) -> Self {
        self.fail_on_render_error = fail;
        self
    }
}
