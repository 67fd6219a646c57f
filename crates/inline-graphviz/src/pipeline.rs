//! Line-oriented preprocessing stages.
//!
//! Markdown front ends hand preprocessors the document as a list of lines and take back a new
//! list. [`InlineGraphviz`] plugs into such a chain as the `graphviz_block` stage.

use crate::{InlineGraphviz, PreprocessOptions, Renderer, Result};

/// One stage of a [`Pipeline`].
pub trait Preprocessor {
    fn name(&self) -> &str;

    fn run(&self, lines: Vec<String>) -> Result<Vec<String>>;
}

impl<R: Renderer> Preprocessor for InlineGraphviz<R> {
    fn name(&self) -> &str {
        "graphviz_block"
    }

    fn run(&self, lines: Vec<String>) -> Result<Vec<String>> {
        self.process_lines(&lines)
    }
}

/// Convenience constructor for the Graphviz stage.
pub fn make_extension(options: PreprocessOptions) -> InlineGraphviz {
    InlineGraphviz::new(options)
}

/// Ordered list of preprocessors applied to a document.
#[derive(Default)]
pub struct Pipeline {
    stages: Vec<Box<dyn Preprocessor>>,
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("stages", &self.names())
            .finish()
    }
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs `stage` before every stage registered so far.
    pub fn register_first(&mut self, stage: impl Preprocessor + 'static) -> &mut Self {
        self.stages.insert(0, Box::new(stage));
        self
    }

    pub fn register_last(&mut self, stage: impl Preprocessor + 'static) -> &mut Self {
        self.stages.push(Box::new(stage));
        self
    }

    pub fn names(&self) -> Vec<&str> {
        self.stages.iter().map(|stage| stage.name()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    pub fn run(&self, mut lines: Vec<String>) -> Result<Vec<String>> {
        for stage in &self.stages {
            tracing::debug!(stage = stage.name(), lines = lines.len(), "running preprocessor");
            lines = stage.run(lines)?;
        }
        Ok(lines)
    }

    /// Splits `text` on `\n`, runs every stage, and joins the result back together.
    pub fn run_text(&self, text: &str) -> Result<String> {
        let lines = text.split('\n').map(str::to_string).collect();
        Ok(self.run(lines)?.join("\n"))
    }
}
