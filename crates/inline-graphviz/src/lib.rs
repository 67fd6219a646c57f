#![forbid(unsafe_code)]

//! Markdown preprocessor that renders Graphviz blocks inline.
//!
//! Each block is piped through the named Graphviz layout engine and replaced by a Markdown image
//! whose target is a `data:` URL, so the document carries its images with it:
//!
//! ````text
//! {% dot attack_plan.svg
//!     digraph G { Earth -> Mars }
//! %}
//! ````
//!
//! becomes `![attack_plan.svg](data:image/svg+xml;base64,...)`.
//!
//! Blocks are processed one at a time, rescanning the rewritten document after every splice. The
//! first render failure replaces the whole document with a diagnostic (see [`Outcome`]).

pub mod command;
pub mod config;
pub mod data_url;
pub mod error;
pub mod pipeline;
pub mod renderer;
pub mod scan;
pub mod svg;

pub use command::{LayoutCommand, OutputFormat};
pub use config::PreprocessOptions;
pub use error::{Error, Result};
pub use pipeline::{Pipeline, Preprocessor, make_extension};
pub use renderer::{GraphvizRenderer, Invocation, Renderer};
pub use scan::{BlockMatch, BlockScanner, BlockSyntax};

/// Result of preprocessing one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Every block was rendered and spliced in (or there were none).
    Rendered(String),
    /// A block failed to render; this diagnostic stands in for the entire document.
    Failed(String),
}

impl Outcome {
    pub fn is_failed(&self) -> bool {
        matches!(self, Outcome::Failed(_))
    }

    pub fn as_str(&self) -> &str {
        match self {
            Outcome::Rendered(text) | Outcome::Failed(text) => text,
        }
    }

    pub fn into_text(self) -> String {
        match self {
            Outcome::Rendered(text) | Outcome::Failed(text) => text,
        }
    }

    pub fn into_lines(self) -> Vec<String> {
        self.as_str().split('\n').map(str::to_string).collect()
    }
}

/// Diagnostic that replaces a document whose block failed to render.
///
/// The error text is HTML-escaped; the block body is reproduced verbatim.
pub fn error_document(error: &Error, invocation: &Invocation, body: &str) -> String {
    let message = format!("{error} : {:?}", invocation.argv());
    format!(
        "<pre>Error : {}</pre><pre>{body}</pre>",
        htmlize::escape_text(message.as_str())
    )
}

/// The render-and-splice engine.
#[derive(Debug, Clone, Default)]
pub struct InlineGraphviz<R = GraphvizRenderer> {
    options: PreprocessOptions,
    scanner: BlockScanner,
    renderer: R,
}

impl InlineGraphviz<GraphvizRenderer> {
    pub fn new(options: PreprocessOptions) -> Self {
        Self::with_renderer(options, GraphvizRenderer)
    }
}

impl<R: Renderer> InlineGraphviz<R> {
    pub fn with_renderer(options: PreprocessOptions, renderer: R) -> Self {
        Self {
            options,
            scanner: BlockScanner::new(),
            renderer,
        }
    }

    pub fn options(&self) -> &PreprocessOptions {
        &self.options
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Builds the command line for rendering `filename` with `command`.
    pub fn invocation(&self, command: LayoutCommand, filename: &str) -> Invocation {
        Invocation::new(
            self.options.graphviz_bin_dir.as_deref(),
            command,
            command::file_type(filename),
            &self.options.extra_args,
        )
    }

    /// Renders one block body to its `![filename](data:...)` markup.
    pub fn render_block(
        &self,
        command: LayoutCommand,
        filename: &str,
        body: &str,
    ) -> Result<String> {
        let invocation = self.invocation(command, filename);
        self.render_invocation(&invocation, filename, body)
    }

    fn render_invocation(
        &self,
        invocation: &Invocation,
        filename: &str,
        body: &str,
    ) -> Result<String> {
        let format: OutputFormat = command::file_type(filename).parse()?;
        let output = self.renderer.render(invocation, body)?;

        let url = match format {
            OutputFormat::Svg => {
                let raw = String::from_utf8(output)?;
                data_url::data_url(format, svg::with_xml_headers(&raw).as_bytes())
            }
            OutputFormat::Png => data_url::data_url(format, &output),
        };
        Ok(data_url::image_markup(filename, &url))
    }

    /// Replaces every block in `text` with its rendered image.
    ///
    /// Blocks naming a command outside [`LayoutCommand::ALL`] abort the call with
    /// [`Error::UnsupportedCommand`]. Any other render failure yields [`Outcome::Failed`], or an
    /// `Err` when [`PreprocessOptions::fail_on_render_error`] is set.
    pub fn process_text(&self, text: &str) -> Result<Outcome> {
        let mut text = text.to_string();
        loop {
            let Some(block) = self.scanner.find(&text) else {
                return Ok(Outcome::Rendered(text));
            };
            tracing::debug!(
                syntax = ?block.syntax,
                command = block.command,
                filename = block.filename,
                span = ?block.span,
                "found graphviz block"
            );

            let command: LayoutCommand = block.command.parse()?;
            let invocation = self.invocation(command, block.filename);
            let markup = match self.render_invocation(&invocation, block.filename, block.body) {
                Ok(markup) => markup,
                Err(err) if self.options.fail_on_render_error => return Err(err),
                Err(err) => {
                    tracing::warn!(
                        filename = block.filename,
                        error = %err,
                        "graphviz block failed to render; replacing document with diagnostic"
                    );
                    return Ok(Outcome::Failed(error_document(
                        &err,
                        &invocation,
                        block.body,
                    )));
                }
            };

            let spliced = format!(
                "{}\n{}\n{}",
                &text[..block.start()],
                markup,
                &text[block.end()..]
            );
            text = spliced;
        }
    }

    /// Line-oriented entry point used by Markdown pipelines.
    pub fn process_lines<S: AsRef<str>>(&self, lines: &[S]) -> Result<Vec<String>> {
        let text = lines
            .iter()
            .map(AsRef::as_ref)
            .collect::<Vec<_>>()
            .join("\n");
        Ok(self.process_text(&text)?.into_lines())
    }
}

#[cfg(test)]
mod tests;
