//! Locates Graphviz blocks in Markdown source.
//!
//! Two delimiter syntaxes are accepted:
//!
//! ````text
//! {% dot graph.svg
//! digraph G { a -> b }
//! %}
//!
//! ```graphviz dot graph.svg
//! digraph G { a -> b }
//! ```
//! ````

use regex::{Captures, Regex};
use std::ops::Range;
use std::sync::OnceLock;

fn curly_block_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"(?ms)^\{%[ ]* (?P<command>\w+)\s+(?P<filename>\S+)\s*\n(?P<content>.*?)%\}\s*$",
        )
        .expect("valid regex")
    })
}

fn fence_block_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"(?ms)^```graphviz[ ]* (?P<command>\w+)\s+(?P<filename>\S+)\s*\n(?P<content>.*?)```\s*$",
        )
        .expect("valid regex")
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockSyntax {
    /// `{% <command> <filename> ... %}`
    Curly,
    /// ```` ```graphviz <command> <filename> ... ``` ````
    Fence,
}

/// One located block.
///
/// Borrows the text it was found in: the span is only meaningful for that exact text and must be
/// recomputed after every splice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockMatch<'t> {
    pub syntax: BlockSyntax,
    pub command: &'t str,
    pub filename: &'t str,
    pub body: &'t str,
    /// Byte range of the whole block, closing delimiter and trailing whitespace included.
    pub span: Range<usize>,
}

impl<'t> BlockMatch<'t> {
    fn from_captures(syntax: BlockSyntax, caps: &Captures<'t>) -> Option<Self> {
        let whole = caps.get(0)?;
        Some(Self {
            syntax,
            command: caps.name("command")?.as_str(),
            filename: caps.name("filename")?.as_str(),
            body: caps.name("content")?.as_str(),
            span: whole.range(),
        })
    }

    pub fn start(&self) -> usize {
        self.span.start
    }

    pub fn end(&self) -> usize {
        self.span.end
    }
}

/// Precompiled matchers for both block syntaxes.
#[derive(Debug, Clone, Copy)]
pub struct BlockScanner {
    curly: &'static Regex,
    fence: &'static Regex,
}

impl Default for BlockScanner {
    fn default() -> Self {
        Self {
            curly: curly_block_regex(),
            fence: fence_block_regex(),
        }
    }
}

impl BlockScanner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Finds the next block to process.
    ///
    /// A curly block anywhere in `text` wins over a fence block, even one that appears earlier.
    pub fn find<'t>(&self, text: &'t str) -> Option<BlockMatch<'t>> {
        self.find_syntax(BlockSyntax::Curly, text)
            .or_else(|| self.find_syntax(BlockSyntax::Fence, text))
    }

    pub fn find_syntax<'t>(&self, syntax: BlockSyntax, text: &'t str) -> Option<BlockMatch<'t>> {
        let re = match syntax {
            BlockSyntax::Curly => self.curly,
            BlockSyntax::Fence => self.fence,
        };
        let caps = re.captures(text)?;
        BlockMatch::from_captures(syntax, &caps)
    }
}
