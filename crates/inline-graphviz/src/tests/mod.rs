use crate::{Error, Invocation, Renderer, Result};
use std::cell::RefCell;

mod config;
mod pipeline;

/// Trimmed `dot -Tsvg` output (Graphviz 2.43).
pub(crate) const DOT_SVG: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="no"?>
<!DOCTYPE svg PUBLIC "-//W3C//DTD SVG 1.1//EN"
 "http://www.w3.org/Graphics/SVG/1.1/DTD/svg11.dtd">
<!-- Generated by graphviz version 2.43.0 (0)
 -->
<!-- Title: G Pages: 1 -->
<svg width="62pt" height="116pt"
 viewBox="0.00 0.00 62.00 116.00" xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink">
<g id="graph0" class="graph" transform="scale(1 1) rotate(0) translate(4 112)">
<title>G</title>
</g>
</svg>
"#;

pub(crate) const PNG_BYTES: &[u8] = b"\x89PNG\r\n\x1a\n\x00\x00\x00\rIHDR\xff\xfe";

/// Stands in for Graphviz: answers `-Tsvg` with [`DOT_SVG`] and `-Tpng` with [`PNG_BYTES`].
///
/// A body containing `syntax error` fails like a rejected graph.
#[derive(Debug, Default)]
pub(crate) struct FakeRenderer {
    pub calls: RefCell<Vec<(Invocation, String)>>,
}

impl FakeRenderer {
    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }
}

impl Renderer for FakeRenderer {
    fn render(&self, invocation: &Invocation, source: &str) -> Result<Vec<u8>> {
        self.calls
            .borrow_mut()
            .push((invocation.clone(), source.to_string()));
        if source.contains("syntax error") {
            return Err(Error::RendererFailed {
                status: Some(1),
                stderr: "Error: <stdin>: syntax error in line 1 near 'syntax'".to_string(),
            });
        }
        match invocation.args.first().map(String::as_str) {
            Some("-Tsvg") => Ok(DOT_SVG.as_bytes().to_vec()),
            Some("-Tpng") => Ok(PNG_BYTES.to_vec()),
            other => panic!("unexpected format argument: {other:?}"),
        }
    }
}

pub(crate) fn decode_data_url(markup: &str, prefix: &str) -> Vec<u8> {
    use base64::Engine as _;
    let start = markup.find(prefix).expect("data url prefix") + prefix.len();
    let end = markup[start..].find(')').expect("closing paren") + start;
    base64::engine::general_purpose::STANDARD
        .decode(&markup[start..end])
        .expect("valid base64")
}
