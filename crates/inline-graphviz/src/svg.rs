//! Post-processing for SVG emitted by Graphviz.
//!
//! Graphviz writes a standalone document:
//!
//! ```text
//! 0  <?xml version="1.0" encoding="UTF-8" standalone="no"?>
//! 1  <!DOCTYPE svg PUBLIC "-//W3C//DTD SVG 1.1//EN"
//! 2   "http://www.w3.org/Graphics/SVG/1.1/DTD/svg11.dtd">
//! 3  <!-- Generated by graphviz version 2.43.0 (0)
//! 4   -->
//! 5  <!-- Title: G Pages: 1 -->
//! 6  <svg width="62pt" height="116pt"
//! 7   viewBox="0.00 0.00 62.00 116.00" xmlns="http://www.w3.org/2000/svg">
//! ```
//!
//! [`repair_svg_lines`] drops its own preamble and joins the `<svg` tag that Graphviz splits over
//! two lines, so [`XML_HEADERS`] can be prepended exactly once.

/// Text Graphviz writes into the comment that follows its preamble.
pub const GRAPHVIZ_MARKER: &str = "Generated by graphviz";

const SVG_OPEN_TAG: &str = "<svg";

// Line offsets relative to the marker line, calibrated to the layout above. Other Graphviz
// versions may lay the preamble out differently.
/// Lines within this distance before the marker are preamble.
const PREAMBLE_LOOKAHEAD: usize = 3;
/// Distance from the marker back to a `<svg` line whose tag continues on the next line.
const SPLIT_TAG_OFFSET: usize = 3;
/// Distance from the marker back to the continuation line already merged into `<svg`.
const CONTINUATION_OFFSET: usize = 4;

pub const XML_HEADERS: &str = concat!(
    "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"no\"?>\n",
    "<!DOCTYPE svg PUBLIC \"-//W3C//DTD SVG 1.1//EN\" ",
    "\"http://www.w3.org/Graphics/SVG/1.1/DTD/svg11.dtd\">\n",
);

pub fn repair_svg_lines<S: AsRef<str>>(lines: &[S]) -> Vec<String> {
    let has_marker = |idx: usize| line_at(lines, idx).contains(GRAPHVIZ_MARKER);

    let mut out = Vec::with_capacity(lines.len());
    for i in 0..lines.len() {
        if i + PREAMBLE_LOOKAHEAD < lines.len()
            && (1..=PREAMBLE_LOOKAHEAD).any(|k| has_marker(i + k))
        {
            continue;
        }
        // Starts at index 4 so the lookup never wraps around to the last line.
        if i >= CONTINUATION_OFFSET
            && line_at(lines, i - 1).contains(SVG_OPEN_TAG)
            && has_marker(i - CONTINUATION_OFFSET)
        {
            continue;
        }

        let current = line_at(lines, i);
        if i >= SPLIT_TAG_OFFSET
            && current.contains(SVG_OPEN_TAG)
            && has_marker(i - SPLIT_TAG_OFFSET)
            && i + 1 < lines.len()
        {
            out.push(format!("{current}{}", line_at(lines, i + 1)));
        } else {
            out.push(current.to_string());
        }
    }
    out
}

fn line_at<S: AsRef<str>>(lines: &[S], idx: usize) -> &str {
    lines[idx].as_ref()
}

/// Applies [`repair_svg_lines`] to newline-separated SVG text.
pub fn repair_svg(svg: &str) -> String {
    let lines: Vec<&str> = svg.split('\n').collect();
    repair_svg_lines(&lines).join("\n")
}

/// Repairs Graphviz SVG output and prefixes it with [`XML_HEADERS`].
pub fn with_xml_headers(svg: &str) -> String {
    let repaired = repair_svg(svg);
    let mut out = String::with_capacity(XML_HEADERS.len() + repaired.len());
    out.push_str(XML_HEADERS);
    out.push_str(&repaired);
    out
}
