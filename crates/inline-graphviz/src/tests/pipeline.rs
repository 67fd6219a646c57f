use super::FakeRenderer;
use crate::*;

/// Upper-cases every line; stands in for another Markdown preprocessor.
struct Shout;

impl Preprocessor for Shout {
    fn name(&self) -> &str {
        "shout"
    }

    fn run(&self, lines: Vec<String>) -> Result<Vec<String>> {
        Ok(lines.into_iter().map(|l| l.to_uppercase()).collect())
    }
}

fn graphviz_stage() -> InlineGraphviz<FakeRenderer> {
    InlineGraphviz::with_renderer(PreprocessOptions::default(), FakeRenderer::default())
}

#[test]
fn graphviz_stage_is_named_graphviz_block() {
    assert_eq!(graphviz_stage().name(), "graphviz_block");
    assert_eq!(make_extension(PreprocessOptions::default()).name(), "graphviz_block");
}

#[test]
fn register_first_puts_stage_at_the_front() {
    let mut pipeline = Pipeline::new();
    assert!(pipeline.is_empty());
    pipeline.register_last(Shout).register_first(graphviz_stage());
    assert_eq!(pipeline.names(), vec!["graphviz_block", "shout"]);
}

#[test]
fn stages_run_in_order() {
    let mut pipeline = Pipeline::new();
    pipeline.register_first(Shout).register_first(graphviz_stage());

    // Graphviz runs before `shout`, so it still sees a lower-case `{% dot` block.
    let out = pipeline.run_text("title\n{% dot g.png\ndigraph {}\n%}\n").unwrap();
    let lines: Vec<&str> = out.split('\n').collect();
    assert_eq!(lines[0], "TITLE");
    assert!(lines[2].starts_with("![G.PNG](DATA:IMAGE/PNG;BASE64,"));
}

#[test]
fn run_text_without_blocks_round_trips() {
    let mut pipeline = Pipeline::new();
    pipeline.register_first(graphviz_stage());
    let text = "a\n\nb\n";
    assert_eq!(pipeline.run_text(text).unwrap(), text);
}

#[test]
fn pipeline_propagates_stage_errors() {
    let mut pipeline = Pipeline::new();
    pipeline.register_first(graphviz_stage()).register_last(Shout);
    let err = pipeline.run_text("{% sh x.svg\nid\n%}").unwrap_err();
    assert!(matches!(err, Error::UnsupportedCommand { .. }));
}

#[test]
fn empty_pipeline_is_identity() {
    let pipeline = Pipeline::new();
    assert_eq!(pipeline.run_text("x\ny").unwrap(), "x\ny");
    assert_eq!(format!("{pipeline:?}"), "Pipeline { stages: [] }");
}
