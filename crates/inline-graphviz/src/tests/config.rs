use crate::*;
use std::path::PathBuf;

#[test]
fn options_default_to_path_lookup_and_diagnostics() {
    let opts = PreprocessOptions::default();
    assert_eq!(opts.graphviz_bin_dir, None);
    assert!(opts.extra_args.is_empty());
    assert!(!opts.fail_on_render_error);
}

#[test]
fn options_parse_from_camel_case_json() {
    let opts = PreprocessOptions::from_json_str(
        r#"{ "graphvizBinDir": "/opt/graphviz/bin", "extraArgs": ["-Gdpi=150"], "failOnRenderError": true }"#,
    )
    .unwrap();
    assert_eq!(
        opts.graphviz_bin_dir,
        Some(PathBuf::from("/opt/graphviz/bin"))
    );
    assert_eq!(opts.extra_args, vec!["-Gdpi=150".to_string()]);
    assert!(opts.fail_on_render_error);
}

#[test]
fn options_accept_partial_json() {
    let opts = PreprocessOptions::from_json_str(r#"{ "extraArgs": ["-Nshape=box"] }"#).unwrap();
    assert_eq!(
        opts,
        PreprocessOptions::default().with_extra_args(["-Nshape=box"])
    );
}

#[test]
fn options_reject_unknown_keys() {
    let err = PreprocessOptions::from_json_str(r#"{ "outputDir": "img" }"#).unwrap_err();
    assert!(matches!(err, Error::InvalidConfig { .. }));
    assert!(err.to_string().contains("outputDir"));
}

#[test]
fn options_report_missing_file_as_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = PreprocessOptions::from_json_file(&dir.path().join("missing.json")).unwrap_err();
    assert!(matches!(err, Error::Io(_)));
}

#[cfg(unix)]
#[test]
fn invocation_uses_bin_dir_and_extra_args() {
    let engine = InlineGraphviz::new(
        PreprocessOptions::default()
            .with_graphviz_bin_dir("/opt/gv")
            .with_extra_args(["-Gdpi=150"]),
    );
    let inv = engine.invocation(LayoutCommand::Twopi, "net.png");
    assert_eq!(inv.program, PathBuf::from("/opt/gv/twopi"));
    assert_eq!(inv.args, vec!["-Tpng".to_string(), "-Gdpi=150".to_string()]);
    assert_eq!(inv.argv(), vec!["/opt/gv/twopi", "-Tpng", "-Gdpi=150"]);
}

#[test]
fn command_allow_list_round_trips_names() {
    for cmd in LayoutCommand::ALL {
        assert_eq!(cmd.as_str().parse::<LayoutCommand>().unwrap(), cmd);
    }
    for bad in ["rm", "Dot", "dot2", ""] {
        let err = bad.parse::<LayoutCommand>().unwrap_err();
        assert_eq!(err.to_string(), format!("Command not supported: {bad}"));
    }
}

#[test]
fn file_type_is_text_after_last_dot() {
    assert_eq!(command::file_type("graph.svg"), "svg");
    assert_eq!(command::file_type("archive.tar.png"), "png");
    assert_eq!(command::file_type("noext"), "noext");
    assert_eq!(command::file_type("trailing."), "");
}
