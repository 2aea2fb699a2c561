use super::*;

fn batch() -> Vec<ExportDirective> {
    vec![
        ExportDirective {
            id: "a1".to_owned(),
            filename: PathBuf::from("out/icon.png"),
            dpi: 96,
        },
        ExportDirective {
            id: "a1".to_owned(),
            filename: PathBuf::from("out/icon@2x.png"),
            dpi: 192,
        },
    ]
}

#[test]
fn args_are_target_then_single_actions_argument() {
    let args = InkscapeRenderer::args(Path::new("icons.svg"), &batch());
    assert_eq!(args.len(), 2);
    assert_eq!(args[0], "icons.svg");
    assert_eq!(
        args[1],
        "--actions=export-id:a1;export-filename:out/icon.png;export-dpi:96;export-do;\
         export-id:a1;export-filename:out/icon@2x.png;export-dpi:192;export-do"
    );
}

#[test]
fn default_program_is_platform_specific() {
    let p = default_program();
    if cfg!(windows) {
        assert!(p.ends_with("inkscape"));
        assert!(p.is_absolute());
    } else {
        assert_eq!(p, PathBuf::from("inkscape"));
    }
}

#[test]
fn missing_program_is_reported() {
    let mut r = InkscapeRenderer::new(InkscapeOpts {
        program: PathBuf::from("definitely-not-a-real-inkscape-binary"),
    });
    let err = r.run(Path::new("x.svg"), &batch()).unwrap_err();
    assert!(!err.is_renderer_failure());
    assert!(err.to_string().contains("failed to run renderer"));
}

#[cfg(unix)]
#[test]
fn exit_status_decides_success() {
    let mut ok = InkscapeRenderer::new(InkscapeOpts {
        program: PathBuf::from("true"),
    });
    ok.run(Path::new("x.svg"), &batch()).unwrap();

    let mut failing = InkscapeRenderer::new(InkscapeOpts {
        program: PathBuf::from("false"),
    });
    let err = failing.run(Path::new("x.svg"), &batch()).unwrap_err();
    assert!(err.is_renderer_failure());
}
