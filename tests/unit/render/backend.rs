use super::*;

fn directive(id: &str, dpi: u32) -> ExportDirective {
    ExportDirective {
        id: id.to_owned(),
        filename: PathBuf::from("out").join(format!("{id}.png")),
        dpi,
    }
}

#[test]
fn recording_renderer_captures_calls_and_document() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("doc.svg");
    std::fs::write(&target, "<svg/>").unwrap();

    let mut r = RecordingRenderer::new();
    r.run(&target, &[directive("a", 96), directive("a", 192)])
        .unwrap();
    r.run(&target, &[directive("b", 96)]).unwrap();

    assert_eq!(r.invocations().len(), 2);
    assert_eq!(r.invocations()[0].document.as_deref(), Some("<svg/>"));
    let ids: Vec<_> = r.directives().map(|d| d.id.as_str()).collect();
    assert_eq!(ids, ["a", "a", "b"]);
}

#[test]
fn recording_renderer_can_simulate_failure() {
    let mut r = RecordingRenderer::failing_at(1);
    let target = Path::new("missing.svg");
    r.run(target, &[directive("a", 96)]).unwrap();
    let err = r.run(target, &[directive("b", 96)]).unwrap_err();
    assert!(err.is_renderer_failure());
    assert_eq!(r.invocations()[0].document, None);
}

#[test]
fn dry_run_prints_one_json_line_per_directive() {
    let mut r = DryRunRenderer::new(Vec::new());
    r.run(Path::new("doc.svg"), &[directive("a", 96), directive("b", 192)])
        .unwrap();
    let text = String::from_utf8(r.into_inner()).unwrap();
    let lines: Vec<serde_json::Value> = text
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0]["target"], "doc.svg");
    assert_eq!(lines[0]["id"], "a");
    assert_eq!(lines[1]["dpi"], 192);
}
