use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(ExportError::parse("x").to_string().contains("parse error:"));
    assert!(
        ExportError::annotation("x")
            .to_string()
            .contains("annotation error:")
    );
    assert!(ExportError::config("x").to_string().contains("config error:"));
    assert_eq!(
        ExportError::missing_id("icon").to_string(),
        "object 'icon' has no id attribute"
    );
}

#[test]
fn renderer_failures_are_distinguished() {
    let err = ExportError::Renderer {
        status: "exit status: 1".to_owned(),
        stdout: String::new(),
        stderr: String::new(),
    };
    assert!(err.is_renderer_failure());
    assert!(!ExportError::parse("x").is_renderer_failure());
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = ExportError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
