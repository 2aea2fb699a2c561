use std::path::PathBuf;

/// Export one object to one PNG at one resolution.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct ExportDirective {
    /// `id` of the object to export.
    pub id: String,
    /// Output PNG path.
    pub filename: PathBuf,
    /// Export resolution.
    pub dpi: u32,
}

impl ExportDirective {
    /// Renderer action text: `export-id:..;export-filename:..;export-dpi:..;export-do`.
    pub fn actions(&self) -> String {
        format!(
            "export-id:{};export-filename:{};export-dpi:{};export-do",
            self.id,
            self.filename.display(),
            self.dpi
        )
    }
}

/// Join directives into one `;`-separated action list.
pub fn actions_text(directives: &[ExportDirective]) -> String {
    directives
        .iter()
        .map(ExportDirective::actions)
        .collect::<Vec<_>>()
        .join(";")
}
