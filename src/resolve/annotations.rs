/// Names of the attributes that drive the exporter.
///
/// The defaults use `data-` attributes, which SVG editors preserve and renderers ignore.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Annotations {
    /// Explicit output filename pattern; takes precedence over `<title>`.
    pub filename: String,
    /// Number of animation frames to export.
    pub frames: String,
    /// Per-frame attribute directive: `attr=template;attr=template`.
    pub animate: String,
    /// Forces `fill-opacity:0` on the node's style.
    pub transparent: String,
}

impl Default for Annotations {
    fn default() -> Self {
        Self {
            filename: "data-export-filename".to_owned(),
            frames: "data-export-frames".to_owned(),
            animate: "data-export-animate".to_owned(),
            transparent: "data-export-transparent".to_owned(),
        }
    }
}

/// Interpret a marker attribute value; anything but `false`/`0` switches the marker on.
pub(crate) fn flag_enabled(value: &str) -> bool {
    let v = value.trim();
    !(v == "0" || v.eq_ignore_ascii_case("false"))
}
