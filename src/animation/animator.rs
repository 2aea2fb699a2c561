use crate::animation::clock::FrameClock;
use crate::document::tree::{Document, NodeId};
use crate::expression::{Bindings, Template};
use crate::foundation::error::{ExportError, ExportResult};
use crate::resolve::annotations::Annotations;
use crate::resolve::resolver::ExportItem;

/// One `attribute=template` pair from a frame directive.
#[derive(Clone, Debug, PartialEq)]
pub struct AttributeTemplate {
    /// Attribute assigned on every frame.
    pub attr: String,
    /// Value template evaluated against `x` and `frame`.
    pub value: Template,
}

/// Parse a `attr=template;attr=template` directive.
///
/// Segments are split on `;`, then on the first `=`. Blank segments are skipped.
pub fn parse_directive(src: &str) -> ExportResult<Vec<AttributeTemplate>> {
    let mut out = Vec::new();
    for segment in src.split(';') {
        let segment = segment.trim();
        if segment.is_empty() {
            continue;
        }
        let (attr, value) = segment.split_once('=').ok_or_else(|| {
            ExportError::annotation(format!(
                "frame directive segment '{segment}' is not of the form attr=value"
            ))
        })?;
        let attr = attr.trim();
        if attr.is_empty() {
            return Err(ExportError::annotation(format!(
                "frame directive segment '{segment}' has an empty attribute name"
            )));
        }
        out.push(AttributeTemplate {
            attr: attr.to_owned(),
            value: Template::parse(value.trim())?,
        });
    }
    Ok(out)
}

/// Applies an animated item's frame directives to the shared document.
#[derive(Debug)]
pub struct FrameAnimator {
    clock: FrameClock,
    filename: Template,
    targets: Vec<(NodeId, Vec<AttributeTemplate>)>,
    /// Attribute values before the first frame, for [`FrameAnimator::restore`].
    originals: Vec<(NodeId, String, Option<String>)>,
}

impl FrameAnimator {
    /// Prepare the animation of `item`, parsing its filename pattern and every frame directive.
    pub fn new(doc: &Document, item: &ExportItem, annotations: &Annotations) -> ExportResult<Self> {
        let count = item.frame_count.ok_or_else(|| {
            ExportError::annotation(format!("object '{}' is not animated", item.id))
        })?;
        let clock = FrameClock::new(count)?;
        let filename = Template::parse(&item.filename)?;

        let mut targets = Vec::with_capacity(item.frame_objects.len());
        let mut originals = Vec::new();
        for &node in &item.frame_objects {
            let Some(src) = doc.attr(node, &annotations.animate) else {
                continue;
            };
            let templates = parse_directive(src)?;
            for t in &templates {
                originals.push((node, t.attr.clone(), doc.attr(node, &t.attr).map(str::to_owned)));
            }
            targets.push((node, templates));
        }

        Ok(Self {
            clock,
            filename,
            targets,
            originals,
        })
    }

    /// Frame timing of this animation.
    pub fn clock(&self) -> FrameClock {
        self.clock
    }

    /// Assign every directive's value for `frame` on its node.
    pub fn render_frame(&self, doc: &mut Document, frame: u32) {
        let env = Bindings::for_attributes(self.clock.position(frame), frame);
        for (node, templates) in &self.targets {
            for t in templates {
                let value = t.value.render(&env);
                tracing::trace!(node = ?node, attr = %t.attr, %value, frame, "animate");
                doc.set_attr(*node, &t.attr, value);
            }
        }
    }

    /// Output filename (without scale suffix or extension) for `frame`.
    pub fn filename(&self, frame: u32) -> String {
        let env = Bindings::for_filename(self.clock.position(frame), self.clock.label(frame));
        self.filename.render(&env)
    }

    /// Put every animated attribute back to its value before the first frame.
    pub fn restore(&self, doc: &mut Document) {
        for (node, attr, original) in self.originals.iter().rev() {
            match original {
                Some(v) => {
                    doc.set_attr(*node, attr, v.clone());
                }
                None => {
                    doc.remove_attr(*node, attr);
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/animator.rs"]
mod tests;
