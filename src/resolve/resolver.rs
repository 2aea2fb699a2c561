use std::collections::HashMap;

use crate::document::tree::{Document, NodeId};
use crate::foundation::error::{ExportError, ExportResult};
use crate::resolve::annotations::{Annotations, flag_enabled};
use crate::resolve::style::force_transparent_fill;

/// Options for [`resolve`].
#[derive(Clone, Debug)]
pub struct ResolveOptions {
    /// Treat nodes with a `<title>` child as exportable.
    pub discover_titles: bool,
    /// Attribute names to look for.
    pub annotations: Annotations,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self {
            discover_titles: true,
            annotations: Annotations::default(),
        }
    }
}

/// One object to export.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportItem {
    /// Value of the node's `id`, used to address it at render time.
    pub id: String,
    /// The node carrying the export marker.
    pub node: NodeId,
    /// Output filename pattern (without scale suffix or extension).
    pub filename: String,
    /// Frame count when the object is animated.
    pub frame_count: Option<u32>,
    /// Nodes carrying per-frame attribute directives, in document order.
    pub frame_objects: Vec<NodeId>,
}

impl ExportItem {
    /// Return `true` when the object is exported as a frame sequence.
    pub fn is_animated(&self) -> bool {
        self.frame_count.is_some()
    }
}

/// Output of [`resolve`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Resolution {
    /// Exportable objects in document order.
    pub items: Vec<ExportItem>,
    /// The tree was modified and must be re-serialized before rendering.
    pub needs_rewrite: bool,
}

impl Resolution {
    /// Return `true` when any item is animated.
    pub fn has_animation(&self) -> bool {
        self.items.iter().any(ExportItem::is_animated)
    }
}

/// Walk `doc` once, collecting export items and applying transparency markers in place.
///
/// Frame directives are collected for the outermost enclosing animated item. An animated item
/// nested inside another one does not open its own frame scope; its directives belong to the
/// outer item.
///
/// Still objects sharing an output filename are exported once: the entry keeps the position of
/// the first node and takes the id of the last one.
#[tracing::instrument(skip_all)]
pub fn resolve(doc: &mut Document, opts: &ResolveOptions) -> ExportResult<Resolution> {
    let mut walker = Walker {
        doc,
        opts,
        out: Resolution::default(),
        stills: HashMap::new(),
    };
    let roots = walker.doc.roots().to_vec();
    for root in roots {
        walker.visit(root, None)?;
    }
    Ok(walker.out)
}

struct Walker<'a> {
    doc: &'a mut Document,
    opts: &'a ResolveOptions,
    out: Resolution,
    /// Output filename of each still item, mapped to its index in `out.items`.
    stills: HashMap<String, usize>,
}

impl Walker<'_> {
    /// `scope` is the index of the animated item whose subtree we are in, if any.
    fn visit(&mut self, node: NodeId, scope: Option<usize>) -> ExportResult<()> {
        let Some(el) = self.doc.element(node) else {
            return Ok(());
        };
        let names = &self.opts.annotations;
        let has_directive = el.attrs.contains_key(&names.animate);
        let transparent = el.attr(&names.transparent).is_some_and(flag_enabled);
        let children = el.children.clone();

        let mut scope = scope;
        if let Some(item) = self.marker(node)? {
            let animated = item.is_animated();
            tracing::debug!(id = %item.id, filename = %item.filename, frames = ?item.frame_count, "found export object");
            if !animated && let Some(&existing) = self.stills.get(&item.filename) {
                tracing::warn!(
                    filename = %item.filename,
                    replaced = %self.out.items[existing].id,
                    id = %item.id,
                    "duplicate export name; the later object wins"
                );
                self.out.items[existing] = item;
            } else {
                if !animated {
                    self.stills.insert(item.filename.clone(), self.out.items.len());
                }
                self.out.items.push(item);
            }
            if animated {
                match scope {
                    None => scope = Some(self.out.items.len() - 1),
                    Some(outer) => tracing::warn!(
                        outer = %self.out.items[outer].id,
                        inner = %self.out.items[self.out.items.len() - 1].id,
                        "animated object nested inside another animated object; \
                         its frame directives are attached to the outer object"
                    ),
                }
            }
        }

        if has_directive {
            match scope {
                Some(active) => self.out.items[active].frame_objects.push(node),
                None => tracing::warn!(
                    node = ?node,
                    "frame directive outside any animated object is ignored"
                ),
            }
        }

        if transparent {
            let style = self.doc.attr(node, "style").unwrap_or_default();
            let patched = force_transparent_fill(style);
            self.doc.set_attr(node, "style", patched);
            self.out.needs_rewrite = true;
        }

        for child in children {
            self.visit(child, scope)?;
        }
        Ok(())
    }

    fn marker(&self, node: NodeId) -> ExportResult<Option<ExportItem>> {
        let names = &self.opts.annotations;
        let explicit = self
            .doc
            .attr(node, &names.filename)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_owned);
        let filename = match explicit {
            Some(f) => f,
            None if self.opts.discover_titles => match self.doc.child_text(node, "title") {
                Some(t) => t,
                None => return Ok(None),
            },
            None => return Ok(None),
        };

        let id = self
            .doc
            .attr(node, "id")
            .filter(|s| !s.is_empty())
            .ok_or_else(|| ExportError::missing_id(&filename))?
            .to_owned();

        let frame_count = match self.doc.attr(node, &names.frames) {
            Some(raw) => Some(parse_frame_count(raw, &id)?),
            None => None,
        };

        Ok(Some(ExportItem {
            id,
            node,
            filename,
            frame_count,
            frame_objects: Vec::new(),
        }))
    }
}

fn parse_frame_count(raw: &str, id: &str) -> ExportResult<u32> {
    match raw.trim().parse::<u32>() {
        Ok(n) if n >= 1 => Ok(n),
        _ => Err(ExportError::annotation(format!(
            "object '{id}': frame count must be a positive integer, got '{raw}'"
        ))),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/resolve/resolver.rs"]
mod tests;
