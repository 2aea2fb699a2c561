use indexmap::IndexMap;

/// Index of a node inside its owning [`Document`] arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

/// One element with ordered attributes and children.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Element {
    /// Qualified tag name as written in the source (`g`, `svg:title`, ...).
    pub name: String,
    /// Attributes in source order; values are unescaped.
    pub attrs: IndexMap<String, String>,
    /// Child nodes in document order.
    pub children: Vec<NodeId>,
}

impl Element {
    /// Create an element without attributes or children.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attrs: IndexMap::new(),
            children: Vec::new(),
        }
    }

    /// Tag name without namespace prefix.
    pub fn local_name(&self) -> &str {
        match self.name.rsplit_once(':') {
            Some((_, local)) => local,
            None => &self.name,
        }
    }

    /// Borrow an attribute value.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }
}

/// A node of the document tree.
///
/// Non-element markup keeps its raw source text so that serialization reproduces it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Node {
    /// An element.
    Element(Element),
    /// Character data, stored escaped exactly as it appeared in the source.
    Text(String),
    /// `<![CDATA[...]]>` content.
    CData(String),
    /// `<!--...-->` content.
    Comment(String),
    /// `<?xml ...?>` content.
    Declaration(String),
    /// `<?target ...?>` content.
    ProcessingInstruction(String),
    /// `<!DOCTYPE ...>` content.
    DocType(String),
}

/// Arena-backed document: nodes are addressed by [`NodeId`] and mutated in place.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Document {
    nodes: Vec<Node>,
    roots: Vec<NodeId>,
}

impl Document {
    /// Create an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a detached node.
    pub fn push(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        id
    }

    /// Attach `child` under `parent`, or at top level when `parent` is `None`.
    ///
    /// Adjacent text nodes are merged, so split character data (text around entity references)
    /// is stored as one node.
    pub fn attach(&mut self, parent: Option<NodeId>, child: NodeId) {
        let siblings = match parent {
            Some(p) => match &self.nodes[p.0] {
                Node::Element(el) => &el.children,
                _ => return,
            },
            None => &self.roots,
        };
        if let Some(&last) = siblings.last()
            && let (Node::Text(_), Node::Text(extra)) = (&self.nodes[last.0], &self.nodes[child.0])
        {
            let extra = extra.clone();
            if let Node::Text(prev) = &mut self.nodes[last.0] {
                prev.push_str(&extra);
            }
            return;
        }
        match parent {
            Some(p) => {
                if let Node::Element(el) = &mut self.nodes[p.0] {
                    el.children.push(child);
                }
            }
            None => self.roots.push(child),
        }
    }

    /// Top-level nodes in document order.
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    /// Number of allocated nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Return `true` when the document has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Borrow a node.
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    /// Borrow a node as an element.
    pub fn element(&self, id: NodeId) -> Option<&Element> {
        match &self.nodes[id.0] {
            Node::Element(el) => Some(el),
            _ => None,
        }
    }

    /// Mutably borrow a node as an element.
    pub fn element_mut(&mut self, id: NodeId) -> Option<&mut Element> {
        match &mut self.nodes[id.0] {
            Node::Element(el) => Some(el),
            _ => None,
        }
    }

    /// The first top-level element (`<svg>` for SVG documents).
    pub fn root_element(&self) -> Option<NodeId> {
        self.roots
            .iter()
            .copied()
            .find(|&id| self.element(id).is_some())
    }

    /// Borrow an attribute of an element node.
    pub fn attr(&self, id: NodeId, name: &str) -> Option<&str> {
        self.element(id).and_then(|el| el.attr(name))
    }

    /// Set an attribute, keeping its position when it already exists.
    ///
    /// Returns `false` when `id` is not an element.
    pub fn set_attr(&mut self, id: NodeId, name: &str, value: impl Into<String>) -> bool {
        match self.element_mut(id) {
            Some(el) => {
                el.attrs.insert(name.to_owned(), value.into());
                true
            }
            None => false,
        }
    }

    /// Remove an attribute, preserving the order of the others.
    pub fn remove_attr(&mut self, id: NodeId, name: &str) -> Option<String> {
        self.element_mut(id)
            .and_then(|el| el.attrs.shift_remove(name))
    }

    /// Child elements of `id` in document order.
    pub fn child_elements(&self, id: NodeId) -> impl Iterator<Item = (NodeId, &Element)> + '_ {
        self.element(id)
            .map(|el| el.children.as_slice())
            .unwrap_or(&[])
            .iter()
            .filter_map(|&c| self.element(c).map(|el| (c, el)))
    }

    /// Unescaped, trimmed text content of the first child element with local name `tag`.
    ///
    /// Returns `None` when there is no such child or its text is blank.
    pub fn child_text(&self, id: NodeId, tag: &str) -> Option<String> {
        let (_, child) = self
            .child_elements(id)
            .find(|(_, el)| el.local_name() == tag)?;
        let mut out = String::new();
        for &c in &child.children {
            match &self.nodes[c.0] {
                Node::Text(raw) => match quick_xml::escape::unescape(raw) {
                    Ok(text) => out.push_str(&text),
                    Err(_) => out.push_str(raw),
                },
                Node::CData(text) => out.push_str(text),
                _ => {}
            }
        }
        let trimmed = out.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_owned())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/document/tree.rs"]
mod tests;
