use crate::expression::ast::Expr;
use crate::expression::error::ExprError;
use crate::expression::eval::{Bindings, eval};
use crate::expression::parser::parse_expr;
use crate::foundation::error::ExportResult;

#[derive(Debug, Clone, PartialEq)]
enum Segment {
    Text(String),
    Expr(Expr),
}

/// A parsed `literal ${expr} literal` template.
#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    source: String,
    segments: Vec<Segment>,
}

impl Template {
    /// Parse a template; errors carry the byte offset into `source`.
    pub fn parse(source: &str) -> ExportResult<Self> {
        parse_segments(source)
            .map(|segments| Self {
                source: source.to_owned(),
                segments,
            })
            .map_err(|e| e.into_export(source))
    }

    /// The template text as written.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Return `true` when the template has no substitutions.
    pub fn is_constant(&self) -> bool {
        self.segments
            .iter()
            .all(|s| matches!(s, Segment::Text(_)))
    }

    /// Render the template against `env`.
    pub fn render(&self, env: &Bindings) -> String {
        let mut out = String::with_capacity(self.source.len());
        for segment in &self.segments {
            match segment {
                Segment::Text(t) => out.push_str(t),
                Segment::Expr(e) => out.push_str(&eval(e, env).to_text()),
            }
        }
        out
    }
}

fn parse_segments(src: &str) -> Result<Vec<Segment>, ExprError> {
    let mut segments = Vec::new();
    let mut literal = String::new();
    let mut rest = src;
    let mut base = 0usize;

    while let Some(at) = rest.find("${") {
        literal.push_str(&rest[..at]);
        let open = base + at;
        let body_start = at + 2;
        let body_len = closing_brace(&rest[body_start..])
            .ok_or_else(|| ExprError::new(open, "unterminated '${' in template"))?;
        let body = &rest[body_start..body_start + body_len];
        let expr = parse_expr(body).map_err(|e| e.shifted(base + body_start))?;

        if !literal.is_empty() {
            segments.push(Segment::Text(std::mem::take(&mut literal)));
        }
        segments.push(Segment::Expr(expr));

        let consumed = body_start + body_len + 1;
        base += consumed;
        rest = &rest[consumed..];
    }

    literal.push_str(rest);
    if !literal.is_empty() {
        segments.push(Segment::Text(literal));
    }
    Ok(segments)
}

/// Byte offset of the `}` closing a substitution body, skipping quoted strings.
fn closing_brace(body: &str) -> Option<usize> {
    let mut quote: Option<char> = None;
    for (i, c) in body.char_indices() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '\'' | '"') => quote = Some(c),
            (None, '}') => return Some(i),
            (None, _) => {}
        }
    }
    None
}

#[cfg(test)]
#[path = "../../tests/unit/expression/template.rs"]
mod tests;
