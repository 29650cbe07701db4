use super::Handle;

#[derive(Clone, Debug)]
pub enum AstKind {
    /// A quoted word, number, list or array.
    Literal(Handle),
    /// `:name`
    Variable(String),
    /// A procedure call; the children are its input expressions.
    Call(String),
    /// The parse of a whole instruction list. `generation` is the registry
    /// generation the parse was made against; `source` holds the items of
    /// the list as they were when it was parsed.
    Sequence { generation: u64, source: Vec<Handle> },
}

/// A parsed expression.
#[derive(Clone, Debug)]
pub struct AstNode {
    pub kind: AstKind,
    pub children: Vec<Handle>,
}

impl AstNode {
    pub fn leaf(kind: AstKind) -> Self {
        AstNode {
            kind,
            children: Vec::new(),
        }
    }

    pub fn with_children(kind: AstKind, children: Vec<Handle>) -> Self {
        AstNode { kind, children }
    }

    /// Short name for rendering and error messages.
    pub fn name(&self) -> &str {
        match &self.kind {
            AstKind::Literal(_) => "literal",
            AstKind::Variable(name) | AstKind::Call(name) => name,
            AstKind::Sequence { .. } => "sequence",
        }
    }
}
