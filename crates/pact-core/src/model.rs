use serde::{Deserialize, Serialize};

use crate::types::{DeclRef, MethodEntry, MethodSignature, Pos, Span, TypeRef};

// ---------------------------------------------------------------------------
// FROZEN CONTRACT -- ProgramModel trait
// The host parser/type checker implements this; the enforcement core only
// consumes it. Do NOT change the signatures without updating every driver.
// ---------------------------------------------------------------------------

/// Parsed program plus symbol/type information, as seen by the checkers.
///
/// Every query is scoped to an explicit module path. Implementors must be
/// `Send + Sync` so one model can be shared by a parallel driver.
pub trait ProgramModel: Send + Sync {
    /// Every module path the model knows about.
    fn modules(&self) -> Vec<String>;

    /// Declarations of `module`, or `None` when the module is unknown.
    fn declarations(&self, module: &str) -> Option<Vec<Declaration>>;

    /// Resolve `name` to at most one declaration of `module`.
    fn lookup(&self, module: &str, name: &str) -> Option<Declaration> {
        self.declarations(module)?
            .into_iter()
            .find(|d| d.id.name == name && d.kind != DeclKind::Method)
    }

    /// Map an import alias used inside `module` to a module path.
    fn resolve_import(&self, _module: &str, alias: &str) -> Option<String> {
        Some(alias.to_string())
    }

    /// Type of the expression at `pos`.
    fn type_of(&self, module: &str, pos: Pos) -> Option<TypeRef>;

    /// Declaration named by the identifier or selector at `pos`.
    fn resolve_use(&self, module: &str, pos: Pos) -> Option<DeclRef>;

    /// Method set of a named type, including receiver kinds.
    fn method_set(&self, type_decl: &DeclRef) -> Option<Vec<MethodEntry>>;

    /// Required methods of an interface; `None` if `decl` is not an interface.
    fn interface_methods(&self, decl: &DeclRef) -> Option<Vec<MethodSignature>>;

    /// Function and method bodies declared in `module`.
    fn functions(&self, module: &str) -> Vec<FunctionBody>;

    /// Comments of `module`, in source order.
    fn comments(&self, module: &str) -> Vec<Comment>;

    /// Declaration/block/statement boundaries of `module`.
    fn layout(&self, module: &str) -> Option<SourceLayout>;

    /// 1-based line of `pos`, for reporting only.
    fn line_of(&self, module: &str, pos: Pos) -> Option<u32>;
}

// ---------------------------------------------------------------------------
// Declarations
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeclKind {
    Type,
    Interface,
    Function,
    Method,
}

/// One line of a doc comment attached to a declaration or field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Annotation {
    pub text: String,
    pub position: Pos,
}

impl Annotation {
    pub fn new(text: impl Into<String>, position: Pos) -> Self {
        Self {
            text: text.into(),
            position,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDecl {
    pub name: String,
    pub position: Pos,
    #[serde(default)]
    pub annotations: Vec<Annotation>,
}

/// Receiver type of a method declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceiverDecl {
    pub type_name: String,
    pub is_pointer: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Declaration {
    pub id: DeclRef,
    pub kind: DeclKind,
    pub span: Span,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receiver: Option<ReceiverDecl>,
    #[serde(default)]
    pub annotations: Vec<Annotation>,
    #[serde(default)]
    pub fields: Vec<FieldDecl>,
}

// ---------------------------------------------------------------------------
// Function bodies
// ---------------------------------------------------------------------------

/// Receiver binding visible inside a method body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receiver {
    /// `None` for an unnamed receiver (`func (T) M()`).
    pub name: Option<String>,
    pub type_ref: TypeRef,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionBody {
    pub decl: DeclRef,
    /// Source file the function lives in.
    pub file: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receiver: Option<Receiver>,
    #[serde(default)]
    pub body: Vec<Stmt>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssignOp {
    Assign,
    Define,
    Add,
    Sub,
    Mul,
    Quo,
    Rem,
    And,
    Or,
    Xor,
    Shl,
    Shr,
    AndNot,
}

impl AssignOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssignOp::Assign => "=",
            AssignOp::Define => ":=",
            AssignOp::Add => "+=",
            AssignOp::Sub => "-=",
            AssignOp::Mul => "*=",
            AssignOp::Quo => "/=",
            AssignOp::Rem => "%=",
            AssignOp::And => "&=",
            AssignOp::Or => "|=",
            AssignOp::Xor => "^=",
            AssignOp::Shl => "<<=",
            AssignOp::Shr => ">>=",
            AssignOp::AndNot => "&^=",
        }
    }

    /// `+=`, `<<=`, ... as opposed to `=` and `:=`.
    pub fn is_compound(&self) -> bool {
        !matches!(self, AssignOp::Assign | AssignOp::Define)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IncDecOp {
    Inc,
    Dec,
}

impl IncDecOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            IncDecOp::Inc => "++",
            IncDecOp::Dec => "--",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "stmt", rename_all = "snake_case")]
pub enum Stmt {
    Assign {
        span: Span,
        lhs: Vec<Expr>,
        op: AssignOp,
        #[serde(default)]
        rhs: Vec<Expr>,
    },
    IncDec {
        span: Span,
        target: Expr,
        op: IncDecOp,
    },
    Expr {
        span: Span,
        expr: Expr,
    },
    /// `if`, `for`, `switch`, ...: header expressions plus nested blocks.
    Nested {
        span: Span,
        #[serde(default)]
        exprs: Vec<Expr>,
        #[serde(default)]
        blocks: Vec<Vec<Stmt>>,
    },
}

impl Stmt {
    pub fn span(&self) -> Span {
        match self {
            Stmt::Assign { span, .. }
            | Stmt::IncDec { span, .. }
            | Stmt::Expr { span, .. }
            | Stmt::Nested { span, .. } => *span,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "expr", rename_all = "snake_case")]
pub enum Expr {
    Ident {
        name: String,
        pos: Pos,
    },
    Selector {
        base: Box<Expr>,
        field: String,
        pos: Pos,
    },
    Index {
        base: Box<Expr>,
        index: Box<Expr>,
        pos: Pos,
    },
    /// `*inner`
    Deref {
        inner: Box<Expr>,
        pos: Pos,
    },
    Call {
        func: Box<Expr>,
        #[serde(default)]
        args: Vec<Expr>,
        pos: Pos,
    },
    /// `T{...}`; the literal's type is `type_of(pos)`.
    CompositeLit {
        #[serde(default)]
        elems: Vec<Expr>,
        pos: Pos,
    },
    FuncLit {
        #[serde(default)]
        body: Vec<Stmt>,
        pos: Pos,
    },
    Other {
        #[serde(default)]
        children: Vec<Expr>,
        pos: Pos,
    },
}

impl Expr {
    pub fn pos(&self) -> Pos {
        match self {
            Expr::Ident { pos, .. }
            | Expr::Selector { pos, .. }
            | Expr::Index { pos, .. }
            | Expr::Deref { pos, .. }
            | Expr::Call { pos, .. }
            | Expr::CompositeLit { pos, .. }
            | Expr::FuncLit { pos, .. }
            | Expr::Other { pos, .. } => *pos,
        }
    }

    pub fn ident(name: impl Into<String>, pos: Pos) -> Self {
        Expr::Ident {
            name: name.into(),
            pos,
        }
    }

    pub fn selector(base: Expr, field: impl Into<String>, pos: Pos) -> Self {
        Expr::Selector {
            base: Box::new(base),
            field: field.into(),
            pos,
        }
    }

    pub fn index(base: Expr, index: Expr, pos: Pos) -> Self {
        Expr::Index {
            base: Box::new(base),
            index: Box::new(index),
            pos,
        }
    }

    pub fn deref(inner: Expr, pos: Pos) -> Self {
        Expr::Deref {
            inner: Box::new(inner),
            pos,
        }
    }

    pub fn call(func: Expr, args: Vec<Expr>, pos: Pos) -> Self {
        Expr::Call {
            func: Box::new(func),
            args,
            pos,
        }
    }

    pub fn lit(pos: Pos) -> Self {
        Expr::Other {
            children: vec![],
            pos,
        }
    }
}

// ---------------------------------------------------------------------------
// Comments and layout
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub text: String,
    pub span: Span,
    /// 1-based line the comment starts on.
    pub line: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Decl,
    Block,
    Stmt,
}

/// Position range of a declaration, block, or statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyntaxNode {
    pub kind: NodeKind,
    pub span: Span,
    /// 1-based line the node starts on.
    pub line: u32,
    /// 1-based line the node ends on, when the front end reports it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_line: Option<u32>,
}

impl SyntaxNode {
    pub fn new(kind: NodeKind, span: Span, line: u32) -> Self {
        Self {
            kind,
            span,
            line,
            end_line: None,
        }
    }

    pub fn ending_on(mut self, line: u32) -> Self {
        self.end_line = Some(line);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceLayout {
    /// Extent of the whole module.
    pub span: Span,
    /// Unordered; consumers sort as needed.
    #[serde(default)]
    pub nodes: Vec<SyntaxNode>,
}
