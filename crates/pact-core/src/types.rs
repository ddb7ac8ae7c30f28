use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Opaque source position. Ordered within a module; the Program Model decides
/// what the number means (byte offset in practice).
pub type Pos = u32;

/// Inclusive position range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Span {
    pub start: Pos,
    pub end: Pos,
}

impl Span {
    pub fn new(start: Pos, end: Pos) -> Self {
        Self { start, end: end.max(start) }
    }

    pub fn contains(&self, pos: Pos) -> bool {
        self.start <= pos && pos <= self.end
    }

    /// True when `other` lies entirely inside `self`.
    pub fn encloses(&self, other: &Span) -> bool {
        self.start <= other.start && other.end <= self.end
    }
}

/// Unique identity of a named type/function/method within a module.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DeclRef {
    pub module_path: String,
    pub name: String,
    pub position: Pos,
}

impl DeclRef {
    pub fn new(module_path: impl Into<String>, name: impl Into<String>, position: Pos) -> Self {
        Self {
            module_path: module_path.into(),
            name: name.into(),
            position,
        }
    }

    /// Whether a type reference names this declaration (module + name).
    pub fn is_type(&self, ty: &TypeRef) -> bool {
        self.name == ty.base_name && self.module_path == ty.owning_module
    }

    pub fn qualified(&self) -> String {
        format!("{}.{}", self.module_path, self.name)
    }
}

/// A `module.Name` pair that has not been resolved to a declaration yet.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct QualifiedName {
    pub module_path: String,
    pub name: String,
}

impl QualifiedName {
    pub fn new(module_path: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            module_path: module_path.into(),
            name: name.into(),
        }
    }
}

impl std::fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.module_path, self.name)
    }
}

/// Structural reference to a type as it appears in a signature or expression.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TypeRef {
    pub base_name: String,
    /// Empty for predeclared types (`int`, `error`, ...).
    #[serde(default)]
    pub owning_module: String,
    #[serde(default)]
    pub is_indirect: bool,
    #[serde(default)]
    pub is_variadic: bool,
}

impl TypeRef {
    pub fn named(owning_module: impl Into<String>, base_name: impl Into<String>) -> Self {
        Self {
            base_name: base_name.into(),
            owning_module: owning_module.into(),
            is_indirect: false,
            is_variadic: false,
        }
    }

    /// A predeclared type with no owning module.
    pub fn builtin(base_name: impl Into<String>) -> Self {
        Self::named("", base_name)
    }

    pub fn indirect(mut self) -> Self {
        self.is_indirect = true;
        self
    }

    pub fn variadic(mut self) -> Self {
        self.is_variadic = true;
        self
    }

    /// Remove one level of indirection.
    pub fn unwrap_indirect(&self) -> TypeRef {
        TypeRef {
            is_indirect: false,
            ..self.clone()
        }
    }
}

impl std::fmt::Display for TypeRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_variadic {
            f.write_str("...")?;
        }
        if self.is_indirect {
            f.write_str("*")?;
        }
        if self.owning_module.is_empty() {
            f.write_str(&self.base_name)
        } else {
            write!(f, "{}.{}", self.owning_module, self.base_name)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MethodSignature {
    pub name: String,
    #[serde(default)]
    pub params: Vec<TypeRef>,
    #[serde(default)]
    pub results: Vec<TypeRef>,
}

impl MethodSignature {
    pub fn new(name: impl Into<String>, params: Vec<TypeRef>, results: Vec<TypeRef>) -> Self {
        Self {
            name: name.into(),
            params,
            results,
        }
    }

    /// Structural equality: same arity on both sides and pairwise equal refs.
    pub fn matches(&self, other: &MethodSignature) -> bool {
        self.name == other.name && self.params == other.params && self.results == other.results
    }
}

impl std::fmt::Display for MethodSignature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let join = |refs: &[TypeRef]| {
            refs.iter()
                .map(|r| r.to_string())
                .collect::<Vec<_>>()
                .join(", ")
        };
        write!(f, "{}({})", self.name, join(&self.params))?;
        match self.results.len() {
            0 => Ok(()),
            1 => write!(f, " {}", self.results[0]),
            _ => write!(f, " ({})", join(&self.results)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReceiverKind {
    Value,
    Pointer,
}

/// One entry of a type's method set.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MethodEntry {
    pub signature: MethodSignature,
    pub receiver: ReceiverKind,
}

/// Required methods of a named interface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterfaceShape {
    pub name: String,
    pub module_path: String,
    pub methods: BTreeSet<MethodSignature>,
}

/// Available methods of a named type, with their receiver kinds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeShape {
    pub name: String,
    pub module_path: String,
    pub methods: Vec<MethodEntry>,
}

impl TypeShape {
    /// Methods callable through a value (`pointer_required == false`) or
    /// through an indirect reference, which also promotes value receivers.
    pub fn candidate_methods(&self, pointer_required: bool) -> impl Iterator<Item = &MethodSignature> {
        self.methods
            .iter()
            .filter(move |m| pointer_required || m.receiver == ReceiverKind::Value)
            .map(|m| &m.signature)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectKind {
    Type,
    Function,
    Method,
}

impl ObjectKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ObjectKind::Type => "type",
            ObjectKind::Function => "function",
            ObjectKind::Method => "method",
        }
    }
}

impl std::fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A declared rule extracted from source annotations.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ContractFact {
    Immutable {
        type_ref: DeclRef,
    },
    Constructor {
        type_ref: DeclRef,
        allowed_names: BTreeSet<String>,
    },
    TestOnly {
        object_kind: ObjectKind,
        object_ref: DeclRef,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        receiver_type: Option<String>,
    },
    PackageOnly {
        object_ref: DeclRef,
        allowed_modules: BTreeSet<String>,
    },
    InterfaceRequirement {
        type_ref: DeclRef,
        interface_ref: QualifiedName,
        pointer_required: bool,
    },
    /// Field-level exemption from the enclosing type's immutability.
    MutableField {
        type_ref: DeclRef,
        field: String,
    },
}

/// Every fact declared by one module.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractFacts {
    pub module_path: String,
    pub facts: Vec<ContractFact>,
}

impl ContractFacts {
    pub fn new(module_path: impl Into<String>) -> Self {
        Self {
            module_path: module_path.into(),
            facts: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.facts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.facts.is_empty()
    }

    pub fn is_immutable(&self, type_name: &str) -> bool {
        self.facts.iter().any(|f| {
            matches!(f, ContractFact::Immutable { type_ref } if type_ref.name == type_name)
        })
    }

    /// Union of every constructor whitelist declared for `type_name`, or
    /// `None` when the type has no constructor restriction.
    pub fn constructors_for(&self, type_name: &str) -> Option<BTreeSet<String>> {
        let mut found: Option<BTreeSet<String>> = None;
        for fact in &self.facts {
            if let ContractFact::Constructor { type_ref, allowed_names } = fact {
                if type_ref.name == type_name {
                    found
                        .get_or_insert_with(BTreeSet::new)
                        .extend(allowed_names.iter().cloned());
                }
            }
        }
        found
    }

    pub fn is_mutable_field(&self, type_name: &str, field_name: &str) -> bool {
        self.facts.iter().any(|f| {
            matches!(f, ContractFact::MutableField { type_ref, field }
                if type_ref.name == type_name && field == field_name)
        })
    }

    pub fn test_only(&self, object: &DeclRef) -> Option<&ContractFact> {
        self.facts.iter().find(
            |f| matches!(f, ContractFact::TestOnly { object_ref, .. } if object_ref == object),
        )
    }

    /// Allowed modules for a package-only object, unioned across facts.
    pub fn package_only(&self, object: &DeclRef) -> Option<BTreeSet<String>> {
        let mut found: Option<BTreeSet<String>> = None;
        for fact in &self.facts {
            if let ContractFact::PackageOnly { object_ref, allowed_modules } = fact {
                if object_ref == object {
                    found
                        .get_or_insert_with(BTreeSet::new)
                        .extend(allowed_modules.iter().cloned());
                }
            }
        }
        found
    }

    pub fn requirements(&self) -> impl Iterator<Item = (&DeclRef, &QualifiedName, bool)> {
        self.facts.iter().filter_map(|f| match f {
            ContractFact::InterfaceRequirement {
                type_ref,
                interface_ref,
                pointer_required,
            } => Some((type_ref, interface_ref, *pointer_required)),
            _ => None,
        })
    }

    /// Stable fingerprint for cross-run propagation.
    pub fn fingerprint(&self) -> String {
        crate::hash::fingerprint_facts(self)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Failure to resolve something a check depends on.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    #[error("module not found: {0}")]
    ModuleNotFound(String),

    #[error("interface not found: {0}")]
    InterfaceNotFound(QualifiedName),

    #[error("type not found: {0}")]
    TypeNotFound(QualifiedName),
}

/// Errors loading or saving a serialized Program Model.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid model JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Canonical form of a module path: quotes, `./` prefixes, duplicate and
/// trailing slashes removed.
pub fn normalize_module_path(path: &str) -> String {
    let trimmed = path.trim().trim_matches('"');
    let trimmed = trimmed.strip_prefix("./").unwrap_or(trimmed);
    trimmed
        .split('/')
        .filter(|seg| !seg.is_empty() && *seg != ".")
        .collect::<Vec<_>>()
        .join("/")
}
