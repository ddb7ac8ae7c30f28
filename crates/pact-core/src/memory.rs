//! In-memory, serializable Program Model.
//!
//! Drivers that already hold a parsed program can populate a [`MemoryModel`]
//! directly or hand the core a JSON dump of one. Tests use it as a fixture.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::model::{
    Comment, DeclKind, Declaration, FunctionBody, ProgramModel, SourceLayout,
};
use crate::types::{
    normalize_module_path, DeclRef, MethodEntry, MethodSignature, ModelError, Pos, TypeRef,
};

/// Everything the model knows about one module.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModuleModel {
    #[serde(default)]
    pub declarations: Vec<Declaration>,
    /// Import alias -> module path.
    #[serde(default)]
    pub imports: BTreeMap<String, String>,
    /// Expression position -> type.
    #[serde(default)]
    pub types: BTreeMap<Pos, TypeRef>,
    /// Identifier/selector position -> declaration it names.
    #[serde(default)]
    pub uses: BTreeMap<Pos, DeclRef>,
    /// Type name -> method set.
    #[serde(default)]
    pub method_sets: BTreeMap<String, Vec<MethodEntry>>,
    /// Interface name -> required methods.
    #[serde(default)]
    pub interfaces: BTreeMap<String, Vec<MethodSignature>>,
    #[serde(default)]
    pub functions: Vec<FunctionBody>,
    #[serde(default)]
    pub comments: Vec<Comment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout: Option<SourceLayout>,
    /// Start position of every line after the first (line 1 starts at 0).
    #[serde(default)]
    pub line_starts: Vec<Pos>,
}

impl ModuleModel {
    pub fn declare(&mut self, decl: Declaration) -> &mut Self {
        self.declarations.push(decl);
        self
    }

    pub fn set_type(&mut self, pos: Pos, ty: TypeRef) -> &mut Self {
        self.types.insert(pos, ty);
        self
    }

    pub fn set_use(&mut self, pos: Pos, decl: DeclRef) -> &mut Self {
        self.uses.insert(pos, decl);
        self
    }

    pub fn import(&mut self, alias: impl Into<String>, module: impl Into<String>) -> &mut Self {
        self.imports.insert(alias.into(), module.into());
        self
    }

    pub fn add_function(&mut self, body: FunctionBody) -> &mut Self {
        self.functions.push(body);
        self
    }

    pub fn add_comment(&mut self, comment: Comment) -> &mut Self {
        self.comments.push(comment);
        self
    }
}

/// A whole program held in memory, keyed by normalized module path.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemoryModel {
    modules: BTreeMap<String, ModuleModel>,
}

impl MemoryModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get or create the module at `path`.
    pub fn module_mut(&mut self, path: &str) -> &mut ModuleModel {
        self.modules.entry(normalize_module_path(path)).or_default()
    }

    pub fn module(&self, path: &str) -> Option<&ModuleModel> {
        self.modules.get(&normalize_module_path(path))
    }

    pub fn from_json(json: &str) -> Result<Self, ModelError> {
        let raw: HashMap<String, ModuleModel> = serde_json::from_str(json)?;
        let modules = raw
            .into_iter()
            .map(|(path, module)| (normalize_module_path(&path), module))
            .collect();
        Ok(Self { modules })
    }

    /// Load a model dump written by a host-language front end.
    pub fn load(path: &Path) -> Result<Self, ModelError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn to_json(&self) -> Result<String, ModelError> {
        Ok(serde_json::to_string_pretty(&self.modules)?)
    }
}

impl ProgramModel for MemoryModel {
    fn modules(&self) -> Vec<String> {
        self.modules.keys().cloned().collect()
    }

    fn declarations(&self, module: &str) -> Option<Vec<Declaration>> {
        self.module(module).map(|m| m.declarations.clone())
    }

    fn lookup(&self, module: &str, name: &str) -> Option<Declaration> {
        self.module(module)?
            .declarations
            .iter()
            .find(|d| d.id.name == name && d.kind != DeclKind::Method)
            .cloned()
    }

    fn resolve_import(&self, module: &str, alias: &str) -> Option<String> {
        let imported = self
            .module(module)
            .and_then(|m| m.imports.get(alias).cloned());
        Some(imported.unwrap_or_else(|| alias.to_string()))
    }

    fn type_of(&self, module: &str, pos: Pos) -> Option<TypeRef> {
        self.module(module)?.types.get(&pos).cloned()
    }

    fn resolve_use(&self, module: &str, pos: Pos) -> Option<DeclRef> {
        self.module(module)?.uses.get(&pos).cloned()
    }

    fn method_set(&self, type_decl: &DeclRef) -> Option<Vec<MethodEntry>> {
        let module = self.module(&type_decl.module_path)?;
        match module.method_sets.get(&type_decl.name) {
            Some(methods) => Some(methods.clone()),
            // A declared type with no methods has an empty method set.
            None => module
                .declarations
                .iter()
                .any(|d| d.id.name == type_decl.name && d.kind == DeclKind::Type)
                .then(Vec::new),
        }
    }

    fn interface_methods(&self, decl: &DeclRef) -> Option<Vec<MethodSignature>> {
        self.module(&decl.module_path)?
            .interfaces
            .get(&decl.name)
            .cloned()
    }

    fn functions(&self, module: &str) -> Vec<FunctionBody> {
        self.module(module)
            .map(|m| m.functions.clone())
            .unwrap_or_default()
    }

    fn comments(&self, module: &str) -> Vec<Comment> {
        self.module(module)
            .map(|m| m.comments.clone())
            .unwrap_or_default()
    }

    fn layout(&self, module: &str) -> Option<SourceLayout> {
        self.module(module)?.layout.clone()
    }

    fn line_of(&self, module: &str, pos: Pos) -> Option<u32> {
        let starts = &self.module(module)?.line_starts;
        let preceding = starts.partition_point(|&start| start <= pos);
        Some(preceding as u32 + 1)
    }
}
