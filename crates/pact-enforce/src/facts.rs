//! Fact extraction from a Program Model's declaration annotations.

use std::collections::BTreeSet;
use std::sync::Arc;

use pact_core::model::{DeclKind, Declaration, ProgramModel};
use pact_core::types::{
    normalize_module_path, ContractFact, ContractFacts, ObjectKind, QualifiedName,
};

use crate::directive::{self, Keyword};
use crate::fact_store::FactProvider;

/// Extracts facts straight from the Program Model.
pub struct ModelFactProvider {
    model: Arc<dyn ProgramModel>,
    prefix: String,
}

impl ModelFactProvider {
    pub fn new(model: Arc<dyn ProgramModel>, prefix: impl Into<String>) -> Self {
        Self {
            model,
            prefix: prefix.into(),
        }
    }
}

impl FactProvider for ModelFactProvider {
    fn get_facts(&self, module_path: &str) -> Option<ContractFacts> {
        extract_facts(&*self.model, module_path, &self.prefix)
    }
}

/// Every fact declared in `module`, or `None` if the model does not know it.
pub fn extract_facts(
    model: &dyn ProgramModel,
    module: &str,
    prefix: &str,
) -> Option<ContractFacts> {
    let declarations = model.declarations(module)?;
    let mut facts = ContractFacts::new(module);

    for decl in &declarations {
        for annotation in &decl.annotations {
            let Some(d) = directive::parse(&annotation.text, prefix) else {
                continue;
            };
            if let Some(fact) = decl_fact(model, module, decl, d.keyword, &d.args) {
                facts.facts.extend(fact);
            }
        }
        for field in &decl.fields {
            let exempt = field.annotations.iter().any(|a| {
                directive::parse(&a.text, prefix).is_some_and(|d| d.keyword == Keyword::Mutable)
            });
            if exempt {
                facts.facts.push(ContractFact::MutableField {
                    type_ref: decl.id.clone(),
                    field: field.name.clone(),
                });
            }
        }
    }

    Some(facts)
}

fn decl_fact(
    model: &dyn ProgramModel,
    module: &str,
    decl: &Declaration,
    keyword: Keyword,
    args: &[String],
) -> Option<Vec<ContractFact>> {
    let is_type = decl.kind == DeclKind::Type;
    let fact = match keyword {
        Keyword::Immutable if is_type => vec![ContractFact::Immutable {
            type_ref: decl.id.clone(),
        }],
        Keyword::Constructor if is_type => vec![ContractFact::Constructor {
            type_ref: decl.id.clone(),
            allowed_names: args.iter().cloned().collect(),
        }],
        Keyword::Implements if is_type => args
            .iter()
            .filter_map(|arg| {
                let pointer_required = arg.starts_with('*');
                let (alias, name) = split_qualified(arg.trim_start_matches('*'))?;
                let interface_module = match alias {
                    Some(alias) => model
                        .resolve_import(module, alias)
                        .unwrap_or_else(|| alias.to_string()),
                    None => module.to_string(),
                };
                Some(ContractFact::InterfaceRequirement {
                    type_ref: decl.id.clone(),
                    interface_ref: QualifiedName::new(
                        normalize_module_path(&interface_module),
                        name,
                    ),
                    pointer_required,
                })
            })
            .collect(),
        Keyword::TestOnly => vec![ContractFact::TestOnly {
            object_kind: object_kind(decl.kind),
            object_ref: decl.id.clone(),
            receiver_type: decl.receiver.as_ref().map(|r| r.type_name.clone()),
        }],
        Keyword::PackageOnly => {
            let allowed_modules: BTreeSet<String> =
                args.iter().map(|a| normalize_module_path(a)).collect();
            vec![ContractFact::PackageOnly {
                object_ref: decl.id.clone(),
                allowed_modules,
            }]
        }
        Keyword::Ignore | Keyword::Mutable => return None,
        _ => {
            tracing::debug!(
                module = %module,
                decl = %decl.id.name,
                ?keyword,
                "directive not applicable to this declaration kind"
            );
            return None;
        }
    };
    Some(fact)
}

fn object_kind(kind: DeclKind) -> ObjectKind {
    match kind {
        DeclKind::Type | DeclKind::Interface => ObjectKind::Type,
        DeclKind::Function => ObjectKind::Function,
        DeclKind::Method => ObjectKind::Method,
    }
}

/// `Reader` -> (None, "Reader"); `io.Reader` -> (Some("io"), "Reader");
/// `example.com/x/io.Reader` -> (Some("example.com/x/io"), "Reader").
fn split_qualified(s: &str) -> Option<(Option<&str>, &str)> {
    let tail_start = s.rfind('/').map_or(0, |i| i + 1);
    let (qualifier, name) = match s[tail_start..].rfind('.') {
        Some(dot) => {
            let dot = tail_start + dot;
            (Some(&s[..dot]), &s[dot + 1..])
        }
        None => (None, s),
    };
    if name.is_empty() || qualifier.is_some_and(str::is_empty) {
        return None;
    }
    Some((qualifier, name))
}
