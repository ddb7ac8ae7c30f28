pub mod check;
pub mod facts;

use std::path::Path;
use std::sync::Arc;

use pact_core::memory::MemoryModel;
use pact_core::model::ProgramModel;

/// Load the Program Model dump, reporting failures as `pact <command>: ...`.
pub(crate) fn load_model(command: &str, path: &Path) -> Option<Arc<dyn ProgramModel>> {
    match MemoryModel::load(path) {
        Ok(model) => Some(Arc::new(model)),
        Err(e) => {
            eprintln!(
                "pact {}: failed to load model {}: {}",
                command,
                path.display(),
                e
            );
            None
        }
    }
}
