use crate::commands::CmdResult;
use crate::error::{FoldsError, Result};
use crate::session::FoldSession;
use crate::store::backend::StorageBackend;

pub fn run<S: StorageBackend>(session: &FoldSession<S>, file: &str) -> Result<CmdResult> {
    let id = session
        .registry()
        .resolve(file)
        .ok_or_else(|| FoldsError::UnknownIdentity(file.to_string()))?;
    let path = session.backend().record_path(id);
    Ok(CmdResult::default()
        .with_folds(session.folds_for(file).to_vec())
        .with_record_paths(vec![path]))
}
