use crate::commands::{CmdResult, TrackedFile};
use crate::error::Result;
use crate::session::FoldSession;
use crate::store::backend::StorageBackend;

pub fn run<S: StorageBackend>(session: &FoldSession<S>) -> Result<CmdResult> {
    let files = session
        .registry()
        .iter()
        .map(|(path, id)| TrackedFile {
            path: path.to_string(),
            id: id.clone(),
            folds: session.records().get(id).len(),
        })
        .collect();
    Ok(CmdResult::default().with_tracked_files(files))
}
