use crate::commands::{CmdMessage, CmdResult, FoldsPaths};
use crate::error::Result;
use crate::session::FoldSession;
use crate::store::fs::FsBackend;
use std::fs;

pub fn run(paths: &FoldsPaths) -> Result<CmdResult> {
    let existed = paths.store_dir.is_dir();
    fs::create_dir_all(&paths.store_dir)?;

    // Loading once creates config.json and foldsPropaties.json when missing
    let mut session = FoldSession::new(FsBackend::new(paths.store_dir.clone()));
    session.load()?;

    let mut result = CmdResult::default();
    result.messages.extend(session.take_messages());
    if existed {
        result.add_message(CmdMessage::info(format!(
            "Fold store already present at {}",
            paths.store_dir.display()
        )));
    } else {
        result.add_message(CmdMessage::success(format!(
            "Initialized fold store at {}",
            paths.store_dir.display()
        )));
    }
    Ok(result)
}
