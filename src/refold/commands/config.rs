use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::session::FoldSession;
use crate::store::backend::StorageBackend;

pub fn run<S: StorageBackend>(session: &FoldSession<S>, key: Option<&str>) -> Result<CmdResult> {
    let config = session.config().clone();
    let Some(key) = key else {
        return Ok(CmdResult::default().with_config(config));
    };

    let mut result = CmdResult::default();
    match config.get(key) {
        Some(value) => result.add_message(CmdMessage::info(value.to_string())),
        None => result.add_message(CmdMessage::warning(format!("{} is not set", key))),
    }
    Ok(result)
}
