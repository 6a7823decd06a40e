use crate::commands::{CmdMessage, CmdResult};
use crate::error::{FoldsError, Result};
use crate::session::FoldSession;
use crate::store::backend::StorageBackend;

/// Point the folds recorded for `old` at `new`, e.g. after moving a file
/// outside the editor.
pub fn run<S: StorageBackend>(
    session: &mut FoldSession<S>,
    old: &str,
    new: &str,
) -> Result<CmdResult> {
    if session.registry().resolve(old).is_none() {
        return Err(FoldsError::UnknownIdentity(old.to_string()));
    }
    session.on_path_renamed(old, new)?;

    let mut result = CmdResult::default();
    result.messages.extend(session.take_messages());
    result.add_message(CmdMessage::success(format!("Folds moved: {} -> {}", old, new)));
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FoldRange;
    use crate::store::memory::MemBackend;
    use crate::store::INDEX_FILENAME;

    fn session() -> FoldSession<MemBackend> {
        let backend = MemBackend::new();
        backend.put(INDEX_FILENAME, r#"{"/a.js": "ab12cd34"}"#);
        backend.put(
            "ab12cd34.json",
            r#"[{"start":{"row":5,"column":0},"end":{"row":6,"column":0}}]"#,
        );
        let mut session = FoldSession::new(backend);
        session.load().unwrap();
        session
    }

    #[test]
    fn moves_mapping_and_persists_it() {
        let mut session = session();
        run(&mut session, "/a.js", "/b.js").unwrap();

        assert_eq!(
            session.folds_for("/b.js"),
            &[FoldRange::from_coords(5, 0, 6, 0)]
        );
        let index = session.backend().get(INDEX_FILENAME).unwrap();
        assert!(index.contains("\"/b.js\": \"ab12cd34\""));
        assert!(!index.contains("/a.js"));
    }

    #[test]
    fn unknown_source_is_an_error() {
        let mut session = session();
        let err = run(&mut session, "/x.js", "/y.js").unwrap_err();
        assert!(matches!(err, FoldsError::UnknownIdentity(_)));
        assert!(session.registry().resolve("/y.js").is_none());
    }
}
