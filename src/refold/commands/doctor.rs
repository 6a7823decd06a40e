use crate::codec;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::RecordId;
use crate::session::FoldSession;
use crate::store::backend::StorageBackend;

/// Consistency problems between the mapping and the record documents.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct DoctorReport {
    /// Record documents no path maps to.
    pub orphaned: Vec<RecordId>,
    /// Ids in the mapping whose document was never written.
    pub missing: Vec<RecordId>,
    /// Record documents that fail to decode.
    pub malformed: Vec<RecordId>,
}

impl DoctorReport {
    pub fn is_clean(&self) -> bool {
        self.orphaned.is_empty() && self.malformed.is_empty()
    }
}

/// Inspect the store. Nothing is deleted or rewritten.
pub fn diagnose<S: StorageBackend>(session: &FoldSession<S>) -> Result<DoctorReport> {
    let backend = session.backend();
    let registry = session.registry();
    let mut report = DoctorReport::default();

    for id in backend.list_record_ids()? {
        if !registry.contains_id(&id) {
            report.orphaned.push(id);
        }
    }

    let mut ids: Vec<&RecordId> = registry.ids().collect();
    ids.sort();
    ids.dedup();
    for id in ids {
        match backend.read_record(id) {
            Ok(Some(text)) => {
                if codec::decode(id, &text).is_err() {
                    report.malformed.push(id.clone());
                }
            }
            Ok(None) => report.missing.push(id.clone()),
            Err(_) => report.malformed.push(id.clone()),
        }
    }

    Ok(report)
}

pub fn run<S: StorageBackend>(session: &FoldSession<S>) -> Result<CmdResult> {
    let report = diagnose(session)?;
    let mut result = CmdResult::default();

    if report.is_clean() {
        result.add_message(CmdMessage::success("No inconsistencies found."));
    } else {
        result.add_message(CmdMessage::warning("Inconsistencies found:"));
        for id in &report.orphaned {
            result.add_message(CmdMessage::info(format!(
                "  - {} is not referenced by any file.",
                session.backend().record_path(id).display()
            )));
        }
        for id in &report.malformed {
            result.add_message(CmdMessage::error(format!(
                "  - {} is malformed; its folds will not be restored.",
                session.backend().record_path(id).display()
            )));
        }
    }
    if !report.missing.is_empty() {
        result.add_message(CmdMessage::info(format!(
            "{} tracked file(s) have no folds saved yet.",
            report.missing.len()
        )));
    }

    Ok(result)
}
