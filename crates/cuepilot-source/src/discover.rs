//! Schedule source discovery.
//!
//! A run needs exactly one source. An explicit path wins, with its backend
//! inferred from the file unless configured; otherwise the schedule
//! directory is scanned for a single CSV cue sheet. Zero or multiple
//! candidates abort the run before any cue is scheduled.

use std::path::Path;
use std::str::FromStr;

use tracing::info;

use cuepilot_core::config::ScheduleConfig;

use crate::calendar::CalendarSource;
use crate::error::{Result, SourceError};
use crate::keyvalue::KeyValueSource;
use crate::table::TableSource;
use crate::timelist::TimeListSource;
use crate::ScheduleSource;

/// Which backend reads the sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Table,
    KeyValue,
    TimeList,
    Calendar,
}

impl FromStr for SourceKind {
    type Err = SourceError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "table" => Ok(SourceKind::Table),
            "keyvalue" => Ok(SourceKind::KeyValue),
            "timelist" => Ok(SourceKind::TimeList),
            "calendar" => Ok(SourceKind::Calendar),
            other => Err(SourceError::UnknownKind(other.to_string())),
        }
    }
}

/// Resolve the single schedule source for this run.
pub fn resolve_source(schedule: &ScheduleConfig) -> Result<Box<dyn ScheduleSource>> {
    match schedule.path {
        Some(ref path) => {
            let kind = match schedule.kind {
                Some(ref kind) => kind.parse()?,
                None => infer_kind(Path::new(path))?,
            };
            info!(path = %path, kind = ?kind, "using explicit schedule source");
            build(kind, path, schedule)
        }
        None => {
            let path = scan_for_cue_sheet(&schedule.dir)?;
            info!(path = %path, "using discovered cue sheet");
            build(SourceKind::Table, &path, schedule)
        }
    }
}

fn build(kind: SourceKind, path: &str, schedule: &ScheduleConfig) -> Result<Box<dyn ScheduleSource>> {
    Ok(match kind {
        SourceKind::Table => Box::new(TableSource::new(path)),
        SourceKind::KeyValue => Box::new(KeyValueSource::new(path)),
        SourceKind::TimeList => Box::new(TimeListSource::new(path)),
        SourceKind::Calendar => {
            let identity = schedule
                .identity
                .clone()
                .ok_or(SourceError::MissingIdentity)?;
            Box::new(CalendarSource::new(path, identity))
        }
    })
}

/// Infer a backend from the file itself: extension first, then a content
/// sniff to split the two plain-text formats.
fn infer_kind(path: &Path) -> Result<SourceKind> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("csv") => return Ok(SourceKind::Table),
        Some("json") => return Ok(SourceKind::Calendar),
        _ => {}
    }

    let contents = std::fs::read_to_string(path).map_err(|e| SourceError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    let first = contents
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .unwrap_or("");

    // "hours: 16" style keys mark the key-value sheet; anything else in a
    // plain text file is treated as a time list.
    if first
        .split_once(':')
        .is_some_and(|(key, _)| key.trim().chars().all(|c| c.is_ascii_alphabetic()))
    {
        Ok(SourceKind::KeyValue)
    } else {
        Ok(SourceKind::TimeList)
    }
}

/// Scan `dir` for exactly one `*.csv` cue sheet.
fn scan_for_cue_sheet(dir: &str) -> Result<String> {
    let entries = std::fs::read_dir(dir).map_err(|e| SourceError::Io {
        path: dir.into(),
        source: e,
    })?;

    let mut candidates: Vec<String> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.is_file()
                && path
                    .extension()
                    .and_then(|e| e.to_str())
                    .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
        })
        .map(|path| path.to_string_lossy().into_owned())
        .collect();
    candidates.sort();

    match candidates.len() {
        0 => Err(SourceError::NoSource {
            dir: dir.to_string(),
        }),
        1 => Ok(candidates.remove(0)),
        _ => Err(SourceError::AmbiguousSource {
            dir: dir.to_string(),
            candidates,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(name);
        std::fs::remove_dir_all(&dir).ok();
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn single_csv_is_discovered() {
        let dir = scratch_dir("cuepilot-discover-single");
        std::fs::write(dir.join("show.csv"), "column,yyyy/mm/dd,hh:mm:ss\n").unwrap();

        let found = scan_for_cue_sheet(dir.to_str().unwrap()).unwrap();
        assert!(found.ends_with("show.csv"));
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn two_csvs_are_ambiguous_and_named() {
        let dir = scratch_dir("cuepilot-discover-ambig");
        std::fs::write(dir.join("a.csv"), "").unwrap();
        std::fs::write(dir.join("b.csv"), "").unwrap();

        let err = scan_for_cue_sheet(dir.to_str().unwrap()).unwrap_err();
        match err {
            SourceError::AmbiguousSource { candidates, .. } => {
                assert_eq!(candidates.len(), 2);
                assert!(candidates[0].ends_with("a.csv"));
                assert!(candidates[1].ends_with("b.csv"));
            }
            other => panic!("expected AmbiguousSource, got {:?}", other),
        }
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn empty_dir_has_no_source() {
        let dir = scratch_dir("cuepilot-discover-empty");
        let err = scan_for_cue_sheet(dir.to_str().unwrap()).unwrap_err();
        assert!(matches!(err, SourceError::NoSource { .. }));
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn kind_inference_by_extension_and_content() {
        let dir = scratch_dir("cuepilot-discover-infer");
        let kv = dir.join("target_time.txt");
        let tl = dir.join("target_time_multi.txt");
        std::fs::write(&kv, "hours: 16\nminutes: 45\n").unwrap();
        std::fs::write(&tl, "16:45\n17:00\n").unwrap();

        assert_eq!(infer_kind(Path::new("show.csv")).unwrap(), SourceKind::Table);
        assert_eq!(
            infer_kind(Path::new("events.json")).unwrap(),
            SourceKind::Calendar
        );
        assert_eq!(infer_kind(&kv).unwrap(), SourceKind::KeyValue);
        assert_eq!(infer_kind(&tl).unwrap(), SourceKind::TimeList);
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn unknown_kind_string_is_rejected() {
        assert!(matches!(
            "spreadsheet".parse::<SourceKind>(),
            Err(SourceError::UnknownKind(_))
        ));
    }

    #[test]
    fn calendar_without_identity_is_rejected() {
        let schedule = ScheduleConfig {
            path: Some("events.json".to_string()),
            kind: Some("calendar".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            resolve_source(&schedule),
            Err(SourceError::MissingIdentity)
        ));
    }
}
