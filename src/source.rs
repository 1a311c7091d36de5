use crate::error::{DecodeError, SiftError};
use crate::record::Record;
use crate::schema::Schema;
use evtx::EvtxParser;
use serde_json::Value;
use std::io::BufRead;
use std::path::{Path, PathBuf};

/// Container format of one input file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum InputFormat {
    /// Binary Windows event log container
    Evtx,
    /// Line-delimited JSON export of the same logical schema
    Jsonl,
}

/// Extension-based format detection; `--format` overrides it.
pub fn detect_format(path: &Path) -> Option<InputFormat> {
    let ext = path.extension()?.to_str()?.to_lowercase();
    match ext.as_str() {
        "evtx" => Some(InputFormat::Evtx),
        "jsonl" | "json" => Some(InputFormat::Jsonl),
        _ => None,
    }
}

/// Directory mode: the fixed set of recognized log files for this view,
/// in declaration order. Each name is probed as-is (binary log) and with
/// a `.jsonl` suffix (exported log).
pub fn expand_directory(dir: &Path, schema: &Schema) -> Vec<PathBuf> {
    let mut found = Vec::new();
    for name in schema.log_files {
        let binary = dir.join(name);
        if binary.is_file() {
            found.push(binary);
        }
        let exported = dir.join(format!("{name}.jsonl"));
        if exported.is_file() {
            found.push(exported);
        }
    }
    found
}

/// Decodes one binary container through the external `evtx` parser,
/// feeding each record (or its decode failure) to the sink in on-disk
/// order. The sequence is lazy, forward-only and not restartable; a
/// malformed record is passed through as an error, never as a blank row.
pub fn read_evtx<F>(path: &Path, mut sink: F) -> Result<(), SiftError>
where
    F: FnMut(Result<Record, DecodeError>) -> Result<(), SiftError>,
{
    let mut parser = EvtxParser::from_path(path).map_err(|e| SiftError::OpenFailed {
        path: path.to_path_buf(),
        source: Box::new(e),
    })?;

    for item in parser.records_json_value() {
        let next = match item {
            Ok(serialized) => Record::from_event_json(&serialized.data).map(|mut record| {
                if record.timestamp.is_empty() {
                    // Some corrupted payloads drop TimeCreated; the record
                    // header's timestamp is still authoritative.
                    record.timestamp = serialized.timestamp.format("%Y-%m-%dT%H:%M:%S").to_string();
                }
                record
            }),
            Err(e) => Err(DecodeError::Evtx(Box::new(e))),
        };
        sink(next)?;
    }
    Ok(())
}

/// Reads a JSONL export line by line. Blank lines are ignored; a line
/// that fails to parse is one malformed record, not a fatal error.
pub fn read_jsonl<R: BufRead, F>(reader: R, mut sink: F) -> Result<(), SiftError>
where
    F: FnMut(Result<Record, DecodeError>) -> Result<(), SiftError>,
{
    for line in reader.lines() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let next = serde_json::from_str::<Value>(trimmed)
            .map_err(DecodeError::from)
            .and_then(|value| Record::from_event_json(&value));
        sink(next)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profiles;
    use std::io::Cursor;

    #[test]
    fn format_detection_by_extension() {
        assert_eq!(detect_format(Path::new("Security.evtx")), Some(InputFormat::Evtx));
        assert_eq!(detect_format(Path::new("Security.EVTX")), Some(InputFormat::Evtx));
        assert_eq!(
            detect_format(Path::new("Security.evtx.jsonl")),
            Some(InputFormat::Jsonl)
        );
        assert_eq!(detect_format(Path::new("notes.txt")), None);
        assert_eq!(detect_format(Path::new("README")), None);
    }

    #[test]
    fn jsonl_reader_skips_blank_lines_and_reports_bad_ones() {
        let input = Cursor::new(concat!(
            "{\"Event\":{\"System\":{\"EventID\":4624,\"Computer\":\"A\"}}}\n",
            "\n",
            "this is not json\n",
            "{\"Event\":{\"System\":{\"EventID\":4625,\"Computer\":\"B\"}}}\n",
        ));

        let mut ok = Vec::new();
        let mut failed = 0usize;
        read_jsonl(input, |item| {
            match item {
                Ok(record) => ok.push(record.event_id),
                Err(_) => failed += 1,
            }
            Ok(())
        })
        .unwrap();

        assert_eq!(ok, vec![4624, 4625]);
        assert_eq!(failed, 1);
    }

    #[test]
    fn directory_expansion_probes_binary_and_exported_names() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("Security.evtx"), b"").unwrap();
        std::fs::write(dir.path().join("Security.evtx.jsonl"), b"").unwrap();
        std::fs::write(dir.path().join("Other.evtx"), b"").unwrap();

        let found = expand_directory(dir.path(), &profiles::LOGINS);
        let names: Vec<_> = found
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["Security.evtx", "Security.evtx.jsonl"]);
    }

    #[test]
    fn missing_evtx_file_is_an_open_failure() {
        let err = read_evtx(Path::new("/nonexistent/Security.evtx"), |_| Ok(())).unwrap_err();
        assert!(matches!(err, SiftError::OpenFailed { .. }));
    }
}
