use crate::error::{DecodeError, SiftError};
use crate::filter::FilterSpec;
use crate::output::{render_row, sanitize_cell, RowWriter};
use crate::record::Record;
use crate::schema::{project, Schema};
use crate::source::{self, InputFormat};
use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

/// Per-run counters, reported at info verbosity.
#[derive(Debug, Default, Clone)]
pub struct SiftStats {
    /// Records pulled from the source, including ones that failed to decode.
    pub records_processed: usize,
    /// Rows written after projection and filtering.
    pub rows_emitted: usize,
    /// Rows projected but rejected by the filter.
    pub rows_filtered: usize,
    /// Records whose event ID is not in the view's catalog.
    pub records_skipped: usize,
    /// Malformed records reported and dropped.
    pub decode_errors: usize,
    /// Directory mode: input files that failed wholesale.
    pub files_failed: usize,
}

/// Wires Record Source -> Projector -> Filter -> Emitter. One record in,
/// at most one row out; nothing is buffered beyond the current record.
pub struct SiftPipeline<W: Write> {
    schema: &'static Schema,
    filter: FilterSpec,
    writer: RowWriter<W>,
    stats: SiftStats,
}

impl<W: Write> SiftPipeline<W> {
    pub fn new(schema: &'static Schema, filter: FilterSpec, out: W, suppress_header: bool) -> Self {
        SiftPipeline {
            schema,
            filter,
            writer: RowWriter::new(out, suppress_header),
            stats: SiftStats::default(),
        }
    }

    /// Processes a file or directory input and returns the run's stats.
    ///
    /// Directory mode applies the pipeline to each recognized log file
    /// that exists; one file's failure is reported and does not abort the
    /// others. Zero matching records is not an error.
    pub fn run(
        &mut self,
        input: &Path,
        format: Option<InputFormat>,
    ) -> Result<SiftStats, SiftError> {
        if !input.exists() {
            return Err(SiftError::InputNotFound {
                path: input.to_path_buf(),
            });
        }

        if input.is_dir() {
            let files = source::expand_directory(input, self.schema);
            if files.is_empty() {
                return Err(SiftError::EmptyDirectory {
                    path: input.to_path_buf(),
                    profile: self.schema.name.to_string(),
                });
            }
            // Header goes out before the first record so a fully filtered
            // run still produces the title line; the input has been
            // validated by now, so a fatal error can no longer leave a
            // stray header on the success stream.
            self.writer.ensure_header(self.schema)?;
            for file in files {
                if let Err(e) = self.process_file(&file, format) {
                    // Output failures poison the stream and stay fatal;
                    // anything else costs only this file's contribution.
                    if matches!(e, SiftError::Output(_)) {
                        return Err(e);
                    }
                    log::error!("{}: {}", file.display(), e);
                    self.stats.files_failed += 1;
                }
            }
        } else {
            if format.or_else(|| source::detect_format(input)).is_none() {
                return Err(SiftError::UnknownFormat {
                    path: input.to_path_buf(),
                });
            }
            self.writer.ensure_header(self.schema)?;
            self.process_file(input, format)?;
        }

        self.writer.flush()?;
        Ok(self.stats.clone())
    }

    /// Processes one input file of either container format.
    pub fn process_file(
        &mut self,
        path: &Path,
        format: Option<InputFormat>,
    ) -> Result<(), SiftError> {
        let format = format
            .or_else(|| source::detect_format(path))
            .ok_or_else(|| SiftError::UnknownFormat {
                path: path.to_path_buf(),
            })?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        log::info!("processing {} as {:?}", path.display(), format);

        match format {
            InputFormat::Evtx => {
                let (schema, filter, writer, stats) =
                    (self.schema, &self.filter, &mut self.writer, &mut self.stats);
                source::read_evtx(path, |item| {
                    handle(item, &name, schema, filter, writer, stats)
                })
            }
            InputFormat::Jsonl => {
                let reader = BufReader::new(File::open(path)?);
                self.process_jsonl(reader, &name)
            }
        }
    }

    /// JSONL entry point over any reader; used directly by tests.
    pub fn process_jsonl<R: BufRead>(&mut self, reader: R, name: &str) -> Result<(), SiftError> {
        let (schema, filter, writer, stats) =
            (self.schema, &self.filter, &mut self.writer, &mut self.stats);
        source::read_jsonl(reader, |item| {
            handle(item, name, schema, filter, writer, stats)
        })
    }

    pub fn stats(&self) -> &SiftStats {
        &self.stats
    }

    /// Flushes pending output; call after driving `process_jsonl` directly.
    pub fn finish(&mut self) -> Result<SiftStats, SiftError> {
        self.writer.ensure_header(self.schema)?;
        self.writer.flush()?;
        Ok(self.stats.clone())
    }
}

/// Drives one record through projection, filtering and emission. A record
/// either fully projects to a row or contributes nothing; there is no
/// partial-row output.
fn handle<W: Write>(
    item: Result<Record, DecodeError>,
    source_name: &str,
    schema: &'static Schema,
    filter: &FilterSpec,
    writer: &mut RowWriter<W>,
    stats: &mut SiftStats,
) -> Result<(), SiftError> {
    stats.records_processed += 1;

    let mut record = match item {
        Ok(record) => record,
        Err(e) => {
            stats.decode_errors += 1;
            log::warn!("{}: skipping record: {}", source_name, e);
            return Ok(());
        }
    };
    record.source = Some(source_name.to_string());

    let row = match project(&record, schema) {
        Some(row) => row,
        None => {
            stats.records_skipped += 1;
            log::debug!(
                "{}: event {} not in {} catalog",
                source_name,
                record.event_id,
                schema.name
            );
            return Ok(());
        }
    };

    let cells: Vec<String> = row.iter().map(|cell| sanitize_cell(cell)).collect();
    if filter.passes(&render_row(&cells)) {
        writer.write_row(schema, &cells)?;
        stats.rows_emitted += 1;
    } else {
        stats.rows_filtered += 1;
    }
    Ok(())
}
