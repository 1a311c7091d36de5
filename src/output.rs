use crate::error::SiftError;
use crate::schema::Schema;
use std::io::Write;

/// Rewrites one cell so the emitted row stays a single well-formed
/// comma-separated line: literal commas become semicolons, and each line
/// break becomes one space — a CRLF pair counts as one break, so the pair
/// pass must run before the single-character pass.
pub fn sanitize_cell(value: &str) -> String {
    value
        .replace(',', ";")
        .replace("\r\n", " ")
        .replace(['\r', '\n'], " ")
}

/// The textual rendering the filter engine evaluates — identical to the
/// emitted line.
pub fn render_row(cells: &[String]) -> String {
    cells.join(",")
}

/// Streaming CSV emitter. Writes the schema's column title line once per
/// run unless suppressed, then one line per passing row in arrival order.
///
/// Quoting is disabled: the sanitize rule above already guarantees no
/// delimiter or line break survives inside a cell.
pub struct RowWriter<W: Write> {
    writer: csv::Writer<W>,
    suppress_header: bool,
    header_written: bool,
}

impl<W: Write> RowWriter<W> {
    pub fn new(out: W, suppress_header: bool) -> Self {
        RowWriter {
            writer: csv::WriterBuilder::new()
                .quote_style(csv::QuoteStyle::Never)
                .flexible(true)
                .from_writer(out),
            suppress_header,
            header_written: false,
        }
    }

    /// Writes the title row if it is still pending. Called eagerly at the
    /// start of a run so a fully filtered input still produces a header.
    pub fn ensure_header(&mut self, schema: &Schema) -> Result<(), SiftError> {
        if !self.header_written && !self.suppress_header {
            self.writer.write_record(schema.header)?;
        }
        self.header_written = true;
        Ok(())
    }

    /// Writes one already-sanitized row.
    pub fn write_row(&mut self, schema: &Schema, cells: &[String]) -> Result<(), SiftError> {
        self.ensure_header(schema)?;
        self.writer.write_record(cells)?;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<(), SiftError> {
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::ColumnSpec;

    static SCHEMA: Schema = Schema {
        name: "test",
        header: &["Date", "EventID"],
        catalog: &[],
        columns: &[ColumnSpec::Timestamp, ColumnSpec::EventId],
        log_files: &[],
    };

    #[test]
    fn commas_become_semicolons_and_newlines_spaces() {
        assert_eq!(sanitize_cell("a,b,c"), "a;b;c");
        assert_eq!(sanitize_cell("line1\nline2"), "line1 line2");
        // One space per line break: a CRLF pair is a single break, a
        // stray CR or LF on its own is too.
        assert_eq!(sanitize_cell("line1\r\nline2"), "line1 line2");
        assert_eq!(sanitize_cell("a\rb\nc"), "a b c");
        assert_eq!(sanitize_cell("a\r\n\r\nb"), "a  b");
        assert_eq!(sanitize_cell("clean"), "clean");
    }

    #[test]
    fn sanitized_cells_never_break_the_row() {
        let cells = vec![
            sanitize_cell("2019-03-29T22:57:02"),
            sanitize_cell("cmd.exe /c \"a,b\"\ndone"),
        ];
        let line = render_row(&cells);
        assert!(!cells.iter().any(|c| c.contains(',') || c.contains('\n')));
        assert_eq!(line.matches(',').count(), 1);
    }

    #[test]
    fn header_is_written_once() {
        let mut out = Vec::new();
        {
            let mut writer = RowWriter::new(&mut out, false);
            writer
                .write_row(&SCHEMA, &["d1".to_string(), "1".to_string()])
                .unwrap();
            writer
                .write_row(&SCHEMA, &["d2".to_string(), "2".to_string()])
                .unwrap();
            writer.flush().unwrap();
        }
        assert_eq!(String::from_utf8(out).unwrap(), "Date,EventID\nd1,1\nd2,2\n");
    }

    #[test]
    fn suppressed_header_emits_rows_only() {
        let mut out = Vec::new();
        {
            let mut writer = RowWriter::new(&mut out, true);
            writer.ensure_header(&SCHEMA).unwrap();
            writer
                .write_row(&SCHEMA, &["d1".to_string(), "1".to_string()])
                .unwrap();
            writer.flush().unwrap();
        }
        assert_eq!(String::from_utf8(out).unwrap(), "d1,1\n");
    }

    #[test]
    fn filtered_out_run_still_yields_header_line() {
        let mut out = Vec::new();
        {
            let mut writer = RowWriter::new(&mut out, false);
            writer.ensure_header(&SCHEMA).unwrap();
            writer.flush().unwrap();
        }
        assert_eq!(String::from_utf8(out).unwrap(), "Date,EventID\n");
    }
}
