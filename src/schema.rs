use crate::record::{HeaderField, Record};

/// One cell of a channel-dispatched column group.
#[derive(Debug, Clone, Copy)]
pub enum CellSpec {
    /// Candidate field names, probed in priority order.
    Field(&'static [&'static str]),
    /// Fixed text contributed by the matching arm (e.g. a direction tag).
    Literal(&'static str),
}

/// One extraction strategy of a channel-dispatched group, selected when
/// the record's Channel header equals `channel`.
#[derive(Debug, Clone, Copy)]
pub struct ChannelArm {
    pub channel: &'static str,
    /// Exactly `width` cells of the owning `ColumnSpec::Channel`.
    pub cells: &'static [CellSpec],
}

/// Declares how one output column (or column group) is resolved.
#[derive(Debug, Clone, Copy)]
pub enum ColumnSpec {
    /// The record timestamp, already truncated to whole seconds.
    Timestamp,
    EventId,
    /// The catalog description for the record's event ID.
    Description,
    /// A system-header attribute; absent attribute yields "".
    Header(HeaderField),
    /// Candidate field names probed in priority order against the field
    /// bag; first hit wins, none yields "".
    Field(&'static [&'static str]),
    /// A closed set of per-channel strategies covering `width` columns.
    /// An unrecognized channel yields `width` empty cells.
    Channel {
        arms: &'static [ChannelArm],
        width: usize,
    },
}

/// Static per-log-source configuration: the declared output columns and
/// the field-name resolution rules for one view.
#[derive(Debug, Clone, Copy)]
pub struct Schema {
    pub name: &'static str,
    /// Column titles, written once per run unless suppressed.
    pub header: &'static [&'static str],
    /// eventId -> description. Empty means the view intentionally emits
    /// every record.
    pub catalog: &'static [(u32, &'static str)],
    pub columns: &'static [ColumnSpec],
    /// Recognized log filenames for directory mode.
    pub log_files: &'static [&'static str],
}

impl Schema {
    pub fn accepts(&self, event_id: u32) -> bool {
        self.catalog.is_empty() || self.description(event_id).is_some()
    }

    pub fn description(&self, event_id: u32) -> Option<&'static str> {
        self.catalog
            .iter()
            .find(|(id, _)| *id == event_id)
            .map(|(_, desc)| *desc)
    }
}

/// Projects one record onto a schema. Returns `None` when the record's
/// event ID is not in a non-empty catalog (the record is not relevant to
/// this view — never a row of empty strings).
///
/// Pure function of `(record, schema)`: every lookup is scoped to this
/// record and nothing carries over from previously projected records.
pub fn project(record: &Record, schema: &Schema) -> Option<Vec<String>> {
    if !schema.accepts(record.event_id) {
        return None;
    }

    let mut row = Vec::with_capacity(schema.header.len());
    for column in schema.columns {
        match column {
            ColumnSpec::Timestamp => row.push(record.timestamp.clone()),
            ColumnSpec::EventId => row.push(record.event_id.to_string()),
            ColumnSpec::Description => {
                row.push(schema.description(record.event_id).unwrap_or("").to_string())
            }
            ColumnSpec::Header(field) => row.push(record.header(*field).to_string()),
            ColumnSpec::Field(candidates) => row.push(probe(record, candidates)),
            ColumnSpec::Channel { arms, width } => {
                let channel = record.header(HeaderField::Channel);
                match arms.iter().find(|arm| arm.channel == channel) {
                    Some(arm) => {
                        for cell in arm.cells {
                            match cell {
                                CellSpec::Field(candidates) => row.push(probe(record, candidates)),
                                CellSpec::Literal(text) => row.push((*text).to_string()),
                            }
                        }
                    }
                    None => row.extend(std::iter::repeat(String::new()).take(*width)),
                }
            }
        }
    }
    Some(row)
}

fn probe(record: &Record, candidates: &[&str]) -> String {
    candidates
        .iter()
        .find_map(|name| record.field(name))
        .unwrap_or("")
        .to_string()
}
