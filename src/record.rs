use crate::error::DecodeError;
use indexmap::IndexMap;
use serde_json::Value;
use std::collections::HashMap;

/// Closed set of system-header attributes a schema may select.
///
/// Presence varies by log source; an absent attribute projects as an
/// empty cell, never as an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HeaderField {
    Computer,
    Channel,
    RecordId,
    ProcessId,
    ThreadId,
    Keywords,
}

/// One decoded log entry: fixed system header plus the dynamic bag of
/// event-specific named values.
#[derive(Debug, Clone)]
pub struct Record {
    /// Wall-clock time, fractional seconds truncated to whole seconds.
    pub timestamp: String,
    pub event_id: u32,
    pub header: HashMap<HeaderField, String>,
    /// Event-specific values in payload insertion order, whitespace runs
    /// collapsed. Keys are source-defined, not a fixed set.
    pub fields: IndexMap<String, String>,
    /// Originating file, carried for provenance in directory mode.
    pub source: Option<String>,
}

impl Record {
    /// Builds a record from the logical event JSON — either a full export
    /// line (`{"Event": {...}}`) or the already-unwrapped `Event` object.
    ///
    /// This is the same shape for both input formats: the `evtx` crate's
    /// JSON rendering of a binary record and a JSONL export line.
    pub fn from_event_json(value: &Value) -> Result<Record, DecodeError> {
        let event = value.get("Event").unwrap_or(value);
        let system = event
            .get("System")
            .and_then(Value::as_object)
            .ok_or(DecodeError::MissingSystem)?;

        let event_id = parse_event_id(system.get("EventID")).ok_or(DecodeError::MissingEventId)?;

        let timestamp = system
            .get("TimeCreated")
            .and_then(|tc| tc.get("#attributes"))
            .and_then(|a| a.get("SystemTime"))
            .and_then(Value::as_str)
            .map(truncate_subseconds)
            .unwrap_or_default();

        let mut header = HashMap::new();
        if let Some(v) = scalar_text(system.get("Computer")) {
            header.insert(HeaderField::Computer, v);
        }
        if let Some(v) = scalar_text(system.get("Channel")) {
            header.insert(HeaderField::Channel, v);
        }
        if let Some(v) = scalar_text(system.get("EventRecordID")) {
            header.insert(HeaderField::RecordId, v);
        }
        if let Some(v) = scalar_text(system.get("Keywords")) {
            header.insert(HeaderField::Keywords, v);
        }
        if let Some(exec) = system.get("Execution").and_then(|e| e.get("#attributes")) {
            if let Some(v) = scalar_text(exec.get("ProcessID")) {
                header.insert(HeaderField::ProcessId, v);
            }
            if let Some(v) = scalar_text(exec.get("ThreadID")) {
                header.insert(HeaderField::ThreadId, v);
            }
        }

        let mut fields = IndexMap::new();
        if let Some(data) = event.get("EventData").and_then(Value::as_object) {
            collect_payload(data, &mut fields);
        }
        // UserData wraps its payload in one provider-defined element
        // (e.g. <EventXML>); the children of that element are the fields.
        if let Some(user_data) = event.get("UserData").and_then(Value::as_object) {
            for inner in user_data.values() {
                if let Some(obj) = inner.as_object() {
                    collect_payload(obj, &mut fields);
                }
            }
        }

        Ok(Record {
            timestamp,
            event_id,
            header,
            fields,
            source: None,
        })
    }

    pub fn header(&self, field: HeaderField) -> &str {
        self.header.get(&field).map(String::as_str).unwrap_or("")
    }

    /// Case-insensitive probe of the field bag. The first insertion-order
    /// match wins, and the lookup never sees any record but this one.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

fn collect_payload(data: &serde_json::Map<String, Value>, fields: &mut IndexMap<String, String>) {
    for (name, value) in data {
        if name == "#attributes" {
            // The element's own Name attribute identifies the payload
            // variant on some channels (TaskScheduler); surface it.
            if let Some(n) = value.get("Name").and_then(Value::as_str) {
                fields.insert("EventDataName".to_string(), n.to_string());
            }
            continue;
        }
        if name == "#text" {
            continue;
        }
        fields.insert(name.clone(), normalize_ws(&flatten_value(value)));
    }
}

/// Renders one payload value as text. Nested elements keep their `#text`
/// content; lists join with spaces.
fn flatten_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        Value::Array(items) => items
            .iter()
            .map(flatten_value)
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(" "),
        Value::Object(obj) => {
            if let Some(text) = obj.get("#text") {
                flatten_value(text)
            } else {
                obj.iter()
                    .filter(|(k, _)| *k != "#attributes")
                    .map(|(_, v)| flatten_value(v))
                    .filter(|s| !s.is_empty())
                    .collect::<Vec<_>>()
                    .join(" ")
            }
        }
    }
}

fn scalar_text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        // EventID-style wrapper objects carry their value in #text.
        Value::Object(obj) => obj.get("#text").and_then(|v| scalar_text(Some(v))),
        _ => None,
    }
}

fn parse_event_id(value: Option<&Value>) -> Option<u32> {
    match value? {
        Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
        Value::String(s) => s.parse().ok(),
        Value::Object(obj) => parse_event_id(obj.get("#text")),
        _ => None,
    }
}

/// Drops fractional seconds (and a bare trailing `Z` where the source had
/// no fraction), keeping the source's date/time shape otherwise.
pub fn truncate_subseconds(ts: &str) -> String {
    match ts.split_once('.') {
        Some((whole, _)) => whole.to_string(),
        None => ts.trim_end_matches('Z').to_string(),
    }
}

fn normalize_ws(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn builds_record_from_security_event() {
        let line = json!({
            "Event": {
                "System": {
                    "Provider": {"#attributes": {"Name": "Microsoft-Windows-Security-Auditing"}},
                    "EventID": 4624,
                    "TimeCreated": {"#attributes": {"SystemTime": "2019-03-29T22:57:02.266640Z"}},
                    "EventRecordID": 1201,
                    "Execution": {"#attributes": {"ProcessID": 4, "ThreadID": 60}},
                    "Channel": "Security",
                    "Computer": "WORKSTATION-7",
                    "Keywords": "0x8020000000000000"
                },
                "EventData": {
                    "TargetUserName": "alice",
                    "IpAddress": "10.0.0.5",
                    "LogonType": 3
                }
            }
        });

        let record = Record::from_event_json(&line).unwrap();
        assert_eq!(record.event_id, 4624);
        assert_eq!(record.timestamp, "2019-03-29T22:57:02");
        assert_eq!(record.header(HeaderField::Computer), "WORKSTATION-7");
        assert_eq!(record.header(HeaderField::Channel), "Security");
        assert_eq!(record.header(HeaderField::RecordId), "1201");
        assert_eq!(record.header(HeaderField::ProcessId), "4");
        assert_eq!(record.field("IpAddress"), Some("10.0.0.5"));
        assert_eq!(record.field("LogonType"), Some("3"));
    }

    #[test]
    fn wrapped_event_id_and_user_data_payload() {
        let line = json!({
            "Event": {
                "System": {
                    "EventID": {"#attributes": {"Qualifiers": 16384}, "#text": 21},
                    "Channel": "Microsoft-Windows-TerminalServices-LocalSessionManager/Operational",
                    "Computer": "SRV01"
                },
                "UserData": {
                    "EventXML": {
                        "#attributes": {"xmlns": "Event_NS"},
                        "User": "CORP\\bob",
                        "Address": "192.168.1.50",
                        "SessionID": 2
                    }
                }
            }
        });

        let record = Record::from_event_json(&line).unwrap();
        assert_eq!(record.event_id, 21);
        assert_eq!(record.field("User"), Some("CORP\\bob"));
        assert_eq!(record.field("Address"), Some("192.168.1.50"));
        assert_eq!(record.field("SessionID"), Some("2"));
    }

    #[test]
    fn field_lookup_is_case_insensitive() {
        let line = json!({
            "Event": {
                "System": {"EventID": 1149},
                "UserData": {"EventXML": {"Param1": "admin", "Param3": "10.1.1.9"}}
            }
        });

        let record = Record::from_event_json(&line).unwrap();
        assert_eq!(record.field("param1"), Some("admin"));
        assert_eq!(record.field("PARAM3"), Some("10.1.1.9"));
        assert_eq!(record.field("param2"), None);
    }

    #[test]
    fn event_data_name_attribute_is_surfaced() {
        let line = json!({
            "Event": {
                "System": {"EventID": 200},
                "EventData": {
                    "#attributes": {"Name": "ActionStart"},
                    "TaskName": "\\Updater",
                    "ActionName": "C:\\tools\\run.exe"
                }
            }
        });

        let record = Record::from_event_json(&line).unwrap();
        assert_eq!(record.field("EventDataName"), Some("ActionStart"));
        assert_eq!(record.field("TaskName"), Some("\\Updater"));
    }

    #[test]
    fn whitespace_runs_collapse() {
        let line = json!({
            "Event": {
                "System": {"EventID": 3},
                "EventData": {"jobTitle": "  weekly\n   sync  job "}
            }
        });

        let record = Record::from_event_json(&line).unwrap();
        assert_eq!(record.field("jobTitle"), Some("weekly sync job"));
    }

    #[test]
    fn missing_system_block_is_a_decode_error() {
        let line = json!({"Event": {"EventData": {"a": 1}}});
        assert!(matches!(
            Record::from_event_json(&line),
            Err(DecodeError::MissingSystem)
        ));
    }

    #[test]
    fn truncation_handles_missing_fraction() {
        assert_eq!(truncate_subseconds("2019-03-29T22:57:02Z"), "2019-03-29T22:57:02");
        assert_eq!(
            truncate_subseconds("2016-07-08 18:12:51.681640"),
            "2016-07-08 18:12:51"
        );
    }
}
