//! Reading a run's event log back.

use std::fs;
use std::path::Path;

use crate::domain::Event;
use crate::error::Result;

/// Read every complete event from a JSONL event log, in file order.
///
/// A final line without a trailing newline that fails to parse is the tail of
/// an interrupted write and is skipped. Any other malformed line is an error.
pub fn read_events(path: impl AsRef<Path>) -> Result<Vec<Event>> {
    let path = path.as_ref();
    let bytes = fs::read(path)?;
    let tail_complete = bytes.last().is_none_or(|b| *b == b'\n');

    let mut lines: Vec<&[u8]> = bytes.split(|b| *b == b'\n').collect();
    if tail_complete {
        // split leaves an empty slice after the final newline
        lines.pop();
    }
    let last = lines.len().saturating_sub(1);

    let mut events = Vec::with_capacity(lines.len());
    for (idx, line) in lines.iter().enumerate() {
        if line.iter().all(u8::is_ascii_whitespace) {
            continue;
        }
        match serde_json::from_slice::<Event>(line) {
            Ok(event) => events.push(event),
            Err(e) if idx == last && !tail_complete => {
                log::warn!("Ignoring truncated final line in {}: {}", path.display(), e);
            }
            Err(e) => return Err(e.into()),
        }
    }
    Ok(events)
}

/// Whether `step` never decreases across `events`
pub fn is_step_ordered(events: &[Event]) -> bool {
    events.windows(2).all(|pair| pair[0].step <= pair[1].step)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::EventKind;
    use crate::error::ReplayError;
    use tempfile::TempDir;

    fn line(event: &Event) -> String {
        format!("{}\n", serde_json::to_string(event).unwrap())
    }

    #[test]
    fn test_read_complete_log() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("events.jsonl");
        let content = [
            line(&Event::run_start("r", 0, "scn")),
            line(&Event::tool_call("r", 1, "web_fetch", &serde_json::json!({"url": "u"}))),
            line(&Event::tool_result("r", 2, "web_fetch", &serde_json::json!("body"))),
        ]
        .concat();
        fs::write(&path, content).unwrap();

        let events = read_events(&path).unwrap();
        assert_eq!(events.len(), 3);
        assert_eq!(events[0].kind, EventKind::RunStart);
        assert_eq!(events[2].payload["result"], "body");
        assert!(is_step_ordered(&events));
    }

    #[test]
    fn test_truncated_tail_is_ignored() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("events.jsonl");
        let mut content = line(&Event::run_start("r", 0, "scn"));
        let partial = line(&Event::tool_call("r", 1, "web_fetch", &serde_json::json!({"url": "u"})));
        content.push_str(&partial[..partial.len() / 2]);
        fs::write(&path, content).unwrap();

        let events = read_events(&path).unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].kind, EventKind::RunStart);
    }

    #[test]
    fn test_corrupt_middle_line_is_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("events.jsonl");
        let content = [
            line(&Event::run_start("r", 0, "scn")),
            "{not json}\n".to_string(),
            line(&Event::run_end("r", 1, 0, 0)),
        ]
        .concat();
        fs::write(&path, content).unwrap();

        assert!(matches!(read_events(&path), Err(ReplayError::Json(_))));
    }

    #[test]
    fn test_invalid_utf8_in_middle_line_is_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("events.jsonl");
        let mut content = line(&Event::run_start("r", 0, "scn")).into_bytes();
        content.extend_from_slice(br#"{"run_id":"r","step":2,"type":"tool_result","payload":{"tool":"t","result":"ab"#);
        content.push(0xFF);
        content.extend_from_slice(b"cd\"},\"ts_ms\":1}\n");
        content.extend_from_slice(line(&Event::run_end("r", 2, 1, 0)).as_bytes());
        fs::write(&path, content).unwrap();

        assert!(matches!(read_events(&path), Err(ReplayError::Json(_))));
    }

    #[test]
    fn test_invalid_utf8_in_truncated_tail_is_ignored() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("events.jsonl");
        let mut content = line(&Event::run_start("r", 0, "scn")).into_bytes();
        content.extend_from_slice(b"{\"run_id\":\"r\",\"step\":1,\"pay");
        content.push(0xFF);
        fs::write(&path, content).unwrap();

        let events = read_events(&path).unwrap();
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn test_empty_log_has_no_events() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("events.jsonl");
        fs::write(&path, "").unwrap();
        assert!(read_events(&path).unwrap().is_empty());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let temp = TempDir::new().unwrap();
        let err = read_events(temp.path().join("absent.jsonl")).unwrap_err();
        assert!(matches!(err, ReplayError::Io(_)));
    }

    #[test]
    fn test_step_order_detection() {
        let ordered = vec![Event::run_start("r", 0, "s"), Event::run_end("r", 0, 0, 0)];
        assert!(is_step_ordered(&ordered));
        let unordered = vec![Event::run_end("r", 4, 0, 0), Event::run_start("r", 1, "s")];
        assert!(!is_step_ordered(&unordered));
        assert!(is_step_ordered(&[]));
    }
}
