//! Deterministic stand-ins for the research tools.

use serde_json::Value;

use super::{Tool, string_arg};
use crate::error::Result;

const DRAFT_REPORT: &str = "Draft Report:
- Point 1: Key insight from research [1]
- Point 2: Another important fact [2]
- Point 3: Conclusion based on data

References:
[1] http://example.com/source1
[2] http://example.com/source2";

/// Fetches a page. Args: `{"url": string}`
pub struct WebFetchTool;

impl Tool for WebFetchTool {
    fn invoke(&self, args: &Value) -> Result<Value> {
        let url = string_arg(args, "url")?;
        Ok(Value::String(format!(
            "Content from {}\nSome fake content about the topic.",
            url
        )))
    }
}

/// Summarizes text. Args: `{"text": string}`
pub struct SummarizeTool;

impl Tool for SummarizeTool {
    fn invoke(&self, args: &Value) -> Result<Value> {
        string_arg(args, "text")?;
        Ok(Value::String(
            "Summary: This is a fake summary of the content.".to_string(),
        ))
    }
}

/// Writes a report draft. Args: `{"summary": string}`
pub struct WriteDraftTool;

impl Tool for WriteDraftTool {
    fn invoke(&self, args: &Value) -> Result<Value> {
        string_arg(args, "summary")?;
        Ok(Value::String(DRAFT_REPORT.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_web_fetch_mentions_url() {
        let result = WebFetchTool.invoke(&json!({"url": "http://example.com/topic"})).unwrap();
        assert!(result.as_str().unwrap().starts_with("Content from http://example.com/topic\n"));
    }

    #[test]
    fn test_summarize_is_deterministic() {
        let a = SummarizeTool.invoke(&json!({"text": "one"})).unwrap();
        let b = SummarizeTool.invoke(&json!({"text": "one"})).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_write_draft_has_references() {
        let result = WriteDraftTool.invoke(&json!({"summary": "s"})).unwrap();
        let draft = result.as_str().unwrap();
        assert!(draft.starts_with("Draft Report:"));
        assert!(draft.contains("[2] http://example.com/source2"));
    }

    #[test]
    fn test_missing_argument_is_tool_error() {
        assert!(WebFetchTool.invoke(&json!({})).is_err());
        assert!(SummarizeTool.invoke(&json!({"text": 3})).is_err());
        assert!(WriteDraftTool.invoke(&json!(null)).is_err());
    }
}
