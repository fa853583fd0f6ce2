use serde::Serialize;
use std::io::{self, Write};
use store::StateDump;

/// Result of one subtest.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct StatetestResult {
    /// Test unit name.
    pub name: String,
    /// Whether the subtest passed.
    pub pass: bool,
    /// Fork name as written in the fixture.
    pub fork: String,
    /// Failure reason.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Post-state, only for failed subtests when dumping is enabled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<StateDump>,
}

/// Writes `results` as an indented JSON array followed by a newline.
pub fn write_report<W: Write>(mut out: W, results: &[StatetestResult]) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut out, results)?;
    writeln!(out)?;
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn optional_fields_are_omitted() {
        let results = [
            StatetestResult {
                name: "add".into(),
                pass: true,
                fork: "Istanbul".into(),
                error: None,
                state: None,
            },
            StatetestResult {
                name: "add".into(),
                pass: false,
                fork: "Quux".into(),
                error: Some(r#"unsupported fork "Quux""#.into()),
                state: None,
            },
        ];

        let mut out = Vec::new();
        write_report(&mut out, &results).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("[\n  {"));
        assert!(text.ends_with("]\n"));

        let json: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(
            json,
            serde_json::json!([
                { "name": "add", "pass": true, "fork": "Istanbul" },
                { "name": "add", "pass": false, "fork": "Quux", "error": "unsupported fork \"Quux\"" }
            ])
        );
    }

    #[test]
    fn empty_report_is_an_empty_array() {
        let mut out = Vec::new();
        write_report(&mut out, &[]).unwrap();
        assert_eq!(out, b"[]\n");
    }
}
