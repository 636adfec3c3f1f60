//! JSON interchange format for ladder programs.
//!
//! This is the document an editor or a program generator hands to the
//! runtime. It carries the rungs of a ladder program together with the HMI
//! widgets bound to its tags, and is installed as a whole.
//!
//! # Shape
//!
//! ```text
//! {
//!   "rows": [
//!     { "id": "row-1",
//!       "elements": [
//!         { "id": "a", "type": "NO_CONTACT", "variable": "I0.1", "parallel": ["b"] },
//!         { "id": "b", "type": "NO_CONTACT", "variable": "Q0.1" },
//!         { "id": "t", "type": "TON", "variable": "T1", "params": { "preset": 3000 } },
//!         { "id": "q", "type": "COIL", "variable": "Q0.1" }
//!       ] }
//!   ],
//!   "widgets": [
//!     { "id": "w1", "type": "LED", "x": 50, "y": 50, "variable": "Q0.1", "label": "motor" }
//!   ]
//! }
//! ```
//!
//! # Element Types
//!
//! | Type | Parameters |
//! |------|------------|
//! | `NO_CONTACT` | - |
//! | `NC_CONTACT` | - |
//! | `COIL` | - |
//! | `TON` / `TIMER` | `preset` (default 5000) |
//! | `TOF` | `preset` (default 5000) |
//! | `CTU` / `COUNTER` | `preset` (default 10) |
//! | `CTD` | `preset` (default 0) |
//! | `MOVE` | `source` literal (default 0) |

mod doc;

pub use doc::*;

use crate::error::Result;

/// Parse a program document from a JSON string.
pub fn parse(input: &str) -> Result<ProgramDoc> {
    Ok(serde_json::from_str(input)?)
}

/// Parse a program document file.
#[cfg(feature = "cli")]
pub fn parse_file(path: &std::path::Path) -> Result<ProgramDoc> {
    let content =
        std::fs::read_to_string(path).map_err(|e| crate::error::LadderError::FileReadError {
            path: path.display().to_string(),
            source: e,
        })?;
    parse(&content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LadderError;

    #[test]
    fn test_parse_minimal() {
        let doc = parse(r#"{"rows": []}"#).unwrap();
        assert!(doc.rows.is_empty());
        assert!(doc.widgets.is_empty());
    }

    #[test]
    fn test_parse_generated_program() {
        let input = r#"{
            "rows": [
                { "id": "row-1", "elements": [
                    { "id": "a", "type": "NO_CONTACT", "variable": "I0.1", "parallel": ["b"] },
                    { "id": "b", "type": "NO_CONTACT", "variable": "Q0.1" },
                    { "id": "t", "type": "TIMER", "variable": "T1", "params": { "preset": 3000 } },
                    { "id": "q", "type": "COIL", "variable": "Q0.1" }
                ]}
            ],
            "widgets": [
                { "id": "w1", "type": "LED", "x": 50, "y": 50, "variable": "Q0.1", "label": "motor" }
            ]
        }"#;
        let doc = parse(input).unwrap();
        assert_eq!(doc.rows.len(), 1);
        assert_eq!(doc.rows[0].elements.len(), 4);
        assert_eq!(doc.rows[0].elements[0].parallel, vec!["b"]);
        assert_eq!(doc.rows[0].elements[2].kind, "TIMER");
        assert_eq!(doc.widgets[0].kind, WidgetKind::Led);
    }

    #[test]
    fn test_parse_malformed() {
        let err = parse(r#"{"rows": [ { "elements": [] } ]}"#).unwrap_err();
        assert!(matches!(err, LadderError::Json { .. }));
    }
}
