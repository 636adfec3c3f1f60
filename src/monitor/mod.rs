//! Run drivers for the CLI frontend.
//!
//! Two ways to run a session from the command line: a batch run that
//! ticks as fast as possible (deterministic, used for scripting and tests),
//! and a real-time run that hands the session to a [`Scheduler`] and
//! follows it through a snapshot subscription.
//!
//! Output goes to any [`Write`] so stdout stays machine readable while logs
//! go to stderr.

use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use crate::error::{LadderError, Result};
use crate::runtime::{ScanSnapshot, Scheduler, Session};
use crate::tags::TagValue;

/// How snapshots are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Final tag table and telemetry as an aligned table
    #[default]
    Text,
    /// One JSON snapshot per tick
    Json,
}

/// Parse a `NAME=VALUE` tag assignment.
pub fn parse_assignment(input: &str) -> Result<(String, TagValue)> {
    match input.split_once('=') {
        Some((name, value)) if !name.trim().is_empty() => {
            Ok((name.trim().to_string(), TagValue::parse_literal(value.trim())))
        }
        _ => Err(LadderError::InvalidTagAssignment {
            input: input.to_string(),
        }),
    }
}

/// Tick `session` `ticks` times back to back.
///
/// Run mode is switched on for the duration of the run. Returns the last
/// snapshot.
pub fn run_batch<W: Write>(
    session: &Session,
    ticks: u64,
    format: OutputFormat,
    out: &mut W,
) -> Result<ScanSnapshot> {
    session.set_run_mode(true);
    for _ in 0..ticks {
        if let Some(snapshot) = session.tick() {
            if format == OutputFormat::Json {
                write_json_line(&snapshot, out)?;
            }
        }
    }
    session.set_run_mode(false);
    finish(session.snapshot(), format, out)
}

/// Run `session` in real time for `ticks` scan periods.
pub fn run_realtime<W: Write>(
    session: Arc<Session>,
    ticks: u64,
    format: OutputFormat,
    out: &mut W,
) -> Result<ScanSnapshot> {
    let rx = session.subscribe(ticks.clamp(1, 1024) as usize);
    session.set_run_mode(true);
    let scheduler = Scheduler::start(Arc::clone(&session))?;

    let timeout = session.scan_period() * 10 + Duration::from_secs(1);
    let mut seen = 0;
    while seen < ticks {
        let Ok(snapshot) = rx.recv_timeout(timeout) else {
            break;
        };
        if format == OutputFormat::Json {
            write_json_line(&snapshot, out)?;
        }
        seen += 1;
        if snapshot.scan >= ticks {
            break;
        }
    }

    session.set_run_mode(false);
    let stats = scheduler.stop();
    tracing::info!(
        ticks = stats.ticks,
        skipped = stats.skipped,
        "real-time run finished"
    );
    finish(session.snapshot(), format, out)
}

fn finish<W: Write>(
    snapshot: ScanSnapshot,
    format: OutputFormat,
    out: &mut W,
) -> Result<ScanSnapshot> {
    if format == OutputFormat::Text {
        write_summary(&snapshot, out)?;
    }
    out.flush().map_err(output_error)?;
    Ok(snapshot)
}

/// Write one snapshot as a single JSON line.
pub fn write_json_line<W: Write>(snapshot: &ScanSnapshot, out: &mut W) -> Result<()> {
    serde_json::to_writer(&mut *out, snapshot)?;
    writeln!(out).map_err(output_error)
}

/// Write the tag table and telemetry of a snapshot as text.
pub fn write_summary<W: Write>(snapshot: &ScanSnapshot, out: &mut W) -> Result<()> {
    let width = snapshot
        .tags
        .iter()
        .map(|(name, _)| name.len())
        .max()
        .unwrap_or(0)
        .max(3);

    let mut text = format!("scan {}\n", snapshot.scan);
    for (name, value) in snapshot.tags.iter() {
        text.push_str(&format!(
            "  {:<width$}  {:<6}  {}\n",
            name,
            value.type_name(),
            value,
            width = width
        ));
    }
    let t = &snapshot.telemetry;
    text.push_str(&format!(
        "drive  {:.2} Hz  {:.0} rpm  {:.2} A\n",
        t.frequency, t.speed_rpm, t.current_amps
    ));
    out.write_all(text.as_bytes()).map_err(output_error)
}

fn output_error(e: std::io::Error) -> LadderError {
    LadderError::OutputError {
        message: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::RuntimeConfig;

    const TIMER: &str = r#"{"rows": [{ "id": "row-1", "elements": [
        { "id": "a", "type": "NO_CONTACT", "variable": "I0.1" },
        { "id": "t", "type": "TIMER", "variable": "T1", "params": { "preset": 300 } },
        { "id": "q", "type": "COIL", "variable": "Q0.1" }
    ]}]}"#;

    fn session() -> Session {
        let session = Session::new(RuntimeConfig::default()).unwrap();
        session.load_json(TIMER).unwrap();
        session
    }

    #[test]
    fn test_parse_assignment() {
        assert_eq!(
            parse_assignment("I0.1=true").unwrap(),
            ("I0.1".to_string(), TagValue::Bool(true))
        );
        assert_eq!(
            parse_assignment(" SPEED = 42 ").unwrap(),
            ("SPEED".to_string(), TagValue::Number(42.0))
        );
        assert!(matches!(
            parse_assignment("novalue"),
            Err(LadderError::InvalidTagAssignment { .. })
        ));
        assert!(parse_assignment("=1").is_err());
    }

    #[test]
    fn test_batch_text() {
        let session = session();
        session.set_tag("I0.1", true);
        let mut out = Vec::new();
        let last = run_batch(&session, 3, OutputFormat::Text, &mut out).unwrap();

        assert_eq!(last.scan, 3);
        assert!(last.tags.truthy("Q0.1"));
        assert!(!session.is_running());
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("scan 3\n"));
        assert!(text.contains("T1"));
        assert!(text.contains("REAL"));
        assert!(text.contains("BOOL"));
        assert!(text.contains("Hz"));
    }

    #[test]
    fn test_batch_json_lines() {
        let session = session();
        let mut out = Vec::new();
        run_batch(&session, 2, OutputFormat::Json, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        let value: serde_json::Value = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(value["scan"], 2);
        assert_eq!(value["tags"]["Q0.1"], false);
    }

    #[test]
    fn test_realtime() {
        let config = RuntimeConfig::new().with_scan_period(Duration::from_millis(2));
        let session = Arc::new(Session::new(config).unwrap());
        session.load_json(TIMER).unwrap();
        session.set_tag("I0.1", true);
        let mut out = Vec::new();
        let last = run_realtime(Arc::clone(&session), 3, OutputFormat::Json, &mut out).unwrap();

        assert!(last.scan >= 3);
        assert!(!session.is_running());
        // Timer advanced by the session's own 2 ms period
        assert_eq!(last.tags.number("T1"), (last.scan * 2) as f64);
        assert!(String::from_utf8(out).unwrap().lines().count() >= 3);
    }
}
