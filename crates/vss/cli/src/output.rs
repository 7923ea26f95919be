//! Output formatting

use crate::error::CliResult;
use std::fmt::Write as _;
use vss::Signal;

/// Human-readable summary of a signal.
pub fn render_signal(signal: &Signal) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", signal);
    let mut field = |name: &str, value: String| {
        let _ = writeln!(out, "  {:<12} {}", format!("{}:", name), value);
    };

    field("type", signal.signal_type().to_string());
    field("datatype", signal.datatype().to_string());
    field(
        "unit",
        format!("{} ({})", signal.unit(), signal.canonical_unit()),
    );
    if let (Some(min), Some(max)) = (signal.min(), signal.max()) {
        field("min", min.to_string());
        field("max", max.to_string());
    }
    if let Some(default) = signal.default_value() {
        field("default", default.to_string());
    }
    if let Some(values) = signal.enum_values() {
        let values: Vec<&str> = values.iter().map(String::as_str).collect();
        field("enum", values.join(", "));
    }
    field("uuid", signal.uuid().to_string());
    field("description", signal.description().to_string());
    if let Some(comment) = signal.comment() {
        field("comment", comment.to_string());
    }
    out
}

/// Pretty JSON form of a signal.
pub fn render_json(signal: &Signal) -> CliResult<String> {
    Ok(serde_json::to_string_pretty(signal)?)
}
