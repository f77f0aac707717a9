//! How `sccdag` reports render: framed sections on a terminal, one
//! tab-separated row per record when piped, or a single JSON document.
//!
//! The mode comes from `--format` (or the hidden `--json`), then the
//! `FORMAT` environment variable, then whether stdout is a terminal.
//! Errors go to stderr in the same mode.

use clap::ValueEnum;
use sccdag_core::{ErrorCode, GraphError};
use sccdag_load::LoadError;
use serde::Serialize;
use std::io::{self, IsTerminal, Write};

const SECTION_RULE_WIDTH: usize = 72;

/// Write a report section heading underlined with dashes.
pub fn pretty_section(w: &mut dyn Write, heading: &str) -> io::Result<()> {
    writeln!(w, "{heading}")?;
    writeln!(w, "{}", "-".repeat(SECTION_RULE_WIDTH))
}

/// Write a `key:` label padded to a fixed column, then its value.
pub fn pretty_kv(w: &mut dyn Write, key: &str, value: impl AsRef<str>) -> io::Result<()> {
    writeln!(w, "{:<16} {}", format!("{key}:"), value.as_ref())
}

/// Rendering target for a command report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputMode {
    /// Headed sections with components, edges and paths laid out for reading.
    Pretty,
    /// `kind\tfield\t...` rows, one record per line.
    Text,
    /// The serialized report struct.
    Json,
}

impl OutputMode {
    /// Parse a `FORMAT` value, ignoring case. Unknown values yield `None`.
    fn from_env_value(value: &str) -> Option<Self> {
        <Self as ValueEnum>::from_str(value, true).ok()
    }
}

fn pick_output_mode(
    format_flag: Option<OutputMode>,
    json_flag: bool,
    format_env: Option<&str>,
    stdout_is_terminal: bool,
) -> OutputMode {
    format_flag
        .or_else(|| json_flag.then_some(OutputMode::Json))
        .or_else(|| format_env.and_then(OutputMode::from_env_value))
        .unwrap_or(if stdout_is_terminal {
            OutputMode::Pretty
        } else {
            OutputMode::Text
        })
}

/// Decide the output mode for this invocation.
pub fn resolve_output_mode(format_flag: Option<OutputMode>, json_flag: bool) -> OutputMode {
    let format_env = std::env::var("FORMAT").ok();
    pick_output_mode(
        format_flag,
        json_flag,
        format_env.as_deref(),
        io::stdout().is_terminal(),
    )
}

/// Write `value` to `out` as JSON, or through the command's own text or
/// pretty renderer.
pub fn render_mode_to<T: Serialize>(
    out: &mut dyn Write,
    mode: OutputMode,
    value: &T,
    text_fn: impl FnOnce(&T, &mut dyn Write) -> io::Result<()>,
    pretty_fn: impl FnOnce(&T, &mut dyn Write) -> io::Result<()>,
) -> anyhow::Result<()> {
    match mode {
        OutputMode::Json => {
            serde_json::to_writer_pretty(&mut *out, value)?;
            writeln!(out)?;
        }
        OutputMode::Text => text_fn(value, out)?,
        OutputMode::Pretty => pretty_fn(value, out)?,
    }
    Ok(())
}

/// [`render_mode_to`] on a locked stdout.
pub fn render_mode<T: Serialize>(
    mode: OutputMode,
    value: &T,
    text_fn: impl FnOnce(&T, &mut dyn Write) -> io::Result<()>,
    pretty_fn: impl FnOnce(&T, &mut dyn Write) -> io::Result<()>,
) -> anyhow::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    render_mode_to(&mut out, mode, value, text_fn, pretty_fn)
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// A failed command as shown to the user: the message, plus the `E####`
/// code and hint when the failure came from loading or ordering a graph.
#[derive(Debug, Serialize)]
pub struct CliError {
    pub message: String,
    /// Hint taken from [`ErrorCode::hint`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
    /// Code such as `"E3001"` for a bad edge endpoint.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
}

impl CliError {
    /// Create a simple error with just a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            suggestion: None,
            error_code: None,
        }
    }

    /// Create an error whose code and suggestion come from an [`ErrorCode`].
    pub fn from_code(message: impl Into<String>, code: ErrorCode) -> Self {
        Self {
            message: message.into(),
            suggestion: code.hint().map(str::to_string),
            error_code: Some(code.code().to_string()),
        }
    }

    /// Classify a command failure.
    ///
    /// Typed library errors keep their code and hint even when wrapped in
    /// context; anything else is reported with its full context chain.
    pub fn from_anyhow(err: &anyhow::Error) -> Self {
        if let Some(load) = err.downcast_ref::<LoadError>() {
            return Self::from(load);
        }
        if let Some(graph) = err.downcast_ref::<GraphError>() {
            return Self::from(graph);
        }
        Self::new(format!("{err:#}"))
    }
}

impl From<&LoadError> for CliError {
    fn from(err: &LoadError) -> Self {
        Self::from_code(err.to_string(), err.error_code())
    }
}

impl From<&GraphError> for CliError {
    fn from(err: &GraphError) -> Self {
        Self::from_code(err.to_string(), err.error_code())
    }
}

/// Render an error into `out` in the requested format.
pub fn render_error_to(out: &mut dyn Write, mode: OutputMode, error: &CliError) -> anyhow::Result<()> {
    match mode {
        OutputMode::Json => {
            let wrapper = serde_json::json!({
                "error": error,
            });
            serde_json::to_writer_pretty(&mut *out, &wrapper)?;
            writeln!(out)?;
        }
        OutputMode::Pretty | OutputMode::Text => {
            writeln!(out, "error: {}", error.message)?;
            if let Some(ref suggestion) = error.suggestion {
                writeln!(out, "  suggestion: {suggestion}")?;
            }
        }
    }
    Ok(())
}

/// Render an error to stderr in the requested format.
pub fn render_error(mode: OutputMode, error: &CliError) -> anyhow::Result<()> {
    let stderr = io::stderr();
    let mut out = stderr.lock();
    render_error_to(&mut out, mode, error)
}

#[cfg(test)]
mod tests {
    use super::*;

    // ---- pick_output_mode -------------------------------------------------

    #[test]
    fn resolve_format_flag_wins_over_json_and_env() {
        let mode = pick_output_mode(Some(OutputMode::Text), true, Some("pretty"), true);
        assert_eq!(mode, OutputMode::Text);
    }

    #[test]
    fn resolve_json_flag_wins_over_env() {
        let mode = pick_output_mode(None, true, Some("pretty"), true);
        assert_eq!(mode, OutputMode::Json);
    }

    #[test]
    fn resolve_format_env_json() {
        let mode = pick_output_mode(None, false, Some("json"), false);
        assert_eq!(mode, OutputMode::Json);
    }

    #[test]
    fn resolve_format_env_pretty_in_pipe() {
        let mode = pick_output_mode(None, false, Some("pretty"), false);
        assert_eq!(mode, OutputMode::Pretty);
    }

    #[test]
    fn resolve_format_env_case_insensitive() {
        let mode = pick_output_mode(None, false, Some("TEXT"), true);
        assert_eq!(mode, OutputMode::Text);
    }

    #[test]
    fn resolve_format_env_unknown_falls_through_to_tty() {
        let mode_tty = pick_output_mode(None, false, Some("fancy"), true);
        assert_eq!(mode_tty, OutputMode::Pretty);
        let mode_pipe = pick_output_mode(None, false, Some("fancy"), false);
        assert_eq!(mode_pipe, OutputMode::Text);
    }

    #[test]
    fn resolve_default_depends_on_tty() {
        assert_eq!(pick_output_mode(None, false, None, true), OutputMode::Pretty);
        assert_eq!(pick_output_mode(None, false, None, false), OutputMode::Text);
    }

    // ---- rendering ---------------------------------------------------------

    #[derive(Serialize)]
    struct Sample {
        name: &'static str,
        count: u32,
    }

    fn render_sample(mode: OutputMode) -> String {
        let mut buf = Vec::new();
        render_mode_to(
            &mut buf,
            mode,
            &Sample { name: "c0", count: 3 },
            |v, w| writeln!(w, "{}\t{}", v.name, v.count),
            |v, w| pretty_kv(w, v.name, v.count.to_string()),
        )
        .expect("render");
        String::from_utf8(buf).expect("utf8")
    }

    #[test]
    fn render_mode_dispatches_per_mode() {
        assert_eq!(render_sample(OutputMode::Text), "c0\t3\n");
        assert!(render_sample(OutputMode::Pretty).starts_with("c0:"));

        let json: serde_json::Value =
            serde_json::from_str(&render_sample(OutputMode::Json)).expect("json");
        assert_eq!(json["count"], 3);
    }

    #[test]
    fn pretty_section_draws_rule() {
        let mut buf = Vec::new();
        pretty_section(&mut buf, "Components").expect("write");
        let s = String::from_utf8(buf).expect("utf8");
        assert!(s.starts_with("Components\n"));
        assert_eq!(s.lines().nth(1).map(str::len), Some(SECTION_RULE_WIDTH));
    }

    // ---- errors -------------------------------------------------------------

    #[test]
    fn graph_error_carries_code_and_hint() {
        let err = GraphError::NotADag {
            ordered: 0,
            total: 2,
        };
        let cli = CliError::from(&err);
        assert_eq!(cli.error_code.as_deref(), Some("E2001"));
        assert!(cli.suggestion.is_some());
    }

    #[test]
    fn wrapped_load_error_is_still_classified() {
        let err = anyhow::Error::new(LoadError::EmptyGraph).context("while loading g.json");
        let cli = CliError::from_anyhow(&err);
        assert_eq!(cli.error_code.as_deref(), Some("E3002"));
    }

    #[test]
    fn plain_error_keeps_context_chain() {
        let err = anyhow::anyhow!("root cause").context("outer");
        let cli = CliError::from_anyhow(&err);
        assert_eq!(cli.message, "outer: root cause");
        assert!(cli.error_code.is_none());
    }

    #[test]
    fn error_renders_with_suggestion_in_text() {
        let mut buf = Vec::new();
        let err = CliError::from_code("bad source", ErrorCode::InvalidSource);
        render_error_to(&mut buf, OutputMode::Text, &err).expect("render");
        let s = String::from_utf8(buf).expect("utf8");
        assert!(s.starts_with("error: bad source\n"));
        assert!(s.contains("  suggestion: "));
    }

    #[test]
    fn error_renders_wrapped_in_json() {
        let mut buf = Vec::new();
        let err = CliError::from_code("bad source", ErrorCode::InvalidSource);
        render_error_to(&mut buf, OutputMode::Json, &err).expect("render");
        let json: serde_json::Value = serde_json::from_slice(&buf).expect("json");
        assert_eq!(json["error"]["error_code"], "E3002");
        assert_eq!(json["error"]["message"], "bad source");
    }
}
