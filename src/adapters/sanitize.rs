//! Log redaction for health metrics.
//!
//! Form values are personal health data. They should never be logged, but
//! payloads and server `details` can still end up in formatted messages, so
//! the log writer passes every line through [`sanitize`]:
//! - `"<field>": <number>` pairs (JSON bodies) lose their value
//! - `<field>=<number>` pairs (debug output) lose their value
//! - e-mail addresses and bearer tokens are replaced
//!
//! Field names come from the default form schema.

use std::sync::OnceLock;

use regex::{Regex, RegexSet};
use tracing_subscriber::fmt::MakeWriter;

use crate::domain::FormState;

/// Default cap on bytes inspected per call.
pub const DEFAULT_SANITIZE_MAX_BYTES: usize = 16 * 1024;

struct Rule {
    regex: Regex,
    replacement: String,
}

struct Rules {
    any: RegexSet,
    rules: Vec<Rule>,
}

static RULES: OnceLock<Option<Rules>> = OnceLock::new();

/// Compiled rules, or `None` if a pattern failed to compile.
fn rules() -> Option<&'static Rules> {
    RULES.get_or_init(|| build_rules().ok()).as_ref()
}

fn build_rules() -> Result<Rules, regex::Error> {
    let names = FormState::default()
        .fields
        .iter()
        .map(|f| regex::escape(f.name))
        .collect::<Vec<_>>()
        .join("|");
    let number = r"-?[0-9]+(?:\.[0-9]+)?(?:[eE][+-]?[0-9]+)?";

    let specs: Vec<(String, String)> = vec![
        (
            format!(r#""({names})"\s*:\s*"?{number}"?"#),
            r#""$1":"[REDACTED]""#.to_string(),
        ),
        (
            format!(r"\b({names})\s*=\s*{number}"),
            "$1=[REDACTED]".to_string(),
        ),
        (
            r"(?i)\b[a-z0-9._%+-]{1,64}@(?:[a-z0-9-]{1,63}\.)+[a-z]{2,}\b".to_string(),
            "[REDACTED-EMAIL]".to_string(),
        ),
        (
            r"(?i)\bbearer\s+[a-z0-9._~+/-]{16,}=*".to_string(),
            "Bearer [REDACTED-TOKEN]".to_string(),
        ),
    ];

    let any = RegexSet::new(specs.iter().map(|(p, _)| p.as_str()))?;
    let rules = specs
        .into_iter()
        .map(|(pattern, replacement)| {
            Ok(Rule {
                regex: Regex::new(&pattern)?,
                replacement,
            })
        })
        .collect::<Result<Vec<_>, regex::Error>>()?;

    Ok(Rules { any, rules })
}

fn clip(input: &str, max_bytes: usize) -> (&str, bool) {
    if input.len() <= max_bytes {
        return (input, false);
    }
    let mut end = max_bytes;
    while end > 0 && !input.is_char_boundary(end) {
        end -= 1;
    }
    (&input[..end], true)
}

/// Redact health metrics and secrets from `input`, inspecting at most
/// [`DEFAULT_SANITIZE_MAX_BYTES`].
#[must_use]
pub fn sanitize(input: &str) -> String {
    sanitize_with_limit(input, DEFAULT_SANITIZE_MAX_BYTES)
}

/// Same as [`sanitize`] with an explicit cap. Input beyond the cap is
/// dropped and marked `[TRUNCATED]`; a trailing newline survives the cut.
#[must_use]
pub fn sanitize_with_limit(input: &str, max_bytes: usize) -> String {
    let Some(rules) = rules() else {
        // Without rules nothing can be vouched for.
        return "[REDACTED]\n".to_string();
    };
    let (head, truncated) = clip(input, max_bytes);

    let mut out = head.to_string();
    for idx in rules.any.matches(head).into_iter() {
        let rule = &rules.rules[idx];
        out = rule
            .regex
            .replace_all(&out, rule.replacement.as_str())
            .into_owned();
    }

    if truncated {
        out.push_str(" [TRUNCATED]");
        if input.ends_with('\n') {
            out.push('\n');
        }
    }
    out
}

/// `MakeWriter` wrapper that redacts every formatted log line before it
/// reaches the sink.
#[derive(Debug, Clone)]
pub struct SanitizingMakeWriter<M> {
    inner: M,
    max_bytes: usize,
}

impl<M> SanitizingMakeWriter<M> {
    #[must_use]
    pub fn new(inner: M) -> Self {
        Self {
            inner,
            max_bytes: DEFAULT_SANITIZE_MAX_BYTES,
        }
    }

    #[must_use]
    pub fn with_max_bytes(mut self, max_bytes: usize) -> Self {
        self.max_bytes = max_bytes.max(1);
        self
    }
}

/// Line-buffering writer produced by [`SanitizingMakeWriter`].
pub struct SanitizingWriter<W: std::io::Write> {
    inner: W,
    pending: Vec<u8>,
    max_bytes: usize,
}

impl<W: std::io::Write> SanitizingWriter<W> {
    fn emit(&mut self, bytes: &[u8]) -> std::io::Result<()> {
        let text = String::from_utf8_lossy(bytes);
        self.inner
            .write_all(sanitize_with_limit(&text, self.max_bytes).as_bytes())
    }

    fn drain_lines(&mut self) -> std::io::Result<()> {
        while let Some(pos) = self.pending.iter().position(|&b| b == b'\n') {
            let line: Vec<u8> = self.pending.drain(..=pos).collect();
            self.emit(&line)?;
        }
        Ok(())
    }
}

impl<W: std::io::Write> std::io::Write for SanitizingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.pending.extend_from_slice(buf);
        self.drain_lines()?;

        // A line longer than twice the cap is flushed early.
        if self.pending.len() > self.max_bytes.saturating_mul(2) {
            let overflow = std::mem::take(&mut self.pending);
            self.emit(&overflow)?;
            self.inner.write_all(b"\n")?;
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.drain_lines()?;
        if !self.pending.is_empty() {
            let rest = std::mem::take(&mut self.pending);
            self.emit(&rest)?;
        }
        self.inner.flush()
    }
}

impl<W: std::io::Write> Drop for SanitizingWriter<W> {
    fn drop(&mut self) {
        let _ = std::io::Write::flush(self);
    }
}

impl<'a, M> MakeWriter<'a> for SanitizingMakeWriter<M>
where
    M: MakeWriter<'a>,
{
    type Writer = SanitizingWriter<M::Writer>;

    fn make_writer(&'a self) -> Self::Writer {
        SanitizingWriter {
            inner: self.inner.make_writer(),
            pending: Vec::new(),
            max_bytes: self.max_bytes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_redacts_json_payload_values() {
        let input = r#"payload {"age":54.0,"weight":86.5,"ap_hi":142,"BMI":"28.57"}"#;
        let out = sanitize(input);
        assert!(!out.contains("54.0"));
        assert!(!out.contains("86.5"));
        assert!(!out.contains("142"));
        assert!(!out.contains("28.57"));
        assert!(out.contains(r#""age":"[REDACTED]""#));
        assert!(out.contains(r#""BMI":"[REDACTED]""#));
    }

    #[test]
    fn test_redacts_key_value_pairs() {
        let out = sanitize("validated height=174 weight = 86.5 count=12");
        assert_eq!(
            out,
            "validated height=[REDACTED] weight=[REDACTED] count=12"
        );
    }

    #[test]
    fn test_redacts_email_and_bearer() {
        let out = sanitize("user jane.doe@clinic.org sent Bearer abcdefghijklmnopqrstuvwxyz012345");
        assert!(out.contains("[REDACTED-EMAIL]"));
        assert!(out.contains("Bearer [REDACTED-TOKEN]"));
        assert!(!out.contains("jane.doe"));
    }

    #[test]
    fn test_plain_text_untouched() {
        let line = "Prediction received: confidence=82%, tier=High";
        assert_eq!(sanitize(line), line);
    }

    #[test]
    fn test_truncates_on_char_boundary() {
        let out = sanitize_with_limit("ééééé", 3);
        assert_eq!(out, "é [TRUNCATED]");
    }

    #[test]
    fn test_truncation_keeps_line_terminator() {
        assert_eq!(
            sanitize_with_limit("0123456789AB\n", 8),
            "01234567 [TRUNCATED]\n"
        );
    }

    #[derive(Clone, Default)]
    struct Sink(Arc<Mutex<Vec<u8>>>);

    impl Write for Sink {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0
                .lock()
                .map_err(|_| std::io::Error::new(std::io::ErrorKind::Other, "poisoned"))?
                .extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for Sink {
        type Writer = Sink;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    #[test]
    fn test_writer_sanitizes_split_lines() {
        let sink = Sink::default();
        let make = SanitizingMakeWriter::new(sink.clone());
        {
            let mut writer = make.make_writer();
            writer.write_all(b"sent {\"wei").expect("write");
            writer.write_all(b"ght\":86.5}\nnext line\n").expect("write");
        }
        let written = String::from_utf8(sink.0.lock().expect("lock").clone()).expect("utf8");
        assert_eq!(written, "sent {\"weight\":\"[REDACTED]\"}\nnext line\n");
    }

    #[test]
    fn test_writer_keeps_records_apart_after_truncation() {
        let sink = Sink::default();
        let make = SanitizingMakeWriter::new(sink.clone()).with_max_bytes(8);
        {
            let mut writer = make.make_writer();
            writer.write_all(b"0123456789AB\nnext\n").expect("write");
        }
        let written = String::from_utf8(sink.0.lock().expect("lock").clone()).expect("utf8");
        assert_eq!(written.lines().collect::<Vec<_>>(), vec!["01234567 [TRUNCATED]", "next"]);
    }
}
