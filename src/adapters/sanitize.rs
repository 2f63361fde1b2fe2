//! Log sanitization for health data.
//!
//! Symptom answers are personal health information. Services log which
//! tier was produced, never which symptoms were checked, but formatted
//! output still passes through this filter before it reaches a sink:
//! - Persisted symptom arrays (`["cough","wheeze"]`)
//! - Individual checklist labels
//! - Email addresses and phone numbers typed into free-text fields
//!
//! Input is capped at [`DEFAULT_SANITIZE_MAX_BYTES`] per call unless the
//! writer is built with [`SanitizingMakeWriter::with_limit`].

use regex::{Regex, RegexSet};
use std::sync::OnceLock;
use tracing_subscriber::fmt::MakeWriter;

use crate::domain::Symptom;

static RULES: OnceLock<Rules> = OnceLock::new();

/// Per-call input cap used when none is configured.
pub const DEFAULT_SANITIZE_MAX_BYTES: usize = 16 * 1024;

struct Rule {
    regex: Regex,
    replacement: &'static str,
}

struct Rules {
    set: RegexSet,
    rules: Vec<Rule>,
}

fn truncate_to_char_boundary(input: &str, max_bytes: usize) -> (&str, bool) {
    if input.len() <= max_bytes {
        return (input, false);
    }

    let mut end = max_bytes;
    while end > 0 && !input.is_char_boundary(end) {
        end -= 1;
    }
    (&input[..end], true)
}

fn symptom_label_pattern() -> String {
    let labels: Vec<String> = Symptom::ALL
        .iter()
        .map(|s| regex::escape(s.label()))
        .collect();
    format!(r"(?i)\b(?:{})\b", labels.join("|"))
}

fn rules() -> &'static Rules {
    RULES.get_or_init(|| {
        // Order matters: whole arrays first so they collapse to one marker.
        let specs: Vec<(String, &'static str)> = vec![
            (
                r#"\[\s*"[^"\]]{0,64}"(?:\s*,\s*"[^"\]]{0,64}"){0,31}\s*\]"#.to_string(),
                "[REDACTED-SYMPTOMS]",
            ),
            (symptom_label_pattern(), "[REDACTED-SYMPTOM]"),
            (
                r"(?i)\b[a-z0-9](?:[a-z0-9._%+-]{0,62}[a-z0-9])?@(?:[a-z0-9](?:[a-z0-9-]{0,61}[a-z0-9])?\.)+[a-z]{2,}\b"
                    .to_string(),
                "[REDACTED-EMAIL]",
            ),
            (
                r"\b(?:\+?\d{1,3}[-.\s]?)?\(?[0-9]{3}\)?[-.\s]?[0-9]{3}[-.\s]?[0-9]{4}\b".to_string(),
                "[REDACTED-PHONE]",
            ),
        ];

        let mut rules = Vec::with_capacity(specs.len());
        let mut patterns = Vec::with_capacity(specs.len());
        for (pattern, replacement) in specs {
            // Patterns are compile-time constants; a failure here is a programming error
            // and the rule is skipped rather than taking logging down.
            match Regex::new(&pattern) {
                Ok(regex) => {
                    patterns.push(pattern);
                    rules.push(Rule { regex, replacement });
                }
                Err(e) => eprintln!("airsense: invalid sanitize pattern: {e}"),
            }
        }

        let set = RegexSet::new(&patterns).unwrap_or_else(|_| RegexSet::empty());
        Rules { set, rules }
    })
}

/// Replace health data and contact details in `input`.
#[must_use]
pub fn sanitize(input: &str) -> String {
    sanitize_with_limit(input, DEFAULT_SANITIZE_MAX_BYTES)
}

/// [`sanitize`] with an explicit input cap.
#[must_use]
pub fn sanitize_with_limit(input: &str, max_bytes: usize) -> String {
    let rules = rules();
    let (prefix, truncated) = truncate_to_char_boundary(input, max_bytes);

    let mut result = prefix.to_string();
    if rules.set.is_match(prefix) {
        for rule in &rules.rules {
            if rule.regex.is_match(&result) {
                result = rule.regex.replace_all(&result, rule.replacement).into_owned();
            }
        }
    }

    if truncated {
        result.push_str(" [TRUNCATED]");
    }
    result
}

/// Whether `input` contains anything [`sanitize`] would redact.
#[must_use]
pub fn contains_health_data(input: &str) -> bool {
    let (prefix, _) = truncate_to_char_boundary(input, DEFAULT_SANITIZE_MAX_BYTES);
    rules().set.is_match(prefix)
}

/// A `tracing_subscriber` writer wrapper that sanitizes each formatted
/// log line before it is written to the underlying sink.
#[derive(Debug, Clone)]
pub struct SanitizingMakeWriter<M> {
    inner: M,
    max_bytes: usize,
}

impl<M> SanitizingMakeWriter<M> {
    /// Cap each sanitized chunk at `max_bytes` (clamped to at least 1).
    #[must_use]
    pub fn with_limit(inner: M, max_bytes: usize) -> Self {
        Self {
            inner,
            max_bytes: max_bytes.max(1),
        }
    }
}

/// Line-buffering writer produced by [`SanitizingMakeWriter`].
pub struct SanitizingWriter<W> {
    inner: W,
    buffer: Vec<u8>,
    max_bytes: usize,
}

impl<W: std::io::Write> SanitizingWriter<W> {
    fn write_sanitized(&mut self, bytes: &[u8]) -> std::io::Result<()> {
        let text = String::from_utf8_lossy(bytes);
        self.inner
            .write_all(sanitize_with_limit(&text, self.max_bytes).as_bytes())
    }

    fn flush_lines(&mut self) -> std::io::Result<()> {
        while let Some(pos) = self.buffer.iter().position(|&b| b == b'\n') {
            let line: Vec<u8> = self.buffer.drain(..=pos).collect();
            self.write_sanitized(&line)?;
        }
        Ok(())
    }
}

impl<W: std::io::Write> std::io::Write for SanitizingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.buffer.extend_from_slice(buf);

        // A line with no newline must not grow the buffer without bound.
        if self.buffer.len() > self.max_bytes.saturating_mul(2) {
            let pending = std::mem::take(&mut self.buffer);
            self.write_sanitized(&pending)?;
            self.inner.write_all(b"\n")?;
            return Ok(buf.len());
        }

        self.flush_lines()?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.flush_lines()?;
        if !self.buffer.is_empty() {
            let pending = std::mem::take(&mut self.buffer);
            self.write_sanitized(&pending)?;
        }
        self.inner.flush()
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
            buffer: Vec::new(),
            max_bytes: self.max_bytes,
        }
    }
}
