//! Log redaction for clinical values and personal identifiers.
//!
//! Log lines are filtered before they reach the sink:
//! - Clinical measurements written as `name=value` or `name: value`
//!   (`amh=0.4` becomes `amh=[REDACTED]`)
//! - E-mail addresses, phone numbers and UUIDs
//!
//! The engine logs factor multipliers and fingerprints, not raw labs; this
//! is a second line of protection for whatever callers log around it.

use std::sync::OnceLock;

use regex::Regex;
use tracing_subscriber::fmt::MakeWriter;

/// Lines longer than this are cut before redaction.
const MAX_LINE_BYTES: usize = 16 * 1024;

struct Rule {
    regex: Regex,
    replacement: &'static str,
}

static RULES: OnceLock<Vec<Rule>> = OnceLock::new();

fn rules() -> &'static [Rule] {
    RULES.get_or_init(|| {
        let specs: [(&str, &str); 4] = [
            (
                r"(?i)\b(age|bmi|cycle_?length|amh|prolactin|tsh|homa|glucose|insulin|fasting_?glucose|fasting_?insulin|sperm_?concentration|sperm_?motility|sperm_?morphology|concentration|motility|morphology)(\s*[:=]\s*)-?\d+(?:\.\d+)?",
                "${1}${2}[REDACTED]",
            ),
            (
                r"[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}",
                "[REDACTED-UUID]",
            ),
            (
                r"(?i)\b[a-z0-9._%+-]{1,64}@(?:[a-z0-9-]{1,63}\.)+[a-z]{2,}\b",
                "[REDACTED-EMAIL]",
            ),
            (
                r"\b(?:\+?\d{1,3}[-.\s]?)?\(?\d{3}\)?[-.\s]?\d{3}[-.\s]?\d{3,4}\b",
                "[REDACTED-PHONE]",
            ),
        ];

        specs
            .into_iter()
            .filter_map(|(pattern, replacement)| match Regex::new(pattern) {
                Ok(regex) => Some(Rule { regex, replacement }),
                Err(e) => {
                    eprintln!("invalid redaction pattern {pattern:?}: {e}");
                    None
                }
            })
            .collect()
    })
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

/// Redact clinical values and identifiers from `input`.
#[must_use]
pub fn redact(input: &str) -> String {
    let (prefix, truncated) = truncate_to_char_boundary(input, MAX_LINE_BYTES);

    let mut out = prefix.to_string();
    for rule in rules() {
        if rule.regex.is_match(&out) {
            out = rule.regex.replace_all(&out, rule.replacement).into_owned();
        }
    }

    if truncated {
        out.push_str(" [TRUNCATED]");
    }
    out
}

/// `MakeWriter` wrapper that redacts each formatted log line.
#[derive(Debug, Clone)]
pub struct RedactingMakeWriter<M> {
    inner: M,
}

impl<M> RedactingMakeWriter<M> {
    #[must_use]
    pub fn new(inner: M) -> Self {
        Self { inner }
    }
}

/// Line-buffering writer produced by `RedactingMakeWriter`.
pub struct RedactingWriter<W: std::io::Write> {
    inner: W,
    pending: Vec<u8>,
}

impl<W: std::io::Write> RedactingWriter<W> {
    fn write_redacted(&mut self, bytes: &[u8]) -> std::io::Result<()> {
        let text = String::from_utf8_lossy(bytes);
        self.inner.write_all(redact(&text).as_bytes())
    }

    fn drain_lines(&mut self) -> std::io::Result<()> {
        while let Some(pos) = self.pending.iter().position(|&b| b == b'\n') {
            let line: Vec<u8> = self.pending.drain(..=pos).collect();
            self.write_redacted(&line)?;
        }
        Ok(())
    }
}

impl<W: std::io::Write> std::io::Write for RedactingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.pending.extend_from_slice(buf);

        if self.pending.len() > MAX_LINE_BYTES * 2 {
            let pending = std::mem::take(&mut self.pending);
            self.write_redacted(&pending)?;
            self.inner.write_all(b"\n")?;
            return Ok(buf.len());
        }

        self.drain_lines()?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.drain_lines()?;
        if !self.pending.is_empty() {
            let pending = std::mem::take(&mut self.pending);
            self.write_redacted(&pending)?;
        }
        self.inner.flush()
    }
}

impl<W: std::io::Write> Drop for RedactingWriter<W> {
    fn drop(&mut self) {
        let _ = std::io::Write::flush(self);
    }
}

impl<'a, M> MakeWriter<'a> for RedactingMakeWriter<M>
where
    M: MakeWriter<'a>,
{
    type Writer = RedactingWriter<M::Writer>;

    fn make_writer(&'a self) -> Self::Writer {
        RedactingWriter {
            inner: self.inner.make_writer(),
            pending: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_redact_clinical_values() {
        let out = redact("evaluating amh=0.4 tsh: 3.2 BMI=31");
        assert_eq!(out, "evaluating amh=[REDACTED] tsh: [REDACTED] BMI=[REDACTED]");
    }

    #[test]
    fn test_factor_multipliers_untouched() {
        let line = "Evaluated 16 factors (3 sub-optimal, 2 missing)";
        assert_eq!(redact(line), line);
    }

    #[test]
    fn test_redact_identifiers() {
        let out = redact("patient 550e8400-e29b-41d4-a716-446655440000 mail jane@clinic.org");
        assert!(out.contains("[REDACTED-UUID]"));
        assert!(out.contains("[REDACTED-EMAIL]"));
        assert!(!out.contains("clinic.org"));
    }

    #[test]
    fn test_truncates_long_lines() {
        let long = "x".repeat(MAX_LINE_BYTES + 10);
        assert!(redact(&long).ends_with("[TRUNCATED]"));
    }

    #[test]
    fn test_writer_redacts_per_line() {
        let mut sink = Vec::new();
        {
            let mut writer = RedactingWriter {
                inner: &mut sink,
                pending: Vec::new(),
            };
            writer.write_all(b"amh=0.3 first\nsecond ").expect("Should write");
            writer.write_all(b"tsh=4\n").expect("Should write");
            writer.flush().expect("Should flush");
        }
        let text = String::from_utf8(sink).expect("Valid UTF-8");
        assert_eq!(text, "amh=[REDACTED] first\nsecond tsh=[REDACTED]\n");
    }
}
