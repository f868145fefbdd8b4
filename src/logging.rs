//! Logging setup.
//!
//! Everything written by the fmt layer passes through [`RedactingWriter`],
//! so a bot token that ends up in an error message (teloxide request URLs
//! embed it) is masked before it reaches stderr.

use regex::Regex;
use std::io::{self, Write};
use std::sync::Arc;
use tracing_subscriber::{prelude::*, EnvFilter};

/// Default filter when `RUST_LOG` is unset
const DEFAULT_FILTER: &str = "greeter_bot=info,teloxide=info,hyper=warn,reqwest=warn,tokio=warn";

/// Regex patterns for redacting bot tokens.
///
/// teloxide builds request URLs as `<api>/bot<token>/<Method>`, and reqwest
/// errors echo that URL, so the `bot<token>` path segment is the common case.
/// A token logged on its own is caught by the bare pattern.
pub struct RedactionPatterns {
    bot_path: Regex,
    bare_token: Regex,
}

impl RedactionPatterns {
    /// Initialize all regex patterns
    ///
    /// # Errors
    ///
    /// Returns an error if any regex pattern is invalid
    pub fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            bot_path: Regex::new(r"(bot)[0-9]{6,12}:[A-Za-z0-9_-]+")?,
            bare_token: Regex::new(r"\b[0-9]{6,12}:[A-Za-z0-9_-]{30,}")?,
        })
    }

    /// Mask every token-looking substring of `input`
    #[must_use]
    pub fn redact(&self, input: &str) -> String {
        let output = self
            .bot_path
            .replace_all(input, "${1}[TELEGRAM_TOKEN]")
            .to_string();
        self.bare_token
            .replace_all(&output, "[TELEGRAM_TOKEN]")
            .to_string()
    }
}

/// `Write` adapter that redacts each buffer before forwarding it
pub struct RedactingWriter<W: Write> {
    inner: W,
    patterns: Arc<RedactionPatterns>,
}

impl<W: Write> RedactingWriter<W> {
    /// Wrap `inner`
    pub const fn new(inner: W, patterns: Arc<RedactionPatterns>) -> Self {
        Self { inner, patterns }
    }
}

impl<W: Write> Write for RedactingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let s = String::from_utf8_lossy(buf);
        let redacted = self.patterns.redact(&s);
        self.inner.write_all(redacted.as_bytes())?;
        // Report the original length; the redacted text may be shorter or longer.
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

struct RedactingMakeWriter<F> {
    make_inner: F,
    patterns: Arc<RedactionPatterns>,
}

impl<'a, F, W> tracing_subscriber::fmt::MakeWriter<'a> for RedactingMakeWriter<F>
where
    F: Fn() -> W + 'static,
    W: Write,
{
    type Writer = RedactingWriter<W>;

    fn make_writer(&'a self) -> Self::Writer {
        RedactingWriter::new((self.make_inner)(), self.patterns.clone())
    }
}

/// True when `DEBUG_MODE` is `true` or `1`
fn debug_mode() -> bool {
    std::env::var("DEBUG_MODE")
        .map(|v| v == "true" || v == "1")
        .unwrap_or(false)
}

/// Install the global subscriber: `EnvFilter` + fmt layer on redacted stderr.
///
/// `RUST_LOG` takes precedence; otherwise `DEBUG_MODE` selects `debug`,
/// and the default is info for this crate and teloxide.
///
/// # Errors
///
/// Returns an error if the redaction patterns fail to compile.
pub fn init_logging() -> Result<(), regex::Error> {
    let patterns = Arc::new(RedactionPatterns::new()?);
    let make_writer = RedactingMakeWriter {
        make_inner: io::stderr,
        patterns,
    };

    let filter = if debug_mode() {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(make_writer))
        .init();

    Ok(())
}
