//! Operator-facing output.
//!
//! The transcript (prompt, `[INFO]`, `[WARN]` and `[ERROR]` lines) is part
//! of the client's interface, so it is written directly rather than going
//! through `tracing`.

use std::fmt::Display;
use std::io::{self, Write};

/// Writes the interactive transcript to a byte sink, normally stderr.
///
/// Failures to write the transcript are ignored: there is nowhere left to
/// report them.
#[derive(Debug)]
pub struct Console<W> {
    out: W,
}

impl Console<io::Stderr> {
    pub fn stderr() -> Console<io::Stderr> {
        Console::new(io::stderr())
    }
}

impl<W: Write> Console<W> {
    pub fn new(out: W) -> Console<W> {
        Console { out }
    }

    pub fn prompt(&mut self) {
        let _ = self.out.write_all(b"> ");
        let _ = self.out.flush();
    }

    pub fn info(&mut self, message: impl Display) {
        self.line("[INFO] ", message);
    }

    pub fn warn(&mut self, message: impl Display) {
        self.line("[WARN] ", message);
    }

    pub fn error(&mut self, message: impl Display) {
        self.line("[ERROR] ", message);
    }

    /// Print an unprefixed line, such as the usage line.
    pub fn plain(&mut self, message: impl Display) {
        self.line("", message);
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn line(&mut self, prefix: &str, message: impl Display) {
        let _ = writeln!(self.out, "{prefix}{message}");
        let _ = self.out.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transcript_format() {
        let mut console = Console::new(Vec::new());
        console.prompt();
        console.info("connected");
        console.warn("too long");
        console.error(format_args!("failed: {}", 42));
        console.plain("Usage: prog Host PortNumber");

        let out = String::from_utf8(console.into_inner()).unwrap();
        assert_eq!(
            out,
            "> [INFO] connected\n[WARN] too long\n[ERROR] failed: 42\nUsage: prog Host PortNumber\n"
        );
    }
}
