use std::io::Write;

/// Append-only text sink the engine and builtins write result lines to.
///
/// `Stdout` backs the console front end; `Buffer` backs tests and any
/// embedding front end that wants to capture output.
pub enum Output {
    Stdout,
    Buffer(Vec<u8>),
}

impl Output {
    /// An empty capture buffer.
    #[must_use]
    pub const fn buffer() -> Self {
        Self::Buffer(Vec::new())
    }

    pub fn write(&mut self, data: &[u8]) -> std::io::Result<()> {
        match self {
            Self::Stdout => {
                std::io::stdout().write_all(data)?;
                std::io::stdout().flush()
            }
            Self::Buffer(buf) => {
                buf.extend_from_slice(data);
                Ok(())
            }
        }
    }

    pub fn writeln(&mut self, s: &str) -> std::io::Result<()> {
        self.write(s.as_bytes())?;
        self.write(b"\n")
    }

    /// Captured text so far; empty for the `Stdout` variant.
    #[must_use]
    pub fn captured(&self) -> String {
        match self {
            Self::Stdout => String::new(),
            Self::Buffer(buf) => String::from_utf8_lossy(buf).into_owned(),
        }
    }
}
