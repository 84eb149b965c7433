use std::{fmt::Display, io::Write as _};

use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

/// Right-aligned, colored status lines on stderr.
pub struct Shell {
    stderr: StandardStream,
}

impl Shell {
    pub fn new() -> Self {
        Self {
            stderr: StandardStream::stderr(ColorChoice::Auto),
        }
    }

    pub fn status(&mut self, label: impl Display, message: impl Display) -> std::io::Result<()> {
        self.status_with_color(label, message, Color::Green)
    }

    pub fn error(&mut self, message: impl Display) -> std::io::Result<()> {
        self.status_with_color("error", message, Color::Red)
    }

    pub fn status_with_color(
        &mut self,
        label: impl Display,
        message: impl Display,
        color: Color,
    ) -> std::io::Result<()> {
        self.stderr
            .set_color(ColorSpec::new().set_fg(Some(color)).set_bold(true))?;
        write!(self.stderr, "{label:>12}")?;
        self.stderr.reset()?;
        writeln!(self.stderr, " {message}")
    }
}
