use std::{
    io::Write as _,
    path::PathBuf,
    process::{Command, Stdio},
};

use super::{Analyzer, AnalyzerEntry};
use crate::error::{Error, Result};

/// Runs an analyzer executable that reads text on stdin and prints JSON arrays of
/// entries on stdout, one array per input line.
#[derive(Debug, Clone)]
pub struct ProcessAnalyzer {
    program: PathBuf,
    args: Vec<String>,
}

impl ProcessAnalyzer {
    pub fn new(program: impl Into<PathBuf>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }
}

impl Analyzer for ProcessAnalyzer {
    fn analyze(&self, text: &str) -> Result<Vec<AnalyzerEntry>> {
        tracing::debug!(
            "Running {} on {} bytes",
            self.program.display(),
            text.len()
        );

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| Error::Analyzer(format!("{}: {e}", self.program.display())))?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| Error::Analyzer("stdin not captured".to_string()))?;
        let input = text.to_string();
        let writer = std::thread::spawn(move || stdin.write_all(input.as_bytes()));

        let output = child
            .wait_with_output()
            .map_err(|e| Error::Analyzer(format!("{}: {e}", self.program.display())))?;

        let written = writer.join();

        // A crashed analyzer also breaks the pipe; its stderr says more.
        if !output.status.success() {
            return Err(Error::Analyzer(format!(
                "{} exited with {}: {}",
                self.program.display(),
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        match written {
            Ok(Ok(())) => {}
            Ok(Err(e)) => return Err(Error::Analyzer(format!("writing input: {e}"))),
            Err(_) => return Err(Error::Analyzer("input writer panicked".to_string())),
        }

        let stdout = String::from_utf8(output.stdout)
            .map_err(|e| Error::Analyzer(format!("output is not UTF-8: {e}")))?;
        parse_entries(&stdout)
    }

    fn name(&self) -> &'static str {
        "process"
    }
}

/// Concatenates every JSON array of entries found in `output`.
pub(crate) fn parse_entries(output: &str) -> Result<Vec<AnalyzerEntry>> {
    let mut entries = Vec::new();
    for chunk in serde_json::Deserializer::from_str(output).into_iter::<Vec<AnalyzerEntry>>() {
        let chunk = chunk.map_err(|e| Error::Analyzer(format!("malformed output: {e}")))?;
        entries.extend(chunk);
    }
    Ok(entries)
}
