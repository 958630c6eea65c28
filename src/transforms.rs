/*!
 * Text-transform collaborators for optional flashcard columns.
 *
 * Romanization, ruby annotation, and character colorization are external
 * programs, not part of this crate: each is configured as a command line
 * that reads caption text on stdin and writes the transformed text on
 * stdout. A transform column exists in the output iff its command is
 * configured.
 */

use std::io::Write;
use std::process::{Command, Stdio};

use crate::errors::TransformError;

/// A pure text transform producing one auxiliary flashcard column
pub trait TextTransform {
    /// Column name, used in logs
    fn name(&self) -> &str;

    /// Transform normalized caption text into the auxiliary string
    fn apply(&self, text: &str) -> Result<String, TransformError>;

    /// Whether this transform wants the gentler, markup-preserving text
    /// variant instead of the fully normalized one (ruby annotators do)
    fn wants_markup(&self) -> bool {
        false
    }
}

/// Transform that pipes text through an external command
pub struct CommandTransform {
    name: String,
    command: String,
    wants_markup: bool,
}

impl CommandTransform {
    /// Creates a transform running `command` (program plus arguments,
    /// whitespace-separated)
    pub fn new(name: impl Into<String>, command: impl Into<String>, wants_markup: bool) -> Self {
        CommandTransform {
            name: name.into(),
            command: command.into(),
            wants_markup,
        }
    }
}

impl TextTransform for CommandTransform {
    fn name(&self) -> &str {
        &self.name
    }

    fn apply(&self, text: &str) -> Result<String, TransformError> {
        let mut parts = self.command.split_whitespace();
        let program = parts.next().ok_or_else(|| TransformError::CommandFailed {
            command: self.command.clone(),
            message: "empty command".to_string(),
        })?;

        let mut child = Command::new(program)
            .args(parts)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| TransformError::CommandFailed {
                command: self.command.clone(),
                message: e.to_string(),
            })?;

        // stdin handle is taken before wait_with_output and dropped after
        // the write so the child sees EOF
        {
            let stdin = child.stdin.as_mut().ok_or_else(|| TransformError::CommandFailed {
                command: self.command.clone(),
                message: "could not open child stdin".to_string(),
            })?;
            stdin
                .write_all(text.as_bytes())
                .map_err(|e| TransformError::CommandFailed {
                    command: self.command.clone(),
                    message: e.to_string(),
                })?;
        }
        drop(child.stdin.take());

        let output = child
            .wait_with_output()
            .map_err(|e| TransformError::CommandFailed {
                command: self.command.clone(),
                message: e.to_string(),
            })?;

        if !output.status.success() {
            return Err(TransformError::NonZeroExit {
                command: self.command.clone(),
                status: output.status.to_string(),
            });
        }

        let transformed = String::from_utf8_lossy(&output.stdout);
        Ok(transformed.trim_end_matches('\n').to_string())
    }

    fn wants_markup(&self) -> bool {
        self.wants_markup
    }
}
