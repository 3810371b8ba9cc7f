//! Reading the source file, writing the scrubbed file, and counting lines.

use anyhow::{Context, Result};
use log::{debug, warn};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::Path;

/// Reads the whole file as UTF-8. Invalid sequences are replaced with U+FFFD
/// instead of failing the run.
pub fn read_source(path: &Path) -> Result<String> {
    let bytes = fs::read(path)
        .with_context(|| format!("Unable to read file {}", path.display()))?;
    debug!("Read {} byte(s) from {}", bytes.len(), path.display());
    match String::from_utf8(bytes) {
        Ok(text) => Ok(text),
        Err(e) => {
            warn!(
                "{} is not valid UTF-8; invalid sequences were replaced.",
                path.display()
            );
            Ok(String::from_utf8_lossy(e.as_bytes()).into_owned())
        }
    }
}

/// Creates or truncates `path` with exactly `content`, creating parent directories first.
pub fn write_output(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Unable to create directory {}", parent.display()))?;
        }
    }
    fs::write(path, content.as_bytes())
        .with_context(|| format!("Unable to write file {}", path.display()))?;
    debug!("Wrote {} byte(s) to {}", content.len(), path.display());
    Ok(())
}

/// Number of lines. `\n`, `\r\n` and a lone `\r` each end a line, and a final line
/// without a terminator still counts.
pub fn count_lines(text: &str) -> usize {
    let mut lines = 0;
    let mut open_line = false;
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\n' => {
                lines += 1;
                open_line = false;
            }
            '\r' => {
                chars.next_if_eq(&'\n');
                lines += 1;
                open_line = false;
            }
            _ => open_line = true,
        }
    }
    lines + usize::from(open_line)
}

/// Strips ANSI escape sequences such as terminal colors.
pub fn strip_ansi(text: &str) -> String {
    let stripped = strip_ansi_escapes::strip(text.as_bytes());
    String::from_utf8_lossy(&stripped).into_owned()
}

pub fn sha256_hex(text: &str) -> String {
    hex::encode(Sha256::digest(text.as_bytes()))
}
