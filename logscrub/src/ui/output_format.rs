//! Formatting of status messages written to stderr.
//!
//! Colors are applied only when the caller says the target supports them.

use owo_colors::OwoColorize;
use std::io::{self, Write};

pub fn print_info_message<W: Write>(writer: &mut W, msg: &str, supports_color: bool) -> io::Result<()> {
    if supports_color {
        writeln!(writer, "{} {}", "info:".cyan().bold(), msg)
    } else {
        writeln!(writer, "info: {}", msg)
    }
}

pub fn print_warn_message<W: Write>(writer: &mut W, msg: &str, supports_color: bool) -> io::Result<()> {
    if supports_color {
        writeln!(writer, "{} {}", "warning:".yellow().bold(), msg)
    } else {
        writeln!(writer, "warning: {}", msg)
    }
}

pub fn print_error_message<W: Write>(writer: &mut W, msg: &str, supports_color: bool) -> io::Result<()> {
    if supports_color {
        writeln!(writer, "{} {}", "error:".red().bold(), msg)
    } else {
        writeln!(writer, "error: {}", msg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_messages_have_no_escape_codes() {
        let mut out = Vec::new();
        print_error_message(&mut out, "boom", false).unwrap();
        print_warn_message(&mut out, "careful", false).unwrap();
        print_info_message(&mut out, "done", false).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "error: boom\nwarning: careful\ninfo: done\n"
        );
    }

    #[test]
    fn colored_messages_keep_the_text() {
        let mut out = Vec::new();
        print_error_message(&mut out, "boom", true).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains('\u{1b}'));
        assert!(text.ends_with("boom\n"));
    }
}
