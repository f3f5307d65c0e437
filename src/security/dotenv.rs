//! Minimal `.env` reader
//!
//! Understands `NAME=value` lines, an optional `export ` prefix, quoted values
//! and `#` comments. No variable interpolation is performed.

use crate::core::traits::CredentialSource;
use lazy_static::lazy_static;
use regex::Regex;
use std::io;
use std::path::Path;

lazy_static! {
    static ref ASSIGNMENT: Regex =
        Regex::new(r"^\s*(?:export\s+)?([A-Za-z_][A-Za-z0-9_.]*)\s*=\s*(.*?)\s*$")
            .expect("assignment pattern is valid");
}

/// Parsed contents of a secrets file, in file order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DotEnvFile {
    entries: Vec<(String, String)>,
}

impl DotEnvFile {
    /// Parse file contents; blank, comment and malformed lines are skipped.
    /// A quoted value must be closed and followed by nothing but a comment.
    pub fn parse(content: &str) -> Self {
        let entries = content
            .lines()
            .filter(|line| {
                let trimmed = line.trim_start();
                !trimmed.is_empty() && !trimmed.starts_with('#')
            })
            .filter_map(|line| {
                let caps = ASSIGNMENT.captures(line)?;
                Some((caps[1].to_string(), Self::unquote(&caps[2])?))
            })
            .collect();

        Self { entries }
    }

    /// Read and parse `path`. A missing file is `Ok(None)`.
    pub fn read(path: &Path) -> io::Result<Option<Self>> {
        match std::fs::read_to_string(path) {
            Ok(content) => Ok(Some(Self::parse(&content))),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Assignments in file order
    pub fn entries(&self) -> &[(String, String)] {
        &self.entries
    }

    /// Seed every entry into `source` without overwriting.
    /// Returns how many names were stored.
    pub fn apply(&self, source: &dyn CredentialSource) -> usize {
        self.entries()
            .iter()
            .filter(|(name, value)| source.set_if_absent(name, value))
            .count()
    }

    fn unquote(raw: &str) -> Option<String> {
        for quote in ['"', '\''] {
            let Some(rest) = raw.strip_prefix(quote) else {
                continue;
            };
            let end = rest.find(quote)?;
            let tail = rest[end + quote.len_utf8()..].trim_start();
            if !tail.is_empty() && !tail.starts_with('#') {
                return None;
            }
            return Some(rest[..end].to_string());
        }
        // Unquoted values end at an inline comment
        match raw.find(" #") {
            Some(idx) => Some(raw[..idx].trim_end().to_string()),
            None => Some(raw.to_string()),
        }
    }
}
