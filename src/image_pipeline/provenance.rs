//! Provenance records attached to the RGB output.
//!
//! Keywords follow the FITS header convention (`COMMENT` / `HISTORY` cards)
//! and are serialized one per line as `NAME text`.

use std::fmt;

use crate::image_pipeline::debayer::BayerPattern;

pub const TOOL_NAME: &str = env!("CARGO_PKG_NAME");
pub const TOOL_VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderKeyword {
    pub name: String,
    pub value: String,
    pub comment: String,
}

impl HeaderKeyword {
    /// A card without value, text carried in the comment (COMMENT, HISTORY).
    pub fn commentary(name: &str, comment: impl Into<String>) -> Self {
        Self {
            name: name.to_string(),
            value: String::new(),
            comment: comment.into(),
        }
    }
}

impl fmt::Display for HeaderKeyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        if !self.value.is_empty() {
            write!(f, " = {}", self.value)?;
            if !self.comment.is_empty() {
                write!(f, " / {}", self.comment)?;
            }
        } else if !self.comment.is_empty() {
            write!(f, " {}", self.comment)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Provenance {
    keywords: Vec<HeaderKeyword>,
}

impl Provenance {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a description written by [`Provenance::to_text`] (or any
    /// `NAME text` lines). Blank lines are skipped.
    pub fn from_description(text: &str) -> Self {
        let keywords = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| {
                let (name, rest) = line.split_once(' ').unwrap_or((line, ""));
                match rest.trim().strip_prefix("= ") {
                    Some(valued) => {
                        let (value, comment) = valued.split_once(" / ").unwrap_or((valued, ""));
                        HeaderKeyword {
                            name: name.to_string(),
                            value: value.trim().to_string(),
                            comment: comment.trim().to_string(),
                        }
                    }
                    None => HeaderKeyword::commentary(name, rest.trim()),
                }
            })
            .collect();
        Self { keywords }
    }

    /// Appends the records for a super-pixel conversion with `pattern`.
    pub fn record_conversion(&mut self, pattern: BayerPattern) {
        let tool = format!("CFA2RGBing with {TOOL_NAME} {TOOL_VERSION}");
        self.push(HeaderKeyword::commentary("COMMENT", tool.clone()));
        self.push(HeaderKeyword::commentary("HISTORY", tool));
        self.push(HeaderKeyword::commentary("HISTORY", format!("CFA2RGB.pattern: {pattern}")));
    }

    pub fn push(&mut self, keyword: HeaderKeyword) {
        self.keywords.push(keyword);
    }

    pub fn keywords(&self) -> &[HeaderKeyword] {
        &self.keywords
    }

    pub fn to_text(&self) -> String {
        self.keywords
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n")
    }
}
