//! Folder templates such as `{{Year}}/{{Month}}` or `{{MediaType}}/{{Year}}/{{Month}}-{{Day}}`.
//!
//! Placeholders are written `{{Name}}`; surrounding whitespace and a single leading
//! dot are accepted, so `{{ .Year }}` works too. Templates are parsed once and then
//! rendered per file.

use chrono::{Datelike, NaiveDateTime, Timelike};
use std::fmt;
use std::path::{Component, PathBuf};
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    #[error("template is empty")]
    Empty,
    #[error("unclosed '{{{{' at byte {0}")]
    Unclosed(usize),
    #[error("unknown placeholder '{{{{{0}}}}}' (expected Year, Month, Day, Hour, Minute, MediaType or Extension)")]
    UnknownPlaceholder(String),
    #[error("rendered path '{0}' would leave the target directory")]
    EscapesRoot(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placeholder {
    Year,
    Month,
    Day,
    Hour,
    Minute,
    MediaType,
    Extension,
}

impl FromStr for Placeholder {
    type Err = TemplateError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Year" => Ok(Placeholder::Year),
            "Month" => Ok(Placeholder::Month),
            "Day" => Ok(Placeholder::Day),
            "Hour" => Ok(Placeholder::Hour),
            "Minute" => Ok(Placeholder::Minute),
            "MediaType" => Ok(Placeholder::MediaType),
            "Extension" => Ok(Placeholder::Extension),
            other => Err(TemplateError::UnknownPlaceholder(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Field(Placeholder),
}

/// Per-file values substituted into a template.
#[derive(Debug, Clone, Copy)]
pub struct TemplateVars<'a> {
    pub taken: NaiveDateTime,
    pub media_type: &'a str,
    /// Lowercase, without the leading dot
    pub extension: &'a str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderTemplate {
    source: String,
    segments: Vec<Segment>,
}

impl FolderTemplate {
    pub fn parse(template: &str) -> Result<Self, TemplateError> {
        if template.trim().is_empty() {
            return Err(TemplateError::Empty);
        }

        let mut segments = Vec::new();
        let mut rest = template;
        let mut offset = 0;
        while let Some(open) = rest.find("{{") {
            if open > 0 {
                segments.push(Segment::Literal(rest[..open].to_string()));
            }
            let after = &rest[open + 2..];
            let close = after
                .find("}}")
                .ok_or(TemplateError::Unclosed(offset + open))?;
            let inner = after[..close].trim();
            let name = inner.strip_prefix('.').unwrap_or(inner);
            segments.push(Segment::Field(name.parse()?));

            let consumed = open + 2 + close + 2;
            offset += consumed;
            rest = &rest[consumed..];
        }
        if !rest.is_empty() {
            segments.push(Segment::Literal(rest.to_string()));
        }

        Ok(Self {
            source: template.to_string(),
            segments,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Render to a relative directory path.
    pub fn render(&self, vars: &TemplateVars<'_>) -> Result<PathBuf, TemplateError> {
        let mut out = String::with_capacity(self.source.len() + 8);
        for seg in &self.segments {
            match seg {
                Segment::Literal(s) => out.push_str(s),
                Segment::Field(p) => {
                    let t = &vars.taken;
                    let value = match p {
                        Placeholder::Year => format!("{:04}", t.year()),
                        Placeholder::Month => format!("{:02}", t.month()),
                        Placeholder::Day => format!("{:02}", t.day()),
                        Placeholder::Hour => format!("{:02}", t.hour()),
                        Placeholder::Minute => format!("{:02}", t.minute()),
                        Placeholder::MediaType => vars.media_type.to_string(),
                        Placeholder::Extension => vars.extension.to_string(),
                    };
                    out.push_str(&value);
                }
            }
        }

        let path = PathBuf::from(&out);
        let escapes = path.components().any(|c| {
            matches!(
                c,
                Component::ParentDir | Component::RootDir | Component::Prefix(_)
            )
        });
        if escapes {
            return Err(TemplateError::EscapesRoot(out));
        }
        Ok(path)
    }
}

impl fmt::Display for FolderTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}
