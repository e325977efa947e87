use crate::error::{ConfigSyntaxError, SplitError};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

/// One named part and where it begins.
///
/// A positive `start_page` is an absolute 1-based page. A negative one is an
/// offset forward from the previous part's start.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PartSpec {
    pub name: String,
    pub start_page: i64,
}

#[cfg(test)]
impl PartSpec {
    pub fn new(name: impl Into<String>, start_page: i64) -> Self {
        PartSpec {
            name: name.into(),
            start_page,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PieceConfig {
    pub piece_name: String,
    #[serde(default = "default_start_index")]
    pub start_index: i64,
    pub parts: Vec<PartSpec>,
}

fn default_start_index() -> i64 {
    1
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConfigFormat {
    Yaml,
    Json,
}

impl ConfigFormat {
    fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => ConfigFormat::Json,
            _ => ConfigFormat::Yaml,
        }
    }
}

impl PieceConfig {
    /// Read and validate a piece config; the format follows the file extension.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;

        let config = Self::parse(&text, ConfigFormat::from_path(path)).map_err(|source| {
            SplitError::ConfigParse {
                path: path.to_path_buf(),
                source,
            }
        })?;
        config.validate()?;

        Ok(config)
    }

    fn parse(text: &str, format: ConfigFormat) -> Result<Self, ConfigSyntaxError> {
        Ok(match format {
            ConfigFormat::Yaml => serde_yaml_ng::from_str(text)?,
            ConfigFormat::Json => serde_json::from_str(text)?,
        })
    }

    pub fn validate(&self) -> Result<(), SplitError> {
        let first = self.parts.first().ok_or(SplitError::NoParts)?;
        if first.start_page < 0 {
            return Err(SplitError::RelativeFirstPart {
                start_page: first.start_page,
            });
        }

        let names = std::iter::once(&self.piece_name).chain(self.parts.iter().map(|p| &p.name));
        for name in names {
            if name.contains(['/', '\\']) {
                return Err(SplitError::UnsafeName { name: name.clone() });
            }
        }

        if let Some(part) = self.parts.iter().find(|p| p.start_page == 0) {
            return Err(SplitError::ZeroStartPage {
                part: part.name.clone(),
            });
        }

        Ok(())
    }

    /// File name for the part at position `position` in the list.
    pub fn output_file_name(&self, position: usize, part: &PartSpec) -> String {
        format!(
            "{} - {} - {}.pdf",
            self.start_index + position as i64,
            self.piece_name,
            part.name
        )
    }
}
