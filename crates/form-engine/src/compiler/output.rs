//! Output format handling (PDF, SVG, PNG)

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Output format for rendered forms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Pdf,
    Svg,
    Png,
}

impl OutputFormat {
    /// MIME type for this format
    pub fn mime_type(&self) -> &'static str {
        match self {
            OutputFormat::Pdf => "application/pdf",
            OutputFormat::Svg => "image/svg+xml",
            OutputFormat::Png => "image/png",
        }
    }

    /// File extension for this format
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Pdf => "pdf",
            OutputFormat::Svg => "svg",
            OutputFormat::Png => "png",
        }
    }

    /// Guess the format from an output path, if the extension is known
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| ext.parse().ok())
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.extension())
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pdf" => Ok(OutputFormat::Pdf),
            "svg" => Ok(OutputFormat::Svg),
            "png" => Ok(OutputFormat::Png),
            other => Err(format!("Unknown output format: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_path() {
        assert_eq!(
            OutputFormat::from_path(Path::new("out/fuel.PDF")),
            Some(OutputFormat::Pdf)
        );
        assert_eq!(
            OutputFormat::from_path(Path::new("gate.png")),
            Some(OutputFormat::Png)
        );
        assert_eq!(OutputFormat::from_path(Path::new("gate.docx")), None);
        assert_eq!(OutputFormat::from_path(Path::new("gate")), None);
    }

    #[test]
    fn test_parse_rejects_unknown() {
        assert!("tiff".parse::<OutputFormat>().is_err());
        assert_eq!("SVG".parse::<OutputFormat>(), Ok(OutputFormat::Svg));
    }
}
