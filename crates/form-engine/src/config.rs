//! Engine configuration
//!
//! Loaded from TOML. Every key is optional:
//!
//! ```toml
//! organization = "KMC"
//! currency = "UGX"
//! assets_dir = "assets"
//! logo = "logo.jpg"
//! fonts = ["Libertinus Serif"]
//! font_dirs = ["/usr/share/fonts/truetype/dejavu"]
//! timeout_ms = 5000
//! show_frame_boundaries = true
//! ```

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Settings shared by every form the engine renders
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Organisation named in the agreement and acknowledgement text
    pub organization: String,
    /// Currency label for rate and amount columns
    pub currency: String,
    /// Directory that logo and signature names are resolved against
    pub assets_dir: Option<PathBuf>,
    /// Logo asset name; without one the organisation name is printed instead
    pub logo: Option<String>,
    /// Font families in order of preference
    pub fonts: Vec<String>,
    /// Extra directories scanned for fonts
    pub font_dirs: Vec<PathBuf>,
    /// Compilation timeout for async renders
    pub timeout_ms: u64,
    /// Outline the fuel card frames (the gate pass has none)
    pub show_frame_boundaries: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            organization: "KMC".to_string(),
            currency: "UGX".to_string(),
            assets_dir: None,
            logo: None,
            fonts: vec!["Libertinus Serif".to_string()],
            font_dirs: Vec::new(),
            timeout_ms: 5000,
            show_frame_boundaries: true,
        }
    }
}

impl EngineConfig {
    /// Load configuration from a TOML file
    ///
    /// Relative `assets_dir` and `font_dirs` are resolved against the
    /// file's directory.
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let mut config = Self::from_str(&content)
            .with_context(|| format!("Invalid config file: {}", path.display()))?;

        if let Some(base) = path.parent() {
            config.resolve_relative_to(base);
        }
        Ok(config)
    }

    /// Parse configuration from a TOML string
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> anyhow::Result<Self> {
        let config: Self = toml::from_str(s).context("Failed to parse TOML configuration")?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        if self.fonts.is_empty() {
            anyhow::bail!("`fonts` must name at least one font family");
        }
        if self.timeout_ms == 0 {
            anyhow::bail!("`timeout_ms` must be greater than zero");
        }
        Ok(())
    }

    fn resolve_relative_to(&mut self, base: &Path) {
        if let Some(dir) = self.assets_dir.take() {
            self.assets_dir = Some(absolute(base, dir));
        }
        self.font_dirs = std::mem::take(&mut self.font_dirs)
            .into_iter()
            .map(|dir| absolute(base, dir))
            .collect();
    }
}

fn absolute(base: &Path, path: PathBuf) -> PathBuf {
    if path.is_absolute() {
        path
    } else {
        base.join(path)
    }
}
