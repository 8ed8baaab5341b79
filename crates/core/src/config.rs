//! Export configuration.
//!
//! Every field has a default, so an empty JSON object is a valid
//! configuration file.

use crate::error::ExportError;
use base64::Engine;
use powerdeck_raster::{Bitmap, RasterConfig};
use powerdeck_types::Color;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_REPORT_SECTIONS: [&str; 7] = [
    "Overview",
    "Energy Sources",
    "Solar Savings",
    "Expenses",
    "Production vs Consumption",
    "Gas Consumption",
    "Comparison",
];

/// Where a logo comes from: a file path, or a `data:` URI with base64 content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LogoSource(pub String);

impl LogoSource {
    /// Reads and decodes the image. Relative paths resolve against `base`.
    pub fn load(&self, base: Option<&Path>) -> Result<Bitmap, ExportError> {
        let bytes = match self.0.strip_prefix("data:") {
            Some(uri) => {
                let (_, payload) = uri
                    .split_once(";base64,")
                    .ok_or_else(|| ExportError::Config("logo data URI is not base64-encoded".to_string()))?;
                base64::engine::general_purpose::STANDARD
                    .decode(payload.trim())
                    .map_err(|e| ExportError::Config(format!("invalid base64 in logo: {}", e)))?
            }
            None => {
                let path = PathBuf::from(&self.0);
                let path = match base {
                    Some(base) if path.is_relative() => base.join(path),
                    _ => path,
                };
                fs::read(&path)?
            }
        };
        Bitmap::decode(&bytes).map_err(|e| ExportError::Config(format!("unreadable logo: {}", e)))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrandConfig {
    pub dashboard: String,
    pub organization: String,
    /// Signs the narrative document.
    pub team: String,
    /// Left header band and first theme accent.
    pub primary: Color,
    pub secondary: Color,
    pub left_logo: Option<LogoSource>,
    pub right_logo: Option<LogoSource>,
}

impl Default for BrandConfig {
    fn default() -> Self {
        Self {
            dashboard: "Powerhouse Dashboard".to_string(),
            organization: "PETPAK & GPAK".to_string(),
            team: "Technical Analytics Team".to_string(),
            primary: Color::rgb(0xFF, 0x6A, 0x2C),
            secondary: Color::rgb(0x1E, 0x3A, 0x8A),
            left_logo: None,
            right_logo: None,
        }
    }
}

impl BrandConfig {
    /// `"<dashboard> — <organization>"`
    pub fn subtitle(&self) -> String {
        format!("{} \u{2014} {}", self.dashboard, self.organization)
    }
}

/// Which sections the consolidated report covers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// In report order.
    pub sections: Vec<String>,
    /// Never part of the report, even when listed.
    pub excluded: String,
    /// A section that, once it has charts, is exported on its own instead.
    pub combined_section: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            sections: DEFAULT_REPORT_SECTIONS.iter().map(|s| s.to_string()).collect(),
            excluded: "Forecasting".to_string(),
            combined_section: "Report".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    pub brand: BrandConfig,
    pub raster: RasterConfig,
    pub report: ReportConfig,
    /// Lifetime of prepared charts in the render cache.
    pub cache_ttl_secs: u64,
    /// Directory that relative logo paths resolve against.
    #[serde(skip)]
    pub base_dir: Option<PathBuf>,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            brand: BrandConfig::default(),
            raster: RasterConfig::default(),
            report: ReportConfig::default(),
            cache_ttl_secs: 300,
            base_dir: None,
        }
    }
}

impl ExportConfig {
    pub fn from_json(json: &str) -> Result<Self, ExportError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Loads a JSON configuration file; logo paths in it are relative to the file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ExportError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|e| {
            ExportError::Config(format!("Failed to read config from '{}': {}", path.display(), e))
        })?;
        let mut config = Self::from_json(&source)?;
        config.base_dir = path.parent().map(Path::to_path_buf);
        Ok(config)
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }
}
