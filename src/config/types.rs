//! Configuration types for campus-partners.

use serde::{Deserialize, Serialize};

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
/// Offers per listing page.
pub const DEFAULT_PAGE_SIZE: u32 = 9;
/// Branches per store page.
pub const DEFAULT_STORE_PAGE_SIZE: u32 = 6;

// ============================================================================
// Unified Application Configuration
// ============================================================================

/// Unified application configuration that can be loaded from CLI args or config files.
///
/// This is the top-level configuration struct that aggregates all configuration
/// options. It can be constructed from CLI arguments, config files, or both
/// (with CLI overriding file settings).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Backend endpoint configuration
    pub api: ApiConfig,
    /// Facet vocabularies and page sizes
    pub catalog: CatalogConfig,
    /// TUI-specific configuration
    pub tui: TuiConfig,
}

impl AppConfig {
    /// Create a new `AppConfig` with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

// ============================================================================
// API Configuration
// ============================================================================

/// Backend endpoint configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// API origin, e.g. `https://partners.example.edu`. Commands that talk
    /// to the backend fail with a config error when this is unset; the
    /// `--sample` flag runs without it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

// ============================================================================
// Catalog Configuration
// ============================================================================

/// Facet vocabularies and page sizes.
///
/// The vocabularies drive both the filter menus and the canonical encoding
/// order of selected tags; campuses can replace them wholesale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Organization facet options
    pub organizations: Vec<String>,
    /// Category facet options
    pub categories: Vec<String>,
    /// Benefit-type facet options
    pub benefit_types: Vec<String>,
    /// Offers per listing page
    pub page_size: u32,
    /// Branches per store page
    pub store_page_size: u32,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            organizations: vec![
                "총학생회".to_string(),
                "공과대학".to_string(),
                "인문대학".to_string(),
                "동아리연합회".to_string(),
            ],
            categories: vec![
                "음식".to_string(),
                "카페".to_string(),
                "생활".to_string(),
                "문화".to_string(),
            ],
            benefit_types: vec![
                "할인".to_string(),
                "증정".to_string(),
                "이벤트".to_string(),
            ],
            page_size: DEFAULT_PAGE_SIZE,
            store_page_size: DEFAULT_STORE_PAGE_SIZE,
        }
    }
}

// ============================================================================
// TUI Configuration
// ============================================================================

/// TUI-specific configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TuiConfig {
    /// Theme name: "dark" or "light"
    pub theme: String,
    /// Enable mouse support (outside-click dismissal needs it)
    pub mouse_enabled: bool,
    /// Milliseconds between animation ticks
    pub tick_rate_ms: u64,
}

impl Default for TuiConfig {
    fn default() -> Self {
        Self {
            theme: "dark".to_string(),
            mouse_enabled: true,
            tick_rate_ms: 250,
        }
    }
}
