//! Configuration file discovery, loading, and layering.
//!
//! Config comes from a YAML file found by walking standard locations; CLI
//! flags are merged on top so a flag always beats the file.

use std::path::{Path, PathBuf};

use thiserror::Error;

use super::types::AppConfig;

/// Recognized config file names, checked in order.
const CONFIG_FILE_NAMES: &[&str] = &[
    ".campus-partners.yaml",
    ".campus-partners.yml",
    "campus-partners.yaml",
    "campus-partners.yml",
];

/// Error type for config file operations.
#[derive(Debug, Error)]
pub enum ConfigFileError {
    #[error("config file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Parse(#[from] serde_yaml_ng::Error),
}

// ============================================================================
// Discovery
// ============================================================================

/// Find the config file to use.
///
/// An existing explicit path wins. Otherwise the recognized names are
/// tried in the current directory, the enclosing git repository root,
/// the user config directory (`~/.config/campus-partners/`), and the
/// home directory, in that order.
#[must_use]
pub fn discover_config_file(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        if path.exists() {
            return Some(path.to_path_buf());
        }
    }
    search_dirs().iter().find_map(|dir| find_config_in_dir(dir))
}

/// Directories searched for a config file, best first.
fn search_dirs() -> Vec<PathBuf> {
    let mut candidates = Vec::with_capacity(4);
    if let Ok(cwd) = std::env::current_dir() {
        candidates.push(cwd.clone());
        if let Some(root) = git_root_above(&cwd) {
            candidates.push(root);
        }
    }
    if let Some(config_dir) = dirs::config_dir() {
        candidates.push(config_dir.join("campus-partners"));
    }
    if let Some(home) = dirs::home_dir() {
        candidates.push(home);
    }
    candidates
}

/// First recognized config file name present in `dir`.
fn find_config_in_dir(dir: &Path) -> Option<PathBuf> {
    CONFIG_FILE_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.exists())
}

/// Nearest ancestor of `start` (including itself) containing `.git`.
fn git_root_above(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| dir.join(".git").exists())
        .map(Path::to_path_buf)
}

// ============================================================================
// Loading
// ============================================================================

/// Load an `AppConfig` from a YAML file.
pub fn load_config_file(path: &Path) -> Result<AppConfig, ConfigFileError> {
    if !path.exists() {
        return Err(ConfigFileError::NotFound(path.to_path_buf()));
    }
    Ok(serde_yaml_ng::from_str(&std::fs::read_to_string(path)?)?)
}

/// Load config from the discovered file, or fall back to defaults.
///
/// A file that exists but fails to load is logged and skipped; a broken
/// config file should not take the whole CLI down.
#[must_use]
pub fn load_or_default(explicit_path: Option<&Path>) -> (AppConfig, Option<PathBuf>) {
    let Some(path) = discover_config_file(explicit_path) else {
        return (AppConfig::default(), None);
    };
    match load_config_file(&path) {
        Ok(config) => (config, Some(path)),
        Err(e) => {
            tracing::warn!("ignoring config at {}: {e}", path.display());
            (AppConfig::default(), None)
        }
    }
}

// ============================================================================
// Layering
// ============================================================================

impl AppConfig {
    /// Merge another config into this one, with `other` taking precedence.
    ///
    /// Only fields of `other` that differ from the defaults are copied,
    /// so an untouched CLI flag cannot clobber a value from the file.
    pub fn merge(&mut self, other: &Self) {
        let defaults = Self::default();

        if other.api.base_url.is_some() {
            self.api.base_url.clone_from(&other.api.base_url);
        }
        if other.api.timeout_secs != defaults.api.timeout_secs {
            self.api.timeout_secs = other.api.timeout_secs;
        }

        if other.catalog.organizations != defaults.catalog.organizations {
            self.catalog
                .organizations
                .clone_from(&other.catalog.organizations);
        }
        if other.catalog.categories != defaults.catalog.categories {
            self.catalog.categories.clone_from(&other.catalog.categories);
        }
        if other.catalog.benefit_types != defaults.catalog.benefit_types {
            self.catalog
                .benefit_types
                .clone_from(&other.catalog.benefit_types);
        }
        if other.catalog.page_size != defaults.catalog.page_size {
            self.catalog.page_size = other.catalog.page_size;
        }
        if other.catalog.store_page_size != defaults.catalog.store_page_size {
            self.catalog.store_page_size = other.catalog.store_page_size;
        }

        if other.tui.theme != defaults.tui.theme {
            self.tui.theme.clone_from(&other.tui.theme);
        }
        // Mouse defaults to on, so only an explicit off can win here.
        if !other.tui.mouse_enabled {
            self.tui.mouse_enabled = false;
        }
        if other.tui.tick_rate_ms != defaults.tui.tick_rate_ms {
            self.tui.tick_rate_ms = other.tui.tick_rate_ms;
        }
    }

    /// Load from file and merge with CLI overrides.
    #[must_use]
    pub fn from_file_with_overrides(
        config_path: Option<&Path>,
        cli_overrides: &Self,
    ) -> (Self, Option<PathBuf>) {
        let (mut config, loaded_from) = load_or_default(config_path);
        config.merge(cli_overrides);
        (config, loaded_from)
    }
}

// ============================================================================
// Example Config Generation
// ============================================================================

/// Generate an example config file content.
#[must_use]
pub fn generate_example_config() -> String {
    let example = AppConfig::default();
    format!(
        r"# Campus Partners Configuration
# Place this file at .campus-partners.yaml in your project root or ~/.config/campus-partners/

{}
",
        serde_yaml_ng::to_string(&example).unwrap_or_default()
    )
}

/// Generate a commented example config with all options.
#[must_use]
pub fn generate_full_example_config() -> String {
    r#"# Campus Partners Configuration File
# ==================================
#
# This file configures campus-partners behavior. Place it at:
#   - .campus-partners.yaml in your project root
#   - ~/.config/campus-partners/campus-partners.yaml for global config
#
# CLI arguments always override file settings.

# Backend endpoint
api:
  # API origin. Can also be set with CAMPUS_PARTNERS_API_BASE or --base-url.
  # base_url: https://partners.example.edu
  # Request timeout in seconds
  timeout_secs: 30

# Facet vocabularies and page sizes
catalog:
  # Organization facet options, in display and encoding order
  organizations:
    - "총학생회"
    - "공과대학"
    - "인문대학"
    - "동아리연합회"
  # Category facet options
  categories:
    - "음식"
    - "카페"
    - "생활"
    - "문화"
  # Benefit-type facet options
  benefit_types:
    - "할인"
    - "증정"
    - "이벤트"
  # Offers per listing page
  page_size: 9
  # Branches per store page
  store_page_size: 6

# TUI configuration
tui:
  # Theme: dark, light
  theme: dark
  # Mouse support (click-outside closes open filter menus)
  mouse_enabled: true
  # Milliseconds between animation ticks
  tick_rate_ms: 250
"#
    .to_string()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_config(dir: &Path, name: &str, yaml: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, yaml).unwrap();
        path
    }

    #[test]
    fn directory_search_takes_the_first_recognized_name() {
        let tmp = TempDir::new().unwrap();
        write_config(tmp.path(), "campus-partners.yaml", "api:\n  timeout_secs: 5\n");
        let dotted = write_config(tmp.path(), ".campus-partners.yaml", "{}");

        // The dotted name is listed first, so it wins over the plain one.
        assert_eq!(find_config_in_dir(tmp.path()), Some(dotted));
        assert_eq!(find_config_in_dir(&tmp.path().join("empty")), None);
    }

    #[test]
    fn explicit_path_wins_when_it_exists() {
        let tmp = TempDir::new().unwrap();
        let custom = write_config(tmp.path(), "anything.yaml", "api:\n  timeout_secs: 5\n");

        assert_eq!(discover_config_file(Some(&custom)), Some(custom));
    }

    #[test]
    fn git_root_is_found_from_a_nested_directory() {
        let tmp = TempDir::new().unwrap();
        std::fs::create_dir(tmp.path().join(".git")).unwrap();
        let nested = tmp.path().join("src").join("api");
        std::fs::create_dir_all(&nested).unwrap();

        assert_eq!(git_root_above(&nested), Some(tmp.path().to_path_buf()));
    }

    #[test]
    fn partial_file_leaves_other_fields_at_defaults() {
        let tmp = TempDir::new().unwrap();
        let path = write_config(
            tmp.path(),
            "config.yaml",
            "api:\n  base_url: https://partners.example.edu\n  timeout_secs: 10\ncatalog:\n  page_size: 12\n",
        );

        let config = load_config_file(&path).unwrap();
        assert_eq!(
            config.api.base_url.as_deref(),
            Some("https://partners.example.edu")
        );
        assert_eq!(config.api.timeout_secs, 10);
        assert_eq!(config.catalog.page_size, 12);
        assert_eq!(config.catalog.store_page_size, 6);
    }

    #[test]
    fn missing_file_is_a_not_found_error() {
        let result = load_config_file(Path::new("/nonexistent/config.yaml"));
        assert!(matches!(result, Err(ConfigFileError::NotFound(_))));
    }

    #[test]
    fn broken_file_falls_back_to_defaults() {
        let tmp = TempDir::new().unwrap();
        let path = write_config(tmp.path(), "broken.yaml", "api: [not, a, mapping\n");

        assert!(load_config_file(&path).is_err());
        let (config, loaded_from) = load_or_default(Some(&path));
        assert_eq!(config, AppConfig::default());
        assert_eq!(loaded_from, None);
    }

    #[test]
    fn merge_layers_cli_flags_over_the_file() {
        let mut from_file: AppConfig = serde_yaml_ng::from_str(
            "api:\n  base_url: https://from-file.example.edu\ncatalog:\n  page_size: 12\n",
        )
        .unwrap();

        let mut cli = AppConfig::default();
        cli.api.base_url = Some("https://from-cli.example.edu".to_string());
        cli.tui.theme = "light".to_string();

        from_file.merge(&cli);

        assert_eq!(
            from_file.api.base_url.as_deref(),
            Some("https://from-cli.example.edu")
        );
        assert_eq!(from_file.tui.theme, "light");
        // Flags the user never touched keep the file values.
        assert_eq!(from_file.catalog.page_size, 12);
    }

    #[test]
    fn merging_a_default_config_changes_nothing() {
        let mut from_file: AppConfig = serde_yaml_ng::from_str(
            "api:\n  base_url: https://from-file.example.edu\ntui:\n  theme: light\n",
        )
        .unwrap();
        let before = from_file.clone();

        from_file.merge(&AppConfig::default());

        assert_eq!(from_file, before);
    }

    #[test]
    fn example_config_mentions_the_catalog_keys() {
        let example = generate_example_config();
        assert!(example.contains("catalog:"));
        assert!(example.contains("page_size"));
    }

    #[test]
    fn full_example_config_parses_to_the_defaults() {
        let full = generate_full_example_config();
        let config: AppConfig = serde_yaml_ng::from_str(&full).unwrap();
        assert_eq!(config, AppConfig::default());
    }
}
