//! Layered configuration: YAML file under CLI flags.
//!
//! [`AppConfig`] carries the API endpoint, the facet vocabularies with
//! their page sizes, and the TUI settings. A config file is discovered
//! in standard locations (see [`discover_config_file`]) and CLI flags
//! are merged over whatever it provided.
//!
//! ```rust,ignore
//! use campus_partners::config::{load_or_default, AppConfig};
//!
//! let (config, loaded_from) = load_or_default(None);
//! assert_eq!(config.catalog.page_size, AppConfig::default().catalog.page_size);
//! ```
//!
//! A minimal `.campus-partners.yaml` in the project root or
//! `~/.config/campus-partners/`:
//!
//! ```yaml
//! api:
//!   base_url: https://partners.example.edu
//! catalog:
//!   page_size: 9
//! ```

pub mod file;
mod types;

pub use types::{ApiConfig, AppConfig, CatalogConfig, TuiConfig};

pub use file::{
    discover_config_file, generate_example_config, generate_full_example_config, load_config_file,
    load_or_default, ConfigFileError,
};
