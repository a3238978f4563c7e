use std::path::PathBuf;

/// Largest page the listing endpoint will return.
pub const MAX_PAGE_LIMIT: usize = 1000;

/// Service configuration parsed from environment variables.
#[derive(Debug, Clone)]
pub struct CatalogueConfig {
    /// Server listen port.
    pub port: u16,
    /// Server bind host.
    pub host: String,
    /// Directory `--write` puts the catalogue files in.
    pub output_dir: PathBuf,
    /// File name for the plain catalogue.
    pub base_file: String,
    /// File name for the catalogue crossed with check/mate suffixes.
    pub suffixed_file: String,
    /// Default page size for listings.
    pub page_limit: usize,
}

impl CatalogueConfig {
    /// Load configuration from environment variables with defaults.
    pub fn from_env() -> Self {
        let defaults = CatalogueConfig::default();
        CatalogueConfig {
            port: std::env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.port),
            host: std::env::var("HOST").unwrap_or(defaults.host),
            output_dir: std::env::var("SAN_OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.output_dir),
            base_file: std::env::var("SAN_BASE_FILE").unwrap_or(defaults.base_file),
            suffixed_file: std::env::var("SAN_SUFFIXED_FILE").unwrap_or(defaults.suffixed_file),
            page_limit: std::env::var("SAN_PAGE_LIMIT")
                .ok()
                .and_then(|v| v.parse::<usize>().ok())
                .filter(|&n| n > 0)
                .map(|n| n.min(MAX_PAGE_LIMIT))
                .unwrap_or(defaults.page_limit),
        }
    }

    /// Socket address string for binding.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for CatalogueConfig {
    fn default() -> Self {
        CatalogueConfig {
            port: 8083,
            host: "0.0.0.0".to_string(),
            output_dir: PathBuf::from("."),
            base_file: "san_strings.txt".to_string(),
            suffixed_file: "san_strings_with_symbols.txt".to_string(),
            page_limit: 100,
        }
    }
}
