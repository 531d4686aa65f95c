use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::time::Duration;

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Server bind address
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Maximum request body size in KB
    #[serde(default = "default_max_body_size_kb")]
    pub max_body_size_kb: usize,

    /// Enable CORS (the form page is served from another origin)
    #[serde(default = "default_true")]
    pub enable_cors: bool,

    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Board platform API access
    #[serde(default)]
    pub monday: MondayConfig,

    /// Per-issue-type boards and column layouts
    #[serde(default)]
    pub destinations: DestinationConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            port: default_port(),
            timeout_secs: default_timeout_secs(),
            max_body_size_kb: default_max_body_size_kb(),
            enable_cors: default_true(),
            log_level: default_log_level(),
            monday: MondayConfig::default(),
            destinations: DestinationConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables and config files
    pub fn load() -> anyhow::Result<Self> {
        let builder = config::Config::builder()
            // Load from file if exists
            .add_source(config::File::with_name("intake").required(false))
            // Override with environment variables
            .add_source(config::Environment::with_prefix("INTAKE").separator("__"));

        let config: ServerConfig = builder.build()?.try_deserialize()?;

        if config.monday.api_key.is_none() {
            tracing::warn!(
                "No board API key configured; submissions will fail until INTAKE__MONDAY__API_KEY is set"
            );
        }

        Ok(config)
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        let addr_str = format!("{}:{}", self.bind_addr, self.port);
        Ok(addr_str.parse()?)
    }

    /// Get request timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Get max body size in bytes
    pub fn max_body_size(&self) -> usize {
        self.max_body_size_kb * 1024
    }
}

/// Access to the board platform's GraphQL API.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MondayConfig {
    /// GraphQL endpoint
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// API key. Required at request time; there is no default.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Outbound request timeout in seconds
    #[serde(default = "default_client_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for MondayConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            api_key: None,
            request_timeout_secs: default_client_timeout_secs(),
        }
    }
}

impl MondayConfig {
    /// Trimmed API key, if one is configured and non-blank.
    pub fn credential(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }

    /// Outbound request timeout as Duration
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Boards and column layouts, one set per issue type.
///
/// Board ids and column ids are opaque identifiers dictated by the external
/// platform. The defaults below match the deployed boards; every id can be
/// overridden through configuration, and the mapper never embeds any of them
/// as literals.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct DestinationConfig {
    #[serde(default)]
    pub boards: BoardIds,
    #[serde(default)]
    pub validation_columns: ValidationColumns,
    #[serde(default)]
    pub functional_issue_columns: FunctionalIssueColumns,
    #[serde(default)]
    pub data_request_columns: DataRequestColumns,
}

/// Target board per issue type.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BoardIds {
    /// Default board; Data Validation requests land here.
    #[serde(default = "default_validation_board")]
    pub validation: String,

    /// Functional Issue board
    #[serde(default = "default_functional_issue_board")]
    pub functional_issue: String,

    /// Data Request board; falls back to the default board when unset.
    #[serde(default)]
    pub data_request: Option<String>,
}

impl Default for BoardIds {
    fn default() -> Self {
        Self {
            validation: default_validation_board(),
            functional_issue: default_functional_issue_board(),
            data_request: None,
        }
    }
}

/// Column ids on the Data Validation board.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ValidationColumns {
    #[serde(default = "default_vc_email")]
    pub email: String,
    #[serde(default = "default_vc_functional_area")]
    pub functional_area: String,
    #[serde(default = "default_vc_description")]
    pub description: String,
    #[serde(default = "default_vc_target_columns")]
    pub target_columns: String,
    #[serde(default = "default_vc_expected_value")]
    pub expected_value: String,
    #[serde(default = "default_vc_data_filters")]
    pub data_filters: String,
    #[serde(default = "default_vc_platform_input")]
    pub platform_input: String,
    #[serde(default = "default_vc_assignees")]
    pub assignees: String,
}

impl Default for ValidationColumns {
    fn default() -> Self {
        Self {
            email: default_vc_email(),
            functional_area: default_vc_functional_area(),
            description: default_vc_description(),
            target_columns: default_vc_target_columns(),
            expected_value: default_vc_expected_value(),
            data_filters: default_vc_data_filters(),
            platform_input: default_vc_platform_input(),
            assignees: default_vc_assignees(),
        }
    }
}

/// Column ids on the Functional Issue board.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FunctionalIssueColumns {
    #[serde(default = "default_fc_description")]
    pub description: String,
    #[serde(default = "default_fc_submitter_name")]
    pub submitter_name: String,
    #[serde(default = "default_fc_submitter_email")]
    pub submitter_email: String,
    #[serde(default = "default_fc_status")]
    pub status: String,
    #[serde(default = "default_fc_assignees")]
    pub assignees: String,
    #[serde(default = "default_fc_date")]
    pub date: String,
}

impl Default for FunctionalIssueColumns {
    fn default() -> Self {
        Self {
            description: default_fc_description(),
            submitter_name: default_fc_submitter_name(),
            submitter_email: default_fc_submitter_email(),
            status: default_fc_status(),
            assignees: default_fc_assignees(),
            date: default_fc_date(),
        }
    }
}

/// Column ids on the Data Request board.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DataRequestColumns {
    #[serde(default = "default_dc_source")]
    pub source: String,
    #[serde(default = "default_dc_table_class")]
    pub table_class: String,
    #[serde(default = "default_dc_field_char")]
    pub field_char: String,
    #[serde(default = "default_dc_reason")]
    pub reason: String,
    #[serde(default = "default_dc_submitter_name")]
    pub submitter_name: String,
    #[serde(default = "default_dc_submitter_email")]
    pub submitter_email: String,
    #[serde(default = "default_dc_date")]
    pub date: String,
}

impl Default for DataRequestColumns {
    fn default() -> Self {
        Self {
            source: default_dc_source(),
            table_class: default_dc_table_class(),
            field_char: default_dc_field_char(),
            reason: default_dc_reason(),
            submitter_name: default_dc_submitter_name(),
            submitter_email: default_dc_submitter_email(),
            date: default_dc_date(),
        }
    }
}

fn default_bind_addr() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_max_body_size_kb() -> usize {
    256
}

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_api_url() -> String {
    "https://api.monday.com/v2".to_string()
}

fn default_client_timeout_secs() -> u64 {
    30
}

fn default_validation_board() -> String {
    "18391825440".to_string()
}

fn default_functional_issue_board() -> String {
    "18402117730".to_string()
}

fn default_vc_email() -> String {
    "email05ehfx6w".to_string()
}

fn default_vc_functional_area() -> String {
    "short_textjquy7y9s".to_string()
}

fn default_vc_description() -> String {
    "short_text1woq5j81".to_string()
}

fn default_vc_target_columns() -> String {
    "multi_selecteqcgsmbr".to_string()
}

fn default_vc_expected_value() -> String {
    "short_textn4h7mq9n".to_string()
}

fn default_vc_data_filters() -> String {
    "short_textee2me3mg".to_string()
}

fn default_vc_platform_input() -> String {
    "short_textgy3p8x4v".to_string()
}

fn default_vc_assignees() -> String {
    "multiple_person_mkyj1z0t".to_string()
}

fn default_fc_description() -> String {
    "long_textk5wd2r7n".to_string()
}

fn default_fc_submitter_name() -> String {
    "short_textvq81mh3c".to_string()
}

fn default_fc_submitter_email() -> String {
    "short_textw6y9jd3f".to_string()
}

fn default_fc_status() -> String {
    "statusq4hn7e2k".to_string()
}

fn default_fc_assignees() -> String {
    "multiple_person_mkyjt8wd".to_string()
}

fn default_fc_date() -> String {
    "datek5rv19mx".to_string()
}

fn default_dc_source() -> String {
    "short_textbp2u6s9h".to_string()
}

fn default_dc_table_class() -> String {
    "short_textcf4t1n8z".to_string()
}

fn default_dc_field_char() -> String {
    "short_textdh7w3q5j".to_string()
}

fn default_dc_reason() -> String {
    "long_textem9x4k2b".to_string()
}

fn default_dc_submitter_name() -> String {
    "short_textfn1z8v6r".to_string()
}

fn default_dc_submitter_email() -> String {
    "short_textgr5c2y7m".to_string()
}

fn default_dc_date() -> String {
    "dateh8kq36wt".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let cfg = ServerConfig::default();
        assert_eq!(cfg.port, 8080);
        assert_eq!(cfg.timeout_secs, 30);
        assert_eq!(cfg.max_body_size_kb, 256);
        assert!(cfg.enable_cors);
        assert_eq!(cfg.monday.api_url, "https://api.monday.com/v2");
        assert!(cfg.monday.api_key.is_none());
    }

    #[test]
    fn test_socket_addr() {
        let cfg = ServerConfig::default();
        let addr = cfg.socket_addr().unwrap();
        assert_eq!(addr.port(), 8080);
    }

    #[test]
    fn test_credential_rejects_blank_key() {
        let mut monday = MondayConfig::default();
        assert!(monday.credential().is_none());

        monday.api_key = Some("   ".to_string());
        assert!(monday.credential().is_none());

        monday.api_key = Some("  token  ".to_string());
        assert_eq!(monday.credential(), Some("token"));
    }

    #[test]
    fn test_board_defaults() {
        let boards = BoardIds::default();
        assert_eq!(boards.validation, "18391825440");
        assert!(boards.data_request.is_none());
        assert_ne!(boards.functional_issue, boards.validation);
    }
}
