use clap::{ArgAction, Parser, builder::BoolishValueParser};
use s3_core::store::StorageSettings;
use std::error::Error;
use std::fmt;
use std::net::SocketAddr;

const DEFAULT_REGION: &str = "us-east-1";

#[derive(Parser, Debug)]
#[command(name = "s3-mcpd", version, about = "S3 MCP daemon.")]
struct CliArgs {
    #[arg(long, env = "S3_ACCESS_KEY", hide_env_values = true)]
    access_key: Option<String>,

    #[arg(long, env = "S3_SECRET_KEY", hide_env_values = true)]
    secret_key: Option<String>,

    #[arg(long, env = "S3_ENDPOINT")]
    endpoint: Option<String>,

    #[arg(long, env = "S3_BUCKET")]
    bucket: Option<String>,

    #[arg(long, env = "S3_REGION", default_value = DEFAULT_REGION)]
    region: String,

    #[arg(
        long,
        env = "S3_FORCE_PATH_STYLE",
        default_value_t = true,
        action = ArgAction::Set,
        value_parser = BoolishValueParser::new()
    )]
    force_path_style: bool,

    #[arg(long, env = "S3_MCP_HTTP_ADDR")]
    http_addr: Option<SocketAddr>,
}

/// Runtime configuration loaded from CLI arguments and environment variables.
#[derive(Clone, Debug)]
pub struct S3McpConfig {
    pub storage: StorageSettings,
    pub http_addr: Option<SocketAddr>,
}

#[derive(Debug)]
pub enum ConfigError {
    MissingSettings(Vec<&'static str>),
    InvalidSetting { name: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingSettings(names) => {
                write!(f, "missing required settings: {}", names.join(", "))
            }
            Self::InvalidSetting { name, value } => {
                write!(f, "invalid {name} value: {value}")
            }
        }
    }
}

impl Error for ConfigError {}

impl S3McpConfig {
    pub fn from_args() -> Result<Self, ConfigError> {
        let args = CliArgs::parse();
        Self::try_from(args)
    }
}

impl TryFrom<CliArgs> for S3McpConfig {
    type Error = ConfigError;

    fn try_from(args: CliArgs) -> Result<Self, Self::Error> {
        let mut missing = Vec::new();
        let mut require = |name: &'static str, value: Option<String>| {
            let value = value.filter(|value| !value.trim().is_empty());
            if value.is_none() {
                missing.push(name);
            }
            value.unwrap_or_default()
        };

        let access_key = require("S3_ACCESS_KEY", args.access_key);
        let secret_key = require("S3_SECRET_KEY", args.secret_key);
        let endpoint = require("S3_ENDPOINT", args.endpoint);
        let bucket = require("S3_BUCKET", args.bucket);

        if !missing.is_empty() {
            return Err(ConfigError::MissingSettings(missing));
        }

        if args.region.trim().is_empty() {
            return Err(ConfigError::InvalidSetting {
                name: "S3_REGION",
                value: args.region,
            });
        }

        Ok(Self {
            storage: StorageSettings {
                access_key,
                secret_key,
                endpoint,
                bucket,
                region: args.region,
                force_path_style: args.force_path_style,
            },
            http_addr: args.http_addr,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_args() -> CliArgs {
        CliArgs {
            access_key: Some("access".to_string()),
            secret_key: Some("secret".to_string()),
            endpoint: Some("http://localhost:9000".to_string()),
            bucket: Some("bucket".to_string()),
            region: DEFAULT_REGION.to_string(),
            force_path_style: true,
            http_addr: None,
        }
    }

    #[test]
    fn parses_complete_settings() {
        let config = S3McpConfig::try_from(base_args()).expect("config should parse");

        assert_eq!(config.storage.bucket, "bucket");
        assert_eq!(config.storage.region, DEFAULT_REGION);
        assert!(config.http_addr.is_none());
    }

    #[test]
    fn reports_every_missing_setting_at_once() {
        let mut args = base_args();
        args.access_key = None;
        args.bucket = Some("   ".to_string());

        let err = S3McpConfig::try_from(args).expect_err("config should be rejected");

        assert!(matches!(
            err,
            ConfigError::MissingSettings(ref names) if names == &["S3_ACCESS_KEY", "S3_BUCKET"]
        ));
        assert_eq!(
            err.to_string(),
            "missing required settings: S3_ACCESS_KEY, S3_BUCKET"
        );
    }

    #[test]
    fn rejects_blank_region() {
        let mut args = base_args();
        args.region = " ".to_string();

        let err = S3McpConfig::try_from(args).expect_err("blank region should be rejected");
        assert!(matches!(err, ConfigError::InvalidSetting { name: "S3_REGION", .. }));
    }

    #[test]
    fn cli_flags_parse() {
        let args = CliArgs::try_parse_from([
            "s3-mcpd",
            "--access-key",
            "a",
            "--secret-key",
            "s",
            "--endpoint",
            "http://minio:9000",
            "--bucket",
            "b",
            "--force-path-style",
            "false",
            "--http-addr",
            "127.0.0.1:4020",
        ])
        .expect("flags should parse");

        let config = S3McpConfig::try_from(args).expect("config should parse");
        assert!(!config.storage.force_path_style);
        assert_eq!(config.http_addr, Some("127.0.0.1:4020".parse().expect("valid addr")));
    }
}
