use anyhow::Error;
use confique::Config;
use std::{
    net::IpAddr,
    sync::{Arc, OnceLock},
};

#[derive(Debug, Config)]
pub struct SheetVizConfig {
    #[config(env = "SHEETVIZ_PORT", default = 3000)]
    pub port: u16,
    #[config(env = "SHEETVIZ_ENDPOINT", default = "127.0.0.1")]
    pub endpoint: IpAddr,

    /// Largest accepted upload.
    #[config(env = "SHEETVIZ_HTTP_BODY_LIMIT", default = "5MiB")]
    pub http_body_limit: String,

    #[config(env = "SHEETVIZ_HTTP_SERVER_TIMEOUT_SECONDS", default = 30)]
    pub http_server_timeout_seconds: u64,

    #[config(env = "SHEETVIZ_STORAGE_CONNECTION_STRING", default = "memory:")]
    pub storage_connection_string: String,

    #[config(env = "SHEETVIZ_SENTRY_DSN")]
    pub sentry_dsn: Option<String>,
}

impl SheetVizConfig {
    pub fn load() -> Result<SheetVizConfig, Error> {
        let c = SheetVizConfig::builder()
            .env()
            .file("settings.toml")
            .load()?;

        Ok(c)
    }

    pub fn parse_http_body_limit(&self) -> Result<usize, Error> {
        let size = byte_unit::Byte::parse_str(self.http_body_limit.clone(), true)?.as_u64();
        if size > 1024 * 1024 * 1024 {
            anyhow::bail!("Body size is too big: > 1GiB");
        }
        Ok(size as usize)
    }
}

static SHEETVIZ_CONFIG: OnceLock<Arc<SheetVizConfig>> = OnceLock::new();

pub fn get() -> Result<Arc<SheetVizConfig>, Error> {
    SHEETVIZ_CONFIG.get().cloned().ok_or_else(|| {
        Error::msg(
            "Configuration not loaded. Please call load_configuration() before using the configuration",
        )
    })
}

pub fn load_configuration() -> Result<(), Error> {
    // Check if the configuration has already been loaded
    if SHEETVIZ_CONFIG.get().is_some() {
        return Ok(());
    }

    let config = SheetVizConfig::load()?;
    SHEETVIZ_CONFIG.get_or_init(|| Arc::new(config));

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_load_config() {
        let config = SheetVizConfig::load().unwrap();

        assert_eq!(config.port, 3000);
        assert_eq!(config.endpoint, IpAddr::from([127, 0, 0, 1]));
        assert_eq!(config.storage_connection_string, "memory:");
        assert!(config.sentry_dsn.is_none());

        temp_env::with_var("SHEETVIZ_PORT", Some("8080"), || {
            let config = SheetVizConfig::load().unwrap();
            assert_eq!(config.port, 8080);
        });
    }

    #[test]
    #[serial]
    fn test_parse_http_body_limit() {
        let config = SheetVizConfig::load().unwrap();
        assert_eq!(config.parse_http_body_limit().unwrap(), 5 * 1024 * 1024);

        temp_env::with_var("SHEETVIZ_HTTP_BODY_LIMIT", Some("12345"), || {
            let config = SheetVizConfig::load().unwrap();
            assert_eq!(config.parse_http_body_limit().unwrap(), 12345);
        });

        temp_env::with_var("SHEETVIZ_HTTP_BODY_LIMIT", Some("10mb"), || {
            let config = SheetVizConfig::load().unwrap();
            assert_eq!(config.parse_http_body_limit().unwrap(), 10000000);
        });

        temp_env::with_var("SHEETVIZ_HTTP_BODY_LIMIT", Some("2gb"), || {
            let config = SheetVizConfig::load().unwrap();
            assert!(config.parse_http_body_limit().is_err());
        });

        temp_env::with_var("SHEETVIZ_HTTP_BODY_LIMIT", Some("-5mb"), || {
            let config = SheetVizConfig::load().unwrap();
            assert!(config.parse_http_body_limit().is_err());
        });
    }

    #[test]
    #[serial]
    fn test_load_configuration() {
        load_configuration().unwrap();
        let config = get().unwrap();
        assert_eq!(config.http_server_timeout_seconds, 30);
    }
}
