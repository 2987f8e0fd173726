use std::net::SocketAddr;

use tracing::level_filters::LevelFilter;

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// HTTP port to listen on.
    pub port: u16,

    /// Log level for tracing (e.g. "info", "debug").
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// All interfaces, configured port.
    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::from(([0, 0, 0, 0], self.port))
    }

    /// Unknown names fall back to INFO.
    pub fn level_filter(&self) -> LevelFilter {
        match self.log_level.to_lowercase().as_str() {
            "trace" => LevelFilter::TRACE,
            "debug" => LevelFilter::DEBUG,
            "info"  => LevelFilter::INFO,
            "warn"  => LevelFilter::WARN,
            "error" => LevelFilter::ERROR,
            _ => LevelFilter::INFO,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_listen_on_8080() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.listen_addr().to_string(), "0.0.0.0:8080");
        assert_eq!(cfg.level_filter(), LevelFilter::INFO);
    }

    #[test]
    fn level_names_are_case_insensitive() {
        let cfg = AppConfig {
            log_level: "DEBUG".into(),
            ..AppConfig::default()
        };
        assert_eq!(cfg.level_filter(), LevelFilter::DEBUG);

        let cfg = AppConfig {
            log_level: "loud".into(),
            ..AppConfig::default()
        };
        assert_eq!(cfg.level_filter(), LevelFilter::INFO);
    }
}
