use std::path::PathBuf;

const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub port: u16,
    /// Built frontend bundle (`index.html` plus hashed assets).
    pub dist_dir: PathBuf,
    /// Hand-maintained static files served under `/static`.
    pub static_dir: PathBuf,
    pub log_filter: String,
    /// Unparseable `PORT` value, reported once logging is up.
    pub rejected_port: Option<String>,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from an arbitrary key lookup so tests don't touch the
    /// process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut rejected_port = None;
        let port = match lookup("PORT") {
            Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
                rejected_port = Some(raw);
                DEFAULT_PORT
            }),
            None => DEFAULT_PORT,
        };
        ServerConfig {
            port,
            rejected_port,
            dist_dir: PathBuf::from(lookup("DIST_DIR").unwrap_or_else(|| "dist".to_string())),
            static_dir: PathBuf::from(lookup("STATIC_DIR").unwrap_or_else(|| "assets".to_string())),
            log_filter: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let cfg = ServerConfig::from_lookup(|_| None);
        assert_eq!(cfg.port, 3000);
        assert_eq!(cfg.dist_dir, PathBuf::from("dist"));
        assert_eq!(cfg.static_dir, PathBuf::from("assets"));
        assert_eq!(cfg.log_filter, "info");
        assert_eq!(cfg.bind_addr(), "0.0.0.0:3000");
    }

    #[test]
    fn test_overrides() {
        let cfg = ServerConfig::from_lookup(lookup_from(&[
            ("PORT", "8080"),
            ("DIST_DIR", "/srv/dist"),
            ("STATIC_DIR", "/srv/static"),
            ("RUST_LOG", "debug"),
        ]));
        assert_eq!(cfg.port, 8080);
        assert_eq!(cfg.dist_dir, PathBuf::from("/srv/dist"));
        assert_eq!(cfg.static_dir, PathBuf::from("/srv/static"));
        assert_eq!(cfg.log_filter, "debug");
        assert_eq!(cfg.rejected_port, None);
    }

    #[test]
    fn test_invalid_port_falls_back() {
        let cfg = ServerConfig::from_lookup(lookup_from(&[("PORT", "not-a-port")]));
        assert_eq!(cfg.port, 3000);
        assert_eq!(cfg.rejected_port.as_deref(), Some("not-a-port"));
    }
}
