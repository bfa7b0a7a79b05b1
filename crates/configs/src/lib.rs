use anyhow::anyhow;
use anyhow::Result;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default = "ServerConfig::html_default")]
    pub html_server: ServerConfig,
    #[serde(default = "ServerConfig::json_default")]
    pub json_server: ServerConfig,
    #[serde(default)]
    pub client: ClientConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
    /// Static file tree served as the fallback route.
    #[serde(default = "default_static_dir")]
    pub static_dir: String,
    /// JSON array of records behind `/users`.
    #[serde(default = "default_users_file")]
    pub users_file: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_echo_url")]
    pub echo_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_ping_targets")]
    pub ping_targets: Vec<String>,
    #[serde(default = "default_fanout_rounds")]
    pub fanout_rounds: usize,
}

fn default_host() -> String { "127.0.0.1".into() }
fn default_static_dir() -> String { "static".into() }
fn default_users_file() -> String { "users.json".into() }
fn default_base_url() -> String { "https://jsonplaceholder.typicode.com".into() }
fn default_echo_url() -> String { "https://httpbin.org/post".into() }
fn default_timeout_secs() -> u64 { 5 }
fn default_fanout_rounds() -> usize { 10 }
fn default_ping_targets() -> Vec<String> {
    vec![
        "http://localhost:8081/ping".into(),
        "http://localhost:8082/ping".into(),
    ]
}

impl ServerConfig {
    fn with_port(port: u16) -> Self {
        Self {
            host: default_host(),
            port,
            worker_threads: Some(4),
            static_dir: default_static_dir(),
            users_file: default_users_file(),
        }
    }

    pub fn html_default() -> Self { Self::with_port(8081) }

    pub fn json_default() -> Self { Self::with_port(8082) }

    /// Origin the server names itself by in greetings and ping replies.
    pub fn public_origin(&self) -> String {
        format!("http://localhost:{}", self.port)
    }

    fn normalize(&mut self, section: &str) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = default_host();
        }
        if self.port == 0 {
            return Err(anyhow!("{section}.port must be in 1..=65535"));
        }
        match self.worker_threads {
            Some(w) if w > 0 => {}
            _ => self.worker_threads = Some(4),
        }
        Ok(())
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            echo_url: default_echo_url(),
            timeout_secs: default_timeout_secs(),
            ping_targets: default_ping_targets(),
            fanout_rounds: default_fanout_rounds(),
        }
    }
}

impl ClientConfig {
    fn validate(&self) -> Result<()> {
        if self.base_url.trim().is_empty() {
            return Err(anyhow!("client.base_url is empty"));
        }
        if self.timeout_secs == 0 {
            return Err(anyhow!("client.timeout_secs must be a positive number of seconds"));
        }
        if self.ping_targets.is_empty() {
            return Err(anyhow!("client.ping_targets must list at least one url"));
        }
        if self.fanout_rounds == 0 {
            return Err(anyhow!("client.fanout_rounds must be >= 1"));
        }
        Ok(())
    }
}

pub fn load_default() -> Result<AppConfig> {
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
    load_from_file(&path)
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    parse(&content)
}

pub fn parse(content: &str) -> Result<AppConfig> {
    let cfg: AppConfig = toml::from_str(content)?;
    Ok(cfg)
}

impl AppConfig {
    pub fn load_and_validate() -> Result<Self> {
        let mut cfg = load_default()?;
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    /// Config file when present; otherwise defaults overridden by
    /// `SERVER_HOST`, `HTML_PORT` and `JSON_PORT`.
    pub fn load_or_env() -> Result<Self> {
        match Self::load_and_validate() {
            Ok(cfg) => Ok(cfg),
            Err(e) if is_missing_file(&e) => {
                let mut cfg = Self::default_with_env();
                cfg.normalize_and_validate()?;
                Ok(cfg)
            }
            Err(e) => Err(e),
        }
    }

    fn default_with_env() -> Self {
        let mut cfg = AppConfig::default();
        if let Ok(host) = std::env::var("SERVER_HOST") {
            cfg.html_server.host = host.clone();
            cfg.json_server.host = host;
        }
        if let Some(p) = env_port("HTML_PORT") { cfg.html_server.port = p; }
        if let Some(p) = env_port("JSON_PORT") { cfg.json_server.port = p; }
        cfg
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.html_server.normalize("html_server")?;
        self.json_server.normalize("json_server")?;
        self.client.validate()?;
        Ok(())
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            html_server: ServerConfig::html_default(),
            json_server: ServerConfig::json_default(),
            client: ClientConfig::default(),
        }
    }
}

fn env_port(key: &str) -> Option<u16> {
    std::env::var(key).ok().and_then(|p| p.parse::<u16>().ok())
}

fn is_missing_file(e: &anyhow::Error) -> bool {
    e.downcast_ref::<std::io::Error>()
        .map(|io| io.kind() == std::io::ErrorKind::NotFound)
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_yields_defaults() {
        let mut cfg = parse("").unwrap();
        cfg.normalize_and_validate().unwrap();
        assert_eq!(cfg.html_server.port, 8081);
        assert_eq!(cfg.json_server.port, 8082);
        assert_eq!(cfg.json_server.users_file, "users.json");
        assert_eq!(cfg.client.timeout_secs, 5);
        assert_eq!(cfg.client.fanout_rounds, 10);
        assert_eq!(cfg.client.ping_targets.len(), 2);
    }

    #[test]
    fn sections_override_defaults() {
        let mut cfg = parse(
            r#"
            [html_server]
            host = "  "
            port = 9001
            static_dir = "public"

            [json_server]
            port = 9002
            worker_threads = 0
            users_file = "data/users.json"

            [client]
            ping_targets = ["http://localhost:9001/ping"]
            fanout_rounds = 3
            "#,
        )
        .unwrap();
        cfg.normalize_and_validate().unwrap();
        assert_eq!(cfg.html_server.host, "127.0.0.1");
        assert_eq!(cfg.html_server.static_dir, "public");
        assert_eq!(cfg.html_server.public_origin(), "http://localhost:9001");
        assert_eq!(cfg.json_server.worker_threads, Some(4));
        assert_eq!(cfg.json_server.users_file, "data/users.json");
        assert_eq!(cfg.client.fanout_rounds, 3);
    }

    #[test]
    fn rejects_port_zero_and_empty_targets() {
        let mut cfg = parse("[json_server]\nport = 0\n").unwrap();
        assert!(cfg.normalize_and_validate().is_err());

        let mut cfg = parse("[client]\nping_targets = []\n").unwrap();
        assert!(cfg.normalize_and_validate().is_err());

        let mut cfg = parse("[client]\nfanout_rounds = 0\n").unwrap();
        assert!(cfg.normalize_and_validate().is_err());
    }

    #[test]
    fn missing_file_is_detected() {
        let path = std::env::temp_dir().join(format!("config_{}.toml", uuid::Uuid::new_v4()));
        let err = load_from_file(path.to_str().unwrap()).unwrap_err();
        assert!(is_missing_file(&err));
    }
}
