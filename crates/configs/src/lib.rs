use anyhow::anyhow;
use anyhow::Result;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub admin: AdminConfig,
    #[serde(default)]
    pub loadgen: LoadgenConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "0.0.0.0".into(), port: 8080, worker_threads: Some(4) }
    }
}

/// Transport middleware knobs.
#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    #[serde(default = "default_body_limit")]
    pub body_limit_bytes: usize,
    #[serde(default = "default_true")]
    pub compression: bool,
    #[serde(default = "default_true")]
    pub request_logging: bool,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self { body_limit_bytes: default_body_limit(), compression: true, request_logging: true }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "compact" | "text" => Ok(Self::Compact),
            "json" => Ok(Self::Json),
            other => Err(anyhow!("unknown log format: {other}")),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct LoggingConfig {
    #[serde(default)]
    pub format: LogFormat,
}

/// Side listener exposing `/healthz` and `/metrics`.
#[derive(Debug, Clone, Deserialize)]
pub struct AdminConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_admin_host")]
    pub host: String,
    #[serde(default = "default_admin_port")]
    pub port: u16,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self { enabled: false, host: default_admin_host(), port: default_admin_port() }
    }
}

/// One plateau of the load profile: `target` virtual users for `duration_secs`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct StageConfig {
    pub duration_secs: u64,
    pub target: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoadgenConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_stages")]
    pub stages: Vec<StageConfig>,
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_output")]
    pub output: String,
}

impl Default for LoadgenConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            stages: default_stages(),
            request_timeout_secs: default_request_timeout(),
            output: default_output(),
        }
    }
}

fn default_true() -> bool { true }
fn default_body_limit() -> usize { 2 * 1024 * 1024 }
fn default_admin_host() -> String { "127.0.0.1".into() }
fn default_admin_port() -> u16 { 9090 }
fn default_base_url() -> String { "http://localhost:8080".into() }
fn default_request_timeout() -> u64 { 10 }
fn default_output() -> String { "benchmark_results.json".into() }

// Alternating low/hard plateaus of 10 and 50 users.
fn default_stages() -> Vec<StageConfig> {
    [10, 50, 10, 50, 10, 50]
        .into_iter()
        .map(|target| StageConfig { duration_secs: 90, target })
        .collect()
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

    /// Config file if present, otherwise defaults overlaid with env vars.
    pub fn load_or_env() -> Result<Self> {
        match Self::load_and_validate() {
            Ok(cfg) => Ok(cfg),
            Err(e) if e.downcast_ref::<std::io::Error>().is_some() => {
                let mut cfg = Self::from_env();
                cfg.normalize_and_validate()?;
                Ok(cfg)
            }
            Err(e) => Err(e),
        }
    }

    /// Defaults with `SERVER_HOST`, `SERVER_PORT`, `TOKIO_WORKER_THREADS`,
    /// `LOG_FORMAT` and `LOADGEN_BASE_URL` applied when set.
    pub fn from_env() -> Self {
        let mut cfg = Self::default();
        if let Ok(host) = std::env::var("SERVER_HOST") {
            cfg.server.host = host;
        }
        if let Some(port) = std::env::var("SERVER_PORT").ok().and_then(|p| p.parse::<u16>().ok()) {
            cfg.server.port = port;
        }
        if let Some(w) = std::env::var("TOKIO_WORKER_THREADS").ok().and_then(|v| v.parse::<usize>().ok()) {
            cfg.server.worker_threads = Some(w);
        }
        if let Some(fmt) = std::env::var("LOG_FORMAT").ok().and_then(|v| v.parse::<LogFormat>().ok()) {
            cfg.logging.format = fmt;
        }
        if let Ok(url) = std::env::var("LOADGEN_BASE_URL") {
            cfg.loadgen.base_url = url;
        }
        cfg
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize()?;
        self.http.validate()?;
        self.admin.validate()?;
        self.loadgen.normalize_and_validate()?;
        Ok(())
    }
}

impl ServerConfig {
    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = "0.0.0.0".to_string();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be within 1..=65535"));
        }
        match self.worker_threads {
            Some(w) if w > 0 => {}
            _ => self.worker_threads = Some(4),
        }
        Ok(())
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl HttpConfig {
    fn validate(&self) -> Result<()> {
        if self.body_limit_bytes == 0 {
            return Err(anyhow!("http.body_limit_bytes must be > 0"));
        }
        Ok(())
    }
}

impl AdminConfig {
    fn validate(&self) -> Result<()> {
        if self.enabled && self.port == 0 {
            return Err(anyhow!("admin.port must be within 1..=65535"));
        }
        Ok(())
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl LoadgenConfig {
    fn normalize_and_validate(&mut self) -> Result<()> {
        let trimmed = self.base_url.trim().trim_end_matches('/');
        if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
            return Err(anyhow!("loadgen.base_url must start with http(s)://"));
        }
        self.base_url = trimmed.to_string();
        if self.stages.is_empty() {
            return Err(anyhow!("loadgen.stages must not be empty"));
        }
        if self.stages.iter().any(|s| s.duration_secs == 0) {
            return Err(anyhow!("loadgen stage durations must be positive seconds"));
        }
        if self.request_timeout_secs == 0 {
            return Err(anyhow!("loadgen.request_timeout_secs must be > 0"));
        }
        Ok(())
    }

    /// Largest concurrent user count across stages.
    pub fn max_vus(&self) -> usize {
        self.stages.iter().map(|s| s.target).max().unwrap_or(0)
    }

    pub fn total_duration_secs(&self) -> u64 {
        self.stages.iter().map(|s| s.duration_secs).sum()
    }
}
