use std::env;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;
use crate::structs::awl_type::ApiKey;

const DEFAULT_CONFIG_PATH: &str = "config.toml";

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub oracle: OracleConfig,
    pub retry: RetryConfig,
    /// 覆盖内置答案表
    pub answers: Option<Vec<String>>,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct OracleConfig {
    pub api_key: Option<ApiKey>,
    pub fallback_api_key: Option<ApiKey>,
    pub api_keys: Vec<ApiKey>,
    pub model: String,
    pub base_url: String,
    pub request_timeout_secs: u64,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct RetryConfig {
    pub max_attempts: u32,
    pub retry_delay_secs: u64,
    pub rate_limit_cooldown_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            host: "0.0.0.0".to_string(),
            port: 5000,
            oracle: OracleConfig::default(),
            retry: RetryConfig::default(),
            answers: None,
        }
    }
}

impl Default for OracleConfig {
    fn default() -> Self {
        OracleConfig {
            api_key: None,
            fallback_api_key: None,
            api_keys: Vec::new(),
            model: "gemini-2.5-flash".to_string(),
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            request_timeout_secs: 30,
        }
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        RetryConfig {
            max_attempts: 3,
            retry_delay_secs: 2,
            rate_limit_cooldown_secs: 60,
        }
    }
}

/// 读取.env文件到环境变量，已存在的变量不会被覆盖，文件不存在时忽略
pub fn load_env_file(path: impl AsRef<Path>) -> Result<bool, dotenvy::Error> {
    match dotenvy::from_path(path.as_ref()) {
        Ok(()) => Ok(true),
        Err(e) if e.not_found() => Ok(false),
        Err(e) => Err(e),
    }
}

impl Config {
    /// 读取配置文件(可选)并用环境变量覆盖
    pub fn load() -> Result<Config, ConfigError> {
        let explicit = env::var("ANSWERGATE_CONFIG").ok();
        let path = explicit.clone().unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());
        let contents = match fs::read_to_string(&path) {
            Ok(contents) => Some(contents),
            // 没有配置文件时使用默认值，但显式指定的文件必须存在
            Err(e) if e.kind() == ErrorKind::NotFound && explicit.is_none() => {
                log::info!("未找到{path}，使用默认配置");
                None
            }
            Err(source) => return Err(ConfigError::Io { path, source }),
        };
        Config::from_sources(contents.as_deref(), |key| env::var(key).ok())
    }

    pub fn from_sources(
        file: Option<&str>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Config, ConfigError> {
        let mut config: Config = match file {
            Some(contents) => toml::from_str(contents)?,
            None => Config::default(),
        };

        if let Some(host) = env("HOST") {
            config.host = host;
        }
        if let Some(port) = env("PORT") {
            config.port = port
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidValue { key: "PORT", value: port })?;
        }
        if let Some(key) = env("GEMINI_API_KEY") {
            config.oracle.api_key = Some(key);
        }
        if let Some(key) = env("GEMINI_API_KEY_FALLBACK") {
            config.oracle.fallback_api_key = Some(key);
        }
        if let Some(model) = env("GEMINI_MODEL") {
            config.oracle.model = model;
        }

        if config.retry.max_attempts == 0 {
            return Err(ConfigError::ZeroAttempts);
        }
        if matches!(&config.answers, Some(answers) if answers.is_empty()) {
            return Err(ConfigError::EmptyAnswers);
        }
        Ok(config)
    }

    pub fn bind_address(&self) -> (String, u16) {
        (self.host.clone(), self.port)
    }
}

impl OracleConfig {
    /// 按顺序排列的全部密钥，去掉空值和重复值
    pub fn credentials(&self) -> Vec<ApiKey> {
        let mut keys: Vec<ApiKey> = Vec::new();
        let candidates = self
            .api_key
            .iter()
            .chain(self.fallback_api_key.iter())
            .chain(self.api_keys.iter());
        for key in candidates {
            let key = key.trim();
            if !key.is_empty() && !keys.iter().any(|k| k == key) {
                keys.push(key.to_string());
            }
        }
        keys
    }
}
