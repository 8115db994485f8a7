use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("读取配置失败: {0}")]
    Io(#[from] std::io::Error),
    #[error("解析配置失败: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("序列化配置失败: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// 应用配置
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub assistant: AssistantConfig,
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub console: ConsoleConfig,
    /// 应用名 → 可执行文件，优先于内置映射，如 "kod" = "code"
    #[serde(default)]
    pub applications: HashMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssistantConfig {
    /// 助手显示名，替换回复中的 {name}
    #[serde(default = "default_name")]
    pub name: String,
    /// 指令表没有命中时是否查询旧关键词表
    #[serde(default = "default_legacy_keywords")]
    pub legacy_keywords: bool,
}

/// 短语表路径，未设置时使用内置表
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DataConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commands: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub responses: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsoleConfig {
    #[serde(default = "default_prompt")]
    pub prompt: String,
    /// 启动时是否显示欢迎信息
    #[serde(default = "default_banner")]
    pub banner: bool,
}

fn default_name() -> String {
    "NOVA".to_string()
}
fn default_legacy_keywords() -> bool {
    true
}
fn default_prompt() -> String {
    "Du: ".to_string()
}
fn default_banner() -> bool {
    true
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            legacy_keywords: default_legacy_keywords(),
        }
    }
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            prompt: default_prompt(),
            banner: default_banner(),
        }
    }
}

/// 获取配置文件路径
pub fn config_path() -> PathBuf {
    let config_dir = dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("nova-assistant");
    config_dir.join("config.toml")
}

/// 加载默认位置的配置，文件不存在则创建默认配置
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from(&config_path())
}

pub fn load_config_from(path: &Path) -> Result<AppConfig, ConfigError> {
    if path.exists() {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    } else {
        let config = default_config();
        save_config_to(&config, path)?;
        log::info!("已创建默认配置: {}", path.display());
        Ok(config)
    }
}

/// 保存配置到文件
pub fn save_config_to(config: &AppConfig, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)?;
    fs::write(path, content)?;
    Ok(())
}

/// 默认配置
fn default_config() -> AppConfig {
    let mut applications = HashMap::new();
    applications.insert("kod".to_string(), "code".to_string());

    AppConfig {
        applications,
        ..AppConfig::default()
    }
}
