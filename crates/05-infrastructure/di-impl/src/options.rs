//! 容器配置
//!
//! 使用 config crate 从可选的配置文件和 `DI_` 前缀的环境变量加载。

use infrastructure_common::{ConfigError, ConfigResult, Lifetime};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, error};

/// 容器配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContainerOptions {
    /// 根作用域名称
    pub name: String,
    /// `register_default` 使用的生命周期
    pub default_lifetime: Lifetime,
    /// 构建时是否执行自动注册
    pub auto_register: bool,
    /// 自动注册的 crate 名称，为空时注册全部
    pub auto_register_modules: Vec<String>,
    /// 日志配置
    pub logging: LoggingOptions,
}

impl Default for ContainerOptions {
    fn default() -> Self {
        Self {
            name: "root".to_string(),
            default_lifetime: Lifetime::Transient,
            auto_register: false,
            auto_register_modules: Vec::new(),
            logging: LoggingOptions::default(),
        }
    }
}

/// 日志配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingOptions {
    /// 是否由容器构建器初始化日志系统
    pub enabled: bool,
    /// 过滤指令，语法同 `RUST_LOG`
    pub level: String,
    /// 是否输出 JSON 格式
    pub json: bool,
}

impl Default for LoggingOptions {
    fn default() -> Self {
        Self {
            enabled: false,
            level: "info".to_string(),
            json: false,
        }
    }
}

impl ContainerOptions {
    /// 环境变量前缀
    pub const ENV_PREFIX: &'static str = "DI";
    /// 默认配置文件（不含扩展名）
    pub const DEFAULT_FILE: &'static str = "config/container";

    /// 从默认配置文件（可选）和环境变量加载
    pub fn load() -> ConfigResult<Self> {
        Self::build(config::File::with_name(Self::DEFAULT_FILE).required(false))
    }

    /// 从指定配置文件和环境变量加载
    pub fn from_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::FileNotFound {
                path: path.display().to_string(),
            });
        }
        Self::build(config::File::from(path).required(true))
    }

    fn build<F>(file: config::File<F, config::FileFormat>) -> ConfigResult<Self>
    where
        config::File<F, config::FileFormat>: config::Source + Send + Sync + 'static,
    {
        let settings = config::Config::builder()
            .add_source(file)
            .add_source(
                config::Environment::with_prefix(Self::ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("auto_register_modules"),
            )
            .build()
            .map_err(|e| {
                error!("容器配置构建失败: {}", e);
                ConfigError::ParseError {
                    source: Box::new(e),
                }
            })?;

        let options: Self = settings.try_deserialize().map_err(|e| {
            error!("容器配置绑定失败: {}", e);
            ConfigError::ParseError {
                source: Box::new(e),
            }
        })?;

        options.validate()?;
        debug!("容器配置加载成功: {:?}", options);
        Ok(options)
    }

    /// 验证配置
    pub fn validate(&self) -> ConfigResult<()> {
        if self.name.trim().is_empty() {
            return Err(ConfigError::ValidationError {
                message: "根作用域名称不能为空".to_string(),
            });
        }
        if self.auto_register_modules.iter().any(|m| m.trim().is_empty()) {
            return Err(ConfigError::ValidationError {
                message: "自动注册的模块名称不能为空".to_string(),
            });
        }
        if self.logging.level.trim().is_empty() {
            return Err(ConfigError::ValidationError {
                message: "日志级别不能为空".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_defaults() {
        let options = ContainerOptions::default();

        assert_eq!(options.name, "root");
        assert_eq!(options.default_lifetime, Lifetime::Transient);
        assert!(!options.auto_register);
        assert!(!options.logging.enabled);
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_from_toml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("container.toml");
        fs::write(
            &path,
            r#"
name = "app"
default_lifetime = "scoped"
auto_register = true
auto_register_modules = ["services"]

[logging]
level = "debug"
"#,
        )
        .unwrap();

        let options = ContainerOptions::from_file(&path).unwrap();

        assert_eq!(options.name, "app");
        assert_eq!(options.default_lifetime, Lifetime::Scoped);
        assert!(options.auto_register);
        assert_eq!(options.auto_register_modules, vec!["services".to_string()]);
        assert_eq!(options.logging.level, "debug");
        assert!(!options.logging.json);
    }

    #[test]
    fn test_missing_file() {
        let result = ContainerOptions::from_file("/nonexistent/container.toml");
        assert!(matches!(result, Err(ConfigError::FileNotFound { .. })));
    }

    #[test]
    fn test_validation_rejects_empty_name() {
        let options = ContainerOptions {
            name: "  ".to_string(),
            ..ContainerOptions::default()
        };
        assert!(matches!(
            options.validate(),
            Err(ConfigError::ValidationError { .. })
        ));
    }
}
