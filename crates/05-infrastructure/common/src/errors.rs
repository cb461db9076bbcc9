//! 错误类型定义

use thiserror::Error;

/// 配置错误类型
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置文件不存在: {path}")]
    FileNotFound { path: String },

    #[error("配置解析失败: {source}")]
    ParseError {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("配置验证失败: {message}")]
    ValidationError { message: String },
}

/// 构造参数错误类型
///
/// 由 `Arguments` 的访问器产生，描述参数列表与构造函数签名不匹配的原因。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ArgumentError {
    #[error("参数数量不匹配: 期望 {expected}, 实际 {actual}")]
    ArityMismatch { expected: usize, actual: usize },

    #[error("参数类型不匹配: 位置 {index}, 期望 {expected}")]
    TypeMismatch { index: usize, expected: &'static str },

    #[error("缺少参数: 位置 {index}")]
    Missing { index: usize },
}

/// 依赖注入错误类型
#[derive(Error, Debug)]
pub enum DependencyError {
    #[error("组件未注册: {type_name}")]
    ComponentNotRegistered { type_name: String },

    #[error("没有匹配的构造函数: {type_name}, 原因: {source}")]
    ConstructorMismatch {
        type_name: String,
        #[source]
        source: ArgumentError,
    },

    #[error("解析结果类型不匹配: {type_name}")]
    TypeMismatch { type_name: String },
}

impl DependencyError {
    /// 创建组件未注册错误
    pub fn not_registered(type_name: impl Into<String>) -> Self {
        Self::ComponentNotRegistered {
            type_name: type_name.into(),
        }
    }

    /// 创建构造函数不匹配错误
    pub fn constructor_mismatch(type_name: impl Into<String>, source: ArgumentError) -> Self {
        Self::ConstructorMismatch {
            type_name: type_name.into(),
            source,
        }
    }

    /// 创建类型不匹配错误
    pub fn type_mismatch(type_name: impl Into<String>) -> Self {
        Self::TypeMismatch {
            type_name: type_name.into(),
        }
    }

    /// 是否为未注册错误
    pub fn is_not_registered(&self) -> bool {
        matches!(self, Self::ComponentNotRegistered { .. })
    }

    /// 是否为构造函数不匹配错误
    pub fn is_constructor_mismatch(&self) -> bool {
        matches!(self, Self::ConstructorMismatch { .. })
    }
}

/// 结果类型别名
pub type ConfigResult<T> = Result<T, ConfigError>;
pub type DependencyResult<T> = Result<T, DependencyError>;
pub type ArgumentResult<T> = Result<T, ArgumentError>;
