//! 组件生命周期与作用域

use serde::{Deserialize, Serialize};
use std::fmt;

/// 组件生命周期类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lifetime {
    /// 瞬时模式 - 每次请求都创建新实例
    #[default]
    Transient,
    /// 作用域模式 - 每个首先解析它的分支创建并缓存一个实例
    Scoped,
    /// 单例模式 - 整棵容器树只在根节点创建一个实例
    Singleton,
}

impl fmt::Display for Lifetime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Transient => "transient",
            Self::Scoped => "scoped",
            Self::Singleton => "singleton",
        };
        f.write_str(name)
    }
}

/// 组件作用域
///
/// 标识容器树中的一个节点，仅用于诊断和日志。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scope {
    pub id: uuid::Uuid,
    pub name: String,
    /// 根节点深度为 0
    pub depth: usize,
}

impl Scope {
    /// 创建根作用域
    pub fn root(name: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4(),
            name: name.into(),
            depth: 0,
        }
    }

    /// 创建子作用域
    pub fn child(&self, name: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4(),
            name: format!("{}.{}", self.name, name.into()),
            depth: self.depth + 1,
        }
    }

    /// 是否为根作用域
    pub fn is_root(&self) -> bool {
        self.depth == 0
    }
}
