//! 元数据定义
//!
//! 提供类型标识信息

use std::any::TypeId;
use std::fmt;
use std::hash::{Hash, Hasher};

/// 类型标识
///
/// 相等性和哈希只取决于 `TypeId`，名称仅用于诊断。
#[derive(Debug, Clone, Copy)]
pub struct TypeKey {
    /// 类型ID
    pub id: TypeId,
    /// 完整类型名称
    pub name: &'static str,
}

impl TypeKey {
    /// 从类型获取类型标识，支持 `dyn Trait` 等非定长类型
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    /// 获取简短的类型名称（不包含模块路径）
    pub fn short_name(&self) -> &'static str {
        let name = self.name.split('<').next().unwrap_or(self.name);
        name.rsplit("::").next().unwrap_or(name)
    }
}

impl PartialEq for TypeKey {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeKey {}

impl Hash for TypeKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}
