//! 类型定义存储
//!
//! 每个容器节点持有一份：具体类型到定义的映射，以及接口到具体类型的别名表。
//! 两者都遵循先注册者生效，查找只在本层进行，层级遍历由解析器负责。

use crate::instantiator::{Activator, Upcast};
use di_abstractions::Arguments;
use infrastructure_common::{Lifetime, TypeKey};
use std::collections::HashMap;
use std::fmt;

/// 类型定义
#[derive(Clone)]
pub struct TypeDefinition {
    lifetime: Lifetime,
    stored_args: Option<Arguments>,
    activator: Activator,
}

impl TypeDefinition {
    /// 创建新的类型定义
    pub fn new(activator: Activator, lifetime: Lifetime, stored_args: Option<Arguments>) -> Self {
        Self {
            lifetime,
            stored_args,
            activator,
        }
    }

    /// 具体类型
    pub fn concrete(&self) -> TypeKey {
        self.activator.type_key()
    }

    /// 生命周期
    pub fn lifetime(&self) -> Lifetime {
        self.lifetime
    }

    /// 注册时保存的构造参数
    pub fn stored_args(&self) -> Option<&Arguments> {
        self.stored_args.as_ref()
    }

    /// 激活器
    pub fn activator(&self) -> &Activator {
        &self.activator
    }
}

impl fmt::Debug for TypeDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeDefinition")
            .field("type", &self.concrete().name)
            .field("lifetime", &self.lifetime)
            .field("stored_args", &self.stored_args)
            .finish()
    }
}

/// 接口别名
#[derive(Clone, Copy)]
pub struct InterfaceAlias {
    interface: TypeKey,
    concrete: TypeKey,
    upcast: Upcast,
}

impl InterfaceAlias {
    /// 创建接口别名
    pub fn new(interface: TypeKey, concrete: TypeKey, upcast: Upcast) -> Self {
        Self {
            interface,
            concrete,
            upcast,
        }
    }

    /// 接口类型
    pub fn interface(&self) -> TypeKey {
        self.interface
    }

    /// 具体类型
    pub fn concrete(&self) -> TypeKey {
        self.concrete
    }

    /// 从具体实例到接口句柄的转换函数
    pub fn upcast(&self) -> Upcast {
        self.upcast
    }
}

impl fmt::Debug for InterfaceAlias {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InterfaceAlias")
            .field("interface", &self.interface.name)
            .field("concrete", &self.concrete.name)
            .finish()
    }
}

/// 类型定义存储
#[derive(Debug, Default)]
pub struct TypeDefinitionStore {
    definitions: HashMap<TypeKey, TypeDefinition>,
    aliases: HashMap<TypeKey, InterfaceAlias>,
}

impl TypeDefinitionStore {
    /// 创建空存储
    pub fn new() -> Self {
        Self::default()
    }

    /// 注册具体类型，已存在时忽略并返回 `false`
    pub fn register(&mut self, definition: TypeDefinition) -> bool {
        let key = definition.concrete();
        if self.definitions.contains_key(&key) {
            return false;
        }
        self.definitions.insert(key, definition);
        true
    }

    /// 注册接口别名并以相同方式注册具体类型
    ///
    /// 别名和具体类型各自遵循先注册者生效，返回别名是否被插入。
    pub fn register_alias(&mut self, alias: InterfaceAlias, definition: TypeDefinition) -> bool {
        let inserted = if self.aliases.contains_key(&alias.interface) {
            false
        } else {
            self.aliases.insert(alias.interface, alias);
            true
        };
        self.register(definition);
        inserted
    }

    /// 查找本层的类型定义
    pub fn lookup(&self, concrete: &TypeKey) -> Option<&TypeDefinition> {
        self.definitions.get(concrete)
    }

    /// 查找本层的接口别名
    pub fn alias(&self, interface: &TypeKey) -> Option<&InterfaceAlias> {
        self.aliases.get(interface)
    }

    /// 遍历本层的全部类型定义
    pub fn iter(&self) -> impl Iterator<Item = (&TypeKey, &TypeDefinition)> {
        self.definitions.iter()
    }

    /// 遍历本层的全部接口别名
    pub fn aliases(&self) -> impl Iterator<Item = &InterfaceAlias> {
        self.aliases.values()
    }

    /// 类型定义数量
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    /// 是否没有任何类型定义
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}
