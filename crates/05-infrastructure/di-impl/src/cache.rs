//! 实例缓存
//!
//! 以具体类型为键，只追加不替换。

use crate::instantiator::Instance;
use infrastructure_common::TypeKey;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fmt;

/// 单个容器节点的实例缓存
#[derive(Default)]
pub struct InstanceCache {
    instances: HashMap<TypeKey, Instance>,
}

impl InstanceCache {
    /// 创建空缓存
    pub fn new() -> Self {
        Self::default()
    }

    /// 获取缓存的实例
    pub fn get(&self, concrete: &TypeKey) -> Option<Instance> {
        self.instances.get(concrete).cloned()
    }

    /// 缓存实例
    ///
    /// 已有实例时保留原实例并将其返回。
    pub fn insert(&mut self, concrete: TypeKey, instance: Instance) -> Instance {
        match self.instances.entry(concrete) {
            Entry::Occupied(existing) => existing.get().clone(),
            Entry::Vacant(slot) => slot.insert(instance).clone(),
        }
    }

    /// 缓存的实例数量
    pub fn len(&self) -> usize {
        self.instances.len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }
}

impl fmt::Debug for InstanceCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.instances.keys().map(|key| key.name))
            .finish()
    }
}
