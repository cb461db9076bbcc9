//! 容器节点
//!
//! [`ServiceContainer`] 是容器树中一个节点的共享句柄。节点持有自己的类型定义存储和实例缓存，
//! 子节点通过 `Arc` 引用父节点，从不修改父节点的状态。

use crate::cache::InstanceCache;
use crate::instantiator::{cast_interface, Activator, Instance};
use crate::options::ContainerOptions;
use crate::store::{InterfaceAlias, TypeDefinition, TypeDefinitionStore};
use di_abstractions::{Arguments, Implements, Injectable};
use infrastructure_common::{Lifetime, Scope, TypeKey};
use parking_lot::RwLock;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, trace};

/// 容器节点
pub(crate) struct ContainerNode {
    pub(crate) scope: Scope,
    pub(crate) parent: Option<Arc<ContainerNode>>,
    pub(crate) definitions: RwLock<TypeDefinitionStore>,
    pub(crate) instances: RwLock<InstanceCache>,
    pub(crate) options: Arc<ContainerOptions>,
}

impl ContainerNode {
    fn new(scope: Scope, parent: Option<Arc<ContainerNode>>, options: Arc<ContainerOptions>) -> Self {
        Self {
            scope,
            parent,
            definitions: RwLock::new(TypeDefinitionStore::new()),
            instances: RwLock::new(InstanceCache::new()),
            options,
        }
    }

    /// 从本节点向根节点遍历
    pub(crate) fn ancestry(&self) -> impl Iterator<Item = &ContainerNode> {
        std::iter::successors(Some(self), |node| node.parent.as_deref())
    }

    /// 查找最近的类型定义
    pub(crate) fn resolve_definition(&self, concrete: &TypeKey) -> Option<TypeDefinition> {
        self.ancestry().find_map(|node| {
            let definition = node.definitions.read().lookup(concrete).cloned();
            if definition.is_some() {
                trace!("找到类型定义: {} (作用域: {})", concrete, node.scope.name);
            }
            definition
        })
    }

    /// 查找最近的接口别名
    pub(crate) fn find_alias(&self, interface: &TypeKey) -> Option<InterfaceAlias> {
        self.ancestry()
            .find_map(|node| node.definitions.read().alias(interface).copied())
    }

    /// 在祖先节点（不含本节点）的缓存中查找已有实例
    pub(crate) fn find_cached_in_ancestors(&self, concrete: &TypeKey) -> Option<Instance> {
        self.ancestry()
            .skip(1)
            .find_map(|node| node.instances.read().get(concrete))
    }
}

/// 依赖注入容器
///
/// 克隆得到的是同一节点的另一个句柄；[`ServiceContainer::scope`] 创建子节点。
#[derive(Clone)]
pub struct ServiceContainer {
    pub(crate) node: Arc<ContainerNode>,
}

/// 已注册类型的描述，仅用于查看
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationInfo {
    /// 具体类型
    pub type_key: TypeKey,
    /// 生命周期
    pub lifetime: Lifetime,
    /// 保存的构造参数数量
    pub stored_args: Option<usize>,
}

/// 接口别名的描述，仅用于查看
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasInfo {
    /// 接口类型
    pub interface: TypeKey,
    /// 具体类型
    pub concrete: TypeKey,
}

impl ServiceContainer {
    /// 创建根容器
    pub fn new() -> Self {
        Self::with_options(ContainerOptions::default())
    }

    /// 使用指定配置创建根容器
    pub fn with_options(options: ContainerOptions) -> Self {
        let scope = Scope::root(options.name.clone());
        debug!("创建根容器: {} ({})", scope.name, scope.id);
        Self {
            node: Arc::new(ContainerNode::new(scope, None, Arc::new(options))),
        }
    }

    /// 创建子作用域
    pub fn scope(&self) -> Self {
        self.scope_named("scope")
    }

    /// 创建具名子作用域
    pub fn scope_named(&self, name: impl Into<String>) -> Self {
        let scope = self.node.scope.child(name);
        debug!("创建子作用域: {} ({})", scope.name, scope.id);
        Self {
            node: Arc::new(ContainerNode::new(
                scope,
                Some(self.node.clone()),
                self.node.options.clone(),
            )),
        }
    }

    /// 父容器
    pub fn parent(&self) -> Option<Self> {
        self.node.parent.clone().map(|node| Self { node })
    }

    /// 是否为根容器
    pub fn is_root(&self) -> bool {
        self.node.parent.is_none()
    }

    /// 作用域标识
    pub fn scope_info(&self) -> &Scope {
        &self.node.scope
    }

    /// 容器配置
    pub fn options(&self) -> &ContainerOptions {
        &self.node.options
    }

    /// 注册组件
    pub fn register<T: Injectable>(&self, lifetime: Lifetime) -> &Self {
        self.try_register::<T>(lifetime, None);
        self
    }

    /// 注册组件并保存构造参数
    pub fn register_with_args<T: Injectable>(&self, lifetime: Lifetime, args: Arguments) -> &Self {
        self.try_register::<T>(lifetime, Some(args));
        self
    }

    /// 使用配置中的默认生命周期注册组件
    pub fn register_default<T: Injectable>(&self) -> &Self {
        self.register::<T>(self.node.options.default_lifetime)
    }

    /// 注册组件，返回是否实际插入
    ///
    /// 同一层已有该类型的定义时不做任何修改。
    pub fn try_register<T: Injectable>(&self, lifetime: Lifetime, args: Option<Arguments>) -> bool {
        self.insert_definition(TypeDefinition::new(Activator::of::<T>(), lifetime, args))
    }

    /// 为接口注册实现类型
    pub fn register_interface<I, T>(&self, lifetime: Lifetime) -> &Self
    where
        I: ?Sized + 'static,
        T: Injectable + Implements<I>,
    {
        self.insert_alias::<I, T>(lifetime, None);
        self
    }

    /// 为接口注册实现类型并保存构造参数
    pub fn register_interface_with_args<I, T>(&self, lifetime: Lifetime, args: Arguments) -> &Self
    where
        I: ?Sized + 'static,
        T: Injectable + Implements<I>,
    {
        self.insert_alias::<I, T>(lifetime, Some(args));
        self
    }

    pub(crate) fn insert_definition(&self, definition: TypeDefinition) -> bool {
        let concrete = definition.concrete();
        let lifetime = definition.lifetime();
        let inserted = self.node.definitions.write().register(definition);
        if inserted {
            debug!("注册组件: {} [{}] (作用域: {})", concrete, lifetime, self.node.scope.name);
        } else {
            debug!("组件已注册，忽略重复注册: {} (作用域: {})", concrete, self.node.scope.name);
        }
        inserted
    }

    fn insert_alias<I, T>(&self, lifetime: Lifetime, args: Option<Arguments>) -> bool
    where
        I: ?Sized + 'static,
        T: Injectable + Implements<I>,
    {
        let alias = InterfaceAlias::new(
            TypeKey::of::<I>(),
            TypeKey::of::<T>(),
            cast_interface::<I, T>,
        );
        let definition = TypeDefinition::new(Activator::of::<T>(), lifetime, args);
        let inserted = self.node.definitions.write().register_alias(alias, definition);
        if inserted {
            debug!(
                "注册接口: {} -> {} [{}] (作用域: {})",
                alias.interface(),
                alias.concrete(),
                lifetime,
                self.node.scope.name
            );
        } else {
            debug!("接口已绑定，忽略重复注册: {}", alias.interface());
        }
        inserted
    }

    /// 请求的类型在本容器或任一祖先中是否有类型定义
    ///
    /// 只检查定义是否存在。仅在子作用域中注册的单例会返回 `true`，
    /// 但解析时委托给根容器，结果为 `None`。
    pub fn is_registered<T: ?Sized + 'static>(&self) -> bool {
        let requested = TypeKey::of::<T>();
        let concrete = self
            .node
            .find_alias(&requested)
            .map_or(requested, |alias| alias.concrete());
        self.node.resolve_definition(&concrete).is_some()
    }

    /// 本层已注册的类型，按类型名称排序
    pub fn registrations(&self) -> Vec<RegistrationInfo> {
        let definitions = self.node.definitions.read();
        let mut registrations: Vec<RegistrationInfo> = definitions
            .iter()
            .map(|(key, definition)| RegistrationInfo {
                type_key: *key,
                lifetime: definition.lifetime(),
                stored_args: definition.stored_args().map(Arguments::len),
            })
            .collect();
        registrations.sort_by_key(|info| info.type_key.name);
        registrations
    }

    /// 本层的接口别名，按接口名称排序
    pub fn aliases(&self) -> Vec<AliasInfo> {
        let definitions = self.node.definitions.read();
        let mut aliases: Vec<AliasInfo> = definitions
            .aliases()
            .map(|alias| AliasInfo {
                interface: alias.interface(),
                concrete: alias.concrete(),
            })
            .collect();
        aliases.sort_by_key(|info| info.interface.name);
        aliases
    }

    /// 本层缓存的实例数量
    pub fn cached_instance_count(&self) -> usize {
        self.node.instances.read().len()
    }
}

impl Default for ServiceContainer {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ServiceContainer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceContainer")
            .field("scope", &self.node.scope.name)
            .field("registrations", &self.node.definitions.read().len())
            .field("instances", &self.node.instances.read().len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use di_abstractions::args;
    use infrastructure_common::ArgumentResult;

    struct Clock;

    impl Injectable for Clock {
        fn construct(_args: &Arguments) -> ArgumentResult<Self> {
            Ok(Self)
        }
    }

    #[test]
    fn test_duplicate_registration_is_ignored() {
        let container = ServiceContainer::new();

        assert!(container.try_register::<Clock>(Lifetime::Singleton, Some(args!["a"])));
        assert!(!container.try_register::<Clock>(Lifetime::Transient, None));

        let registrations = container.registrations();
        assert_eq!(registrations.len(), 1);
        assert_eq!(registrations[0].lifetime, Lifetime::Singleton);
        assert_eq!(registrations[0].stored_args, Some(1));
    }

    #[test]
    fn test_scope_registrations_stay_in_subtree() {
        let root = ServiceContainer::new();
        let scope = root.scope_named("request");
        scope.register::<Clock>(Lifetime::Scoped);

        assert!(scope.is_registered::<Clock>());
        assert!(!root.is_registered::<Clock>());
        assert!(scope.scope().is_registered::<Clock>());
        assert!(root.scope().registrations().is_empty());
    }

    #[test]
    fn test_scope_local_singleton_has_definition_but_no_instance() {
        let root = ServiceContainer::new();
        let scope = root.scope();
        scope.register::<Clock>(Lifetime::Singleton);

        assert!(scope.is_registered::<Clock>());
        assert!(scope.resolve::<Clock>().unwrap().is_none());
    }

    #[test]
    fn test_hierarchy_accessors() {
        let root = ServiceContainer::new();
        let child = root.scope_named("child");

        assert!(root.is_root());
        assert!(!child.is_root());
        assert_eq!(child.scope_info().name, "root.child");
        assert_eq!(child.scope_info().depth, 1);
        assert_eq!(child.parent().unwrap().scope_info().id, root.scope_info().id);
        assert!(root.parent().is_none());
    }

    #[test]
    fn test_register_default_uses_options() {
        let container = ServiceContainer::with_options(ContainerOptions {
            default_lifetime: Lifetime::Singleton,
            ..ContainerOptions::default()
        });
        container.register_default::<Clock>();

        assert_eq!(container.registrations()[0].lifetime, Lifetime::Singleton);
    }
}
