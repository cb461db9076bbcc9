//! 生命周期分派
//!
//! 请求类型先经接口别名映射到具体类型，再沿作用域链查找类型定义，
//! 最后按生命周期决定复用缓存、委托父节点或创建新实例。

use crate::container::{ContainerNode, ServiceContainer};
use crate::instantiator::{Instance, Upcast};
use crate::store::TypeDefinition;
use di_abstractions::{Arguments, DependencyResolver, Resolved, ResolverExt};
use infrastructure_common::{DependencyError, DependencyResult, Lifetime, TypeKey};
use std::sync::Arc;
use tracing::{debug, trace};

impl ContainerNode {
    fn dispatch(
        &self,
        requested: TypeKey,
        args: Option<&Arguments>,
    ) -> DependencyResult<Option<Resolved>> {
        let (concrete, upcast) = match self.find_alias(&requested) {
            Some(alias) => (alias.concrete(), Some(alias.upcast())),
            None => (requested, None),
        };

        let Some(definition) = self.resolve_definition(&concrete) else {
            trace!("类型未注册: {} (作用域: {})", requested, self.scope.name);
            return Ok(None);
        };
        let upcast = upcast.unwrap_or_else(|| definition.activator().cast());

        let instance = match definition.lifetime() {
            Lifetime::Singleton => match &self.parent {
                Some(parent) => {
                    trace!(
                        "单例委托给父作用域: {} ({} -> {})",
                        requested,
                        self.scope.name,
                        parent.scope.name
                    );
                    return parent.dispatch(requested, None);
                }
                None => self.resolve_cached(&definition, args)?,
            },
            Lifetime::Scoped => {
                let local = self.instances.read().get(&concrete);
                match local {
                    Some(instance) => instance,
                    None => match self.find_cached_in_ancestors(&concrete) {
                        Some(inherited) => {
                            debug!("复用祖先作用域实例: {} (作用域: {})", concrete, self.scope.name);
                            inherited
                        }
                        None => self.resolve_cached(&definition, args)?,
                    },
                }
            }
            Lifetime::Transient => self.instantiate(&definition, args)?,
        };

        cast(upcast, instance, requested).map(Some)
    }

    /// 从本节点缓存获取实例，不存在时创建并缓存
    fn resolve_cached(
        &self,
        definition: &TypeDefinition,
        args: Option<&Arguments>,
    ) -> DependencyResult<Instance> {
        let concrete = definition.concrete();
        let cached = self.instances.read().get(&concrete);
        if let Some(instance) = cached {
            debug!("命中缓存: {} (作用域: {})", concrete, self.scope.name);
            return Ok(instance);
        }

        let instance = self.instantiate(definition, args)?;
        Ok(self.instances.write().insert(concrete, instance))
    }

    /// 创建新实例，参数优先级：调用方覆盖 > 注册时保存 > 空列表
    fn instantiate(
        &self,
        definition: &TypeDefinition,
        args: Option<&Arguments>,
    ) -> DependencyResult<Instance> {
        let empty = Arguments::new();
        let args = args.or(definition.stored_args()).unwrap_or(&empty);
        debug!(
            "实例化: {} [{}] (作用域: {})",
            definition.concrete(),
            definition.lifetime(),
            self.scope.name
        );
        definition.activator().activate(args, self)
    }
}

fn cast(upcast: Upcast, instance: Instance, requested: TypeKey) -> DependencyResult<Resolved> {
    upcast(instance).ok_or_else(|| DependencyError::type_mismatch(requested.name))
}

impl DependencyResolver for ContainerNode {
    fn resolve_erased(
        &self,
        requested: TypeKey,
        args: Option<&Arguments>,
    ) -> DependencyResult<Option<Resolved>> {
        self.dispatch(requested, args)
    }
}

impl DependencyResolver for ServiceContainer {
    fn resolve_erased(
        &self,
        requested: TypeKey,
        args: Option<&Arguments>,
    ) -> DependencyResult<Option<Resolved>> {
        self.node.dispatch(requested, args)
    }
}

impl ServiceContainer {
    /// 解析组件，未注册时返回 `None`
    ///
    /// `T` 可以是具体类型，也可以是已绑定的接口（`dyn Trait`）。
    pub fn resolve<T: ?Sized + 'static>(&self) -> DependencyResult<Option<Arc<T>>> {
        self.resolve_optional::<T>(None)
    }

    /// 使用覆盖参数解析组件
    ///
    /// 覆盖参数只用于本次实际发生的实例化；命中缓存或委托给父作用域的单例会忽略它。
    pub fn resolve_with_args<T: ?Sized + 'static>(
        &self,
        args: Arguments,
    ) -> DependencyResult<Option<Arc<T>>> {
        self.resolve_optional::<T>(Some(&args))
    }

    /// 解析组件，未注册时返回 [`DependencyError::ComponentNotRegistered`]
    pub fn resolve_required<T: ?Sized + 'static>(&self) -> DependencyResult<Arc<T>> {
        self.resolve_dependency::<T>(None)
    }

    /// 使用覆盖参数解析组件，未注册时返回错误
    pub fn resolve_required_with_args<T: ?Sized + 'static>(
        &self,
        args: Arguments,
    ) -> DependencyResult<Arc<T>> {
        self.resolve_dependency::<T>(Some(&args))
    }
}
