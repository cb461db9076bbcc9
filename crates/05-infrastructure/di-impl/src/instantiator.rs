//! 实例化器
//!
//! 先调用组件构造函数，再按声明顺序解析并填充每个注入目标。
//! 实例只有在全部注入完成后才会被包装成共享句柄交给调用方。

use di_abstractions::{Arguments, DependencyResolver, Implements, Injectable, Resolved};
use infrastructure_common::{DependencyError, DependencyResult, TypeKey};
use std::any::Any;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// 容器中缓存和传递的实例
pub type Instance = Arc<dyn Any + Send + Sync>;

/// 将实例转换为请求类型的句柄（`Box<Arc<T>>`）
pub type Upcast = fn(Instance) -> Option<Resolved>;

type InstantiateFn = fn(&Arguments, &dyn DependencyResolver) -> DependencyResult<Instance>;

/// 具体类型的激活器
///
/// 保存实例化函数和到具体类型句柄的转换函数，注册时由泛型参数生成。
#[derive(Clone, Copy)]
pub struct Activator {
    type_key: TypeKey,
    instantiate: InstantiateFn,
    cast: Upcast,
}

impl Activator {
    /// 为可注入类型创建激活器
    pub fn of<T: Injectable>() -> Self {
        Self {
            type_key: TypeKey::of::<T>(),
            instantiate: instantiate::<T>,
            cast: cast_concrete::<T>,
        }
    }

    /// 具体类型
    pub fn type_key(&self) -> TypeKey {
        self.type_key
    }

    /// 构造并注入一个新实例
    ///
    /// `resolver` 是发起本次实例化的容器节点，所有注入目标都从该节点解析。
    pub fn activate(
        &self,
        args: &Arguments,
        resolver: &dyn DependencyResolver,
    ) -> DependencyResult<Instance> {
        (self.instantiate)(args, resolver)
    }

    /// 到具体类型句柄的转换函数
    pub fn cast(&self) -> Upcast {
        self.cast
    }
}

impl fmt::Debug for Activator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Activator")
            .field("type", &self.type_key.name)
            .finish()
    }
}

fn instantiate<T: Injectable>(
    args: &Arguments,
    resolver: &dyn DependencyResolver,
) -> DependencyResult<Instance> {
    let type_name = std::any::type_name::<T>();
    debug!("构造组件: {} (参数数量: {})", type_name, args.len());

    let mut component = T::construct(args)
        .map_err(|source| DependencyError::constructor_mismatch(type_name, source))?;

    for slot in T::injection_slots() {
        slot.inject(&mut component, resolver)?;
    }

    Ok(Arc::new(component))
}

fn cast_concrete<T: Send + Sync + 'static>(instance: Instance) -> Option<Resolved> {
    let concrete = instance.downcast::<T>().ok()?;
    let resolved: Resolved = Box::new(concrete);
    Some(resolved)
}

/// 接口别名使用的转换函数
pub(crate) fn cast_interface<I, T>(instance: Instance) -> Option<Resolved>
where
    I: ?Sized + 'static,
    T: Implements<I>,
{
    let concrete = instance.downcast::<T>().ok()?;
    let resolved: Resolved = Box::new(concrete.upcast());
    Some(resolved)
}
