//! 可注入组件抽象
//!
//! 组件通过 [`Injectable`] 声明构造方式和注入目标，
//! 容器先构造实例，再依次填充每个 [`InjectionSlot`]。

use crate::arguments::Arguments;
use crate::resolver::{DependencyResolver, ResolverExt};
use infrastructure_common::{ArgumentResult, DependencyResult, TypeKey};
use std::fmt;
use std::ops::Deref;
use std::sync::Arc;
use tracing::trace;

/// 可注入组件 trait
///
/// 通常由 `#[derive(Injectable)]` 生成，需要构造参数的组件也可以手动实现。
pub trait Injectable: Send + Sync + Sized + 'static {
    /// 使用参数列表构造实例
    ///
    /// 参数与签名不匹配时返回 [`ArgumentError`](infrastructure_common::ArgumentError)，
    /// 容器会将其报告为构造函数不匹配。
    fn construct(args: &Arguments) -> ArgumentResult<Self>;

    /// 按声明顺序列出注入目标
    fn injection_slots() -> Vec<InjectionSlot<Self>> {
        Vec::new()
    }
}

type SlotInjector<T> = Box<dyn Fn(&mut T, &dyn DependencyResolver) -> DependencyResult<()>>;

/// 注入目标
///
/// 记录依赖类型以及把解析结果写入成员的赋值函数。
pub struct InjectionSlot<T> {
    member: &'static str,
    dependency: TypeKey,
    injector: SlotInjector<T>,
}

impl<T: 'static> InjectionSlot<T> {
    /// 创建注入目标
    pub fn new<D: ?Sized + 'static>(member: &'static str, assign: fn(&mut T, Arc<D>)) -> Self {
        Self {
            member,
            dependency: TypeKey::of::<D>(),
            injector: Box::new(move |target, resolver| {
                let dependency = resolver.resolve_dependency::<D>(None)?;
                assign(target, dependency);
                Ok(())
            }),
        }
    }

    /// 成员名称
    pub fn member(&self) -> &'static str {
        self.member
    }

    /// 依赖类型
    pub fn dependency(&self) -> TypeKey {
        self.dependency
    }

    /// 解析依赖并写入目标实例
    pub fn inject(&self, target: &mut T, resolver: &dyn DependencyResolver) -> DependencyResult<()> {
        trace!("注入成员: {} <- {}", self.member, self.dependency);
        (self.injector)(target, resolver)
    }
}

impl<T> fmt::Debug for InjectionSlot<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InjectionSlot")
            .field("member", &self.member)
            .field("dependency", &self.dependency.name)
            .field("injector", &"<function>")
            .finish()
    }
}

/// 注入成员
///
/// 构造后为空，由容器在返回实例之前填充。组件只读，写入只通过 [`Inject::inject`]。
pub struct Inject<T: ?Sized> {
    value: Option<Arc<T>>,
}

impl<T: ?Sized> Inject<T> {
    /// 创建空的注入成员
    pub fn empty() -> Self {
        Self { value: None }
    }

    /// 容器写入解析结果
    #[doc(hidden)]
    pub fn inject(&mut self, value: Arc<T>) {
        self.value = Some(value);
    }

    /// 是否已注入
    pub fn is_injected(&self) -> bool {
        self.value.is_some()
    }

    /// 获取已注入的共享句柄
    pub fn get(&self) -> Option<&Arc<T>> {
        self.value.as_ref()
    }
}

impl<T: ?Sized> Default for Inject<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T: ?Sized> Clone for Inject<T> {
    fn clone(&self) -> Self {
        Self {
            value: self.value.clone(),
        }
    }
}

/// # Panics
///
/// 在容器注入之前解引用会 panic。
impl<T: ?Sized> Deref for Inject<T> {
    type Target = T;

    fn deref(&self) -> &T {
        match &self.value {
            Some(value) => value,
            None => panic!(
                "依赖成员尚未注入: {}",
                std::any::type_name::<T>()
            ),
        }
    }
}

impl<T: ?Sized> fmt::Debug for Inject<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Inject")
            .field("type", &std::any::type_name::<T>())
            .field("injected", &self.value.is_some())
            .finish()
    }
}
