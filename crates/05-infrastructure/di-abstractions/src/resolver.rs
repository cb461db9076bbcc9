//! 组件解析器抽象接口
//!
//! 注入槽位通过对象安全的 [`DependencyResolver`] 回调容器，
//! 类型化的便捷方法由 [`ResolverExt`] 提供。

use crate::arguments::Arguments;
use infrastructure_common::{DependencyError, DependencyResult, TypeKey};
use std::any::Any;
use std::sync::Arc;

/// 类型擦除的解析结果
///
/// 盒子中存放的是 `Arc<T>`，`T` 为请求的类型（具体类型或 `dyn Trait`）。
pub type Resolved = Box<dyn Any>;

/// 组件解析器 trait
pub trait DependencyResolver {
    /// 解析请求的类型
    ///
    /// 类型未注册时返回 `Ok(None)`；构造失败等错误原样向上传播。
    fn resolve_erased(
        &self,
        requested: TypeKey,
        args: Option<&Arguments>,
    ) -> DependencyResult<Option<Resolved>>;
}

/// 将擦除的解析结果还原为 `Arc<T>`
pub fn downcast_resolved<T: ?Sized + 'static>(resolved: Resolved) -> DependencyResult<Arc<T>> {
    resolved
        .downcast::<Arc<T>>()
        .map(|handle| *handle)
        .map_err(|_| DependencyError::type_mismatch(std::any::type_name::<T>()))
}

/// 类型化解析方法
pub trait ResolverExt: DependencyResolver {
    /// 解析组件，未注册时返回 `None`
    fn resolve_optional<T: ?Sized + 'static>(
        &self,
        args: Option<&Arguments>,
    ) -> DependencyResult<Option<Arc<T>>> {
        self.resolve_erased(TypeKey::of::<T>(), args)?
            .map(downcast_resolved::<T>)
            .transpose()
    }

    /// 解析组件，未注册时返回错误
    fn resolve_dependency<T: ?Sized + 'static>(
        &self,
        args: Option<&Arguments>,
    ) -> DependencyResult<Arc<T>> {
        self.resolve_optional::<T>(args)?
            .ok_or_else(|| DependencyError::not_registered(std::any::type_name::<T>()))
    }
}

impl<R: DependencyResolver + ?Sized> ResolverExt for R {}
