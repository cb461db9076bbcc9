//! 接口绑定
//!
//! 接口以 trait object 表示。具体类型通过 [`Implements`] 声明可以向上转换为接口句柄，
//! 容器据此为接口别名生成转换函数。

use std::sync::Arc;

/// 具体类型实现某个接口
pub trait Implements<I: ?Sized>: Send + Sync + 'static {
    /// 将具体实例的共享句柄转换为接口句柄
    fn upcast(self: Arc<Self>) -> Arc<I>;
}

/// 为具体类型声明接口实现
///
/// ```ignore
/// implements!(dyn Greeter: EnglishGreeter, FrenchGreeter);
/// ```
#[macro_export]
macro_rules! implements {
    ($interface:ty : $($concrete:ty),+ $(,)?) => {
        $(
            impl $crate::Implements<$interface> for $concrete {
                fn upcast(self: ::std::sync::Arc<Self>) -> ::std::sync::Arc<$interface> {
                    self
                }
            }
        )+
    };
}
