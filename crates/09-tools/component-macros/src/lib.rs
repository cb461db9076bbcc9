//! # Component Macros
//!
//! 依赖注入容器使用的过程宏。
//!
//! ## 核心宏
//!
//! - [`Injectable`] - 派生 `di_impl::Injectable`，生成构造函数和注入目标，
//!   可选地在程序启动时提交自动注册描述
//!
//! ## 使用示例
//!
//! ```ignore
//! use component_macros::Injectable;
//! use di_impl::Inject;
//!
//! #[derive(Injectable)]
//! #[dependency(transient)]
//! pub struct AutoService {
//!     #[inject]
//!     ctor_service: Inject<CtorService>,
//! }
//! ```

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

mod injectable;
mod utils;

/// 可注入组件派生宏
///
/// # 属性
///
/// - `#[dependency]` / `#[dependency(singleton | scoped | transient)]` /
///   `#[dependency(lifetime = "..")]` - 启动时加入自动注册目录，缺省生命周期为 transient
/// - `#[injectable(constructor = "path")]` - 自定义构造函数，
///   签名为 `fn(&Arguments) -> ArgumentResult<Self>`；缺省时要求空参数列表并用 `Default` 初始化各字段
/// - `#[inject]` - 标记 `Inject<T>` 字段为注入目标，按声明顺序注入
///
/// # 示例
///
/// ```ignore
/// #[derive(Injectable)]
/// #[dependency(singleton)]
/// pub struct RootService {
///     #[inject]
///     child: Inject<ChildService>,
/// }
/// ```
#[proc_macro_derive(Injectable, attributes(dependency, injectable, inject))]
pub fn derive_injectable(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    injectable::derive_injectable_impl(input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
