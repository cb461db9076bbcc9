//! # Dependency Injection Abstractions
//!
//! 依赖注入抽象层，定义组件构造、成员注入和依赖解析的核心接口。
//!
//! ## 核心接口
//!
//! - [`Injectable`] - 可由容器构造并注入的组件
//! - [`InjectionSlot`] / [`Inject`] - 注入目标成员及其赋值契约
//! - [`Arguments`] - 不透明的构造参数列表
//! - [`DependencyResolver`] - 注入时使用的对象安全解析接口
//! - [`Implements`] - 具体类型到接口（trait object）的绑定

pub mod arguments;
pub mod injectable;
pub mod interface;
pub mod resolver;

pub use arguments::*;
pub use injectable::*;
pub use interface::*;
pub use resolver::*;
