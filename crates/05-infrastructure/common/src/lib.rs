//! # Infrastructure Common
//!
//! 这个 crate 提供了依赖注入容器各层共享的基础类型。
//!
//! ## 核心类型
//!
//! - [`Lifetime`] - 组件生命周期（瞬时 / 作用域 / 单例）
//! - [`Scope`] - 容器节点的作用域标识
//! - [`TypeKey`] - 以 `TypeId` 为键、携带类型名称的类型标识
//! - [`DependencyError`] / [`ArgumentError`] / [`ConfigError`] - 错误类型
//!
//! ## 设计原则
//!
//! - 基于 Rust 类型系统的编译时安全
//! - 同步、确定性的解析过程
//! - 约定优于配置

pub mod errors;
pub mod lifecycle;
pub mod metadata;

pub use errors::*;
pub use lifecycle::*;
pub use metadata::*;
