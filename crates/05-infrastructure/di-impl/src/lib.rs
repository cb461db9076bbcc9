//! # 依赖注入具体实现
//!
//! 分层的依赖注入容器：根容器持有单例，子作用域持有作用域实例，
//! 每次解析都会按注册的生命周期复用或创建实例，并在返回前完成成员注入。
//!
//! ```ignore
//! use di_impl::{args, Lifetime, ServiceContainer};
//!
//! let root = ServiceContainer::new();
//! root.register_with_args::<CtorService>(Lifetime::Transient, args!["Very cool!"]);
//!
//! let scope = root.scope();
//! let service = scope.resolve_required::<CtorService>()?;
//! ```

pub mod auto_register;
pub mod builder;
pub mod cache;
pub mod container;
pub mod instantiator;
pub mod options;
pub mod resolver;
pub mod store;

pub use auto_register::{auto_registrations, submit_auto_registration, AutoRegistration};
pub use builder::ContainerBuilder;
pub use container::{AliasInfo, RegistrationInfo, ServiceContainer};
pub use instantiator::{Activator, Instance, Upcast};
pub use options::{ContainerOptions, LoggingOptions};

pub use di_abstractions::{
    args, downcast_resolved, implements, Arguments, DependencyResolver, Implements, Inject,
    Injectable, InjectionSlot, Resolved, ResolverExt,
};
pub use infrastructure_common::{
    ArgumentError, ArgumentResult, ConfigError, ConfigResult, DependencyError, DependencyResult,
    Lifetime, Scope, TypeKey,
};

/// 派生宏生成代码使用的路径
#[doc(hidden)]
pub mod __private {
    pub use ctor;
}
