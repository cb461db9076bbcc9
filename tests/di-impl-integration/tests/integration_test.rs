//! Centralized integration tests for di-impl crate

use anyhow::Result;
use component_macros::Injectable;
use di_abstractions::{DependencyResolver, ResolverExt};
use di_impl::{
    args, ArgumentResult, Arguments, ContainerBuilder, ContainerOptions, Inject, Lifetime,
    ServiceContainer,
};
use infrastructure_common::{DependencyError, TypeKey};
use std::fs;
use std::sync::Arc;
use std::thread;

#[derive(Debug, Injectable)]
#[injectable(constructor = "Connection::open")]
struct Connection {
    url: String,
}

impl Connection {
    fn open(args: &Arguments) -> ArgumentResult<Self> {
        args.expect_arity(1)?;
        Ok(Self { url: args.text(0)? })
    }
}

#[derive(Debug, Injectable)]
struct Session {
    #[inject]
    connection: Inject<Connection>,
}

#[derive(Debug, Injectable)]
struct Handler {
    #[inject]
    session: Inject<Session>,
    #[inject]
    connection: Inject<Connection>,
}

#[test]
fn test_deep_scope_chain() -> Result<()> {
    let root = ServiceContainer::new();
    root.register_with_args::<Connection>(Lifetime::Singleton, args!["db://main"])
        .register::<Session>(Lifetime::Scoped)
        .register::<Handler>(Lifetime::Transient);

    let request = root.scope_named("request");
    let nested = request.scope_named("handler");
    assert_eq!(nested.scope_info().name, "root.request.handler");
    assert_eq!(nested.scope_info().depth, 2);

    let handler = nested.resolve_required::<Handler>()?;
    let session = request.resolve_required::<Session>()?;

    // 处理器在 nested 中创建了自己的会话，request 随后创建另一个
    assert!(!Arc::ptr_eq(handler.session.get().unwrap(), &session));
    assert_eq!(handler.connection.url, "db://main");
    assert!(Arc::ptr_eq(
        handler.session.get().unwrap(),
        &nested.resolve_required::<Session>()?
    ));
    assert_eq!(root.cached_instance_count(), 1);
    assert_eq!(request.cached_instance_count(), 1);
    assert_eq!(nested.cached_instance_count(), 1);
    Ok(())
}

#[test]
fn test_scoped_instance_visible_to_later_child_scopes() -> Result<()> {
    let root = ServiceContainer::new();
    root.register_with_args::<Connection>(Lifetime::Singleton, args!["db://main"])
        .register::<Session>(Lifetime::Scoped);

    let request = root.scope();
    let session = request.resolve_required::<Session>()?;
    let child = request.scope();

    assert!(Arc::ptr_eq(&session, &child.resolve_required::<Session>()?));
    assert_eq!(child.cached_instance_count(), 0);
    Ok(())
}

#[test]
fn test_scope_local_registration() -> Result<()> {
    let root = ServiceContainer::new();
    let scope = root.scope();
    scope.register_with_args::<Connection>(Lifetime::Transient, args!["db://scope"]);

    assert!(root.resolve::<Connection>()?.is_none());
    assert_eq!(scope.resolve_required::<Connection>()?.url, "db://scope");
    assert!(scope.parent().is_some());
    Ok(())
}

#[test]
fn test_scope_local_singleton_delegates_to_root() -> Result<()> {
    let root = ServiceContainer::new();
    let scope = root.scope();
    scope.register_with_args::<Connection>(Lifetime::Singleton, args!["db://scope"]);

    // 单例只在根容器中创建，根容器看不到作用域内的注册
    assert!(scope.resolve::<Connection>()?.is_none());
    Ok(())
}

#[test]
fn test_resolver_trait_object() -> Result<()> {
    let root = ServiceContainer::new();
    root.register_with_args::<Connection>(Lifetime::Singleton, args!["db://main"]);

    let resolver: &dyn DependencyResolver = &root;
    let connection = resolver.resolve_dependency::<Connection>(None)?;
    assert_eq!(connection.url, "db://main");

    let erased = resolver.resolve_erased(TypeKey::of::<Session>(), None)?;
    assert!(erased.is_none());
    Ok(())
}

#[test]
fn test_singleton_across_threads() -> Result<()> {
    let root = ServiceContainer::new();
    root.register_with_args::<Connection>(Lifetime::Singleton, args!["db://shared"]);
    let expected = root.resolve_required::<Connection>()?;

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let scope = root.scope();
            thread::spawn(move || scope.resolve_required::<Connection>())
        })
        .collect();

    for handle in handles {
        let connection = handle.join().expect("线程 panic")?;
        assert!(Arc::ptr_eq(&connection, &expected));
    }
    Ok(())
}

#[test]
fn test_missing_injected_dependency() {
    let root = ServiceContainer::new();
    root.register::<Session>(Lifetime::Transient);

    match root.resolve::<Session>() {
        Err(DependencyError::ComponentNotRegistered { type_name }) => {
            assert!(type_name.contains("Connection"));
        }
        other => panic!("期望未注册错误, 实际: {:?}", other),
    }
}

#[test]
fn test_options_file_drives_builder() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("container.toml");
    fs::write(
        &path,
        r#"
name = "service"
default_lifetime = "singleton"
"#,
    )?;

    let options = ContainerOptions::from_file(&path)?;
    let container = ContainerBuilder::from_options(options)
        .register_with_args::<Connection>(Lifetime::Singleton, args!["db://file"])
        .build()?;
    container.register_default::<Session>();

    assert_eq!(container.scope_info().name, "service");
    let registration = container
        .registrations()
        .into_iter()
        .find(|info| info.type_key == TypeKey::of::<Session>())
        .expect("Session 应已注册");
    assert_eq!(registration.lifetime, Lifetime::Singleton);
    assert!(Arc::ptr_eq(
        &container.resolve_required::<Session>()?,
        &container.scope().resolve_required::<Session>()?
    ));
    Ok(())
}
