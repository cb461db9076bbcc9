//! 组件宏集成测试

use anyhow::Result;
use component_macros::Injectable;
use di_impl::{
    args, auto_registrations, implements, ArgumentResult, Arguments, Inject, Injectable,
    Lifetime, ServiceContainer, TypeKey,
};
use std::sync::Arc;

trait Repository: Send + Sync {
    fn find(&self, id: u32) -> String;
}

#[derive(Debug, Default, Injectable)]
#[dependency(singleton)]
struct MemoryRepository {
    prefix: String,
}

impl Repository for MemoryRepository {
    fn find(&self, id: u32) -> String {
        format!("{}{}", self.prefix, id)
    }
}

implements!(dyn Repository: MemoryRepository);

#[derive(Injectable)]
#[dependency(lifetime = "scoped")]
struct UnitOfWork {
    #[inject]
    repository: Inject<dyn Repository>,
}

#[derive(Debug, Injectable)]
#[injectable(constructor = "Settings::from_args")]
struct Settings {
    retries: u32,
    label: String,
}

impl Settings {
    fn from_args(args: &Arguments) -> ArgumentResult<Self> {
        args.expect_arity(2)?;
        Ok(Self {
            retries: args.get(0)?,
            label: args.text(1)?,
        })
    }
}

#[derive(Injectable)]
struct Report(#[inject] Inject<Settings>, #[inject] Inject<dyn Repository>);

#[derive(Debug, Injectable)]
#[dependency]
struct Plain;

fn lifetime_of<T: 'static>() -> Option<Lifetime> {
    auto_registrations()
        .into_iter()
        .find(|registration| registration.type_key() == TypeKey::of::<T>())
        .map(|registration| registration.lifetime())
}

#[test]
fn test_dependency_marker_submits_registration() {
    assert_eq!(lifetime_of::<MemoryRepository>(), Some(Lifetime::Singleton));
    assert_eq!(lifetime_of::<UnitOfWork>(), Some(Lifetime::Scoped));
    assert_eq!(lifetime_of::<Plain>(), Some(Lifetime::Transient));
    assert_eq!(lifetime_of::<Settings>(), None);
    assert_eq!(lifetime_of::<Report>(), None);
}

#[test]
fn test_injection_slots_in_declaration_order() {
    let slots = Report::injection_slots();
    let members: Vec<_> = slots.iter().map(|slot| slot.member()).collect();

    assert_eq!(members, vec!["0", "1"]);
    assert_eq!(slots[0].dependency(), TypeKey::of::<Settings>());
    assert_eq!(slots[1].dependency(), TypeKey::of::<dyn Repository>());
}

#[test]
fn test_default_constructor_rejects_arguments() {
    assert!(MemoryRepository::construct(&Arguments::new()).is_ok());
    assert!(MemoryRepository::construct(&args!["unexpected"]).is_err());
}

#[test]
fn test_custom_constructor() -> Result<()> {
    let settings = Settings::construct(&args![3_u32, "primary"])?;

    assert_eq!(settings.retries, 3);
    assert_eq!(settings.label, "primary");
    assert!(Settings::construct(&args![3_u32]).is_err());
    Ok(())
}

#[test]
fn test_interface_injection_through_container() -> Result<()> {
    let root = ServiceContainer::new();
    root.register_interface::<dyn Repository, MemoryRepository>(Lifetime::Singleton)
        .register_with_args::<Settings>(Lifetime::Singleton, args![5_u32, "nightly"])
        .register::<Report>(Lifetime::Transient);
    di_impl::auto_register!(root);

    let scope = root.scope();
    let unit = scope.resolve_required::<UnitOfWork>()?;
    assert_eq!(unit.repository.find(7), "7");
    assert!(Arc::ptr_eq(
        &scope.resolve_required::<UnitOfWork>()?,
        &unit
    ));

    let report = scope.resolve_required::<Report>()?;
    assert_eq!(report.0.retries, 5);
    assert_eq!(report.0.label, "nightly");
    assert_eq!(report.1.find(1), "1");
    Ok(())
}
