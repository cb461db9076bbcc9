//! 自动注册
//!
//! `#[derive(Injectable)]` 配合 `#[dependency(..)]` 会在程序启动时向进程级目录提交一条
//! [`AutoRegistration`]。容器按调用方所在的 crate 从目录中挑选并注册。

use crate::container::ServiceContainer;
use crate::instantiator::Activator;
use crate::store::TypeDefinition;
use di_abstractions::Injectable;
use infrastructure_common::{Lifetime, TypeKey};
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use tracing::{debug, info};

/// 自动注册描述
#[derive(Debug, Clone, Copy)]
pub struct AutoRegistration {
    type_key: TypeKey,
    module_path: &'static str,
    lifetime: Lifetime,
    activator: Activator,
}

impl AutoRegistration {
    /// 为可注入类型创建描述
    pub fn of<T: Injectable>(module_path: &'static str, lifetime: Lifetime) -> Self {
        Self {
            type_key: TypeKey::of::<T>(),
            module_path,
            lifetime,
            activator: Activator::of::<T>(),
        }
    }

    /// 组件类型
    pub fn type_key(&self) -> TypeKey {
        self.type_key
    }

    /// 声明组件的模块路径
    pub fn module_path(&self) -> &'static str {
        self.module_path
    }

    /// 所属 crate 名称
    pub fn crate_name(&self) -> &'static str {
        crate_of(self.module_path)
    }

    /// 生命周期
    pub fn lifetime(&self) -> Lifetime {
        self.lifetime
    }

    fn definition(&self) -> TypeDefinition {
        TypeDefinition::new(self.activator, self.lifetime, None)
    }
}

fn crate_of(module_path: &str) -> &str {
    module_path.split("::").next().unwrap_or(module_path)
}

static CATALOG: Lazy<RwLock<Vec<AutoRegistration>>> = Lazy::new(|| RwLock::new(Vec::new()));

/// 向自动注册目录提交描述
///
/// 由派生宏生成的启动函数调用，也可以手动调用。
pub fn submit_auto_registration(registration: AutoRegistration) {
    CATALOG.write().push(registration);
}

/// 自动注册目录的快照
pub fn auto_registrations() -> Vec<AutoRegistration> {
    CATALOG.read().clone()
}

impl ServiceContainer {
    /// 注册与调用方同一 crate 的全部自动注册组件
    ///
    /// `caller_module` 通常是 `module_path!()`，见 [`auto_register!`](crate::auto_register!)。
    /// 不校验构造函数，参数不匹配在首次解析时报告。
    pub fn auto_register(&self, caller_module: &str) -> &Self {
        let target = crate_of(caller_module);
        let selected = auto_registrations()
            .into_iter()
            .filter(|registration| registration.crate_name() == target);
        let count = self.apply_auto_registrations(selected);
        info!("自动注册完成: {} 个组件 (crate: {})", count, target);
        self
    }

    /// 注册目录中的全部组件
    pub fn auto_register_all(&self) -> &Self {
        let count = self.apply_auto_registrations(auto_registrations());
        info!("自动注册完成: {} 个组件", count);
        self
    }

    /// 注册调用方给出的描述列表
    pub fn auto_register_with(
        &self,
        registrations: impl IntoIterator<Item = AutoRegistration>,
    ) -> &Self {
        let count = self.apply_auto_registrations(registrations);
        info!("自动注册完成: {} 个组件", count);
        self
    }

    fn apply_auto_registrations(
        &self,
        registrations: impl IntoIterator<Item = AutoRegistration>,
    ) -> usize {
        let mut count = 0;
        for registration in registrations {
            debug!(
                "自动注册: {} [{}] ({})",
                registration.type_key, registration.lifetime, registration.module_path
            );
            if self.insert_definition(registration.definition()) {
                count += 1;
            }
        }
        count
    }
}

/// 以当前模块为调用方执行自动注册
///
/// ```ignore
/// let container = ServiceContainer::new();
/// di_impl::auto_register!(container);
/// ```
#[macro_export]
macro_rules! auto_register {
    ($container:expr) => {
        $container.auto_register(::std::module_path!())
    };
}
