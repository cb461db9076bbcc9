//! 容器构建器
//!
//! 收集配置和注册动作，在 [`ContainerBuilder::build`] 时一次性应用到新的根容器。

use crate::container::ServiceContainer;
use crate::options::{ContainerOptions, LoggingOptions};
use di_abstractions::{Arguments, Implements, Injectable};
use infrastructure_common::{ConfigError, ConfigResult, Lifetime};
use std::fmt;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

type Registration = Box<dyn FnOnce(&ServiceContainer)>;

/// 容器构建器
pub struct ContainerBuilder {
    options: ContainerOptions,
    registrations: Vec<Registration>,
}

impl ContainerBuilder {
    /// 使用默认配置创建构建器
    pub fn new() -> Self {
        Self::from_options(ContainerOptions::default())
    }

    /// 使用指定配置创建构建器
    pub fn from_options(options: ContainerOptions) -> Self {
        Self {
            options,
            registrations: Vec::new(),
        }
    }

    /// 从默认配置文件和环境变量加载配置
    pub fn from_config() -> ConfigResult<Self> {
        Ok(Self::from_options(ContainerOptions::load()?))
    }

    /// 替换配置
    pub fn with_options(mut self, options: ContainerOptions) -> Self {
        self.options = options;
        self
    }

    /// 设置根作用域名称
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.options.name = name.into();
        self
    }

    /// 设置日志配置
    pub fn with_logging(mut self, logging: LoggingOptions) -> Self {
        self.options.logging = logging;
        self
    }

    /// 构建时自动注册指定 crate 的组件
    pub fn auto_register_module(mut self, crate_name: impl Into<String>) -> Self {
        self.options.auto_register = true;
        self.options.auto_register_modules.push(crate_name.into());
        self
    }

    /// 构建时自动注册目录中的全部组件
    pub fn auto_register_all(mut self) -> Self {
        self.options.auto_register = true;
        self
    }

    /// 注册组件
    pub fn register<T: Injectable>(self, lifetime: Lifetime) -> Self {
        self.defer(move |container| {
            container.register::<T>(lifetime);
        })
    }

    /// 注册组件并保存构造参数
    pub fn register_with_args<T: Injectable>(self, lifetime: Lifetime, args: Arguments) -> Self {
        self.defer(move |container| {
            container.register_with_args::<T>(lifetime, args);
        })
    }

    /// 为接口注册实现类型
    pub fn register_interface<I, T>(self, lifetime: Lifetime) -> Self
    where
        I: ?Sized + 'static,
        T: Injectable + Implements<I>,
    {
        self.defer(move |container| {
            container.register_interface::<I, T>(lifetime);
        })
    }

    /// 为接口注册实现类型并保存构造参数
    pub fn register_interface_with_args<I, T>(self, lifetime: Lifetime, args: Arguments) -> Self
    where
        I: ?Sized + 'static,
        T: Injectable + Implements<I>,
    {
        self.defer(move |container| {
            container.register_interface_with_args::<I, T>(lifetime, args);
        })
    }

    fn defer(mut self, registration: impl FnOnce(&ServiceContainer) + 'static) -> Self {
        self.registrations.push(Box::new(registration));
        self
    }

    /// 构建根容器
    ///
    /// 手动注册先于自动注册应用，同一类型以手动注册为准。
    pub fn build(self) -> ConfigResult<ServiceContainer> {
        let Self {
            options,
            registrations,
        } = self;
        options.validate()?;

        if options.logging.enabled {
            initialize_logging(&options.logging)?;
        }

        let modules = options.auto_register_modules.clone();
        let auto_register = options.auto_register;
        let container = ServiceContainer::with_options(options);

        let manual = registrations.len();
        for registration in registrations {
            registration(&container);
        }
        debug!("应用手动注册: {} 项", manual);

        if auto_register {
            if modules.is_empty() {
                container.auto_register_all();
            } else {
                for module in &modules {
                    container.auto_register(module);
                }
            }
        }

        info!(
            "容器构建完成: {} (注册类型: {})",
            container.scope_info().name,
            container.registrations().len()
        );
        Ok(container)
    }
}

impl Default for ContainerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ContainerBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContainerBuilder")
            .field("options", &self.options)
            .field("registrations", &self.registrations.len())
            .finish()
    }
}

/// 初始化全局日志订阅者
///
/// 已有全局订阅者时保留原订阅者。
fn initialize_logging(logging: &LoggingOptions) -> ConfigResult<()> {
    let filter = EnvFilter::try_new(&logging.level).map_err(|e| ConfigError::ValidationError {
        message: format!("无效的日志级别 {}: {}", logging.level, e),
    })?;
    let subscriber = tracing_subscriber::fmt().with_env_filter(filter);

    let result = if logging.json {
        subscriber.json().try_init()
    } else {
        subscriber.try_init()
    };

    match result {
        Ok(()) => info!("日志系统初始化完成"),
        Err(e) => debug!("日志系统已初始化，跳过: {}", e),
    }
    Ok(())
}
