//! 构造参数
//!
//! 注册时保存、解析时可覆盖的有序参数列表

use infrastructure_common::{ArgumentError, ArgumentResult};
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// 单个不透明参数值
pub type ArgumentValue = Arc<dyn Any + Send + Sync>;

/// 有序的构造参数列表
///
/// 克隆只复制引用计数，参数值本身在注册和每次构造之间共享。
#[derive(Clone, Default)]
pub struct Arguments {
    values: Vec<ArgumentValue>,
}

impl Arguments {
    /// 创建空参数列表
    pub fn new() -> Self {
        Self { values: Vec::new() }
    }

    /// 追加一个参数
    pub fn with<T: Any + Send + Sync>(mut self, value: T) -> Self {
        self.values.push(Arc::new(value));
        self
    }

    /// 参数数量
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// 校验参数数量
    pub fn expect_arity(&self, expected: usize) -> ArgumentResult<()> {
        if self.values.len() == expected {
            Ok(())
        } else {
            Err(ArgumentError::ArityMismatch {
                expected,
                actual: self.values.len(),
            })
        }
    }

    /// 按位置借用参数
    pub fn get_ref<T: Any>(&self, index: usize) -> ArgumentResult<&T> {
        let value = self
            .values
            .get(index)
            .ok_or(ArgumentError::Missing { index })?;
        value
            .as_ref()
            .downcast_ref::<T>()
            .ok_or(ArgumentError::TypeMismatch {
                index,
                expected: std::any::type_name::<T>(),
            })
    }

    /// 按位置取出参数的副本
    pub fn get<T: Any + Clone>(&self, index: usize) -> ArgumentResult<T> {
        self.get_ref::<T>(index).cloned()
    }

    /// 按位置取出字符串参数，接受 `String` 和 `&'static str`
    pub fn text(&self, index: usize) -> ArgumentResult<String> {
        if let Ok(value) = self.get_ref::<String>(index) {
            return Ok(value.clone());
        }
        match self.get_ref::<&'static str>(index) {
            Ok(value) => Ok((*value).to_string()),
            Err(ArgumentError::TypeMismatch { index, .. }) => Err(ArgumentError::TypeMismatch {
                index,
                expected: "String",
            }),
            Err(e) => Err(e),
        }
    }
}

impl fmt::Debug for Arguments {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Arguments")
            .field("len", &self.values.len())
            .finish()
    }
}

/// 构造参数列表
///
/// ```ignore
/// let args = args!["Very cool!", 42_u32];
/// ```
#[macro_export]
macro_rules! args {
    () => {
        $crate::Arguments::new()
    };
    ($($value:expr),+ $(,)?) => {
        $crate::Arguments::new()$(.with($value))+
    };
}
