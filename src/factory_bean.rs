//! FactoryBean 抽象
//!
//! 类似 Spring 的 FactoryBean：注册到容器中的是工厂对象本身，
//! 而实际暴露给调用方的是工厂产出的对象。

use std::sync::Arc;

use crate::error::ProxyResult;

/// 产出对象的工厂 trait
pub trait FactoryBean: Send + Sync {
    /// 工厂产出的对象类型
    type Object: ?Sized + Send + Sync;

    /// 获取工厂产出的对象
    fn get_object(&self) -> ProxyResult<Arc<Self::Object>>;

    /// 产出对象的类型名称
    fn object_type_name(&self) -> &'static str {
        std::any::type_name::<Self::Object>()
    }

    /// 产出对象是否为单例
    fn is_singleton(&self) -> bool {
        true
    }
}
