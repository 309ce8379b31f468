// lifecycle-proxy: 生命周期感知的热交换代理
//
// 为某一能力接口提供稳定身份的代理门面，支持：
// - 生命周期驱动的目标实例替换（stop 后的 start 通过创建回调重建目标）
// - 懒初始化（首次访问时才创建目标实例）
// - 线程安全的目标槽（读取方永远看到完整的新旧实例之一）
// - 稳定的门面身份（目标被替换后调用方持有的引用不变）

pub mod error;
pub mod factory_bean;
pub mod lifecycle;
pub mod proxy;
pub mod target_source;

// 重新导出常用类型
pub use error::{ProxyError, ProxyResult};
pub use factory_bean::FactoryBean;
pub use lifecycle::{DisposableBean, Lifecycle, Status};
pub use proxy::{
    LifecycleProxy, LifecycleProxyFactory, LifecycleProxyFactoryBuilder, TargetCreator,
    TargetDestroyer,
};
pub use target_source::HotSwappableTargetSource;

/// Prelude 模块，包含常用的 traits 和类型
pub mod prelude {
    pub use crate::error::{ProxyError, ProxyResult};
    pub use crate::factory_bean::FactoryBean;
    pub use crate::lifecycle::{DisposableBean, Lifecycle, Status};
    pub use crate::proxy::{LifecycleProxy, LifecycleProxyFactory, LifecycleProxyFactoryBuilder};
    pub use crate::target_source::HotSwappableTargetSource;
}
