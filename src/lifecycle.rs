//! 生命周期控制接口
//!
//! 类似 Spring 的 Lifecycle 和 DisposableBean

use crate::error::ProxyResult;

/// 生命周期状态
///
/// 目标槽创建时即为 Initialized；之后只能通过 start/stop 转换，
/// 离开 Initialized 后不会再回到该状态。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// 初始状态，首个目标实例尚未经历任何 start/stop 转换
    Initialized,
    /// start() 之后
    Started,
    /// stop() 之后
    Stopped,
}

/// 生命周期控制 trait，类似 Spring 的 Lifecycle
pub trait Lifecycle: Send + Sync {
    /// 启动
    ///
    /// 处于 Stopped 时会通过创建回调替换目标实例；
    /// 处于 Initialized 时直接进入 Started（初始实例被复用）；
    /// 已经 Started 时为空操作。
    fn start(&self) -> ProxyResult<()>;

    /// 停止，对当前目标实例调用销毁回调
    ///
    /// 即使销毁回调失败，状态也会转换到 Stopped，错误随后返回。
    fn stop(&self) -> ProxyResult<()>;

    /// 是否处于运行状态（Started 或 Initialized），无副作用
    fn is_running(&self) -> bool;
}

/// 销毁回调 trait，类似 Spring 的 DisposableBean
pub trait DisposableBean: Send + Sync {
    /// 最终清理，仅当目标实例已经创建过时执行 stop()
    fn destroy(&self) -> ProxyResult<()>;
}
