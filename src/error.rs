//! 统一的错误处理类型
//!
//! 创建/销毁回调来自使用方，其错误以 anyhow::Error 的形式原样保留，
//! 本组件不做重试也不记录日志，全部向调用方传播。

use thiserror::Error;

/// 代理操作的统一 Result 类型
pub type ProxyResult<T> = Result<T, ProxyError>;

/// 代理错误分类
#[derive(Debug, Error)]
pub enum ProxyError {
    /// 构造参数缺失
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// 创建回调在 start() 或懒初始化期间失败
    ///
    /// 生命周期状态保持不变，调用方可以重试 start()
    #[error("Failed to create target instance: {0}")]
    TargetCreationFailed(anyhow::Error),

    /// 销毁回调在 stop() 期间失败
    ///
    /// 到 Stopped 的状态转换仍然完成，之后错误才返回给调用方
    #[error("Failed to destroy target instance: {0}")]
    TargetDestructionFailed(anyhow::Error),
}
