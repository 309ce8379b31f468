//! 生命周期感知的热交换代理
//!
//! 为给定的能力类型创建代理：在生命周期重启（stop -> start）时替换
//! 底层目标实例，而调用方持有的门面引用保持不变。生命周期控制调用由
//! 门面自身处理，能力调用通过 [`LifecycleProxy::target`] 在调用时解析
//! 到当前目标实例。

use std::any::type_name;
use std::fmt;
use std::sync::Arc;

use once_cell::sync::OnceCell;
use parking_lot::Mutex;

use crate::{
    error::{ProxyError, ProxyResult},
    factory_bean::FactoryBean,
    lifecycle::{DisposableBean, Lifecycle, Status},
    target_source::HotSwappableTargetSource,
};

/// 目标实例创建回调
pub type TargetCreator<T> = Box<dyn Fn() -> anyhow::Result<Arc<T>> + Send + Sync>;

/// 目标实例销毁回调
pub type TargetDestroyer<T> = Box<dyn Fn(&T) -> anyhow::Result<()> + Send + Sync>;

/// 工厂与门面共享的内部状态
///
/// start/stop 通过 status 互斥锁串行化；目标槽的读取不经过该锁，
/// 因此能力调用不会被进行中的交换阻塞。
struct ProxyCore<T: ?Sized + Send + Sync + 'static> {
    creator: TargetCreator<T>,
    destroyer: TargetDestroyer<T>,

    /// 目标槽，首次访问时懒创建
    target: OnceCell<HotSwappableTargetSource<T>>,

    /// 生命周期状态，同时充当生命周期转换的串行化锁
    status: Mutex<Status>,
}

impl<T: ?Sized + Send + Sync + 'static> ProxyCore<T> {
    /// 懒初始化目标槽
    ///
    /// 创建回调失败时目标槽保持未初始化，下次访问会再次尝试
    fn target_source(&self) -> ProxyResult<&HotSwappableTargetSource<T>> {
        self.target.get_or_try_init(|| {
            tracing::debug!(
                "Creating initial target instance of '{}'",
                type_name::<T>()
            );

            let initial = (self.creator)().map_err(ProxyError::TargetCreationFailed)?;
            Ok(HotSwappableTargetSource::new(initial))
        })
    }

    fn start(&self) -> ProxyResult<()> {
        let mut status = self.status.lock();

        if *status == Status::Stopped {
            // 停止后的启动：用新实例替换目标。
            // 创建失败时提前返回，状态保持 Stopped，调用方可重试。
            let fresh = (self.creator)().map_err(ProxyError::TargetCreationFailed)?;
            self.target_source()?.swap(fresh);

            tracing::debug!(
                "Swapped in fresh target instance of '{}'",
                type_name::<T>()
            );
        }

        *status = Status::Started;
        Ok(())
    }

    fn stop(&self) -> ProxyResult<()> {
        let mut status = self.status.lock();

        let source = self.target_source()?;
        let current = source.target();

        // 状态转换必须完成，销毁回调的错误之后才返回给调用方
        let result = (self.destroyer)(&current).map_err(ProxyError::TargetDestructionFailed);

        *status = Status::Stopped;
        tracing::debug!("Stopped target instance of '{}'", type_name::<T>());

        result
    }

    fn is_running(&self) -> bool {
        matches!(*self.status.lock(), Status::Initialized | Status::Started)
    }

    fn destroy(&self) -> ProxyResult<()> {
        // 从未创建过目标实例时无事可做
        if self.target.get().is_some() {
            self.stop()
        } else {
            Ok(())
        }
    }
}

/// 生命周期感知的代理工厂
///
/// 持有创建/销毁回调、目标槽和稳定身份的门面。
///
/// 使用示例：
/// ```ignore
/// let factory = LifecycleProxyFactory::<dyn Sample>::builder()
///     .creator(|| Ok(Arc::new(SampleImplementation::new()) as Arc<dyn Sample>))
///     .destroyer(|it| it.close())
///     .build()?;
///
/// let proxy = factory.get_object()?;
/// proxy.target()?.hello();
///
/// proxy.stop()?;
/// proxy.start()?; // 此后 target() 解析到新创建的实例
/// ```
pub struct LifecycleProxyFactory<T: ?Sized + Send + Sync + 'static> {
    core: Arc<ProxyCore<T>>,

    /// 缓存的门面，保证多次 get_object() 返回同一身份
    proxy: OnceCell<Arc<LifecycleProxy<T>>>,
}

impl<T: ?Sized + Send + Sync + 'static> LifecycleProxyFactory<T> {
    /// 创建 Builder
    pub fn builder() -> LifecycleProxyFactoryBuilder<T> {
        LifecycleProxyFactoryBuilder::new()
    }

    /// 使用给定创建回调构造工厂，销毁回调为空操作
    pub fn new<F>(creator: F) -> Self
    where
        F: Fn() -> anyhow::Result<Arc<T>> + Send + Sync + 'static,
    {
        Self::with_callbacks(Box::new(creator), Box::new(|_| Ok(())))
    }

    fn with_callbacks(creator: TargetCreator<T>, destroyer: TargetDestroyer<T>) -> Self {
        Self {
            core: Arc::new(ProxyCore {
                creator,
                destroyer,
                target: OnceCell::new(),
                status: Mutex::new(Status::Initialized),
            }),
            proxy: OnceCell::new(),
        }
    }

    /// 返回当前目标实例，每次调用可能得到不同实例
    ///
    /// 首次调用时懒创建目标槽；两次调用之间没有 stop -> start 转换时
    /// 返回同一实例。
    pub fn get_target(&self) -> ProxyResult<Arc<T>> {
        Ok(self.core.target_source()?.target())
    }
}

impl<T: ?Sized + Send + Sync + 'static> FactoryBean for LifecycleProxyFactory<T> {
    type Object = LifecycleProxy<T>;

    /// 获取稳定身份的门面，首次调用时懒创建目标槽
    fn get_object(&self) -> ProxyResult<Arc<LifecycleProxy<T>>> {
        // 先确保目标槽已初始化，创建失败时不构建门面
        self.core.target_source()?;

        let proxy = self.proxy.get_or_init(|| {
            Arc::new(LifecycleProxy {
                core: Arc::clone(&self.core),
            })
        });

        Ok(Arc::clone(proxy))
    }

    /// 报告能力类型而非门面类型，与代理对外呈现的类型一致
    fn object_type_name(&self) -> &'static str {
        type_name::<T>()
    }
}

impl<T: ?Sized + Send + Sync + 'static> Lifecycle for LifecycleProxyFactory<T> {
    fn start(&self) -> ProxyResult<()> {
        self.core.start()
    }

    fn stop(&self) -> ProxyResult<()> {
        self.core.stop()
    }

    fn is_running(&self) -> bool {
        self.core.is_running()
    }
}

impl<T: ?Sized + Send + Sync + 'static> DisposableBean for LifecycleProxyFactory<T> {
    fn destroy(&self) -> ProxyResult<()> {
        self.core.destroy()
    }
}

impl<T: ?Sized + Send + Sync + 'static> fmt::Debug for LifecycleProxyFactory<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LifecycleProxyFactory")
            .field("target_type", &type_name::<T>())
            .field("status", &*self.core.status.lock())
            .finish_non_exhaustive()
    }
}

/// LifecycleProxyFactory 的 Builder
///
/// creator 为必填项，缺失时 build() 返回 InvalidArgument；
/// destroyer 可选，默认空操作。
pub struct LifecycleProxyFactoryBuilder<T: ?Sized + Send + Sync + 'static> {
    creator: Option<TargetCreator<T>>,
    destroyer: Option<TargetDestroyer<T>>,
}

impl<T: ?Sized + Send + Sync + 'static> LifecycleProxyFactoryBuilder<T> {
    /// 创建空的 Builder
    pub fn new() -> Self {
        Self {
            creator: None,
            destroyer: None,
        }
    }

    /// 设置创建回调
    pub fn creator<F>(mut self, creator: F) -> Self
    where
        F: Fn() -> anyhow::Result<Arc<T>> + Send + Sync + 'static,
    {
        self.creator = Some(Box::new(creator));
        self
    }

    /// 设置销毁回调
    pub fn destroyer<F>(mut self, destroyer: F) -> Self
    where
        F: Fn(&T) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        self.destroyer = Some(Box::new(destroyer));
        self
    }

    /// 构造工厂
    pub fn build(self) -> ProxyResult<LifecycleProxyFactory<T>> {
        let creator = self
            .creator
            .ok_or_else(|| ProxyError::InvalidArgument("Creator must not be null".to_string()))?;
        let destroyer = self.destroyer.unwrap_or_else(|| Box::new(|_| Ok(())));

        Ok(LifecycleProxyFactory::with_callbacks(creator, destroyer))
    }
}

impl<T: ?Sized + Send + Sync + 'static> Default for LifecycleProxyFactoryBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// 稳定身份的代理门面
///
/// 目标实例被替换后，调用方持有的门面引用保持不变；每次 [`target`]
/// 调用都重新读取目标槽，因此总是转发到当前目标实例。使用方通常为
/// 自己的能力 trait 写一个转发实现：
///
/// ```ignore
/// impl Sample for LifecycleProxy<dyn Sample> {
///     fn hello(&self) -> String {
///         self.target().expect("target initialized").hello()
///     }
/// }
/// ```
///
/// [`target`]: LifecycleProxy::target
pub struct LifecycleProxy<T: ?Sized + Send + Sync + 'static> {
    core: Arc<ProxyCore<T>>,
}

impl<T: ?Sized + Send + Sync + 'static> LifecycleProxy<T> {
    /// 解析当前目标实例
    pub fn target(&self) -> ProxyResult<Arc<T>> {
        Ok(self.core.target_source()?.target())
    }
}

impl<T: ?Sized + Send + Sync + 'static> Lifecycle for LifecycleProxy<T> {
    fn start(&self) -> ProxyResult<()> {
        self.core.start()
    }

    fn stop(&self) -> ProxyResult<()> {
        self.core.stop()
    }

    fn is_running(&self) -> bool {
        self.core.is_running()
    }
}

impl<T: ?Sized + Send + Sync + 'static> DisposableBean for LifecycleProxy<T> {
    fn destroy(&self) -> ProxyResult<()> {
        self.core.destroy()
    }
}

impl<T: ?Sized + Send + Sync + 'static> fmt::Debug for LifecycleProxy<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LifecycleProxy")
            .field("target_type", &type_name::<T>())
            .finish_non_exhaustive()
    }
}
