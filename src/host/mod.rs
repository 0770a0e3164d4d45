//! 宿主窗口模块
//!
//! 核心只通过 [`HostWindow`] trait 与窗口系统交互：非阻塞地取事件、
//! 更新标题、请求关闭。生产实现基于 winit（`winit` 子模块），
//! 测试可以用脚本化的桩替代。

pub mod winit;

use crate::core::event::HostEvent;

/// 宿主窗口协作者接口
///
/// 与具体窗口系统解耦的最小接口。窗口的销毁由实现的 `Drop` 负责。
pub trait HostWindow {
    /// 非阻塞地取出一个待处理事件
    ///
    /// 无事件时返回 `None`，帧循环据此决定本次迭代是否渲染。
    fn poll_event(&mut self) -> Option<HostEvent>;

    /// 更新窗口标题
    fn set_title(&mut self, title: &str);

    /// 请求关闭窗口
    ///
    /// 关闭以 [`HostEvent::Destroy`] 的形式经事件队列返回，
    /// 和用户点击关闭按钮走同一条路径。
    fn request_close(&mut self);
}

pub use self::winit::WinitHostWindow;
