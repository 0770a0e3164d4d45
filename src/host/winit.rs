//! 基于 winit 的宿主窗口实现
//!
//! 以 pump-events 模式驱动 winit 事件循环：每次取事件先泵空操作
//! 系统消息队列，把映射后的事件压入内部缓冲，再从缓冲取出一个。
//! 只有对核心有意义的窗口事件会进入缓冲；winit 每次泵都会产生的
//! 合成事件被过滤掉，否则轮询永远不会报告"无事件"，循环也就
//! 没有机会渲染。

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info};
use winit::event::{ElementState, Event, KeyEvent, WindowEvent};
use winit::event_loop::EventLoop;
use winit::keyboard::PhysicalKey;
use winit::platform::pump_events::EventLoopExtPumpEvents;
use winit::window::{Window, WindowBuilder};

use crate::core::config::WindowConfig;
use crate::core::error::{HostWindowError, Result};
use crate::core::event::{HostEvent, KeyCode};
use crate::host::HostWindow;

/// 基于 winit 的宿主窗口
///
/// 持有事件循环、窗口和待处理事件缓冲，在 `Drop` 时随事件循环
/// 一起销毁窗口。
pub struct WinitHostWindow {
    /// 已映射但尚未被取走的事件
    pending: VecDeque<HostEvent>,
    /// 窗口（Arc 供表面创建共享）
    window: Arc<Window>,
    /// 事件循环（pump-events 模式下保留所有权，最后析构）
    event_loop: EventLoop<()>,
}

impl WinitHostWindow {
    /// 创建窗口
    ///
    /// # 参数
    ///
    /// * `config` - 窗口配置（尺寸、标题、是否可调整大小）
    ///
    /// # 错误
    ///
    /// 事件循环获取失败映射为 [`HostWindowError::Registration`]，
    /// 窗口创建失败映射为 [`HostWindowError::Creation`]。
    pub fn create(config: &WindowConfig) -> Result<Self> {
        debug!("Acquiring event loop");
        let event_loop = EventLoop::new().map_err(|e| {
            HostWindowError::Registration(format!("Failed to acquire event loop: {}", e))
        })?;

        debug!(
            width = config.width,
            height = config.height,
            "Creating window"
        );
        let window = WindowBuilder::new()
            .with_title(config.title.clone())
            .with_inner_size(winit::dpi::PhysicalSize::new(config.width, config.height))
            .with_resizable(config.resizable)
            .build(&event_loop)
            .map_err(|e| HostWindowError::Creation(format!("Failed to create window: {}", e)))?;

        info!(title = %config.title, "Host window created");

        Ok(Self {
            pending: VecDeque::new(),
            window: Arc::new(window),
            event_loop,
        })
    }

    /// 供图形表面创建共享的窗口引用
    pub fn window(&self) -> Arc<Window> {
        self.window.clone()
    }

    /// 窗口客户区尺寸（物理像素）
    pub fn inner_size(&self) -> (u32, u32) {
        let size = self.window.inner_size();
        (size.width, size.height)
    }

    /// 阻塞等待下一个有意义的事件
    ///
    /// 纯窗口演示（无渲染）使用，避免空转烧 CPU；带渲染的循环
    /// 应使用非阻塞的 [`HostWindow::poll_event`]。
    pub fn wait_event(&mut self) -> HostEvent {
        loop {
            if let Some(event) = self.pending.pop_front() {
                return event;
            }
            self.pump(None);
        }
    }

    /// 泵一轮操作系统消息并把映射后的事件压入缓冲
    fn pump(&mut self, timeout: Option<Duration>) {
        let mut collected = Vec::new();
        let _status = self.event_loop.pump_events(timeout, |event, _| {
            if let Event::WindowEvent { event, .. } = event {
                if let Some(mapped) = map_window_event(&event) {
                    collected.push(mapped);
                }
            }
        });
        self.pending.extend(collected);
    }
}

impl HostWindow for WinitHostWindow {
    fn poll_event(&mut self) -> Option<HostEvent> {
        if self.pending.is_empty() {
            self.pump(Some(Duration::ZERO));
        }
        self.pending.pop_front()
    }

    fn set_title(&mut self, title: &str) {
        self.window.set_title(title);
    }

    fn request_close(&mut self) {
        debug!("Close requested");
        self.pending.push_back(HostEvent::Destroy);
    }
}

impl Drop for WinitHostWindow {
    fn drop(&mut self) {
        debug!("Destroying host window");
    }
}

/// 把 winit 窗口事件映射到宿主事件词汇表
///
/// 返回 `None` 表示该事件对核心无意义（重绘请求、光标移动等
/// 高频事件）。
fn map_window_event(event: &WindowEvent) -> Option<HostEvent> {
    match event {
        WindowEvent::CloseRequested | WindowEvent::Destroyed => Some(HostEvent::Destroy),
        WindowEvent::KeyboardInput {
            event:
                KeyEvent {
                    physical_key,
                    state: ElementState::Pressed,
                    repeat: false,
                    ..
                },
            ..
        } => Some(HostEvent::KeyDown(map_key(*physical_key))),
        WindowEvent::Resized(_)
        | WindowEvent::Moved(_)
        | WindowEvent::Focused(_)
        | WindowEvent::MouseInput { .. } => Some(HostEvent::Other),
        _ => None,
    }
}

/// 把 winit 按键码映射到简化按键码
fn map_key(key: PhysicalKey) -> KeyCode {
    match key {
        PhysicalKey::Code(winit::keyboard::KeyCode::KeyQ) => KeyCode::Q,
        PhysicalKey::Code(winit::keyboard::KeyCode::Escape) => KeyCode::Escape,
        PhysicalKey::Code(winit::keyboard::KeyCode::Space) => KeyCode::Space,
        PhysicalKey::Code(winit::keyboard::KeyCode::Enter) => KeyCode::Enter,
        _ => KeyCode::Other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::dpi::PhysicalSize;
    use winit::keyboard::KeyCode as WinitKey;

    #[test]
    fn test_map_key_quit_and_fallback() {
        assert_eq!(map_key(PhysicalKey::Code(WinitKey::KeyQ)), KeyCode::Q);
        assert_eq!(map_key(PhysicalKey::Code(WinitKey::Escape)), KeyCode::Escape);
        assert_eq!(map_key(PhysicalKey::Code(WinitKey::KeyZ)), KeyCode::Other);
    }

    #[test]
    fn test_map_window_event_filters_noise() {
        assert_eq!(
            map_window_event(&WindowEvent::CloseRequested),
            Some(HostEvent::Destroy)
        );
        assert_eq!(
            map_window_event(&WindowEvent::Destroyed),
            Some(HostEvent::Destroy)
        );
        assert_eq!(
            map_window_event(&WindowEvent::Resized(PhysicalSize::new(800, 600))),
            Some(HostEvent::Other)
        );
        assert_eq!(map_window_event(&WindowEvent::RedrawRequested), None);
    }
}
