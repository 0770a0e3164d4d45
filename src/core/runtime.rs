//! 帧循环模块
//!
//! 实现"轮询 / 渲染"交替的主循环状态机：每次迭代先非阻塞地取一个
//! 宿主事件，取到则只分发事件；否则采样帧时钟、更新标题栏诊断并
//! 执行一次渲染回调。收到销毁事件即干净退出。

use tracing::{debug, error, info, trace};

use crate::core::clock::{FrameClock, FrameSample};
use crate::core::error::Result;
use crate::core::event::{HostEvent, KeyCode};
use crate::host::HostWindow;

/// 帧循环状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    /// 等待取出宿主事件
    Polling,
    /// 正在执行渲染回调
    Rendering,
    /// 收到销毁信号，循环已终止
    Quitting,
}

/// 帧循环
///
/// 持有帧时钟并驱动轮询 / 渲染交替：
///
/// - 事件可用：分发事件（销毁进入 [`LoopState::Quitting`]，Q 键请求
///   关闭窗口），本次迭代不渲染；
/// - 无事件：采样时钟，把瞬时帧率和总运行时间写入窗口标题，
///   然后执行一次渲染回调。
///
/// 事件总是先于渲染被排空，迭代开始时已排队的销毁事件在任何
/// 渲染之前结束循环。
pub struct FrameLoop {
    /// 基础标题，标题栏诊断附加在其后
    title: String,
    /// 帧时钟（循环独占，不是全局状态）
    clock: FrameClock,
    /// 当前状态
    state: LoopState,
    /// 已完成的渲染次数
    frames_rendered: u64,
}

impl FrameLoop {
    /// 创建帧循环
    ///
    /// # 参数
    ///
    /// * `title` - 窗口基础标题，诊断信息附加在其后
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            clock: FrameClock::start(),
            state: LoopState::Polling,
            frames_rendered: 0,
        }
    }

    /// 运行循环直到宿主报告销毁
    ///
    /// # 参数
    ///
    /// * `host` - 宿主窗口协作者
    /// * `render` - 渲染回调，每个无事件的迭代调用一次
    ///
    /// # 返回值
    ///
    /// 干净退出返回 `Ok(())`；渲染回调的错误立即结束循环并向上传播。
    pub fn run<H, F>(&mut self, host: &mut H, mut render: F) -> Result<()>
    where
        H: HostWindow,
        F: FnMut(&FrameSample) -> Result<()>,
    {
        info!("Entering frame loop");

        loop {
            self.state = LoopState::Polling;

            if let Some(event) = host.poll_event() {
                match event {
                    HostEvent::Destroy => {
                        self.state = LoopState::Quitting;
                        info!(
                            frames = self.frames_rendered,
                            "Destroy received, leaving frame loop"
                        );
                        return Ok(());
                    }
                    HostEvent::KeyDown(KeyCode::Q) => {
                        debug!("Quit key pressed, requesting close");
                        host.request_close();
                    }
                    HostEvent::KeyDown(key) => {
                        trace!(key = key.name(), "Key ignored");
                    }
                    HostEvent::Other => {}
                }
                continue;
            }

            self.state = LoopState::Rendering;
            let sample = self.clock.tick();
            host.set_title(&self.format_title(&sample));

            if let Err(e) = render(&sample) {
                error!(frames = self.frames_rendered, "Render failed: {}", e);
                return Err(e);
            }
            self.frames_rendered += 1;
        }
    }

    /// 当前状态
    pub fn state(&self) -> LoopState {
        self.state
    }

    /// 已完成的渲染次数
    pub fn frames_rendered(&self) -> u64 {
        self.frames_rendered
    }

    /// 组装标题栏诊断文本
    ///
    /// 瞬时帧率不可用（零增量）时显示 `--.-`。
    fn format_title(&self, sample: &FrameSample) -> String {
        match sample.frames_per_second() {
            Some(fps) => format!(
                "{} | {:.1} fps | {:.1}s",
                self.title, fps, sample.total_seconds
            ),
            None => format!("{} | --.- fps | {:.1}s", self.title, sample.total_seconds),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::{GraphicsError, HelloGpuError};
    use std::collections::VecDeque;

    /// 脚本化的宿主桩：按脚本逐次返回事件，脚本耗尽后返回销毁事件
    struct ScriptedHost {
        script: VecDeque<Option<HostEvent>>,
        titles: Vec<String>,
        close_requested: bool,
    }

    impl ScriptedHost {
        fn new(script: Vec<Option<HostEvent>>) -> Self {
            Self {
                script: script.into(),
                titles: Vec::new(),
                close_requested: false,
            }
        }
    }

    impl HostWindow for ScriptedHost {
        fn poll_event(&mut self) -> Option<HostEvent> {
            match self.script.pop_front() {
                Some(slot) => slot,
                None => Some(HostEvent::Destroy),
            }
        }

        fn set_title(&mut self, title: &str) {
            self.titles.push(title.to_string());
        }

        fn request_close(&mut self) {
            self.close_requested = true;
            self.script.push_back(Some(HostEvent::Destroy));
        }
    }

    #[test]
    fn test_queued_destroy_quits_without_rendering() {
        let mut host = ScriptedHost::new(vec![Some(HostEvent::Destroy)]);
        let mut frame_loop = FrameLoop::new("demo");
        let mut renders = 0;

        let result = frame_loop.run(&mut host, |_| {
            renders += 1;
            Ok(())
        });

        assert!(result.is_ok());
        assert_eq!(renders, 0);
        assert_eq!(frame_loop.state(), LoopState::Quitting);
        assert_eq!(frame_loop.frames_rendered(), 0);
        assert!(host.titles.is_empty());
    }

    #[test]
    fn test_renders_once_per_empty_poll() {
        let mut host = ScriptedHost::new(vec![None, None, None]);
        let mut frame_loop = FrameLoop::new("demo");
        let mut renders = 0;

        frame_loop
            .run(&mut host, |_| {
                renders += 1;
                Ok(())
            })
            .unwrap();

        assert_eq!(renders, 3);
        assert_eq!(frame_loop.frames_rendered(), 3);
        assert_eq!(host.titles.len(), 3);
        assert!(host.titles.iter().all(|t| t.starts_with("demo | ")));
    }

    #[test]
    fn test_quit_key_requests_close_without_rendering() {
        let mut host = ScriptedHost::new(vec![Some(HostEvent::KeyDown(KeyCode::Q))]);
        let mut frame_loop = FrameLoop::new("demo");
        let mut renders = 0;

        frame_loop
            .run(&mut host, |_| {
                renders += 1;
                Ok(())
            })
            .unwrap();

        assert!(host.close_requested);
        assert_eq!(renders, 0);
        assert_eq!(frame_loop.state(), LoopState::Quitting);
    }

    #[test]
    fn test_event_iterations_do_not_render() {
        let mut host = ScriptedHost::new(vec![
            Some(HostEvent::Other),
            Some(HostEvent::KeyDown(KeyCode::Space)),
            None,
        ]);
        let mut frame_loop = FrameLoop::new("demo");
        let mut renders = 0;

        frame_loop
            .run(&mut host, |_| {
                renders += 1;
                Ok(())
            })
            .unwrap();

        // 两个事件迭代不渲染，只有空轮询的那次迭代渲染
        assert_eq!(renders, 1);
        assert_eq!(frame_loop.frames_rendered(), 1);
    }

    #[test]
    fn test_render_error_propagates() {
        let mut host = ScriptedHost::new(vec![None, None]);
        let mut frame_loop = FrameLoop::new("demo");

        let result = frame_loop.run(&mut host, |_| {
            Err(HelloGpuError::Graphics(GraphicsError::SurfaceCreation(
                "lost".to_string(),
            )))
        });

        assert!(result.is_err());
        assert_eq!(frame_loop.frames_rendered(), 0);
    }

    #[test]
    fn test_title_shows_fps_and_elapsed() {
        let frame_loop = FrameLoop::new("demo");

        let sample = FrameSample {
            delta_seconds: 0.02,
            total_seconds: 1.26,
        };
        assert_eq!(frame_loop.format_title(&sample), "demo | 50.0 fps | 1.3s");

        let stalled = FrameSample {
            delta_seconds: 0.0,
            total_seconds: 2.0,
        };
        assert_eq!(frame_loop.format_title(&stalled), "demo | --.- fps | 2.0s");
    }
}
