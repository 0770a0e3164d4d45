//! 交换链模块
//!
//! 把窗口表面配置成双缓冲、翻转丢弃式的可呈现交换链。
//! Fifo 呈现模式强制等待垂直消隐，是整个循环唯一的限速机制；
//! 呈现过的缓冲内容不保留，每帧都必须完整重绘。

use tracing::{debug, info, trace, warn};

use crate::core::error::{GraphicsError, Result};
use crate::gfx::device::GraphicsDevice;

/// 连续获取失败多少次视为致命
const MAX_ACQUIRE_FAILURES: u32 = 3;

/// 交换链
///
/// 绑定到一个宿主窗口表面。缓冲尺寸在创建时固定为窗口客户区
/// 大小，之后不追随窗口尺寸变化。
pub struct SwapChain {
    /// 窗口表面
    surface: wgpu::Surface<'static>,
    /// 表面配置（创建后尺寸固定）
    config: wgpu::SurfaceConfiguration,
    /// 连续获取失败计数
    consecutive_failures: u32,
}

impl SwapChain {
    /// 配置交换链
    ///
    /// 挑选 BGRA 优先的表面格式，按给定尺寸配置双缓冲 Fifo 表面。
    ///
    /// # 参数
    ///
    /// * `device` - 图形设备
    /// * `surface` - 已和适配器验证过兼容性的窗口表面
    /// * `width` / `height` - 缓冲尺寸（物理像素），必须非零
    pub fn new(
        device: &GraphicsDevice,
        surface: wgpu::Surface<'static>,
        width: u32,
        height: u32,
    ) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(GraphicsError::DeviceInitialization(format!(
                "Swap chain extent must be non-zero, got {}x{}",
                width, height
            ))
            .into());
        }

        // 5. 挑选表面格式（优先 BGRA sRGB）
        let caps = surface.get_capabilities(&device.adapter);
        if caps.formats.is_empty() {
            return Err(GraphicsError::DeviceInitialization(
                "Surface reports no supported formats".to_string(),
            )
            .into());
        }
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| *f == wgpu::TextureFormat::Bgra8UnormSrgb)
            .or_else(|| caps.formats.iter().copied().find(|f| f.is_srgb()))
            .unwrap_or(caps.formats[0]);

        debug!("Surface format: {:?}", format);

        // 6. 配置表面：双缓冲、Fifo（垂直同步）、翻转丢弃
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device.device, &config);

        info!(width, height, format = ?format, "Swap chain configured");

        Ok(Self {
            surface,
            config,
            consecutive_failures: 0,
        })
    }

    /// 获取下一个后台缓冲
    ///
    /// 瞬时失败（超时、过期、丢失）记录警告并按原尺寸重新配置表面，
    /// 返回 `Ok(None)` 让调用方跳过本帧；内存不足或连续失败超过上限
    /// 视为致命错误。
    pub fn acquire(&mut self, device: &GraphicsDevice) -> Result<Option<wgpu::SurfaceTexture>> {
        match self.surface.get_current_texture() {
            Ok(frame) => {
                self.consecutive_failures = 0;
                Ok(Some(frame))
            }
            Err(wgpu::SurfaceError::OutOfMemory) => Err(GraphicsError::SurfaceCreation(
                "Out of memory while acquiring back buffer".to_string(),
            )
            .into()),
            Err(e) => {
                self.consecutive_failures += 1;
                warn!(
                    failures = self.consecutive_failures,
                    "Failed to acquire back buffer: {}", e
                );
                if self.consecutive_failures >= MAX_ACQUIRE_FAILURES {
                    return Err(GraphicsError::SurfaceCreation(format!(
                        "Back buffer acquisition failed {} times in a row: {}",
                        self.consecutive_failures, e
                    ))
                    .into());
                }
                // 按创建时的固定尺寸重新配置，不追随窗口变化
                self.surface.configure(&device.device, &self.config);
                Ok(None)
            }
        }
    }

    /// 表面格式
    pub fn format(&self) -> wgpu::TextureFormat {
        self.config.format
    }

    /// 缓冲宽度（像素）
    pub fn width(&self) -> u32 {
        self.config.width
    }

    /// 缓冲高度（像素）
    pub fn height(&self) -> u32 {
        self.config.height
    }
}

impl Drop for SwapChain {
    fn drop(&mut self) {
        trace!("Releasing swap chain");
    }
}
