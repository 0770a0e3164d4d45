//! 图形模块
//!
//! 封装基于 wgpu 的 GPU 引导与渲染，自底向上依次是：
//! 实例 → 表面 → 适配器 → 设备 → 交换链 → 渲染表面 → 几何体 →
//! 着色器 → 管线。任何一步失败都立即中止后续引导，携带阶段化的
//! 错误向上传播；已创建的资源随作用域退出按创建的逆序释放。

pub mod device;
pub mod geometry;
pub mod pipeline;
pub mod renderer;
pub mod surfaces;
pub mod swapchain;
pub mod viewport;

pub use device::GraphicsDevice;
pub use geometry::{create_default_geometry, GeometryBuffer, Vertex};
pub use pipeline::{PipelineState, ShaderProgram};
pub use renderer::{clear_pass, draw_pass, render_frame, to_wgpu_color};
pub use surfaces::{RenderSurfaces, DEPTH_STENCIL_FORMAT};
pub use swapchain::SwapChain;
pub use viewport::Viewport;

use std::sync::Arc;

use tracing::{debug, info};
use winit::window::Window;

use crate::core::error::{GraphicsError, Result};

/// 初始化图形设备和交换链
///
/// 设备引导的第 1-6 步（续编号见各子模块）。交换链尺寸取窗口
/// 当前客户区的物理像素尺寸，此后固定。
///
/// # 参数
///
/// * `window` - 宿主窗口
/// * `validation` - 是否开启图形 API 校验层
pub fn initialize(window: Arc<Window>, validation: bool) -> Result<(GraphicsDevice, SwapChain)> {
    info!("Initializing graphics");

    // 1. 创建实例
    debug!(validation, "Creating instance");
    let instance = GraphicsDevice::create_instance(validation);

    // 2. 创建窗口表面
    debug!("Creating surface");
    let size = window.inner_size();
    let surface = instance.create_surface(window).map_err(|e| {
        GraphicsError::DeviceInitialization(format!("Failed to create surface: {}", e))
    })?;

    // 3-4. 请求适配器与设备
    let device = GraphicsDevice::for_surface(instance, &surface)?;

    // 5-6. 配置交换链
    let swapchain = SwapChain::new(&device, surface, size.width, size.height)?;

    info!("Graphics initialized");
    Ok((device, swapchain))
}
