//! 渲染表面模块
//!
//! 管理渲染写入的两个输出：每帧包裹后台缓冲的渲染目标视图，
//! 以及与交换链同尺寸的深度模板缓冲。

use tracing::{debug, trace};

use crate::core::error::{GraphicsError, Result};
use crate::gfx::device::GraphicsDevice;

/// 深度模板格式（24 位深度 / 8 位模板）
pub const DEPTH_STENCIL_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth24PlusStencil8;

/// 深度清除值（远平面）
pub const DEPTH_CLEAR_VALUE: f32 = 1.0;

/// 模板清除值
pub const STENCIL_CLEAR_VALUE: u32 = 0;

/// 渲染表面
///
/// 持有深度模板纹理及其视图。渲染目标视图不在此缓存：
/// 翻转丢弃式交换链每次获取都给出新纹理，视图按帧创建。
pub struct RenderSurfaces {
    // 视图先声明先释放，纹理随后
    /// 深度模板视图
    pub depth_view: wgpu::TextureView,
    /// 深度模板纹理
    depth_texture: wgpu::Texture,
    /// 表面宽度（像素）
    width: u32,
    /// 表面高度（像素）
    height: u32,
}

impl RenderSurfaces {
    /// 创建深度模板缓冲
    ///
    /// 在设备与交换链就绪后调用，尺寸必须与交换链一致。
    ///
    /// # 错误
    ///
    /// 尺寸为零或超出设备上限时返回
    /// [`GraphicsError::SurfaceCreation`]，不创建任何资源。
    pub fn new(device: &GraphicsDevice, width: u32, height: u32) -> Result<Self> {
        let max_extent = device.max_texture_extent();
        if width == 0 || height == 0 || width > max_extent || height > max_extent {
            return Err(GraphicsError::SurfaceCreation(format!(
                "Depth-stencil extent {}x{} outside device range 1..={}",
                width, height, max_extent
            ))
            .into());
        }

        debug!(width, height, "Creating depth-stencil buffer");
        let depth_texture = device.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Depth-Stencil Texture"),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: DEPTH_STENCIL_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        let depth_view = depth_texture.create_view(&wgpu::TextureViewDescriptor::default());

        Ok(Self {
            depth_view,
            depth_texture,
            width,
            height,
        })
    }

    /// 为刚获取的后台缓冲创建渲染目标视图
    pub fn back_buffer_view(frame: &wgpu::SurfaceTexture) -> wgpu::TextureView {
        frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default())
    }

    /// 深度模板纹理
    pub fn depth_texture(&self) -> &wgpu::Texture {
        &self.depth_texture
    }

    /// 表面宽度（像素）
    pub fn width(&self) -> u32 {
        self.width
    }

    /// 表面高度（像素）
    pub fn height(&self) -> u32 {
        self.height
    }
}

impl Drop for RenderSurfaces {
    fn drop(&mut self) {
        trace!("Releasing depth-stencil buffer");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::device::test_device;

    #[test]
    fn test_depth_buffer_matches_requested_extent() {
        let Some(gfx) = test_device() else { return };

        let surfaces = RenderSurfaces::new(&gfx, 600, 300).unwrap();
        assert_eq!(surfaces.width(), 600);
        assert_eq!(surfaces.height(), 300);
        assert_eq!(surfaces.depth_texture().format(), DEPTH_STENCIL_FORMAT);
    }

    #[test]
    fn test_zero_extent_is_rejected() {
        let Some(gfx) = test_device() else { return };

        assert!(RenderSurfaces::new(&gfx, 0, 300).is_err());
        assert!(RenderSurfaces::new(&gfx, 600, 0).is_err());
    }
}
