//! 图形设备模块
//!
//! 负责 wgpu 实例、适配器和逻辑设备的获取。设备是所有其他 GPU
//! 资源的工厂；依赖它的资源先于它释放。

use tracing::{debug, info};

use crate::core::error::{GraphicsError, Result};

/// 图形设备
///
/// 打包 wgpu 实例、适配器、逻辑设备和命令队列。
pub struct GraphicsDevice {
    // 字段按创建的逆序声明，析构时先释放队列再到实例
    /// 命令队列
    pub queue: wgpu::Queue,
    /// 逻辑设备
    pub device: wgpu::Device,
    /// 图形适配器（GPU）
    pub adapter: wgpu::Adapter,
    /// wgpu 实例（API 入口点）
    pub instance: wgpu::Instance,
}

impl GraphicsDevice {
    /// 创建 wgpu 实例
    ///
    /// # 参数
    ///
    /// * `validation` - 是否开启图形 API 校验层
    pub fn create_instance(validation: bool) -> wgpu::Instance {
        let flags = if validation {
            wgpu::InstanceFlags::debugging()
        } else {
            wgpu::InstanceFlags::default()
        };

        wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            flags,
            dx12_shader_compiler: Default::default(),
            gles_minor_version: wgpu::Gles3MinorVersion::Automatic,
        })
    }

    /// 为给定表面创建设备
    ///
    /// 请求与表面兼容的硬件适配器，再请求逻辑设备和命令队列。
    /// 任何一步失败都是致命的，不做重试。
    pub fn for_surface(instance: wgpu::Instance, surface: &wgpu::Surface<'_>) -> Result<Self> {
        // 3. 请求适配器（选择 GPU）
        debug!("Requesting adapter");
        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: Some(surface),
            force_fallback_adapter: false,
        }))
        .ok_or_else(|| {
            GraphicsError::DeviceInitialization("No compatible adapter found".to_string())
        })?;

        info!("Selected adapter: {:?}", adapter.get_info());

        Self::with_adapter(instance, adapter)
    }

    /// 无窗口设备（测试与离屏渲染）
    ///
    /// 不绑定任何表面；没有可用适配器时返回
    /// [`GraphicsError::DeviceInitialization`]。
    pub fn headless() -> Result<Self> {
        let instance = Self::create_instance(false);

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: None,
            force_fallback_adapter: false,
        }))
        .ok_or_else(|| {
            GraphicsError::DeviceInitialization("No compatible adapter found".to_string())
        })?;

        debug!("Headless adapter: {:?}", adapter.get_info());

        Self::with_adapter(instance, adapter)
    }

    fn with_adapter(instance: wgpu::Instance, adapter: wgpu::Adapter) -> Result<Self> {
        // 4. 请求逻辑设备和命令队列
        debug!("Requesting device and queue");
        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("Main Device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
            },
            None,
        ))
        .map_err(|e| {
            GraphicsError::DeviceInitialization(format!("Failed to create device: {}", e))
        })?;

        Ok(Self {
            queue,
            device,
            adapter,
            instance,
        })
    }

    /// 设备支持的最大 2D 纹理边长
    pub fn max_texture_extent(&self) -> u32 {
        self.device.limits().max_texture_dimension_2d
    }
}

/// 测试辅助：尝试创建无窗口设备，环境没有适配器时返回 None
#[cfg(test)]
pub(crate) fn test_device() -> Option<GraphicsDevice> {
    match GraphicsDevice::headless() {
        Ok(gfx) => Some(gfx),
        Err(e) => {
            eprintln!("skipping GPU test: {}", e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headless_device_reports_limits() {
        let Some(gfx) = test_device() else { return };
        // wgpu 默认下限保证至少 2048
        assert!(gfx.max_texture_extent() >= 2048);
    }
}
