//! 着色器与管线模块
//!
//! 着色器源码在构建期以 `include_str!` 嵌入，对核心而言是两段
//! 不透明的阶段制品，运行期不重新编译、不做反射。创建都在校验
//! 错误作用域内进行：顶点布局与着色器签名不匹配会作为
//! [`GraphicsError::ShaderLinkage`] 浮出，而不是让进程崩溃。

use tracing::{debug, trace};

use crate::core::error::{GraphicsError, Result};
use crate::gfx::device::GraphicsDevice;
use crate::gfx::surfaces::DEPTH_STENCIL_FORMAT;

/// 顶点着色器源码（构建期嵌入）
const VERTEX_SHADER_SOURCE: &str = include_str!("shaders/vertex.wgsl");

/// 片元着色器源码（构建期嵌入）
const FRAGMENT_SHADER_SOURCE: &str = include_str!("shaders/fragment.wgsl");

/// 着色器程序
///
/// 不可变的顶点 / 片元阶段模块对。
pub struct ShaderProgram {
    /// 顶点阶段
    vertex: wgpu::ShaderModule,
    /// 片元阶段
    fragment: wgpu::ShaderModule,
}

impl ShaderProgram {
    /// 从嵌入的源码创建两个阶段
    pub fn from_embedded(device: &GraphicsDevice) -> Result<Self> {
        Self::from_sources(device, VERTEX_SHADER_SOURCE, FRAGMENT_SHADER_SOURCE)
    }

    /// 从给定源码创建两个阶段
    ///
    /// 每个阶段都在校验错误作用域内创建；无效的阶段返回
    /// [`GraphicsError::ShaderLinkage`]，失败时不保留半成品模块。
    pub fn from_sources(
        device: &GraphicsDevice,
        vertex_source: &str,
        fragment_source: &str,
    ) -> Result<Self> {
        debug!("Creating shader stages");
        let vertex = create_stage(device, "Vertex Shader", vertex_source)?;
        let fragment = create_stage(device, "Fragment Shader", fragment_source)?;
        Ok(Self { vertex, fragment })
    }

    /// 顶点阶段模块
    pub fn vertex_stage(&self) -> &wgpu::ShaderModule {
        &self.vertex
    }

    /// 片元阶段模块
    pub fn fragment_stage(&self) -> &wgpu::ShaderModule {
        &self.fragment
    }
}

/// 在校验错误作用域内创建单个着色器阶段
fn create_stage(device: &GraphicsDevice, label: &str, source: &str) -> Result<wgpu::ShaderModule> {
    device
        .device
        .push_error_scope(wgpu::ErrorFilter::Validation);
    let module = device
        .device
        .create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(label),
            source: wgpu::ShaderSource::Wgsl(source.into()),
        });
    if let Some(e) = pollster::block_on(device.device.pop_error_scope()) {
        return Err(GraphicsError::ShaderLinkage(format!("{}: {}", label, e)).into());
    }
    Ok(module)
}

/// 管线状态
///
/// 把顶点布局、三角形列表拓扑和两个着色器阶段链接成一条渲染管线。
/// 深度模板状态固定：格式 [`DEPTH_STENCIL_FORMAT`]，深度测试 Less，
/// 深度写入开启。
pub struct PipelineState {
    /// 渲染管线
    pipeline: wgpu::RenderPipeline,
}

impl PipelineState {
    /// 创建渲染管线
    ///
    /// # 参数
    ///
    /// * `shaders` - 顶点 / 片元阶段对
    /// * `vertex_layout` - 顶点缓冲布局，必须与顶点着色器的输入签名结构兼容
    /// * `color_format` - 颜色目标格式（交换链或离屏纹理的格式）
    ///
    /// # 错误
    ///
    /// 布局与签名不匹配（缺少 location、数值类不符）返回
    /// [`GraphicsError::ShaderLinkage`]；失败的管线对象被丢弃，
    /// 设备上不保留部分创建的状态。
    pub fn new(
        device: &GraphicsDevice,
        shaders: &ShaderProgram,
        vertex_layout: wgpu::VertexBufferLayout<'static>,
        color_format: wgpu::TextureFormat,
    ) -> Result<Self> {
        debug!(format = ?color_format, "Creating render pipeline");

        let layout = device
            .device
            .create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("Render Pipeline Layout"),
                bind_group_layouts: &[],
                push_constant_ranges: &[],
            });

        device
            .device
            .push_error_scope(wgpu::ErrorFilter::Validation);
        let pipeline = device
            .device
            .create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some("Render Pipeline"),
                layout: Some(&layout),
                vertex: wgpu::VertexState {
                    module: shaders.vertex_stage(),
                    entry_point: "vs_main",
                    buffers: &[vertex_layout],
                },
                fragment: Some(wgpu::FragmentState {
                    module: shaders.fragment_stage(),
                    entry_point: "fs_main",
                    targets: &[Some(wgpu::ColorTargetState {
                        format: color_format,
                        blend: Some(wgpu::BlendState::REPLACE),
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                }),
                primitive: wgpu::PrimitiveState {
                    topology: wgpu::PrimitiveTopology::TriangleList,
                    strip_index_format: None,
                    front_face: wgpu::FrontFace::Ccw,
                    cull_mode: None,
                    polygon_mode: wgpu::PolygonMode::Fill,
                    unclipped_depth: false,
                    conservative: false,
                },
                depth_stencil: Some(wgpu::DepthStencilState {
                    format: DEPTH_STENCIL_FORMAT,
                    depth_write_enabled: true,
                    depth_compare: wgpu::CompareFunction::Less,
                    stencil: wgpu::StencilState::default(),
                    bias: wgpu::DepthBiasState::default(),
                }),
                multisample: wgpu::MultisampleState {
                    count: 1,
                    mask: !0,
                    alpha_to_coverage_enabled: false,
                },
                multiview: None,
            });
        if let Some(e) = pollster::block_on(device.device.pop_error_scope()) {
            drop(pipeline);
            return Err(
                GraphicsError::ShaderLinkage(format!("Pipeline linkage failed: {}", e)).into(),
            );
        }

        Ok(Self { pipeline })
    }

    /// 渲染管线
    pub fn pipeline(&self) -> &wgpu::RenderPipeline {
        &self.pipeline
    }
}

impl Drop for PipelineState {
    fn drop(&mut self) {
        trace!("Releasing render pipeline");
    }
}
