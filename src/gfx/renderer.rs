//! 渲染通道编码
//!
//! 每帧的固定流程：清除渲染目标到背景色，清除深度到远平面、
//! 模板到 0，绑定渲染目标和深度模板输出，绑定管线、视口和顶点
//! 缓冲，一次非索引绘制提交全部顶点（3 × 三角形数），最后经
//! 交换链呈现。

use tracing::trace;

use crate::core::error::Result;
use crate::gfx::device::GraphicsDevice;
use crate::gfx::geometry::GeometryBuffer;
use crate::gfx::pipeline::PipelineState;
use crate::gfx::surfaces::{RenderSurfaces, DEPTH_CLEAR_VALUE, STENCIL_CLEAR_VALUE};
use crate::gfx::swapchain::SwapChain;
use crate::gfx::viewport::Viewport;

/// 把配置中的 RGBA 分量转成 wgpu 颜色
pub fn to_wgpu_color(rgba: [f32; 4]) -> wgpu::Color {
    wgpu::Color {
        r: rgba[0] as f64,
        g: rgba[1] as f64,
        b: rgba[2] as f64,
        a: rgba[3] as f64,
    }
}

/// 编码一次只清屏的渲染通道
///
/// 深度附件可选：纯清屏演示还没有深度缓冲。
pub fn clear_pass(
    encoder: &mut wgpu::CommandEncoder,
    color_view: &wgpu::TextureView,
    depth_view: Option<&wgpu::TextureView>,
    clear: wgpu::Color,
) {
    let _pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
        label: Some("Clear Pass"),
        color_attachments: &[Some(wgpu::RenderPassColorAttachment {
            view: color_view,
            resolve_target: None,
            ops: wgpu::Operations {
                load: wgpu::LoadOp::Clear(clear),
                store: wgpu::StoreOp::Store,
            },
        })],
        depth_stencil_attachment: depth_view.map(|view| wgpu::RenderPassDepthStencilAttachment {
            view,
            depth_ops: Some(wgpu::Operations {
                load: wgpu::LoadOp::Clear(DEPTH_CLEAR_VALUE),
                store: wgpu::StoreOp::Store,
            }),
            stencil_ops: Some(wgpu::Operations {
                load: wgpu::LoadOp::Clear(STENCIL_CLEAR_VALUE),
                store: wgpu::StoreOp::Store,
            }),
        }),
        timestamp_writes: None,
        occlusion_query_set: None,
    });
}

/// 编码一次完整的绘制通道
///
/// 清除两个附件后按固定顺序绑定：管线、视口、顶点缓冲，
/// 最后一次非索引绘制提交几何缓冲的全部顶点。
pub fn draw_pass(
    encoder: &mut wgpu::CommandEncoder,
    color_view: &wgpu::TextureView,
    depth_view: &wgpu::TextureView,
    clear: wgpu::Color,
    pipeline: &PipelineState,
    geometry: &GeometryBuffer,
    viewport: &Viewport,
) {
    let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
        label: Some("Draw Pass"),
        color_attachments: &[Some(wgpu::RenderPassColorAttachment {
            view: color_view,
            resolve_target: None,
            ops: wgpu::Operations {
                load: wgpu::LoadOp::Clear(clear),
                store: wgpu::StoreOp::Store,
            },
        })],
        depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
            view: depth_view,
            depth_ops: Some(wgpu::Operations {
                load: wgpu::LoadOp::Clear(DEPTH_CLEAR_VALUE),
                store: wgpu::StoreOp::Store,
            }),
            stencil_ops: Some(wgpu::Operations {
                load: wgpu::LoadOp::Clear(STENCIL_CLEAR_VALUE),
                store: wgpu::StoreOp::Store,
            }),
        }),
        timestamp_writes: None,
        occlusion_query_set: None,
    });

    pass.set_pipeline(pipeline.pipeline());
    viewport.apply(&mut pass);
    pass.set_vertex_buffer(0, geometry.buffer().slice(..));
    pass.draw(0..geometry.vertex_count(), 0..1);
}

/// 渲染并呈现一帧
///
/// 后台缓冲获取的瞬时失败跳过本帧（交换链内部记录并限定失败
/// 次数），其余错误向上传播。
pub fn render_frame(
    device: &GraphicsDevice,
    swapchain: &mut SwapChain,
    surfaces: &RenderSurfaces,
    pipeline: &PipelineState,
    geometry: &GeometryBuffer,
    viewport: &Viewport,
    clear: wgpu::Color,
) -> Result<()> {
    let Some(frame) = swapchain.acquire(device)? else {
        return Ok(());
    };
    let color_view = RenderSurfaces::back_buffer_view(&frame);

    let mut encoder = device
        .device
        .create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("Frame Encoder"),
        });
    draw_pass(
        &mut encoder,
        &color_view,
        &surfaces.depth_view,
        clear,
        pipeline,
        geometry,
        viewport,
    );
    device.queue.submit(std::iter::once(encoder.finish()));
    frame.present();

    trace!(vertices = geometry.vertex_count(), "Frame presented");
    Ok(())
}
