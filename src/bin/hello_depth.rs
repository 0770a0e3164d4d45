//! 演示 3：深度模板缓冲与着色器管线
//!
//! 在交换链之上创建深度模板表面，并从嵌入的着色器源码链接一条
//! 渲染管线（顶点布局与着色器签名在此校验）。每帧同时清除颜色
//! 和深度模板两个附件并绑定管线与视口；几何体要到下一个演示才
//! 加入，所以还没有绘制调用。
//!
//! # 使用方法
//!
//! ```bash
//! cargo run --bin hello_depth
//! ```

use tracing::{error, info};

use hello_gpu::core::config::Config;
use hello_gpu::core::error::Result;
use hello_gpu::core::event::{HostEvent, KeyCode};
use hello_gpu::core::log;
use hello_gpu::gfx;
use hello_gpu::gfx::geometry::Vertex;
use hello_gpu::gfx::pipeline::{PipelineState, ShaderProgram};
use hello_gpu::gfx::renderer;
use hello_gpu::gfx::surfaces::RenderSurfaces;
use hello_gpu::gfx::viewport::Viewport;
use hello_gpu::host::{HostWindow, WinitHostWindow};

fn main() {
    let mut config = Config::from_file_or_default("config.toml");
    config.apply_args(std::env::args());

    if let Err(e) = config.validate() {
        eprintln!("Invalid configuration: {}", e);
        std::process::exit(e.exit_code());
    }

    if let Err(e) = log::init_from(&config.logging) {
        eprintln!("Failed to initialize logging: {}", e);
        std::process::exit(e.exit_code());
    }

    info!(version = env!("CARGO_PKG_VERSION"), "hello_depth starting");

    if let Err(e) = run(&config) {
        error!("Fatal: {}", e);
        eprintln!("{}", e);
        std::process::exit(e.exit_code());
    }
}

/// 引导到管线为止，循环清除颜色与深度模板
fn run(config: &Config) -> Result<()> {
    let mut host = WinitHostWindow::create(&config.window)?;
    let (device, mut swapchain) = gfx::initialize(host.window(), config.graphics.validation)?;
    let surfaces = RenderSurfaces::new(&device, swapchain.width(), swapchain.height())?;
    let shaders = ShaderProgram::from_embedded(&device)?;
    let pipeline = PipelineState::new(&device, &shaders, Vertex::layout(), swapchain.format())?;
    let viewport = Viewport::full(swapchain.width(), swapchain.height());
    let clear = renderer::to_wgpu_color(config.graphics.clear_color);

    info!("Pipeline linked, clearing color and depth each frame");

    loop {
        if let Some(event) = host.poll_event() {
            match event {
                HostEvent::KeyDown(KeyCode::Q) => host.request_close(),
                HostEvent::Destroy => {
                    info!("Window destroyed, exiting");
                    return Ok(());
                }
                _ => {}
            }
            continue;
        }

        let Some(frame) = swapchain.acquire(&device)? else {
            continue;
        };
        let view = RenderSurfaces::back_buffer_view(&frame);
        let mut encoder = device
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Frame Encoder"),
            });
        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Clear Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(clear),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &surfaces.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(0),
                        store: wgpu::StoreOp::Store,
                    }),
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            // 绑定管线与视口；顶点缓冲在下一个演示加入，本帧只清屏
            pass.set_pipeline(pipeline.pipeline());
            viewport.apply(&mut pass);
        }
        device.queue.submit(std::iter::once(encoder.finish()));
        frame.present();
    }
}
