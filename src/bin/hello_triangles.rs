//! 演示 4：顶点缓冲与绘制
//!
//! 上传一个不可变顶点缓冲（两个三角形拼成的居中四边形，6 个
//! 顶点），每帧执行完整的渲染通道：清除颜色和深度模板，绑定
//! 管线、视口、顶点缓冲，一次非索引绘制提交全部顶点。资源在
//! 退出时按创建的逆序释放。
//!
//! # 使用方法
//!
//! ```bash
//! cargo run --bin hello_triangles
//! ```

use tracing::{error, info};

use hello_gpu::core::config::Config;
use hello_gpu::core::error::Result;
use hello_gpu::core::event::{HostEvent, KeyCode};
use hello_gpu::core::log;
use hello_gpu::gfx;
use hello_gpu::gfx::geometry::{create_default_geometry, GeometryBuffer, Vertex};
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

    info!(
        version = env!("CARGO_PKG_VERSION"),
        "hello_triangles starting"
    );

    if let Err(e) = run(&config) {
        error!("Fatal: {}", e);
        eprintln!("{}", e);
        std::process::exit(e.exit_code());
    }
}

/// 完整引导，循环绘制
fn run(config: &Config) -> Result<()> {
    let mut host = WinitHostWindow::create(&config.window)?;
    let (device, mut swapchain) = gfx::initialize(host.window(), config.graphics.validation)?;
    let surfaces = RenderSurfaces::new(&device, swapchain.width(), swapchain.height())?;
    let geometry = GeometryBuffer::new(&device, &create_default_geometry())?;
    let shaders = ShaderProgram::from_embedded(&device)?;
    let pipeline = PipelineState::new(&device, &shaders, Vertex::layout(), swapchain.format())?;
    let viewport = Viewport::full(swapchain.width(), swapchain.height());
    let clear = renderer::to_wgpu_color(config.graphics.clear_color);

    info!(
        triangles = geometry.triangle_count(),
        vertices = geometry.vertex_count(),
        "Geometry uploaded"
    );

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
        renderer::draw_pass(
            &mut encoder,
            &view,
            &surfaces.depth_view,
            clear,
            &pipeline,
            &geometry,
            &viewport,
        );
        device.queue.submit(std::iter::once(encoder.finish()));
        frame.present();
    }
}
