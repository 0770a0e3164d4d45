//! hello_gpu - 演示 5：帧时钟与实时标题诊断
//!
//! 在前四个演示的基础上加入计时子系统。帧循环在每个无事件的
//! 迭代采样帧时钟，把瞬时帧率和总运行时间写进窗口标题，然后
//! 渲染并呈现一帧。按 Q 或关闭窗口退出。
//!
//! # 使用方法
//!
//! ```bash
//! cargo run
//! cargo run -- --width 1024 --height 768
//! ```
//!
//! # 启动流程
//!
//! 1. 加载配置文件（config.toml，缺失则用默认值）
//! 2. 应用命令行参数覆盖
//! 3. 验证配置
//! 4. 初始化日志系统
//! 5. 按依赖顺序引导：窗口 → 设备/交换链 → 表面 → 几何体 →
//!    着色器/管线 → 视口
//! 6. 进入帧循环，直到宿主报告销毁
//!
//! 每个引导阶段的失败都带着独立的退出码结束进程，见
//! `core::error::HelloGpuError::exit_code`。

use tracing::{error, info};

use hello_gpu::core::config::Config;
use hello_gpu::core::error::Result;
use hello_gpu::core::log;
use hello_gpu::core::runtime::FrameLoop;
use hello_gpu::gfx;
use hello_gpu::gfx::geometry::{create_default_geometry, GeometryBuffer, Vertex};
use hello_gpu::gfx::pipeline::{PipelineState, ShaderProgram};
use hello_gpu::gfx::renderer;
use hello_gpu::gfx::surfaces::RenderSurfaces;
use hello_gpu::gfx::viewport::Viewport;
use hello_gpu::host::WinitHostWindow;

fn main() {
    // 1. 加载配置（在初始化日志之前）
    let mut config = Config::from_file_or_default("config.toml");

    // 2. 应用命令行参数
    config.apply_args(std::env::args());

    // 3. 验证配置
    if let Err(e) = config.validate() {
        eprintln!("Invalid configuration: {}", e);
        std::process::exit(e.exit_code());
    }

    // 4. 初始化日志系统（使用配置中的设置）
    if let Err(e) = log::init_from(&config.logging) {
        eprintln!("Failed to initialize logging: {}", e);
        std::process::exit(e.exit_code());
    }

    info!(version = env!("CARGO_PKG_VERSION"), "hello_gpu starting");
    info!(
        width = config.window.width,
        height = config.window.height,
        title = %config.window.title,
        "Window configuration"
    );

    if let Err(e) = run(&config) {
        error!("Fatal: {}", e);
        eprintln!("{}", e);
        std::process::exit(e.exit_code());
    }
}

/// 按依赖顺序引导全部子系统并进入帧循环
///
/// 函数返回时局部资源按创建的逆序释放：管线和几何体先于设备，
/// 交换链先于窗口。
fn run(config: &Config) -> Result<()> {
    // 5. 引导
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
        "Bootstrap complete, entering frame loop"
    );

    // 6. 帧循环
    let mut frame_loop = FrameLoop::new(&config.window.title);
    frame_loop.run(&mut host, |_sample| {
        renderer::render_frame(
            &device,
            &mut swapchain,
            &surfaces,
            &pipeline,
            &geometry,
            &viewport,
            clear,
        )
    })?;

    info!(frames = frame_loop.frames_rendered(), "Clean shutdown");
    Ok(())
}
