//! 演示 2：交换链与清屏
//!
//! 在演示 1 的窗口上引导图形设备和交换链，每个无事件的迭代把
//! 后台缓冲清成背景色并呈现。Fifo 呈现模式等待垂直消隐，是循环
//! 唯一的限速机制。按 Q 或关闭窗口退出。
//!
//! # 使用方法
//!
//! ```bash
//! cargo run --bin hello_clear
//! cargo run --bin hello_clear -- --validation
//! ```

use tracing::{error, info};

use hello_gpu::core::config::Config;
use hello_gpu::core::error::Result;
use hello_gpu::core::event::{HostEvent, KeyCode};
use hello_gpu::core::log;
use hello_gpu::gfx;
use hello_gpu::gfx::renderer;
use hello_gpu::gfx::surfaces::RenderSurfaces;
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

    info!(version = env!("CARGO_PKG_VERSION"), "hello_clear starting");

    if let Err(e) = run(&config) {
        error!("Fatal: {}", e);
        eprintln!("{}", e);
        std::process::exit(e.exit_code());
    }
}

/// 引导到交换链为止，循环清屏
fn run(config: &Config) -> Result<()> {
    let mut host = WinitHostWindow::create(&config.window)?;
    let (device, mut swapchain) = gfx::initialize(host.window(), config.graphics.validation)?;
    let clear = renderer::to_wgpu_color(config.graphics.clear_color);

    info!("Swap chain ready, clearing each frame");

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

        // 无事件：清屏并呈现一帧。深度缓冲在下一个演示才出现。
        let Some(frame) = swapchain.acquire(&device)? else {
            continue;
        };
        let view = RenderSurfaces::back_buffer_view(&frame);
        let mut encoder = device
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Frame Encoder"),
            });
        renderer::clear_pass(&mut encoder, &view, None, clear);
        device.queue.submit(std::iter::once(encoder.finish()));
        frame.present();
    }
}
