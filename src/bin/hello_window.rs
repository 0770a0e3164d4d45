//! 演示 1：原生窗口
//!
//! 创建一个原生窗口并阻塞等待宿主事件，不涉及任何 GPU 资源。
//! 按 Q 或关闭窗口退出。窗口系统初始化失败退出码 1，窗口创建
//! 失败退出码 2，干净退出 0。
//!
//! # 使用方法
//!
//! ```bash
//! cargo run --bin hello_window
//! cargo run --bin hello_window -- --width 1024 --height 768
//! ```

use tracing::{error, info};

use hello_gpu::core::config::Config;
use hello_gpu::core::error::Result;
use hello_gpu::core::event::{HostEvent, KeyCode};
use hello_gpu::core::log;
use hello_gpu::host::{HostWindow, WinitHostWindow};

fn main() {
    // 1. 加载配置并应用命令行覆盖
    let mut config = Config::from_file_or_default("config.toml");
    config.apply_args(std::env::args());

    if let Err(e) = config.validate() {
        eprintln!("Invalid configuration: {}", e);
        std::process::exit(e.exit_code());
    }

    // 2. 初始化日志系统
    if let Err(e) = log::init_from(&config.logging) {
        eprintln!("Failed to initialize logging: {}", e);
        std::process::exit(e.exit_code());
    }

    info!(version = env!("CARGO_PKG_VERSION"), "hello_window starting");

    if let Err(e) = run(&config) {
        error!("Fatal: {}", e);
        eprintln!("{}", e);
        std::process::exit(e.exit_code());
    }
}

/// 创建窗口并消费事件直到销毁
///
/// 没有渲染工作，所以用阻塞等待而不是轮询，事件到来之前线程
/// 睡眠，不烧 CPU。
fn run(config: &Config) -> Result<()> {
    let mut host = WinitHostWindow::create(&config.window)?;

    loop {
        match host.wait_event() {
            HostEvent::KeyDown(KeyCode::Q) => {
                info!("Quit key pressed");
                host.request_close();
            }
            HostEvent::Destroy => {
                info!("Window destroyed, exiting");
                return Ok(());
            }
            _ => {}
        }
    }
}
