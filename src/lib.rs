//! hello_gpu - 渐进式 GPU 引导演示
//!
//! 五个各自独立的演示程序，逐步搭建出一个最小的原生 GPU 加速
//! 窗口。每个演示都是完整可运行的程序，在前一个的基础上新增
//! 一个子系统：
//!
//! 1. `hello_window` - 原生窗口与事件等待
//! 2. `hello_clear` - 图形设备 + 交换链，每帧清屏
//! 3. `hello_depth` - 深度模板缓冲与着色器管线
//! 4. `hello_triangles` - 不可变顶点缓冲与绘制
//! 5. `hello_gpu`（包默认二进制）- 帧时钟驱动的完整帧循环
//!
//! # 模块结构
//!
//! - `core`: 基础设施（配置、日志、错误处理、帧时钟、帧循环）
//! - `host`: 宿主窗口协作者（trait + winit 实现）
//! - `gfx`: 图形引导与渲染（设备、交换链、表面、几何体、管线）
//!
//! # 使用示例
//!
//! ```no_run
//! use hello_gpu::core::config::Config;
//! use hello_gpu::gfx;
//! use hello_gpu::host::WinitHostWindow;
//!
//! # fn main() -> hello_gpu::core::error::Result<()> {
//! let config = Config::from_file_or_default("config.toml");
//! let host = WinitHostWindow::create(&config.window)?;
//! let (_device, _swapchain) = gfx::initialize(host.window(), false)?;
//! # Ok(())
//! # }
//! ```

pub mod core;
pub mod gfx;
pub mod host;
