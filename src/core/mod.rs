//! 核心功能模块
//!
//! 本模块提供各演示程序共用的基础功能，包括配置管理、日志系统、
//! 错误处理、帧时钟和帧循环。这些模块独立于具体的图形 API 和
//! 窗口系统。
//!
//! # 模块组织
//!
//! - `config`：配置管理，支持从配置文件加载并用命令行参数覆盖
//! - `error`：错误处理，定义统一的错误类型和按阶段的退出码
//! - `log`：日志系统，提供结构化的日志记录功能
//! - `clock`：帧时钟，渲染循环的单调时间源
//! - `event`：宿主事件词汇表
//! - `runtime`：帧循环状态机

pub mod clock;
pub mod config;
pub mod error;
pub mod event;
pub mod log;
pub mod runtime;

// 重新导出常用类型，方便使用
pub use clock::{FrameClock, FrameSample};
pub use config::Config;
pub use error::{HelloGpuError, Result};
pub use event::{HostEvent, KeyCode};
pub use runtime::{FrameLoop, LoopState};
