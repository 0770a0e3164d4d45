//! 日志系统模块
//!
//! 基于 `tracing` 提供结构化的日志记录功能。
//!
//! # 特性
//!
//! - 结构化日志：支持键值对
//! - 灵活输出：支持控制台和文件输出
//! - 日志级别：trace, debug, info, warn, error
//!
//! # 使用示例
//!
//! ```no_run
//! use hello_gpu::core::config::LogLevel;
//! use hello_gpu::core::log;
//!
//! // 仅控制台输出
//! log::init_logger(LogLevel::Info, false, None).unwrap();
//!
//! // 结构化日志
//! tracing::info!(width = 800, height = 600, "Window created");
//! ```

use std::path::Path;
use tracing::Level;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    prelude::*,
    EnvFilter,
};

use super::config::{LogLevel, LoggingConfig};
use super::error::{HelloGpuError, Result};

/// 初始化日志系统
///
/// 必须在程序开始时调用一次；重复初始化返回错误。
///
/// # 参数
///
/// * `level` - 日志级别
/// * `file_output` - 是否输出到文件
/// * `log_file_path` - 日志文件路径（可选，默认为 "hello_gpu.log"）
///
/// # 示例
///
/// ```no_run
/// use hello_gpu::core::config::LogLevel;
/// use hello_gpu::core::log;
///
/// // 仅控制台输出
/// log::init_logger(LogLevel::Info, false, None).unwrap();
/// ```
pub fn init_logger(level: LogLevel, file_output: bool, log_file_path: Option<&str>) -> Result<()> {
    let filter = match level {
        LogLevel::Trace => EnvFilter::new("trace"),
        LogLevel::Debug => EnvFilter::new("debug"),
        LogLevel::Info => EnvFilter::new("info"),
        LogLevel::Warn => EnvFilter::new("warn"),
        LogLevel::Error => EnvFilter::new("error"),
    };

    if file_output {
        // 解析日志文件路径
        let log_path = log_file_path.unwrap_or("hello_gpu.log");
        let path = Path::new(log_path);
        let directory = path.parent().unwrap_or(Path::new("."));
        let filename = path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("hello_gpu.log");

        // 创建滚动文件 appender（每天滚动）
        let file_appender = RollingFileAppender::new(Rotation::DAILY, directory, filename);

        // 创建格式化层
        let console_layer = fmt::layer()
            .with_target(true)
            .with_thread_ids(false)
            .with_thread_names(false)
            .with_ansi(true);

        let file_layer = fmt::layer()
            .with_target(true)
            .with_thread_ids(false)
            .with_thread_names(false)
            .with_ansi(false) // 文件不需要 ANSI 颜色
            .with_writer(file_appender);

        // 组合控制台和文件输出
        tracing_subscriber::registry()
            .with(filter)
            .with(console_layer)
            .with(file_layer)
            .try_init()
            .map_err(|e| HelloGpuError::Log(e.to_string()))?;
    } else {
        // 仅控制台输出
        let fmt_layer = fmt::layer()
            .with_target(true)
            .with_thread_ids(false)
            .with_thread_names(false)
            .with_span_events(FmtSpan::CLOSE)
            .with_ansi(true);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .try_init()
            .map_err(|e| HelloGpuError::Log(e.to_string()))?;
    }

    Ok(())
}

/// 按日志配置初始化
///
/// 便捷封装：级别、文件开关和文件路径都取自 [`LoggingConfig`]。
pub fn init_from(config: &LoggingConfig) -> Result<()> {
    let log_file = if config.file_output {
        Some(config.log_file.as_str())
    } else {
        None
    };
    init_logger(config.level, config.file_output, log_file)
}

/// 初始化简单的日志系统（仅控制台输出）
///
/// 使用默认的 Info 级别。
pub fn init_simple() -> Result<()> {
    init_logger(LogLevel::Info, false, None)
}

/// 日志级别转换
impl From<LogLevel> for Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => Level::TRACE,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Info => Level::INFO,
            LogLevel::Warn => Level::WARN,
            LogLevel::Error => Level::ERROR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_conversion() {
        assert_eq!(Level::from(LogLevel::Trace), Level::TRACE);
        assert_eq!(Level::from(LogLevel::Info), Level::INFO);
        assert_eq!(Level::from(LogLevel::Error), Level::ERROR);
    }
}
