//! 配置管理模块
//!
//! 提供各演示程序共用配置的加载、解析和校验功能。
//! 支持从 TOML 配置文件加载，也支持命令行参数覆盖。
//!
//! # 配置文件格式 (config.toml)
//!
//! ```toml
//! [window]
//! width = 800
//! height = 600
//! title = "hello_gpu"
//! resizable = false
//!
//! [graphics]
//! clear_color = [0.1, 0.2, 0.3, 1.0]
//! validation = false
//!
//! [logging]
//! level = "info"      # trace, debug, info, warn, error
//! file_output = false
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use super::error::{ConfigError, Result};

/// 演示程序配置
///
/// 包含所有演示程序共用的配置项。
/// 可以从配置文件加载，也可以通过代码构建。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// 窗口配置
    #[serde(default)]
    pub window: WindowConfig,

    /// 图形配置
    #[serde(default)]
    pub graphics: GraphicsConfig,

    /// 日志配置
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// 窗口配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowConfig {
    /// 窗口宽度（物理像素）
    #[serde(default = "default_width")]
    pub width: u32,

    /// 窗口高度（物理像素）
    #[serde(default = "default_height")]
    pub height: u32,

    /// 窗口标题
    #[serde(default = "default_title")]
    pub title: String,

    /// 是否可调整大小
    ///
    /// 交换链尺寸在创建时固定，演示程序不处理窗口尺寸变化，
    /// 默认不可调整。
    #[serde(default = "default_resizable")]
    pub resizable: bool,
}

/// 图形配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphicsConfig {
    /// 背景清屏颜色（RGBA，每个分量 0.0 到 1.0）
    #[serde(default = "default_clear_color")]
    pub clear_color: [f32; 4],

    /// 是否开启图形 API 校验层
    #[serde(default = "default_validation")]
    pub validation: bool,
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: LogLevel,

    /// 是否输出到文件
    #[serde(default = "default_file_output")]
    pub file_output: bool,

    /// 日志文件路径
    #[serde(default = "default_log_file")]
    pub log_file: String,
}

/// 日志级别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

// 默认值函数
fn default_width() -> u32 { 800 }
fn default_height() -> u32 { 600 }
fn default_title() -> String { "hello_gpu".to_string() }
fn default_resizable() -> bool { false }
fn default_clear_color() -> [f32; 4] { [0.1, 0.2, 0.3, 1.0] }
fn default_validation() -> bool { false }
fn default_log_level() -> LogLevel { LogLevel::Info }
fn default_file_output() -> bool { false }
fn default_log_file() -> String { "hello_gpu.log".to_string() }

impl Default for Config {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            graphics: GraphicsConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            title: default_title(),
            resizable: default_resizable(),
        }
    }
}

impl Default for GraphicsConfig {
    fn default() -> Self {
        Self {
            clear_color: default_clear_color(),
            validation: default_validation(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file_output: default_file_output(),
            log_file: default_log_file(),
        }
    }
}

impl Config {
    /// 从配置文件加载
    ///
    /// # 参数
    ///
    /// * `path` - 配置文件路径
    ///
    /// # 返回值
    ///
    /// 成功返回 `Config` 实例，失败返回错误
    ///
    /// # 示例
    ///
    /// ```no_run
    /// use hello_gpu::core::config::Config;
    ///
    /// let config = Config::from_file("config.toml").unwrap_or_default();
    /// assert!(config.window.width > 0);
    /// ```
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_str = path.as_ref().to_string_lossy().to_string();

        let contents = std::fs::read_to_string(path)
            .map_err(|_| ConfigError::FileNotFound(path_str.clone()))?;

        toml::from_str(&contents).map_err(|e| ConfigError::ParseError(e.to_string()).into())
    }

    /// 从配置文件加载，如果文件不存在或无法解析则使用默认配置
    ///
    /// # 参数
    ///
    /// * `path` - 配置文件路径
    ///
    /// # 返回值
    ///
    /// 返回 `Config` 实例
    pub fn from_file_or_default<P: AsRef<Path>>(path: P) -> Self {
        Self::from_file(path).unwrap_or_default()
    }

    /// 从命令行参数覆盖配置
    ///
    /// # 参数
    ///
    /// * `args` - 命令行参数迭代器
    ///
    /// # 说明
    ///
    /// 支持的参数：
    /// - `--width <value>`: 设置窗口宽度
    /// - `--height <value>`: 设置窗口高度
    /// - `--title <value>`: 设置窗口标题
    /// - `--validation`: 开启图形 API 校验层
    ///
    /// 无法解析的值保持原配置不变。
    pub fn apply_args<I>(&mut self, args: I)
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let args: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();

        // 检查是否开启校验层
        if args.iter().any(|a| a == "--validation") {
            self.graphics.validation = true;
        }

        // 检查窗口尺寸
        if let Some(idx) = args.iter().position(|a| a == "--width") {
            if let Some(width_str) = args.get(idx + 1) {
                if let Ok(width) = width_str.parse() {
                    self.window.width = width;
                }
            }
        }

        if let Some(idx) = args.iter().position(|a| a == "--height") {
            if let Some(height_str) = args.get(idx + 1) {
                if let Ok(height) = height_str.parse() {
                    self.window.height = height;
                }
            }
        }

        // 检查窗口标题
        if let Some(idx) = args.iter().position(|a| a == "--title") {
            if let Some(title) = args.get(idx + 1) {
                self.window.title = title.clone();
            }
        }
    }

    /// 验证配置的有效性
    ///
    /// # 返回值
    ///
    /// 配置有效返回 `Ok(())`，否则返回错误
    pub fn validate(&self) -> Result<()> {
        // 验证窗口尺寸
        if self.window.width == 0 || self.window.height == 0 {
            return Err(ConfigError::InvalidValue {
                field: "window.width/height".to_string(),
                reason: "Window dimensions must be greater than 0".to_string(),
            }
            .into());
        }

        // 验证窗口标题
        if self.window.title.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "window.title".to_string(),
                reason: "Window title must not be empty".to_string(),
            }
            .into());
        }

        // 验证清屏颜色分量范围
        for (i, component) in self.graphics.clear_color.iter().enumerate() {
            if !(0.0..=1.0).contains(component) {
                return Err(ConfigError::InvalidValue {
                    field: format!("graphics.clear_color[{}]", i),
                    reason: "Color components must lie between 0.0 and 1.0".to_string(),
                }
                .into());
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.window.width, 800);
        assert_eq!(config.window.height, 600);
        assert_eq!(config.window.title, "hello_gpu");
        assert!(!config.window.resizable);
        assert_eq!(config.graphics.clear_color, [0.1, 0.2, 0.3, 1.0]);
        assert!(!config.graphics.validation);
        assert_eq!(config.logging.level, LogLevel::Info);
    }

    #[test]
    fn test_config_validation() {
        let mut config = Config::default();
        assert!(config.validate().is_ok());

        config.window.width = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.window.title.clear();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.graphics.clear_color[1] = 1.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_apply_args_overrides() {
        let mut config = Config::default();
        config.apply_args([
            "hello_gpu",
            "--width",
            "600",
            "--height",
            "300",
            "--title",
            "readback",
            "--validation",
        ]);

        assert_eq!(config.window.width, 600);
        assert_eq!(config.window.height, 300);
        assert_eq!(config.window.title, "readback");
        assert!(config.graphics.validation);
    }

    #[test]
    fn test_apply_args_ignores_malformed_values() {
        let mut config = Config::default();
        config.apply_args(["--width", "not-a-number"]);
        assert_eq!(config.window.width, 800);
    }

    #[test]
    fn test_partial_file_falls_back_to_defaults() {
        let config: Config = toml::from_str("[window]\nwidth = 1024\n").unwrap();
        assert_eq!(config.window.width, 1024);
        assert_eq!(config.window.height, 600);
        assert_eq!(config.logging.level, LogLevel::Info);
        assert_eq!(config.graphics.clear_color, [0.1, 0.2, 0.3, 1.0]);
    }
}
