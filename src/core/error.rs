//! 错误处理模块
//!
//! 定义各演示程序共用的统一错误类型。
//!
//! # 设计原则
//!
//! - 按引导阶段划分错误类型，便于模式匹配和诊断
//! - 为每种错误类型提供清晰的上下文信息
//! - 支持错误链（error source）
//! - 每个引导阶段对应一个固定的进程退出码

use std::fmt;

/// 统一的 Result 类型
///
/// 所有可能返回错误的函数都应该使用这个类型。
pub type Result<T> = std::result::Result<T, HelloGpuError>;

/// hello_gpu 的错误类型
///
/// 覆盖从宿主窗口创建到 GPU 资源创建的所有失败情况。
#[derive(Debug)]
pub enum HelloGpuError {
    /// 配置错误
    Config(ConfigError),

    /// 宿主窗口错误
    HostWindow(HostWindowError),

    /// 图形 API 错误
    Graphics(GraphicsError),

    /// 日志系统错误
    Log(String),
}

/// 配置相关的错误
#[derive(Debug)]
pub enum ConfigError {
    /// 配置文件未找到
    FileNotFound(String),

    /// 配置文件解析失败
    ParseError(String),

    /// 配置值无效
    InvalidValue { field: String, reason: String },
}

/// 宿主窗口相关的错误
#[derive(Debug)]
pub enum HostWindowError {
    /// 窗口系统初始化失败
    Registration(String),

    /// 窗口创建失败
    Creation(String),
}

/// 图形 API 相关的错误
#[derive(Debug)]
pub enum GraphicsError {
    /// 设备或交换链创建失败
    DeviceInitialization(String),

    /// 渲染目标或深度模板表面创建失败
    SurfaceCreation(String),

    /// 缓冲或纹理资源创建失败
    ResourceCreation(String),

    /// 顶点布局与着色器签名不匹配，或着色器阶段无效
    ShaderLinkage(String),
}

impl HelloGpuError {
    /// 返回该错误对应的进程退出码
    ///
    /// 每个引导阶段一个退出码，失败位置可以直接从退出码读出：
    ///
    /// | 退出码 | 阶段 |
    /// |--------|------|
    /// | 1 | 窗口系统初始化 |
    /// | 2 | 窗口创建 |
    /// | 3 | 设备 / 交换链创建 |
    /// | 4 | 渲染表面创建 |
    /// | 5 | 几何体 / 着色器 / 管线创建 |
    /// | 6 | 配置或日志 |
    ///
    /// 干净退出（收到销毁事件）不经过此函数，退出码为 0。
    pub fn exit_code(&self) -> i32 {
        match self {
            HelloGpuError::HostWindow(HostWindowError::Registration(_)) => 1,
            HelloGpuError::HostWindow(HostWindowError::Creation(_)) => 2,
            HelloGpuError::Graphics(GraphicsError::DeviceInitialization(_)) => 3,
            HelloGpuError::Graphics(GraphicsError::SurfaceCreation(_)) => 4,
            HelloGpuError::Graphics(GraphicsError::ResourceCreation(_)) => 5,
            HelloGpuError::Graphics(GraphicsError::ShaderLinkage(_)) => 5,
            HelloGpuError::Config(_) => 6,
            HelloGpuError::Log(_) => 6,
        }
    }
}

impl fmt::Display for HelloGpuError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HelloGpuError::Config(e) => write!(f, "Configuration error: {}", e),
            HelloGpuError::HostWindow(e) => write!(f, "Host window error: {}", e),
            HelloGpuError::Graphics(e) => write!(f, "Graphics error: {}", e),
            HelloGpuError::Log(msg) => write!(f, "Log error: {}", msg),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::FileNotFound(path) => write!(f, "Config file not found: {}", path),
            ConfigError::ParseError(msg) => write!(f, "Failed to parse config: {}", msg),
            ConfigError::InvalidValue { field, reason } => {
                write!(f, "Invalid value for '{}': {}", field, reason)
            }
        }
    }
}

impl fmt::Display for HostWindowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HostWindowError::Registration(msg) => {
                write!(f, "Window system initialization failed: {}", msg)
            }
            HostWindowError::Creation(msg) => write!(f, "Window creation failed: {}", msg),
        }
    }
}

impl fmt::Display for GraphicsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GraphicsError::DeviceInitialization(msg) => {
                write!(f, "Device initialization failed: {}", msg)
            }
            GraphicsError::SurfaceCreation(msg) => write!(f, "Surface creation failed: {}", msg),
            GraphicsError::ResourceCreation(msg) => write!(f, "Resource creation failed: {}", msg),
            GraphicsError::ShaderLinkage(msg) => write!(f, "Shader linkage failed: {}", msg),
        }
    }
}

impl std::error::Error for HelloGpuError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            HelloGpuError::Config(e) => Some(e),
            HelloGpuError::HostWindow(e) => Some(e),
            HelloGpuError::Graphics(e) => Some(e),
            HelloGpuError::Log(_) => None,
        }
    }
}

impl std::error::Error for ConfigError {}
impl std::error::Error for HostWindowError {}
impl std::error::Error for GraphicsError {}

// 实现 From trait 以便于错误转换
impl From<ConfigError> for HelloGpuError {
    fn from(err: ConfigError) -> Self {
        HelloGpuError::Config(err)
    }
}

impl From<HostWindowError> for HelloGpuError {
    fn from(err: HostWindowError) -> Self {
        HelloGpuError::HostWindow(err)
    }
}

impl From<GraphicsError> for HelloGpuError {
    fn from(err: GraphicsError) -> Self {
        HelloGpuError::Graphics(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes_distinguish_bootstrap_stages() {
        let registration = HelloGpuError::HostWindow(HostWindowError::Registration("x".into()));
        let creation = HelloGpuError::HostWindow(HostWindowError::Creation("x".into()));
        let device = HelloGpuError::Graphics(GraphicsError::DeviceInitialization("x".into()));
        let surface = HelloGpuError::Graphics(GraphicsError::SurfaceCreation("x".into()));
        let resource = HelloGpuError::Graphics(GraphicsError::ResourceCreation("x".into()));
        let linkage = HelloGpuError::Graphics(GraphicsError::ShaderLinkage("x".into()));
        let config = HelloGpuError::Config(ConfigError::ParseError("x".into()));

        assert_eq!(registration.exit_code(), 1);
        assert_eq!(creation.exit_code(), 2);
        assert_eq!(device.exit_code(), 3);
        assert_eq!(surface.exit_code(), 4);
        assert_eq!(resource.exit_code(), 5);
        assert_eq!(linkage.exit_code(), 5);
        assert_eq!(config.exit_code(), 6);
    }

    #[test]
    fn test_display_includes_context() {
        let e = HelloGpuError::Graphics(GraphicsError::ShaderLinkage("location 0 missing".into()));
        assert_eq!(
            e.to_string(),
            "Graphics error: Shader linkage failed: location 0 missing"
        );

        let e = HelloGpuError::Config(ConfigError::InvalidValue {
            field: "window.width".into(),
            reason: "must be positive".into(),
        });
        assert_eq!(
            e.to_string(),
            "Configuration error: Invalid value for 'window.width': must be positive"
        );
    }

    #[test]
    fn test_from_conversions() {
        let e: HelloGpuError = GraphicsError::ResourceCreation("oom".into()).into();
        assert!(matches!(e, HelloGpuError::Graphics(_)));

        let e: HelloGpuError = HostWindowError::Creation("denied".into()).into();
        assert_eq!(e.exit_code(), 2);
    }

    #[test]
    fn test_source_chain() {
        use std::error::Error;

        let e = HelloGpuError::Config(ConfigError::FileNotFound("config.toml".into()));
        assert!(e.source().is_some());

        let e = HelloGpuError::Log("double init".into());
        assert!(e.source().is_none());
    }
}
