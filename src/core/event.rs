//! 宿主事件模块
//!
//! 定义宿主窗口协作者向核心传递的事件词汇表。
//! 宿主只报告三类事件：按键按下、窗口销毁、其他。
//! 到具体窗口系统（winit）事件的映射在 `host` 模块中完成。
//!
//! # 设计说明
//!
//! 词汇表刻意收窄：核心只需要知道"哪个键被按下"和"窗口没了"，
//! 其余窗口事件一律折叠为 [`HostEvent::Other`]，帧循环据此决定
//! 本次迭代是分发还是渲染。

/// 键盘按键码（简化版本）
///
/// 只列出演示程序关心的按键，未列出的按键折叠为 `Other`。
///
/// # 示例
///
/// ```
/// use hello_gpu::core::event::KeyCode;
///
/// let key = KeyCode::Q;
/// match key {
///     KeyCode::Q => println!("请求退出"),
///     _ => println!("其他按键"),
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// Q 键，各演示程序用它请求退出
    Q,
    /// Escape 键
    Escape,
    /// 空格键
    Space,
    /// Enter 键
    Enter,
    /// 其他按键
    Other,
}

impl KeyCode {
    /// 获取按键名称，用于日志输出
    pub fn name(&self) -> &'static str {
        match self {
            KeyCode::Q => "Q",
            KeyCode::Escape => "Escape",
            KeyCode::Space => "Space",
            KeyCode::Enter => "Enter",
            KeyCode::Other => "Other",
        }
    }
}

/// 宿主窗口事件
///
/// 帧循环每次迭代非阻塞地取出至多一个事件；
/// 取到事件的迭代只分发事件，不渲染。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostEvent {
    /// 按键按下（不含自动重复）
    KeyDown(KeyCode),
    /// 窗口已销毁，进入退出流程
    Destroy,
    /// 其他窗口事件（移动、焦点变化等），核心不关心具体内容
    Other,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_code_names() {
        assert_eq!(KeyCode::Q.name(), "Q");
        assert_eq!(KeyCode::Escape.name(), "Escape");
        assert_eq!(KeyCode::Other.name(), "Other");
    }

    #[test]
    fn test_host_event_matching() {
        let event = HostEvent::KeyDown(KeyCode::Q);
        assert!(matches!(event, HostEvent::KeyDown(KeyCode::Q)));
        assert_ne!(HostEvent::Destroy, HostEvent::Other);
    }
}
