//! 视口模块
//!
//! 把标准化设备坐标映射到渲染目标上的可绘制矩形。

/// 视口
///
/// 字段与 `RenderPass::set_viewport` 的参数一一对应。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// 左上角 X（像素）
    pub x: f32,
    /// 左上角 Y（像素）
    pub y: f32,
    /// 宽度（像素）
    pub width: f32,
    /// 高度（像素）
    pub height: f32,
    /// 最小深度
    pub min_depth: f32,
    /// 最大深度
    pub max_depth: f32,
}

impl Viewport {
    /// 覆盖整个渲染目标的视口，深度范围 [0, 1]
    pub fn full(width: u32, height: u32) -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width: width as f32,
            height: height as f32,
            min_depth: 0.0,
            max_depth: 1.0,
        }
    }

    /// 应用到渲染通道
    pub fn apply(&self, pass: &mut wgpu::RenderPass<'_>) {
        pass.set_viewport(
            self.x,
            self.y,
            self.width,
            self.height,
            self.min_depth,
            self.max_depth,
        );
    }
}
