//! 几何体模块
//!
//! 定义顶点格式和不可变顶点缓冲。顶点只携带齐次四分量位置；
//! 缓冲创建后大小与步长固定，没有追加或更新路径。

use bytemuck::{Pod, Zeroable};
use tracing::{debug, trace};
use wgpu::util::DeviceExt;

use crate::core::error::{GraphicsError, Result};
use crate::gfx::device::GraphicsDevice;

/// 顶点结构体
///
/// # 内存布局
///
/// 使用 `#[repr(C)]` 保证内存布局的一致性：唯一的字段 `position`
/// 是 4 个 f32，共 16 字节，对应顶点着色器的
/// `@location(0) vec4<f32>` 输入。
#[repr(C)]
#[derive(Default, Clone, Copy, Debug, Pod, Zeroable)]
pub struct Vertex {
    /// 顶点位置（齐次裁剪空间坐标 [x, y, z, w]）
    pub position: [f32; 4],
}

impl Vertex {
    /// 顶点属性表：location 0 为 Float32x4 位置
    const ATTRIBUTES: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x4];

    /// 创建一个新顶点
    pub fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self {
            position: [x, y, z, w],
        }
    }

    /// 顶点缓冲布局描述
    ///
    /// 把原始字节布局映射到顶点着色器的输入签名；两者是否结构
    /// 兼容在管线创建时校验。
    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// 创建默认几何体：两个三角形拼成的居中四边形
///
/// 覆盖标准化设备坐标中 (-0.5, -0.5) 到 (0.5, 0.5) 的区域，
/// 共 6 个顶点，逆时针环绕，深度 0.0。
pub fn create_default_geometry() -> Vec<Vertex> {
    vec![
        // 第一个三角形（右下半）
        Vertex::new(-0.5, -0.5, 0.0, 1.0),
        Vertex::new(0.5, -0.5, 0.0, 1.0),
        Vertex::new(0.5, 0.5, 0.0, 1.0),
        // 第二个三角形（左上半）
        Vertex::new(-0.5, -0.5, 0.0, 1.0),
        Vertex::new(0.5, 0.5, 0.0, 1.0),
        Vertex::new(-0.5, 0.5, 0.0, 1.0),
    ]
}

/// 不可变顶点缓冲
///
/// 顶点数据一次性上传，之后只读。绘制按三角形列表解释，
/// 每 3 个顶点一个三角形。
pub struct GeometryBuffer {
    /// GPU 顶点缓冲
    buffer: wgpu::Buffer,
    /// 顶点数
    vertex_count: u32,
}

impl GeometryBuffer {
    /// 上传顶点数据
    ///
    /// # 错误
    ///
    /// 空数据或数量不是 3 的倍数时返回
    /// [`GraphicsError::ResourceCreation`]，不会创建任何 GPU 资源。
    pub fn new(device: &GraphicsDevice, vertices: &[Vertex]) -> Result<Self> {
        if vertices.is_empty() {
            return Err(GraphicsError::ResourceCreation(
                "Vertex data must not be empty".to_string(),
            )
            .into());
        }
        if vertices.len() % 3 != 0 {
            return Err(GraphicsError::ResourceCreation(format!(
                "Triangle list needs a multiple of 3 vertices, got {}",
                vertices.len()
            ))
            .into());
        }

        debug!(vertices = vertices.len(), "Uploading vertex buffer");
        let buffer = device
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Vertex Buffer"),
                contents: bytemuck::cast_slice(vertices),
                usage: wgpu::BufferUsages::VERTEX,
            });

        Ok(Self {
            buffer,
            vertex_count: vertices.len() as u32,
        })
    }

    /// GPU 缓冲
    pub fn buffer(&self) -> &wgpu::Buffer {
        &self.buffer
    }

    /// 顶点数（每次绘制提交 3 × 三角形数 个顶点）
    pub fn vertex_count(&self) -> u32 {
        self.vertex_count
    }

    /// 三角形数
    pub fn triangle_count(&self) -> u32 {
        self.vertex_count / 3
    }
}

impl Drop for GeometryBuffer {
    fn drop(&mut self) {
        trace!(vertices = self.vertex_count, "Releasing vertex buffer");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::device::test_device;
    use std::mem;

    #[test]
    fn test_vertex_layout() {
        assert_eq!(mem::size_of::<Vertex>(), 16, "Vertex size should be 16 bytes");
        assert_eq!(mem::align_of::<Vertex>(), 4, "Vertex alignment should be 4 bytes");

        let vertex = Vertex::default();
        let vertex_ptr = &vertex as *const Vertex as usize;
        let position_ptr = &vertex.position as *const [f32; 4] as usize;
        assert_eq!(position_ptr - vertex_ptr, 0, "position should be at offset 0");

        let layout = Vertex::layout();
        assert_eq!(layout.array_stride, 16);
        assert_eq!(layout.attributes.len(), 1);
        assert_eq!(layout.attributes[0].shader_location, 0);
        assert_eq!(layout.attributes[0].format, wgpu::VertexFormat::Float32x4);
    }

    #[test]
    fn test_pod_zeroable() {
        let vertex: Vertex = bytemuck::Zeroable::zeroed();
        assert_eq!(vertex.position, [0.0; 4]);

        let vertex = Vertex::new(1.0, 2.0, 3.0, 1.0);
        let bytes: &[u8] = bytemuck::bytes_of(&vertex);
        assert_eq!(bytes.len(), 16);
    }

    #[test]
    fn test_default_geometry_is_two_triangles() {
        let vertices = create_default_geometry();
        assert_eq!(vertices.len(), 6);
        // 所有顶点 w = 1，深度在近远平面之间
        assert!(vertices.iter().all(|v| v.position[3] == 1.0));
        assert!(vertices.iter().all(|v| v.position[2] == 0.0));
    }

    #[test]
    fn test_buffer_counts_follow_triangle_list() {
        let Some(gfx) = test_device() else { return };

        let geometry = GeometryBuffer::new(&gfx, &create_default_geometry()).unwrap();
        assert_eq!(geometry.vertex_count(), 6);
        assert_eq!(geometry.triangle_count(), 2);
        assert_eq!(geometry.vertex_count(), 3 * geometry.triangle_count());
    }

    #[test]
    fn test_invalid_vertex_data_is_rejected() {
        let Some(gfx) = test_device() else { return };

        assert!(GeometryBuffer::new(&gfx, &[]).is_err());

        let incomplete = [Vertex::new(0.0, 0.0, 0.0, 1.0); 4];
        assert!(GeometryBuffer::new(&gfx, &incomplete).is_err());
    }
}
