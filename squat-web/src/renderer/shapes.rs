//! Shape primitives - a capped batch of colored triangles

/// Vertex structure for rendering colored shapes
#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    const ATTRIBS: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![
        0 => Float32x2,
        1 => Float32x4
    ];

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBS,
        }
    }
}

/// Triangle list in clip space, never larger than the GPU vertex buffer.
/// Shapes that would overflow are dropped whole.
pub struct VertexBatch {
    vertices: Vec<Vertex>,
    capacity: usize,
}

impl VertexBatch {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(capacity),
            capacity,
        }
    }

    fn has_room(&self, count: usize) -> bool {
        self.vertices.len() + count <= self.capacity
    }

    fn push_triangle(&mut self, a: [f32; 2], b: [f32; 2], c: [f32; 2], color: [f32; 4]) {
        self.vertices.push(Vertex { position: a, color });
        self.vertices.push(Vertex { position: b, color });
        self.vertices.push(Vertex { position: c, color });
    }

    /// Filled ellipse as a triangle fan. Separate x/y radii keep circles round
    /// on a non-square canvas.
    pub fn circle(&mut self, center: (f32, f32), radius: (f32, f32), color: [f32; 4], segments: u32) {
        if !self.has_room(segments as usize * 3) {
            return;
        }

        let point = |i: u32| {
            let angle = (i as f32 / segments as f32) * std::f32::consts::TAU;
            [center.0 + radius.0 * angle.cos(), center.1 + radius.1 * angle.sin()]
        };
        for i in 0..segments {
            self.push_triangle([center.0, center.1], point(i), point(i + 1), color);
        }
    }

    /// Line segment rendered as a thin quad
    pub fn line(&mut self, from: (f32, f32), to: (f32, f32), width: f32, color: [f32; 4]) {
        let dx = to.0 - from.0;
        let dy = to.1 - from.1;
        let len = (dx * dx + dy * dy).sqrt();
        if len < 0.001 || !self.has_room(6) {
            return;
        }

        // Perpendicular offset for thickness
        let px = -dy / len * width;
        let py = dx / len * width;

        let a = [from.0 - px, from.1 - py];
        let b = [from.0 + px, from.1 + py];
        let c = [to.0 + px, to.1 + py];
        let d = [to.0 - px, to.1 - py];
        self.push_triangle(a, b, c, color);
        self.push_triangle(a, c, d, color);
    }

    /// Axis-aligned filled rectangle
    pub fn rect(&mut self, top_left: (f32, f32), bottom_right: (f32, f32), color: [f32; 4]) {
        if !self.has_room(6) {
            return;
        }

        let (l, t) = top_left;
        let (r, b) = bottom_right;
        self.push_triangle([l, t], [l, b], [r, b], color);
        self.push_triangle([l, t], [r, b], [r, t], color);
    }

    pub fn as_slice(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}
