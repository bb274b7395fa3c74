use std::f32::consts::PI;

use bytemuck::{Pod, Zeroable};

/// Interleaved position + normal vertex, matching the render pipeline layout.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

impl Vertex {
    pub const LAYOUT: wgpu::VertexBufferLayout<'static> = wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &[
            wgpu::VertexAttribute {
                offset: 0,
                shader_location: 0,
                format: wgpu::VertexFormat::Float32x3,
            },
            wgpu::VertexAttribute {
                offset: std::mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
                shader_location: 1,
                format: wgpu::VertexFormat::Float32x3,
            },
        ],
    };
}

/// CPU-side geometry, uploaded by the renderer when the preview changes.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshData {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

/// UV sphere centered at the origin.
pub fn sphere(radius: f32, segments: u32, rings: u32) -> MeshData {
    let mut vertices = Vec::new();
    let mut indices = Vec::new();

    for ring in 0..=rings {
        let phi = PI * ring as f32 / rings as f32;
        let sin_phi = phi.sin();
        let cos_phi = phi.cos();

        for seg in 0..=segments {
            let theta = 2.0 * PI * seg as f32 / segments as f32;
            let x = sin_phi * theta.cos();
            let y = cos_phi;
            let z = sin_phi * theta.sin();

            vertices.push(Vertex {
                position: [x * radius, y * radius, z * radius],
                normal: [x, y, z],
            });
        }
    }

    for ring in 0..rings {
        for seg in 0..segments {
            let curr_ring = ring * (segments + 1);
            let next_ring = (ring + 1) * (segments + 1);

            indices.push(curr_ring + seg);
            indices.push(next_ring + seg);
            indices.push(next_ring + seg + 1);

            indices.push(curr_ring + seg);
            indices.push(next_ring + seg + 1);
            indices.push(curr_ring + seg + 1);
        }
    }

    MeshData { vertices, indices }
}

/// Capped cylinder centered on the y axis.
pub fn cylinder(radius: f32, height: f32, segments: u32) -> MeshData {
    let mut vertices = Vec::new();
    let mut indices = Vec::new();
    let half_height = height / 2.0;

    for seg in 0..=segments {
        let theta = 2.0 * PI * seg as f32 / segments as f32;
        let x = theta.cos();
        let z = theta.sin();

        vertices.push(Vertex {
            position: [x * radius, -half_height, z * radius],
            normal: [x, 0.0, z],
        });
        vertices.push(Vertex {
            position: [x * radius, half_height, z * radius],
            normal: [x, 0.0, z],
        });
    }

    for seg in 0..segments {
        let base = seg * 2;
        indices.push(base);
        indices.push(base + 1);
        indices.push(base + 3);

        indices.push(base);
        indices.push(base + 3);
        indices.push(base + 2);
    }

    let bottom = cap_ring(&mut vertices, radius, -half_height, segments, -1.0);
    for seg in 0..segments {
        indices.push(bottom);
        indices.push(bottom + 1 + seg + 1);
        indices.push(bottom + 1 + seg);
    }

    let top = cap_ring(&mut vertices, radius, half_height, segments, 1.0);
    for seg in 0..segments {
        indices.push(top);
        indices.push(top + 1 + seg);
        indices.push(top + 1 + seg + 1);
    }

    MeshData { vertices, indices }
}

/// Cone with the apex at +h/2 and a capped base at -h/2.
pub fn cone(radius: f32, height: f32, segments: u32) -> MeshData {
    let mut vertices = Vec::new();
    let mut indices = Vec::new();
    let half_height = height / 2.0;
    // Side normals tilt with the slant: n ∝ (h·cosθ, r, h·sinθ)
    let slant = (height * height + radius * radius).sqrt().max(f32::EPSILON);
    let ny = radius / slant;
    let nr = height / slant;

    for seg in 0..=segments {
        let theta = 2.0 * PI * seg as f32 / segments as f32;
        let x = theta.cos();
        let z = theta.sin();
        vertices.push(Vertex {
            position: [x * radius, -half_height, z * radius],
            normal: [x * nr, ny, z * nr],
        });
    }

    // One apex vertex per segment keeps the side normals from averaging out
    let apex_base = vertices.len() as u32;
    for seg in 0..segments {
        let theta = 2.0 * PI * (seg as f32 + 0.5) / segments as f32;
        vertices.push(Vertex {
            position: [0.0, half_height, 0.0],
            normal: [theta.cos() * nr, ny, theta.sin() * nr],
        });
    }

    for seg in 0..segments {
        indices.push(seg);
        indices.push(apex_base + seg);
        indices.push(seg + 1);
    }

    let base = cap_ring(&mut vertices, radius, -half_height, segments, -1.0);
    for seg in 0..segments {
        indices.push(base);
        indices.push(base + 1 + seg + 1);
        indices.push(base + 1 + seg);
    }

    MeshData { vertices, indices }
}

/// Axis-aligned box centered at the origin, one normal per face.
pub fn cuboid(width: f32, height: f32, depth: f32) -> MeshData {
    let hx = width / 2.0;
    let hy = height / 2.0;
    let hz = depth / 2.0;

    // normal, then the two in-plane corner offsets
    let faces: [([f32; 3], [f32; 3], [f32; 3]); 6] = [
        ([0.0, 0.0, 1.0], [hx, 0.0, 0.0], [0.0, hy, 0.0]),
        ([0.0, 0.0, -1.0], [-hx, 0.0, 0.0], [0.0, hy, 0.0]),
        ([1.0, 0.0, 0.0], [0.0, 0.0, -hz], [0.0, hy, 0.0]),
        ([-1.0, 0.0, 0.0], [0.0, 0.0, hz], [0.0, hy, 0.0]),
        ([0.0, 1.0, 0.0], [hx, 0.0, 0.0], [0.0, 0.0, -hz]),
        ([0.0, -1.0, 0.0], [hx, 0.0, 0.0], [0.0, 0.0, hz]),
    ];

    let mut vertices = Vec::with_capacity(24);
    let mut indices = Vec::with_capacity(36);
    for (normal, u, v) in faces {
        let center = [hx * normal[0], hy * normal[1], hz * normal[2]];
        let base = vertices.len() as u32;
        for (su, sv) in [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)] {
            vertices.push(Vertex {
                position: [
                    center[0] + su * u[0] + sv * v[0],
                    center[1] + su * u[1] + sv * v[1],
                    center[2] + su * u[2] + sv * v[2],
                ],
                normal,
            });
        }
        indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    MeshData { vertices, indices }
}

/// Square line grid on the y = 0 plane, rendered as a line list.
pub fn grid(size: f32, divisions: u32) -> MeshData {
    let mut vertices = Vec::new();
    let mut indices = Vec::new();
    let half = size / 2.0;
    let step = size / divisions as f32;

    for line in 0..=divisions {
        let offset = -half + line as f32 * step;
        let base = vertices.len() as u32;
        vertices.push(grid_vertex(offset, -half));
        vertices.push(grid_vertex(offset, half));
        vertices.push(grid_vertex(-half, offset));
        vertices.push(grid_vertex(half, offset));
        indices.extend_from_slice(&[base, base + 1, base + 2, base + 3]);
    }

    MeshData { vertices, indices }
}

fn grid_vertex(x: f32, z: f32) -> Vertex {
    Vertex {
        position: [x, 0.0, z],
        normal: [0.0, 1.0, 0.0],
    }
}

fn cap_ring(
    vertices: &mut Vec<Vertex>,
    radius: f32,
    y: f32,
    segments: u32,
    normal_y: f32,
) -> u32 {
    let center = vertices.len() as u32;
    vertices.push(Vertex {
        position: [0.0, y, 0.0],
        normal: [0.0, normal_y, 0.0],
    });
    for seg in 0..=segments {
        let theta = 2.0 * PI * seg as f32 / segments as f32;
        vertices.push(Vertex {
            position: [theta.cos() * radius, y, theta.sin() * radius],
            normal: [0.0, normal_y, 0.0],
        });
    }
    center
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds(mesh: &MeshData) -> ([f32; 3], [f32; 3]) {
        let mut min = [f32::MAX; 3];
        let mut max = [f32::MIN; 3];
        for vertex in &mesh.vertices {
            for axis in 0..3 {
                min[axis] = min[axis].min(vertex.position[axis]);
                max[axis] = max[axis].max(vertex.position[axis]);
            }
        }
        (min, max)
    }

    fn assert_indices_in_range(mesh: &MeshData) {
        let count = mesh.vertices.len() as u32;
        assert!(mesh.indices.iter().all(|index| *index < count));
    }

    fn assert_unit_normals(mesh: &MeshData) {
        for vertex in &mesh.vertices {
            let [x, y, z] = vertex.normal;
            let length = (x * x + y * y + z * z).sqrt();
            assert!((length - 1.0).abs() < 1e-4, "normal length {length}");
        }
    }

    #[test]
    fn sphere_counts_and_bounds() {
        let mesh = sphere(2.0, 16, 8);
        assert_eq!(mesh.vertices.len(), 17 * 9);
        assert_eq!(mesh.indices.len(), 6 * 16 * 8);
        let (min, max) = bounds(&mesh);
        assert!((max[1] - 2.0).abs() < 1e-5);
        assert!((min[1] + 2.0).abs() < 1e-5);
        assert_indices_in_range(&mesh);
        assert_unit_normals(&mesh);
    }

    #[test]
    fn cylinder_spans_its_height_and_radius() {
        let mesh = cylinder(1.5, 4.0, 24);
        let (min, max) = bounds(&mesh);
        assert!((max[1] - 2.0).abs() < 1e-5);
        assert!((min[1] + 2.0).abs() < 1e-5);
        let max_radial = mesh
            .vertices
            .iter()
            .map(|v| (v.position[0].powi(2) + v.position[2].powi(2)).sqrt())
            .fold(0.0f32, f32::max);
        assert!((max_radial - 1.5).abs() < 1e-4);
        assert_indices_in_range(&mesh);
        assert_unit_normals(&mesh);
    }

    #[test]
    fn cone_apex_sits_on_top() {
        let mesh = cone(1.0, 3.0, 24);
        let (min, max) = bounds(&mesh);
        assert!((max[1] - 1.5).abs() < 1e-5);
        assert!((min[1] + 1.5).abs() < 1e-5);
        assert_indices_in_range(&mesh);
        assert_unit_normals(&mesh);
    }

    #[test]
    fn cuboid_uses_distinct_extents() {
        let mesh = cuboid(2.0, 3.0, 4.0);
        assert_eq!(mesh.vertices.len(), 24);
        assert_eq!(mesh.indices.len(), 36);
        let (min, max) = bounds(&mesh);
        assert_eq!(max, [1.0, 1.5, 2.0]);
        assert_eq!(min, [-1.0, -1.5, -2.0]);
        assert_indices_in_range(&mesh);
        assert_unit_normals(&mesh);
    }

    #[test]
    fn grid_stays_on_the_floor_plane() {
        let mesh = grid(10.0, 10);
        assert_eq!(mesh.vertices.len(), 4 * 11);
        assert_eq!(mesh.indices.len(), 4 * 11);
        assert!(mesh.vertices.iter().all(|v| v.position[1] == 0.0));
        let (min, max) = bounds(&mesh);
        assert_eq!(min[0], -5.0);
        assert_eq!(max[2], 5.0);
        assert_indices_in_range(&mesh);
    }
}
