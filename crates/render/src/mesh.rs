use std::f32::consts::{FRAC_PI_2, PI};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum MeshError {
    #[error("sphere needs at least one sector and one stack (got {sectors}x{stacks})")]
    Degenerate { sectors: u32, stacks: u32 },
    #[error("sphere radius must be positive, got {0}")]
    BadRadius(f32),
    #[error("sphere of {sectors}x{stacks} has more vertices than u32 indices can address")]
    TooLarge { sectors: u32, stacks: u32 },
}

/// Position-only indexed triangle mesh.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshData {
    pub positions: Vec<[f32; 3]>,
    pub indices: Vec<u32>,
}

impl MeshData {
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// Unit cube centered on the origin (half-extent 0.5).
pub fn cube_mesh() -> MeshData {
    let p = 0.5_f32;
    #[rustfmt::skip]
    let positions = vec![
        [-p, -p, -p], [ p, -p, -p], [ p,  p, -p], [-p,  p, -p],
        [-p, -p,  p], [ p, -p,  p], [ p,  p,  p], [-p,  p,  p],
    ];
    #[rustfmt::skip]
    let indices = vec![
        0,1,2, 2,3,0, // back
        4,5,6, 6,7,4, // front
        7,3,0, 0,4,7, // left
        6,2,1, 1,5,6, // right
        0,1,5, 5,4,0, // bottom
        3,2,6, 6,7,3, // top
    ];
    MeshData { positions, indices }
}

/// UV sphere built from `stacks` latitude bands and `sectors` longitude
/// slices. The poles lie on the z axis.
///
/// Each band repeats its first vertex at the seam, so there are
/// `(stacks + 1) * (sectors + 1)` vertices. The first and last band are
/// fans, which gives `6 * sectors * (stacks - 1)` indices.
pub fn sphere_mesh(sectors: u32, stacks: u32, radius: f32) -> Result<MeshData, MeshError> {
    if sectors == 0 || stacks == 0 {
        return Err(MeshError::Degenerate { sectors, stacks });
    }
    if !(radius.is_finite() && radius > 0.0) {
        return Err(MeshError::BadRadius(radius));
    }

    let vertex_count = (u64::from(stacks) + 1) * (u64::from(sectors) + 1);
    if vertex_count > u64::from(u32::MAX) {
        return Err(MeshError::TooLarge { sectors, stacks });
    }

    let sector_step = 2.0 * PI / sectors as f32;
    let stack_step = PI / stacks as f32;

    let mut positions = Vec::with_capacity(vertex_count as usize);
    for i in 0..=stacks {
        let stack_angle = FRAC_PI_2 - i as f32 * stack_step;
        let xy = radius * stack_angle.cos();
        let z = radius * stack_angle.sin();
        for j in 0..=sectors {
            let sector_angle = j as f32 * sector_step;
            positions.push([xy * sector_angle.cos(), xy * sector_angle.sin(), z]);
        }
    }

    let mut indices = Vec::with_capacity(6 * sectors as usize * (stacks as usize - 1));
    for i in 0..stacks {
        let mut k1 = i * (sectors + 1);
        let mut k2 = k1 + sectors + 1;
        for _ in 0..sectors {
            if i != 0 {
                indices.extend_from_slice(&[k1, k2, k1 + 1]);
            }
            if i != stacks - 1 {
                indices.extend_from_slice(&[k1 + 1, k2, k2 + 1]);
            }
            k1 += 1;
            k2 += 1;
        }
    }

    tracing::trace!(
        "tessellated sphere: {} vertices, {} triangles",
        positions.len(),
        indices.len() / 3
    );
    Ok(MeshData { positions, indices })
}
