mod builder;
mod data;
mod geometry;
mod handle;
mod upload;

pub use self::{
    builder::MeshBuilder,
    data::MeshData,
    geometry::{ChunkGeometry, GeometryBuffers},
    handle::MeshHandle,
    upload::{upload_buffers, BufferSource, GpuSet},
};
pub(crate) use self::{handle::MeshEvent, upload::VulkanSource};

use std::sync::Arc;
use vulkano::buffer::CpuAccessibleBuffer;

/// A chunk mesh owned by the renderer.
///
/// Created exactly once per transfer call and uploaded exactly once. The
/// CPU-side buffers are the retained mirror of the GPU buffers; neither is
/// mutated after upload and both are freed together when the last reference
/// to the mesh drops.
pub struct Mesh {
    cpu: GeometryBuffers,
    gpu: Option<GpuSet<Arc<CpuAccessibleBuffer<[f32]>>>>,
}

impl Mesh {
    pub(crate) fn new(
        cpu: GeometryBuffers,
        gpu: Option<GpuSet<Arc<CpuAccessibleBuffer<[f32]>>>>,
    ) -> Self {
        Self { cpu, gpu }
    }

    /// Number of vertices in the mesh.
    pub fn vertex_count(&self) -> u32 {
        self.cpu.vertex_count()
    }

    /// Number of triangles in the mesh.
    pub fn triangle_count(&self) -> u32 {
        self.cpu.triangle_count()
    }

    /// The retained CPU-side copy of the geometry.
    pub fn buffers(&self) -> &GeometryBuffers {
        &self.cpu
    }

    /// The device buffers the draw driver binds. `None` only for an empty
    /// mesh, which has nothing to draw.
    pub fn gpu_buffers(&self) -> Option<&GpuSet<Arc<CpuAccessibleBuffer<[f32]>>>> {
        self.gpu.as_ref()
    }

    /// Whether the mesh has completed its upload. Always true for a mesh
    /// obtained through this crate; an empty mesh counts as resident since
    /// it has nothing to upload.
    pub fn is_gpu_resident(&self) -> bool {
        self.cpu.vertex_count() == 0 || self.gpu.is_some()
    }
}
