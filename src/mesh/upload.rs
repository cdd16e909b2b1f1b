use super::GeometryBuffers;
use crate::error::MeshError;
use std::sync::Arc;
use vulkano::{
    buffer::{BufferUsage, CpuAccessibleBuffer},
    device::Device,
};

/// One GPU buffer per geometry array, produced by a single upload call.
#[derive(Debug)]
pub struct GpuSet<B> {
    /// Device buffer holding the vertex positions
    pub positions: B,
    /// Device buffer holding the vertex normals
    pub normals: B,
    /// Device buffer holding the texture coordinates
    pub texcoords: B,
}

/// The allocation seam between CPU-side geometry copies and device buffers.
///
/// The bundled Vulkan backend is what a render context uses; alternative
/// sources exist so that upload-only tools and tests can run the full
/// transfer without a graphics device.
pub trait BufferSource {
    /// The owned buffer type produced by this source. Dropping it releases
    /// the underlying allocation.
    type Buffer;

    /// Allocate a device-visible buffer holding a copy of `data`.
    ///
    /// `label` names which of the three geometry arrays is being uploaded.
    fn alloc(&self, label: &'static str, data: &[f32]) -> Result<Self::Buffer, MeshError>;
}

/// Upload the three copied arrays as one atomic transition.
///
/// Either all three device buffers come into existence, or none survive: if
/// an allocation fails, buffers allocated earlier in the same call are
/// dropped before the error propagates, so the caller can never observe a
/// partially-built set.
///
/// An empty chunk uploads nothing and yields `Ok(None)`; Vulkan forbids
/// zero-size buffers and an empty mesh is never drawn.
pub fn upload_buffers<S: BufferSource>(
    source: &S,
    buffers: &GeometryBuffers,
) -> Result<Option<GpuSet<S::Buffer>>, MeshError> {
    if buffers.vertex_count() == 0 {
        return Ok(None);
    }

    let positions = source.alloc("positions", buffers.positions())?;
    let normals = source.alloc("normals", buffers.normals())?;
    let texcoords = source.alloc("texcoords", buffers.texcoords())?;

    Ok(Some(GpuSet {
        positions,
        normals,
        texcoords,
    }))
}

/// The Vulkan buffer source used by [`RenderContext`](crate::RenderContext).
pub(crate) struct VulkanSource {
    pub(crate) device: Arc<Device>,
}

impl BufferSource for VulkanSource {
    type Buffer = Arc<CpuAccessibleBuffer<[f32]>>;

    fn alloc(&self, label: &'static str, data: &[f32]) -> Result<Self::Buffer, MeshError> {
        log::trace!("uploading {} floats into the {} buffer", data.len(), label);
        let buffer = CpuAccessibleBuffer::from_iter(
            self.device.clone(),
            BufferUsage::vertex_buffer(),
            false,
            data.iter().copied(),
        )?;
        Ok(buffer)
    }
}
