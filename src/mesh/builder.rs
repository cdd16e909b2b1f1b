use super::{upload_buffers, ChunkGeometry, GeometryBuffers, Mesh, MeshHandle, VulkanSource};
use crate::{error::MeshError, RenderContext};
use std::sync::Arc;
use vek::Vec3;

/// A builder that is used to configure a chunk mesh before it is transferred
/// to the GPU.
pub struct MeshBuilder<'a> {
    context: &'a mut RenderContext,
    geometry: ChunkGeometry<'a>,
    position: Vec3<f32>,
    visible: bool,
}

impl<'a> MeshBuilder<'a> {
    pub(crate) fn new(context: &'a mut RenderContext, geometry: ChunkGeometry<'a>) -> Self {
        Self {
            context,
            geometry,
            position: Vec3::zero(),
            visible: true,
        }
    }

    /// Set the world position of the chunk's origin.
    pub fn with_position(mut self, position: impl Into<Vec3<f32>>) -> Self {
        self.position = position.into();
        self
    }

    /// Set whether the instance starts out visible to the draw driver.
    pub fn with_visibility(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    /// Validate the geometry, deep-copy it into renderer-owned storage,
    /// upload it, and register the instance with the context.
    ///
    /// On success the returned handle owns the resource; the caller's input
    /// arrays may be freed or reused immediately. On failure everything this
    /// call allocated has already been released.
    pub fn build(self) -> Result<MeshHandle, MeshError> {
        let position = self.position;
        let visible = self.visible;

        // Validation and the deep copy run outside the upload lock, so
        // concurrent producers only serialize on the GPU step.
        let cpu = GeometryBuffers::copy_from(&self.geometry)?;

        let gpu = {
            let device = self.context.device.clone();
            let _upload = self.context.upload_lock.lock();
            upload_buffers(&VulkanSource { device }, &cpu)?
        };

        log::debug!(
            "uploaded chunk mesh: {} vertices, {} triangles",
            cpu.vertex_count(),
            cpu.triangle_count()
        );

        let mesh = Arc::new(Mesh::new(cpu, gpu));
        let (handle, id, data) = MeshHandle::from_mesh(mesh, self.context.event_sender());

        {
            let mut data = data.write();
            data.position = position;
            data.visible = visible;
        }

        self.context.register_instance(id, data);
        Ok(handle)
    }
}
