use super::{Mesh, MeshData};
use parking_lot::RwLock;
use std::sync::{mpsc::Sender, Arc};
use vek::Vec3;

/// An owning handle to a mesh that was uploaded to the GPU.
///
/// This is the ownership-handoff point of the crate: the producer's arrays
/// are long forgotten by the time a handle exists, and the handle alone
/// decides how long the uploaded resource lives.
///
/// When this handle is dropped, the instance disappears from the world on
/// the next maintenance pass; once the last handle to a mesh is gone, its
/// CPU mirror and GPU buffers are freed together.
///
/// When this handle is cloned, a second instance appears in the world. Both
/// instances share one set of GPU buffers but are positioned independently.
pub struct MeshHandle {
    events: Sender<MeshEvent>,
    data: Arc<RwLock<MeshData>>,
}

impl MeshHandle {
    pub(crate) fn from_mesh(
        mesh: Arc<Mesh>,
        events: Sender<MeshEvent>,
    ) -> (Self, u64, Arc<RwLock<MeshData>>) {
        let (id, data) = MeshData::new(mesh);
        (
            Self {
                events,
                data: data.clone(),
            },
            id,
            data,
        )
    }

    /// Get the current position of the instance. This is short for
    /// `self.read(|d| d.position)`.
    pub fn position(&self) -> Vec3<f32> {
        self.read(|d| d.position)
    }

    /// Whether the instance is currently visible. This is short for
    /// `self.read(|d| d.visible)`.
    pub fn is_visible(&self) -> bool {
        self.read(|d| d.visible)
    }

    /// The uploaded mesh resource behind this handle.
    pub fn mesh(&self) -> Arc<Mesh> {
        self.read(|d| d.mesh.clone())
    }

    /// Read the instance data, optionally returning a value.
    pub fn read<T>(&self, cb: impl FnOnce(&MeshData) -> T) -> T {
        let data = self.data.read();
        cb(&data)
    }

    /// Update the instance data, optionally returning a value.
    pub fn modify<T>(&self, cb: impl FnOnce(&mut MeshData) -> T) -> T {
        let mut data = self.data.write();
        cb(&mut data)
    }
}

impl Clone for MeshHandle {
    fn clone(&self) -> Self {
        let data = self.data.read();
        let mesh = data.mesh.clone();
        let (new_handle, new_id, new_data) = MeshHandle::from_mesh(mesh, self.events.clone());

        {
            let mut new_data = new_data.write();
            new_data.position = data.position;
            new_data.visible = data.visible;
        }

        // This sender only errors when the receiver is dropped,
        // which should only happen when the context is shutting down,
        // so we ignore the error
        let _ = self.events.send(MeshEvent::Cloned(new_id, new_data));

        new_handle
    }
}

impl Drop for MeshHandle {
    fn drop(&mut self) {
        // This sender only errors when the receiver is dropped,
        // which should only happen when the context is shutting down,
        // so we ignore the error
        let _ = self.events.send(MeshEvent::Unloaded(self.data.read().id));
    }
}

pub(crate) enum MeshEvent {
    Cloned(u64, Arc<RwLock<MeshData>>),
    Unloaded(u64),
}
