use super::Mesh;
use parking_lot::RwLock;
use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};
use vek::{Mat4, Vec3};

static NEXT_INSTANCE_ID: AtomicU64 = AtomicU64::new(0);

/// Per-instance state of a mesh placed in the world.
///
/// This is behind an `Arc<RwLock<>>` so that the render context can keep a
/// copy and read the latest values when it hands instances to the draw
/// driver. This is the value passed to [`MeshHandle::modify`](super::MeshHandle::modify).
pub struct MeshData {
    /// The world position of the chunk's origin.
    pub position: Vec3<f32>,

    /// Whether the draw driver should render this instance.
    pub visible: bool,

    pub(crate) id: u64,
    pub(crate) mesh: Arc<Mesh>,
}

impl MeshData {
    pub(crate) fn new(mesh: Arc<Mesh>) -> (u64, Arc<RwLock<MeshData>>) {
        let id = NEXT_INSTANCE_ID.fetch_add(1, Ordering::Relaxed);
        (
            id,
            Arc::new(RwLock::new(MeshData {
                position: Vec3::zero(),
                visible: true,
                id,
                mesh,
            })),
        )
    }

    /// The world matrix the draw driver should use for this instance.
    /// Terrain chunks translate but never rotate or scale.
    pub fn matrix(&self) -> Mat4<f32> {
        Mat4::translation_3d(self.position)
    }

    /// The uploaded mesh resource this instance draws. Instances created by
    /// cloning a handle share the same resource.
    pub fn mesh(&self) -> &Arc<Mesh> {
        &self.mesh
    }
}
