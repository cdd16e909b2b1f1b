use crate::{
    error::{InitError, MeshError},
    mesh::{ChunkGeometry, Mesh, MeshBuilder, MeshData, MeshEvent, MeshHandle},
};
use parking_lot::{Mutex, RwLock};
use std::{
    collections::HashMap,
    sync::{
        mpsc::{channel, Receiver, Sender},
        Arc,
    },
};
use vek::Mat4;
use vulkano::{
    device::{Device, DeviceExtensions, Features, Queue},
    instance::{Instance, InstanceExtensions, PhysicalDevice},
};

/// The render context meshes are uploaded through.
///
/// This is the explicit owner of the GPU device and queue: every upload in
/// the process funnels through one context instead of an ambient global, and
/// the context serializes the GPU side of concurrent transfers while leaving
/// their CPU-side copies free to run in parallel.
///
/// The context also tracks every live mesh instance. Handles report drops
/// and clones through a channel; [`RenderContext::maintain`] applies them,
/// and unregistering the last instance of a mesh frees its CPU mirror and
/// GPU buffers together.
pub struct RenderContext {
    pub(crate) device: Arc<Device>,
    queue: Arc<Queue>,
    pub(crate) upload_lock: Mutex<()>,
    registry: MeshRegistry,
}

impl RenderContext {
    /// Wrap a device and queue that the render driver already created
    /// alongside its window and swapchain.
    pub fn new(device: Arc<Device>, queue: Arc<Queue>) -> Self {
        Self {
            device,
            queue,
            upload_lock: Mutex::new(()),
            registry: MeshRegistry::new(),
        }
    }

    /// Create a context with no window or swapchain, picking the first
    /// physical device that offers a graphics queue. Useful for upload-only
    /// processes and tooling.
    pub fn headless() -> Result<Self, InitError> {
        let instance = Instance::new(None, &InstanceExtensions::none(), None)
            .map_err(InitError::CouldNotInitVulkano)?;

        let mut physical = None;
        let mut queue_family = None;
        for device in PhysicalDevice::enumerate(&instance) {
            let picked =
                physical.is_none() && device.queue_families().any(|q| q.supports_graphics());
            if picked {
                physical = Some(device);
                queue_family = device.queue_families().find(|q| q.supports_graphics());
            }
            log_physical_device_info(&device, picked);
        }
        let physical = physical.ok_or(InitError::CouldNotFindPhysicalDevice)?;
        let queue_family = queue_family.ok_or(InitError::CouldNotFindValidGraphicsQueue)?;

        let (device, mut queues) = Device::new(
            physical,
            &Features::none(),
            &DeviceExtensions::none(),
            [(queue_family, 0.5)].iter().cloned(),
        )
        .map_err(InitError::CouldNotCreateDevice)?;
        let queue = queues
            .next()
            .ok_or(InitError::CouldNotFindValidGraphicsQueue)?;

        Ok(Self::new(device, queue))
    }

    /// The vulkano device this context uploads through.
    pub fn device(&self) -> &Arc<Device> {
        &self.device
    }

    /// The graphics queue the draw driver submits on.
    pub fn queue(&self) -> &Arc<Queue> {
        &self.queue
    }

    /// Start building a mesh from a chunk's geometry arrays.
    ///
    /// Note: you *must* store the handle returned by
    /// [`MeshBuilder::build`] somewhere. When the handle is dropped, the
    /// instance is removed from the world and its resources are unloaded.
    pub fn new_chunk_mesh<'a>(&'a mut self, geometry: ChunkGeometry<'a>) -> MeshBuilder<'a> {
        MeshBuilder::new(self, geometry)
    }

    /// Transfer a chunk's geometry into a GPU-resident mesh with default
    /// instance state. This is short for `self.new_chunk_mesh(geometry).build()`.
    pub fn create_mesh(&mut self, geometry: ChunkGeometry<'_>) -> Result<MeshHandle, MeshError> {
        self.new_chunk_mesh(geometry).build()
    }

    /// Apply handle events that arrived since the last call: dropped
    /// handles unregister their instance, cloned handles register the new
    /// one. The render driver calls this once per tick.
    pub fn maintain(&mut self) {
        self.registry.maintain();
    }

    /// The number of live mesh instances.
    pub fn mesh_count(&self) -> usize {
        self.registry.len()
    }

    /// Snapshot the visible instances as `(mesh, world matrix)` pairs for
    /// the draw driver.
    pub fn meshes(&self) -> Vec<(Arc<Mesh>, Mat4<f32>)> {
        self.registry.visible()
    }

    pub(crate) fn event_sender(&self) -> Sender<MeshEvent> {
        self.registry.sender()
    }

    pub(crate) fn register_instance(&mut self, id: u64, data: Arc<RwLock<MeshData>>) {
        self.registry.register(id, data);
    }
}

fn log_physical_device_info(device: &PhysicalDevice, picked: bool) {
    log::debug!(
        "{} {} (api version {})",
        if picked { "\u{2192}" } else { "-" },
        device.name(),
        device.api_version(),
    );
    for family in device.queue_families() {
        log::debug!(
            "  family {}: queue count {:2}, graphics: {:5}, compute: {:5}",
            family.id(),
            family.queues_count(),
            family.supports_graphics(),
            family.supports_compute(),
        );
    }
}

/// Tracks live mesh instances and the channel their handles report through.
pub(crate) struct MeshRegistry {
    sender: Sender<MeshEvent>,
    receiver: Receiver<MeshEvent>,
    instances: HashMap<u64, Arc<RwLock<MeshData>>>,
}

impl MeshRegistry {
    fn new() -> Self {
        let (sender, receiver) = channel();
        Self {
            sender,
            receiver,
            instances: HashMap::new(),
        }
    }

    fn sender(&self) -> Sender<MeshEvent> {
        self.sender.clone()
    }

    fn register(&mut self, id: u64, data: Arc<RwLock<MeshData>>) {
        self.instances.insert(id, data);
    }

    fn maintain(&mut self) {
        while let Ok(event) = self.receiver.try_recv() {
            match event {
                MeshEvent::Cloned(id, data) => {
                    self.instances.insert(id, data);
                }
                MeshEvent::Unloaded(id) => {
                    // Removing the last instance drops the last Arc<Mesh>,
                    // which frees the CPU mirror and GPU buffers together.
                    self.instances.remove(&id);
                }
            }
        }
    }

    fn len(&self) -> usize {
        self.instances.len()
    }

    fn visible(&self) -> Vec<(Arc<Mesh>, Mat4<f32>)> {
        self.instances
            .values()
            .filter_map(|instance| {
                let instance = instance.read();
                if instance.visible {
                    Some((instance.mesh.clone(), instance.matrix()))
                } else {
                    None
                }
            })
            .collect()
    }
}
