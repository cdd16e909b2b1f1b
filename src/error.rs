use thiserror::Error;

/// Errors describing geometry input that can never form a valid mesh.
///
/// These are reported synchronously, before any buffer is allocated or
/// copied; a failed validation leaves no trace behind.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum GeometryError {
    /// The vertex count does not describe whole triangles.
    ///
    /// Every mesh is an unindexed triangle list, so the count must be a
    /// multiple of 3. A trailing partial triangle is rejected rather than
    /// silently truncated.
    #[error("vertex count {vertex_count} does not describe whole triangles")]
    NotTriangles {
        /// The vertex count that was passed in
        vertex_count: u32,
    },

    /// One of the input arrays does not match the declared vertex count.
    ///
    /// Positions and normals must hold `3 * vertex_count` floats, texture
    /// coordinates `2 * vertex_count`.
    #[error("{buffer} buffer holds {actual} floats, expected {expected} for {vertex_count} vertices")]
    BufferLengthMismatch {
        /// Which of the three arrays mismatched
        buffer: &'static str,
        /// The vertex count that was passed in
        vertex_count: u32,
        /// The number of floats the array should hold
        expected: usize,
        /// The number of floats the array actually holds
        actual: usize,
    },
}

/// Errors generated when transferring geometry into a GPU mesh.
///
/// All failures are local to the call that produced them. Anything the call
/// already allocated is released before the error is returned, so a failed
/// transfer never leaks a half-built resource; retrying means resubmitting
/// the original input.
#[derive(Error, Debug)]
pub enum MeshError {
    /// The input arrays failed validation. Nothing was allocated.
    #[error("invalid geometry input: {0}")]
    Geometry(#[from] GeometryError),

    /// A device-visible buffer could not be allocated during the upload step.
    #[error("could not allocate a device-visible buffer: {0:?}")]
    Allocation(#[from] vulkano::memory::DeviceMemoryAllocError),
}

/// Errors that are thrown while bootstrapping a headless render context.
/// These are mostly internal and graphics card errors and are (hopefully)
/// unlikely to occur.
#[derive(Error, Debug)]
pub enum InitError {
    /// Could not initialize Vulkano
    #[error("Could not init Vulkano: {0:?}")]
    CouldNotInitVulkano(vulkano::instance::InstanceCreationError),

    /// Could not find a physical device
    #[error("Could not find a physical device")]
    CouldNotFindPhysicalDevice,

    /// Could not find a queue family that supports graphics
    #[error("Could not find a valid graphics queue")]
    CouldNotFindValidGraphicsQueue,

    /// Could not create a vulkano device
    #[error("Could not create a device: {0:?}")]
    CouldNotCreateDevice(vulkano::device::DeviceCreationError),
}
