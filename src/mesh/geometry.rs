use crate::error::GeometryError;

/// A borrowed view over one chunk's vertex-aligned geometry arrays.
///
/// The producer keeps ownership of the arrays; this view only borrows them
/// for the duration of the transfer call. Index `i` in each array describes
/// the same logical vertex: `positions` and `normals` hold three floats per
/// vertex, `texcoords` two. Vertices form an unindexed triangle list, so the
/// count must be a multiple of 3.
#[derive(Debug, Clone, Copy)]
pub struct ChunkGeometry<'a> {
    positions: &'a [f32],
    normals: &'a [f32],
    texcoords: &'a [f32],
    vertex_count: u32,
}

impl<'a> ChunkGeometry<'a> {
    /// Wrap the producer's arrays together with the vertex count they
    /// describe. No validation happens here; see [`ChunkGeometry::validate`].
    pub fn new(
        positions: &'a [f32],
        normals: &'a [f32],
        texcoords: &'a [f32],
        vertex_count: u32,
    ) -> Self {
        Self {
            positions,
            normals,
            texcoords,
            vertex_count,
        }
    }

    /// The number of vertices the arrays claim to describe.
    pub fn vertex_count(&self) -> u32 {
        self.vertex_count
    }

    /// Check the arrays against the declared vertex count.
    ///
    /// Runs before any allocation or copy. Rejects counts that do not form
    /// whole triangles and arrays whose length does not match their extent.
    pub fn validate(&self) -> Result<(), GeometryError> {
        if self.vertex_count % 3 != 0 {
            return Err(GeometryError::NotTriangles {
                vertex_count: self.vertex_count,
            });
        }
        check_extent("positions", self.positions, self.vertex_count, 3)?;
        check_extent("normals", self.normals, self.vertex_count, 3)?;
        check_extent("texcoords", self.texcoords, self.vertex_count, 2)?;
        Ok(())
    }

    pub(crate) fn positions(&self) -> &'a [f32] {
        self.positions
    }

    pub(crate) fn normals(&self) -> &'a [f32] {
        self.normals
    }

    pub(crate) fn texcoords(&self) -> &'a [f32] {
        self.texcoords
    }
}

fn check_extent(
    buffer: &'static str,
    data: &[f32],
    vertex_count: u32,
    floats_per_vertex: usize,
) -> Result<(), GeometryError> {
    let expected = vertex_count as usize * floats_per_vertex;
    if data.len() != expected {
        return Err(GeometryError::BufferLengthMismatch {
            buffer,
            vertex_count,
            expected,
            actual: data.len(),
        });
    }
    Ok(())
}

/// The renderer-owned deep copy of a chunk's geometry.
///
/// The three buffers are allocated independently and hold byte-for-byte
/// copies of the producer's arrays; no storage is shared with the input, so
/// the producer may free or reuse its arrays the moment the copy returns.
/// These buffers stay alive as the CPU-side mirror of the uploaded mesh and
/// are only freed together with it.
#[derive(Debug)]
pub struct GeometryBuffers {
    positions: Vec<f32>,
    normals: Vec<f32>,
    texcoords: Vec<f32>,
    vertex_count: u32,
    triangle_count: u32,
}

impl GeometryBuffers {
    /// Validate the borrowed geometry and deep-copy it into owned storage.
    pub fn copy_from(geometry: &ChunkGeometry<'_>) -> Result<Self, GeometryError> {
        geometry.validate()?;
        Ok(Self {
            positions: geometry.positions().to_vec(),
            normals: geometry.normals().to_vec(),
            texcoords: geometry.texcoords().to_vec(),
            vertex_count: geometry.vertex_count(),
            triangle_count: geometry.vertex_count() / 3,
        })
    }

    /// Number of vertices held by the buffers.
    pub fn vertex_count(&self) -> u32 {
        self.vertex_count
    }

    /// Number of triangles held by the buffers.
    pub fn triangle_count(&self) -> u32 {
        self.triangle_count
    }

    /// The copied positions, three floats per vertex.
    pub fn positions(&self) -> &[f32] {
        &self.positions
    }

    /// The copied normals, three floats per vertex.
    pub fn normals(&self) -> &[f32] {
        &self.normals
    }

    /// The copied texture coordinates, two floats per vertex.
    pub fn texcoords(&self) -> &[f32] {
        &self.texcoords
    }
}
