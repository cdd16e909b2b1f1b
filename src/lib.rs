//! A safe transfer layer between chunk-geometry producers and a GPU renderer.
//!
//! Terrain meshers produce transient float arrays — positions, normals and
//! texture coordinates for an unindexed triangle list — and typically free or
//! reuse them right away. The renderer, on the other hand, needs buffers it
//! owns outright and can release on its own schedule. This crate is the one
//! place those two memory domains meet: it validates the borrowed arrays,
//! deep-copies them into renderer-owned storage, uploads them through an
//! explicit [`RenderContext`], and hands back a [`MeshHandle`] whose lifetime
//! controls when the GPU resource is freed.
//!
//! # Example
//!
//! ```no_run
//! use terramesh::{ChunkGeometry, RenderContext};
//!
//! // One triangle as a terrain mesher would emit it: three floats per
//! // vertex for positions and normals, two for texture coordinates.
//! let mut positions = vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 1.0, 0.0];
//! let normals = vec![0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0];
//! let texcoords = vec![0.0, 1.0, 1.0, 1.0, 1.0, 0.0];
//!
//! let mut context = RenderContext::headless().unwrap();
//! let handle = context
//!     .new_chunk_mesh(ChunkGeometry::new(&positions, &normals, &texcoords, 3))
//!     .with_position((16.0, 0.0, 0.0))
//!     .build()
//!     .unwrap();
//!
//! // The mesh owns its own copies; the producer's arrays are free to go.
//! positions.clear();
//! assert_eq!(handle.mesh().triangle_count(), 1);
//!
//! // Dropping the handle unloads the mesh on the next maintenance pass.
//! drop(handle);
//! context.maintain();
//! assert_eq!(context.mesh_count(), 0);
//! ```

#![warn(missing_docs)]

mod context;
mod error;
mod mesh;

pub use self::{
    context::RenderContext,
    error::{GeometryError, InitError, MeshError},
    mesh::{
        upload_buffers, BufferSource, ChunkGeometry, GeometryBuffers, GpuSet, Mesh, MeshBuilder,
        MeshData, MeshHandle,
    },
};
