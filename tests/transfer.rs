//! End-to-end tests of the geometry transfer pipeline through the public
//! API, using a recording buffer source instead of a graphics device.

use std::cell::Cell;
use terramesh::{
    upload_buffers, BufferSource, ChunkGeometry, GeometryBuffers, GeometryError, GpuSet,
    MeshError,
};

/// Stands in for the Vulkan backend: remembers what was uploaded and counts
/// allocations so tests can assert on both.
#[derive(Default)]
struct RecordingSource {
    allocations: Cell<usize>,
}

#[derive(Debug)]
struct RecordedBuffer {
    label: &'static str,
    data: Vec<f32>,
}

impl BufferSource for RecordingSource {
    type Buffer = RecordedBuffer;

    fn alloc(&self, label: &'static str, data: &[f32]) -> Result<RecordedBuffer, MeshError> {
        self.allocations.set(self.allocations.get() + 1);
        Ok(RecordedBuffer {
            label,
            data: data.to_vec(),
        })
    }
}

/// The same validate → deep copy → upload sequence a render context runs.
fn transfer(
    geometry: ChunkGeometry<'_>,
    source: &RecordingSource,
) -> Result<(GeometryBuffers, Option<GpuSet<RecordedBuffer>>), MeshError> {
    let cpu = GeometryBuffers::copy_from(&geometry)?;
    let gpu = upload_buffers(source, &cpu)?;
    Ok((cpu, gpu))
}

fn chunk_arrays(vertex_count: usize) -> (Vec<f32>, Vec<f32>, Vec<f32>) {
    let positions = (0..vertex_count * 3).map(|i| i as f32).collect();
    let normals = (0..vertex_count * 3).map(|i| (i as f32).sin()).collect();
    let texcoords = (0..vertex_count * 2).map(|i| i as f32 * 0.5).collect();
    (positions, normals, texcoords)
}

#[test]
fn round_trips_are_byte_identical_across_sizes() {
    for &vertex_count in &[0usize, 3, 300, 30_000] {
        let (p, n, t) = chunk_arrays(vertex_count);
        let source = RecordingSource::default();
        let (cpu, gpu) =
            transfer(ChunkGeometry::new(&p, &n, &t, vertex_count as u32), &source).unwrap();

        assert_eq!(cpu.vertex_count(), vertex_count as u32);
        assert_eq!(cpu.triangle_count(), vertex_count as u32 / 3);
        assert_eq!(cpu.positions(), &p[..]);
        assert_eq!(cpu.normals(), &n[..]);
        assert_eq!(cpu.texcoords(), &t[..]);

        if vertex_count == 0 {
            assert!(gpu.is_none());
            assert_eq!(source.allocations.get(), 0);
        } else {
            let gpu = gpu.unwrap();
            assert_eq!(gpu.positions.label, "positions");
            assert_eq!(gpu.positions.data, p);
            assert_eq!(gpu.normals.data, n);
            assert_eq!(gpu.texcoords.data, t);
            assert_eq!(source.allocations.get(), 3);
        }
    }
}

#[test]
fn resource_is_independent_of_the_callers_arrays() {
    let (mut p, mut n, mut t) = chunk_arrays(6);
    let source = RecordingSource::default();
    let (cpu, gpu) = transfer(ChunkGeometry::new(&p, &n, &t, 6), &source).unwrap();
    let gpu = gpu.unwrap();

    let (p0, n0, t0) = chunk_arrays(6);
    for v in p.iter_mut().chain(n.iter_mut()).chain(t.iter_mut()) {
        *v = f32::MAX;
    }

    assert_eq!(cpu.positions(), &p0[..]);
    assert_eq!(cpu.normals(), &n0[..]);
    assert_eq!(cpu.texcoords(), &t0[..]);
    assert_eq!(gpu.positions.data, p0);
    assert_eq!(gpu.normals.data, n0);
    assert_eq!(gpu.texcoords.data, t0);
}

#[test]
fn repeated_transfers_never_share_storage() {
    let (p, n, t) = chunk_arrays(30);
    let source = RecordingSource::default();
    let geometry = ChunkGeometry::new(&p, &n, &t, 30);

    let resources: Vec<_> = (0..5)
        .map(|_| transfer(geometry, &source).unwrap())
        .collect();

    for (i, (a, _)) in resources.iter().enumerate() {
        assert_ne!(a.positions().as_ptr(), p.as_ptr());
        for (b, _) in resources.iter().skip(i + 1) {
            assert_ne!(a.positions().as_ptr(), b.positions().as_ptr());
            assert_ne!(a.normals().as_ptr(), b.normals().as_ptr());
            assert_ne!(a.texcoords().as_ptr(), b.texcoords().as_ptr());
        }
    }
}

#[test]
fn invalid_geometry_fails_before_any_allocation() {
    let (p, n, t) = chunk_arrays(6);
    let source = RecordingSource::default();

    // A count that is not a multiple of 3.
    let (p5, n5, t5) = chunk_arrays(5);
    let err = transfer(ChunkGeometry::new(&p5, &n5, &t5, 5), &source).unwrap_err();
    match err {
        MeshError::Geometry(GeometryError::NotTriangles { vertex_count }) => {
            assert_eq!(vertex_count, 5)
        }
        other => panic!("expected a triangle-count rejection, got {:?}", other),
    }

    // A truncated normals array.
    let err = transfer(ChunkGeometry::new(&p, &n[..9], &t, 6), &source).unwrap_err();
    match err {
        MeshError::Geometry(GeometryError::BufferLengthMismatch {
            buffer,
            expected,
            actual,
            ..
        }) => {
            assert_eq!(buffer, "normals");
            assert_eq!(expected, 18);
            assert_eq!(actual, 9);
        }
        other => panic!("expected a length-mismatch rejection, got {:?}", other),
    }

    assert_eq!(source.allocations.get(), 0);
}

#[test]
fn randomized_chunks_round_trip() {
    use rand::Rng;

    let mut rng = rand::thread_rng();
    for _ in 0..10 {
        let triangles: usize = rng.gen_range(1, 200);
        let vertex_count = triangles * 3;
        let p: Vec<f32> = (0..vertex_count * 3).map(|_| rng.gen()).collect();
        let n: Vec<f32> = (0..vertex_count * 3).map(|_| rng.gen()).collect();
        let t: Vec<f32> = (0..vertex_count * 2).map(|_| rng.gen()).collect();

        let source = RecordingSource::default();
        let (cpu, gpu) =
            transfer(ChunkGeometry::new(&p, &n, &t, vertex_count as u32), &source).unwrap();
        let gpu = gpu.unwrap();

        assert_eq!(cpu.triangle_count() as usize, triangles);
        assert_eq!(gpu.positions.data, p);
        assert_eq!(gpu.normals.data, n);
        assert_eq!(gpu.texcoords.data, t);
    }
}
