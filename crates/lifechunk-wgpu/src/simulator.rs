//! GPU-resident chunk simulator.
//!
//! Owns two device buffers — `current` (copy-in) and `next`
//! (copy-out) — and a compute pipeline compiled once at construction.
//! One dispatch advances a whole chunk: one invocation per flat cell
//! index, eight neighbor reads each, one disjoint write into `next`.
//!
//! The shader is the branch-free flat-array rule: instead of bounds
//! checks at grid edges, the row-above/row-below anchors are clamped
//! into range with `max`/`min`. Halo-ring lanes therefore compute
//! garbage from wrong neighbors; drivers discard the halo and read
//! only the interior, where the clamped anchors coincide with the
//! true `gid - w` / `gid + w` rows for any `w,h >= 3`.

use std::sync::Arc;

use lifechunk_core::{edge_activity, Cell, ChunkDims, ChunkError, EdgeActivity, Result};
use wgpu::util::DeviceExt;

use crate::context::GpuContext;

/// WGSL source for the per-cell transition kernel.
const LIFE_WGSL: &str = r#"
// Chunked Game of Life transition kernel.
//
// One invocation per flat index gid in [0, w*h). The row anchors are
// clamped instead of branching on grid edges; WGSL additionally
// requires every index to stay in bounds, so the final flat indices
// are clamped to [0, n-1]. That extra clamp only changes what
// halo-ring lanes (whose results are discarded) observe.

struct Params {
    w: i32,
    h: i32,
    _pad0: i32,
    _pad1: i32,
}

@group(0) @binding(0) var<uniform> params: Params;
@group(0) @binding(1) var<storage, read> current: array<i32>;
@group(0) @binding(2) var<storage, read_write> next: array<i32>;

fn cell_at(idx: i32, n: i32) -> i32 {
    return current[u32(clamp(idx, 0, n - 1))];
}

@compute @workgroup_size(256)
fn life_step(@builtin(global_invocation_id) id: vec3u) {
    let gid = i32(id.x);
    let n = params.w * params.h;
    if (gid >= n) {
        return;
    }

    let gidym = max(gid - params.w, 1);
    let gidyp = min(gid + params.w + 1, n);
    let alive = cell_at(gid - 1, n) + cell_at(gid + 1, n)
        + cell_at(gidym - 1, n) + cell_at(gidym, n) + cell_at(gidym + 1, n)
        + cell_at(gidyp, n) + cell_at(gidyp - 1, n) + cell_at(gidyp - 2, n);

    if (alive == 3 || (alive == 2 && current[u32(gid)] != 0)) {
        next[u32(gid)] = 1;
    } else {
        next[u32(gid)] = 0;
    }
}
"#;

/// Kernel workgroup size; dispatches cover `ceil(n / 256)` groups and
/// excess lanes return early.
const WORKGROUP_SIZE: u32 = 256;

/// Uniform parameters (must match the WGSL struct layout).
#[repr(C)]
#[derive(Debug, Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
struct LifeParams {
    w: i32,
    h: i32,
    _pad0: i32,
    _pad1: i32,
}

/// Simulator for Game of Life on one world chunk.
///
/// Created once per chunk; the two generation buffers are overwritten
/// every step, never reallocated, and released on drop.
pub struct ChunkSimulator {
    /// Chunk dimensions, halo included.
    dims: ChunkDims,
    /// The wgpu device.
    device: Arc<wgpu::Device>,
    /// The in-order command queue.
    queue: Arc<wgpu::Queue>,
    /// Compiled transition pipeline.
    pipeline: wgpu::ComputePipeline,
    /// Bind group over params/current/next, created once.
    bind_group: wgpu::BindGroup,
    /// Current generation (copy-in side).
    current: wgpu::Buffer,
    /// Next generation (copy-out side).
    next: wgpu::Buffer,
}

impl ChunkSimulator {
    /// Create a simulator for a `w x h` chunk (halo included) and
    /// compile the transition kernel.
    ///
    /// Both generation buffers start zero-filled, so [`get_output`]
    /// before any [`run`] returns an all-dead grid. Fails on empty
    /// dimensions or if kernel compilation fails; neither is retried.
    ///
    /// [`get_output`]: ChunkSimulator::get_output
    /// [`run`]: ChunkSimulator::run
    pub async fn new(ctx: &GpuContext, w: i32, h: i32) -> Result<Self> {
        let dims = ChunkDims::new(w, h)?;
        let device = Arc::clone(ctx.device());
        let queue = Arc::clone(ctx.queue());

        let buffer_bytes = (dims.area() * std::mem::size_of::<Cell>()) as u64;
        let usage =
            wgpu::BufferUsages::STORAGE | wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::COPY_SRC;

        // wgpu zero-fills fresh buffers, so both generations start
        // all-dead.
        let current = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Chunk Current"),
            size: buffer_bytes,
            usage,
            mapped_at_creation: false,
        });
        let next = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Chunk Next"),
            size: buffer_bytes,
            usage,
            mapped_at_creation: false,
        });

        let params = LifeParams {
            w: dims.w(),
            h: dims.h(),
            _pad0: 0,
            _pad1: 0,
        };
        let params_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Chunk Params"),
            contents: bytemuck::bytes_of(&params),
            usage: wgpu::BufferUsages::UNIFORM,
        });

        // Compile inside a validation scope so a broken kernel fails
        // construction instead of surfacing later as a device error.
        device.push_error_scope(wgpu::ErrorFilter::Validation);

        let module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Life Step Shader"),
            source: wgpu::ShaderSource::Wgsl(LIFE_WGSL.into()),
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Life Step Bind Group Layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::COMPUTE,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::COMPUTE,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Storage { read_only: true },
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 2,
                    visibility: wgpu::ShaderStages::COMPUTE,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Storage { read_only: false },
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
            ],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Life Step Pipeline Layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_compute_pipeline(&wgpu::ComputePipelineDescriptor {
            label: Some("Life Step Pipeline"),
            layout: Some(&pipeline_layout),
            module: &module,
            entry_point: "life_step",
        });

        if let Some(err) = device.pop_error_scope().await {
            return Err(ChunkError::KernelCompile(err.to_string()));
        }

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Life Step Bind Group"),
            layout: &bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: params_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: current.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: next.as_entire_binding(),
                },
            ],
        });

        tracing::info!(w, h, cells = dims.area(), "created chunk simulator");

        Ok(Self {
            dims,
            device,
            queue,
            pipeline,
            bind_group,
            current,
            next,
        })
    }

    /// Chunk dimensions, halo included.
    pub fn dims(&self) -> ChunkDims {
        self.dims
    }

    /// Copy a caller-supplied `w*h` grid into the current generation.
    ///
    /// A length mismatch is a caller-contract violation; no partial
    /// copy is attempted.
    pub fn set_input(&self, cells: &[Cell]) -> Result<()> {
        self.dims.check_len(cells.len())?;
        self.queue
            .write_buffer(&self.current, 0, bytemuck::cast_slice(cells));
        Ok(())
    }

    /// Dispatch one simulation step: `w*h` invocations reading the
    /// frozen current generation and writing `next`.
    ///
    /// Does not touch `current`; calling `run` again without an
    /// intervening [`set_input`](ChunkSimulator::set_input) recomputes
    /// the same `next` generation.
    pub fn run(&self) -> Result<()> {
        let n = self.dims.area() as u32;
        let workgroups = n.div_ceil(WORKGROUP_SIZE);

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Life Step Encoder"),
            });

        {
            let mut pass = encoder.begin_compute_pass(&wgpu::ComputePassDescriptor {
                label: Some("Life Step Pass"),
                timestamp_writes: None,
            });
            pass.set_pipeline(&self.pipeline);
            pass.set_bind_group(0, &self.bind_group, &[]);
            pass.dispatch_workgroups(workgroups, 1, 1);
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        tracing::debug!(cells = n, workgroups, "dispatched life step");
        Ok(())
    }

    /// Copy the next generation back to the host.
    ///
    /// Does not clear or swap buffers. Halo-ring values in the result
    /// are kernel scratch output and must not be read as
    /// authoritative.
    pub fn get_output(&self) -> Result<Vec<Cell>> {
        let size = (self.dims.area() * std::mem::size_of::<Cell>()) as u64;

        let staging = self.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Chunk Staging"),
            size,
            usage: wgpu::BufferUsages::MAP_READ | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Chunk Readback Encoder"),
            });
        encoder.copy_buffer_to_buffer(&self.next, 0, &staging, 0, size);
        self.queue.submit(std::iter::once(encoder.finish()));

        let slice = staging.slice(..);
        let (tx, rx) = std::sync::mpsc::channel();
        slice.map_async(wgpu::MapMode::Read, move |result| {
            let _ = tx.send(result);
        });
        self.device.poll(wgpu::Maintain::Wait);

        rx.recv()
            .map_err(|e| ChunkError::Transfer(format!("map callback dropped: {e}")))?
            .map_err(|e| ChunkError::Transfer(format!("buffer map failed: {e:?}")))?;

        let mapped = slice.get_mapped_range();
        let cells: Vec<Cell> = bytemuck::cast_slice(&mapped).to_vec();
        drop(mapped);
        staging.unmap();

        Ok(cells)
    }

    /// Edge-liveness query against a dense host grid, in clockwise
    /// (top, right, bottom, left) order.
    ///
    /// This is the primitive a multi-chunk coordinator consumes to
    /// decide whether a neighbor's halo needs this chunk's edge state
    /// before its next step.
    pub fn check_bounds(&self, cells: &[Cell]) -> Result<EdgeActivity> {
        edge_activity(cells, self.dims)
    }
}
