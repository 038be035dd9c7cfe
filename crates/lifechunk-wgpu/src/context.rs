//! GPU context management.
//!
//! The original design used one ambient process-wide compute context;
//! here the context is an explicit object injected into each
//! [`ChunkSimulator`](crate::ChunkSimulator) at construction. Several
//! simulators may share one context (submissions serialize FIFO on
//! its queue) or own independent contexts.

use std::sync::Arc;

use lifechunk_core::{ChunkError, Result};

/// Wrapper around a wgpu instance, adapter, device, and queue.
pub struct GpuContext {
    /// The wgpu instance.
    #[allow(dead_code)]
    instance: wgpu::Instance,
    /// The selected adapter.
    #[allow(dead_code)]
    adapter: wgpu::Adapter,
    /// The device.
    device: Arc<wgpu::Device>,
    /// The in-order command queue.
    queue: Arc<wgpu::Queue>,
    /// Adapter info.
    info: wgpu::AdapterInfo,
}

impl GpuContext {
    /// Create a context on the highest-performance available adapter.
    pub async fn new() -> Result<Self> {
        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: None,
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| {
                ChunkError::BackendUnavailable("no compatible GPU adapter found".to_string())
            })?;

        let info = adapter.get_info();

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("LifeChunk Device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                },
                None,
            )
            .await
            .map_err(|e| ChunkError::Backend(format!("failed to create device: {e}")))?;

        tracing::info!("created GPU context: {} ({:?})", info.name, info.backend);

        Ok(Self {
            instance,
            adapter,
            device: Arc::new(device),
            queue: Arc::new(queue),
            info,
        })
    }

    /// Adapter name.
    pub fn name(&self) -> &str {
        &self.info.name
    }

    /// Backend type (Vulkan, Metal, DX12, etc.).
    pub fn backend(&self) -> wgpu::Backend {
        self.info.backend
    }

    /// The wgpu device.
    pub fn device(&self) -> &Arc<wgpu::Device> {
        &self.device
    }

    /// The command queue.
    pub fn queue(&self) -> &Arc<wgpu::Queue> {
        &self.queue
    }

    /// Poll the device, blocking until queued work completes when
    /// given [`wgpu::Maintain::Wait`].
    pub fn poll(&self, maintain: wgpu::Maintain) {
        let _ = self.device.poll(maintain);
    }
}
