//! Graphics context collaborator.
//!
//! Hosts that upload or read back mesh data must have a graphics context
//! before doing so. The diagnostics themselves run on the CPU and never need
//! one; this module only gives hosts a seam to probe for it.
//!
//! # Example
//!
//! ```
//! use mesh_diagnostics::context::{ContextInit, HeadlessContext, ensure_context};
//!
//! assert!(HeadlessContext.init());
//! assert!(ensure_context(&HeadlessContext).is_ok());
//!
//! let unavailable = || false;
//! assert!(ensure_context(&unavailable).is_err());
//! ```

use tracing::{debug, warn};

use crate::error::{DiagnosticsError, DiagnosticsResult};

/// Something that can bring up a process-wide graphics context.
pub trait ContextInit {
    /// Initialize the context. `true` means it is ready for use.
    fn init(&self) -> bool;
}

impl<F: Fn() -> bool> ContextInit for F {
    fn init(&self) -> bool {
        self()
    }
}

/// A context for hosts that do no rendering. Always ready.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeadlessContext;

impl ContextInit for HeadlessContext {
    fn init(&self) -> bool {
        debug!("Headless context: no graphics device required");
        true
    }
}

/// Initialize `ctx`, turning a `false` into an error.
///
/// # Errors
///
/// Returns [`DiagnosticsError::ContextUnavailable`] if the context is not ready.
pub fn ensure_context(ctx: &dyn ContextInit) -> DiagnosticsResult<()> {
    if ctx.init() {
        Ok(())
    } else {
        warn!("Graphics context initialization failed");
        Err(DiagnosticsError::ContextUnavailable)
    }
}

/// The context used by the C ABI: the GPU probe when the `gpu` feature is
/// enabled, otherwise [`HeadlessContext`].
#[must_use]
pub fn default_context() -> &'static dyn ContextInit {
    #[cfg(feature = "gpu")]
    {
        &gpu::GpuContextProbe
    }
    #[cfg(not(feature = "gpu"))]
    {
        &HeadlessContext
    }
}

#[cfg(feature = "gpu")]
pub use gpu::{GpuAdapterInfo, GpuContextProbe};

#[cfg(feature = "gpu")]
mod gpu {
    use std::sync::OnceLock;

    use tracing::{debug, info, warn};
    use wgpu::{DeviceDescriptor, Instance, RequestAdapterOptions};

    use super::ContextInit;

    /// Adapter found by the probe, lazily initialized on first access.
    static GPU_ADAPTER: OnceLock<Option<GpuAdapterInfo>> = OnceLock::new();

    /// Information about the GPU adapter.
    #[derive(Debug, Clone)]
    pub struct GpuAdapterInfo {
        /// Device name (e.g., "NVIDIA RTX 3080").
        pub name: String,

        /// Backend API (e.g., Vulkan, Metal, Dx12).
        pub backend: String,
    }

    /// Probes for a wgpu adapter and device once per process.
    ///
    /// The device is only requested to prove it can be created; it is not kept.
    #[derive(Debug, Clone, Copy, Default)]
    pub struct GpuContextProbe;

    impl GpuContextProbe {
        /// Adapter found by the probe, running it if it has not run yet.
        #[must_use]
        pub fn adapter() -> Option<&'static GpuAdapterInfo> {
            GPU_ADAPTER
                .get_or_init(|| match pollster::block_on(probe()) {
                    Ok(info) => {
                        info!(
                            adapter = %info.name,
                            backend = %info.backend,
                            "GPU context initialized"
                        );
                        Some(info)
                    }
                    Err(reason) => {
                        warn!("GPU initialization failed: {}", reason);
                        None
                    }
                })
                .as_ref()
        }
    }

    impl ContextInit for GpuContextProbe {
        fn init(&self) -> bool {
            Self::adapter().is_some()
        }
    }

    async fn probe() -> Result<GpuAdapterInfo, String> {
        debug!("Probing for GPU adapter");

        let instance = Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let adapter = instance
            .request_adapter(&RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                force_fallback_adapter: false,
                compatible_surface: None,
            })
            .await
            .ok_or_else(|| "no compatible adapter found".to_string())?;

        let adapter_info = adapter.get_info();
        debug!(
            name = %adapter_info.name,
            backend = ?adapter_info.backend,
            "GPU adapter found"
        );

        adapter
            .request_device(
                &DeviceDescriptor {
                    label: Some("mesh-diagnostics"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    ..Default::default()
                },
                None,
            )
            .await
            .map_err(|e| format!("device request failed: {e}"))?;

        Ok(GpuAdapterInfo {
            name: adapter_info.name,
            backend: format!("{:?}", adapter_info.backend),
        })
    }
}
