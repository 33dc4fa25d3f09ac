use candle_core::{DType, Device};
use tracing::{debug, info, warn};

/// GPU backend that can host the regressor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(not(any(feature = "cuda", feature = "metal")), allow(dead_code))]
enum GpuBackend {
    Cuda,
    Metal,
}

impl GpuBackend {
    fn open(self) -> candle_core::Result<Device> {
        match self {
            GpuBackend::Cuda => Device::new_cuda(0),
            GpuBackend::Metal => Device::new_metal(0),
        }
    }

    fn name(self) -> &'static str {
        match self {
            GpuBackend::Cuda => "cuda",
            GpuBackend::Metal => "metal",
        }
    }
}

/// Backends compiled into this build, in the order they are tried.
const GPU_BACKENDS: &[GpuBackend] = &[
    #[cfg(feature = "cuda")]
    GpuBackend::Cuda,
    #[cfg(feature = "metal")]
    GpuBackend::Metal,
];

/// Picks the first GPU backend that opens, otherwise the CPU.
///
/// Never fails: an unavailable GPU only costs a warning.
pub fn select_device() -> Device {
    if GPU_BACKENDS.is_empty() {
        debug!("No GPU backend compiled, using CPU");
        return Device::Cpu;
    }

    for backend in GPU_BACKENDS {
        match backend.open() {
            Ok(device) => {
                info!(backend = backend.name(), "Using GPU acceleration");
                return device;
            }
            Err(e) => warn!(backend = backend.name(), error = %e, "GPU backend unavailable"),
        }
    }

    warn!("Falling back to CPU device");
    Device::Cpu
}

/// Weight dtype for `device`: half precision on CUDA, f32 elsewhere.
pub fn dtype_for(device: &Device) -> DType {
    if device.is_cuda() {
        DType::F16
    } else {
        DType::F32
    }
}

/// Short name used in logs and the readiness report.
pub fn device_label(device: &Device) -> &'static str {
    match device {
        Device::Cpu => "cpu",
        Device::Cuda(_) => GpuBackend::Cuda.name(),
        Device::Metal(_) => GpuBackend::Metal.name(),
    }
}
