//! Concrete GPU backends

mod wgpu_backend;

pub use wgpu_backend::WgpuBackend;
