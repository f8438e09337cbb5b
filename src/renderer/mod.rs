pub mod clear;
pub mod formats;
pub mod texture;

/// Backends probed for a surface. GL covers OpenGL ES on Android.
pub fn backends() -> wgpu::Backends
{
        wgpu::Backends::PRIMARY | wgpu::Backends::GL
}

pub fn instance() -> wgpu::Instance
{
        wgpu::Instance::new(&wgpu::InstanceDescriptor {
                backends: backends(),
                ..Default::default()
        })
}
