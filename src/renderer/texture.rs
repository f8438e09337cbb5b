#[derive(Debug)]
pub struct DepthTexture
{
        pub texture: wgpu::Texture,
        pub view: wgpu::TextureView,
        pub format: wgpu::TextureFormat,
}

impl DepthTexture
{
        /// Depth attachment matching the surface size.
        pub fn new(
                device: &wgpu::Device,
                config: &wgpu::SurfaceConfiguration,
                format: wgpu::TextureFormat,
        ) -> Self
        {
                let size = wgpu::Extent3d {
                        width: config.width.max(1),
                        height: config.height.max(1),
                        depth_or_array_layers: 1,
                };

                let texture = device.create_texture(&wgpu::TextureDescriptor {
                        label: Some("depth_texture"),
                        size,
                        mip_level_count: 1,
                        sample_count: 1,
                        dimension: wgpu::TextureDimension::D2,
                        format,
                        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
                        view_formats: &[],
                });

                let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

                Self {
                        texture,
                        view,
                        format,
                }
        }

        pub fn has_stencil(&self) -> bool
        {
                self.format.has_stencil_aspect()
        }

        pub fn has_depth(&self) -> bool
        {
                self.format.has_depth_aspect()
        }
}
