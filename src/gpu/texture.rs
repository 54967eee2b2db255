//! GPU textures: the depth buffer and uploaded card images.

use image::imageops::FilterType;
use image::RgbaImage;
use wgpu::util::DeviceExt;

use super::pipeline_helpers::DEPTH_FORMAT;

/// Depth attachment matching the surface size.
pub struct DepthTexture {
    /// The underlying GPU texture.
    pub texture: wgpu::Texture,
    /// A default full-texture view.
    pub view: wgpu::TextureView,
}

impl DepthTexture {
    /// Create a depth texture of `width × height` pixels.
    #[must_use]
    pub fn new(device: &wgpu::Device, width: u32, height: u32) -> Self {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Carousel Depth"),
            size: wgpu::Extent3d {
                width: width.max(1),
                height: height.max(1),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        Self { texture, view }
    }
}

/// Shrink `pixels` so neither edge exceeds `max_dimension`, keeping the
/// aspect ratio. Images already within the limit are borrowed unchanged.
#[must_use]
pub fn fit_to_limit(
    pixels: &RgbaImage,
    max_dimension: u32,
) -> std::borrow::Cow<'_, RgbaImage> {
    let (width, height) = pixels.dimensions();
    let longest = width.max(height);
    if longest <= max_dimension || max_dimension == 0 {
        return std::borrow::Cow::Borrowed(pixels);
    }
    let scale = f64::from(max_dimension) / f64::from(longest);
    let new_width = ((f64::from(width) * scale).round() as u32).clamp(1, max_dimension);
    let new_height =
        ((f64::from(height) * scale).round() as u32).clamp(1, max_dimension);
    log::debug!(
        "downscaling {width}x{height} image to {new_width}x{new_height}"
    );
    std::borrow::Cow::Owned(image::imageops::resize(
        pixels,
        new_width,
        new_height,
        FilterType::Triangle,
    ))
}

/// Upload RGBA8 pixels as an sRGB sampled texture, returning its view.
#[must_use]
pub fn upload_rgba(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    label: &str,
    pixels: &RgbaImage,
) -> wgpu::TextureView {
    let texture = device.create_texture_with_data(
        queue,
        &wgpu::TextureDescriptor {
            label: Some(label),
            size: wgpu::Extent3d {
                width: pixels.width(),
                height: pixels.height(),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING,
            view_formats: &[],
        },
        wgpu::util::TextureDataOrder::LayerMajor,
        pixels.as_raw(),
    );
    texture.create_view(&wgpu::TextureViewDescriptor::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_images_are_borrowed() {
        let pixels = RgbaImage::new(64, 32);
        assert!(matches!(
            fit_to_limit(&pixels, 128),
            std::borrow::Cow::Borrowed(_)
        ));
    }

    #[test]
    fn large_images_keep_aspect() {
        let pixels = RgbaImage::new(400, 100);
        let fitted = fit_to_limit(&pixels, 200);
        assert_eq!(fitted.dimensions(), (200, 50));
    }
}
