//! Offscreen rendering of a single frame to pixels
//!
//! The frame goes through the same egui canvas as the window, into a texture
//! that is then copied back to the CPU for `otto snapshot`.

use crate::canvas::EguiSurface;
use crate::context::ContextError;
use otto_render::Frame;
use tracing::debug;

/// egui-wgpu expects a non-sRGB target, same as the window surface
const COLOR_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8Unorm;

/// Offscreen wgpu context that renders to a texture instead of a window surface
pub struct HeadlessContext {
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub width: u32,
    pub height: u32,
    color_texture: wgpu::Texture,
    color_view: wgpu::TextureView,
}

impl HeadlessContext {
    /// Create a headless context with a `width × height` pixel target
    pub async fn new(width: u32, height: u32) -> Result<Self, ContextError> {
        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: None,
                force_fallback_adapter: false,
            })
            .await
            .ok_or(ContextError::AdapterNotFound)?;

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("Otto Headless Device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: Default::default(),
                },
                None,
            )
            .await
            .map_err(|e| ContextError::DeviceCreation(e.to_string()))?;

        let color_texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Snapshot Color Texture"),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: COLOR_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::COPY_SRC,
            view_formats: &[],
        });
        let color_view = color_texture.create_view(&wgpu::TextureViewDescriptor::default());

        Ok(Self {
            device,
            queue,
            width,
            height,
            color_texture,
            color_view,
        })
    }

    /// Paint `frame` into the color texture, `pixels_per_point` pixels per
    /// logical frame unit
    pub fn paint(&self, frame: &Frame, pixels_per_point: f32) {
        let ctx = egui::Context::default();
        let mut raw_input = egui::RawInput {
            screen_rect: Some(egui::Rect::from_min_size(
                egui::Pos2::ZERO,
                egui::vec2(
                    self.width as f32 / pixels_per_point,
                    self.height as f32 / pixels_per_point,
                ),
            )),
            ..Default::default()
        };
        raw_input
            .viewports
            .entry(egui::ViewportId::ROOT)
            .or_default()
            .native_pixels_per_point = Some(pixels_per_point);

        let full_output = ctx.run(raw_input, |ctx| {
            egui::CentralPanel::default()
                .frame(egui::Frame::none())
                .show(ctx, |ui| {
                    EguiSurface::paint(ui, frame);
                });
        });

        let paint_jobs = ctx.tessellate(full_output.shapes, full_output.pixels_per_point);
        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [self.width, self.height],
            pixels_per_point: full_output.pixels_per_point,
        };
        debug!(
            width = self.width,
            height = self.height,
            jobs = paint_jobs.len(),
            "painting snapshot"
        );

        let mut renderer = egui_wgpu::Renderer::new(&self.device, COLOR_FORMAT, None, 1, false);
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Snapshot Encoder"),
            });

        for (id, image_delta) in &full_output.textures_delta.set {
            renderer.update_texture(&self.device, &self.queue, *id, image_delta);
        }
        renderer.update_buffers(
            &self.device,
            &self.queue,
            &mut encoder,
            &paint_jobs,
            &screen_descriptor,
        );

        {
            let render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Snapshot Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &self.color_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::WHITE),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            let mut render_pass = render_pass.forget_lifetime();
            renderer.render(&mut render_pass, &paint_jobs, &screen_descriptor);
        }

        self.queue.submit(std::iter::once(encoder.finish()));

        for id in &full_output.textures_delta.free {
            renderer.free_texture(id);
        }
    }

    /// Read rendered pixels back from the color texture as tightly-packed RGBA bytes
    pub async fn read_pixels(&self) -> Result<Vec<u8>, ContextError> {
        let padded_bytes_per_row = padded_row_bytes(self.width);
        let buffer_size = (padded_bytes_per_row * self.height) as u64;
        let staging_buffer = self.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Pixel Readback Buffer"),
            size: buffer_size,
            usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::MAP_READ,
            mapped_at_creation: false,
        });

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Readback Encoder"),
            });

        encoder.copy_texture_to_buffer(
            wgpu::ImageCopyTexture {
                texture: &self.color_texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            wgpu::ImageCopyBuffer {
                buffer: &staging_buffer,
                layout: wgpu::ImageDataLayout {
                    offset: 0,
                    bytes_per_row: Some(padded_bytes_per_row),
                    rows_per_image: Some(self.height),
                },
            },
            wgpu::Extent3d {
                width: self.width,
                height: self.height,
                depth_or_array_layers: 1,
            },
        );

        self.queue.submit(std::iter::once(encoder.finish()));

        let buffer_slice = staging_buffer.slice(..);
        let (tx, rx) = std::sync::mpsc::channel();
        buffer_slice.map_async(wgpu::MapMode::Read, move |result| {
            let _ = tx.send(result);
        });
        self.device.poll(wgpu::Maintain::Wait);

        rx.recv()
            .map_err(|e| ContextError::BufferReadFailed(e.to_string()))?
            .map_err(|e| ContextError::BufferReadFailed(e.to_string()))?;

        let data = buffer_slice.get_mapped_range();
        let pixels = strip_row_padding(&data, self.width, self.height, padded_bytes_per_row);
        drop(data);
        staging_buffer.unmap();

        Ok(pixels)
    }
}

/// Pixel size of a frame rendered at `scale` pixels per logical unit
pub fn snapshot_size(frame: &Frame, scale: f32) -> (u32, u32) {
    let px = |len: f32| (len * scale).round().max(1.0) as u32;
    (px(frame.width), px(frame.height))
}

/// Bytes per row of a texture copy, rounded up to wgpu's alignment
fn padded_row_bytes(width: u32) -> u32 {
    let align = wgpu::COPY_BYTES_PER_ROW_ALIGNMENT;
    (width * 4).div_ceil(align) * align
}

fn strip_row_padding(data: &[u8], width: u32, height: u32, padded_bytes_per_row: u32) -> Vec<u8> {
    let row_bytes = (width * 4) as usize;
    let mut pixels = Vec::with_capacity(row_bytes * height as usize);
    for row in 0..height as usize {
        let start = row * padded_bytes_per_row as usize;
        pixels.extend_from_slice(&data[start..start + row_bytes]);
    }
    pixels
}

#[cfg(test)]
mod tests {
    use super::*;
    use otto_core::Phase;

    #[test]
    fn rows_are_aligned_for_copies() {
        assert_eq!(padded_row_bytes(64), 256);
        assert_eq!(padded_row_bytes(200), 1024);
        assert_eq!(padded_row_bytes(65), 512);
    }

    #[test]
    fn padding_is_dropped_per_row() {
        // 1×2 image with 4 padding bytes per row
        let data = [1, 2, 3, 4, 0, 0, 0, 0, 5, 6, 7, 8, 0, 0, 0, 0];
        assert_eq!(strip_row_padding(&data, 1, 2, 8), vec![1, 2, 3, 4, 5, 6, 7, 8]);
    }

    #[test]
    fn size_scales_logical_canvas() {
        let frame = Frame::new(200.0, 320.0, 0.0, Phase::Intake);
        assert_eq!(snapshot_size(&frame, 1.0), (200, 320));
        assert_eq!(snapshot_size(&frame, 2.5), (500, 800));
        assert_eq!(snapshot_size(&frame, 0.0), (1, 1));
    }
}
