use crate::constants::{CARD_TEXTURE_HEIGHT, CARD_TEXTURE_WIDTH, LABEL_FONT};
use crate::core::{rgb_to_css, Rgb, TextureFactory};
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

/// GPU copy of a rasterized card face. Destroyed when dropped.
pub struct CardTexture {
    texture: wgpu::Texture,
    pub view: wgpu::TextureView,
}

impl Drop for CardTexture {
    fn drop(&mut self) {
        self.texture.destroy();
    }
}

/// Rasterizes gradients and labels on a hidden 2D canvas and uploads them.
pub struct CanvasTextureFactory {
    device: wgpu::Device,
    queue: wgpu::Queue,
    ctx: web::CanvasRenderingContext2d,
    width: u32,
    height: u32,
}

impl CanvasTextureFactory {
    pub fn new(
        document: &web::Document,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
    ) -> anyhow::Result<Self> {
        let canvas: web::HtmlCanvasElement = document
            .create_element("canvas")
            .map_err(|e| anyhow::anyhow!("create canvas: {:?}", e))?
            .dyn_into()
            .map_err(|e| anyhow::anyhow!("not a canvas: {:?}", e))?;
        canvas.set_width(CARD_TEXTURE_WIDTH);
        canvas.set_height(CARD_TEXTURE_HEIGHT);
        let ctx: web::CanvasRenderingContext2d = canvas
            .get_context("2d")
            .map_err(|e| anyhow::anyhow!("get_context: {:?}", e))?
            .ok_or_else(|| anyhow::anyhow!("no 2d context"))?
            .dyn_into()
            .map_err(|e| anyhow::anyhow!("not a 2d context: {:?}", e))?;
        Ok(Self {
            device: device.clone(),
            queue: queue.clone(),
            ctx,
            width: CARD_TEXTURE_WIDTH,
            height: CARD_TEXTURE_HEIGHT,
        })
    }

    fn paint_gradient(&self, stops: &[Rgb]) -> Result<Vec<u8>, JsValue> {
        let (w, h) = (self.width as f64, self.height as f64);
        let ctx = &self.ctx;
        ctx.clear_rect(0.0, 0.0, w, h);
        let gradient = ctx.create_linear_gradient(0.0, 0.0, w, h);
        let last = stops.len().saturating_sub(1).max(1) as f32;
        for (i, c) in stops.iter().enumerate() {
            gradient.add_color_stop(i as f32 / last, &rgb_to_css(*c))?;
        }
        #[allow(deprecated)]
        ctx.set_fill_style(&gradient);
        ctx.fill_rect(0.0, 0.0, w, h);

        // Thin inset frame
        #[allow(deprecated)]
        ctx.set_stroke_style(&JsValue::from_str("rgba(255,255,255,0.35)"));
        ctx.set_line_width(3.0);
        ctx.stroke_rect(10.0, 10.0, w - 20.0, h - 20.0);
        self.read_pixels()
    }

    fn paint_label(&self, word: &str) -> Result<Vec<u8>, JsValue> {
        let (w, h) = (self.width as f64, self.height as f64);
        let ctx = &self.ctx;
        ctx.clear_rect(0.0, 0.0, w, h);
        ctx.set_font(LABEL_FONT);
        ctx.set_text_align("center");
        ctx.set_text_baseline("middle");
        ctx.set_shadow_color("rgba(0,0,0,0.65)");
        ctx.set_shadow_blur(12.0);
        #[allow(deprecated)]
        ctx.set_fill_style(&JsValue::from_str("#ffffff"));
        ctx.fill_text(word, w * 0.5, h * 0.5)?;
        ctx.set_shadow_blur(0.0);
        self.read_pixels()
    }

    fn read_pixels(&self) -> Result<Vec<u8>, JsValue> {
        let image = self
            .ctx
            .get_image_data(0.0, 0.0, self.width as f64, self.height as f64)?;
        Ok(image.data().0)
    }

    fn upload(&self, label: &str, pixels: &[u8]) -> CardTexture {
        let size = wgpu::Extent3d {
            width: self.width,
            height: self.height,
            depth_or_array_layers: 1,
        };
        let texture = self.device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });
        self.queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            pixels,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * self.width),
                rows_per_image: Some(self.height),
            },
            size,
        );
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        CardTexture { texture, view }
    }

    // Used when the 2D canvas refuses to draw; keeps the card renderable.
    fn solid(&self, rgba: [u8; 4]) -> Vec<u8> {
        rgba.repeat((self.width * self.height) as usize)
    }
}

impl TextureFactory for CanvasTextureFactory {
    type Texture = CardTexture;

    fn gradient_texture(&mut self, stops: &[Rgb]) -> CardTexture {
        let pixels = self.paint_gradient(stops).unwrap_or_else(|e| {
            log::warn!("[textures] gradient raster failed: {:?}", e);
            self.solid([90, 90, 110, 255])
        });
        self.upload("card_gradient", &pixels)
    }

    fn label_texture(&mut self, word: &str) -> CardTexture {
        let pixels = self.paint_label(word).unwrap_or_else(|e| {
            log::warn!("[textures] label raster failed for {:?}: {:?}", word, e);
            self.solid([0, 0, 0, 0])
        });
        self.upload("card_label", &pixels)
    }
}
