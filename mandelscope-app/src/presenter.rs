use eframe::egui;

use mandelscope_render::{FrameSink, Palette, PixelGrid, RenderBuffer};

/// Colors each completed grid and uploads it as the window texture.
pub(crate) struct TexturePresenter {
    ctx: egui::Context,
    palette: Palette,
    buffer: RenderBuffer,
    texture: Option<egui::TextureHandle>,
}

impl TexturePresenter {
    pub(crate) fn new(ctx: &egui::Context, width: u32, height: u32) -> Self {
        Self {
            ctx: ctx.clone(),
            palette: Palette::default(),
            buffer: RenderBuffer::new(width, height),
            texture: None,
        }
    }

    pub(crate) fn texture(&self) -> Option<&egui::TextureHandle> {
        self.texture.as_ref()
    }
}

impl FrameSink for TexturePresenter {
    fn present(&mut self, grid: &PixelGrid) {
        self.palette.colorize_into(grid, &mut self.buffer);
        let image = egui::ColorImage::from_rgba_unmultiplied(
            [self.buffer.width as usize, self.buffer.height as usize],
            &self.buffer.pixels,
        );
        match self.texture {
            Some(ref mut texture) => texture.set(image, egui::TextureOptions::LINEAR),
            None => {
                self.texture =
                    Some(self.ctx.load_texture("escape-grid", image, egui::TextureOptions::LINEAR));
            }
        }
    }
}
