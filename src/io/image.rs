use crate::core::framebuffer::FrameBuffer;
use image::{ImageBuffer, ImageError, Rgb};
use log::info;
use std::path::Path;

/// Saves a 0RGB framebuffer to an image file; the format follows the extension.
pub fn save_framebuffer(fb: &FrameBuffer, path: &str) -> Result<(), ImageError> {
    let img_buf = ImageBuffer::from_fn(fb.width as u32, fb.height as u32, |x, y| {
        let color = fb.get_pixel(x as usize, y as usize).unwrap_or(0);
        Rgb([
            ((color >> 16) & 0xFF) as u8,
            ((color >> 8) & 0xFF) as u8,
            (color & 0xFF) as u8,
        ])
    });

    img_buf.save(Path::new(path))?;
    info!("Saved {}x{} frame to '{}'", fb.width, fb.height, path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_png_with_pixel_colors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("frame.png");
        let path = path.to_str().unwrap();

        let mut fb = FrameBuffer::new(4, 2);
        fb.set_pixel(1, 1, 0x00ff8000);
        save_framebuffer(&fb, path).unwrap();

        let img = image::open(path).unwrap().to_rgb8();
        assert_eq!(img.dimensions(), (4, 2));
        assert_eq!(img.get_pixel(1, 1), &Rgb([0xff, 0x80, 0x00]));
        assert_eq!(img.get_pixel(0, 0), &Rgb([0, 0, 0]));
    }
}
