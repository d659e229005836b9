use crate::core::color::{lerp, to_u32};
use nalgebra::{Point2, Vector3};

/// A packed 0RGB color buffer, ready for `minifb` or the PNG writer.
///
/// Wireframe output needs no depth test, so this is a plain single-threaded
/// pixel store.
pub struct FrameBuffer {
    pub width: usize,
    pub height: usize,
    pixels: Vec<u32>,
}

impl FrameBuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width * height],
        }
    }

    #[inline(always)]
    fn index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    /// Vertical gradient, `top` on the first row.
    pub fn clear_gradient(&mut self, top: Vector3<f32>, bottom: Vector3<f32>) {
        let span = self.height.saturating_sub(1).max(1) as f32;
        for y in 0..self.height {
            let packed = to_u32(lerp(top, bottom, y as f32 / span));
            let start = self.index(0, y);
            self.pixels[start..start + self.width].fill(packed);
        }
    }

    #[inline]
    pub fn set_pixel(&mut self, x: i32, y: i32, color: u32) {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return;
        }
        let idx = self.index(x as usize, y as usize);
        self.pixels[idx] = color;
    }

    pub fn get_pixel(&self, x: usize, y: usize) -> Option<u32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.pixels[self.index(x, y)])
    }

    /// Draws the part of a screen-space segment that lies inside the buffer.
    /// Endpoints may be arbitrarily far off screen.
    pub fn draw_segment(&mut self, from: Point2<f64>, to: Point2<f64>, color: u32) {
        if self.width == 0 || self.height == 0 {
            return;
        }
        let max = Point2::new((self.width - 1) as f64, (self.height - 1) as f64);
        let Some((a, b)) = clip_segment(from, to, max) else {
            return;
        };
        self.bresenham(
            a.x.round() as i32,
            a.y.round() as i32,
            b.x.round() as i32,
            b.y.round() as i32,
            color,
        );
    }

    /// Both endpoints must already be inside the buffer.
    fn bresenham(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: u32) {
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        let (mut x, mut y) = (x0, y0);

        loop {
            self.set_pixel(x, y, color);
            if x == x1 && y == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }
}

/// Liang-Barsky clip of `from -> to` against `[0, max.x] x [0, max.y]`.
fn clip_segment(
    from: Point2<f64>,
    to: Point2<f64>,
    max: Point2<f64>,
) -> Option<(Point2<f64>, Point2<f64>)> {
    if !(from.coords.iter().chain(to.coords.iter())).all(|v| v.is_finite()) {
        return None;
    }
    let d = to - from;
    let (mut t0, mut t1) = (0.0_f64, 1.0_f64);
    let edges = [
        (-d.x, from.x),
        (d.x, max.x - from.x),
        (-d.y, from.y),
        (d.y, max.y - from.y),
    ];
    for (p, q) in edges {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            if r > t1 {
                return None;
            }
            t0 = t0.max(r);
        } else {
            if r < t0 {
                return None;
            }
            t1 = t1.min(r);
        }
    }
    Some((from + d * t0, from + d * t1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diagonal_line_hits_both_ends() {
        let mut fb = FrameBuffer::new(8, 8);
        fb.draw_segment(Point2::new(0.0, 0.0), Point2::new(7.0, 7.0), 0xffffff);
        assert_eq!(fb.get_pixel(0, 0), Some(0xffffff));
        assert_eq!(fb.get_pixel(7, 7), Some(0xffffff));
        assert_eq!(fb.get_pixel(3, 3), Some(0xffffff));
        assert_eq!(fb.get_pixel(7, 0), Some(0));
    }

    #[test]
    fn offscreen_pixels_are_ignored() {
        let mut fb = FrameBuffer::new(4, 4);
        fb.draw_segment(Point2::new(-10.0, 1.0), Point2::new(10.0, 1.0), 0xff);
        assert_eq!(fb.get_pixel(0, 1), Some(0xff));
        assert_eq!(fb.get_pixel(3, 1), Some(0xff));
    }

    #[test]
    fn extreme_endpoints_are_clipped() {
        let mut fb = FrameBuffer::new(4, 4);
        fb.draw_segment(
            Point2::new(i32::MIN as f64, 0.0),
            Point2::new(i32::MAX as f64, 0.0),
            0xff,
        );
        assert_eq!(fb.get_pixel(0, 0), Some(0xff));
        assert_eq!(fb.get_pixel(3, 0), Some(0xff));
        assert_eq!(fb.get_pixel(0, 1), Some(0));
    }

    #[test]
    fn segment_outside_buffer_draws_nothing() {
        let mut fb = FrameBuffer::new(4, 4);
        fb.draw_segment(Point2::new(-1e12, -5.0), Point2::new(1e12, -5.0), 0xff);
        fb.draw_segment(Point2::new(f64::NAN, 1.0), Point2::new(2.0, 1.0), 0xff);
        assert!(fb.pixels().iter().all(|&p| p == 0));
    }

    #[test]
    fn diagonal_through_corner_is_trimmed() {
        let mut fb = FrameBuffer::new(8, 8);
        fb.draw_segment(Point2::new(-1e9, -1e9), Point2::new(1e9, 1e9), 0xff);
        assert_eq!(fb.get_pixel(0, 0), Some(0xff));
        assert_eq!(fb.get_pixel(7, 7), Some(0xff));
        assert_eq!(fb.get_pixel(4, 4), Some(0xff));
    }

    #[test]
    fn gradient_runs_top_to_bottom() {
        let mut fb = FrameBuffer::new(2, 3);
        fb.clear_gradient(Vector3::new(1.0, 1.0, 1.0), Vector3::zeros());
        assert_eq!(fb.get_pixel(0, 0), Some(0xffff_ffff));
        assert_eq!(fb.get_pixel(1, 2), Some(0xff00_0000));
    }
}
