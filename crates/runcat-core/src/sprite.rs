//! Procedurally drawn animation frames.
//!
//! Used when no icon directory is configured. Each frame is a coverage
//! mask drawn from a few signed-distance shapes; the legs (or wings) are
//! rotated by the frame's phase in the cycle. The host turns the mask
//! into a 32-bit premultiplied BGRA bitmap via [`Sprite::to_bgra`].

use std::f32::consts::TAU;

use crate::runner::Runner;

/// Glyph color used for the tray icon (white, for dark taskbars).
pub const GLYPH_COLOR: u32 = 0x00FF_FFFF;

/// A square coverage mask, row-major from the top-left pixel.
#[derive(Debug, Clone, PartialEq)]
pub struct Sprite {
    size: usize,
    alpha: Vec<u8>,
}

impl Sprite {
    fn blank(size: usize) -> Self {
        Self {
            size,
            alpha: vec![0; size * size],
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn alpha(&self) -> &[u8] {
        &self.alpha
    }

    /// Coverage at `(x, y)`, or 0 outside the sprite.
    #[cfg(test)]
    fn alpha_at(&self, x: usize, y: usize) -> u8 {
        if x >= self.size || y >= self.size {
            return 0;
        }
        self.alpha[y * self.size + x]
    }

    /// Converts to premultiplied `0xAARRGGBB` pixels in the given color.
    pub fn to_bgra(&self, rgb: u32) -> Vec<u32> {
        let (r, g, b) = ((rgb >> 16) & 0xFF, (rgb >> 8) & 0xFF, rgb & 0xFF);
        self.alpha
            .iter()
            .map(|&a| {
                let a = u32::from(a);
                (a << 24) | ((r * a / 255) << 16) | ((g * a / 255) << 8) | (b * a / 255)
            })
            .collect()
    }

    /// Paints a shape given by its signed distance (in pixels) from each
    /// pixel center. One pixel of edge is antialiased.
    fn paint(&mut self, sdf: impl Fn(f32, f32) -> f32) {
        for y in 0..self.size {
            for x in 0..self.size {
                let d = sdf(x as f32 + 0.5, y as f32 + 0.5);
                let coverage = (0.5 - d).clamp(0.0, 1.0);
                let value = (coverage * 255.0).round() as u8;
                let px = &mut self.alpha[y * self.size + x];
                *px = (*px).max(value);
            }
        }
    }
}

/// Shape helper in unit coordinates (0.0..1.0 across the sprite).
struct Pen {
    scale: f32,
}

impl Pen {
    fn circle(&self, sprite: &mut Sprite, cx: f32, cy: f32, r: f32) {
        let (cx, cy, r) = (cx * self.scale, cy * self.scale, r * self.scale);
        sprite.paint(|x, y| ((x - cx).hypot(y - cy)) - r);
    }

    fn ellipse(&self, sprite: &mut Sprite, cx: f32, cy: f32, rx: f32, ry: f32) {
        let (cx, cy) = (cx * self.scale, cy * self.scale);
        let (rx, ry) = (rx * self.scale, ry * self.scale);
        let k = rx.min(ry);
        sprite.paint(|x, y| (((x - cx) / rx).hypot((y - cy) / ry) - 1.0) * k);
    }

    fn stroke(&self, sprite: &mut Sprite, from: (f32, f32), to: (f32, f32), width: f32) {
        let (ax, ay) = (from.0 * self.scale, from.1 * self.scale);
        let (bx, by) = (to.0 * self.scale, to.1 * self.scale);
        let half = (width * self.scale / 2.0).max(0.5);
        let (dx, dy) = (bx - ax, by - ay);
        let len2 = (dx * dx + dy * dy).max(f32::EPSILON);
        sprite.paint(|x, y| {
            let t = (((x - ax) * dx + (y - ay) * dy) / len2).clamp(0.0, 1.0);
            (x - (ax + t * dx)).hypot(y - (ay + t * dy)) - half
        });
    }

    /// Stroke from `origin` of `length` at `angle` radians from straight down.
    fn limb(&self, sprite: &mut Sprite, origin: (f32, f32), length: f32, angle: f32, width: f32) {
        let tip = (
            origin.0 + length * angle.sin(),
            origin.1 + length * angle.cos(),
        );
        self.stroke(sprite, origin, tip, width);
    }
}

/// Draws `frame` of `runner` at `size` x `size` pixels.
///
/// Frame indices wrap around the runner's frame count.
pub fn render(runner: Runner, frame: usize, size: usize) -> Sprite {
    let mut sprite = Sprite::blank(size);
    let count = runner.frame_count();
    let phase = TAU * (frame % count) as f32 / count as f32;
    let pen = Pen { scale: size as f32 };
    match runner {
        Runner::Cat => draw_cat(&mut sprite, &pen, phase),
        Runner::Parrot => draw_parrot(&mut sprite, &pen, phase),
    }
    sprite
}

fn draw_cat(sprite: &mut Sprite, pen: &Pen, phase: f32) {
    let bob = 0.03 * (2.0 * phase).sin();
    let body_y = 0.5 + bob;

    pen.ellipse(sprite, 0.48, body_y, 0.25, 0.12);
    pen.circle(sprite, 0.76, body_y - 0.1, 0.11);
    pen.circle(sprite, 0.71, body_y - 0.2, 0.04);
    pen.circle(sprite, 0.83, body_y - 0.2, 0.04);
    pen.stroke(
        sprite,
        (0.26, body_y - 0.04),
        (0.08, body_y - 0.2 - bob),
        0.06,
    );

    let swing = 0.7 * phase.sin();
    // Diagonal leg pairs swing in opposite directions.
    let hips = [(0.32, 1.0), (0.38, -1.0), (0.6, -1.0), (0.66, 1.0)];
    for (x, direction) in hips {
        pen.limb(sprite, (x, body_y + 0.06), 0.24, direction * swing, 0.06);
    }
}

fn draw_parrot(sprite: &mut Sprite, pen: &Pen, phase: f32) {
    let bob = 0.04 * phase.cos();
    let body_y = 0.55 + bob;

    pen.ellipse(sprite, 0.48, body_y, 0.15, 0.2);
    pen.circle(sprite, 0.55, body_y - 0.24, 0.11);
    pen.circle(sprite, 0.68, body_y - 0.21, 0.04);
    pen.stroke(sprite, (0.42, body_y + 0.15), (0.3, 0.95), 0.07);

    // Wing sweeps from raised (pointing up) to lowered over one cycle.
    let flap = std::f32::consts::PI * (0.5 + 0.4 * phase.sin());
    pen.limb(sprite, (0.42, body_y - 0.08), 0.34, flap, 0.09);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coverage(sprite: &Sprite) -> usize {
        sprite.alpha().iter().filter(|&&a| a > 0).count()
    }

    #[test]
    fn sprite_has_requested_dimensions() {
        let sprite = render(Runner::Cat, 0, 32);
        assert_eq!(sprite.size(), 32);
        assert_eq!(sprite.alpha().len(), 32 * 32);
        assert_eq!(sprite.to_bgra(GLYPH_COLOR).len(), 32 * 32);
    }

    #[test]
    fn every_frame_draws_something_inside_the_border() {
        for runner in Runner::ALL {
            for frame in 0..runner.frame_count() {
                let sprite = render(runner, frame, 32);
                let total = coverage(&sprite);
                assert!(total > 32, "{runner:?} frame {frame} nearly empty");
                assert!(total < 32 * 32, "{runner:?} frame {frame} fully covered");
            }
        }
    }

    #[test]
    fn consecutive_frames_differ() {
        for runner in Runner::ALL {
            let first = render(runner, 0, 32);
            let second = render(runner, 1, 32);
            assert_ne!(first, second, "{runner:?} does not animate");
        }
    }

    #[test]
    fn frame_index_wraps_around() {
        let count = Runner::Parrot.frame_count();
        assert_eq!(
            render(Runner::Parrot, count + 2, 24),
            render(Runner::Parrot, 2, 24)
        );
    }

    #[test]
    fn bgra_is_premultiplied() {
        // Arrange
        let sprite = Sprite {
            size: 1,
            alpha: vec![128],
        };

        // Act
        let pixels = sprite.to_bgra(0x00FF_0000);

        // Assert
        assert_eq!(pixels, vec![0x8080_0000]);
    }

    #[test]
    fn alpha_outside_sprite_is_zero() {
        let sprite = render(Runner::Cat, 0, 16);
        assert_eq!(sprite.alpha_at(16, 0), 0);
        assert_eq!(sprite.alpha_at(0, 99), 0);
    }
}
