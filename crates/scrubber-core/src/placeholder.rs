use image::{Rgba, RgbaImage};

use crate::consts::{PLACEHOLDER_HEIGHT, PLACEHOLDER_WIDTH};

/// Disc drawn on top of the gradient: centre offset from the image centre
/// (before rotation), radius, opacity and rotation multiplier.
struct Disc {
    cx: f32,
    cy: f32,
    radius: f32,
    opacity: f32,
    spin: f32,
}

#[rustfmt::skip]
const DISCS: [Disc; 4] = [
    Disc { cx: 0.0, cy: 0.0, radius: 100.0, opacity: 0.3, spin: 1.0 },
    Disc { cx: 0.0, cy: -60.0, radius: 30.0, opacity: 0.8, spin: 1.0 },
    Disc { cx: 40.0, cy: 20.0, radius: 20.0, opacity: 0.6, spin: 0.5 },
    Disc { cx: -40.0, cy: 20.0, radius: 15.0, opacity: 0.7, spin: -0.3 },
];

/// Synthesize a stand-in image for `frame` of a `total`-frame sequence.
///
/// Hue and disc rotation both advance with the frame number so scrubbing
/// through placeholders still reads as motion.
pub fn placeholder_image(frame: u32, total: u32) -> RgbaImage {
    let turn = frame.saturating_sub(1) as f32 / total.max(1) as f32;
    let hue = turn * 360.0;
    let rotation = (turn * 360.0).to_radians();

    let inner = hsl_to_rgb(hue, 0.7, 0.6);
    let outer = hsl_to_rgb(hue + 60.0, 0.5, 0.3);

    let w = PLACEHOLDER_WIDTH as f32;
    let h = PLACEHOLDER_HEIGHT as f32;
    let (half_w, half_h) = (w / 2.0, h / 2.0);

    let discs: Vec<(f32, f32, f32, f32)> = DISCS
        .iter()
        .map(|d| {
            let (sin, cos) = (rotation * d.spin).sin_cos();
            let x = d.cx * cos - d.cy * sin + half_w;
            let y = d.cx * sin + d.cy * cos + half_h;
            (x, y, d.radius, d.opacity)
        })
        .collect();

    RgbaImage::from_fn(PLACEHOLDER_WIDTH, PLACEHOLDER_HEIGHT, |px, py| {
        let x = px as f32 + 0.5;
        let y = py as f32 + 0.5;

        let dx = (x - half_w) / half_w;
        let dy = (y - half_h) / half_h;
        let t = (dx * dx + dy * dy).sqrt().min(1.0);
        let mut rgb = [
            lerp(inner[0], outer[0], t),
            lerp(inner[1], outer[1], t),
            lerp(inner[2], outer[2], t),
        ];

        for &(cx, cy, radius, opacity) in &discs {
            let ddx = x - cx;
            let ddy = y - cy;
            if ddx * ddx + ddy * ddy <= radius * radius {
                for c in &mut rgb {
                    *c = lerp(*c, 1.0, opacity);
                }
            }
        }

        Rgba([to_u8(rgb[0]), to_u8(rgb[1]), to_u8(rgb[2]), 255])
    })
}

/// HSL (hue in degrees, saturation and lightness in 0..1) to linear RGB in 0..1.
fn hsl_to_rgb(hue: f32, saturation: f32, lightness: f32) -> [f32; 3] {
    let h = hue.rem_euclid(360.0) / 60.0;
    let c = (1.0 - (2.0 * lightness - 1.0).abs()) * saturation;
    let x = c * (1.0 - (h % 2.0 - 1.0).abs());
    let (r, g, b) = match h as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    let m = lightness - c / 2.0;
    [r + m, g + m, b + m]
}

fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

fn to_u8(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}
