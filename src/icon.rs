// src/icon.rs
//
// App icon, drawn procedurally: a diagonal blue gradient, a stack of three
// white discs and an extraction chevron on the right.
use std::path::{Path, PathBuf};

use image::{Rgba, RgbaImage};

use crate::error::Result;
use crate::file::ensure_directory;

pub const SIZES: [u32; 3] = [16, 48, 128];

const FROM: [f32; 3] = [0.0, 115.0, 234.0]; // #0073ea
const TO: [f32; 3] = [0.0, 91.0, 181.0]; // #005bb5
const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

fn gradient(x: u32, y: u32, size: u32) -> Rgba<u8> {
    let t = if size <= 1 { 0.0 } else { (x + y) as f32 / (2 * (size - 1)) as f32 };
    let c = |i: usize| (FROM[i] + (TO[i] - FROM[i]) * t).round() as u8;
    Rgba([c(0), c(1), c(2), 255])
}

fn dist_to_segment(p: (f32, f32), a: (f32, f32), b: (f32, f32)) -> f32 {
    let (dx, dy) = (b.0 - a.0, b.1 - a.1);
    let len2 = dx * dx + dy * dy;
    let t = if len2 == 0.0 { 0.0 } else { (((p.0 - a.0) * dx + (p.1 - a.1) * dy) / len2).clamp(0.0, 1.0) };
    let (cx, cy) = (a.0 + t * dx, a.1 + t * dy);
    ((p.0 - cx).powi(2) + (p.1 - cy).powi(2)).sqrt()
}

/// Square RGBA icon of `size` pixels.
pub fn render(size: u32) -> RgbaImage {
    let s = size as f32;
    let (cx, cy) = (s / 2.0, s / 2.0);
    let radius = s * 0.25;
    let spacing = s * 0.15;
    let discs = [cy - spacing, cy, cy + spacing];

    let arrow = s * 0.15;
    let tip = (s * 0.75, cy);
    let upper = (tip.0 - arrow, cy - arrow / 2.0);
    let lower = (tip.0 - arrow, cy + arrow / 2.0);
    let half_stroke = (s / 16.0).max(2.0) / 2.0;

    RgbaImage::from_fn(size, size, |x, y| {
        let p = (x as f32 + 0.5, y as f32 + 0.5);
        let in_disc = discs
            .iter()
            .any(|dy| (p.0 - cx).powi(2) + (p.1 - dy).powi(2) <= radius * radius);
        let on_arrow = dist_to_segment(p, upper, tip) <= half_stroke
            || dist_to_segment(p, tip, lower) <= half_stroke;
        if in_disc || on_arrow { WHITE } else { gradient(x, y, size) }
    })
}

/// Write `icon16.png`, `icon48.png`, `icon128.png` into `dir`.
pub fn write_all(dir: &Path) -> Result<Vec<PathBuf>> {
    ensure_directory(dir)?;
    let mut written = Vec::with_capacity(SIZES.len());
    for size in SIZES {
        let path = dir.join(format!("icon{size}.png"));
        render(size).save(&path)?;
        logf!("Icon: wrote {}", path.display());
        written.push(path);
    }
    Ok(written)
}
