//! PNG export of a solved grid.
//!
//! Rasterization is always compiled; writing needs the `image-export`
//! feature. Without it [`save_image`] reports
//! [`ExportError::CapabilityUnavailable`].

#![cfg_attr(not(feature = "image-export"), allow(dead_code))]

use crate::assignment::Assignment;
use crate::crossword::{Crossword, Position};
use crate::error::ExportError;
use std::path::Path;

/// Geometry of the exported image, in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportStyle {
    /// Side of one grid cell
    pub cell_size: u32,
    /// Dark margin around every open cell
    pub cell_border: u32,
    /// Pixels per glyph dot (glyphs are 5x7 dots)
    pub glyph_scale: u32,
}

impl Default for ExportStyle {
    fn default() -> Self {
        Self {
            cell_size: 100,
            cell_border: 2,
            glyph_scale: 8,
        }
    }
}

const GLYPH_WIDTH: u32 = 5;
const GLYPH_HEIGHT: u32 = 7;

const BLOCKED: u8 = 0;
const OPEN: u8 = 255;
const INK: u8 = 0;

/// Grayscale raster of a grid, one byte per pixel
#[derive(Debug, Clone)]
pub(crate) struct Raster {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl Raster {
    /// Fails when the pixel count does not fit in a `u32`
    fn new(width: u32, height: u32, fill: u8) -> Result<Self, ExportError> {
        let len = width
            .checked_mul(height)
            .ok_or_else(|| ExportError::Write("image too large".to_string()))?;
        Ok(Self {
            width,
            height,
            pixels: vec![fill; len as usize],
        })
    }

    fn fill_rect(&mut self, x0: u32, y0: u32, x1: u32, y1: u32, value: u8) {
        for y in y0..y1.min(self.height) {
            let row = (y * self.width) as usize;
            for x in x0..x1.min(self.width) {
                self.pixels[row + x as usize] = value;
            }
        }
    }

    #[cfg(test)]
    fn get(&self, x: u32, y: u32) -> u8 {
        self.pixels[(y * self.width + x) as usize]
    }
}

/// Draw blocked cells dark, open cells light, letters in dark ink
pub(crate) fn rasterize(
    crossword: &Crossword,
    assignment: &Assignment,
    style: &ExportStyle,
) -> Result<Raster, ExportError> {
    let cell = style.cell_size;
    let border = style.cell_border.min(cell / 2);
    let side = |cells: usize| {
        u32::try_from(cells)
            .ok()
            .and_then(|n| n.checked_mul(cell))
            .ok_or_else(|| ExportError::Write("image too large".to_string()))
    };
    let mut raster = Raster::new(side(crossword.width())?, side(crossword.height())?, BLOCKED)?;
    let letters = crossword.letter_grid(assignment);

    for (i, row) in letters.iter().enumerate() {
        for (j, letter) in row.iter().enumerate() {
            if !crossword.is_open(Position::new(i, j)) {
                continue;
            }
            let x = j as u32 * cell;
            let y = i as u32 * cell;
            raster.fill_rect(x + border, y + border, x + cell - border, y + cell - border, OPEN);

            if let Some(rows) = letter.and_then(glyph) {
                draw_glyph(&mut raster, &rows, x, y, style);
            }
        }
    }

    Ok(raster)
}

fn draw_glyph(raster: &mut Raster, rows: &[u8; 7], cell_x: u32, cell_y: u32, style: &ExportStyle) {
    let scale = style.glyph_scale;
    let x0 = cell_x + style.cell_size.saturating_sub(GLYPH_WIDTH * scale) / 2;
    let y0 = cell_y + style.cell_size.saturating_sub(GLYPH_HEIGHT * scale) / 2;

    for (dy, &bits) in rows.iter().enumerate() {
        for dx in 0..GLYPH_WIDTH {
            if (bits >> (GLYPH_WIDTH - 1 - dx)) & 1 == 1 {
                let px = x0 + dx * scale;
                let py = y0 + dy as u32 * scale;
                raster.fill_rect(px, py, px + scale, py + scale, INK);
            }
        }
    }
}

/// 5x7 dot pattern for an uppercase ASCII letter, leftmost dot in bit 4
fn glyph(c: char) -> Option<[u8; 7]> {
    let rows = match c.to_ascii_uppercase() {
        'A' => [0b01110, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001],
        'B' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10001, 0b10001, 0b11110],
        'C' => [0b01110, 0b10001, 0b10000, 0b10000, 0b10000, 0b10001, 0b01110],
        'D' => [0b11110, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b11110],
        'E' => [0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b11111],
        'F' => [0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b10000],
        'G' => [0b01110, 0b10001, 0b10000, 0b10111, 0b10001, 0b10001, 0b01111],
        'H' => [0b10001, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001],
        'I' => [0b01110, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
        'J' => [0b00111, 0b00010, 0b00010, 0b00010, 0b00010, 0b10010, 0b01100],
        'K' => [0b10001, 0b10010, 0b10100, 0b11000, 0b10100, 0b10010, 0b10001],
        'L' => [0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b11111],
        'M' => [0b10001, 0b11011, 0b10101, 0b10101, 0b10001, 0b10001, 0b10001],
        'N' => [0b10001, 0b10001, 0b11001, 0b10101, 0b10011, 0b10001, 0b10001],
        'O' => [0b01110, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110],
        'P' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10000, 0b10000, 0b10000],
        'Q' => [0b01110, 0b10001, 0b10001, 0b10001, 0b10101, 0b10010, 0b01101],
        'R' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10100, 0b10010, 0b10001],
        'S' => [0b01111, 0b10000, 0b10000, 0b01110, 0b00001, 0b00001, 0b11110],
        'T' => [0b11111, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100],
        'U' => [0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110],
        'V' => [0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01010, 0b00100],
        'W' => [0b10001, 0b10001, 0b10001, 0b10101, 0b10101, 0b10101, 0b01010],
        'X' => [0b10001, 0b10001, 0b01010, 0b00100, 0b01010, 0b10001, 0b10001],
        'Y' => [0b10001, 0b10001, 0b01010, 0b00100, 0b00100, 0b00100, 0b00100],
        'Z' => [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b10000, 0b11111],
        _ => return None,
    };
    Some(rows)
}

/// Write the solved grid as an image; the format follows the file extension
#[cfg(feature = "image-export")]
pub fn save_image(
    crossword: &Crossword,
    assignment: &Assignment,
    path: &Path,
    style: &ExportStyle,
) -> Result<(), ExportError> {
    let raster = rasterize(crossword, assignment, style)?;
    let image = image::GrayImage::from_raw(raster.width, raster.height, raster.pixels)
        .ok_or_else(|| ExportError::Write("raster size mismatch".to_string()))?;

    image
        .save(path)
        .map_err(|e| ExportError::Write(e.to_string()))?;
    log::info!("saved {}x{} image to {}", image.width(), image.height(), path.display());
    Ok(())
}

/// Write the solved grid as an image; the format follows the file extension
#[cfg(not(feature = "image-export"))]
pub fn save_image(
    _crossword: &Crossword,
    _assignment: &Assignment,
    path: &Path,
    _style: &ExportStyle,
) -> Result<(), ExportError> {
    log::warn!("image export requested for {} but not compiled in", path.display());
    Err(ExportError::CapabilityUnavailable)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Direction, Variable};

    fn sample() -> (Crossword, Assignment) {
        let crossword = Crossword::parse("___\n#_#\n", "cat\n").unwrap();
        let assignment = [(
            Variable::new(Position::new(0, 0), Direction::Across, 3),
            "CAT".to_string(),
        )]
        .into_iter()
        .collect();
        (crossword, assignment)
    }

    #[test]
    fn test_raster_cells() {
        let (crossword, assignment) = sample();
        let style = ExportStyle::default();
        let raster = rasterize(&crossword, &assignment, &style).unwrap();

        assert_eq!(raster.width, 300);
        assert_eq!(raster.height, 200);
        // Blocked cell stays dark
        assert_eq!(raster.get(50, 150), BLOCKED);
        // Border of an open cell stays dark, its corner interior is light
        assert_eq!(raster.get(0, 0), BLOCKED);
        assert_eq!(raster.get(5, 5), OPEN);
        // Open cell with no letter is light in the middle
        assert_eq!(raster.get(150, 150), OPEN);
    }

    #[test]
    fn test_letter_inked() {
        let (crossword, assignment) = sample();
        let style = ExportStyle::default();
        let raster = rasterize(&crossword, &assignment, &style).unwrap();

        // 'T' top bar spans the glyph width at the first glyph row
        let x0 = 200 + (100 - 5 * 8) / 2;
        let y0 = (100 - 7 * 8) / 2;
        assert_eq!(raster.get(x0 + 1, y0 + 1), INK);
        assert_eq!(raster.get(x0 + 4 * 8 + 1, y0 + 1), INK);
        // Below the bar, only the stem is inked
        assert_eq!(raster.get(x0 + 1, y0 + 8 + 1), OPEN);
    }

    #[test]
    fn test_oversized_raster_rejected() {
        let (crossword, assignment) = sample();
        let style = ExportStyle {
            cell_size: 40_000,
            ..ExportStyle::default()
        };

        match rasterize(&crossword, &assignment, &style) {
            Err(ExportError::Write(reason)) => assert_eq!(reason, "image too large"),
            other => panic!("expected a size error, got {:?}", other.map(|r| r.width)),
        }
    }

    #[test]
    fn test_glyph_lookup() {
        assert!(glyph('a').is_some());
        assert!(glyph('Z').is_some());
        assert!(glyph('?').is_none());
    }

    #[cfg(feature = "image-export")]
    #[test]
    fn test_save_png() {
        let (crossword, assignment) = sample();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("grid.png");

        save_image(&crossword, &assignment, &path, &ExportStyle::default()).unwrap();
        assert!(path.exists());
    }

    #[cfg(feature = "image-export")]
    #[test]
    fn test_save_unwritable_path() {
        let (crossword, assignment) = sample();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("grid.png");

        let err = save_image(&crossword, &assignment, &path, &ExportStyle::default()).unwrap_err();
        assert!(matches!(err, ExportError::Write(_)));
    }

    #[cfg(not(feature = "image-export"))]
    #[test]
    fn test_save_unavailable() {
        let (crossword, assignment) = sample();
        let err = save_image(
            &crossword,
            &assignment,
            Path::new("grid.png"),
            &ExportStyle::default(),
        )
        .unwrap_err();
        assert!(matches!(err, ExportError::CapabilityUnavailable));
    }
}
