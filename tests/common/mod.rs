//! Shared builders for synthetic plot images.

#![allow(dead_code)]

use image::{Rgba, RgbaImage};
use std::path::{Path, PathBuf};

pub const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
pub const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);

/// Builder for a white canvas with curves drawn one pixel per column.
pub struct PlotBuilder {
    image: RgbaImage,
}

impl PlotBuilder {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: RgbaImage::from_pixel(width, height, WHITE),
        }
    }

    /// Marks `(x, row)` for every pair, in `color`.
    pub fn points(mut self, points: &[(u32, u32)], color: Rgba<u8>) -> Self {
        for &(x, row) in points {
            self.image.put_pixel(x, row, color);
        }
        self
    }

    /// A straight diagonal from the bottom-left to the top-right corner.
    pub fn rising_diagonal(self, color: Rgba<u8>) -> Self {
        let (w, h) = self.image.dimensions();
        let points: Vec<_> = (0..w.min(h)).map(|x| (x, h - 1 - x)).collect();
        self.points(&points, color)
    }

    /// A vertical band filling `rows` of column `x`.
    pub fn band(mut self, x: u32, rows: std::ops::Range<u32>, color: Rgba<u8>) -> Self {
        for row in rows {
            self.image.put_pixel(x, row, color);
        }
        self
    }

    pub fn build(self) -> RgbaImage {
        self.image
    }

    /// Saves the plot under `dir` in the format implied by `name`'s extension.
    pub fn save(self, dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        self.image.save(&path).expect("Error Saving File.");
        path
    }
}

/// Parses `x,y` lines as printed by the tracer.
pub fn parse_lines(text: &str) -> Vec<(f64, f64)> {
    text.lines()
        .map(|line| {
            let (x, y) = line.split_once(',').expect("missing comma");
            (x.parse().unwrap(), y.parse().unwrap())
        })
        .collect()
}
