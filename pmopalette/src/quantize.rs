//! Median-cut color quantization
//!
//! The color space of the input pixels is recursively split along the
//! channel with the widest range, at the median pixel, until the requested
//! number of boxes exists. Each box contributes one swatch: the average of
//! its pixels. Boxes are reported most-populated first.

use crate::Rgb;

/// One region of color space holding the pixels assigned to it
struct VBox {
    pixels: Vec<[u8; 3]>,
}

impl VBox {
    /// Per-channel (min, max) over the box's pixels
    fn ranges(&self) -> [(u8, u8); 3] {
        let mut ranges = [(u8::MAX, u8::MIN); 3];
        for pixel in &self.pixels {
            for channel in 0..3 {
                let (min, max) = &mut ranges[channel];
                *min = (*min).min(pixel[channel]);
                *max = (*max).max(pixel[channel]);
            }
        }
        ranges
    }

    /// Channel with the widest range, and that range's width
    fn widest_channel(&self) -> (usize, u8) {
        let ranges = self.ranges();
        let mut widest = 0;
        let mut width = 0;
        for (channel, (min, max)) in ranges.iter().enumerate() {
            let spread = max.saturating_sub(*min);
            if spread > width {
                widest = channel;
                width = spread;
            }
        }
        (widest, width)
    }

    /// Whether the box can still be split (more than one pixel, non-zero
    /// spread on some channel)
    fn splittable(&self) -> bool {
        self.pixels.len() > 1 && self.widest_channel().1 > 0
    }

    /// Split at the median of the widest channel
    fn split(mut self) -> (VBox, VBox) {
        let (channel, _) = self.widest_channel();
        self.pixels.sort_unstable_by_key(|p| p[channel]);
        let right = self.pixels.split_off(self.pixels.len() / 2);
        (VBox { pixels: self.pixels }, VBox { pixels: right })
    }

    /// Average color of the box
    fn average(&self) -> Rgb {
        let count = self.pixels.len().max(1) as u64;
        let mut sums = [0u64; 3];
        for pixel in &self.pixels {
            for channel in 0..3 {
                sums[channel] += pixel[channel] as u64;
            }
        }
        Rgb {
            r: (sums[0] / count) as u8,
            g: (sums[1] / count) as u8,
            b: (sums[2] / count) as u8,
        }
    }
}

/// Quantize `pixels` into exactly `color_count` swatches
///
/// Swatches are ordered by descending box population. If the input cannot
/// be split into that many distinct boxes (single-color input), the last
/// swatch is repeated to keep the output length fixed.
///
/// # Panics
///
/// Panics if `pixels` is empty; callers are expected to provide at least
/// one pixel (the extraction front-end guarantees this).
pub fn median_cut(pixels: &[[u8; 3]], color_count: usize) -> Vec<Rgb> {
    assert!(!pixels.is_empty(), "median_cut requires at least one pixel");

    let mut boxes = vec![VBox {
        pixels: pixels.to_vec(),
    }];

    while boxes.len() < color_count {
        // Split the most populated box that still has spread
        let candidate = boxes
            .iter()
            .enumerate()
            .filter(|(_, b)| b.splittable())
            .max_by_key(|(_, b)| b.pixels.len())
            .map(|(i, _)| i);

        let Some(index) = candidate else {
            break;
        };

        let (left, right) = boxes.swap_remove(index).split();
        boxes.push(left);
        boxes.push(right);
    }

    boxes.sort_by(|a, b| b.pixels.len().cmp(&a.pixels.len()));

    let mut palette: Vec<Rgb> = boxes.iter().map(VBox::average).collect();

    // Pad degenerate results so the caller always gets the count it asked for
    while palette.len() < color_count {
        let last = *palette.last().expect("palette has at least one swatch");
        palette.push(last);
    }

    palette.truncate(color_count);
    palette
}
