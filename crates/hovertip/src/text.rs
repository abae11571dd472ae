//! # Text Measurement
//!
//! The overlay sizes itself around its text. Measuring is delegated to a
//! [`TextMeasure`] implementation supplied by the host toolkit; the crate
//! ships [`MonospaceMetrics`], a deterministic cell-based measurer that
//! uses Unicode display widths.
//!
//! [`fit_text`] implements the shrink-to-fit rule for a maximum width: wrap
//! at the budget, then narrow the wrap width one unit at a time while the
//! wrapped height stays the same.

use serde::{Deserialize, Serialize};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::layout::Size;

/// Font description handed to the text measurer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct Font {
    /// Family name.
    pub family: String,
    /// Size in points.
    pub point_size: u16,
    /// Bold weight.
    pub bold: bool,
}

impl Font {
    /// Creates a font.
    #[must_use]
    pub fn new(family: impl Into<String>, point_size: u16, bold: bool) -> Self {
        Self {
            family: family.into(),
            point_size,
            bold,
        }
    }
}

impl Default for Font {
    fn default() -> Self {
        Self::new("Arial", 9, true)
    }
}

/// Measures text in pixels.
pub trait TextMeasure {
    /// Size of `text` laid out without wrapping. Explicit newlines still
    /// start a new line.
    fn measure(&self, text: &str, font: &Font) -> Size;

    /// Size of `text` wrapped at `wrap_width` pixels.
    ///
    /// The returned width is the widest line actually produced, which may be
    /// narrower than `wrap_width`.
    fn measure_wrapped(&self, text: &str, font: &Font, wrap_width: i32) -> Size;
}

/// Cell-based metrics: every column has the same advance.
///
/// Column counts come from `unicode-width`, so wide CJK characters take
/// two cells and combining marks take none.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonospaceMetrics {
    /// Advance of one column as a fraction of the point size.
    pub advance_ratio: f32,
    /// Line height as a fraction of the point size.
    pub line_height_ratio: f32,
    /// Extra advance factor applied to bold fonts.
    pub bold_factor: f32,
}

impl Default for MonospaceMetrics {
    fn default() -> Self {
        Self {
            advance_ratio: 0.6,
            line_height_ratio: 1.5,
            bold_factor: 1.1,
        }
    }
}

impl MonospaceMetrics {
    /// Width of one column in pixels (at least 1).
    #[must_use]
    pub fn column_width(&self, font: &Font) -> i32 {
        let weight = if font.bold { self.bold_factor } else { 1.0 };
        let advance = f32::from(font.point_size) * self.advance_ratio * weight;
        to_pixels(advance.round())
    }

    /// Height of one line in pixels (at least 1).
    #[must_use]
    pub fn line_height(&self, font: &Font) -> i32 {
        to_pixels((f32::from(font.point_size) * self.line_height_ratio).ceil())
    }

    /// Greedy word wrap at `columns` cells. Words longer than a line are
    /// broken between characters.
    #[must_use]
    pub fn wrap(text: &str, columns: usize) -> Vec<String> {
        let columns = columns.max(1);
        let mut lines = Vec::new();

        for paragraph in text.split('\n') {
            let mut line = String::new();
            let mut line_width = 0;

            for word in paragraph.split_whitespace() {
                let word_width = word.width();
                let needed = if line.is_empty() { word_width } else { line_width + 1 + word_width };

                if needed <= columns {
                    if !line.is_empty() {
                        line.push(' ');
                    }
                    line.push_str(word);
                    line_width = needed;
                    continue;
                }

                if !line.is_empty() {
                    lines.push(std::mem::take(&mut line));
                    line_width = 0;
                }

                if word_width <= columns {
                    line.push_str(word);
                    line_width = word_width;
                    continue;
                }

                // Hard-break an overlong word.
                for ch in word.chars() {
                    let ch_width = ch.width().unwrap_or(0);
                    if line_width + ch_width > columns && !line.is_empty() {
                        lines.push(std::mem::take(&mut line));
                        line_width = 0;
                    }
                    line.push(ch);
                    line_width += ch_width;
                }
            }

            lines.push(line);
        }

        lines
    }

    fn block_size(&self, lines: &[String], font: &Font) -> Size {
        let columns = lines.iter().map(|line| line.width()).max().unwrap_or(0);
        let rows = lines.len().max(1);
        Size::new(
            to_pixels_usize(columns).saturating_mul(self.column_width(font)),
            to_pixels_usize(rows).saturating_mul(self.line_height(font)),
        )
    }
}

impl TextMeasure for MonospaceMetrics {
    fn measure(&self, text: &str, font: &Font) -> Size {
        let lines: Vec<String> = text.split('\n').map(str::to_owned).collect();
        self.block_size(&lines, font)
    }

    fn measure_wrapped(&self, text: &str, font: &Font, wrap_width: i32) -> Size {
        let columns = usize::try_from(wrap_width / self.column_width(font)).unwrap_or(0);
        self.block_size(&Self::wrap(text, columns), font)
    }
}

#[allow(clippy::cast_possible_truncation)]
fn to_pixels(value: f32) -> i32 {
    // Font metrics are small positive numbers.
    (value as i32).max(1)
}

fn to_pixels_usize(value: usize) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}

/// Result of laying out the tooltip text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextLayout {
    /// Size of the laid-out text block.
    pub size: Size,
    /// Wrap width the text must be drawn with, `None` for a single unwrapped
    /// block.
    pub wrap_width: Option<i32>,
}

/// Lays out `text` within an optional maximum width.
///
/// Text that fits is left unwrapped. Otherwise it is wrapped at
/// `max_width`, then the wrap width is reduced one pixel at a time while the
/// wrapped height does not grow, yielding the narrowest block with the same
/// number of lines.
pub fn fit_text<M>(measure: &M, text: &str, font: &Font, max_width: Option<i32>) -> TextLayout
where
    M: TextMeasure + ?Sized,
{
    let natural = measure.measure(text, font);
    let Some(max_width) = max_width else {
        return TextLayout {
            size: natural,
            wrap_width: None,
        };
    };
    if natural.width <= max_width {
        return TextLayout {
            size: natural,
            wrap_width: None,
        };
    }

    let max_width = max_width.max(1);
    let mut best = measure.measure_wrapped(text, font, max_width);
    let height = best.height;

    let mut candidate = best.width.min(max_width) - 1;
    while candidate >= 1 {
        let next = measure.measure_wrapped(text, font, candidate);
        if next.height > height {
            break;
        }
        best = next;
        candidate = next.width.min(candidate) - 1;
    }

    // Wrapping at the widest produced line reproduces the same lines.
    TextLayout {
        size: best,
        wrap_width: Some(best.width.max(1)),
    }
}
