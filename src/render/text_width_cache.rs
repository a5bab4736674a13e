use indexmap::IndexMap;

use super::{Canvas, TextMetrics};

const DEFAULT_MAX_ENTRIES: usize = 50;

/// Bounded cache of measured text metrics.
///
/// Digits `2`..=`9` are folded to `0` before lookup: glyph widths are close
/// enough that price labels of one magnitude share an entry. The oldest entry
/// is evicted first. Zero-width results for non-empty text are not cached,
/// since they usually mean the font was not ready yet.
///
/// Entries are only valid for one font. Select fonts through
/// [`TextWidthCache::set_font`], which clears the entries when the font changes.
#[derive(Debug)]
pub struct TextWidthCache {
    entries: IndexMap<String, TextMetrics>,
    max_entries: usize,
    font: Option<String>,
}

impl Default for TextWidthCache {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ENTRIES)
    }
}

impl TextWidthCache {
    #[must_use]
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: IndexMap::new(),
            max_entries: max_entries.max(1),
            font: None,
        }
    }

    pub fn reset(&mut self) {
        self.entries.clear();
    }

    /// Applies `font` to `canvas`, dropping cached metrics measured with another font.
    pub fn set_font(&mut self, canvas: &mut dyn Canvas, font: &str) {
        if self.font.as_deref() != Some(font) {
            self.entries.clear();
            self.font = Some(font.to_owned());
        }
        canvas.set_font(font);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn measure_text(&mut self, canvas: &mut dyn Canvas, text: &str) -> f64 {
        self.metrics(canvas, text).width
    }

    /// Offset from the box middle to the glyph middle.
    pub fn y_mid_correction(&mut self, canvas: &mut dyn Canvas, text: &str) -> f64 {
        let metrics = self.metrics(canvas, text);
        (metrics.actual_bounding_box_ascent - metrics.actual_bounding_box_descent) / 2.0
    }

    fn metrics(&mut self, canvas: &mut dyn Canvas, text: &str) -> TextMetrics {
        let cache_key: String = text
            .chars()
            .map(|ch| if ('2'..='9').contains(&ch) { '0' } else { ch })
            .collect();
        if let Some(metrics) = self.entries.get(&cache_key) {
            return *metrics;
        }

        let metrics = canvas.measure_text(&cache_key);
        if metrics.width == 0.0 && !text.is_empty() {
            return metrics;
        }
        if self.entries.len() >= self.max_entries {
            self.entries.shift_remove_index(0);
        }
        self.entries.insert(cache_key, metrics);
        metrics
    }
}
