//! Layout drift detection for aligned span pairs

use crate::model::{LayoutDiff, Span};

/// Compares position and typography of two spans whose text already matched
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutComparator {
    /// Max allowed |delta| on any bbox edge, in points
    pub layout_tolerance: f64,
    /// Max allowed |delta| in font size
    pub size_tolerance: f64,
}

impl Default for LayoutComparator {
    fn default() -> Self {
        Self::new(6.0, 0.75)
    }
}

impl LayoutComparator {
    pub fn new(layout_tolerance: f64, size_tolerance: f64) -> Self {
        Self {
            layout_tolerance,
            size_tolerance,
        }
    }

    /// Returns `None` when the pair is a positional and typographic match.
    ///
    /// Missing font or size on either side skips that check.
    pub fn compare(&self, source: &Span, target: &Span) -> Option<LayoutDiff> {
        let delta = source.bbox.delta_to(&target.bbox);
        let significant_shift = delta
            .components()
            .iter()
            .any(|d| d.abs() > self.layout_tolerance);

        let font_change = match (source.font.as_deref(), target.font.as_deref()) {
            (Some(src), Some(tgt)) if !src.is_empty() && !tgt.is_empty() && src != tgt => {
                Some((src, tgt))
            }
            _ => None,
        };

        let size_change = match (source.size, target.size) {
            (Some(src), Some(tgt)) if (tgt - src).abs() > self.size_tolerance => Some((src, tgt)),
            _ => None,
        };

        if !significant_shift && font_change.is_none() && size_change.is_none() {
            return None;
        }

        let mut parts: Vec<String> = Vec::new();
        if significant_shift {
            parts.push(format!(
                "Position delta: ({:.1}, {:.1}, {:.1}, {:.1})",
                delta.dx0, delta.dy0, delta.dx1, delta.dy1
            ));
        }
        if let Some((src, tgt)) = font_change {
            parts.push(format!("Font changed {} -> {}", src, tgt));
        }
        if let Some((src, tgt)) = size_change {
            parts.push(format!("Size changed {:.1} -> {:.1}", src, tgt));
        }

        Some(LayoutDiff {
            source: source.clone(),
            target: target.clone(),
            delta_bbox: delta,
            delta_font: font_change.map(|(_, tgt)| tgt.to_string()),
            delta_size: size_change.map(|(src, tgt)| tgt - src),
            detail: parts.join("; "),
        })
    }
}
