//! Character formatting over an entry's plain text.
//!
//! Formatting is stored as a list of spans with character offsets into the
//! entry's `content`. Spans are kept sorted, non-overlapping, and merged, and
//! spans carrying only the default style are dropped.

use serde::{Deserialize, Serialize};
use std::ops::Range;

/// A boolean formatting toggle offered by the editor toolbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attribute {
    Bold,
    Italic,
    Underline,
}

/// The resolved formatting of a run of characters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Style {
    #[serde(default, skip_serializing_if = "is_false")]
    pub bold: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub italic: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub underline: bool,
    /// Point size; `None` means the editor's default size.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f32>,
}

impl Style {
    pub fn has(&self, attribute: Attribute) -> bool {
        match attribute {
            Attribute::Bold => self.bold,
            Attribute::Italic => self.italic,
            Attribute::Underline => self.underline,
        }
    }

    fn set(&mut self, attribute: Attribute, on: bool) {
        match attribute {
            Attribute::Bold => self.bold = on,
            Attribute::Italic => self.italic = on,
            Attribute::Underline => self.underline = on,
        }
    }

    fn is_default(&self) -> bool {
        *self == Style::default()
    }
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// A half-open character range `[start, end)` with one style.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FormatSpan {
    pub start: usize,
    pub end: usize,
    #[serde(flatten)]
    pub style: Style,
}

/// The serialized rich-text payload of an entry.
///
/// # Examples
///
/// ```
/// use chronicler::entry::{Attribute, RichText};
///
/// let mut rich = RichText::default();
/// rich.toggle(0..5, Attribute::Bold);
/// assert!(rich.style_at(2).bold);
///
/// // Toggling a fully bold range clears it again.
/// rich.toggle(0..5, Attribute::Bold);
/// assert!(rich.is_plain());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "StoredRichText")]
pub struct RichText {
    #[serde(default)]
    spans: Vec<FormatSpan>,
}

/// Spans exactly as found in the file, before normalization.
#[derive(Deserialize)]
struct StoredRichText {
    #[serde(default)]
    spans: Vec<FormatSpan>,
}

impl From<StoredRichText> for RichText {
    fn from(stored: StoredRichText) -> Self {
        RichText::from_spans(stored.spans)
    }
}

impl RichText {
    /// Builds a payload from arbitrary spans, normalizing them.
    ///
    /// Later spans win where spans overlap.
    pub fn from_spans(spans: impl IntoIterator<Item = FormatSpan>) -> Self {
        let mut rich = RichText::default();
        for span in spans {
            let style = span.style;
            rich.apply(span.start..span.end, |s| *s = style);
        }
        rich
    }

    pub fn spans(&self) -> &[FormatSpan] {
        &self.spans
    }

    /// True when no character carries any formatting.
    pub fn is_plain(&self) -> bool {
        self.spans.is_empty()
    }

    /// The style in effect at character `offset`.
    pub fn style_at(&self, offset: usize) -> Style {
        self.spans
            .iter()
            .find(|span| span.start <= offset && offset < span.end)
            .map(|span| span.style)
            .unwrap_or_default()
    }

    /// Toggles `attribute` over `range`.
    ///
    /// If every character in the range already has the attribute it is
    /// removed; otherwise the whole range gets it. Empty ranges are ignored.
    pub fn toggle(&mut self, range: Range<usize>, attribute: Attribute) {
        if range.is_empty() {
            return;
        }
        let all_set = self
            .segments(&range)
            .iter()
            .filter(|(segment, _)| segment.start >= range.start && segment.end <= range.end)
            .all(|(_, style)| style.has(attribute));
        self.apply(range, |style| style.set(attribute, !all_set));
    }

    /// Sets the font size over `range`; `None` restores the default size.
    pub fn set_font_size(&mut self, range: Range<usize>, size: Option<f32>) {
        self.apply(range, |style| style.font_size = size);
    }

    /// Drops formatting beyond a text of `len` characters.
    pub fn clamp_to(&mut self, len: usize) {
        self.spans.retain_mut(|span| {
            span.end = span.end.min(len);
            span.start < span.end
        });
    }

    fn apply(&mut self, range: Range<usize>, mut edit: impl FnMut(&mut Style)) {
        if range.is_empty() {
            return;
        }
        let mut spans: Vec<FormatSpan> = Vec::new();
        for (segment, mut style) in self.segments(&range) {
            if segment.start >= range.start && segment.end <= range.end {
                edit(&mut style);
            }
            if style.is_default() {
                continue;
            }
            match spans.last_mut() {
                Some(last) if last.end == segment.start && last.style == style => {
                    last.end = segment.end;
                }
                _ => spans.push(FormatSpan {
                    start: segment.start,
                    end: segment.end,
                    style,
                }),
            }
        }
        self.spans = spans;
    }

    /// Splits the covered text at every span boundary and at the range ends.
    fn segments(&self, range: &Range<usize>) -> Vec<(Range<usize>, Style)> {
        let mut cuts: Vec<usize> = self
            .spans
            .iter()
            .flat_map(|span| [span.start, span.end])
            .chain([range.start, range.end])
            .collect();
        cuts.sort_unstable();
        cuts.dedup();

        cuts.windows(2)
            .map(|pair| (pair[0]..pair[1], self.style_at(pair[0])))
            .collect()
    }
}
