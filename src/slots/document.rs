//! Tagged documents: opaque text interleaved with `[IMG n]` markers.

use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

use super::Slot;

static RE_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[IMG\s+(\d+)\]").unwrap());

/// A single `[IMG n]` occurrence.
///
/// The source text is kept so that a tag nobody rewrites renders exactly as
/// it was written, whitespace included.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tag {
    slot: Slot,
    source: String,
}

impl Tag {
    /// Creates a tag in canonical `[IMG n]` form.
    pub fn new(slot: impl Into<Slot>) -> Self {
        let slot = slot.into();
        Self {
            slot,
            source: format!("[IMG {}]", slot),
        }
    }

    /// The slot this tag refers to.
    pub fn slot(&self) -> Slot {
        self.slot
    }

    /// The tag as it appeared in the document.
    pub fn source(&self) -> &str {
        &self.source
    }
}

/// A piece of a tagged document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Segment {
    /// Text carried through untouched.
    Text(String),
    /// An image marker.
    Tag(Tag),
}

/// A document modeled as an ordered sequence of text spans and tags.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TaggedDocument {
    segments: Vec<Segment>,
}

impl TaggedDocument {
    /// Splits document text into text spans and tags.
    ///
    /// Markers whose number is zero or too large to be a slot stay part of
    /// the surrounding text.
    pub fn parse(text: &str) -> Self {
        let mut doc = Self::default();
        let mut last = 0;

        for caps in RE_TAG.captures_iter(text) {
            let whole = caps.get(0).expect("group 0 always matches");
            let Some(slot) = Slot::parse_digits(&caps[1]) else {
                continue;
            };

            doc.push_text(&text[last..whole.start()]);
            doc.segments.push(Segment::Tag(Tag {
                slot,
                source: whole.as_str().to_string(),
            }));
            last = whole.end();
        }

        doc.push_text(&text[last..]);
        doc
    }

    /// Builds a document from pre-computed segments.
    pub fn from_segments(segments: Vec<Segment>) -> Self {
        let mut doc = Self::default();
        for segment in segments {
            match segment {
                Segment::Text(text) => doc.push_text(&text),
                tag @ Segment::Tag(_) => doc.segments.push(tag),
            }
        }
        doc
    }

    /// All segments in document order.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// All tags in document order.
    pub fn tags(&self) -> impl Iterator<Item = &Tag> {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Tag(tag) => Some(tag),
            Segment::Text(_) => None,
        })
    }

    /// The slot of every tag, in document order, duplicates included.
    pub fn slots(&self) -> Vec<Slot> {
        self.tags().map(Tag::slot).collect()
    }

    /// Number of tag occurrences.
    pub fn tag_count(&self) -> usize {
        self.tags().count()
    }

    fn push_text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        if let Some(Segment::Text(prev)) = self.segments.last_mut() {
            prev.push_str(text);
        } else {
            self.segments.push(Segment::Text(text.to_string()));
        }
    }
}

impl fmt::Display for TaggedDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in &self.segments {
            match segment {
                Segment::Text(text) => f.write_str(text)?,
                Segment::Tag(tag) => f.write_str(&tag.source)?,
            }
        }
        Ok(())
    }
}
