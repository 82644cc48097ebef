use crate::error::{UnveilError, UnveilResult};

/// Default marker phrase; callers may override it per render.
pub const DEFAULT_MARKER: &str = "WILL RETURN IN";

/// Ordered reveal group a word belongs to.
///
/// The derived `Ord` follows reveal order: `Before < Marker < After`.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub enum RevealClass {
    Before,
    Marker,
    After,
}

impl RevealClass {
    pub const ALL: [Self; 3] = [Self::Before, Self::Marker, Self::After];
}

/// Assign a reveal class to every word.
///
/// The marker word sequence must occur verbatim and contiguously; the first
/// occurrence anchors the groups. The output is monotonically non-decreasing
/// with exactly `marker.len()` entries tagged `Marker`. A marker at the very
/// start or end of the phrase leaves the `Before` / `After` group empty.
pub fn classify(words: &[&str], marker: &[&str]) -> UnveilResult<Vec<RevealClass>> {
    if marker.is_empty() {
        return Err(UnveilError::validation("marker phrase must be non-empty"));
    }
    let start = words
        .windows(marker.len())
        .position(|w| w == marker)
        .ok_or_else(|| {
            UnveilError::validation(format!(
                "phrase does not contain the marker '{}'",
                marker.join(" ")
            ))
        })?;
    let end = start + marker.len();

    Ok((0..words.len())
        .map(|i| {
            if i < start {
                RevealClass::Before
            } else if i < end {
                RevealClass::Marker
            } else {
                RevealClass::After
            }
        })
        .collect())
}

/// A classified phrase, immutable once computed for a render pass.
#[derive(Clone, Debug)]
pub struct Phrase {
    words: Vec<String>,
    classes: Vec<RevealClass>,
    /// Word-index range of the marker sub-sequence (`start..end`).
    marker_range: std::ops::Range<usize>,
}

impl Phrase {
    /// Split `text` on whitespace and classify against `marker`.
    ///
    /// Fails with a validation error if the marker sub-sequence is absent;
    /// no rendering work happens past this point for invalid input.
    pub fn parse(text: &str, marker: &str) -> UnveilResult<Self> {
        let words: Vec<&str> = text.split_whitespace().collect();
        let marker_words: Vec<&str> = marker.split_whitespace().collect();
        let classes = classify(&words, &marker_words)?;

        let start = classes
            .iter()
            .position(|c| *c == RevealClass::Marker)
            .unwrap_or(0);
        let marker_range = start..start + marker_words.len();

        Ok(Self {
            words: words.into_iter().map(str::to_owned).collect(),
            classes,
            marker_range,
        })
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn classes(&self) -> &[RevealClass] {
        &self.classes
    }

    pub fn marker_range(&self) -> std::ops::Range<usize> {
        self.marker_range.clone()
    }

    /// Reveal classes that have at least one word, in reveal order.
    pub fn present_classes(&self) -> Vec<RevealClass> {
        RevealClass::ALL
            .into_iter()
            .filter(|c| self.classes.contains(c))
            .collect()
    }
}
