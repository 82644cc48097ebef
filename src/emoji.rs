use std::collections::HashMap;
use std::io::Read as _;
use std::sync::Arc;

/// True for scalar values rendered from external emoji bitmaps instead of
/// the typeface.
pub fn is_emoji(ch: char) -> bool {
    matches!(
        u32::from(ch),
        0x1F300..=0x1F5FF // misc symbols and pictographs
            | 0x1F600..=0x1F64F // emoticons
            | 0x1F680..=0x1F6FF // transport
            | 0x1F900..=0x1F9FF // supplemental symbols
            | 0x1FA70..=0x1FAFF // extended-A
            | 0x2600..=0x26FF // misc symbols
            | 0x2700..=0x27BF // dingbats
    )
}

/// Cache key: code-point sequence plus the pixel size it was rastered at.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct EmojiKey {
    pub codepoints: Vec<u32>,
    pub size_px: u32,
}

impl EmojiKey {
    pub fn for_char(ch: char, size_px: u32) -> Self {
        Self {
            codepoints: vec![u32::from(ch)],
            size_px,
        }
    }

    /// Hyphen-joined lowercase hex form used by Twemoji-style asset names.
    pub fn hex_name(&self) -> String {
        self.codepoints
            .iter()
            .map(|cp| format!("{cp:x}"))
            .collect::<Vec<_>>()
            .join("-")
    }
}

/// Fixed-size straight-alpha RGBA bitmap for one emoji glyph.
#[derive(Clone, Debug)]
pub struct EmojiBitmap {
    pub width: u32,
    pub height: u32,
    /// Row-major straight RGBA8, `width * height * 4` bytes.
    pub rgba: Vec<u8>,
}

/// External bitmap source.
///
/// `None` is the explicit "unavailable" signal (network failure, non-success
/// status, undecodable payload); the renderer treats it as non-fatal and
/// keeps the reserved advance.
pub trait EmojiProvider {
    fn fetch(&self, key: &EmojiKey) -> Option<EmojiBitmap>;
}

/// Twemoji-style HTTP provider: fetches a PNG named after the code points
/// and resizes it to the requested pixel size.
pub struct HttpEmojiProvider {
    base_url: String,
}

impl HttpEmojiProvider {
    pub const DEFAULT_BASE_URL: &'static str =
        "https://cdn.jsdelivr.net/gh/twitter/twemoji@14.0.2/assets/72x72";

    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }
}

impl Default for HttpEmojiProvider {
    fn default() -> Self {
        Self::new(Self::DEFAULT_BASE_URL)
    }
}

impl EmojiProvider for HttpEmojiProvider {
    fn fetch(&self, key: &EmojiKey) -> Option<EmojiBitmap> {
        let url = format!("{}/{}.png", self.base_url, key.hex_name());

        let response = match ureq::get(&url).call() {
            Ok(r) => r,
            Err(e) => {
                tracing::warn!(%url, error = %e, "emoji fetch failed; glyph will be skipped");
                return None;
            }
        };

        let mut bytes = Vec::new();
        if let Err(e) = response.into_reader().read_to_end(&mut bytes) {
            tracing::warn!(%url, error = %e, "emoji body read failed; glyph will be skipped");
            return None;
        }

        let decoded = match image::load_from_memory(&bytes) {
            Ok(img) => img.to_rgba8(),
            Err(e) => {
                tracing::warn!(%url, error = %e, "emoji decode failed; glyph will be skipped");
                return None;
            }
        };

        let resized = image::imageops::resize(
            &decoded,
            key.size_px,
            key.size_px,
            image::imageops::FilterType::Triangle,
        );
        Some(EmojiBitmap {
            width: resized.width(),
            height: resized.height(),
            rgba: resized.into_raw(),
        })
    }
}

/// Per-renderer emoji bitmap cache: at most one provider fetch per key for
/// the process lifetime, negative results included (fetch failures are
/// permanent, never retried). Unbounded; the key space actually used per
/// run is small.
pub struct EmojiCache {
    provider: Box<dyn EmojiProvider>,
    entries: HashMap<EmojiKey, Option<Arc<EmojiBitmap>>>,
}

impl EmojiCache {
    pub fn new(provider: Box<dyn EmojiProvider>) -> Self {
        Self {
            provider,
            entries: HashMap::new(),
        }
    }

    pub fn get_or_fetch(&mut self, key: &EmojiKey) -> Option<Arc<EmojiBitmap>> {
        if let Some(entry) = self.entries.get(key) {
            return entry.clone();
        }
        let fetched = self.provider.fetch(key).map(Arc::new);
        self.entries.insert(key.clone(), fetched.clone());
        fetched
    }

    /// Fetch every distinct emoji in `text` at `size_px` up front, so the
    /// frame loop never waits on the network.
    pub fn prefetch(&mut self, text: &str, size_px: u32) {
        for ch in text.chars().filter(|c| is_emoji(*c)) {
            let key = EmojiKey::for_char(ch, size_px);
            self.get_or_fetch(&key);
        }
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}
