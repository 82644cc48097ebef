use crate::ease::Fade;
use crate::phrase::Phrase;
use crate::render::VisibilityState;

/// Frames covering `ms` at `fps`, rounded to nearest.
fn frames_for_ms(ms: u32, fps: u32) -> usize {
    (((u64::from(ms) * u64::from(fps)) + 500) / 1000) as usize
}

/// Build the ordered visibility schedule for a reveal animation.
///
/// One stage per non-empty reveal class, in reveal order. Each stage opens
/// with eased fade-in frames of the newest class (covering `fade_ms`) and
/// holds fully-opaque frames for the rest of `hold_ms`. Every stage emits at
/// least one frame; the final frame is always the fully-revealed phrase.
pub fn build_schedule(
    phrase: &Phrase,
    fps: u32,
    hold_ms: u32,
    fade_ms: u32,
    fade: Fade,
) -> Vec<VisibilityState> {
    let hold_frames = frames_for_ms(hold_ms, fps).max(1);
    let fade_frames = frames_for_ms(fade_ms, fps).min(hold_frames);

    let mut states = Vec::new();
    for class in phrase.present_classes() {
        for i in 0..fade_frames {
            let t = (i + 1) as f64 / fade_frames as f64;
            states.push(VisibilityState::new(class, fade.apply(t)));
        }
        for _ in fade_frames..hold_frames {
            states.push(VisibilityState::full(class));
        }
    }
    states
}
