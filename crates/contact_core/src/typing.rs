use std::time::Duration;

pub const HEADLINE: &str = "Intelligent Systems";
pub const TYPING_INTERVAL: Duration = Duration::from_millis(100);

/// One step of the headline reveal: show `text` once `at` has elapsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypingFrame {
    pub at: Duration,
    pub text: String,
}

/// Frames revealing `text` one character at a time, starting empty.
pub fn typing_frames(text: &str, interval: Duration) -> Vec<TypingFrame> {
    let mut frames = Vec::with_capacity(text.chars().count() + 1);
    let mut shown = String::with_capacity(text.len());
    frames.push(TypingFrame {
        at: Duration::ZERO,
        text: String::new(),
    });
    for (step, c) in text.chars().enumerate() {
        shown.push(c);
        let step = u32::try_from(step + 1).unwrap_or(u32::MAX);
        frames.push(TypingFrame {
            at: interval.saturating_mul(step),
            text: shown.clone(),
        });
    }
    frames
}
