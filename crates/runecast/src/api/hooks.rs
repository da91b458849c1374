/// Executes a matched pattern's action payload (e.g. a text-command
/// interpreter). Returns whether the action succeeded; the engine only
/// records the outcome.
pub trait ActionDispatcher {
    fn dispatch(&mut self, action: &str) -> bool;
}

impl<F: FnMut(&str) -> bool> ActionDispatcher for F {
    fn dispatch(&mut self, action: &str) -> bool {
        self(action)
    }
}

/// Fire-and-forget notification for sound and particle feedback.
pub trait EffectsSink {
    fn gesture_recognized(&mut self, pattern_id: &str, score: f32);
}

impl<F: FnMut(&str, f32)> EffectsSink for F {
    fn gesture_recognized(&mut self, pattern_id: &str, score: f32) {
        self(pattern_id, score)
    }
}
