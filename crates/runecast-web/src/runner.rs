use runecast::{
    Clock, EngineConfig, GestureEngine, InputEvent, InputQueue, Recognition, RecognitionEvent,
};

/// Wires the gesture engine to the browser frame loop.
///
/// JS pushes pointer events as they arrive; `pump` runs once per animation
/// frame, feeds the queued events to the engine in order and packs the
/// resulting recognition events into a flat `f32` buffer that TypeScript
/// reads through `events_ptr` / `events_len`.
pub struct EngineRunner {
    engine: GestureEngine,
    input: InputQueue,
    /// `RecognitionEvent::FLOATS` floats per event, rebuilt every pump.
    event_buffer: Vec<f32>,
    last: Option<Recognition>,
}

impl EngineRunner {
    pub fn new(config: EngineConfig, clock: impl Clock + 'static) -> Self {
        Self {
            engine: GestureEngine::with_clock(config, clock),
            input: InputQueue::new(),
            event_buffer: Vec::with_capacity(8 * RecognitionEvent::FLOATS),
            last: None,
        }
    }

    pub fn engine(&self) -> &GestureEngine {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut GestureEngine {
        &mut self.engine
    }

    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Process pending input. Returns how many gestures were recognized.
    pub fn pump(&mut self) -> u32 {
        let results = self.engine.drain_input(&mut self.input);
        let count = results.len() as u32;
        if let Some(r) = results.into_iter().last() {
            self.last = Some(r);
        }

        let events = self.engine.take_events();
        self.event_buffer.clear();
        self.event_buffer.extend_from_slice(bytemuck::cast_slice(&events));
        count
    }

    /// Most recent recognition since startup.
    pub fn last_recognition(&self) -> Option<&Recognition> {
        self.last.as_ref()
    }

    /// Forget everything the engine learned and anything still queued.
    pub fn reset(&mut self) {
        self.input.drain();
        self.event_buffer.clear();
        self.last = None;
        self.engine.reset();
    }

    // ---- Pointer accessors for event buffer reads ----

    pub fn events_ptr(&self) -> *const f32 {
        self.event_buffer.as_ptr()
    }

    /// Number of events (not floats) in the buffer.
    pub fn events_len(&self) -> u32 {
        (self.event_buffer.len() / RecognitionEvent::FLOATS) as u32
    }

    pub fn event_buffer(&self) -> &[f32] {
        &self.event_buffer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use runecast::event_kind;
    use std::f32::consts::TAU;

    fn runner() -> EngineRunner {
        EngineRunner::new(EngineConfig::default(), || 0u64)
    }

    fn push_circle(r: &mut EngineRunner) {
        for i in 0..20 {
            let a = i as f32 / 20.0 * TAU;
            let (x, y) = (150.0 + 50.0 * a.cos(), 150.0 + 50.0 * a.sin());
            let e = if i == 0 { InputEvent::down(x, y) } else { InputEvent::moved(x, y) };
            r.push_input(e.at(i as u64 * 16));
        }
        r.push_input(InputEvent::up(0.0, 0.0).at(400));
    }

    #[test]
    fn pump_packs_events() {
        let mut r = runner();
        push_circle(&mut r);
        assert_eq!(r.pump(), 1);
        assert_eq!(r.events_len(), 1);
        let buf = r.event_buffer();
        assert_eq!(buf.len(), RecognitionEvent::FLOATS);
        assert_eq!(buf[0], event_kind::RECOGNIZED);
        assert_eq!(buf[1], 0.0);
        assert_eq!(r.last_recognition().unwrap().pattern_id, "circle");
    }

    #[test]
    fn buffer_is_rebuilt_each_pump() {
        let mut r = runner();
        push_circle(&mut r);
        r.pump();
        assert_eq!(r.pump(), 0);
        assert_eq!(r.events_len(), 0);
        assert!(r.last_recognition().is_some());
    }

    #[test]
    fn reset_clears_state() {
        let mut r = runner();
        push_circle(&mut r);
        r.pump();
        r.reset();
        assert!(r.last_recognition().is_none());
        assert!(r.engine().history().is_empty());
    }
}
