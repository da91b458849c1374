use serde::Serialize;
use crate::analysis::{path_similarity, FeatureSet};
use crate::api::clock::{Clock, SystemClock};
use crate::api::config::EngineConfig;
use crate::api::hooks::{ActionDispatcher, EffectsSink};
use crate::api::persist::{ExportData, PatternExport};
use crate::api::types::{PathSample, RecognitionEvent, Timestamp};
use crate::error::PatternError;
use crate::input::queue::{InputEvent, InputQueue};
use crate::patterns::{Pattern, PatternLibrary, Suggestion};
use crate::recognition::{
    classify, ActionLog, ActionRecord, Classification, Classifier, CooldownStatus, HistoryEntry,
    HistoryLedger, RecognitionSession, SessionResult,
};

/// What happened to a match's action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum DispatchOutcome {
    Succeeded,
    Failed,
    /// Score under `minDispatchConfidence`.
    LowConfidence,
    CoolingDown,
    /// No dispatcher is connected.
    NotDispatched,
}

/// A successful recognition and its consequences.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Recognition {
    pub pattern_id: String,
    pub pattern_index: usize,
    pub display_name: String,
    pub associated_action: String,
    pub score: f32,
    pub outcome: DispatchOutcome,
    pub features: FeatureSet,
}

/// Read-only summary for UI display.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineStats {
    pub pattern_count: usize,
    pub built_in_count: usize,
    pub custom_count: usize,
    pub average_threshold: f32,
    pub most_used_pattern: Option<String>,
    pub history_size: usize,
    pub action_count: usize,
    pub successful_actions: usize,
    pub failed_actions: usize,
    pub average_confidence: f32,
    pub active_cooldowns: usize,
    pub enabled: bool,
}

/// The gesture recognition engine.
///
/// Owns the pattern library, recognition history, action log and the stroke
/// in progress. Pointer events go in through [`handle_event`](Self::handle_event)
/// or [`drain_input`](Self::drain_input); matches come out as [`Recognition`]s,
/// dispatcher/effects calls, and a buffer of [`RecognitionEvent`]s for the UI.
///
/// All methods take `&mut self`: a host sharing the engine across threads
/// wraps it in a mutex, which serializes pattern edits and history appends.
pub struct GestureEngine {
    config: EngineConfig,
    library: PatternLibrary,
    history: HistoryLedger,
    actions: ActionLog,
    session: RecognitionSession,
    classifier: Classifier,
    clock: Box<dyn Clock>,
    dispatcher: Option<Box<dyn ActionDispatcher>>,
    effects: Option<Box<dyn EffectsSink>>,
    enabled: bool,
    debug: bool,
    events: Vec<RecognitionEvent>,
}

impl GestureEngine {
    /// Engine with the built-in patterns and the system clock.
    pub fn new(config: EngineConfig) -> Self {
        Self::with_clock(config, SystemClock)
    }

    pub fn with_clock(config: EngineConfig, clock: impl Clock + 'static) -> Self {
        Self::with_library(config, PatternLibrary::new(), clock)
    }

    pub fn with_library(
        config: EngineConfig,
        library: PatternLibrary,
        clock: impl Clock + 'static,
    ) -> Self {
        Self {
            history: HistoryLedger::new(config.history_capacity),
            actions: ActionLog::new(),
            session: RecognitionSession::new(config.min_points()),
            classifier: Classifier::new(&config),
            library,
            clock: Box::new(clock),
            dispatcher: None,
            effects: None,
            enabled: true,
            debug: false,
            events: Vec::with_capacity(8),
            config,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn set_dispatcher(&mut self, dispatcher: impl ActionDispatcher + 'static) {
        self.dispatcher = Some(Box::new(dispatcher));
    }

    pub fn clear_dispatcher(&mut self) {
        self.dispatcher = None;
    }

    pub fn set_effects(&mut self, effects: impl EffectsSink + 'static) {
        self.effects = Some(Box::new(effects));
    }

    pub fn clear_effects(&mut self) {
        self.effects = None;
    }

    // -- Enable / debug --

    /// While disabled, pointer-down never starts a stroke. Disabling
    /// abandons a stroke in progress.
    pub fn set_enabled(&mut self, enabled: bool) {
        if self.enabled == enabled {
            return;
        }
        self.enabled = enabled;
        if !enabled {
            self.session.cancel();
        }
        log::info!("Gesture recognition {}", if enabled { "enabled" } else { "disabled" });
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Log per-gesture features at info level instead of debug.
    pub fn set_debug(&mut self, debug: bool) {
        self.debug = debug;
        log::info!("Gesture debug mode {}", if debug { "on" } else { "off" });
    }

    pub fn is_drawing(&self) -> bool {
        self.session.is_drawing()
    }

    /// Samples of the stroke in progress, for drawing its trail.
    pub fn current_path(&self) -> &[PathSample] {
        self.session.path()
    }

    // -- Input --

    /// Feed one pointer event. Returns a recognition when this event completed
    /// a stroke that matched a pattern.
    pub fn handle_event(&mut self, event: InputEvent) -> Option<Recognition> {
        let (x, y) = event.position();
        let sample = PathSample::new(x, y, event.time().unwrap_or_else(|| self.clock.now_ms()));

        let result = match event {
            InputEvent::PointerDown { .. } => {
                if !self.enabled {
                    return None;
                }
                self.session.on_pointer_down(sample)
            }
            InputEvent::PointerMove { .. } => self.session.on_pointer_move(sample),
            InputEvent::PointerUp { .. } | InputEvent::PointerLeave { .. } => {
                self.session.on_pointer_up()
            }
            InputEvent::PointerCancel { .. } => self.session.cancel(),
        };

        match result {
            SessionResult::Completed(path) => self.recognize(&path),
            _ => None,
        }
    }

    /// Process every queued event in arrival order.
    ///
    /// Each drain starts a new frame: recognition events left over from the
    /// previous frame are discarded.
    pub fn drain_input(&mut self, queue: &mut InputQueue) -> Vec<Recognition> {
        self.events.clear();
        queue
            .drain()
            .into_iter()
            .filter_map(|event| self.handle_event(event))
            .collect()
    }

    // -- Recognition --

    /// Classify a path without any side effects.
    pub fn classify_path(&self, path: &[PathSample]) -> Option<Classification> {
        self.classifier.recognize(&self.library, path)
    }

    /// Classify a completed path and, on a match, record it, dispatch its
    /// action and notify effects. Disabled engines recognize nothing.
    pub fn recognize(&mut self, path: &[PathSample]) -> Option<Recognition> {
        if !self.enabled {
            return None;
        }

        let classification = match self.classifier.analyze(path) {
            Ok((measured, features)) => {
                self.log_features(&features);
                classify(&self.library, &features, &measured)
            }
            Err(err) => {
                log::warn!("Gesture path rejected: {err}");
                None
            }
        };

        match classification {
            Some(c) => self.apply_match(c),
            None => {
                log::debug!("Gesture not recognized");
                self.emit_event(RecognitionEvent::unrecognized());
                None
            }
        }
    }

    fn apply_match(&mut self, c: Classification) -> Option<Recognition> {
        let now = self.clock.now_ms();
        let pattern = self.library.get(&c.pattern_id)?;
        let display_name = pattern.display_name.clone();
        let action = pattern.associated_action.clone();
        let cooldown_ms = pattern.cooldown_ms;

        log::info!("Gesture recognized: {} ({:.3})", c.pattern_id, c.score);
        self.history.append(HistoryEntry {
            pattern_id: c.pattern_id.clone(),
            score: c.score,
            timestamp: now,
            associated_action: action.clone(),
        });

        let outcome = self.dispatch(&c.pattern_id, &action, c.score, cooldown_ms, now);

        if let Some(effects) = self.effects.as_mut() {
            effects.gesture_recognized(&c.pattern_id, c.score);
        }
        self.emit_event(RecognitionEvent::recognized(
            c.pattern_index,
            c.score,
            outcome == DispatchOutcome::Succeeded,
        ));

        Some(Recognition {
            pattern_id: c.pattern_id,
            pattern_index: c.pattern_index,
            display_name,
            associated_action: action,
            score: c.score,
            outcome,
            features: c.features,
        })
    }

    fn dispatch(
        &mut self,
        pattern_id: &str,
        action: &str,
        score: f32,
        cooldown_ms: u64,
        now: Timestamp,
    ) -> DispatchOutcome {
        if score < self.config.min_dispatch_confidence {
            return DispatchOutcome::LowConfidence;
        }
        if self.actions.is_on_cooldown(pattern_id, now) {
            log::warn!("Action for '{pattern_id}' skipped: on cooldown");
            return DispatchOutcome::CoolingDown;
        }
        let Some(dispatcher) = self.dispatcher.as_mut() else {
            return DispatchOutcome::NotDispatched;
        };

        let succeeded = dispatcher.dispatch(action);
        if !succeeded {
            log::warn!("Action '{action}' for '{pattern_id}' failed");
        }
        self.actions.record(ActionRecord {
            pattern_id: pattern_id.to_string(),
            action: action.to_string(),
            score,
            succeeded,
            timestamp: now,
        });
        self.actions.start_cooldown(pattern_id, cooldown_ms, now);

        if succeeded {
            DispatchOutcome::Succeeded
        } else {
            DispatchOutcome::Failed
        }
    }

    fn log_features(&self, f: &FeatureSet) {
        let level = if self.debug { log::Level::Info } else { log::Level::Debug };
        log::log!(
            level,
            "Gesture features: points={} aspect={:.3} curvature={:.3} turns={} closed={} \
             symmetry={:.3} density={:.4} speed={:.3}",
            f.path_length,
            f.aspect_ratio,
            f.curvature,
            f.direction_changes,
            f.is_closed,
            f.symmetry,
            f.density,
            f.mean_velocity(),
        );
    }

    /// Queue an event for the UI. Past `max_events` the oldest is dropped.
    fn emit_event(&mut self, event: RecognitionEvent) {
        if self.events.len() >= self.config.max_events.max(1) {
            self.events.remove(0);
        }
        self.events.push(event);
    }

    /// Drain the recognition events produced since the last call.
    pub fn take_events(&mut self) -> Vec<RecognitionEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn events(&self) -> &[RecognitionEvent] {
        &self.events
    }

    // -- Patterns --

    pub fn library(&self) -> &PatternLibrary {
        &self.library
    }

    pub fn add_custom_pattern(&mut self, id: &str, pattern: Pattern) -> Result<(), PatternError> {
        let now = self.clock.now_ms();
        self.library.add(id, pattern, now)
    }

    pub fn add_custom_pattern_json(&mut self, id: &str, json: &str) -> Result<(), PatternError> {
        let now = self.clock.now_ms();
        self.library.add_json(id, json, now)
    }

    /// Remove a custom pattern. Built-in and unknown ids return false.
    pub fn remove_custom_pattern(&mut self, id: &str) -> bool {
        self.library.remove(id)
    }

    pub fn has_pattern(&self, id: &str) -> bool {
        self.library.has(id)
    }

    pub fn pattern(&self, id: &str) -> Option<&Pattern> {
        self.library.get(id)
    }

    pub fn patterns_in_category(&self, category: &str) -> Vec<&Pattern> {
        self.library.in_category(category)
    }

    /// Patterns that loosely resemble `path`, best first. Invalid paths get none.
    pub fn suggest(&self, path: &[PathSample]) -> Vec<Suggestion> {
        match self.classifier.analyze(path) {
            Ok((_, features)) => self.library.suggest(&features),
            Err(_) => Vec::new(),
        }
    }

    /// Shape similarity of two paths in 0..=1, independent of position and scale.
    pub fn compare_paths(&self, a: &[PathSample], b: &[PathSample]) -> f32 {
        path_similarity(self.classifier.extractor(), a, b, self.config.normalization_size)
    }

    // -- History --

    pub fn history(&self) -> &HistoryLedger {
        &self.history
    }

    pub fn recent(&self, n: usize) -> Vec<HistoryEntry> {
        self.history.recent(n)
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    pub fn action_log(&self) -> &ActionLog {
        &self.actions
    }

    pub fn cooldown_status(&self) -> Vec<CooldownStatus> {
        self.actions.cooldown_status(self.clock.now_ms())
    }

    // -- Persistence --

    pub fn export_data(&self) -> ExportData {
        ExportData {
            patterns: PatternExport {
                built_in: self.library.builtins().to_vec(),
                custom: self.library.customs().to_vec(),
            },
            recognition_history: self.history.export_all(),
            action_history: Some(self.actions.export_all()),
            exported_at: self.clock.now_ms(),
        }
    }

    pub fn export_json(&self) -> Result<String, serde_json::Error> {
        self.export_data().to_json()
    }

    /// Merge custom patterns and replace history (and the action log when
    /// present). Invalid or built-in patterns are skipped. Returns how many
    /// custom patterns were restored.
    pub fn import_data(&mut self, data: ExportData) -> usize {
        let now = self.clock.now_ms();
        let mut restored = 0;
        for pattern in data.patterns.custom {
            let id = pattern.id.clone();
            match self.library.restore(pattern, now) {
                Ok(()) => restored += 1,
                Err(err) => log::warn!("Skipped imported pattern '{id}': {err}"),
            }
        }

        self.history.import_all(data.recognition_history);
        if let Some(records) = data.action_history {
            self.actions.import_all(records);
        }
        log::info!(
            "Imported {restored} custom patterns and {} history entries",
            self.history.len()
        );
        restored
    }

    pub fn import_json(&mut self, json: &str) -> Result<usize, serde_json::Error> {
        let data = ExportData::from_json(json)?;
        Ok(self.import_data(data))
    }

    // -- Stats / reset --

    pub fn stats(&self) -> EngineStats {
        let actions = self.actions.stats();
        EngineStats {
            pattern_count: self.library.len(),
            built_in_count: self.library.builtins().len(),
            custom_count: self.library.customs().len(),
            average_threshold: self.library.average_builtin_threshold(),
            most_used_pattern: self.history.most_used().map(str::to_string),
            history_size: self.history.len(),
            action_count: actions.total,
            successful_actions: actions.successful,
            failed_actions: actions.failed,
            average_confidence: actions.average_confidence,
            active_cooldowns: self.actions.active_cooldowns(self.clock.now_ms()),
            enabled: self.enabled,
        }
    }

    /// Drop custom patterns, history, action log, cooldowns and any stroke in progress.
    pub fn reset(&mut self) {
        self.library.clear_custom();
        self.history.clear();
        self.actions.clear();
        self.session.cancel();
        self.events.clear();
        log::info!("Gesture engine reset");
    }
}

impl Default for GestureEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}
