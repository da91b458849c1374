use serde::{Deserialize, Serialize};
use crate::analysis::FeatureSet;
use crate::api::types::Timestamp;
use crate::error::PatternError;
use super::builtin::{builtin_patterns, category_members};
use super::pattern::Pattern;
use super::scoring::suggestion_score;

/// A hint that a feature set loosely resembles a pattern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    pub pattern_id: String,
    pub match_score: f32,
}

/// Registry of gesture patterns.
///
/// Built-ins are fixed at construction; custom patterns are added and removed
/// at runtime. Ids are unique across both groups. Iteration order is the
/// registration order: built-ins first, then customs in insertion order.
/// Storage is a pair of flat Vecs; libraries hold tens of patterns, not thousands.
#[derive(Debug, Clone)]
pub struct PatternLibrary {
    builtin: Vec<Pattern>,
    custom: Vec<Pattern>,
}

impl PatternLibrary {
    /// Library with the standard built-in shapes.
    pub fn new() -> Self {
        Self {
            builtin: builtin_patterns(),
            custom: Vec::new(),
        }
    }

    /// Library with no built-ins, for hosts that define every shape themselves.
    pub fn empty() -> Self {
        Self {
            builtin: Vec::new(),
            custom: Vec::new(),
        }
    }

    /// All patterns in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Pattern> {
        self.builtin.iter().chain(self.custom.iter())
    }

    pub fn builtins(&self) -> &[Pattern] {
        &self.builtin
    }

    pub fn customs(&self) -> &[Pattern] {
        &self.custom
    }

    pub fn len(&self) -> usize {
        self.builtin.len() + self.custom.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Look up a pattern by id.
    pub fn get(&self, id: &str) -> Option<&Pattern> {
        self.iter().find(|p| p.id == id)
    }

    pub fn has(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn is_builtin(&self, id: &str) -> bool {
        self.builtin.iter().any(|p| p.id == id)
    }

    /// Position of a pattern in registration order.
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.iter().position(|p| p.id == id)
    }

    /// Insert or overwrite a custom pattern under `id`.
    ///
    /// The pattern is validated first; on any error the library is left
    /// unchanged. Built-in ids are rejected. Overwriting keeps the pattern's
    /// original registration slot.
    pub fn add(
        &mut self,
        id: &str,
        mut pattern: Pattern,
        now: Timestamp,
    ) -> Result<(), PatternError> {
        pattern.id = id.to_string();
        pattern.created_at = Some(now);
        self.insert(pattern)
    }

    /// Re-insert a previously exported custom pattern, keeping its creation
    /// stamp (or stamping `now` if it has none). Same validation as `add`.
    pub fn restore(&mut self, mut pattern: Pattern, now: Timestamp) -> Result<(), PatternError> {
        pattern.created_at.get_or_insert(now);
        self.insert(pattern)
    }

    fn insert(&mut self, pattern: Pattern) -> Result<(), PatternError> {
        pattern.validate()?;
        let id = pattern.id.clone();
        if self.is_builtin(&id) {
            return Err(PatternError::BuiltInId(id));
        }

        match self.custom.iter_mut().find(|p| p.id == id) {
            Some(existing) => {
                *existing = pattern;
                log::info!("Custom pattern replaced: {id}");
            }
            None => {
                self.custom.push(pattern);
                log::info!("Custom pattern added: {id}");
            }
        }
        Ok(())
    }

    /// Parse pattern data from JSON and [`add`](Self::add) it.
    pub fn add_json(&mut self, id: &str, json: &str, now: Timestamp) -> Result<(), PatternError> {
        let pattern: Pattern = serde_json::from_str(json)?;
        self.add(id, pattern, now)
    }

    /// Remove a custom pattern. Returns false for unknown or built-in ids.
    pub fn remove(&mut self, id: &str) -> bool {
        match self.custom.iter().position(|p| p.id == id) {
            Some(idx) => {
                self.custom.remove(idx);
                log::info!("Custom pattern removed: {id}");
                true
            }
            None => false,
        }
    }

    /// Drop every custom pattern.
    pub fn clear_custom(&mut self) {
        self.custom.clear();
    }

    /// Built-in patterns of a theme category, in the category's order.
    pub fn in_category(&self, category: &str) -> Vec<&Pattern> {
        category_members(category)
            .iter()
            .filter_map(|id| self.builtin.iter().find(|p| p.id == *id))
            .collect()
    }

    /// Mean acceptance threshold of the built-ins (0 when there are none).
    pub fn average_builtin_threshold(&self) -> f32 {
        if self.builtin.is_empty() {
            return 0.0;
        }
        self.builtin.iter().map(|p| p.acceptance_threshold).sum::<f32>() / self.builtin.len() as f32
    }

    /// Patterns whose expected ranges loosely fit `features`, best first.
    /// Only scores above 0.3 are returned; equal scores keep registration order.
    pub fn suggest(&self, features: &FeatureSet) -> Vec<Suggestion> {
        let mut out: Vec<Suggestion> = self
            .iter()
            .map(|p| Suggestion {
                pattern_id: p.id.clone(),
                match_score: suggestion_score(&p.expected_feature_ranges, features),
            })
            .filter(|s| s.match_score > 0.3)
            .collect();
        out.sort_by(|a, b| b.match_score.total_cmp(&a.match_score));
        out
    }
}

impl Default for PatternLibrary {
    fn default() -> Self {
        Self::new()
    }
}
