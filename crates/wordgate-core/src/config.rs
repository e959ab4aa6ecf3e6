//! Configuration.
//!
//! Every field has a default matching the game's shipped page, so an empty
//! JSON object `{}` is a complete configuration. Hosts may override any
//! subset.

use std::time::Duration;

use serde::Deserialize;

use crate::error::ConfigError;

/// Top-level configuration for one page.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct WordgateConfig {
    /// Submission gate behavior.
    pub gate: GateConfig,
    /// Element lookup and ancillary affordances.
    pub page: PageConfig,
    /// Celebration animation.
    pub confetti: ConfettiConfig,
}

impl WordgateConfig {
    /// Parse a JSON document and check it.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check cross-field invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.gate.validate()
    }
}

/// Submission gate settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct GateConfig {
    /// How long a notice stays in the input before it is cleared.
    pub reset_delay_ms: u64,
    /// Path (or absolute URL) of the dictionary check endpoint.
    pub endpoint: String,
    /// User-visible strings.
    pub messages: GateMessages,
    /// Notice colors.
    pub markers: MarkerColors,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            reset_delay_ms: 800,
            endpoint: "/check_valid".to_string(),
            messages: GateMessages::default(),
            markers: MarkerColors::default(),
        }
    }
}

impl GateConfig {
    /// Reset delay as a `Duration`.
    pub fn reset_delay(&self) -> Duration {
        Duration::from_millis(self.reset_delay_ms)
    }

    /// Check that notices are visible and distinguishable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.reset_delay_ms == 0 {
            return Err(ConfigError::ZeroResetDelay);
        }

        let messages = [
            ("length_prompt", &self.messages.length_prompt),
            ("invalid_word", &self.messages.invalid_word),
            ("checking_label", &self.messages.checking_label),
            ("idle_label", &self.messages.idle_label),
        ];
        if let Some(&(field, _)) = messages.iter().find(|(_, text)| text.trim().is_empty()) {
            return Err(ConfigError::EmptyMessage { field });
        }

        if self.markers.length_warning.eq_ignore_ascii_case(&self.markers.invalid_word) {
            return Err(ConfigError::IndistinctMarkers {
                color: self.markers.length_warning.clone(),
            });
        }

        Ok(())
    }
}

/// Localized strings shown by the gate.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct GateMessages {
    /// Shown in the input when the guess is not five letters.
    pub length_prompt: String,
    /// Shown in the input when the dictionary rejects the word.
    pub invalid_word: String,
    /// Submit control label while validating.
    pub checking_label: String,
    /// Submit control label when idle.
    pub idle_label: String,
}

impl Default for GateMessages {
    fn default() -> Self {
        Self {
            length_prompt: "請輸入 5 個字母！".to_string(),
            invalid_word: "無效單字！".to_string(),
            checking_label: "驗證中...".to_string(),
            idle_label: "發送".to_string(),
        }
    }
}

/// CSS colors marking each error class. Must differ.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct MarkerColors {
    /// Invalid length.
    pub length_warning: String,
    /// Invalid word.
    pub invalid_word: String,
}

impl Default for MarkerColors {
    fn default() -> Self {
        Self { length_warning: "orange".to_string(), invalid_word: "red".to_string() }
    }
}

/// Element lookup and page-load affordances.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    /// Selector of the gated guess form.
    pub form_selector: String,
    /// Selector of the guess input.
    pub input_selector: String,
    /// Selector of the submit control.
    pub submit_selector: String,
    /// Selector of the chat/history panel scrolled on load.
    pub history_selector: String,
    /// Id of the element whose presence means the game was won.
    pub celebration_marker_id: String,
    /// Label set by the secondary lock handler on other forms.
    pub lock_label: String,
    /// Name of the guess field, for hosts that post the form themselves.
    pub field_name: String,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            form_selector: ".input-area".to_string(),
            input_selector: r#"input[name="user_input"]"#.to_string(),
            submit_selector: r#"button[type="submit"]"#.to_string(),
            history_selector: ".chat-box".to_string(),
            celebration_marker_id: "confetti-trigger".to_string(),
            lock_label: "比對中...".to_string(),
            field_name: "user_input".to_string(),
        }
    }
}

/// Celebration particle parameters.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ConfettiConfig {
    /// Number of particles.
    pub count: usize,
    /// Text content of each particle.
    pub glyph: String,
    /// Smallest font size in px.
    pub min_size_px: f64,
    /// Random extra font size in px, `[0, size_spread_px)`.
    pub size_spread_px: f64,
    /// Shortest fall in ms.
    pub min_duration_ms: f64,
    /// Random extra fall time in ms, `[0, duration_spread_ms)`.
    pub duration_spread_ms: f64,
    /// Upper bound of the final rotation in degrees.
    pub max_rotation_deg: f64,
    /// Starting `top` offset in px (negative starts above the viewport).
    pub start_top_px: f64,
    /// Stacking order of particles.
    pub z_index: i32,
}

impl Default for ConfettiConfig {
    fn default() -> Self {
        Self {
            count: 50,
            glyph: "🌸".to_string(),
            min_size_px: 10.0,
            size_spread_px: 20.0,
            min_duration_ms: 2000.0,
            duration_spread_ms: 3000.0,
            max_rotation_deg: 360.0,
            start_top_px: -20.0,
            z_index: 999,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_is_default() {
        let config = WordgateConfig::from_json("{}").unwrap();
        assert_eq!(config, WordgateConfig::default());
        assert_eq!(config.gate.reset_delay(), Duration::from_millis(800));
        assert_eq!(config.confetti.count, 50);
    }

    #[test]
    fn partial_override_keeps_other_defaults() {
        let config = WordgateConfig::from_json(
            r#"{"gate": {"messages": {"invalid_word": "Not a word!"}}, "page": {"lock_label": "..."}}"#,
        )
        .unwrap();

        assert_eq!(config.gate.messages.invalid_word, "Not a word!");
        assert_eq!(config.gate.messages.length_prompt, GateMessages::default().length_prompt);
        assert_eq!(config.page.lock_label, "...");
        assert_eq!(config.page.form_selector, ".input-area");
    }

    #[test]
    fn identical_markers_rejected() {
        let result = WordgateConfig::from_json(
            r#"{"gate": {"markers": {"length_warning": "Red", "invalid_word": "red"}}}"#,
        );
        assert!(matches!(result, Err(ConfigError::IndistinctMarkers { .. })));
    }

    #[test]
    fn zero_delay_rejected() {
        let result = WordgateConfig::from_json(r#"{"gate": {"reset_delay_ms": 0}}"#);
        assert!(matches!(result, Err(ConfigError::ZeroResetDelay)));
    }

    #[test]
    fn blank_message_rejected() {
        let result = WordgateConfig::from_json(r#"{"gate": {"messages": {"idle_label": "  "}}}"#);
        assert!(matches!(result, Err(ConfigError::EmptyMessage { field: "idle_label" })));
    }

    #[test]
    fn malformed_json_rejected() {
        assert!(matches!(WordgateConfig::from_json("{gate"), Err(ConfigError::Json(_))));
    }
}
