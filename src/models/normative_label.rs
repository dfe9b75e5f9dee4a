//! Normative label model.

use serde::{Deserialize, Serialize};

use crate::config::NormativeLabels;

/// Classification of a record relative to the threshold year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NormativeLabel {
    /// The period's year is before the threshold year.
    PreThreshold,
    /// The period's year is the threshold year or later.
    PostThreshold,
    /// No year could be read from the period.
    Unknown,
}

impl NormativeLabel {
    /// Returns the configured display text for this label.
    ///
    /// # Examples
    ///
    /// ```
    /// use benefit_calculator::config::BenefitConfig;
    /// use benefit_calculator::models::NormativeLabel;
    ///
    /// let config = BenefitConfig::default();
    /// let labels = &config.normative().labels;
    /// assert_eq!(NormativeLabel::PreThreshold.display(labels), "Lei 8.213/91");
    /// assert_eq!(NormativeLabel::PostThreshold.display(labels), "Pós-2019");
    /// ```
    pub fn display<'a>(&self, labels: &'a NormativeLabels) -> &'a str {
        match self {
            NormativeLabel::PreThreshold => &labels.pre_threshold,
            NormativeLabel::PostThreshold => &labels.post_threshold,
            NormativeLabel::Unknown => &labels.unknown,
        }
    }

    /// Maps a display text back to its label.
    pub fn from_display(text: &str, labels: &NormativeLabels) -> Option<Self> {
        let text = text.trim();
        [
            NormativeLabel::PreThreshold,
            NormativeLabel::PostThreshold,
            NormativeLabel::Unknown,
        ]
        .into_iter()
        .find(|label| label.display(labels) == text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BenefitConfig;

    #[test]
    fn test_display_round_trips_through_from_display() {
        let config = BenefitConfig::default();
        let labels = &config.normative().labels;
        for label in [
            NormativeLabel::PreThreshold,
            NormativeLabel::PostThreshold,
            NormativeLabel::Unknown,
        ] {
            assert_eq!(
                NormativeLabel::from_display(label.display(labels), labels),
                Some(label)
            );
        }
    }

    #[test]
    fn test_from_display_unknown_text_is_none() {
        let config = BenefitConfig::default();
        assert_eq!(
            NormativeLabel::from_display("Lei 9.876/99", &config.normative().labels),
            None
        );
    }

    #[test]
    fn test_serializes_snake_case() {
        let json = serde_json::to_string(&NormativeLabel::PostThreshold).unwrap();
        assert_eq!(json, "\"post_threshold\"");
    }
}
