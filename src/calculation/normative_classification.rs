//! Per-record normative classification.
//!
//! Each record is labelled by the year in its period relative to the
//! configured threshold year (EC 103/2019 by default). A period without a
//! readable year never aborts the run: the record is labelled
//! [`NormativeLabel::Unknown`] and an audit warning is raised.

use crate::config::NormativeConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{AuditStep, AuditWarning, NormativeLabel, Period, Record};

/// Warning code raised for each period whose year cannot be read.
pub const UNPARSEABLE_PERIOD_WARNING: &str = "UNPARSEABLE_PERIOD";

/// The result of labelling a dataset, including warnings and the audit step.
#[derive(Debug, Clone)]
pub struct ClassificationResult {
    /// One label per record, in the order of the input slice.
    pub labels: Vec<NormativeLabel>,
    /// One warning per record labelled `Unknown`.
    pub warnings: Vec<AuditWarning>,
    /// The audit step recording this classification.
    pub audit_step: AuditStep,
}

/// Classifies a single period against the threshold year.
///
/// # Errors
///
/// Returns [`EngineError::LabelParse`] when the first four characters of the
/// period are not a year.
///
/// # Examples
///
/// ```
/// use benefit_calculator::calculation::classify_period;
/// use benefit_calculator::models::{NormativeLabel, Period};
///
/// let label = classify_period(&Period::new("2018-03-01"), 2019).unwrap();
/// assert_eq!(label, NormativeLabel::PreThreshold);
/// let label = classify_period(&Period::new("2019-01-01"), 2019).unwrap();
/// assert_eq!(label, NormativeLabel::PostThreshold);
/// assert!(classify_period(&Period::new("abcd"), 2019).is_err());
/// ```
pub fn classify_period(period: &Period, threshold_year: i32) -> EngineResult<NormativeLabel> {
    let year = period.year_prefix().ok_or_else(|| EngineError::LabelParse {
        period: period.to_string(),
    })?;

    if year < threshold_year {
        Ok(NormativeLabel::PreThreshold)
    } else {
        Ok(NormativeLabel::PostThreshold)
    }
}

/// Labels every record, recovering unreadable periods as `Unknown`.
pub fn label_records(
    records: &[Record],
    config: &NormativeConfig,
    step_number: u32,
) -> ClassificationResult {
    let mut labels = Vec::with_capacity(records.len());
    let mut warnings = Vec::new();

    for record in records {
        let label = match classify_period(&record.period, config.threshold_year) {
            Ok(label) => label,
            Err(err) => {
                warnings.push(AuditWarning {
                    code: UNPARSEABLE_PERIOD_WARNING.to_string(),
                    message: format!("Row {}: {}", record.row + 1, err),
                    severity: "low".to_string(),
                });
                NormativeLabel::Unknown
            }
        };
        labels.push(label);
    }

    let count = |wanted: NormativeLabel| labels.iter().filter(|l| **l == wanted).count();
    let pre = count(NormativeLabel::PreThreshold);
    let post = count(NormativeLabel::PostThreshold);
    let unknown = count(NormativeLabel::Unknown);

    let audit_step = AuditStep {
        step_number,
        rule_id: "normative_classification".to_string(),
        rule_name: "Normative Classification".to_string(),
        clause_ref: config.clause.clone(),
        input: serde_json::json!({
            "records": records.len(),
            "threshold_year": config.threshold_year
        }),
        output: serde_json::json!({
            "pre_threshold": pre,
            "post_threshold": post,
            "unknown": unknown
        }),
        reasoning: format!(
            "{} before {}, {} from {} on, {} without a readable year",
            pre, config.threshold_year, post, config.threshold_year, unknown
        ),
    };

    ClassificationResult {
        labels,
        warnings,
        audit_step,
    }
}
