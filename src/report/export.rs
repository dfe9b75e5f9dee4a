//! Comma-separated export of the labelled dataset.

use csv::WriterBuilder;
use tracing::debug;

use crate::config::BenefitConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{Dataset, NormativeLabel};

/// File name offered for the exported dataset.
pub const EXPORT_FILE_NAME: &str = "resultado_simplificado.csv";

/// Serializes the dataset with its normative labels as comma-separated text.
///
/// The header is the input column names followed by the configured label
/// column (`Normativa` by default). Every original cell is written unchanged.
/// When the input already has a column with the label column's name, its
/// values are replaced in place instead of adding a second column.
///
/// # Errors
///
/// Returns [`EngineError::Calculation`] when `labels` does not hold exactly
/// one label per record.
///
/// # Examples
///
/// ```
/// use benefit_calculator::config::BenefitConfig;
/// use benefit_calculator::models::{Dataset, NormativeLabel};
/// use benefit_calculator::report::export_csv;
/// use rust_decimal::Decimal;
///
/// let dataset = Dataset::from_pairs([("2018-03-01", Decimal::from(1000))]);
/// let csv = export_csv(&dataset, &[NormativeLabel::PreThreshold], &BenefitConfig::default())?;
/// assert_eq!(csv, "period,remuneration,Normativa\n2018-03-01,1000,Lei 8.213/91\n");
/// # Ok::<(), benefit_calculator::error::EngineError>(())
/// ```
pub fn export_csv(
    dataset: &Dataset,
    labels: &[NormativeLabel],
    config: &BenefitConfig,
) -> EngineResult<String> {
    if labels.len() != dataset.len() {
        return Err(EngineError::Calculation {
            message: format!(
                "{} labels for {} records",
                labels.len(),
                dataset.len()
            ),
        });
    }

    let normative = config.normative();
    let existing = dataset
        .columns()
        .iter()
        .position(|c| c.trim() == normative.column_name);

    let mut header: Vec<&str> = dataset.columns().iter().map(String::as_str).collect();
    if existing.is_none() {
        header.push(&normative.column_name);
    }

    let mut writer = WriterBuilder::new().from_writer(Vec::new());
    writer.write_record(&header).map_err(write_error)?;

    for (record, label) in dataset.records().iter().zip(labels) {
        let text = label.display(&normative.labels);
        let mut row: Vec<&str> = record.values.iter().map(String::as_str).collect();
        match existing {
            Some(index) => row[index] = text,
            None => row.push(text),
        }
        writer.write_record(&row).map_err(write_error)?;
    }

    let bytes = writer.into_inner().map_err(|e| EngineError::Calculation {
        message: format!("failed to flush export: {}", e),
    })?;

    debug!(
        records = dataset.len(),
        replaced_column = existing.is_some(),
        "Exported labelled dataset"
    );

    String::from_utf8(bytes).map_err(|e| EngineError::Calculation {
        message: format!("export is not valid UTF-8: {}", e),
    })
}

fn write_error(error: csv::Error) -> EngineError {
    EngineError::Calculation {
        message: format!("failed to write export: {}", error),
    }
}
