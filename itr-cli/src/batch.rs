use itr_core::calculations::RegimeComparator;
use itr_core::{ItrForm, Regime, TaxYearConfig};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{info, warn};

use crate::csv_loader::BatchRow;

/// One line of `itr batch` output. A row that fails validation carries
/// `error` and nothing else.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchSummary {
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub old_regime_tax: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_regime_tax: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommended_regime: Option<Regime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub savings: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub itr_form: Option<ItrForm>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Compares every row independently; a bad row does not stop the batch.
pub fn run_batch(
    config: &TaxYearConfig,
    rows: &[BatchRow],
) -> Vec<BatchSummary> {
    let comparator = RegimeComparator::new(config);

    let summaries: Vec<BatchSummary> = rows
        .iter()
        .map(|row| match comparator.compare(&row.input) {
            Ok(result) => BatchSummary {
                label: row.label.clone(),
                old_regime_tax: Some(result.old_regime.final_tax_payable),
                new_regime_tax: Some(result.new_regime.final_tax_payable),
                recommended_regime: Some(result.recommended_regime),
                savings: Some(result.savings),
                itr_form: Some(result.itr_form),
                error: None,
            },
            Err(err) => {
                warn!(label = %row.label, %err, "batch row skipped");
                BatchSummary {
                    label: row.label.clone(),
                    old_regime_tax: None,
                    new_regime_tax: None,
                    recommended_regime: None,
                    savings: None,
                    itr_form: None,
                    error: Some(err.to_string()),
                }
            }
        })
        .collect();

    let failed = summaries.iter().filter(|s| s.error.is_some()).count();
    info!(rows = rows.len(), failed, "batch complete");
    summaries
}
