use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// One uploaded document to validate, as handed over by the upload gateway.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ValidationRequest {
    #[schemars(
        description = "Identifier of a document previously stored in the artifact store. Unique within a batch."
    )]
    #[serde(rename = "fileName", alias = "documentIdentifier")]
    pub document_identifier: String,

    #[schemars(description = "Net income reported by the submitter, if any")]
    #[serde(default)]
    pub submitted_net_income: Option<f64>,
}

impl ValidationRequest {
    #[must_use]
    pub fn new(document_identifier: impl Into<String>, submitted_net_income: Option<f64>) -> Self {
        Self {
            document_identifier: document_identifier.into(),
            submitted_net_income,
        }
    }
}

/// Where a record came from and how long it took to produce.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Provenance {
    /// Identifier of the source document
    pub file_name: String,
    /// Identifier of the derived document holding only the selected pages
    #[serde(rename = "filteredPDF")]
    pub filtered_pdf: String,
    /// Number of pages in the derived document
    pub page_count: usize,
    /// Wall-clock time of the whole pipeline run, rounded to 2 decimals
    pub processing_time_seconds: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct IncomeStatementRecord {
    #[schemars(description = "Period label taken from the latest-period column header")]
    pub quarter: String,
    pub revenues: f64,
    pub expenses: f64,
    pub net_income: f64,
    #[schemars(description = "revenues - expenses")]
    pub gross_profit: f64,
    #[schemars(description = "net income / revenues * 100, rounded to 2 decimals; 0 when revenues <= 0")]
    pub profit_margin_percent: f64,
    pub submitted_net_income: Option<f64>,
    #[schemars(description = "Equals net_income once a submitted value is present, otherwise 0")]
    pub calculated_net_income: f64,
    #[schemars(description = "None when no submitted value was provided")]
    pub is_valid: Option<bool>,
    #[serde(flatten)]
    pub provenance: Provenance,
}

impl IncomeStatementRecord {
    /// An all-zero record for the given period label.
    pub fn empty(quarter: impl Into<String>, submitted_net_income: Option<f64>) -> Self {
        Self {
            quarter: quarter.into(),
            revenues: 0.0,
            expenses: 0.0,
            net_income: 0.0,
            gross_profit: 0.0,
            profit_margin_percent: 0.0,
            submitted_net_income,
            calculated_net_income: 0.0,
            is_valid: None,
            provenance: Provenance::default(),
        }
    }

    /// Only records with a strictly positive net income are reported.
    pub fn is_reportable(&self) -> bool {
        self.net_income > 0.0
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResult {
    #[serde(rename = "fileName")]
    pub document_identifier: String,
    #[serde(rename = "error")]
    pub error_message: String,
}

/// A single entry of a batch response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[serde(untagged)]
pub enum ValidationOutcome {
    Record(IncomeStatementRecord),
    Error(ErrorResult),
}

impl ValidationOutcome {
    pub fn document_identifier(&self) -> &str {
        match self {
            ValidationOutcome::Record(record) => &record.provenance.file_name,
            ValidationOutcome::Error(error) => &error.document_identifier,
        }
    }

    pub fn as_record(&self) -> Option<&IncomeStatementRecord> {
        match self {
            ValidationOutcome::Record(record) => Some(record),
            ValidationOutcome::Error(_) => None,
        }
    }

    pub fn as_error(&self) -> Option<&ErrorResult> {
        match self {
            ValidationOutcome::Record(_) => None,
            ValidationOutcome::Error(error) => Some(error),
        }
    }

    /// JSON schema of one response entry, for publishing by the gateway.
    pub fn json_schema() -> schemars::schema::RootSchema {
        schemars::schema_for!(ValidationOutcome)
    }
}

impl From<IncomeStatementRecord> for ValidationOutcome {
    fn from(record: IncomeStatementRecord) -> Self {
        ValidationOutcome::Record(record)
    }
}

impl From<ErrorResult> for ValidationOutcome {
    fn from(error: ErrorResult) -> Self {
        ValidationOutcome::Error(error)
    }
}
