use serde::{Deserialize, Serialize};

/// One group from the outcome-type aggregation
///
/// The group key is the record's `outcome_type` value; records without the
/// field group under `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutcomeTypeCount {
    /// Grouped outcome type (the aggregation's `_id`)
    #[serde(rename = "_id")]
    pub outcome_type: Option<String>,
    /// Number of records in the group
    pub count: i64,
}
