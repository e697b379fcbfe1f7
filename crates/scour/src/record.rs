use serde::Serialize;

/// Tolerant-mode approval status: APPROVED iff both the identifier and the
/// amount resolved to non-null.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    Approved,
    Rejected,
}

/// Output shape of the structured-labeled grammar.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogRecord {
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(rename = "Name")]
    pub name: Option<String>,
    #[serde(rename = "Price")]
    pub price: Option<f64>,
    /// Never absent in output: null normalizes to 0.
    #[serde(rename = "Stock")]
    pub stock: i64,
}

/// Output shape of the tolerant-positional grammar. The amount keeps its
/// normalized textual form (dot decimal separator).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReceiptRecord {
    pub id: String,
    pub amount: Option<String>,
    pub status: Status,
}

/// Final structured value, one per accepted raw line.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SanitizedRecord {
    Catalog(CatalogRecord),
    Receipt(ReceiptRecord),
}
