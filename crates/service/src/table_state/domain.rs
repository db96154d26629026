use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Save input. All three payloads are opaque strings serialized by the caller.
/// An absent field leaves the stored value untouched; creating the record
/// needs all three.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SaveTableState {
    pub data: Option<String>,
    pub col_widths: Option<String>,
    pub row_heights: Option<String>,
}

impl SaveTableState {
    pub fn new(data: impl Into<String>, col_widths: impl Into<String>, row_heights: impl Into<String>) -> Self {
        Self {
            data: Some(data.into()),
            col_widths: Some(col_widths.into()),
            row_heights: Some(row_heights.into()),
        }
    }

    /// Total payload size in bytes, for logging.
    pub fn payload_len(&self) -> usize {
        [&self.data, &self.col_widths, &self.row_heights]
            .iter()
            .map(|v| v.as_ref().map_or(0, String::len))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_stay_absent() {
        let input: SaveTableState = serde_json::from_str(r#"{"data":"[[1]]"}"#).unwrap();
        assert_eq!(input.data.as_deref(), Some("[[1]]"));
        assert_eq!(input.col_widths, None);
        assert_eq!(input.row_heights, None);
        assert_eq!(input.payload_len(), 5);
    }

    #[test]
    fn reads_camel_case_keys() {
        let input: SaveTableState =
            serde_json::from_str(r#"{"data":"d","colWidths":"w","rowHeights":"h"}"#).unwrap();
        assert_eq!(input, SaveTableState::new("d", "w", "h"));
        assert_eq!(input.payload_len(), 3);
    }

    #[test]
    fn rejects_non_string_payloads() {
        let res = serde_json::from_str::<SaveTableState>(r#"{"data":[[1,2]],"colWidths":"w","rowHeights":"h"}"#);
        assert!(res.is_err());
    }
}
