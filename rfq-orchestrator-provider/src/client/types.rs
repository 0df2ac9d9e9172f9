//! Response envelopes of the procurement API

use serde::Deserialize;

use crate::types::RfqReceipt;

/// `{ "data": [...], "total": n }`. Older list endpoints answer with `rows`.
#[derive(Debug, Deserialize)]
pub struct CatalogEnvelope<T> {
    #[serde(alias = "rows", default = "Vec::new")]
    pub data: Vec<T>,
    #[serde(default, alias = "count")]
    pub total: u32,
}

/// Create/update answers either with the receipt itself or wrapped in `data`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ReceiptEnvelope {
    Wrapped { data: RfqReceipt },
    Bare(RfqReceipt),
}

impl ReceiptEnvelope {
    pub fn into_receipt(self) -> RfqReceipt {
        match self {
            Self::Wrapped { data } | Self::Bare(data) => data,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Vendor;

    #[test]
    fn catalog_envelope_accepts_rows_alias() {
        let json = r#"{"rows":[{"id":"v1","name":"Acme","email":"a@acme.test","vendorCode":"AC","status":"active"}],"count":41}"#;
        let env: CatalogEnvelope<Vendor> = serde_json::from_str(json).unwrap();
        assert_eq!(env.data.len(), 1);
        assert_eq!(env.total, 41);
        assert_eq!(env.data[0].preferred, None);
    }

    #[test]
    fn catalog_envelope_tolerates_empty_result() {
        let env: CatalogEnvelope<Vendor> = serde_json::from_str(r#"{"total":0}"#).unwrap();
        assert!(env.data.is_empty());
        assert_eq!(env.total, 0);
    }

    #[test]
    fn receipt_envelope_both_shapes() {
        let wrapped: ReceiptEnvelope =
            serde_json::from_str(r#"{"data":{"id":"r1","rfqNumber":"RFQ-0001"}}"#).unwrap();
        assert_eq!(wrapped.into_receipt().rfq_number.as_deref(), Some("RFQ-0001"));

        let bare: ReceiptEnvelope = serde_json::from_str(r#"{"id":"r2"}"#).unwrap();
        assert_eq!(bare.into_receipt().id, "r2");
    }
}
