//! Submission payloads and the records the ledger stores.
//!
//! A [`SubmissionPayload`] is everything the submitter supplies. A
//! [`SubmissionRecord`] wraps it with the server-assigned fields and is never
//! mutated after it has been appended.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::crypto::{integrity_hash, integrity_hashes_match};
use crate::infra::{Result, SubmissionError};

use super::{iso8601_millis, SubmissionId};

/// Named sensor channels (temperature, humidity, weight, ...) to a reading.
/// `None` marks a channel the submitter left empty. Readings keep the JSON
/// number exactly as submitted (`22` stays `22`).
pub type SensorReadings = BTreeMap<String, Option<serde_json::Number>>;

/// Submitter-supplied content of an inspection or invoice proof.
///
/// Aliases accept the field names used by the engineer-inspection form
/// (`engineerId`, `warehouseId`, `sensorData`). Server-assigned fields sent by
/// a client are ignored on deserialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionPayload {
    #[serde(alias = "engineerId")]
    pub submitter_id: String,

    #[serde(alias = "warehouseId")]
    pub site_id: String,

    pub location: String,

    #[serde(alias = "sensorData")]
    pub sensor_readings: SensorReadings,

    /// Domain fields kept as raw JSON so the record round-trips losslessly.
    /// Use [`SubmissionPayload::inspection_result`] for typed access.
    pub result: serde_json::Map<String, serde_json::Value>,
}

impl SubmissionPayload {
    /// Build a typed payload from a request body that already passed validation.
    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        serde_json::from_value(value).map_err(|e| SubmissionError::InvalidPayload(e.to_string()))
    }

    /// Canonical JSON value this payload is hashed over.
    pub fn to_canonical_value(&self) -> Result<serde_json::Value> {
        serde_json::to_value(self).map_err(|e| SubmissionError::Internal(e.to_string()))
    }

    /// Lowercase hex SHA-256 over the canonical encoding of this payload.
    pub fn integrity_hash(&self) -> Result<String> {
        integrity_hash(&self.to_canonical_value()?)
    }

    /// Typed view over `result`.
    pub fn inspection_result(&self) -> Result<InspectionResult> {
        InspectionResult::from_map(&self.result)
    }
}

/// An accepted, immutable submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionRecord {
    pub id: SubmissionId,

    #[serde(flatten)]
    pub payload: SubmissionPayload,

    /// Acceptance time, assigned server-side
    #[serde(with = "iso8601_millis")]
    pub timestamp: DateTime<Utc>,

    /// Always `true`; records have no update path
    pub locked: bool,

    /// Hex SHA-256 over the canonical payload
    pub integrity_hash: String,
}

impl SubmissionRecord {
    /// Compose a locked record from an accepted payload.
    pub fn new(
        id: SubmissionId,
        payload: SubmissionPayload,
        timestamp: DateTime<Utc>,
        integrity_hash: String,
    ) -> Self {
        Self {
            id,
            payload,
            timestamp,
            locked: true,
            integrity_hash,
        }
    }

    /// Recompute the payload hash and compare it with the stored one.
    pub fn verify(&self) -> Result<VerificationReport> {
        let recomputed_hash = self.payload.integrity_hash()?;
        Ok(VerificationReport {
            id: self.id.clone(),
            valid: integrity_hashes_match(&recomputed_hash, &self.integrity_hash),
            integrity_hash: self.integrity_hash.clone(),
            recomputed_hash,
        })
    }
}

/// Outcome of re-hashing a stored record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationReport {
    pub id: SubmissionId,
    pub integrity_hash: String,
    pub recomputed_hash: String,
    pub valid: bool,
}

/// Typed view of the `result` object.
///
/// Every field is optional; nested validation is lenient.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InspectionResult {
    pub raw_material: Option<String>,
    pub quantity: Option<f64>,
    pub quality: Option<String>,
    pub vendor: Option<VendorInfo>,
    pub notes: Option<String>,
    pub line_items: Option<Vec<LineItem>>,
    pub media: Option<MediaBundle>,
}

impl InspectionResult {
    pub fn from_map(map: &serde_json::Map<String, serde_json::Value>) -> Result<Self> {
        serde_json::from_value(serde_json::Value::Object(map.clone()))
            .map_err(|e| SubmissionError::InvalidPayload(e.to_string()))
    }

    /// Total number of photo and video attachments.
    pub fn attachment_count(&self) -> usize {
        self.media
            .as_ref()
            .map(|m| m.photos.len() + m.videos.len())
            .unwrap_or(0)
    }
}

/// Vendor contact details.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VendorInfo {
    pub name: Option<String>,
    pub contact: Option<String>,
}

/// Invoice line item.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub description: Option<String>,
    pub quantity: Option<f64>,
    pub unit_price: Option<f64>,
    pub total: Option<f64>,
}

/// Attachments grouped by kind.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MediaBundle {
    #[serde(default)]
    pub photos: Vec<Attachment>,
    #[serde(default)]
    pub videos: Vec<Attachment>,
}

/// A single attachment descriptor; `data` is the encoded content (usually a
/// data URL).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Attachment {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type", default)]
    pub mime_type: String,
    #[serde(default)]
    pub data: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_payload() -> serde_json::Value {
        json!({
            "submitterId": "E1",
            "siteId": "W1",
            "location": "Pune",
            "sensorReadings": { "temperature": 22, "humidity": null },
            "result": {
                "rawMaterial": "Steel",
                "quantity": 40,
                "vendor": { "name": "Tata", "contact": "+91-20-0000" },
                "media": {
                    "photos": [{ "name": "dock.jpg", "type": "image/jpeg", "data": "data:image/jpeg;base64,AAAA" }],
                    "videos": []
                }
            }
        })
    }

    #[test]
    fn test_payload_from_value() {
        let payload = SubmissionPayload::from_value(sample_payload()).unwrap();
        assert_eq!(payload.submitter_id, "E1");
        assert_eq!(payload.site_id, "W1");
        assert_eq!(
            payload.sensor_readings.get("temperature"),
            Some(&Some(serde_json::Number::from(22)))
        );
        assert_eq!(payload.sensor_readings.get("humidity"), Some(&None));
    }

    #[test]
    fn test_payload_accepts_form_aliases() {
        let payload = SubmissionPayload::from_value(json!({
            "engineerId": "E1",
            "warehouseId": "W1",
            "location": "Pune",
            "sensorData": { "weight": 12.5 },
            "result": {}
        }))
        .unwrap();

        assert_eq!(payload.submitter_id, "E1");
        assert_eq!(payload.site_id, "W1");

        let value = payload.to_canonical_value().unwrap();
        assert!(value.get("submitterId").is_some());
        assert!(value.get("engineerId").is_none());
    }

    #[test]
    fn test_payload_ignores_server_fields() {
        let mut with_server_fields = sample_payload();
        with_server_fields["id"] = json!("INSP-forged");
        with_server_fields["locked"] = json!(false);
        with_server_fields["integrityHash"] = json!("00".repeat(32));

        let clean = SubmissionPayload::from_value(sample_payload()).unwrap();
        let noisy = SubmissionPayload::from_value(with_server_fields).unwrap();
        assert_eq!(clean, noisy);
        assert_eq!(clean.integrity_hash().unwrap(), noisy.integrity_hash().unwrap());
    }

    #[test]
    fn test_payload_hash_matches_raw_canonical_hash() {
        let raw = sample_payload();
        let payload = SubmissionPayload::from_value(raw.clone()).unwrap();
        assert_eq!(
            payload.integrity_hash().unwrap(),
            crate::crypto::integrity_hash(&raw).unwrap()
        );
    }

    #[test]
    fn test_inspection_result_view() {
        let payload = SubmissionPayload::from_value(sample_payload()).unwrap();
        let result = payload.inspection_result().unwrap();

        assert_eq!(result.raw_material.as_deref(), Some("Steel"));
        assert_eq!(result.quantity, Some(40.0));
        assert_eq!(
            result.vendor.as_ref().and_then(|v| v.name.as_deref()),
            Some("Tata")
        );
        assert_eq!(result.attachment_count(), 1);
    }

    #[test]
    fn test_line_items_view() {
        let result = InspectionResult::from_map(
            json!({
                "lineItems": [
                    { "description": "Coil", "quantity": 2, "unitPrice": 100, "total": 200 },
                    { "description": "Sheet", "quantity": 1, "unitPrice": 50.5, "total": 50.5 },
                    { "description": "Pending" }
                ]
            })
            .as_object()
            .unwrap(),
        )
        .unwrap();

        let items = result.line_items.as_ref().unwrap();
        assert_eq!(items.len(), 3);
        assert_eq!(items[1].unit_price, Some(50.5));
        assert_eq!(items[2].total, None);
        assert_eq!(result.attachment_count(), 0);
    }

    #[test]
    fn test_record_serialization_shape() {
        let payload = SubmissionPayload::from_value(sample_payload()).unwrap();
        let hash = payload.integrity_hash().unwrap();
        let timestamp = DateTime::parse_from_rfc3339("2026-10-19T08:15:30.123Z")
            .unwrap()
            .with_timezone(&Utc);
        let record = SubmissionRecord::new(SubmissionId::from("INSP-1-1"), payload, timestamp, hash);

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["id"], "INSP-1-1");
        assert_eq!(value["submitterId"], "E1");
        assert_eq!(value["timestamp"], "2026-10-19T08:15:30.123Z");
        assert_eq!(value["locked"], true);
        assert_eq!(value["integrityHash"].as_str().unwrap().len(), 64);

        let back: SubmissionRecord = serde_json::from_value(value).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn test_record_verify_detects_tampering() {
        let payload = SubmissionPayload::from_value(sample_payload()).unwrap();
        let hash = payload.integrity_hash().unwrap();
        let mut record =
            SubmissionRecord::new(SubmissionId::from("INSP-1-1"), payload, Utc::now(), hash);

        assert!(record.verify().unwrap().valid);

        record.payload.location = "Mumbai".to_string();
        let report = record.verify().unwrap();
        assert!(!report.valid);
        assert_ne!(report.integrity_hash, report.recomputed_hash);
    }

    #[test]
    fn test_record_echoes_sensor_numbers_exactly() {
        let raw = json!({
            "submitterId": "E1",
            "siteId": "W1",
            "location": "Pune",
            "sensorReadings": { "temperature": 22, "humidity": 61.5, "counter": 9007199254740993u64 },
            "result": {}
        });
        let payload = SubmissionPayload::from_value(raw.clone()).unwrap();
        let hash = payload.integrity_hash().unwrap();
        let record = SubmissionRecord::new(SubmissionId::from("INSP-1-1"), payload, Utc::now(), hash);

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["sensorReadings"], raw["sensorReadings"]);
        assert_eq!(
            serde_json::to_string(&value["sensorReadings"]).unwrap(),
            r#"{"counter":9007199254740993,"humidity":61.5,"temperature":22}"#
        );
        assert_eq!(
            record.integrity_hash,
            crate::crypto::integrity_hash(&raw).unwrap()
        );
    }
}
