//! Payload validation for submission intake.
//!
//! Validation is all-or-nothing and runs on the raw request body before any
//! record is composed:
//! - Required string fields must be present and non-blank
//! - `sensorReadings` and `result` must be present objects
//! - Numeric fields, when present and non-null, must be finite numbers
//! - Attachment lists, when present, must be arrays of objects
//!
//! Anything deeper (vendor name, notes, attachment contents) is optional.

use serde_json::{Map, Value};

use super::{Result, SubmissionError};

/// A top-level field together with the legacy names it may arrive under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub aliases: &'static [&'static str],
}

impl FieldSpec {
    pub const fn new(name: &'static str, aliases: &'static [&'static str]) -> Self {
        Self { name, aliases }
    }

    /// First present, non-null value under the canonical name or an alias
    fn lookup<'a>(&self, obj: &'a Map<String, Value>) -> Option<&'a Value> {
        std::iter::once(self.name)
            .chain(self.aliases.iter().copied())
            .filter_map(|key| obj.get(key))
            .find(|v| !v.is_null())
    }
}

/// Typed rule set applied by [`PayloadValidator`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationRules {
    /// Fields that must be non-blank strings
    pub required_strings: Vec<FieldSpec>,
    /// Field holding the sensor channel map (every channel is numeric)
    pub sensor_readings: FieldSpec,
    /// Field holding the nested result object
    pub result: FieldSpec,
    /// Keys inside `result` that must be numeric when present
    pub numeric_result_fields: Vec<&'static str>,
    /// Keys inside each `result.lineItems` entry that must be numeric when present
    pub numeric_line_item_fields: Vec<&'static str>,
    /// Keys inside `result.media` that must be attachment arrays when present
    pub media_lists: Vec<&'static str>,
}

impl Default for ValidationRules {
    fn default() -> Self {
        Self {
            required_strings: vec![
                FieldSpec::new("submitterId", &["engineerId"]),
                FieldSpec::new("siteId", &["warehouseId"]),
                FieldSpec::new("location", &[]),
            ],
            sensor_readings: FieldSpec::new("sensorReadings", &["sensorData"]),
            result: FieldSpec::new("result", &[]),
            numeric_result_fields: vec!["quantity"],
            numeric_line_item_fields: vec!["quantity", "unitPrice", "total"],
            media_lists: vec!["photos", "videos"],
        }
    }
}

/// Checks the acceptance predicate for a submission payload.
#[derive(Debug, Clone, Default)]
pub struct PayloadValidator {
    rules: ValidationRules,
}

impl PayloadValidator {
    pub fn new(rules: ValidationRules) -> Self {
        Self { rules }
    }

    /// Validate a raw payload.
    ///
    /// Missing fields are reported before shape errors so that a payload
    /// lacking several fields always yields [`SubmissionError::MissingField`].
    pub fn validate(&self, payload: &Value) -> Result<()> {
        let obj = payload.as_object().ok_or_else(|| {
            SubmissionError::InvalidPayload("expected a JSON object".to_string())
        })?;

        self.check_presence(obj)?;

        for spec in &self.rules.required_strings {
            if let Some(value) = spec.lookup(obj) {
                check_string(spec.name, value)?;
            }
        }

        let sensors = spec_object(&self.rules.sensor_readings, obj)?;
        for (channel, reading) in sensors {
            check_number(&format!("{}.{}", self.rules.sensor_readings.name, channel), reading)?;
        }

        let result = spec_object(&self.rules.result, obj)?;
        self.check_result(self.rules.result.name, result)
    }

    /// Rewrite legacy field names to their canonical names.
    ///
    /// For each field the value [`validate`](Self::validate) looked at (the
    /// first non-null one, canonical name first) moves to the canonical key
    /// and every alias key is dropped, so a body carrying both `submitterId`
    /// and `engineerId` decodes to a single field.
    pub fn resolve_aliases(&self, mut payload: Value) -> Value {
        if let Some(obj) = payload.as_object_mut() {
            let specs = self
                .rules
                .required_strings
                .iter()
                .chain([&self.rules.sensor_readings, &self.rules.result]);

            for spec in specs.filter(|spec| !spec.aliases.is_empty()) {
                let resolved = spec.lookup(obj).cloned();
                for alias in spec.aliases {
                    obj.remove(*alias);
                }
                if let Some(value) = resolved {
                    obj.insert(spec.name.to_string(), value);
                }
            }
        }
        payload
    }

    fn check_presence(&self, obj: &Map<String, Value>) -> Result<()> {
        let specs = self
            .rules
            .required_strings
            .iter()
            .chain([&self.rules.sensor_readings, &self.rules.result]);

        for spec in specs {
            match spec.lookup(obj) {
                None => return Err(SubmissionError::MissingField(spec.name.to_string())),
                Some(Value::String(s)) if s.trim().is_empty() => {
                    return Err(SubmissionError::MissingField(spec.name.to_string()))
                }
                Some(_) => {}
            }
        }
        Ok(())
    }

    fn check_result(&self, path: &str, result: &Map<String, Value>) -> Result<()> {
        for key in &self.rules.numeric_result_fields {
            if let Some(value) = result.get(*key) {
                check_number(&format!("{path}.{key}"), value)?;
            }
        }

        match result.get("lineItems") {
            None | Some(Value::Null) => {}
            Some(Value::Array(items)) => {
                for (idx, item) in items.iter().enumerate() {
                    let item_path = format!("{path}.lineItems[{idx}]");
                    let item = item.as_object().ok_or_else(|| {
                        SubmissionError::invalid_field(
                            &item_path,
                            format!("Invalid line item at {item_path}"),
                        )
                    })?;
                    for key in &self.rules.numeric_line_item_fields {
                        if let Some(value) = item.get(*key) {
                            check_number(&format!("{item_path}.{key}"), value)?;
                        }
                    }
                }
            }
            Some(_) => {
                let field = format!("{path}.lineItems");
                return Err(SubmissionError::invalid_field(
                    &field,
                    format!("{field} must be an array"),
                ));
            }
        }

        match result.get("media") {
            None | Some(Value::Null) => Ok(()),
            Some(Value::Object(media)) => {
                for key in &self.rules.media_lists {
                    check_attachments(&format!("{path}.media.{key}"), media.get(*key))?;
                }
                Ok(())
            }
            Some(_) => {
                let field = format!("{path}.media");
                Err(SubmissionError::invalid_field(
                    &field,
                    format!("{field} must be an object"),
                ))
            }
        }
    }
}

fn spec_object<'a>(spec: &FieldSpec, obj: &'a Map<String, Value>) -> Result<&'a Map<String, Value>> {
    spec.lookup(obj)
        .ok_or_else(|| SubmissionError::MissingField(spec.name.to_string()))?
        .as_object()
        .ok_or_else(|| {
            SubmissionError::invalid_field(spec.name, format!("{} must be an object", spec.name))
        })
}

fn check_string(field: &str, value: &Value) -> Result<()> {
    match value {
        Value::String(_) => Ok(()),
        _ => Err(SubmissionError::invalid_field(
            field,
            format!("{field} must be a string"),
        )),
    }
}

/// `null` is an absent reading; anything else must be a finite number.
fn check_number(field: &str, value: &Value) -> Result<()> {
    match value {
        Value::Null => Ok(()),
        Value::Number(n) if n.as_f64().is_some_and(f64::is_finite) => Ok(()),
        _ => Err(SubmissionError::invalid_field(
            field,
            format!("Invalid numeric value for {field}"),
        )),
    }
}

fn check_attachments(field: &str, value: Option<&Value>) -> Result<()> {
    match value {
        None | Some(Value::Null) => Ok(()),
        Some(Value::Array(items)) if items.iter().all(Value::is_object) => Ok(()),
        Some(_) => Err(SubmissionError::invalid_field(
            field,
            format!("Invalid attachment list for {field}"),
        )),
    }
}
