// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Hotlink push parsing (`HLInfo` and `HLVal`).

use serde::Deserialize;
use serde_json::Value;

use crate::state::PointMetadata;
use crate::types::{ListEntry, PointId, PointType, PointValue, percent_decode};

/// Wire form of an `HLInfo` push.
///
/// Numeric fields are accepted as numbers or numeric strings, and
/// `writeable` as a boolean, a number or a string.
#[derive(Debug, Deserialize)]
pub(super) struct HotlinkInfo {
    path: PointId,
    #[serde(default)]
    name: String,
    #[serde(default)]
    unit: String,
    #[serde(default)]
    writeable: Value,
    #[serde(default)]
    min: Value,
    #[serde(default)]
    max: Value,
    #[serde(default)]
    step: Value,
    #[serde(rename = "type", default)]
    point_type: Option<String>,
    #[serde(rename = "listEntries", default)]
    list_entries: Option<Vec<WireListEntry>>,
}

#[derive(Debug, Deserialize)]
struct WireListEntry {
    #[serde(default)]
    value: Value,
    #[serde(default)]
    text: String,
}

impl From<HotlinkInfo> for PointMetadata {
    fn from(info: HotlinkInfo) -> Self {
        let list_entries: Option<Vec<ListEntry>> = info.list_entries.map(|entries| {
            entries
                .into_iter()
                .map(|entry| ListEntry::new(scalar_text(&entry.value), percent_decode(&entry.text)))
                .collect()
        });
        let has_entries = list_entries.as_ref().is_some_and(|entries| !entries.is_empty());

        Self {
            path: info.path,
            name: percent_decode(&info.name),
            unit: percent_decode(&info.unit),
            writeable: flag(&info.writeable),
            min: number(&info.min),
            max: number(&info.max),
            step: number(&info.step),
            point_type: PointType::from_wire(info.point_type.as_deref(), has_entries),
            list_entries,
        }
    }
}

/// Wire form of an `HLVal` push.
#[derive(Debug, Deserialize)]
pub(super) struct HotlinkValues {
    #[serde(default)]
    values: Vec<WireValue>,
}

#[derive(Debug, Deserialize)]
struct WireValue {
    #[serde(default)]
    path: Value,
    #[serde(default)]
    result: Value,
}

impl HotlinkValues {
    /// Decodes every entry; entries without a valid path are skipped.
    pub(super) fn into_updates(self) -> Vec<ValueUpdate> {
        self.values
            .into_iter()
            .filter_map(|value| {
                let path = match scalar_text(&value.path).parse::<PointId>() {
                    Ok(path) => path,
                    Err(e) => {
                        tracing::warn!(
                            path = %value.path,
                            error = %e,
                            "Skipping value with invalid path"
                        );
                        return None;
                    }
                };
                Some(ValueUpdate {
                    path,
                    value: PointValue::from_wire(&scalar_text(&value.result)),
                })
            })
            .collect()
    }
}

/// One `{path, result}` entry of an `HLVal` push, decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueUpdate {
    /// The point the value belongs to.
    pub path: PointId,
    /// The percent-decoded value.
    pub value: PointValue,
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn number(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().unwrap_or_default(),
        Value::String(text) => text.trim().parse().unwrap_or_default(),
        _ => 0.0,
    }
}

fn flag(value: &Value) -> bool {
    match value {
        Value::Bool(flag) => *flag,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => matches!(text.trim(), "1" | "true" | "True" | "TRUE"),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn info_is_decoded() {
        let info: HotlinkInfo = serde_json::from_value(json!({
            "command": "HLInfo",
            "path": "1.110.2.0",
            "name": "Vorlauf%20Soll",
            "unit": "%C2%B0C",
            "writeable": "1",
            "min": "20",
            "max": 60,
            "step": "0.5"
        }))
        .unwrap();
        let metadata = PointMetadata::from(info);

        assert_eq!(metadata.path, PointId::new(1, 110, 2, 0));
        assert_eq!(metadata.name, "Vorlauf Soll");
        assert_eq!(metadata.unit, "°C");
        assert!(metadata.writeable);
        assert!((metadata.min - 20.0).abs() < f64::EPSILON);
        assert!((metadata.max - 60.0).abs() < f64::EPSILON);
        assert!((metadata.step - 0.5).abs() < f64::EPSILON);
        assert_eq!(metadata.point_type, PointType::Numeric);
        assert!(metadata.list_entries.is_none());
    }

    #[test]
    fn list_entries_make_an_enumeration() {
        let info: HotlinkInfo = serde_json::from_value(json!({
            "path": "1.120.0.2",
            "name": "Betriebsart",
            "writeable": true,
            "listEntries": [
                {"value": 0, "text": "Aus"},
                {"value": "1", "text": "Automatik%20Betrieb"}
            ]
        }))
        .unwrap();
        let metadata = PointMetadata::from(info);

        assert_eq!(metadata.point_type, PointType::Enumeration);
        assert_eq!(
            metadata.list_entries,
            Some(vec![
                ListEntry::new("0", "Aus"),
                ListEntry::new("1", "Automatik Betrieb"),
            ])
        );
    }

    #[test]
    fn values_accept_strings_and_numbers() {
        let values: HotlinkValues = serde_json::from_value(json!({
            "values": [
                {"path": "1.110.2.0", "result": "42%2E5"},
                {"path": "1.110.3.0", "result": 50}
            ]
        }))
        .unwrap();
        let updates = values.into_updates();

        assert_eq!(updates[0].value.as_str(), "42.5");
        assert_eq!(updates[1].value.as_i64(), Some(50));
    }

    #[test]
    fn invalid_path_skips_only_its_entry() {
        let values: HotlinkValues = serde_json::from_value(json!({
            "values": [
                {"path": "1.110", "result": "1"},
                {"path": "1.110.2.0", "result": "50"},
                {"result": "2"}
            ]
        }))
        .unwrap();
        let updates = values.into_updates();

        assert_eq!(
            updates,
            [ValueUpdate {
                path: PointId::new(1, 110, 2, 0),
                value: PointValue::new("50"),
            }]
        );
    }
}
