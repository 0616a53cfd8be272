//! Enclosure status classifier.
//!
//! Walks the `show/enclosure-status` document and emits temperature and
//! voltage readings for enclosure components. Everything else in the
//! document (fans, PSU state words, component status flags) is
//! deliberately filtered out, not forgotten: only `Temp` and `Voltage`
//! components carry a numeric `current-value` worth charting.

use tracing::{debug, warn};

use crate::error::{CollectorError, Result};
use crate::metrics::{MetricDescriptor, MetricKind, MetricValue};
use crate::p2000::Document;

/// Classify one enclosure-status document into metric descriptors.
///
/// `enclosure-environmental` objects only advance an enclosure counter
/// (kept for grouping; the reference emits no metric for them). Each
/// `enclosure-component` object carries a unit number, a unit type and
/// a set of readings; an `additional-data` reading whose text embeds a
/// `key=value` composite is renamed to `current-value` with the numeric
/// token after `=` extracted as the observation.
pub fn classify_enclosure_status(doc: &Document) -> Result<Vec<MetricDescriptor>> {
    let mut metrics = Vec::new();
    let mut enclosure_count = 0u32;

    for obj in &doc.objects {
        match obj.name.as_str() {
            "enclosure-environmental" => {
                // Next enclosure found.
                enclosure_count += 1;
            }
            "enclosure-component" => {
                let (Some(unit_number), Some(unit_type)) =
                    (obj.property("enclosure-unit-number"), obj.property("type"))
                else {
                    warn!(
                        object = %obj.name,
                        "enclosure-component missing unit number or type, skipping"
                    );
                    continue;
                };

                for prop in &obj.properties {
                    if prop.name == "enclosure-unit-number" || prop.name == "type" {
                        continue;
                    }

                    let (name, value) = if prop.name == "additional-data" && prop.text.contains('=')
                    {
                        ("current-value", additional_data_value(&prop.text)?)
                    } else {
                        (prop.name.as_str(), MetricValue::Raw(prop.text.clone()))
                    };

                    let kind = match (unit_type, name) {
                        ("Temp", "current-value") => MetricKind::Temperature,
                        ("Voltage", "current-value") => MetricKind::Voltage,
                        _ => continue,
                    };

                    metrics.push(MetricDescriptor::new(
                        None,
                        kind,
                        Some(unit_number),
                        name,
                        value,
                    ));
                }
            }
            _ => {}
        }
    }

    debug!(
        enclosures = enclosure_count,
        metrics = metrics.len(),
        "walked enclosure status"
    );
    Ok(metrics)
}

/// Extract the observation from an `additional-data` composite like
/// `"Temperature=12.5 C"`: the token after `=` up to the next
/// whitespace, parsed as a float.
fn additional_data_value(text: &str) -> Result<MetricValue> {
    let after = text.split('=').nth(1).unwrap_or("");
    let token = after.split_whitespace().next().unwrap_or("");
    token
        .parse::<f64>()
        .map(MetricValue::Float)
        .map_err(|_| CollectorError::ValueParse {
            property: "additional-data".into(),
            text: text.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_numeric_token_after_equals() {
        assert_eq!(
            additional_data_value("Temperature=12.5 C").unwrap(),
            MetricValue::Float(12.5)
        );
    }

    #[test]
    fn additional_data_without_equals_is_not_renamed() {
        let doc = Document {
            objects: vec![crate::p2000::Object {
                name: "enclosure-component".into(),
                properties: vec![
                    prop("enclosure-unit-number", "1"),
                    prop("type", "Temp"),
                    prop("additional-data", "not installed"),
                ],
            }],
        };
        // Without a composite there is no current-value, so nothing to emit
        assert!(classify_enclosure_status(&doc).unwrap().is_empty());
    }

    fn prop(name: &str, text: &str) -> crate::p2000::Property {
        crate::p2000::Property {
            name: name.into(),
            text: text.into(),
        }
    }

    #[test]
    fn non_numeric_token_is_a_value_parse_error() {
        let err = additional_data_value("State=charging now").unwrap_err();
        assert!(matches!(
            err,
            CollectorError::ValueParse { ref property, .. } if property == "additional-data"
        ));
    }
}
