//! Statistics document classifier.
//!
//! The four statistics documents (controller, disk, vdisk, volume)
//! share one tree shape: a run of objects tagged with the document's
//! statistics class, each identified by a durable-id property and
//! carrying a flat set of counters and gauges. One algorithm handles
//! all four, parameterized by a [`StatisticsShape`].
//!
//! Field classification is a static dispatch table from property name
//! to `(kind, category source, instance source)`; property names absent
//! from the table are dropped.

use tracing::warn;

use crate::metrics::{MetricDescriptor, MetricKind, MetricValue};
use crate::p2000::Document;

/// Shape parameters for one statistics document.
pub struct StatisticsShape {
    /// Object tag selecting the statistics rows, e.g. `disk-statistics`.
    pub object_tag: &'static str,
    /// Property holding the series identity. The array is inconsistent
    /// here: `durable-id` for controllers and disks, `name` for vdisks,
    /// `volume-name` for volumes.
    pub durable_id_property: &'static str,
    /// Component class stamped as the plugin instance.
    pub class_label: &'static str,
}

pub const CONTROLLER: StatisticsShape = StatisticsShape {
    object_tag: "controller-statistics",
    durable_id_property: "durable-id",
    class_label: "Controller",
};

pub const DISK: StatisticsShape = StatisticsShape {
    object_tag: "disk-statistics",
    durable_id_property: "durable-id",
    class_label: "Disk",
};

pub const VDISK: StatisticsShape = StatisticsShape {
    object_tag: "vdisk-statistics",
    durable_id_property: "name",
    class_label: "VDisk",
};

pub const VOLUME: StatisticsShape = StatisticsShape {
    object_tag: "volume-statistics",
    durable_id_property: "volume-name",
    class_label: "Volume",
};

/// Which field of the row feeds a naming slot.
#[derive(Clone, Copy)]
enum KeySource {
    PropertyName,
    DurableId,
}

struct DispatchRule {
    kind: MetricKind,
    category: KeySource,
    instance: KeySource,
}

/// The classification table. Cumulative byte/hit counters key the
/// series by durable-id under a per-property category; per-device
/// gauges invert that so one device groups its error counts together.
fn dispatch_rule(property: &str) -> Option<DispatchRule> {
    use KeySource::{DurableId, PropertyName};

    let rule = |kind, category, instance| {
        Some(DispatchRule {
            kind,
            category,
            instance,
        })
    };

    match property {
        "data-written-numeric"
        | "data-read-numeric"
        | "write-cache-hits"
        | "write-cache-misses"
        | "read-cache-hits"
        | "read-cache-misses"
        | "small-destages"
        | "full-stripe-write-destages" => rule(MetricKind::Counter, PropertyName, DurableId),

        "read-ahead-operations" => rule(MetricKind::Operations, DurableId, PropertyName),

        "number-of-reads" | "number-of-writes" => rule(MetricKind::Counter, DurableId, PropertyName),

        "bytes-per-second-numeric" => rule(MetricKind::Bytes, PropertyName, DurableId),

        "iops" => rule(MetricKind::DiskOpsComplex, PropertyName, DurableId),

        "smart-count-1" | "smart-count-2"
        | "io-timeout-count-1" | "io-timeout-count-2"
        | "no-response-count-1" | "no-response-count-2"
        | "spinup-retry-count-1" | "spinup-retry-count-2"
        | "number-of-media-errors-1" | "number-of-media-errors-2"
        | "number-of-nonmedia-errors-1" | "number-of-nonmedia-errors-2"
        | "number-of-block-reassigns-1" | "number-of-block-reassigns-2"
        | "number-of-bad-blocks-1" | "number-of-bad-blocks-2" => {
            rule(MetricKind::Gauge, DurableId, PropertyName)
        }

        "write-cache-percent" => rule(MetricKind::Percent, DurableId, PropertyName),

        _ => None,
    }
}

/// Classify one statistics document into metric descriptors.
///
/// Values are forwarded opaquely as raw text; this layer does not
/// validate numeric-ness. A row missing its durable-id property cannot
/// name a series and is skipped with a warning.
pub fn classify_statistics(doc: &Document, shape: &StatisticsShape) -> Vec<MetricDescriptor> {
    let mut metrics = Vec::new();

    for obj in doc.objects_named(shape.object_tag) {
        let Some(durable_id) = obj.property(shape.durable_id_property) else {
            warn!(
                object = shape.object_tag,
                property = shape.durable_id_property,
                "statistics row missing its identity property, skipping"
            );
            continue;
        };

        for prop in &obj.properties {
            if prop.name == shape.durable_id_property {
                continue;
            }
            let Some(rule) = dispatch_rule(&prop.name) else {
                continue;
            };

            let pick = |source: KeySource| match source {
                KeySource::PropertyName => prop.name.as_str(),
                KeySource::DurableId => durable_id,
            };

            metrics.push(MetricDescriptor::new(
                Some(shape.class_label),
                rule.kind,
                Some(pick(rule.category)),
                pick(rule.instance),
                MetricValue::Raw(prop.text.clone()),
            ));
        }
    }

    metrics
}
