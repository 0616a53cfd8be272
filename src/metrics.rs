//! Metric descriptor types and series naming.
//!
//! A `MetricDescriptor` is the stable output contract of the collector:
//! a typed, named, valued record ready for dispatch to the host
//! monitoring system. Series identity is the sanitized `type_instance`
//! within `(host, plugin, type)`; sanitization replaces characters the
//! host's identifier syntax reserves (`-` and `.`) with underscores.

use std::fmt;

/// Plugin label stamped on every metric.
pub const PLUGIN_NAME: &str = "P2000";

/// The fixed enumeration of metric kinds the classifiers produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricKind {
    Temperature,
    Voltage,
    Counter,
    Operations,
    Bytes,
    DiskOpsComplex,
    Gauge,
    Percent,
}

impl MetricKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricKind::Temperature => "temperature",
            MetricKind::Voltage => "voltage",
            MetricKind::Counter => "counter",
            MetricKind::Operations => "operations",
            MetricKind::Bytes => "bytes",
            MetricKind::DiskOpsComplex => "disk_ops_complex",
            MetricKind::Gauge => "gauge",
            MetricKind::Percent => "percent",
        }
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single observation. Statistics fields are forwarded opaquely as
/// `Raw`; rejecting or coercing non-numeric text is the host
/// collector's responsibility. Only the enclosure additional-data
/// extraction produces a validated `Float`.
#[derive(Debug, Clone, PartialEq)]
pub enum MetricValue {
    Float(f64),
    Raw(String),
}

impl MetricValue {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            MetricValue::Float(v) => Some(*v),
            MetricValue::Raw(s) => s.parse().ok(),
        }
    }
}

impl fmt::Display for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricValue::Float(v) => write!(f, "{}", v),
            MetricValue::Raw(s) => f.write_str(s),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MetricDescriptor {
    /// Component class (`"Disk"`, `"Controller"`, ...), sanitized.
    /// Absent for enclosure environmental metrics.
    pub plugin_instance: Option<String>,
    pub kind: MetricKind,
    /// Sanitized composite key: `category-instance` when a category is
    /// present, else just the instance base. Unique per series within
    /// `(host, plugin, kind)`.
    pub type_instance: String,
    pub value: MetricValue,
}

impl MetricDescriptor {
    pub fn new(
        plugin_instance: Option<&str>,
        kind: MetricKind,
        type_category: Option<&str>,
        type_instance: &str,
        value: MetricValue,
    ) -> Self {
        let type_instance = match type_category {
            Some(category) => format!("{}-{}", sanitize(category), sanitize(type_instance)),
            None => sanitize(type_instance),
        };
        Self {
            plugin_instance: plugin_instance.map(|p| p.replace('-', "_")),
            kind,
            type_instance,
            value,
        }
    }
}

/// Replace `-` and `.` with `_`. Idempotent.
pub fn sanitize(part: &str) -> String {
    part.replace(['-', '.'], "_")
}
