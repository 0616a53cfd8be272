//! Outbound interface to the host monitoring system.
//!
//! The collector hands every classified observation to a [`MetricSink`]
//! one call at a time. The shipped implementation speaks the collectd
//! exec-plugin protocol: one `PUTVAL` line per metric on stdout, with
//! `N:` (now) as the timestamp.

use std::fmt::Write as _;

use crate::metrics::{MetricDescriptor, PLUGIN_NAME};

pub trait MetricSink {
    fn report(&mut self, host: &str, metric: &MetricDescriptor);
}

/// Writes collectd `PUTVAL` lines to stdout.
pub struct PutvalSink {
    /// Advertised collection interval, forwarded to collectd so it can
    /// detect missed cycles.
    pub interval_seconds: u64,
}

impl PutvalSink {
    pub fn new(interval_seconds: u64) -> Self {
        Self { interval_seconds }
    }

    /// The collectd value identifier:
    /// `host/plugin[-plugin_instance]/type-type_instance`.
    fn identifier(host: &str, metric: &MetricDescriptor) -> String {
        let mut id = String::new();
        let _ = write!(id, "{}/{}", host, PLUGIN_NAME);
        if let Some(instance) = &metric.plugin_instance {
            let _ = write!(id, "-{}", instance);
        }
        let _ = write!(id, "/{}-{}", metric.kind, metric.type_instance);
        id
    }

    fn render(&self, host: &str, metric: &MetricDescriptor) -> String {
        format!(
            "PUTVAL \"{}\" interval={} N:{}",
            Self::identifier(host, metric),
            self.interval_seconds,
            metric.value
        )
    }
}

impl MetricSink for PutvalSink {
    fn report(&mut self, host: &str, metric: &MetricDescriptor) {
        println!("{}", self.render(host, metric));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::{MetricKind, MetricValue};

    #[test]
    fn putval_line_has_full_identifier() {
        let sink = PutvalSink::new(60);
        let metric = MetricDescriptor::new(
            Some("Disk"),
            MetricKind::DiskOpsComplex,
            Some("iops"),
            "disk_1.1",
            MetricValue::Raw("250".into()),
        );
        assert_eq!(
            sink.render("array-1", &metric),
            "PUTVAL \"array-1/P2000-Disk/disk_ops_complex-iops-disk_1_1\" interval=60 N:250"
        );
    }

    #[test]
    fn plugin_instance_is_omitted_when_absent() {
        let sink = PutvalSink::new(10);
        let metric = MetricDescriptor::new(
            None,
            MetricKind::Temperature,
            Some("3"),
            "current-value",
            MetricValue::Float(12.5),
        );
        assert_eq!(
            sink.render("array-1", &metric),
            "PUTVAL \"array-1/P2000/temperature-3-current_value\" interval=10 N:12.5"
        );
    }
}
