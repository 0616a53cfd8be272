//! Polling orchestrator.
//!
//! One poll cycle is strictly sequential: login, then each enabled
//! document fetch + classification in a fixed order, then logout. A
//! transport or parse failure aborts the remaining steps of the cycle;
//! metrics already handed to the sink are not retracted. The next
//! scheduled cycle is the retry mechanism - there are no internal
//! retries.

use tracing::{debug, info, warn};

use crate::classify::{self, statistics};
use crate::config::{Config, PollConfig};
use crate::error::{CollectorError, Result};
use crate::metrics::MetricDescriptor;
use crate::p2000::SessionClient;
use crate::sink::MetricSink;

/// Owns one session client and the per-document enable flags.
/// Constructed from configuration at startup, reused across cycles,
/// dropped at shutdown. One poller per configured array target; not
/// safe for overlapping cycles.
pub struct Poller {
    client: SessionClient,
    poll: PollConfig,
    host: String,
}

impl Poller {
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            client: SessionClient::new(config.array.clone())?,
            poll: config.poll.clone(),
            host: config.array.host.clone(),
        })
    }

    /// Run one poll cycle, forwarding every classified metric to the
    /// sink. Returns the number of metrics dispatched.
    ///
    /// A login refusal is deliberately non-fatal: the cycle continues
    /// without a session cookie and the array decides what an
    /// unauthenticated caller may see. Permissive, but it matches the
    /// array's own behavior and is called out at warn level.
    pub async fn run_cycle(&mut self, sink: &mut dyn MetricSink) -> Result<usize> {
        match self.client.login().await {
            Ok(()) => info!("Authenticated to array"),
            Err(CollectorError::Auth(reason)) => {
                warn!("Login refused, continuing unauthenticated: {}", reason);
            }
            Err(e) => return Err(e),
        }

        let mut reported = 0;

        if self.poll.enclosure_info {
            let doc = self.client.call("show/enclosure-status").await?;
            reported += self.dispatch(classify::classify_enclosure_status(&doc)?, sink);
        }
        if self.poll.controller_info {
            let doc = self.client.call("show/controller-statistics").await?;
            reported += self.dispatch(
                classify::classify_statistics(&doc, &statistics::CONTROLLER),
                sink,
            );
        }
        if self.poll.disk_info {
            let doc = self.client.call("show/disk-statistics").await?;
            reported += self.dispatch(classify::classify_statistics(&doc, &statistics::DISK), sink);
        }
        if self.poll.vdisk_info {
            let doc = self.client.call("show/vdisk-statistics").await?;
            reported +=
                self.dispatch(classify::classify_statistics(&doc, &statistics::VDISK), sink);
        }
        if self.poll.vol_info {
            let doc = self.client.call("show/volume-statistics").await?;
            reported += self.dispatch(
                classify::classify_statistics(&doc, &statistics::VOLUME),
                sink,
            );
        }

        self.client.logout().await;

        info!(metrics = reported, "Poll cycle complete");
        Ok(reported)
    }

    fn dispatch(&self, metrics: Vec<MetricDescriptor>, sink: &mut dyn MetricSink) -> usize {
        let count = metrics.len();
        for metric in metrics {
            if self.poll.verbose {
                debug!(
                    kind = metric.kind.as_str(),
                    type_instance = %metric.type_instance,
                    value = %metric.value,
                    "dispatching metric"
                );
            }
            sink.report(&self.host, &metric);
        }
        count
    }
}
