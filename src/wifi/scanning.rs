use crate::remediation::ScanTrigger;
use crate::wifi::types::WorkSource;

/// Scan trigger for hosts without a connectivity manager: records the request only
#[derive(Debug, Default)]
pub struct LoggingScanTrigger;

impl ScanTrigger for LoggingScanTrigger {
    fn request_scan(&self, source: &WorkSource) {
        tracing::info!(uid = source.uid.0, tag = source.tag, "connectivity scan requested");
    }
}
