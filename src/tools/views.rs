use futures::stream::{self, StreamExt};
use log::{info, warn};

use crate::client::IcodeClient;

/// Upper bound on detail requests in flight at once.
pub const MAX_IN_FLIGHT: usize = 64;

/// Outcome of an [`inflate_views`] run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ViewReport {
    pub requested: usize,
    pub succeeded: usize,
    pub failed: usize,
}

/// Requests the work detail `count` times with the view counter enabled.
///
/// Failed requests are logged and counted, they never abort the run.
pub async fn inflate_views(api: &IcodeClient, work_id: &str, count: usize) -> ViewReport {
    info!("Sending {count} views to {work_id}");

    let mut report = ViewReport {
        requested: count,
        ..ViewReport::default()
    };

    let mut results = stream::iter(0..count)
        .map(|_| api.get_work_detail(work_id, true))
        .buffer_unordered(MAX_IN_FLIGHT);

    while let Some(result) = results.next().await {
        match result {
            Ok(_) => report.succeeded += 1,
            Err(e) => {
                report.failed += 1;
                warn!("View request failed: {e}");
            }
        }
        let done = report.succeeded + report.failed;
        if done % 100 == 0 {
            info!("Views: {done}/{count}");
        }
    }

    info!(
        "Views done: {} ok, {} failed",
        report.succeeded, report.failed
    );
    report
}
