use std::sync::Arc;

use tokio::signal;
use tracing::warn;

use crate::runtime::requests::RequestTracker;

/// 等待 Ctrl+C，然后取消全部在途请求
pub async fn listen_for_shutdown(tracker: Arc<RequestTracker>) {
    if let Err(e) = signal::ctrl_c().await {
        warn!("Failed to listen for Ctrl+C: {}", e);
        std::future::pending::<()>().await;
    }
    let cancelled = tracker.cancel_all();
    warn!(
        "Interrupt received, cancelled {} in-flight request(s)",
        cancelled
    );
}
