//! 在途请求跟踪
//!
//! 每个视图持有一个跟踪器，所有网络请求都以唯一 ID 登记在其中。
//! `cancel_all` 让在途请求以 `Cancelled` 结束，请求 future 被丢弃时自动注销，
//! 两种情况下结果都不会写回视图状态。

use std::future::Future;

use dashmap::DashMap;
use futures_util::future::{AbortHandle, Abortable};
use tracing::debug;
use uuid::Uuid;

use crate::errors::{PortalError, Result};

// 请求 future 完成或被丢弃时注销
struct Registration<'a> {
    tracker: &'a RequestTracker,
    id: Uuid,
}

impl Drop for Registration<'_> {
    fn drop(&mut self) {
        self.tracker.in_flight.remove(&self.id);
    }
}

#[derive(Debug, Default)]
pub struct RequestTracker {
    in_flight: DashMap<Uuid, (String, AbortHandle)>,
}

impl RequestTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// 以可取消的方式执行请求
    ///
    /// 被取消时返回 `Cancelled` 错误。
    pub async fn run<F, T>(&self, label: &str, request: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        let id = Uuid::new_v4();
        let (handle, registration) = AbortHandle::new_pair();
        self.in_flight.insert(id, (label.to_string(), handle));
        let _registered = Registration { tracker: self, id };
        debug!("Request {} ({}) started", label, id);

        let outcome = Abortable::new(request, registration).await;

        match outcome {
            Ok(result) => result,
            Err(_) => {
                debug!("Request {} ({}) was cancelled", label, id);
                Err(PortalError::cancelled(format!("{label} was cancelled")))
            }
        }
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight.len()
    }

    /// 在途请求的标签
    pub fn labels(&self) -> Vec<String> {
        self.in_flight
            .iter()
            .map(|entry| entry.value().0.clone())
            .collect()
    }

    /// 取消全部在途请求，返回取消的数量
    pub fn cancel_all(&self) -> usize {
        let mut cancelled = 0;
        self.in_flight.retain(|_, (label, handle)| {
            handle.abort();
            debug!("Cancelling request {}", label);
            cancelled += 1;
            false
        });
        cancelled
    }
}
