#[cfg(test)]
use crate::features::regions::models::Region;
#[cfg(test)]
use crate::features::regions::services::{RegionDirectory, StaticRegionDirectory};
#[cfg(test)]
use crate::features::regions::{RegionResult, SelectionEvent};

#[cfg(test)]
use async_trait::async_trait;
#[cfg(test)]
use axum::Router;
#[cfg(test)]
use std::collections::HashMap;
#[cfg(test)]
use std::time::Duration;
#[cfg(test)]
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

/// Serve `router` on an ephemeral local port and return its base URL
#[cfg(test)]
pub async fn spawn_api(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind test listener");
    let addr = listener.local_addr().expect("test listener address");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("test server");
    });
    format!("http://{}", addr)
}

#[cfg(test)]
pub fn event_channel() -> (
    UnboundedSender<SelectionEvent>,
    UnboundedReceiver<SelectionEvent>,
) {
    mpsc::unbounded_channel()
}

/// Everything the observer has received so far
#[cfg(test)]
pub fn drain_events(rx: &mut UnboundedReceiver<SelectionEvent>) -> Vec<SelectionEvent> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

/// Static directory whose answers take a configurable time per request kind
#[cfg(test)]
pub struct DelayedDirectory {
    inner: StaticRegionDirectory,
    province_delay: Duration,
    district_delays: HashMap<String, Duration>,
}

#[cfg(test)]
impl DelayedDirectory {
    pub fn new(inner: StaticRegionDirectory) -> Self {
        Self {
            inner,
            province_delay: Duration::ZERO,
            district_delays: HashMap::new(),
        }
    }

    pub fn with_province_delay(mut self, delay: Duration) -> Self {
        self.province_delay = delay;
        self
    }

    pub fn with_district_delay(mut self, province_code: &str, delay: Duration) -> Self {
        self.district_delays.insert(province_code.to_string(), delay);
        self
    }
}

#[cfg(test)]
#[async_trait]
impl RegionDirectory for DelayedDirectory {
    async fn list_provinces(&self) -> RegionResult<Vec<Region>> {
        tokio::time::sleep(self.province_delay).await;
        self.inner.list_provinces().await
    }

    async fn list_districts(&self, province_code: &str) -> RegionResult<Vec<Region>> {
        let delay = self
            .district_delays
            .get(province_code)
            .copied()
            .unwrap_or_default();
        tokio::time::sleep(delay).await;
        self.inner.list_districts(province_code).await
    }

    async fn resolve(&self, code: &str) -> RegionResult<Region> {
        self.inner.resolve(code).await
    }
}
