//! Dashboard pipeline orchestration.
//!
//! One run fetches fresh sources from the upstream QC API and derives the
//! full render model: stat panel (all-time), trend chart (time-windowed),
//! and activity feed. Runs are stamped with a monotonically increasing
//! generation; only a result newer than the last applied one may replace
//! the cached sources, so a slow in-flight refresh racing a newer one can
//! never overwrite fresher data.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::RwLock;

use crate::errors::AppError;
use crate::services::activity::{self, ActivityEntry};
use crate::services::stats::{self, QualityStats};
use crate::services::timeline::{self, DateBucket, TimeWindow};
use crate::upstream::{DashboardSources, UpstreamClient};

/// Render model consumed by the view layer.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardModel {
    pub stats: QualityStats,
    pub trend: Vec<DateBucket>,
    pub activity: Vec<ActivityEntry>,
    pub window: TimeWindow,
    pub generated_at: DateTime<Utc>,
    /// True when built from last-good sources after a failed refresh.
    pub stale: bool,
}

/// Derive the render model from one set of sources. Stats cover the
/// unfiltered inspection set; only the trend chart is windowed.
pub fn derive_model(
    sources: &DashboardSources,
    window: TimeWindow,
    now: DateTime<Utc>,
    stale: bool,
) -> DashboardModel {
    let filtered = timeline::filter_by_window(&sources.inspections, window, now);
    DashboardModel {
        stats: stats::compute(&sources.inspections, &sources.defects),
        trend: timeline::bucket_by_date(&filtered),
        activity: activity::build_activity(sources, now),
        window,
        generated_at: now,
        stale,
    }
}

/// Last-good sources plus the generation that produced them.
#[derive(Debug, Default)]
pub struct SourceCache {
    next_generation: AtomicU64,
    applied: RwLock<Option<AppliedSources>>,
}

#[derive(Debug)]
struct AppliedSources {
    generation: u64,
    sources: Arc<DashboardSources>,
}

impl SourceCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take a generation ticket for a new run.
    pub fn begin_run(&self) -> u64 {
        self.next_generation.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// Apply a run's sources unless a newer generation already landed.
    /// Returns whichever sources are current afterwards.
    pub async fn apply(&self, generation: u64, sources: DashboardSources) -> Arc<DashboardSources> {
        let mut applied = self.applied.write().await;
        match applied.as_ref() {
            Some(current) if current.generation >= generation => {
                tracing::debug!(
                    generation,
                    applied = current.generation,
                    "Discarding refresh result outrun by a newer one"
                );
                current.sources.clone()
            }
            _ => {
                let sources = Arc::new(sources);
                *applied = Some(AppliedSources {
                    generation,
                    sources: sources.clone(),
                });
                sources
            }
        }
    }

    pub async fn last_good(&self) -> Option<Arc<DashboardSources>> {
        self.applied.read().await.as_ref().map(|a| a.sources.clone())
    }
}

/// Run the pipeline once for the requested window.
///
/// On a fatal fetch failure the last-good sources are re-rendered with
/// `stale: true` so the view keeps its data on screen; with nothing
/// cached the error surfaces to the caller.
pub async fn run(
    client: &UpstreamClient,
    cache: &SourceCache,
    window: TimeWindow,
) -> Result<DashboardModel, AppError> {
    let generation = cache.begin_run();
    match client.fetch_sources().await {
        Ok(sources) => {
            let sources = cache.apply(generation, sources).await;
            Ok(derive_model(&sources, window, Utc::now(), false))
        }
        Err(e) => match cache.last_good().await {
            Some(sources) => {
                tracing::error!(error = %e, "Refresh failed, serving last-good snapshot");
                Ok(derive_model(&sources, window, Utc::now(), true))
            }
            None => Err(e),
        },
    }
}
