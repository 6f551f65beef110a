//! HTTP client for the upstream QC CRUD backend.
//!
//! Fetch policy per collection:
//! - inspections are required; a failure aborts the pipeline run,
//! - products and users are optional; a failure degrades to an empty list,
//! - defects come from `GET /defects/{inspectionId}` per inspection (the
//!   upstream guarantees no bulk endpoint); a failing per-inspection fetch
//!   means zero defects for that inspection only.

use std::collections::HashSet;

use serde::de::DeserializeOwned;
use tokio::task::JoinSet;

use crate::errors::AppError;
use crate::models::defect::Defect;
use crate::models::inspection::Inspection;
use crate::models::product::Product;
use crate::models::user::User;

/// All collections one dashboard run needs, fetched fresh each run.
#[derive(Debug, Clone, Default)]
pub struct DashboardSources {
    pub inspections: Vec<Inspection>,
    pub products: Vec<Product>,
    pub users: Vec<User>,
    pub defects: Vec<Defect>,
}

#[derive(Debug, Clone)]
pub struct UpstreamClient {
    http: reqwest::Client,
    base_url: String,
}

impl UpstreamClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, reqwest::Error> {
        self.http
            .get(format!("{}/{}", self.base_url, path))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
    }

    /// Required fetch: the pipeline cannot run without inspections.
    pub async fn inspections(&self) -> Result<Vec<Inspection>, AppError> {
        Ok(self.get_json("inspections").await?)
    }

    /// Optional fetch: a failure leaves activity entries without product
    /// names but never blocks the run.
    pub async fn products(&self) -> Vec<Product> {
        match self.get_json("products").await {
            Ok(products) => products,
            Err(e) => {
                tracing::warn!(error = %e, "Could not fetch products, continuing without");
                Vec::new()
            }
        }
    }

    /// Optional fetch, same policy as [`Self::products`].
    pub async fn users(&self) -> Vec<User> {
        match self.get_json("users").await {
            Ok(users) => users,
            Err(e) => {
                tracing::warn!(error = %e, "Could not fetch users, continuing without");
                Vec::new()
            }
        }
    }

    /// Defects for one inspection; a failure counts as zero defects.
    pub async fn defects_for(&self, inspection_id: i64) -> Vec<Defect> {
        match self.get_json(&format!("defects/{inspection_id}")).await {
            Ok(defects) => defects,
            Err(e) => {
                tracing::warn!(
                    inspection_id,
                    error = %e,
                    "Defect fetch failed, treating as zero defects"
                );
                Vec::new()
            }
        }
    }

    /// Fetch all four collections for one run. Products and users run
    /// concurrently; the per-inspection defect fetches all run
    /// concurrently (unbounded, acceptable at expected data volumes).
    pub async fn fetch_sources(&self) -> Result<DashboardSources, AppError> {
        let inspections = self.inspections().await?;
        tracing::debug!(count = inspections.len(), "Fetched inspections");

        let (products, users) = tokio::join!(self.products(), self.users());

        let mut tasks = JoinSet::new();
        for inspection_id in inspections.iter().map(|i| i.id) {
            let client = self.clone();
            tasks.spawn(async move { client.defects_for(inspection_id).await });
        }
        let mut batches = Vec::new();
        while let Some(joined) = tasks.join_next().await {
            batches.push(joined.unwrap_or_default());
        }
        let defects = dedup_by_id(batches);

        Ok(DashboardSources {
            inspections,
            products,
            users,
            defects,
        })
    }
}

/// Merge per-inspection defect batches, keeping the first record seen for
/// each defect id. Output is sorted by id so concurrent completion order
/// does not leak into the result.
fn dedup_by_id(batches: Vec<Vec<Defect>>) -> Vec<Defect> {
    let mut seen = HashSet::new();
    let mut defects: Vec<Defect> = batches
        .into_iter()
        .flatten()
        .filter(|d| seen.insert(d.id))
        .collect();
    defects.sort_by_key(|d| d.id);
    defects
}

#[cfg(test)]
mod tests {
    use super::*;

    fn defect(id: i64, inspection_id: i64) -> Defect {
        Defect {
            id,
            inspection_id,
            defect_type: "Scratch".to_string(),
            description: None,
            severity: None,
        }
    }

    #[test]
    fn dedup_drops_overlapping_ids_across_batches() {
        let merged = dedup_by_id(vec![
            vec![defect(3, 1), defect(1, 1)],
            vec![defect(3, 2), defect(2, 2)],
        ]);
        let ids: Vec<i64> = merged.iter().map(|d| d.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn dedup_of_empty_batches_is_empty() {
        assert!(dedup_by_id(vec![vec![], vec![]]).is_empty());
    }

    #[test]
    fn base_url_trailing_slash_is_normalized() {
        let client = UpstreamClient::new("http://localhost:5000/api/");
        assert_eq!(client.base_url, "http://localhost:5000/api");
    }
}
