//! Client for the external meeting-point solver

use reqwest::{Client, Response};
use rendezvous_core::loading::{ErrorBody, RawGraph, RawSolveResponse, SolveRequest};
use rendezvous_core::loading::{graph_from_raw, solution_from_raw};
use rendezvous_core::{Error, RouteSolution, StaticGraph};

use crate::config::SolverConfig;

#[derive(Debug, Clone)]
pub struct SolverClient {
    http: Client,
    base_url: String,
}

impl SolverClient {
    pub fn new(config: &SolverConfig) -> Result<Self, Error> {
        let http = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| Error::Initialization(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// `GET /api/graph`
    ///
    /// # Errors
    ///
    /// Any failure is an [`Error::Initialization`].
    pub async fn fetch_graph(&self) -> Result<StaticGraph, Error> {
        let url = format!("{}/api/graph", self.base_url);
        tracing::info!("Loading graph data from {url}");

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| Error::Initialization(format!("Failed to load graph data: {e}")))?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::Initialization(format!(
                "Failed to load graph data: HTTP {status}"
            )));
        }
        let raw: RawGraph = response
            .json()
            .await
            .map_err(|e| Error::Initialization(format!("Failed to load graph data: {e}")))?;
        graph_from_raw(raw)
    }

    /// `POST /api/f2`
    ///
    /// # Errors
    ///
    /// Network failures, non-2xx replies and non-success payloads are all
    /// [`Error::Compute`].
    pub async fn solve(&self, request: &SolveRequest) -> Result<RouteSolution, Error> {
        let url = format!("{}/api/f2", self.base_url);
        tracing::debug!("Requesting meeting point for {:?}", request.people);

        let response = self
            .http
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| Error::Compute(e.to_string()))?;

        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }

        let raw: RawSolveResponse = response
            .json()
            .await
            .map_err(|e| Error::Compute(format!("malformed response: {e}")))?;
        solution_from_raw(raw)
    }
}

/// Uses the `detail` of an error body, falling back to the status line
async fn error_from_response(response: Response) -> Error {
    let status = response.status();
    let detail = response
        .json::<ErrorBody>()
        .await
        .ok()
        .and_then(|body| body.detail);
    Error::Compute(detail.unwrap_or_else(|| format!("HTTP {}", status.as_u16())))
}
