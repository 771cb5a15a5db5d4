use flow_core::protocol::{SolveError, SolveRequest, SolveResponse};

const DEFAULT_SOLVER_URL: &str = "http://127.0.0.1:3000";

fn solver_url() -> String {
    std::env::var("FLOW_SOLVER_URL").unwrap_or_else(|_| DEFAULT_SOLVER_URL.to_string())
}

/// HTTP client for the external solving service. One request per
/// solve, no retries; superseded requests are simply never read.
#[derive(Clone)]
pub struct SolverClient {
    http: reqwest::Client,
    base: String,
}

impl SolverClient {
    pub fn from_env() -> Self {
        Self::new(solver_url())
    }

    pub fn new(base: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base: base.into(),
        }
    }

    /// `POST {base}/solve`. Non-2xx and undecodable bodies are
    /// failures regardless of what the body claims.
    pub async fn solve(&self, req: &SolveRequest) -> Result<SolveResponse, SolveError> {
        let url = format!("{}/solve", self.base);
        let resp = self
            .http
            .post(&url)
            .json(req)
            .send()
            .await
            .map_err(|e| SolveError::Transport(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(SolveError::Status(status.as_u16()));
        }

        let body = resp
            .text()
            .await
            .map_err(|e| SolveError::Transport(e.to_string()))?;
        serde_json::from_str::<SolveResponse>(&body)
            .map_err(|e| SolveError::Decode(e.to_string()))
    }
}
