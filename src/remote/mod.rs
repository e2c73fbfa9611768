//! # Remote Check Delegation
//!
//! Server-free path to the review service: instead of sending results to a
//! review server, the caller talks to the code host directly through an
//! externally configured API client.
//!
//! ## Overview
//!
//! - [`CheckClient`] - what callers use: one `check` per request
//! - [`DirectClient`] - builds a [`Checker`] for each request and delegates to it
//! - [`CheckerFactory`] - builds checkers; any `Fn(CheckRequest, Arc<A>) -> C` qualifies
//!
//! `DirectClient` holds no state besides the API client and the factory, never
//! retries, and returns the checker's error unchanged as
//! [`LintaggError::Delegate`]. Cancelling the token drops the checker future,
//! which aborts whatever network call it was waiting on.
//!
//! ```rust,ignore
//! let client = DirectClient::new(Arc::new(github), GitHubChecker::new);
//! let cancel = CancellationToken::new();
//! let response = client.check(&cancel, request).await?;
//! ```

mod types;

pub use types::{CheckRequest, CheckResponse, FilterMode};

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;
use tracing::{debug, instrument};

use crate::config::RemoteConfig;
use crate::error::{LintaggError, Result};

// ============================================================================
// TRAITS
// ============================================================================

/// One check computation bound to a request and an API client
#[async_trait]
pub trait Checker: Send + Sync {
    async fn check(&self) -> anyhow::Result<CheckResponse>;
}

/// Builds a [`Checker`] from a request and a shared API client
pub trait CheckerFactory<A>: Send + Sync {
    type Checker: Checker;

    fn new_checker(&self, req: CheckRequest, client: Arc<A>) -> Self::Checker;
}

impl<A, C, F> CheckerFactory<A> for F
where
    F: Fn(CheckRequest, Arc<A>) -> C + Send + Sync,
    C: Checker,
{
    type Checker = C;

    fn new_checker(&self, req: CheckRequest, client: Arc<A>) -> C {
        self(req, client)
    }
}

/// Entry point for callers that need a remote check
#[async_trait]
pub trait CheckClient: Send + Sync {
    /// Run one check; cancelling `cancel` aborts it with [`LintaggError::Cancelled`]
    async fn check(&self, cancel: &CancellationToken, req: CheckRequest) -> Result<CheckResponse>;
}

// ============================================================================
// DIRECT CLIENT
// ============================================================================

/// Talks to the code host directly instead of going through a review server
pub struct DirectClient<A, F> {
    client: Arc<A>,
    factory: F,
    timeout: Option<Duration>,
}

impl<A, F> DirectClient<A, F>
where
    A: Send + Sync + 'static,
    F: CheckerFactory<A>,
{
    pub fn new(client: Arc<A>, factory: F) -> Self {
        Self {
            client,
            factory,
            timeout: None,
        }
    }

    pub fn from_config(client: Arc<A>, factory: F, config: &RemoteConfig) -> Self {
        Self::new(client, factory).with_timeout(config.timeout())
    }

    /// Deadline for each check; `None` waits until cancelled
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn client(&self) -> &Arc<A> {
        &self.client
    }

    async fn delegate(&self, req: CheckRequest) -> Result<CheckResponse> {
        let checker = self.factory.new_checker(req, Arc::clone(&self.client));

        match self.timeout {
            Some(limit) => match tokio::time::timeout(limit, checker.check()).await {
                Ok(result) => result.map_err(LintaggError::Delegate),
                Err(_) => Err(LintaggError::TimedOut {
                    timeout_ms: u64::try_from(limit.as_millis()).unwrap_or(u64::MAX),
                }),
            },
            None => checker.check().await.map_err(LintaggError::Delegate),
        }
    }
}

#[async_trait]
impl<A, F> CheckClient for DirectClient<A, F>
where
    A: Send + Sync + 'static,
    F: CheckerFactory<A>,
{
    #[instrument(skip_all, fields(check = %req.name, repo = %req.repo_slug(), sha = %req.sha))]
    async fn check(&self, cancel: &CancellationToken, req: CheckRequest) -> Result<CheckResponse> {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                debug!("check cancelled");
                Err(LintaggError::Cancelled)
            }
            result = self.delegate(req) => result,
        }
    }
}
