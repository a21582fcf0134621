// Gitness API endpoint methods.
// Pull request read/update calls and registry lookup.

use crate::error::Result;
use crate::state::description::PullRequestUpdater;

use super::client::GitnessClient;
use super::types::{DataResponse, PullRequest, Registry, UpdatePullReqRequest};

/// Path of a pull request resource below the API root.
pub fn pull_request_path(repo_path: &str, number: u64) -> String {
    format!("/repos/{}/+/pullreq/{}", repo_path.trim_matches('/'), number)
}

/// Path of a registry resource below the API root.
pub fn registry_path(registry_ref: &str) -> String {
    format!("/registry/{}/+", registry_ref.trim_matches('/'))
}

impl GitnessClient {
    /// Get a single pull request.
    pub async fn get_pull_request(&self, repo_path: &str, number: u64) -> Result<PullRequest> {
        let response = self.get(&pull_request_path(repo_path, number)).await?;
        let pr: PullRequest = response.json().await?;
        Ok(pr)
    }

    /// Update title and description of a pull request.
    pub async fn update_pull_request(
        &self,
        repo_path: &str,
        number: u64,
        request: &UpdatePullReqRequest,
    ) -> Result<PullRequest> {
        let response = self
            .patch_json(&pull_request_path(repo_path, number), request)
            .await?;
        let pr: PullRequest = response.json().await?;
        Ok(pr)
    }

    /// Get an artifact registry.
    pub async fn get_registry(&self, registry_ref: &str) -> Result<Registry> {
        let response = self.get(&registry_path(registry_ref)).await?;
        let wrapper: DataResponse<Registry> = response.json().await?;
        Ok(wrapper.data)
    }
}

impl PullRequestUpdater for GitnessClient {
    async fn update_pull_request(
        &self,
        repo_path: &str,
        number: u64,
        request: &UpdatePullReqRequest,
    ) -> Result<PullRequest> {
        GitnessClient::update_pull_request(self, repo_path, number, request).await
    }
}
