//! Read-only access to the repositories being evaluated.

pub mod client;

pub use client::GitHubClient;

use crate::error::Result;
use crate::types::repo::{CommunityFiles, RepoSummary};

/// Where repositories, READMEs and community files come from. The scan
/// pipeline only talks to this trait.
pub trait RepoSource {
    /// Repositories owned by `username`, most recently pushed first.
    fn list_repos<'a>(
        &'a self,
        username: &str,
    ) -> Box<dyn Iterator<Item = Result<RepoSummary>> + 'a>;

    /// Raw README text, or `None` when the repository has none.
    fn readme(&self, full_name: &str) -> Result<Option<String>>;

    /// Community-health files, or `None` when the profile is unavailable.
    fn community_profile(&self, full_name: &str) -> Result<Option<CommunityFiles>>;
}
