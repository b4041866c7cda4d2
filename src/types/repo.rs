use serde::{Deserialize, Serialize};

/// Sentinel for a missing or unparsable push timestamp. Drives the recency
/// score to 0.
pub const UNKNOWN_PUSH_AGE_DAYS: i64 = 9999;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepoSummary {
    pub id: u64,
    pub name: String,
    pub full_name: String,
    pub html_url: String,
    pub private: bool,
    pub description: Option<String>,
    pub topics: Vec<String>,
    pub archived: bool,
    pub pushed_at: Option<String>,
    pub default_branch: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Analysis {
    pub has_readme: bool,
    pub readme_heading_count: usize,
    pub readme_words: usize,
    pub readme_sections: Vec<String>,
    pub intro_has_what_who_platform: bool,
    pub name_length: usize,
    pub description_length: usize,
    pub topic_count: usize,
    pub days_since_last_push: i64,
    pub has_license: bool,
    pub has_contributing: bool,
    pub has_issue_templates: bool,
    pub has_pr_template: bool,
}

impl Default for Analysis {
    fn default() -> Self {
        Self {
            has_readme: false,
            readme_heading_count: 0,
            readme_words: 0,
            readme_sections: Vec::new(),
            intro_has_what_who_platform: false,
            name_length: 0,
            description_length: 0,
            topic_count: 0,
            days_since_last_push: UNKNOWN_PUSH_AGE_DAYS,
            has_license: false,
            has_contributing: false,
            has_issue_templates: false,
            has_pr_template: false,
        }
    }
}

impl Analysis {
    pub fn apply_community(&mut self, files: &CommunityFiles) {
        self.has_license = files.license;
        self.has_contributing = files.contributing;
        self.has_issue_templates = files.issue_template;
        self.has_pr_template = files.pull_request_template;
    }
}

/// Which community-health files the community profile endpoint reports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CommunityFiles {
    pub license: bool,
    pub contributing: bool,
    pub issue_template: bool,
    pub pull_request_template: bool,
}
