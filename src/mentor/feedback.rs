use serde::{Deserialize, Serialize};
use tracing::debug;

/// Externally supplied repository and professional-profile statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileMetrics {
    pub repo_count: u32,
    pub has_profile_readme: bool,
    pub top_repos_with_readme: u32,
    pub days_since_last_commit: u32,
    pub headline_length: u32,
    pub about_word_count: u32,
    pub featured_link_count: u32,
    pub quantified_bullet_count: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AdvisoryCategory {
    Repository,
    ProfessionalProfile,
}

impl AdvisoryCategory {
    pub const fn ordered() -> [Self; 2] {
        [Self::Repository, Self::ProfessionalProfile]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Repository => "GitHub Feedback",
            Self::ProfessionalProfile => "LinkedIn Feedback",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackCheck {
    RepoCount,
    ProfileReadme,
    TopRepoReadmes,
    CommitFreshness,
    HeadlineLength,
    AboutLength,
    FeaturedLinks,
    QuantifiedBullets,
}

impl FeedbackCheck {
    /// Evaluation order; also the order advisories are reported in.
    pub const fn ordered() -> [Self; 8] {
        [
            Self::RepoCount,
            Self::ProfileReadme,
            Self::TopRepoReadmes,
            Self::CommitFreshness,
            Self::HeadlineLength,
            Self::AboutLength,
            Self::FeaturedLinks,
            Self::QuantifiedBullets,
        ]
    }

    pub const fn category(self) -> AdvisoryCategory {
        match self {
            Self::RepoCount
            | Self::ProfileReadme
            | Self::TopRepoReadmes
            | Self::CommitFreshness => AdvisoryCategory::Repository,
            Self::HeadlineLength
            | Self::AboutLength
            | Self::FeaturedLinks
            | Self::QuantifiedBullets => AdvisoryCategory::ProfessionalProfile,
        }
    }

    fn triggers(self, metrics: &ProfileMetrics) -> bool {
        match self {
            Self::RepoCount => metrics.repo_count < 5,
            Self::ProfileReadme => !metrics.has_profile_readme,
            Self::TopRepoReadmes => metrics.top_repos_with_readme < 3,
            Self::CommitFreshness => metrics.days_since_last_commit > 30,
            Self::HeadlineLength => metrics.headline_length < 20,
            Self::AboutLength => !(300..=600).contains(&metrics.about_word_count),
            Self::FeaturedLinks => metrics.featured_link_count < 3,
            Self::QuantifiedBullets => metrics.quantified_bullet_count < 5,
        }
    }

    const fn warning(self) -> &'static str {
        match self {
            Self::RepoCount => "Add at least 5 public repos with clear READMEs.",
            Self::ProfileReadme => "Create a profile README in a repo named your-username.",
            Self::TopRepoReadmes => {
                "Add detailed READMEs with screenshots and badges to your top repos."
            }
            Self::CommitFreshness => "Push at least one commit in the last 30 days.",
            Self::HeadlineLength => "Expand your headline: role | skills | artifacts.",
            Self::AboutLength => "Write an About section between 300–600 words.",
            Self::FeaturedLinks => "Add at least 3 featured links (apps, repos, certificates).",
            Self::QuantifiedBullets => {
                "Use numbers in your experience/projects (e.g., AUC 0.86, 200 users)."
            }
        }
    }

    const fn confirmation(self) -> &'static str {
        match self {
            Self::RepoCount => "Repo count looks good!",
            Self::ProfileReadme => "Profile README is in place.",
            Self::TopRepoReadmes => "Top repos are documented.",
            Self::CommitFreshness => "Recent commit activity looks good!",
            Self::HeadlineLength => "Headline length looks good!",
            Self::AboutLength => "About section length is on target.",
            Self::FeaturedLinks => "Featured links look good!",
            Self::QuantifiedBullets => "Experience bullets are quantified.",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdvisoryStatus {
    Passed,
    Warning,
}

/// Outcome of one feedback check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Advisory {
    pub check: FeedbackCheck,
    pub category: AdvisoryCategory,
    pub status: AdvisoryStatus,
    pub message: &'static str,
}

impl Advisory {
    pub fn is_warning(&self) -> bool {
        self.status == AdvisoryStatus::Warning
    }
}

/// Runs all eight checks without short-circuiting. Every check reports either
/// a warning or a confirmation.
pub fn evaluate(metrics: &ProfileMetrics) -> Vec<Advisory> {
    let advisories: Vec<Advisory> = FeedbackCheck::ordered()
        .into_iter()
        .map(|check| {
            let (status, message) = if check.triggers(metrics) {
                (AdvisoryStatus::Warning, check.warning())
            } else {
                (AdvisoryStatus::Passed, check.confirmation())
            };
            Advisory {
                check,
                category: check.category(),
                status,
                message,
            }
        })
        .collect();

    debug!(
        warnings = advisories.iter().filter(|a| a.is_warning()).count(),
        "evaluated profile feedback"
    );
    advisories
}

/// The triggered subset, in check order.
pub fn warnings(advisories: &[Advisory]) -> Vec<&Advisory> {
    advisories.iter().filter(|a| a.is_warning()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn weak_metrics() -> ProfileMetrics {
        ProfileMetrics {
            repo_count: 3,
            has_profile_readme: false,
            top_repos_with_readme: 1,
            days_since_last_commit: 60,
            headline_length: 10,
            about_word_count: 100,
            featured_link_count: 0,
            quantified_bullet_count: 1,
        }
    }

    fn strong_metrics() -> ProfileMetrics {
        ProfileMetrics {
            repo_count: 10,
            has_profile_readme: true,
            top_repos_with_readme: 5,
            days_since_last_commit: 5,
            headline_length: 30,
            about_word_count: 450,
            featured_link_count: 4,
            quantified_bullet_count: 6,
        }
    }

    #[test]
    fn weak_profile_triggers_every_check() {
        let advisories = evaluate(&weak_metrics());
        assert_eq!(advisories.len(), 8);
        assert_eq!(warnings(&advisories).len(), 8);
        let checks: Vec<_> = advisories.iter().map(|a| a.check).collect();
        assert_eq!(checks, FeedbackCheck::ordered().to_vec());
    }

    #[test]
    fn strong_profile_triggers_nothing() {
        let advisories = evaluate(&strong_metrics());
        assert!(warnings(&advisories).is_empty());
        assert_eq!(advisories[0].message, "Repo count looks good!");
    }

    #[test]
    fn about_window_is_inclusive_on_both_ends() {
        for (words, warns) in [(299, true), (300, false), (600, false), (601, true)] {
            let metrics = ProfileMetrics {
                about_word_count: words,
                ..strong_metrics()
            };
            let advisories = evaluate(&metrics);
            let about = advisories
                .iter()
                .find(|a| a.check == FeedbackCheck::AboutLength)
                .expect("about check present");
            assert_eq!(about.is_warning(), warns, "{words} words");
        }
    }

    #[test]
    fn threshold_boundaries_pass() {
        let metrics = ProfileMetrics {
            repo_count: 5,
            has_profile_readme: true,
            top_repos_with_readme: 3,
            days_since_last_commit: 30,
            headline_length: 20,
            about_word_count: 300,
            featured_link_count: 3,
            quantified_bullet_count: 5,
        };
        assert!(warnings(&evaluate(&metrics)).is_empty());
    }

    #[test]
    fn checks_split_four_per_category() {
        let advisories = evaluate(&weak_metrics());
        for category in AdvisoryCategory::ordered() {
            assert_eq!(
                advisories.iter().filter(|a| a.category == category).count(),
                4
            );
        }
    }
}
