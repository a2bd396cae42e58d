use super::profile::normalize_tag;
use serde::Serialize;
use std::collections::HashSet;
use tracing::debug;

/// Static rule activating a project recommendation.
///
/// A rule fires only when every required skill and every required interest is
/// present in the learner's normalized tags.
#[derive(Debug, Clone, Copy)]
pub struct RecommendationRule {
    pub key: &'static str,
    pub required_skills: &'static [&'static str],
    pub required_interests: &'static [&'static str],
    pub title: &'static str,
    pub steps: &'static [&'static str],
    pub resources: &'static [&'static str],
    pub validation: &'static str,
}

impl RecommendationRule {
    fn fires(&self, skills: &HashSet<String>, interests: &HashSet<String>) -> bool {
        self.required_skills
            .iter()
            .all(|tag| skills.contains(*tag))
            && self
                .required_interests
                .iter()
                .all(|tag| interests.contains(*tag))
    }
}

/// A rule whose triggers were satisfied by a profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecommendationMatch {
    pub key: &'static str,
    pub title: &'static str,
    pub steps: Vec<&'static str>,
    pub resources: Vec<&'static str>,
    pub validation: &'static str,
}

impl From<&RecommendationRule> for RecommendationMatch {
    fn from(rule: &RecommendationRule) -> Self {
        Self {
            key: rule.key,
            title: rule.title,
            steps: rule.steps.to_vec(),
            resources: rule.resources.to_vec(),
            validation: rule.validation,
        }
    }
}

static STANDARD_RULES: &[RecommendationRule] = &[
    RecommendationRule {
        key: "churn_prediction_app",
        required_skills: &["python"],
        required_interests: &["data science"],
        title: "Build a churn prediction app",
        steps: &[
            "Clean Telco dataset, encode categorical features, split train/test",
            "Train Logistic Regression and XGBoost, compare metrics",
            "Generate SHAP plots for explainability",
            "Deploy with Streamlit and add file upload",
        ],
        resources: &[
            "https://www.kaggle.com/datasets/blastchar/telco-customer-churn",
            "https://docs.streamlit.io",
            "https://shap.readthedocs.io",
        ],
        validation: "Deployed app URL + README with screenshots",
    },
    RecommendationRule {
        key: "responsive_landing_page",
        required_skills: &["html"],
        required_interests: &["frontend developer"],
        title: "Create a responsive landing page",
        steps: &[
            "Use semantic HTML with landmarks and headings",
            "Apply CSS Grid/Flexbox for layout",
            "Ensure accessibility: alt text, contrast, keyboard navigation",
        ],
        resources: &[
            "https://developer.mozilla.org/en-US/docs/Web/HTML",
            "https://web.dev/accessibility/",
        ],
        validation: "Lighthouse accessibility score ≥ 90",
    },
];

/// Ordered, read-only rule set. Iteration order is definition order.
#[derive(Debug, Clone, Copy)]
pub struct RuleTable {
    rules: &'static [RecommendationRule],
}

impl RuleTable {
    pub const fn standard() -> Self {
        Self {
            rules: STANDARD_RULES,
        }
    }

    pub const fn new(rules: &'static [RecommendationRule]) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &'static [RecommendationRule] {
        self.rules
    }

    /// Returns every firing rule in table order. An empty result is a valid
    /// outcome, not an error.
    pub fn match_profile<S: AsRef<str>>(
        &self,
        skills: &[S],
        interests: &[S],
    ) -> Vec<RecommendationMatch> {
        let skills = tag_set(skills);
        let interests = tag_set(interests);

        let matches: Vec<RecommendationMatch> = self
            .rules
            .iter()
            .filter(|rule| rule.fires(&skills, &interests))
            .map(RecommendationMatch::from)
            .collect();

        debug!(
            rules = self.rules.len(),
            matched = matches.len(),
            "evaluated recommendation rules"
        );
        matches
    }
}

impl Default for RuleTable {
    fn default() -> Self {
        Self::standard()
    }
}

/// Matches against the built-in rule table.
pub fn match_recommendations<S: AsRef<str>>(
    skills: &[S],
    interests: &[S],
) -> Vec<RecommendationMatch> {
    RuleTable::standard().match_profile(skills, interests)
}

fn tag_set<S: AsRef<str>>(tags: &[S]) -> HashSet<String> {
    tags.iter()
        .filter_map(|tag| normalize_tag(tag.as_ref()))
        .collect()
}
