use super::feedback::{evaluate, Advisory, ProfileMetrics};
use super::jobs::{match_jobs, JobCatalog, JobMatch};
use super::profile::Profile;
use super::recommendations::{RecommendationMatch, RuleTable};
use super::roadmap::{schedule_sprints, GreedySprintPacker, RoadmapStrategy, Sprint};
use chrono::NaiveDate;
use serde::Serialize;
use tracing::info;

/// Everything a single submission produces, ready for rendering or JSON.
#[derive(Debug, Clone, Serialize)]
pub struct MentorPlan {
    pub profile: Profile,
    pub recommendations: Vec<RecommendationMatch>,
    pub sprints: Vec<Sprint>,
    /// `None` when no profile metrics were supplied.
    pub advisories: Option<Vec<Advisory>>,
    pub jobs: Vec<JobMatch>,
    pub job_catalog_size: usize,
}

impl MentorPlan {
    pub fn warning_count(&self) -> usize {
        self.advisories
            .as_ref()
            .map(|advisories| advisories.iter().filter(|a| a.is_warning()).count())
            .unwrap_or(0)
    }
}

/// Runs matcher, roadmap builder, feedback evaluator and job matcher over one
/// profile. Holds only read-only inputs, so one planner serves every request.
pub struct MentorPlanner<'a, S = GreedySprintPacker> {
    rules: RuleTable,
    catalog: &'a JobCatalog,
    roadmap_weeks: u32,
    strategy: S,
}

impl<'a> MentorPlanner<'a, GreedySprintPacker> {
    pub fn new(catalog: &'a JobCatalog, roadmap_weeks: u32) -> Self {
        Self {
            rules: RuleTable::standard(),
            catalog,
            roadmap_weeks,
            strategy: GreedySprintPacker,
        }
    }
}

impl<'a, S: RoadmapStrategy> MentorPlanner<'a, S> {
    pub fn with_rules(mut self, rules: RuleTable) -> Self {
        self.rules = rules;
        self
    }

    pub fn with_strategy<T: RoadmapStrategy>(self, strategy: T) -> MentorPlanner<'a, T> {
        MentorPlanner {
            rules: self.rules,
            catalog: self.catalog,
            roadmap_weeks: self.roadmap_weeks,
            strategy,
        }
    }

    pub fn plan(
        &self,
        profile: &Profile,
        metrics: Option<&ProfileMetrics>,
        start: Option<NaiveDate>,
    ) -> MentorPlan {
        let recommendations = self
            .rules
            .match_profile(&profile.skills, &profile.interests);

        let mut sprints =
            self.strategy
                .build(&recommendations, self.roadmap_weeks, profile.weekly_hours);
        if let Some(start) = start {
            schedule_sprints(&mut sprints, start);
        }

        let advisories = metrics.map(evaluate);
        let jobs = match_jobs(&profile.skills, self.catalog);

        let plan = MentorPlan {
            profile: profile.clone(),
            recommendations,
            sprints,
            advisories,
            jobs,
            job_catalog_size: self.catalog.len(),
        };

        info!(
            recommendations = plan.recommendations.len(),
            sprints = plan.sprints.len(),
            warnings = plan.warning_count(),
            jobs = plan.jobs.len(),
            "mentor plan generated"
        );
        plan
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mentor::profile::EducationLevel;
    use crate::mentor::recommendations::RecommendationMatch;

    fn profile(skills: &[&str], interests: &[&str], weekly_hours: u32) -> Profile {
        Profile {
            name: "Ravi".to_string(),
            email: "ravi@example.com".to_string(),
            education: EducationLevel::Graduate,
            degree: "M.Sc Statistics".to_string(),
            year_of_study: 1,
            skills: skills.iter().map(|s| s.to_string()).collect(),
            interests: interests.iter().map(|s| s.to_string()).collect(),
            weekly_hours,
        }
    }

    /// Puts every recommendation in one sprint regardless of hours.
    struct SingleSprint;

    impl RoadmapStrategy for SingleSprint {
        fn build(&self, matches: &[RecommendationMatch], _: u32, _: u32) -> Vec<Sprint> {
            let mut sprints = GreedySprintPacker.build(matches, u32::MAX, u32::MAX / 2);
            sprints.truncate(1);
            sprints
        }
    }

    #[test]
    fn plan_composes_all_components() {
        let catalog = JobCatalog::standard();
        let planner = MentorPlanner::new(&catalog, 6);
        let learner = profile(&["python", "sql"], &["data science"], 10);

        let stale = ProfileMetrics {
            days_since_last_commit: 60,
            ..ProfileMetrics::default()
        };

        let plan = planner.plan(&learner, Some(&stale), None);

        assert_eq!(plan.recommendations.len(), 1);
        assert_eq!(plan.sprints.len(), 1);
        assert_eq!(plan.sprints[0].tasks[0].estimated_hours, 8);
        assert_eq!(plan.warning_count(), 8);
        assert_eq!(plan.jobs.len(), 1);
        assert_eq!(plan.job_catalog_size, 2);
    }

    #[test]
    fn plan_without_metrics_skips_feedback() {
        let catalog = JobCatalog::standard();
        let planner = MentorPlanner::new(&catalog, 6);
        let plan = planner.plan(&profile(&["java"], &["mobile"], 4), None, None);

        assert!(plan.recommendations.is_empty());
        assert!(plan.sprints.is_empty());
        assert!(plan.advisories.is_none());
        assert!(plan.jobs.is_empty());
    }

    #[test]
    fn start_date_schedules_sprints() {
        let catalog = JobCatalog::default();
        let planner = MentorPlanner::new(&catalog, 6);
        let start = NaiveDate::from_ymd_opt(2026, 2, 2).expect("valid date");
        let plan = planner.plan(
            &profile(&["python", "html"], &["data science", "frontend developer"], 2),
            None,
            Some(start),
        );

        assert_eq!(plan.job_catalog_size, 0);
        assert!(!plan.sprints.is_empty());
        assert!(plan.sprints.iter().all(|sprint| sprint.window.is_some()));
    }

    #[test]
    fn empty_rule_table_yields_no_roadmap() {
        let catalog = JobCatalog::standard();
        let planner = MentorPlanner::new(&catalog, 6).with_rules(RuleTable::new(&[]));
        let plan = planner.plan(&profile(&["python"], &["data science"], 10), None, None);
        assert!(plan.recommendations.is_empty());
        assert!(plan.sprints.is_empty());
        assert_eq!(plan.jobs.len(), 1);
    }

    #[test]
    fn strategy_is_swappable() {
        let catalog = JobCatalog::standard();
        let planner = MentorPlanner::new(&catalog, 6).with_strategy(SingleSprint);
        let plan = planner.plan(
            &profile(&["python", "html"], &["data science", "frontend developer"], 2),
            None,
            None,
        );
        assert_eq!(plan.sprints.len(), 1);
        assert_eq!(plan.sprints[0].goals.len(), 2);
    }
}
