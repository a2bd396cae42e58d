use super::recommendations::RecommendationMatch;
use chrono::{Duration, NaiveDate};
use serde::Serialize;
use tracing::debug;

/// Estimated effort per how-to step.
pub const HOURS_PER_STEP: u32 = 2;
/// Each sprint spans two calendar weeks.
pub const SPRINT_LENGTH_WEEKS: u32 = 2;

/// A recommendation scheduled into the roadmap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SprintTask {
    pub title: &'static str,
    pub steps: Vec<&'static str>,
    pub resources: Vec<&'static str>,
    pub validation: &'static str,
    pub estimated_hours: u32,
}

impl From<&RecommendationMatch> for SprintTask {
    fn from(recommendation: &RecommendationMatch) -> Self {
        Self {
            title: recommendation.title,
            steps: recommendation.steps.clone(),
            resources: recommendation.resources.clone(),
            validation: recommendation.validation,
            estimated_hours: estimate_hours(recommendation),
        }
    }
}

pub fn estimate_hours(recommendation: &RecommendationMatch) -> u32 {
    let steps = u32::try_from(recommendation.steps.len()).unwrap_or(u32::MAX);
    steps.saturating_mul(HOURS_PER_STEP)
}

/// Calendar window for a scheduled sprint, both ends inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SprintWindow {
    pub starts_on: NaiveDate,
    pub ends_on: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Sprint {
    pub number: usize,
    pub goals: Vec<&'static str>,
    pub tasks: Vec<SprintTask>,
    pub budget_hours: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub window: Option<SprintWindow>,
}

impl Sprint {
    fn open(number: usize, budget_hours: u32) -> Self {
        Self {
            number,
            goals: Vec::new(),
            tasks: Vec::new(),
            budget_hours,
            window: None,
        }
    }

    fn push(&mut self, task: SprintTask) {
        self.goals.push(task.title);
        self.tasks.push(task);
    }

    pub fn planned_hours(&self) -> u32 {
        self.tasks.iter().map(|task| task.estimated_hours).sum()
    }

    /// True only when a single task larger than the budget sits alone here.
    pub fn is_over_budget(&self) -> bool {
        self.planned_hours() > self.budget_hours
    }

    pub fn label(&self) -> String {
        format!("Sprint {}: {}", self.number, self.goals.join(", "))
    }
}

/// Turns ordered recommendations into sprints under a weekly hour budget.
pub trait RoadmapStrategy {
    fn build(
        &self,
        matches: &[RecommendationMatch],
        total_weeks: u32,
        hours_per_week: u32,
    ) -> Vec<Sprint>;
}

/// First-fit scan in recommendation order, then sequential sprint packing.
///
/// Tasks that no longer fit the overall hour ceiling are dropped for good.
/// A task larger than the per-sprint budget still gets a sprint of its own.
#[derive(Debug, Clone, Copy, Default)]
pub struct GreedySprintPacker;

impl GreedySprintPacker {
    fn accept(
        &self,
        matches: &[RecommendationMatch],
        total_weeks: u32,
        hours_per_week: u32,
    ) -> Vec<SprintTask> {
        let mut remaining = total_weeks.saturating_mul(hours_per_week);
        let mut accepted = Vec::new();

        for recommendation in matches {
            let task = SprintTask::from(recommendation);
            if task.estimated_hours <= remaining {
                remaining -= task.estimated_hours;
                accepted.push(task);
            } else {
                debug!(
                    title = task.title,
                    estimated_hours = task.estimated_hours,
                    remaining,
                    "dropped task exceeding roadmap ceiling"
                );
            }
        }

        accepted
    }
}

impl RoadmapStrategy for GreedySprintPacker {
    fn build(
        &self,
        matches: &[RecommendationMatch],
        total_weeks: u32,
        hours_per_week: u32,
    ) -> Vec<Sprint> {
        let sprint_budget = hours_per_week.saturating_mul(SPRINT_LENGTH_WEEKS);
        let mut sprints = Vec::new();
        let mut current = Sprint::open(1, sprint_budget);
        let mut current_hours: u32 = 0;

        for task in self.accept(matches, total_weeks, hours_per_week) {
            if current_hours.saturating_add(task.estimated_hours) > sprint_budget
                && !current.tasks.is_empty()
            {
                let next = Sprint::open(current.number + 1, sprint_budget);
                sprints.push(std::mem::replace(&mut current, next));
                current_hours = 0;
            }
            current_hours = current_hours.saturating_add(task.estimated_hours);
            current.push(task);
        }

        if !current.tasks.is_empty() {
            sprints.push(current);
        }

        debug!(
            recommendations = matches.len(),
            sprints = sprints.len(),
            sprint_budget,
            "built roadmap"
        );
        sprints
    }
}

pub fn build_roadmap(
    matches: &[RecommendationMatch],
    total_weeks: u32,
    hours_per_week: u32,
) -> Vec<Sprint> {
    GreedySprintPacker.build(matches, total_weeks, hours_per_week)
}

/// Assigns consecutive two-week windows starting on `start`.
pub fn schedule_sprints(sprints: &mut [Sprint], start: NaiveDate) {
    let length = Duration::weeks(i64::from(SPRINT_LENGTH_WEEKS));
    let mut starts_on = start;
    for sprint in sprints {
        let ends_on = starts_on + length - Duration::days(1);
        sprint.window = Some(SprintWindow { starts_on, ends_on });
        starts_on += length;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recommendation(title: &'static str, steps: usize) -> RecommendationMatch {
        const STEPS: [&str; 12] = [
            "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten",
            "eleven", "twelve",
        ];
        RecommendationMatch {
            key: title,
            title,
            steps: STEPS[..steps].to_vec(),
            resources: vec!["https://example.com"],
            validation: "demo",
        }
    }

    fn total_hours(sprints: &[Sprint]) -> u32 {
        sprints.iter().map(Sprint::planned_hours).sum()
    }

    #[test]
    fn estimated_hours_are_two_per_step() {
        for steps in [0, 1, 3, 4, 12] {
            let task = SprintTask::from(&recommendation("t", steps));
            assert_eq!(task.estimated_hours, 2 * steps as u32);
        }
    }

    #[test]
    fn empty_matches_give_empty_roadmap() {
        assert!(build_roadmap(&[], 6, 10).is_empty());
    }

    #[test]
    fn tasks_share_a_sprint_while_budget_allows() {
        let matches = [recommendation("churn", 4), recommendation("landing", 3)];
        let sprints = build_roadmap(&matches, 6, 10);
        assert_eq!(sprints.len(), 1);
        assert_eq!(sprints[0].goals, vec!["churn", "landing"]);
        assert_eq!(sprints[0].planned_hours(), 14);
        assert_eq!(sprints[0].budget_hours, 20);
    }

    #[test]
    fn overflowing_task_opens_a_new_sprint() {
        let matches = [recommendation("churn", 4), recommendation("landing", 3)];
        let sprints = build_roadmap(&matches, 6, 4);
        assert_eq!(sprints.len(), 2);
        assert_eq!(sprints[0].number, 1);
        assert_eq!(sprints[0].goals, vec!["churn"]);
        assert_eq!(sprints[1].number, 2);
        assert_eq!(sprints[1].goals, vec!["landing"]);
    }

    #[test]
    fn ceiling_drops_tasks_without_reordering() {
        // ceiling 2 * 6 = 12: the 8h task fits, the 6h task is dropped, the 4h task fits.
        let matches = [
            recommendation("first", 4),
            recommendation("second", 3),
            recommendation("third", 2),
        ];
        let sprints = build_roadmap(&matches, 2, 6);
        let goals: Vec<_> = sprints.iter().flat_map(|s| s.goals.clone()).collect();
        assert_eq!(goals, vec!["first", "third"]);
        assert!(total_hours(&sprints) <= 12);
    }

    #[test]
    fn oversized_task_sits_alone_over_budget() {
        // per-sprint budget 4, ceiling 40: the 8h task still gets its own sprint.
        let matches = [
            recommendation("small", 1),
            recommendation("huge", 4),
            recommendation("tail", 1),
        ];
        let sprints = build_roadmap(&matches, 20, 2);
        let goals: Vec<_> = sprints.iter().map(|s| s.goals.clone()).collect();
        assert_eq!(goals, vec![vec!["small"], vec!["huge"], vec!["tail"]]);
        assert!(sprints[1].is_over_budget());
        assert!(!sprints[0].is_over_budget());
    }

    #[test]
    fn schedule_assigns_consecutive_fortnights() {
        let matches = [recommendation("churn", 4), recommendation("landing", 3)];
        let mut sprints = build_roadmap(&matches, 6, 4);
        let start = NaiveDate::from_ymd_opt(2026, 1, 5).expect("valid date");
        schedule_sprints(&mut sprints, start);

        let first = sprints[0].window.expect("first window");
        let second = sprints[1].window.expect("second window");
        assert_eq!(first.starts_on, start);
        assert_eq!(
            first.ends_on,
            NaiveDate::from_ymd_opt(2026, 1, 18).expect("valid date")
        );
        assert_eq!(
            second.starts_on,
            NaiveDate::from_ymd_opt(2026, 1, 19).expect("valid date")
        );
    }
}
