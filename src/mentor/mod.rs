//! Pure planning core: recommendation matching, roadmap packing, profile
//! feedback and job matching. Nothing here performs I/O except the optional
//! CSV catalog loader.

pub mod feedback;
pub mod jobs;
pub mod plan;
pub mod profile;
pub mod recommendations;
pub mod roadmap;

pub use feedback::{
    evaluate, warnings, Advisory, AdvisoryCategory, AdvisoryStatus, FeedbackCheck, ProfileMetrics,
};
pub use jobs::{match_jobs, CatalogError, JobCatalog, JobMatch, JobPosting};
pub use plan::{MentorPlan, MentorPlanner};
pub use profile::{
    normalize_tags, parse_tag_list, EducationLevel, Profile, ProfileError, ProfileSubmission,
};
pub use recommendations::{
    match_recommendations, RecommendationMatch, RecommendationRule, RuleTable,
};
pub use roadmap::{
    build_roadmap, schedule_sprints, GreedySprintPacker, RoadmapStrategy, Sprint, SprintTask,
    SprintWindow,
};
