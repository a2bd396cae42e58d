use career_mentor::mentor::{Advisory, AdvisoryCategory, JobMatch, MentorPlan, Sprint};

pub(crate) fn render_plan(plan: &MentorPlan) {
    let profile = &plan.profile;
    println!("Profile saved for {} ({})", profile.name, profile.email);
    println!(
        "{} | {} | year {} | {} hours/week",
        profile.education.label(),
        profile.degree,
        profile.year_of_study,
        profile.weekly_hours
    );
    println!("Skills: {}", profile.skills.join(", "));
    println!("Interests: {}", profile.interests.join(", "));

    println!("\nRecommended next steps");
    if plan.recommendations.is_empty() {
        println!("No matching recommendations found. Try adding more skills or interests.");
    } else {
        for recommendation in &plan.recommendations {
            println!("\n{}", recommendation.title);
            println!("How to do it:");
            for step in &recommendation.steps {
                println!("- {step}");
            }
            println!("Resources:");
            for link in &recommendation.resources {
                println!("- {link}");
            }
            println!("Validation: {}", recommendation.validation);
        }

        // the roadmap section only exists when something was recommended
        println!("\nRoadmap");
        if plan.sprints.is_empty() {
            println!("No roadmap generated yet.");
        } else {
            for sprint in &plan.sprints {
                render_sprint(sprint);
            }
        }
    }

    match &plan.advisories {
        Some(advisories) => {
            println!();
            render_feedback(advisories);
        }
        None => println!("\nProfile feedback: not requested"),
    }

    println!("\nTop job recommendations");
    render_jobs(&plan.jobs, plan.job_catalog_size);
}

fn render_sprint(sprint: &Sprint) {
    let window = sprint
        .window
        .map(|window| format!(" ({} -> {})", window.starts_on, window.ends_on))
        .unwrap_or_default();
    println!(
        "\n{}{} [{}/{} hours]",
        sprint.label(),
        window,
        sprint.planned_hours(),
        sprint.budget_hours
    );

    for task in &sprint.tasks {
        println!("Task: {}", task.title);
        println!("- Estimated hours: {}", task.estimated_hours);
        println!("Steps:");
        for step in &task.steps {
            println!("  - {step}");
        }
        println!("Resources:");
        for link in &task.resources {
            println!("  - {link}");
        }
        println!("Validation: {}", task.validation);
    }
}

pub(crate) fn render_feedback(advisories: &[Advisory]) {
    println!("Profile feedback");
    for category in AdvisoryCategory::ordered() {
        println!("\n{}", category.label());
        for advisory in advisories.iter().filter(|a| a.category == category) {
            let marker = if advisory.is_warning() { "!" } else { "ok" };
            println!("- [{marker}] {}", advisory.message);
        }
    }
}

pub(crate) fn render_jobs(jobs: &[JobMatch], catalog_size: usize) {
    if catalog_size == 0 {
        println!("No job catalog loaded.");
        return;
    }
    if jobs.is_empty() {
        println!("No job matches for the listed skills.");
        return;
    }

    for job in jobs {
        let posting = &job.posting;
        println!(
            "{} at {} ({})",
            posting.title, posting.company, posting.location
        );
        println!("- Required skills: {}", posting.required_skills.join(", "));
        println!("- Matched skills: {}", job.matched_skills.join(", "));
        println!("- Apply here: {}", posting.url);
    }
}
