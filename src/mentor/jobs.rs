use super::profile::normalize_tag;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JobPosting {
    pub title: String,
    pub company: String,
    pub location: String,
    pub role: String,
    pub required_skills: Vec<String>,
    pub url: String,
}

/// A posting sharing at least one skill with the learner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JobMatch {
    #[serde(flatten)]
    pub posting: JobPosting,
    /// Overlapping skills in the posting's required-skill order.
    pub matched_skills: Vec<String>,
}

/// Ordered, read-only set of postings loaded once at startup.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct JobCatalog {
    postings: Vec<JobPosting>,
}

impl JobCatalog {
    pub fn standard() -> Self {
        Self {
            postings: standard_postings(),
        }
    }

    pub fn new(postings: Vec<JobPosting>) -> Self {
        Self { postings }
    }

    /// Loads the CSV at `path`, or falls back to the built-in catalog.
    pub fn load(path: Option<&Path>) -> Result<Self, CatalogError> {
        match path {
            Some(path) => Self::from_path(path),
            None => Ok(Self::standard()),
        }
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let file = File::open(path).map_err(CatalogError::Io)?;
        Self::from_reader(file)
    }

    /// Reads `title,company,location,role,required_skills,url` rows, with
    /// required skills separated by `;`.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, CatalogError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let headers = csv_reader.headers().map_err(CatalogError::Csv)?.clone();
        let mut postings = Vec::new();

        for record in csv_reader.records() {
            let record = record.map_err(CatalogError::Csv)?;
            // quoted fields may span lines, so report where the record starts
            let line = record.position().map_or(0, |pos| pos.line());
            let row: CatalogRow = record
                .deserialize(Some(&headers))
                .map_err(CatalogError::Csv)?;
            if row.required_skills.is_empty() {
                return Err(CatalogError::MissingSkills {
                    line,
                    title: row.title,
                });
            }
            postings.push(row.into_posting());
        }

        debug!(postings = postings.len(), "loaded job catalog");
        Ok(Self { postings })
    }

    pub fn postings(&self) -> &[JobPosting] {
        &self.postings
    }

    pub fn len(&self) -> usize {
        self.postings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.postings.is_empty()
    }
}

/// Returns, in catalog order, every posting whose required skills intersect
/// the learner's skills. Overlap size does not affect ranking.
pub fn match_jobs<S: AsRef<str>>(skills: &[S], catalog: &JobCatalog) -> Vec<JobMatch> {
    let skills: HashSet<String> = skills
        .iter()
        .filter_map(|skill| normalize_tag(skill.as_ref()))
        .collect();

    catalog
        .postings
        .iter()
        .filter_map(|posting| {
            let matched_skills: Vec<String> = posting
                .required_skills
                .iter()
                .filter(|skill| skills.contains(skill.as_str()))
                .cloned()
                .collect();
            if matched_skills.is_empty() {
                None
            } else {
                Some(JobMatch {
                    posting: posting.clone(),
                    matched_skills,
                })
            }
        })
        .collect()
}

fn standard_postings() -> Vec<JobPosting> {
    vec![
        JobPosting {
            title: "Data Analyst Intern".to_string(),
            company: "ABC Corp".to_string(),
            location: "Hyderabad".to_string(),
            role: "data scientist".to_string(),
            required_skills: vec![
                "python".to_string(),
                "sql".to_string(),
                "statistics".to_string(),
            ],
            url: "https://example.com".to_string(),
        },
        JobPosting {
            title: "Frontend Developer".to_string(),
            company: "XYZ Ltd".to_string(),
            location: "Bangalore".to_string(),
            role: "frontend developer".to_string(),
            required_skills: vec![
                "html".to_string(),
                "css".to_string(),
                "javascript".to_string(),
            ],
            url: "https://example.com".to_string(),
        },
    ]
}

#[derive(Debug, Deserialize)]
struct CatalogRow {
    title: String,
    company: String,
    location: String,
    role: String,
    #[serde(deserialize_with = "skill_list")]
    required_skills: Vec<String>,
    url: String,
}

impl CatalogRow {
    fn into_posting(self) -> JobPosting {
        JobPosting {
            title: self.title,
            company: self.company,
            location: self.location,
            role: self.role.trim().to_lowercase(),
            required_skills: self.required_skills,
            url: self.url,
        }
    }
}

fn skill_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    Ok(raw.split(';').filter_map(normalize_tag).collect())
}

#[derive(Debug)]
pub enum CatalogError {
    Io(std::io::Error),
    Csv(csv::Error),
    MissingSkills { line: u64, title: String },
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::Io(err) => write!(f, "failed to read job catalog: {err}"),
            CatalogError::Csv(err) => write!(f, "failed to parse job catalog: {err}"),
            CatalogError::MissingSkills { line, title } => write!(
                f,
                "job catalog line {line} ('{title}') lists no required skills"
            ),
        }
    }
}

impl std::error::Error for CatalogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CatalogError::Io(err) => Some(err),
            CatalogError::Csv(err) => Some(err),
            CatalogError::MissingSkills { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const CATALOG_CSV: &str = "title,company,location,role,required_skills,url\n\
        Backend Engineer,Acme,Pune,Backend Developer, Rust ; SQL ,https://acme.example/jobs/1\n\
        ML Intern,Borealis,Remote,data scientist,python;statistics,https://borealis.example/ml\n";

    #[test]
    fn python_and_sql_match_only_the_analyst_posting() {
        let catalog = JobCatalog::standard();
        let matches = match_jobs(&["python", "sql"], &catalog);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].posting.title, "Data Analyst Intern");
        assert_eq!(matches[0].matched_skills, vec!["python", "sql"]);
    }

    #[test]
    fn unrelated_skill_matches_nothing() {
        let catalog = JobCatalog::standard();
        assert!(match_jobs(&["java"], &catalog).is_empty());
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn matches_keep_catalog_order() {
        let catalog = JobCatalog::standard();
        let matches = match_jobs(&["css", "statistics"], &catalog);
        let titles: Vec<_> = matches.iter().map(|m| m.posting.title.as_str()).collect();
        assert_eq!(titles, vec!["Data Analyst Intern", "Frontend Developer"]);
    }

    #[test]
    fn csv_catalog_normalizes_skills() {
        let catalog =
            JobCatalog::from_reader(Cursor::new(CATALOG_CSV)).expect("catalog parses");
        assert_eq!(catalog.len(), 2);
        let backend = &catalog.postings()[0];
        assert_eq!(backend.required_skills, vec!["rust", "sql"]);
        assert_eq!(backend.role, "backend developer");

        let matches = match_jobs(&["Rust"], &catalog);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].posting.company, "Acme");
    }

    #[test]
    fn csv_row_without_skills_is_rejected() {
        let csv = "title,company,location,role,required_skills,url\n\
            Ghost Role,Nowhere,Remote,unknown, ; ,https://example.com\n";
        let err = JobCatalog::from_reader(Cursor::new(csv)).expect_err("row rejected");
        assert!(matches!(err, CatalogError::MissingSkills { line: 2, .. }));
    }

    #[test]
    fn missing_skills_line_counts_multiline_fields() {
        let csv = "title,company,location,role,required_skills,url\n\
            \"Senior\nEngineer\",Acme,Pune,backend,rust,https://acme.example\n\
            Ghost,Nowhere,Remote,analyst,,https://ghost.example\n";
        let err = JobCatalog::from_reader(Cursor::new(csv)).expect_err("missing skills");
        match err {
            CatalogError::MissingSkills { line, title } => {
                assert_eq!(line, 4);
                assert_eq!(title, "Ghost");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn empty_catalog_is_distinct_from_no_overlap() {
        let empty = JobCatalog::default();
        assert!(empty.is_empty());
        assert!(match_jobs(&["python"], &empty).is_empty());
    }
}
