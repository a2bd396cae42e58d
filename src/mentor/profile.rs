use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

pub const YEAR_OF_STUDY_RANGE: RangeInclusive<u8> = 1..=6;
pub const WEEKLY_HOURS_RANGE: RangeInclusive<u32> = 2..=40;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EducationLevel {
    Undergraduate,
    Graduate,
    EarlyCareer,
}

impl EducationLevel {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Undergraduate => "Undergraduate",
            Self::Graduate => "Graduate",
            Self::EarlyCareer => "Early Career",
        }
    }
}

impl FromStr for EducationLevel {
    type Err = ProfileError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let normalized: String = raw
            .trim()
            .to_ascii_lowercase()
            .chars()
            .map(|ch| if ch == '-' || ch == '_' { ' ' } else { ch })
            .collect();

        match normalized.as_str() {
            "undergraduate" => Ok(Self::Undergraduate),
            "graduate" => Ok(Self::Graduate),
            "early career" | "earlycareer" => Ok(Self::EarlyCareer),
            _ => Err(ProfileError::UnknownEducationLevel(raw.to_string())),
        }
    }
}

/// Accepts the same labels as the intake form, not only the serialized names.
impl<'de> Deserialize<'de> for EducationLevel {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Validated learner profile. Immutable once built and never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Profile {
    pub name: String,
    pub email: String,
    pub education: EducationLevel,
    pub degree: String,
    pub year_of_study: u8,
    pub skills: Vec<String>,
    pub interests: Vec<String>,
    pub weekly_hours: u32,
}

/// Raw form fields as collected by the CLI or the HTTP endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ProfileSubmission {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    pub education: EducationLevel,
    #[serde(default)]
    pub degree: String,
    pub year_of_study: u8,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub interests: Vec<String>,
    pub weekly_hours: u32,
}

impl ProfileSubmission {
    /// Applies the range checks of the intake form and normalizes tag lists.
    pub fn into_profile(self) -> Result<Profile, ProfileError> {
        if !YEAR_OF_STUDY_RANGE.contains(&self.year_of_study) {
            return Err(ProfileError::YearOutOfRange(self.year_of_study));
        }
        if !WEEKLY_HOURS_RANGE.contains(&self.weekly_hours) {
            return Err(ProfileError::WeeklyHoursOutOfRange(self.weekly_hours));
        }

        Ok(Profile {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            education: self.education,
            degree: self.degree.trim().to_string(),
            year_of_study: self.year_of_study,
            skills: normalize_tags(&self.skills),
            interests: normalize_tags(&self.interests),
            weekly_hours: self.weekly_hours,
        })
    }
}

/// Splits comma separated free text into trimmed, lowercased tags.
pub fn parse_tag_list(raw: &str) -> Vec<String> {
    raw.split(',').filter_map(normalize_tag).collect()
}

/// Normalizes each entry, splitting embedded commas and dropping blanks.
pub fn normalize_tags<S: AsRef<str>>(tags: &[S]) -> Vec<String> {
    tags.iter()
        .flat_map(|tag| parse_tag_list(tag.as_ref()))
        .collect()
}

pub(crate) fn normalize_tag(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_lowercase())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileError {
    YearOutOfRange(u8),
    WeeklyHoursOutOfRange(u32),
    UnknownEducationLevel(String),
}

impl fmt::Display for ProfileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProfileError::YearOutOfRange(year) => write!(
                f,
                "year of study {year} must be between {} and {}",
                YEAR_OF_STUDY_RANGE.start(),
                YEAR_OF_STUDY_RANGE.end()
            ),
            ProfileError::WeeklyHoursOutOfRange(hours) => write!(
                f,
                "weekly hours {hours} must be between {} and {}",
                WEEKLY_HOURS_RANGE.start(),
                WEEKLY_HOURS_RANGE.end()
            ),
            ProfileError::UnknownEducationLevel(raw) => write!(
                f,
                "unknown education level '{raw}' (expected Undergraduate, Graduate or Early Career)"
            ),
        }
    }
}

impl std::error::Error for ProfileError {}
