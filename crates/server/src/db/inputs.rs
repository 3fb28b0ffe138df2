//! Write payloads accepted by the admin API and the contact form.
//!
//! Every payload goes through [`Input::clean`]: whitespace is trimmed, blank
//! optional fields collapse to `None`, then the `validator` rules run.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use validator::{Validate, ValidationError};

use super::models::{IconType, SkillCategory};
use crate::error::Result;

pub trait Input: Validate + Sized {
    fn normalize(self) -> Self;

    fn clean(self) -> Result<Self> {
        let input = self.normalize();
        input.validate()?;
        Ok(input)
    }
}

fn trimmed(value: String) -> String {
    value.trim().to_string()
}

fn blank_to_none(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Trims every entry and drops empty ones, keeping order.
pub fn normalize_technologies<I, S>(items: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    items
        .into_iter()
        .map(|s| s.as_ref().trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Accepts either a JSON array or a comma-separated string.
fn list_or_csv<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        List(Vec<String>),
        Csv(String),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::List(items) => items,
        Raw::Csv(csv) => csv.split(',').map(str::to_string).collect(),
    })
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct ContactForm {
    #[validate(length(min = 1, max = 100, message = "Enter your name (at most 100 characters)"))]
    #[serde(default)]
    pub name: String,

    #[validate(
        email(message = "Enter a valid email address"),
        length(max = 254, message = "Email must be at most 254 characters")
    )]
    #[serde(default)]
    pub email: String,

    #[validate(length(min = 1, max = 200, message = "Enter a subject (at most 200 characters)"))]
    #[serde(default)]
    pub subject: String,

    #[validate(length(min = 1, message = "Message is required"))]
    #[serde(default)]
    pub message: String,
}

impl Input for ContactForm {
    fn normalize(self) -> Self {
        Self {
            name: trimmed(self.name),
            email: trimmed(self.email),
            subject: trimmed(self.subject),
            message: trimmed(self.message),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ProfileInput {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(min = 1))]
    pub bio: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(max = 20))]
    #[serde(default)]
    pub phone: String,
    #[validate(length(max = 100))]
    #[serde(default)]
    pub location: String,
    #[validate(url)]
    pub github: Option<String>,
    #[validate(url)]
    pub linkedin: Option<String>,
    #[validate(url)]
    pub twitter: Option<String>,
    pub profile_image: Option<String>,
    pub resume: Option<String>,
}

impl Input for ProfileInput {
    fn normalize(self) -> Self {
        Self {
            name: trimmed(self.name),
            title: trimmed(self.title),
            bio: trimmed(self.bio),
            email: trimmed(self.email),
            phone: trimmed(self.phone),
            location: trimmed(self.location),
            github: blank_to_none(self.github),
            linkedin: blank_to_none(self.linkedin),
            twitter: blank_to_none(self.twitter),
            profile_image: blank_to_none(self.profile_image),
            resume: blank_to_none(self.resume),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SkillInput {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    pub category: SkillCategory,
    #[validate(range(min = 0, max = 100, message = "Proficiency must be between 0 and 100"))]
    pub proficiency: i64,
    #[serde(default)]
    pub icon_type: IconType,
    #[validate(length(min = 1, max = 50))]
    pub icon: String,
}

impl Input for SkillInput {
    fn normalize(self) -> Self {
        Self {
            name: trimmed(self.name),
            icon: trimmed(self.icon),
            ..self
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ProjectInput {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(min = 1))]
    pub description: String,
    #[validate(length(min = 1))]
    pub image: String,
    #[serde(default, deserialize_with = "list_or_csv")]
    #[validate(custom(function = "validate_technologies"))]
    pub technologies: Vec<String>,
    #[validate(url)]
    pub github_link: Option<String>,
    #[validate(url)]
    pub live_link: Option<String>,
    #[serde(default)]
    pub is_featured: bool,
}

#[allow(clippy::ptr_arg)]
fn validate_technologies(items: &Vec<String>) -> std::result::Result<(), ValidationError> {
    // The joined form must still fit the historical 300 character column.
    if items.join(", ").chars().count() > 300 {
        return Err(ValidationError::new("length")
            .with_message("Technologies must fit in 300 characters".into()));
    }
    Ok(())
}

impl Input for ProjectInput {
    fn normalize(self) -> Self {
        Self {
            title: trimmed(self.title),
            description: trimmed(self.description),
            image: trimmed(self.image),
            technologies: normalize_technologies(&self.technologies),
            github_link: blank_to_none(self.github_link),
            live_link: blank_to_none(self.live_link),
            is_featured: self.is_featured,
        }
    }
}

fn check_date_range(
    start: NaiveDate,
    end: Option<NaiveDate>,
) -> std::result::Result<(), ValidationError> {
    match end {
        Some(end) if end < start => Err(ValidationError::new("date_range")
            .with_message("End date cannot be before start date".into())),
        _ => Ok(()),
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[validate(schema(function = "validate_experience_dates"))]
pub struct ExperienceInput {
    #[validate(length(min = 1, max = 200))]
    pub company: String,
    #[validate(length(min = 1, max = 200))]
    pub position: String,
    #[serde(default)]
    pub description: String,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub is_current: bool,
}

fn validate_experience_dates(input: &ExperienceInput) -> std::result::Result<(), ValidationError> {
    check_date_range(input.start_date, input.end_date)
}

impl Input for ExperienceInput {
    fn normalize(self) -> Self {
        Self {
            company: trimmed(self.company),
            position: trimmed(self.position),
            description: trimmed(self.description),
            ..self
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[validate(schema(function = "validate_education_dates"))]
pub struct EducationInput {
    #[validate(length(min = 1, max = 200))]
    pub institution: String,
    #[validate(length(min = 1, max = 200))]
    pub degree: String,
    #[validate(length(min = 1, max = 200))]
    pub field_of_study: String,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    #[validate(length(max = 50))]
    pub grade: Option<String>,
    #[serde(default)]
    pub description: String,
}

fn validate_education_dates(input: &EducationInput) -> std::result::Result<(), ValidationError> {
    check_date_range(input.start_date, input.end_date)
}

impl Input for EducationInput {
    fn normalize(self) -> Self {
        Self {
            institution: trimmed(self.institution),
            degree: trimmed(self.degree),
            field_of_study: trimmed(self.field_of_study),
            grade: blank_to_none(self.grade),
            description: trimmed(self.description),
            ..self
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CertificationInput {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(length(min = 1, max = 200))]
    pub issuing_organization: String,
    pub issue_date: NaiveDate,
    #[validate(length(max = 100))]
    pub credential_id: Option<String>,
    #[validate(url)]
    pub credential_url: Option<String>,
}

impl Input for CertificationInput {
    fn normalize(self) -> Self {
        Self {
            name: trimmed(self.name),
            issuing_organization: trimmed(self.issuing_organization),
            credential_id: blank_to_none(self.credential_id),
            credential_url: blank_to_none(self.credential_url),
            ..self
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct TestimonialInput {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(length(min = 1, max = 100))]
    pub position: String,
    #[validate(length(min = 1, max = 100))]
    pub company: String,
    pub image: Option<String>,
    #[validate(length(min = 1))]
    pub testimonial: String,
    #[validate(range(min = 1, max = 5, message = "Rating must be between 1 and 5"))]
    pub rating: i64,
}

impl Input for TestimonialInput {
    fn normalize(self) -> Self {
        Self {
            name: trimmed(self.name),
            position: trimmed(self.position),
            company: trimmed(self.company),
            image: blank_to_none(self.image),
            testimonial: trimmed(self.testimonial),
            rating: self.rating,
        }
    }
}
