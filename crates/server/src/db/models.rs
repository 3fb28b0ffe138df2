use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Profile {
    pub id: String,
    pub name: String,
    pub title: String,
    pub bio: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub github: Option<String>,
    pub linkedin: Option<String>,
    pub twitter: Option<String>,
    pub profile_image: Option<String>,
    pub resume: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum SkillCategory {
    Frontend,
    Backend,
    Database,
    Tools,
}

impl SkillCategory {
    pub const ALL: [SkillCategory; 4] = [
        SkillCategory::Frontend,
        SkillCategory::Backend,
        SkillCategory::Database,
        SkillCategory::Tools,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SkillCategory::Frontend => "Frontend",
            SkillCategory::Backend => "Backend",
            SkillCategory::Database => "Database",
            SkillCategory::Tools => "Tools & Others",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum IconType {
    /// Font Awesome class name
    #[default]
    Fa,
    /// URL of an SVG image
    Svg,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Skill {
    pub id: String,
    pub name: String,
    pub category: SkillCategory,
    pub proficiency: i64,
    pub icon_type: IconType,
    pub icon: String,
}

impl Skill {
    /// Display bucket used by templates to colour the proficiency bar.
    pub fn tier(&self) -> &'static str {
        if self.proficiency >= 80 {
            "high"
        } else if self.proficiency >= 60 {
            "medium"
        } else {
            "low"
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Project {
    pub id: String,
    pub title: String,
    pub description: String,
    pub image: String,
    pub technologies: Json<Vec<String>>,
    pub github_link: Option<String>,
    pub live_link: Option<String>,
    pub is_featured: bool,
    pub created_date: NaiveDate,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Experience {
    pub id: String,
    pub company: String,
    pub position: String,
    pub description: String,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub is_current: bool,
}

impl Experience {
    pub fn period_label(&self) -> String {
        let end = if self.is_current {
            "Present".to_string()
        } else {
            self.end_date
                .map(month_year)
                .unwrap_or_else(|| "N/A".to_string())
        };
        format!("{} - {}", month_year(self.start_date), end)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Education {
    pub id: String,
    pub institution: String,
    pub degree: String,
    pub field_of_study: String,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub grade: Option<String>,
    pub description: String,
}

impl Education {
    pub fn period_label(&self) -> String {
        let end = self
            .end_date
            .map(month_year)
            .unwrap_or_else(|| "Present".to_string());
        format!("{} - {}", month_year(self.start_date), end)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Certification {
    pub id: String,
    pub name: String,
    pub issuing_organization: String,
    pub issue_date: NaiveDate,
    pub credential_id: Option<String>,
    pub credential_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ContactMessage {
    pub id: String,
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
    pub is_read: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Testimonial {
    pub id: String,
    pub name: String,
    pub position: String,
    pub company: String,
    pub image: Option<String>,
    pub testimonial: String,
    pub rating: i64,
}

fn month_year(date: NaiveDate) -> String {
    date.format("%b %Y").to_string()
}
