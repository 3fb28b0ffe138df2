//! Page assembly: each public page is a fixed composition of content reads.

use serde::Serialize;

use super::content::ContentStore;
use crate::{
    db::{
        inputs::ContactForm,
        models::{
            Certification, Education, Experience, Profile, Project, Skill, SkillCategory,
            Testimonial,
        },
    },
    error::{FieldErrors, Result},
};

pub const HOME_FEATURED_PROJECTS: usize = 3;
pub const HOME_EDUCATION: usize = 2;
pub const HOME_CERTIFICATIONS: usize = 3;
pub const HOME_TESTIMONIALS: usize = 3;

#[derive(Debug, Clone, Serialize)]
pub struct SkillView {
    #[serde(flatten)]
    pub skill: Skill,
    pub tier: &'static str,
}

impl From<Skill> for SkillView {
    fn from(skill: Skill) -> Self {
        let tier = skill.tier();
        Self { skill, tier }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ExperienceView {
    #[serde(flatten)]
    pub entry: Experience,
    pub period: String,
}

impl From<Experience> for ExperienceView {
    fn from(entry: Experience) -> Self {
        let period = entry.period_label();
        Self { entry, period }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct EducationView {
    #[serde(flatten)]
    pub entry: Education,
    pub period: String,
}

impl From<Education> for EducationView {
    fn from(entry: Education) -> Self {
        let period = entry.period_label();
        Self { entry, period }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SkillGroup {
    pub category: SkillCategory,
    pub label: &'static str,
    pub skills: Vec<SkillView>,
}

#[derive(Debug, Serialize)]
pub struct HomePage {
    pub profile: Option<Profile>,
    pub featured_projects: Vec<Project>,
    pub skills: Vec<SkillView>,
    pub education: Vec<EducationView>,
    pub certifications: Vec<Certification>,
    pub testimonials: Vec<Testimonial>,
}

#[derive(Debug, Serialize)]
pub struct AboutPage {
    pub profile: Option<Profile>,
    pub experiences: Vec<ExperienceView>,
    pub education: Vec<EducationView>,
    pub certifications: Vec<Certification>,
}

#[derive(Debug, Serialize)]
pub struct ProjectsPage {
    pub projects: Vec<Project>,
}

#[derive(Debug, Serialize)]
pub struct SkillsPage {
    pub groups: Vec<SkillGroup>,
}

#[derive(Debug, Default, Serialize)]
pub struct ContactPage {
    pub profile: Option<Profile>,
    pub form: ContactForm,
    pub errors: FieldErrors,
    pub sent: bool,
    pub warning: Option<String>,
}

fn views<T, V: From<T>>(items: Vec<T>) -> Vec<V> {
    items.into_iter().map(V::from).collect()
}

/// Splits skills into the four fixed categories, keeping their order inside
/// each group. Empty groups are kept so templates can show a placeholder.
pub fn group_skills(skills: Vec<Skill>) -> Vec<SkillGroup> {
    let mut groups: Vec<SkillGroup> = SkillCategory::ALL
        .iter()
        .map(|&category| SkillGroup {
            category,
            label: category.label(),
            skills: Vec::new(),
        })
        .collect();

    for skill in skills {
        if let Some(group) = groups.iter_mut().find(|g| g.category == skill.category) {
            group.skills.push(skill.into());
        }
    }

    groups
}

pub async fn home(store: &ContentStore) -> Result<HomePage> {
    let (profile, featured_projects, skills, education, certifications, testimonials) = tokio::try_join!(
        store.get_profile(),
        store.get_featured_projects(HOME_FEATURED_PROJECTS),
        store.get_all_skills(),
        store.get_recent_education(HOME_EDUCATION),
        store.get_recent_certifications(HOME_CERTIFICATIONS),
        store.get_testimonials(HOME_TESTIMONIALS),
    )?;

    Ok(HomePage {
        profile,
        featured_projects,
        skills: views(skills),
        education: views(education),
        certifications,
        testimonials,
    })
}

pub async fn about(store: &ContentStore) -> Result<AboutPage> {
    let (profile, experiences, education, certifications) = tokio::try_join!(
        store.get_profile(),
        store.get_all_experience(),
        store.get_all_education(),
        store.get_all_certifications(),
    )?;

    Ok(AboutPage {
        profile,
        experiences: views(experiences),
        education: views(education),
        certifications,
    })
}

pub async fn projects(store: &ContentStore) -> Result<ProjectsPage> {
    Ok(ProjectsPage {
        projects: store.get_all_projects().await?,
    })
}

pub async fn skills(store: &ContentStore) -> Result<SkillsPage> {
    Ok(SkillsPage {
        groups: group_skills(store.get_all_skills().await?),
    })
}

pub async fn contact(store: &ContentStore) -> Result<ContactPage> {
    Ok(ContactPage {
        profile: store.get_profile().await?,
        ..Default::default()
    })
}
