//! Content store: every read the public pages need and every write the admin
//! API performs.
//!
//! All orderings fall back to SQLite insertion order (`rowid`) so equal sort
//! keys still come back in a stable order.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{types::Json, QueryBuilder, Sqlite, SqlitePool};
use uuid::Uuid;

use crate::{
    db::{
        inputs::{
            CertificationInput, ContactForm, EducationInput, ExperienceInput, ProfileInput,
            ProjectInput, SkillInput, TestimonialInput,
        },
        models::{
            Certification, ContactMessage, Education, Experience, Profile, Project, Skill,
            SkillCategory, Testimonial,
        },
    },
    error::Result,
};

const PROFILE_COLUMNS: &str = "id, name, title, bio, email, phone, location, github, linkedin, twitter, profile_image, resume";
const SKILL_COLUMNS: &str = "id, name, category, proficiency, icon_type, icon";
const PROJECT_COLUMNS: &str = "id, title, description, image, technologies, github_link, live_link, is_featured, created_date";
const EXPERIENCE_COLUMNS: &str =
    "id, company, position, description, start_date, end_date, is_current";
const EDUCATION_COLUMNS: &str =
    "id, institution, degree, field_of_study, start_date, end_date, grade, description";
const CERTIFICATION_COLUMNS: &str =
    "id, name, issuing_organization, issue_date, credential_id, credential_url";
const MESSAGE_COLUMNS: &str = "id, name, email, subject, message, created_at, is_read";
const TESTIMONIAL_COLUMNS: &str = "id, name, position, company, image, testimonial, rating";

const SKILL_ORDER: &str = " ORDER BY proficiency DESC, name ASC, rowid ASC";
const BULK_CHUNK_SIZE: usize = 500;

const PROJECT_ORDER: &str = " ORDER BY created_date DESC, rowid DESC";
const TIMELINE_ORDER: &str = " ORDER BY start_date DESC, rowid DESC";
const CERTIFICATION_ORDER: &str = " ORDER BY issue_date DESC, rowid DESC";
const MESSAGE_ORDER: &str = " ORDER BY created_at DESC, rowid DESC";
const TESTIMONIAL_ORDER: &str = " ORDER BY rowid ASC";

/// Optional filters accepted by the admin list endpoints. Each entity only
/// looks at the fields that apply to it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListFilter {
    pub q: Option<String>,
    pub category: Option<SkillCategory>,
    pub featured: Option<bool>,
    pub current: Option<bool>,
    pub rating: Option<i64>,
    pub is_read: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardStats {
    pub total_projects: i64,
    pub featured_projects: i64,
    pub total_skills: i64,
    pub unread_messages: i64,
    pub total_certifications: i64,
}

fn sql_limit(limit: usize) -> i64 {
    i64::try_from(limit).unwrap_or(i64::MAX)
}

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

fn push_search(qb: &mut QueryBuilder<'_, Sqlite>, columns: &[&str], q: Option<&str>) {
    let Some(q) = q.map(str::trim).filter(|q| !q.is_empty()) else {
        return;
    };
    let pattern = format!("%{q}%");

    qb.push(" AND (");
    for (i, column) in columns.iter().enumerate() {
        if i > 0 {
            qb.push(" OR ");
        }
        qb.push(*column).push(" LIKE ").push_bind(pattern.clone());
    }
    qb.push(")");
}

#[derive(Clone)]
pub struct ContentStore {
    pool: SqlitePool,
}

impl ContentStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    // Profile

    /// The canonical profile is the earliest inserted row.
    pub async fn get_profile(&self) -> Result<Option<Profile>> {
        let mut rows = sqlx::query_as::<_, Profile>(&format!(
            "SELECT {PROFILE_COLUMNS} FROM profiles ORDER BY rowid ASC LIMIT 2"
        ))
        .fetch_all(&self.pool)
        .await?;

        if rows.len() > 1 {
            tracing::warn!(
                "Multiple profile rows found, using the earliest ({})",
                rows[0].id
            );
        }

        rows.truncate(1);
        Ok(rows.pop())
    }

    /// Updates the canonical profile in place, or creates it if none exists.
    ///
    /// The id lookup and the write are one statement, so concurrent calls on
    /// an empty table still produce a single row.
    pub async fn upsert_profile(&self, input: ProfileInput) -> Result<Profile> {
        let id = sqlx::query_scalar::<_, String>(
            r#"
            INSERT INTO profiles (id, name, title, bio, email, phone, location, github, linkedin, twitter, profile_image, resume)
            VALUES (
                COALESCE((SELECT id FROM profiles ORDER BY rowid ASC LIMIT 1), ?),
                ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?
            )
            ON CONFLICT(id) DO UPDATE SET
                name = excluded.name,
                title = excluded.title,
                bio = excluded.bio,
                email = excluded.email,
                phone = excluded.phone,
                location = excluded.location,
                github = excluded.github,
                linkedin = excluded.linkedin,
                twitter = excluded.twitter,
                profile_image = excluded.profile_image,
                resume = excluded.resume
            RETURNING id
            "#,
        )
        .bind(new_id())
        .bind(&input.name)
        .bind(&input.title)
        .bind(&input.bio)
        .bind(&input.email)
        .bind(&input.phone)
        .bind(&input.location)
        .bind(&input.github)
        .bind(&input.linkedin)
        .bind(&input.twitter)
        .bind(&input.profile_image)
        .bind(&input.resume)
        .fetch_one(&self.pool)
        .await?;

        Ok(Profile {
            id,
            name: input.name,
            title: input.title,
            bio: input.bio,
            email: input.email,
            phone: input.phone,
            location: input.location,
            github: input.github,
            linkedin: input.linkedin,
            twitter: input.twitter,
            profile_image: input.profile_image,
            resume: input.resume,
        })
    }

    // Skills

    pub async fn get_all_skills(&self) -> Result<Vec<Skill>> {
        self.list_skills(&ListFilter::default()).await
    }

    pub async fn get_skills_by_category(&self, category: SkillCategory) -> Result<Vec<Skill>> {
        self.list_skills(&ListFilter {
            category: Some(category),
            ..Default::default()
        })
        .await
    }

    pub async fn list_skills(&self, filter: &ListFilter) -> Result<Vec<Skill>> {
        let mut qb = QueryBuilder::<Sqlite>::new(format!(
            "SELECT {SKILL_COLUMNS} FROM skills WHERE 1 = 1"
        ));
        if let Some(category) = filter.category {
            qb.push(" AND category = ").push_bind(category);
        }
        push_search(&mut qb, &["name"], filter.q.as_deref());
        qb.push(SKILL_ORDER);

        Ok(qb.build_query_as::<Skill>().fetch_all(&self.pool).await?)
    }

    pub async fn get_skill(&self, id: &str) -> Result<Option<Skill>> {
        Ok(sqlx::query_as::<_, Skill>(&format!(
            "SELECT {SKILL_COLUMNS} FROM skills WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?)
    }

    pub async fn create_skill(&self, input: SkillInput) -> Result<Skill> {
        let skill = Skill {
            id: new_id(),
            name: input.name,
            category: input.category,
            proficiency: input.proficiency,
            icon_type: input.icon_type,
            icon: input.icon,
        };

        sqlx::query(
            "INSERT INTO skills (id, name, category, proficiency, icon_type, icon) VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(&skill.id)
        .bind(&skill.name)
        .bind(skill.category)
        .bind(skill.proficiency)
        .bind(skill.icon_type)
        .bind(&skill.icon)
        .execute(&self.pool)
        .await?;

        Ok(skill)
    }

    pub async fn update_skill(&self, id: &str, input: SkillInput) -> Result<Option<Skill>> {
        let result = sqlx::query(
            "UPDATE skills SET name = ?, category = ?, proficiency = ?, icon_type = ?, icon = ? WHERE id = ?",
        )
        .bind(&input.name)
        .bind(input.category)
        .bind(input.proficiency)
        .bind(input.icon_type)
        .bind(&input.icon)
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }
        self.get_skill(id).await
    }

    pub async fn delete_skill(&self, id: &str) -> Result<bool> {
        self.delete_from("skills", id).await
    }

    // Projects

    pub async fn get_featured_projects(&self, limit: usize) -> Result<Vec<Project>> {
        Ok(sqlx::query_as::<_, Project>(&format!(
            "SELECT {PROJECT_COLUMNS} FROM projects WHERE is_featured = 1{PROJECT_ORDER} LIMIT ?"
        ))
        .bind(sql_limit(limit))
        .fetch_all(&self.pool)
        .await?)
    }

    pub async fn get_all_projects(&self) -> Result<Vec<Project>> {
        self.list_projects(&ListFilter::default()).await
    }

    pub async fn list_projects(&self, filter: &ListFilter) -> Result<Vec<Project>> {
        let mut qb = QueryBuilder::<Sqlite>::new(format!(
            "SELECT {PROJECT_COLUMNS} FROM projects WHERE 1 = 1"
        ));
        if let Some(featured) = filter.featured {
            qb.push(" AND is_featured = ").push_bind(featured);
        }
        push_search(
            &mut qb,
            &["title", "description", "technologies"],
            filter.q.as_deref(),
        );
        qb.push(PROJECT_ORDER);

        Ok(qb.build_query_as::<Project>().fetch_all(&self.pool).await?)
    }

    pub async fn get_project(&self, id: &str) -> Result<Option<Project>> {
        Ok(sqlx::query_as::<_, Project>(&format!(
            "SELECT {PROJECT_COLUMNS} FROM projects WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?)
    }

    pub async fn create_project(&self, input: ProjectInput) -> Result<Project> {
        self.create_project_dated(input, Utc::now().date_naive())
            .await
    }

    /// Inserts a project with an explicit creation date. The date is never
    /// changed afterwards.
    pub async fn create_project_dated(
        &self,
        input: ProjectInput,
        created_date: NaiveDate,
    ) -> Result<Project> {
        let project = Project {
            id: new_id(),
            title: input.title,
            description: input.description,
            image: input.image,
            technologies: Json(input.technologies),
            github_link: input.github_link,
            live_link: input.live_link,
            is_featured: input.is_featured,
            created_date,
        };

        sqlx::query(
            r#"
            INSERT INTO projects (id, title, description, image, technologies, github_link, live_link, is_featured, created_date)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&project.id)
        .bind(&project.title)
        .bind(&project.description)
        .bind(&project.image)
        .bind(&project.technologies)
        .bind(&project.github_link)
        .bind(&project.live_link)
        .bind(project.is_featured)
        .bind(project.created_date)
        .execute(&self.pool)
        .await?;

        Ok(project)
    }

    pub async fn update_project(&self, id: &str, input: ProjectInput) -> Result<Option<Project>> {
        let result = sqlx::query(
            r#"
            UPDATE projects
            SET title = ?, description = ?, image = ?, technologies = ?, github_link = ?, live_link = ?, is_featured = ?
            WHERE id = ?
            "#,
        )
        .bind(&input.title)
        .bind(&input.description)
        .bind(&input.image)
        .bind(Json(&input.technologies))
        .bind(&input.github_link)
        .bind(&input.live_link)
        .bind(input.is_featured)
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }
        self.get_project(id).await
    }

    pub async fn delete_project(&self, id: &str) -> Result<bool> {
        self.delete_from("projects", id).await
    }

    // Experience

    pub async fn get_all_experience(&self) -> Result<Vec<Experience>> {
        self.list_experience(&ListFilter::default()).await
    }

    pub async fn list_experience(&self, filter: &ListFilter) -> Result<Vec<Experience>> {
        let mut qb = QueryBuilder::<Sqlite>::new(format!(
            "SELECT {EXPERIENCE_COLUMNS} FROM experiences WHERE 1 = 1"
        ));
        if let Some(current) = filter.current {
            qb.push(" AND is_current = ").push_bind(current);
        }
        push_search(
            &mut qb,
            &["position", "company", "description"],
            filter.q.as_deref(),
        );
        qb.push(TIMELINE_ORDER);

        Ok(qb
            .build_query_as::<Experience>()
            .fetch_all(&self.pool)
            .await?)
    }

    pub async fn get_experience(&self, id: &str) -> Result<Option<Experience>> {
        Ok(sqlx::query_as::<_, Experience>(&format!(
            "SELECT {EXPERIENCE_COLUMNS} FROM experiences WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?)
    }

    pub async fn create_experience(&self, input: ExperienceInput) -> Result<Experience> {
        let experience = Experience {
            id: new_id(),
            company: input.company,
            position: input.position,
            description: input.description,
            start_date: input.start_date,
            end_date: input.end_date,
            is_current: input.is_current,
        };

        sqlx::query(
            "INSERT INTO experiences (id, company, position, description, start_date, end_date, is_current) VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&experience.id)
        .bind(&experience.company)
        .bind(&experience.position)
        .bind(&experience.description)
        .bind(experience.start_date)
        .bind(experience.end_date)
        .bind(experience.is_current)
        .execute(&self.pool)
        .await?;

        Ok(experience)
    }

    pub async fn update_experience(
        &self,
        id: &str,
        input: ExperienceInput,
    ) -> Result<Option<Experience>> {
        let result = sqlx::query(
            "UPDATE experiences SET company = ?, position = ?, description = ?, start_date = ?, end_date = ?, is_current = ? WHERE id = ?",
        )
        .bind(&input.company)
        .bind(&input.position)
        .bind(&input.description)
        .bind(input.start_date)
        .bind(input.end_date)
        .bind(input.is_current)
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }
        self.get_experience(id).await
    }

    pub async fn delete_experience(&self, id: &str) -> Result<bool> {
        self.delete_from("experiences", id).await
    }

    // Education

    pub async fn get_recent_education(&self, limit: usize) -> Result<Vec<Education>> {
        Ok(sqlx::query_as::<_, Education>(&format!(
            "SELECT {EDUCATION_COLUMNS} FROM education{TIMELINE_ORDER} LIMIT ?"
        ))
        .bind(sql_limit(limit))
        .fetch_all(&self.pool)
        .await?)
    }

    pub async fn get_all_education(&self) -> Result<Vec<Education>> {
        self.list_education(&ListFilter::default()).await
    }

    pub async fn list_education(&self, filter: &ListFilter) -> Result<Vec<Education>> {
        let mut qb = QueryBuilder::<Sqlite>::new(format!(
            "SELECT {EDUCATION_COLUMNS} FROM education WHERE 1 = 1"
        ));
        push_search(
            &mut qb,
            &["degree", "institution", "field_of_study"],
            filter.q.as_deref(),
        );
        qb.push(TIMELINE_ORDER);

        Ok(qb
            .build_query_as::<Education>()
            .fetch_all(&self.pool)
            .await?)
    }

    pub async fn get_education(&self, id: &str) -> Result<Option<Education>> {
        Ok(sqlx::query_as::<_, Education>(&format!(
            "SELECT {EDUCATION_COLUMNS} FROM education WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?)
    }

    pub async fn create_education(&self, input: EducationInput) -> Result<Education> {
        let education = Education {
            id: new_id(),
            institution: input.institution,
            degree: input.degree,
            field_of_study: input.field_of_study,
            start_date: input.start_date,
            end_date: input.end_date,
            grade: input.grade,
            description: input.description,
        };

        sqlx::query(
            r#"
            INSERT INTO education (id, institution, degree, field_of_study, start_date, end_date, grade, description)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&education.id)
        .bind(&education.institution)
        .bind(&education.degree)
        .bind(&education.field_of_study)
        .bind(education.start_date)
        .bind(education.end_date)
        .bind(&education.grade)
        .bind(&education.description)
        .execute(&self.pool)
        .await?;

        Ok(education)
    }

    pub async fn update_education(
        &self,
        id: &str,
        input: EducationInput,
    ) -> Result<Option<Education>> {
        let result = sqlx::query(
            r#"
            UPDATE education
            SET institution = ?, degree = ?, field_of_study = ?, start_date = ?, end_date = ?, grade = ?, description = ?
            WHERE id = ?
            "#,
        )
        .bind(&input.institution)
        .bind(&input.degree)
        .bind(&input.field_of_study)
        .bind(input.start_date)
        .bind(input.end_date)
        .bind(&input.grade)
        .bind(&input.description)
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }
        self.get_education(id).await
    }

    pub async fn delete_education(&self, id: &str) -> Result<bool> {
        self.delete_from("education", id).await
    }

    // Certifications

    pub async fn get_recent_certifications(&self, limit: usize) -> Result<Vec<Certification>> {
        Ok(sqlx::query_as::<_, Certification>(&format!(
            "SELECT {CERTIFICATION_COLUMNS} FROM certifications{CERTIFICATION_ORDER} LIMIT ?"
        ))
        .bind(sql_limit(limit))
        .fetch_all(&self.pool)
        .await?)
    }

    pub async fn get_all_certifications(&self) -> Result<Vec<Certification>> {
        self.list_certifications(&ListFilter::default()).await
    }

    pub async fn list_certifications(&self, filter: &ListFilter) -> Result<Vec<Certification>> {
        let mut qb = QueryBuilder::<Sqlite>::new(format!(
            "SELECT {CERTIFICATION_COLUMNS} FROM certifications WHERE 1 = 1"
        ));
        push_search(
            &mut qb,
            &["name", "issuing_organization", "credential_id"],
            filter.q.as_deref(),
        );
        qb.push(CERTIFICATION_ORDER);

        Ok(qb
            .build_query_as::<Certification>()
            .fetch_all(&self.pool)
            .await?)
    }

    pub async fn get_certification(&self, id: &str) -> Result<Option<Certification>> {
        Ok(sqlx::query_as::<_, Certification>(&format!(
            "SELECT {CERTIFICATION_COLUMNS} FROM certifications WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?)
    }

    pub async fn create_certification(&self, input: CertificationInput) -> Result<Certification> {
        let certification = Certification {
            id: new_id(),
            name: input.name,
            issuing_organization: input.issuing_organization,
            issue_date: input.issue_date,
            credential_id: input.credential_id,
            credential_url: input.credential_url,
        };

        sqlx::query(
            "INSERT INTO certifications (id, name, issuing_organization, issue_date, credential_id, credential_url) VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(&certification.id)
        .bind(&certification.name)
        .bind(&certification.issuing_organization)
        .bind(certification.issue_date)
        .bind(&certification.credential_id)
        .bind(&certification.credential_url)
        .execute(&self.pool)
        .await?;

        Ok(certification)
    }

    pub async fn update_certification(
        &self,
        id: &str,
        input: CertificationInput,
    ) -> Result<Option<Certification>> {
        let result = sqlx::query(
            "UPDATE certifications SET name = ?, issuing_organization = ?, issue_date = ?, credential_id = ?, credential_url = ? WHERE id = ?",
        )
        .bind(&input.name)
        .bind(&input.issuing_organization)
        .bind(input.issue_date)
        .bind(&input.credential_id)
        .bind(&input.credential_url)
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }
        self.get_certification(id).await
    }

    pub async fn delete_certification(&self, id: &str) -> Result<bool> {
        self.delete_from("certifications", id).await
    }

    // Testimonials

    pub async fn get_testimonials(&self, limit: usize) -> Result<Vec<Testimonial>> {
        Ok(sqlx::query_as::<_, Testimonial>(&format!(
            "SELECT {TESTIMONIAL_COLUMNS} FROM testimonials{TESTIMONIAL_ORDER} LIMIT ?"
        ))
        .bind(sql_limit(limit))
        .fetch_all(&self.pool)
        .await?)
    }

    pub async fn list_testimonials(&self, filter: &ListFilter) -> Result<Vec<Testimonial>> {
        let mut qb = QueryBuilder::<Sqlite>::new(format!(
            "SELECT {TESTIMONIAL_COLUMNS} FROM testimonials WHERE 1 = 1"
        ));
        if let Some(rating) = filter.rating {
            qb.push(" AND rating = ").push_bind(rating);
        }
        push_search(
            &mut qb,
            &["name", "position", "company", "testimonial"],
            filter.q.as_deref(),
        );
        qb.push(TESTIMONIAL_ORDER);

        Ok(qb
            .build_query_as::<Testimonial>()
            .fetch_all(&self.pool)
            .await?)
    }

    pub async fn get_testimonial(&self, id: &str) -> Result<Option<Testimonial>> {
        Ok(sqlx::query_as::<_, Testimonial>(&format!(
            "SELECT {TESTIMONIAL_COLUMNS} FROM testimonials WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?)
    }

    pub async fn create_testimonial(&self, input: TestimonialInput) -> Result<Testimonial> {
        let testimonial = Testimonial {
            id: new_id(),
            name: input.name,
            position: input.position,
            company: input.company,
            image: input.image,
            testimonial: input.testimonial,
            rating: input.rating,
        };

        sqlx::query(
            "INSERT INTO testimonials (id, name, position, company, image, testimonial, rating) VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&testimonial.id)
        .bind(&testimonial.name)
        .bind(&testimonial.position)
        .bind(&testimonial.company)
        .bind(&testimonial.image)
        .bind(&testimonial.testimonial)
        .bind(testimonial.rating)
        .execute(&self.pool)
        .await?;

        Ok(testimonial)
    }

    pub async fn update_testimonial(
        &self,
        id: &str,
        input: TestimonialInput,
    ) -> Result<Option<Testimonial>> {
        let result = sqlx::query(
            "UPDATE testimonials SET name = ?, position = ?, company = ?, image = ?, testimonial = ?, rating = ? WHERE id = ?",
        )
        .bind(&input.name)
        .bind(&input.position)
        .bind(&input.company)
        .bind(&input.image)
        .bind(&input.testimonial)
        .bind(input.rating)
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }
        self.get_testimonial(id).await
    }

    pub async fn delete_testimonial(&self, id: &str) -> Result<bool> {
        self.delete_from("testimonials", id).await
    }

    // Contact messages

    /// Stores a validated contact form as an unread message. The insert runs
    /// in its own transaction.
    pub async fn create_contact_message(
        &self,
        form: &ContactForm,
        created_at: DateTime<Utc>,
    ) -> Result<ContactMessage> {
        let message = ContactMessage {
            id: new_id(),
            name: form.name.clone(),
            email: form.email.clone(),
            subject: form.subject.clone(),
            message: form.message.clone(),
            created_at,
            is_read: false,
        };

        let mut tx = self.pool.begin().await?;
        sqlx::query(
            "INSERT INTO contact_messages (id, name, email, subject, message, created_at, is_read) VALUES (?, ?, ?, ?, ?, ?, 0)",
        )
        .bind(&message.id)
        .bind(&message.name)
        .bind(&message.email)
        .bind(&message.subject)
        .bind(&message.message)
        .bind(message.created_at)
        .execute(&mut *tx)
        .await?;
        tx.commit().await?;

        Ok(message)
    }

    pub async fn list_contact_messages(&self, filter: &ListFilter) -> Result<Vec<ContactMessage>> {
        let mut qb = QueryBuilder::<Sqlite>::new(format!(
            "SELECT {MESSAGE_COLUMNS} FROM contact_messages WHERE 1 = 1"
        ));
        if let Some(is_read) = filter.is_read {
            qb.push(" AND is_read = ").push_bind(is_read);
        }
        push_search(
            &mut qb,
            &["name", "email", "subject", "message"],
            filter.q.as_deref(),
        );
        qb.push(MESSAGE_ORDER);

        Ok(qb
            .build_query_as::<ContactMessage>()
            .fetch_all(&self.pool)
            .await?)
    }

    pub async fn get_contact_message(&self, id: &str) -> Result<Option<ContactMessage>> {
        Ok(sqlx::query_as::<_, ContactMessage>(&format!(
            "SELECT {MESSAGE_COLUMNS} FROM contact_messages WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?)
    }

    pub async fn set_message_read(&self, id: &str, is_read: bool) -> Result<Option<ContactMessage>> {
        let result = sqlx::query("UPDATE contact_messages SET is_read = ? WHERE id = ?")
            .bind(is_read)
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }
        self.get_contact_message(id).await
    }

    /// Bulk read/unread toggle. Returns how many rows were updated.
    pub async fn set_messages_read(&self, ids: &[String], is_read: bool) -> Result<u64> {
        if ids.is_empty() {
            return Ok(0);
        }

        let mut tx = self.pool.begin().await?;
        let mut updated = 0;
        // Chunked to stay under SQLite's bound-parameter limit
        for chunk in ids.chunks(BULK_CHUNK_SIZE) {
            let mut qb = QueryBuilder::<Sqlite>::new("UPDATE contact_messages SET is_read = ");
            qb.push_bind(is_read).push(" WHERE id IN (");
            let mut separated = qb.separated(", ");
            for id in chunk {
                separated.push_bind(id.clone());
            }
            separated.push_unseparated(")");

            updated += qb.build().execute(&mut *tx).await?.rows_affected();
        }
        tx.commit().await?;

        Ok(updated)
    }

    pub async fn delete_contact_message(&self, id: &str) -> Result<bool> {
        self.delete_from("contact_messages", id).await
    }

    // Dashboard

    pub async fn dashboard_stats(&self) -> Result<DashboardStats> {
        let (total_projects, featured_projects, total_skills, unread_messages, total_certifications) =
            sqlx::query_as::<_, (i64, i64, i64, i64, i64)>(
                r#"
                SELECT
                    (SELECT COUNT(*) FROM projects),
                    (SELECT COUNT(*) FROM projects WHERE is_featured = 1),
                    (SELECT COUNT(*) FROM skills),
                    (SELECT COUNT(*) FROM contact_messages WHERE is_read = 0),
                    (SELECT COUNT(*) FROM certifications)
                "#,
            )
            .fetch_one(&self.pool)
            .await?;

        Ok(DashboardStats {
            total_projects,
            featured_projects,
            total_skills,
            unread_messages,
            total_certifications,
        })
    }

    async fn delete_from(&self, table: &'static str, id: &str) -> Result<bool> {
        let result = sqlx::query(&format!("DELETE FROM {table} WHERE id = ?"))
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
