use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::{
    db::{
        inputs::{
            CertificationInput, EducationInput, ExperienceInput, Input, ProfileInput,
            ProjectInput, SkillInput, TestimonialInput,
        },
        models::{
            Certification, ContactMessage, Education, Experience, Profile, Project, Skill,
            Testimonial,
        },
    },
    error::{AppError, Result},
    middleware::auth::AdminUser,
    services::content::{DashboardStats, ListFilter},
    AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(dashboard))
        .route("/profile", get(get_profile).put(put_profile))
        .route("/skills", get(list_skills).post(create_skill))
        .route(
            "/skills/:id",
            get(get_skill).put(update_skill).delete(delete_skill),
        )
        .route("/projects", get(list_projects).post(create_project))
        .route(
            "/projects/:id",
            get(get_project).put(update_project).delete(delete_project),
        )
        .route("/experience", get(list_experience).post(create_experience))
        .route(
            "/experience/:id",
            get(get_experience)
                .put(update_experience)
                .delete(delete_experience),
        )
        .route("/education", get(list_education).post(create_education))
        .route(
            "/education/:id",
            get(get_education)
                .put(update_education)
                .delete(delete_education),
        )
        .route(
            "/certifications",
            get(list_certifications).post(create_certification),
        )
        .route(
            "/certifications/:id",
            get(get_certification)
                .put(update_certification)
                .delete(delete_certification),
        )
        .route(
            "/testimonials",
            get(list_testimonials).post(create_testimonial),
        )
        .route(
            "/testimonials/:id",
            get(get_testimonial)
                .put(update_testimonial)
                .delete(delete_testimonial),
        )
        .route("/messages", get(list_messages))
        .route("/messages/mark-read", post(mark_messages_read))
        .route("/messages/mark-unread", post(mark_messages_unread))
        .route("/messages/:id", get(get_message).delete(delete_message))
        .route("/messages/:id/read", post(mark_message_read))
        .route("/messages/:id/unread", post(mark_message_unread))
}

#[derive(Debug, Serialize)]
pub struct ListResponse<T> {
    pub items: Vec<T>,
    pub count: usize,
}

impl<T> From<Vec<T>> for ListResponse<T> {
    fn from(items: Vec<T>) -> Self {
        Self {
            count: items.len(),
            items,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct BulkReadRequest {
    pub ids: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct BulkReadResponse {
    pub updated: u64,
}

fn found<T>(record: Option<T>, kind: &str) -> Result<T> {
    record.ok_or_else(|| AppError::NotFound(format!("{kind} not found")))
}

fn deleted(removed: bool, kind: &str, id: &str, admin: &AdminUser) -> Result<Json<()>> {
    if !removed {
        return Err(AppError::NotFound(format!("{kind} not found")));
    }
    tracing::info!(admin = %admin.email, %id, "{kind} deleted");
    Ok(Json(()))
}

async fn dashboard(State(state): State<AppState>) -> Result<Json<DashboardStats>> {
    Ok(Json(state.store.dashboard_stats().await?))
}

// Profile

async fn get_profile(State(state): State<AppState>) -> Result<Json<Profile>> {
    Ok(Json(found(state.store.get_profile().await?, "Profile")?))
}

async fn put_profile(
    State(state): State<AppState>,
    admin: AdminUser,
    Json(body): Json<ProfileInput>,
) -> Result<Json<Profile>> {
    let profile = state.store.upsert_profile(body.clean()?).await?;
    tracing::info!(admin = %admin.email, id = %profile.id, "Profile updated");
    Ok(Json(profile))
}

// Skills

async fn list_skills(
    State(state): State<AppState>,
    Query(filter): Query<ListFilter>,
) -> Result<Json<ListResponse<Skill>>> {
    Ok(Json(state.store.list_skills(&filter).await?.into()))
}

async fn get_skill(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<Skill>> {
    Ok(Json(found(state.store.get_skill(&id).await?, "Skill")?))
}

async fn create_skill(
    State(state): State<AppState>,
    admin: AdminUser,
    Json(body): Json<SkillInput>,
) -> Result<Json<Skill>> {
    let skill = state.store.create_skill(body.clean()?).await?;
    tracing::info!(admin = %admin.email, id = %skill.id, "Skill created");
    Ok(Json(skill))
}

async fn update_skill(
    State(state): State<AppState>,
    admin: AdminUser,
    Path(id): Path<String>,
    Json(body): Json<SkillInput>,
) -> Result<Json<Skill>> {
    let skill = found(state.store.update_skill(&id, body.clean()?).await?, "Skill")?;
    tracing::info!(admin = %admin.email, %id, "Skill updated");
    Ok(Json(skill))
}

async fn delete_skill(
    State(state): State<AppState>,
    admin: AdminUser,
    Path(id): Path<String>,
) -> Result<Json<()>> {
    deleted(state.store.delete_skill(&id).await?, "Skill", &id, &admin)
}

// Projects

async fn list_projects(
    State(state): State<AppState>,
    Query(filter): Query<ListFilter>,
) -> Result<Json<ListResponse<Project>>> {
    Ok(Json(state.store.list_projects(&filter).await?.into()))
}

async fn get_project(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Project>> {
    Ok(Json(found(state.store.get_project(&id).await?, "Project")?))
}

async fn create_project(
    State(state): State<AppState>,
    admin: AdminUser,
    Json(body): Json<ProjectInput>,
) -> Result<Json<Project>> {
    let project = state.store.create_project(body.clean()?).await?;
    tracing::info!(admin = %admin.email, id = %project.id, "Project created");
    Ok(Json(project))
}

async fn update_project(
    State(state): State<AppState>,
    admin: AdminUser,
    Path(id): Path<String>,
    Json(body): Json<ProjectInput>,
) -> Result<Json<Project>> {
    let project = found(
        state.store.update_project(&id, body.clean()?).await?,
        "Project",
    )?;
    tracing::info!(admin = %admin.email, %id, "Project updated");
    Ok(Json(project))
}

async fn delete_project(
    State(state): State<AppState>,
    admin: AdminUser,
    Path(id): Path<String>,
) -> Result<Json<()>> {
    deleted(state.store.delete_project(&id).await?, "Project", &id, &admin)
}

// Experience

async fn list_experience(
    State(state): State<AppState>,
    Query(filter): Query<ListFilter>,
) -> Result<Json<ListResponse<Experience>>> {
    Ok(Json(state.store.list_experience(&filter).await?.into()))
}

async fn get_experience(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Experience>> {
    Ok(Json(found(
        state.store.get_experience(&id).await?,
        "Experience",
    )?))
}

async fn create_experience(
    State(state): State<AppState>,
    admin: AdminUser,
    Json(body): Json<ExperienceInput>,
) -> Result<Json<Experience>> {
    let experience = state.store.create_experience(body.clean()?).await?;
    tracing::info!(admin = %admin.email, id = %experience.id, "Experience created");
    Ok(Json(experience))
}

async fn update_experience(
    State(state): State<AppState>,
    admin: AdminUser,
    Path(id): Path<String>,
    Json(body): Json<ExperienceInput>,
) -> Result<Json<Experience>> {
    let experience = found(
        state.store.update_experience(&id, body.clean()?).await?,
        "Experience",
    )?;
    tracing::info!(admin = %admin.email, %id, "Experience updated");
    Ok(Json(experience))
}

async fn delete_experience(
    State(state): State<AppState>,
    admin: AdminUser,
    Path(id): Path<String>,
) -> Result<Json<()>> {
    deleted(
        state.store.delete_experience(&id).await?,
        "Experience",
        &id,
        &admin,
    )
}

// Education

async fn list_education(
    State(state): State<AppState>,
    Query(filter): Query<ListFilter>,
) -> Result<Json<ListResponse<Education>>> {
    Ok(Json(state.store.list_education(&filter).await?.into()))
}

async fn get_education(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Education>> {
    Ok(Json(found(state.store.get_education(&id).await?, "Education")?))
}

async fn create_education(
    State(state): State<AppState>,
    admin: AdminUser,
    Json(body): Json<EducationInput>,
) -> Result<Json<Education>> {
    let education = state.store.create_education(body.clean()?).await?;
    tracing::info!(admin = %admin.email, id = %education.id, "Education created");
    Ok(Json(education))
}

async fn update_education(
    State(state): State<AppState>,
    admin: AdminUser,
    Path(id): Path<String>,
    Json(body): Json<EducationInput>,
) -> Result<Json<Education>> {
    let education = found(
        state.store.update_education(&id, body.clean()?).await?,
        "Education",
    )?;
    tracing::info!(admin = %admin.email, %id, "Education updated");
    Ok(Json(education))
}

async fn delete_education(
    State(state): State<AppState>,
    admin: AdminUser,
    Path(id): Path<String>,
) -> Result<Json<()>> {
    deleted(
        state.store.delete_education(&id).await?,
        "Education",
        &id,
        &admin,
    )
}

// Certifications

async fn list_certifications(
    State(state): State<AppState>,
    Query(filter): Query<ListFilter>,
) -> Result<Json<ListResponse<Certification>>> {
    Ok(Json(state.store.list_certifications(&filter).await?.into()))
}

async fn get_certification(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Certification>> {
    Ok(Json(found(
        state.store.get_certification(&id).await?,
        "Certification",
    )?))
}

async fn create_certification(
    State(state): State<AppState>,
    admin: AdminUser,
    Json(body): Json<CertificationInput>,
) -> Result<Json<Certification>> {
    let certification = state.store.create_certification(body.clean()?).await?;
    tracing::info!(admin = %admin.email, id = %certification.id, "Certification created");
    Ok(Json(certification))
}

async fn update_certification(
    State(state): State<AppState>,
    admin: AdminUser,
    Path(id): Path<String>,
    Json(body): Json<CertificationInput>,
) -> Result<Json<Certification>> {
    let certification = found(
        state.store.update_certification(&id, body.clean()?).await?,
        "Certification",
    )?;
    tracing::info!(admin = %admin.email, %id, "Certification updated");
    Ok(Json(certification))
}

async fn delete_certification(
    State(state): State<AppState>,
    admin: AdminUser,
    Path(id): Path<String>,
) -> Result<Json<()>> {
    deleted(
        state.store.delete_certification(&id).await?,
        "Certification",
        &id,
        &admin,
    )
}

// Testimonials

async fn list_testimonials(
    State(state): State<AppState>,
    Query(filter): Query<ListFilter>,
) -> Result<Json<ListResponse<Testimonial>>> {
    Ok(Json(state.store.list_testimonials(&filter).await?.into()))
}

async fn get_testimonial(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Testimonial>> {
    Ok(Json(found(
        state.store.get_testimonial(&id).await?,
        "Testimonial",
    )?))
}

async fn create_testimonial(
    State(state): State<AppState>,
    admin: AdminUser,
    Json(body): Json<TestimonialInput>,
) -> Result<Json<Testimonial>> {
    let testimonial = state.store.create_testimonial(body.clean()?).await?;
    tracing::info!(admin = %admin.email, id = %testimonial.id, "Testimonial created");
    Ok(Json(testimonial))
}

async fn update_testimonial(
    State(state): State<AppState>,
    admin: AdminUser,
    Path(id): Path<String>,
    Json(body): Json<TestimonialInput>,
) -> Result<Json<Testimonial>> {
    let testimonial = found(
        state.store.update_testimonial(&id, body.clean()?).await?,
        "Testimonial",
    )?;
    tracing::info!(admin = %admin.email, %id, "Testimonial updated");
    Ok(Json(testimonial))
}

async fn delete_testimonial(
    State(state): State<AppState>,
    admin: AdminUser,
    Path(id): Path<String>,
) -> Result<Json<()>> {
    deleted(
        state.store.delete_testimonial(&id).await?,
        "Testimonial",
        &id,
        &admin,
    )
}

// Contact messages

async fn list_messages(
    State(state): State<AppState>,
    Query(filter): Query<ListFilter>,
) -> Result<Json<ListResponse<ContactMessage>>> {
    Ok(Json(state.store.list_contact_messages(&filter).await?.into()))
}

async fn get_message(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ContactMessage>> {
    Ok(Json(found(
        state.store.get_contact_message(&id).await?,
        "Message",
    )?))
}

async fn delete_message(
    State(state): State<AppState>,
    admin: AdminUser,
    Path(id): Path<String>,
) -> Result<Json<()>> {
    deleted(
        state.store.delete_contact_message(&id).await?,
        "Message",
        &id,
        &admin,
    )
}

async fn set_read(
    state: &AppState,
    admin: &AdminUser,
    id: &str,
    is_read: bool,
) -> Result<Json<ContactMessage>> {
    let message = found(state.store.set_message_read(id, is_read).await?, "Message")?;
    tracing::info!(admin = %admin.email, %id, is_read, "Message read state changed");
    Ok(Json(message))
}

async fn mark_message_read(
    State(state): State<AppState>,
    admin: AdminUser,
    Path(id): Path<String>,
) -> Result<Json<ContactMessage>> {
    set_read(&state, &admin, &id, true).await
}

async fn mark_message_unread(
    State(state): State<AppState>,
    admin: AdminUser,
    Path(id): Path<String>,
) -> Result<Json<ContactMessage>> {
    set_read(&state, &admin, &id, false).await
}

async fn set_read_bulk(
    state: &AppState,
    admin: &AdminUser,
    ids: &[String],
    is_read: bool,
) -> Result<Json<BulkReadResponse>> {
    let updated = state.store.set_messages_read(ids, is_read).await?;
    tracing::info!(admin = %admin.email, updated, is_read, "Message read state changed in bulk");
    Ok(Json(BulkReadResponse { updated }))
}

async fn mark_messages_read(
    State(state): State<AppState>,
    admin: AdminUser,
    Json(body): Json<BulkReadRequest>,
) -> Result<Json<BulkReadResponse>> {
    set_read_bulk(&state, &admin, &body.ids, true).await
}

async fn mark_messages_unread(
    State(state): State<AppState>,
    admin: AdminUser,
    Json(body): Json<BulkReadRequest>,
) -> Result<Json<BulkReadResponse>> {
    set_read_bulk(&state, &admin, &body.ids, false).await
}
