use std::sync::Arc;

use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::volunteer_calls::dtos::{
    ApplicationResponseDto, ApplyDto, CreatePostingDto, PostingResponseDto,
};
use crate::features::volunteer_calls::models::{
    ApplicationFilter, ApplicationPatch, ApplicationStatus, ApplicationWithProfile,
    NewApplication, NewPosting, VolunteerCallApplication,
};
use crate::features::users::models::Profile;
use crate::store::batch::batch_resolve;
use crate::store::ReliefStore;

pub struct PostingService {
    store: Arc<dyn ReliefStore>,
}

impl PostingService {
    pub fn new(store: Arc<dyn ReliefStore>) -> Self {
        Self { store }
    }

    pub async fn list_postings(&self) -> Result<Vec<PostingResponseDto>> {
        let postings = self.store.list_postings().await?;
        Ok(postings.into_iter().map(PostingResponseDto::from).collect())
    }

    pub async fn create_posting(&self, dto: CreatePostingDto) -> Result<PostingResponseDto> {
        let required_skills = dto
            .required_skills
            .into_iter()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let new = NewPosting {
            disaster_name: dto.disaster_name.trim().to_string(),
            disaster_location: dto.disaster_location.trim().to_string(),
            description: dto.description,
            volunteers_needed: dto.volunteers_needed,
            priority_level: dto.priority_level,
            call_date: dto.call_date,
            required_skills,
        };
        let posting = self.store.create_posting(new).await?;
        Ok(posting.into())
    }

    /// Removes the posting and every application to it.
    pub async fn delete_posting(&self, id: Uuid) -> Result<()> {
        self.store.delete_posting(id).await?;
        Ok(())
    }

    /// Apply to a posting. One application per user per posting.
    pub async fn apply(
        &self,
        user_id: Uuid,
        call_id: Uuid,
        dto: ApplyDto,
    ) -> Result<ApplicationResponseDto> {
        let new = NewApplication {
            call_id,
            user_id,
            notes: dto.notes.filter(|n| !n.trim().is_empty()),
        };
        let application = self.store.create_application(new).await?;
        Ok(application.into())
    }

    pub async fn list_my_applications(&self, user_id: Uuid) -> Result<Vec<ApplicationResponseDto>> {
        let filter = ApplicationFilter {
            user_id: Some(user_id),
            ..Default::default()
        };
        let applications = self.store.list_applications(filter).await?;
        Ok(applications
            .into_iter()
            .map(ApplicationResponseDto::from)
            .collect())
    }

    /// Applications to one posting, each merged with the applicant's profile.
    pub async fn list_applications(&self, call_id: Uuid) -> Result<Vec<ApplicationResponseDto>> {
        let filter = ApplicationFilter {
            call_id: Some(call_id),
            ..Default::default()
        };
        let applications = self.store.list_applications(filter).await?;
        let joined = self.with_profiles(applications).await;
        Ok(joined.into_iter().map(ApplicationResponseDto::from).collect())
    }

    /// Accept or reject a pending application.
    pub async fn update_application_status(
        &self,
        id: Uuid,
        status: ApplicationStatus,
    ) -> Result<ApplicationResponseDto> {
        let current = self.find_application(id).await?;
        if !current.status.can_transition_to(status) {
            let decided = match current.status {
                ApplicationStatus::Accepted => "accepted",
                ApplicationStatus::Rejected => "rejected",
                ApplicationStatus::Pending => "reviewed",
            };
            return Err(AppError::Conflict(format!(
                "Application has already been {}",
                decided
            )));
        }

        let patch = ApplicationPatch {
            status: Some(status),
            ..Default::default()
        };
        self.store.update_application(id, patch).await?;
        tracing::info!("Application {} set to {:?}", id, status);

        let updated = self.find_application(id).await?;
        Ok(updated.into())
    }

    async fn find_application(&self, id: Uuid) -> Result<VolunteerCallApplication> {
        self.store
            .list_applications(ApplicationFilter::default())
            .await?
            .into_iter()
            .find(|a| a.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Application with id '{}' not found", id)))
    }

    async fn with_profiles(
        &self,
        applications: Vec<VolunteerCallApplication>,
    ) -> Vec<ApplicationWithProfile> {
        let store = self.store.clone();
        batch_resolve(
            applications,
            |a: &VolunteerCallApplication| Some(a.user_id),
            |p: &Profile| p.id,
            move |ids: Vec<Uuid>| async move { store.profiles_by_ids(&ids).await },
        )
        .await
        .into_iter()
        .map(|(application, profiles)| ApplicationWithProfile {
            application,
            profiles,
        })
        .collect()
    }
}
