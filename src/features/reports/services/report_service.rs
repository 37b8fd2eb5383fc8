use std::sync::Arc;

use uuid::Uuid;

use crate::core::error::Result;
use crate::features::reports::dtos::{CreateReportDto, ReportResponseDto};
use crate::features::reports::models::{NewReport, Report, ReportFilter, ReportWithProfile};
use crate::features::users::models::Profile;
use crate::shared::constants::DEFAULT_REPORT_TYPE;
use crate::store::batch::batch_resolve;
use crate::store::ReliefStore;

pub struct ReportService {
    store: Arc<dyn ReliefStore>,
}

impl ReportService {
    pub fn new(store: Arc<dyn ReliefStore>) -> Self {
        Self { store }
    }

    pub async fn create(&self, user_id: Uuid, dto: CreateReportDto) -> Result<ReportResponseDto> {
        let report_type = dto
            .report_type
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| DEFAULT_REPORT_TYPE.to_string());

        let new = NewReport {
            user_id,
            report: dto.report.trim().to_string(),
            report_type: Some(report_type),
            request_id: dto.request_id,
            volunteer_id: dto.volunteer_id,
        };
        let report = self.store.create_report(new).await?;
        tracing::info!("Report {} submitted by {}", report.id, user_id);
        Ok(report.into())
    }

    pub async fn list_mine(&self, user_id: Uuid) -> Result<Vec<ReportResponseDto>> {
        let filter = ReportFilter {
            user_id: Some(user_id),
        };
        let reports = self.store.list_reports(filter).await?;
        Ok(reports.into_iter().map(ReportResponseDto::from).collect())
    }

    /// All reports with their authors' profiles. A failed profile lookup
    /// leaves `profile` empty instead of failing the list.
    pub async fn list_all(&self) -> Result<Vec<ReportResponseDto>> {
        let reports = self.store.list_reports(ReportFilter::default()).await?;
        let store = self.store.clone();
        let joined = batch_resolve(
            reports,
            |r: &Report| Some(r.user_id),
            |p: &Profile| p.id,
            move |ids: Vec<Uuid>| async move { store.profiles_by_ids(&ids).await },
        )
        .await;

        Ok(joined
            .into_iter()
            .map(|(report, profile)| ReportWithProfile { report, profile })
            .map(ReportResponseDto::from)
            .collect())
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        self.store.delete_report(id).await?;
        tracing::info!("Report deleted: {}", id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::AppError;
    use crate::shared::test_helpers::memory_store;
    use crate::store::SessionStore;
    use fake::faker::lorem::en::Sentence;
    use fake::Fake;

    fn report(text: String, report_type: Option<&str>) -> CreateReportDto {
        CreateReportDto {
            report: text,
            report_type: report_type.map(str::to_string),
            request_id: None,
            volunteer_id: None,
        }
    }

    #[tokio::test]
    async fn missing_type_defaults_to_field_report() {
        let service = ReportService::new(memory_store().await);
        let author = Uuid::now_v7();

        let created = service
            .create(author, report(Sentence(3..8).fake(), None))
            .await
            .unwrap();
        assert_eq!(created.report_type.as_deref(), Some(DEFAULT_REPORT_TYPE));

        let blank = service
            .create(author, report(Sentence(3..8).fake(), Some("  ")))
            .await
            .unwrap();
        assert_eq!(blank.report_type.as_deref(), Some(DEFAULT_REPORT_TYPE));

        let typed = service
            .create(author, report(Sentence(3..8).fake(), Some("Logistics")))
            .await
            .unwrap();
        assert_eq!(typed.report_type.as_deref(), Some("Logistics"));
    }

    #[tokio::test]
    async fn list_all_resolves_author_profiles() {
        let store = memory_store().await;
        assert!(store.register("wati@example.org", "secret1", "Wati", "0817").await);
        let wati = store.current_user().await.unwrap();
        let service = ReportService::new(store);

        service
            .create(wati.id, report("Distributed 40 blankets".to_string(), None))
            .await
            .unwrap();
        service
            .create(Uuid::now_v7(), report("Road to camp cleared".to_string(), None))
            .await
            .unwrap();

        let all = service.list_all().await.unwrap();
        assert_eq!(all.len(), 2);
        let by_wati = all.iter().find(|r| r.user_id == wati.id).unwrap();
        assert_eq!(by_wati.profile.as_ref().unwrap().name, "Wati");
        assert_eq!(all.iter().filter(|r| r.profile.is_none()).count(), 1);

        let mine = service.list_mine(wati.id).await.unwrap();
        assert_eq!(mine.len(), 1);
        assert!(mine[0].profile.is_none());
    }

    #[tokio::test]
    async fn deleting_unknown_report_is_not_found() {
        let service = ReportService::new(memory_store().await);
        let result = service.delete(Uuid::now_v7()).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }
}
