use std::sync::Arc;

use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::fundraisers::dtos::{
    CreateDonationDto, CreateFundraiserDto, DonationResponseDto, FundraiserResponseDto,
};
use crate::features::fundraisers::models::{
    DonationFilter, DonationType, FundraiserPatch, NewDonation, NewFundraiser,
};
use crate::shared::status::ReviewStatus;
use crate::store::ReliefStore;

pub struct FundraiserService {
    store: Arc<dyn ReliefStore>,
}

impl FundraiserService {
    pub fn new(store: Arc<dyn ReliefStore>) -> Self {
        Self { store }
    }

    /// Fundraisers open for donations
    pub async fn list_approved(&self) -> Result<Vec<FundraiserResponseDto>> {
        let fundraisers = self.store.list_fundraisers().await?;
        Ok(fundraisers
            .into_iter()
            .filter(|f| f.status == ReviewStatus::Approved)
            .map(FundraiserResponseDto::from)
            .collect())
    }

    pub async fn list_all(&self) -> Result<Vec<FundraiserResponseDto>> {
        let fundraisers = self.store.list_fundraisers().await?;
        Ok(fundraisers
            .into_iter()
            .map(FundraiserResponseDto::from)
            .collect())
    }

    pub async fn create(&self, dto: CreateFundraiserDto) -> Result<FundraiserResponseDto> {
        let new = NewFundraiser {
            title: dto.title.trim().to_string(),
            description: dto.description,
            goal_amount: dto.goal_amount,
            status: dto.status,
            end_date: dto.end_date,
        };
        let fundraiser = self.store.create_fundraiser(new).await?;
        Ok(fundraiser.into())
    }

    pub async fn update_status(
        &self,
        id: Uuid,
        status: ReviewStatus,
    ) -> Result<FundraiserResponseDto> {
        let current = self.find(id).await?;
        if !current.status.can_transition_to(status) {
            return Err(AppError::Conflict(format!(
                "Cannot move fundraiser from {} to {}",
                current.status, status
            )));
        }

        let patch = FundraiserPatch {
            status: Some(status),
            ..Default::default()
        };
        self.store.update_fundraiser(id, patch).await?;
        tracing::info!("Fundraiser {} moved to {}", id, status);
        self.find(id).await
    }

    /// Record a donation by `user_id`. Money donations credit the fundraiser.
    pub async fn donate(&self, user_id: Uuid, dto: CreateDonationDto) -> Result<DonationResponseDto> {
        let resource_name = dto
            .resource_name
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty());

        let resource_name = match dto.donation_type {
            DonationType::Resource => Some(resource_name.ok_or_else(|| {
                AppError::Validation("resource_name is required for resource donations".to_string())
            })?),
            DonationType::Money => None,
        };

        let new = NewDonation {
            user_id,
            fundraiser_id: dto.fundraiser_id,
            amount: dto.amount,
            donation_type: dto.donation_type,
            resource_name,
        };
        let donation = self.store.record_donation(new).await?;
        Ok(donation.into())
    }

    pub async fn list_my_donations(&self, user_id: Uuid) -> Result<Vec<DonationResponseDto>> {
        let filter = DonationFilter {
            user_id: Some(user_id),
            ..Default::default()
        };
        let donations = self.store.list_donations(filter).await?;
        Ok(donations.into_iter().map(DonationResponseDto::from).collect())
    }

    pub async fn list_donations(
        &self,
        fundraiser_id: Option<Uuid>,
    ) -> Result<Vec<DonationResponseDto>> {
        let filter = DonationFilter {
            fundraiser_id,
            ..Default::default()
        };
        let donations = self.store.list_donations(filter).await?;
        Ok(donations.into_iter().map(DonationResponseDto::from).collect())
    }

    async fn find(&self, id: Uuid) -> Result<FundraiserResponseDto> {
        self.store
            .list_fundraisers()
            .await?
            .into_iter()
            .find(|f| f.id == id)
            .map(FundraiserResponseDto::from)
            .ok_or_else(|| AppError::NotFound(format!("Fundraiser with id '{}' not found", id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::memory_store;
    use rust_decimal::Decimal;

    fn fundraiser_dto(goal: i64, status: ReviewStatus) -> CreateFundraiserDto {
        CreateFundraiserDto {
            title: "Flood Fund".to_string(),
            description: String::new(),
            goal_amount: Decimal::from(goal),
            status,
            end_date: None,
        }
    }

    fn money(fundraiser_id: Uuid, amount: i64) -> CreateDonationDto {
        CreateDonationDto {
            fundraiser_id,
            amount: Decimal::from(amount),
            donation_type: DonationType::Money,
            resource_name: None,
        }
    }

    #[tokio::test]
    async fn flood_fund_reaches_quarter_of_goal() {
        let service = FundraiserService::new(memory_store().await);
        let fund = service
            .create(fundraiser_dto(1000, ReviewStatus::Approved))
            .await
            .unwrap();

        service.donate(Uuid::now_v7(), money(fund.id, 100)).await.unwrap();
        service.donate(Uuid::now_v7(), money(fund.id, 150)).await.unwrap();

        let listed = service.list_approved().await.unwrap();
        assert_eq!(listed[0].current_amount, Decimal::from(250));
        assert_eq!(listed[0].progress_percent, Decimal::from(25));
    }

    #[tokio::test]
    async fn resource_donation_needs_a_name_and_does_not_credit() {
        let service = FundraiserService::new(memory_store().await);
        let fund = service
            .create(fundraiser_dto(500, ReviewStatus::Approved))
            .await
            .unwrap();

        let mut dto = money(fund.id, 10);
        dto.donation_type = DonationType::Resource;
        dto.resource_name = Some("  ".to_string());
        assert!(matches!(
            service.donate(Uuid::now_v7(), dto).await,
            Err(AppError::Validation(_))
        ));

        let mut dto = money(fund.id, 10);
        dto.donation_type = DonationType::Resource;
        dto.resource_name = Some("Blankets".to_string());
        let donation = service.donate(Uuid::now_v7(), dto).await.unwrap();
        assert_eq!(donation.resource_name.as_deref(), Some("Blankets"));

        let listed = service.list_all().await.unwrap();
        assert_eq!(listed[0].current_amount, Decimal::ZERO);
    }

    #[tokio::test]
    async fn only_approved_fundraisers_are_listed_for_donors() {
        let service = FundraiserService::new(memory_store().await);
        let pending = service
            .create(fundraiser_dto(100, ReviewStatus::Pending))
            .await
            .unwrap();
        assert!(service.list_approved().await.unwrap().is_empty());

        service
            .update_status(pending.id, ReviewStatus::Approved)
            .await
            .unwrap();
        assert_eq!(service.list_approved().await.unwrap().len(), 1);

        let result = service.update_status(pending.id, ReviewStatus::Pending).await;
        assert!(matches!(result, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn donations_are_listed_per_donor_and_per_fundraiser() {
        let service = FundraiserService::new(memory_store().await);
        let a = service.create(fundraiser_dto(100, ReviewStatus::Approved)).await.unwrap();
        let b = service.create(fundraiser_dto(100, ReviewStatus::Approved)).await.unwrap();
        let donor = Uuid::now_v7();

        service.donate(donor, money(a.id, 5)).await.unwrap();
        service.donate(donor, money(b.id, 5)).await.unwrap();
        service.donate(Uuid::now_v7(), money(a.id, 5)).await.unwrap();

        assert_eq!(service.list_my_donations(donor).await.unwrap().len(), 2);
        assert_eq!(service.list_donations(Some(a.id)).await.unwrap().len(), 2);
        assert_eq!(service.list_donations(None).await.unwrap().len(), 3);
    }
}
