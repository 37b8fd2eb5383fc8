use async_trait::async_trait;
use sqlx::FromRow;
use uuid::Uuid;

use super::{db_error, expect_affected, PgStore};
use crate::features::disasters::models::{Disaster, DisasterFilter, DisasterPatch, NewDisaster};
use crate::features::fundraisers::models::{
    Donation, DonationFilter, DonationType, Fundraiser, FundraiserPatch, NewDonation,
    NewFundraiser,
};
use crate::features::reports::models::{NewReport, Report, ReportFilter};
use crate::features::requests::models::{
    NewVictimRequest, RequestFilter, VictimRequest, VictimRequestPatch, VictimRequestWithProfile,
};
use crate::features::resources::models::{
    AllocationFilter, NewAllocation, NewResource, Resource, ResourceAllocation, ResourcePatch,
};
use crate::features::users::models::{Profile, Role, User, UserPatch};
use crate::features::volunteer_calls::models::{
    ApplicationFilter, ApplicationPatch, NewApplication, NewPosting, VolunteerCallApplication,
    VolunteerCallPosting,
};
use crate::features::volunteers::models::{
    CallFilter, NewVolunteer, NewVolunteerCall, Volunteer, VolunteerCall, VolunteerCallPatch,
    VolunteerFilter, VolunteerPatch, VolunteerWithProfile,
};
use crate::store::{
    DisasterStore, FundraisingStore, PostingStore, ReportStore, ResourceStore, StoreError,
    StoreResult, UserStore, VictimRequestStore, VolunteerCallStore, VolunteerStore,
};

/// Profile columns of a `LEFT JOIN profiles`; all null when the row is missing.
#[derive(Debug, FromRow)]
struct JoinedProfile {
    profile_id: Option<Uuid>,
    profile_name: Option<String>,
    profile_contact: Option<String>,
}

impl JoinedProfile {
    fn into_profile(self) -> Option<Profile> {
        self.profile_id.map(|id| Profile {
            id,
            name: self.profile_name.unwrap_or_default(),
            contact: self.profile_contact,
        })
    }
}

#[derive(Debug, FromRow)]
struct RequestRow {
    #[sqlx(flatten)]
    request: VictimRequest,
    #[sqlx(flatten)]
    profile: JoinedProfile,
}

#[derive(Debug, FromRow)]
struct VolunteerRow {
    #[sqlx(flatten)]
    volunteer: Volunteer,
    #[sqlx(flatten)]
    profile: JoinedProfile,
}

#[async_trait]
impl UserStore for PgStore {
    async fn list_users(&self) -> StoreResult<Vec<User>> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, name, phone, is_active, created_at
            FROM profiles
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("list", "Users"))
    }

    async fn update_user(&self, id: Uuid, patch: UserPatch) -> StoreResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE profiles
            SET name = COALESCE($2, name),
                phone = COALESCE($3, phone),
                is_active = COALESCE($4, is_active)
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(patch.name)
        .bind(patch.phone)
        .bind(patch.is_active)
        .execute(&self.pool)
        .await
        .map_err(db_error("update", "User"))?;

        expect_affected(result.rows_affected(), "User", id)?;
        tracing::info!("User updated: {}", id);
        Ok(())
    }

    async fn profiles_by_ids(&self, ids: &[Uuid]) -> StoreResult<Vec<Profile>> {
        sqlx::query_as::<_, Profile>(
            r#"
            SELECT id, name, NULLIF(phone, '') AS contact
            FROM profiles
            WHERE id = ANY($1)
            "#,
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("fetch", "Profiles"))
    }

    async fn role_of(&self, user_id: Uuid) -> StoreResult<Option<Role>> {
        sqlx::query_scalar::<_, Role>("SELECT role FROM user_roles WHERE user_id = $1")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("fetch", "Role"))
    }
}

#[async_trait]
impl VictimRequestStore for PgStore {
    async fn list_requests(
        &self,
        filter: RequestFilter,
    ) -> StoreResult<Vec<VictimRequestWithProfile>> {
        let rows = sqlx::query_as::<_, RequestRow>(
            r#"
            SELECT
                r.id, r.user_id, r.name, r.location, r.description,
                r.urgency, r.status, r.created_at, r.updated_at,
                p.id AS profile_id, p.name AS profile_name,
                NULLIF(p.phone, '') AS profile_contact
            FROM victim_requests r
            LEFT JOIN profiles p ON p.id = r.user_id
            WHERE ($1::uuid IS NULL OR r.user_id = $1)
              AND ($2::review_status IS NULL OR r.status = $2)
            ORDER BY r.created_at DESC
            "#,
        )
        .bind(filter.user_id)
        .bind(filter.status)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("list", "Victim requests"))?;

        Ok(rows
            .into_iter()
            .map(|row| VictimRequestWithProfile {
                request: row.request,
                profile: row.profile.into_profile(),
            })
            .collect())
    }

    async fn create_request(&self, new: NewVictimRequest) -> StoreResult<VictimRequest> {
        let request = sqlx::query_as::<_, VictimRequest>(
            r#"
            INSERT INTO victim_requests (id, user_id, name, location, description, urgency, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, user_id, name, location, description, urgency, status,
                      created_at, updated_at
            "#,
        )
        .bind(Uuid::now_v7())
        .bind(new.user_id)
        .bind(new.name)
        .bind(new.location)
        .bind(new.description)
        .bind(new.urgency)
        .bind(new.status)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("create", "Victim request"))?;

        tracing::info!("Victim request created: {}", request.id);
        Ok(request)
    }

    async fn update_request(&self, id: Uuid, patch: VictimRequestPatch) -> StoreResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE victim_requests
            SET name = COALESCE($2, name),
                location = COALESCE($3, location),
                description = COALESCE($4, description),
                urgency = COALESCE($5, urgency),
                status = COALESCE($6, status),
                updated_at = GREATEST(NOW(), updated_at + INTERVAL '1 microsecond')
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(patch.name)
        .bind(patch.location)
        .bind(patch.description)
        .bind(patch.urgency)
        .bind(patch.status)
        .execute(&self.pool)
        .await
        .map_err(db_error("update", "Victim request"))?;

        expect_affected(result.rows_affected(), "Victim request", id)?;
        tracing::info!("Victim request updated: {}", id);
        Ok(())
    }
}

#[async_trait]
impl DisasterStore for PgStore {
    async fn list_disasters(&self, filter: DisasterFilter) -> StoreResult<Vec<Disaster>> {
        sqlx::query_as::<_, Disaster>(
            r#"
            SELECT id, name, location, description, severity, status, created_at
            FROM disasters
            WHERE ($1::disaster_status IS NULL OR status = $1)
            ORDER BY created_at DESC
            "#,
        )
        .bind(filter.status)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("list", "Disasters"))
    }

    async fn create_disaster(&self, new: NewDisaster) -> StoreResult<Disaster> {
        let disaster = sqlx::query_as::<_, Disaster>(
            r#"
            INSERT INTO disasters (id, name, location, description, severity, status)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, name, location, description, severity, status, created_at
            "#,
        )
        .bind(Uuid::now_v7())
        .bind(new.name)
        .bind(new.location)
        .bind(new.description)
        .bind(new.severity)
        .bind(new.status)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("create", "Disaster"))?;

        tracing::info!("Disaster created: {}", disaster.id);
        Ok(disaster)
    }

    async fn update_disaster(&self, id: Uuid, patch: DisasterPatch) -> StoreResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE disasters
            SET name = COALESCE($2, name),
                location = COALESCE($3, location),
                description = COALESCE($4, description),
                severity = COALESCE($5, severity),
                status = COALESCE($6, status)
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(patch.name)
        .bind(patch.location)
        .bind(patch.description)
        .bind(patch.severity)
        .bind(patch.status)
        .execute(&self.pool)
        .await
        .map_err(db_error("update", "Disaster"))?;

        expect_affected(result.rows_affected(), "Disaster", id)?;
        tracing::info!("Disaster updated: {}", id);
        Ok(())
    }
}

#[async_trait]
impl VolunteerStore for PgStore {
    async fn list_volunteers(
        &self,
        filter: VolunteerFilter,
    ) -> StoreResult<Vec<VolunteerWithProfile>> {
        let rows = sqlx::query_as::<_, VolunteerRow>(
            r#"
            SELECT
                v.id, v.user_id, v.disaster_id, v.skills, v.availability,
                v.location, v.contact_info, v.status, v.created_at,
                p.id AS profile_id, p.name AS profile_name,
                NULLIF(p.phone, '') AS profile_contact
            FROM volunteers v
            LEFT JOIN profiles p ON p.id = v.user_id
            WHERE ($1::uuid IS NULL OR v.user_id = $1)
              AND ($2::volunteer_status IS NULL OR v.status = $2)
            ORDER BY v.created_at DESC
            "#,
        )
        .bind(filter.user_id)
        .bind(filter.status)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("list", "Volunteers"))?;

        Ok(rows
            .into_iter()
            .map(|row| VolunteerWithProfile {
                volunteer: row.volunteer,
                profile: row.profile.into_profile(),
            })
            .collect())
    }

    async fn create_volunteer(&self, new: NewVolunteer) -> StoreResult<Volunteer> {
        let volunteer = sqlx::query_as::<_, Volunteer>(
            r#"
            INSERT INTO volunteers
                (id, user_id, disaster_id, skills, availability, location, contact_info)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, user_id, disaster_id, skills, availability, location,
                      contact_info, status, created_at
            "#,
        )
        .bind(Uuid::now_v7())
        .bind(new.user_id)
        .bind(new.disaster_id)
        .bind(new.skills)
        .bind(new.availability)
        .bind(new.location)
        .bind(new.contact_info)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("register", "Volunteer"))?;

        tracing::info!("Volunteer registered: {}", volunteer.id);
        Ok(volunteer)
    }

    async fn update_volunteer(&self, id: Uuid, patch: VolunteerPatch) -> StoreResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE volunteers
            SET skills = COALESCE($2, skills),
                availability = COALESCE($3, availability),
                location = COALESCE($4, location),
                contact_info = COALESCE($5, contact_info),
                status = COALESCE($6, status)
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(patch.skills)
        .bind(patch.availability)
        .bind(patch.location)
        .bind(patch.contact_info)
        .bind(patch.status)
        .execute(&self.pool)
        .await
        .map_err(db_error("update", "Volunteer"))?;

        expect_affected(result.rows_affected(), "Volunteer", id)?;
        tracing::info!("Volunteer updated: {}", id);
        Ok(())
    }
}

#[async_trait]
impl VolunteerCallStore for PgStore {
    async fn list_calls(&self, filter: CallFilter) -> StoreResult<Vec<VolunteerCall>> {
        sqlx::query_as::<_, VolunteerCall>(
            r#"
            SELECT id, volunteer_id, disaster_id, called_by, called_at, response_status, notes
            FROM volunteer_outreach
            WHERE ($1::uuid IS NULL OR volunteer_id = $1)
              AND ($2::uuid IS NULL OR disaster_id = $2)
            ORDER BY called_at DESC
            "#,
        )
        .bind(filter.volunteer_id)
        .bind(filter.disaster_id)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("list", "Volunteer calls"))
    }

    async fn create_call(&self, new: NewVolunteerCall) -> StoreResult<VolunteerCall> {
        let call = sqlx::query_as::<_, VolunteerCall>(
            r#"
            INSERT INTO volunteer_outreach
                (id, volunteer_id, disaster_id, called_by, response_status, notes)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, volunteer_id, disaster_id, called_by, called_at, response_status, notes
            "#,
        )
        .bind(Uuid::now_v7())
        .bind(new.volunteer_id)
        .bind(new.disaster_id)
        .bind(new.called_by)
        .bind(new.response_status)
        .bind(new.notes)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("log", "Volunteer call"))?;

        tracing::info!("Volunteer call logged: {}", call.id);
        Ok(call)
    }

    async fn update_call(&self, id: Uuid, patch: VolunteerCallPatch) -> StoreResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE volunteer_outreach
            SET response_status = COALESCE($2, response_status),
                notes = COALESCE($3, notes)
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(patch.response_status)
        .bind(patch.notes)
        .execute(&self.pool)
        .await
        .map_err(db_error("update", "Volunteer call"))?;

        expect_affected(result.rows_affected(), "Volunteer call", id)?;
        tracing::info!("Volunteer call updated: {}", id);
        Ok(())
    }
}

#[async_trait]
impl PostingStore for PgStore {
    async fn list_postings(&self) -> StoreResult<Vec<VolunteerCallPosting>> {
        sqlx::query_as::<_, VolunteerCallPosting>(
            r#"
            SELECT id, disaster_name, disaster_location, description, volunteers_needed,
                   priority_level, call_date, required_skills, created_at
            FROM volunteer_calls
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("list", "Volunteer call postings"))
    }

    async fn create_posting(&self, new: NewPosting) -> StoreResult<VolunteerCallPosting> {
        let posting = sqlx::query_as::<_, VolunteerCallPosting>(
            r#"
            INSERT INTO volunteer_calls
                (id, disaster_name, disaster_location, description, volunteers_needed,
                 priority_level, call_date, required_skills)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, disaster_name, disaster_location, description, volunteers_needed,
                      priority_level, call_date, required_skills, created_at
            "#,
        )
        .bind(Uuid::now_v7())
        .bind(new.disaster_name)
        .bind(new.disaster_location)
        .bind(new.description)
        .bind(new.volunteers_needed)
        .bind(new.priority_level)
        .bind(new.call_date)
        .bind(new.required_skills)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("create", "Volunteer call posting"))?;

        tracing::info!("Volunteer call posting created: {}", posting.id);
        Ok(posting)
    }

    async fn delete_posting(&self, id: Uuid) -> StoreResult<()> {
        // Applications go with the posting via ON DELETE CASCADE.
        let result = sqlx::query("DELETE FROM volunteer_calls WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_error("delete", "Volunteer call posting"))?;

        expect_affected(result.rows_affected(), "Volunteer call posting", id)?;
        tracing::info!("Volunteer call posting deleted: {}", id);
        Ok(())
    }

    async fn list_applications(
        &self,
        filter: ApplicationFilter,
    ) -> StoreResult<Vec<VolunteerCallApplication>> {
        sqlx::query_as::<_, VolunteerCallApplication>(
            r#"
            SELECT id, call_id, user_id, status, notes, applied_at
            FROM volunteer_call_applications
            WHERE ($1::uuid IS NULL OR call_id = $1)
              AND ($2::uuid IS NULL OR user_id = $2)
            ORDER BY applied_at DESC
            "#,
        )
        .bind(filter.call_id)
        .bind(filter.user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("list", "Applications"))
    }

    async fn create_application(
        &self,
        new: NewApplication,
    ) -> StoreResult<VolunteerCallApplication> {
        let application = sqlx::query_as::<_, VolunteerCallApplication>(
            r#"
            INSERT INTO volunteer_call_applications (id, call_id, user_id, notes)
            VALUES ($1, $2, $3, $4)
            RETURNING id, call_id, user_id, status, notes, applied_at
            "#,
        )
        .bind(Uuid::now_v7())
        .bind(new.call_id)
        .bind(new.user_id)
        .bind(new.notes)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("create", "Application"))?;

        tracing::info!("Volunteer call application created: {}", application.id);
        Ok(application)
    }

    async fn update_application(&self, id: Uuid, patch: ApplicationPatch) -> StoreResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE volunteer_call_applications
            SET status = COALESCE($2, status),
                notes = COALESCE($3, notes)
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(patch.status)
        .bind(patch.notes)
        .execute(&self.pool)
        .await
        .map_err(db_error("update", "Application"))?;

        expect_affected(result.rows_affected(), "Application", id)?;
        tracing::info!("Volunteer call application updated: {}", id);
        Ok(())
    }
}

#[async_trait]
impl FundraisingStore for PgStore {
    async fn list_fundraisers(&self) -> StoreResult<Vec<Fundraiser>> {
        sqlx::query_as::<_, Fundraiser>(
            r#"
            SELECT id, title, description, goal_amount, current_amount, status,
                   created_at, end_date
            FROM fundraisers
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("list", "Fundraisers"))
    }

    async fn create_fundraiser(&self, new: NewFundraiser) -> StoreResult<Fundraiser> {
        let fundraiser = sqlx::query_as::<_, Fundraiser>(
            r#"
            INSERT INTO fundraisers (id, title, description, goal_amount, status, end_date)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, title, description, goal_amount, current_amount, status,
                      created_at, end_date
            "#,
        )
        .bind(Uuid::now_v7())
        .bind(new.title)
        .bind(new.description)
        .bind(new.goal_amount)
        .bind(new.status)
        .bind(new.end_date)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("create", "Fundraiser"))?;

        tracing::info!("Fundraiser created: {}", fundraiser.id);
        Ok(fundraiser)
    }

    async fn update_fundraiser(&self, id: Uuid, patch: FundraiserPatch) -> StoreResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE fundraisers
            SET title = COALESCE($2, title),
                description = COALESCE($3, description),
                goal_amount = COALESCE($4, goal_amount),
                status = COALESCE($5, status),
                end_date = COALESCE($6, end_date)
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(patch.title)
        .bind(patch.description)
        .bind(patch.goal_amount)
        .bind(patch.status)
        .bind(patch.end_date)
        .execute(&self.pool)
        .await
        .map_err(db_error("update", "Fundraiser"))?;

        expect_affected(result.rows_affected(), "Fundraiser", id)?;
        tracing::info!("Fundraiser updated: {}", id);
        Ok(())
    }

    async fn list_donations(&self, filter: DonationFilter) -> StoreResult<Vec<Donation>> {
        sqlx::query_as::<_, Donation>(
            r#"
            SELECT id, user_id, fundraiser_id, amount, type AS donation_type,
                   resource_name, created_at
            FROM donations
            WHERE ($1::uuid IS NULL OR user_id = $1)
              AND ($2::uuid IS NULL OR fundraiser_id = $2)
            ORDER BY created_at DESC
            "#,
        )
        .bind(filter.user_id)
        .bind(filter.fundraiser_id)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("list", "Donations"))
    }

    async fn record_donation(&self, new: NewDonation) -> StoreResult<Donation> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(db_error("begin transaction for", "Donation"))?;

        let donation = sqlx::query_as::<_, Donation>(
            r#"
            INSERT INTO donations (id, user_id, fundraiser_id, amount, type, resource_name)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, user_id, fundraiser_id, amount, type AS donation_type,
                      resource_name, created_at
            "#,
        )
        .bind(Uuid::now_v7())
        .bind(new.user_id)
        .bind(new.fundraiser_id)
        .bind(new.amount)
        .bind(new.donation_type)
        .bind(new.resource_name)
        .fetch_one(&mut *tx)
        .await
        .map_err(db_error("record", "Donation"))?;

        if donation.donation_type == DonationType::Money {
            let credited = sqlx::query(
                "UPDATE fundraisers SET current_amount = current_amount + $2 WHERE id = $1",
            )
            .bind(donation.fundraiser_id)
            .bind(donation.amount)
            .execute(&mut *tx)
            .await
            .map_err(db_error("credit", "Fundraiser"))?
            .rows_affected();

            if credited == 0 {
                tracing::warn!(
                    "Donation {} recorded against unknown fundraiser {}",
                    donation.id,
                    donation.fundraiser_id
                );
            }
        }

        tx.commit()
            .await
            .map_err(db_error("commit", "Donation"))?;

        tracing::info!("Donation recorded: {}", donation.id);
        Ok(donation)
    }
}

#[async_trait]
impl ResourceStore for PgStore {
    async fn list_resources(&self) -> StoreResult<Vec<Resource>> {
        sqlx::query_as::<_, Resource>(
            r#"
            SELECT id, name, quantity, unit, category, created_at, updated_at
            FROM resources
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("list", "Resources"))
    }

    async fn create_resource(&self, new: NewResource) -> StoreResult<Resource> {
        let resource = sqlx::query_as::<_, Resource>(
            r#"
            INSERT INTO resources (id, name, quantity, unit, category)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, name, quantity, unit, category, created_at, updated_at
            "#,
        )
        .bind(Uuid::now_v7())
        .bind(new.name)
        .bind(new.quantity)
        .bind(new.unit)
        .bind(new.category)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("create", "Resource"))?;

        tracing::info!("Resource created: {}", resource.id);
        Ok(resource)
    }

    async fn update_resource(&self, id: Uuid, patch: ResourcePatch) -> StoreResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE resources
            SET name = COALESCE($2, name),
                quantity = COALESCE($3, quantity),
                unit = COALESCE($4, unit),
                category = COALESCE($5, category),
                updated_at = GREATEST(NOW(), updated_at + INTERVAL '1 microsecond')
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(patch.name)
        .bind(patch.quantity)
        .bind(patch.unit)
        .bind(patch.category)
        .execute(&self.pool)
        .await
        .map_err(db_error("update", "Resource"))?;

        expect_affected(result.rows_affected(), "Resource", id)?;
        tracing::info!("Resource updated: {}", id);
        Ok(())
    }

    async fn delete_resource(&self, id: Uuid) -> StoreResult<()> {
        let result = sqlx::query("DELETE FROM resources WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_error("delete", "Resource"))?;

        expect_affected(result.rows_affected(), "Resource", id)?;
        tracing::info!("Resource deleted: {}", id);
        Ok(())
    }

    async fn list_allocations(
        &self,
        filter: AllocationFilter,
    ) -> StoreResult<Vec<ResourceAllocation>> {
        sqlx::query_as::<_, ResourceAllocation>(
            r#"
            SELECT id, resource_id, request_id, quantity, allocated_date
            FROM resource_allocations
            WHERE ($1::uuid IS NULL OR resource_id = $1)
              AND ($2::uuid IS NULL OR request_id = $2)
            ORDER BY allocated_date DESC
            "#,
        )
        .bind(filter.resource_id)
        .bind(filter.request_id)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("list", "Allocations"))
    }

    async fn allocate_resource(&self, new: NewAllocation) -> StoreResult<ResourceAllocation> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(db_error("begin transaction for", "Allocation"))?;

        let available =
            sqlx::query_scalar::<_, i32>("SELECT quantity FROM resources WHERE id = $1 FOR UPDATE")
                .bind(new.resource_id)
                .fetch_optional(&mut *tx)
                .await
                .map_err(db_error("lock", "Resource"))?
                .ok_or_else(|| StoreError::not_found("Resource", new.resource_id))?;

        self.policy.check(available, new.quantity)?;

        let allocation = sqlx::query_as::<_, ResourceAllocation>(
            r#"
            INSERT INTO resource_allocations (id, resource_id, request_id, quantity)
            VALUES ($1, $2, $3, $4)
            RETURNING id, resource_id, request_id, quantity, allocated_date
            "#,
        )
        .bind(Uuid::now_v7())
        .bind(new.resource_id)
        .bind(new.request_id)
        .bind(new.quantity)
        .fetch_one(&mut *tx)
        .await
        .map_err(db_error("create", "Allocation"))?;

        sqlx::query(
            r#"
            UPDATE resources
            SET quantity = quantity - $2,
                updated_at = GREATEST(NOW(), updated_at + INTERVAL '1 microsecond')
            WHERE id = $1
            "#,
        )
        .bind(new.resource_id)
        .bind(new.quantity)
        .execute(&mut *tx)
        .await
        .map_err(db_error("decrement", "Resource"))?;

        tx.commit()
            .await
            .map_err(db_error("commit", "Allocation"))?;

        tracing::info!(
            "Resource {} allocated to request {}: {} units, {} remaining",
            allocation.resource_id,
            allocation.request_id,
            allocation.quantity,
            available - allocation.quantity
        );
        Ok(allocation)
    }
}

#[async_trait]
impl ReportStore for PgStore {
    async fn list_reports(&self, filter: ReportFilter) -> StoreResult<Vec<Report>> {
        sqlx::query_as::<_, Report>(
            r#"
            SELECT id, user_id, report, report_type, report_date, request_id, volunteer_id
            FROM reports
            WHERE ($1::uuid IS NULL OR user_id = $1)
            ORDER BY report_date DESC
            "#,
        )
        .bind(filter.user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("list", "Reports"))
    }

    async fn create_report(&self, new: NewReport) -> StoreResult<Report> {
        let report = sqlx::query_as::<_, Report>(
            r#"
            INSERT INTO reports (id, user_id, report, report_type, request_id, volunteer_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, user_id, report, report_type, report_date, request_id, volunteer_id
            "#,
        )
        .bind(Uuid::now_v7())
        .bind(new.user_id)
        .bind(new.report)
        .bind(new.report_type)
        .bind(new.request_id)
        .bind(new.volunteer_id)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("create", "Report"))?;

        tracing::info!("Report created: {}", report.id);
        Ok(report)
    }

    async fn delete_report(&self, id: Uuid) -> StoreResult<()> {
        let result = sqlx::query("DELETE FROM reports WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_error("delete", "Report"))?;

        expect_affected(result.rows_affected(), "Report", id)?;
        tracing::info!("Report deleted: {}", id);
        Ok(())
    }
}
