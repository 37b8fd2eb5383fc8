use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::features::auth;
use crate::features::dashboard::{dtos as dashboard_dtos, handlers as dashboard_handlers};
use crate::features::disasters::{
    dtos as disasters_dtos, handlers as disasters_handlers, models as disasters_models,
};
use crate::features::fundraisers::{
    dtos as fundraisers_dtos, handlers as fundraisers_handlers, models as fundraisers_models,
};
use crate::features::reports::{dtos as reports_dtos, handlers as reports_handlers};
use crate::features::requests::{dtos as requests_dtos, handlers as requests_handlers};
use crate::features::resources::{dtos as resources_dtos, handlers as resources_handlers};
use crate::features::users::{
    dtos as users_dtos, handlers as users_handlers, models as users_models,
};
use crate::features::volunteer_calls::{
    dtos as volunteer_calls_dtos, handlers as volunteer_calls_handlers,
    models as volunteer_calls_models,
};
use crate::features::volunteers::{
    dtos as volunteers_dtos, handlers as volunteers_handlers, models as volunteers_models,
};
use crate::shared::status::{ReviewStatus, Severity};
use crate::shared::types::{ApiResponse, Meta};
use crate::shared::view_model::{Notification, NotificationKind};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Auth
        auth::handlers::register,
        auth::handlers::login,
        auth::handlers::logout,
        auth::handlers::get_me,
        // Users
        users_handlers::update_own_profile,
        users_handlers::list_users,
        users_handlers::update_user_status,
        // Victim requests
        requests_handlers::create_request,
        requests_handlers::list_my_requests,
        requests_handlers::list_all_requests,
        requests_handlers::update_request_status,
        // Disasters
        disasters_handlers::list_disasters,
        disasters_handlers::admin_list_disasters,
        disasters_handlers::create_disaster,
        disasters_handlers::update_disaster,
        // Volunteers
        volunteers_handlers::register_volunteer,
        volunteers_handlers::list_my_volunteers,
        volunteers_handlers::list_all_volunteers,
        volunteers_handlers::update_volunteer_status,
        // Outreach
        volunteers_handlers::list_calls,
        volunteers_handlers::log_call,
        volunteers_handlers::update_call,
        // Volunteer postings
        volunteer_calls_handlers::list_postings,
        volunteer_calls_handlers::apply_to_posting,
        volunteer_calls_handlers::list_my_applications,
        volunteer_calls_handlers::admin_list_postings,
        volunteer_calls_handlers::create_posting,
        volunteer_calls_handlers::delete_posting,
        volunteer_calls_handlers::list_posting_applications,
        volunteer_calls_handlers::update_application_status,
        // Fundraising
        fundraisers_handlers::list_fundraisers,
        fundraisers_handlers::list_all_fundraisers,
        fundraisers_handlers::create_fundraiser,
        fundraisers_handlers::update_fundraiser_status,
        fundraisers_handlers::create_donation,
        fundraisers_handlers::list_my_donations,
        fundraisers_handlers::list_all_donations,
        // Resources
        resources_handlers::list_resources,
        resources_handlers::create_resource,
        resources_handlers::update_resource,
        resources_handlers::delete_resource,
        resources_handlers::allocate_resource,
        resources_handlers::list_allocations,
        // Reports
        reports_handlers::create_report,
        reports_handlers::list_my_reports,
        reports_handlers::list_all_reports,
        reports_handlers::delete_report,
        // Dashboard
        dashboard_handlers::get_overview,
        dashboard_handlers::quick_add_resource,
        dashboard_handlers::review_request,
    ),
    components(
        schemas(
            Meta,
            ReviewStatus,
            Severity,
            Notification,
            NotificationKind,
            // Auth
            auth::dtos::RegisterRequestDto,
            auth::dtos::LoginRequestDto,
            auth::dtos::AuthResponseDto,
            auth::dtos::AuthUserDto,
            auth::dtos::Dashboard,
            auth::dtos::MeResponseDto,
            ApiResponse<auth::dtos::AuthResponseDto>,
            ApiResponse<auth::dtos::MeResponseDto>,
            // Users
            users_models::Profile,
            users_models::Role,
            users_dtos::UserResponseDto,
            users_dtos::UpdateOwnProfileDto,
            users_dtos::UpdateUserStatusDto,
            ApiResponse<users_dtos::UserResponseDto>,
            ApiResponse<Vec<users_dtos::UserResponseDto>>,
            // Victim requests
            requests_dtos::CreateRequestDto,
            requests_dtos::UpdateRequestStatusDto,
            requests_dtos::RequestResponseDto,
            ApiResponse<requests_dtos::RequestResponseDto>,
            ApiResponse<Vec<requests_dtos::RequestResponseDto>>,
            // Disasters
            disasters_models::DisasterStatus,
            disasters_dtos::CreateDisasterDto,
            disasters_dtos::UpdateDisasterDto,
            disasters_dtos::DisasterResponseDto,
            ApiResponse<disasters_dtos::DisasterResponseDto>,
            ApiResponse<Vec<disasters_dtos::DisasterResponseDto>>,
            // Volunteers and outreach
            volunteers_models::VolunteerStatus,
            volunteers_models::CallResponseStatus,
            volunteers_dtos::RegisterVolunteerDto,
            volunteers_dtos::UpdateVolunteerStatusDto,
            volunteers_dtos::VolunteerResponseDto,
            volunteers_dtos::LogCallDto,
            volunteers_dtos::UpdateCallDto,
            volunteers_dtos::CallResponseDto,
            ApiResponse<volunteers_dtos::VolunteerResponseDto>,
            ApiResponse<Vec<volunteers_dtos::VolunteerResponseDto>>,
            ApiResponse<volunteers_dtos::CallResponseDto>,
            ApiResponse<Vec<volunteers_dtos::CallResponseDto>>,
            // Volunteer postings
            volunteer_calls_models::ApplicationStatus,
            volunteer_calls_dtos::CreatePostingDto,
            volunteer_calls_dtos::PostingResponseDto,
            volunteer_calls_dtos::ApplyDto,
            volunteer_calls_dtos::UpdateApplicationStatusDto,
            volunteer_calls_dtos::ApplicationResponseDto,
            ApiResponse<volunteer_calls_dtos::PostingResponseDto>,
            ApiResponse<Vec<volunteer_calls_dtos::PostingResponseDto>>,
            ApiResponse<volunteer_calls_dtos::ApplicationResponseDto>,
            ApiResponse<Vec<volunteer_calls_dtos::ApplicationResponseDto>>,
            // Fundraising
            fundraisers_models::DonationType,
            fundraisers_dtos::CreateFundraiserDto,
            fundraisers_dtos::UpdateFundraiserStatusDto,
            fundraisers_dtos::FundraiserResponseDto,
            fundraisers_dtos::CreateDonationDto,
            fundraisers_dtos::DonationResponseDto,
            ApiResponse<fundraisers_dtos::FundraiserResponseDto>,
            ApiResponse<Vec<fundraisers_dtos::FundraiserResponseDto>>,
            ApiResponse<fundraisers_dtos::DonationResponseDto>,
            ApiResponse<Vec<fundraisers_dtos::DonationResponseDto>>,
            // Resources
            resources_dtos::CreateResourceDto,
            resources_dtos::UpdateResourceDto,
            resources_dtos::ResourceResponseDto,
            resources_dtos::AllocateResourceDto,
            resources_dtos::AllocationResponseDto,
            ApiResponse<resources_dtos::ResourceResponseDto>,
            ApiResponse<Vec<resources_dtos::ResourceResponseDto>>,
            ApiResponse<resources_dtos::AllocationResponseDto>,
            ApiResponse<Vec<resources_dtos::AllocationResponseDto>>,
            // Reports
            reports_dtos::CreateReportDto,
            reports_dtos::ReportResponseDto,
            ApiResponse<reports_dtos::ReportResponseDto>,
            ApiResponse<Vec<reports_dtos::ReportResponseDto>>,
            // Dashboard
            dashboard_dtos::DashboardOverviewDto,
            ApiResponse<dashboard_dtos::DashboardOverviewDto>,
            dashboard_dtos::ResourceQuickAddDto,
            ApiResponse<dashboard_dtos::ResourceQuickAddDto>,
            dashboard_dtos::RequestReviewDto,
            ApiResponse<dashboard_dtos::RequestReviewDto>,
        )
    ),
    tags(
        (name = "auth", description = "Session sign-in and the current user"),
        (name = "users", description = "Own profile"),
        (name = "requests", description = "Requests for help from disaster victims"),
        (name = "disasters", description = "Active and resolved disasters"),
        (name = "volunteers", description = "Volunteer registration"),
        (name = "volunteer-calls", description = "Volunteer postings and applications"),
        (name = "fundraisers", description = "Approved fundraisers and donations"),
        (name = "reports", description = "Field reports"),
        (name = "admin-users", description = "User management (admin only)"),
        (name = "admin-requests", description = "Request triage (admin only)"),
        (name = "admin-disasters", description = "Disaster management (admin only)"),
        (name = "admin-volunteers", description = "Volunteer management and outreach call log (admin only)"),
        (name = "admin-volunteer-calls", description = "Posting management and application review (admin only)"),
        (name = "admin-fundraisers", description = "Fundraiser review and donation ledger (admin only)"),
        (name = "admin-resources", description = "Inventory and allocations (admin only)"),
        (name = "admin-reports", description = "Report moderation (admin only)"),
        (name = "admin-dashboard", description = "Overview counts and quick actions (admin only)"),
    ),
    modifiers(&SecurityAddon),
    info(
        title = "ReliefHub API",
        version = "0.1.0",
        description = "API documentation for ReliefHub",
    )
)]
pub struct ApiDoc;

/// Adds Bearer JWT security scheme to OpenAPI spec
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_carries_bearer_scheme_and_admin_paths() {
        let doc = ApiDoc::openapi();
        let components = doc.components.as_ref().unwrap();
        assert!(components.security_schemes.contains_key("bearer_auth"));

        let paths = &doc.paths.paths;
        assert!(paths.contains_key("/api/admin/dashboard"));
        assert!(paths.contains_key("/api/admin/dashboard/requests/{id}/status"));
        assert!(paths.contains_key("/api/admin/resources/{id}"));
        assert!(paths.contains_key("/api/volunteer-calls/{id}/applications"));
    }
}
