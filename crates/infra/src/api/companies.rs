//! Company and membership endpoints

use conex_domain::constants::COMPANIES;
use conex_domain::{Ack, Company, CompanyMember, InvitedMember, MemberInvite};
use tracing::{info, instrument};

use super::body::RequestBody;
use super::client::ApiClient;
use super::errors::ApiError;
use super::path_segment;

/// `/api/v1/companies` endpoints
#[derive(Debug, Clone, Copy)]
pub struct CompaniesApi<'a> {
    client: &'a ApiClient,
}

impl<'a> CompaniesApi<'a> {
    pub(crate) const fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Company of the logged-in user
    ///
    /// # Errors
    /// `Http` 404 when the user belongs to no company
    pub async fn mine(&self) -> Result<Company, ApiError> {
        self.client.get(&format!("{COMPANIES}/my-company")).await
    }

    /// # Errors
    /// See [`ApiClient::make_request`]
    pub async fn get(&self, company_id: &str) -> Result<Company, ApiError> {
        self.client.get(&format!("{COMPANIES}/{}", path_segment(company_id))).await
    }

    /// # Errors
    /// See [`ApiClient::make_request`]
    pub async fn members(&self, company_id: &str) -> Result<Vec<CompanyMember>, ApiError> {
        self.client.get(&format!("{COMPANIES}/{}/members", path_segment(company_id))).await
    }

    /// Create a member account; the backend answers with a temporary
    /// password to hand over
    ///
    /// # Errors
    /// `Http` 403 unless the caller is the company representative
    #[instrument(skip(self, invite))]
    pub async fn invite(
        &self,
        company_id: &str,
        invite: &MemberInvite,
    ) -> Result<InvitedMember, ApiError> {
        let invited: InvitedMember = self
            .client
            .post(
                &format!("{COMPANIES}/{}/members", path_segment(company_id)),
                RequestBody::json(invite)?,
            )
            .await?;
        info!("Company member invited");
        Ok(invited)
    }

    /// # Errors
    /// See [`ApiClient::make_request`]
    pub async fn remove_member(&self, company_id: &str, member_id: &str) -> Result<Ack, ApiError> {
        self.client
            .delete(&format!(
                "{COMPANIES}/{}/members/{}",
                path_segment(company_id),
                path_segment(member_id)
            ))
            .await
    }
}
