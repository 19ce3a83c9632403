//! The [`RecipeService`] HTTP wrapper.
//!
//! One method per endpoint, each a thin async call: build the request,
//! attach the member header when a user is logged in, unwrap the response
//! envelope. No timeouts and no retries; a failed call surfaces as a
//! [`ServiceError`] for the store layer to record and re-throw.

use std::sync::Mutex;

use reqwest::Method;
use serde::de::DeserializeOwned;

use cocktail_shared::constants::MEMBER_ID_HEADER;
use cocktail_shared::CocktailId;

use crate::api::{
    ApiEnvelope, AvailabilityDto, CocktailDto, CocktailRequestDto, LikeDto, LoginDto, MemberDto,
    SignupDto,
};
use crate::error::ServiceError;

/// HTTP client for the remote recipe service.
pub struct RecipeService {
    http: reqwest::Client,
    base_url: String,
    /// Current caller identity, attached as `X-Member-No` when present.
    member_no: Mutex<Option<i64>>,
}

impl RecipeService {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: reqwest::Client::new(),
            base_url,
            member_no: Mutex::new(None),
        }
    }

    /// Point the identity header at a member, or clear it on logout.
    pub fn set_member_no(&self, member_no: Option<i64>) {
        if let Ok(mut guard) = self.member_no.lock() {
            *guard = member_no;
        }
    }

    pub fn member_no(&self) -> Option<i64> {
        self.member_no.lock().ok().and_then(|guard| *guard)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // ------------------------------------------------------------------
    // Cocktails
    // ------------------------------------------------------------------

    pub async fn list_cocktails(&self) -> Result<Vec<CocktailDto>, ServiceError> {
        tracing::debug!("listing cocktails");
        let resp = self.request(Method::GET, "/api/cocktails").send().await?;
        unwrap_envelope(resp).await
    }

    pub async fn get_cocktail(&self, id: &CocktailId) -> Result<CocktailDto, ServiceError> {
        tracing::debug!(%id, "fetching cocktail");
        let resp = self
            .request(Method::GET, &format!("/api/cocktails/{id}"))
            .send()
            .await?;
        unwrap_envelope(resp).await
    }

    pub async fn cocktails_by_member(&self, member_no: i64) -> Result<Vec<CocktailDto>, ServiceError> {
        tracing::debug!(member_no, "listing a member's cocktails");
        let resp = self
            .request(Method::GET, &format!("/api/cocktails/members/{member_no}"))
            .send()
            .await?;
        unwrap_envelope(resp).await
    }

    pub async fn create_cocktail(
        &self,
        request: &CocktailRequestDto,
    ) -> Result<CocktailDto, ServiceError> {
        tracing::debug!(name = %request.cocktail_name, "creating cocktail");
        let resp = self
            .request(Method::POST, "/api/cocktails")
            .json(request)
            .send()
            .await?;
        unwrap_envelope(resp).await
    }

    pub async fn update_cocktail(
        &self,
        id: &CocktailId,
        request: &CocktailRequestDto,
    ) -> Result<CocktailDto, ServiceError> {
        tracing::debug!(%id, "updating cocktail");
        let resp = self
            .request(Method::PUT, &format!("/api/cocktails/{id}"))
            .json(request)
            .send()
            .await?;
        unwrap_envelope(resp).await
    }

    pub async fn delete_cocktail(&self, id: &CocktailId) -> Result<(), ServiceError> {
        tracing::debug!(%id, "deleting cocktail");
        let resp = self
            .request(Method::DELETE, &format!("/api/cocktails/{id}"))
            .send()
            .await?;
        expect_success(resp).await
    }

    /// Toggle semantics live server-side; the response carries the
    /// authoritative counters.
    pub async fn toggle_like(&self, id: &CocktailId) -> Result<LikeDto, ServiceError> {
        tracing::debug!(%id, "toggling like");
        let resp = self
            .request(Method::POST, &format!("/api/cocktails/{id}/likes"))
            .send()
            .await?;
        unwrap_envelope(resp).await
    }

    // ------------------------------------------------------------------
    // Members
    // ------------------------------------------------------------------

    /// `true` when the member id is still free.
    pub async fn check_member_id(&self, member_id: &str) -> Result<bool, ServiceError> {
        tracing::debug!(member_id, "checking member id availability");
        let resp = self
            .request(Method::GET, "/api/members/check-memberId")
            .query(&[("memberId", member_id)])
            .send()
            .await?;
        let availability: AvailabilityDto = unwrap_envelope(resp).await?;
        Ok(availability.available)
    }

    pub async fn signup(&self, request: &SignupDto) -> Result<MemberDto, ServiceError> {
        tracing::debug!(member_id = %request.member_id, "signing up");
        let resp = self
            .request(Method::POST, "/api/members")
            .json(request)
            .send()
            .await?;
        unwrap_envelope(resp).await
    }

    pub async fn login(&self, request: &LoginDto) -> Result<MemberDto, ServiceError> {
        tracing::debug!(member_id = %request.member_id, "logging in");
        let resp = self
            .request(Method::POST, "/api/members/login")
            .json(request)
            .send()
            .await?;
        unwrap_envelope(resp).await
    }

    fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        let mut builder = self
            .http
            .request(method, format!("{}{}", self.base_url, path));
        if let Some(member_no) = self.member_no() {
            builder = builder.header(MEMBER_ID_HEADER, member_no);
        }
        builder
    }
}

/// Decode the envelope and extract its payload.
async fn unwrap_envelope<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, ServiceError> {
    let envelope: ApiEnvelope<T> = resp.json().await?;
    if !envelope.success {
        return Err(ServiceError::Api {
            message: envelope
                .message
                .unwrap_or_else(|| "request rejected".to_string()),
        });
    }
    envelope.data.ok_or(ServiceError::MissingData)
}

/// For endpoints whose success envelope carries no payload (delete).
async fn expect_success(resp: reqwest::Response) -> Result<(), ServiceError> {
    let envelope: ApiEnvelope<serde_json::Value> = resp.json().await?;
    if !envelope.success {
        return Err(ServiceError::Api {
            message: envelope
                .message
                .unwrap_or_else(|| "request rejected".to_string()),
        });
    }
    Ok(())
}
