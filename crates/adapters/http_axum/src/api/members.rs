//! JSON REST handlers for members.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use carrental_domain::id::MemberId;
use carrental_domain::member::Member;

use crate::api::parse_id;
use crate::error::ApiError;
use crate::state::{AppState, Repositories};

/// Request body for registering or updating a member.
#[derive(Deserialize)]
pub struct MemberRequest {
    pub name: String,
    pub address: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub driving_license_number: String,
}

impl MemberRequest {
    fn into_member(self) -> Result<Member, ApiError> {
        let mut builder = Member::builder()
            .name(self.name)
            .driving_license_number(self.driving_license_number);
        if let Some(address) = self.address {
            builder = builder.address(address);
        }
        if let Some(email) = self.email {
            builder = builder.email(email);
        }
        if let Some(phone) = self.phone {
            builder = builder.phone(phone);
        }
        Ok(builder.build()?)
    }
}

/// Possible responses from the list endpoint.
pub enum ListResponse {
    Ok(Json<Vec<Member>>),
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the get, create and update endpoints.
pub enum GetResponse {
    Ok(Json<Member>),
}

impl IntoResponse for GetResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the delete endpoint.
pub enum DeleteResponse {
    NoContent,
}

impl IntoResponse for DeleteResponse {
    fn into_response(self) -> Response {
        match self {
            Self::NoContent => StatusCode::NO_CONTENT.into_response(),
        }
    }
}

/// `GET /api/members`
pub async fn list<R: Repositories>(
    State(state): State<AppState<R>>,
) -> Result<ListResponse, ApiError> {
    let members = state.member_service.list_members().await?;
    Ok(ListResponse::Ok(Json(members)))
}

/// `GET /api/members/{id}`
pub async fn get<R: Repositories>(
    State(state): State<AppState<R>>,
    Path(id): Path<String>,
) -> Result<GetResponse, ApiError> {
    let member_id: MemberId = parse_id(&id)?;
    let member = state.member_service.get_member(member_id).await?;
    Ok(GetResponse::Ok(Json(member)))
}

/// `POST /api/members`
pub async fn create<R: Repositories>(
    State(state): State<AppState<R>>,
    Json(req): Json<MemberRequest>,
) -> Result<GetResponse, ApiError> {
    let member = req.into_member()?;
    let created = state.member_service.register_member(member).await?;
    Ok(GetResponse::Ok(Json(created)))
}

/// `PUT /api/members/{id}`
pub async fn update<R: Repositories>(
    State(state): State<AppState<R>>,
    Path(id): Path<String>,
    Json(req): Json<MemberRequest>,
) -> Result<GetResponse, ApiError> {
    let member_id: MemberId = parse_id(&id)?;
    let member = req.into_member()?;
    let updated = state.member_service.update_member(member_id, member).await?;
    Ok(GetResponse::Ok(Json(updated)))
}

/// `DELETE /api/members/{id}`
pub async fn delete<R: Repositories>(
    State(state): State<AppState<R>>,
    Path(id): Path<String>,
) -> Result<DeleteResponse, ApiError> {
    let member_id: MemberId = parse_id(&id)?;
    state.member_service.delete_member(member_id).await?;
    Ok(DeleteResponse::NoContent)
}
