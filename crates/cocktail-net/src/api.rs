//! Wire DTOs for the remote recipe service.
//!
//! The service wraps every response in an envelope and speaks camelCase.
//! Timestamps arrive zone-less (`2026-08-01T12:30:00`); callers convert them
//! to UTC when ingesting into domain types.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// `{ success, data, message }` wrapper around every response body.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiEnvelope<T> {
    pub success: bool,
    pub data: Option<T>,
    pub message: Option<String>,
}

/// One cocktail as the service reports it, aggregate like counters included.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CocktailDto {
    pub cocktail_no: i64,
    pub cocktail_name: String,
    pub description: Option<String>,
    pub ingredients: Vec<String>,
    pub instructions: Option<String>,
    pub cocktail_image_path: Option<String>,
    pub member_no: i64,
    pub like_count: u32,
    pub is_liked: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: Option<NaiveDateTime>,
}

/// Creation / update request body.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CocktailRequestDto {
    pub cocktail_name: String,
    pub description: Option<String>,
    pub ingredients: Vec<String>,
    pub instructions: Option<String>,
    pub cocktail_image_path: Option<String>,
}

/// Authoritative counters returned by the like-toggle endpoint.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LikeDto {
    pub like_count: u32,
    pub is_liked: bool,
}

/// Member identity as issued by signup and login.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MemberDto {
    pub member_no: i64,
    pub member_id: String,
    pub nickname: String,
}

/// Username availability probe result.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityDto {
    pub available: bool,
}

/// Signup request body.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SignupDto {
    pub member_id: String,
    pub password: String,
    pub nickname: String,
    pub email: Option<String>,
}

/// Login request body.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LoginDto {
    pub member_id: String,
    pub password: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cocktail_envelope_deserializes() {
        let json = r#"{
            "success": true,
            "data": [{
                "cocktailNo": 17,
                "cocktailName": "Mojito",
                "description": "커스텀 칵테일",
                "ingredients": ["화이트 럼 2oz", "라임"],
                "instructions": null,
                "cocktailImagePath": "/images/mojito.png",
                "memberNo": 3,
                "likeCount": 5,
                "isLiked": true,
                "createdAt": "2026-08-01T12:30:00",
                "updatedAt": null
            }]
        }"#;

        let envelope: ApiEnvelope<Vec<CocktailDto>> = serde_json::from_str(json).unwrap();
        assert!(envelope.success);
        let items = envelope.data.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].cocktail_no, 17);
        assert_eq!(items[0].like_count, 5);
        assert!(items[0].is_liked);
        assert_eq!(
            items[0].created_at,
            "2026-08-01T12:30:00".parse::<NaiveDateTime>().unwrap()
        );
    }

    #[test]
    fn failure_envelope_carries_the_message() {
        let json = r#"{ "success": false, "data": null, "message": "로그인이 필요합니다." }"#;
        let envelope: ApiEnvelope<CocktailDto> = serde_json::from_str(json).unwrap();
        assert!(!envelope.success);
        assert!(envelope.data.is_none());
        assert_eq!(envelope.message.as_deref(), Some("로그인이 필요합니다."));
    }

    #[test]
    fn request_bodies_serialize_as_camel_case() {
        let request = CocktailRequestDto {
            cocktail_name: "Mojito".into(),
            description: None,
            ingredients: vec!["라임".into()],
            instructions: None,
            cocktail_image_path: None,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["cocktailName"], "Mojito");
        assert!(json.get("cocktail_name").is_none());

        let login = LoginDto {
            member_id: "alice".into(),
            password: "pw".into(),
        };
        assert_eq!(serde_json::to_value(&login).unwrap()["memberId"], "alice");
    }
}
