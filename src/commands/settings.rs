//! Settings Commands
//!
//! Account settings endpoints.

use serde_json::Value;

use super::{ApiClient, Method};
use crate::error::ApiError;
use crate::forms::{PasswordPayload, ProfilePayload, ShareLevelPayload, TokenPayload};
use crate::models::{AvatarResponse, MessageResponse, Profile, RedirectResponse};

pub async fn update_profile(api: &ApiClient, url: &str, payload: &ProfilePayload) -> Result<Profile, ApiError> {
    api.request(Method::Patch, url, Some(payload)).await
}

pub async fn change_password(api: &ApiClient, url: &str, payload: &PasswordPayload) -> Result<String, ApiError> {
    let response: MessageResponse = api.request(Method::Post, url, Some(payload)).await?;
    Ok(response.message)
}

/// Field name the server reads the uploaded image from
pub const AVATAR_FIELD: &str = "avatar";

/// Upload a new avatar image; returns its url
pub async fn upload_avatar(api: &ApiClient, url: &str, file: &web_sys::File) -> Result<String, ApiError> {
    let form = web_sys::FormData::new().map_err(|_| ApiError::Request("FormData unavailable".into()))?;
    form.append_with_blob(AVATAR_FIELD, file)
        .map_err(|_| ApiError::Request("could not attach avatar file".into()))?;
    let response: AvatarResponse = api.send_form(url, form).await?;
    Ok(response.avatar)
}

/// Returns the new avatar url (the default image)
pub async fn delete_avatar(api: &ApiClient, url: &str) -> Result<String, ApiError> {
    let response: AvatarResponse = api.request::<Value, _>(Method::Delete, url, None).await?;
    Ok(response.avatar)
}

pub async fn update_share_level(api: &ApiClient, url: &str, share_level: &str) -> Result<(), ApiError> {
    let payload = ShareLevelPayload { share_level: share_level.to_string() };
    api.request::<_, Value>(Method::Patch, url, Some(&payload)).await.map(|_| ())
}

/// Ask the server to mail a 2FA code; returns the url the token goes to
pub async fn request_two_factor_code(api: &ApiClient, url: &str) -> Result<String, ApiError> {
    let response: RedirectResponse = api.get(url).await?;
    Ok(response.url)
}

pub async fn submit_two_factor_token(api: &ApiClient, url: &str, token: &str) -> Result<String, ApiError> {
    let payload = TokenPayload { token: token.trim().to_string() };
    let response: MessageResponse = api.request(Method::Post, url, Some(&payload)).await?;
    Ok(response.message)
}

/// Starts the account deletion sequence (confirmation mail)
pub async fn request_account_deletion(api: &ApiClient, url: &str) -> Result<String, ApiError> {
    let response: MessageResponse = api.get(url).await?;
    Ok(response.message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::decode_response;

    #[test]
    fn test_avatar_upload_replies() {
        let ok: AvatarResponse = decode_response(200, r#"{"avatar":"/media/avatars/7/me.png"}"#).unwrap();
        assert_eq!(ok.avatar, "/media/avatars/7/me.png");

        let r: Result<AvatarResponse, _> = decode_response(
            400,
            r#"{"avatar":["Upload a valid image. The file you uploaded was either not an image or a corrupted image."]}"#,
        );
        let Err(ApiError::Invalid { errors, message }) = r else { panic!("expected invalid") };
        assert!(message.is_none());
        assert_eq!(errors.get(AVATAR_FIELD).len(), 1);
    }
}
