use tracing::info;

use crate::client::routes;
use crate::errors::Result;
use crate::models::auth::RegisterRequest;
use crate::models::users::UserProfile;
use crate::utils::validate::validate_credentials;

use super::AuthService;

pub async fn handle_register(
    service: &AuthService,
    request: RegisterRequest,
) -> Result<UserProfile> {
    validate_credentials(&request.username, &request.password)?;

    let profile: UserProfile = service
        .client()
        .post_json(routes::AUTH_USERS, &request)
        .await?;
    info!("Registered {} as {}", profile.username, profile.role);
    Ok(profile)
}
