use crate::client::routes;
use crate::errors::Result;
use crate::models::users::UserProfile;

use super::AuthService;

pub async fn handle_get_profile(service: &AuthService) -> Result<UserProfile> {
    service.client().get(routes::AUTH_ME).await
}
