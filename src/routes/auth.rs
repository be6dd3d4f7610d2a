use crate::{
    auth::{LoginRequest, RegisterRequest, TokenCodec, TokenResponse},
    error::AppError,
};
use actix_web::{post, web, HttpResponse, Responder};
use uuid::Uuid;

/// Namespace for deriving stable user ids from email addresses.
const USER_ID_NAMESPACE: Uuid = Uuid::from_u128(0x8e41b4de_84c3_4c1d_9b0d_e6b11a0a6c2f);

/// Derives the identity a token is issued for.
///
/// The same email always maps to the same user id and distinct emails map to
/// distinct ids, which is what keeps task ownership meaningful even though
/// no account records exist.
fn user_identity(email: &str) -> Uuid {
    Uuid::new_v5(&USER_ID_NAMESPACE, email.as_bytes())
}

/// Login
///
/// Issues an authentication token for the submitted email.
///
/// INCOMPLETE BY DESIGN: the password is not checked against anything and no
/// account lookup happens; any email/password pair is accepted. Real
/// credential verification is out of scope for this service.
///
/// ## Responses:
/// - `200 OK`: `{"access_token": "...", "token_type": "bearer"}`.
#[post("/login")]
pub async fn login(
    codec: web::Data<TokenCodec>,
    login_data: web::Json<LoginRequest>,
) -> Result<impl Responder, AppError> {
    let user_id = user_identity(&login_data.email);
    let token = codec.issue(user_id, &login_data.email)?;

    Ok(HttpResponse::Ok().json(TokenResponse::bearer(token)))
}

/// Register a new user
///
/// Behaves exactly like login: no account is created or checked for, the
/// password is ignored, and a token for the email's derived identity is
/// returned. Kept as a separate endpoint for API-shape compatibility.
///
/// ## Responses:
/// - `200 OK`: `{"access_token": "...", "token_type": "bearer"}`.
#[post("/register")]
pub async fn register(
    codec: web::Data<TokenCodec>,
    register_data: web::Json<RegisterRequest>,
) -> Result<impl Responder, AppError> {
    let user_id = user_identity(&register_data.email);
    let token = codec.issue(user_id, &register_data.email)?;

    Ok(HttpResponse::Ok().json(TokenResponse::bearer(token)))
}
