use crate::error::RemindError;
use actix_web::HttpRequest;
use remind_domain::UserDetails;

fn header_value(req: &HttpRequest, name: &str) -> Option<String> {
    req.headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Resolves the identity of the caller from the auth headers populated by the
/// gateway in front of this service.
pub fn protect_route(req: &HttpRequest) -> Result<UserDetails, RemindError> {
    let username = header_value(req, "x-auth-username").ok_or_else(|| {
        RemindError::Unauthorized("Missing x-auth-username header".to_string())
    })?;
    let email = header_value(req, "x-auth-email").ok_or_else(|| {
        RemindError::Unauthorized("Missing x-auth-email header".to_string())
    })?;

    Ok(UserDetails { username, email })
}
