use super::tokens::{TokenIssuer, TokenPair};
use crate::error::{ServiceError, ServiceResult};
use crate::services::UserService;
use crate::user::Credentials;
use std::sync::Arc;
use tracing::{info, warn};

const INVALID_CREDENTIALS: &str = "Invalid login or password";
const INVALID_REFRESH: &str = "Invalid or expired refresh token";

/// The caller behind a verified access token.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: String,
    pub login: String,
}

#[derive(Clone)]
pub struct AuthService {
    users: UserService,
    tokens: Arc<TokenIssuer>,
}

impl AuthService {
    pub fn new(users: UserService, tokens: TokenIssuer) -> Self {
        AuthService {
            users,
            tokens: Arc::new(tokens),
        }
    }

    pub fn signup(&self, credentials: Credentials) -> ServiceResult<()> {
        let login = credentials.login.clone();
        match self.users.create(credentials) {
            Ok(user) => {
                info!(target: "audit", user_id = %user.id, "New user registered: {}", login);
                Ok(())
            }
            Err(ServiceError::Conflict(message)) => Err(ServiceError::BadRequest(message)),
            Err(e) => Err(e),
        }
    }

    pub fn login(&self, credentials: Credentials) -> ServiceResult<TokenPair> {
        let Some(user) = self.users.find_by_login(&credentials.login)? else {
            warn!(target: "audit", "Failed login attempt for: {}", credentials.login);
            return Err(ServiceError::forbidden(INVALID_CREDENTIALS));
        };
        if !self.users.check_password(&user, &credentials.password)? {
            warn!(target: "audit", "Wrong password for user: {}", credentials.login);
            return Err(ServiceError::forbidden(INVALID_CREDENTIALS));
        }
        let pair = self.tokens.issue_pair(&user.id, &user.login)?;
        info!(target: "audit", user_id = %user.id, "User logged in: {}", user.login);
        Ok(pair)
    }

    pub fn refresh(&self, refresh_token: Option<&str>) -> ServiceResult<TokenPair> {
        let token = match refresh_token {
            Some(token) if !token.is_empty() => token,
            _ => return Err(ServiceError::unauthorized("Refresh token is required")),
        };
        let claims = match self.tokens.verify_refresh(token) {
            Ok(claims) => claims,
            Err(err) => {
                warn!(target: "audit", "Invalid refresh token: {}", err);
                return Err(ServiceError::forbidden(INVALID_REFRESH));
            }
        };
        let pair = self.tokens.issue_pair(&claims.user_id, &claims.login)?;
        info!(target: "audit", user_id = %claims.user_id, "Tokens refreshed for user: {}", claims.login);
        Ok(pair)
    }

    /// Checks the token and that its user still exists under the same login.
    pub fn verify_access_token(&self, token: &str) -> ServiceResult<AuthenticatedUser> {
        let claims = self
            .tokens
            .verify_access(token)
            .map_err(|_| ServiceError::unauthorized("Unauthorized"))?;
        match self.users.find_by_login(&claims.login)? {
            Some(user) if user.id == claims.user_id => Ok(AuthenticatedUser {
                user_id: user.id,
                login: user.login,
            }),
            _ => Err(ServiceError::unauthorized("User not found")),
        }
    }
}
