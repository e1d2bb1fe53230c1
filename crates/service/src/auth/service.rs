use std::sync::Arc;

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header as JwtHeader, Validation};
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use super::domain::{Claims, SignInInput, SignInResponse};
use super::errors::AuthError;
use super::password::verify_password;
use super::repository::AuthRepository;

/// Auth service configuration
#[derive(Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub expires_in_secs: u64,
}

impl From<&configs::AuthConfig> for AuthConfig {
    fn from(cfg: &configs::AuthConfig) -> Self {
        Self { jwt_secret: cfg.jwt_secret.clone(), expires_in_secs: cfg.jwt_expires_in_secs }
    }
}

/// Auth business service independent of web framework
pub struct AuthService<R: AuthRepository> {
    repo: Arc<R>,
    cfg: AuthConfig,
}

impl<R: AuthRepository> AuthService<R> {
    pub fn new(repo: Arc<R>, cfg: AuthConfig) -> Self { Self { repo, cfg } }

    /// Check credentials and issue an access token whose `sub` is the colorist id.
    ///
    /// # Examples
    /// ```
    /// use service::auth::{AuthConfig, AuthService, repository::mock::MockAuthRepository};
    /// use service::auth::domain::SignInInput;
    /// use std::sync::Arc;
    /// let repo = Arc::new(MockAuthRepository::default());
    /// let id = repo.insert("ana90", "ana@salon.com", "Passw0rd").unwrap();
    /// let svc = AuthService::new(repo, AuthConfig { jwt_secret: "secret".into(), expires_in_secs: 60 });
    /// let input = SignInInput { email_or_username: "ANA@salon.com".into(), password: "Passw0rd".into() };
    /// let res = tokio_test::block_on(svc.sign_in(input)).unwrap();
    /// assert_eq!(svc.verify_token(&res.access_token).unwrap(), id);
    /// ```
    #[instrument(skip(self, input), fields(user = %input.email_or_username))]
    pub async fn sign_in(&self, input: SignInInput) -> Result<SignInResponse, AuthError> {
        let login = input.email_or_username.trim();
        if login.is_empty() || input.password.is_empty() {
            return Err(AuthError::InvalidCredentials);
        }

        let creds = match self.repo.find_credentials(login).await? {
            Some(c) => c,
            None => {
                debug!("unknown login");
                return Err(AuthError::InvalidCredentials);
            }
        };

        if !verify_password(&input.password, &creds.password_hash)? {
            warn!(colorist_id = %creds.colorist_id, "password mismatch");
            return Err(AuthError::InvalidCredentials);
        }

        let access_token = self.issue_token(creds.colorist_id)?;
        info!(colorist_id = %creds.colorist_id, "colorist_signed_in");
        Ok(SignInResponse { access_token })
    }

    /// HS256 token valid for the configured lifetime.
    pub fn issue_token(&self, colorist_id: Uuid) -> Result<String, AuthError> {
        let iat = chrono::Utc::now().timestamp();
        let claims = Claims { sub: colorist_id, iat, exp: iat + self.cfg.expires_in_secs as i64 };
        encode(&JwtHeader::new(Algorithm::HS256), &claims, &EncodingKey::from_secret(self.cfg.jwt_secret.as_bytes()))
            .map_err(|e| AuthError::TokenError(e.to_string()))
    }

    /// Decode, check signature and expiry, return the colorist id.
    pub fn verify_token(&self, token: &str) -> Result<Uuid, AuthError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        decode::<Claims>(token, &DecodingKey::from_secret(self.cfg.jwt_secret.as_bytes()), &validation)
            .map(|data| data.claims.sub)
            .map_err(|e| {
                debug!(error = %e, "token rejected");
                AuthError::Unauthorized
            })
    }
}
