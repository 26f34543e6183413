//! JWT token generation and validation

use chrono::{DateTime, Duration, TimeZone, Utc};
use jsonwebtoken::errors::ErrorKind as JwtErrorKind;
use jsonwebtoken::{decode, decode_header, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use thiserror::Error;

use crate::domain::user::UserId;
use crate::domain::DomainError;

/// The only signing scheme accepted on either side
const ALGORITHM: Algorithm = Algorithm::HS256;

/// JWT claims structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JwtClaims {
    /// Subject user ID
    pub id: UserId,
    /// Subject username at issuance
    pub username: String,
    /// Issued at timestamp (Unix epoch)
    pub iat: i64,
    /// Expiration timestamp (Unix epoch)
    pub exp: i64,
}

impl JwtClaims {
    /// Create new claims for a user, issued at `now`
    pub fn new(
        id: UserId,
        username: impl Into<String>,
        expiration_hours: u64,
        now: DateTime<Utc>,
    ) -> Self {
        let exp = i64::try_from(expiration_hours)
            .ok()
            .and_then(Duration::try_hours)
            .and_then(|lifetime| now.checked_add_signed(lifetime))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);

        Self {
            id,
            username: username.into(),
            iat: now.timestamp(),
            exp: exp.timestamp(),
        }
    }

    /// Check if the token has expired at the given instant
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now.timestamp() >= self.exp
    }

    /// Check if the token has expired
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    /// Expiry as a timestamp
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_opt(self.exp, 0).single()
    }
}

/// Reasons a token is rejected
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TokenError {
    #[error("token is missing")]
    Missing,

    #[error("token is malformed: {0}")]
    Malformed(String),

    #[error("unexpected signing method: {0}")]
    AlgorithmMismatch(String),

    #[error("token signature is invalid")]
    InvalidSignature,

    #[error("token has expired")]
    Expired,

    #[error("token claims are invalid: {0}")]
    InvalidClaims(String),

    #[error("failed to generate token: {0}")]
    Signing(String),
}

impl From<jsonwebtoken::errors::Error> for TokenError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        match err.kind() {
            JwtErrorKind::InvalidSignature => Self::InvalidSignature,
            JwtErrorKind::ExpiredSignature => Self::Expired,
            JwtErrorKind::InvalidAlgorithm | JwtErrorKind::MissingAlgorithm => {
                Self::AlgorithmMismatch(err.to_string())
            }
            JwtErrorKind::Json(_) | JwtErrorKind::MissingRequiredClaim(_) => {
                Self::InvalidClaims(err.to_string())
            }
            _ => Self::Malformed(err.to_string()),
        }
    }
}

impl From<TokenError> for DomainError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Signing(_) => DomainError::internal("failed to generate token"),
            other => DomainError::unauthorized(other.to_string()),
        }
    }
}

/// A signed token with its expiry
#[derive(Debug, Clone, PartialEq)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Configuration for JWT service
#[derive(Clone)]
pub struct JwtConfig {
    /// Secret key for signing tokens
    pub secret: String,
    /// Token expiration time in hours
    pub expiration_hours: u64,
}

impl JwtConfig {
    /// Default token lifetime
    pub const DEFAULT_EXPIRATION_HOURS: u64 = 24;

    /// Create new JWT configuration
    pub fn new(secret: impl Into<String>, expiration_hours: u64) -> Self {
        Self {
            secret: secret.into(),
            expiration_hours,
        }
    }
}

impl Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"[hidden]")
            .field("expiration_hours", &self.expiration_hours)
            .finish()
    }
}

/// Trait for session token operations
pub trait TokenService: Send + Sync + Debug {
    /// Issue a signed token for a user
    fn issue(&self, id: UserId, username: &str) -> Result<IssuedToken, TokenError>;

    /// Validate a token and return its claims
    fn validate(&self, token: &str) -> Result<JwtClaims, TokenError>;

    /// Get the token expiration time in hours
    fn expiration_hours(&self) -> u64;
}

/// HMAC-SHA256 JWT service
#[derive(Clone)]
pub struct JwtService {
    expiration_hours: u64,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl Debug for JwtService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtService")
            .field("algorithm", &ALGORITHM)
            .field("expiration_hours", &self.expiration_hours)
            .field("encoding_key", &"[hidden]")
            .field("decoding_key", &"[hidden]")
            .finish()
    }
}

impl JwtService {
    /// Create a new JWT service. An empty secret is a configuration error.
    pub fn new(config: JwtConfig) -> Result<Self, DomainError> {
        if config.secret.trim().is_empty() {
            return Err(DomainError::configuration("JWT signing secret must not be empty"));
        }

        if config.expiration_hours == 0 {
            return Err(DomainError::configuration(
                "JWT expiration must be at least one hour",
            ));
        }

        Ok(Self {
            expiration_hours: config.expiration_hours,
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
        })
    }

    fn validation() -> Validation {
        let mut validation = Validation::new(ALGORITHM);
        validation.leeway = 0;
        validation.validate_exp = true;
        validation.set_required_spec_claims(&["exp"]);
        validation
    }
}

impl TokenService for JwtService {
    fn issue(&self, id: UserId, username: &str) -> Result<IssuedToken, TokenError> {
        let claims = JwtClaims::new(id, username, self.expiration_hours, Utc::now());
        let expires_at = claims
            .expires_at()
            .ok_or_else(|| TokenError::Signing("expiry is out of range".to_string()))?;

        let token = encode(&Header::new(ALGORITHM), &claims, &self.encoding_key)
            .map_err(|e| TokenError::Signing(e.to_string()))?;

        Ok(IssuedToken { token, expires_at })
    }

    fn validate(&self, token: &str) -> Result<JwtClaims, TokenError> {
        if token.is_empty() {
            return Err(TokenError::Missing);
        }

        // Check the declared algorithm before any key material is used
        let header = decode_header(token).map_err(|e| TokenError::Malformed(e.to_string()))?;
        if header.alg != ALGORITHM {
            return Err(TokenError::AlgorithmMismatch(format!("{:?}", header.alg)));
        }

        let token_data = decode::<JwtClaims>(token, &self.decoding_key, &Self::validation())?;

        // Valid strictly before the expiry instant
        if token_data.claims.is_expired() {
            return Err(TokenError::Expired);
        }

        Ok(token_data.claims)
    }

    fn expiration_hours(&self) -> u64 {
        self.expiration_hours
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret-key-12345";

    fn create_service() -> JwtService {
        JwtService::new(JwtConfig::new(SECRET, 24)).unwrap()
    }

    fn user_id(id: u64) -> UserId {
        UserId::new(id).unwrap()
    }

    fn sign(header: Header, claims: &impl Serialize, secret: &str) -> String {
        encode(&header, claims, &EncodingKey::from_secret(secret.as_bytes())).unwrap()
    }

    #[test]
    fn test_issue_and_validate() {
        let service = create_service();

        let issued = service.issue(user_id(7), "alice").unwrap();
        assert!(!issued.token.is_empty());

        let claims = service.validate(&issued.token).unwrap();
        assert_eq!(claims.id, user_id(7));
        assert_eq!(claims.username, "alice");
        assert!(!claims.is_expired());
        assert_eq!(claims.expires_at(), Some(issued.expires_at));
    }

    #[test]
    fn test_expiry_is_issuance_plus_lifetime() {
        let service = create_service();
        let before = Utc::now().timestamp();

        let issued = service.issue(user_id(1), "alice").unwrap();
        let claims = service.validate(&issued.token).unwrap();

        assert_eq!(claims.exp - claims.iat, 24 * 3600);
        assert!(claims.iat >= before);
    }

    #[test]
    fn test_issued_header_declares_hs256() {
        let service = create_service();
        let issued = service.issue(user_id(1), "alice").unwrap();

        let header = decode_header(&issued.token).unwrap();
        assert_eq!(header.alg, Algorithm::HS256);
    }

    #[test]
    fn test_empty_token() {
        let service = create_service();
        assert_eq!(service.validate(""), Err(TokenError::Missing));
    }

    #[test]
    fn test_malformed_token() {
        let service = create_service();

        let result = service.validate("invalid-token");
        assert!(matches!(result, Err(TokenError::Malformed(_))));
    }

    #[test]
    fn test_wrong_secret() {
        let service1 = JwtService::new(JwtConfig::new("secret-1", 24)).unwrap();
        let service2 = JwtService::new(JwtConfig::new("secret-2", 24)).unwrap();

        let issued = service1.issue(user_id(1), "alice").unwrap();

        // Token generated with different secret should fail validation
        assert_eq!(service2.validate(&issued.token), Err(TokenError::InvalidSignature));
    }

    #[test]
    fn test_tampered_payload() {
        let service = create_service();
        let issued = service.issue(user_id(1), "alice").unwrap();
        let other = service.issue(user_id(2), "mallory").unwrap();

        // Splice another token's payload under the original signature
        let parts: Vec<&str> = issued.token.split('.').collect();
        let other_parts: Vec<&str> = other.token.split('.').collect();
        let forged = format!("{}.{}.{}", parts[0], other_parts[1], parts[2]);

        assert_eq!(service.validate(&forged), Err(TokenError::InvalidSignature));
    }

    #[test]
    fn test_different_algorithm_rejected() {
        let service = create_service();
        let claims = JwtClaims::new(user_id(1), "alice", 24, Utc::now());

        // Same secret, different HMAC variant
        let token = sign(Header::new(Algorithm::HS512), &claims, SECRET);

        assert!(matches!(
            service.validate(&token),
            Err(TokenError::AlgorithmMismatch(_))
        ));
    }

    #[test]
    fn test_unsigned_token_rejected() {
        let service = create_service();

        // {"alg":"none","typ":"JWT"} with an empty signature
        let token = "eyJhbGciOiJub25lIiwidHlwIjoiSldUIn0.eyJzdWIiOiIxMjM0NTY3ODkwIn0.";

        let err = service.validate(token).unwrap_err();
        assert!(matches!(err, TokenError::Malformed(_)));
        assert!(matches!(DomainError::from(err), DomainError::Unauthorized { .. }));
    }

    #[test]
    fn test_expired_token() {
        let service = create_service();

        // Claims with expiration 1 hour in the past
        let past_time = Utc::now() - Duration::hours(1);
        let claims = JwtClaims {
            id: user_id(1),
            username: "alice".to_string(),
            iat: (past_time - Duration::hours(2)).timestamp(),
            exp: past_time.timestamp(),
        };

        let token = sign(Header::new(Algorithm::HS256), &claims, SECRET);

        assert_eq!(service.validate(&token), Err(TokenError::Expired));
    }

    #[test]
    fn test_expired_exactly_now() {
        let now = Utc::now();
        let claims = JwtClaims {
            id: user_id(1),
            username: "alice".to_string(),
            iat: now.timestamp() - 10,
            exp: now.timestamp(),
        };

        assert!(claims.is_expired_at(now));
        assert!(!claims.is_expired_at(now - Duration::seconds(1)));
    }

    #[test]
    fn test_missing_claims_rejected() {
        let service = create_service();
        let exp = (Utc::now() + Duration::hours(1)).timestamp();

        let without_id = serde_json::json!({ "username": "alice", "exp": exp });
        let token = sign(Header::new(Algorithm::HS256), &without_id, SECRET);
        assert!(matches!(service.validate(&token), Err(TokenError::InvalidClaims(_))));

        let without_exp = serde_json::json!({ "id": 1, "username": "alice", "iat": 0 });
        let token = sign(Header::new(Algorithm::HS256), &without_exp, SECRET);
        assert!(matches!(service.validate(&token), Err(TokenError::InvalidClaims(_))));
    }

    #[test]
    fn test_mistyped_claims_rejected() {
        let service = create_service();
        let exp = (Utc::now() + Duration::hours(1)).timestamp();

        let string_id = serde_json::json!({ "id": "1", "username": "alice", "iat": 0, "exp": exp });
        let token = sign(Header::new(Algorithm::HS256), &string_id, SECRET);
        assert!(matches!(service.validate(&token), Err(TokenError::InvalidClaims(_))));

        let zero_id = serde_json::json!({ "id": 0, "username": "alice", "iat": 0, "exp": exp });
        let token = sign(Header::new(Algorithm::HS256), &zero_id, SECRET);
        assert!(matches!(service.validate(&token), Err(TokenError::InvalidClaims(_))));
    }

    #[test]
    fn test_empty_secret_rejected() {
        let result = JwtService::new(JwtConfig::new("", 24));
        assert!(matches!(result, Err(DomainError::Configuration { .. })));

        let result = JwtService::new(JwtConfig::new("   ", 24));
        assert!(result.is_err());
    }

    #[test]
    fn test_zero_expiration_rejected() {
        let result = JwtService::new(JwtConfig::new(SECRET, 0));
        assert!(matches!(result, Err(DomainError::Configuration { .. })));
    }

    #[test]
    fn test_expiration_hours() {
        let service = JwtService::new(JwtConfig::new("secret", 48)).unwrap();
        assert_eq!(service.expiration_hours(), 48);
    }

    #[test]
    fn test_debug_hides_secret() {
        let config = JwtConfig::new("super-secret-value", 24);
        let service = JwtService::new(config.clone()).unwrap();

        assert!(!format!("{:?}", config).contains("super-secret-value"));
        assert!(!format!("{:?}", service).contains("super-secret-value"));
    }

    #[test]
    fn test_token_errors_map_to_unauthorized() {
        for err in [
            TokenError::Missing,
            TokenError::Malformed("x".to_string()),
            TokenError::AlgorithmMismatch("HS512".to_string()),
            TokenError::InvalidSignature,
            TokenError::Expired,
            TokenError::InvalidClaims("x".to_string()),
        ] {
            assert!(matches!(DomainError::from(err), DomainError::Unauthorized { .. }));
        }

        let signing = DomainError::from(TokenError::Signing("no key".to_string()));
        assert!(matches!(signing, DomainError::Internal { .. }));
    }
}
