//! 토큰 발급 및 검증
//!
//! 서명 키는 시작 시 한 번 주입되며 이후 변경되지 않습니다.

use chrono::{DateTime, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use super::claims::Claims;
use crate::error::{Error, Result};
use crate::model::User;

/// Access Token 발급/검증기
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService")
            .field("algorithm", &Algorithm::HS256)
            .finish_non_exhaustive()
    }
}

impl TokenService {
    /// 새 서비스 생성
    ///
    /// 빈 시크릿은 허용하지 않습니다.
    pub fn new(secret: &[u8]) -> Result<Self> {
        if secret.is_empty() {
            return Err(Error::TokenSigning {
                message: "signing secret must not be empty".to_string(),
            });
        }

        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "iat"]);

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
        })
    }

    /// 사용자에게 Access Token 발급
    pub fn issue(&self, user: &User) -> Result<String> {
        self.issue_at(user, Utc::now())
    }

    /// 지정한 발급 시각으로 Access Token 발급
    pub fn issue_at(&self, user: &User, issued_at: DateTime<Utc>) -> Result<String> {
        let claims = Claims::for_user(user, issued_at);
        self.sign(&claims)
    }

    fn sign(&self, claims: &Claims) -> Result<String> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key).map_err(|e| {
            Error::TokenSigning {
                message: e.to_string(),
            }
        })
    }

    /// Access Token 검증 및 Claims 추출
    ///
    /// 서명 불일치, 형식 오류, 만료 모두 `InvalidToken`입니다.
    pub fn verify(&self, token: &str) -> Result<Claims> {
        let data = decode::<Claims>(token.trim(), &self.decoding_key, &self.validation)
            .map_err(|e| {
                let reason = match e.kind() {
                    ErrorKind::ExpiredSignature => "token expired".to_string(),
                    ErrorKind::InvalidSignature => "signature mismatch".to_string(),
                    _ => format!("malformed token: {}", e),
                };
                Error::InvalidToken { reason }
            })?;

        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::claims::TOKEN_TTL_SECONDS;

    fn service() -> TokenService {
        TokenService::new(b"test-secret-key").unwrap()
    }

    fn alice() -> User {
        User::register(
            "a@x.com".to_string(),
            "alice".to_string(),
            "hash".to_string(),
        )
    }

    #[test]
    fn test_issue_verify_roundtrip() {
        let tokens = service();
        let user = alice();

        let token = tokens.issue(&user).unwrap();
        let claims = tokens.verify(&token).unwrap();

        assert_eq!(claims.id, user.id.to_string());
        assert_eq!(claims.email, "a@x.com");
        assert_eq!(claims.username, "alice");
        assert!(!claims.is_admin);
        assert_eq!(claims.exp - claims.iat, TOKEN_TTL_SECONDS);
    }

    #[test]
    fn test_admin_flag_is_carried() {
        let tokens = service();
        let mut user = alice();
        user.is_admin = true;

        let claims = tokens.verify(&tokens.issue(&user).unwrap()).unwrap();
        assert!(claims.is_admin);
    }

    #[test]
    fn test_expired_token_rejected() {
        let tokens = service();
        let issued_at = Utc::now() - chrono::Duration::hours(4);

        let token = tokens.issue_at(&alice(), issued_at).unwrap();
        match tokens.verify(&token) {
            Err(Error::InvalidToken { reason }) => assert_eq!(reason, "token expired"),
            other => panic!("expected InvalidToken, got {:?}", other),
        }
    }

    #[test]
    fn test_token_still_valid_just_before_expiry() {
        let tokens = service();
        let issued_at = Utc::now() - chrono::Duration::hours(2);

        let token = tokens.issue_at(&alice(), issued_at).unwrap();
        assert!(tokens.verify(&token).is_ok());
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = service().issue(&alice()).unwrap();
        let other = TokenService::new(b"another-secret").unwrap();

        assert!(matches!(
            other.verify(&token),
            Err(Error::InvalidToken { .. })
        ));
    }

    #[test]
    fn test_malformed_token_rejected() {
        let tokens = service();
        assert!(matches!(
            tokens.verify("not-a-token"),
            Err(Error::InvalidToken { .. })
        ));
        assert!(matches!(tokens.verify(""), Err(Error::InvalidToken { .. })));
    }

    #[test]
    fn test_empty_secret_rejected() {
        assert!(matches!(
            TokenService::new(b""),
            Err(Error::TokenSigning { .. })
        ));
    }
}
