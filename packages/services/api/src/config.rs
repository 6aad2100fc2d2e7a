//! API 서버 설정

use std::env;

use anyhow::Context;

/// API 서버 설정
#[derive(Clone)]
pub struct Config {
    /// 서버 포트
    pub port: u16,

    /// SQLite 접속 URL
    pub database_url: String,

    /// 토큰 서명 시크릿
    pub jwt_secret: String,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("port", &self.port)
            .field("database_url", &self.database_url)
            .field("jwt_secret", &"<redacted>")
            .finish()
    }
}

impl Config {
    /// 환경변수에서 설정 로드
    ///
    /// `BLOG_JWT_SECRET`이 없거나 비어 있으면 시작할 수 없습니다.
    pub fn from_env() -> anyhow::Result<Self> {
        let jwt_secret = env::var("BLOG_JWT_SECRET").context("BLOG_JWT_SECRET must be set")?;
        if jwt_secret.trim().is_empty() {
            anyhow::bail!("BLOG_JWT_SECRET must not be empty");
        }

        Ok(Self {
            port: env::var("BLOG_PORT")
                .unwrap_or_else(|_| "4000".to_string())
                .parse()
                .context("BLOG_PORT must be a port number")?,

            database_url: env::var("BLOG_DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://data/blog.db".to_string()),

            jwt_secret,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts_secret() {
        let config = Config {
            port: 4000,
            database_url: "sqlite::memory:".to_string(),
            jwt_secret: "super-secret".to_string(),
        };

        let printed = format!("{:?}", config);
        assert!(!printed.contains("super-secret"));
        assert!(printed.contains("<redacted>"));
    }
}
