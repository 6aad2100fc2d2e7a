//! API 앱 상태

use blog_core::auth::TokenService;

use crate::config::Config;
use crate::db::Store;

/// 앱 상태
///
/// 모든 핸들러에서 공유하며, 시작 이후 변경되지 않습니다.
pub struct AppState {
    /// 설정
    pub config: Config,

    /// 토큰 발급/검증기
    pub tokens: TokenService,

    /// 저장소
    pub store: Store,
}

impl AppState {
    /// 설정으로 상태 생성 (DB 접속 포함)
    pub async fn new(config: &Config) -> anyhow::Result<Self> {
        let store = Store::connect(&config.database_url).await?;
        Self::with_store(config, store)
    }

    /// 이미 준비된 저장소로 상태 생성
    ///
    /// 서명 시크릿을 사용할 수 없으면 실패합니다.
    pub fn with_store(config: &Config, store: Store) -> anyhow::Result<Self> {
        let tokens = TokenService::new(config.jwt_secret.as_bytes())?;
        Ok(Self {
            config: config.clone(),
            tokens,
            store,
        })
    }
}
