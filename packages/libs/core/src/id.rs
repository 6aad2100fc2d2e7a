//! ID 생성 및 정규화
//!
//! User / Blog / Comment의 식별자는 모두 ULID 문자열입니다.
//!
//! ULID는 대소문자를 구분하지 않으므로 `EntityId`는 항상 정규화된 형태
//! (앞뒤 공백 제거 + 대문자)로 보관합니다. 따라서 토큰의 `id`와 저장소의
//! 소유자 ID를 비교할 때 표현 차이로 인한 불일치가 생기지 않습니다.

use serde::{Deserialize, Serialize};

/// 리소스 식별자
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct EntityId(String);

impl EntityId {
    /// 새 ULID 생성
    pub fn generate() -> Self {
        Self(ulid::Ulid::new().to_string())
    }

    /// 임의 문자열을 정규화하여 ID로 변환
    pub fn new(raw: impl AsRef<str>) -> Self {
        Self(canonicalize(raw.as_ref()))
    }

    /// 내부 값 참조
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 정규화 후 동일한 ID인지 확인
    pub fn matches(&self, raw: &str) -> bool {
        self.0 == canonicalize(raw)
    }
}

fn canonicalize(raw: &str) -> String {
    raw.trim().to_ascii_uppercase()
}

impl From<String> for EntityId {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<&str> for EntityId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<EntityId> for String {
    fn from(value: EntityId) -> Self {
        value.0
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ulid_generation() {
        let id1 = EntityId::generate();
        let id2 = EntityId::generate();

        assert_eq!(id1.as_str().len(), 26);
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_canonical_comparison() {
        let id = EntityId::generate();
        let lower = id.as_str().to_ascii_lowercase();

        assert!(id.matches(&lower));
        assert!(id.matches(&format!(" {} ", id)));
        assert_eq!(EntityId::new(&lower), id);
        assert!(!id.matches("01ARZ3NDEKTSV4RRFFQ69G5FAV"));
    }

    #[test]
    fn test_deserialize_normalizes() {
        let id: EntityId = serde_json::from_str("\"01arz3ndektsv4rrffq69g5fav\"").unwrap();
        assert_eq!(id.as_str(), "01ARZ3NDEKTSV4RRFFQ69G5FAV");
        assert_eq!(
            serde_json::to_string(&id).unwrap(),
            "\"01ARZ3NDEKTSV4RRFFQ69G5FAV\""
        );
    }
}
