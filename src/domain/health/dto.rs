use std::time::Duration;

use serde::Serialize;
use utoipa::ToSchema;

/// 헬스체크 응답
#[derive(Serialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HealthStatus {
    pub status: HealthState,
    #[schema(example = "0.1.0")]
    pub version: &'static str,
    #[schema(example = 3600)]
    pub uptime_secs: u64,
    pub database: DatabaseHealth,
}

/// 서버 상태
#[derive(Serialize, Debug, Clone, Copy, PartialEq, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum HealthState {
    Healthy,
    /// DB는 응답하지만 ping이 느림
    Degraded,
    /// DB에 연결할 수 없음 (503)
    Unhealthy,
}

/// DB ping 결과
#[derive(Serialize, Debug, Clone, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DatabaseHealth {
    /// 연결된 DB 종류 (sqlite, mysql, ...)
    #[schema(example = "sqlite")]
    pub backend: String,
    pub reachable: bool,
    /// ping 소요 시간. 타임아웃이면 대기한 시간
    #[schema(example = 2)]
    pub latency_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl DatabaseHealth {
    pub fn reachable(backend: impl Into<String>, elapsed: Duration) -> Self {
        Self {
            backend: backend.into(),
            reachable: true,
            latency_ms: elapsed.as_millis() as u64,
            error: None,
        }
    }

    pub fn unreachable(backend: impl Into<String>, elapsed: Duration, error: impl Into<String>) -> Self {
        Self {
            backend: backend.into(),
            reachable: false,
            latency_ms: elapsed.as_millis() as u64,
            error: Some(error.into()),
        }
    }

    /// ping 결과로 서버 상태 판정
    pub fn state(&self, degraded_after: Duration) -> HealthState {
        if !self.reachable {
            HealthState::Unhealthy
        } else if self.latency_ms >= degraded_after.as_millis() as u64 {
            HealthState::Degraded
        } else {
            HealthState::Healthy
        }
    }
}
