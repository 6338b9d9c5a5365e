use std::time::{Duration, Instant};

use sea_orm::{ConnectionTrait, DatabaseConnection};
use tokio::time::timeout;
use tracing::warn;

use super::dto::{DatabaseHealth, HealthStatus};

static START_TIME: std::sync::OnceLock<Instant> = std::sync::OnceLock::new();

const PING_TIMEOUT: Duration = Duration::from_secs(3);
const DEGRADED_THRESHOLD: Duration = Duration::from_millis(500);

/// 서버 시작 시간 초기화 (main에서 호출)
pub fn init_start_time() {
    START_TIME.get_or_init(Instant::now);
}

fn uptime_secs() -> u64 {
    START_TIME.get().map(|t| t.elapsed().as_secs()).unwrap_or(0)
}

pub async fn check_health(db: &DatabaseConnection) -> HealthStatus {
    let database = ping_database(db, PING_TIMEOUT).await;

    HealthStatus {
        status: database.state(DEGRADED_THRESHOLD),
        version: env!("CARGO_PKG_VERSION"),
        uptime_secs: uptime_secs(),
        database,
    }
}

async fn ping_database(db: &DatabaseConnection, limit: Duration) -> DatabaseHealth {
    let backend = format!("{:?}", db.get_database_backend()).to_lowercase();
    let start = Instant::now();

    match timeout(limit, db.ping()).await {
        Ok(Ok(())) => DatabaseHealth::reachable(backend, start.elapsed()),
        Ok(Err(e)) => {
            warn!(error = %e, "database ping failed");
            DatabaseHealth::unreachable(backend, start.elapsed(), e.to_string())
        }
        Err(_) => {
            warn!(timeout_ms = limit.as_millis() as u64, "database ping timed out");
            DatabaseHealth::unreachable(
                backend,
                start.elapsed(),
                format!("ping timed out after {}ms", limit.as_millis()),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::health::dto::HealthState;
    use sea_orm::Database;

    #[tokio::test]
    async fn should_report_healthy_in_memory_sqlite() {
        let db = Database::connect("sqlite::memory:").await.unwrap();

        let status = check_health(&db).await;

        assert_eq!(status.status, HealthState::Healthy);
        assert_eq!(status.database.backend, "sqlite");
        assert!(status.database.reachable);
    }

    #[tokio::test]
    async fn should_report_unhealthy_after_connection_closed() {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        let handle = db.clone();
        db.close().await.unwrap();

        let database = ping_database(&handle, PING_TIMEOUT).await;

        assert!(!database.reachable);
        assert!(database.error.is_some());
        assert_eq!(database.state(DEGRADED_THRESHOLD), HealthState::Unhealthy);
    }
}
