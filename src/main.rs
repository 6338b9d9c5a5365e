use std::net::SocketAddr;

use survey_server::config::{establish_connection, AppConfig};
use survey_server::domain::health::init_start_time;
use survey_server::domain::user::service::UserService;
use survey_server::utils::logging::init_logging;
use survey_server::{app, AppState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. 환경변수 로드
    dotenvy::dotenv().ok();

    // 2. 로깅 초기화 (guard는 종료 시까지 유지)
    let _guard = init_logging();
    init_start_time();

    // 3. 설정 및 DB 연결
    let config = AppConfig::from_env()?;
    let db = establish_connection(&config).await?;

    if let Some(admin) = &config.admin {
        UserService::ensure_admin(&db, admin)
            .await
            .map_err(|e| format!("기본 관리자 계정 생성 실패: {}", e.message()))?;
    }

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let state = AppState { db, config };

    // 4. 서버 실행
    tracing::info!("Server listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app(state)).await?;

    Ok(())
}
