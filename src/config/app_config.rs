use std::env;

/// 기본 관리자 계정 (최초 기동 시 생성)
#[derive(Debug, Clone)]
pub struct AdminBootstrap {
    pub nickname: String,
    pub email: String,
    pub password: String,
}

/// 애플리케이션 설정
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server_port: u16,
    pub database_url: String,
    pub jwt_secret: String,
    /// Access Token 유효 시간 (초)
    pub jwt_expiration: i64,
    pub schema_update: bool,
    pub admin: Option<AdminBootstrap>,
}

impl AppConfig {
    /// 환경 변수에서 설정 로드
    pub fn from_env() -> Result<Self, ConfigError> {
        let server_port = env::var("SERVER_PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidPort)?;

        let database_url = env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://survey.db?mode=rwc".to_string());

        let jwt_secret = env::var("JWT_SECRET").unwrap_or_else(|_| {
            tracing::warn!(
                "JWT_SECRET 환경변수가 설정되지 않았습니다. 프로덕션 환경에서는 반드시 설정하세요."
            );
            "secret".to_string()
        });

        let jwt_expiration: i64 = env::var("JWT_EXPIRATION")
            .unwrap_or_else(|_| "1800".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidExpiration)?;
        if jwt_expiration <= 0 {
            return Err(ConfigError::InvalidExpiration);
        }

        let schema_update = env::var("DB_SCHEMA_UPDATE")
            .unwrap_or_else(|_| "true".to_string())
            .parse::<bool>()
            .map_err(|_| ConfigError::InvalidSchemaUpdate)?;

        let admin = match (
            env::var("ADMIN_NICKNAME"),
            env::var("ADMIN_EMAIL"),
            env::var("ADMIN_PASSWORD"),
        ) {
            (Ok(nickname), Ok(email), Ok(password)) => Some(AdminBootstrap {
                nickname,
                email,
                password,
            }),
            (Err(_), Err(_), Err(_)) => None,
            _ => return Err(ConfigError::IncompleteAdmin),
        };

        Ok(Self {
            server_port,
            database_url,
            jwt_secret,
            jwt_expiration,
            schema_update,
            admin,
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid port number")]
    InvalidPort,
    #[error("Invalid expiration time")]
    InvalidExpiration,
    #[error("DB_SCHEMA_UPDATE must be 'true' or 'false'")]
    InvalidSchemaUpdate,
    #[error("ADMIN_NICKNAME, ADMIN_EMAIL and ADMIN_PASSWORD must be set together")]
    IncompleteAdmin,
}
