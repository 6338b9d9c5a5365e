//! 비밀번호 해시/검증 (Argon2id)
//!
//! 저장 형식은 PHC 문자열(`$argon2id$v=19$m=...,t=...,p=...$<salt>$<hash>`)이며,
//! 검증 시 저장된 문자열의 파라미터를 그대로 사용합니다.

use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand::RngCore;

use super::error::AppError;

const SALT_LEN: usize = 16;

/// 새 salt로 비밀번호 해시 생성
pub fn hash_password(password: &str) -> Result<String, AppError> {
    let mut bytes = [0u8; SALT_LEN];
    rand::thread_rng().fill_bytes(&mut bytes);
    let salt = SaltString::encode_b64(&bytes)
        .map_err(|e| AppError::InternalError(format!("salt 생성에 실패했습니다: {}", e)))?;

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::InternalError(format!("비밀번호 해시에 실패했습니다: {}", e)))
}

/// 저장된 해시와 비밀번호 일치 여부 확인
///
/// 형식이 잘못된 해시는 불일치로 취급합니다.
pub fn verify_password(password: &str, stored: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(stored) else {
        return false;
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}
