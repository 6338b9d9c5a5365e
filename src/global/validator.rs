use validator::ValidationError;

/// HTML 특수문자 이스케이프
///
/// 사용자 입력 텍스트는 저장 전에 이 함수를 거칩니다.
pub fn sanitize_text(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&#34;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// 선택 입력용 이스케이프
pub fn sanitize_opt(input: Option<&str>) -> Option<String> {
    input.map(sanitize_text)
}

/// 닉네임 유효성 검증
///
/// 공백 없이 한글, 영문, 숫자, `_`, `-`만 허용합니다.
pub fn validate_nickname(nickname: &str) -> Result<(), ValidationError> {
    for c in nickname.chars() {
        if !(c.is_alphanumeric() || c == '_' || c == '-' || is_korean(c)) {
            let mut err = ValidationError::new("nickname_invalid_chars");
            err.message = Some("닉네임에는 한글, 영문, 숫자, _, -만 사용할 수 있습니다.".into());
            return Err(err);
        }
    }
    Ok(())
}

/// 한글 문자 여부 확인 (가-힣, ㄱ-ㅎ, ㅏ-ㅣ)
fn is_korean(c: char) -> bool {
    matches!(c, '\u{AC00}'..='\u{D7A3}' | '\u{3131}'..='\u{314E}' | '\u{314F}'..='\u{3163}')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_escape_markup_characters() {
        let result = sanitize_text(r#"<script>alert("x") & 'y'</script>"#);

        assert_eq!(
            result,
            "&lt;script&gt;alert(&#34;x&#34;) &amp; &#39;y&#39;&lt;/script&gt;"
        );
    }

    #[test]
    fn should_keep_plain_text() {
        assert_eq!(sanitize_text("좋아하는 색은?"), "좋아하는 색은?");
    }

    #[test]
    fn should_escape_optional_text() {
        assert_eq!(sanitize_opt(None), None);
        assert_eq!(sanitize_opt(Some("a<b")), Some("a&lt;b".to_string()));
    }

    #[test]
    fn should_accept_valid_nicknames() {
        assert!(validate_nickname("meow").is_ok());
        assert!(validate_nickname("고양이_01").is_ok());
    }

    #[test]
    fn should_reject_nickname_with_space_or_symbol() {
        assert!(validate_nickname("me ow").is_err());
        assert!(validate_nickname("meow!").is_err());
    }
}
