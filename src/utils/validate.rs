use once_cell::sync::Lazy;
use regex::Regex;

static USERNAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("Invalid username regex"));

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").expect("Invalid email regex")
});

static URL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^https?://[^\s/$.?#][^\s]*$").expect("Invalid url regex"));

pub fn validate_username(username: &str) -> Result<(), &'static str> {
    // 用户名长度校验：5 <= x <= 16
    if username.len() < 5 || username.len() > 16 {
        return Err("Username length must be between 5 and 16 characters");
    }
    // 用户名格式校验：只能包含字母、数字、下划线或连字符
    if !USERNAME_RE.is_match(username) {
        return Err("Username must contain only letters, numbers, underscores or hyphens");
    }
    Ok(())
}

pub fn validate_email(email: &str) -> Result<(), &'static str> {
    // 邮箱格式校验：必须包含 @ 和 .
    if !EMAIL_RE.is_match(email) {
        return Err("Email format is invalid");
    }
    Ok(())
}

/// 视频等外链只接受 http/https
pub fn validate_url(url: &str) -> Result<(), &'static str> {
    if !URL_RE.is_match(url.trim()) {
        return Err("URL must start with http:// or https://");
    }
    Ok(())
}

/// 标题类字段：去除首尾空白后非空且不超过 max 个字符
pub fn validate_title(title: &str, max: usize) -> Result<(), String> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err("Title must not be empty".to_string());
    }
    if trimmed.chars().count() > max {
        return Err(format!("Title must be at most {max} characters"));
    }
    Ok(())
}

const MIN_PASSWORD_LEN: usize = 8;

// 忽略大小写比较
const COMMON_PASSWORDS: &[&str] = &[
    "password",
    "password1",
    "12345678",
    "123456789",
    "qwerty123",
    "admin123",
    "abcd1234",
    "welcome1",
    "tutorhub1",
];

type PasswordRule = (fn(&str) -> bool, &'static str);

const PASSWORD_RULES: &[PasswordRule] = &[
    (
        |p| p.chars().count() >= MIN_PASSWORD_LEN,
        "Password must be at least 8 characters long",
    ),
    (
        |p| p.chars().any(|c| c.is_ascii_uppercase()),
        "Password must contain at least one uppercase letter",
    ),
    (
        |p| p.chars().any(|c| c.is_ascii_lowercase()),
        "Password must contain at least one lowercase letter",
    ),
    (
        |p| p.chars().any(|c| c.is_ascii_digit()),
        "Password must contain at least one digit",
    ),
    (
        |p| !COMMON_PASSWORDS.iter().any(|w| p.eq_ignore_ascii_case(w)),
        "Password is too common, please choose a stronger password",
    ),
];

/// 返回密码违反的全部规则
pub fn password_violations(password: &str) -> Vec<&'static str> {
    PASSWORD_RULES
        .iter()
        .filter(|(check, _)| !check(password))
        .map(|(_, msg)| *msg)
        .collect()
}

/// 密码策略：长度、大小写字母、数字，且不在常见密码表中
pub fn validate_password(password: &str) -> Result<(), String> {
    let violations = password_violations(password);
    if violations.is_empty() {
        Ok(())
    } else {
        Err(violations.join("; "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_username_rules() {
        assert!(validate_username("alice_01").is_ok());
        assert!(validate_username("abc").is_err());
        assert!(validate_username("this_name_is_far_too_long").is_err());
        assert!(validate_username("bad name").is_err());
    }

    #[test]
    fn test_email_rules() {
        assert!(validate_email("tutor@example.com").is_ok());
        assert!(validate_email("no-at-sign.com").is_err());
        assert!(validate_email("a@b").is_err());
    }

    #[test]
    fn test_url_rules() {
        assert!(validate_url("https://videos.example.com/intro.mp4").is_ok());
        assert!(validate_url("http://localhost:8080/v").is_ok());
        assert!(validate_url("ftp://example.com/file").is_err());
        assert!(validate_url("javascript:alert(1)").is_err());
    }

    #[test]
    fn test_title_rules() {
        assert!(validate_title("Algebra I", 200).is_ok());
        assert!(validate_title("   ", 200).is_err());
        assert!(validate_title("abcdef", 5).is_err());
    }

    #[test]
    fn test_strong_passwords_pass() {
        for pwd in ["SecureP@ss1", "MyP@ssw0rd", "SecurePass123"] {
            assert!(validate_password(pwd).is_ok(), "{pwd}");
        }
    }

    #[test]
    fn test_each_rule_is_reported() {
        assert_eq!(
            password_violations("Ab1"),
            vec!["Password must be at least 8 characters long"]
        );
        assert_eq!(
            password_violations("abcd1235"),
            vec!["Password must contain at least one uppercase letter"]
        );
        assert_eq!(
            password_violations("ABCD1235"),
            vec!["Password must contain at least one lowercase letter"]
        );
        assert_eq!(
            password_violations("AbcdEfgh"),
            vec!["Password must contain at least one digit"]
        );
    }

    #[test]
    fn test_common_password_rejected_case_insensitively() {
        let err = validate_password("Password1").unwrap_err();
        assert!(err.contains("too common"));
        assert!(validate_password("TUTORHUB1").is_err());
    }

    #[test]
    fn test_violations_are_joined() {
        let err = validate_password("abc").unwrap_err();
        assert_eq!(err.matches("; ").count(), 2);
    }
}
