//! `${VAR}` expansion for configuration strings.

use crate::ConfigError;

/// Expand `${VAR}` and `${VAR:-default}` references in `value`.
///
/// An unset variable without a default is an error naming `field`.
/// Values without `${` are returned unchanged.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    shellexpand::env_with_context(value, |var| -> Result<Option<String>, UnsetVar> {
        std::env::var(var).map(Some).map_err(|_| UnsetVar(var.to_owned()))
    })
    .map(std::borrow::Cow::into_owned)
    .map_err(|e| ConfigError::EnvVar {
        field: field.to_owned(),
        message: format!("${{{}}} not set", e.cause.0),
    })
}

/// Name of a variable that was referenced but not set.
struct UnsetVar(String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_whole_value() {
        // SAFETY: variable name is unique to this test
        unsafe {
            std::env::set_var("PRESSROOM_TEST_CMS_URL", "https://cms.example.com");
        }
        let result = expand_env("${PRESSROOM_TEST_CMS_URL}", "content.base_url").unwrap();
        assert_eq!(result, "https://cms.example.com");
        unsafe {
            std::env::remove_var("PRESSROOM_TEST_CMS_URL");
        }
    }

    #[test]
    fn test_expand_default_when_unset() {
        // SAFETY: variable name is unique to this test
        unsafe {
            std::env::remove_var("PRESSROOM_TEST_UNSET_HOST");
        }
        let result = expand_env(
            "${PRESSROOM_TEST_UNSET_HOST:-http://localhost:1337}",
            "content.base_url",
        )
        .unwrap();
        assert_eq!(result, "http://localhost:1337");
    }

    #[test]
    fn test_expand_value_wins_over_default() {
        // SAFETY: variable name is unique to this test
        unsafe {
            std::env::set_var("PRESSROOM_TEST_TOKEN", "abc123");
        }
        let result = expand_env("${PRESSROOM_TEST_TOKEN:-unused}", "content.api_token").unwrap();
        assert_eq!(result, "abc123");
        unsafe {
            std::env::remove_var("PRESSROOM_TEST_TOKEN");
        }
    }

    #[test]
    fn test_expand_embedded() {
        // SAFETY: variable name is unique to this test
        unsafe {
            std::env::set_var("PRESSROOM_TEST_DOMAIN", "cms.internal");
        }
        let result = expand_env("https://${PRESSROOM_TEST_DOMAIN}:1337", "content.base_url").unwrap();
        assert_eq!(result, "https://cms.internal:1337");
        unsafe {
            std::env::remove_var("PRESSROOM_TEST_DOMAIN");
        }
    }

    #[test]
    fn test_expand_missing_names_var_and_field() {
        // SAFETY: variable name is unique to this test
        unsafe {
            std::env::remove_var("PRESSROOM_TEST_MISSING");
        }
        let err = expand_env("${PRESSROOM_TEST_MISSING}", "content.api_token").unwrap_err();
        assert!(matches!(err, ConfigError::EnvVar { .. }));
        let message = err.to_string();
        assert!(message.contains("PRESSROOM_TEST_MISSING"));
        assert!(message.contains("content.api_token"));
    }

    #[test]
    fn test_literal_and_bare_dollar_unchanged() {
        assert_eq!(expand_env("plain", "f").unwrap(), "plain");
        assert_eq!(expand_env("$HOME/x", "f").unwrap(), "$HOME/x");
    }
}
