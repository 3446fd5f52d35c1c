use chrono::Utc;
use parley_client::ClientError;
use parley_types::MessageRecord;

const NOTICE_FOOTER: &str = "*Please try again later or contact support if the issue persists.*";
const NOTICE_TEMPERATURE: f32 = 0.7;

/// Assistant-style text shown in place of a response that failed
pub fn error_notice(message: &str) -> String {
    format!("⚠️ **Error**: {}\n\n{}", message, NOTICE_FOOTER)
}

/// Synthetic record committed when a cycle fails, so history only ever holds
/// well-formed exchanges.
pub fn error_record(prompt: &str, model_id: &str, error: &ClientError) -> MessageRecord {
    MessageRecord::new(Utc::now().timestamp_millis(), prompt, error_notice(&error.to_string()))
        .with_model(model_id)
        .with_token_count(0)
        .with_temperature(NOTICE_TEMPERATURE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notice_format() {
        assert_eq!(
            error_notice("Network error occurred"),
            "⚠️ **Error**: Network error occurred\n\n*Please try again later or contact support if the issue persists.*"
        );
    }

    #[test]
    fn test_error_record_fields() {
        let record = error_record("hello", "gpt-x", &ClientError::server(500, "Upstream timeout"));

        assert_eq!(record.prompt_text, "hello");
        assert!(record.response_text.contains("Upstream timeout"));
        assert_eq!(record.model_id.as_deref(), Some("gpt-x"));
        assert_eq!(record.token_count, Some(0));
        assert_eq!(record.temperature, Some(0.7));
        assert!(record.id > 0);
    }
}
