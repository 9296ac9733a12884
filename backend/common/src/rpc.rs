use serde::{Deserialize, Serialize};

/// Discriminated result returned by every backend procedure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum RpcResult<T> {
    Data { data: T },
    Error { error: String },
}

/// Result of the register call, `data` holds the registration id.
pub type RegistrationResult = RpcResult<String>;

impl<T> RpcResult<T> {
    pub fn data(data: T) -> Self {
        Self::Data { data }
    }

    pub fn error(error: impl Into<String>) -> Self {
        Self::Error {
            error: error.into(),
        }
    }

    pub fn into_result(self) -> Result<T, String> {
        match self {
            Self::Data { data } => Ok(data),
            Self::Error { error } => Err(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn decodes_data_branch() {
        let result: RegistrationResult =
            serde_json::from_value(json!({ "type": "data", "data": "abc123" })).unwrap();

        assert_eq!(result, RpcResult::data("abc123".to_string()));
    }

    #[test]
    fn decodes_error_branch() {
        let result: RegistrationResult =
            serde_json::from_value(json!({ "type": "error", "error": "county closed" })).unwrap();

        assert_eq!(result.into_result(), Err("county closed".to_string()));
    }

    #[test]
    fn rejects_unknown_tag() {
        let result = serde_json::from_value::<RegistrationResult>(json!({ "type": "pending" }));
        assert!(result.is_err());
    }
}
