use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    Ok,
    Error,
}

/// Envelope of every `/v1` answer: `data` on success, `msg` on failure.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    pub status: ResponseStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub msg: Option<String>,
}

impl<T> ApiResponse<T> {
    pub const fn ok(data: T) -> Self {
        Self {
            status: ResponseStatus::Ok,
            data: Some(data),
            msg: None,
        }
    }

    pub const fn error(msg: String) -> Self {
        Self {
            status: ResponseStatus::Error,
            data: None,
            msg: Some(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use folio_types::Scope;
    use serde_json::json;

    use super::*;

    #[test]
    fn test_envelope_omits_missing_fields() {
        let ok = serde_json::to_value(ApiResponse::ok(Scope::ThreeMonth)).unwrap();
        assert_eq!(ok, json!({"status": "ok", "data": "3M"}));

        let error: ApiResponse<Scope> = ApiResponse::error("Address 0xa is not tracked".to_string());
        assert_eq!(
            serde_json::to_value(error).unwrap(),
            json!({"status": "error", "msg": "Address 0xa is not tracked"})
        );
    }
}
