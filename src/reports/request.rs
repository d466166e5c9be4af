use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

use crate::error::Result;

/// Data model every ad-hoc query runs against
pub const AD_HOC_MODEL: &str = "topcoder_model_main";
/// Row cap for ad-hoc queries, independent of the configured report limit
pub const AD_HOC_LIMIT: u32 = 10;
/// Timezone applied to time-bucketed aggregations
pub const AD_HOC_TIMEZONE: &str = "America/Los_Angeles";

/// Field name to value equality predicates
pub type Filters = BTreeMap<String, String>;

/// Saved report or query executed by id over GET
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportTarget {
    Look(u64),
    Query(u64),
}

impl ReportTarget {
    pub fn path(&self, format: &str, limit: u32) -> String {
        match self {
            ReportTarget::Look(id) => format!("looks/{}/run/{}?limit={}", id, format, limit),
            ReportTarget::Query(id) => format!("queries/{}/run/{}?limit={}", id, format, limit),
        }
    }
}

/// Body of a `POST /queries/run/{format}` call
///
/// `view` and `fields` are left out of the JSON entirely when absent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdHocQuery {
    pub id: u64,
    pub model: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub view: Option<String>,
    pub filters: Filters,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<String>>,
    pub limit: u32,
    #[serde(rename = "query_timezon")]
    pub query_timezone: String,
}

impl AdHocQuery {
    pub fn new(id: u64, filters: Filters) -> Self {
        Self {
            id,
            model: AD_HOC_MODEL.to_string(),
            view: None,
            filters,
            fields: None,
            limit: AD_HOC_LIMIT,
            query_timezone: AD_HOC_TIMEZONE.to_string(),
        }
    }

    pub fn with_view(mut self, view: impl Into<String>) -> Self {
        self.view = Some(view.into());
        self
    }

    pub fn with_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields = Some(fields.into_iter().map(Into::into).collect());
        self
    }
}

/// Outbound call shape
///
/// GET runs a saved report and carries no body. POST runs an ad-hoc query
/// with a JSON body and always carries the bearer header; whether GET does
/// is decided by [`ApiRequest::carries_token`].
#[derive(Debug, Clone, PartialEq)]
pub enum ApiRequest {
    Get,
    Post { body: Value },
}

impl ApiRequest {
    pub fn post<T: Serialize>(body: &T) -> Result<Self> {
        Ok(ApiRequest::Post {
            body: serde_json::to_value(body)?,
        })
    }

    pub fn method(&self) -> &'static str {
        match self {
            ApiRequest::Get => "GET",
            ApiRequest::Post { .. } => "POST",
        }
    }

    /// Saved report runs are unauthenticated unless `authorize_get` is set
    pub fn carries_token(&self, authorize_get: bool) -> bool {
        match self {
            ApiRequest::Get => authorize_get,
            ApiRequest::Post { .. } => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_target_paths() {
        assert_eq!(ReportTarget::Look(42).path("json", 5000), "looks/42/run/json?limit=5000");
        assert_eq!(ReportTarget::Query(7).path("csv", 10), "queries/7/run/csv?limit=10");
    }

    #[test]
    fn test_ad_hoc_body_omits_absent_view_and_fields() {
        let mut filters = Filters::new();
        filters.insert("user.email".to_string(), "a@b.com".to_string());

        let body = serde_json::to_value(AdHocQuery::new(1234, filters)).unwrap();
        assert_eq!(
            body,
            json!({
                "id": 1234,
                "model": "topcoder_model_main",
                "filters": { "user.email": "a@b.com" },
                "limit": 10,
                "query_timezon": "America/Los_Angeles"
            })
        );
    }

    #[test]
    fn test_ad_hoc_body_keeps_field_order() {
        let query = AdHocQuery::new(1, Filters::new())
            .with_view("challenge")
            .with_fields(["z.last", "a.first", "m.middle"]);

        let body = serde_json::to_value(&query).unwrap();
        assert_eq!(body["view"], "challenge");
        assert_eq!(body["fields"], json!(["z.last", "a.first", "m.middle"]));
    }

    #[test]
    fn test_token_policy() {
        let post = ApiRequest::post(&json!({"id": 1})).unwrap();
        assert!(post.carries_token(false));
        assert!(post.carries_token(true));
        assert!(!ApiRequest::Get.carries_token(false));
        assert!(ApiRequest::Get.carries_token(true));
        assert_eq!(ApiRequest::Get.method(), "GET");
        assert_eq!(post.method(), "POST");
    }
}
