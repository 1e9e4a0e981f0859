//! Canned remote procedure calls.

use mock_core::{Response, ServiceError};
use serde_json::{json, Value as JsonValue};
use std::fmt;
use std::str::FromStr;

/// Procedures with a canned response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Procedure {
    LogEvent,
    GetUserPermissions,
    GetDashboardSummary,
    HealthCheck,
}

impl Procedure {
    pub const ALL: [Procedure; 4] = [
        Procedure::LogEvent,
        Procedure::GetUserPermissions,
        Procedure::GetDashboardSummary,
        Procedure::HealthCheck,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::LogEvent => "log_event",
            Self::GetUserPermissions => "get_user_permissions",
            Self::GetDashboardSummary => "get_dashboard_summary",
            Self::HealthCheck => "health_check",
        }
    }

    /// The fixed response body. Parameters never change the result.
    pub fn respond(&self) -> JsonValue {
        match self {
            Self::LogEvent => json!({ "success": true }),
            Self::GetUserPermissions => json!([
                "dashboard:view",
                "analytics:view",
                "analytics:export",
                "social:view",
                "reports:view"
            ]),
            Self::GetDashboardSummary => json!({
                "total_users": 48250,
                "active_users_30d": 21840,
                "revenue_30d": 186420.5,
                "churn_rate": 0.042,
                "updated_at": "2024-12-31T23:59:59Z"
            }),
            Self::HealthCheck => json!({ "status": "ok" }),
        }
    }
}

impl fmt::Display for Procedure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Procedure {
    type Err = ServiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.name() == s)
            .ok_or_else(|| ServiceError::UnknownProcedure(s.to_string()))
    }
}

/// Resolve an RPC call synchronously.
///
/// Known procedures answer whatever the shape of `params`; only an unknown
/// procedure name is reported through the envelope.
pub fn call(name: &str, params: &JsonValue) -> Response<JsonValue> {
    let procedure = match name.parse::<Procedure>() {
        Ok(procedure) => procedure,
        Err(e) => {
            tracing::warn!("RPC to unknown procedure '{}'", name);
            return Response::err(e);
        }
    };

    tracing::debug!("RPC {} with params {}", procedure, params);
    Response::ok(procedure.respond())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_procedure_round_trips_by_name() {
        for procedure in Procedure::ALL {
            assert_eq!(procedure.name().parse::<Procedure>().unwrap(), procedure);
        }
    }

    #[test]
    fn test_log_event_acknowledges() {
        let response = call("log_event", &json!({ "event": "page_view" }));
        assert_eq!(response.data, Some(json!({ "success": true })));
        assert!(response.error.is_none());
    }

    #[test]
    fn test_null_params_accepted() {
        assert!(call("health_check", &JsonValue::Null).is_ok());
    }

    #[test]
    fn test_unknown_procedure_is_envelope_error() {
        let response = call("drop_everything", &json!({}));
        assert!(response.data.is_none());
        assert_eq!(
            response.error,
            Some(ServiceError::UnknownProcedure("drop_everything".to_string()))
        );
    }

    #[test]
    fn test_non_object_params_still_answer() {
        let response = call("log_event", &json!(["page_view"]));
        assert!(response.error.is_none());
        assert_eq!(response.data, Some(json!({ "success": true })));

        let response = call("get_dashboard_summary", &json!(7));
        assert!(response.is_ok());
        assert_eq!(response.data, Some(Procedure::GetDashboardSummary.respond()));
    }
}
