use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use ts_rs::TS;
use utoipa::ToSchema;

use crate::routes::table::{RouteEntry, RouteName};

// --- Route Contract (shared with the browser client) ---

/// RouteDescriptor
///
/// Serializable form of one Route Table entry, as listed by `GET /api/routes`.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct RouteDescriptor {
    pub path: String,
    pub name: RouteName,
    pub view: String,
    pub requires_auth: bool,
}

impl From<&RouteEntry> for RouteDescriptor {
    fn from(entry: &RouteEntry) -> Self {
        Self {
            path: entry.path.to_string(),
            name: entry.name,
            view: entry.view.to_string(),
            requires_auth: entry.requires_auth,
        }
    }
}

/// ViewDescriptor
///
/// Body of an allowed navigation: which view to mount and with which params.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, PartialEq, Eq)]
#[ts(export)]
pub struct ViewDescriptor {
    pub route: RouteName,
    pub view: String,
    /// Concrete path that was navigated to, base path excluded.
    pub path: String,
    pub params: BTreeMap<String, String>,
}

// --- Navigation Query ---

/// NavigationQuery
///
/// Query parameters of `GET /api/navigation`.
#[derive(Debug, Deserialize, utoipa::IntoParams)]
pub struct NavigationQuery {
    /// Concrete path to evaluate, e.g. `/admin/editar/7`.
    pub path: String,
}

/// NavigationOutcome
///
/// What the guard would do if the caller navigated to the queried path now.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct NavigationOutcome {
    pub route: RouteName,
    pub authenticated: bool,
    pub allowed: bool,
    pub redirect_to: Option<RouteName>,
    /// Location the client should load instead, base path included.
    pub redirect_path: Option<String>,
}

/// ErrorBody
///
/// JSON body of every API error response.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct ErrorBody {
    pub error: String,
}
