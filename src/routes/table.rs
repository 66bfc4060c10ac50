use serde::{Deserialize, Serialize};
use ts_rs::TS;
use utoipa::ToSchema;

/// RouteName
///
/// The closed set of named navigation targets known to the shell.
/// Serialized with the identifiers the browser client uses (`sobreMi`, `editCourse`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS, ToSchema)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub enum RouteName {
    SobreMi,
    Login,
    Register,
    Home,
    Admin,
    EditCourse,
}

impl RouteName {
    pub fn as_str(self) -> &'static str {
        match self {
            RouteName::SobreMi => "sobreMi",
            RouteName::Login => "login",
            RouteName::Register => "register",
            RouteName::Home => "home",
            RouteName::Admin => "admin",
            RouteName::EditCourse => "editCourse",
        }
    }
}

impl std::fmt::Display for RouteName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// RouteEntry
///
/// A named, path-addressable view descriptor with its authentication requirement.
/// Entries live in a `static` table and are never mutated after registration.
#[derive(Debug, PartialEq, Eq)]
pub struct RouteEntry {
    /// Path pattern in router syntax. `{param}` segments match any non-empty segment.
    pub path: &'static str,
    pub name: RouteName,
    /// Identifier of the view the client mounts for this route.
    pub view: &'static str,
    pub requires_auth: bool,
}

static ROUTES: [RouteEntry; 6] = [
    RouteEntry {
        path: "/",
        name: RouteName::SobreMi,
        view: "SobreMi",
        requires_auth: false,
    },
    RouteEntry {
        path: "/login",
        name: RouteName::Login,
        view: "Login",
        requires_auth: false,
    },
    RouteEntry {
        path: "/register",
        name: RouteName::Register,
        view: "Register",
        requires_auth: false,
    },
    RouteEntry {
        path: "/home",
        name: RouteName::Home,
        view: "HomeView",
        requires_auth: true,
    },
    RouteEntry {
        path: "/admin",
        name: RouteName::Admin,
        view: "AdminView",
        requires_auth: true,
    },
    RouteEntry {
        path: "/admin/editar/{id}",
        name: RouteName::EditCourse,
        view: "EditCourseView",
        requires_auth: true,
    },
];

/// ResolvedRoute
///
/// Result of matching a concrete path: the table entry plus the values bound to
/// its `{param}` segments, in pattern order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRoute {
    pub entry: &'static RouteEntry,
    pub params: Vec<(String, String)>,
}

impl ResolvedRoute {
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value.as_str())
    }
}

/// RouteTable
///
/// Read-only handle on the ordered route registrations. Every handle points at the
/// same process-wide entries.
#[derive(Debug, Clone, Copy, Default)]
pub struct RouteTable;

impl RouteTable {
    /// The table registered at process start.
    pub fn standard() -> Self {
        RouteTable
    }

    pub fn entries(&self) -> &'static [RouteEntry] {
        &ROUTES
    }

    /// Total lookup by name. `ROUTES` is ordered like the `RouteName` variants.
    pub fn get(&self, name: RouteName) -> &'static RouteEntry {
        &ROUTES[name as usize]
    }

    /// resolve
    ///
    /// Matches a concrete path against the entries in registration order; the first
    /// match wins. A trailing slash is tolerated and an empty path is the root.
    /// Returns `None` for unmatched paths, which the HTTP router answers with its
    /// own not-found fallback.
    pub fn resolve(&self, path: &str) -> Option<ResolvedRoute> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let segments = split_segments(path);

        ROUTES.iter().find_map(|entry| {
            let pattern = split_segments(entry.path);
            if pattern.len() != segments.len() {
                return None;
            }

            let mut params = Vec::new();
            for (expected, actual) in pattern.iter().zip(&segments) {
                match param_name(expected) {
                    Some(key) => params.push((key.to_string(), (*actual).to_string())),
                    None if expected == actual => {}
                    None => return None,
                }
            }

            Some(ResolvedRoute { entry, params })
        })
    }

    /// href
    ///
    /// Builds the concrete path of a named route, substituting its `{param}`
    /// segments from `params`. Params the pattern does not declare are ignored.
    /// Returns `None` when a declared param is missing or empty.
    pub fn href(&self, name: RouteName, params: &[(String, String)]) -> Option<String> {
        let entry = self.get(name);
        let segments = split_segments(entry.path)
            .into_iter()
            .map(|segment| match param_name(segment) {
                Some(key) => params
                    .iter()
                    .find(|(name, value)| name == key && !value.is_empty())
                    .map(|(_, value)| value.clone()),
                None => Some(segment.to_string()),
            })
            .collect::<Option<Vec<String>>>()?;

        Some(format!("/{}", segments.join("/")))
    }
}

fn split_segments(path: &str) -> Vec<&str> {
    path.split('/').filter(|segment| !segment.is_empty()).collect()
}

fn param_name(segment: &str) -> Option<&str> {
    segment.strip_prefix('{')?.strip_suffix('}')
}
