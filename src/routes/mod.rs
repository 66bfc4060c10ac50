/// Router Module Index
///
/// Splits the shell's routing into the navigable views, which pass through the
/// navigation guard, and the JSON API, which does not.

/// The static Route Table: every navigable path with its authentication requirement.
pub mod table;

/// One view route per Route Table entry. Wrapped by the navigation guard.
pub mod views;

/// Unguarded JSON endpoints: route listing, navigation query, health.
pub mod api;
