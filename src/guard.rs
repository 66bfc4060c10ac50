use crate::{
    auth::AuthStore,
    routes::table::{RouteEntry, RouteName},
};

/// Where unauthenticated visitors of protected routes are sent.
/// This is the landing page, not the login form.
pub const PUBLIC_LANDING: RouteName = RouteName::SobreMi;

/// Where authenticated users are sent when they open an entry page.
pub const HOME: RouteName = RouteName::Home;

/// Public-only routes: authenticated users are bounced away from these.
///
/// Explicit allow-list. A newly registered public route is NOT bounced unless it
/// is added here.
pub const PUBLIC_ONLY: [RouteName; 3] = [RouteName::SobreMi, RouteName::Login, RouteName::Register];

/// Decision
///
/// Outcome of guarding one navigation attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    RedirectTo(RouteName),
}

impl Decision {
    /// The redirect target, if any.
    pub fn target(self) -> Option<RouteName> {
        match self {
            Decision::Allow => None,
            Decision::RedirectTo(name) => Some(name),
        }
    }

    pub fn is_allow(self) -> bool {
        matches!(self, Decision::Allow)
    }
}

/// decide
///
/// The route-authorization rule. Pure and total over `(to.requires_auth,
/// is_authenticated, to.name)`:
///
/// 1. protected route, anonymous visitor: redirect to the public landing page.
/// 2. public-only route, authenticated user: redirect to home.
/// 3. anything else: allow.
pub fn decide(to: &RouteEntry, is_authenticated: bool) -> Decision {
    if to.requires_auth && !is_authenticated {
        Decision::RedirectTo(PUBLIC_LANDING)
    } else if !to.requires_auth && is_authenticated && PUBLIC_ONLY.contains(&to.name) {
        Decision::RedirectTo(HOME)
    } else {
        Decision::Allow
    }
}

/// NavigationRequest
///
/// One transition attempt. `from` is `None` on the first navigation of a session.
#[derive(Debug, Clone, Copy)]
pub struct NavigationRequest<'a> {
    pub to: &'a RouteEntry,
    pub from: Option<&'a RouteEntry>,
}

/// Instruction handed to the single-use `proceed` continuation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Continue,
    Redirect(RouteName),
}

impl From<Decision> for Transition {
    fn from(decision: Decision) -> Self {
        match decision {
            Decision::Allow => Transition::Continue,
            Decision::RedirectTo(name) => Transition::Redirect(name),
        }
    }
}

/// NavigationGuard
///
/// Pre-navigation hook bound to an authentication capability. The store is
/// borrowed, never owned or mutated, so a stub boolean is enough to exercise it.
pub struct NavigationGuard<'a, A: AuthStore + ?Sized> {
    auth: &'a A,
}

impl<'a, A: AuthStore + ?Sized> NavigationGuard<'a, A> {
    pub fn new(auth: &'a A) -> Self {
        Self { auth }
    }

    /// Decides against a snapshot of the authentication state taken now.
    pub fn decide(&self, to: &RouteEntry) -> Decision {
        decide(to, self.auth.is_authenticated())
    }

    /// before_each
    ///
    /// Runs the guard for `request` and invokes `proceed` exactly once with the
    /// outcome. Returns whatever the continuation returns.
    pub fn before_each<R>(&self, request: NavigationRequest<'_>, proceed: impl FnOnce(Transition) -> R) -> R {
        let is_authenticated = self.auth.is_authenticated();
        let decision = decide(request.to, is_authenticated);

        match decision {
            Decision::Allow => tracing::debug!(
                to = %request.to.name,
                from = ?request.from.map(|from| from.name),
                is_authenticated,
                "navigation allowed"
            ),
            Decision::RedirectTo(target) => tracing::info!(
                to = %request.to.name,
                from = ?request.from.map(|from| from.name),
                is_authenticated,
                %target,
                "navigation redirected"
            ),
        }

        proceed(decision.into())
    }
}
