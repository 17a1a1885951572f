//! Mocked session and the role-based routing rules that sit on top of it.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Professor,
    Student,
    Admin,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub username: String,
    pub role: Role,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Session {
    pub user: Option<User>,
}

impl Session {
    pub fn login(user: User) -> Self {
        Self { user: Some(user) }
    }

    /// Stand-in for a token check against a backend.
    pub fn check_auth(role: Role) -> Self {
        Self::login(User { id: "mock-123".into(), username: "John.Doe".into(), role })
    }

    pub fn role(&self) -> Option<Role> {
        self.user.as_ref().map(|u| u.role)
    }
}

pub const FIRST_LEVEL_ID: &str = "lvl_a1";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Route {
    Login,
    StudentLevel(String),
    ProfessorEditor(String),
}

pub fn resolve_landing_route(role: Option<Role>) -> Route {
    match role {
        Some(Role::Student) => Route::StudentLevel(FIRST_LEVEL_ID.to_string()),
        Some(Role::Professor) | Some(Role::Admin) => Route::ProfessorEditor(FIRST_LEVEL_ID.to_string()),
        None => Route::Login,
    }
}

/// Lets the route through or redirects to where the session belongs.
pub fn guard(route: Route, session: &Session) -> Route {
    let role = session.role();
    let allowed = match (&route, role) {
        (Route::Login, _) => true,
        (_, None) => false,
        (Route::StudentLevel(_), Some(r)) => r == Role::Student,
        (Route::ProfessorEditor(_), Some(r)) => matches!(r, Role::Professor | Role::Admin),
    };
    if allowed { route } else { resolve_landing_route(role) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn landing_route_by_role() {
        assert_eq!(resolve_landing_route(Some(Role::Student)), Route::StudentLevel("lvl_a1".into()));
        assert_eq!(resolve_landing_route(Some(Role::Professor)), Route::ProfessorEditor("lvl_a1".into()));
        assert_eq!(resolve_landing_route(Some(Role::Admin)), Route::ProfessorEditor("lvl_a1".into()));
        assert_eq!(resolve_landing_route(None), Route::Login);
    }

    #[test]
    fn students_are_kept_out_of_the_editor() {
        let student = Session::check_auth(Role::Student);
        assert_eq!(guard(Route::ProfessorEditor("lvl_b2".into()), &student), Route::StudentLevel("lvl_a1".into()));
        assert_eq!(guard(Route::StudentLevel("lvl_b2".into()), &student), Route::StudentLevel("lvl_b2".into()));
    }

    #[test]
    fn anonymous_users_go_to_login() {
        let anon = Session::default();
        assert_eq!(guard(Route::StudentLevel("lvl_a1".into()), &anon), Route::Login);
        assert_eq!(guard(Route::Login, &anon), Route::Login);
    }

    #[test]
    fn professors_cannot_play_student_routes() {
        let prof = Session::check_auth(Role::Professor);
        assert_eq!(guard(Route::StudentLevel("lvl_a1".into()), &prof), Route::ProfessorEditor("lvl_a1".into()));
    }
}
