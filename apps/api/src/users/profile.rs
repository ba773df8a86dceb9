use serde::{Deserialize, Serialize};

use crate::models::user::UserRow;
use crate::scoring::competency::{ActivityEntry, ActivityType};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Student,
    Recruiter,
    CollegeAdmin,
}

impl UserRole {
    pub fn as_str(self) -> &'static str {
        match self {
            UserRole::Student => "student",
            UserRole::Recruiter => "recruiter",
            UserRole::CollegeAdmin => "college_admin",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "student" => Some(UserRole::Student),
            "recruiter" => Some(UserRole::Recruiter),
            "college_admin" => Some(UserRole::CollegeAdmin),
            _ => None,
        }
    }

    /// Landing page for the role after sign-in.
    pub fn dashboard_route(self) -> &'static str {
        match self {
            UserRole::Student => "/student/dashboard",
            UserRole::Recruiter => "/dashboard/recruiter",
            UserRole::CollegeAdmin => "/dashboard/admin",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthProvider {
    Password,
    Google,
}

impl AuthProvider {
    pub fn as_str(self) -> &'static str {
        match self {
            AuthProvider::Password => "password",
            AuthProvider::Google => "google",
        }
    }
}

/// Unknown stored roles fall back to the site root.
pub fn dashboard_route(role: &str) -> &'static str {
    UserRole::parse(role).map_or("/", UserRole::dashboard_route)
}

/// Onboarding progress in quarters: signed up, resume processed, first quiz,
/// first interview.
pub fn profile_progress(user: &UserRow, history: &[ActivityEntry]) -> u8 {
    let resume_done = user.resume_url.is_some() || user.full_name.is_some();
    let quiz_done = history.iter().any(|h| h.activity_type == ActivityType::Quiz);
    let interview_done = history
        .iter()
        .any(|h| h.activity_type == ActivityType::Interview);

    [resume_done, quiz_done, interview_done]
        .into_iter()
        .fold(25, |acc, done| if done { acc + 25 } else { acc })
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn user() -> UserRow {
        UserRow {
            uid: "u1".to_string(),
            name: Some("Asha".to_string()),
            email: Some("asha@example.com".to_string()),
            role: "student".to_string(),
            provider: Some("password".to_string()),
            full_name: None,
            phone: None,
            location: None,
            professional_summary: None,
            resume_url: None,
            skills: vec![],
            competency_score: None,
            scores: None,
            created_at: Utc::now(),
            last_login_at: None,
            updated_at: Utc::now(),
        }
    }

    fn entry(kind: ActivityType) -> ActivityEntry {
        ActivityEntry {
            activity_type: kind,
            score: 50,
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn test_dashboard_routes() {
        assert_eq!(dashboard_route("student"), "/student/dashboard");
        assert_eq!(dashboard_route("recruiter"), "/dashboard/recruiter");
        assert_eq!(dashboard_route("college_admin"), "/dashboard/admin");
        assert_eq!(dashboard_route("janitor"), "/");
    }

    #[test]
    fn test_progress_new_user_is_25() {
        assert_eq!(profile_progress(&user(), &[]), 25);
    }

    #[test]
    fn test_progress_counts_each_milestone_once() {
        let mut u = user();
        u.full_name = Some("Asha Rao".to_string());
        let history = vec![
            entry(ActivityType::Quiz),
            entry(ActivityType::Quiz),
            entry(ActivityType::Interview),
        ];
        assert_eq!(profile_progress(&u, &history), 100);
        assert_eq!(profile_progress(&u, &history[..1]), 75);
    }

    #[test]
    fn test_role_serde_is_snake_case() {
        let role: UserRole = serde_json::from_str("\"college_admin\"").unwrap();
        assert_eq!(role, UserRole::CollegeAdmin);
        assert_eq!(role.as_str(), "college_admin");
    }
}
