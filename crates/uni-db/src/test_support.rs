//! Shared test utilities for uni-db unit tests.

pub(crate) mod helpers {
    use uni_core::entities::{Project, Rule, Scheme};
    use uni_core::enums::SchemeCategory;

    use crate::UniDb;
    use crate::service::UniService;

    /// Create an in-memory `UniService`.
    pub async fn test_service() -> UniService {
        let db = UniDb::open_local(":memory:").await.unwrap();
        UniService::from_db(db)
    }

    /// Create a permission scheme holding `rules`.
    pub async fn permission_scheme(svc: &UniService, name: &str, rules: &[Rule]) -> Scheme {
        svc.create_scheme(SchemeCategory::Permission, name, None, rules)
            .await
            .unwrap()
    }

    /// Create a project and attach it to `scheme`.
    pub async fn project_on(svc: &UniService, key: &str, scheme: &Scheme) -> Project {
        let project = svc.create_project(key, &format!("Project {key}")).await.unwrap();
        svc.assign_scheme(&project, scheme).await.unwrap();
        project
    }

    pub fn browse(group: &str) -> Rule {
        Rule::new("BROWSE_PROJECTS", "group", Some(group))
    }
}
