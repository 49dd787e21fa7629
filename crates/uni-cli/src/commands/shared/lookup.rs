//! Entity lookups that turn a missing row into `CoreError::NotFound`.

use uni_core::entities::{Project, Scheme};
use uni_core::errors::CoreError;
use uni_db::error::DatabaseError;
use uni_db::service::UniService;

pub async fn require_scheme(service: &UniService, id: &str) -> anyhow::Result<Scheme> {
    service
        .get_scheme(id)
        .await
        .map_err(|error| not_found_or(error, "scheme", id))
}

pub async fn require_project(service: &UniService, key_or_id: &str) -> anyhow::Result<Project> {
    service
        .get_project(key_or_id)
        .await
        .map_err(|error| not_found_or(error, "project", key_or_id))
}

fn not_found_or(error: DatabaseError, entity_type: &str, id: &str) -> anyhow::Error {
    match error {
        DatabaseError::NoResult => CoreError::NotFound {
            entity_type: entity_type.to_string(),
            id: id.to_string(),
        }
        .into(),
        other => anyhow::Error::new(other).context(format!("failed to load {entity_type} '{id}'")),
    }
}

#[cfg(test)]
mod tests {
    use uni_core::errors::CoreError;
    use uni_db::service::UniService;

    use super::{require_project, require_scheme};

    #[tokio::test]
    async fn missing_rows_are_not_found() {
        let service = UniService::new_local(":memory:").await.expect("db opens");

        let err = require_scheme(&service, "sch-00000000").await.expect_err("no scheme");
        assert!(matches!(
            err.downcast_ref::<CoreError>(),
            Some(CoreError::NotFound { entity_type, .. }) if entity_type == "scheme"
        ));

        let err = require_project(&service, "HSP").await.expect_err("no project");
        assert_eq!(err.to_string(), "Entity not found: project HSP");
    }

    #[tokio::test]
    async fn project_found_by_key() {
        let service = UniService::new_local(":memory:").await.expect("db opens");
        let created = service.create_project("HSP", "homosapien").await.expect("creates");

        let found = require_project(&service, "HSP").await.expect("found");
        assert_eq!(found, created);
    }
}
