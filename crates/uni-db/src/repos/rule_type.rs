//! Rule type catalog repository.

use uni_core::defaults::default_rule_types;
use uni_core::entities::RuleType;
use uni_core::enums::{AuditAction, EntityType, SchemeCategory};

use crate::error::DatabaseError;
use crate::helpers::parse_enum;
use crate::service::UniService;

impl UniService {
    /// Rule types of `category` in display order.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn list_rule_types(
        &self,
        category: SchemeCategory,
    ) -> Result<Vec<RuleType>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT id, label, category FROM rule_types
                 WHERE category = ?1 ORDER BY position, id",
                [category.as_str()],
            )
            .await?;
        let mut types = Vec::new();
        while let Some(row) = rows.next().await? {
            types.push(RuleType {
                id: row.get::<String>(0)?,
                label: row.get::<String>(1)?,
                category: parse_enum(&row.get::<String>(2)?)?,
            });
        }
        Ok(types)
    }

    /// Append a rule type after the existing ones of its category.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the id is already defined for the category.
    pub async fn add_rule_type(
        &self,
        category: SchemeCategory,
        id: &str,
        label: &str,
    ) -> Result<RuleType, DatabaseError> {
        self.db()
            .conn()
            .execute(
                "INSERT INTO rule_types (category, id, label, position)
                 VALUES (?1, ?2, ?3,
                    (SELECT COALESCE(MAX(position) + 1, 0) FROM rule_types WHERE category = ?1))",
                libsql::params![category.as_str(), id, label],
            )
            .await?;
        self.record_audit(
            EntityType::RuleType,
            &format!("{category}:{id}"),
            AuditAction::Created,
            Some(serde_json::json!({ "label": label })),
        )
        .await?;
        Ok(RuleType::new(category, id, label))
    }

    /// Insert the built-in rule types of every category, skipping ids
    /// already present. Returns how many were inserted.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if an insert fails.
    pub async fn seed_default_rule_types(&self) -> Result<u32, DatabaseError> {
        let mut inserted = 0;
        for category in SchemeCategory::ALL {
            for (position, rule_type) in default_rule_types(*category).iter().enumerate() {
                let position = i64::try_from(position)
                    .map_err(|e| DatabaseError::InvalidState(e.to_string()))?;
                let changed = self
                    .db()
                    .conn()
                    .execute(
                        "INSERT OR IGNORE INTO rule_types (category, id, label, position)
                         VALUES (?1, ?2, ?3, ?4)",
                        libsql::params![
                            category.as_str(),
                            rule_type.id.as_str(),
                            rule_type.label.as_str(),
                            position
                        ],
                    )
                    .await?;
                if changed > 0 {
                    inserted += 1;
                }
            }
        }
        Ok(inserted)
    }
}
