//! Organization (multi-tenant) scoping checks.
//!
//! Entities are fetched by primary key and then checked against the caller's
//! organization, so a cross-tenant read reports `Forbidden` rather than
//! `NotFound`.

use tea_core::error::CoreError;
use tea_core::types::EntityId;

/// Reject access when an entity belongs to a different organization.
pub fn authorize_org(
    entity: &'static str,
    entity_org: EntityId,
    caller_org: EntityId,
) -> Result<(), CoreError> {
    if entity_org != caller_org {
        return Err(CoreError::Forbidden(format!(
            "{entity} belongs to a different organization"
        )));
    }
    Ok(())
}
