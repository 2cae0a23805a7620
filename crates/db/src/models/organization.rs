//! Organization (tenant) model.

use sqlx::FromRow;
use tea_core::types::{EntityId, Timestamp};

/// An organization row from the `organizations` table.
///
/// Every top-level entity carries an `organization_id`; the API token
/// resolves the caller to one of these rows.
#[derive(Debug, Clone, FromRow)]
pub struct Organization {
    pub uuid: EntityId,
    pub name: String,
    pub api_token: String,
    pub created_at: Timestamp,
}
