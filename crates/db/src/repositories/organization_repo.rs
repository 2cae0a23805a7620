//! Repository for the `organizations` table.

use sqlx::PgPool;

use crate::models::organization::Organization;

/// Column list shared across queries.
const COLUMNS: &str = "uuid, name, api_token, created_at";

/// Lookup operations for organizations (tenants).
pub struct OrganizationRepo;

impl OrganizationRepo {
    /// Insert a new organization with the given API token.
    pub async fn create(
        pool: &PgPool,
        name: &str,
        api_token: &str,
    ) -> Result<Organization, sqlx::Error> {
        let query = format!(
            "INSERT INTO organizations (name, api_token)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Organization>(&query)
            .bind(name)
            .bind(api_token)
            .fetch_one(pool)
            .await
    }

    /// Resolve an API token to its organization.
    pub async fn find_by_token(
        pool: &PgPool,
        api_token: &str,
    ) -> Result<Option<Organization>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM organizations WHERE api_token = $1");
        sqlx::query_as::<_, Organization>(&query)
            .bind(api_token)
            .fetch_optional(pool)
            .await
    }
}
