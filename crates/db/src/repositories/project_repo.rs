//! Repository for the `projects` table.

use folio_core::project::{ProjectDraft, ProjectFilter};
use folio_core::types::DbId;
use sqlx::PgPool;

use crate::models::project::{Project, ProjectStats};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, description, short_description, image, technologies, \
                       github_url, live_url, category, featured, status, created_at, updated_at";

/// Provides CRUD operations for projects. Deletes are hard deletes.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Insert a new project, returning the created row.
    pub async fn create(pool: &PgPool, input: &ProjectDraft) -> Result<Project, sqlx::Error> {
        let query = format!(
            "INSERT INTO projects (title, description, short_description, image, technologies,
                                   github_url, live_url, category, featured, status)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.short_description)
            .bind(&input.image)
            .bind(&input.technologies)
            .bind(&input.github_url)
            .bind(&input.live_url)
            .bind(input.category.as_str())
            .bind(input.featured)
            .bind(input.status.as_str())
            .fetch_one(pool)
            .await
    }

    /// Find a project by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1");
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List projects matching `filter`, newest created first.
    pub async fn list(pool: &PgPool, filter: &ProjectFilter) -> Result<Vec<Project>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM projects
             WHERE ($1::TEXT IS NULL OR category = $1)
               AND ($2::BOOLEAN IS NULL OR featured = $2)
               AND ($3::TEXT IS NULL OR status = $3)
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(filter.category.map(|c| c.as_str()))
            .bind(filter.featured)
            .bind(filter.status.map(|s| s.as_str()))
            .fetch_all(pool)
            .await
    }

    /// Featured projects that are also active, newest first, capped at `limit`.
    pub async fn list_featured(pool: &PgPool, limit: i64) -> Result<Vec<Project>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM projects
             WHERE featured = TRUE AND status = 'active'
             ORDER BY created_at DESC, id DESC
             LIMIT $1"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Overwrite every mutable column of a project.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &ProjectDraft,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "UPDATE projects SET
                title = $2,
                description = $3,
                short_description = $4,
                image = $5,
                technologies = $6,
                github_url = $7,
                live_url = $8,
                category = $9,
                featured = $10,
                status = $11
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.short_description)
            .bind(&input.image)
            .bind(&input.technologies)
            .bind(&input.github_url)
            .bind(&input.live_url)
            .bind(input.category.as_str())
            .bind(input.featured)
            .bind(input.status.as_str())
            .fetch_optional(pool)
            .await
    }

    /// Permanently delete a project by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Dashboard counts over the whole table.
    pub async fn stats(pool: &PgPool) -> Result<ProjectStats, sqlx::Error> {
        let query = "\
            SELECT \
                COUNT(*) AS total_projects, \
                COUNT(*) FILTER (WHERE status = 'active') AS active_projects, \
                COUNT(*) FILTER (WHERE featured = TRUE) AS featured_projects \
            FROM projects";
        sqlx::query_as::<_, ProjectStats>(query)
            .fetch_one(pool)
            .await
    }
}
