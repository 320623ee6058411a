//! Route repository implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};

use moments_core::result::AppResult;
use moments_core::types::{RouteId, UserId};
use moments_entity::route::{Photo, Route, UpdateRoute, Waypoint};
use moments_entity::share::{Collaborator, ShareGrant};

use super::store_error;
use crate::store::{AddOutcome, FieldOp, RouteFieldUpdate, RouteStore};

const ROUTE_COLUMNS: &str = "id, name, creator_id, origin, destination, intermediate_waypoints, \
     photos, created_at, updated_at, is_public, shared_with, share_token, share_token_expiry";

/// Row shape of the `routes` table.
#[derive(Debug, FromRow)]
struct RouteRow {
    id: String,
    name: String,
    creator_id: String,
    origin: Json<Waypoint>,
    destination: Json<Waypoint>,
    intermediate_waypoints: Option<Json<Vec<Waypoint>>>,
    photos: Option<Json<Vec<Photo>>>,
    created_at: i64,
    updated_at: i64,
    is_public: bool,
    shared_with: Option<Json<Vec<Collaborator>>>,
    share_token: Option<String>,
    share_token_expiry: Option<DateTime<Utc>>,
}

impl From<RouteRow> for Route {
    fn from(row: RouteRow) -> Self {
        Self {
            id: RouteId::new(row.id),
            name: row.name,
            creator_id: UserId::new(row.creator_id),
            origin: row.origin.0,
            destination: row.destination.0,
            intermediate_waypoints: row.intermediate_waypoints.map(|j| j.0).unwrap_or_default(),
            photos: row.photos.map(|j| j.0).unwrap_or_default(),
            created_at: row.created_at,
            updated_at: row.updated_at,
            is_public: row.is_public,
            shared_with: row.shared_with.map(|j| j.0).unwrap_or_default(),
            share_token: row.share_token,
            share_token_expiry: row.share_token_expiry,
        }
    }
}

/// JSONB containment probe matching a collaborator entry by user ID.
fn collaborator_probe(user: &UserId) -> serde_json::Value {
    serde_json::json!([{ "userId": user.as_str() }])
}

/// Repository for route documents and share grants.
#[derive(Debug, Clone)]
pub struct PgRouteRepository {
    pool: PgPool,
}

impl PgRouteRepository {
    /// Create a new route repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch_many(&self, sql: &str, bind: Option<String>) -> AppResult<Vec<Route>> {
        let mut query = sqlx::query_as::<_, RouteRow>(sql);
        if let Some(value) = bind {
            query = query.bind(value);
        }
        let rows = query
            .fetch_all(&self.pool)
            .await
            .map_err(store_error("Failed to list routes"))?;
        Ok(rows.into_iter().map(Route::from).collect())
    }
}

#[async_trait]
impl RouteStore for PgRouteRepository {
    async fn create_route(&self, route: &Route) -> AppResult<()> {
        sqlx::query(
            "INSERT INTO routes (id, name, creator_id, origin, destination, intermediate_waypoints, \
             photos, created_at, updated_at, is_public, shared_with, share_token, share_token_expiry) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)",
        )
        .bind(route.id.as_str())
        .bind(&route.name)
        .bind(route.creator_id.as_str())
        .bind(Json(&route.origin))
        .bind(Json(&route.destination))
        .bind(Json(&route.intermediate_waypoints))
        .bind(Json(&route.photos))
        .bind(route.created_at)
        .bind(route.updated_at)
        .bind(route.is_public)
        .bind(Json(&route.shared_with))
        .bind(&route.share_token)
        .bind(route.share_token_expiry)
        .execute(&self.pool)
        .await
        .map_err(store_error("Failed to create route"))?;
        Ok(())
    }

    async fn get_route(&self, id: &RouteId) -> AppResult<Option<Route>> {
        let sql = format!("SELECT {ROUTE_COLUMNS} FROM routes WHERE id = $1");
        let row = sqlx::query_as::<_, RouteRow>(&sql)
            .bind(id.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(store_error("Failed to find route"))?;
        Ok(row.map(Route::from))
    }

    async fn list_routes(&self) -> AppResult<Vec<Route>> {
        let sql = format!("SELECT {ROUTE_COLUMNS} FROM routes ORDER BY created_at DESC");
        self.fetch_many(&sql, None).await
    }

    async fn list_routes_by_creator(&self, creator: &UserId) -> AppResult<Vec<Route>> {
        let sql = format!(
            "SELECT {ROUTE_COLUMNS} FROM routes WHERE creator_id = $1 ORDER BY created_at DESC"
        );
        self.fetch_many(&sql, Some(creator.to_string())).await
    }

    async fn update_route_content(
        &self,
        id: &RouteId,
        content: &UpdateRoute,
        updated_at: i64,
    ) -> AppResult<Option<Route>> {
        let sql = format!(
            "UPDATE routes SET name = $2, origin = $3, destination = $4, \
             intermediate_waypoints = $5, photos = $6, updated_at = $7 \
             WHERE id = $1 RETURNING {ROUTE_COLUMNS}"
        );
        let row = sqlx::query_as::<_, RouteRow>(&sql)
            .bind(id.as_str())
            .bind(&content.name)
            .bind(Json(&content.origin))
            .bind(Json(&content.destination))
            .bind(Json(&content.intermediate_waypoints))
            .bind(Json(&content.photos))
            .bind(updated_at)
            .fetch_optional(&self.pool)
            .await
            .map_err(store_error("Failed to update route"))?;
        Ok(row.map(Route::from))
    }

    async fn append_photos(
        &self,
        id: &RouteId,
        photos: &[Photo],
        updated_at: i64,
    ) -> AppResult<Option<Route>> {
        let sql = format!(
            "UPDATE routes SET photos = COALESCE(photos, '[]'::jsonb) || $2, updated_at = $3 \
             WHERE id = $1 RETURNING {ROUTE_COLUMNS}"
        );
        let row = sqlx::query_as::<_, RouteRow>(&sql)
            .bind(id.as_str())
            .bind(Json(photos))
            .bind(updated_at)
            .fetch_optional(&self.pool)
            .await
            .map_err(store_error("Failed to append photos"))?;
        Ok(row.map(Route::from))
    }

    async fn delete_route(&self, id: &RouteId) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM routes WHERE id = $1")
            .bind(id.as_str())
            .execute(&self.pool)
            .await
            .map_err(store_error("Failed to delete route"))?;
        Ok(result.rows_affected() > 0)
    }

    async fn update_route_fields(
        &self,
        id: &RouteId,
        update: RouteFieldUpdate,
    ) -> AppResult<bool> {
        let mut qb = QueryBuilder::<Postgres>::new("UPDATE routes SET updated_at = ");
        qb.push_bind(update.updated_at);

        match update.share_token {
            FieldOp::Keep => {}
            FieldOp::Set(token) => {
                qb.push(", share_token = ").push_bind(token);
            }
            FieldOp::Unset => {
                qb.push(", share_token = NULL");
            }
        }
        match update.share_token_expiry {
            FieldOp::Keep => {}
            FieldOp::Set(expiry) => {
                qb.push(", share_token_expiry = ").push_bind(expiry);
            }
            FieldOp::Unset => {
                qb.push(", share_token_expiry = NULL");
            }
        }
        match update.shared_with {
            FieldOp::Keep => {}
            FieldOp::Set(collaborators) => {
                qb.push(", shared_with = ").push_bind(Json(collaborators));
            }
            FieldOp::Unset => {
                qb.push(", shared_with = '[]'::jsonb");
            }
        }

        qb.push(" WHERE id = ").push_bind(id.to_string());

        let result = qb
            .build()
            .execute(&self.pool)
            .await
            .map_err(store_error("Failed to update route sharing fields"))?;
        Ok(result.rows_affected() > 0)
    }

    async fn add_collaborator_if_absent(
        &self,
        id: &RouteId,
        token: &str,
        now: DateTime<Utc>,
        collaborator: &Collaborator,
        updated_at: i64,
    ) -> AppResult<AddOutcome> {
        // Concurrent updates of the same row serialize on the row lock and
        // re-check the WHERE clause, so at most one of them appends.
        let sql = format!(
            "UPDATE routes \
             SET shared_with = COALESCE(shared_with, '[]'::jsonb) || $4, updated_at = $5 \
             WHERE id = $1 AND share_token = $2 \
               AND (share_token_expiry IS NULL OR share_token_expiry > $3) \
               AND NOT (COALESCE(shared_with, '[]'::jsonb) @> $6) \
             RETURNING {ROUTE_COLUMNS}"
        );
        let added = sqlx::query_as::<_, RouteRow>(&sql)
            .bind(id.as_str())
            .bind(token)
            .bind(now)
            .bind(Json(vec![collaborator]))
            .bind(updated_at)
            .bind(Json(collaborator_probe(&collaborator.user_id)))
            .fetch_optional(&self.pool)
            .await
            .map_err(store_error("Failed to add collaborator"))?;

        if let Some(row) = added {
            return Ok(AddOutcome::Added(row.into()));
        }

        match self.find_route_by_share_token(token, now).await? {
            Some(route) if route.id == *id && route.has_collaborator(&collaborator.user_id) => {
                Ok(AddOutcome::AlreadyPresent(route))
            }
            _ => Ok(AddOutcome::TokenRejected),
        }
    }

    async fn find_route_by_share_token(
        &self,
        token: &str,
        now: DateTime<Utc>,
    ) -> AppResult<Option<Route>> {
        let sql = format!(
            "SELECT {ROUTE_COLUMNS} FROM routes WHERE share_token = $1 \
             AND (share_token_expiry IS NULL OR share_token_expiry > $2)"
        );
        let row = sqlx::query_as::<_, RouteRow>(&sql)
            .bind(token)
            .bind(now)
            .fetch_optional(&self.pool)
            .await
            .map_err(store_error("Failed to find route by share token"))?;
        Ok(row.map(Route::from))
    }

    async fn find_routes_containing_collaborator(&self, user: &UserId) -> AppResult<Vec<Route>> {
        let sql = format!(
            "SELECT {ROUTE_COLUMNS} FROM routes WHERE shared_with @> $1 ORDER BY updated_at DESC"
        );
        let rows = sqlx::query_as::<_, RouteRow>(&sql)
            .bind(Json(collaborator_probe(user)))
            .fetch_all(&self.pool)
            .await
            .map_err(store_error("Failed to list shared routes"))?;
        Ok(rows.into_iter().map(Route::from).collect())
    }

    async fn insert_share_grant(&self, grant: &ShareGrant) -> AppResult<()> {
        sqlx::query(
            "INSERT INTO route_shares (user_id, route_id, permission, shared_at) \
             VALUES ($1, $2, $3, $4)",
        )
        .bind(grant.user_id.as_str())
        .bind(grant.route_id.as_str())
        .bind(grant.permission.as_str())
        .bind(grant.shared_at)
        .execute(&self.pool)
        .await
        .map_err(store_error("Failed to insert share grant"))?;
        Ok(())
    }

    async fn delete_auxiliary_records(&self, id: &RouteId) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM route_shares WHERE route_id = $1")
            .bind(id.as_str())
            .execute(&self.pool)
            .await
            .map_err(store_error("Failed to delete share grants"))?;
        Ok(result.rows_affected())
    }

    async fn health_check(&self) -> AppResult<()> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map_err(store_error("Health check failed"))?;
        Ok(())
    }
}
