//! Saved plan and point ledger service
//!
//! Plans are persisted alongside the simulation outcome that produced them;
//! the outcome is always recomputed server-side from the submitted schedule
//! rather than trusted from the client. Points accumulate in an append-only
//! ledger.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::services::farm::FarmService;
use crate::services::simulation::{RunSimulationInput, SimulationService};
use shared::{Action, Pagination, PaginatedResponse, PaginationMeta, SavedPlan, SimulationResult};

/// Plan service for saved simulations and the accumulated point total
#[derive(Clone)]
pub struct PlanService {
    db: PgPool,
}

/// Database row for a saved plan
#[derive(Debug, sqlx::FromRow)]
struct PlanRow {
    id: Uuid,
    farm_id: Uuid,
    farm_name: String,
    from_date: NaiveDate,
    to_date: NaiveDate,
    actions: serde_json::Value,
    result: serde_json::Value,
    final_yield: i32,
    points: i32,
    created_at: DateTime<Utc>,
}

impl TryFrom<PlanRow> for SavedPlan {
    type Error = AppError;

    fn try_from(row: PlanRow) -> Result<Self, Self::Error> {
        let actions: Vec<Action> = serde_json::from_value(row.actions)
            .map_err(|e| AppError::Internal(format!("Corrupt plan actions: {}", e)))?;
        let result: SimulationResult = serde_json::from_value(row.result)
            .map_err(|e| AppError::Internal(format!("Corrupt plan result: {}", e)))?;

        Ok(SavedPlan {
            id: row.id,
            farm_id: row.farm_id,
            farm_name: row.farm_name,
            from_date: row.from_date,
            to_date: row.to_date,
            actions,
            result,
            final_yield: row.final_yield,
            points: row.points.max(0) as u32,
            created_at: row.created_at,
        })
    }
}

/// Input for saving a plan
#[derive(Debug, Deserialize)]
pub struct SavePlanInput {
    pub farm_id: Uuid,
    pub from_date: NaiveDate,
    pub to_date: NaiveDate,
    #[serde(default)]
    pub actions: Vec<Action>,
}

/// Accumulated point total
#[derive(Debug, Serialize)]
pub struct PointTotal {
    pub total: i64,
}

impl PlanService {
    /// Create a new PlanService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Re-run the submitted schedule, persist the plan with its outcome, and
    /// credit the run's points to the ledger
    pub async fn save_plan(&self, input: SavePlanInput) -> AppResult<SavedPlan> {
        let farm = FarmService::new(self.db.clone()).get_farm(input.farm_id).await?;

        let simulation = SimulationService::new(self.db.clone());
        let result = simulation
            .run(&RunSimulationInput {
                farm_id: input.farm_id,
                from_date: input.from_date,
                to_date: input.to_date,
                actions: input.actions.clone(),
            })
            .await?;

        let final_yield = result
            .timeline
            .last()
            .map(|d| d.yield_projection)
            .unwrap_or(0);

        let actions_json = serde_json::to_value(&input.actions)
            .map_err(|e| AppError::Internal(e.to_string()))?;
        let result_json =
            serde_json::to_value(&result).map_err(|e| AppError::Internal(e.to_string()))?;

        let row = sqlx::query_as::<_, PlanRow>(
            r#"
            INSERT INTO saved_plans (
                farm_id, farm_name, from_date, to_date, actions, result,
                final_yield, points
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, farm_id, farm_name, from_date, to_date, actions, result,
                      final_yield, points, created_at
            "#,
        )
        .bind(input.farm_id)
        .bind(&farm.name)
        .bind(input.from_date)
        .bind(input.to_date)
        .bind(&actions_json)
        .bind(&result_json)
        .bind(final_yield)
        .bind(result.points as i32)
        .fetch_one(&self.db)
        .await?;

        self.add_points(i64::from(result.points), "plan_saved")
            .await?;

        row.try_into()
    }

    /// Get a saved plan by ID
    pub async fn get_plan(&self, plan_id: Uuid) -> AppResult<SavedPlan> {
        let row = sqlx::query_as::<_, PlanRow>(
            r#"
            SELECT id, farm_id, farm_name, from_date, to_date, actions, result,
                   final_yield, points, created_at
            FROM saved_plans
            WHERE id = $1
            "#,
        )
        .bind(plan_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Saved plan".to_string()))?;

        row.try_into()
    }

    /// List saved plans, newest first
    pub async fn list_plans(
        &self,
        pagination: Pagination,
    ) -> AppResult<PaginatedResponse<SavedPlan>> {
        let page = pagination.page.max(1);
        let per_page = pagination.per_page.clamp(1, 100);
        let offset = (page - 1) as i64 * per_page as i64;

        let total_items =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM saved_plans")
                .fetch_one(&self.db)
                .await?;

        let rows = sqlx::query_as::<_, PlanRow>(
            r#"
            SELECT id, farm_id, farm_name, from_date, to_date, actions, result,
                   final_yield, points, created_at
            FROM saved_plans
            ORDER BY created_at DESC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(per_page as i64)
        .bind(offset)
        .fetch_all(&self.db)
        .await?;

        let data: Result<Vec<SavedPlan>, AppError> =
            rows.into_iter().map(|r| r.try_into()).collect();

        let total_pages = ((total_items as u64).div_ceil(per_page as u64)) as u32;

        Ok(PaginatedResponse {
            data: data?,
            pagination: PaginationMeta {
                page,
                per_page,
                total_items: total_items as u64,
                total_pages,
            },
        })
    }

    /// Export a saved plan's daily timeline as CSV
    pub async fn export_timeline_csv(&self, plan_id: Uuid) -> AppResult<String> {
        let plan = self.get_plan(plan_id).await?;
        Self::to_csv(&plan.result.timeline)
    }

    /// Serialize records as CSV
    fn to_csv<T: Serialize>(data: &[T]) -> AppResult<String> {
        let mut wtr = csv::Writer::from_writer(vec![]);
        for record in data {
            wtr.serialize(record)
                .map_err(|e| AppError::Internal(format!("CSV serialization error: {}", e)))?;
        }
        let csv_data = String::from_utf8(
            wtr.into_inner()
                .map_err(|e| AppError::Internal(format!("CSV writer error: {}", e)))?,
        )
        .map_err(|e| AppError::Internal(format!("UTF-8 conversion error: {}", e)))?;
        Ok(csv_data)
    }

    // ========================================================================
    // Point Ledger
    // ========================================================================

    /// Current accumulated point total
    pub async fn total_points(&self) -> AppResult<i64> {
        let total =
            sqlx::query_scalar::<_, i64>("SELECT COALESCE(SUM(delta), 0) FROM point_entries")
                .fetch_one(&self.db)
                .await?;

        Ok(total)
    }

    /// Credit points to the ledger
    pub async fn add_points(&self, points: i64, reason: &str) -> AppResult<()> {
        sqlx::query("INSERT INTO point_entries (delta, reason) VALUES ($1, $2)")
            .bind(points)
            .bind(reason)
            .execute(&self.db)
            .await?;

        Ok(())
    }

    /// Debit points if the balance covers the amount; reports whether the
    /// deduction happened
    pub async fn deduct_points(&self, points: i64, reason: &str) -> AppResult<bool> {
        let mut tx = self.db.begin().await?;

        let total =
            sqlx::query_scalar::<_, i64>("SELECT COALESCE(SUM(delta), 0) FROM point_entries")
                .fetch_one(&mut *tx)
                .await?;

        if total < points {
            tx.rollback().await?;
            return Ok(false);
        }

        sqlx::query("INSERT INTO point_entries (delta, reason) VALUES ($1, $2)")
            .bind(-points)
            .bind(reason)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(true)
    }
}
