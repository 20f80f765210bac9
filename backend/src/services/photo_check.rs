//! Photo check service
//!
//! Wraps the external crop-vision analysis: stores each analysis with the
//! schedule conflicts detected against the farm's weather, and applies
//! suggested fixes by running an ordinary before/after pair of simulations.
//! The engine never learns the actions came from image analysis.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::external::crop_vision::{AnalyzePhotosRequest, CropVisionClient};
use crate::services::farm::FarmService;
use crate::services::plan::PlanService;
use crate::services::simulation::{RunSimulationInput, SimulationService};
use shared::{Action, ActionKind, PhotoAnalysis, PhotoCheck, WeatherRecord};

/// Points credited for accepting a suggested fix
const FIX_ACCEPTED_POINTS: i64 = 2;

/// Photo check service
#[derive(Clone)]
pub struct PhotoCheckService {
    db: PgPool,
    vision_client: Option<CropVisionClient>,
}

/// Database row for a photo check
#[derive(Debug, sqlx::FromRow)]
struct PhotoCheckRow {
    id: Uuid,
    farm_id: Uuid,
    analysis: serde_json::Value,
    conflicts: serde_json::Value,
    fix_applied: bool,
    before_yield: Option<i32>,
    after_yield: Option<i32>,
    created_at: DateTime<Utc>,
}

impl TryFrom<PhotoCheckRow> for PhotoCheck {
    type Error = AppError;

    fn try_from(row: PhotoCheckRow) -> Result<Self, Self::Error> {
        let analysis: PhotoAnalysis = serde_json::from_value(row.analysis)
            .map_err(|e| AppError::Internal(format!("Corrupt photo analysis: {}", e)))?;
        let conflicts: Vec<String> = serde_json::from_value(row.conflicts)
            .map_err(|e| AppError::Internal(format!("Corrupt conflict list: {}", e)))?;

        Ok(PhotoCheck {
            id: row.id,
            farm_id: row.farm_id,
            analysis,
            conflicts,
            fix_applied: row.fix_applied,
            before_yield: row.before_yield,
            after_yield: row.after_yield,
            created_at: row.created_at,
        })
    }
}

/// Input for applying a suggested fix
#[derive(Debug, Deserialize)]
pub struct ApplyFixInput {
    pub from_date: NaiveDate,
    pub to_date: NaiveDate,
}

/// Outcome of applying a suggested fix
#[derive(Debug, Serialize)]
pub struct ApplyFixOutcome {
    pub check: PhotoCheck,
    pub points_awarded: i64,
    /// Accepted fixes in the current calendar month, this one included
    pub fixes_this_month: i64,
}

impl PhotoCheckService {
    /// Create a new PhotoCheckService instance
    pub fn new(db: PgPool) -> Self {
        Self {
            db,
            vision_client: None,
        }
    }

    /// Create a new PhotoCheckService with a crop vision API client
    pub fn with_client(db: PgPool, client: CropVisionClient) -> Self {
        Self {
            db,
            vision_client: Some(client),
        }
    }

    /// Analyze crop photos and store the result with detected conflicts
    pub async fn analyze(&self, farm_id: Uuid, images: Vec<String>) -> AppResult<PhotoCheck> {
        let client = self
            .vision_client
            .as_ref()
            .ok_or_else(|| AppError::Internal("Crop vision client not configured".to_string()))?;

        let farms = FarmService::new(self.db.clone());
        // Confirm the farm before spending an API call
        farms.get_farm(farm_id).await?;

        let analysis = client.analyze_photos(AnalyzePhotosRequest { images }).await?;

        let weather = farms.weather_series(farm_id).await?;
        let conflicts = detect_conflicts(&analysis, &weather);

        let analysis_json =
            serde_json::to_value(&analysis).map_err(|e| AppError::Internal(e.to_string()))?;
        let conflicts_json =
            serde_json::to_value(&conflicts).map_err(|e| AppError::Internal(e.to_string()))?;

        let row = sqlx::query_as::<_, PhotoCheckRow>(
            r#"
            INSERT INTO photo_checks (farm_id, analysis, conflicts)
            VALUES ($1, $2, $3)
            RETURNING id, farm_id, analysis, conflicts, fix_applied,
                      before_yield, after_yield, created_at
            "#,
        )
        .bind(farm_id)
        .bind(&analysis_json)
        .bind(&conflicts_json)
        .fetch_one(&self.db)
        .await?;

        row.try_into()
    }

    /// Get a photo check by ID
    pub async fn get_check(&self, check_id: Uuid) -> AppResult<PhotoCheck> {
        let row = sqlx::query_as::<_, PhotoCheckRow>(
            r#"
            SELECT id, farm_id, analysis, conflicts, fix_applied,
                   before_yield, after_yield, created_at
            FROM photo_checks
            WHERE id = $1
            "#,
        )
        .bind(check_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Photo check".to_string()))?;

        row.try_into()
    }

    /// List photo checks for a farm, newest first
    pub async fn list_checks(&self, farm_id: Uuid) -> AppResult<Vec<PhotoCheck>> {
        let rows = sqlx::query_as::<_, PhotoCheckRow>(
            r#"
            SELECT id, farm_id, analysis, conflicts, fix_applied,
                   before_yield, after_yield, created_at
            FROM photo_checks
            WHERE farm_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(farm_id)
        .fetch_all(&self.db)
        .await?;

        rows.into_iter().map(|r| r.try_into()).collect()
    }

    /// Apply the analysis's suggested actions: run the engine with and
    /// without them over the given range, store the before/after yields, and
    /// credit the fix bonus
    pub async fn apply_fix(&self, check_id: Uuid, input: ApplyFixInput) -> AppResult<ApplyFixOutcome> {
        let check = self.get_check(check_id).await?;

        if check.fix_applied {
            return Err(AppError::ValidationError(
                "Fix has already been applied for this photo check".to_string(),
            ));
        }

        let suggestions = check
            .analysis
            .suggested_actions
            .as_ref()
            .filter(|actions| !actions.is_empty())
            .ok_or_else(|| {
                AppError::ValidationError("Analysis has no suggested actions".to_string())
            })?;

        let fix_actions: Vec<Action> = suggestions.iter().map(|s| s.to_action()).collect();

        let simulation = SimulationService::new(self.db.clone());
        let before = simulation
            .run(&RunSimulationInput {
                farm_id: check.farm_id,
                from_date: input.from_date,
                to_date: input.to_date,
                actions: Vec::new(),
            })
            .await?;
        let after = simulation
            .run(&RunSimulationInput {
                farm_id: check.farm_id,
                from_date: input.from_date,
                to_date: input.to_date,
                actions: fix_actions,
            })
            .await?;

        let before_yield = before
            .timeline
            .last()
            .map(|d| d.yield_projection)
            .unwrap_or(0);
        let after_yield = after
            .timeline
            .last()
            .map(|d| d.yield_projection)
            .unwrap_or(0);

        let row = sqlx::query_as::<_, PhotoCheckRow>(
            r#"
            UPDATE photo_checks
            SET fix_applied = TRUE, before_yield = $1, after_yield = $2
            WHERE id = $3
            RETURNING id, farm_id, analysis, conflicts, fix_applied,
                      before_yield, after_yield, created_at
            "#,
        )
        .bind(before_yield)
        .bind(after_yield)
        .bind(check_id)
        .fetch_one(&self.db)
        .await?;

        PlanService::new(self.db.clone())
            .add_points(FIX_ACCEPTED_POINTS, "photo_fix_applied")
            .await?;

        let fixes_this_month = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)
            FROM photo_checks
            WHERE fix_applied = TRUE
              AND date_trunc('month', created_at) = date_trunc('month', NOW())
            "#,
        )
        .fetch_one(&self.db)
        .await?;

        Ok(ApplyFixOutcome {
            check: row.try_into()?,
            points_awarded: FIX_ACCEPTED_POINTS,
            fixes_this_month,
        })
    }
}

/// Flag suggested irrigations that collide with forecast rain days
fn detect_conflicts(analysis: &PhotoAnalysis, weather: &[WeatherRecord]) -> Vec<String> {
    let mut conflicts = Vec::new();

    if let Some(suggestions) = &analysis.suggested_actions {
        for suggestion in suggestions.iter().filter(|s| s.kind == ActionKind::Irrigate) {
            let rain_day = weather
                .iter()
                .find(|w| w.date == suggestion.date && w.precipitation_mm >= Decimal::from(8));
            if let Some(weather) = rain_day {
                conflicts.push(format!(
                    "Suggested irrigation on {} conflicts with expected rain ({}mm)",
                    suggestion.date, weather.precipitation_mm
                ));
            }
        }
    }

    conflicts
}
