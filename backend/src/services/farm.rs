//! Farm service for parcels and their source record sets

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use shared::{Farm, GpsCoordinates, NdviRecord, WeatherRecord};

/// Farm service for managing parcels, weather, and NDVI source data
#[derive(Clone)]
pub struct FarmService {
    db: PgPool,
}

/// Database row for a farm
#[derive(Debug, sqlx::FromRow)]
struct FarmRow {
    id: Uuid,
    name: String,
    centroid_lat: Option<Decimal>,
    centroid_lon: Option<Decimal>,
    boundary: Option<serde_json::Value>,
}

impl From<FarmRow> for Farm {
    fn from(row: FarmRow) -> Self {
        let centroid = match (row.centroid_lat, row.centroid_lon) {
            (Some(lat), Some(lon)) => Some(GpsCoordinates::new(lat, lon)),
            _ => None,
        };

        Farm {
            id: row.id,
            name: row.name,
            centroid,
            boundary: row.boundary,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct NdviRow {
    date: NaiveDate,
    ndvi: Decimal,
}

#[derive(Debug, sqlx::FromRow)]
struct WeatherRow {
    date: NaiveDate,
    min_temp_celsius: Decimal,
    max_temp_celsius: Decimal,
    precipitation_mm: Decimal,
}

impl FarmService {
    /// Create a new FarmService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// List all farms
    pub async fn list_farms(&self) -> AppResult<Vec<Farm>> {
        let rows = sqlx::query_as::<_, FarmRow>(
            r#"
            SELECT id, name, centroid_lat, centroid_lon, boundary
            FROM farms
            ORDER BY name
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }

    /// Get a farm by ID
    pub async fn get_farm(&self, farm_id: Uuid) -> AppResult<Farm> {
        let row = sqlx::query_as::<_, FarmRow>(
            "SELECT id, name, centroid_lat, centroid_lon, boundary FROM farms WHERE id = $1",
        )
        .bind(farm_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Farm".to_string()))?;

        Ok(row.into())
    }

    /// Get the farm's NDVI observation series, ordered by date
    pub async fn ndvi_series(&self, farm_id: Uuid) -> AppResult<Vec<NdviRecord>> {
        self.validate_farm_exists(farm_id).await?;

        let rows = sqlx::query_as::<_, NdviRow>(
            r#"
            SELECT date, ndvi
            FROM ndvi_records
            WHERE farm_id = $1
            ORDER BY date
            "#,
        )
        .bind(farm_id)
        .fetch_all(&self.db)
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| NdviRecord {
                date: r.date,
                ndvi: r.ndvi,
            })
            .collect())
    }

    /// Get the farm's daily weather series, ordered by date
    pub async fn weather_series(&self, farm_id: Uuid) -> AppResult<Vec<WeatherRecord>> {
        self.validate_farm_exists(farm_id).await?;

        let rows = sqlx::query_as::<_, WeatherRow>(
            r#"
            SELECT date, min_temp_celsius, max_temp_celsius, precipitation_mm
            FROM weather_records
            WHERE farm_id = $1
            ORDER BY date
            "#,
        )
        .bind(farm_id)
        .fetch_all(&self.db)
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| WeatherRecord {
                date: r.date,
                min_temp_celsius: r.min_temp_celsius,
                max_temp_celsius: r.max_temp_celsius,
                precipitation_mm: r.precipitation_mm,
            })
            .collect())
    }

    /// Validate a farm exists
    async fn validate_farm_exists(&self, farm_id: Uuid) -> AppResult<()> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM farms WHERE id = $1)")
                .bind(farm_id)
                .fetch_one(&self.db)
                .await?;

        if !exists {
            return Err(AppError::NotFound("Farm".to_string()));
        }

        Ok(())
    }
}
