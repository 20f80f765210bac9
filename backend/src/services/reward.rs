//! Reward catalog and redemption service
//!
//! A static catalog redeemable against the accumulated point total. Each
//! item can be redeemed once.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::services::plan::PlanService;

/// Reward service
#[derive(Clone)]
pub struct RewardService {
    db: PgPool,
}

/// A redeemable reward
#[derive(Debug, Clone, Serialize)]
pub struct RewardItem {
    pub id: &'static str,
    pub name: &'static str,
    pub name_th: &'static str,
    pub description: &'static str,
    pub description_th: &'static str,
    pub cost: i64,
}

/// A catalog entry together with its redemption state
#[derive(Debug, Serialize)]
pub struct RewardStatus {
    pub item: RewardItem,
    pub redeemed: bool,
}

/// A recorded redemption
#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct RewardRedemption {
    pub id: Uuid,
    pub reward_id: String,
    pub cost: i64,
    pub created_at: DateTime<Utc>,
}

/// The reward catalog
pub fn catalog() -> &'static [RewardItem] {
    &[
        RewardItem {
            id: "soil-test",
            name: "Soil Test Discount",
            name_th: "ส่วนลดตรวจวิเคราะห์ดิน",
            description: "Professional soil analysis to optimize nutrient management",
            description_th: "บริการวิเคราะห์ดินระดับมืออาชีพเพื่อการจัดการธาตุอาหาร",
            cost: 25,
        },
        RewardItem {
            id: "weather-station",
            name: "Weather Station Discount",
            name_th: "ส่วนลดสถานีตรวจอากาศ",
            description: "Advanced weather monitoring equipment for your farm",
            description_th: "อุปกรณ์ติดตามสภาพอากาศสำหรับฟาร์มของคุณ",
            cost: 100,
        },
        RewardItem {
            id: "training-precision",
            name: "Precision Agriculture Training",
            name_th: "คอร์สเกษตรแม่นยำ",
            description: "Online course on precision farming techniques",
            description_th: "คอร์สออนไลน์เทคนิคการทำเกษตรแม่นยำ",
            cost: 50,
        },
        RewardItem {
            id: "sensor-kit",
            name: "Soil Moisture Sensor Kit",
            name_th: "ชุดเซ็นเซอร์ความชื้นดิน",
            description: "Set of 3 wireless soil moisture sensors",
            description_th: "เซ็นเซอร์ความชื้นดินไร้สาย 3 ตัว",
            cost: 75,
        },
        RewardItem {
            id: "consultation",
            name: "Farm Consultation Session",
            name_th: "ปรึกษาผู้เชี่ยวชาญการเกษตร",
            description: "1-hour consultation with an agricultural expert",
            description_th: "ปรึกษาผู้เชี่ยวชาญด้านการเกษตร 1 ชั่วโมง",
            cost: 150,
        },
        RewardItem {
            id: "fertilizer-discount",
            name: "Organic Fertilizer Discount",
            name_th: "ส่วนลดปุ๋ยอินทรีย์",
            description: "Discount on premium organic fertilizer products",
            description_th: "ส่วนลดปุ๋ยอินทรีย์คุณภาพสูง",
            cost: 40,
        },
    ]
}

impl RewardService {
    /// Create a new RewardService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// List the catalog with redemption state
    pub async fn list_rewards(&self) -> AppResult<Vec<RewardStatus>> {
        let redeemed: Vec<String> =
            sqlx::query_scalar("SELECT reward_id FROM reward_redemptions")
                .fetch_all(&self.db)
                .await?;

        Ok(catalog()
            .iter()
            .map(|item| RewardStatus {
                redeemed: redeemed.iter().any(|r| r == item.id),
                item: item.clone(),
            })
            .collect())
    }

    /// Redeem a reward against the point total
    pub async fn redeem(&self, reward_id: &str) -> AppResult<RewardRedemption> {
        let item = catalog()
            .iter()
            .find(|item| item.id == reward_id)
            .ok_or_else(|| AppError::NotFound("Reward item".to_string()))?;

        let already_redeemed = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM reward_redemptions WHERE reward_id = $1)",
        )
        .bind(reward_id)
        .fetch_one(&self.db)
        .await?;

        if already_redeemed {
            return Err(AppError::DuplicateEntry("reward redemption".to_string()));
        }

        let plans = PlanService::new(self.db.clone());
        let available = plans.total_points().await?;
        if !plans.deduct_points(item.cost, "reward_redeemed").await? {
            return Err(AppError::InsufficientPoints {
                required: item.cost,
                available,
            });
        }

        let redemption = sqlx::query_as::<_, RewardRedemption>(
            r#"
            INSERT INTO reward_redemptions (reward_id, cost)
            VALUES ($1, $2)
            RETURNING id, reward_id, cost, created_at
            "#,
        )
        .bind(reward_id)
        .bind(item.cost)
        .fetch_one(&self.db)
        .await?;

        Ok(redemption)
    }
}
