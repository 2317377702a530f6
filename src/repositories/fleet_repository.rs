use sqlx::PgPool;
use uuid::Uuid;

use crate::models::fleet::Fleet;
use crate::utils::errors::AppResult;

pub struct FleetRepository {
    pool: PgPool,
}

impl FleetRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Fleet>> {
        let fleet = sqlx::query_as::<_, Fleet>("SELECT * FROM fleets WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(fleet)
    }

    pub async fn list_ordered(&self) -> AppResult<Vec<Fleet>> {
        let fleets =
            sqlx::query_as::<_, Fleet>("SELECT * FROM fleets ORDER BY sort_order, name")
                .fetch_all(&self.pool)
                .await?;

        Ok(fleets)
    }
}
