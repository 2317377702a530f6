use sqlx::PgPool;

use crate::models::pricing_rule::PricingRule;
use crate::utils::errors::AppResult;

pub struct PricingRuleRepository {
    pool: PgPool,
}

impl PricingRuleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Buscar la regla de una categoría. La ausencia es un error de master
    /// data que el caller convierte en RuleNotFound - nunca se cae a una
    /// regla arbitraria.
    pub async fn find_by_fleet_type(&self, fleet_type: &str) -> AppResult<Option<PricingRule>> {
        let rule =
            sqlx::query_as::<_, PricingRule>("SELECT * FROM pricing_rules WHERE fleet_type = $1")
                .bind(fleet_type)
                .fetch_optional(&self.pool)
                .await?;

        Ok(rule)
    }
}
