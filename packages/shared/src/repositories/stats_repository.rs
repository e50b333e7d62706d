use async_trait::async_trait;
use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client;

use crate::models::stats::GameStats;
use crate::repositories::errors::stats_repository_errors::StatsRepositoryError;

#[cfg(test)]
use mockall::automock;

#[cfg_attr(test, automock)]
#[async_trait]
pub trait StatsRepository: Send + Sync {
    async fn get_stats(&self, user_id: &str) -> Result<Option<GameStats>, StatsRepositoryError>;

    /// Insert a fresh entry; fails with `AlreadyExists` if one is present so
    /// that concurrent lazy creation stays single-writer.
    async fn create_stats(&self, stats: &GameStats) -> Result<(), StatsRepositoryError>;

    /// All stats entries, for the leaderboard projection.
    async fn scan_stats(&self) -> Result<Vec<GameStats>, StatsRepositoryError>;
}

pub struct DynamoDbStatsRepository {
    pub client: Client,
    pub table_name: String,
}

impl DynamoDbStatsRepository {
    pub fn new(client: Client) -> Self {
        let table_name = std::env::var("GAME_STATS_TABLE")
            .expect("GAME_STATS_TABLE environment variable must be set");
        Self { client, table_name }
    }
}

#[async_trait]
impl StatsRepository for DynamoDbStatsRepository {
    async fn get_stats(&self, user_id: &str) -> Result<Option<GameStats>, StatsRepositoryError> {
        let result = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .key("user_id", AttributeValue::S(user_id.to_string()))
            .send()
            .await
            .map_err(|e| StatsRepositoryError::DynamoDb(e.to_string()))?;

        if let Some(item) = result.item {
            let stats: GameStats = serde_dynamo::from_item(item)
                .map_err(|e| StatsRepositoryError::Serialization(e.to_string()))?;
            Ok(Some(stats))
        } else {
            Ok(None)
        }
    }

    async fn create_stats(&self, stats: &GameStats) -> Result<(), StatsRepositoryError> {
        let item = serde_dynamo::to_item(stats)
            .map_err(|e| StatsRepositoryError::Serialization(e.to_string()))?;

        let result = self
            .client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(item))
            .condition_expression("attribute_not_exists(user_id)")
            .send()
            .await;

        match result {
            Ok(_) => Ok(()),
            Err(e) => {
                let error_str = e.to_string();
                if error_str.contains("ConditionalCheckFailed") {
                    Err(StatsRepositoryError::AlreadyExists)
                } else {
                    Err(StatsRepositoryError::DynamoDb(error_str))
                }
            }
        }
    }

    async fn scan_stats(&self) -> Result<Vec<GameStats>, StatsRepositoryError> {
        let mut entries = Vec::new();
        let mut exclusive_start_key = None;

        loop {
            let output = self
                .client
                .scan()
                .table_name(&self.table_name)
                .set_exclusive_start_key(exclusive_start_key)
                .send()
                .await
                .map_err(|e| StatsRepositoryError::DynamoDb(e.to_string()))?;

            let page: Vec<GameStats> = serde_dynamo::from_items(output.items.unwrap_or_default())
                .map_err(|e| StatsRepositoryError::Serialization(e.to_string()))?;
            entries.extend(page);

            exclusive_start_key = output.last_evaluated_key;
            if exclusive_start_key.is_none() {
                break;
            }
        }

        Ok(entries)
    }
}
