use async_trait::async_trait;
use aws_sdk_dynamodb::types::{AttributeValue, Put, TransactWriteItem};
use aws_sdk_dynamodb::Client;

use crate::models::game::{Game, GameStatus};
use crate::models::move_record::MoveRecord;
use crate::models::stats::GameStats;
use crate::repositories::errors::game_repository_errors::GameRepositoryError;

#[cfg(test)]
use mockall::automock;

#[cfg_attr(test, automock)]
#[async_trait]
pub trait GameRepository: Send + Sync {
    async fn create_game(&self, game: &Game) -> Result<(), GameRepositoryError>;

    async fn get_game(&self, game_id: &str) -> Result<Option<Game>, GameRepositoryError>;

    /// Highest committed move number for the game, plus one.
    async fn next_move_number(&self, game_id: &str) -> Result<u64, GameRepositoryError>;

    /// Persist one turn as a single atomic unit: the updated game (guarded by
    /// `expected_version`), the appended move record, and the updated stats
    /// entry when the game finished. Nothing is written on a version miss.
    async fn commit_turn(
        &self,
        game: &Game,
        expected_version: u64,
        move_record: Option<MoveRecord>,
        stats: Option<GameStats>,
    ) -> Result<(), GameRepositoryError>;

    async fn list_moves(&self, game_id: &str) -> Result<Vec<MoveRecord>, GameRepositoryError>;

    async fn list_active_games(
        &self,
        user_id: &str,
        limit: usize,
    ) -> Result<Vec<Game>, GameRepositoryError>;

    async fn list_finished_games(&self, user_id: &str) -> Result<Vec<Game>, GameRepositoryError>;
}

pub struct DynamoDbGameRepository {
    pub client: Client,
    pub games_table: String,
    pub moves_table: String,
    pub stats_table: String,
}

impl DynamoDbGameRepository {
    pub fn new(client: Client) -> Self {
        let games_table =
            std::env::var("GAMES_TABLE").expect("GAMES_TABLE environment variable must be set");
        let moves_table = std::env::var("GAME_MOVES_TABLE")
            .expect("GAME_MOVES_TABLE environment variable must be set");
        let stats_table = std::env::var("GAME_STATS_TABLE")
            .expect("GAME_STATS_TABLE environment variable must be set");
        Self {
            client,
            games_table,
            moves_table,
            stats_table,
        }
    }

    async fn query_games_by_player(
        &self,
        user_id: &str,
        status: GameStatus,
    ) -> Result<Vec<Game>, GameRepositoryError> {
        let output = self
            .client
            .query()
            .table_name(&self.games_table)
            .index_name("GSI_GamesByPlayer")
            .key_condition_expression("player1_id = :player_id")
            .filter_expression("#status = :status")
            .expression_attribute_names("#status", "status")
            .expression_attribute_values(":player_id", AttributeValue::S(user_id.to_string()))
            .expression_attribute_values(":status", AttributeValue::S(status.as_str().to_string()))
            .send()
            .await
            .map_err(|e| GameRepositoryError::DynamoDb(e.to_string()))?;

        let games = serde_dynamo::from_items(output.items.unwrap_or_default())
            .map_err(|e| GameRepositoryError::Serialization(e.to_string()))?;
        Ok(games)
    }
}

#[async_trait]
impl GameRepository for DynamoDbGameRepository {
    async fn create_game(&self, game: &Game) -> Result<(), GameRepositoryError> {
        let item = serde_dynamo::to_item(game)
            .map_err(|e| GameRepositoryError::Serialization(e.to_string()))?;

        self.client
            .put_item()
            .table_name(&self.games_table)
            .set_item(Some(item))
            .condition_expression("attribute_not_exists(game_id)")
            .send()
            .await
            .map_err(|e| GameRepositoryError::DynamoDb(e.to_string()))?;

        Ok(())
    }

    async fn get_game(&self, game_id: &str) -> Result<Option<Game>, GameRepositoryError> {
        let result = self
            .client
            .get_item()
            .table_name(&self.games_table)
            .key("game_id", AttributeValue::S(game_id.to_string()))
            .send()
            .await
            .map_err(|e| GameRepositoryError::DynamoDb(e.to_string()))?;

        if let Some(item) = result.item {
            let game: Game = serde_dynamo::from_item(item)
                .map_err(|e| GameRepositoryError::Serialization(e.to_string()))?;
            Ok(Some(game))
        } else {
            Ok(None)
        }
    }

    async fn next_move_number(&self, game_id: &str) -> Result<u64, GameRepositoryError> {
        let output = self
            .client
            .query()
            .table_name(&self.moves_table)
            .key_condition_expression("game_id = :game_id")
            .expression_attribute_values(":game_id", AttributeValue::S(game_id.to_string()))
            .scan_index_forward(false)
            .limit(1)
            .send()
            .await
            .map_err(|e| GameRepositoryError::DynamoDb(e.to_string()))?;

        let last = output
            .items()
            .first()
            .and_then(|item| item.get("move_number"))
            .and_then(|value| value.as_n().ok())
            .and_then(|number| number.parse::<u64>().ok())
            .unwrap_or(0);
        Ok(last + 1)
    }

    async fn commit_turn(
        &self,
        game: &Game,
        expected_version: u64,
        move_record: Option<MoveRecord>,
        stats: Option<GameStats>,
    ) -> Result<(), GameRepositoryError> {
        let game_item = serde_dynamo::to_item(game)
            .map_err(|e| GameRepositoryError::Serialization(e.to_string()))?;
        let game_put = Put::builder()
            .table_name(&self.games_table)
            .set_item(Some(game_item))
            .condition_expression("attribute_exists(game_id) AND version = :expected")
            .expression_attribute_values(
                ":expected",
                AttributeValue::N(expected_version.to_string()),
            )
            .build()
            .map_err(|e| GameRepositoryError::DynamoDb(e.to_string()))?;

        let mut request = self
            .client
            .transact_write_items()
            .transact_items(TransactWriteItem::builder().put(game_put).build());

        if let Some(record) = move_record {
            let move_item = serde_dynamo::to_item(&record)
                .map_err(|e| GameRepositoryError::Serialization(e.to_string()))?;
            let move_put = Put::builder()
                .table_name(&self.moves_table)
                .set_item(Some(move_item))
                .condition_expression("attribute_not_exists(game_id)")
                .build()
                .map_err(|e| GameRepositoryError::DynamoDb(e.to_string()))?;
            request = request.transact_items(TransactWriteItem::builder().put(move_put).build());
        }

        if let Some(stats) = stats {
            let stats_item = serde_dynamo::to_item(&stats)
                .map_err(|e| GameRepositoryError::Serialization(e.to_string()))?;
            let stats_put = Put::builder()
                .table_name(&self.stats_table)
                .set_item(Some(stats_item))
                .condition_expression("version = :stats_expected")
                .expression_attribute_values(
                    ":stats_expected",
                    AttributeValue::N((stats.version - 1).to_string()),
                )
                .build()
                .map_err(|e| GameRepositoryError::DynamoDb(e.to_string()))?;
            request = request.transact_items(TransactWriteItem::builder().put(stats_put).build());
        }

        match request.send().await {
            Ok(_) => Ok(()),
            Err(e) => {
                let error_str = e.to_string();
                if error_str.contains("TransactionCanceled")
                    || error_str.contains("ConditionalCheckFailed")
                {
                    Err(GameRepositoryError::VersionConflict)
                } else {
                    Err(GameRepositoryError::DynamoDb(error_str))
                }
            }
        }
    }

    async fn list_moves(&self, game_id: &str) -> Result<Vec<MoveRecord>, GameRepositoryError> {
        let output = self
            .client
            .query()
            .table_name(&self.moves_table)
            .key_condition_expression("game_id = :game_id")
            .expression_attribute_values(":game_id", AttributeValue::S(game_id.to_string()))
            .scan_index_forward(true)
            .send()
            .await
            .map_err(|e| GameRepositoryError::DynamoDb(e.to_string()))?;

        let moves = serde_dynamo::from_items(output.items.unwrap_or_default())
            .map_err(|e| GameRepositoryError::Serialization(e.to_string()))?;
        Ok(moves)
    }

    async fn list_active_games(
        &self,
        user_id: &str,
        limit: usize,
    ) -> Result<Vec<Game>, GameRepositoryError> {
        let mut games = self.query_games_by_player(user_id, GameStatus::Playing).await?;
        games.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        games.truncate(limit);
        Ok(games)
    }

    async fn list_finished_games(&self, user_id: &str) -> Result<Vec<Game>, GameRepositoryError> {
        self.query_games_by_player(user_id, GameStatus::Finished)
            .await
    }
}
