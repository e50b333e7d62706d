use async_trait::async_trait;
use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client;

use crate::models::user::UserProfile;
use crate::repositories::errors::user_repository_errors::UserRepositoryError;

#[cfg(test)]
use mockall::automock;

/// Read-only window onto the user records owned by the surrounding
/// application; the game subsystem never writes them.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn get_profile(&self, user_id: &str)
        -> Result<Option<UserProfile>, UserRepositoryError>;
}

pub struct DynamoDbUserRepository {
    pub client: Client,
    pub table_name: String,
}

impl DynamoDbUserRepository {
    pub fn new(client: Client) -> Self {
        let table_name =
            std::env::var("USERS_TABLE").expect("USERS_TABLE environment variable must be set");
        Self { client, table_name }
    }
}

#[async_trait]
impl UserRepository for DynamoDbUserRepository {
    async fn get_profile(
        &self,
        user_id: &str,
    ) -> Result<Option<UserProfile>, UserRepositoryError> {
        let result = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .key("id", AttributeValue::S(user_id.to_string()))
            .send()
            .await
            .map_err(|e| UserRepositoryError::DynamoDb(e.to_string()))?;

        if let Some(item) = result.item {
            let profile: UserProfile = serde_dynamo::from_item(item)
                .map_err(|e| UserRepositoryError::Serialization(e.to_string()))?;
            Ok(Some(profile))
        } else {
            Ok(None)
        }
    }
}
