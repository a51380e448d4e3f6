//! DynamoDB document store.
//!
//! Table layout (one table per entity, provisioned on demand):
//!
//! - users:      pk `id`; GSI `username-index` on `username`
//! - workspaces: pk `id`; GSI `userId-index` on `userId`
//! - projects:   pk `id`; GSIs `userId-index` on `userId`, `workspaceId-index` on `workspaceId`
//!
//! Attributes use the wire names of the records (`userId`, `createdAt`, ...);
//! timestamps are stored as RFC-3339 strings. All writes are single-item
//! `PutItem`/`DeleteItem` calls — DynamoDB gives no cheap cross-item
//! transaction here, which is why the quota guarantees above this layer are
//! documented as weak.

use crate::traits::{DocumentError, DocumentResult, DocumentStore};
use async_trait::async_trait;
use aws_config::meta::region::RegionProviderChain;
use aws_config::retry::{RetryConfig, RetryMode};
use aws_config::BehaviorVersion;
use aws_sdk_dynamodb::types::{
    AttributeDefinition, AttributeValue, BillingMode, GlobalSecondaryIndex, KeySchemaElement,
    KeyType, Projection, ProjectionType, ScalarAttributeType,
};
use aws_sdk_dynamodb::Client;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use uuid::Uuid;
use workdeck_core::models::{Project, User, Workspace};
use workdeck_core::Config;

const USERNAME_INDEX: &str = "username-index";
const USER_ID_INDEX: &str = "userId-index";
const WORKSPACE_ID_INDEX: &str = "workspaceId-index";

type Item = HashMap<String, AttributeValue>;

/// DynamoDB-backed document store.
#[derive(Clone)]
pub struct DynamoStore {
    client: Client,
    users_table: String,
    workspaces_table: String,
    projects_table: String,
}

impl DynamoStore {
    /// Build the client from configuration. The client is constructed once
    /// here and injected into services; nothing connects lazily.
    pub async fn new(config: &Config) -> DocumentResult<Self> {
        let region_provider =
            RegionProviderChain::first_try(aws_config::Region::new(config.aws_region.clone()));

        let retry_config = RetryConfig::standard()
            .with_max_attempts(5)
            .with_retry_mode(RetryMode::Adaptive);

        let mut loader = aws_config::defaults(BehaviorVersion::latest())
            .region(region_provider)
            .retry_config(retry_config);

        // DynamoDB Local for development.
        if let Some(ref endpoint) = config.dynamodb_endpoint {
            loader = loader.endpoint_url(endpoint);
        }

        let sdk_config = loader.load().await;
        let client = Client::new(&sdk_config);

        Ok(DynamoStore {
            client,
            users_table: config.users_table.clone(),
            workspaces_table: config.workspaces_table.clone(),
            projects_table: config.projects_table.clone(),
        })
    }

    /// Create the three tables and their indexes if they do not exist yet.
    /// Idempotent; safe to run on every startup.
    pub async fn ensure_tables(&self) -> DocumentResult<()> {
        self.create_table_if_missing(
            &self.users_table,
            vec![("username", USERNAME_INDEX)],
        )
        .await?;
        self.create_table_if_missing(
            &self.workspaces_table,
            vec![("userId", USER_ID_INDEX)],
        )
        .await?;
        self.create_table_if_missing(
            &self.projects_table,
            vec![("userId", USER_ID_INDEX), ("workspaceId", WORKSPACE_ID_INDEX)],
        )
        .await?;
        Ok(())
    }

    async fn create_table_if_missing(
        &self,
        table: &str,
        indexes: Vec<(&str, &str)>,
    ) -> DocumentResult<()> {
        let mut request = self
            .client
            .create_table()
            .table_name(table)
            .billing_mode(BillingMode::PayPerRequest)
            .key_schema(
                KeySchemaElement::builder()
                    .attribute_name("id")
                    .key_type(KeyType::Hash)
                    .build()
                    .map_err(|e| DocumentError::ConfigError(e.to_string()))?,
            )
            .attribute_definitions(
                AttributeDefinition::builder()
                    .attribute_name("id")
                    .attribute_type(ScalarAttributeType::S)
                    .build()
                    .map_err(|e| DocumentError::ConfigError(e.to_string()))?,
            );

        for (attribute, index_name) in indexes {
            request = request
                .attribute_definitions(
                    AttributeDefinition::builder()
                        .attribute_name(attribute)
                        .attribute_type(ScalarAttributeType::S)
                        .build()
                        .map_err(|e| DocumentError::ConfigError(e.to_string()))?,
                )
                .global_secondary_indexes(
                    GlobalSecondaryIndex::builder()
                        .index_name(index_name)
                        .key_schema(
                            KeySchemaElement::builder()
                                .attribute_name(attribute)
                                .key_type(KeyType::Hash)
                                .build()
                                .map_err(|e| DocumentError::ConfigError(e.to_string()))?,
                        )
                        .projection(
                            Projection::builder()
                                .projection_type(ProjectionType::All)
                                .build(),
                        )
                        .build()
                        .map_err(|e| DocumentError::ConfigError(e.to_string()))?,
                );
        }

        match request.send().await {
            Ok(_) => {
                tracing::info!(table = %table, "Created DynamoDB table");
                Ok(())
            }
            Err(e) => {
                let service_error = e.into_service_error();
                if service_error.is_resource_in_use_exception() {
                    tracing::debug!(table = %table, "DynamoDB table already exists");
                    Ok(())
                } else {
                    Err(DocumentError::ConfigError(service_error.to_string()))
                }
            }
        }
    }

    async fn get_item(&self, table: &str, id: Uuid) -> DocumentResult<Option<Item>> {
        let output = self
            .client
            .get_item()
            .table_name(table)
            .key("id", AttributeValue::S(id.to_string()))
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, table = %table, id = %id, "DynamoDB get_item failed");
                DocumentError::GetFailed(e.to_string())
            })?;
        Ok(output.item)
    }

    async fn query_index(
        &self,
        table: &str,
        index: &str,
        attribute: &str,
        value: String,
    ) -> DocumentResult<Vec<Item>> {
        let output = self
            .client
            .query()
            .table_name(table)
            .index_name(index)
            .key_condition_expression(format!("{} = :v", attribute))
            .expression_attribute_values(":v", AttributeValue::S(value))
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, table = %table, index = %index, "DynamoDB query failed");
                DocumentError::QueryFailed(e.to_string())
            })?;
        Ok(output.items.unwrap_or_default())
    }

    async fn put_item(&self, table: &str, item: Item) -> DocumentResult<()> {
        self.client
            .put_item()
            .table_name(table)
            .set_item(Some(item))
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, table = %table, "DynamoDB put_item failed");
                DocumentError::PutFailed(e.to_string())
            })?;
        Ok(())
    }

    async fn delete_item(&self, table: &str, id: Uuid) -> DocumentResult<()> {
        self.client
            .delete_item()
            .table_name(table)
            .key("id", AttributeValue::S(id.to_string()))
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, table = %table, id = %id, "DynamoDB delete_item failed");
                DocumentError::DeleteFailed(e.to_string())
            })?;
        Ok(())
    }
}

// Attribute marshaling. Records are small and flat; hand-rolled converters
// keep the wire shape explicit.

fn attr_s(item: &Item, name: &str) -> DocumentResult<String> {
    match item.get(name) {
        Some(AttributeValue::S(s)) => Ok(s.clone()),
        _ => Err(DocumentError::Malformed(format!(
            "missing string attribute '{}'",
            name
        ))),
    }
}

fn attr_opt_s(item: &Item, name: &str) -> Option<String> {
    match item.get(name) {
        Some(AttributeValue::S(s)) => Some(s.clone()),
        _ => None,
    }
}

fn attr_uuid(item: &Item, name: &str) -> DocumentResult<Uuid> {
    attr_s(item, name)?
        .parse()
        .map_err(|e| DocumentError::Malformed(format!("attribute '{}': {}", name, e)))
}

fn attr_ts(item: &Item, name: &str) -> DocumentResult<DateTime<Utc>> {
    let raw = attr_s(item, name)?;
    DateTime::parse_from_rfc3339(&raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| DocumentError::Malformed(format!("attribute '{}': {}", name, e)))
}

fn insert_opt_s(item: &mut Item, name: &str, value: &Option<String>) {
    if let Some(v) = value {
        item.insert(name.to_string(), AttributeValue::S(v.clone()));
    }
}

fn user_to_item(user: &User) -> Item {
    let mut item = Item::new();
    item.insert("id".into(), AttributeValue::S(user.id.to_string()));
    item.insert("username".into(), AttributeValue::S(user.username.clone()));
    item.insert(
        "passwordHash".into(),
        AttributeValue::S(user.password_hash.clone()),
    );
    insert_opt_s(&mut item, "email", &user.email);
    item.insert(
        "createdAt".into(),
        AttributeValue::S(user.created_at.to_rfc3339()),
    );
    item.insert(
        "updatedAt".into(),
        AttributeValue::S(user.updated_at.to_rfc3339()),
    );
    item
}

fn user_from_item(item: &Item) -> DocumentResult<User> {
    Ok(User {
        id: attr_uuid(item, "id")?,
        username: attr_s(item, "username")?,
        password_hash: attr_s(item, "passwordHash")?,
        email: attr_opt_s(item, "email"),
        created_at: attr_ts(item, "createdAt")?,
        updated_at: attr_ts(item, "updatedAt")?,
    })
}

fn workspace_to_item(workspace: &Workspace) -> Item {
    let mut item = Item::new();
    item.insert("id".into(), AttributeValue::S(workspace.id.to_string()));
    item.insert("name".into(), AttributeValue::S(workspace.name.clone()));
    insert_opt_s(&mut item, "description", &workspace.description);
    item.insert(
        "userId".into(),
        AttributeValue::S(workspace.user_id.to_string()),
    );
    item.insert(
        "createdAt".into(),
        AttributeValue::S(workspace.created_at.to_rfc3339()),
    );
    item.insert(
        "updatedAt".into(),
        AttributeValue::S(workspace.updated_at.to_rfc3339()),
    );
    item
}

fn workspace_from_item(item: &Item) -> DocumentResult<Workspace> {
    Ok(Workspace {
        id: attr_uuid(item, "id")?,
        name: attr_s(item, "name")?,
        description: attr_opt_s(item, "description"),
        user_id: attr_uuid(item, "userId")?,
        created_at: attr_ts(item, "createdAt")?,
        updated_at: attr_ts(item, "updatedAt")?,
    })
}

fn project_to_item(project: &Project) -> Item {
    let mut item = Item::new();
    item.insert("id".into(), AttributeValue::S(project.id.to_string()));
    item.insert("name".into(), AttributeValue::S(project.name.clone()));
    insert_opt_s(&mut item, "description", &project.description);
    item.insert(
        "workspaceId".into(),
        AttributeValue::S(project.workspace_id.to_string()),
    );
    item.insert(
        "userId".into(),
        AttributeValue::S(project.user_id.to_string()),
    );
    item.insert(
        "createdAt".into(),
        AttributeValue::S(project.created_at.to_rfc3339()),
    );
    item.insert(
        "updatedAt".into(),
        AttributeValue::S(project.updated_at.to_rfc3339()),
    );
    item
}

fn project_from_item(item: &Item) -> DocumentResult<Project> {
    Ok(Project {
        id: attr_uuid(item, "id")?,
        name: attr_s(item, "name")?,
        description: attr_opt_s(item, "description"),
        workspace_id: attr_uuid(item, "workspaceId")?,
        user_id: attr_uuid(item, "userId")?,
        created_at: attr_ts(item, "createdAt")?,
        updated_at: attr_ts(item, "updatedAt")?,
    })
}

#[async_trait]
impl DocumentStore for DynamoStore {
    async fn put_user(&self, user: &User) -> DocumentResult<()> {
        self.put_item(&self.users_table, user_to_item(user))
            .await
    }

    async fn get_user(&self, id: Uuid) -> DocumentResult<Option<User>> {
        match self.get_item(&self.users_table, id).await? {
            Some(item) => Ok(Some(user_from_item(&item)?)),
            None => Ok(None),
        }
    }

    async fn get_user_by_username(&self, username: &str) -> DocumentResult<Option<User>> {
        let items = self
            .query_index(
                &self.users_table,
                USERNAME_INDEX,
                "username",
                username.to_string(),
            )
            .await?;
        match items.first() {
            Some(item) => Ok(Some(user_from_item(item)?)),
            None => Ok(None),
        }
    }

    async fn put_workspace(&self, workspace: &Workspace) -> DocumentResult<()> {
        self.put_item(&self.workspaces_table, workspace_to_item(workspace))
            .await
    }

    async fn get_workspace(&self, id: Uuid) -> DocumentResult<Option<Workspace>> {
        match self.get_item(&self.workspaces_table, id).await? {
            Some(item) => Ok(Some(workspace_from_item(&item)?)),
            None => Ok(None),
        }
    }

    async fn list_workspaces_by_owner(&self, owner_id: Uuid) -> DocumentResult<Vec<Workspace>> {
        let items = self
            .query_index(
                &self.workspaces_table,
                USER_ID_INDEX,
                "userId",
                owner_id.to_string(),
            )
            .await?;
        items.iter().map(workspace_from_item).collect()
    }

    async fn delete_workspace(&self, id: Uuid) -> DocumentResult<()> {
        self.delete_item(&self.workspaces_table, id).await
    }

    async fn put_project(&self, project: &Project) -> DocumentResult<()> {
        self.put_item(&self.projects_table, project_to_item(project))
            .await
    }

    async fn get_project(&self, id: Uuid) -> DocumentResult<Option<Project>> {
        match self.get_item(&self.projects_table, id).await? {
            Some(item) => Ok(Some(project_from_item(&item)?)),
            None => Ok(None),
        }
    }

    async fn list_projects_by_workspace(
        &self,
        workspace_id: Uuid,
    ) -> DocumentResult<Vec<Project>> {
        let items = self
            .query_index(
                &self.projects_table,
                WORKSPACE_ID_INDEX,
                "workspaceId",
                workspace_id.to_string(),
            )
            .await?;
        items.iter().map(project_from_item).collect()
    }

    async fn list_projects_by_owner(&self, owner_id: Uuid) -> DocumentResult<Vec<Project>> {
        let items = self
            .query_index(
                &self.projects_table,
                USER_ID_INDEX,
                "userId",
                owner_id.to_string(),
            )
            .await?;
        items.iter().map(project_from_item).collect()
    }

    async fn delete_project(&self, id: Uuid) -> DocumentResult<()> {
        self.delete_item(&self.projects_table, id).await
    }
}
