//! Configuration module
//!
//! Runtime configuration is read from the environment once at startup and
//! handed to the stores/services explicitly; nothing constructs clients on
//! first use. `.env` files are honored via dotenvy.

use std::env;

use anyhow::{bail, Result};

const DEFAULT_SERVER_PORT: u16 = 8080;
const DEFAULT_AWS_REGION: &str = "us-east-1";
const DEFAULT_S3_BUCKET: &str = "workdeck-files";
const DEFAULT_USERS_TABLE: &str = "workdeck-users";
const DEFAULT_WORKSPACES_TABLE: &str = "workdeck-workspaces";
const DEFAULT_PROJECTS_TABLE: &str = "workdeck-projects";

/// Document-store backend selector.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DocumentBackend {
    DynamoDb,
    Memory,
}

/// Blob-store backend selector.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StorageBackend {
    S3,
    Memory,
}

#[derive(Clone, Debug)]
pub struct Config {
    pub server_port: u16,
    pub environment: String,
    pub cors_origins: Vec<String>,

    pub aws_region: String,
    /// Custom endpoint for DynamoDB Local.
    pub dynamodb_endpoint: Option<String>,
    /// Custom endpoint for S3-compatible providers (MinIO etc.).
    pub s3_endpoint: Option<String>,

    pub document_backend: DocumentBackend,
    pub storage_backend: StorageBackend,

    pub users_table: String,
    pub workspaces_table: String,
    pub projects_table: String,
    pub s3_bucket: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let server_port = match env::var("SERVER_PORT") {
            Ok(raw) => raw.parse()?,
            Err(_) => DEFAULT_SERVER_PORT,
        };

        let document_backend = match env::var("DOCUMENT_BACKEND").as_deref() {
            Ok("memory") => DocumentBackend::Memory,
            Ok("dynamodb") | Err(_) => DocumentBackend::DynamoDb,
            Ok(other) => bail!("Unknown DOCUMENT_BACKEND '{}'", other),
        };

        let storage_backend = match env::var("STORAGE_BACKEND").as_deref() {
            Ok("memory") => StorageBackend::Memory,
            Ok("s3") | Err(_) => StorageBackend::S3,
            Ok(other) => bail!("Unknown STORAGE_BACKEND '{}'", other),
        };

        let cors_origins = env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Ok(Config {
            server_port,
            environment: env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
            cors_origins,
            aws_region: env::var("AWS_REGION").unwrap_or_else(|_| DEFAULT_AWS_REGION.to_string()),
            dynamodb_endpoint: env::var("DYNAMODB_ENDPOINT").ok(),
            s3_endpoint: env::var("S3_ENDPOINT").ok(),
            document_backend,
            storage_backend,
            users_table: env::var("USERS_TABLE").unwrap_or_else(|_| DEFAULT_USERS_TABLE.to_string()),
            workspaces_table: env::var("WORKSPACES_TABLE")
                .unwrap_or_else(|_| DEFAULT_WORKSPACES_TABLE.to_string()),
            projects_table: env::var("PROJECTS_TABLE")
                .unwrap_or_else(|_| DEFAULT_PROJECTS_TABLE.to_string()),
            s3_bucket: env::var("S3_BUCKET").unwrap_or_else(|_| DEFAULT_S3_BUCKET.to_string()),
        })
    }

    pub fn is_production(&self) -> bool {
        let env = self.environment.to_lowercase();
        env == "production" || env == "prod"
    }

    /// In-memory configuration for tests; never touches the environment.
    pub fn for_tests() -> Self {
        Config {
            server_port: 0,
            environment: "test".to_string(),
            cors_origins: vec!["*".to_string()],
            aws_region: DEFAULT_AWS_REGION.to_string(),
            dynamodb_endpoint: None,
            s3_endpoint: None,
            document_backend: DocumentBackend::Memory,
            storage_backend: StorageBackend::Memory,
            users_table: DEFAULT_USERS_TABLE.to_string(),
            workspaces_table: DEFAULT_WORKSPACES_TABLE.to_string(),
            projects_table: DEFAULT_PROJECTS_TABLE.to_string(),
            s3_bucket: DEFAULT_S3_BUCKET.to_string(),
        }
    }
}
