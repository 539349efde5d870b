//! DynamoDB-backed [`TableStore`].

use async_trait::async_trait;
use aws_sdk_dynamodb::Client;
use aws_sdk_dynamodb::error::{DisplayErrorContext, SdkError};
use aws_sdk_dynamodb::operation::describe_table::DescribeTableError;
use aws_sdk_dynamodb::types::{
    AttributeDefinition, AttributeValue, BillingMode as AwsBillingMode, KeySchemaElement, KeyType,
    ProvisionedThroughput, ScalarAttributeType, TableStatus as AwsTableStatus,
};
use log::debug;

use crate::conf::{BillingMode, StoreConfig};
use crate::core::{Movie, ReelError};

use super::convert::{item_to_movie, movie_to_item};
use super::schema::{ATTR_TITLE, ATTR_YEAR, TableDefinition, TableStatus, TitleQuery};
use super::{QueryPage, TableStore};

const KEY_CONDITION: &str = "#yr = :year and begins_with(title, :prefix)";
const PROJECTION: &str = "#yr, title, info";

#[derive(Clone)]
pub struct DynamoStore {
    client: Client,
}

impl std::fmt::Debug for DynamoStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DynamoStore").finish()
    }
}

impl DynamoStore {
    /// Builds a client from the SDK default chain, then applies region and endpoint overrides.
    pub async fn new(config: &StoreConfig) -> Self {
        let sdk_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        let mut builder = aws_sdk_dynamodb::config::Builder::from(&sdk_config);

        if let Some(region) = &config.region {
            builder = builder.region(aws_sdk_dynamodb::config::Region::new(region.clone()));
        }

        if let Some(endpoint) = &config.endpoint {
            builder = builder.endpoint_url(endpoint);
        }

        Self {
            client: Client::from_conf(builder.build()),
        }
    }

    fn is_not_found(err: &SdkError<DescribeTableError>) -> bool {
        match err {
            SdkError::ServiceError(service_err) => {
                matches!(
                    service_err.err(),
                    DescribeTableError::ResourceNotFoundException(_)
                )
            }
            _ => false,
        }
    }

    fn key_schema() -> Result<Vec<KeySchemaElement>, ReelError> {
        let hash = KeySchemaElement::builder()
            .attribute_name(ATTR_YEAR)
            .key_type(KeyType::Hash)
            .build()
            .map_err(|e| ReelError::StoreError(e.to_string()))?;
        let range = KeySchemaElement::builder()
            .attribute_name(ATTR_TITLE)
            .key_type(KeyType::Range)
            .build()
            .map_err(|e| ReelError::StoreError(e.to_string()))?;
        Ok(vec![hash, range])
    }

    fn attribute_definitions() -> Result<Vec<AttributeDefinition>, ReelError> {
        let year = AttributeDefinition::builder()
            .attribute_name(ATTR_YEAR)
            .attribute_type(ScalarAttributeType::N)
            .build()
            .map_err(|e| ReelError::StoreError(e.to_string()))?;
        let title = AttributeDefinition::builder()
            .attribute_name(ATTR_TITLE)
            .attribute_type(ScalarAttributeType::S)
            .build()
            .map_err(|e| ReelError::StoreError(e.to_string()))?;
        Ok(vec![year, title])
    }
}

impl From<&AwsTableStatus> for TableStatus {
    fn from(status: &AwsTableStatus) -> Self {
        match status {
            AwsTableStatus::Creating => TableStatus::Creating,
            AwsTableStatus::Active => TableStatus::Active,
            AwsTableStatus::Updating => TableStatus::Updating,
            AwsTableStatus::Deleting => TableStatus::Deleting,
            other => TableStatus::Other(other.as_str().to_string()),
        }
    }
}

#[async_trait]
impl TableStore for DynamoStore {
    async fn describe(&self, table: &str) -> Result<Option<TableStatus>, ReelError> {
        match self.client.describe_table().table_name(table).send().await {
            Ok(output) => {
                let status = output
                    .table()
                    .and_then(|t| t.table_status())
                    .map(TableStatus::from)
                    .unwrap_or_else(|| TableStatus::Other(String::from("UNKNOWN")));
                Ok(Some(status))
            }
            Err(err) if Self::is_not_found(&err) => Ok(None),
            Err(err) => Err(ReelError::StoreError(format!(
                "DynamoDB DescribeTable failed: {}",
                DisplayErrorContext(&err)
            ))),
        }
    }

    async fn create(&self, definition: &TableDefinition) -> Result<(), ReelError> {
        let mut request = self
            .client
            .create_table()
            .table_name(&definition.name)
            .set_key_schema(Some(Self::key_schema()?))
            .set_attribute_definitions(Some(Self::attribute_definitions()?));

        request = match &definition.billing {
            BillingMode::PayPerRequest => request.billing_mode(AwsBillingMode::PayPerRequest),
            BillingMode::Provisioned {
                read_capacity,
                write_capacity,
            } => {
                let throughput = ProvisionedThroughput::builder()
                    .read_capacity_units(*read_capacity)
                    .write_capacity_units(*write_capacity)
                    .build()
                    .map_err(|e| ReelError::StoreError(e.to_string()))?;
                request
                    .billing_mode(AwsBillingMode::Provisioned)
                    .provisioned_throughput(throughput)
            }
        };

        request.send().await.map_err(|e| {
            ReelError::StoreError(format!(
                "DynamoDB CreateTable failed: {}",
                DisplayErrorContext(&e)
            ))
        })?;
        Ok(())
    }

    async fn delete(&self, table: &str) -> Result<(), ReelError> {
        self.client
            .delete_table()
            .table_name(table)
            .send()
            .await
            .map_err(|e| {
                ReelError::StoreError(format!(
                    "DynamoDB DeleteTable failed: {}",
                    DisplayErrorContext(&e)
                ))
            })?;
        Ok(())
    }

    async fn put(&self, table: &str, movie: &Movie) -> Result<(), ReelError> {
        self.client
            .put_item()
            .table_name(table)
            .set_item(Some(movie_to_item(movie)))
            .send()
            .await
            .map_err(|e| {
                ReelError::StoreError(format!(
                    "DynamoDB PutItem {} failed: {}",
                    movie.key(),
                    DisplayErrorContext(&e)
                ))
            })?;
        Ok(())
    }

    async fn query(&self, table: &str, query: &TitleQuery) -> Result<QueryPage, ReelError> {
        let output = self
            .client
            .query()
            .table_name(table)
            .key_condition_expression(KEY_CONDITION)
            .projection_expression(PROJECTION)
            .expression_attribute_names("#yr", ATTR_YEAR)
            .expression_attribute_values(":year", AttributeValue::N(query.year.to_string()))
            .expression_attribute_values(":prefix", AttributeValue::S(query.title_prefix.clone()))
            .send()
            .await
            .map_err(|e| {
                ReelError::StoreError(format!("DynamoDB Query failed: {}", DisplayErrorContext(&e)))
            })?;

        let items = output
            .items()
            .iter()
            .map(item_to_movie)
            .collect::<Result<Vec<_>, _>>()?;
        let truncated = output
            .last_evaluated_key()
            .is_some_and(|key| !key.is_empty());
        debug!(
            "query year={} prefix={:?}: {} items",
            query.year,
            query.title_prefix,
            items.len()
        );

        Ok(QueryPage { items, truncated })
    }
}
