//! DynamoDB item store implementation.

use async_trait::async_trait;
use aws_sdk_dynamodb::types::{
    AttributeDefinition, KeySchemaElement, KeyType, ProvisionedThroughput, ReturnValue,
    ScalarAttributeType,
};
use aws_sdk_dynamodb::Client;

use crate::storage::{
    Condition, Item, ItemStore, ItemStoreError, ScalarType, ScanPage, TableSpec, TableStatus,
    UpdateSpec,
};

use super::error::{
    map_create_table_error, map_delete_item_error, map_describe_table_error, map_get_item_error,
    map_put_item_error, map_scan_error, map_update_item_error,
};
use super::expression::ExpressionBuilder;

/// One DynamoDB table accessed through `aws-sdk-dynamodb`.
#[derive(Clone)]
pub struct DynamoDbItemStore {
    client: Client,
    table_name: String,
}

impl std::fmt::Debug for DynamoDbItemStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DynamoDbItemStore")
            .field("table_name", &self.table_name)
            .finish()
    }
}

impl DynamoDbItemStore {
    /// Creates a store over the given client and table name.
    pub fn new(client: Client, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
        }
    }
}

/// Renders an optional condition, returning the expression and the builder
/// holding its placeholders.
fn render_condition(condition: Option<&Condition>) -> (Option<String>, ExpressionBuilder) {
    let mut builder = ExpressionBuilder::new();
    let expression = condition.map(|condition| builder.condition(condition));
    (expression, builder)
}

fn to_scalar_type(scalar_type: ScalarType) -> ScalarAttributeType {
    match scalar_type {
        ScalarType::String => ScalarAttributeType::S,
    }
}

fn to_table_status(status: Option<&aws_sdk_dynamodb::types::TableStatus>) -> TableStatus {
    use aws_sdk_dynamodb::types::TableStatus as SdkTableStatus;

    match status {
        Some(SdkTableStatus::Active) => TableStatus::Active,
        Some(SdkTableStatus::Creating) => TableStatus::Creating,
        Some(SdkTableStatus::Updating) => TableStatus::Updating,
        Some(SdkTableStatus::Deleting) => TableStatus::Deleting,
        _ => TableStatus::Unknown,
    }
}

fn build_error(err: impl std::fmt::Display) -> ItemStoreError {
    ItemStoreError::Service(format!("Invalid request: {err}"))
}

#[async_trait]
impl ItemStore for DynamoDbItemStore {
    fn table_name(&self) -> &str {
        &self.table_name
    }

    async fn get_item(&self, key: Item) -> Result<Option<Item>, ItemStoreError> {
        let result = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .set_key(Some(key))
            .send()
            .await
            .map_err(map_get_item_error)?;

        Ok(result.item)
    }

    async fn put_item(
        &self,
        item: Item,
        condition: Option<Condition>,
    ) -> Result<(), ItemStoreError> {
        let (condition_expression, builder) = render_condition(condition.as_ref());

        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(item))
            .set_condition_expression(condition_expression)
            .set_expression_attribute_names(builder.names())
            .set_expression_attribute_values(builder.values())
            .send()
            .await
            .map_err(map_put_item_error)?;

        Ok(())
    }

    async fn update_item(
        &self,
        key: Item,
        update: UpdateSpec,
        condition: Option<Condition>,
    ) -> Result<Option<Item>, ItemStoreError> {
        let mut builder = ExpressionBuilder::new();
        let update_expression = builder.update(&update);
        let condition_expression = condition.as_ref().map(|c| builder.condition(c));

        let result = self
            .client
            .update_item()
            .table_name(&self.table_name)
            .set_key(Some(key))
            .update_expression(update_expression)
            .set_condition_expression(condition_expression)
            .set_expression_attribute_names(builder.names())
            .set_expression_attribute_values(builder.values())
            .return_values(ReturnValue::AllNew)
            .send()
            .await
            .map_err(map_update_item_error)?;

        Ok(result.attributes)
    }

    async fn delete_item(
        &self,
        key: Item,
        condition: Option<Condition>,
    ) -> Result<Option<Item>, ItemStoreError> {
        let (condition_expression, builder) = render_condition(condition.as_ref());

        let result = self
            .client
            .delete_item()
            .table_name(&self.table_name)
            .set_key(Some(key))
            .set_condition_expression(condition_expression)
            .set_expression_attribute_names(builder.names())
            .set_expression_attribute_values(builder.values())
            .return_values(ReturnValue::AllOld)
            .send()
            .await
            .map_err(map_delete_item_error)?;

        Ok(result.attributes)
    }

    async fn scan(
        &self,
        limit: u32,
        exclusive_start_key: Option<Item>,
    ) -> Result<ScanPage, ItemStoreError> {
        let limit = i32::try_from(limit).unwrap_or(i32::MAX);

        let result = self
            .client
            .scan()
            .table_name(&self.table_name)
            .limit(limit)
            .set_exclusive_start_key(exclusive_start_key)
            .send()
            .await
            .map_err(map_scan_error)?;

        Ok(ScanPage {
            items: result.items.unwrap_or_default(),
            last_evaluated_key: result.last_evaluated_key,
        })
    }

    async fn create_table(&self, spec: &TableSpec) -> Result<(), ItemStoreError> {
        let key_schema = KeySchemaElement::builder()
            .attribute_name(&spec.partition_key.name)
            .key_type(KeyType::Hash)
            .build()
            .map_err(build_error)?;

        let attribute_definition = AttributeDefinition::builder()
            .attribute_name(&spec.partition_key.name)
            .attribute_type(to_scalar_type(spec.partition_key.scalar_type))
            .build()
            .map_err(build_error)?;

        let throughput = ProvisionedThroughput::builder()
            .read_capacity_units(spec.read_capacity_units)
            .write_capacity_units(spec.write_capacity_units)
            .build()
            .map_err(build_error)?;

        self.client
            .create_table()
            .table_name(&self.table_name)
            .key_schema(key_schema)
            .attribute_definitions(attribute_definition)
            .provisioned_throughput(throughput)
            .send()
            .await
            .map_err(map_create_table_error)?;

        Ok(())
    }

    async fn describe_table(&self) -> Result<Option<TableStatus>, ItemStoreError> {
        match self
            .client
            .describe_table()
            .table_name(&self.table_name)
            .send()
            .await
            .map_err(map_describe_table_error)
        {
            Ok(response) => Ok(Some(to_table_status(
                response.table().and_then(|table| table.table_status()),
            ))),
            Err(ItemStoreError::ResourceNotFound) => Ok(None),
            Err(err) => Err(err),
        }
    }
}
