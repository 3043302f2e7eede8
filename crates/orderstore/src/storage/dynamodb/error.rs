//! DynamoDB error mapping.
//!
//! Maps AWS SDK errors to [`ItemStoreError`]. Only the conditional-check,
//! missing-table and table-in-use signals get their own variants; everything
//! else is reported as a service fault with the SDK's description.

use std::fmt::Debug;

use aws_sdk_dynamodb::error::SdkError;
use aws_sdk_dynamodb::operation::create_table::CreateTableError;
use aws_sdk_dynamodb::operation::delete_item::DeleteItemError;
use aws_sdk_dynamodb::operation::describe_table::DescribeTableError;
use aws_sdk_dynamodb::operation::get_item::GetItemError;
use aws_sdk_dynamodb::operation::put_item::PutItemError;
use aws_sdk_dynamodb::operation::scan::ScanError;
use aws_sdk_dynamodb::operation::update_item::UpdateItemError;

use crate::storage::ItemStoreError;

fn throughput_exceeded() -> ItemStoreError {
    ItemStoreError::Service("Throughput exceeded, please retry".to_string())
}

fn request_limit_exceeded() -> ItemStoreError {
    ItemStoreError::Service("Request limit exceeded, please retry".to_string())
}

fn internal_server_error() -> ItemStoreError {
    ItemStoreError::Service("DynamoDB internal server error".to_string())
}

/// Map a GetItem SDK error to ItemStoreError.
pub fn map_get_item_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<GetItemError, R>,
) -> ItemStoreError {
    match err.into_service_error() {
        GetItemError::ResourceNotFoundException(_) => ItemStoreError::ResourceNotFound,
        GetItemError::ProvisionedThroughputExceededException(_) => throughput_exceeded(),
        GetItemError::RequestLimitExceeded(_) => request_limit_exceeded(),
        GetItemError::InternalServerError(_) => internal_server_error(),
        err => ItemStoreError::Service(format!("GetItem failed: {:?}", err)),
    }
}

/// Map a PutItem SDK error to ItemStoreError.
pub fn map_put_item_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<PutItemError, R>,
) -> ItemStoreError {
    match err.into_service_error() {
        PutItemError::ConditionalCheckFailedException(_) => ItemStoreError::ConditionalCheckFailed,
        PutItemError::ResourceNotFoundException(_) => ItemStoreError::ResourceNotFound,
        PutItemError::ProvisionedThroughputExceededException(_) => throughput_exceeded(),
        PutItemError::RequestLimitExceeded(_) => request_limit_exceeded(),
        PutItemError::TransactionConflictException(_) => {
            ItemStoreError::Service("Transaction conflict, please retry".to_string())
        }
        PutItemError::InternalServerError(_) => internal_server_error(),
        err => ItemStoreError::Service(format!("PutItem failed: {:?}", err)),
    }
}

/// Map an UpdateItem SDK error to ItemStoreError.
pub fn map_update_item_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<UpdateItemError, R>,
) -> ItemStoreError {
    match err.into_service_error() {
        UpdateItemError::ConditionalCheckFailedException(_) => {
            ItemStoreError::ConditionalCheckFailed
        }
        UpdateItemError::ResourceNotFoundException(_) => ItemStoreError::ResourceNotFound,
        UpdateItemError::ProvisionedThroughputExceededException(_) => throughput_exceeded(),
        UpdateItemError::RequestLimitExceeded(_) => request_limit_exceeded(),
        UpdateItemError::TransactionConflictException(_) => {
            ItemStoreError::Service("Transaction conflict, please retry".to_string())
        }
        UpdateItemError::InternalServerError(_) => internal_server_error(),
        err => ItemStoreError::Service(format!("UpdateItem failed: {:?}", err)),
    }
}

/// Map a DeleteItem SDK error to ItemStoreError.
pub fn map_delete_item_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<DeleteItemError, R>,
) -> ItemStoreError {
    match err.into_service_error() {
        DeleteItemError::ConditionalCheckFailedException(_) => {
            ItemStoreError::ConditionalCheckFailed
        }
        DeleteItemError::ResourceNotFoundException(_) => ItemStoreError::ResourceNotFound,
        DeleteItemError::ProvisionedThroughputExceededException(_) => throughput_exceeded(),
        DeleteItemError::RequestLimitExceeded(_) => request_limit_exceeded(),
        DeleteItemError::TransactionConflictException(_) => {
            ItemStoreError::Service("Transaction conflict, please retry".to_string())
        }
        DeleteItemError::InternalServerError(_) => internal_server_error(),
        err => ItemStoreError::Service(format!("DeleteItem failed: {:?}", err)),
    }
}

/// Map a Scan SDK error to ItemStoreError.
pub fn map_scan_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<ScanError, R>,
) -> ItemStoreError {
    match err.into_service_error() {
        ScanError::ResourceNotFoundException(_) => ItemStoreError::ResourceNotFound,
        ScanError::ProvisionedThroughputExceededException(_) => throughput_exceeded(),
        ScanError::RequestLimitExceeded(_) => request_limit_exceeded(),
        ScanError::InternalServerError(_) => internal_server_error(),
        err => ItemStoreError::Service(format!("Scan failed: {:?}", err)),
    }
}

/// Map a CreateTable SDK error to ItemStoreError.
pub fn map_create_table_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<CreateTableError, R>,
) -> ItemStoreError {
    match err.into_service_error() {
        CreateTableError::ResourceInUseException(_) => ItemStoreError::ResourceInUse,
        CreateTableError::LimitExceededException(_) => {
            ItemStoreError::Service("Table limit exceeded".to_string())
        }
        CreateTableError::InternalServerError(_) => internal_server_error(),
        err => ItemStoreError::Service(format!("CreateTable failed: {:?}", err)),
    }
}

/// Map a DescribeTable SDK error to ItemStoreError.
pub fn map_describe_table_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<DescribeTableError, R>,
) -> ItemStoreError {
    match err.into_service_error() {
        DescribeTableError::ResourceNotFoundException(_) => ItemStoreError::ResourceNotFound,
        DescribeTableError::InternalServerError(_) => internal_server_error(),
        err => ItemStoreError::Service(format!("DescribeTable failed: {:?}", err)),
    }
}
