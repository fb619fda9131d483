//! Equipment store operations
//!
//! Every method maps one-to-one onto a DynamoDB call: scan, get-item,
//! batch-get-item, put-item, update-item, delete-item. SDK failures are
//! classified here; the conditional-check miss on updates means the key
//! does not exist and becomes `NotFound`.

use std::collections::HashMap;

use aws_sdk_dynamodb::{
    error::{DisplayErrorContext, SdkError},
    types::{AttributeValue, KeysAndAttributes, ReturnValue},
    Client,
};
use indexmap::IndexSet;
use serde_dynamo::{from_item, from_items, to_item};

use crate::{
    error::{AppError, AppResult},
    models::equipment::{Equipment, UpdateEquipment},
};

/// DynamoDB rejects more than this many keys in one batch-get request.
const BATCH_GET_LIMIT: usize = 100;

#[derive(Clone)]
pub struct EquipmentRepository {
    client: Client,
    table: String,
}

impl EquipmentRepository {
    pub fn new(client: Client, table: String) -> Self {
        Self { client, table }
    }

    fn key(id: &str) -> AttributeValue {
        AttributeValue::S(id.to_string())
    }

    /// List all equipment, draining the store's scan pagination so large
    /// tables are not silently truncated at the page limit
    pub async fn list(&self) -> AppResult<Vec<Equipment>> {
        let mut paginator = self
            .client
            .scan()
            .table_name(&self.table)
            .into_paginator()
            .send();

        let mut equipments = Vec::new();
        while let Some(page) = paginator.next().await {
            let page = page.map_err(store_error)?;
            let records: Vec<Equipment> =
                from_items(page.items.unwrap_or_default()).map_err(convert_error)?;
            equipments.extend(records);
        }
        Ok(equipments)
    }

    /// Get equipment by id
    pub async fn get(&self, id: &str) -> AppResult<Equipment> {
        let output = self
            .client
            .get_item()
            .table_name(&self.table)
            .key("id", Self::key(id))
            .send()
            .await
            .map_err(store_error)?;

        let item = output
            .item
            .ok_or_else(|| AppError::NotFound(format!("Equipment {} not found", id)))?;
        from_item(item).map_err(convert_error)
    }

    /// Fetch the records for the given ids. Requested ids are deduplicated
    /// (the store rejects duplicate keys within a single batch request) and
    /// split into requests of at most `BATCH_GET_LIMIT` keys. Absent ids
    /// are skipped, so the result holds one entry per matched distinct id.
    pub async fn batch_get(&self, ids: &[String]) -> AppResult<Vec<Equipment>> {
        let distinct = distinct_ids(ids);

        let mut equipments = Vec::with_capacity(distinct.len());
        for chunk in distinct.chunks(BATCH_GET_LIMIT) {
            let mut keys = KeysAndAttributes::builder();
            for id in chunk {
                keys = keys.keys(HashMap::from([("id".to_string(), Self::key(id))]));
            }
            let keys = keys
                .build()
                .map_err(|err| AppError::Internal(err.to_string()))?;

            let output = self
                .client
                .batch_get_item()
                .request_items(&self.table, keys)
                .send()
                .await
                .map_err(store_error)?;

            if let Some(mut responses) = output.responses {
                if let Some(items) = responses.remove(&self.table) {
                    let records: Vec<Equipment> = from_items(items).map_err(convert_error)?;
                    equipments.extend(records);
                }
            }
        }
        Ok(equipments)
    }

    /// Put the record, overwriting any existing record with the same id
    pub async fn put(&self, equipment: &Equipment) -> AppResult<()> {
        let item = to_item(equipment).map_err(convert_error)?;
        self.client
            .put_item()
            .table_name(&self.table)
            .set_item(Some(item))
            .send()
            .await
            .map_err(store_error)?;
        Ok(())
    }

    /// Overwrite the full field set of an existing record. `name` and
    /// `desc` are reserved words in update expressions and go through
    /// attribute-name placeholders. Fails with `NotFound` if the id is
    /// absent.
    pub async fn update(&self, id: &str, data: &UpdateEquipment) -> AppResult<Equipment> {
        let desc = match &data.desc {
            Some(desc) => AttributeValue::S(desc.clone()),
            None => AttributeValue::Null(true),
        };

        let output = self
            .client
            .update_item()
            .table_name(&self.table)
            .key("id", Self::key(id))
            .update_expression("SET #n = :name, #d = :desc, price = :price, quantity = :quantity")
            .condition_expression("attribute_exists(id)")
            .expression_attribute_names("#n", "name")
            .expression_attribute_names("#d", "desc")
            .expression_attribute_values(":name", AttributeValue::S(data.name.clone()))
            .expression_attribute_values(":desc", desc)
            .expression_attribute_values(":price", AttributeValue::N(data.price.to_string()))
            .expression_attribute_values(":quantity", AttributeValue::N(data.quantity.to_string()))
            .return_values(ReturnValue::AllNew)
            .send()
            .await
            .map_err(|err| not_found_or_store(err, id))?;

        let attributes = output.attributes.unwrap_or_default();
        from_item(attributes).map_err(convert_error)
    }

    /// Atomically shift the record's quantity by `delta` (negative to
    /// reserve stock, positive to release it) and return the new value.
    /// Conditional on the key existing, so adjusting an unknown id fails
    /// with `NotFound` instead of materializing a phantom record.
    pub async fn adjust_quantity(&self, id: &str, delta: i64) -> AppResult<i64> {
        let expression = if delta < 0 {
            "SET quantity = quantity - :q"
        } else {
            "SET quantity = quantity + :q"
        };

        let output = self
            .client
            .update_item()
            .table_name(&self.table)
            .key("id", Self::key(id))
            .update_expression(expression)
            .condition_expression("attribute_exists(id)")
            .expression_attribute_values(":q", AttributeValue::N(delta.unsigned_abs().to_string()))
            .return_values(ReturnValue::UpdatedNew)
            .send()
            .await
            .map_err(|err| not_found_or_store(err, id))?;

        output
            .attributes
            .unwrap_or_default()
            .get("quantity")
            .and_then(|value| value.as_n().ok())
            .and_then(|n| n.parse().ok())
            .ok_or_else(|| AppError::Store(format!("store returned no quantity for {}", id)))
    }

    /// Delete by id; deleting an absent id still succeeds
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        self.client
            .delete_item()
            .table_name(&self.table)
            .key("id", Self::key(id))
            .send()
            .await
            .map_err(store_error)?;
        Ok(())
    }

    /// Cheap reachability probe used by the readiness endpoint
    pub async fn ping(&self) -> AppResult<()> {
        self.client
            .describe_table()
            .table_name(&self.table)
            .send()
            .await
            .map_err(store_error)?;
        Ok(())
    }
}

/// Deduplicate ids preserving first-occurrence order
fn distinct_ids(ids: &[String]) -> Vec<String> {
    ids.iter()
        .collect::<IndexSet<_>>()
        .into_iter()
        .cloned()
        .collect()
}

fn store_error<E>(err: SdkError<E>) -> AppError
where
    E: std::error::Error + Send + Sync + 'static,
{
    AppError::Store(DisplayErrorContext(&err).to_string())
}

fn convert_error(err: serde_dynamo::Error) -> AppError {
    AppError::Internal(format!("stored item does not match the equipment schema: {}", err))
}

/// A conditional-check failure on a keyed update means the id is absent
fn not_found_or_store<E>(err: SdkError<E>, id: &str) -> AppError
where
    E: std::error::Error + ConditionalCheck + Send + Sync + 'static,
{
    if err
        .as_service_error()
        .is_some_and(ConditionalCheck::is_conditional_check_failed)
    {
        AppError::NotFound(format!("Equipment {} not found", id))
    } else {
        store_error(err)
    }
}

/// Unifies the per-operation SDK error types over the one case the
/// repository needs to tell apart
trait ConditionalCheck {
    fn is_conditional_check_failed(&self) -> bool;
}

impl ConditionalCheck for aws_sdk_dynamodb::operation::update_item::UpdateItemError {
    fn is_conditional_check_failed(&self) -> bool {
        self.is_conditional_check_failed_exception()
    }
}
