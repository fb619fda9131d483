//! Repository layer for DynamoDB operations

pub mod equipment;

use aws_sdk_dynamodb::Client;

/// Main repository struct holding the injected store client. The client
/// is constructed once at startup and shared by every request.
#[derive(Clone)]
pub struct Repository {
    pub equipment: equipment::EquipmentRepository,
}

impl Repository {
    /// Create a new repository over the given client and table
    pub fn new(client: Client, table: String) -> Self {
        Self {
            equipment: equipment::EquipmentRepository::new(client, table),
        }
    }
}
