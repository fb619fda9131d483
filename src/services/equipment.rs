//! Equipment service

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::equipment::{CreateEquipment, Equipment, UpdateEquipment},
    repository::Repository,
};

#[derive(Clone)]
pub struct EquipmentService {
    repository: Repository,
}

impl EquipmentService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<Equipment>> {
        self.repository.equipment.list().await
    }

    pub async fn get_by_id(&self, id: &str) -> AppResult<Equipment> {
        self.repository.equipment.get(id).await
    }

    /// Fetch the records for a comma-separated id list
    pub async fn get_by_ids(&self, raw_ids: &str) -> AppResult<Vec<Equipment>> {
        let ids = parse_ids(raw_ids)?;
        self.repository.equipment.batch_get(&ids).await
    }

    /// Create a record keyed by the client-supplied id. An existing record
    /// with the same id is overwritten (upsert)
    pub async fn create(&self, data: CreateEquipment) -> AppResult<String> {
        data.validate()
            .map_err(|err| AppError::Validation(err.to_string()))?;
        let equipment = data.into_equipment();
        let id = equipment.id.clone();
        self.repository.equipment.put(&equipment).await?;
        Ok(id)
    }

    /// Overwrite the full field set of an existing record
    pub async fn update(&self, id: &str, data: &UpdateEquipment) -> AppResult<Equipment> {
        data.validate()
            .map_err(|err| AppError::Validation(err.to_string()))?;
        self.repository.equipment.update(id, data).await
    }

    pub async fn delete(&self, id: &str) -> AppResult<()> {
        self.repository.equipment.delete(id).await
    }

    /// Store reachability, for the readiness probe
    pub async fn ping(&self) -> AppResult<()> {
        self.repository.equipment.ping().await
    }
}

/// Split a comma-separated id list, dropping empty segments
fn parse_ids(raw: &str) -> AppResult<Vec<String>> {
    let ids: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(String::from)
        .collect();

    if ids.is_empty() {
        return Err(AppError::Validation("no equipment ids supplied".to_string()));
    }
    Ok(ids)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_ids_splits_on_commas() {
        assert_eq!(parse_ids("a,b,c").unwrap(), vec!["a", "b", "c"]);
    }

    #[test]
    fn parse_ids_trims_and_drops_empty_segments() {
        assert_eq!(parse_ids(" a , ,b,").unwrap(), vec!["a", "b"]);
    }

    #[test]
    fn parse_ids_keeps_duplicates_for_the_store_layer() {
        assert_eq!(parse_ids("a,a,b").unwrap(), vec!["a", "a", "b"]);
    }

    #[test]
    fn parse_ids_rejects_blank_input() {
        assert!(matches!(parse_ids("  "), Err(AppError::Validation(_))));
        assert!(matches!(parse_ids(","), Err(AppError::Validation(_))));
    }
}
