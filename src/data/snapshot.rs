use std::sync::Arc;
use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer};
use crate::data::aircraft::AircraftEntity;
use crate::data::state_vector::RawStateVector;
use crate::errors::FeedError;

/// Response body of the state vector endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct StatesPayload {
    #[serde(default)]
    pub time: Option<i64>,                      // Time of data receipt, unix seconds

    #[serde(deserialize_with = "nullable_states")]
    pub states: Vec<RawStateVector>             // All state vectors; null when nothing is tracked
}

fn nullable_states<'de, D>(deserializer: D) -> Result<Vec<RawStateVector>, D::Error>
    where D: Deserializer<'de>
{
    Ok(Option::<Vec<RawStateVector>>::deserialize(deserializer)?.unwrap_or_default())
}

impl StatesPayload {
    pub fn from_json(data: &str) -> Result<Self, FeedError> {
        serde_json::from_str(data)
            .map_err(|e| FeedError::MalformedPayload(e.to_string()))
    }
}

/// The entity set produced by one refresh cycle. Clones share the same entity list, and two
/// snapshots are the same snapshot only if they share it.
#[derive(Debug, Clone)]
pub struct Snapshot {
    time: Option<DateTime<Utc>>,
    entities: Arc<Vec<AircraftEntity>>
}

impl Snapshot {
    pub fn empty() -> Self {
        Self { time: None, entities: Arc::new(vec![]) }
    }

    /// Parses every state vector, keeping the valid ones in source order.
    pub fn transform(payload: &StatesPayload) -> Self {
        let entities = payload.states.iter()
            .filter_map(AircraftEntity::parse)
            .collect::<Vec<_>>();

        Self {
            time: payload.time.and_then(|t| Utc.timestamp_opt(t, 0).single()),
            entities: Arc::new(entities)
        }
    }

    pub fn time(&self) -> Option<DateTime<Utc>> {
        self.time
    }

    pub fn entities(&self) -> &[AircraftEntity] {
        &self.entities
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn is_same(&self, other: &Snapshot) -> bool {
        Arc::ptr_eq(&self.entities, &other.entities)
    }
}

impl From<Vec<AircraftEntity>> for Snapshot {
    fn from(entities: Vec<AircraftEntity>) -> Self {
        Self { time: None, entities: Arc::new(entities) }
    }
}
