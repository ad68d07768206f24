//! Authoritative trendline collection.
//!
//! Every mutation is persisted synchronously and then announced to
//! subscribers. A failed write is logged and counted; the in-memory
//! collection stays the source of truth for the running session.

mod id;

use std::fmt;

use indexmap::IndexMap;
use tracing::{debug, warn};

use crate::core::{DataPoint, Trendline, TrendlineId};
use crate::error::{ChartError, ChartResult};
use crate::persistence::TrendlinePersistence;

use id::TrendlineIdGenerator;

/// Mutation announced to subscribers after it has been applied and persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreChange {
    Created(TrendlineId),
    Updated(TrendlineId),
    Deleted(TrendlineId),
    Cleared,
}

/// Observer of store mutations (re-render triggers, summary panels, ...).
pub trait StoreSubscriber {
    fn id(&self) -> &str;
    fn on_change(&mut self, change: &StoreChange, trendlines: &[Trendline]);
}

pub struct TrendlineStore {
    trendlines: IndexMap<TrendlineId, Trendline>,
    persistence: TrendlinePersistence,
    subscribers: Vec<Box<dyn StoreSubscriber>>,
    ids: TrendlineIdGenerator,
    failed_saves: usize,
}

impl fmt::Debug for TrendlineStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TrendlineStore")
            .field("trendlines", &self.trendlines.len())
            .field("persistence", &self.persistence)
            .field("subscribers", &self.subscribers.len())
            .field("failed_saves", &self.failed_saves)
            .finish()
    }
}

impl TrendlineStore {
    /// Opens the store and loads the persisted collection once.
    ///
    /// Persisted entries are re-ordered by time; duplicate ids keep the
    /// first occurrence.
    #[must_use]
    pub fn open(persistence: TrendlinePersistence) -> Self {
        let mut trendlines = IndexMap::new();
        for trendline in persistence.load() {
            let trendline = trendline.normalized();
            if trendlines.contains_key(trendline.id()) {
                warn!(id = %trendline.id(), "dropping duplicate persisted trendline id");
                continue;
            }
            trendlines.insert(trendline.id().clone(), trendline);
        }
        debug!(count = trendlines.len(), "opened trendline store");

        Self {
            trendlines,
            persistence,
            subscribers: Vec::new(),
            ids: TrendlineIdGenerator::from_entropy(),
            failed_saves: 0,
        }
    }

    /// Makes id suffixes and palette picks reproducible.
    #[must_use]
    pub fn with_rng_seed(mut self, seed: u64) -> Self {
        self.ids = TrendlineIdGenerator::seeded(seed);
        self
    }

    /// Creates a trendline from two points in any order.
    ///
    /// Non-finite points are rejected before anything is stored.
    pub fn create(&mut self, a: DataPoint, b: DataPoint) -> ChartResult<Trendline> {
        let (a, b) = (a.validate()?, b.validate()?);
        let mut id = self.ids.next_id();
        while self.trendlines.contains_key(&id) {
            id = self.ids.next_id();
        }
        let trendline = Trendline::new(id.clone(), a, b, self.ids.next_color());
        self.trendlines.insert(id.clone(), trendline.clone());
        debug!(id = %id, count = self.trendlines.len(), "created trendline");
        self.commit(StoreChange::Created(id));
        Ok(trendline)
    }

    /// Replaces a trendline's geometry in place, keeping collection order.
    pub fn update(&mut self, id: &str, a: DataPoint, b: DataPoint) -> ChartResult<Trendline> {
        let (a, b) = (a.validate()?, b.validate()?);
        let entry = self
            .trendlines
            .get_mut(id)
            .ok_or_else(|| ChartError::NotFound { id: id.to_owned() })?;
        *entry = entry.with_points(a, b);
        let updated = entry.clone();
        self.commit(StoreChange::Updated(updated.id().clone()));
        Ok(updated)
    }

    /// Removes a trendline. Returns `false` (and does nothing) when absent.
    pub fn delete(&mut self, id: &str) -> bool {
        let Some(removed) = self.trendlines.shift_remove(id) else {
            return false;
        };
        debug!(id = %removed.id(), count = self.trendlines.len(), "deleted trendline");
        self.commit(StoreChange::Deleted(removed.id().clone()));
        true
    }

    pub fn clear(&mut self) {
        self.trendlines.clear();
        debug!("cleared trendlines");
        self.commit(StoreChange::Cleared);
    }

    /// Snapshot in insertion order.
    #[must_use]
    pub fn list(&self) -> Vec<Trendline> {
        self.trendlines.values().cloned().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Trendline> {
        self.trendlines.values()
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Trendline> {
        self.trendlines.get(id)
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.trendlines.contains_key(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.trendlines.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.trendlines.is_empty()
    }

    /// Number of persistence writes that failed since the store was opened.
    #[must_use]
    pub fn failed_saves(&self) -> usize {
        self.failed_saves
    }

    #[must_use]
    pub fn persistence(&self) -> &TrendlinePersistence {
        &self.persistence
    }

    /// Registers a subscriber with unique identifier.
    pub fn subscribe(&mut self, subscriber: Box<dyn StoreSubscriber>) -> ChartResult<()> {
        let subscriber_id = subscriber.id().to_owned();
        if subscriber_id.is_empty() {
            return Err(ChartError::InvalidData(
                "subscriber id must not be empty".to_owned(),
            ));
        }
        if self
            .subscribers
            .iter()
            .any(|entry| entry.id() == subscriber_id)
        {
            return Err(ChartError::InvalidData(format!(
                "subscriber with id `{subscriber_id}` is already registered"
            )));
        }
        self.subscribers.push(subscriber);
        Ok(())
    }

    /// Unregisters a subscriber by id. Returns `true` when removed.
    pub fn unsubscribe(&mut self, subscriber_id: &str) -> bool {
        if let Some(position) = self
            .subscribers
            .iter()
            .position(|entry| entry.id() == subscriber_id)
        {
            self.subscribers.remove(position);
            return true;
        }
        false
    }

    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    fn commit(&mut self, change: StoreChange) {
        let snapshot = self.list();
        if let Err(err) = self.persistence.save(&snapshot) {
            self.failed_saves += 1;
            warn!(
                error = %err,
                key = self.persistence.key(),
                "failed to persist trendlines; keeping in-memory state"
            );
        }
        for subscriber in &mut self.subscribers {
            subscriber.on_change(&change, &snapshot);
        }
    }
}
