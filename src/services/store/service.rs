use std::collections::HashSet;
use std::path::PathBuf;

use chrono::{DateTime, Local};

use crate::models::event::{CountMode, CountdownEvent, EventId};
use crate::utils::date::add_one_year;

use super::persistence::{load_snapshot, save_snapshot, StoredEvents};

/// Owns the in-memory event collection and its on-disk snapshot.
///
/// All mutation happens through this struct on one thread; readers only ever
/// see borrowed slices. Every operation is total: load failures degrade to an
/// empty collection and save failures are logged and absorbed, leaving the
/// in-memory state authoritative.
pub struct EventStore {
    events: Vec<CountdownEvent>,
    next_id: u64,
    dirty: bool,
    path: PathBuf,
}

impl EventStore {
    /// Open the store backed by `path`. A missing file starts empty; a
    /// corrupt file is logged and treated as empty.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let snapshot = match load_snapshot(&path) {
            Ok(snapshot) => snapshot,
            Err(err) => {
                log::warn!(
                    "open: could not load events from {}: {err:#}; starting empty",
                    path.display()
                );
                StoredEvents::default()
            }
        };
        Self::from_snapshot(snapshot, path)
    }

    pub fn from_snapshot(snapshot: StoredEvents, path: impl Into<PathBuf>) -> Self {
        // Ids must never be reused, even from a snapshot whose counter lags
        // behind its own records.
        let max_id = snapshot.events.iter().map(|event| event.id.0).max();
        let next_id = snapshot.next_id.max(max_id.map_or(1, |id| id + 1));

        let mut store = Self {
            events: snapshot.events,
            next_id,
            dirty: false,
            path: path.into(),
        };
        store.sort_events();
        store
    }

    /// Snapshot of the current state for serialization.
    pub fn snapshot(&self) -> StoredEvents {
        StoredEvents {
            next_id: self.next_id,
            events: self.events.clone(),
        }
    }

    /// Events, newest first by creation time.
    pub fn events(&self) -> &[CountdownEvent] {
        &self.events
    }

    pub fn event(&self, id: EventId) -> Option<&CountdownEvent> {
        self.events.iter().find(|event| event.id == id)
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Create an event and persist. The title is assumed to be normalized at
    /// the edit boundary.
    pub fn create(
        &mut self,
        title: impl Into<String>,
        target_at: DateTime<Local>,
        mode: CountMode,
        image_id: impl Into<String>,
        custom_image: Option<Vec<u8>>,
    ) -> EventId {
        let now = Local::now();
        let id = EventId(self.next_id);
        self.next_id += 1;
        let event = CountdownEvent {
            id,
            title: title.into(),
            target_at,
            mode,
            created_at: now,
            updated_at: now,
            image_id: image_id.into(),
            custom_image,
        };
        log::info!("create: added event {:?} ({})", id, event.title);
        self.events.push(event);
        self.sort_events();
        self.dirty = true;
        self.persist();
        id
    }

    /// Rewrite an event in place, stamping `updated_at`. Returns false when
    /// the id is absent.
    pub fn update(
        &mut self,
        id: EventId,
        title: impl Into<String>,
        target_at: DateTime<Local>,
        mode: CountMode,
        image_id: impl Into<String>,
        custom_image: Option<Vec<u8>>,
    ) -> bool {
        if let Some(event) = self.events.iter_mut().find(|event| event.id == id) {
            event.title = title.into();
            event.target_at = target_at;
            event.mode = mode;
            event.image_id = image_id.into();
            event.custom_image = custom_image;
            event.updated_at = Local::now();
            self.sort_events();
            self.dirty = true;
            self.persist();
            return true;
        }
        log::warn!("update: event {:?} not found", id);
        false
    }

    /// Remove every event whose id is in `ids`. Returns the removed count.
    pub fn delete(&mut self, ids: &HashSet<EventId>) -> usize {
        if ids.is_empty() {
            return 0;
        }
        let before = self.events.len();
        self.events.retain(|event| !ids.contains(&event.id));
        let removed = before - self.events.len();
        if removed > 0 {
            log::info!("delete: removed {removed} event(s)");
            self.dirty = true;
            self.persist();
        }
        removed
    }

    /// Advance every overdue countdown target by whole years until it lies
    /// beyond `now`, stamping `updated_at = now` on each changed event.
    /// Persists only when something changed; calling again with the same
    /// `now` is a no-op.
    pub fn rollover_pass(&mut self, now: DateTime<Local>) -> bool {
        let mut changed = false;
        for event in &mut self.events {
            if event.mode != CountMode::Countdown {
                continue;
            }
            if event.target_at > now {
                continue;
            }

            let mut next_target = event.target_at;
            while next_target <= now {
                next_target = add_one_year(next_target);
            }

            if next_target != event.target_at {
                log::info!(
                    "rollover: event {:?} ({}) advanced to {}",
                    event.id,
                    event.title,
                    next_target
                );
                event.target_at = next_target;
                event.updated_at = now;
                changed = true;
            }
        }

        if changed {
            self.sort_events();
            self.dirty = true;
            self.persist();
        }
        changed
    }

    /// Best-effort save of the full snapshot. Failures are logged and leave
    /// the dirty flag set so the next mutation retries.
    fn persist(&mut self) {
        let snapshot = self.snapshot();
        match save_snapshot(&self.path, &snapshot) {
            Ok(()) => self.dirty = false,
            Err(err) => {
                log::warn!("persist: could not save events to {}: {err:#}", self.path.display());
            }
        }
    }

    fn sort_events(&mut self) {
        self.events
            .sort_by(|a, b| b.created_at.cmp(&a.created_at));
    }
}
