//! Entity Directory - canonical table of known entities
//!
//! Holds every [`Entity`] the client has been told about, keyed by
//! case-insensitive id, with a secondary name index used to resolve what the
//! player types ("attack warden") into an id.
//!
//! # Invariants
//!
//! - Upserts never clear a field by omission (see [`Entity::fill_from`]).
//! - Removing the targeted entity clears the target; nothing else does.
//! - A display name maps to the entity that most recently registered it.
//!   Older owners of a reused name are only reachable by id.

use std::collections::HashMap;

use serde::Serialize;

use crate::entities::Entity;
use crate::{DomainError, EntityId};

/// An id/name pair returned by [`EntityDirectory::resolve`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedEntity {
    pub id: EntityId,
    pub name: String,
}

/// What the player currently has targeted.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Target {
    #[default]
    None,
    /// A directory entity
    Entity(ResolvedEntity),
    /// A raw token the directory could not resolve (yet)
    Token { token: String },
}

#[derive(Debug, Clone, Default)]
pub struct EntityDirectory {
    entities: HashMap<EntityId, Entity>,
    /// Insertion order, for stable snapshots
    order: Vec<EntityId>,
    /// Lower-cased display name -> owning id
    names: HashMap<String, EntityId>,
    target: Target,
}

fn name_key(name: &str) -> Option<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_lowercase())
    }
}

impl EntityDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole directory with `entities`.
    ///
    /// The target survives only if its entity is part of the new set.
    pub fn reset(&mut self, entities: impl IntoIterator<Item = Entity>) {
        self.entities.clear();
        self.order.clear();
        self.names.clear();
        for entity in entities {
            self.upsert(entity);
        }

        let target_gone = match &self.target {
            Target::Entity(resolved) => !self.entities.contains_key(&resolved.id),
            Target::None | Target::Token { .. } => false,
        };
        if target_gone {
            self.clear_target();
        }
    }

    /// Insert or merge an entity. Returns `true` if it was not known before.
    pub fn upsert(&mut self, incoming: Entity) -> bool {
        let id = incoming.id.clone();
        let existing = self.entities.get(&id).cloned();
        let is_new = existing.is_none();
        let merged = match &existing {
            Some(existing) => {
                let merged = incoming.fill_from(existing);
                if !existing.name.eq_ignore_ascii_case(&merged.name) {
                    self.release_name(&existing.name, &id);
                }
                merged
            }
            None => incoming,
        };

        if let Some(key) = name_key(&merged.name) {
            self.names.insert(key, id.clone());
        }
        if let Target::Entity(resolved) = &mut self.target {
            if resolved.id == id {
                resolved.name = merged.display_name().to_string();
            }
        }
        if is_new {
            self.order.push(id.clone());
        }
        self.entities.insert(id, merged);
        is_new
    }

    /// Forget an entity. Clears the target if it pointed at it.
    pub fn remove(&mut self, id: &str) -> Option<Entity> {
        let key = EntityId::new(id).ok()?;
        let removed = self.entities.remove(&key)?;

        self.order.retain(|known| known != &key);
        self.release_name(&removed.name, &key);
        if matches!(&self.target, Target::Entity(resolved) if resolved.id == key) {
            self.clear_target();
        }
        Some(removed)
    }

    /// Resolve a token typed by the player: exact id first, then name.
    pub fn resolve(&self, token: &str) -> Option<ResolvedEntity> {
        let trimmed = token.trim();
        if trimmed.is_empty() {
            return None;
        }

        let by_id = EntityId::new(trimmed)
            .ok()
            .and_then(|id| self.entities.get(&id));
        let entity = by_id.or_else(|| {
            name_key(trimmed)
                .and_then(|key| self.names.get(&key))
                .and_then(|id| self.entities.get(id))
        })?;

        Some(ResolvedEntity {
            id: entity.id.clone(),
            name: entity.display_name().to_string(),
        })
    }

    /// Target a known entity by id.
    pub fn set_target(&mut self, id: &str) -> Result<ResolvedEntity, DomainError> {
        let resolved = self
            .get(id)
            .map(|entity| ResolvedEntity {
                id: entity.id.clone(),
                name: entity.display_name().to_string(),
            })
            .ok_or_else(|| DomainError::not_found("Entity", id))?;

        self.target = Target::Entity(resolved.clone());
        Ok(resolved)
    }

    /// Target a raw token that has no resolved id.
    pub fn set_target_token(&mut self, token: impl Into<String>) {
        let token = token.into();
        if token.trim().is_empty() {
            self.clear_target();
        } else {
            self.target = Target::Token { token };
        }
    }

    pub fn clear_target(&mut self) {
        self.target = Target::None;
    }

    pub fn target(&self) -> &Target {
        &self.target
    }

    pub fn target_id(&self) -> Option<&EntityId> {
        match &self.target {
            Target::Entity(resolved) => Some(&resolved.id),
            Target::None | Target::Token { .. } => None,
        }
    }

    pub fn get(&self, id: &str) -> Option<&Entity> {
        EntityId::new(id).ok().and_then(|key| self.entities.get(&key))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Display name for an id, if known.
    pub fn name_of(&self, id: &str) -> Option<&str> {
        self.get(id).map(Entity::display_name)
    }

    /// Entities in the order they were first seen.
    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.order.iter().filter_map(|id| self.entities.get(id))
    }

    /// Owned copy for readers outside the processing thread.
    pub fn snapshot(&self) -> Vec<Entity> {
        self.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    fn release_name(&mut self, name: &str, owner: &EntityId) {
        if let Some(key) = name_key(name) {
            if self.names.get(&key) == Some(owner) {
                self.names.remove(&key);
            }
        }
    }
}
