//! Client state aggregate
//!
//! One [`ClientState`] owns every piece of mirrored server state. Handlers
//! mutate it through the router; readers outside the processing thread take
//! a [`ClientSnapshot`], which is an owned point-in-time copy.

use serde::Serialize;

use wyrdline_domain::{
    CombatState, Entity, EntityDirectory, MovementState, PartyMember, PartyRoster, PlayerState,
    ProximityEntity, ProximityRoster, ResolvedEntity, Target,
};

use crate::combat::Actor;
use crate::config::ClientSettings;

/// A character offered by `auth_success`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterChoice {
    pub id: Option<String>,
    pub name: String,
    pub level: Option<u32>,
    pub location: Option<String>,
}

/// Handshake and authentication results.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionInfo {
    pub handshake_received: bool,
    pub compatible: bool,
    pub server_version: Option<String>,
    pub protocol_version: Option<String>,
    pub requires_auth: bool,
    pub authenticated: bool,
    pub account_id: Option<String>,
    pub characters: Vec<CharacterChoice>,
    pub last_auth_error: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ClientState {
    pub(crate) directory: EntityDirectory,
    pub(crate) roster: ProximityRoster,
    pub(crate) combat: CombatState,
    pub(crate) movement: MovementState,
    pub(crate) party: PartyRoster,
    pub(crate) player: PlayerState,
    pub(crate) session: SessionInfo,
    local_name: Option<String>,
}

impl Default for ClientState {
    fn default() -> Self {
        Self::new(&ClientSettings::default())
    }
}

impl ClientState {
    pub fn new(settings: &ClientSettings) -> Self {
        Self {
            directory: EntityDirectory::new(),
            roster: ProximityRoster::with_priority(&settings.navigation_priority),
            combat: CombatState::default(),
            movement: MovementState::default(),
            party: PartyRoster::new(),
            player: PlayerState::new(),
            session: SessionInfo::default(),
            local_name: settings.local_name.clone(),
        }
    }

    pub fn directory(&self) -> &EntityDirectory {
        &self.directory
    }

    pub fn roster(&self) -> &ProximityRoster {
        &self.roster
    }

    pub fn combat(&self) -> &CombatState {
        &self.combat
    }

    pub fn movement(&self) -> &MovementState {
        &self.movement
    }

    pub fn party(&self) -> &PartyRoster {
        &self.party
    }

    pub fn player(&self) -> &PlayerState {
        &self.player
    }

    pub fn session(&self) -> &SessionInfo {
        &self.session
    }

    /// Navigation targets in channel priority order.
    pub fn entities_for_navigation(&self) -> Vec<ProximityEntity> {
        self.roster.entities_for_navigation()
    }

    /// Target whatever the player typed: a known entity if the token
    /// resolves, otherwise the raw token.
    pub fn target_by_token(&mut self, token: &str) -> Option<ResolvedEntity> {
        match self.directory.resolve(token) {
            Some(resolved) => self.directory.set_target(resolved.id.as_str()).ok(),
            None => {
                self.directory.set_target_token(token.trim());
                None
            }
        }
    }

    pub fn clear_target(&mut self) {
        self.directory.clear_target();
    }

    /// Name of the local character, from the server or from settings.
    pub fn local_name(&self) -> Option<&str> {
        self.player.name().or(self.local_name.as_deref())
    }

    /// Whether an id or name refers to the local character.
    pub fn is_local(&self, id: Option<&str>, name: Option<&str>) -> bool {
        let by_id = id.is_some_and(|id| self.player.is_local(id));
        let by_name = match (name, self.local_name()) {
            (Some(name), Some(own)) => name.trim().eq_ignore_ascii_case(own.trim()),
            _ => false,
        };
        by_id || by_name
    }

    /// Best display name for an id/name pair from a payload.
    pub fn display_name(&self, id: Option<&str>, name: Option<&str>) -> Option<String> {
        name.map(str::to_string)
            .or_else(|| id.and_then(|id| self.directory.name_of(id)).map(str::to_string))
            .or_else(|| {
                id.and_then(|id| {
                    self.roster
                        .channels()
                        .find_map(|channel| channel.get(id))
                        .map(|entity| entity.display_name().to_string())
                })
            })
            .or_else(|| id.map(str::to_string))
    }

    /// Resolve one side of a combat exchange.
    pub fn actor(&self, id: Option<&str>, name: Option<&str>) -> Option<Actor> {
        if self.is_local(id, name) {
            return Some(Actor::local());
        }
        self.display_name(id, name).map(Actor::named)
    }

    pub fn snapshot(&self) -> ClientSnapshot {
        ClientSnapshot {
            entities: self.directory.snapshot(),
            target: self.directory.target().clone(),
            navigation: self.roster.entities_for_navigation(),
            danger_state: self.roster.danger_state(),
            combat: self.combat.clone(),
            movement: self.movement.clone(),
            party: self.party.members().to_vec(),
            player: self.player.clone(),
            session: self.session.clone(),
        }
    }
}

/// Owned copy of client state for readers outside the processing thread.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientSnapshot {
    pub entities: Vec<Entity>,
    pub target: Target,
    pub navigation: Vec<ProximityEntity>,
    pub danger_state: Option<bool>,
    pub combat: CombatState,
    pub movement: MovementState,
    pub party: Vec<PartyMember>,
    pub player: PlayerState,
    pub session: SessionInfo,
}
