//! Party aggregate - the local player's group
//!
//! Membership is driven by `party_*` events and replaced wholesale by a
//! `command_response` listing. Ally status from `state_update` only patches
//! members already present.

use serde::Serialize;

use crate::common::prefer_non_blank;
use crate::value_objects::Gauge;
use crate::EntityId;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PartyMember {
    pub id: EntityId,
    pub name: String,
    pub leader: bool,
    pub atb: Option<Gauge>,
    pub stamina_pct: Option<f64>,
    pub mana_pct: Option<f64>,
}

impl PartyMember {
    pub fn new(id: EntityId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            leader: false,
            atb: None,
            stamina_pct: None,
            mana_pct: None,
        }
    }

    pub fn as_leader(mut self) -> Self {
        self.leader = true;
        self
    }

    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            self.id.as_str()
        } else {
            &self.name
        }
    }
}

/// Per-ally status carried by `state_update.allies`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AllyStatus {
    pub atb: Option<Gauge>,
    pub stamina_pct: Option<f64>,
    pub mana_pct: Option<f64>,
}

/// An invitation waiting for the player to accept or decline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PartyInvite {
    pub from_id: Option<String>,
    pub from_name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PartyRoster {
    members: Vec<PartyMember>,
    pending_invite: Option<PartyInvite>,
}

impl PartyRoster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the member list. The first member flagged as leader keeps the
    /// flag; any later ones are demoted.
    pub fn replace(&mut self, members: impl IntoIterator<Item = PartyMember>) {
        self.members.clear();
        for member in members {
            self.add(member);
        }
    }

    /// Add or merge a member. Returns `true` if the member is new.
    pub fn add(&mut self, mut member: PartyMember) -> bool {
        if member.leader && self.leader().is_some_and(|l| l.id != member.id) {
            member.leader = false;
        }
        match self.members.iter_mut().find(|m| m.id == member.id) {
            Some(existing) => {
                existing.name = prefer_non_blank(member.name, &existing.name);
                existing.leader = existing.leader || member.leader;
                existing.atb = member.atb.or(existing.atb);
                existing.stamina_pct = member.stamina_pct.or(existing.stamina_pct);
                existing.mana_pct = member.mana_pct.or(existing.mana_pct);
                false
            }
            None => {
                self.members.push(member);
                true
            }
        }
    }

    pub fn remove(&mut self, id: &str) -> Option<PartyMember> {
        let index = self.members.iter().position(|m| m.id.matches(id))?;
        Some(self.members.remove(index))
    }

    /// Move leadership to `id`. Returns `false` when `id` is not a member.
    pub fn set_leader(&mut self, id: &str) -> bool {
        if !self.contains(id) {
            return false;
        }
        for member in &mut self.members {
            member.leader = member.id.matches(id);
        }
        true
    }

    /// Patch status for a known ally. Unknown ids are ignored.
    pub fn update_ally(&mut self, id: &str, status: AllyStatus) -> bool {
        let Some(member) = self.members.iter_mut().find(|m| m.id.matches(id)) else {
            return false;
        };
        if status.atb.is_some() {
            member.atb = status.atb;
        }
        if status.stamina_pct.is_some() {
            member.stamina_pct = status.stamina_pct;
        }
        if status.mana_pct.is_some() {
            member.mana_pct = status.mana_pct;
        }
        true
    }

    /// Drop every member and any pending invite.
    pub fn disband(&mut self) {
        self.members.clear();
        self.pending_invite = None;
    }

    pub fn set_pending_invite(&mut self, invite: PartyInvite) {
        self.pending_invite = Some(invite);
    }

    pub fn pending_invite(&self) -> Option<&PartyInvite> {
        self.pending_invite.as_ref()
    }

    pub fn take_pending_invite(&mut self) -> Option<PartyInvite> {
        self.pending_invite.take()
    }

    pub fn members(&self) -> &[PartyMember] {
        &self.members
    }

    pub fn get(&self, id: &str) -> Option<&PartyMember> {
        self.members.iter().find(|m| m.id.matches(id))
    }

    pub fn leader(&self) -> Option<&PartyMember> {
        self.members.iter().find(|m| m.leader)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}
