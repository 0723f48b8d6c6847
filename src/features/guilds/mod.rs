//! # Guild Registry
//!
//! Per-guild configuration: designated check-in channels and the manager
//! authorization sets. Entries are created lazily on first touch and live
//! for the process lifetime. The registry is an injectable store rather
//! than ambient global state so tests can construct isolated instances.

use dashmap::DashMap;
use serenity::model::id::{ChannelId, GuildId, RoleId, UserId};

use crate::features::checkin::mentions::{MemberDirectory, MentionToken};

#[derive(Debug, Default)]
struct GuildEntry {
    checkin_channels: Vec<ChannelId>,
    manager_roles: Vec<RoleId>,
    manager_members: Vec<UserId>,
}

/// Process-wide registry of per-guild configuration.
#[derive(Debug, Default)]
pub struct GuildRegistry {
    entries: DashMap<GuildId, GuildEntry>,
}

impl GuildRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the guild's designated check-in channels.
    pub fn set_checkin_channels(&self, guild: GuildId, channels: Vec<ChannelId>) {
        self.entries.entry(guild).or_default().checkin_channels = channels;
    }

    /// The guild's designated check-in channels.
    pub fn checkin_channels(&self, guild: GuildId) -> Vec<ChannelId> {
        self.entries
            .entry(guild)
            .or_default()
            .checkin_channels
            .clone()
    }

    pub fn has_checkin_channels(&self, guild: GuildId) -> bool {
        !self
            .entries
            .entry(guild)
            .or_default()
            .checkin_channels
            .is_empty()
    }

    /// Add the mentioned roles and members to the guild's manager sets.
    ///
    /// Role tokens become manager roles, user tokens become manager members.
    /// Tokens referencing roles/members absent from the directory are
    /// dropped. Idempotent: adding an id twice has no additional effect.
    /// Returns (roles added, members added).
    pub fn add_managers(
        &self,
        guild: GuildId,
        tokens: &[MentionToken],
        directory: &dyn MemberDirectory,
    ) -> (usize, usize) {
        let mut entry = self.entries.entry(guild).or_default();
        let mut roles_added = 0;
        let mut members_added = 0;
        for token in tokens {
            match *token {
                MentionToken::Role(role) => {
                    if directory.role_exists(role) && !entry.manager_roles.contains(&role) {
                        entry.manager_roles.push(role);
                        roles_added += 1;
                    }
                }
                MentionToken::User(user) => {
                    if directory.member_exists(user) && !entry.manager_members.contains(&user) {
                        entry.manager_members.push(user);
                        members_added += 1;
                    }
                }
            }
        }
        (roles_added, members_added)
    }

    /// The guild's manager roles and members, in insertion order.
    pub fn managers(&self, guild: GuildId) -> (Vec<RoleId>, Vec<UserId>) {
        let entry = self.entries.entry(guild).or_default();
        (entry.manager_roles.clone(), entry.manager_members.clone())
    }

    /// Whether the actor may perform privileged configuration commands.
    ///
    /// True iff the actor has the administrator permission, holds any
    /// manager role, or is an explicit manager member.
    pub fn is_manager(
        &self,
        guild: GuildId,
        user: UserId,
        user_roles: &[RoleId],
        is_administrator: bool,
    ) -> bool {
        if is_administrator {
            return true;
        }
        let entry = self.entries.entry(guild).or_default();
        user_roles
            .iter()
            .any(|role| entry.manager_roles.contains(role))
            || entry.manager_members.contains(&user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct StubDirectory {
        members: Vec<UserId>,
        roles: Vec<RoleId>,
    }

    impl MemberDirectory for StubDirectory {
        fn members_with_role(&self, _role: RoleId) -> Vec<UserId> {
            Vec::new()
        }

        fn member_exists(&self, user: UserId) -> bool {
            self.members.contains(&user)
        }

        fn role_exists(&self, role: RoleId) -> bool {
            self.roles.contains(&role)
        }
    }

    fn directory() -> StubDirectory {
        StubDirectory {
            members: vec![UserId(1), UserId(2)],
            roles: vec![RoleId(10)],
        }
    }

    const GUILD: GuildId = GuildId(99);

    #[test]
    fn test_entries_created_lazily_empty() {
        let registry = GuildRegistry::new();
        assert!(!registry.has_checkin_channels(GUILD));
        let (roles, members) = registry.managers(GUILD);
        assert!(roles.is_empty());
        assert!(members.is_empty());
    }

    #[test]
    fn test_set_checkin_channels_replaces() {
        let registry = GuildRegistry::new();
        registry.set_checkin_channels(GUILD, vec![ChannelId(1), ChannelId(2)]);
        assert!(registry.has_checkin_channels(GUILD));
        assert_eq!(
            registry.checkin_channels(GUILD),
            vec![ChannelId(1), ChannelId(2)]
        );

        registry.set_checkin_channels(GUILD, vec![ChannelId(3)]);
        assert_eq!(registry.checkin_channels(GUILD), vec![ChannelId(3)]);
    }

    #[test]
    fn test_add_managers_classifies_and_is_idempotent() {
        let registry = GuildRegistry::new();
        let tokens = [
            MentionToken::Role(RoleId(10)),
            MentionToken::User(UserId(1)),
        ];

        let (roles_added, members_added) = registry.add_managers(GUILD, &tokens, &directory());
        assert_eq!((roles_added, members_added), (1, 1));

        // Adding twice has no additional effect
        let (roles_added, members_added) = registry.add_managers(GUILD, &tokens, &directory());
        assert_eq!((roles_added, members_added), (0, 0));

        let (roles, members) = registry.managers(GUILD);
        assert_eq!(roles, vec![RoleId(10)]);
        assert_eq!(members, vec![UserId(1)]);
    }

    #[test]
    fn test_add_managers_drops_unknown_ids() {
        let registry = GuildRegistry::new();
        let tokens = [
            MentionToken::Role(RoleId(999)),
            MentionToken::User(UserId(999)),
        ];
        assert_eq!(registry.add_managers(GUILD, &tokens, &directory()), (0, 0));
    }

    #[test]
    fn test_is_manager_truth_table() {
        let registry = GuildRegistry::new();
        registry.add_managers(
            GUILD,
            &[
                MentionToken::Role(RoleId(10)),
                MentionToken::User(UserId(2)),
            ],
            &directory(),
        );

        // Every combination of (administrator, role hit, member hit)
        for admin in [false, true] {
            for role_hit in [false, true] {
                for member_hit in [false, true] {
                    let user = if member_hit { UserId(2) } else { UserId(1) };
                    let roles: &[RoleId] = if role_hit { &[RoleId(10)] } else { &[RoleId(11)] };
                    let expected = admin || role_hit || member_hit;
                    assert_eq!(
                        registry.is_manager(GUILD, user, roles, admin),
                        expected,
                        "admin={admin} role_hit={role_hit} member_hit={member_hit}"
                    );
                }
            }
        }
    }
}
