//! Mention expression parsing and expansion
//!
//! A mention expression is a whitespace-separated list of Discord role and
//! user mentions. Parsing happens in two independently testable steps: a
//! tokenizer producing tagged [`MentionToken`]s, and an expansion step that
//! resolves tokens against a [`MemberDirectory`].

use serenity::cache::Cache;
use serenity::model::guild::Guild;
use serenity::model::id::{ChannelId, GuildId, RoleId, UserId};

/// One syntactic mention token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MentionToken {
    /// `<@&id>` — expands to every member currently holding the role
    Role(RoleId),
    /// `<@id>` or `<@!id>` — a single member
    User(UserId),
}

/// Tokenize a raw mention expression.
///
/// Unrecognized tokens are skipped, not rejected.
pub fn tokenize(input: &str) -> Vec<MentionToken> {
    input.split_whitespace().filter_map(parse_token).collect()
}

fn parse_token(token: &str) -> Option<MentionToken> {
    let inner = token.strip_prefix('<')?.strip_suffix('>')?;
    if let Some(raw) = inner.strip_prefix("@&") {
        return raw.parse().ok().map(|id| MentionToken::Role(RoleId(id)));
    }
    let raw = inner.strip_prefix("@!").or_else(|| inner.strip_prefix('@'))?;
    raw.parse().ok().map(|id| MentionToken::User(UserId(id)))
}

/// Extract channel ids from a string of `<#id>` channel mentions.
pub fn channel_tokens(input: &str) -> Vec<ChannelId> {
    input
        .split_whitespace()
        .filter_map(|token| {
            token
                .strip_prefix("<#")?
                .strip_suffix('>')?
                .parse()
                .ok()
                .map(ChannelId)
        })
        .collect()
}

/// Workspace directory capability used to expand mention tokens.
///
/// Production code snapshots serenity's guild cache; tests provide an
/// in-memory directory.
pub trait MemberDirectory {
    /// Members currently holding the role, in directory order.
    fn members_with_role(&self, role: RoleId) -> Vec<UserId>;
    /// Whether the user is still present in the workspace.
    fn member_exists(&self, user: UserId) -> bool;
    /// Whether the role exists in the workspace.
    fn role_exists(&self, role: RoleId) -> bool;
}

/// Expand tokens into a participant list in token-processing order.
///
/// Role tokens expand to a snapshot of the role's current members; user
/// tokens resolve to the member if still present and are silently dropped
/// otherwise. The output is NOT deduplicated — a user reachable both
/// directly and via a role appears twice. Callers needing set semantics
/// (the session participant list) deduplicate on insertion.
pub fn expand(tokens: &[MentionToken], directory: &dyn MemberDirectory) -> Vec<UserId> {
    let mut members = Vec::new();
    for token in tokens {
        match *token {
            MentionToken::Role(role) => members.extend(directory.members_with_role(role)),
            MentionToken::User(user) => {
                if directory.member_exists(user) {
                    members.push(user);
                }
            }
        }
    }
    members
}

/// [`MemberDirectory`] backed by a snapshot of serenity's guild cache.
pub struct CachedDirectory {
    guild: Guild,
}

impl CachedDirectory {
    /// Snapshot the guild from the cache. Returns `None` when the guild is
    /// not cached yet.
    pub fn from_cache(cache: &Cache, guild_id: GuildId) -> Option<Self> {
        cache.guild(guild_id).map(|guild| Self { guild })
    }
}

impl MemberDirectory for CachedDirectory {
    fn members_with_role(&self, role: RoleId) -> Vec<UserId> {
        let mut ids: Vec<UserId> = self
            .guild
            .members
            .iter()
            .filter(|(_, member)| member.roles.contains(&role))
            .map(|(id, _)| *id)
            .collect();
        // The cache member map has arbitrary iteration order
        ids.sort_unstable();
        ids
    }

    fn member_exists(&self, user: UserId) -> bool {
        self.guild.members.contains_key(&user)
    }

    fn role_exists(&self, role: RoleId) -> bool {
        self.guild.roles.contains_key(&role)
    }
}
