//! # Session Store
//!
//! Arena of running check-in sessions keyed by an opaque [`SessionId`].
//! Scheduler tasks capture only the id and look the session up through the
//! store on each tick, so there is no cyclic ownership between a session
//! and its task: the store owns the session, the session entry holds the
//! task handle, the task holds the id.

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serenity::model::id::{ChannelId, GuildId, UserId};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use thiserror::Error;
use tokio::task::JoinHandle;

use crate::features::checkin::duration::{parse_duration, MIN_DURATION_SECS};
use crate::features::checkin::mentions::{expand, tokenize, MemberDirectory};
use crate::features::guilds::GuildRegistry;

/// Opaque identifier of a check-in session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionId(u64);

impl SessionId {
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lifecycle state of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Active,
    /// Ended by the End control. Terminal.
    Ended,
    /// The reminder loop exhausted its post retries. Terminal.
    Faulted,
}

struct Session {
    guild_id: GuildId,
    channel_id: ChannelId,
    creator: UserId,
    duration_secs: u64,
    /// Insertion order, set semantics: no participant appears twice.
    participants: Vec<UserId>,
    created_at: DateTime<Utc>,
    state: SessionState,
    task: Option<JoinHandle<()>>,
}

/// Read-only copy of a session's current state, safe to hold across awaits.
#[derive(Debug, Clone)]
pub struct SessionSnapshot {
    pub guild_id: GuildId,
    pub channel_id: ChannelId,
    pub creator: UserId,
    pub duration_secs: u64,
    pub participants: Vec<UserId>,
    pub created_at: DateTime<Utc>,
    pub state: SessionState,
}

/// Validation failures when creating a session. No partial state is left
/// behind: no session is registered and no task is started.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CreateSessionError {
    #[error("No check-in channels are defined for this server. Please contact your admins to set up the bot.")]
    NoChannelsConfigured,
    #[error("Invalid duration. Minimum duration is 30 seconds.")]
    InvalidDuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinOutcome {
    Joined,
    AlreadyJoined,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeaveOutcome {
    Left,
    NotParticipant,
}

#[derive(Debug)]
pub enum EndOutcome {
    /// Session ended; announce termination in this channel.
    Ended { channel: ChannelId },
    /// Only participants may end a session.
    NotParticipant,
    /// The session no longer exists.
    Gone,
}

/// Process-wide arena of active sessions.
#[derive(Default)]
pub struct SessionStore {
    next_id: AtomicU64,
    sessions: DashMap<SessionId, Session>,
    /// Per-guild ordered index of active session ids.
    active: DashMap<GuildId, Vec<SessionId>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate inputs and register a new Active session.
    ///
    /// Checks, in order: the guild has designated check-in channels, the
    /// duration parses and is at least 30 seconds, then resolves mentions
    /// and ensures the creator is a participant. The caller starts the
    /// reminder task and attaches its handle afterwards.
    pub fn create(
        &self,
        guilds: &GuildRegistry,
        directory: &dyn MemberDirectory,
        guild_id: GuildId,
        channel_id: ChannelId,
        creator: UserId,
        duration_str: &str,
        mentions_str: &str,
    ) -> Result<SessionId, CreateSessionError> {
        if !guilds.has_checkin_channels(guild_id) {
            return Err(CreateSessionError::NoChannelsConfigured);
        }

        let duration_secs = parse_duration(duration_str)
            .filter(|secs| *secs >= MIN_DURATION_SECS)
            .ok_or(CreateSessionError::InvalidDuration)?;

        let resolved = expand(&tokenize(mentions_str), directory);
        let mut participants = Vec::with_capacity(resolved.len() + 1);
        for user in resolved {
            if !participants.contains(&user) {
                participants.push(user);
            }
        }
        if !participants.contains(&creator) {
            participants.push(creator);
        }

        let id = SessionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.sessions.insert(
            id,
            Session {
                guild_id,
                channel_id,
                creator,
                duration_secs,
                participants,
                created_at: Utc::now(),
                state: SessionState::Active,
                task: None,
            },
        );
        self.active.entry(guild_id).or_default().push(id);
        Ok(id)
    }

    /// Bind the reminder task handle to the session.
    ///
    /// At most one task is ever bound; a second handle, or a handle for a
    /// session that has already gone away, is aborted on the spot.
    pub fn attach_task(&self, id: SessionId, task: JoinHandle<()>) {
        match self.sessions.get_mut(&id) {
            Some(mut entry) if entry.task.is_none() => entry.task = Some(task),
            _ => task.abort(),
        }
    }

    pub fn snapshot(&self, id: SessionId) -> Option<SessionSnapshot> {
        self.sessions.get(&id).map(|entry| SessionSnapshot {
            guild_id: entry.guild_id,
            channel_id: entry.channel_id,
            creator: entry.creator,
            duration_secs: entry.duration_secs,
            participants: entry.participants.clone(),
            created_at: entry.created_at,
            state: entry.state,
        })
    }

    /// Active session ids for a guild, oldest first.
    pub fn active_in_guild(&self, guild: GuildId) -> Vec<SessionId> {
        self.active
            .get(&guild)
            .map(|ids| ids.clone())
            .unwrap_or_default()
    }

    /// Add the user to the participant set. Idempotent.
    pub fn join(&self, id: SessionId, user: UserId) -> Option<JoinOutcome> {
        let mut entry = self.sessions.get_mut(&id)?;
        if entry.participants.contains(&user) {
            Some(JoinOutcome::AlreadyJoined)
        } else {
            entry.participants.push(user);
            Some(JoinOutcome::Joined)
        }
    }

    /// Remove the user from the participant set. Idempotent.
    pub fn leave(&self, id: SessionId, user: UserId) -> Option<LeaveOutcome> {
        let mut entry = self.sessions.get_mut(&id)?;
        if entry.participants.contains(&user) {
            entry.participants.retain(|p| *p != user);
            Some(LeaveOutcome::Left)
        } else {
            Some(LeaveOutcome::NotParticipant)
        }
    }

    /// End the session on behalf of `user`.
    ///
    /// Permitted only for current participants. Cancels the reminder task,
    /// marks the session Ended and removes it from the store. The Active →
    /// Ended transition happens exactly once; a second End finds the
    /// session gone.
    pub fn end(&self, id: SessionId, user: UserId) -> EndOutcome {
        let (guild_id, channel_id, task) = {
            let mut entry = match self.sessions.get_mut(&id) {
                Some(entry) => entry,
                None => return EndOutcome::Gone,
            };
            if !entry.participants.contains(&user) {
                return EndOutcome::NotParticipant;
            }
            entry.state = SessionState::Ended;
            (entry.guild_id, entry.channel_id, entry.task.take())
        };
        self.remove(id, guild_id);
        // Abort takes effect at the task's next suspension point
        if let Some(task) = task {
            task.abort();
        }
        EndOutcome::Ended {
            channel: channel_id,
        }
    }

    /// Mark the session Faulted and drop it from the store.
    ///
    /// Called by the reminder loop itself after exhausting post retries, so
    /// the task handle is dropped without aborting.
    pub fn mark_faulted(&self, id: SessionId) {
        let guild_id = {
            let mut entry = match self.sessions.get_mut(&id) {
                Some(entry) => entry,
                None => return,
            };
            entry.state = SessionState::Faulted;
            entry.guild_id
        };
        self.remove(id, guild_id);
    }

    fn remove(&self, id: SessionId, guild_id: GuildId) {
        self.sessions.remove(&id);
        if let Some(mut ids) = self.active.get_mut(&guild_id) {
            ids.retain(|s| *s != id);
        }
    }
}
