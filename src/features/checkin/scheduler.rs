//! # Reminder Scheduler
//!
//! One tokio task per active session posts periodic reminder messages into
//! the session's channel. The task captures only the [`SessionId`] and
//! re-reads the store on every tick, so joins, leaves and ends between
//! ticks are always reflected in the next reminder.

use async_trait::async_trait;
use rand::seq::IndexedRandom;
use serenity::http::Http;
use serenity::model::id::ChannelId;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

use crate::features::checkin::buttons::create_session_buttons;
use crate::features::checkin::sessions::{SessionId, SessionSnapshot, SessionStore};

/// Phrases rotated through the reminder messages.
pub const PROGRESS_PROMPTS: &[&str] = &[
    "How's your progress?",
    "What have you achieved so far?",
    "Any updates on your task?",
    "How are things going?",
    "How is your work progressing?",
    "What have you done since the last check-in?",
    "What's your status?",
    "How's it going?",
    "Any progress to report?",
    "What have you completed?",
];

/// Backoff schedule between failed reminder posts. After the last retry
/// fails the session is marked Faulted and dropped.
const RETRY_BACKOFF_SECS: &[u64] = &[5, 15, 45];

/// Outbound channel for reminder messages.
///
/// Production posts through Discord's HTTP API; tests record messages
/// in memory.
#[async_trait]
pub trait ReminderSink: Send + Sync {
    async fn post_reminder(
        &self,
        channel: ChannelId,
        session: SessionId,
        content: &str,
    ) -> anyhow::Result<()>;
}

/// [`ReminderSink`] posting through Discord's HTTP API, with the session
/// control buttons attached to every reminder.
pub struct DiscordSink {
    http: Arc<Http>,
}

impl DiscordSink {
    pub fn new(http: Arc<Http>) -> Self {
        Self { http }
    }
}

#[async_trait]
impl ReminderSink for DiscordSink {
    async fn post_reminder(
        &self,
        channel: ChannelId,
        session: SessionId,
        content: &str,
    ) -> anyhow::Result<()> {
        channel
            .send_message(&self.http, |m| {
                m.content(content)
                    .set_components(create_session_buttons(session))
            })
            .await?;
        Ok(())
    }
}

/// Drives the per-session reminder loops.
pub struct ReminderScheduler {
    store: Arc<SessionStore>,
    sink: Arc<dyn ReminderSink>,
}

impl ReminderScheduler {
    pub fn new(store: Arc<SessionStore>, sink: Arc<dyn ReminderSink>) -> Self {
        Self { store, sink }
    }

    /// Spawn the reminder loop for a session and bind its task handle.
    pub fn start(&self, id: SessionId) {
        let store = Arc::clone(&self.store);
        let sink = Arc::clone(&self.sink);
        let task = tokio::spawn(async move {
            run_session(store, sink, id).await;
        });
        self.store.attach_task(id, task);
    }
}

async fn run_session(store: Arc<SessionStore>, sink: Arc<dyn ReminderSink>, id: SessionId) {
    // Elapsed-time reference for the "Last reminder" line; reset on every
    // successful post.
    let mut last_tick = Instant::now();
    loop {
        let duration_secs = match store.snapshot(id) {
            Some(snapshot) => snapshot.duration_secs,
            None => return,
        };
        tokio::time::sleep(Duration::from_secs(duration_secs)).await;

        // Re-read so joins and leaves since the last tick are reflected
        let snapshot = match store.snapshot(id) {
            Some(snapshot) => snapshot,
            None => return,
        };

        let minutes_ago = last_tick.elapsed().as_secs() / 60;
        // Pick the phrase before awaiting; rand's thread rng is not Send
        let phrase = pick_prompt();
        let content = compose_reminder(&snapshot, phrase, minutes_ago);

        if post_with_retry(&*sink, snapshot.channel_id, id, &content).await {
            last_tick = Instant::now();
        } else {
            log::error!("giving up on reminders for session {id}, marking faulted");
            store.mark_faulted(id);
            return;
        }
    }
}

fn pick_prompt() -> &'static str {
    PROGRESS_PROMPTS
        .choose(&mut rand::rng())
        .copied()
        .unwrap_or(PROGRESS_PROMPTS[0])
}

async fn post_with_retry(
    sink: &dyn ReminderSink,
    channel: ChannelId,
    session: SessionId,
    content: &str,
) -> bool {
    match sink.post_reminder(channel, session, content).await {
        Ok(()) => return true,
        Err(err) => log::warn!("reminder post failed for session {session}: {err:#}"),
    }
    for backoff in RETRY_BACKOFF_SECS {
        tokio::time::sleep(Duration::from_secs(*backoff)).await;
        match sink.post_reminder(channel, session, content).await {
            Ok(()) => return true,
            Err(err) => {
                log::warn!("reminder retry failed for session {session}: {err:#}");
            }
        }
    }
    false
}

fn compose_reminder(snapshot: &SessionSnapshot, phrase: &str, minutes_ago: u64) -> String {
    let others: Vec<String> = snapshot
        .participants
        .iter()
        .filter(|p| **p != snapshot.creator)
        .map(|p| format!("<@{p}>"))
        .collect();
    let mentions = if others.is_empty() {
        format!("<@{}>", snapshot.creator)
    } else {
        format!("<@{}> and {}", snapshot.creator, others.join(" "))
    };
    format!("{mentions}, {phrase}\nLast reminder: {minutes_ago} minutes ago")
}
