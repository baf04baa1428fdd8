//! Mailbox grouping.
//!
//! A conversation is every message exchanged between one unordered pair of
//! users. [`group_by_conversation`] partitions a message sequence by that pair,
//! and [`mailbox`] turns the groups into one summary per counterpart as seen
//! by a given viewer. Both are pure, so the server and the client share them.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::messages::Message;

/// `(min(sender, receiver), max(sender, receiver))`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConversationKey(Uuid, Uuid);

impl ConversationKey {
    pub fn new(a: Uuid, b: Uuid) -> Self {
        if a <= b { Self(a, b) } else { Self(b, a) }
    }

    pub fn of(message: &Message) -> Self {
        Self::new(message.sender_id, message.receiver_id)
    }

    /// The other participant, if `viewer` takes part in this conversation.
    pub fn counterpart(&self, viewer: Uuid) -> Option<Uuid> {
        if self.0 == viewer {
            Some(self.1)
        } else if self.1 == viewer {
            Some(self.0)
        } else {
            None
        }
    }
}

/// Partitions `messages` by user pair. Each group keeps the input order.
pub fn group_by_conversation(messages: &[Message]) -> HashMap<ConversationKey, Vec<&Message>> {
    let mut groups: HashMap<ConversationKey, Vec<&Message>> = HashMap::new();
    for message in messages {
        groups.entry(ConversationKey::of(message)).or_default().push(message);
    }
    groups
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConversationSummary {
    pub counterpart_id: Uuid,
    pub counterpart_name: String,
    pub last_message: Message,
    /// Unread messages addressed to the viewer
    pub unread_count: usize,
}

/// One summary per counterpart of `viewer`, newest conversation first.
///
/// Messages that do not involve `viewer` are ignored.
pub fn mailbox(messages: &[Message], viewer: Uuid) -> Vec<ConversationSummary> {
    let mut summaries: Vec<ConversationSummary> = group_by_conversation(messages)
        .into_iter()
        .filter_map(|(key, group)| {
            let counterpart_id = key.counterpart(viewer)?;
            let last = group
                .iter()
                .copied()
                .max_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)))?;
            let unread_count = group
                .iter()
                .filter(|m| m.receiver_id == viewer && !m.is_read)
                .count();
            let counterpart_name = if last.sender_id == counterpart_id {
                last.sender_name.clone()
            } else {
                last.receiver_name.clone()
            };

            Some(ConversationSummary {
                counterpart_id,
                counterpart_name,
                last_message: last.clone(),
                unread_count,
            })
        })
        .collect();

    summaries.sort_by(|a, b| {
        b.last_message
            .created_at
            .cmp(&a.last_message.created_at)
            .then(a.counterpart_id.cmp(&b.counterpart_id))
    });
    summaries
}
