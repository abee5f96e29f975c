use async_trait::async_trait;
use huddle_server::{AccessCheck, RoomId, UserId};
use std::collections::HashSet;
use std::sync::{Arc, Mutex};

/// A recorded invocation of an access check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessCall {
    pub room: RoomId,
    pub user: UserId,
}

/// Access check that records every call and rejects a configurable set of
/// users.
///
/// # Example
///
/// ```ignore
/// let check = RecordingAccessCheck::denying(["mallory"]);
/// let calls = check.calls();
///
/// // ... hand a clone to CallManager::builder(..).check_message(..) ...
///
/// assert_eq!(calls.lock().unwrap().len(), 1);
/// ```
#[derive(Clone, Default)]
pub struct RecordingAccessCheck {
    denied: Arc<Mutex<HashSet<UserId>>>,
    calls: Arc<Mutex<Vec<AccessCall>>>,
}

impl RecordingAccessCheck {
    /// Allows everyone.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rejects the listed users.
    pub fn denying<I, S>(users: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<UserId>,
    {
        let check = Self::new();
        check
            .denied
            .lock()
            .unwrap()
            .extend(users.into_iter().map(Into::into));
        check
    }

    pub fn calls(&self) -> Arc<Mutex<Vec<AccessCall>>> {
        Arc::clone(&self.calls)
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl AccessCheck for RecordingAccessCheck {
    async fn check(&self, room: &RoomId, user: &UserId) -> anyhow::Result<()> {
        tracing::debug!("[RecordingAccessCheck] {} in {}", user, room);

        self.calls.lock().unwrap().push(AccessCall {
            room: room.clone(),
            user: user.clone(),
        });

        if self.denied.lock().unwrap().contains(user) {
            anyhow::bail!("access denied for {} in {}", user, room);
        }
        Ok(())
    }
}
