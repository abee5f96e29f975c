use crate::call::error::CallError;
use async_trait::async_trait;
use huddle_core::{RoomId, UserId};
use std::sync::Arc;

/// Authorization predicate run before a guarded operation touches any state.
#[async_trait]
pub trait AccessCheck: Send + Sync {
    async fn check(&self, room: &RoomId, user: &UserId) -> anyhow::Result<()>;
}

#[async_trait]
impl<F> AccessCheck for F
where
    F: Fn(&RoomId, &UserId) -> anyhow::Result<()> + Send + Sync,
{
    async fn check(&self, room: &RoomId, user: &UserId) -> anyhow::Result<()> {
        self(room, user)
    }
}

/// The access checks configured for a [`crate::CallManager`], one optional
/// strategy per operation. A missing strategy allows everything.
#[derive(Clone, Default)]
pub struct AccessPolicy {
    pub new: Option<Arc<dyn AccessCheck>>,
    pub message: Option<Arc<dyn AccessCheck>>,
    pub finish: Option<Arc<dyn AccessCheck>>,
}

impl AccessPolicy {
    pub(crate) async fn check_new(&self, room: &RoomId, user: &UserId) -> Result<(), CallError> {
        run(self.new.as_deref(), room, user).await
    }

    pub(crate) async fn check_message(&self, room: &RoomId, user: &UserId) -> Result<(), CallError> {
        run(self.message.as_deref(), room, user).await
    }

    pub(crate) async fn check_finish(&self, room: &RoomId, user: &UserId) -> Result<(), CallError> {
        run(self.finish.as_deref(), room, user).await
    }
}

async fn run(check: Option<&dyn AccessCheck>, room: &RoomId, user: &UserId) -> Result<(), CallError> {
    let Some(check) = check else {
        return Ok(());
    };

    check
        .check(room, user)
        .await
        .map_err(CallError::AccessDenied)
}
