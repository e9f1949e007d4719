//! State updaters: how a node's update is merged into the running state.
//!
//! The default is wholesale replacement. Graphs whose nodes return partial
//! updates (e.g. only the messages they produced) install a
//! [`FieldBasedUpdater`] with a custom merge function.

use std::fmt::Debug;
use std::marker::PhantomData;
use std::sync::Arc;

/// Merges a node's update into the current state.
pub trait StateUpdater<S>: Send + Sync + Debug {
    fn apply_update(&self, current: &mut S, update: &S);
}

/// Shared handle to a state updater.
pub type BoxedStateUpdater<S> = Arc<dyn StateUpdater<S>>;

pub fn boxed_updater<S, U>(updater: U) -> BoxedStateUpdater<S>
where
    U: StateUpdater<S> + 'static,
{
    Arc::new(updater)
}

/// Replaces the whole state with the node's update.
#[derive(Debug, Clone, Default)]
pub struct ReplaceUpdater;

impl<S: Clone> StateUpdater<S> for ReplaceUpdater {
    fn apply_update(&self, current: &mut S, update: &S) {
        *current = update.clone();
    }
}

/// Merges updates field by field through a user-supplied function.
pub struct FieldBasedUpdater<S, F>
where
    F: Fn(&mut S, &S) + Send + Sync,
{
    merge: F,
    _marker: PhantomData<fn(S)>,
}

impl<S, F> FieldBasedUpdater<S, F>
where
    F: Fn(&mut S, &S) + Send + Sync,
{
    pub fn new(merge: F) -> Self {
        FieldBasedUpdater {
            merge,
            _marker: PhantomData,
        }
    }
}

impl<S, F> Debug for FieldBasedUpdater<S, F>
where
    F: Fn(&mut S, &S) + Send + Sync,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldBasedUpdater").finish_non_exhaustive()
    }
}

impl<S, F> StateUpdater<S> for FieldBasedUpdater<S, F>
where
    F: Fn(&mut S, &S) + Send + Sync,
{
    fn apply_update(&self, current: &mut S, update: &S) {
        (self.merge)(current, update);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::message::Message;
    use crate::state::ChatState;

    /// **Scenario**: the default updater replaces the state wholesale.
    #[test]
    fn replace_updater_overwrites() {
        let updater = ReplaceUpdater;
        let mut current = 1;
        updater.apply_update(&mut current, &99);
        assert_eq!(current, 99);
    }

    /// **Scenario**: a field-based updater appends messages instead of
    /// replacing them, the merge used by the chat graph.
    #[test]
    fn field_based_updater_appends_messages() {
        let updater = FieldBasedUpdater::new(|current: &mut ChatState, update: &ChatState| {
            current.messages.extend(update.messages.iter().cloned());
            current.tool_calls = update.tool_calls.clone();
        });
        let mut current = ChatState::from_user_message("hi");
        let update = ChatState {
            messages: vec![Message::assistant("hello")],
            ..Default::default()
        };
        updater.apply_update(&mut current, &update);
        assert_eq!(current.messages.len(), 2);
        assert_eq!(current.messages[1], Message::assistant("hello"));
    }

    /// **Scenario**: `boxed_updater` erases the concrete type behind the
    /// shared handle used by compiled graphs.
    #[test]
    fn boxed_updater_is_usable_through_the_trait() {
        let updater: BoxedStateUpdater<i32> = boxed_updater(ReplaceUpdater);
        let mut current = 0;
        updater.apply_update(&mut current, &7);
        assert_eq!(current, 7);
    }
}
