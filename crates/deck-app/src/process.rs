//! Message processing
//!
//! Runs a message through the TEA update function, follows up on any
//! returned messages and dispatches the resulting actions in order.

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::actions::{handle_action, TaskSet};
use crate::handler;
use crate::message::Message;
use crate::shell::PresentationShell;
use crate::state::ViewerState;

/// Process a message through the TEA update function
pub fn process_message<S>(
    state: &mut ViewerState,
    message: Message,
    msg_tx: &mpsc::Sender<Message>,
    shell: &Arc<S>,
    tasks: &mut TaskSet,
) where
    S: PresentationShell + Sync + 'static,
{
    let mut msg = Some(message);
    while let Some(m) = msg {
        let result = handler::update(state, m);

        for action in result.actions {
            handle_action(action, msg_tx, shell, state.source(), tasks);
        }

        // Continue with follow-up message
        msg = result.message;
    }
}
