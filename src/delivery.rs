//! Hand-off from connection handlers to the host application.

use tokio::sync::mpsc;

use crate::command::CommandList;

pub type CommandSender<C> = mpsc::Sender<CommandList<C>>;
pub type CommandReceiver<C> = mpsc::Receiver<CommandList<C>>;

/// Creates the delivery channel.
///
/// Senders wait when `capacity` lists are queued; only the sending handler is
/// held up, the accept loop and other connections keep going.
pub fn channel<C>(capacity: usize) -> (CommandSender<C>, CommandReceiver<C>) {
    mpsc::channel(capacity.max(1))
}
