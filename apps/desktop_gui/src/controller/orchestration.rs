//! Command orchestration from UI actions to the backend queue.

use crossbeam_channel::{Sender, TrySendError};

use crate::backend_bridge::commands::BackendCommand;

/// Returns whether the command reached the queue; on failure `status`
/// carries the reason and the caller unwinds its controller transition.
pub fn dispatch_backend_command(
    cmd_tx: &Sender<BackendCommand>,
    cmd: BackendCommand,
    status: &mut String,
) -> bool {
    let command = cmd.name();
    match cmd_tx.try_send(cmd) {
        Ok(()) => {
            tracing::debug!(command, "queued ui->backend command");
            true
        }
        Err(TrySendError::Full(_)) => {
            *status = "Command queue is full; please retry".to_string();
            false
        }
        Err(TrySendError::Disconnected(_)) => {
            *status = "Backend worker disconnected (possible startup failure); restart the app"
                .to_string();
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::bounded;

    #[test]
    fn reports_a_disconnected_backend_in_the_status_line() {
        let (cmd_tx, cmd_rx) = bounded(1);
        drop(cmd_rx);
        let mut status = String::new();
        assert!(!dispatch_backend_command(
            &cmd_tx,
            BackendCommand::ListStudents,
            &mut status
        ));
        assert!(status.contains("disconnected"));
    }

    #[test]
    fn reports_a_full_queue_in_the_status_line() {
        let (cmd_tx, _cmd_rx) = bounded(1);
        let mut status = String::new();
        assert!(dispatch_backend_command(
            &cmd_tx,
            BackendCommand::ListStudents,
            &mut status
        ));
        assert!(!dispatch_backend_command(
            &cmd_tx,
            BackendCommand::ListStudents,
            &mut status
        ));
        assert!(status.contains("full"));
    }
}
