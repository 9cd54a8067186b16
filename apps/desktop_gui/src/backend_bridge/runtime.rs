//! Backend worker: owns the registry client and services UI commands on a
//! dedicated thread so the UI never blocks on the network.

use std::sync::Arc;
use std::thread;

use crossbeam_channel::{Receiver, Sender};
use registry_client::{RegistryClient, StudentRegistry};
use tracing::{error, info};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;

pub fn launch(server_url: String, cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>) {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread().enable_all().build() {
            Ok(runtime) => runtime,
            Err(err) => {
                error!("failed to build backend runtime: {err}");
                let _ = ui_tx.try_send(UiEvent::BackendUnavailable(format!(
                    "backend worker startup failure: {err}"
                )));
                return;
            }
        };

        let client = match RegistryClient::new(&server_url) {
            Ok(client) => client,
            Err(err) => {
                error!("backend worker rejected endpoint: {err}");
                let _ = ui_tx.try_send(UiEvent::BackendUnavailable(err.to_string()));
                return;
            }
        };

        runtime.block_on(serve(Arc::new(client), cmd_rx, ui_tx));
    });
}

async fn serve(
    registry: Arc<dyn StudentRegistry>,
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
) {
    while let Ok(cmd) = cmd_rx.recv() {
        info!(command = cmd.name(), "backend: servicing command");
        let event = match cmd {
            BackendCommand::CreateStudent(request) => {
                match registry.create_student(request).await {
                    Ok(student) => UiEvent::StudentCreated(student),
                    Err(err) => UiEvent::CreateFailed(err.to_string()),
                }
            }
            BackendCommand::DeleteStudent(request) => {
                match registry.delete_student(request).await {
                    Ok(message) => UiEvent::StudentDeleted { message },
                    Err(err) => UiEvent::DeleteFailed(err.to_string()),
                }
            }
            BackendCommand::ListStudents => match registry.list_students().await {
                Ok(students) => UiEvent::StudentsLoaded(students),
                Err(err) => UiEvent::ListFailed(err.to_string()),
            },
        };
        // A closed UI just means the response outlived the window.
        let _ = ui_tx.try_send(event);
    }
}
