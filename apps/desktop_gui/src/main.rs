use clap::Parser;
use crossbeam_channel::bounded;

mod backend_bridge;
mod controller;
mod ui;

use backend_bridge::commands::BackendCommand;
use controller::events::UiEvent;
use telemetry::TelemetryConfig;
use ui::app::{RegistryApp, StartupConfig};

#[derive(Debug, Parser)]
#[command(
    name = "student-registry-gui",
    about = "Desktop client for the student registry service"
)]
struct Cli {
    /// Base URL of the student registry service.
    #[arg(long, default_value = registry_client::DEFAULT_BASE_URL)]
    server_url: String,
    /// Collector address that receives exported telemetry spans.
    #[arg(long, default_value = telemetry::DEFAULT_COLLECTOR_URL)]
    collector_url: String,
}

fn main() -> eframe::Result<()> {
    let cli = Cli::parse();

    // Telemetry comes up before any other component; its failures are its
    // own and never surface here.
    telemetry::init(TelemetryConfig::new("registry-desktop", cli.collector_url));

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(64);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(256);
    {
        let _startup = tracing::info_span!("app start", server_url = %cli.server_url).entered();
        backend_bridge::runtime::launch(cli.server_url.clone(), cmd_rx, ui_tx);
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Student Registry")
            .with_inner_size([900.0, 640.0])
            .with_min_inner_size([720.0, 520.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Student Registry",
        options,
        Box::new(move |_cc| {
            Ok(Box::new(RegistryApp::new(
                cmd_tx,
                ui_rx,
                StartupConfig {
                    server_url: cli.server_url,
                },
            )))
        }),
    )
}
