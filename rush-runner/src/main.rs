use std::process::ExitCode;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use rush_runner::config::WidgetConfig;
use rush_runner::web::{AppState, create_router};
use rush_runner::widget::Widget;

#[tokio::main]
async fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("rush_runner=info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = WidgetConfig::from_env();

    // Load failures are shown in the widget rather than stopping the server
    let source = config.source();
    info!(%source, "loading timetable data");
    let data = source.load().await;

    let widget = Widget::new(data, &config);
    widget.start().await;

    let app = create_router(AppState::new(widget), &config.static_dir);

    let listener = match tokio::net::TcpListener::bind(config.addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!(addr = %config.addr, error = %e, "failed to bind");
            return ExitCode::FAILURE;
        }
    };

    info!("Rush Runner listening on http://{}", config.addr);
    info!("API Endpoints:");
    info!("  GET  /api/state                     - Widget snapshot");
    info!("  POST /api/select                    - Select station or day-type");
    info!("  POST /api/position                  - Report a position fix");
    info!("  GET  /api/stations/search           - Search stations");
    info!("  GET  /api/stations/:id/timetable    - Station departures");
    info!("  GET  /api/stations/:id/next         - Next departure");
    info!("  GET  /api/classify                  - Rush-alert tier");

    if let Err(e) = axum::serve(listener, app).await {
        error!(error = %e, "server error");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
