use std::time::Duration;

pub const LAYOUT_FILE_NAME: &str = "portfolio_layout.ron";
pub const LOG_FILE_NAME: &str = "portfolio.log";
pub const LOG_DESTINATION_ENV: &str = "PORTFOLIO_LOG";
/// Host frame cadence, roughly one display refresh.
pub const FRAME_INTERVAL: Duration = Duration::from_millis(16);
pub const SITE_OWNER: &str = "Portfolio";
