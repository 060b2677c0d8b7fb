//! Frontend configuration

/// Dashboard configuration
pub struct FrontendConfig;

impl FrontendConfig {
    /// Path of the configuration API relative to the page origin
    pub const GRAPHQL_PATH: &'static str = "/v1/graphql";

    /// Loading indicators stay hidden for this long to avoid flicker
    pub const ACTIVITY_INDICATOR_DELAY_MS: u32 = 1000;

    /// `<meta>` tag whose content switches the dashboard into maintenance mode
    pub const MAINTENANCE_META: &'static str = "console-maintenance";
}
