pub mod cli_consts {
    //! Dashboard Configuration Constants
    //!
    //! Tunables for polling, event buffering and backend addressing,
    //! grouped by functional area.

    // =============================================================================
    // QUEUE CONFIGURATION
    // =============================================================================

    /// The maximum number of events to keep in the activity logs.
    pub const MAX_ACTIVITY_LOGS: usize = 100;

    /// Maximum number of buffered events between workers and the UI loop
    pub const EVENT_QUEUE_SIZE: usize = 100;

    // =============================================================================
    // POLLING CONFIGURATION
    // =============================================================================

    /// Realtime polling configuration
    pub mod polling {
        use std::time::Duration;

        /// Interval between two realtime polls (milliseconds)
        pub const POLL_INTERVAL_MS: u64 = 2_000;

        /// Smallest accepted poll interval (milliseconds)
        pub const MIN_POLL_INTERVAL_MS: u64 = 250;

        /// Helper function to get the default poll interval
        pub const fn poll_interval() -> Duration {
            Duration::from_millis(POLL_INTERVAL_MS)
        }
    }

    // =============================================================================
    // BACKEND CONFIGURATION
    // =============================================================================

    /// Backend addressing
    pub mod backend {
        /// Deployed backend used when nothing else is configured
        pub const PRODUCTION_API_URL: &str = "https://ee495smarthome-production.up.railway.app";

        /// Backend started locally with its default port
        pub const LOCAL_API_URL: &str = "http://localhost:8000";

        /// Marker left in unedited deployment templates
        pub const PLACEHOLDER_MARKER: &str = "PASTE_YOUR";

        /// Environment variable overriding the backend address
        pub const API_URL_ENV_VAR: &str = "SMARTHOME_API_URL";

        pub const REALTIME_ENDPOINT: &str = "realtime";
        pub const COMMAND_ENDPOINT: &str = "command";
        pub const LIMITS_ENDPOINT: &str = "set_limits";
    }

    // =============================================================================
    // UI CONFIGURATION
    // =============================================================================

    pub mod ui {
        use std::time::Duration;

        /// How long the splash screen stays up unless a key is pressed
        pub const SPLASH_DURATION_MS: u64 = 2_000;

        /// Key event polling period of the UI loop (milliseconds)
        pub const INPUT_POLL_MS: u64 = 100;

        pub const fn splash_duration() -> Duration {
            Duration::from_millis(SPLASH_DURATION_MS)
        }

        pub const fn input_poll() -> Duration {
            Duration::from_millis(INPUT_POLL_MS)
        }
    }
}
