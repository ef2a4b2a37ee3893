pub mod analytics;
pub mod preferences;
pub mod role;

pub use analytics::{AdaptationMetrics, EventKind, UsageAnalytics, UsageEvent};
pub use preferences::{
    AlertThresholds, NotificationFrequency, NotificationSettings, SummaryLevel, TribePreferences,
};
pub use role::{suggested_mode_for_role, Mode, Role, RoleDetectionRecord, RoleDetectionResult};
