//! Role-adaptive content disclosure engine for the Tribe competitive
//! intelligence dashboard.
//!
//! Infers which audience (executive / analyst / team) is viewing a piece
//! of generated intelligence, filters and summarizes that content to
//! match a cognitive-load budget, and persists user feedback about the
//! inference. Five pieces work together: the role [`detector`], the
//! [`modes`] controller, the [`content`] filter/summarizer, the
//! [`disclosure`] budgeter, and the preference [`store`]. The
//! [`session::AdaptiveSession`] object wires them up, one per active
//! user session.
//!
//! Everything is synchronous and UI-thread friendly: no network calls,
//! no background workers, and no operation that blocks. Rendering,
//! chart widgets, and the intelligence APIs live in the hosting app.

pub mod content;
pub mod detector;
pub mod disclosure;
pub mod models;
pub mod modes;
pub mod session;
pub mod store;

pub use content::{apply_content_filter, calculate_complexity, generate_summary, IntelCard};
pub use detector::{detect, Clock, SystemClock, UserContext};
pub use disclosure::{DisclosureLevel, DisclosureOutcome, DisclosureView, Priority};
pub use models::{
    AdaptationMetrics, Mode, Role, RoleDetectionRecord, RoleDetectionResult, TribePreferences,
    UsageAnalytics,
};
pub use modes::{is_feature_enabled, mode_config, ModeConfig, ModeController};
pub use session::AdaptiveSession;
pub use store::{ExportBundle, KeyValueStore, MemoryStore, PreferenceStore, SqliteStore};
