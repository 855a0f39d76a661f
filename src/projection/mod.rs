//! Read-only projections over fetched marketplace data.

pub mod format;
pub mod history;
pub mod source;
pub mod status;

pub use format::{format_date, format_price};
pub use history::{
    FilterButton, HistoryEntry, HistoryFilter, HistoryRole, HistoryScreen, HistorySummary,
    HistoryView,
};
pub use source::{Negotiation, Party, ProjectRecord, ProjectSource, StaticProjectSource, UserRef};
pub use status::{BadgeTone, ProjectStatus, StatusBadge};
