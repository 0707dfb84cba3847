//! Cash-flow projection: running balance, day status, reserve advice and carry-forward.

pub mod calendar;
pub mod projector;
pub mod reserve;
pub mod thresholds;

pub use calendar::{merge_events, CalendarEvent, DayEvents, PAY_EVENT_LABEL};
pub use projector::{
    closing_balance, project, CashFlowProjector, DayProjection, MonthProjection, MonthSummary,
};
pub use reserve::{obligations_between, recommend_reserve, ReserveRecommendation};
pub use thresholds::{
    DayStatus, ProjectionThresholds, DEFAULT_CAUTION_THRESHOLD, DEFAULT_RESERVE_BUFFER,
};
