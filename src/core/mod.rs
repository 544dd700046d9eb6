//! Core application primitives: alert memory, per-ticker processing and scheduling

pub mod alert_memory;
pub mod bootstrap;
pub mod clock;
pub mod http;
pub mod processor;
pub mod scheduler;
pub mod status;

pub use alert_memory::AlertMemory;
pub use clock::{Clock, SystemClock};
pub use processor::{TickerOutcome, TickerProcessor};
pub use scheduler::{
    CycleSummary, MarketPhase, ScheduleConfig, ScheduleState, Scheduler, TickOutcome,
    TradingWindow, WindowError,
};
pub use status::{status_handle, ScannerStatus, StatusHandle};
