mod conversions;
mod types;

pub use types::{
    CalendarEventRequest, CalendarEventResponse, CreateInteractionRequest, CreateTargetRequest,
    InteractionResponse, LogRevenueRequest, RevenueResponse, TargetResponse, UpdateTargetRequest,
};
