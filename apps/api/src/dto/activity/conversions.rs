use std::str::FromStr;

use salesline_application::{
    CalendarEventInput, CreateInteractionInput, CreateTargetInput, LogRevenueInput,
};
use salesline_core::AppError;
use salesline_domain::{
    CalendarEvent, DailyRevenue, Interaction, InteractionKind, RecordId, Target, TargetPeriod,
    UserId,
};

use super::types::{
    CalendarEventRequest, CalendarEventResponse, CreateInteractionRequest, CreateTargetRequest,
    InteractionResponse, LogRevenueRequest, RevenueResponse, TargetResponse,
};
use crate::dto::common::{
    parse_date, parse_optional_record_id, parse_optional_timestamp, parse_optional_user_id,
    parse_timestamp,
};

impl From<Target> for TargetResponse {
    fn from(target: Target) -> Self {
        Self {
            id: target.id().to_string(),
            user_id: target.user_id().to_string(),
            period: target.period().to_string(),
            amount_cents: target.amount_cents(),
            created_by: target.created_by().to_string(),
            created_at: target.created_at().to_rfc3339(),
        }
    }
}

impl TryFrom<CreateTargetRequest> for CreateTargetInput {
    type Error = AppError;

    fn try_from(value: CreateTargetRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            user_id: UserId::parse(value.user_id)?,
            period: TargetPeriod::from_str(value.period.as_str())?,
            amount_cents: value.amount_cents,
        })
    }
}

impl From<DailyRevenue> for RevenueResponse {
    fn from(entry: DailyRevenue) -> Self {
        Self {
            id: entry.id().to_string(),
            user_id: entry.user_id().to_string(),
            revenue_date: entry.revenue_date().format("%Y-%m-%d").to_string(),
            amount_cents: entry.amount_cents(),
            lead_id: entry.lead_id().map(|lead_id| lead_id.to_string()),
            notes: entry.notes().map(ToOwned::to_owned),
            created_at: entry.created_at().to_rfc3339(),
        }
    }
}

impl TryFrom<LogRevenueRequest> for LogRevenueInput {
    type Error = AppError;

    fn try_from(value: LogRevenueRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            user_id: parse_optional_user_id(value.user_id)?,
            revenue_date: parse_date(value.revenue_date.as_str())?,
            amount_cents: value.amount_cents,
            lead_id: parse_optional_record_id(value.lead_id)?,
            notes: value.notes,
        })
    }
}

impl From<Interaction> for InteractionResponse {
    fn from(interaction: Interaction) -> Self {
        Self {
            id: interaction.id().to_string(),
            lead_id: interaction.lead_id().to_string(),
            user_id: interaction.user_id().to_string(),
            kind: interaction.kind().as_str().to_owned(),
            notes: interaction.notes().as_str().to_owned(),
            occurred_at: interaction.occurred_at().to_rfc3339(),
        }
    }
}

impl TryFrom<CreateInteractionRequest> for CreateInteractionInput {
    type Error = AppError;

    fn try_from(value: CreateInteractionRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            lead_id: RecordId::from_str(value.lead_id.as_str())?,
            kind: InteractionKind::from_str(value.kind.as_str())?,
            notes: value.notes,
            occurred_at: parse_optional_timestamp(value.occurred_at.as_deref())?,
        })
    }
}

impl From<CalendarEvent> for CalendarEventResponse {
    fn from(event: CalendarEvent) -> Self {
        Self {
            id: event.id().to_string(),
            title: event.title().as_str().to_owned(),
            description: event.description().map(ToOwned::to_owned),
            starts_at: event.starts_at().to_rfc3339(),
            ends_at: event.ends_at().to_rfc3339(),
            lead_id: event.lead_id().map(|lead_id| lead_id.to_string()),
            created_by: event.created_by().to_string(),
        }
    }
}

impl TryFrom<CalendarEventRequest> for CalendarEventInput {
    type Error = AppError;

    fn try_from(value: CalendarEventRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            title: value.title,
            description: value.description,
            starts_at: parse_timestamp(value.starts_at.as_str())?,
            ends_at: parse_timestamp(value.ends_at.as_str())?,
            lead_id: parse_optional_record_id(value.lead_id)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use salesline_application::{CalendarEventInput, CreateInteractionInput, LogRevenueInput};
    use salesline_core::AppError;
    use salesline_domain::{InteractionKind, Target, TargetPeriod, UserId};

    use super::{
        CalendarEventRequest, CreateInteractionRequest, LogRevenueRequest, TargetResponse,
    };

    #[test]
    fn target_response_formats_period_as_month() -> Result<(), AppError> {
        let target = Target::new(
            UserId::parse("a1")?,
            TargetPeriod::new(2026, 3)?,
            500_000,
            UserId::parse("m1")?,
        )?;

        let response = TargetResponse::from(target);

        assert_eq!(response.period, "2026-03");
        assert_eq!(response.user_id, "a1");
        Ok(())
    }

    #[test]
    fn revenue_request_without_user_logs_for_caller() -> Result<(), AppError> {
        let input = LogRevenueInput::try_from(LogRevenueRequest {
            user_id: None,
            revenue_date: "2026-03-14".to_owned(),
            amount_cents: 25_000,
            lead_id: None,
            notes: Some("renewal".to_owned()),
        })?;

        assert!(input.user_id.is_none());
        assert_eq!(input.revenue_date.to_string(), "2026-03-14");
        Ok(())
    }

    #[test]
    fn interaction_request_requires_known_kind() {
        let result = CreateInteractionInput::try_from(CreateInteractionRequest {
            lead_id: "0b6f4f3e-8f55-4c36-9d8c-1b1f3f0e2a10".to_owned(),
            kind: "fax".to_owned(),
            notes: "sent".to_owned(),
            occurred_at: None,
        });
        assert!(matches!(result, Err(AppError::Validation(_))));

        let parsed = CreateInteractionInput::try_from(CreateInteractionRequest {
            lead_id: "0b6f4f3e-8f55-4c36-9d8c-1b1f3f0e2a10".to_owned(),
            kind: "call".to_owned(),
            notes: "intro call".to_owned(),
            occurred_at: Some("2026-03-14T10:00:00Z".to_owned()),
        });
        assert!(matches!(
            parsed,
            Ok(CreateInteractionInput { kind: InteractionKind::Call, occurred_at: Some(_), .. })
        ));
    }

    #[test]
    fn calendar_request_rejects_malformed_times() {
        let result = CalendarEventInput::try_from(CalendarEventRequest {
            title: "Demo".to_owned(),
            description: None,
            starts_at: "tomorrow at noon".to_owned(),
            ends_at: "2026-03-14T11:00:00Z".to_owned(),
            lead_id: None,
        });

        assert!(matches!(result, Err(AppError::Validation(_))));
    }
}
