use std::str::FromStr;

use chrono::{DateTime, Utc};
use salesline_core::{AppError, AppResult, NonEmptyString};
use serde::{Deserialize, Serialize};

use crate::records::{non_negative_cents, optional_text};
use crate::{OwnedRecord, RecordId, ResourceFamily, UserId};

/// Pipeline stage of a lead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeadStatus {
    /// Not yet contacted.
    New,
    /// First contact made.
    Contacted,
    /// Confirmed as a real opportunity.
    Qualified,
    /// Proposal sent.
    Proposal,
    /// Terms under negotiation.
    Negotiation,
    /// Closed and converted.
    Won,
    /// Closed without a deal.
    Lost,
}

impl LeadStatus {
    /// Returns a stable storage value for the status.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Contacted => "contacted",
            Self::Qualified => "qualified",
            Self::Proposal => "proposal",
            Self::Negotiation => "negotiation",
            Self::Won => "won",
            Self::Lost => "lost",
        }
    }

    /// Returns every status in pipeline order.
    #[must_use]
    pub fn all() -> &'static [Self] {
        const ALL: &[LeadStatus] = &[
            LeadStatus::New,
            LeadStatus::Contacted,
            LeadStatus::Qualified,
            LeadStatus::Proposal,
            LeadStatus::Negotiation,
            LeadStatus::Won,
            LeadStatus::Lost,
        ];

        ALL
    }

    /// Returns whether the lead left the pipeline.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl FromStr for LeadStatus {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|status| status.as_str() == value)
            .ok_or_else(|| AppError::Validation(format!("unknown lead status '{value}'")))
    }
}

/// Editable contact and deal details of a lead.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadDetails {
    /// Company the lead works for.
    pub company: Option<String>,
    /// Contact email.
    pub email: Option<String>,
    /// Contact phone number.
    pub phone: Option<String>,
    /// Where the lead came from.
    pub source: Option<String>,
    /// Estimated deal value in cents.
    pub estimated_value_cents: i64,
}

impl LeadDetails {
    fn normalized(self) -> AppResult<Self> {
        Ok(Self {
            company: optional_text(self.company),
            email: optional_text(self.email),
            phone: optional_text(self.phone),
            source: optional_text(self.source),
            estimated_value_cents: non_negative_cents(
                self.estimated_value_cents,
                "estimated value",
            )?,
        })
    }
}

/// A prospective deal tracked through the pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lead {
    id: RecordId,
    name: NonEmptyString,
    details: LeadDetails,
    status: LeadStatus,
    assigned_to: Option<UserId>,
    created_by: Option<UserId>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Lead {
    /// Returns the record id.
    #[must_use]
    pub fn id(&self) -> RecordId {
        self.id
    }

    /// Creates a new lead in the `New` stage.
    pub fn new(
        name: impl Into<String>,
        details: LeadDetails,
        created_by: UserId,
        assigned_to: Option<UserId>,
    ) -> AppResult<Self> {
        let now = Utc::now();
        Ok(Self {
            id: RecordId::new(),
            name: NonEmptyString::new(name)?,
            details: details.normalized()?,
            status: LeadStatus::New,
            assigned_to,
            created_by: Some(created_by),
            created_at: now,
            updated_at: now,
        })
    }

    /// Returns the lead name.
    #[must_use]
    pub fn name(&self) -> &NonEmptyString {
        &self.name
    }

    /// Returns contact and deal details.
    #[must_use]
    pub fn details(&self) -> &LeadDetails {
        &self.details
    }

    /// Returns the pipeline stage.
    #[must_use]
    pub fn status(&self) -> LeadStatus {
        self.status
    }

    /// Returns the assignee.
    #[must_use]
    pub fn assigned_to(&self) -> Option<&UserId> {
        self.assigned_to.as_ref()
    }

    /// Returns the creator.
    #[must_use]
    pub fn created_by(&self) -> Option<&UserId> {
        self.created_by.as_ref()
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the last modification timestamp.
    #[must_use]
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Replaces name and details.
    pub fn update(&mut self, name: impl Into<String>, details: LeadDetails) -> AppResult<()> {
        self.name = NonEmptyString::new(name)?;
        self.details = details.normalized()?;
        self.touch();
        Ok(())
    }

    /// Moves the lead to another pipeline stage.
    ///
    /// `Won` is reached only through conversion.
    pub fn set_status(&mut self, status: LeadStatus) -> AppResult<()> {
        if status == LeadStatus::Won {
            return Err(AppError::Validation(
                "a lead is marked won by converting it to a customer".to_owned(),
            ));
        }

        if self.status == LeadStatus::Won {
            return Err(AppError::Conflict(format!(
                "lead '{}' was already converted",
                self.id
            )));
        }

        self.status = status;
        self.touch();
        Ok(())
    }

    /// Hands the lead to another user, or back to the house with `None`.
    pub fn assign_to(&mut self, assignee: Option<UserId>) {
        self.assigned_to = assignee;
        self.touch();
    }

    /// Converts the lead into a customer and closes it as won.
    pub fn convert(&mut self) -> AppResult<Customer> {
        if self.status == LeadStatus::Won {
            return Err(AppError::Conflict(format!(
                "lead '{}' was already converted",
                self.id
            )));
        }

        if self.status == LeadStatus::Lost {
            return Err(AppError::Validation(format!(
                "lead '{}' is lost and cannot be converted",
                self.id
            )));
        }

        self.status = LeadStatus::Won;
        self.touch();

        Ok(Customer {
            id: RecordId::new(),
            lead_id: Some(self.id),
            name: self.name.clone(),
            details: CustomerDetails {
                company: self.details.company.clone(),
                email: self.details.email.clone(),
                phone: self.details.phone.clone(),
                lifetime_value_cents: self.details.estimated_value_cents,
            },
            assigned_to: self.assigned_to.clone(),
            created_by: self.created_by.clone(),
            created_at: Utc::now(),
        })
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

impl OwnedRecord for Lead {
    const FAMILY: ResourceFamily = ResourceFamily::Lead;

    fn record_id(&self) -> RecordId {
        self.id
    }

    fn primary_owner(&self) -> Option<&UserId> {
        self.assigned_to.as_ref()
    }

    fn secondary_owner(&self) -> Option<&UserId> {
        self.created_by.as_ref()
    }
}

/// Editable details of a customer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerDetails {
    /// Company name.
    pub company: Option<String>,
    /// Contact email.
    pub email: Option<String>,
    /// Contact phone number.
    pub phone: Option<String>,
    /// Revenue attributed to the customer in cents.
    pub lifetime_value_cents: i64,
}

/// A converted lead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    id: RecordId,
    lead_id: Option<RecordId>,
    name: NonEmptyString,
    details: CustomerDetails,
    assigned_to: Option<UserId>,
    created_by: Option<UserId>,
    created_at: DateTime<Utc>,
}

impl Customer {
    /// Returns the record id.
    #[must_use]
    pub fn id(&self) -> RecordId {
        self.id
    }

    /// Returns the lead this customer was converted from.
    #[must_use]
    pub fn lead_id(&self) -> Option<RecordId> {
        self.lead_id
    }

    /// Returns the customer name.
    #[must_use]
    pub fn name(&self) -> &NonEmptyString {
        &self.name
    }

    /// Returns customer details.
    #[must_use]
    pub fn details(&self) -> &CustomerDetails {
        &self.details
    }

    /// Returns the account owner.
    #[must_use]
    pub fn assigned_to(&self) -> Option<&UserId> {
        self.assigned_to.as_ref()
    }

    /// Returns the user that originally created the lead.
    #[must_use]
    pub fn created_by(&self) -> Option<&UserId> {
        self.created_by.as_ref()
    }

    /// Returns the conversion timestamp.
    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Replaces name and details.
    pub fn update(&mut self, name: impl Into<String>, details: CustomerDetails) -> AppResult<()> {
        self.name = NonEmptyString::new(name)?;
        self.details = CustomerDetails {
            company: optional_text(details.company),
            email: optional_text(details.email),
            phone: optional_text(details.phone),
            lifetime_value_cents: non_negative_cents(
                details.lifetime_value_cents,
                "lifetime value",
            )?,
        };
        Ok(())
    }
}

impl OwnedRecord for Customer {
    const FAMILY: ResourceFamily = ResourceFamily::Customer;

    fn record_id(&self) -> RecordId {
        self.id
    }

    fn primary_owner(&self) -> Option<&UserId> {
        self.assigned_to.as_ref()
    }

    fn secondary_owner(&self) -> Option<&UserId> {
        self.created_by.as_ref()
    }
}
