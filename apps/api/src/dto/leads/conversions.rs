use std::str::FromStr;

use salesline_application::{CreateLeadInput, UpdateCustomerInput, UpdateLeadInput};
use salesline_core::AppError;
use salesline_domain::{Customer, CustomerDetails, Lead, LeadDetails, LeadStatus};

use super::types::{
    CreateLeadRequest, CustomerResponse, LeadResponse, UpdateCustomerRequest, UpdateLeadRequest,
};
use crate::dto::common::parse_optional_user_id;

impl From<Lead> for LeadResponse {
    fn from(lead: Lead) -> Self {
        let details = lead.details().clone();

        Self {
            id: lead.id().to_string(),
            name: lead.name().as_str().to_owned(),
            company: details.company,
            email: details.email,
            phone: details.phone,
            source: details.source,
            estimated_value_cents: details.estimated_value_cents,
            status: lead.status().as_str().to_owned(),
            assigned_to: lead.assigned_to().map(ToString::to_string),
            created_by: lead.created_by().map(ToString::to_string),
            created_at: lead.created_at().to_rfc3339(),
            updated_at: lead.updated_at().to_rfc3339(),
        }
    }
}

impl From<Customer> for CustomerResponse {
    fn from(customer: Customer) -> Self {
        let details = customer.details().clone();

        Self {
            id: customer.id().to_string(),
            lead_id: customer.lead_id().map(|lead_id| lead_id.to_string()),
            name: customer.name().as_str().to_owned(),
            company: details.company,
            email: details.email,
            phone: details.phone,
            lifetime_value_cents: details.lifetime_value_cents,
            assigned_to: customer.assigned_to().map(ToString::to_string),
            created_by: customer.created_by().map(ToString::to_string),
            created_at: customer.created_at().to_rfc3339(),
        }
    }
}

impl TryFrom<CreateLeadRequest> for CreateLeadInput {
    type Error = AppError;

    fn try_from(value: CreateLeadRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            name: value.name,
            details: LeadDetails {
                company: value.company,
                email: value.email,
                phone: value.phone,
                source: value.source,
                estimated_value_cents: value.estimated_value_cents.unwrap_or_default(),
            },
            assigned_to: parse_optional_user_id(value.assigned_to)?,
        })
    }
}

impl TryFrom<UpdateLeadRequest> for UpdateLeadInput {
    type Error = AppError;

    fn try_from(value: UpdateLeadRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            name: value.name,
            details: LeadDetails {
                company: value.company,
                email: value.email,
                phone: value.phone,
                source: value.source,
                estimated_value_cents: value.estimated_value_cents.unwrap_or_default(),
            },
            status: value
                .status
                .as_deref()
                .map(LeadStatus::from_str)
                .transpose()?,
        })
    }
}

impl From<UpdateCustomerRequest> for UpdateCustomerInput {
    fn from(value: UpdateCustomerRequest) -> Self {
        Self {
            name: value.name,
            details: CustomerDetails {
                company: value.company,
                email: value.email,
                phone: value.phone,
                lifetime_value_cents: value.lifetime_value_cents.unwrap_or_default(),
            },
        }
    }
}
