//! Lead pipeline and customer operations.

use std::sync::Arc;

use salesline_core::AppResult;
use salesline_domain::{
    AuditAction, Customer, CustomerDetails, Lead, LeadDetails, LeadStatus, Permission, RecordId,
    ResourceAction, User, UserId,
};
use tracing::info;

use crate::{AccessScopeService, AuditEvent, AuditRepository, RecordRepository, RecordScope};

/// Input payload for lead creation.
#[derive(Debug, Clone)]
pub struct CreateLeadInput {
    /// Lead name.
    pub name: String,
    /// Contact and deal details.
    pub details: LeadDetails,
    /// Assignee; defaults to the creator.
    pub assigned_to: Option<UserId>,
}

/// Input payload for lead updates.
#[derive(Debug, Clone)]
pub struct UpdateLeadInput {
    /// Lead name.
    pub name: String,
    /// Contact and deal details.
    pub details: LeadDetails,
    /// New pipeline stage, when changing it.
    pub status: Option<LeadStatus>,
}

/// Input payload for customer updates.
#[derive(Debug, Clone)]
pub struct UpdateCustomerInput {
    /// Customer name.
    pub name: String,
    /// Customer details.
    pub details: CustomerDetails,
}

/// Application service for leads and the customers they convert into.
#[derive(Clone)]
pub struct LeadService {
    access: AccessScopeService,
    leads: RecordScope<Lead>,
    customers: RecordScope<Customer>,
    audit_repository: Arc<dyn AuditRepository>,
}

impl LeadService {
    /// Creates the service.
    #[must_use]
    pub fn new(
        access: AccessScopeService,
        lead_repository: Arc<dyn RecordRepository<Lead>>,
        customer_repository: Arc<dyn RecordRepository<Customer>>,
        audit_repository: Arc<dyn AuditRepository>,
    ) -> Self {
        Self {
            leads: RecordScope::new(access.clone(), lead_repository),
            customers: RecordScope::new(access.clone(), customer_repository),
            access,
            audit_repository,
        }
    }

    /// Lists leads visible to the actor, optionally narrowed to one stage.
    pub async fn list_leads(&self, actor: &User, status: Option<LeadStatus>) -> AppResult<Vec<Lead>> {
        let leads = self.leads.list(actor).await?;

        Ok(match status {
            Some(status) => leads
                .into_iter()
                .filter(|lead| lead.status() == status)
                .collect(),
            None => leads,
        })
    }

    /// Loads one lead.
    pub async fn get_lead(&self, actor: &User, lead_id: RecordId) -> AppResult<Lead> {
        self.leads.get(actor, lead_id).await
    }

    /// Creates a lead owned by the actor and assigned to them unless another
    /// accessible assignee is named.
    pub async fn create_lead(&self, actor: &User, input: CreateLeadInput) -> AppResult<Lead> {
        self.access.require_permission(actor, Permission::LeadCreate)?;

        let assignee = match input.assigned_to {
            Some(assignee_id) if &assignee_id != actor.id() => self
                .access
                .require_accessible_user(actor, &assignee_id)
                .await?
                .id()
                .clone(),
            Some(assignee_id) => assignee_id,
            None => actor.id().clone(),
        };

        let lead = Lead::new(input.name, input.details, actor.id().clone(), Some(assignee))?;
        let lead = self.leads.insert(actor, lead).await?;

        self.record_audit(actor, AuditAction::LeadCreated, "lead", lead.id(), None)
            .await?;
        info!(actor_id = %actor.id(), lead_id = %lead.id(), "lead created");
        Ok(lead)
    }

    /// Updates name, details and optionally the pipeline stage.
    pub async fn update_lead(
        &self,
        actor: &User,
        lead_id: RecordId,
        input: UpdateLeadInput,
    ) -> AppResult<Lead> {
        let mut lead = self
            .leads
            .get_for(actor, lead_id, ResourceAction::Edit)
            .await?;

        lead.update(input.name, input.details)?;
        if let Some(status) = input.status {
            lead.set_status(status)?;
        }

        self.leads.save(lead).await
    }

    /// Reassigns a lead. `None` returns it to the house pool.
    pub async fn assign_lead(
        &self,
        actor: &User,
        lead_id: RecordId,
        assignee_id: Option<UserId>,
    ) -> AppResult<Lead> {
        let mut lead = self
            .leads
            .get_with_permission(actor, lead_id, Permission::LeadAssign)
            .await?;

        if let Some(assignee_id) = &assignee_id {
            self.access
                .require_accessible_user(actor, assignee_id)
                .await?;
        }

        lead.assign_to(assignee_id.clone());
        let lead = self.leads.save(lead).await?;

        let detail = assignee_id
            .as_ref()
            .map_or_else(|| "unassigned".to_owned(), |id| format!("assigned to {id}"));
        self.record_audit(
            actor,
            AuditAction::LeadAssigned,
            "lead",
            lead.id(),
            Some(detail),
        )
        .await?;
        Ok(lead)
    }

    /// Deletes a lead.
    pub async fn delete_lead(&self, actor: &User, lead_id: RecordId) -> AppResult<()> {
        let lead = self.leads.delete(actor, lead_id).await?;

        self.record_audit(
            actor,
            AuditAction::LeadDeleted,
            "lead",
            lead_id,
            Some(lead.name().as_str().to_owned()),
        )
        .await?;
        info!(actor_id = %actor.id(), lead_id = %lead_id, "lead deleted");
        Ok(())
    }

    /// Marks a lead as won and creates the customer it becomes.
    ///
    /// The customer inherits both owner references of the lead.
    pub async fn convert_lead(&self, actor: &User, lead_id: RecordId) -> AppResult<Customer> {
        let mut lead = self
            .leads
            .get_with_permission(actor, lead_id, Permission::LeadConvert)
            .await?;

        let customer = lead.convert()?;
        self.leads.save(lead).await?;
        let customer = self.customers.store_derived(customer).await?;

        self.record_audit(
            actor,
            AuditAction::LeadConverted,
            "lead",
            lead_id,
            Some(format!("customer {}", customer.id())),
        )
        .await?;
        info!(actor_id = %actor.id(), lead_id = %lead_id, customer_id = %customer.id(), "lead converted");
        Ok(customer)
    }

    /// Lists customers visible to the actor.
    pub async fn list_customers(&self, actor: &User) -> AppResult<Vec<Customer>> {
        self.customers.list(actor).await
    }

    /// Loads one customer.
    pub async fn get_customer(&self, actor: &User, customer_id: RecordId) -> AppResult<Customer> {
        self.customers.get(actor, customer_id).await
    }

    /// Updates customer name and details.
    pub async fn update_customer(
        &self,
        actor: &User,
        customer_id: RecordId,
        input: UpdateCustomerInput,
    ) -> AppResult<Customer> {
        let mut customer = self
            .customers
            .get_for(actor, customer_id, ResourceAction::Edit)
            .await?;

        customer.update(input.name, input.details)?;
        self.customers.save(customer).await
    }

    /// Deletes a customer.
    pub async fn delete_customer(&self, actor: &User, customer_id: RecordId) -> AppResult<()> {
        self.customers.delete(actor, customer_id).await?;
        Ok(())
    }

    async fn record_audit(
        &self,
        actor: &User,
        action: AuditAction,
        resource_type: &str,
        resource_id: RecordId,
        detail: Option<String>,
    ) -> AppResult<()> {
        self.audit_repository
            .append_event(AuditEvent::new(
                actor.id(),
                action,
                resource_type,
                resource_id,
                detail,
            ))
            .await
    }
}
