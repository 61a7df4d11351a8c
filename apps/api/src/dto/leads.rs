mod conversions;
mod types;

pub use types::{
    AssignLeadRequest, CreateLeadRequest, CustomerResponse, LeadResponse, UpdateCustomerRequest,
    UpdateLeadRequest,
};
