//! Payroll employee listing

use std::sync::Arc;

use xero_gateway_client::{EmployeeQuery, HeaderContext, SessionProfile};

use crate::error::CoreResult;
use crate::services::{respond, ServiceContext};
use crate::types::{Employee, ResultEnvelope};

/// Payroll employee listing service
///
/// Authenticates with the payroll scope set, never the accounting default.
pub struct PayrollService {
    ctx: Arc<ServiceContext>,
}

impl PayrollService {
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self { ctx }
    }

    pub async fn list_employees(&self, page: Option<u32>) -> ResultEnvelope<Vec<Employee>> {
        respond("list_payroll_employees", self.fetch(page).await)
    }

    async fn fetch(&self, page: Option<u32>) -> CoreResult<Vec<Employee>> {
        let session = self.ctx.open_session(SessionProfile::Payroll).await?;
        let employees = session
            .list_payroll_employees(&EmployeeQuery { page }, &HeaderContext::for_read())
            .await?;
        Ok(employees.unwrap_or_default())
    }
}
