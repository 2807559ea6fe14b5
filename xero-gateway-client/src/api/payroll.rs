//! Payroll (NZ) API requests

use reqwest::Method;

use crate::error::{ApiError, Result};
use crate::headers::HeaderContext;
use crate::scopes::PAYROLL_EMPLOYEES_SCOPE;
use crate::session::XeroApiSession;
use crate::traits::{ErrorContext, XeroSession};
use crate::types::{Employee, EmployeeQuery, EmployeesResponse};

use super::ApiKind;

/// Payroll API borrowed from an authenticated session.
#[derive(Debug, Clone, Copy)]
pub struct PayrollApi<'a> {
    session: &'a XeroApiSession,
}

impl<'a> PayrollApi<'a> {
    pub(crate) fn new(session: &'a XeroApiSession) -> Self {
        Self { session }
    }

    /// `GET /Employees[?page=N]`
    ///
    /// Refused locally when the session was not authenticated with the
    /// payroll employees scope.
    pub async fn list_employees(
        &self,
        query: &EmployeeQuery,
        ctx: &HeaderContext,
    ) -> Result<Option<Vec<Employee>>> {
        if !self.session.scopes().contains(PAYROLL_EMPLOYEES_SCOPE) {
            log::warn!("[payroll] Session lacks scope {PAYROLL_EMPLOYEES_SCOPE}");
            return Err(ApiError::PermissionDenied {
                api: "payroll".to_string(),
                raw_message: Some(format!(
                    "session scopes do not include {PAYROLL_EMPLOYEES_SCOPE}"
                )),
            });
        }

        let url = format!("{}/Employees", self.session.config().payroll_url());
        let mut request = self.session.request(Method::GET, &url, ctx);
        if let Some(page) = query.page {
            request = request.query(&[("page", page)]);
        }

        let resp: EmployeesResponse = ApiKind::Payroll
            .send(request, "GET", &url, ErrorContext::default())
            .await?;
        Ok(resp.employees)
    }
}
