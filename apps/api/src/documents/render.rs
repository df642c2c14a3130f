//! Placeholder substitution for document templates.
//!
//! This is deliberately NOT a templating language. Five fixed tokens are
//! replaced with employee/company field values; everything else in the
//! template body — including unrecognized `{{...}}` text — passes through
//! unchanged.

use crate::models::company::CompanyRow;
use crate::models::employee::EmployeeRow;

/// Read-only inputs for one rendering pass.
pub struct RenderContext<'a> {
    pub employee: &'a EmployeeRow,
    pub company: &'a CompanyRow,
}

/// Substitutes every occurrence of each recognized token in `body_html`.
///
/// Absent source values render as the empty string. Numbers render via plain
/// decimal `Display` (no separators, no currency symbol). Tokens are matched
/// literally and case-sensitively.
pub fn render_template(body_html: &str, ctx: &RenderContext<'_>) -> String {
    let replacements: [(&str, String); 5] = [
        ("{{employee_name}}", ctx.employee.name.clone()),
        ("{{company_name}}", ctx.company.name.clone()),
        (
            "{{date_of_joining}}",
            ctx.employee.date_of_joining.to_string(),
        ),
        (
            "{{job_title}}",
            ctx.employee.job_title.clone().unwrap_or_default(),
        ),
        (
            "{{annual_ctc}}",
            ctx.employee
                .annual_ctc
                .map(|v| v.to_string())
                .unwrap_or_default(),
        ),
    ];

    let mut html = body_html.to_string();
    for (token, value) in &replacements {
        html = html.replace(token, value);
    }
    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};
    use uuid::Uuid;

    fn employee(name: &str) -> EmployeeRow {
        EmployeeRow {
            id: Uuid::new_v4(),
            company_id: Uuid::new_v4(),
            name: name.to_string(),
            job_title: Some("Engineer".to_string()),
            department: None,
            mobile: "5550100".to_string(),
            email: "asha@example.com".to_string(),
            date_of_joining: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            gender: None,
            annual_ctc: Some(1_200_000.0),
            status: Some("active".to_string()),
            avatar_url: None,
            login_otp: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn company(name: &str) -> CompanyRow {
        CompanyRow {
            id: Uuid::new_v4(),
            name: name.to_string(),
            code: None,
            logo_url: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_substitutes_recognized_tokens() {
        let employee = employee("Asha Rao");
        let company = company("Acme");
        let html = render_template(
            "<p>Dear {{employee_name}}, welcome to {{company_name}}.</p>",
            &RenderContext {
                employee: &employee,
                company: &company,
            },
        );
        assert_eq!(html, "<p>Dear Asha Rao, welcome to Acme.</p>");
    }

    #[test]
    fn test_replaces_every_occurrence() {
        let employee = employee("Asha Rao");
        let company = company("Acme");
        let html = render_template(
            "{{employee_name}} and again {{employee_name}}",
            &RenderContext {
                employee: &employee,
                company: &company,
            },
        );
        assert_eq!(html, "Asha Rao and again Asha Rao");
    }

    #[test]
    fn test_unrecognized_tokens_pass_through() {
        let employee = employee("Asha Rao");
        let company = company("Acme");
        let body = "<p>{{probation_period}} stays, {{Employee_Name}} too.</p>";
        let html = render_template(
            body,
            &RenderContext {
                employee: &employee,
                company: &company,
            },
        );
        assert_eq!(html, body);
    }

    #[test]
    fn test_missing_fields_render_empty() {
        let mut emp = employee("Asha Rao");
        emp.job_title = None;
        emp.annual_ctc = None;
        let company = company("Acme");
        let html = render_template(
            "[{{job_title}}][{{annual_ctc}}]",
            &RenderContext {
                employee: &emp,
                company: &company,
            },
        );
        assert_eq!(html, "[][]");
    }

    #[test]
    fn test_compensation_renders_plain_decimal() {
        let employee = employee("Asha Rao");
        let company = company("Acme");
        let html = render_template(
            "{{annual_ctc}}",
            &RenderContext {
                employee: &employee,
                company: &company,
            },
        );
        assert_eq!(html, "1200000");
    }

    #[test]
    fn test_date_renders_iso() {
        let employee = employee("Asha Rao");
        let company = company("Acme");
        let html = render_template(
            "{{date_of_joining}}",
            &RenderContext {
                employee: &employee,
                company: &company,
            },
        );
        assert_eq!(html, "2024-01-15");
    }
}
