//! Response letter rendering from embedded Tera templates

use chrono::{DateTime, Utc};
use rust_embed::Embed;
use tera::Tera;
use thiserror::Error;

use crate::core::reporting::RequestDetails;
use crate::entities::RequestStatus;

#[derive(Embed)]
#[folder = "templates/letters/"]
struct EmbeddedLetters;

/// Which response letter to produce for a request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LetterKind {
    Acknowledgement,
    Fulfillment,
    Denial,
}

impl LetterKind {
    /// Letter implied by the request's current status
    pub fn for_status(status: RequestStatus) -> LetterKind {
        match status {
            RequestStatus::Fulfilled => LetterKind::Fulfillment,
            RequestStatus::Denied | RequestStatus::Appealed => LetterKind::Denial,
            RequestStatus::Submitted | RequestStatus::Processing | RequestStatus::Closed => {
                LetterKind::Acknowledgement
            }
        }
    }

    fn template_name(&self) -> &'static str {
        match self {
            LetterKind::Acknowledgement => "acknowledgement.txt.tera",
            LetterKind::Fulfillment => "fulfillment.txt.tera",
            LetterKind::Denial => "denial.txt.tera",
        }
    }
}

impl std::fmt::Display for LetterKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            LetterKind::Acknowledgement => "acknowledgement",
            LetterKind::Fulfillment => "fulfillment",
            LetterKind::Denial => "denial",
        };
        write!(f, "{}", s)
    }
}

impl std::str::FromStr for LetterKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "acknowledgement" | "ack" => Ok(LetterKind::Acknowledgement),
            "fulfillment" => Ok(LetterKind::Fulfillment),
            "denial" => Ok(LetterKind::Denial),
            _ => Err(format!("Unknown letter kind: {}", s)),
        }
    }
}

#[derive(Debug, Error)]
pub enum LetterError {
    #[error("Letter template not found: {0}")]
    NotFound(String),

    #[error("Letter rendering error: {0}")]
    RenderError(String),
}

/// Letter generator using Tera
pub struct LetterGenerator {
    tera: Tera,
}

impl LetterGenerator {
    /// Create a new letter generator with embedded templates
    pub fn new() -> Result<Self, LetterError> {
        let mut tera = Tera::default();

        // Load embedded templates
        for file in EmbeddedLetters::iter() {
            let filename = file.as_ref();
            if let Some(content) = EmbeddedLetters::get(filename) {
                if let Ok(template_str) = std::str::from_utf8(&content.data) {
                    tera.add_raw_template(filename, template_str)
                        .map_err(|e| LetterError::RenderError(e.to_string()))?;
                }
            }
        }

        Ok(Self { tera })
    }

    /// Render a letter for the given request
    pub fn render(
        &self,
        kind: LetterKind,
        details: &RequestDetails,
        now: DateTime<Utc>,
    ) -> Result<String, LetterError> {
        let request = &details.request;
        let mut context = tera::Context::new();
        context.insert("today", &now.format("%Y-%m-%d").to_string());
        context.insert("tracking_number", &request.tracking_number);
        context.insert("request_id", &request.request_id.to_string());
        context.insert("requester_name", &request.requester_name);
        context.insert("requester_email", &request.requester_email);
        context.insert("agency", &request.agency);
        context.insert("subject", &request.subject);
        context.insert("status", &request.status.to_string());
        context.insert(
            "submitted_date",
            &request.submitted_at.format("%Y-%m-%d").to_string(),
        );
        context.insert("due_date", &request.due_at.format("%Y-%m-%d").to_string());
        context.insert("assigned_to", &request.assigned_to);
        context.insert("fee_waived", &request.fee_waived);

        match kind {
            LetterKind::Acknowledgement => {}
            LetterKind::Fulfillment => {
                let package = details.fulfillment.as_ref();
                context.insert(
                    "documents",
                    &package.map(|p| p.documents.clone()).unwrap_or_default(),
                );
                context.insert(
                    "redaction_count",
                    &package.map(|p| p.redactions.len()).unwrap_or_default(),
                );
                context.insert(
                    "exemptions",
                    &package
                        .map(|p| p.exemptions_cited.clone())
                        .unwrap_or_default(),
                );
                context.insert(
                    "response_letter",
                    &package
                        .map(|p| p.response_letter.clone())
                        .unwrap_or_default(),
                );
            }
            LetterKind::Denial => {
                let denial = details.denial.as_ref();
                context.insert(
                    "reason",
                    &denial.map(|d| d.reason.clone()).unwrap_or_default(),
                );
                context.insert(
                    "exemptions",
                    &denial.map(|d| d.exemptions.clone()).unwrap_or_default(),
                );
            }
        }

        let name = kind.template_name();
        if self.tera.get_template_names().any(|n| n == name) {
            self.tera
                .render(name, &context)
                .map_err(|e| LetterError::RenderError(e.to_string()))
        } else {
            Err(LetterError::NotFound(name.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{Denial, FulfillmentPackage, Request, RequestIntake, RequestStatus};
    use chrono::{Duration, TimeZone};

    fn sample_request() -> Request {
        let intake = RequestIntake {
            requester_name: "Jane Doe".to_string(),
            requester_email: "jane@example.org".to_string(),
            agency: "EPA".to_string(),
            subject: "Water quality reports".to_string(),
            description: "All 2025 water quality reports for Region 5".to_string(),
            fee_waived: false,
        };
        let submitted = Utc.with_ymd_and_hms(2026, 2, 1, 12, 0, 0).unwrap();
        Request::new(intake, submitted, Duration::days(20))
    }

    fn details_for(request: Request) -> RequestDetails {
        RequestDetails {
            request,
            fulfillment: None,
            denial: None,
            appeals: Vec::new(),
            notes: Vec::new(),
        }
    }

    #[test]
    fn kind_defaults_follow_status() {
        assert_eq!(
            LetterKind::for_status(RequestStatus::Submitted),
            LetterKind::Acknowledgement
        );
        assert_eq!(
            LetterKind::for_status(RequestStatus::Fulfilled),
            LetterKind::Fulfillment
        );
        assert_eq!(
            LetterKind::for_status(RequestStatus::Denied),
            LetterKind::Denial
        );
        assert_eq!(
            LetterKind::for_status(RequestStatus::Appealed),
            LetterKind::Denial
        );
    }

    #[test]
    fn kind_parses_from_str() {
        assert_eq!(
            "ack".parse::<LetterKind>().unwrap(),
            LetterKind::Acknowledgement
        );
        assert_eq!(
            "Denial".parse::<LetterKind>().unwrap(),
            LetterKind::Denial
        );
        assert!("memo".parse::<LetterKind>().is_err());
    }

    #[test]
    fn acknowledgement_names_tracking_and_due_date() {
        let generator = LetterGenerator::new().unwrap();
        let details = details_for(sample_request());
        let now = Utc.with_ymd_and_hms(2026, 2, 2, 9, 0, 0).unwrap();

        let letter = generator
            .render(LetterKind::Acknowledgement, &details, now)
            .unwrap();

        assert!(letter.contains("2026-02-02"));
        assert!(letter.contains(&details.request.tracking_number.to_string()));
        assert!(letter.contains("Dear Jane Doe"));
        assert!(letter.contains("2026-02-21"));
        assert!(letter.contains("EPA"));
    }

    #[test]
    fn fulfillment_lists_documents_and_exemptions() {
        let generator = LetterGenerator::new().unwrap();
        let mut request = sample_request();
        request.status = RequestStatus::Fulfilled;
        let package = FulfillmentPackage::new(
            request.request_id.clone(),
            vec!["report_2025.pdf".to_string(), "appendix.pdf".to_string()],
            vec!["p3 names".to_string()],
            vec!["Exemption 6".to_string()],
            String::new(),
            "Officer Smith".to_string(),
            Utc.with_ymd_and_hms(2026, 2, 10, 12, 0, 0).unwrap(),
        );
        let mut details = details_for(request);
        details.fulfillment = Some(package);
        let now = Utc.with_ymd_and_hms(2026, 2, 10, 12, 0, 0).unwrap();

        let letter = generator
            .render(LetterKind::Fulfillment, &details, now)
            .unwrap();

        assert!(letter.contains("report_2025.pdf"));
        assert!(letter.contains("appendix.pdf"));
        assert!(letter.contains("Exemption 6"));
        assert!(letter.contains("1 redaction"));
    }

    #[test]
    fn denial_carries_reason_and_appeal_rights() {
        let generator = LetterGenerator::new().unwrap();
        let mut request = sample_request();
        request.status = RequestStatus::Denied;
        let denial = Denial::new(
            request.request_id.clone(),
            "Records are part of an open investigation".to_string(),
            vec!["Exemption 7(A)".to_string()],
            "Officer Smith".to_string(),
            Utc.with_ymd_and_hms(2026, 2, 12, 12, 0, 0).unwrap(),
        );
        let mut details = details_for(request);
        details.denial = Some(denial);
        let now = Utc.with_ymd_and_hms(2026, 2, 12, 12, 0, 0).unwrap();

        let letter = generator.render(LetterKind::Denial, &details, now).unwrap();

        assert!(letter.contains("open investigation"));
        assert!(letter.contains("Exemption 7(A)"));
        assert!(letter.contains("appeal"));
    }

    #[test]
    fn missing_package_renders_with_empty_release() {
        let generator = LetterGenerator::new().unwrap();
        let details = details_for(sample_request());
        let now = Utc.with_ymd_and_hms(2026, 2, 10, 12, 0, 0).unwrap();

        let letter = generator
            .render(LetterKind::Fulfillment, &details, now)
            .unwrap();

        assert!(letter.contains("(no documents)"));
    }
}
