// Form submission handlers
//
// Neither form is persisted. The recommendation intake forwards the visitor
// to the crop analysis page; the contact form is logged and acknowledged.

use axum::{
    extract::{rejection::FormRejection, Form},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;

use super::pages::{render, ContactTemplate, RecommendationTemplate};

pub const CONTACT_SUCCESS_MESSAGE: &str = "Message sent successfully!";
pub const CONTACT_FAILURE_MESSAGE: &str = "Failed to send message.";

#[derive(Debug, Deserialize)]
pub struct RecommendationIntake {
    pub location: Option<String>,
    #[serde(rename = "lastCrop")]
    pub last_crop: Option<String>,
    pub irrigation: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ContactMessage {
    pub name: Option<String>,
    pub email: Option<String>,
    pub message: Option<String>,
}

pub async fn submit_recommendation(form: Result<Form<RecommendationIntake>, FormRejection>) -> Response {
    match form {
        Ok(Form(intake)) => {
            tracing::debug!(
                "Recommendation intake: location={:?} last_crop={:?} irrigation={:?}",
                intake.location,
                intake.last_crop,
                intake.irrigation
            );
            Redirect::to("/crop-analysis").into_response()
        }
        Err(e) => {
            tracing::warn!("Unreadable recommendation form: {}", e);
            render(RecommendationTemplate {
                error: Some(e.body_text()),
            })
            .into_response()
        }
    }
}

pub async fn submit_contact(form: Result<Form<ContactMessage>, FormRejection>) -> Response {
    let template = match form {
        Ok(Form(contact)) => {
            tracing::info!(
                "Contact form submitted: {}, {}, {}",
                contact.name.as_deref().unwrap_or(""),
                contact.email.as_deref().unwrap_or(""),
                contact.message.as_deref().unwrap_or("")
            );
            ContactTemplate {
                success: Some(CONTACT_SUCCESS_MESSAGE.to_string()),
                error: None,
            }
        }
        Err(e) => {
            tracing::warn!("Unreadable contact form: {}", e);
            ContactTemplate {
                success: None,
                error: Some(CONTACT_FAILURE_MESSAGE.to_string()),
            }
        }
    };

    render(template).into_response()
}
