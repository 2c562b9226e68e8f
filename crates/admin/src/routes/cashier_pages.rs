//! Cashier admin screens (server-rendered).
//!
//! ```text
//! GET  /cashier              - Cashier list with per-row delete
//! GET  /cashier/new          - Add-cashier form
//! POST /cashier/new          - Submit the form; shows credentials once on success
//! POST /cashier/{id}/delete  - Delete and redirect back to the list
//! ```

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
};
use secrecy::ExposeSecret;
use tracing::instrument;

use nature_core::{CashierField, CashierId, CashierInput, FieldViolation};

use crate::error::AppError;
use crate::filters;
use crate::models::Cashier;
use crate::services::CashierError;
use crate::state::AppState;

/// Build the cashier pages router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/cashier", get(index))
        .route("/cashier/new", get(new_form).post(create))
        .route("/cashier/{id}/delete", post(delete))
}

/// Browser-side mirror of the server's email rule. `-` is escaped so the
/// pattern also compiles under the `v` flag browsers apply to `pattern`.
const EMAIL_PATTERN: &str = r"\w+([.\-]?\w+)*@\w+([.\-]?\w+)*(\.\w{2,3})+";

// =============================================================================
// View Types
// =============================================================================

/// Cashier row for the list table.
#[derive(Debug, Clone)]
pub struct CashierRowView {
    pub id: i32,
    pub cashier_name: String,
    pub user_name: String,
    pub mobile: String,
    pub aadhaar: String,
    pub store_location: String,
    pub email: String,
    pub created_on: String,
}

impl From<&Cashier> for CashierRowView {
    fn from(cashier: &Cashier) -> Self {
        Self {
            id: cashier.id.as_i32(),
            cashier_name: cashier.cashier_name.clone(),
            user_name: cashier.user_name.to_string(),
            mobile: cashier.mobile.to_string(),
            aadhaar: cashier.aadhaar.to_string(),
            store_location: cashier.store_location.clone(),
            email: cashier.email.to_string(),
            created_on: cashier.created_at.format("%Y-%m-%d").to_string(),
        }
    }
}

/// One input of the add-cashier form, with its submitted value and error.
#[derive(Debug, Clone)]
pub struct FormFieldView {
    pub name: &'static str,
    pub label: &'static str,
    pub input_type: &'static str,
    /// HTML `pattern` attribute; empty for none.
    pub pattern: &'static str,
    pub hint: &'static str,
    pub value: String,
    pub errors: Vec<String>,
}

impl FormFieldView {
    fn build(input: &CashierInput, violations: &[FieldViolation]) -> Vec<Self> {
        CashierField::INPUTS
            .into_iter()
            .map(|field| {
                let (input_type, pattern, hint) = match field {
                    CashierField::Mobile => ("tel", "[0-9]{10}", "10 digits"),
                    CashierField::Aadhaar => ("text", "[0-9]{12}", "12 digits"),
                    CashierField::Email => ("email", EMAIL_PATTERN, ""),
                    _ => ("text", "", ""),
                };
                Self {
                    name: field.as_str(),
                    label: field.label(),
                    input_type,
                    pattern,
                    hint,
                    value: input.get(field).unwrap_or_default().to_owned(),
                    errors: violations
                        .iter()
                        .filter(|v| v.field == field)
                        .map(|v| v.message.clone())
                        .collect(),
                }
            })
            .collect()
    }

    /// Whether this input has any error to show.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

// =============================================================================
// Templates
// =============================================================================

/// Cashier list page template.
#[derive(Template, WebTemplate)]
#[template(path = "cashiers/index.html")]
pub struct CashierIndexTemplate {
    pub cashiers: Vec<CashierRowView>,
}

/// Add-cashier form template.
#[derive(Template, WebTemplate)]
#[template(path = "cashiers/new.html")]
pub struct NewCashierTemplate {
    pub fields: Vec<FormFieldView>,
    /// Summary of why the last submission failed.
    pub error: Option<String>,
    /// Messages for fields without an input (e.g. a username conflict).
    pub form_errors: Vec<String>,
}

impl NewCashierTemplate {
    fn blank() -> Self {
        Self {
            fields: FormFieldView::build(&CashierInput::default(), &[]),
            error: None,
            form_errors: Vec::new(),
        }
    }

    fn rejected(input: &CashierInput, err: &CashierError) -> Self {
        let violations = err.violations();
        Self {
            fields: FormFieldView::build(input, violations),
            error: Some(err.to_string()),
            form_errors: violations
                .iter()
                .filter(|v| !CashierField::INPUTS.contains(&v.field))
                .map(|v| v.message.clone())
                .collect(),
        }
    }

    /// The failure summary, or an empty string.
    #[must_use]
    pub fn error_text(&self) -> &str {
        self.error.as_deref().unwrap_or_default()
    }
}

/// Error page for failures the user cannot fix from the form.
#[derive(Template, WebTemplate)]
#[template(path = "cashiers/error.html")]
pub struct ErrorPageTemplate {
    pub message: String,
}

/// An [`AppError`] rendered as an HTML page instead of a JSON body.
#[derive(Debug)]
pub struct PageError(AppError);

impl From<AppError> for PageError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl From<CashierError> for PageError {
    fn from(err: CashierError) -> Self {
        Self(err.into())
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        self.0.report();
        let status = self.0.status();
        let page = ErrorPageTemplate {
            message: self.0.body().error,
        };
        (status, page).into_response()
    }
}

/// Shown once after a cashier is added, with the generated credentials.
#[derive(Template, WebTemplate)]
#[template(path = "cashiers/created.html")]
pub struct CashierCreatedTemplate {
    pub cashier_name: String,
    pub user_name: String,
    pub password: String,
}

// =============================================================================
// Handlers
// =============================================================================

/// Cashier list page.
#[instrument(skip(state))]
async fn index(State(state): State<AppState>) -> Result<CashierIndexTemplate, PageError> {
    let cashiers = state.cashiers().list_cashiers().await?;
    Ok(CashierIndexTemplate {
        cashiers: cashiers.iter().map(CashierRowView::from).collect(),
    })
}

/// Empty add-cashier form.
async fn new_form() -> NewCashierTemplate {
    NewCashierTemplate::blank()
}

/// Handle the add-cashier form.
///
/// Client errors re-render the form with the submitted values and
/// per-field messages.
#[instrument(skip_all)]
async fn create(
    State(state): State<AppState>,
    Form(input): Form<CashierInput>,
) -> Result<Response, PageError> {
    match state.cashiers().add_cashier(&input).await {
        Ok(added) => Ok(CashierCreatedTemplate {
            cashier_name: input
                .cashier_name
                .as_deref()
                .unwrap_or_default()
                .trim()
                .to_owned(),
            user_name: added.user_name.to_string(),
            password: added.password.expose_secret().to_owned(),
        }
        .into_response()),
        Err(err) if !err.violations().is_empty() => Ok((
            StatusCode::BAD_REQUEST,
            NewCashierTemplate::rejected(&input, &err),
        )
            .into_response()),
        Err(err) => Err(err.into()),
    }
}

/// Delete a cashier and return to the list.
///
/// Unknown or unparseable IDs are ignored so a repeated submit is harmless.
#[instrument(skip(state))]
async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Redirect, PageError> {
    if let Ok(id) = id.parse::<CashierId>() {
        match state.cashiers().delete_cashier(id).await {
            Ok(_) | Err(CashierError::NotFound(_)) => {}
            Err(e) => return Err(e.into()),
        }
    }
    Ok(Redirect::to("/cashier"))
}
