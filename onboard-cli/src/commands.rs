//! Subcommand implementations.

use std::fmt::Write as _;
use std::process::ExitCode;

use anyhow::{Context, bail};
use chrono::NaiveDate;
use onboard_forms::{FieldKind, FieldName, FieldValue, FormErrors, FormState, FormValues, Policy};
use onboard_lib::OnboardClient;
use onboard_lib::api::users::{USERS_ERROR, User, summary};
use onboard_lib::api::{LoginRequest, SignupRequest, login as login_api};

use crate::SignupArgs;

const FIX_ERRORS: &str = "Please fix all errors before submitting";
const SIGNUP_SUCCESS: &str = "Account created successfully!";
const LOGIN_SUCCESS: &str = "Signed in successfully!";

/// Validates a single value. Exits non-zero when the value is rejected.
pub fn check(login: bool, field: &str, value: &str, today: NaiveDate) -> anyhow::Result<ExitCode> {
    let field: FieldName = field.parse()?;
    let policy = if login { Policy::Login } else { Policy::Signup };
    if !policy.includes(field) {
        bail!("{} is not part of the {:?} form", field.label(), policy);
    }

    let value = parse_value(field, value)?;
    match policy.validate(field, &value, today).into_message() {
        None => {
            println!("{}: ok", field.label());
            Ok(ExitCode::SUCCESS)
        }
        Some(message) => {
            println!("{}: {}", field.label(), message);
            Ok(ExitCode::FAILURE)
        }
    }
}

fn parse_value(field: FieldName, raw: &str) -> anyhow::Result<FieldValue> {
    match field.kind() {
        FieldKind::Text => Ok(FieldValue::from(raw)),
        FieldKind::Date if raw.trim().is_empty() => Ok(FieldValue::Date(None)),
        FieldKind::Date => {
            let date = raw
                .trim()
                .parse::<NaiveDate>()
                .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", raw))?;
            Ok(FieldValue::from(date))
        }
    }
}

/// Builds the sign-up form from command-line values.
fn signup_form(args: SignupArgs) -> FormState {
    let values = FormValues::new()
        .with(FieldName::Username, args.username)
        .with(FieldName::Password, args.password)
        .with(FieldName::FullName, args.full_name)
        .with(FieldName::DateOfBirth, args.dob)
        .with(FieldName::Address, args.address)
        .with(FieldName::Country, args.country)
        .with(FieldName::Email, args.email)
        .with(FieldName::PhoneNumber, args.phone);
    FormState::with_values(Policy::Signup, values)
}

/// Validates the sign-up form and creates the account.
pub async fn signup(client: &OnboardClient, args: SignupArgs, today: NaiveDate) -> anyhow::Result<ExitCode> {
    let mut form = signup_form(args);
    if !form.validate_all(today) {
        eprint!("{}", render_errors(form.errors()));
        return Ok(ExitCode::FAILURE);
    }

    match client.signup(&SignupRequest::from_form(form.values())).await {
        Ok(_) => {
            println!("{}", SIGNUP_SUCCESS);
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            eprintln!("{}", e.user_message());
            Ok(ExitCode::FAILURE)
        }
    }
}

/// Validates the sign-in form and signs in.
///
/// A rejected sign-in is mapped back onto the email and password fields.
pub async fn login(
    client: &OnboardClient,
    email: &str,
    password: &str,
    today: NaiveDate,
) -> anyhow::Result<ExitCode> {
    let mut form = FormState::new(Policy::Login);
    form.change(FieldName::Email, email, today);
    form.change(FieldName::Password, password, today);
    if !form.validate_all(today) {
        eprint!("{}", render_errors(form.errors()));
        return Ok(ExitCode::FAILURE);
    }

    match client.login(&LoginRequest::from_form(form.values())).await {
        Ok(_) => {
            println!("{}", LOGIN_SUCCESS);
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            match login_api::failure_field_errors(&e) {
                Some(errors) => {
                    form.merge_errors(errors);
                    eprint!("{}", render_errors(form.errors()));
                }
                None => eprintln!("{}", e.user_message()),
            }
            Ok(ExitCode::FAILURE)
        }
    }
}

/// Prints the user list.
pub async fn users(client: &OnboardClient) -> anyhow::Result<ExitCode> {
    match client.users().await {
        Ok(list) => {
            for user in &list {
                print!("{}", render_user(user));
            }
            println!("{}", summary(list.len()));
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            eprintln!("{}", e.alert_message(USERS_ERROR));
            Ok(ExitCode::FAILURE)
        }
    }
}

fn render_errors(errors: &FormErrors) -> String {
    let mut out = format!("{}\n", FIX_ERRORS);
    for error in errors.iter() {
        let _ = writeln!(out, "  {}: {}", error.field.label(), error.message);
    }
    out
}

fn render_user(user: &User) -> String {
    let na = |v: &Option<String>| v.as_deref().unwrap_or("N/A").to_string();

    let mut out = format!("{}\n", user.display_name());
    if let Some(username) = &user.username {
        let _ = writeln!(out, "  @{}", username);
    }
    let _ = writeln!(out, "  Email:   {}", na(&user.email));
    let _ = writeln!(out, "  Phone:   {}", na(&user.phone));
    let _ = writeln!(out, "  DOB:     {}", user.dob_display());
    let _ = writeln!(out, "  Address: {}", na(&user.address));
    let _ = writeln!(out, "  Country: {}", na(&user.country));
    out
}
