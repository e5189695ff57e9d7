//! Scenario command handler
//!
//! Each scenario is a small endpoint body: it either builds an outcome or
//! fails with a fault, and the response mapper turns that into a status
//! and JSON body exactly as an HTTP host would.

use crate::cli::{ScenarioArgs, ScenarioName};
use crate::error::Result;
use crate::logging::timing::Timer;
use crate::output::OutputWriter;
use faultline_core::response::STATUS_OK;
use faultline_core::{
    keys, map_outcome, map_result, tokens, Fault, Outcome, RenderContext, Response, Validator,
};
use serde::Serialize;

const JUICY: &str = "some dynamic juicy content just for you";

#[derive(Debug, Clone, Serialize)]
struct Contact {
    name: String,
    mobile: String,
}

fn jimbo() -> Contact {
    Contact {
        name: "jimbo jones".to_string(),
        mobile: "0400 123 123".to_string(),
    }
}

/// Handle the scenario command
pub fn handle_scenario(
    args: ScenarioArgs,
    ctx: &RenderContext,
    output: &mut OutputWriter,
) -> Result<()> {
    let timer = Timer::with_details("scenario", &format!("{:?}", args.scenario));
    let _entered = timer.span().enter();

    let response = run_scenario(&args, ctx)?;
    tracing::info!(scenario = ?args.scenario, status = response.status, "Scenario finished");
    output.response(&response)
}

/// Run a scenario to its mapped response
pub fn run_scenario(args: &ScenarioArgs, ctx: &RenderContext) -> Result<Response> {
    let response = match args.scenario {
        ScenarioName::NoContent => map_outcome(&no_content(ctx)),
        ScenarioName::Content => Response::new(STATUS_OK, Some(serde_json::to_value(jimbo())?)),
        ScenarioName::ResultContent => map_outcome(&result_content(ctx)),
        ScenarioName::BadRequest => map_result(&bad_request(ctx)),
        ScenarioName::NotFound => map_result(&not_found(ctx)),
        ScenarioName::Forbidden => map_result(&forbidden(ctx)),
        ScenarioName::Unauthorized => map_result(&unauthorized(ctx)),
        ScenarioName::Validator => {
            map_result(&register(ctx, args.name.as_deref(), args.submitted_emails()))
        }
    };
    Ok(response)
}

fn no_content(ctx: &RenderContext) -> Outcome<()> {
    Outcome::empty(ctx)
        .with_info(keys::INFO, Some(tokens! { "type" => JUICY }))
        .build()
}

fn result_content(ctx: &RenderContext) -> Outcome<Contact> {
    Outcome::of(ctx, jimbo())
        .with_info(keys::INFO, Some(tokens! { "type" => JUICY }))
        .with_warning(keys::WARNING, None)
        .build()
}

fn bad_request(ctx: &RenderContext) -> std::result::Result<Outcome<()>, Fault> {
    Err(Fault::from_messages(vec![
        ctx.info(keys::INFO, None, Some(tokens! { "type" => JUICY })),
        ctx.warning(keys::WARNING, None, None),
        ctx.error(keys::ERROR, None, None),
    ]))
}

fn not_found(ctx: &RenderContext) -> std::result::Result<Outcome<()>, Fault> {
    let id = "1000";
    Err(Fault::not_found::<String>(ctx, id))
}

fn forbidden(ctx: &RenderContext) -> std::result::Result<Outcome<()>, Fault> {
    Err(Fault::forbidden(ctx))
}

fn unauthorized(ctx: &RenderContext) -> std::result::Result<Outcome<()>, Fault> {
    Err(Fault::not_authenticated(ctx))
}

/// Accepts a name of 3 to 5 characters and at least one gmail address
fn register(
    ctx: &RenderContext,
    name: Option<&str>,
    emails: Option<&[String]>,
) -> std::result::Result<Outcome<&'static str>, Fault> {
    let accepted = emails.map_or(true, |emails| {
        emails.iter().any(|email| email.ends_with("gmail.com"))
    });

    let mut validator = Validator::new(ctx);
    validator
        .validate_property_is_required("Name", &name)
        .validate_string_length("Name", name, 3, 5)
        .validate_collection_has_values("Emails", emails)
        .validate(
            keys::VALIDATION_ERROR,
            Some(tokens! { "email" => emails.and_then(|emails| emails.first()) }),
            accepted,
        );
    validator.finish()?;

    Ok(Outcome::of(ctx, "Ok Result").build())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn args(scenario: ScenarioName, name: Option<&str>, emails: &[&str]) -> ScenarioArgs {
        ScenarioArgs {
            scenario,
            name: name.map(str::to_string),
            emails: emails.iter().map(|e| e.to_string()).collect(),
            empty_emails: false,
        }
    }

    fn run(scenario: ScenarioName, name: Option<&str>, emails: &[&str]) -> Response {
        let ctx = RenderContext::with_builtin_catalog("en-US");
        run_scenario(&args(scenario, name, emails), &ctx).unwrap()
    }

    #[test]
    fn test_no_content_with_message_is_ok() {
        let response = run(ScenarioName::NoContent, None, &[]);
        assert_eq!(response.status, 200);
        assert_eq!(
            response.body,
            Some(json!({
                "messages": [{
                    "type": "information",
                    "content": "Here is some information: some dynamic juicy content just for you."
                }]
            }))
        );
    }

    #[test]
    fn test_content_is_plain_payload() {
        assert_eq!(
            run(ScenarioName::Content, None, &[]),
            Response::new(200, Some(json!({ "name": "jimbo jones", "mobile": "0400 123 123" })))
        );
    }

    #[test]
    fn test_result_content_wraps_payload() {
        let body = run(ScenarioName::ResultContent, None, &[]).body.unwrap();
        assert_eq!(body["data"]["name"], json!("jimbo jones"));
        assert_eq!(body["messages"][1], json!({ "type": "warning", "content": "This is a warning." }));
    }

    #[test]
    fn test_fault_scenarios_statuses() {
        assert_eq!(run(ScenarioName::BadRequest, None, &[]).status, 400);
        assert_eq!(run(ScenarioName::Unauthorized, None, &[]).status, 401);
        assert_eq!(run(ScenarioName::Forbidden, None, &[]).status, 403);

        let not_found = run(ScenarioName::NotFound, None, &[]);
        assert_eq!(not_found.status, 404);
        assert_eq!(
            not_found.body.unwrap()["message"],
            json!("The String with identifier '1000' could not be found.")
        );
    }

    #[test]
    fn test_bad_request_primary_message_is_first() {
        let body = run(ScenarioName::BadRequest, None, &[]).body.unwrap();
        assert_eq!(
            body["message"],
            json!("Here is some information: some dynamic juicy content just for you.")
        );
        assert_eq!(body["extras"].as_array().map(Vec::len), Some(3));
    }

    #[test]
    fn test_validator_scenarios() {
        let empty = run(ScenarioName::Validator, None, &[]);
        assert_eq!(empty.status, 400);
        assert_eq!(
            empty.body.unwrap()["extras"],
            json!([
                { "type": "validation-error", "content": "Name is required." },
                { "type": "validation-error", "content": "Name must be between 3 and 5 characters long." },
                { "type": "validation-error", "content": "Emails must contain at least one value." }
            ])
        );

        let rejected = run(ScenarioName::Validator, Some("Bart"), &["bart@springfield.org"]);
        assert_eq!(
            rejected.body.unwrap()["extras"],
            json!([{
                "type": "validation-error",
                "content": "The email address 'bart@springfield.org' is not accepted."
            }])
        );

        assert_eq!(
            run(ScenarioName::Validator, Some("Lisa"), &["lisa@gmail.com"]),
            Response::new(200, Some(json!({ "data": "Ok Result" })))
        );
    }

    #[test]
    fn test_validator_rejects_empty_email_list() {
        let ctx = RenderContext::with_builtin_catalog("en-US");
        let args = ScenarioArgs {
            empty_emails: true,
            ..args(ScenarioName::Validator, Some("Lisa"), &[])
        };

        let response = run_scenario(&args, &ctx).unwrap();
        assert_eq!(response.status, 400);
        assert_eq!(
            response.body.unwrap()["extras"],
            json!([
                { "type": "validation-error", "content": "Emails must contain at least one value." },
                { "type": "validation-error", "content": "The email address '' is not accepted." }
            ])
        );
    }
}
