//! End-to-end dispatch pipeline tests over an in-memory resource.

use std::sync::Mutex;

use praxis_core::{Map, OwnedRequest, RestError, Value};
use praxis_fields::{Field, FieldSet};
use praxis_formats::get_formatter;
use praxis_resource::{
    BoxedHandler, Context, Dispatcher, HandlerError, HandlerResult, HandlerTable, Middleware,
    Resource,
};

struct Sites {
    fields: FieldSet,
}

impl Sites {
    fn new() -> Self {
        Self {
            fields: FieldSet::new()
                .with("id", Field::integer())
                .with("name", Field::string().required().max_length(50)),
        }
    }

    fn list(&mut self, _ctx: &mut Context<'_>) -> HandlerResult {
        let mut site = Map::new();
        site.insert("id".to_string(), Value::Int(1));
        site.insert("name".to_string(), Value::from("example.org"));
        Ok(Value::List(vec![Value::Map(site)]))
    }

    fn show(&mut self, ctx: &mut Context<'_>) -> HandlerResult {
        match ctx.iden() {
            Some("404") => Err(RestError::not_found("Site doesn't exist")
                .with_info("code", 10)
                .into()),
            Some(iden) => {
                let mut site = Map::new();
                site.insert("id".to_string(), Value::from(iden));
                Ok(Value::Map(site))
            }
            None => Ok(Value::Null),
        }
    }

    fn create(&mut self, ctx: &mut Context<'_>) -> HandlerResult {
        let mut site = ctx.payload.clone();
        site.insert("secret".to_string(), Value::from("hunter2"));
        Ok(Value::Map(site))
    }

    fn edit(&mut self, ctx: &mut Context<'_>) -> HandlerResult {
        Ok(Value::Map(ctx.payload.clone()))
    }

    fn delete(&mut self, _ctx: &mut Context<'_>) -> HandlerResult {
        Ok(Value::Null)
    }

    fn describe(&mut self, _ctx: &mut Context<'_>) -> HandlerResult {
        let mut info = Map::new();
        info.insert("name".to_string(), Value::from("sites"));
        Ok(Value::Map(info))
    }
}

impl Resource for Sites {
    fn handlers() -> HandlerTable<Self> {
        HandlerTable::new()
            .with("list", Sites::list)
            .with("show", Sites::show)
            .with("create", Sites::create)
            .with("edit", Sites::edit)
            .with("delete", Sites::delete)
            .with("describe", Sites::describe)
    }

    fn fields(&self, method_name: &str) -> Option<&FieldSet> {
        matches!(method_name, "create" | "edit").then_some(&self.fields)
    }
}

fn json_dispatch(request: &OwnedRequest, args: &[&str]) -> praxis_resource::ResponseParts {
    Dispatcher::new(Sites::new(), request, get_formatter("json")).dispatch(args)
}

#[test]
fn test_get_without_iden_runs_list() {
    let request = OwnedRequest::new("GET");
    let response = json_dispatch(&request, &[]);
    assert_eq!(response.status.as_u16(), 200);
    assert_eq!(response.content_type, "application/json");
    assert_eq!(response.body, r#"[{"id":1,"name":"example.org"}]"#);
}

#[test]
fn test_get_with_iden_runs_show() {
    let request = OwnedRequest::new("GET");
    let response = json_dispatch(&request, &["5"]);
    assert_eq!(response.status.as_u16(), 200);
    assert_eq!(response.body, r#"{"id":"5"}"#);
}

#[test]
fn test_put_without_iden_is_rejected() {
    let request = OwnedRequest::new("PUT").data(r#"{"name":"a"}"#);
    let response = json_dispatch(&request, &[]);
    assert_eq!(response.status.as_u16(), 400);
    assert_eq!(response.body, r#"{"error":"Given method requires iden"}"#);
}

#[test]
fn test_post_with_iden_is_rejected() {
    let request = OwnedRequest::new("POST").data(r#"{"name":"a"}"#);
    let response = json_dispatch(&request, &["5"]);
    assert_eq!(response.status.as_u16(), 400);
    assert_eq!(response.body, r#"{"error":"Given method shouldn't have iden"}"#);
}

#[test]
fn test_unmapped_verb_is_405() {
    let request = OwnedRequest::new("HEAD");
    let response = json_dispatch(&request, &[]);
    assert_eq!(response.status.as_u16(), 405);
    assert_eq!(response.body, r#"{"error":"Method \"HEAD\" is not supported"}"#);
}

#[test]
fn test_method_override_header_wins_over_verb() {
    let request = OwnedRequest::new("POST")
        .header("X-HTTP-Method-Override", "PUT")
        .data(r#"{"name":"renamed"}"#);
    let response = json_dispatch(&request, &["5"]);
    assert_eq!(response.status.as_u16(), 200);
    assert_eq!(response.body, r#"{"name":"renamed"}"#);
}

#[test]
fn test_malformed_body_is_400() {
    let request = OwnedRequest::new("POST").data("{not json");
    let response = json_dispatch(&request, &[]);
    assert_eq!(response.status.as_u16(), 400);
    assert_eq!(response.body, r#"{"error":"Fail to load the data"}"#);
}

#[test]
fn test_non_mapping_body_is_400() {
    let request = OwnedRequest::new("POST").data("[1,2,3]");
    let response = json_dispatch(&request, &[]);
    assert_eq!(response.status.as_u16(), 400);
    assert_eq!(response.body, r#"{"error":"Data should be key -> value structure"}"#);
}

#[test]
fn test_field_validation_failure_is_400() {
    let long_name = "x".repeat(51);
    let request = OwnedRequest::new("PUT").data(format!(r#"{{"name":"{long_name}"}}"#));
    let response = json_dispatch(&request, &["5"]);
    assert_eq!(response.status.as_u16(), 400);
    assert_eq!(
        response.body,
        r#"{"error":"Field \"name\" is longer than expected"}"#
    );
}

#[test]
fn test_missing_required_field_is_400() {
    let request = OwnedRequest::new("PUT").data(r#"{"id":5}"#);
    let response = json_dispatch(&request, &["5"]);
    assert_eq!(response.status.as_u16(), 400);
    assert_eq!(response.body, r#"{"error":"Field \"name\" is missing"}"#);
}

#[test]
fn test_handler_error_carries_info_and_status() {
    let request = OwnedRequest::new("GET");
    let response = json_dispatch(&request, &["404"]);
    assert_eq!(response.status.as_u16(), 404);
    assert_eq!(response.body, r#"{"code":10,"error":"Site doesn't exist"}"#);
}

#[test]
fn test_output_is_filtered_to_declared_fields() {
    let request = OwnedRequest::new("POST").data(r#"{"name":"example.org","junk":1}"#);
    let response = json_dispatch(&request, &[]);
    assert_eq!(response.status.as_u16(), 200);
    // "junk" is dropped by validation, "secret" by output filtering.
    assert_eq!(response.body, r#"{"name":"example.org"}"#);
}

#[test]
fn test_describe_sets_allow_header() {
    let request = OwnedRequest::new("OPTIONS");
    let response = json_dispatch(&request, &[]);
    assert_eq!(response.status.as_u16(), 200);
    assert_eq!(response.header("Allow"), Some("GET,POST,PUT,DELETE,OPTIONS"));
}

#[test]
fn test_missing_formatter_is_400_with_default_encoding() {
    let request = OwnedRequest::new("GET");
    let response = Dispatcher::new(Sites::new(), &request, None).dispatch(&[]);
    assert_eq!(response.status.as_u16(), 400);
    assert_eq!(response.content_type, "application/json");
    assert_eq!(response.body, r#"{"error":"Not recognizable format"}"#);
}

#[test]
fn test_unserializable_result_is_503() {
    // The form encoding only serializes flat mappings; "list" returns a
    // list of mappings.
    let request = OwnedRequest::new("GET");
    let response =
        Dispatcher::new(Sites::new(), &request, get_formatter("html")).dispatch(&[]);
    assert_eq!(response.status.as_u16(), 503);
    assert_eq!(
        response.body,
        "error=Service+can%27t+respond+with+this+format"
    );
    assert_eq!(response.content_type, "application/x-www-form-urlencoded");
}

struct Flaky;

impl Flaky {
    fn list(&mut self, _ctx: &mut Context<'_>) -> HandlerResult {
        let parsed = "not a number".parse::<i64>().map_err(anyhow::Error::from)?;
        Ok(Value::Int(parsed))
    }
}

impl Resource for Flaky {
    fn handlers() -> HandlerTable<Self> {
        HandlerTable::new().with("list", Flaky::list)
    }
}

#[test]
fn test_opaque_handler_error_is_masked_as_503() {
    let request = OwnedRequest::new("GET");
    let response = Dispatcher::new(Flaky, &request, get_formatter("json")).dispatch(&[]);
    assert_eq!(response.status.as_u16(), 503);
    assert_eq!(response.body, r#"{"error":"Service is not available"}"#);
}

struct Misconfigured {
    fields: FieldSet,
}

impl Misconfigured {
    fn new() -> Self {
        // max_length is a string setting; declaring it on an integer
        // field is a programming mistake, not a data problem.
        Self {
            fields: FieldSet::new().with("id", Field::integer().max_length(5)),
        }
    }

    fn edit(&mut self, ctx: &mut Context<'_>) -> HandlerResult {
        Ok(Value::Map(ctx.payload.clone()))
    }
}

impl Resource for Misconfigured {
    fn handlers() -> HandlerTable<Self> {
        HandlerTable::new().with("edit", Misconfigured::edit)
    }

    fn fields(&self, method_name: &str) -> Option<&FieldSet> {
        (method_name == "edit").then_some(&self.fields)
    }
}

#[test]
fn test_misconfigured_field_is_503() {
    let request = OwnedRequest::new("PUT").data(r#"{"id":1}"#);
    let response =
        Dispatcher::new(Misconfigured::new(), &request, get_formatter("json")).dispatch(&["1"]);
    assert_eq!(response.status.as_u16(), 503);
    assert_eq!(
        response.body,
        r#"{"error":"Setting \"max_length\" is not supported for field \"id\""}"#
    );
}

static HOOK_TRACE: Mutex<Vec<&'static str>> = Mutex::new(Vec::new());

struct Audited;

impl Audited {
    fn list(&mut self, _ctx: &mut Context<'_>) -> HandlerResult {
        HOOK_TRACE.lock().unwrap().push("handler");
        Ok(Value::from("raw"))
    }
}

impl Resource for Audited {
    fn handlers() -> HandlerTable<Self> {
        HandlerTable::new().with("list", Audited::list)
    }

    fn prepare(&mut self, _ctx: &mut Context<'_>) -> Result<(), HandlerError> {
        HOOK_TRACE.lock().unwrap().push("prepare");
        Ok(())
    }

    fn finish(&mut self, _ctx: &mut Context<'_>, result: Value) -> HandlerResult {
        HOOK_TRACE.lock().unwrap().push("finish");
        let mut envelope = Map::new();
        envelope.insert("data".to_string(), result);
        Ok(Value::Map(envelope))
    }
}

#[test]
fn test_hooks_run_around_handler_and_finish_rewrites_result() {
    let request = OwnedRequest::new("GET");
    let response = Dispatcher::new(Audited, &request, get_formatter("json")).dispatch(&[]);
    assert_eq!(response.status.as_u16(), 200);
    // finish() wrapped the handler's result before serialization.
    assert_eq!(response.body, r#"{"data":"raw"}"#);
    let trace = HOOK_TRACE.lock().unwrap();
    assert_eq!(*trace, vec!["prepare", "handler", "finish"]);
}

static TRACE: Mutex<Vec<&'static str>> = Mutex::new(Vec::new());

struct Traced;

impl Traced {
    fn list(&mut self, _ctx: &mut Context<'_>) -> HandlerResult {
        TRACE.lock().unwrap().push("handler");
        Ok(Value::Null)
    }

    fn probe(label: &'static str) -> Middleware<Self> {
        Box::new(move |mut next: BoxedHandler<Self>| {
            Box::new(move |resource: &mut Self, ctx: &mut Context<'_>| {
                TRACE.lock().unwrap().push(label);
                next(resource, ctx)
            })
        })
    }
}

impl Resource for Traced {
    fn handlers() -> HandlerTable<Self> {
        HandlerTable::new().with("list", Traced::list)
    }

    fn middleware() -> Vec<Middleware<Self>> {
        vec![Traced::probe("first"), Traced::probe("second")]
    }
}

#[test]
fn test_first_middleware_runs_outermost() {
    let request = OwnedRequest::new("GET");
    let response = Dispatcher::new(Traced, &request, get_formatter("json")).dispatch(&[]);
    assert_eq!(response.status.as_u16(), 200);
    let trace = TRACE.lock().unwrap();
    assert_eq!(*trace, vec!["first", "second", "handler"]);
}
