use http_request_error::{
    ErrorContext, Method, RequestDescriptor, RequestError, ResponseDescriptor, Result,
    StatusClass,
};
use serde_json::json;

/// Stand-in for an HTTP client call that received a 401.
fn get_user(token: &str) -> Result<()> {
    let request = RequestDescriptor::new(Method::Get, "https://api.github.com/user")
        .with_header("authorization", format!("token {}", token))
        .with_header("accept", "application/vnd.github.v3+json");

    let response = ResponseDescriptor::new(
        "https://api.github.com/user",
        401,
        json!({ "message": "Bad credentials" }),
    )
    .with_header("x-github-request-id", "C0DE:1234");

    let ctx = ErrorContext::with_response(request, response);
    Err(RequestError::new("Bad credentials", 401, &ctx))
}

/// Stand-in for a call that never got a reply.
fn list_repos() -> Result<()> {
    let request = RequestDescriptor::new(
        Method::Get,
        "https://api.github.com/user/repos?client_id=123&client_secret=s3cr3t",
    );
    let ctx = ErrorContext::without_response(request);
    Err(RequestError::new("connect ETIMEDOUT", None::<u16>, &ctx))
}

fn main() {
    println!("--- Basic Usage Example ---\n");

    for result in [get_user("ghp_very_secret"), list_repos()] {
        let Err(err) = result else { continue };

        // Branch on the coerced status
        match err.class() {
            StatusClass::NoResponse => println!("network failure: {}", err),
            StatusClass::Authentication => println!("auth failure: {}", err),
            other => println!("{} failure: {}", other.display_name(), err),
        }

        // Safe to inspect: credentials are gone
        println!("   method:        {}", err.request().method);
        println!("   url:           {}", err.request().url);
        println!(
            "   authorization: {}",
            err.request().headers.get("authorization").unwrap_or("-")
        );
        if let Some(response) = err.response() {
            println!("   response:      {} {}", response.status, response.data);
        }
        println!();
    }
}
