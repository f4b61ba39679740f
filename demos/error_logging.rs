use http_request_error::{ErrorContext, Method, RequestDescriptor, RequestError, ResponseDescriptor};
use serde_json::json;

fn main() {
    println!("--- Error Logging Example ---\n");

    let request = RequestDescriptor::new(
        Method::Post,
        "https://api.github.com/repos/o/r/issues?access_token=abc123",
    )
    .with_header("authorization", "Bearer abc123")
    .with_body(json!({ "title": "Found a bug" }));

    let response = ResponseDescriptor::new(
        "https://api.github.com/repos/o/r/issues",
        503,
        json!({ "message": "Service Unavailable" }),
    );

    let err = RequestError::new(
        "Service Unavailable",
        "503",
        &ErrorContext::with_response(request, response),
    );

    // 1. Single-line structured record for a text logger
    println!("1. [LOG LINE]");
    err.with_log_record(|log| println!("   {}", log));

    // 2. Field access for a structured logger
    println!("\n2. [FIELDS]");
    let log = err.log_record();
    println!("   status:          {}", log.status());
    println!("   class:           {}", log.class().display_name());
    println!("   url:             {}", log.url());
    println!("   response_status: {:?}", log.response_status());

    // 3. JSON payload for an error-tracking service
    println!("\n3. [JSON]");
    match serde_json::to_string_pretty(&err) {
        Ok(payload) => println!("{}", payload),
        Err(e) => println!("   serialization failed: {}", e),
    }
}
