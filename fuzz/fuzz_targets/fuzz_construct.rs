#![no_main]

use http_request_error::{ErrorContext, Method, RequestDescriptor, RequestError};
use libfuzzer_sys::fuzz_target;

// Input layout: message \0 status \0 url \0 authorization
fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let mut parts = text.splitn(4, '\0');
    let message = parts.next().unwrap_or_default();
    let status = parts.next().unwrap_or_default();
    let url = parts.next().unwrap_or_default();
    let auth = parts.next().unwrap_or_default();

    let ctx = ErrorContext::without_response(
        RequestDescriptor::new(Method::Get, url).with_header("authorization", auth),
    );
    let err = RequestError::new(message, status, &ctx);

    let mut line = String::new();
    let _ = err.log_record().write_to(&mut line);
});
