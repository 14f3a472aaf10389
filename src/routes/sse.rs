//! Server-sent event framing.

use actix_web::http::header;
use actix_web::web::Bytes;
use actix_web::HttpResponse;
use futures::Stream;
use serde::Serialize;

pub const START: &str = "start";
pub const UPDATE: &str = "update";
pub const DONE: &str = "done";

/// Encode one event as `event: <name>\ndata: <json>\n\n`
pub fn event<T: Serialize>(name: &str, data: &T) -> Result<Bytes, actix_web::Error> {
    let json = serde_json::to_string(data).map_err(actix_web::error::ErrorInternalServerError)?;
    Ok(Bytes::from(format!("event: {}\ndata: {}\n\n", name, json)))
}

/// Event with an empty object payload, used for `start` and `done`
pub fn empty(name: &str) -> Bytes {
    Bytes::from(format!("event: {}\ndata: {{}}\n\n", name))
}

/// Wrap an event stream in a `text/event-stream` response
///
/// Compression is disabled so each event reaches the client as soon as it is
/// produced.
pub fn response<S>(events: S) -> HttpResponse
where
    S: Stream<Item = Result<Bytes, actix_web::Error>> + 'static,
{
    HttpResponse::Ok()
        .content_type("text/event-stream")
        .insert_header((header::CACHE_CONTROL, "no-cache"))
        .insert_header((header::CONTENT_ENCODING, "identity"))
        .streaming(events)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CopyUpdate;

    #[test]
    fn test_event_framing() {
        let bytes = event(UPDATE, &CopyUpdate { text: "Hi 你".to_string() }).unwrap();
        assert_eq!(&bytes[..], "event: update\ndata: {\"text\":\"Hi 你\"}\n\n".as_bytes());
    }

    #[test]
    fn test_empty_event() {
        assert_eq!(&empty(START)[..], b"event: start\ndata: {}\n\n");
    }
}
