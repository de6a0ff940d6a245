use crate::MEDIATYPE;
use actix_web::{
    HttpRequest, HttpResponse, Responder, body::EitherBody, error::JsonPayloadError,
    http::header::CONTENT_TYPE, web::Json,
};
use serde::Serialize;

/// A patch for the returned content type.
/// External-DNS compares the `Content-Type` header as a string instead of
/// parsing it, and Actix's builder renders a space after the semicolon, so
/// the header is written verbatim here.
#[derive(Debug)]
pub struct WebhookJson<T>(pub Json<T>)
where
    T: Serialize;

impl<T> Responder for WebhookJson<T>
where
    T: Serialize,
{
    type Body = EitherBody<String>;

    fn respond_to(self, _: &HttpRequest) -> HttpResponse<Self::Body> {
        let body = match serde_json::to_string(&self.0) {
            Ok(body) => body,
            Err(err) => {
                return HttpResponse::from_error(JsonPayloadError::Serialize(err))
                    .map_into_right_body();
            }
        };

        match HttpResponse::Ok()
            .insert_header((CONTENT_TYPE, MEDIATYPE))
            .message_body(body)
        {
            Ok(res) => res.map_into_left_body(),
            Err(err) => HttpResponse::from_error(err).map_into_right_body(),
        }
    }
}
