use crate::{
    MEDIATYPE, changes::Changes, domain_filter::DomainFilter, endpoint::Endpoint,
    provider::Provider, status::Status, webhook_json::WebhookJson,
};
use actix_web::{
    App, Either, HttpRequest, HttpResponse, HttpServer,
    http::{StatusCode, header},
    middleware::Logger,
    web::{self, Data, Json},
};
use logcall::logcall;
use std::sync::Arc;

/// Setup of the HTTP servers.
/// The protocol server stays on loopback, as ExternalDNS runs the webhook as
/// a sidecar; only the health surface is exposed.
#[derive(Debug)]
pub struct Webhook {
    provider_address: String,
    provider_port: u16,
    dns_manager: Arc<dyn Provider>,

    exposed_address: String,
    exposed_port: u16,
    status: Arc<dyn Status>,
}

impl Webhook {
    /// Constructor of `Webhook`.
    #[logcall("debug")]
    pub fn new(
        dns_manager: Arc<dyn Provider>,
        status: Arc<dyn Status>,
        provider_port: u16,
        exposed_port: u16,
    ) -> Webhook {
        Webhook {
            provider_address: "127.0.0.1".to_string(),
            provider_port,
            dns_manager,
            exposed_address: "0.0.0.0".to_string(),
            exposed_port,
            status,
        }
    }

    /// Start the webhook server, and the healthz web server.
    #[logcall(ok = "debug", err = "error")]
    pub async fn start(&self) -> anyhow::Result<()> {
        let x = self.status.clone();
        let exposed = HttpServer::new(move || {
            App::new()
                .app_data(Data::new(x.clone()))
                .wrap(Logger::default())
                .configure(health_routes)
        })
        .bind((self.exposed_address.clone(), self.exposed_port))?
        .run();

        let x = self.dns_manager.clone();
        let provider = HttpServer::new(move || {
            App::new()
                .app_data(Data::new(x.clone()))
                .wrap(Logger::default())
                .configure(provider_routes)
        })
        .bind((self.provider_address.clone(), self.provider_port))?
        .run();

        tokio::spawn(exposed);
        provider.await?;

        Ok(())
    }
}

// The attribute-macro routes would answer a wrong method with 404; resources
// with an explicit default keep the contract's 405.
pub(crate) fn provider_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/")
            .route(web::get().to(negotiate))
            .default_service(web::route().to(method_not_allowed)),
    )
    .service(
        web::resource("/records")
            .route(web::get().to(get_records))
            .route(web::post().to(post_records))
            .default_service(web::route().to(method_not_allowed)),
    )
    .service(
        web::resource("/adjustendpoints")
            .route(web::post().to(post_adjustendpoints))
            .default_service(web::route().to(method_not_allowed)),
    );
}

pub(crate) fn health_routes(cfg: &mut web::ServiceConfig) {
    for path in ["/healthz", "/readyz", "/livez"] {
        cfg.service(
            web::resource(path)
                .route(web::get().to(get_healthz))
                .default_service(web::route().to(method_not_allowed)),
        );
    }
}

// Negotiate `DomainFilter`
async fn negotiate(
    req: HttpRequest,
    dns_manager: Data<Arc<dyn Provider>>,
) -> Either<WebhookJson<DomainFilter>, HttpResponse> {
    if let Some(accept) = req.headers().get(header::ACCEPT) {
        let accept = accept.to_str().unwrap_or_default();
        if !accept.is_empty() && accept != MEDIATYPE && accept != "*/*" {
            return Either::Right(HttpResponse::NotAcceptable().body("Not acceptable"));
        }
    }
    Either::Left(WebhookJson(Json(dns_manager.domain_filter().await)))
}

// Get records
async fn get_records(
    dns_manager: Data<Arc<dyn Provider>>,
) -> Either<WebhookJson<Vec<Endpoint>>, HttpResponse> {
    match dns_manager.records().await {
        Ok(endpoints) => Either::Left(WebhookJson(Json(endpoints))),
        Err(e) => {
            log::error!("failed to get records: {e}");
            Either::Right(
                HttpResponse::InternalServerError().body(format!("failed to get records: {e}")),
            )
        }
    }
}

// Apply record changes; malformed bodies are already answered with 400 by
// the Json extractor.
async fn post_records(dns_manager: Data<Arc<dyn Provider>>, changes: Json<Changes>) -> HttpResponse {
    match dns_manager.apply_changes(changes.into_inner()).await {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(e) => {
            log::error!("failed to apply changes: {e}");
            HttpResponse::InternalServerError().body(format!("failed to apply changes: {e}"))
        }
    }
}

// Provider specific adjustments of records
async fn post_adjustendpoints(
    dns_manager: Data<Arc<dyn Provider>>,
    endpoints: Json<Vec<Endpoint>>,
) -> Either<WebhookJson<Vec<Endpoint>>, HttpResponse> {
    match dns_manager.adjust_endpoints(endpoints.into_inner()).await {
        Ok(adjusted) => Either::Left(WebhookJson(Json(adjusted))),
        Err(e) => {
            log::error!("failed to adjust endpoints: {e}");
            Either::Right(
                HttpResponse::InternalServerError()
                    .body(format!("failed to adjust endpoints: {e}")),
            )
        }
    }
}

async fn get_healthz(status: Data<Arc<dyn Status>>) -> (String, StatusCode) {
    status.healthz().await
}

async fn method_not_allowed() -> HttpResponse {
    HttpResponse::MethodNotAllowed().body("Method not allowed")
}
