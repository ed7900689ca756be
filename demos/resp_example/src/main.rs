use async_trait::async_trait;
use pingora::apps::{HttpPersistentSettings, HttpServerApp, HttpServerOptions, ReusedHttpStream};
use pingora::protocols::http::ServerSession;
use pingora::server::{Server, ShutdownWatch};
use pingora::services::listening::Service;
use pingora_resp::{self as resp, Context, ErrorInfo, Method, ReadLimits, TracingLogger};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing_subscriber::{EnvFilter, fmt::format::FmtSpan};

const USERNAME_TAKEN: ErrorInfo = ErrorInfo::from_static(403001, "username taken");

#[derive(Serialize)]
struct User {
    id: u32,
    name: &'static str,
}

#[derive(Deserialize, Serialize)]
struct Signup {
    name: String,
}

/// Routes requests to the handlers below and writes their responses.
struct DemoApp {
    limits: ReadLimits,
}

impl DemoApp {
    fn dispatch(ctx: &mut Context) {
        let method = ctx.request().method().clone();
        let path = ctx.request().path().to_string();
        match (method, path.as_str()) {
            (Method::GET, "/ok") => resp::ok(ctx),
            (Method::GET, "/users/1") => resp::success(ctx, Some(User { id: 1, name: "alice" })),
            (Method::POST, "/users") => signup(ctx),
            (Method::GET, "/secret") => {
                resp::unauthorized(ctx);
            }
            (Method::GET, "/boom") => boom(ctx),
            (Method::POST, "/echo") => echo(ctx),
            _ => {
                resp::with_message(format_args!("no route for {}", path)).not_found(ctx);
            }
        }
    }
}

fn signup(ctx: &mut Context) {
    let signup: Result<Signup, _> = serde_json::from_slice(ctx.request().body());
    let signup = match signup {
        Ok(s) => s,
        Err(e) => {
            resp::log(&e).with_message(e).bad_request(ctx);
            return;
        }
    };
    if signup.name == "alice" {
        resp::with_code_and_message(USERNAME_TAKEN).forbidden(ctx);
        return;
    }
    resp::success(ctx, Some(signup));
}

fn boom(ctx: &mut Context) {
    let res: Result<(), std::io::Error> = Err(std::io::Error::other("database unavailable"));
    if resp::with_message_log(&res)
        .with_code(500001)
        .check_internal_error(ctx, &res)
    {
        return;
    }
    resp::ok(ctx);
}

fn echo(ctx: &mut Context) {
    let body: Result<serde_json::Value, _> = serde_json::from_slice(ctx.request().body());
    let mut builder = resp::with_message("body is not JSON");
    if builder.check_internal_error(ctx, &body.as_ref().err()) {
        return;
    }
    resp::success(ctx, body.ok());
}

#[async_trait]
impl HttpServerApp for DemoApp {
    async fn process_new_http(
        self: &Arc<Self>,
        mut http: ServerSession,
        shutdown: &ShutdownWatch,
    ) -> Option<ReusedHttpStream> {
        if !(http.read_request().await.ok()?) {
            return None;
        }
        if *shutdown.borrow() {
            http.set_keepalive(None);
        } else {
            http.set_keepalive(Some(60));
        }

        let mut ctx = match Context::read_from_with(&mut http, &self.limits).await {
            Ok(ctx) => ctx,
            Err(e) => {
                tracing::warn!(error = %e, "failed to read request");
                return None;
            }
        };
        // an oversized body already got its 413
        if !ctx.is_written() {
            Self::dispatch(&mut ctx);
        }
        if ctx.is_aborted() {
            tracing::info!(path = ctx.request().path(), "request aborted");
        }
        if let Err(e) = ctx.finish(&mut http).await {
            tracing::warn!(error = %e, "failed to write response");
            return None;
        }

        let persistent_settings = HttpPersistentSettings::for_session(&http);
        match http.finish().await {
            Ok(c) => c.map(|s| ReusedHttpStream::new(s, Some(persistent_settings))),
            Err(_) => None,
        }
    }

    fn h2_options(&self) -> Option<pingora::protocols::http::v2::server::H2Options> {
        None
    }

    fn server_options(&self) -> Option<&HttpServerOptions> {
        None
    }
}

fn main() {
    // INFO by default, override with RUST_LOG
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_span_events(FmtSpan::CLOSE)
        .init();
    resp::set_logger(TracingLogger::new());

    let addr = std::env::var("RESP_DEMO_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());
    tracing::info!("listening on http://{}", addr);
    tracing::info!("routes: GET /ok, GET /users/1, POST /users, GET /secret, GET /boom, POST /echo");

    // request bodies here are small JSON documents
    let app = DemoApp {
        limits: ReadLimits::new().max_body_size(64 * 1024),
    };
    if let Err(e) = run_server(app, &addr) {
        eprintln!("Pingora server error: {e}");
    }
}

fn run_server(app: DemoApp, addr: &str) -> std::io::Result<()> {
    let mut server = Server::new(None).map_err(|e| std::io::Error::other(e.to_string()))?;
    server.bootstrap();

    let mut service = Service::new("resp demo".to_string(), app);
    service.add_tcp(addr);
    server.add_service(service);

    server.run_forever()
}
