use axum::extract::{ConnectInfo, Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use khatira_app::AppContext;
use khatira_errors::AppError;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

/// Rejects mutating requests from clients that exceeded their window.
pub async fn rate_limit(State(ctx): State<AppContext>, request: Request, next: Next) -> Response {
    let ip = client_ip(&request, ctx.config.trust_proxy);

    if let Err(e) = ctx.rate_limiter.check(ip) {
        tracing::warn!("Rate limit hit for {} on {}", ip, request.uri().path());
        return AppError::from(e).into_response();
    }

    next.run(request).await
}

fn client_ip(request: &Request, trust_proxy: bool) -> IpAddr {
    if trust_proxy {
        let forwarded = request
            .headers()
            .get("x-forwarded-for")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(',').next())
            .and_then(|v| v.trim().parse().ok());
        if let Some(ip) = forwarded {
            return ip;
        }
    }

    request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip())
        .unwrap_or(IpAddr::V4(Ipv4Addr::LOCALHOST))
}
