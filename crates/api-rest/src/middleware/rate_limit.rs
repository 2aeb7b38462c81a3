//! Rate limiting middleware.
//!
//! Sliding one-minute window per client IP, held in process memory.

use crate::error::ApiError;
use axum::{
    body::Body,
    extract::ConnectInfo,
    http::{Request, Response},
    response::IntoResponse,
};
use parking_lot::RwLock;
use std::{
    collections::HashMap,
    net::{IpAddr, SocketAddr},
    sync::Arc,
    time::{Duration, Instant},
};
use tower::{Layer, Service};

/// Rate limit configuration
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    /// Maximum requests per window
    pub max_requests: u32,

    /// Time window duration
    pub window: Duration,
}

impl RateLimitConfig {
    /// `max_requests` per minute
    pub fn per_minute(max_requests: u32) -> Self {
        Self {
            max_requests,
            window: Duration::from_secs(60),
        }
    }
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self::per_minute(120)
    }
}

#[derive(Debug)]
struct RateLimiter {
    requests: HashMap<IpAddr, Vec<Instant>>,
    config: RateLimitConfig,
}

impl RateLimiter {
    fn new(config: RateLimitConfig) -> Self {
        Self {
            requests: HashMap::new(),
            config,
        }
    }

    fn check_rate_limit(&mut self, ip: IpAddr, now: Instant) -> bool {
        let window = self.config.window;
        let requests = self.requests.entry(ip).or_default();

        requests.retain(|&timestamp| now.duration_since(timestamp) < window);

        if requests.len() >= self.config.max_requests as usize {
            return false;
        }

        requests.push(now);
        true
    }

    fn cleanup(&mut self, now: Instant) {
        let window = self.config.window;

        self.requests.retain(|_, requests| {
            requests.retain(|&timestamp| now.duration_since(timestamp) < window);
            !requests.is_empty()
        });
    }
}

/// Layer for rate limiting
#[derive(Clone)]
pub struct RateLimitLayer {
    limiter: Arc<RwLock<RateLimiter>>,
}

impl RateLimitLayer {
    /// Create a new rate limit layer with default config
    pub fn new() -> Self {
        Self::with_config(RateLimitConfig::default())
    }

    /// Create a new rate limit layer with custom config
    pub fn with_config(config: RateLimitConfig) -> Self {
        Self {
            limiter: Arc::new(RwLock::new(RateLimiter::new(config))),
        }
    }
}

impl Default for RateLimitLayer {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> Layer<S> for RateLimitLayer {
    type Service = RateLimitService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        RateLimitService {
            inner,
            limiter: self.limiter.clone(),
        }
    }
}

/// Service that performs rate limiting
#[derive(Clone)]
pub struct RateLimitService<S> {
    inner: S,
    limiter: Arc<RwLock<RateLimiter>>,
}

impl<S> Service<Request<Body>> for RateLimitService<S>
where
    S: Service<Request<Body>, Response = Response<Body>> + Clone + Send + 'static,
    S::Future: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = futures::future::BoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &mut self,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        let limiter = self.limiter.clone();
        let mut inner = self.inner.clone();

        Box::pin(async move {
            // Present when served with `into_make_service_with_connect_info`
            let ip = req
                .extensions()
                .get::<ConnectInfo<SocketAddr>>()
                .map(|ConnectInfo(addr)| addr.ip())
                .unwrap_or_else(|| IpAddr::from([127, 0, 0, 1]));

            let now = Instant::now();
            let allowed = limiter.write().check_rate_limit(ip, now);

            if !allowed {
                tracing::warn!(client_ip = %ip, "Rate limit exceeded");
                return Ok(ApiError::RateLimitExceeded.into_response());
            }

            if rand::random::<f32>() < 0.01 {
                limiter.write().cleanup(now);
            }

            inner.call(req).await
        })
    }
}
