// HTTP JSON adapter over one AccessEndpoint.
//
// Routes (all POST, JSON in and out), nested under /api/<kind>:
// - /list   {offset, size, sort?, filter?} -> {items, total_count}
// - /get    {id}                           -> entity or null
// - /update {field: value, ...}            -> stored entity
// - /delete {id}                           -> 204
// - /count  {filter?}                      -> {count}
//
// The caller is identified by `Authorization: Bearer <token>`, resolved per request.

use axum::{
    Json, Router,
    extract::{FromRequestParts, State, rejection::JsonRejection},
    http::{StatusCode, header::AUTHORIZATION, request::Parts},
    response::{IntoResponse, Response},
    routing::post,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use std::convert::Infallible;
use std::sync::Arc;

use crate::modules::entities::use_cases::endpoint::{AccessEndpoint, EndpointError};
use crate::shared::core::entity::Entity;
use crate::shared::core::primitives::EntityId;
use crate::shared::core::query::{Filter, PageRequest};
use crate::shared::infrastructure::auth::{Principal, PrincipalResolver};
use crate::shared::infrastructure::entity_store::EntityStore;

/// Router state able to resolve the caller of a request.
pub trait HasPrincipals {
    fn principals(&self) -> &Arc<dyn PrincipalResolver>;
}

/// The resolved caller, `None` for anonymous requests and unknown tokens.
pub struct CurrentPrincipal(pub Option<Principal>);

impl<S> FromRequestParts<S> for CurrentPrincipal
where
    S: HasPrincipals + Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .map(|token| token.trim().to_owned());
        let principal = state.principals().current_principal(token.as_deref()).await;
        Ok(CurrentPrincipal(principal))
    }
}

impl IntoResponse for EndpointError {
    fn into_response(self) -> Response {
        let status = match &self {
            EndpointError::Unauthorized => StatusCode::UNAUTHORIZED,
            EndpointError::EditConflict { .. } => StatusCode::CONFLICT,
            EndpointError::NotFound { .. } => StatusCode::NOT_FOUND,
            EndpointError::InvalidQuery(_) => StatusCode::BAD_REQUEST,
            EndpointError::ValidationFailed(_) => StatusCode::UNPROCESSABLE_ENTITY,
            EndpointError::Unavailable => StatusCode::SERVICE_UNAVAILABLE,
        };
        let mut body = json!({ "error": self.code(), "message": self.to_string() });
        if let EndpointError::ValidationFailed(errors) = &self {
            body["violations"] = json!(errors.violations());
        }
        (status, Json(body)).into_response()
    }
}

pub fn malformed_request(rejection: JsonRejection) -> Response {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(json!({ "error": "MALFORMED_REQUEST", "message": rejection.body_text() })),
    )
        .into_response()
}

pub struct EntityRoutes<E, TStore>
where
    E: Entity,
    TStore: EntityStore<E> + 'static,
{
    endpoint: Arc<AccessEndpoint<E, TStore>>,
    principals: Arc<dyn PrincipalResolver>,
}

impl<E, TStore> EntityRoutes<E, TStore>
where
    E: Entity,
    TStore: EntityStore<E> + 'static,
{
    pub fn new(endpoint: Arc<AccessEndpoint<E, TStore>>, principals: Arc<dyn PrincipalResolver>) -> Self {
        Self {
            endpoint,
            principals,
        }
    }
}

impl<E, TStore> Clone for EntityRoutes<E, TStore>
where
    E: Entity,
    TStore: EntityStore<E> + 'static,
{
    fn clone(&self) -> Self {
        Self {
            endpoint: self.endpoint.clone(),
            principals: self.principals.clone(),
        }
    }
}

impl<E, TStore> HasPrincipals for EntityRoutes<E, TStore>
where
    E: Entity,
    TStore: EntityStore<E> + 'static,
{
    fn principals(&self) -> &Arc<dyn PrincipalResolver> {
        &self.principals
    }
}

#[derive(Deserialize)]
pub struct ListBody {
    #[serde(flatten)]
    pub page: PageRequest,
    #[serde(default)]
    pub filter: Option<Filter>,
}

#[derive(Deserialize)]
pub struct IdBody {
    pub id: EntityId,
}

#[derive(Deserialize)]
pub struct CountBody {
    #[serde(default)]
    pub filter: Option<Filter>,
}

#[derive(Serialize)]
pub struct CountResponse {
    pub count: u64,
}

/// Route group for one entity kind, to be nested under `/api/<kind>`.
pub fn routes<E, TStore, S>(state: EntityRoutes<E, TStore>) -> Router<S>
where
    E: Entity + Serialize,
    TStore: EntityStore<E> + 'static,
    S: Clone + Send + Sync + 'static,
{
    Router::new()
        .route("/list", post(list::<E, TStore>))
        .route("/get", post(get::<E, TStore>))
        .route("/update", post(update::<E, TStore>))
        .route("/delete", post(delete::<E, TStore>))
        .route("/count", post(count::<E, TStore>))
        .with_state(state)
}

pub async fn list<E, TStore>(
    State(routes): State<EntityRoutes<E, TStore>>,
    CurrentPrincipal(principal): CurrentPrincipal,
    body: Result<Json<ListBody>, JsonRejection>,
) -> Response
where
    E: Entity + Serialize,
    TStore: EntityStore<E> + 'static,
{
    let Json(body) = match body {
        Ok(b) => b,
        Err(rejection) => return malformed_request(rejection),
    };
    match routes
        .endpoint
        .list(principal.as_ref(), body.page, body.filter.as_ref())
        .await
    {
        Ok(page) => Json(page).into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn get<E, TStore>(
    State(routes): State<EntityRoutes<E, TStore>>,
    CurrentPrincipal(principal): CurrentPrincipal,
    body: Result<Json<IdBody>, JsonRejection>,
) -> Response
where
    E: Entity + Serialize,
    TStore: EntityStore<E> + 'static,
{
    let Json(body) = match body {
        Ok(b) => b,
        Err(rejection) => return malformed_request(rejection),
    };
    match routes.endpoint.get(principal.as_ref(), body.id).await {
        Ok(entity) => Json(entity).into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn update<E, TStore>(
    State(routes): State<EntityRoutes<E, TStore>>,
    CurrentPrincipal(principal): CurrentPrincipal,
    body: Result<Json<Map<String, Value>>, JsonRejection>,
) -> Response
where
    E: Entity + Serialize,
    TStore: EntityStore<E> + 'static,
{
    let Json(fields) = match body {
        Ok(b) => b,
        Err(rejection) => return malformed_request(rejection),
    };
    match routes.endpoint.update_fields(principal.as_ref(), &fields).await {
        Ok(entity) => Json(entity).into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn delete<E, TStore>(
    State(routes): State<EntityRoutes<E, TStore>>,
    CurrentPrincipal(principal): CurrentPrincipal,
    body: Result<Json<IdBody>, JsonRejection>,
) -> Response
where
    E: Entity + Serialize,
    TStore: EntityStore<E> + 'static,
{
    let Json(body) = match body {
        Ok(b) => b,
        Err(rejection) => return malformed_request(rejection),
    };
    match routes.endpoint.delete(principal.as_ref(), body.id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn count<E, TStore>(
    State(routes): State<EntityRoutes<E, TStore>>,
    CurrentPrincipal(principal): CurrentPrincipal,
    body: Result<Json<CountBody>, JsonRejection>,
) -> Response
where
    E: Entity + Serialize,
    TStore: EntityStore<E> + 'static,
{
    let Json(body) = match body {
        Ok(b) => b,
        Err(rejection) => return malformed_request(rejection),
    };
    match routes
        .endpoint
        .count(principal.as_ref(), body.filter.as_ref())
        .await
    {
        Ok(count) => Json(CountResponse { count }).into_response(),
        Err(err) => err.into_response(),
    }
}
