use async_graphql::http::GraphiQLSource;
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::{
    Extension, Router,
    response::Html,
    routing::{get, post},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::modules::entities::inbound::http::{CurrentPrincipal, EntityRoutes, routes};
use crate::modules::users::inbound::http as users_http;
use crate::shell::graphql::{AppSchema, schema};
use crate::shell::state::AppState;

pub fn router(state: AppState) -> Router {
    let gql = schema(state.clone());
    Router::new()
        .route("/api/authenticated-user", post(users_http::authenticated_user))
        .route("/gql", get(graphiql).post(graphql))
        .nest(
            "/api/clients",
            routes(EntityRoutes::new(state.clients.clone(), state.principals.clone())),
        )
        .nest(
            "/api/sample-persons",
            routes(EntityRoutes::new(state.sample_persons.clone(), state.principals.clone())),
        )
        .nest(
            "/api/users",
            routes(EntityRoutes::new(state.users.clone(), state.principals.clone())),
        )
        .with_state(state)
        .layer(Extension(gql))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

async fn graphql(
    Extension(schema): Extension<AppSchema>,
    CurrentPrincipal(principal): CurrentPrincipal,
    req: GraphQLRequest,
) -> GraphQLResponse {
    let mut request = req.into_inner();
    if let Some(principal) = principal {
        request = request.data(principal);
    }
    schema.execute(request).await.into()
}

async fn graphiql() -> Html<String> {
    Html(GraphiQLSource::build().endpoint("/gql").finish())
}
