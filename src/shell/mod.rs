// Composition root.
//
// Responsibilities
// - Read config from the environment.
// - Instantiate the in-memory stores, services and access endpoints.
// - Expose them over the HTTP JSON routes and the GraphQL schema.

pub mod config;
pub mod graphql;
pub mod http;
pub mod seed;
pub mod state;
