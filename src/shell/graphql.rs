use async_graphql::{EmptySubscription, MergedObject, Schema};

use crate::modules::clients::inbound::graphql::{ClientMutation, ClientQuery};
use crate::modules::sample_persons::inbound::graphql::{SamplePersonMutation, SamplePersonQuery};
use crate::modules::users::inbound::graphql::{UserMutation, UserQuery};
pub use crate::shell::state::AppState;

#[derive(MergedObject, Default)]
pub struct QueryRoot(ClientQuery, SamplePersonQuery, UserQuery);

#[derive(MergedObject, Default)]
pub struct MutationRoot(ClientMutation, SamplePersonMutation, UserMutation);

pub type AppSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

pub fn schema(state: AppState) -> AppSchema {
    Schema::build(QueryRoot::default(), MutationRoot::default(), EmptySubscription)
        .data(state)
        .finish()
}
