use async_graphql::{Context, Object, Result as GqlResult, SimpleObject, types::Json};
use chrono::NaiveDate;
use serde_json::{Map, Value};

use crate::modules::clients::core::client::Client;
use crate::modules::entities::inbound::graphql::{GqlPageInput, gql_error, principal};
use crate::shared::core::primitives::EntityId;
use crate::shared::core::query::{Filter, PageResult};
use crate::shell::state::AppState;

#[derive(SimpleObject, Clone)]
#[graphql(name = "Client")]
pub struct GqlClient {
    pub id: Option<u64>,
    pub version: u64,
    pub first_name: String,
    pub last_name: String,
    pub father_name: String,
    pub nic: String,
    pub cast: String,
    pub occupation: String,
    pub email: String,
    pub phone: String,
    pub date_of_birth: Option<NaiveDate>,
    pub address: String,
}

impl From<Client> for GqlClient {
    fn from(c: Client) -> Self {
        Self {
            id: c.id.map(EntityId::value),
            version: c.version,
            first_name: c.first_name,
            last_name: c.last_name,
            father_name: c.father_name,
            nic: c.nic,
            cast: c.cast,
            occupation: c.occupation,
            email: c.email,
            phone: c.phone,
            date_of_birth: c.date_of_birth,
            address: c.address,
        }
    }
}

#[derive(SimpleObject)]
#[graphql(name = "ClientPage")]
pub struct GqlClientPage {
    pub items: Vec<GqlClient>,
    pub total_count: u64,
}

impl From<PageResult<Client>> for GqlClientPage {
    fn from(page: PageResult<Client>) -> Self {
        let page = page.map(GqlClient::from);
        Self {
            items: page.items,
            total_count: page.total_count,
        }
    }
}

#[derive(Default)]
pub struct ClientQuery;

#[Object]
impl ClientQuery {
    async fn clients(
        &self,
        context: &Context<'_>,
        page: GqlPageInput,
        filter: Option<Json<Filter>>,
    ) -> GqlResult<GqlClientPage> {
        let state = context.data_unchecked::<AppState>();
        let page = state
            .clients
            .list(principal(context), page.into(), filter.as_deref())
            .await
            .map_err(gql_error)?;
        Ok(page.into())
    }

    async fn client(&self, context: &Context<'_>, id: u64) -> GqlResult<Option<GqlClient>> {
        let state = context.data_unchecked::<AppState>();
        let client = state
            .clients
            .get(principal(context), EntityId::new(id))
            .await
            .map_err(gql_error)?;
        Ok(client.map(Into::into))
    }

    async fn client_count(
        &self,
        context: &Context<'_>,
        filter: Option<Json<Filter>>,
    ) -> GqlResult<u64> {
        let state = context.data_unchecked::<AppState>();
        state
            .clients
            .count(principal(context), filter.as_deref())
            .await
            .map_err(gql_error)
    }
}

#[derive(Default)]
pub struct ClientMutation;

#[Object]
impl ClientMutation {
    /// Creates a client when `fields` carries no id, otherwise updates it; `version`
    /// must be the stamp the caller last read.
    async fn update_client(
        &self,
        context: &Context<'_>,
        fields: Json<Map<String, Value>>,
    ) -> GqlResult<GqlClient> {
        let state = context.data_unchecked::<AppState>();
        let client = state
            .clients
            .update_fields(principal(context), &fields)
            .await
            .map_err(gql_error)?;
        Ok(client.into())
    }

    async fn delete_client(&self, context: &Context<'_>, id: u64) -> GqlResult<bool> {
        let state = context.data_unchecked::<AppState>();
        state
            .clients
            .delete(principal(context), EntityId::new(id))
            .await
            .map_err(gql_error)?;
        Ok(true)
    }
}
