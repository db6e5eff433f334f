use async_graphql::{Context, Object, Result as GqlResult, SimpleObject, types::Json};
use chrono::NaiveDate;
use serde_json::{Map, Value};

use crate::modules::entities::inbound::graphql::{GqlPageInput, gql_error, principal};
use crate::modules::sample_persons::core::sample_person::SamplePerson;
use crate::shared::core::primitives::EntityId;
use crate::shared::core::query::{Filter, PageResult};
use crate::shell::state::AppState;

#[derive(SimpleObject, Clone)]
#[graphql(name = "SamplePerson")]
pub struct GqlSamplePerson {
    pub id: Option<u64>,
    pub version: u64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub date_of_birth: Option<NaiveDate>,
    pub occupation: String,
    pub role: String,
    pub important: bool,
}

impl From<SamplePerson> for GqlSamplePerson {
    fn from(p: SamplePerson) -> Self {
        Self {
            id: p.id.map(EntityId::value),
            version: p.version,
            first_name: p.first_name,
            last_name: p.last_name,
            email: p.email,
            phone: p.phone,
            date_of_birth: p.date_of_birth,
            occupation: p.occupation,
            role: p.role,
            important: p.important,
        }
    }
}

#[derive(SimpleObject)]
#[graphql(name = "SamplePersonPage")]
pub struct GqlSamplePersonPage {
    pub items: Vec<GqlSamplePerson>,
    pub total_count: u64,
}

impl From<PageResult<SamplePerson>> for GqlSamplePersonPage {
    fn from(page: PageResult<SamplePerson>) -> Self {
        let page = page.map(GqlSamplePerson::from);
        Self {
            items: page.items,
            total_count: page.total_count,
        }
    }
}

#[derive(Default)]
pub struct SamplePersonQuery;

#[Object]
impl SamplePersonQuery {
    async fn sample_persons(
        &self,
        context: &Context<'_>,
        page: GqlPageInput,
        filter: Option<Json<Filter>>,
    ) -> GqlResult<GqlSamplePersonPage> {
        let state = context.data_unchecked::<AppState>();
        let page = state
            .sample_persons
            .list(principal(context), page.into(), filter.as_deref())
            .await
            .map_err(gql_error)?;
        Ok(page.into())
    }

    async fn sample_person(
        &self,
        context: &Context<'_>,
        id: u64,
    ) -> GqlResult<Option<GqlSamplePerson>> {
        let state = context.data_unchecked::<AppState>();
        let person = state
            .sample_persons
            .get(principal(context), EntityId::new(id))
            .await
            .map_err(gql_error)?;
        Ok(person.map(Into::into))
    }

    async fn sample_person_count(
        &self,
        context: &Context<'_>,
        filter: Option<Json<Filter>>,
    ) -> GqlResult<u64> {
        let state = context.data_unchecked::<AppState>();
        state
            .sample_persons
            .count(principal(context), filter.as_deref())
            .await
            .map_err(gql_error)
    }
}

#[derive(Default)]
pub struct SamplePersonMutation;

#[Object]
impl SamplePersonMutation {
    async fn update_sample_person(
        &self,
        context: &Context<'_>,
        fields: Json<Map<String, Value>>,
    ) -> GqlResult<GqlSamplePerson> {
        let state = context.data_unchecked::<AppState>();
        let person = state
            .sample_persons
            .update_fields(principal(context), &fields)
            .await
            .map_err(gql_error)?;
        Ok(person.into())
    }

    async fn delete_sample_person(&self, context: &Context<'_>, id: u64) -> GqlResult<bool> {
        let state = context.data_unchecked::<AppState>();
        state
            .sample_persons
            .delete(principal(context), EntityId::new(id))
            .await
            .map_err(gql_error)?;
        Ok(true)
    }
}
