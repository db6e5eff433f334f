use async_graphql::{Context, Object, Result as GqlResult, SimpleObject, types::Json};
use serde_json::{Map, Value};

use crate::modules::entities::inbound::graphql::{GqlPageInput, gql_error, principal};
use crate::modules::users::core::user::User;
use crate::shared::core::primitives::EntityId;
use crate::shared::core::query::{Filter, PageResult};
use crate::shell::state::AppState;

#[derive(SimpleObject, Clone)]
#[graphql(name = "User")]
pub struct GqlUser {
    pub id: Option<u64>,
    pub version: u64,
    pub username: String,
    pub name: String,
    pub roles: Vec<String>,
    pub profile_picture_url: Option<String>,
}

impl From<User> for GqlUser {
    fn from(u: User) -> Self {
        Self {
            id: u.id.map(EntityId::value),
            version: u.version,
            roles: u
                .roles
                .split(',')
                .map(str::trim)
                .filter(|role| !role.is_empty())
                .map(str::to_ascii_uppercase)
                .collect(),
            username: u.username,
            name: u.name,
            profile_picture_url: u.profile_picture_url,
        }
    }
}

#[derive(SimpleObject)]
#[graphql(name = "UserPage")]
pub struct GqlUserPage {
    pub items: Vec<GqlUser>,
    pub total_count: u64,
}

impl From<PageResult<User>> for GqlUserPage {
    fn from(page: PageResult<User>) -> Self {
        let page = page.map(GqlUser::from);
        Self {
            items: page.items,
            total_count: page.total_count,
        }
    }
}

#[derive(Default)]
pub struct UserQuery;

#[Object]
impl UserQuery {
    /// The account of the caller, or null for anonymous callers.
    async fn authenticated_user(&self, context: &Context<'_>) -> GqlResult<Option<GqlUser>> {
        let state = context.data_unchecked::<AppState>();
        let user = state
            .authenticated_user
            .get(principal(context))
            .await
            .map_err(gql_error)?;
        Ok(user.map(Into::into))
    }

    async fn users(
        &self,
        context: &Context<'_>,
        page: GqlPageInput,
        filter: Option<Json<Filter>>,
    ) -> GqlResult<GqlUserPage> {
        let state = context.data_unchecked::<AppState>();
        let page = state
            .users
            .list(principal(context), page.into(), filter.as_deref())
            .await
            .map_err(gql_error)?;
        Ok(page.into())
    }

    async fn user(&self, context: &Context<'_>, id: u64) -> GqlResult<Option<GqlUser>> {
        let state = context.data_unchecked::<AppState>();
        let user = state
            .users
            .get(principal(context), EntityId::new(id))
            .await
            .map_err(gql_error)?;
        Ok(user.map(Into::into))
    }

    async fn user_count(
        &self,
        context: &Context<'_>,
        filter: Option<Json<Filter>>,
    ) -> GqlResult<u64> {
        let state = context.data_unchecked::<AppState>();
        state
            .users
            .count(principal(context), filter.as_deref())
            .await
            .map_err(gql_error)
    }
}

#[derive(Default)]
pub struct UserMutation;

#[Object]
impl UserMutation {
    async fn update_user(
        &self,
        context: &Context<'_>,
        fields: Json<Map<String, Value>>,
    ) -> GqlResult<GqlUser> {
        let state = context.data_unchecked::<AppState>();
        let user = state
            .users
            .update_fields(principal(context), &fields)
            .await
            .map_err(gql_error)?;
        Ok(user.into())
    }

    async fn delete_user(&self, context: &Context<'_>, id: u64) -> GqlResult<bool> {
        let state = context.data_unchecked::<AppState>();
        state
            .users
            .delete(principal(context), EntityId::new(id))
            .await
            .map_err(gql_error)?;
        Ok(true)
    }
}
