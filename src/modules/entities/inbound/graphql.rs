// Shared GraphQL plumbing for the per-kind query and mutation objects.
//
// - The caller's Principal is attached to the request data by the shell; resolvers read it
//   with `principal(ctx)`.
// - EndpointError surfaces as a GraphQL error carrying `extensions.code`, plus
//   `extensions.violations` for validation failures.

use async_graphql::{Context, Enum, ErrorExtensions, InputObject};

use crate::modules::entities::use_cases::endpoint::EndpointError;
use crate::shared::core::query::{PageRequest, SortDirection, SortKey};
use crate::shared::infrastructure::auth::Principal;

pub fn principal<'a>(context: &'a Context<'_>) -> Option<&'a Principal> {
    context.data_opt::<Principal>()
}

impl ErrorExtensions for EndpointError {
    fn extend(&self) -> async_graphql::Error {
        async_graphql::Error::new(self.to_string()).extend_with(|_, extensions| {
            extensions.set("code", self.code());
            if let EndpointError::ValidationFailed(errors) = self {
                let violations = serde_json::to_value(errors.violations())
                    .ok()
                    .and_then(|json| async_graphql::Value::from_json(json).ok());
                if let Some(violations) = violations {
                    extensions.set("violations", violations);
                }
            }
        })
    }
}

pub fn gql_error(err: EndpointError) -> async_graphql::Error {
    err.extend()
}

#[derive(Enum, Clone, Copy, PartialEq, Eq, Default)]
#[graphql(name = "SortDirection")]
pub enum GqlSortDirection {
    #[default]
    Asc,
    Desc,
}

impl From<GqlSortDirection> for SortDirection {
    fn from(direction: GqlSortDirection) -> Self {
        match direction {
            GqlSortDirection::Asc => SortDirection::Asc,
            GqlSortDirection::Desc => SortDirection::Desc,
        }
    }
}

#[derive(InputObject)]
#[graphql(name = "SortKeyInput")]
pub struct GqlSortKey {
    pub field: String,
    #[graphql(default)]
    pub direction: GqlSortDirection,
}

#[derive(InputObject)]
#[graphql(name = "PageInput")]
pub struct GqlPageInput {
    #[graphql(default)]
    pub offset: u64,
    pub size: u64,
    #[graphql(default)]
    pub sort: Vec<GqlSortKey>,
}

impl From<GqlPageInput> for PageRequest {
    fn from(input: GqlPageInput) -> Self {
        PageRequest {
            offset: input.offset,
            size: input.size,
            sort: input
                .sort
                .into_iter()
                .map(|key| SortKey {
                    field: key.field,
                    direction: key.direction.into(),
                })
                .collect(),
        }
    }
}
