use garde::Validate;
use kernel::model::list::{ListOptions, PaginatedList};
use serde::{Deserialize, Serialize};

const DEFAULT_LIMIT: i64 = 10;

#[derive(Debug, Deserialize, Validate)]
pub struct ListQuery {
    #[garde(range(min = 1, max = 100))]
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[garde(range(min = 0))]
    #[serde(default)]
    pub offset: i64,
}

fn default_limit() -> i64 {
    DEFAULT_LIMIT
}

impl From<ListQuery> for ListOptions {
    fn from(value: ListQuery) -> Self {
        let ListQuery { limit, offset } = value;
        Self { limit, offset }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedResponse<T> {
    pub total: i64,
    pub limit: i64,
    pub offset: i64,
    pub items: Vec<T>,
}

impl<E, T: From<E>> From<PaginatedList<E>> for PaginatedResponse<T> {
    fn from(value: PaginatedList<E>) -> Self {
        let PaginatedList {
            total,
            limit,
            offset,
            items,
        } = value;
        Self {
            total,
            limit,
            offset,
            items: items.into_iter().map(T::from).collect(),
        }
    }
}
