use api_types::{
    Paginated,
    account::{Account, AccountInput},
};

use super::{ApiResult, Client, ResourceKind};

const PATH: &str = "accounts/";

impl Client {
    pub async fn accounts_list(&self, cursor: Option<&str>) -> ApiResult<Paginated<Account>> {
        self.get_page(ResourceKind::Account, PATH, cursor).await
    }

    pub async fn accounts_search(
        &self,
        term: &str,
        cursor: Option<&str>,
    ) -> ApiResult<Paginated<Account>> {
        self.search_page(ResourceKind::Account, PATH, term, cursor)
            .await
    }

    pub async fn account_create(&self, input: &AccountInput) -> ApiResult<Account> {
        self.post_json(ResourceKind::Account, PATH, input).await
    }

    pub async fn account_update(&self, id: i64, input: &AccountInput) -> ApiResult<Account> {
        self.put_json(ResourceKind::Account, &format!("{PATH}{id}/"), input)
            .await
    }

    pub async fn account_delete(&self, id: i64) -> ApiResult<()> {
        self.delete(ResourceKind::Account, &format!("{PATH}{id}/"))
            .await
    }
}
