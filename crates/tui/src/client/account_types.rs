use api_types::{
    Paginated,
    account_type::{AccountType, AccountTypeInput},
};

use super::{ApiResult, Client, ResourceKind};

const PATH: &str = "account-types/";

impl Client {
    pub async fn account_types_list(
        &self,
        cursor: Option<&str>,
    ) -> ApiResult<Paginated<AccountType>> {
        self.get_page(ResourceKind::AccountType, PATH, cursor).await
    }

    pub async fn account_type_create(&self, input: &AccountTypeInput) -> ApiResult<AccountType> {
        self.post_json(ResourceKind::AccountType, PATH, input).await
    }

    /// Account types are addressed by slug, not by numeric id.
    pub async fn account_type_update(
        &self,
        slug: &str,
        input: &AccountTypeInput,
    ) -> ApiResult<AccountType> {
        self.put_json(ResourceKind::AccountType, &format!("{PATH}{slug}/"), input)
            .await
    }

    pub async fn account_type_delete(&self, slug: &str) -> ApiResult<()> {
        self.delete(ResourceKind::AccountType, &format!("{PATH}{slug}/"))
            .await
    }
}
