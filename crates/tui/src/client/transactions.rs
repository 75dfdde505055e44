use api_types::{
    Paginated,
    transaction::{Transaction, TransactionInput},
};

use super::{ApiResult, Client, ResourceKind};

const PATH: &str = "transactions/";

impl Client {
    pub async fn transactions_list(
        &self,
        cursor: Option<&str>,
    ) -> ApiResult<Paginated<Transaction>> {
        self.get_page(ResourceKind::Transaction, PATH, cursor).await
    }

    pub async fn transaction_create(&self, input: &TransactionInput) -> ApiResult<Transaction> {
        self.post_json(ResourceKind::Transaction, PATH, input).await
    }

    pub async fn transaction_update(
        &self,
        id: i64,
        input: &TransactionInput,
    ) -> ApiResult<Transaction> {
        self.put_json(ResourceKind::Transaction, &format!("{PATH}{id}/"), input)
            .await
    }

    pub async fn transaction_delete(&self, id: i64) -> ApiResult<()> {
        self.delete(ResourceKind::Transaction, &format!("{PATH}{id}/"))
            .await
    }
}
