use api_types::{
    Paginated,
    category::{Category, CategoryInput},
};

use super::{ApiResult, Client, ResourceKind};

const PATH: &str = "categories/";

impl Client {
    pub async fn categories_list(&self, cursor: Option<&str>) -> ApiResult<Paginated<Category>> {
        self.get_page(ResourceKind::Category, PATH, cursor).await
    }

    pub async fn categories_search(
        &self,
        term: &str,
        cursor: Option<&str>,
    ) -> ApiResult<Paginated<Category>> {
        self.search_page(ResourceKind::Category, PATH, term, cursor)
            .await
    }

    pub async fn category_create(&self, input: &CategoryInput) -> ApiResult<Category> {
        self.post_json(ResourceKind::Category, PATH, input).await
    }

    pub async fn category_update(&self, id: i64, input: &CategoryInput) -> ApiResult<Category> {
        self.put_json(ResourceKind::Category, &format!("{PATH}{id}/"), input)
            .await
    }

    pub async fn category_delete(&self, id: i64) -> ApiResult<()> {
        self.delete(ResourceKind::Category, &format!("{PATH}{id}/"))
            .await
    }
}
