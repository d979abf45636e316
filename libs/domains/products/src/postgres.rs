use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, Order, PaginatorTrait,
    QueryFilter, QueryOrder,
};

use crate::{
    entity,
    error::ProductResult,
    models::{Page, PageRequest, Product, SortDirection, SortProperty},
    repository::ProductRepository,
};

pub struct PgProductRepository {
    db: DatabaseConnection,
}

impl PgProductRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn column(property: SortProperty) -> entity::Column {
    match property {
        SortProperty::Id => entity::Column::Id,
        SortProperty::Name => entity::Column::Name,
        SortProperty::SerialNumber => entity::Column::SerialNumber,
        SortProperty::Price => entity::Column::Price,
        SortProperty::Quantity => entity::Column::Quantity,
    }
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    async fn find_by_serial_number(&self, serial_number: &str) -> ProductResult<Option<Product>> {
        let model = entity::Entity::find()
            .filter(entity::Column::SerialNumber.eq(serial_number))
            .one(&self.db)
            .await?;

        Ok(model.map(Into::into))
    }

    async fn save(&self, product: Product) -> ProductResult<Product> {
        let is_new = product.id.is_none();
        let active_model: entity::ActiveModel = product.into();

        let model = if is_new {
            active_model.insert(&self.db).await?
        } else {
            active_model.update(&self.db).await?
        };

        tracing::debug!(product_id = model.id, is_new, "Saved product");
        Ok(model.into())
    }

    async fn find_all(&self, page_request: PageRequest) -> ProductResult<Page<Product>> {
        let order = page_request.sort_order()?;
        let page = page_request.page();
        let size = page_request.size();

        let mut query = entity::Entity::find();
        if let Some(order) = order {
            let direction = match order.direction {
                SortDirection::Asc => Order::Asc,
                SortDirection::Desc => Order::Desc,
            };
            query = query.order_by(column(order.property), direction);
        }
        // Tie-break on id so pages never overlap
        query = query.order_by_asc(entity::Column::Id);

        let paginator = query.paginate(&self.db, size);
        let total = paginator.num_items().await?;
        let models = paginator.fetch_page(page).await?;

        Ok(Page::new(
            models.into_iter().map(Into::into).collect(),
            page,
            size,
            total,
        ))
    }

    async fn delete(&self, product: Product) -> ProductResult<()> {
        let Some(id) = product.id else {
            return Ok(());
        };

        let result = entity::Entity::delete_by_id(id).exec(&self.db).await?;
        tracing::debug!(product_id = id, rows_affected = result.rows_affected, "Deleted product");
        Ok(())
    }
}
