// src/db/restaurant_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::{on_unique_violation, AppError},
    models::{
        crm::Customer,
        menu::Dish,
        reservations::DiningTable,
        restaurants::{Address, Restaurant, RestaurantListing},
    },
};

#[derive(Clone)]
pub struct RestaurantRepository {
    pool: PgPool,
}

impl RestaurantRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // =========================================================================
    //  ENDEREÇOS
    // =========================================================================

    pub async fn create_address<'e, E>(
        &self,
        executor: E,
        street: &str,
        number: i32,
        city: &str,
        postal_code: &str,
        province: &str,
    ) -> Result<Address, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let address = sqlx::query_as::<_, Address>(
            r#"
            INSERT INTO addresses (street, number, city, postal_code, province)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(street)
        .bind(number)
        .bind(city)
        .bind(postal_code)
        .bind(province)
        .fetch_one(executor)
        .await?;

        Ok(address)
    }

    pub async fn list_addresses<'e, E>(&self, executor: E) -> Result<Vec<Address>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let addresses = sqlx::query_as::<_, Address>(
            "SELECT * FROM addresses ORDER BY city ASC, street ASC",
        )
        .fetch_all(executor)
        .await?;

        Ok(addresses)
    }

    /// Endereços ainda sem restaurante, para montar o select do formulário.
    pub async fn list_available_addresses<'e, E>(
        &self,
        executor: E,
    ) -> Result<Vec<Address>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let addresses = sqlx::query_as::<_, Address>(
            r#"
            SELECT a.*
            FROM addresses a
            LEFT JOIN restaurants r ON r.address_id = a.id
            WHERE r.id IS NULL
            ORDER BY a.city ASC, a.street ASC
            "#,
        )
        .fetch_all(executor)
        .await?;

        Ok(addresses)
    }

    pub async fn find_address<'e, E>(
        &self,
        executor: E,
        id: Uuid,
    ) -> Result<Option<Address>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let address = sqlx::query_as::<_, Address>("SELECT * FROM addresses WHERE id = $1")
            .bind(id)
            .fetch_optional(executor)
            .await?;

        Ok(address)
    }

    /// O endereço já pertence a outro restaurante? (um-para-um no formulário;
    /// o índice único do banco cobre a corrida.)
    pub async fn address_in_use<'e, E>(
        &self,
        executor: E,
        address_id: Uuid,
        exclude_restaurant: Option<Uuid>,
    ) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let in_use = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM restaurants
                WHERE address_id = $1
                  AND ($2::uuid IS NULL OR id <> $2)
            )
            "#,
        )
        .bind(address_id)
        .bind(exclude_restaurant)
        .fetch_one(executor)
        .await?;

        Ok(in_use)
    }

    // =========================================================================
    //  RESTAURANTES
    // =========================================================================

    pub async fn create_restaurant<'e, E>(
        &self,
        executor: E,
        name: &str,
        phone: &str,
        address_id: Uuid,
    ) -> Result<Restaurant, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let restaurant = sqlx::query_as::<_, Restaurant>(
            r#"
            INSERT INTO restaurants (name, phone, address_id)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(name)
        .bind(phone)
        .bind(address_id)
        .fetch_one(executor)
        .await
        .map_err(on_unique_violation(
            "Este endereço já pertence a outro restaurante.",
        ))?;

        Ok(restaurant)
    }

    pub async fn update_restaurant<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        name: &str,
        phone: &str,
        address_id: Uuid,
    ) -> Result<Restaurant, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let restaurant = sqlx::query_as::<_, Restaurant>(
            r#"
            UPDATE restaurants
            SET name = $2, phone = $3, address_id = $4
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(phone)
        .bind(address_id)
        .fetch_one(executor)
        .await
        .map_err(on_unique_violation(
            "Este endereço já pertence a outro restaurante.",
        ))?;

        Ok(restaurant)
    }

    pub async fn delete_restaurant<'e, E>(&self, executor: E, id: Uuid) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM restaurants WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;

        Ok(result.rows_affected())
    }

    pub async fn find_restaurant<'e, E>(
        &self,
        executor: E,
        id: Uuid,
    ) -> Result<Option<Restaurant>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let restaurant = sqlx::query_as::<_, Restaurant>("SELECT * FROM restaurants WHERE id = $1")
            .bind(id)
            .fetch_optional(executor)
            .await?;

        Ok(restaurant)
    }

    /// Nome já cadastrado? Comparação exata (sensível a maiúsculas): o
    /// primeiro registro com o nome vence, edições excluem o próprio id.
    pub async fn name_exists<'e, E>(
        &self,
        executor: E,
        name: &str,
        exclude: Option<Uuid>,
    ) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let exists = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM restaurants
                WHERE name = $1
                  AND ($2::uuid IS NULL OR id <> $2)
            )
            "#,
        )
        .bind(name)
        .bind(exclude)
        .fetch_one(executor)
        .await?;

        Ok(exists)
    }

    /// Listagem com contadores de pratos e mesas. COUNT(DISTINCT) em cada
    /// relação para não inflar quando o restaurante tem muitos dos dois.
    pub async fn list_with_counts<'e, E>(
        &self,
        executor: E,
    ) -> Result<Vec<RestaurantListing>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let listings = sqlx::query_as::<_, RestaurantListing>(
            r#"
            SELECT r.id, r.name, r.phone,
                   a.street, a.number, a.city, a.postal_code, a.province,
                   COUNT(DISTINCT d.id) AS dish_count,
                   COUNT(DISTINCT t.id) AS table_count
            FROM restaurants r
            JOIN addresses a ON a.id = r.address_id
            LEFT JOIN dishes d ON d.restaurant_id = r.id
            LEFT JOIN dining_tables t ON t.restaurant_id = r.id
            GROUP BY r.id, a.id
            ORDER BY r.name ASC
            "#,
        )
        .fetch_all(executor)
        .await?;

        Ok(listings)
    }

    /// Busca multi-critério: fragmentos não vazios entram com AND entre si;
    /// o fragmento de endereço casa com rua OU cidade OU código postal.
    pub async fn search<'e, E>(
        &self,
        executor: E,
        name_like: Option<&str>,
        phone_like: Option<&str>,
        address_like: Option<&str>,
    ) -> Result<Vec<RestaurantListing>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let listings = sqlx::query_as::<_, RestaurantListing>(
            r#"
            SELECT r.id, r.name, r.phone,
                   a.street, a.number, a.city, a.postal_code, a.province,
                   COUNT(DISTINCT d.id) AS dish_count,
                   COUNT(DISTINCT t.id) AS table_count
            FROM restaurants r
            JOIN addresses a ON a.id = r.address_id
            LEFT JOIN dishes d ON d.restaurant_id = r.id
            LEFT JOIN dining_tables t ON t.restaurant_id = r.id
            WHERE ($1::text IS NULL OR r.name ILIKE $1)
              AND ($2::text IS NULL OR r.phone ILIKE $2)
              AND ($3::text IS NULL
                   OR a.street ILIKE $3
                   OR a.city ILIKE $3
                   OR a.postal_code ILIKE $3)
            GROUP BY r.id, a.id
            ORDER BY r.name ASC
            "#,
        )
        .bind(name_like)
        .bind(phone_like)
        .bind(address_like)
        .fetch_all(executor)
        .await?;

        Ok(listings)
    }

    // =========================================================================
    //  DETALHE (endereço + pratos + mesas + clientes frequentes)
    // =========================================================================

    pub async fn list_dishes_of<'e, E>(
        &self,
        executor: E,
        restaurant_id: Uuid,
    ) -> Result<Vec<Dish>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let dishes = sqlx::query_as::<_, Dish>(
            "SELECT * FROM dishes WHERE restaurant_id = $1 ORDER BY name ASC",
        )
        .bind(restaurant_id)
        .fetch_all(executor)
        .await?;

        Ok(dishes)
    }

    pub async fn list_tables_of<'e, E>(
        &self,
        executor: E,
        restaurant_id: Uuid,
    ) -> Result<Vec<DiningTable>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let tables = sqlx::query_as::<_, DiningTable>(
            "SELECT * FROM dining_tables WHERE restaurant_id = $1 ORDER BY number ASC",
        )
        .bind(restaurant_id)
        .fetch_all(executor)
        .await?;

        Ok(tables)
    }

    // =========================================================================
    //  CLIENTES FREQUENTES (M2M)
    // =========================================================================

    pub async fn list_frequent_customers<'e, E>(
        &self,
        executor: E,
        restaurant_id: Uuid,
    ) -> Result<Vec<Customer>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let customers = sqlx::query_as::<_, Customer>(
            r#"
            SELECT c.*
            FROM restaurant_frequent_customers rc
            JOIN customers c ON c.id = rc.customer_id
            WHERE rc.restaurant_id = $1
            ORDER BY c.name ASC
            "#,
        )
        .bind(restaurant_id)
        .fetch_all(executor)
        .await?;

        Ok(customers)
    }

    pub async fn add_frequent_customer<'e, E>(
        &self,
        executor: E,
        restaurant_id: Uuid,
        customer_id: Uuid,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query(
            r#"
            INSERT INTO restaurant_frequent_customers (restaurant_id, customer_id)
            VALUES ($1, $2)
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(restaurant_id)
        .bind(customer_id)
        .execute(executor)
        .await?;

        Ok(())
    }

    pub async fn remove_frequent_customer<'e, E>(
        &self,
        executor: E,
        restaurant_id: Uuid,
        customer_id: Uuid,
    ) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query(
            "DELETE FROM restaurant_frequent_customers WHERE restaurant_id = $1 AND customer_id = $2",
        )
        .bind(restaurant_id)
        .bind(customer_id)
        .execute(executor)
        .await?;

        Ok(result.rows_affected())
    }

    pub async fn customer_exists<'e, E>(
        &self,
        executor: E,
        customer_id: Uuid,
    ) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM customers WHERE id = $1)")
                .bind(customer_id)
                .fetch_one(executor)
                .await?;

        Ok(exists)
    }
}
