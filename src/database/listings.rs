use async_trait::async_trait;
use sqlx::{self, postgres::PgArguments, FromRow, PgPool};
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::database::models::image::ListingImage;
use crate::database::models::listing::{Listing, ListingChanges, ListingSummary, NewListing};
use crate::database::store::ListingStore;
use crate::filter::{ListingFilter, SqlParam};

const LISTING_COLUMNS: &str = "\"id\", \"address\", \"city\", \"price\", \"property_type\", \
     \"number_of_bedrooms\", \"number_of_bathrooms\", \"land_size\", \"realtor_id\", \
     \"created_at\", \"updated_at\"";

const SUMMARY_COLUMNS: &str = "\"id\", \"address\", \"city\", \"price\", \"property_type\", \
     \"number_of_bedrooms\", \"number_of_bathrooms\"";

pub struct PgListingStore {
    pool: PgPool,
}

impl PgListingStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ListingStore for PgListingStore {
    async fn search(&self, filter: &ListingFilter) -> Result<Vec<ListingSummary>, DatabaseError> {
        let where_sql = filter.to_where_sql(0);

        let query = [
            format!(
                "SELECT {}, (SELECT \"url\" FROM \"images\" \
                 WHERE \"images\".\"listing_id\" = \"listings\".\"id\" \
                 ORDER BY \"images\".\"created_at\" LIMIT 1) AS \"img\"",
                SUMMARY_COLUMNS
            ),
            "FROM \"listings\"".to_string(),
            if where_sql.clause.is_empty() {
                String::new()
            } else {
                format!("WHERE {}", where_sql.clause)
            },
            "ORDER BY \"created_at\" DESC".to_string(),
        ]
        .into_iter()
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

        let mut q = sqlx::query_as::<_, ListingSummary>(&query);
        for param in &where_sql.params {
            q = bind_sql_param(q, param);
        }

        Ok(q.fetch_all(&self.pool).await?)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Listing>, DatabaseError> {
        let query = format!(
            "SELECT {} FROM \"listings\" WHERE \"id\" = $1",
            LISTING_COLUMNS
        );

        Ok(sqlx::query_as::<_, Listing>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn images_for(&self, listing_id: Uuid) -> Result<Vec<ListingImage>, DatabaseError> {
        Ok(sqlx::query_as::<_, ListingImage>(
            "SELECT \"id\", \"url\", \"listing_id\", \"created_at\" FROM \"images\" \
             WHERE \"listing_id\" = $1 ORDER BY \"created_at\"",
        )
        .bind(listing_id)
        .fetch_all(&self.pool)
        .await?)
    }

    async fn insert(&self, listing: NewListing) -> Result<Listing, DatabaseError> {
        let query = format!(
            "INSERT INTO \"listings\" (\"address\", \"city\", \"price\", \"property_type\", \
             \"number_of_bedrooms\", \"number_of_bathrooms\", \"land_size\", \"realtor_id\") \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) RETURNING {}",
            LISTING_COLUMNS
        );

        Ok(sqlx::query_as::<_, Listing>(&query)
            .bind(listing.address)
            .bind(listing.city)
            .bind(listing.price)
            .bind(listing.property_type)
            .bind(listing.number_of_bedrooms)
            .bind(listing.number_of_bathrooms)
            .bind(listing.land_size)
            .bind(listing.realtor_id)
            .fetch_one(&self.pool)
            .await?)
    }

    async fn insert_images(&self, listing_id: Uuid, urls: &[String]) -> Result<u64, DatabaseError> {
        if urls.is_empty() {
            return Ok(0);
        }

        // ($1, $2), ($1, $3), ... - listing id bound once, one URL per row
        let placeholders = (0..urls.len())
            .map(|i| format!("($1, ${})", i + 2))
            .collect::<Vec<_>>()
            .join(", ");
        let query = format!(
            "INSERT INTO \"images\" (\"listing_id\", \"url\") VALUES {}",
            placeholders
        );

        let mut q = sqlx::query(&query).bind(listing_id);
        for url in urls {
            q = q.bind(url.as_str());
        }

        let result = q.execute(&self.pool).await?;
        Ok(result.rows_affected())
    }

    async fn update_owned(
        &self,
        id: Uuid,
        realtor_id: Uuid,
        changes: ListingChanges,
    ) -> Result<Option<Listing>, DatabaseError> {
        if changes.is_empty() {
            // Nothing to write; still resolve ownership in one statement
            let query = format!(
                "SELECT {} FROM \"listings\" WHERE \"id\" = $1 AND \"realtor_id\" = $2",
                LISTING_COLUMNS
            );
            return Ok(sqlx::query_as::<_, Listing>(&query)
                .bind(id)
                .bind(realtor_id)
                .fetch_optional(&self.pool)
                .await?);
        }

        let mut sets: Vec<String> = Vec::new();
        let mut params: Vec<SqlParam> = Vec::new();

        if let Some(address) = changes.address {
            params.push(SqlParam::Text(address));
            sets.push(format!("\"address\" = ${}", params.len()));
        }
        if let Some(city) = changes.city {
            params.push(SqlParam::Text(city));
            sets.push(format!("\"city\" = ${}", params.len()));
        }
        if let Some(price) = changes.price {
            params.push(SqlParam::Number(price));
            sets.push(format!("\"price\" = ${}", params.len()));
        }
        if let Some(property_type) = changes.property_type {
            params.push(SqlParam::PropertyType(property_type));
            sets.push(format!("\"property_type\" = ${}", params.len()));
        }
        if let Some(bedrooms) = changes.number_of_bedrooms {
            params.push(SqlParam::Int(bedrooms));
            sets.push(format!("\"number_of_bedrooms\" = ${}", params.len()));
        }
        if let Some(bathrooms) = changes.number_of_bathrooms {
            params.push(SqlParam::Int(bathrooms));
            sets.push(format!("\"number_of_bathrooms\" = ${}", params.len()));
        }
        if let Some(land_size) = changes.land_size {
            params.push(SqlParam::Number(land_size));
            sets.push(format!("\"land_size\" = ${}", params.len()));
        }
        sets.push("\"updated_at\" = now()".to_string());

        // The ownership check and the write are one conditional statement,
        // so a non-owner can never observe a partial mutation.
        let query = format!(
            "UPDATE \"listings\" SET {} WHERE \"id\" = ${} AND \"realtor_id\" = ${} RETURNING {}",
            sets.join(", "),
            params.len() + 1,
            params.len() + 2,
            LISTING_COLUMNS
        );

        let mut q = sqlx::query_as::<_, Listing>(&query);
        for param in &params {
            q = bind_sql_param(q, param);
        }

        Ok(q.bind(id).bind(realtor_id).fetch_optional(&self.pool).await?)
    }

    async fn owner_of(&self, id: Uuid) -> Result<Option<Uuid>, DatabaseError> {
        Ok(
            sqlx::query_scalar::<_, Uuid>("SELECT \"realtor_id\" FROM \"listings\" WHERE \"id\" = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?,
        )
    }
}

pub(crate) fn bind_sql_param<'q, O>(
    q: sqlx::query::QueryAs<'q, sqlx::Postgres, O, PgArguments>,
    param: &'q SqlParam,
) -> sqlx::query::QueryAs<'q, sqlx::Postgres, O, PgArguments>
where
    O: for<'r> FromRow<'r, sqlx::postgres::PgRow>,
{
    match param {
        SqlParam::Text(s) => q.bind(s.as_str()),
        SqlParam::Int(i) => q.bind(*i),
        SqlParam::Number(d) => q.bind(*d),
        SqlParam::PropertyType(t) => q.bind(*t),
        SqlParam::Uuid(u) => q.bind(*u),
    }
}
