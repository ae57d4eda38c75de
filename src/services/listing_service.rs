use std::sync::Arc;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::database::listings::PgListingStore;
use crate::database::manager::DatabaseManager;
use crate::database::models::listing::{
    Listing, ListingChanges, ListingSummary, NewListing, PropertyType,
};
use crate::database::store::ListingStore;
use crate::error::ApiError;
use crate::filter::ListingFilter;

/// External create payload, camel-case wire naming.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateListingRequest {
    pub address: String,
    pub city: String,
    pub price: Decimal,
    pub property_type: PropertyType,
    pub number_of_bedrooms: i32,
    pub number_of_bathrooms: i32,
    pub land_size: Decimal,
    #[serde(default)]
    pub images: Vec<ImageUrl>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageUrl {
    pub url: String,
}

/// External partial-update payload; absent fields leave the listing untouched.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateListingRequest {
    pub address: Option<String>,
    pub city: Option<String>,
    pub price: Option<Decimal>,
    pub property_type: Option<PropertyType>,
    pub number_of_bedrooms: Option<i32>,
    pub number_of_bathrooms: Option<i32>,
    pub land_size: Option<Decimal>,
}

/// Public search projection: listing fields plus the first image URL only.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingView {
    pub id: Uuid,
    pub address: String,
    pub city: String,
    pub price: Decimal,
    pub property_type: PropertyType,
    pub number_of_bedrooms: i32,
    pub number_of_bathrooms: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub img: Option<String>,
}

/// Public single-listing projection, carrying the full image URL list.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingDetail {
    pub id: Uuid,
    pub address: String,
    pub city: String,
    pub price: Decimal,
    pub property_type: PropertyType,
    pub number_of_bedrooms: i32,
    pub number_of_bathrooms: i32,
    pub land_size: Decimal,
    pub images: Vec<String>,
}

impl CreateListingRequest {
    /// Translate the external camel-case payload into the storage row shape,
    /// splitting off the image URL batch.
    pub fn into_new_listing(self, realtor_id: Uuid) -> (NewListing, Vec<String>) {
        let urls = self.images.into_iter().map(|image| image.url).collect();
        let listing = NewListing {
            address: self.address,
            city: self.city,
            price: self.price,
            property_type: self.property_type,
            number_of_bedrooms: self.number_of_bedrooms,
            number_of_bathrooms: self.number_of_bathrooms,
            land_size: self.land_size,
            realtor_id,
        };
        (listing, urls)
    }
}

impl UpdateListingRequest {
    /// Translate the external camel-case payload into storage column changes.
    pub fn into_changes(self) -> ListingChanges {
        ListingChanges {
            address: self.address,
            city: self.city,
            price: self.price,
            property_type: self.property_type,
            number_of_bedrooms: self.number_of_bedrooms,
            number_of_bathrooms: self.number_of_bathrooms,
            land_size: self.land_size,
        }
    }
}

impl ListingView {
    fn from_summary(summary: ListingSummary) -> Self {
        Self {
            id: summary.id,
            address: summary.address,
            city: summary.city,
            price: summary.price,
            property_type: summary.property_type,
            number_of_bedrooms: summary.number_of_bedrooms,
            number_of_bathrooms: summary.number_of_bathrooms,
            img: summary.img,
        }
    }

    fn from_listing(listing: &Listing, img: Option<String>) -> Self {
        Self {
            id: listing.id,
            address: listing.address.clone(),
            city: listing.city.clone(),
            price: listing.price,
            property_type: listing.property_type,
            number_of_bedrooms: listing.number_of_bedrooms,
            number_of_bathrooms: listing.number_of_bathrooms,
            img,
        }
    }
}

impl ListingDetail {
    fn from_parts(listing: Listing, images: Vec<String>) -> Self {
        Self {
            id: listing.id,
            address: listing.address,
            city: listing.city,
            price: listing.price,
            property_type: listing.property_type,
            number_of_bedrooms: listing.number_of_bedrooms,
            number_of_bathrooms: listing.number_of_bathrooms,
            land_size: listing.land_size,
            images,
        }
    }
}

/// Listing business rules, independent of the concrete store.
pub struct ListingService<S: ListingStore> {
    store: Arc<S>,
}

impl ListingService<PgListingStore> {
    pub async fn from_env() -> Result<Self, ApiError> {
        let pool = DatabaseManager::pool().await?;
        Ok(Self::new(Arc::new(PgListingStore::new(pool))))
    }
}

impl<S: ListingStore> ListingService<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Filtered search projected to the public view. An empty result set is
    /// NotFound, not an empty array.
    pub async fn search(&self, filter: &ListingFilter) -> Result<Vec<ListingView>, ApiError> {
        let summaries = self.store.search(filter).await?;

        if summaries.is_empty() {
            return Err(ApiError::not_found("No listings matched the given filters"));
        }

        Ok(summaries.into_iter().map(ListingView::from_summary).collect())
    }

    pub async fn get(&self, id: Uuid) -> Result<ListingDetail, ApiError> {
        let listing = self
            .store
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApiError::not_found("Listing not found"))?;

        let images = self.store.images_for(id).await?;
        let urls = images.into_iter().map(|image| image.url).collect();
        Ok(ListingDetail::from_parts(listing, urls))
    }

    /// Persist the listing row first, then the image batch tagged with the
    /// new listing id. An empty batch issues no image write at all.
    pub async fn create(
        &self,
        request: CreateListingRequest,
        realtor_id: Uuid,
    ) -> Result<ListingDetail, ApiError> {
        let (new_listing, urls) = request.into_new_listing(realtor_id);
        let listing = self.store.insert(new_listing).await?;

        if !urls.is_empty() {
            let written = self.store.insert_images(listing.id, &urls).await?;
            tracing::debug!(listing_id = %listing.id, images = written, "attached listing images");
        }

        tracing::info!(listing_id = %listing.id, realtor_id = %realtor_id, "listing created");
        Ok(ListingDetail::from_parts(listing, urls))
    }

    /// Ownership-gated update. The write only happens when the caller owns
    /// the listing; on a miss, a follow-up ownership read decides between
    /// NotFound and Unauthorized.
    pub async fn update(
        &self,
        id: Uuid,
        realtor_id: Uuid,
        request: UpdateListingRequest,
    ) -> Result<ListingView, ApiError> {
        match self.store.update_owned(id, realtor_id, request.into_changes()).await? {
            Some(listing) => {
                let img = self
                    .store
                    .images_for(id)
                    .await?
                    .into_iter()
                    .next()
                    .map(|image| image.url);
                Ok(ListingView::from_listing(&listing, img))
            }
            None => match self.store.owner_of(id).await? {
                Some(_) => Err(ApiError::unauthorized(
                    "Only the owning realtor may update this listing",
                )),
                None => Err(ApiError::not_found("Listing not found")),
            },
        }
    }
}
