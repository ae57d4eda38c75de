use async_trait::async_trait;
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::database::models::image::ListingImage;
use crate::database::models::listing::{Listing, ListingChanges, ListingSummary, NewListing};
use crate::database::models::user::{NewUser, User};
use crate::filter::ListingFilter;

/// Persistence operations for listings and their images.
///
/// Services are generic over this trait so the business rules can be
/// exercised against an in-memory double; the Postgres implementation
/// lives in [`crate::database::listings`].
#[async_trait]
pub trait ListingStore: Send + Sync {
    /// All listings matching the filter, newest first, projected to the
    /// public summary shape (first image URL only).
    async fn search(&self, filter: &ListingFilter) -> Result<Vec<ListingSummary>, DatabaseError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Listing>, DatabaseError>;

    /// Images for a listing, oldest first.
    async fn images_for(&self, listing_id: Uuid) -> Result<Vec<ListingImage>, DatabaseError>;

    async fn insert(&self, listing: NewListing) -> Result<Listing, DatabaseError>;

    /// Attach a batch of image URLs to a listing; returns the number of
    /// rows written. Callers skip this entirely for an empty batch.
    async fn insert_images(&self, listing_id: Uuid, urls: &[String]) -> Result<u64, DatabaseError>;

    /// Conditional write: applies `changes` only when the listing exists AND
    /// is owned by `realtor_id`, in a single statement. `None` means the
    /// condition did not match; which half failed is the caller's concern.
    async fn update_owned(
        &self,
        id: Uuid,
        realtor_id: Uuid,
        changes: ListingChanges,
    ) -> Result<Option<Listing>, DatabaseError>;

    /// Owning realtor of a listing, if the listing exists.
    async fn owner_of(&self, id: Uuid) -> Result<Option<Uuid>, DatabaseError>;
}

/// Persistence operations for user accounts.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Single unique-constraint-backed insert; a duplicate email surfaces
    /// as [`DatabaseError::UniqueViolation`], never as a pre-read.
    async fn insert(&self, user: NewUser) -> Result<User, DatabaseError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DatabaseError>;
}
