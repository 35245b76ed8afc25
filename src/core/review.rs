//! Review business logic - Ratings and their aggregation.
//!
//! Reviews bind the authenticated reviewer and the target outfit
//! automatically. Ratings outside 1-5 are rejected at write time, so the
//! aggregation can assume a five-bucket histogram.

use crate::{
    entities::{Outfit, Review, review},
    errors::{Error, Result},
};
use sea_orm::{PaginatorTrait, QueryOrder, Set, prelude::*};
use tracing::info;

/// Lowest admissible star rating.
pub const MIN_RATING: i16 = 1;
/// Highest admissible star rating.
pub const MAX_RATING: i16 = 5;
/// Reviews shown per page.
pub const PAGE_SIZE: u64 = 10;

/// One page of an outfit's reviews plus aggregate statistics.
///
/// The statistics always cover every review of the outfit, not just the
/// requested page.
#[derive(Debug, Clone)]
pub struct ReviewPage {
    /// The requested page, newest first
    pub reviews: Vec<review::Model>,
    /// Zero-based index of the returned page
    pub page: u64,
    /// Total number of pages at [`PAGE_SIZE`]
    pub total_pages: u64,
    /// Total number of reviews for the outfit
    pub review_count: u64,
    /// Arithmetic mean rating, 0 when there are no reviews
    pub average_rating: f64,
    /// Count of reviews per star, index 0 holding one-star counts
    pub distribution: [u64; 5],
}

/// Writes a review for an outfit on behalf of the authenticated reviewer.
///
/// # Errors
/// Returns `InvalidRating` for a rating outside 1-5 and `NotFound` if the
/// outfit does not exist.
pub async fn create_review(
    db: &DatabaseConnection,
    reviewer_id: i64,
    outfit_id: i64,
    rating: i16,
    comment: String,
) -> Result<review::Model> {
    if !(MIN_RATING..=MAX_RATING).contains(&rating) {
        return Err(Error::InvalidRating { rating });
    }

    Outfit::find_by_id(outfit_id)
        .one(db)
        .await?
        .ok_or(Error::NotFound {
            entity: "outfit",
            id: outfit_id,
        })?;

    let created = review::ActiveModel {
        outfit_id: Set(outfit_id),
        reviewer_id: Set(Some(reviewer_id)),
        rating: Set(rating),
        comment: Set(comment),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await?;

    info!(
        "Profile {} rated outfit {} at {} stars",
        reviewer_id, outfit_id, rating
    );
    Ok(created)
}

/// One page of an outfit's reviews, newest first, with aggregates.
///
/// Out-of-range pages return an empty page with the statistics intact.
///
/// # Errors
/// Returns `NotFound` if the outfit does not exist.
pub async fn reviews_for_outfit(
    db: &DatabaseConnection,
    outfit_id: i64,
    page: u64,
) -> Result<ReviewPage> {
    Outfit::find_by_id(outfit_id)
        .one(db)
        .await?
        .ok_or(Error::NotFound {
            entity: "outfit",
            id: outfit_id,
        })?;

    let paginator = Review::find()
        .filter(review::Column::OutfitId.eq(outfit_id))
        .order_by_desc(review::Column::CreatedAt)
        .order_by_desc(review::Column::Id)
        .paginate(db, PAGE_SIZE);
    let total_pages = paginator.num_pages().await?;
    let reviews = paginator.fetch_page(page).await?;

    // Aggregates cover the whole review set, not one page
    let all = Review::find()
        .filter(review::Column::OutfitId.eq(outfit_id))
        .all(db)
        .await?;
    let review_count = all.len() as u64;

    let mut distribution = [0u64; 5];
    let mut rating_sum: i64 = 0;
    for entry in &all {
        rating_sum += i64::from(entry.rating);
        let bucket = usize::try_from(entry.rating - 1).unwrap_or(0);
        if bucket < distribution.len() {
            distribution[bucket] += 1;
        }
    }

    #[allow(clippy::cast_precision_loss)]
    let average_rating = if all.is_empty() {
        0.0
    } else {
        rating_sum as f64 / all.len() as f64
    };

    Ok(ReviewPage {
        reviews,
        page,
        total_pages,
        review_count,
        average_rating,
        distribution,
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::test_utils::{create_test_profile, setup_test_db, setup_with_outfit};

    #[tokio::test]
    async fn test_rating_range_is_enforced() -> Result<()> {
        let (db, profile, outfit) = setup_with_outfit().await?;

        for bad in [0, -1, 6, 100] {
            let result =
                create_review(&db, profile.id, outfit.id, bad, String::new()).await;
            assert!(matches!(result.unwrap_err(), Error::InvalidRating { .. }));
        }
        assert_eq!(Review::find().all(&db).await?.len(), 0);

        for good in [1, 3, 5] {
            create_review(&db, profile.id, outfit.id, good, String::new()).await?;
        }
        assert_eq!(Review::find().all(&db).await?.len(), 3);

        Ok(())
    }

    #[tokio::test]
    async fn test_review_unknown_outfit() -> Result<()> {
        let db = setup_test_db().await?;
        let profile = create_test_profile(&db, "reviewer").await?;

        let result = create_review(&db, profile.id, 999, 4, String::new()).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::NotFound { entity: "outfit", id: 999 }
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_review_binds_reviewer_and_outfit() -> Result<()> {
        let (db, profile, outfit) = setup_with_outfit().await?;

        let created = create_review(
            &db,
            profile.id,
            outfit.id,
            4,
            "Lovely drape".to_string(),
        )
        .await?;
        assert_eq!(created.reviewer_id, Some(profile.id));
        assert_eq!(created.outfit_id, outfit.id);
        assert_eq!(created.comment, "Lovely drape");

        Ok(())
    }

    #[tokio::test]
    async fn test_average_and_distribution() -> Result<()> {
        let (db, profile, outfit) = setup_with_outfit().await?;

        for rating in [5, 3, 4] {
            create_review(&db, profile.id, outfit.id, rating, String::new()).await?;
        }

        let page = reviews_for_outfit(&db, outfit.id, 0).await?;
        assert_eq!(page.review_count, 3);
        assert_eq!(page.average_rating, 4.0);
        assert_eq!(page.distribution, [0, 0, 1, 1, 1]);

        Ok(())
    }

    #[tokio::test]
    async fn test_no_reviews_means_zero_average() -> Result<()> {
        let (db, _profile, outfit) = setup_with_outfit().await?;

        let page = reviews_for_outfit(&db, outfit.id, 0).await?;
        assert_eq!(page.review_count, 0);
        assert_eq!(page.average_rating, 0.0);
        assert_eq!(page.distribution, [0; 5]);
        assert!(page.reviews.is_empty());
        assert_eq!(page.total_pages, 0);

        Ok(())
    }

    #[tokio::test]
    async fn test_pagination_newest_first() -> Result<()> {
        let (db, profile, outfit) = setup_with_outfit().await?;

        let mut last_id = 0;
        for i in 0i16..12 {
            let created = create_review(
                &db,
                profile.id,
                outfit.id,
                (i % 5) + 1,
                format!("Review {i}"),
            )
            .await?;
            last_id = created.id;
        }

        let first_page = reviews_for_outfit(&db, outfit.id, 0).await?;
        assert_eq!(first_page.reviews.len(), 10);
        assert_eq!(first_page.total_pages, 2);
        assert_eq!(first_page.review_count, 12);
        // The most recent review leads the first page
        assert_eq!(first_page.reviews[0].id, last_id);

        let second_page = reviews_for_outfit(&db, outfit.id, 1).await?;
        assert_eq!(second_page.reviews.len(), 2);

        let past_the_end = reviews_for_outfit(&db, outfit.id, 5).await?;
        assert!(past_the_end.reviews.is_empty());
        assert_eq!(past_the_end.review_count, 12);

        Ok(())
    }
}
