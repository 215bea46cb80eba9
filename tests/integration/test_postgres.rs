//! Repository behaviour against a real Postgres. Run with
//! `DATABASE_URL=... cargo test -- --ignored`; each test gets a fresh,
//! migrated database.

use reviewtwits_api::{
    domain::{
        review::{
            entity::{NewReview, ProjectReviewFilter, Review, ReviewEdit, ReviewStatus},
            repository::ReviewRepository,
        },
        shared::{
            errors::{ConflictKind, DomainError},
            pagination::SortDirection,
        },
        social::{
            reaction::ReactionKind,
            repository::{FollowRepository, ReactionRepository, ScrapRepository},
        },
        user::{
            entity::{NewUser, User},
            repository::UserRepository,
        },
    },
    infrastructure::repositories::{
        sqlx_follow_repository::SqlxFollowRepository,
        sqlx_review_repository::SqlxReviewRepository,
        sqlx_social_repository::SqlxSocialRepository,
        sqlx_user_repository::SqlxUserRepository,
    },
};
use sqlx::PgPool;

async fn user(pool: &PgPool, name: &str) -> User {
    SqlxUserRepository::new(pool.clone())
        .create(NewUser {
            account_id: format!("{}@example.com", name),
            password_hash: "hash".to_string(),
            nickname: name.to_string(),
        })
        .await
        .unwrap()
}

async fn review(pool: &PgPool, author: &User, product_name: &str) -> Review {
    SqlxReviewRepository::new(pool.clone())
        .create(NewReview {
            user_id: author.id,
            project_id: None,
            content: "Sturdy and well made.".to_string(),
            product_url: "https://shop.example.com/items/1".to_string(),
            product_name: product_name.to_string(),
            score: 4,
        })
        .await
        .unwrap()
}

async fn reaction_count(reviews: &SqlxReviewRepository, id: i64) -> i32 {
    reviews.find_by_id(id).await.unwrap().unwrap().reaction_count
}

#[sqlx::test]
#[ignore = "needs a Postgres DATABASE_URL"]
async fn test_reaction_upsert_counts_insert_only(pool: PgPool) {
    let author = user(&pool, "writer").await;
    let fan = user(&pool, "fan").await;
    let target = review(&pool, &author, "Kettle").await;
    let reviews = SqlxReviewRepository::new(pool.clone());
    let social = SqlxSocialRepository::new(pool.clone());

    ReactionRepository::upsert(&social, fan.id, target.id, ReactionKind::Love)
        .await
        .unwrap();
    assert_eq!(reaction_count(&reviews, target.id).await, 1);

    let replaced = ReactionRepository::upsert(&social, fan.id, target.id, ReactionKind::Cool)
        .await
        .unwrap();
    assert_eq!(replaced.kind, ReactionKind::Cool);
    assert_eq!(reaction_count(&reviews, target.id).await, 1);

    ReactionRepository::delete_with_count(&social, &replaced)
        .await
        .unwrap();
    assert_eq!(reaction_count(&reviews, target.id).await, 0);

    // Deleting the same row again must not drive the count negative.
    ReactionRepository::delete_with_count(&social, &replaced)
        .await
        .unwrap();
    assert_eq!(reaction_count(&reviews, target.id).await, 0);
}

#[sqlx::test]
#[ignore = "needs a Postgres DATABASE_URL"]
async fn test_duplicate_scrap_is_conflict(pool: PgPool) {
    let author = user(&pool, "maker").await;
    let collector = user(&pool, "collector").await;
    let target = review(&pool, &author, "Shelf").await;
    let social = SqlxSocialRepository::new(pool.clone());

    ScrapRepository::insert(&social, collector.id, target.id)
        .await
        .unwrap();
    let again = ScrapRepository::insert(&social, collector.id, target.id).await;
    assert_eq!(
        again,
        Err(DomainError::Conflict(ConflictKind::AlreadyScrapped))
    );
}

#[sqlx::test]
#[ignore = "needs a Postgres DATABASE_URL"]
async fn test_review_writes_skip_soft_deleted_rows(pool: PgPool) {
    let author = user(&pool, "author").await;
    let target = review(&pool, &author, "Lamp").await;
    let reviews = SqlxReviewRepository::new(pool.clone());

    let edited = reviews
        .update_fields(
            target.id,
            &ReviewEdit {
                score: Some(2),
                ..ReviewEdit::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(edited.score, 2);
    assert_eq!(edited.product_name, "Lamp");

    assert!(reviews.soft_delete(target.id).await.unwrap());
    assert!(!reviews.soft_delete(target.id).await.unwrap());

    let classified = reviews.set_status(target.id, ReviewStatus::Approved).await;
    assert!(matches!(classified, Err(DomainError::NotFound(_))));
    let stored = reviews.find_by_id(target.id).await.unwrap().unwrap();
    assert!(!stored.exist_flag);
    assert_eq!(stored.status, ReviewStatus::Pending);
}

#[sqlx::test]
#[ignore = "needs a Postgres DATABASE_URL"]
async fn test_follow_flags_follow_stored_reverse_edge(pool: PgPool) {
    let ann = user(&pool, "ann").await;
    let ben = user(&pool, "ben").await;
    let follows = SqlxFollowRepository::new(pool.clone());

    let stale = follows.create(ann.id, ben.id).await.unwrap();
    assert!(!stale.follow_back_flag);
    let back = follows.create(ben.id, ann.id).await.unwrap();
    assert!(back.follow_back_flag);

    follows.delete(&stale).await.unwrap();
    let remaining = follows.find(ben.id, ann.id).await.unwrap().unwrap();
    assert!(!remaining.follow_back_flag);
}

#[sqlx::test]
#[ignore = "needs a Postgres DATABASE_URL"]
async fn test_project_listing_filters_and_orders(pool: PgPool) {
    let owner = user(&pool, "owner").await;
    let project_id: i64 = sqlx::query_scalar(
        "INSERT INTO projects (user_id, name, uri) VALUES ($1, 'Shop', 'https://shop.example.com')
         RETURNING id",
    )
    .bind(owner.id)
    .fetch_one(&pool)
    .await
    .unwrap();
    let reviews = SqlxReviewRepository::new(pool.clone());

    let mut ids = Vec::new();
    for name in ["Green 50% tea", "Black tea", "Mug"] {
        let created = reviews
            .create(NewReview {
                user_id: owner.id,
                project_id: Some(project_id),
                content: "Arrived quickly.".to_string(),
                product_url: "https://shop.example.com/items/2".to_string(),
                product_name: name.to_string(),
                score: 5,
            })
            .await
            .unwrap();
        ids.push(created.id);
    }

    let filter = ProjectReviewFilter {
        keyword: Some("tea".to_string()),
        sort: SortDirection::Asc,
        ..ProjectReviewFilter::default()
    };
    let page = reviews
        .find_page_by_project(project_id, &filter, None, 10)
        .await
        .unwrap();
    assert_eq!(page.iter().map(|r| r.id).collect::<Vec<_>>(), vec![ids[0], ids[1]]);

    let page = reviews
        .find_page_by_project(project_id, &filter, Some(ids[0]), 10)
        .await
        .unwrap();
    assert_eq!(page.iter().map(|r| r.id).collect::<Vec<_>>(), vec![ids[1]]);

    // A literal percent sign is not a wildcard.
    let filter = ProjectReviewFilter {
        keyword: Some("50%".to_string()),
        ..ProjectReviewFilter::default()
    };
    let page = reviews
        .find_page_by_project(project_id, &filter, None, 10)
        .await
        .unwrap();
    assert_eq!(page.len(), 1);
}
