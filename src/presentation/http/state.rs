use crate::{
    application::{
        comment::use_case::CommentUseCase, follow::use_case::FollowUseCase,
        project::use_case::ProjectUseCase, reaction::use_case::ReactionUseCase,
        review::{assembler::ReviewAssembler, use_case::ReviewUseCase},
        scrap::use_case::ScrapUseCase, user::use_case::UserUseCase,
    },
    config::Config,
    domain::{
        project::repository::ProjectRepository,
        review::repository::ReviewRepository,
        social::repository::{
            CommentRepository, FollowRepository, ReactionRepository, ScrapRepository,
        },
        user::repository::UserRepository,
    },
    infrastructure::{
        repositories::{
            sqlx_follow_repository::SqlxFollowRepository,
            sqlx_project_repository::SqlxProjectRepository,
            sqlx_review_repository::SqlxReviewRepository,
            sqlx_social_repository::SqlxSocialRepository,
            sqlx_user_repository::SqlxUserRepository,
        },
        storage::{local_file_storage::LocalFileStorage, traits::FileStorage},
    },
};
use sqlx::PgPool;
use std::sync::Arc;

/// Persistence and file-storage backends the use cases are built on.
#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub projects: Arc<dyn ProjectRepository>,
    pub reviews: Arc<dyn ReviewRepository>,
    pub comments: Arc<dyn CommentRepository>,
    pub reactions: Arc<dyn ReactionRepository>,
    pub scraps: Arc<dyn ScrapRepository>,
    pub follows: Arc<dyn FollowRepository>,
    pub storage: Arc<dyn FileStorage>,
}

impl Repositories {
    /// Postgres-backed repositories sharing one pool, files on local disk.
    pub fn postgres(db: &PgPool, config: &Config) -> Self {
        let social = Arc::new(SqlxSocialRepository::new(db.clone()));
        Self {
            users: Arc::new(SqlxUserRepository::new(db.clone())),
            projects: Arc::new(SqlxProjectRepository::new(db.clone())),
            reviews: Arc::new(SqlxReviewRepository::new(db.clone())),
            comments: social.clone(),
            reactions: social.clone(),
            scraps: social,
            follows: Arc::new(SqlxFollowRepository::new(db.clone())),
            storage: Arc::new(LocalFileStorage::new(db.clone(), &config.file_dir)),
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub config: Config,
    pub users: Arc<UserUseCase>,
    pub projects: Arc<ProjectUseCase>,
    pub reviews: Arc<ReviewUseCase>,
    pub comments: Arc<CommentUseCase>,
    pub reactions: Arc<ReactionUseCase>,
    pub scraps: Arc<ScrapUseCase>,
    pub follows: Arc<FollowUseCase>,
}

impl AppState {
    pub fn new(db: PgPool, config: Config, repos: Repositories) -> Self {
        let assembler = ReviewAssembler::new(
            repos.reactions.clone(),
            repos.scraps.clone(),
            repos.storage.clone(),
        );

        Self {
            users: Arc::new(UserUseCase::new(
                repos.users.clone(),
                repos.storage.clone(),
                config.bcrypt_cost,
            )),
            projects: Arc::new(ProjectUseCase::new(repos.projects.clone())),
            reviews: Arc::new(ReviewUseCase::new(
                repos.reviews.clone(),
                repos.projects.clone(),
                repos.users.clone(),
                repos.storage.clone(),
                assembler.clone(),
            )),
            comments: Arc::new(CommentUseCase::new(
                repos.comments.clone(),
                repos.reviews.clone(),
            )),
            reactions: Arc::new(ReactionUseCase::new(
                repos.reactions.clone(),
                repos.reviews.clone(),
            )),
            scraps: Arc::new(ScrapUseCase::new(
                repos.scraps.clone(),
                repos.reviews.clone(),
                assembler,
            )),
            follows: Arc::new(FollowUseCase::new(
                repos.follows,
                repos.users,
                repos.storage,
            )),
            db,
            config,
        }
    }
}
