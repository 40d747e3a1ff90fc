pub mod sqlx_like_repository;
