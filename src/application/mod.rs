pub mod like_portfolio;
