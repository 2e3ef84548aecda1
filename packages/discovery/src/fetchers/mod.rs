//! Interchangeable fetch strategies.
//!
//! Each strategy solves the same problem, obtaining the current raw
//! listings, through a different channel. The pipeline holds one of
//! them behind the [`Fetcher`](crate::traits::Fetcher) trait and never
//! cares which.

pub mod graphql;
pub mod mock;
pub mod page_data;

pub use graphql::GraphqlFetcher;
pub use mock::MockFetcher;
pub use page_data::PageDataFetcher;
