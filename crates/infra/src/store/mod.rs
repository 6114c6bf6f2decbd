mod saved_posts;

pub use saved_posts::{SavedPostStore, StoreError};
