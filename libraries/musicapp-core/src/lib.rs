//! MusicApp Core
//!
//! Storage-agnostic types, traits, and error handling for the MusicApp
//! catalog server.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `Artist`, `Album`, `Chanson`, `User`, `Role`
//! - **Input Types**: typed create/update payloads that double as field allow-lists
//! - **Pagination**: `PageRequest` and the `Page` envelope
//! - **Authorization**: the pure `authorize` role check
//! - **Storage Trait**: `StorageContext`, implemented by `musicapp-storage`
//! - **Error Handling**: Unified `CatalogError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use musicapp_core::{authorize, PageRequest, ADMIN_ROLE};
//! use musicapp_core::pagination::ALBUMS_PER_PAGE;
//!
//! assert!(authorize(&["admin"], ADMIN_ROLE));
//!
//! let page = PageRequest::new(Some(2), None, ALBUMS_PER_PAGE, 100);
//! assert_eq!(page.offset(), 5);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod auth;
pub mod error;
pub mod pagination;
pub mod storage;
pub mod types;
pub mod validation;

// Re-export commonly used types
pub use auth::{authorize, ADMIN_ROLE, DEFAULT_ROLE};
pub use error::{CatalogError, Result};
pub use pagination::{Page, PageRequest};
pub use storage::StorageContext;
pub use validation::FieldErrors;

// Export all types
pub use types::{
    // Catalog
    Album, AlbumFilter, AlbumId, AlbumWithArtist, AlbumWithChansons,
    Artist, ArtistFilter, ArtistId, ArtistWithAlbums,
    Chanson, ChansonId, ChansonWithAlbum, ChansonWithAlbumArtist,
    CreateAlbum, CreateArtist, CreateChanson, UpdateAlbum, UpdateArtist, UpdateChanson,
    // Accounts
    Gender, LoginUser, RegisterUser, Role, RoleId, User, UserId, UserWithRoles,
};
