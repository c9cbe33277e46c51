mod album;
mod artist;
mod chanson;
mod user;

pub use album::{
    Album, AlbumFilter, AlbumId, AlbumWithArtist, AlbumWithChansons, CreateAlbum, UpdateAlbum,
};
pub use artist::{Artist, ArtistFilter, ArtistId, ArtistWithAlbums, CreateArtist, UpdateArtist};
pub use chanson::{
    Chanson, ChansonId, ChansonWithAlbum, ChansonWithAlbumArtist, CreateChanson, UpdateChanson,
};
pub use user::{Gender, LoginUser, RegisterUser, Role, RoleId, User, UserId, UserWithRoles};
