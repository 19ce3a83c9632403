/// Application name.
pub const APP_NAME: &str = "Cocktail Lab";

/// Maximum source size of an attached recipe image (5 MB).
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

/// Number of entries on each popularity board.
pub const TOP_RANKED: usize = 3;

/// Description stored for drafts submitted without one.
pub const DEFAULT_DESCRIPTION: &str = "커스텀 칵테일";

/// Header carrying the caller's member number on remote requests.
pub const MEMBER_ID_HEADER: &str = "X-Member-No";

/// Default base URL of the remote recipe service.
pub const DEFAULT_API_URL: &str = "http://localhost:8080";
