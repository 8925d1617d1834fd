use std::time::Duration;

/// Extensions accepted by the compressor, compared case-sensitively without the dot.
///
/// `jepg` is kept exactly as the filter has always matched it; `jpeg` files are skipped.
pub const ALLOWED_EXTENSIONS: &[&str] = &["png", "jpg", "jepg"];

pub const DEFAULT_TINIFY_ENDPOINT: &str = "https://api.tinify.com";
pub const TINIFY_SHRINK_PATH: &str = "/shrink";
pub const TINIFY_AUTH_USER: &str = "api";
pub const COMPRESSION_COUNT_HEADER: &str = "Compression-Count";

pub const API_KEY_ENV: &str = "TINIFY_API_KEY";
pub const ENDPOINT_ENV: &str = "TINIFY_ENDPOINT";

pub const HTTP_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 120;

pub const PROGRESS_SPINNER_TEMPLATE: &str = "{spinner:.green} {msg}";
pub const LISTING_SEPARATOR: &str = ">>";
pub const LISTING_SEPARATOR_REPEAT: usize = 40;

// Menu commands
pub const MENU_ALL: &str = "a";
pub const MENU_BACK: &str = "b";
pub const MENU_QUIT: &str = "q";

pub const MENU_LEGEND: &str = "Enter (a) -> compress every image in this directory;\n\
     Enter (b) -> go up to the parent directory;\n\
     Enter (q) -> quit;\n\
     Enter an index (0,1,2...) -> open a directory or pick a file to compress;\n";

pub const PATH_PROMPT: &str =
    "Directory or file name (e.g. images, joy.png; absolute and relative paths are supported)";
pub const MENU_PROMPT: &str = "Your choice";
