use std::time::Duration;

// Messages
pub const MESSAGE_API_KEY_REQUIRED: &str = "API Key is required";
pub const MESSAGE_INVALID_API_KEY: &str = "Invalid API Key";
pub const MESSAGE_VALIDATION_FAILED: &str = "Failed to validate API Key";
pub const MESSAGE_SERVER_CONFIG_ERROR: &str = "Server configuration error";
pub const MESSAGE_TARGET_URL_MISSING: &str = "Target URL missing";
pub const MESSAGE_CREDENTIAL_MISSING: &str = "API Key missing";
pub const MESSAGE_PROXY_FAILED: &str = "Proxy failed";
pub const MESSAGE_PATH_REQUIRED: &str = "Path is required";
pub const MESSAGE_FILE_REQUIRED: &str = "File is required";
pub const MESSAGE_INVALID_PROVIDER: &str = "Invalid provider";
pub const MESSAGE_UNKNOWN_ERROR: &str = "An error occurred";

// Cookies
pub const API_KEY_COOKIE: &str = "filestore_api_key";
pub const API_KEY_COOKIE_MAX_AGE_DAYS: i64 = 30;

// Headers
pub const API_KEY_HEADER: &str = "x-api-key";

// Never forwarded in either direction; the HTTP client and actix own these.
pub const HOP_BY_HOP_HEADERS: [&str; 8] = [
    "host",
    "connection",
    "keep-alive",
    "proxy-connection",
    "transfer-encoding",
    "te",
    "trailer",
    "upgrade",
];

// Routes
pub const ROOT_PATH: &str = "/";
pub const DASHBOARD_PATH: &str = "/dashboard";
pub const INDEX_FILE: &str = "index.html";
pub const CORS_MAX_AGE_SECS: usize = 3600;
pub const FILES_PROXY_PATH: &str = "/api/files";
pub const LOGIN_PATH: &str = "/api/auth/login";
pub const LOGOUT_PATH: &str = "/api/auth/logout";

// Upstream
pub const UPSTREAM_FILES_SEGMENT: &str = "files";
pub const PROXY_BODY_CHANNEL_CAPACITY: usize = 16;

// Env
pub const ENV_UPSTREAM_URL: &str = "FILESTORE_SERVICE_URL";
pub const ENV_SERVICE_API_KEY: &str = "FILESTORE_SERVICE_API_KEY";
pub const ENV_BIND_ADDR: &str = "BIND_ADDR";
pub const ENV_APP_ENV: &str = "APP_ENV";
pub const ENV_STATIC_DIR: &str = "STATIC_DIR";
pub const ENV_ALLOWED_ORIGINS: &str = "ALLOWED_ORIGINS";
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";
pub const DEFAULT_STATIC_DIR: &str = "./public";
pub const PRODUCTION: &str = "production";

// Client timing
pub const FILTER_DEBOUNCE: Duration = Duration::from_millis(500);
pub const SUCCESS_DISPLAY: Duration = Duration::from_millis(1500);
pub const ERROR_DISPLAY: Duration = Duration::from_millis(3000);

// Upload defaults
pub const DEFAULT_UPLOAD_PATH: &str = "/";

pub const MIME_OCTET_STREAM: &str = "application/octet-stream";
