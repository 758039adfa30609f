/// Page size requested from paginated backend endpoints
pub const DEFAULT_PAGE_SIZE: u32 = 100;

/// Safety limit on pages fetched for a single feed
pub const DEFAULT_MAX_PAGES: u32 = 1000;

/// Alpha channel used for translucent category and progress tints
pub const TINT_ALPHA: f64 = 0.25;

/// Progress gradient start (0%)
pub const PROGRESS_GREEN: (u8, u8, u8) = (34, 197, 94);

/// Progress gradient end (100%)
pub const PROGRESS_RED: (u8, u8, u8) = (239, 68, 68);

/// Query parameter carrying the recurrence scope on PATCH/DELETE
pub const RECURRENCE_SCOPE_PARAM: &str = "recurrenceScope";
