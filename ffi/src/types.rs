//! `#[repr(C)]` types for the FFI boundary.
//!
//! # Design
//! Each type mirrors a core type but uses C-compatible representations:
//! `*mut c_char` instead of `String`, boxed slices handed out as pointer plus
//! length instead of `Vec`, and enums with explicit discriminants. Conversion
//! functions live here to keep `lib.rs` focused on the `extern "C"` surface.

use std::ffi::{CStr, CString};
use std::os::raw::c_char;

use quake_core::http::HttpMethod;
use quake_core::outcome::{failure_message, MSG_NO_EARTHQUAKES};
use quake_core::{EarthquakeRecord, FailureKind, FeedError, LocationParts};

/// Opaque handle to a `QuakeClient`. C callers receive a pointer to this
/// and pass it back into every FFI function.
pub struct FfiQuakeClient {
    pub(crate) inner: quake_core::QuakeClient,
}

// ---------------------------------------------------------------------------
// Strings
// ---------------------------------------------------------------------------

/// Move `s` onto the C heap. Interior NUL bytes are dropped rather than
/// failing the whole call.
pub(crate) fn c_string(s: impl Into<String>) -> *mut c_char {
    let mut bytes = s.into().into_bytes();
    bytes.retain(|&b| b != 0);
    CString::new(bytes).unwrap_or_default().into_raw()
}

/// Borrow a caller-owned C string. Invalid UTF-8 is replaced, not rejected.
///
/// # Safety
/// `ptr` must be non-null and point to a NUL-terminated string that outlives
/// the returned value.
pub(crate) unsafe fn read_c_str(ptr: *const c_char) -> String {
    unsafe { CStr::from_ptr(ptr) }.to_string_lossy().into_owned()
}

/// Release a string from `c_string`. Null is ignored.
pub(crate) fn free_c_string(ptr: *mut c_char) {
    if !ptr.is_null() {
        drop(unsafe { CString::from_raw(ptr) });
    }
}

/// Hand out a vector as pointer plus length; null when empty.
fn into_raw_slice<T>(items: Vec<T>) -> (*mut T, u32) {
    if items.is_empty() {
        return (std::ptr::null_mut(), 0);
    }
    let len = items.len() as u32;
    let ptr = Box::into_raw(items.into_boxed_slice()) as *mut T;
    (ptr, len)
}

/// Take back a slice produced by `into_raw_slice`.
///
/// # Safety
/// `ptr` and `len` must come from one `into_raw_slice` call and not have been
/// reclaimed before.
unsafe fn from_raw_slice<T>(ptr: *mut T, len: u32) -> Box<[T]> {
    unsafe { Box::from_raw(std::ptr::slice_from_raw_parts_mut(ptr, len as usize)) }
}

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// HTTP method as a C enum.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FfiHttpMethod {
    Get = 0,
}

impl From<HttpMethod> for FfiHttpMethod {
    fn from(m: HttpMethod) -> Self {
        match m {
            HttpMethod::Get => FfiHttpMethod::Get,
        }
    }
}

/// A single HTTP header as a key-value pair of C strings.
#[repr(C)]
pub struct FfiHeader {
    pub key: *mut c_char,
    pub value: *mut c_char,
}

/// The feed request described as C-compatible plain data.
///
/// Built by `quake_build_feed_request`. The C caller executes the request
/// and passes the response back through `quake_parse_feed`.
#[repr(C)]
pub struct FfiHttpRequest {
    pub method: FfiHttpMethod,
    pub url: *mut c_char,
    pub headers: *mut FfiHeader,
    pub headers_len: u32,
}

impl FfiHttpRequest {
    pub(crate) fn from_core(req: quake_core::HttpRequest) -> *mut Self {
        let headers = req
            .headers
            .into_iter()
            .map(|(k, v)| FfiHeader {
                key: c_string(k),
                value: c_string(v),
            })
            .collect();
        let (headers, headers_len) = into_raw_slice(headers);

        Box::into_raw(Box::new(FfiHttpRequest {
            method: req.method.into(),
            url: c_string(req.url),
            headers,
            headers_len,
        }))
    }

    /// # Safety
    /// `req` must come from `from_core` and not have been freed.
    pub(crate) unsafe fn free(req: *mut Self) {
        let req = unsafe { Box::from_raw(req) };
        free_c_string(req.url);
        if !req.headers.is_null() {
            for header in unsafe { from_raw_slice(req.headers, req.headers_len) }.iter() {
                free_c_string(header.key);
                free_c_string(header.value);
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Response input (caller-provided, not heap-allocated by us)
// ---------------------------------------------------------------------------

/// An HTTP response described as C-compatible plain data.
///
/// The C caller constructs this after executing the feed request, then
/// passes a pointer to `quake_parse_feed`. The FFI layer reads but does not
/// free these fields. A null `body` is treated as empty.
#[repr(C)]
pub struct FfiHttpResponse {
    pub status: u16,
    pub body: *const c_char,
}

/// Why the host could not complete the round-trip itself.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FfiTransportError {
    /// No active network; the request was never sent.
    Offline = 0,
    /// The request exceeded the host's timeout.
    Timeout = 1,
    /// Any other connection or I/O failure.
    Other = 2,
}

impl FfiTransportError {
    pub(crate) fn into_feed_error(self, message: String) -> FeedError {
        match self {
            FfiTransportError::Offline => FeedError::Connectivity,
            FfiTransportError::Timeout => FeedError::Timeout,
            FfiTransportError::Other => FeedError::transport(message),
        }
    }
}

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// Outcome category of a feed result.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FfiResultCode {
    Success = 0,
    Empty = 1,
    Connectivity = 2,
    Network = 3,
    Parse = 4,
    Panic = 5,
    NullArg = 6,
}

impl From<FailureKind> for FfiResultCode {
    fn from(kind: FailureKind) -> Self {
        match kind {
            FailureKind::Connectivity => FfiResultCode::Connectivity,
            FailureKind::Network => FfiResultCode::Network,
            FailureKind::Parse => FfiResultCode::Parse,
        }
    }
}

/// One earthquake exposed to C.
#[repr(C)]
pub struct FfiEarthquake {
    pub magnitude: f64,
    pub location: *mut c_char,
    pub occurred_at_millis: i64,
    pub detail_url: *mut c_char,
}

impl From<EarthquakeRecord> for FfiEarthquake {
    fn from(record: EarthquakeRecord) -> Self {
        FfiEarthquake {
            magnitude: record.magnitude,
            location: c_string(record.location),
            occurred_at_millis: record.occurred_at_millis,
            detail_url: c_string(record.detail_url),
        }
    }
}

/// Result envelope for a feed fetch.
///
/// `Success` carries `records_len > 0` records and null messages. Every
/// other code carries no records; `message` is the text to show the user
/// and `detail` a diagnostic string (null for `Empty`). `http_status` is
/// set only when the server answered with a non-2xx status.
#[repr(C)]
pub struct FfiFeedResult {
    pub code: FfiResultCode,
    pub message: *mut c_char,
    pub detail: *mut c_char,
    pub http_status: u16,
    pub records: *mut FfiEarthquake,
    pub records_len: u32,
}

impl FfiFeedResult {
    pub(crate) fn from_result(result: Result<Vec<EarthquakeRecord>, FeedError>) -> *mut Self {
        match result {
            Ok(records) if records.is_empty() => Self::boxed(
                FfiResultCode::Empty,
                c_string(MSG_NO_EARTHQUAKES),
                std::ptr::null_mut(),
                0,
            ),
            Ok(records) => {
                let records = records.into_iter().map(FfiEarthquake::from).collect();
                let (records, records_len) = into_raw_slice(records);
                Box::into_raw(Box::new(FfiFeedResult {
                    code: FfiResultCode::Success,
                    message: std::ptr::null_mut(),
                    detail: std::ptr::null_mut(),
                    http_status: 0,
                    records,
                    records_len,
                }))
            }
            Err(err) => Self::from_error(err),
        }
    }

    pub(crate) fn from_error(err: FeedError) -> *mut Self {
        let http_status = match &err {
            FeedError::HttpStatus { status, .. } => *status,
            _ => 0,
        };
        let kind = err.kind();
        Self::boxed(
            kind.into(),
            c_string(failure_message(kind)),
            c_string(err.to_string()),
            http_status,
        )
    }

    pub(crate) fn null_arg(name: &str) -> *mut Self {
        Self::boxed(
            FfiResultCode::NullArg,
            c_string(format!("null argument: {name}")),
            std::ptr::null_mut(),
            0,
        )
    }

    pub(crate) fn panic(msg: &str) -> *mut Self {
        Self::boxed(
            FfiResultCode::Panic,
            c_string(msg),
            std::ptr::null_mut(),
            0,
        )
    }

    fn boxed(
        code: FfiResultCode,
        message: *mut c_char,
        detail: *mut c_char,
        http_status: u16,
    ) -> *mut Self {
        Box::into_raw(Box::new(FfiFeedResult {
            code,
            message,
            detail,
            http_status,
            records: std::ptr::null_mut(),
            records_len: 0,
        }))
    }

    /// # Safety
    /// `result` must come from one of the constructors above and not have
    /// been freed.
    pub(crate) unsafe fn free(result: *mut Self) {
        let result = unsafe { Box::from_raw(result) };
        free_c_string(result.message);
        free_c_string(result.detail);
        if !result.records.is_null() {
            for record in unsafe { from_raw_slice(result.records, result.records_len) }.iter() {
                free_c_string(record.location);
                free_c_string(record.detail_url);
            }
        }
    }
}

/// A place string split into its offset phrase and primary location.
#[repr(C)]
pub struct FfiLocationParts {
    pub offset: *mut c_char,
    pub primary: *mut c_char,
}

impl FfiLocationParts {
    pub(crate) fn from_core(parts: LocationParts) -> *mut Self {
        Box::into_raw(Box::new(FfiLocationParts {
            offset: c_string(parts.offset),
            primary: c_string(parts.primary),
        }))
    }

    /// # Safety
    /// `parts` must come from `from_core` and not have been freed.
    pub(crate) unsafe fn free(parts: *mut Self) {
        let parts = unsafe { Box::from_raw(parts) };
        free_c_string(parts.offset);
        free_c_string(parts.primary);
    }
}
