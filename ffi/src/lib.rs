//! C-ABI wrapper around `quake-core`.
//!
//! # Overview
//! Lets a mobile host build the feed request, execute it with its own HTTP
//! stack, and hand the response back for parsing, without linking to an
//! async runtime or serde directly. The presentation helpers (location
//! splitting, magnitude buckets) are exposed too so every platform renders
//! rows the same way.
//!
//! # Design
//! - Every `extern "C"` function wraps its body in `catch_unwind` so panics
//!   never cross the FFI boundary.
//! - `quake_parse_feed` and `quake_transport_failed` both return a single
//!   `FfiFeedResult` envelope, so the host folds every fetch outcome the
//!   same way whether or not a response arrived.
//! - The C caller owns all returned pointers and must call the matching
//!   `quake_free_*` function to release them.

pub mod types;

use std::os::raw::c_char;
use std::panic::catch_unwind;

use quake_core::{split_location, FeedQuery, HttpResponse, MagnitudeBucket};

use types::*;

// ---------------------------------------------------------------------------
// Client lifecycle
// ---------------------------------------------------------------------------

/// Create a new `QuakeClient` bound to `base_url`, the feed query endpoint.
///
/// Returns null if `base_url` is null or if an internal panic occurs.
/// The caller must free the returned pointer with `quake_client_free`.
#[unsafe(no_mangle)]
pub extern "C" fn quake_client_new(base_url: *const c_char) -> *mut FfiQuakeClient {
    catch_unwind(|| {
        if base_url.is_null() {
            return std::ptr::null_mut();
        }
        let url = unsafe { read_c_str(base_url) };
        let client = quake_core::QuakeClient::new(&url);
        Box::into_raw(Box::new(FfiQuakeClient { inner: client }))
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Free a client created by `quake_client_new`. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn quake_client_free(client: *mut FfiQuakeClient) {
    if !client.is_null() {
        let _ = catch_unwind(|| {
            drop(unsafe { Box::from_raw(client) });
        });
    }
}

// ---------------------------------------------------------------------------
// Request / response
// ---------------------------------------------------------------------------

/// Build the feed request.
///
/// `min_magnitude` and `order_by` are passed through verbatim; a null value
/// selects the default (`"6"` and `"time"`).
/// Returns null if `client` is null.
/// The caller must free the returned pointer with `quake_free_request`.
#[unsafe(no_mangle)]
pub extern "C" fn quake_build_feed_request(
    client: *const FfiQuakeClient,
    min_magnitude: *const c_char,
    order_by: *const c_char,
) -> *mut FfiHttpRequest {
    catch_unwind(|| {
        if client.is_null() {
            return std::ptr::null_mut();
        }
        let client = unsafe { &*client };
        let mut query = FeedQuery::default();
        if !min_magnitude.is_null() {
            query.min_magnitude = unsafe { read_c_str(min_magnitude) };
        }
        if !order_by.is_null() {
            query.order_by = unsafe { read_c_str(order_by) };
        }
        FfiHttpRequest::from_core(client.inner.build_feed_request(&query))
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Parse the response to a feed request.
///
/// A non-2xx status yields `Network`; a body that is not a GeoJSON feature
/// collection yields `Parse`; zero usable features yields `Empty`.
#[unsafe(no_mangle)]
pub extern "C" fn quake_parse_feed(
    client: *const FfiQuakeClient,
    response: *const FfiHttpResponse,
) -> *mut FfiFeedResult {
    catch_unwind(|| {
        if client.is_null() {
            return FfiFeedResult::null_arg("client");
        }
        if response.is_null() {
            return FfiFeedResult::null_arg("response");
        }
        let client = unsafe { &*client };
        let resp = unsafe { &*response };
        let body = if resp.body.is_null() {
            String::new()
        } else {
            unsafe { read_c_str(resp.body) }
        };
        let core_resp = HttpResponse {
            status: resp.status,
            headers: Vec::new(),
            body,
        };
        FfiFeedResult::from_result(client.inner.parse_feed_response(core_resp))
    })
    .unwrap_or_else(|_| FfiFeedResult::panic("panic in quake_parse_feed"))
}

/// Report that the host could not complete the round-trip.
///
/// `message` may be null. The result has no records and carries the same
/// user-facing message a parsed failure of that kind would.
#[unsafe(no_mangle)]
pub extern "C" fn quake_transport_failed(
    error: FfiTransportError,
    message: *const c_char,
) -> *mut FfiFeedResult {
    catch_unwind(|| {
        let message = if message.is_null() {
            String::from("transport failed")
        } else {
            unsafe { read_c_str(message) }
        };
        FfiFeedResult::from_error(error.into_feed_error(message))
    })
    .unwrap_or_else(|_| FfiFeedResult::panic("panic in quake_transport_failed"))
}

// ---------------------------------------------------------------------------
// Presentation helpers
// ---------------------------------------------------------------------------

/// Split a place string at its first `" of "`.
///
/// Returns null if `location` is null.
/// The caller must free the returned pointer with `quake_free_location`.
#[unsafe(no_mangle)]
pub extern "C" fn quake_split_location(location: *const c_char) -> *mut FfiLocationParts {
    catch_unwind(|| {
        if location.is_null() {
            return std::ptr::null_mut();
        }
        let location = unsafe { read_c_str(location) };
        FfiLocationParts::from_core(split_location(&location))
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Color bucket for a magnitude, 1 through 10.
#[unsafe(no_mangle)]
pub extern "C" fn quake_magnitude_bucket(magnitude: f64) -> u8 {
    MagnitudeBucket::from_magnitude(magnitude) as u8
}

/// Background color for a magnitude as `#RRGGBB`.
///
/// The caller must free the returned string with `quake_free_string`.
#[unsafe(no_mangle)]
pub extern "C" fn quake_magnitude_color(magnitude: f64) -> *mut c_char {
    catch_unwind(|| c_string(MagnitudeBucket::from_magnitude(magnitude).color_hex()))
        .unwrap_or(std::ptr::null_mut())
}

// ---------------------------------------------------------------------------
// Free functions
// ---------------------------------------------------------------------------

/// Free a request returned by `quake_build_feed_request`. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn quake_free_request(req: *mut FfiHttpRequest) {
    if req.is_null() {
        return;
    }
    let _ = catch_unwind(|| unsafe { FfiHttpRequest::free(req) });
}

/// Free a result returned by `quake_parse_feed` or `quake_transport_failed`.
/// Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn quake_free_result(result: *mut FfiFeedResult) {
    if result.is_null() {
        return;
    }
    let _ = catch_unwind(|| unsafe { FfiFeedResult::free(result) });
}

/// Free parts returned by `quake_split_location`. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn quake_free_location(parts: *mut FfiLocationParts) {
    if parts.is_null() {
        return;
    }
    let _ = catch_unwind(|| unsafe { FfiLocationParts::free(parts) });
}

/// Free a C string allocated by this library. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn quake_free_string(s: *mut c_char) {
    if !s.is_null() {
        let _ = catch_unwind(|| free_c_string(s));
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
